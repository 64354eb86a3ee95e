//! The mechanic shared between threads, and loading its config from disk.

use std::sync::Arc;
use std::thread;

use pearl_core::headless::{HeadlessPlayer, HeadlessWorld};
use pearl_core::{
    CancelRefund, InteractionHand, InteractionResult, PearlConfig, PearlPlayer, PlayerPearls,
    SharedPlayerPearls, UseItemEvent,
};
use pearl_utils::Identifier;
use pearl_utils::experience::Experience;

#[test]
fn events_from_several_threads() {
    let world = Arc::new(HeadlessWorld::new());
    let pearl = Identifier::vanilla_static("ender_pearl");
    let players: Vec<Arc<HeadlessPlayer>> = (0..8)
        .map(|i| {
            let player = HeadlessPlayer::new(format!("Player{i}"), world.clone());
            player.set_experience(Experience::with_level(10, 0));
            player.set_held(InteractionHand::MainHand, 1);
            player.look_up_crouching();
            Arc::new(player)
        })
        .collect();
    let pearls = Arc::new(SharedPlayerPearls::new(PlayerPearls::default()));

    thread::scope(|scope| {
        for player in &players {
            let pearls = pearls.clone();
            let pearl = &pearl;
            scope.spawn(move || {
                let result = pearls.on_use_item(&UseItemEvent {
                    player: player.as_ref(),
                    item: pearl,
                    hand: InteractionHand::MainHand,
                });
                assert_eq!(result, InteractionResult::Fail);
            });
        }
    });
    assert_eq!(pearls.pending_count(), 8);

    // half of them leave while the server ticks the rest
    thread::scope(|scope| {
        for player in players.iter().step_by(2) {
            let pearls = pearls.clone();
            scope.spawn(move || assert!(pearls.on_disconnect(player.uuid())));
        }
        scope.spawn(|| {
            pearls.on_server_tick(&players);
        });
    });

    assert_eq!(pearls.pending_count(), 4);
    for (i, player) in players.iter().enumerate() {
        assert_eq!(pearls.is_pending(player.uuid()), i % 2 == 1);
    }

    let pearls = Arc::try_unwrap(pearls).expect("no other handles left").into_inner();
    assert_eq!(pearls.store().len(), 4);
}

#[test]
fn config_loads_from_json5_file() {
    let path = std::env::temp_dir().join(format!("pearl-config-{}.json5", uuid::Uuid::new_v4()));
    std::fs::write(
        &path,
        r"{
            // a stricter server
            max_level_loss: 3,
            movement_threshold: 1.5,
            cancel_refund: { mode: 'fraction', divisor: 3 },
        }",
    )
    .expect("write config");

    let config = PearlConfig::load(&path);
    std::fs::remove_file(&path).expect("remove config");
    let config = config.expect("valid config");

    assert_eq!(config.max_level_loss, 3);
    assert!((config.movement_threshold - 1.5).abs() < f64::EPSILON);
    assert_eq!(config.cancel_refund, CancelRefund::Fraction { divisor: 3 });
    assert_eq!(config.max_orbs, PearlConfig::default().max_orbs);
}

#[test]
fn missing_config_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("pearl-missing-{}.json5", uuid::Uuid::new_v4()));
    assert!(PearlConfig::load(&path).is_err());
}

//! Per-tick experience drain for pending players.
//!
//! Every tick a pending player owes `xp_needed_for_next_level * drain_rate`
//! points. The fractional part is carried in the request's accumulator and
//! only whole points are taken from the player.

use crate::config::PearlConfig;
use crate::host::{PearlPlayer, SoundEvent, SoundSource};
use crate::pending::PendingStore;
use crate::random::PearlRandom;

/// Volume of the drain tick sound.
const DRAIN_SOUND_VOLUME: f32 = 0.1;

/// Points owed this tick before carrying the remainder. The requirement is
/// clamped to at least one point so a misreporting host still drains.
#[must_use]
pub fn points_for_tick<P: PearlPlayer>(player: &P, config: &PearlConfig) -> f64 {
    f64::from(player.xp_needed_for_next_level().max(1)) * config.drain_rate
}

/// Takes up to `amount` points from the player and returns how many were taken.
///
/// When the current level does not hold enough points the player drops a level,
/// the new level's bar is filled, and `amount` is taken from that. At level 0
/// only what the bar holds can be taken.
pub fn remove_points<P: PearlPlayer>(player: &P, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }

    let in_level = player.experience_points();
    let level = player.experience_level();
    if in_level >= amount {
        player.give_experience_points(-amount);
        amount
    } else if level > 0 {
        player.set_experience_level(level - 1);
        player.set_experience_points(player.xp_needed_for_next_level());
        player.give_experience_points(-amount);
        amount
    } else if in_level > 0 {
        player.give_experience_points(-in_level);
        in_level
    } else {
        0
    }
}

/// Runs one drain step for a pending player. Returns the points removed this tick.
pub fn drain_tick<P: PearlPlayer, R: PearlRandom>(
    store: &mut PendingStore,
    config: &PearlConfig,
    rng: &mut R,
    player: &P,
) -> i32 {
    let id = player.uuid();
    let whole = store.accumulate(id, points_for_tick(player, config));
    if whole < 1 {
        return 0;
    }

    let removed = remove_points(player, whole);
    if removed > 0 {
        store.add_drained(id, removed);
        let pitch = 0.8 + 0.4 * rng.next_f32();
        player.play_sound_to_self(
            SoundEvent::ExperienceOrbPickup,
            SoundSource::Players,
            DRAIN_SOUND_VOLUME,
            pitch,
        );
    }
    removed
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pearl_utils::experience::{Experience, xp_needed_for_level};
    use pearl_utils::math::Vector3;

    use super::*;
    use crate::headless::{HeadlessPlayer, HeadlessWorld};
    use crate::pending::PendingRequest;
    use crate::random::SequenceRandom;

    fn pending_player(store: &mut PendingStore, level: i32, points: i32) -> HeadlessPlayer {
        let player = HeadlessPlayer::new("Requester", Arc::new(HeadlessWorld::new()));
        player.set_experience(Experience::with_level(level, points));
        store
            .begin_pending(player.uuid(), PendingRequest::capture(&player))
            .expect("begin");
        player
    }

    #[test]
    fn takes_points_from_current_level() {
        let player = HeadlessPlayer::new("A", Arc::new(HeadlessWorld::new()));
        player.set_experience(Experience::with_level(3, 10));
        assert_eq!(remove_points(&player, 4), 4);
        assert_eq!(player.experience(), Experience::with_level(3, 6));
    }

    #[test]
    fn drops_a_level_when_bar_is_short() {
        let player = HeadlessPlayer::new("A", Arc::new(HeadlessWorld::new()));
        player.set_experience(Experience::with_level(3, 1));
        assert_eq!(remove_points(&player, 2), 2);
        let xp = player.experience();
        assert_eq!(xp.level(), 2);
        assert_eq!(xp.points(), xp_needed_for_level(2) - 1 - 2);
    }

    #[test]
    fn level_zero_only_gives_what_it_has() {
        let player = HeadlessPlayer::new("A", Arc::new(HeadlessWorld::new()));
        player.set_experience(Experience::with_level(0, 1));
        assert_eq!(remove_points(&player, 3), 1);
        assert_eq!(remove_points(&player, 3), 0);
        assert_eq!(player.experience(), Experience::new());
    }

    #[test]
    fn drain_carries_fraction_and_counts_points() {
        let mut store = PendingStore::new();
        // level 30 needs 112 points, so each tick owes 0.56 points
        let player = pending_player(&mut store, 30, 50);
        let config = PearlConfig::default();
        let mut rng = SequenceRandom::constant(0.5);

        let drained: Vec<i32> = (0..4)
            .map(|_| drain_tick(&mut store, &config, &mut rng, &player))
            .collect();
        assert_eq!(drained, vec![0, 1, 0, 1]);
        assert_eq!(store.drained(player.uuid()), 2);
        assert_eq!(player.experience().points(), 48);

        let sounds = player.private_sounds();
        assert_eq!(sounds.len(), 2);
        assert!(sounds.iter().all(|s| s.sound == SoundEvent::ExperienceOrbPickup));
        assert!(sounds.iter().all(|s| (s.pitch - 1.0).abs() < 1e-6));
        assert!(sounds.iter().all(|s| (s.volume - 0.1).abs() < 1e-6));
    }

    #[test]
    fn accumulator_stays_in_unit_range() {
        let mut store = PendingStore::new();
        let player = pending_player(&mut store, 20, 0);
        let config = PearlConfig::default();
        let mut rng = SequenceRandom::constant(0.0);
        for _ in 0..500 {
            drain_tick(&mut store, &config, &mut rng, &player);
            let request = store.snapshot(player.uuid()).expect("pending");
            assert!((0.0..1.0).contains(&request.accumulated_fraction));
        }
    }

    #[test]
    fn empty_bar_drains_silently() {
        let mut store = PendingStore::new();
        let player = pending_player(&mut store, 1, 0);
        player.set_experience(Experience::new());
        let config = PearlConfig::default();
        let mut rng = SequenceRandom::constant(0.5);

        // level 0 owes 0.035 points a tick, so whole points come due along the way
        for _ in 0..100 {
            assert_eq!(drain_tick(&mut store, &config, &mut rng, &player), 0);
        }
        assert_eq!(store.drained(player.uuid()), 0);
        assert!(player.private_sounds().is_empty());
    }

    #[test]
    fn not_pending_drains_nothing() {
        let mut store = PendingStore::new();
        let player = HeadlessPlayer::new("A", Arc::new(HeadlessWorld::new()));
        player.set_experience(Experience::with_level(10, 5));
        player.set_position(Vector3::new(1.0, 2.0, 3.0));
        let mut rng = SequenceRandom::constant(0.0);
        for _ in 0..1000 {
            assert_eq!(drain_tick(&mut store, &PearlConfig::default(), &mut rng, &player), 0);
        }
        assert_eq!(player.experience(), Experience::with_level(10, 5));
    }
}

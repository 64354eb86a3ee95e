//! Recognizes the "crouch, look up, use a pearl" request gesture.
//!
//! Vanilla item use is left alone unless the whole gesture matches, so a player
//! can still throw pearls normally by not crouching or not looking up.

use pearl_utils::Identifier;

use crate::config::PearlConfig;
use crate::host::{
    InteractionHand, InteractionResult, PearlPlayer, PearlWorld, SoundEvent, SoundSource,
};
use crate::pending::{PendingRequest, PendingStore};

/// Overlay shown when a request is opened.
pub const PENDING_MESSAGE: &str = "Pending teleport";
/// Overlay shown when a request is refused for lack of experience.
pub const NO_EXPERIENCE_MESSAGE: &str = "Teleport cancelled due to lack of XP";

/// A player used an item.
#[derive(Debug)]
pub struct UseItemEvent<'a, P> {
    /// The player.
    pub player: &'a P,
    /// The item in the used hand.
    pub item: &'a Identifier,
    /// The hand the item is in.
    pub hand: InteractionHand,
}

/// How an item use was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Wrong item, wrong pitch or not crouching.
    None,
    /// The gesture matched but the player already has an open request.
    AlreadyPending,
    /// The gesture matched but the player has no levels to spend.
    NoExperience,
    /// A valid request.
    Request,
}

/// Whether `pitch` is close enough to straight up to open a request.
#[must_use]
pub fn is_request_pitch(pitch: f32, config: &PearlConfig) -> bool {
    (pitch - config.request_pitch).abs() <= config.request_pitch_tolerance
}

/// Whether `pitch` is far enough down to accept a request.
#[must_use]
pub fn is_accept_pitch(pitch: f32, config: &PearlConfig) -> bool {
    pitch >= config.accept_pitch
}

/// Classifies an item use without side effects.
#[must_use]
pub fn classify<P: PearlPlayer>(
    store: &PendingStore,
    config: &PearlConfig,
    event: &UseItemEvent<'_, P>,
) -> Gesture {
    let player = event.player;
    if *event.item != config.trigger_item
        || !is_request_pitch(player.pitch(), config)
        || !player.is_crouching()
    {
        return Gesture::None;
    }
    if store.is_pending(player.uuid()) {
        return Gesture::AlreadyPending;
    }
    if player.experience_level() <= 0 {
        return Gesture::NoExperience;
    }
    Gesture::Request
}

/// Handles an item use, opening a request when the gesture is valid.
pub fn on_use_item<P: PearlPlayer>(
    store: &mut PendingStore,
    config: &PearlConfig,
    event: &UseItemEvent<'_, P>,
) -> InteractionResult {
    let player = event.player;
    match classify(store, config, event) {
        Gesture::None | Gesture::AlreadyPending => InteractionResult::Pass,
        Gesture::NoExperience => {
            player.send_overlay(NO_EXPERIENCE_MESSAGE);
            player.world().play_sound(
                player.position(),
                SoundEvent::EnderEyeDeath,
                SoundSource::Players,
                1.0,
                1.0,
            );
            InteractionResult::Fail
        }
        Gesture::Request => {
            let request = PendingRequest::capture(player);
            if let Err(err) = store.begin_pending(player.uuid(), request) {
                log::warn!("Could not open teleport request for {}: {err}", player.name());
                return InteractionResult::Pass;
            }

            // the pearl is the entry fee; it never leaves the hand as a projectile
            player.consume_item(event.hand, 1);
            player.send_overlay(PENDING_MESSAGE);
            player.world().play_sound(
                request.origin,
                SoundEvent::EnderPearlThrow,
                SoundSource::Players,
                1.0,
                1.0,
            );
            log::info!(
                "Player {} opened a teleport request (level {}, pitch {:.1})",
                player.name(),
                request.original_level,
                player.pitch()
            );
            InteractionResult::Fail
        }
    }
}

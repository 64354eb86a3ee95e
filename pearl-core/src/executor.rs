//! Closing a pending request, either by teleporting or by cancelling.
//!
//! Both paths remove the request from the store first and return `false`
//! without touching the player if there was nothing to close.

use pearl_utils::math::Vector3;

use crate::config::PearlConfig;
use crate::host::{PearlPlayer, PearlWorld, SoundEvent, SoundSource};
use crate::pending::PendingStore;
use crate::random::PearlRandom;

/// Overlay shown to the acceptor.
pub const ACCEPTED_MESSAGE: &str = "Accepted teleport";
/// Overlay shown to a requester whose request was cancelled.
pub const CANCELLED_MESSAGE: &str = "Teleport cancelled";

/// Splits `total` points into between 1 and `max_orbs` orbs, each worth at
/// least one point, summing to exactly `total`.
pub fn split_orbs<R: PearlRandom>(rng: &mut R, total: i32, max_orbs: i32) -> Vec<i32> {
    if total <= 0 {
        return Vec::new();
    }
    let count = rng.next_int_inclusive(1, max_orbs.max(1)).min(total);
    let base = total / count;
    let extra = total % count;
    (0..count).map(|i| base + i32::from(i < extra)).collect()
}

/// Drops `total` points as orbs around `position`.
pub fn spawn_orbs<W: PearlWorld, R: PearlRandom>(
    world: &W,
    rng: &mut R,
    config: &PearlConfig,
    position: Vector3<f64>,
    total: i32,
) {
    for value in split_orbs(rng, total, config.max_orbs) {
        let dx = (rng.next_f64() - 0.5) * 2.0 * config.orb_spread;
        let dz = (rng.next_f64() - 0.5) * 2.0 * config.orb_spread;
        world.spawn_experience_orb(position.offset(dx, 0.5, dz), value);
    }
}

/// Teleports `pending` to `acceptor` and drops half the drained points at
/// each end of the trip.
pub fn complete<P: PearlPlayer, R: PearlRandom>(
    store: &mut PendingStore,
    config: &PearlConfig,
    rng: &mut R,
    pending: &P,
    acceptor: &P,
) -> bool {
    let Some(request) = store.end_pending(pending.uuid()) else {
        return false;
    };

    let departure = pending.position();
    let destination = acceptor.position();

    pending.teleport_to(destination);
    acceptor.send_overlay(ACCEPTED_MESSAGE);
    pending.world().play_sound(
        destination,
        SoundEvent::EndermanTeleport,
        SoundSource::Players,
        1.0,
        1.0,
    );

    let reward = request.drained_total / 2;
    if reward > 0 {
        spawn_orbs(pending.world(), rng, config, departure, reward);
        spawn_orbs(pending.world(), rng, config, destination, reward);
    }

    log::debug!(
        "Teleported {} to {} (drained {}, reward {reward} per side)",
        pending.name(),
        acceptor.name(),
        request.drained_total
    );
    true
}

/// Cancels `pending`'s request, applying the configured refund policy.
pub fn cancel<P: PearlPlayer, R: PearlRandom>(
    store: &mut PendingStore,
    config: &PearlConfig,
    rng: &mut R,
    pending: &P,
) -> bool {
    let Some(request) = store.end_pending(pending.uuid()) else {
        return false;
    };

    let position = pending.position();
    pending.world().play_sound(
        position,
        SoundEvent::EnderEyeDeath,
        SoundSource::Players,
        1.0,
        1.0,
    );
    pending.send_overlay(CANCELLED_MESSAGE);

    let refund = config.cancel_refund.refund_for(request.drained_total);
    if refund > 0 {
        spawn_orbs(pending.world(), rng, config, position, refund);
    }

    log::debug!(
        "Cancelled teleport request of {} (drained {}, refunded {refund})",
        pending.name(),
        request.drained_total
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, ThreadRandom};

    #[test]
    fn split_is_exact_and_bounded() {
        let mut rng = ThreadRandom;
        for total in 1..200 {
            for _ in 0..20 {
                let orbs = split_orbs(&mut rng, total, 11);
                assert!((1..=11).contains(&orbs.len()));
                assert!(orbs.iter().all(|&v| v >= 1));
                assert_eq!(orbs.iter().sum::<i32>(), total);
            }
        }
    }

    #[test]
    fn split_caps_count_at_total() {
        let mut rng = SequenceRandom::constant(0.99);
        assert_eq!(split_orbs(&mut rng, 3, 11), vec![1, 1, 1]);
        assert_eq!(split_orbs(&mut rng, 25, 11), vec![3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn split_nothing() {
        let mut rng = ThreadRandom;
        assert!(split_orbs(&mut rng, 0, 11).is_empty());
        assert!(split_orbs(&mut rng, -4, 11).is_empty());
    }
}

//! Per-tick resolution of pending teleport requests.
//!
//! Once per server tick every pending player is checked for cancellation,
//! slowed, drained, and matched against the other players. The player list
//! handed to [`tick`] is the snapshot for the whole pass: it is walked in the
//! host's order and never reloaded mid-tick.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::PearlConfig;
use crate::drain;
use crate::executor;
use crate::gesture::is_accept_pitch;
use crate::host::{EffectInstance, MobEffect, PearlPlayer};
use crate::pending::{PendingRequest, PendingStore};
use crate::random::PearlRandom;

/// Why a pending request was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CancelReason {
    /// The player lost this many levels without refilling the bar.
    LevelsLost(i32),
    /// The player walked this many blocks away from where they asked.
    Moved(f64),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelsLost(levels) => write!(f, "after losing {levels} levels"),
            Self::Moved(distance) => write!(f, "due to movement (moved {distance:.2} blocks)"),
        }
    }
}

/// What happened to one pending player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still pending.
    Continue,
    /// The request was cancelled.
    Cancelled(CancelReason),
    /// The request was accepted by the player with this UUID.
    Completed(Uuid),
}

/// Summary of one resolver pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Pending players that were evaluated.
    pub evaluated: usize,
    /// Requests cancelled this tick.
    pub cancelled: usize,
    /// Requests completed this tick.
    pub completed: usize,
}

/// Why a pending request has to be dropped, if it does.
///
/// Cancels when the player lost `max_level_loss` or more levels without being
/// further along the bar than at the start, or moved more than
/// `movement_threshold` blocks. Level loss is reported first when both apply.
#[must_use]
pub fn cancel_reason<P: PearlPlayer>(
    request: &PendingRequest,
    config: &PearlConfig,
    player: &P,
) -> Option<CancelReason> {
    let lost = request.levels_lost(player.experience_level());
    if lost >= config.max_level_loss && player.experience_progress() <= request.original_progress {
        return Some(CancelReason::LevelsLost(lost));
    }
    let moved = request.distance_moved(&player.position());
    (moved > config.movement_threshold).then_some(CancelReason::Moved(moved))
}

/// Whether a pending request has to be dropped.
#[must_use]
pub fn should_cancel<P: PearlPlayer>(
    request: &PendingRequest,
    config: &PearlConfig,
    player: &P,
) -> bool {
    cancel_reason(request, config, player).is_some()
}

/// Whether `candidate` is currently making the accept gesture for `pending`.
#[must_use]
pub fn is_acceptor<P: PearlPlayer>(
    store: &PendingStore,
    config: &PearlConfig,
    pending: &P,
    candidate: &P,
) -> bool {
    let id = candidate.uuid();
    id != pending.uuid()
        && candidate.is_connected()
        && !store.is_pending(id)
        && candidate.is_crouching()
        && is_accept_pitch(candidate.pitch(), config)
}

/// First player in list order making the accept gesture.
///
/// This is a plain linear scan: the earliest match in the host's player list
/// wins, with no sorting by distance or waiting time.
#[must_use]
pub fn find_acceptor<'a, P: PearlPlayer>(
    store: &PendingStore,
    config: &PearlConfig,
    pending: &P,
    players: &'a [Arc<P>],
) -> Option<&'a Arc<P>> {
    players
        .iter()
        .find(|candidate| is_acceptor::<P>(store, config, pending, candidate))
}

/// Runs one tick for one pending player.
pub fn evaluate<P: PearlPlayer, R: PearlRandom>(
    store: &mut PendingStore,
    config: &PearlConfig,
    rng: &mut R,
    pending: &P,
    players: &[Arc<P>],
) -> TickOutcome {
    let reason = match store.snapshot(pending.uuid()) {
        Ok(request) => cancel_reason(request, config, pending),
        Err(_) => return TickOutcome::Continue,
    };
    if let Some(reason) = reason {
        log::debug!("Cancelling teleport request of {} {reason}", pending.name());
        executor::cancel(store, config, rng, pending);
        return TickOutcome::Cancelled(reason);
    }

    pending.add_effect(EffectInstance::hidden(
        MobEffect::Slowness,
        config.slowness_duration,
        config.slowness_amplifier,
    ));
    drain::drain_tick(store, config, rng, pending);

    if let Some(acceptor) = find_acceptor(store, config, pending, players) {
        let acceptor_id = acceptor.uuid();
        executor::complete(store, config, rng, pending, acceptor.as_ref());
        return TickOutcome::Completed(acceptor_id);
    }
    TickOutcome::Continue
}

/// Runs one resolver pass over the connected players.
#[tracing::instrument(level = "trace", skip_all, name = "pearl_tick", fields(players = players.len()))]
pub fn tick<P: PearlPlayer, R: PearlRandom>(
    store: &mut PendingStore,
    config: &PearlConfig,
    rng: &mut R,
    players: &[Arc<P>],
) -> TickReport {
    let mut report = TickReport::default();
    if store.is_empty() {
        return report;
    }

    for player in players {
        if !player.is_connected() || !store.is_pending(player.uuid()) {
            continue;
        }
        report.evaluated += 1;
        match evaluate(store, config, rng, player.as_ref(), players) {
            TickOutcome::Continue => {}
            TickOutcome::Cancelled(_) => report.cancelled += 1,
            TickOutcome::Completed(_) => report.completed += 1,
        }
    }

    if report.cancelled + report.completed > 0 {
        tracing::debug!(
            evaluated = report.evaluated,
            cancelled = report.cancelled,
            completed = report.completed,
            "Resolved pearl requests"
        );
    }
    report
}

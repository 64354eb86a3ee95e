//! Snapshot and running totals of one pending teleport request.
//!
//! Captured when the request gesture is accepted. The snapshot half
//! (`original_*`, `origin`) never changes afterwards; the drain half is
//! updated every tick while the request stays open.

use pearl_utils::math::Vector3;

use crate::host::PearlPlayer;

/// State of a player waiting for someone to accept their teleport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRequest {
    /// Experience level when the request was made.
    pub original_level: i32,
    /// Experience progress when the request was made.
    pub original_progress: f32,
    /// Position when the request was made.
    pub origin: Vector3<f64>,
    /// Points drained so far.
    pub drained_total: i32,
    /// Drain carried over between ticks, always in `[0, 1)`.
    pub accumulated_fraction: f64,
}

impl PendingRequest {
    /// A request with nothing drained yet.
    #[must_use]
    pub const fn new(original_level: i32, original_progress: f32, origin: Vector3<f64>) -> Self {
        Self {
            original_level,
            original_progress,
            origin,
            drained_total: 0,
            accumulated_fraction: 0.0,
        }
    }

    /// Snapshots a player's current experience and position.
    #[must_use]
    pub fn capture<P: PearlPlayer>(player: &P) -> Self {
        Self::new(
            player.experience_level(),
            player.experience_progress(),
            player.position(),
        )
    }

    /// Levels lost since the request was made (negative if levels were gained).
    #[must_use]
    pub const fn levels_lost(&self, current_level: i32) -> i32 {
        self.original_level.saturating_sub(current_level)
    }

    /// Distance between `position` and where the request was made.
    #[must_use]
    pub fn distance_moved(&self, position: &Vector3<f64>) -> f64 {
        self.origin.distance(position)
    }

    /// Adds fractional drain and takes out the whole points it now holds.
    ///
    /// Non-positive or non-finite input is ignored. The remainder stays in `[0, 1)`.
    pub fn accumulate(&mut self, points: f64) -> i32 {
        if !points.is_finite() || points <= 0.0 {
            return 0;
        }
        let total = self.accumulated_fraction + points;
        let whole = total.floor();
        self.accumulated_fraction = (total - whole).clamp(0.0, 1.0 - f64::EPSILON);
        whole.min(f64::from(i32::MAX)) as i32
    }
}

//! Per-player pending teleport state.
//!
//! The store owns every open request, keyed by the requester's UUID. Having an
//! entry is what "pending" means; there is no separate flag. The store never
//! talks to the game engine.

mod request;

pub use request::PendingRequest;

use rustc_hash::FxHashMap;
use thiserror::Error;
use uuid::Uuid;

/// An error returned by [`PendingStore`] lookups and inserts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingError {
    /// The player already has an open request.
    #[error("Player {0} already has a pending teleport request")]
    AlreadyPending(Uuid),
    /// The player has no open request.
    #[error("Player {0} has no pending teleport request")]
    NotPending(Uuid),
}

/// All open teleport requests.
#[derive(Debug, Default)]
pub struct PendingStore {
    requests: FxHashMap<Uuid, PendingRequest>,
}

impl PendingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has an open request.
    #[must_use]
    pub fn is_pending(&self, id: Uuid) -> bool {
        self.requests.contains_key(&id)
    }

    /// Opens a request. Fails without touching the existing one if `id` is already pending.
    pub fn begin_pending(&mut self, id: Uuid, request: PendingRequest) -> Result<(), PendingError> {
        if self.requests.contains_key(&id) {
            return Err(PendingError::AlreadyPending(id));
        }
        self.requests.insert(id, request);
        Ok(())
    }

    /// Drops everything stored for `id`. Calling it again is harmless.
    pub fn end_pending(&mut self, id: Uuid) -> Option<PendingRequest> {
        self.requests.remove(&id)
    }

    /// The open request of `id`.
    pub fn snapshot(&self, id: Uuid) -> Result<&PendingRequest, PendingError> {
        self.requests.get(&id).ok_or(PendingError::NotPending(id))
    }

    /// Adds to the drained total. Ignored when `id` is not pending or `amount` is not positive.
    pub fn add_drained(&mut self, id: Uuid, amount: i32) {
        if amount <= 0 {
            return;
        }
        if let Some(request) = self.requests.get_mut(&id) {
            request.drained_total = request.drained_total.saturating_add(amount);
        }
    }

    /// Points drained from `id` so far, or 0 when not pending.
    #[must_use]
    pub fn drained(&self, id: Uuid) -> i32 {
        self.requests.get(&id).map_or(0, |r| r.drained_total)
    }

    /// Feeds fractional drain into `id`'s accumulator and returns the whole points taken out.
    pub fn accumulate(&mut self, id: Uuid, points: f64) -> i32 {
        self.requests
            .get_mut(&id)
            .map_or(0, |request| request.accumulate(points))
    }

    /// Number of open requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no request is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// UUIDs with an open request, in no particular order.
    pub fn pending_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.requests.keys().copied()
    }
}

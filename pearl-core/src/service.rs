//! Entry points a host wires into its event callbacks.
//!
//! [`PlayerPearls`] owns the pending store, the config and the random source,
//! and exposes one method per engine event: item use, end of server tick, and
//! disconnect. Hosts that deliver those events from more than one thread use
//! [`SharedPlayerPearls`], which puts the whole thing behind a single mutex.

use std::sync::Arc;

use pearl_utils::locks::SyncMutex;
use uuid::Uuid;

use crate::config::PearlConfig;
use crate::gesture::{self, UseItemEvent};
use crate::host::{InteractionResult, PearlPlayer};
use crate::pending::PendingStore;
use crate::random::{PearlRandom, ThreadRandom};
use crate::resolver::{self, TickReport};

/// The pearl teleport mechanic for one server.
#[derive(Debug)]
pub struct PlayerPearls<R = ThreadRandom> {
    store: PendingStore,
    config: PearlConfig,
    rng: R,
}

impl PlayerPearls<ThreadRandom> {
    /// Creates the mechanic with thread-local randomness.
    #[must_use]
    pub fn new(config: PearlConfig) -> Self {
        Self::with_random(config, ThreadRandom)
    }
}

impl Default for PlayerPearls<ThreadRandom> {
    fn default() -> Self {
        Self::new(PearlConfig::default())
    }
}

impl<R: PearlRandom> PlayerPearls<R> {
    /// Creates the mechanic with a given random source.
    #[must_use]
    pub fn with_random(config: PearlConfig, rng: R) -> Self {
        log::info!(
            "Player pearls initialized (drain rate {}, max level loss {}, refund {:?})",
            config.drain_rate,
            config.max_level_loss,
            config.cancel_refund
        );
        Self {
            store: PendingStore::new(),
            config,
            rng,
        }
    }

    /// Item use callback. `Fail` means the engine must skip its default handling.
    pub fn on_use_item<P: PearlPlayer>(&mut self, event: &UseItemEvent<'_, P>) -> InteractionResult {
        gesture::on_use_item(&mut self.store, &self.config, event)
    }

    /// End-of-tick callback with the currently connected players, in server list order.
    pub fn on_server_tick<P: PearlPlayer>(&mut self, players: &[Arc<P>]) -> TickReport {
        resolver::tick(&mut self.store, &self.config, &mut self.rng, players)
    }

    /// Disconnect callback. Drops the player's request without refund or reward.
    /// Returns whether a request was dropped.
    pub fn on_disconnect(&mut self, id: Uuid) -> bool {
        let dropped = self.store.end_pending(id).is_some();
        if dropped {
            log::debug!("Dropped pending teleport of disconnected player {id}");
        }
        dropped
    }

    /// Whether `id` has an open request.
    #[must_use]
    pub fn is_pending(&self, id: Uuid) -> bool {
        self.store.is_pending(id)
    }

    /// The pending store.
    #[must_use]
    pub const fn store(&self) -> &PendingStore {
        &self.store
    }

    /// The active config.
    #[must_use]
    pub const fn config(&self) -> &PearlConfig {
        &self.config
    }
}

/// [`PlayerPearls`] behind one mutex, for hosts that deliver events from several threads.
#[derive(Debug)]
pub struct SharedPlayerPearls<R = ThreadRandom> {
    inner: SyncMutex<PlayerPearls<R>>,
}

impl<R: PearlRandom> SharedPlayerPearls<R> {
    /// Wraps a [`PlayerPearls`].
    #[must_use]
    pub const fn new(pearls: PlayerPearls<R>) -> Self {
        Self {
            inner: SyncMutex::new(pearls),
        }
    }

    /// See [`PlayerPearls::on_use_item`].
    pub fn on_use_item<P: PearlPlayer>(&self, event: &UseItemEvent<'_, P>) -> InteractionResult {
        self.inner.lock().on_use_item(event)
    }

    /// See [`PlayerPearls::on_server_tick`].
    pub fn on_server_tick<P: PearlPlayer>(&self, players: &[Arc<P>]) -> TickReport {
        self.inner.lock().on_server_tick(players)
    }

    /// See [`PlayerPearls::on_disconnect`].
    pub fn on_disconnect(&self, id: Uuid) -> bool {
        self.inner.lock().on_disconnect(id)
    }

    /// See [`PlayerPearls::is_pending`].
    #[must_use]
    pub fn is_pending(&self, id: Uuid) -> bool {
        self.inner.lock().is_pending(id)
    }

    /// Number of open requests.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().store().len()
    }

    /// Unwraps the inner [`PlayerPearls`].
    #[must_use]
    pub fn into_inner(self) -> PlayerPearls<R> {
        self.inner.into_inner()
    }
}

impl<R: PearlRandom> From<PlayerPearls<R>> for SharedPlayerPearls<R> {
    fn from(pearls: PlayerPearls<R>) -> Self {
        Self::new(pearls)
    }
}

//! In-memory host for tests, benches and embedding without a game engine.
//!
//! Players follow the vanilla experience rules from `pearl_utils::experience`
//! and record overlays, sounds, teleports and orbs so callers can assert on
//! them afterwards. Recordings keep the most recent [`HISTORY_LIMIT`] entries.

mod player;
mod world;

use std::collections::VecDeque;

pub use player::HeadlessPlayer;
pub use world::{HeadlessWorld, PlayedSound, SpawnedOrb};

/// Entries kept per recording before the oldest ones are dropped.
pub const HISTORY_LIMIT: usize = 256;

/// Most recent entries of a recording, oldest first.
#[derive(Debug)]
struct History<T> {
    entries: VecDeque<T>,
}

impl<T: Clone> History<T> {
    const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    fn push(&mut self, entry: T) {
        if self.entries.len() == HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

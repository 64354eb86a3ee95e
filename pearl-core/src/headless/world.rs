//! A world that records what happens in it.

use pearl_utils::locks::SyncMutex;
use pearl_utils::math::Vector3;

use super::History;
use crate::host::{PearlWorld, SoundEvent, SoundSource};

/// A sound that was played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedSound {
    /// Where it was played, `None` for sounds sent to a single player.
    pub position: Option<Vector3<f64>>,
    /// The sound.
    pub sound: SoundEvent,
    /// The sound category.
    pub source: SoundSource,
    /// Volume.
    pub volume: f32,
    /// Pitch.
    pub pitch: f32,
}

/// An experience orb that was spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedOrb {
    /// Spawn position.
    pub position: Vector3<f64>,
    /// Points carried by the orb.
    pub value: i32,
}

/// In-memory world.
#[derive(Debug, Default)]
pub struct HeadlessWorld {
    sounds: SyncMutex<History<PlayedSound>>,
    orbs: SyncMutex<History<SpawnedOrb>>,
}

impl HeadlessWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent positional sounds, oldest first.
    #[must_use]
    pub fn sounds(&self) -> Vec<PlayedSound> {
        self.sounds.lock().to_vec()
    }

    /// Most recent spawned orbs, oldest first.
    #[must_use]
    pub fn orbs(&self) -> Vec<SpawnedOrb> {
        self.orbs.lock().to_vec()
    }

    /// Recent orbs spawned within `radius` blocks (horizontally) of `center`.
    #[must_use]
    pub fn orbs_near(&self, center: Vector3<f64>, radius: f64) -> Vec<SpawnedOrb> {
        self.orbs
            .lock()
            .iter()
            .filter(|orb| {
                let dx = orb.position.x - center.x;
                let dz = orb.position.z - center.z;
                dx * dx + dz * dz <= radius * radius
            })
            .copied()
            .collect()
    }
}

impl PearlWorld for HeadlessWorld {
    fn play_sound(
        &self,
        position: Vector3<f64>,
        sound: SoundEvent,
        source: SoundSource,
        volume: f32,
        pitch: f32,
    ) {
        log::trace!("Sound {} at {position:?}", sound.key());
        self.sounds.lock().push(PlayedSound {
            position: Some(position),
            sound,
            source,
            volume,
            pitch,
        });
    }

    fn spawn_experience_orb(&self, position: Vector3<f64>, value: i32) {
        self.orbs.lock().push(SpawnedOrb { position, value });
    }
}

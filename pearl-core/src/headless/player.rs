//! An in-memory player.
//!
//! Position and rotation live in atomic cells and the flags in atomics, like a
//! server player's hot fields; experience and the recorded feedback sit behind
//! short-lived mutexes. Effects are keyed by kind: applying one that is already
//! active replaces it, the way the engine refreshes a status effect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam::atomic::AtomicCell;
use pearl_utils::experience::Experience;
use pearl_utils::locks::SyncMutex;
use pearl_utils::math::Vector3;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::History;
use super::world::{HeadlessWorld, PlayedSound};
use crate::host::{
    EffectInstance, InteractionHand, MobEffect, PearlPlayer, SoundEvent, SoundSource,
};

/// In-memory player bound to a [`HeadlessWorld`].
#[derive(Debug)]
pub struct HeadlessPlayer {
    uuid: Uuid,
    name: String,
    world: Arc<HeadlessWorld>,
    connected: AtomicBool,
    crouching: AtomicBool,
    position: AtomicCell<Vector3<f64>>,
    /// `(yaw, pitch)`.
    rotation: AtomicCell<(f32, f32)>,
    experience: SyncMutex<Experience>,
    /// Item counts in `[main hand, off hand]`.
    held: SyncMutex<[i32; 2]>,
    effects: SyncMutex<FxHashMap<MobEffect, EffectInstance>>,
    effect_applications: AtomicU64,
    overlays: SyncMutex<History<String>>,
    private_sounds: SyncMutex<History<PlayedSound>>,
    teleports: SyncMutex<History<Vector3<f64>>>,
}

const fn hand_index(hand: InteractionHand) -> usize {
    match hand {
        InteractionHand::MainHand => 0,
        InteractionHand::OffHand => 1,
    }
}

impl HeadlessPlayer {
    /// Creates a connected player with a random UUID at the origin, standing and looking ahead.
    #[must_use]
    pub fn new(name: impl Into<String>, world: Arc<HeadlessWorld>) -> Self {
        Self::with_uuid(Uuid::new_v4(), name, world)
    }

    /// Creates a player with a fixed UUID.
    #[must_use]
    pub fn with_uuid(uuid: Uuid, name: impl Into<String>, world: Arc<HeadlessWorld>) -> Self {
        Self {
            uuid,
            name: name.into(),
            world,
            connected: AtomicBool::new(true),
            crouching: AtomicBool::new(false),
            position: AtomicCell::new(Vector3::new(0.0, 0.0, 0.0)),
            rotation: AtomicCell::new((0.0, 0.0)),
            experience: SyncMutex::new(Experience::new()),
            held: SyncMutex::new([0, 0]),
            effects: SyncMutex::new(FxHashMap::default()),
            effect_applications: AtomicU64::new(0),
            overlays: SyncMutex::new(History::new()),
            private_sounds: SyncMutex::new(History::new()),
            teleports: SyncMutex::new(History::new()),
        }
    }

    /// Moves the player without recording a teleport.
    pub fn set_position(&self, position: Vector3<f64>) {
        self.position.store(position);
    }

    /// Sets the pitch, keeping the yaw.
    pub fn set_pitch(&self, pitch: f32) {
        let (yaw, _) = self.rotation.load();
        self.rotation.store((yaw, pitch.clamp(-90.0, 90.0)));
    }

    /// Sets the sneaking flag.
    pub fn set_crouching(&self, crouching: bool) {
        self.crouching.store(crouching, Ordering::Relaxed);
    }

    /// Marks the player as connected or gone.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// Crouch and look straight up.
    pub fn look_up_crouching(&self) {
        self.set_crouching(true);
        self.set_pitch(-90.0);
    }

    /// Crouch and look straight down.
    pub fn look_down_crouching(&self) {
        self.set_crouching(true);
        self.set_pitch(90.0);
    }

    /// Replaces the player's experience.
    pub fn set_experience(&self, experience: Experience) {
        *self.experience.lock() = experience;
    }

    /// The player's experience.
    #[must_use]
    pub fn experience(&self) -> Experience {
        *self.experience.lock()
    }

    /// Sets the item count in a hand.
    pub fn set_held(&self, hand: InteractionHand, count: i32) {
        self.held.lock()[hand_index(hand)] = count.max(0);
    }

    /// Item count in a hand.
    #[must_use]
    pub fn held(&self, hand: InteractionHand) -> i32 {
        self.held.lock()[hand_index(hand)]
    }

    /// The active instance of `effect`, if any.
    #[must_use]
    pub fn effect(&self, effect: MobEffect) -> Option<EffectInstance> {
        self.effects.lock().get(&effect).copied()
    }

    /// Number of active effects.
    #[must_use]
    pub fn active_effect_count(&self) -> usize {
        self.effects.lock().len()
    }

    /// How many times an effect was applied or refreshed.
    #[must_use]
    pub fn effect_applications(&self) -> u64 {
        self.effect_applications.load(Ordering::Relaxed)
    }

    /// Recent overlay messages, oldest first.
    #[must_use]
    pub fn overlays(&self) -> Vec<String> {
        self.overlays.lock().to_vec()
    }

    /// Recent sounds only this player heard, oldest first.
    #[must_use]
    pub fn private_sounds(&self) -> Vec<PlayedSound> {
        self.private_sounds.lock().to_vec()
    }

    /// Recent teleport destinations, oldest first.
    #[must_use]
    pub fn teleports(&self) -> Vec<Vector3<f64>> {
        self.teleports.lock().to_vec()
    }
}

impl PearlPlayer for HeadlessPlayer {
    type World = HeadlessWorld;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn position(&self) -> Vector3<f64> {
        self.position.load()
    }

    fn rotation(&self) -> (f32, f32) {
        self.rotation.load()
    }

    fn is_crouching(&self) -> bool {
        self.crouching.load(Ordering::Relaxed)
    }

    fn experience_level(&self) -> i32 {
        self.experience.lock().level()
    }

    fn experience_progress(&self) -> f32 {
        self.experience.lock().progress()
    }

    fn xp_needed_for_next_level(&self) -> i32 {
        self.experience.lock().xp_needed_for_next_level()
    }

    fn experience_points(&self) -> i32 {
        self.experience.lock().points()
    }

    fn give_experience_points(&self, amount: i32) {
        self.experience.lock().give_points(amount);
    }

    fn set_experience_level(&self, level: i32) {
        self.experience.lock().set_level(level);
    }

    fn set_experience_points(&self, points: i32) {
        self.experience.lock().set_points(points);
    }

    fn consume_item(&self, hand: InteractionHand, count: i32) {
        let mut held = self.held.lock();
        let slot = &mut held[hand_index(hand)];
        *slot = (*slot - count).max(0);
    }

    fn teleport_to(&self, position: Vector3<f64>) {
        self.position.store(position);
        self.teleports.lock().push(position);
    }

    fn add_effect(&self, effect: EffectInstance) {
        log::trace!("{} gets {} (amplifier {})", self.name, effect.effect.key(), effect.amplifier);
        self.effects.lock().insert(effect.effect, effect);
        self.effect_applications.fetch_add(1, Ordering::Relaxed);
    }

    fn send_overlay(&self, message: &str) {
        self.overlays.lock().push(message.to_owned());
    }

    fn play_sound_to_self(&self, sound: SoundEvent, source: SoundSource, volume: f32, pitch: f32) {
        self.private_sounds.lock().push(PlayedSound {
            position: None,
            sound,
            source,
            volume,
            pitch,
        });
    }

    fn world(&self) -> &Self::World {
        &self.world
    }
}

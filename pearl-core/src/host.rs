//! The game engine as seen by the pearl mechanic.
//!
//! Every method takes `&self`: hosts keep player and world state behind their
//! own interior mutability, the same way a server's `Player` keeps position and
//! rotation behind locks and atomic cells.

use pearl_utils::Identifier;
use pearl_utils::math::Vector3;
use uuid::Uuid;

/// Which hand an item was used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionHand {
    /// The main hand.
    MainHand,
    /// The off hand.
    OffHand,
}

/// What the engine should do with an item use after the callback ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    /// Continue with the default handling (the pearl is thrown).
    Pass,
    /// Stop here; the default handling does not run.
    Fail,
}

/// Sound categories, mirroring vanilla `SoundSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSource {
    /// Player sounds.
    Players,
}

/// Sounds played by the mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// A request was opened.
    EnderPearlThrow,
    /// A request was refused or cancelled.
    EnderEyeDeath,
    /// A request was completed.
    EndermanTeleport,
    /// Experience was drained from a pending player.
    ExperienceOrbPickup,
}

impl SoundEvent {
    /// The registry key of this sound.
    #[must_use]
    pub const fn key(self) -> Identifier {
        match self {
            Self::EnderPearlThrow => Identifier::vanilla_static("entity.ender_pearl.throw"),
            Self::EnderEyeDeath => Identifier::vanilla_static("entity.ender_eye.death"),
            Self::EndermanTeleport => Identifier::vanilla_static("entity.enderman.teleport"),
            Self::ExperienceOrbPickup => {
                Identifier::vanilla_static("entity.experience_orb.pickup")
            }
        }
    }
}

/// Status effects applied by the mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobEffect {
    /// Movement slowdown.
    Slowness,
}

impl MobEffect {
    /// The registry key of this effect.
    #[must_use]
    pub const fn key(self) -> Identifier {
        match self {
            Self::Slowness => Identifier::vanilla_static("slowness"),
        }
    }
}

/// A status effect to apply to a player. Vanilla: `MobEffectInstance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectInstance {
    /// The effect.
    pub effect: MobEffect,
    /// Duration in ticks.
    pub duration: i32,
    /// Zero-based amplifier (`2` is level III).
    pub amplifier: i32,
    /// Whether the effect counts as ambient (beacon-like).
    pub ambient: bool,
    /// Whether particles are shown.
    pub visible: bool,
    /// Whether the HUD icon is shown.
    pub show_icon: bool,
}

impl EffectInstance {
    /// An effect with no particles and no icon.
    #[must_use]
    pub const fn hidden(effect: MobEffect, duration: i32, amplifier: i32) -> Self {
        Self {
            effect,
            duration,
            amplifier,
            ambient: false,
            visible: false,
            show_icon: false,
        }
    }
}

/// The world a player is in.
pub trait PearlWorld {
    /// Plays a sound at a position, audible to everyone nearby.
    fn play_sound(
        &self,
        position: Vector3<f64>,
        sound: SoundEvent,
        source: SoundSource,
        volume: f32,
        pitch: f32,
    );

    /// Spawns one experience orb carrying `value` points.
    fn spawn_experience_orb(&self, position: Vector3<f64>, value: i32);
}

/// A connected player.
pub trait PearlPlayer {
    /// The world type this player lives in.
    type World: PearlWorld;

    /// Stable identity of the player (never the display name).
    fn uuid(&self) -> Uuid;

    /// Display name, only used for logging.
    fn name(&self) -> &str;

    /// Whether the player is still connected. Players that left between the
    /// tick snapshot and their evaluation are skipped.
    fn is_connected(&self) -> bool {
        true
    }

    /// Feet position.
    fn position(&self) -> Vector3<f64>;

    /// `(yaw, pitch)` in degrees. Pitch is -90 looking straight up, 90 straight down.
    fn rotation(&self) -> (f32, f32);

    /// Pitch in degrees.
    fn pitch(&self) -> f32 {
        self.rotation().1
    }

    /// Whether the player is sneaking.
    fn is_crouching(&self) -> bool;

    /// Current experience level.
    fn experience_level(&self) -> i32;

    /// Filled fraction of the experience bar, in `[0, 1)`.
    fn experience_progress(&self) -> f32;

    /// Points needed to reach the next level.
    fn xp_needed_for_next_level(&self) -> i32;

    /// Whole points inside the current level.
    fn experience_points(&self) -> i32 {
        (self.experience_progress() * self.xp_needed_for_next_level() as f32) as i32
    }

    /// Adds points (negative removes them), rolling levels over both ways.
    fn give_experience_points(&self, amount: i32);

    /// Sets the experience level.
    fn set_experience_level(&self, level: i32);

    /// Sets the points inside the current level.
    fn set_experience_points(&self, points: i32);

    /// Removes `count` items from the stack held in `hand`.
    fn consume_item(&self, hand: InteractionHand, count: i32);

    /// Moves the player to `position` in their current world.
    fn teleport_to(&self, position: Vector3<f64>);

    /// Applies (or refreshes) a status effect.
    fn add_effect(&self, effect: EffectInstance);

    /// Shows a message above the hotbar.
    fn send_overlay(&self, message: &str);

    /// Plays a sound that only this player hears.
    fn play_sound_to_self(&self, sound: SoundEvent, source: SoundSource, volume: f32, pitch: f32);

    /// The world the player is in.
    fn world(&self) -> &Self::World;
}

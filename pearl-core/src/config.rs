//! Tunables for the pearl mechanic, loaded from a JSON5 file.

use std::fs;
use std::path::Path;

use pearl_utils::Identifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pitch of a player looking straight up.
pub const LOOKING_UP_PITCH: f32 = -90.0;
/// Pitch of a player looking straight down.
pub const LOOKING_DOWN_PITCH: f32 = 90.0;
/// Most blocks a pending player may move away from where they asked.
pub const MOVEMENT_THRESHOLD: f64 = 2.0;
/// Fraction of the next level's requirement drained every tick.
pub const DRAIN_RATE: f64 = 0.005;
/// Levels a pending player may lose before the request is dropped.
pub const MAX_LEVEL_LOSS: i32 = 5;
/// Upper bound of orbs spawned per drop.
pub const MAX_ORBS: i32 = 11;

/// An error that can occur while loading a [`PearlConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON5 or has wrong field types.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("Invalid config value: {0}")]
    Invalid(&'static str),
}

/// What happens to the drained experience when a request is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CancelRefund {
    /// The drained experience is lost.
    Discard,
    /// `drained / divisor` points are dropped where the player stands.
    Fraction {
        /// Divisor applied to the drained total.
        divisor: i32,
    },
}

impl CancelRefund {
    /// Points to give back for a cancelled request that drained `drained` points.
    #[must_use]
    pub const fn refund_for(self, drained: i32) -> i32 {
        match self {
            Self::Discard => 0,
            Self::Fraction { divisor } if divisor > 0 && drained > 0 => drained / divisor,
            Self::Fraction { .. } => 0,
        }
    }
}

/// Configuration for the pearl mechanic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PearlConfig {
    /// Item that opens a request.
    pub trigger_item: Identifier,
    /// Pitch a requester must look at.
    pub request_pitch: f32,
    /// Allowed deviation from `request_pitch`, in degrees.
    pub request_pitch_tolerance: f32,
    /// An acceptor's pitch must be at or beyond this.
    pub accept_pitch: f32,
    /// Distance a pending player may move before the request is cancelled.
    pub movement_threshold: f64,
    /// Levels lost (with progress not above the starting progress) that cancel a request.
    pub max_level_loss: i32,
    /// Fraction of the next level's requirement drained per tick.
    pub drain_rate: f64,
    /// Refund policy for cancelled requests.
    pub cancel_refund: CancelRefund,
    /// Slowness amplifier applied while pending.
    pub slowness_amplifier: i32,
    /// Slowness duration in ticks; refreshed every tick.
    pub slowness_duration: i32,
    /// Upper bound of orbs per drop.
    pub max_orbs: i32,
    /// Horizontal spread of dropped orbs, in blocks each way.
    pub orb_spread: f64,
}

impl Default for PearlConfig {
    fn default() -> Self {
        Self {
            trigger_item: Identifier::vanilla_static("ender_pearl"),
            request_pitch: LOOKING_UP_PITCH,
            request_pitch_tolerance: 10.0,
            accept_pitch: LOOKING_DOWN_PITCH,
            movement_threshold: MOVEMENT_THRESHOLD,
            max_level_loss: MAX_LEVEL_LOSS,
            drain_rate: DRAIN_RATE,
            cancel_refund: CancelRefund::Discard,
            slowness_amplifier: 2,
            slowness_duration: 1,
            max_orbs: MAX_ORBS,
            orb_spread: 1.0,
        }
    }
}

impl PearlConfig {
    /// Reads and validates a JSON5 config file. Missing fields use defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json5_str(&raw)?;
        log::info!("Loaded pearl config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a JSON5 document.
    pub fn from_json5_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.drain_rate.is_finite() && self.drain_rate > 0.0 && self.drain_rate <= 1.0) {
            return Err(ConfigError::Invalid("drain_rate must be in (0, 1]"));
        }
        if !(self.movement_threshold.is_finite() && self.movement_threshold >= 0.0) {
            return Err(ConfigError::Invalid("movement_threshold must be >= 0"));
        }
        if self.max_level_loss < 1 {
            return Err(ConfigError::Invalid("max_level_loss must be >= 1"));
        }
        if self.request_pitch_tolerance.is_nan() || self.request_pitch_tolerance < 0.0 {
            return Err(ConfigError::Invalid("request_pitch_tolerance must be >= 0"));
        }
        if matches!(self.cancel_refund, CancelRefund::Fraction { divisor } if divisor < 1) {
            return Err(ConfigError::Invalid("cancel_refund divisor must be >= 1"));
        }
        if self.max_orbs < 1 {
            return Err(ConfigError::Invalid("max_orbs must be >= 1"));
        }
        if self.slowness_duration < 1 || self.slowness_amplifier < 0 {
            return Err(ConfigError::Invalid(
                "slowness_duration must be >= 1 and slowness_amplifier >= 0",
            ));
        }
        Ok(())
    }
}

//! Engine-agnostic value types shared by the player pearls crates.

pub mod experience;
mod identifier;
pub mod locks;
pub mod math;

pub use identifier::{Identifier, IdentifierError};

//! Sneak-and-pearl teleport requests.
//!
//! A player crouches, looks straight up and uses an ender pearl to open a
//! teleport request. While the request is pending they are slowed and their
//! experience drains a little every tick. Any other player who crouches and
//! looks straight down accepts it: the requester is teleported to them and the
//! drained experience is dropped as orbs at both ends of the trip.
//!
//! The game engine is reached through the traits in [`host`]; the
//! [`headless`] module ships an in-memory implementation of them.

pub mod config;
pub mod drain;
pub mod executor;
pub mod gesture;
pub mod headless;
pub mod host;
pub mod pending;
pub mod random;
pub mod resolver;
pub mod service;

pub use config::{CancelRefund, ConfigError, PearlConfig};
pub use gesture::UseItemEvent;
pub use host::{InteractionHand, InteractionResult, PearlPlayer, PearlWorld};
pub use pending::{PendingError, PendingRequest, PendingStore};
pub use resolver::{CancelReason, TickOutcome, TickReport};
pub use service::{PlayerPearls, SharedPlayerPearls};

pub mod config;
pub mod error;
pub mod types;

pub use config::PerceptionConfig;
pub use error::{PerceptionError, Result};
pub use types::{GamePhase, PlayerId, SimTime, TickInput, Vec2};

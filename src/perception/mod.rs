//! Perception: what the agent senses each tick and what it remembers

pub mod bodies;
pub mod clock;
pub mod context;
pub mod events;
pub mod frame;
pub mod nearby;
pub mod players;
pub mod records;
pub mod report;
pub mod senses;

pub use bodies::{DeadBody, DeadBodyTracker};
pub use clock::RoundClock;
pub use context::{PerceptionContext, SessionSlot};
pub use events::PerceptionEvent;
pub use frame::PerceptionFrame;
pub use nearby::{MapFrame, NearbyObjectRecorder, PathLength, StraightLine};
pub use players::PlayerPerceptionStore;
pub use records::{LastSeenPlayer, PerceptionState, PlayerRecord, Sighting};
pub use report::{Finding, Percentage, Report};
pub use senses::Senses;

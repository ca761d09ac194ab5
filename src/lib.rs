//! Crew Sight - perception engine for a social-deduction game agent
//!
//! Each tick the engine works out which players and corpses the agent can
//! see, remembers where and when they were seen, and can narrate that
//! memory as a meeting report.

pub mod core;
pub mod perception;
pub mod scenario;
pub mod spatial;
pub mod world;

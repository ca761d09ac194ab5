//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

pub use glam::Vec2;

/// Identifier of a player in the session roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Simulation time in seconds since the level loaded
pub type SimTime = f32;

/// One fixed-timestep tick signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Current simulation time
    pub now: SimTime,
    /// Fixed delta time of the step
    pub delta: f32,
}

impl TickInput {
    pub fn new(now: SimTime, delta: f32) -> Self {
        Self { now, delta }
    }

    /// The tick that follows this one
    pub fn next(&self) -> Self {
        Self {
            now: self.now + self.delta,
            delta: self.delta,
        }
    }
}

/// What the host game is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game lobby, no ship loaded
    #[default]
    Lobby,
    /// Active round on the ship
    Playing,
    /// Group discussion in progress
    Meeting,
}

impl GamePhase {
    /// Perception only runs while a round is being played
    pub fn senses_active(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

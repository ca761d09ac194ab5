//! Read-only view of the simulated game world

use serde::{Deserialize, Serialize};

use crate::core::types::{GamePhase, PlayerId, Vec2};

/// What the world reports about one player this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Transform position, snapped to the sprite anchor
    pub position: Vec2,
    /// Collider position, used for rays and bearings
    pub true_position: Vec2,
    /// Killed (ghosts are never seen)
    pub is_dead: bool,
    /// Hidden inside a vent
    pub in_vent: bool,
}

impl PlayerState {
    /// Living, visible player whose collider sits on its transform
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            true_position: position,
            is_dead: false,
            in_vent: false,
        }
    }

    /// Can this player be counted as present near something
    pub fn is_present(&self) -> bool {
        !self.is_dead && !self.in_vent
    }
}

/// Everything the perception systems read from the host
pub trait WorldView {
    fn phase(&self) -> GamePhase;

    fn player(&self, id: PlayerId) -> Option<PlayerState>;

    fn player_name(&self, id: PlayerId) -> String {
        id.to_string()
    }
}

//! Structured per-tick output for the decision policy

use serde::Serialize;

use crate::core::types::{PlayerId, Vec2};
use crate::perception::nearby::MapFrame;
use crate::perception::records::PlayerRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerceptionFrame {
    /// Current records of the active roster, in roster order
    pub players: Vec<(PlayerId, PlayerRecord)>,
    pub nearest_body_direction: Vec2,
    pub map: MapFrame,
}

impl PerceptionFrame {
    pub fn record(&self, id: PlayerId) -> Option<PlayerRecord> {
        self.players
            .iter()
            .find(|(player, _)| *player == id)
            .map(|(_, record)| *record)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

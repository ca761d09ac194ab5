//! Narration events emitted while perceiving

use serde::Serialize;

use crate::core::types::PlayerId;
use crate::world::view::WorldView;

/// Something the agent noticed worth narrating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PerceptionEvent {
    /// A living player is in sight
    PlayerSighted { player: PlayerId, location: String },
    /// A player was seen entering a vent
    SawConcealmentEntry { player: PlayerId },
    /// The world reported a new corpse
    BodyReported { owner: PlayerId },
    /// The agent found a corpse for the first time this round
    BodyFound {
        owner: PlayerId,
        location: String,
        witnesses: Vec<PlayerId>,
    },
}

impl PerceptionEvent {
    /// Plain-text line for the narration sink
    pub fn narrate(&self, world: &impl WorldView) -> String {
        match self {
            PerceptionEvent::PlayerSighted { player, location } => {
                format!("{} is in {}", world.player_name(*player), location)
            }
            PerceptionEvent::SawConcealmentEntry { player } => {
                format!("{} vented right in front of me!", world.player_name(*player))
            }
            PerceptionEvent::BodyReported { owner } => {
                format!("{} has been killed", world.player_name(*owner))
            }
            PerceptionEvent::BodyFound { owner, location, .. } => {
                format!("{} is dead in {}", world.player_name(*owner), location)
            }
        }
    }
}

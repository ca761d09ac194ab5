//! Per-player perception records
//!
//! `PlayerRecord` is what the agent senses right now and is rebuilt every
//! tick. `LastSeenPlayer` is what it remembers and only changes on
//! sightings, deaths and round boundaries. The two are never merged.

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, SimTime, Vec2};

/// Transient sensing of one player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Distance to the player, -1 when not perceived this tick
    pub distance: f32,
    /// Unit bearing from the agent, zero when unknown
    pub direction: Vec2,
}

impl PlayerRecord {
    pub const UNKNOWN_DISTANCE: f32 = -1.0;

    pub fn new(distance: f32, direction: Vec2) -> Self {
        Self { distance, direction }
    }

    /// Not perceived this tick
    pub fn unknown() -> Self {
        Self {
            distance: Self::UNKNOWN_DISTANCE,
            direction: Vec2::ZERO,
        }
    }

    /// Record from the agent's precise position to the target's
    pub fn between(agent: Vec2, target: Vec2) -> Self {
        let offset = target - agent;
        Self {
            distance: offset.length(),
            direction: offset.normalize_or_zero(),
        }
    }

    pub fn is_perceived(&self) -> bool {
        self.distance >= 0.0
    }
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Remembered facts about one player
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LastSeenPlayer {
    /// Where they were last seen, empty if never
    pub location: String,
    /// When `location` was last written by a sighting or a discovery
    pub last_seen_time: SimTime,
    /// Seen alive at least once, even where no place name resolved
    #[serde(default)]
    pub sighted: bool,
    pub is_dead: bool,
    /// Saw them slip into a vent; never cleared
    pub saw_concealment_entry: bool,
    /// Seconds in sight since tracking started
    pub game_time_visible: f32,
    /// Seconds in sight since the current round started
    pub round_time_visible: f32,
    /// Players near the body when it was found, frozen after that
    pub witnesses: Vec<PlayerId>,
}

impl LastSeenPlayer {
    pub fn has_been_seen(&self) -> bool {
        !self.location.is_empty()
    }
}

/// A successful sighting of a living player
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub location: String,
    pub now: SimTime,
    /// Time the player was in view, usually the tick delta
    pub delta: f32,
}

/// Where a player sits in the perception state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerceptionState {
    /// No memory entry exists
    Untracked,
    /// Seen this tick
    VisibleNow,
    /// Inside a vent this tick
    ConcealedRecently,
    /// Alive as far as we know, not perceived this tick
    OutOfSight,
    /// Body found this round
    KnownDead,
}

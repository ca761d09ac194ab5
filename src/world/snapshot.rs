//! In-memory world used by replays and tests

use ahash::AHashMap;

use crate::core::types::{GamePhase, PlayerId, Vec2};
use crate::world::view::{PlayerState, WorldView};

#[derive(Debug, Clone)]
struct PlayerEntry {
    name: String,
    state: PlayerState,
}

/// Mutable stand-in for the host game
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    phase: GamePhase,
    players: AHashMap<PlayerId, PlayerEntry>,
}

impl WorldSnapshot {
    pub fn new(phase: GamePhase) -> Self {
        Self {
            phase,
            players: AHashMap::new(),
        }
    }

    /// Add a living player at a position
    pub fn with_player(mut self, id: PlayerId, name: impl Into<String>, position: Vec2) -> Self {
        self.insert_player(id, name, PlayerState::at(position));
        self
    }

    pub fn insert_player(&mut self, id: PlayerId, name: impl Into<String>, state: PlayerState) {
        self.players.insert(id, PlayerEntry { name: name.into(), state });
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<PlayerState> {
        self.players.remove(&id).map(|entry| entry.state)
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    /// Move a player, keeping the collider on the transform
    pub fn move_player(&mut self, id: PlayerId, position: Vec2) {
        if let Some(entry) = self.players.get_mut(&id) {
            entry.state.position = position;
            entry.state.true_position = position;
        }
    }

    pub fn set_in_vent(&mut self, id: PlayerId, in_vent: bool) {
        if let Some(entry) = self.players.get_mut(&id) {
            entry.state.in_vent = in_vent;
        }
    }

    pub fn kill(&mut self, id: PlayerId) {
        if let Some(entry) = self.players.get_mut(&id) {
            entry.state.is_dead = true;
        }
    }

    /// Player ids in ascending order
    pub fn roster(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl WorldView for WorldSnapshot {
    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn player(&self, id: PlayerId) -> Option<PlayerState> {
        self.players.get(&id).map(|entry| entry.state)
    }

    fn player_name(&self, id: PlayerId) -> String {
        self.players
            .get(&id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let world = WorldSnapshot::new(GamePhase::Playing)
            .with_player(PlayerId(2), "Blue", Vec2::new(1.0, 0.0))
            .with_player(PlayerId(1), "Red", Vec2::ZERO);

        assert_eq!(world.roster(), vec![PlayerId(1), PlayerId(2)]);
        assert_eq!(world.player_name(PlayerId(2)), "Blue");
        assert_eq!(world.player_name(PlayerId(9)), "Player 9");
        assert!(world.player(PlayerId(9)).is_none());
    }

    #[test]
    fn test_mutations() {
        let mut world = WorldSnapshot::new(GamePhase::Playing)
            .with_player(PlayerId(1), "Red", Vec2::ZERO);

        world.move_player(PlayerId(1), Vec2::new(4.0, 2.0));
        world.set_in_vent(PlayerId(1), true);
        let state = world.player(PlayerId(1)).unwrap();
        assert_eq!(state.position, Vec2::new(4.0, 2.0));
        assert_eq!(state.true_position, Vec2::new(4.0, 2.0));
        assert!(state.in_vent);

        world.kill(PlayerId(1));
        assert!(world.player(PlayerId(1)).unwrap().is_dead);

        // Unknown ids are ignored
        world.kill(PlayerId(5));
        world.move_player(PlayerId(5), Vec2::ONE);
    }
}

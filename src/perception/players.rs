//! Player perception store
//!
//! Owns the transient `PlayerRecord` table and the persistent
//! `LastSeenPlayer` memory for every roster member. Mutation goes through a
//! small API; readers get copies or short-lived borrows.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{PlayerId, SimTime};
use crate::perception::events::PerceptionEvent;
use crate::perception::records::{LastSeenPlayer, PerceptionState, PlayerRecord, Sighting};
use crate::perception::senses::Senses;
use crate::spatial::visibility::VisibilityOracle;
use crate::world::view::WorldView;

#[derive(Debug, Clone, Default)]
pub struct PlayerPerceptionStore {
    /// Active members, in roster order
    roster: Vec<PlayerId>,
    /// Every member ever tracked this session, in first-seen order
    known: Vec<PlayerId>,
    records: AHashMap<PlayerId, PlayerRecord>,
    memory: AHashMap<PlayerId, LastSeenPlayer>,
    /// Members inside a vent during the latest tick
    concealed: AHashSet<PlayerId>,
}

impl PlayerPerceptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and track a fresh roster
    pub fn start_tracking(&mut self, roster: &[PlayerId]) {
        self.roster.clear();
        self.known.clear();
        self.records.clear();
        self.memory.clear();
        self.concealed.clear();

        for &id in roster {
            if self.memory.contains_key(&id) {
                continue;
            }
            self.roster.push(id);
            self.known.push(id);
            self.records.insert(id, PlayerRecord::unknown());
            self.memory.insert(id, LastSeenPlayer::default());
        }
    }

    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    /// Tracked ids, including players who have left, in tracking order
    pub fn known(&self) -> &[PlayerId] {
        &self.known
    }

    pub fn is_tracking(&self) -> bool {
        !self.known.is_empty()
    }

    pub fn record(&self, id: PlayerId) -> PlayerRecord {
        self.records.get(&id).copied().unwrap_or_default()
    }

    /// Current records in roster order
    pub fn records(&self) -> impl Iterator<Item = (PlayerId, PlayerRecord)> + '_ {
        self.roster.iter().map(move |&id| (id, self.record(id)))
    }

    pub fn last_seen(&self, id: PlayerId) -> Option<&LastSeenPlayer> {
        self.memory.get(&id)
    }

    pub fn is_known_dead(&self, id: PlayerId) -> bool {
        self.memory.get(&id).map_or(false, |m| m.is_dead)
    }

    pub fn state(&self, id: PlayerId) -> PerceptionState {
        let Some(memory) = self.memory.get(&id) else {
            return PerceptionState::Untracked;
        };

        if memory.is_dead {
            PerceptionState::KnownDead
        } else if self.concealed.contains(&id) {
            PerceptionState::ConcealedRecently
        } else if self.record(id).is_perceived() {
            PerceptionState::VisibleNow
        } else {
            PerceptionState::OutOfSight
        }
    }

    /// Write a sighting into memory. Returns false for untracked ids.
    pub fn observe(&mut self, id: PlayerId, sighting: Sighting) -> bool {
        let Some(memory) = self.memory.get_mut(&id) else {
            return false;
        };

        memory.location = sighting.location;
        memory.last_seen_time = sighting.now;
        memory.sighted = true;
        memory.is_dead = false;
        memory.game_time_visible += sighting.delta;
        memory.round_time_visible += sighting.delta;
        true
    }

    /// Remember that this player was seen entering a vent
    pub fn mark_concealed(&mut self, id: PlayerId) -> bool {
        match self.memory.get_mut(&id) {
            Some(memory) => {
                memory.saw_concealment_entry = true;
                true
            }
            None => false,
        }
    }

    /// Record a found body
    ///
    /// The first discovery stamps the time and freezes the witnesses from
    /// `witnesses`; later calls only refresh the location. Returns true on
    /// the first discovery.
    pub fn mark_dead<F>(&mut self, id: PlayerId, location: String, now: SimTime, witnesses: F) -> bool
    where
        F: FnOnce() -> Vec<PlayerId>,
    {
        let Some(memory) = self.memory.get_mut(&id) else {
            return false;
        };

        let first_discovery = !memory.is_dead;
        if first_discovery {
            memory.last_seen_time = now;
            memory.witnesses = witnesses();
        }
        memory.location = location;
        memory.is_dead = true;
        first_discovery
    }

    /// Zero the per-round visibility of every living, seen player
    pub fn reset_round_statistics(&mut self, agent: PlayerId) {
        for (&id, memory) in self.memory.iter_mut() {
            if id == agent || memory.is_dead || !memory.has_been_seen() {
                continue;
            }
            memory.round_time_visible = 0.0;
        }
    }

    /// Stop tracking a player who left; their memory stays frozen
    pub fn remove(&mut self, id: PlayerId) -> bool {
        let before = self.roster.len();
        self.roster.retain(|&member| member != id);
        self.records.remove(&id);
        self.concealed.remove(&id);
        self.roster.len() != before
    }

    fn sighted_since(&self, id: PlayerId, cutoff: SimTime) -> bool {
        self.memory
            .get(&id)
            .map_or(false, |m| m.sighted && m.last_seen_time > cutoff)
    }

    /// Re-derive every record from the world and update memory on sightings
    pub fn update<W: WorldView, O: VisibilityOracle>(
        &mut self,
        senses: &Senses<'_, W, O>,
        events: &mut Vec<PerceptionEvent>,
    ) {
        let previously_concealed = std::mem::take(&mut self.concealed);
        let agent = senses.agent_state;
        let roster = self.roster.clone();

        for id in roster {
            let was_perceived = self.record(id).is_perceived();
            self.records.insert(id, PlayerRecord::unknown());

            if id == senses.agent || self.is_known_dead(id) {
                continue;
            }

            let Some(state) = senses.world.player(id) else {
                continue;
            };
            if state.is_dead {
                continue;
            }

            if state.in_vent {
                self.concealed.insert(id);
                let just_entered = !previously_concealed.contains(&id);
                if just_entered && self.sighted_since(id, senses.concealment_cutoff()) {
                    self.mark_concealed(id);
                    tracing::info!("{} vented right in front of the agent", id);
                    events.push(PerceptionEvent::SawConcealmentEntry { player: id });
                }
                continue;
            }

            if state.position.distance(agent.position) >= senses.config.player_sight_range {
                continue;
            }

            if !senses.oracle.is_visible(agent.true_position, state.true_position) {
                tracing::debug!("{} is close, but out of sight", id);
                continue;
            }

            let location = senses.resolver.resolve(state.position);
            tracing::debug!("{} is in {}", id, location);
            if !was_perceived {
                events.push(PerceptionEvent::PlayerSighted {
                    player: id,
                    location: location.clone(),
                });
            }

            self.observe(
                id,
                Sighting {
                    location,
                    now: senses.tick.now,
                    delta: senses.tick.delta,
                },
            );
            self.records.insert(
                id,
                PlayerRecord::between(agent.true_position, state.true_position),
            );
        }
    }
}

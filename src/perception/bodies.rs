//! Dead body tracking
//!
//! Bodies are reported by the world once per owner per round. Every tick
//! the tracker steers toward the nearest one and, for bodies close enough
//! to identify, records the death and who was standing around it.

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Vec2};
use crate::perception::events::PerceptionEvent;
use crate::perception::players::PlayerPerceptionStore;
use crate::perception::senses::Senses;
use crate::spatial::visibility::VisibilityOracle;
use crate::world::view::WorldView;

/// A corpse on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadBody {
    pub owner: PlayerId,
    pub position: Vec2,
    pub true_position: Vec2,
}

impl DeadBody {
    pub fn at(owner: PlayerId, position: Vec2) -> Self {
        Self {
            owner,
            position,
            true_position: position,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeadBodyTracker {
    bodies: Vec<DeadBody>,
    nearest_direction: Vec2,
}

impl DeadBodyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a body unless its owner already has one this round
    pub fn discover(&mut self, body: DeadBody) -> Option<PerceptionEvent> {
        if self.contains(body.owner) {
            return None;
        }

        tracing::info!("{} has been killed", body.owner);
        self.bodies.push(body);
        Some(PerceptionEvent::BodyReported { owner: body.owner })
    }

    pub fn contains(&self, owner: PlayerId) -> bool {
        self.bodies.iter().any(|b| b.owner == owner)
    }

    pub fn bodies(&self) -> &[DeadBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Unit direction to the nearest body, zero when there is none
    pub fn nearest_direction(&self) -> Vec2 {
        self.nearest_direction
    }

    /// Drop every body (round boundary)
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.nearest_direction = Vec2::ZERO;
    }

    pub fn update<W: WorldView, O: VisibilityOracle>(
        &mut self,
        senses: &Senses<'_, W, O>,
        store: &mut PlayerPerceptionStore,
        events: &mut Vec<PerceptionEvent>,
    ) {
        let agent = senses.agent_state;
        let roster = store.roster().to_vec();
        self.nearest_direction = Vec2::ZERO;
        let mut nearest_distance = f32::INFINITY;

        for body in &self.bodies {
            let distance = body.position.distance(agent.position);
            if distance < nearest_distance {
                nearest_distance = distance;
                self.nearest_direction = (body.position - agent.position).normalize_or_zero();
            }

            if distance >= senses.config.body_sight_range {
                continue;
            }
            if !senses.oracle.is_visible(agent.true_position, body.true_position) {
                continue;
            }

            let location = senses.resolver.resolve(body.position);
            let first_discovery = store.mark_dead(body.owner, location.clone(), senses.tick.now, || {
                witnesses_of(senses, &roster, body)
            });

            if first_discovery {
                let witnesses = store
                    .last_seen(body.owner)
                    .map(|m| m.witnesses.clone())
                    .unwrap_or_default();
                tracing::info!("{} is dead in {}", body.owner, location);
                events.push(PerceptionEvent::BodyFound {
                    owner: body.owner,
                    location,
                    witnesses,
                });
            } else {
                tracing::debug!("{} is dead in {}", body.owner, location);
            }
        }
    }
}

/// Roster members standing near a body: alive, out of vents, not the agent
fn witnesses_of<W: WorldView, O: VisibilityOracle>(
    senses: &Senses<'_, W, O>,
    roster: &[PlayerId],
    body: &DeadBody,
) -> Vec<PlayerId> {
    roster
        .iter()
        .copied()
        .filter(|&id| id != senses.agent)
        .filter(|&id| {
            senses.world.player(id).map_or(false, |state| {
                state.is_present()
                    && state.position.distance(body.position) < senses.config.witness_radius
            })
        })
        .collect()
}

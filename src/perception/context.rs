//! Perception session
//!
//! A `PerceptionContext` is the single owner of everything the agent senses
//! and remembers during one game. Hosts keep it in a `SessionSlot`, which
//! refuses to open a second one while the first is alive.

use crate::core::config::PerceptionConfig;
use crate::core::error::{PerceptionError, Result};
use crate::core::types::{PlayerId, SimTime, TickInput, Vec2};
use crate::perception::bodies::{DeadBody, DeadBodyTracker};
use crate::perception::clock::RoundClock;
use crate::perception::events::PerceptionEvent;
use crate::perception::frame::PerceptionFrame;
use crate::perception::nearby::{NearbyObjectRecorder, PathLength};
use crate::perception::players::PlayerPerceptionStore;
use crate::perception::records::{LastSeenPlayer, PerceptionState, PlayerRecord};
use crate::perception::report::Report;
use crate::perception::senses::Senses;
use crate::spatial::layout::{ObjectCatalog, ShipLayout};
use crate::spatial::location::LocationResolver;
use crate::spatial::visibility::VisibilityOracle;
use crate::world::view::WorldView;

pub struct PerceptionContext {
    config: PerceptionConfig,
    resolver: LocationResolver,
    agent: Option<PlayerId>,
    players: PlayerPerceptionStore,
    bodies: DeadBodyTracker,
    clock: RoundClock,
    nearby: NearbyObjectRecorder,
}

impl PerceptionContext {
    fn new(config: PerceptionConfig, resolver: LocationResolver, objects: ObjectCatalog) -> Self {
        Self {
            config,
            resolver,
            agent: None,
            players: PlayerPerceptionStore::new(),
            bodies: DeadBodyTracker::new(),
            clock: RoundClock::new(),
            nearby: NearbyObjectRecorder::new(objects),
        }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    pub fn agent(&self) -> Option<PlayerId> {
        self.agent
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn bodies(&self) -> &DeadBodyTracker {
        &self.bodies
    }

    pub fn players(&self) -> &PlayerPerceptionStore {
        &self.players
    }

    pub fn record(&self, id: PlayerId) -> PlayerRecord {
        self.players.record(id)
    }

    pub fn last_seen(&self, id: PlayerId) -> Option<&LastSeenPlayer> {
        self.players.last_seen(id)
    }

    pub fn state(&self, id: PlayerId) -> PerceptionState {
        self.players.state(id)
    }

    pub fn nearest_body_direction(&self) -> Vec2 {
        self.bodies.nearest_direction()
    }

    /// Begin tracking `roster` from the point of view of `agent`
    pub fn tracking_started(&mut self, agent: PlayerId, roster: &[PlayerId], now: SimTime) {
        self.agent = Some(agent);
        self.players.start_tracking(roster);
        self.bodies.clear();
        self.nearby.clear();
        self.clock.start(now);
        tracing::info!("Tracking {} players", self.players.roster().len());
    }

    /// The world reports a corpse; duplicates within a round are ignored
    pub fn body_discovered(&mut self, body: DeadBody) -> Option<PerceptionEvent> {
        self.bodies.discover(body)
    }

    /// One fixed tick of perception
    ///
    /// Does nothing outside an active round or before tracking starts.
    pub fn tick<W: WorldView, O: VisibilityOracle>(
        &mut self,
        world: &W,
        oracle: &O,
        tick: TickInput,
    ) -> Vec<PerceptionEvent> {
        let mut events = Vec::new();
        if !world.phase().senses_active() {
            return events;
        }
        let Some(agent) = self.agent else {
            return events;
        };
        let Some(agent_state) = world.player(agent) else {
            tracing::warn!("No position for agent {}, skipping tick", agent);
            return events;
        };

        let senses = Senses {
            world,
            oracle,
            resolver: &self.resolver,
            config: &self.config,
            agent,
            agent_state,
            tick,
        };

        self.bodies.update(&senses, &mut self.players, &mut events);
        self.players.update(&senses, &mut events);
        events
    }

    /// Refresh the nearby doors and vents
    ///
    /// Skipped outside an active round and once the agent is dead.
    pub fn record_nearby_objects<W: WorldView>(&mut self, world: &W, paths: &impl PathLength) {
        if !world.phase().senses_active() {
            return;
        }
        let Some(agent) = self.agent.and_then(|id| world.player(id)) else {
            return;
        };
        if agent.is_dead {
            return;
        }
        self.nearby
            .record(agent.position, paths, self.config.nearby_object_count);
    }

    /// A meeting concluded: start a new round
    pub fn round_boundary(&mut self, now: SimTime) {
        self.clock.begin_round(now);
        if let Some(agent) = self.agent {
            self.players.reset_round_statistics(agent);
        }
        self.bodies.clear();
        tracing::debug!("Round started at {:.1}s", now);
    }

    /// A player disconnected; their memory is kept, sensing stops
    pub fn player_left(&mut self, id: PlayerId) {
        if self.players.remove(id) {
            tracing::info!("{} left the game", id);
        }
    }

    /// Narration of everything remembered, for a meeting
    pub fn report(&self, world: &impl WorldView, now: SimTime) -> Report {
        match self.agent {
            Some(agent) => Report::generate(&self.players, &self.clock, agent, world, now),
            None => Report::default(),
        }
    }

    /// Structured state for the decision policy
    pub fn frame(&self) -> PerceptionFrame {
        PerceptionFrame {
            players: self.players.records().collect(),
            nearest_body_direction: self.bodies.nearest_direction(),
            map: self.nearby.frame().clone(),
        }
    }
}

/// Holds at most one perception session
#[derive(Default)]
pub struct SessionSlot {
    active: Option<PerceptionContext>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Open a session; fails if one is already open
    pub fn open(
        &mut self,
        config: PerceptionConfig,
        resolver: LocationResolver,
        objects: ObjectCatalog,
    ) -> Result<&mut PerceptionContext> {
        if self.active.is_some() {
            tracing::warn!("Refusing to open a second perception session");
            return Err(PerceptionError::SessionAlreadyOpen);
        }
        config.validate()?;
        Ok(self
            .active
            .insert(PerceptionContext::new(config, resolver, objects)))
    }

    /// Open a session on a loaded ship
    pub fn open_ship(&mut self, config: PerceptionConfig, layout: &ShipLayout) -> Result<&mut PerceptionContext> {
        let resolver = LocationResolver::ship(layout.room_catalog(), config.lobby_label.clone());
        self.open(config, resolver, layout.object_catalog())
    }

    /// Open a session in the lobby, before a ship exists
    pub fn open_lobby(&mut self, config: PerceptionConfig) -> Result<&mut PerceptionContext> {
        let resolver = LocationResolver::lobby(config.lobby_label.clone());
        self.open(config, resolver, ObjectCatalog::default())
    }

    pub fn get(&self) -> Option<&PerceptionContext> {
        self.active.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut PerceptionContext> {
        self.active.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// End the session, dropping everything it remembered
    pub fn close(&mut self) -> Option<PerceptionContext> {
        self.active.take()
    }
}

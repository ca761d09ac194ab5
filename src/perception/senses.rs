//! Per-tick bundle of everything a perception update reads

use crate::core::config::PerceptionConfig;
use crate::core::types::{PlayerId, SimTime, TickInput};
use crate::spatial::location::LocationResolver;
use crate::spatial::visibility::VisibilityOracle;
use crate::world::view::{PlayerState, WorldView};

/// Borrowed inputs for one tick of perception
pub struct Senses<'a, W: WorldView, O: VisibilityOracle> {
    pub world: &'a W,
    pub oracle: &'a O,
    pub resolver: &'a LocationResolver,
    pub config: &'a PerceptionConfig,
    pub agent: PlayerId,
    pub agent_state: PlayerState,
    pub tick: TickInput,
}

impl<'a, W: WorldView, O: VisibilityOracle> Senses<'a, W, O> {
    /// Sightings newer than this are fresh enough to explain a vent entry
    pub fn concealment_cutoff(&self) -> SimTime {
        self.tick.now - self.config.concealment_window_ticks * self.tick.delta
    }
}

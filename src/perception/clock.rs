//! Round timing

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

/// Tracks when tracking began and when the current round began
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    tracking_start: SimTime,
    round_start: SimTime,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracking begins; the first round starts with it
    pub fn start(&mut self, now: SimTime) {
        self.tracking_start = now;
        self.round_start = now;
    }

    /// A meeting ended and a new round begins
    pub fn begin_round(&mut self, now: SimTime) {
        self.round_start = now;
    }

    pub fn tracking_start(&self) -> SimTime {
        self.tracking_start
    }

    pub fn round_start(&self) -> SimTime {
        self.round_start
    }

    pub fn elapsed_round(&self, now: SimTime) -> f32 {
        now - self.round_start
    }

    pub fn elapsed_game(&self, now: SimTime) -> f32 {
        now - self.tracking_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_elapsed() {
        let mut clock = RoundClock::new();
        clock.start(10.0);
        assert_eq!(clock.elapsed_round(15.0), 5.0);
        assert_eq!(clock.elapsed_game(15.0), 5.0);

        clock.begin_round(20.0);
        assert_eq!(clock.round_start(), 20.0);
        assert_eq!(clock.elapsed_round(26.0), 6.0);
        assert_eq!(clock.elapsed_game(26.0), 16.0);
        assert_eq!(clock.tracking_start(), 10.0);
    }
}

//! Scripted session replay
//!
//! A scenario describes a handful of players walking in straight lines and
//! a script of kills, vent trips, meetings and departures. Replaying it
//! drives a full perception session and collects the narration.

use serde::Deserialize;
use std::path::Path;

use crate::core::config::PerceptionConfig;
use crate::core::error::{PerceptionError, Result};
use crate::core::types::{GamePhase, PlayerId, SimTime, TickInput, Vec2};
use crate::perception::bodies::DeadBody;
use crate::perception::context::SessionSlot;
use crate::perception::frame::PerceptionFrame;
use crate::perception::nearby::StraightLine;
use crate::perception::report::Report;
use crate::spatial::layout::ShipLayout;
use crate::world::snapshot::WorldSnapshot;
use crate::world::view::WorldView;

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPlayer {
    pub id: u8,
    pub name: String,
    pub position: [f32; 2],
    #[serde(default)]
    pub velocity: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedAction {
    /// Player dies where they stand and their body appears
    Kill,
    /// Player jumps into a vent
    Vent,
    /// Player climbs out of a vent
    ExitVent,
    /// Player stops walking
    Stop,
    /// Everyone meets; a report is made and a new round starts
    Meeting,
    /// Player disconnects
    Leave,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedEvent {
    /// Tick index the action happens on, before sensing
    pub tick: u32,
    pub action: ScriptedAction,
    #[serde(default)]
    pub player: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub agent: u8,
    #[serde(default = "default_delta")]
    pub delta: f32,
    pub ticks: u32,
    #[serde(default)]
    pub start_time: SimTime,
    pub players: Vec<ScenarioPlayer>,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

fn default_delta() -> f32 {
    0.02
}

/// What a replay produced
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub transcript: Vec<String>,
    pub reports: Vec<Report>,
    pub frame: PerceptionFrame,
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.delta > 0.0 && self.delta.is_finite()) {
            return Err(PerceptionError::InvalidScenario(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        if !self.players.iter().any(|p| p.id == self.agent) {
            return Err(PerceptionError::InvalidScenario(format!(
                "agent {} is not one of the players",
                self.agent
            )));
        }

        for event in &self.events {
            match (event.action, event.player) {
                (ScriptedAction::Meeting, _) => {}
                (action, None) => {
                    return Err(PerceptionError::InvalidScenario(format!(
                        "{:?} at tick {} needs a player",
                        action, event.tick
                    )));
                }
                (_, Some(id)) if !self.players.iter().any(|p| p.id == id) => {
                    return Err(PerceptionError::UnknownPlayer(PlayerId(id)));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn time_at(&self, tick: u32) -> SimTime {
        self.start_time + tick as f32 * self.delta
    }

    /// Replay the scenario on a ship layout
    pub fn run(&self, layout: &ShipLayout, config: PerceptionConfig) -> Result<ScenarioOutcome> {
        self.validate()?;

        let mut world = WorldSnapshot::new(GamePhase::Playing);
        let mut velocities: Vec<(PlayerId, Vec2)> = Vec::new();
        for player in &self.players {
            let id = PlayerId(player.id);
            world = world.with_player(id, player.name.clone(), Vec2::from(player.position));
            velocities.push((id, Vec2::from(player.velocity)));
        }

        let mut slot = SessionSlot::new();
        let ctx = slot.open_ship(config, layout)?;
        let roster: Vec<PlayerId> = self.players.iter().map(|p| PlayerId(p.id)).collect();
        ctx.tracking_started(PlayerId(self.agent), &roster, self.start_time);

        let occluders = layout.occluders();
        let mut transcript = Vec::new();
        let mut reports = Vec::new();

        for index in 0..self.ticks {
            let now = self.time_at(index + 1);

            for event in self.events.iter().filter(|e| e.tick == index) {
                let target = event.player.map(PlayerId);
                match (event.action, target) {
                    (ScriptedAction::Kill, Some(id)) => {
                        world.kill(id);
                        velocities.retain(|(p, _)| *p != id);
                        if let Some(state) = world.player(id) {
                            let body = DeadBody {
                                owner: id,
                                position: state.position,
                                true_position: state.true_position,
                            };
                            if let Some(narration) = ctx.body_discovered(body) {
                                transcript.push(stamp(now, narration.narrate(&world)));
                            }
                        }
                    }
                    (ScriptedAction::Vent, Some(id)) => world.set_in_vent(id, true),
                    (ScriptedAction::ExitVent, Some(id)) => world.set_in_vent(id, false),
                    (ScriptedAction::Stop, Some(id)) => velocities.retain(|(p, _)| *p != id),
                    (ScriptedAction::Leave, Some(id)) => {
                        ctx.player_left(id);
                        world.remove_player(id);
                        velocities.retain(|(p, _)| *p != id);
                    }
                    (ScriptedAction::Meeting, _) => {
                        world.set_phase(GamePhase::Meeting);
                        let report = ctx.report(&world, now);
                        transcript.push(stamp(now, "Meeting called".to_string()));
                        transcript.extend(report.lines());
                        reports.push(report);
                        ctx.round_boundary(now);
                        world.set_phase(GamePhase::Playing);
                    }
                    (_, None) => {}
                }
            }

            for (id, velocity) in &velocities {
                if let Some(state) = world.player(*id) {
                    if !state.in_vent {
                        world.move_player(*id, state.position + *velocity * self.delta);
                    }
                }
            }

            let events = ctx.tick(&world, &occluders, TickInput::new(now, self.delta));
            for event in &events {
                transcript.push(stamp(now, event.narrate(&world)));
            }
            ctx.record_nearby_objects(&world, &StraightLine);
        }

        let end = self.time_at(self.ticks);
        world.set_phase(GamePhase::Meeting);
        let report = ctx.report(&world, end);
        transcript.push(stamp(end, "Final report".to_string()));
        transcript.extend(report.lines());
        reports.push(report);

        Ok(ScenarioOutcome {
            transcript,
            reports,
            frame: ctx.frame(),
        })
    }
}

fn stamp(now: SimTime, line: String) -> String {
    format!("[{:>7.2}s] {}", now, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        agent = 0
        delta = 0.5
        ticks = 4

        [[players]]
        id = 0
        name = "Red"
        position = [0.0, 0.0]

        [[players]]
        id = 1
        name = "Blue"
        position = [2.0, 0.0]

        [[events]]
        tick = 2
        action = "meeting"
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_toml_str(SCENARIO).unwrap();
        assert_eq!(scenario.players.len(), 2);
        assert_eq!(scenario.events[0].action, ScriptedAction::Meeting);
        assert_eq!(scenario.players[1].velocity, [0.0, 0.0]);
    }

    #[test]
    fn test_agent_must_be_a_player() {
        let source = SCENARIO.replace("agent = 0", "agent = 9");
        assert!(matches!(
            Scenario::from_toml_str(&source),
            Err(PerceptionError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_event_player_must_exist() {
        let source = format!("{}\n[[events]]\ntick = 1\naction = \"kill\"\nplayer = 5\n", SCENARIO);
        assert!(matches!(
            Scenario::from_toml_str(&source),
            Err(PerceptionError::UnknownPlayer(PlayerId(5)))
        ));
    }

    #[test]
    fn test_kill_needs_a_player() {
        let source = format!("{}\n[[events]]\ntick = 1\naction = \"kill\"\n", SCENARIO);
        assert!(matches!(
            Scenario::from_toml_str(&source),
            Err(PerceptionError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_run_reports_each_meeting() {
        let scenario = Scenario::from_toml_str(SCENARIO).unwrap();
        let outcome = scenario
            .run(&ShipLayout::default(), PerceptionConfig::default())
            .unwrap();

        // One meeting plus the final report
        assert_eq!(outcome.reports.len(), 2);
        assert!(outcome.transcript.iter().any(|l| l.contains("Meeting called")));
        assert!((outcome.frame.record(PlayerId(1)).unwrap().distance - 2.0).abs() < 1e-6);
    }
}

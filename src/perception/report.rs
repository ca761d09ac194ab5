//! Meeting report
//!
//! Summarises everything the agent remembers about the other players, in
//! roster order, as structured findings and as narration lines.

use serde::Serialize;
use std::fmt;

use crate::core::types::{PlayerId, SimTime};
use crate::perception::clock::RoundClock;
use crate::perception::players::PlayerPerceptionStore;
use crate::world::view::WorldView;

/// Share of a time span, or unknown when the span is empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Percentage {
    Known(f32),
    Unknown,
}

impl Percentage {
    /// `part / whole` as a percentage; unknown for a zero or negative span
    pub fn of(part: f32, whole: f32) -> Self {
        if whole > 0.0 && whole.is_finite() {
            Percentage::Known(part / whole * 100.0)
        } else {
            Percentage::Unknown
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Known(value) => write!(f, "{:.1}%", value),
            Percentage::Unknown => write!(f, "an unknown share"),
        }
    }
}

/// Whole minutes and seconds of a duration, floored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub fn from_secs(secs: f32) -> Self {
        let total = secs.max(0.0).floor() as u32;
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

/// What the agent can say about one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Finding {
    Dead {
        player: PlayerId,
        name: String,
        location: String,
        seconds_ago: i64,
        witnesses: Vec<String>,
    },
    Alive {
        player: PlayerId,
        name: String,
        location: String,
        seconds_ago: i64,
        saw_vent: bool,
        game_time: ClockTime,
        round_time: ClockTime,
        game_share: Percentage,
        round_share: Percentage,
    },
}

impl Finding {
    pub fn player(&self) -> PlayerId {
        match self {
            Finding::Dead { player, .. } | Finding::Alive { player, .. } => *player,
        }
    }

    fn write_lines(&self, lines: &mut Vec<String>) {
        match self {
            Finding::Dead { name, location, seconds_ago, witnesses, .. } => {
                lines.push(format!(
                    "{} was found dead in {} {} seconds ago.",
                    name, location, seconds_ago
                ));
                if witnesses.is_empty() {
                    lines.push("Witnesses: none".to_string());
                } else {
                    lines.push(format!("Witnesses: {}", witnesses.join(", ")));
                }
            }
            Finding::Alive {
                name,
                location,
                seconds_ago,
                saw_vent,
                game_time,
                round_time,
                game_share,
                round_share,
                ..
            } => {
                lines.push(format!(
                    "{} was last seen in {} {} seconds ago.",
                    name, location, seconds_ago
                ));
                if *saw_vent {
                    lines.push(format!("I saw {} vent right in front of me!", name));
                }
                lines.push(format!(
                    "{} has spent {} minutes and {} seconds near me this game ({} of the game)",
                    name, game_time.minutes, game_time.seconds, game_share
                ));
                lines.push(format!(
                    "{} has spent {} minutes and {} seconds near me this round ({} of the round)",
                    name, round_time.minutes, round_time.seconds, round_share
                ));
            }
        }
    }
}

/// Findings about every other player with a known location
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub entries: Vec<Finding>,
}

impl Report {
    /// Build a report from accumulated memory; reads only
    pub fn generate(
        store: &PlayerPerceptionStore,
        clock: &RoundClock,
        agent: PlayerId,
        world: &impl WorldView,
        now: SimTime,
    ) -> Self {
        let entries = store
            .known()
            .iter()
            .filter(|&&id| id != agent)
            .filter_map(|&id| {
                let memory = store.last_seen(id)?;
                if !memory.has_been_seen() {
                    return None;
                }

                let name = world.player_name(id);
                let seconds_ago = (now - memory.last_seen_time).round() as i64;

                let finding = if memory.is_dead {
                    Finding::Dead {
                        player: id,
                        name,
                        location: memory.location.clone(),
                        seconds_ago,
                        witnesses: memory.witnesses.iter().map(|&w| world.player_name(w)).collect(),
                    }
                } else {
                    Finding::Alive {
                        player: id,
                        name,
                        location: memory.location.clone(),
                        seconds_ago,
                        saw_vent: memory.saw_concealment_entry,
                        game_time: ClockTime::from_secs(memory.game_time_visible),
                        round_time: ClockTime::from_secs(memory.round_time_visible),
                        game_share: Percentage::of(memory.game_time_visible, clock.elapsed_game(now)),
                        round_share: Percentage::of(memory.round_time_visible, clock.elapsed_round(now)),
                    }
                };
                Some(finding)
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finding(&self, player: PlayerId) -> Option<&Finding> {
        self.entries.iter().find(|f| f.player() == player)
    }

    /// Narration lines, in roster order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            entry.write_lines(&mut lines);
        }
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GamePhase, Vec2};
    use crate::perception::records::Sighting;
    use crate::world::WorldSnapshot;

    const AGENT: PlayerId = PlayerId(0);
    const BLUE: PlayerId = PlayerId(1);
    const CYAN: PlayerId = PlayerId(2);

    fn world() -> WorldSnapshot {
        WorldSnapshot::new(GamePhase::Meeting)
            .with_player(AGENT, "Agent", Vec2::ZERO)
            .with_player(BLUE, "Blue", Vec2::ZERO)
            .with_player(CYAN, "Cyan", Vec2::ZERO)
    }

    fn store() -> PlayerPerceptionStore {
        let mut store = PlayerPerceptionStore::new();
        store.start_tracking(&[AGENT, BLUE, CYAN]);
        store
    }

    #[test]
    fn test_percentage_guard() {
        assert_eq!(Percentage::of(1.0, 0.0), Percentage::Unknown);
        assert_eq!(Percentage::of(1.0, -2.0), Percentage::Unknown);
        assert_eq!(Percentage::of(1.0, 4.0), Percentage::Known(25.0));
        assert_eq!(Percentage::Known(12.34).to_string(), "12.3%");
        assert_eq!(Percentage::Unknown.to_string(), "an unknown share");
    }

    #[test]
    fn test_clock_time_floors() {
        assert_eq!(ClockTime::from_secs(125.9), ClockTime { minutes: 2, seconds: 5 });
        assert_eq!(ClockTime::from_secs(-3.0), ClockTime { minutes: 0, seconds: 0 });
    }

    #[test]
    fn test_unseen_players_are_skipped() {
        let report = Report::generate(&store(), &RoundClock::new(), AGENT, &world(), 10.0);
        assert!(report.is_empty());
        assert!(report.lines().is_empty());
    }

    #[test]
    fn test_alive_finding_lines() {
        let mut store = store();
        store.observe(BLUE, Sighting { location: "Admin".into(), now: 30.0, delta: 15.0 });
        store.mark_concealed(BLUE);
        let mut clock = RoundClock::new();
        clock.start(0.0);
        clock.begin_round(20.0);

        let report = Report::generate(&store, &clock, AGENT, &world(), 60.0);

        assert_eq!(
            report.lines(),
            vec![
                "Blue was last seen in Admin 30 seconds ago.",
                "I saw Blue vent right in front of me!",
                "Blue has spent 0 minutes and 15 seconds near me this game (25.0% of the game)",
                "Blue has spent 0 minutes and 15 seconds near me this round (37.5% of the round)",
            ]
        );
    }

    #[test]
    fn test_dead_finding_lines() {
        let mut store = store();
        store.mark_dead(BLUE, "Electrical".into(), 50.0, || vec![CYAN]);
        store.mark_dead(CYAN, "Storage".into(), 55.0, Vec::new);

        let report = Report::generate(&store, &RoundClock::new(), AGENT, &world(), 60.4);

        assert_eq!(
            report.lines(),
            vec![
                "Blue was found dead in Electrical 10 seconds ago.",
                "Witnesses: Cyan",
                "Cyan was found dead in Storage 5 seconds ago.",
                "Witnesses: none",
            ]
        );
    }

    #[test]
    fn test_report_at_tracking_start_has_unknown_shares() {
        let mut store = store();
        store.observe(BLUE, Sighting { location: "Admin".into(), now: 5.0, delta: 0.0 });
        let mut clock = RoundClock::new();
        clock.start(5.0);

        let report = Report::generate(&store, &clock, AGENT, &world(), 5.0);

        match report.finding(BLUE) {
            Some(Finding::Alive { game_share, round_share, .. }) => {
                assert_eq!(*game_share, Percentage::Unknown);
                assert_eq!(*round_share, Percentage::Unknown);
            }
            other => panic!("unexpected finding {:?}", other),
        }
        assert!(report.to_string().contains("(an unknown share of the game)"));
    }
}

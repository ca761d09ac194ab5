//! Scenario replay
//!
//! Replays a scripted session against a ship layout and prints what the
//! agent narrated along the way.

use clap::Parser;
use crew_sight::core::error::Result;
use crew_sight::core::PerceptionConfig;
use crew_sight::scenario::Scenario;
use crew_sight::spatial::ShipLayout;
use std::path::PathBuf;

/// Replay a scripted game through the perception engine
#[derive(Parser, Debug)]
#[command(name = "sight_replay")]
#[command(about = "Replay a scripted session and print the agent's narration")]
struct Args {
    /// Ship layout (JSON: rooms, doors, vents, walls)
    #[arg(long)]
    layout: PathBuf,

    /// Scenario script (TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Perception config (TOML); defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final perception frame as JSON
    #[arg(long)]
    frame: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crew_sight=info")),
        )
        .init();

    let args = Args::parse();

    let layout = ShipLayout::load(&args.layout)?;
    let config = match &args.config {
        Some(path) => PerceptionConfig::load(path)?,
        None => PerceptionConfig::default(),
    };
    let scenario = Scenario::load(&args.scenario)?;

    tracing::info!(
        "Replaying {} ticks with {} players on {} rooms",
        scenario.ticks,
        scenario.players.len(),
        layout.rooms.len()
    );

    let outcome = scenario.run(&layout, config)?;
    for line in &outcome.transcript {
        println!("{}", line);
    }

    if args.frame {
        println!("{}", outcome.frame.to_json()?);
    }

    Ok(())
}

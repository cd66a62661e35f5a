//! Run command implementation.

use std::path::{Path, PathBuf};

use ghostgate::{Simulation, SimulationConfig, TrainedPath};

use super::output::{JsonRunSummary, RunEvents, format_text, render_frame};
use super::{CliError, OutputFormat, load_arena};

/// Execute the run command.
///
/// The players stand still on their start tiles; the run stops early once
/// every agent has escaped and no frames were requested.
///
/// # Errors
///
/// Returns an error if the layout or config cannot be loaded or the
/// configuration is invalid.
pub(crate) fn execute(
    layout: Option<&Path>,
    config: Option<PathBuf>,
    trained: Option<PathBuf>,
    ticks: u64,
    seed: Option<u64>,
    format: OutputFormat,
    frames: Option<u64>,
) -> Result<(), CliError> {
    let arena = load_arena(layout)?;

    let mut config = match config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    // A missing or broken path file is not fatal: the replaying agent walks randomly
    let trained = trained.and_then(TrainedPath::load_or_fallback);
    if trained.is_none() {
        tracing::info!("no trained path loaded, replay agent will move randomly");
    }

    let mut sim = Simulation::from_arena(&arena, config, trained.as_ref())?;
    let players = arena.player_starts;
    let frame_every = frames.filter(|&n| n > 0);
    let mut events = RunEvents::default();

    if frame_every.is_some() {
        println!("{}", render_frame(&sim, players));
    }
    for _ in 0..ticks {
        let report = sim.tick(players);
        events.record(&report);
        if let Some(n) = frame_every {
            if sim.ticks() % n == 0 {
                println!("{}", render_frame(&sim, players));
            }
        } else if sim.all_escaped() {
            tracing::debug!(tick = sim.ticks(), "all agents escaped, stopping early");
            break;
        }
    }

    match format {
        OutputFormat::Text => print!("{}", format_text(&sim, &events)),
        OutputFormat::Json => {
            let summary = JsonRunSummary::from_simulation(&sim, &events);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

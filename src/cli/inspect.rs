//! Trained path validation command implementation.

use std::path::Path;

use ghostgate::{TrainedPath, Walkable};

use super::{CliError, load_arena};

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid trained
/// path.
pub(crate) fn execute(path: &Path, layout: Option<&Path>) -> Result<(), CliError> {
    println!("Inspecting: {}", path.display());
    println!();

    let trained = TrainedPath::load(path)?;
    print_check("JSON array of [x, y] pairs", true);
    print_check("Non-negative, continuous waypoints", true);

    let arena = load_arena(layout)?;
    let roaming = arena.roaming_grid();
    let blocked = trained
        .waypoints()
        .iter()
        .filter(|&&p| !roaming.is_open(p))
        .count();
    print_check("Every waypoint open outside the cage", blocked == 0);

    let gate = arena.barrier;
    let starts_at_gate = trained
        .waypoints()
        .first()
        .is_some_and(|&first| first == gate || first.is_adjacent(gate));
    print_check("Starts at the barrier tile", starts_at_gate);

    println!();
    println!("Summary:");
    println!("  Waypoints:    {}", trained.len());
    if let (Some(first), Some(last)) = (trained.waypoints().first(), trained.waypoints().last()) {
        println!("  First:        {first}");
        println!("  Last:         {last}");
    }
    if blocked > 0 {
        println!("  Blocked:      {blocked} waypoints (replay may fall back to random movement)");
    }

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "WARN" };
    println!("  [{status:>4}] {name}");
}

//! Train command implementation.

use std::path::PathBuf;
use std::time::Instant;

use ghostgate::gp::{TrainingConfig, train_with_callback};
use ghostgate::Position;
use indicatif::{ProgressBar, ProgressStyle};

use super::{CliError, load_arena};

/// Arguments for the train command.
#[derive(Debug)]
pub(crate) struct TrainArgs {
    /// Layout file, or the built-in arena when `None`.
    pub(crate) layout: Option<PathBuf>,
    /// JSON training config replacing the defaults.
    pub(crate) config: Option<PathBuf>,
    /// Population size override.
    pub(crate) population: Option<usize>,
    /// Genes per chromosome override.
    pub(crate) genes: Option<usize>,
    /// Generation count override.
    pub(crate) generations: Option<usize>,
    /// Mutation rate override.
    pub(crate) mutation_rate: Option<f64>,
    /// RNG seed override.
    pub(crate) seed: Option<u64>,
    /// Start tile override.
    pub(crate) start: Option<Position>,
    /// Target tile override.
    pub(crate) target: Option<Position>,
    /// Where the trained path is written.
    pub(crate) output: PathBuf,
    /// Draw a progress bar while training.
    pub(crate) progress: bool,
}

/// Execute the train command.
///
/// # Errors
///
/// Returns an error if the layout or config cannot be loaded, the
/// configuration is invalid, or the trained path cannot be written.
pub(crate) fn execute(args: TrainArgs) -> Result<(), CliError> {
    let arena = load_arena(args.layout.as_deref())?;

    // Without a config file, train from the barrier tile, where the
    // replaying agent escapes, toward the first player
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            serde_json::from_str::<TrainingConfig>(&text)?
        }
        None => TrainingConfig {
            start: arena.barrier,
            target: arena.player_starts[0],
            ..TrainingConfig::default()
        },
    };
    if let Some(n) = args.population {
        config.population_size = n;
    }
    if let Some(n) = args.genes {
        config.gene_length = n;
    }
    if let Some(n) = args.generations {
        config.generations = n;
    }
    if let Some(rate) = args.mutation_rate {
        config.mutation_rate = rate;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(target) = args.target {
        config.target = target;
    }

    let pb = if args.progress {
        let pb = ProgressBar::new(config.generations as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=>-"));
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let grid = arena.roaming_grid();
    let start_time = Instant::now();
    let report = train_with_callback(&grid, &config, |stats| {
        if let Some(pb) = &pb {
            pb.set_message(format!("best={:.4}", stats.best_fitness));
            pb.inc(1);
        }
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message(format!("best={:.4}", report.best.fitness));
    }

    report.path.save(&args.output)?;

    println!("Training complete ({:.2}s)", start_time.elapsed().as_secs_f64());
    println!("  Generations:  {}", config.generations);
    println!("  Population:   {}", config.population_size);
    println!("  Start:        {}", config.start);
    println!("  Target:       {}", config.target);
    println!("  Best fitness: {:.4}", report.best.fitness);
    if let Some(last) = report.path.waypoints().last() {
        println!("  Ends at:      {last}");
    }
    println!("  Saved {} waypoints to {}", report.path.len(), args.output.display());

    Ok(())
}

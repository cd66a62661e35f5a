//! Ghostgate CLI - train replay paths and run headless ghost simulations.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Ghostgate - deterministic ghost AI for a maze-chase game
#[derive(Parser, Debug)]
#[command(name = "ghostgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a movement sequence and save its trajectory
    Train {
        /// Arena layout file (default: built-in arena)
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// JSON training config; flags override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Individuals per generation
        #[arg(long)]
        population: Option<usize>,

        /// Genes per individual
        #[arg(long)]
        genes: Option<usize>,

        /// Generations to run
        #[arg(short, long)]
        generations: Option<usize>,

        /// Per-gene mutation probability
        #[arg(short, long)]
        mutation_rate: Option<f64>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start tile as X,Y (default: the barrier tile)
        #[arg(long, value_parser = cli::parse_position)]
        start: Option<ghostgate::Position>,

        /// Target tile as X,Y (default: first player start)
        #[arg(long, value_parser = cli::parse_position)]
        target: Option<ghostgate::Position>,

        /// Output file for the trained path
        #[arg(short, long, default_value = "trained_path.json")]
        output: PathBuf,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Run the simulation headless for a number of ticks
    Run {
        /// Arena layout file (default: built-in arena)
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// JSON simulation config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trained path for the replaying agent
        #[arg(long)]
        trained: Option<PathBuf>,

        /// Ticks to simulate
        #[arg(short, long, default_value = "300")]
        ticks: u64,

        /// Random seed for fallback movement
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Print an ASCII frame every N ticks
        #[arg(long)]
        frames: Option<u64>,
    },

    /// Validate a trained path file
    Inspect {
        /// Trained path file
        #[arg(required = true)]
        path: PathBuf,

        /// Also check the path against an arena layout (default: built-in arena)
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Train {
            layout,
            config,
            population,
            genes,
            generations,
            mutation_rate,
            seed,
            start,
            target,
            output,
            progress,
        } => cli::train::execute(cli::train::TrainArgs {
            layout,
            config,
            population,
            genes,
            generations,
            mutation_rate,
            seed,
            start,
            target,
            output,
            progress,
        }),

        Commands::Run {
            layout,
            config,
            trained,
            ticks,
            seed,
            format,
            frames,
        } => cli::run::execute(layout.as_deref(), config, trained, ticks, seed, format, frames),

        Commands::Inspect { path, layout } => cli::inspect::execute(&path, layout.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

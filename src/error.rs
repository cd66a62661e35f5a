//! Error types for layout loading, configuration, training and trained-path files.
//!
//! None of these are raised by the per-tick simulation: unreachable goals,
//! stale steps and missing replay data are all handled in place.

use std::path::PathBuf;

use crate::grid::Position;

/// Failure to parse a textual grid or arena layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The layout has no rows or no columns.
    #[error("layout is empty")]
    Empty,
    /// A row has a different width than the first row.
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character that maps to no cell or marker.
    #[error("unknown cell {ch:?} at ({col}, {row})")]
    UnknownCell {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// A numeric cell code outside `0..=2`.
    #[error("invalid cell code {0}")]
    InvalidCode(u8),
    /// A required marker does not appear in the layout.
    #[error("layout is missing marker {0:?}")]
    MissingMarker(char),
    /// A marker that must be unique appears more than once.
    #[error("marker {marker:?} appears at both {first} and {second}")]
    DuplicateMarker {
        /// The duplicated marker.
        marker: char,
        /// First occurrence.
        first: Position,
        /// Second occurrence.
        second: Position,
    },
    /// No cage walls, or cage walls that enclose no interior.
    #[error("layout has no cage with a non-empty interior")]
    MissingCage,
    /// The layout is too large to address with signed tile coordinates.
    #[error("layout of {width}x{height} tiles is too large")]
    TooLarge {
        /// Width in tiles.
        width: usize,
        /// Height in tiles.
        height: usize,
    },
}

/// Invalid simulation configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Tile size must be positive and finite.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f32),
    /// Speed must be positive and no larger than a tile.
    #[error("speed must be in (0, tile_size], got {0}")]
    InvalidSpeed(f32),
    /// Containment radius must be positive.
    #[error("containment radius must be positive, got {0}")]
    InvalidContainmentRadius(f32),
    /// Adversarial search needs at least one ply.
    #[error("adversarial depth must be at least 1")]
    InvalidDepth,
    /// Animation needs at least one frame and a non-zero period.
    #[error("animation needs at least one frame and a non-zero period")]
    InvalidAnimation,
    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A configuration file is not valid JSON for the expected schema.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to read, write or validate a trained path artifact.
#[derive(Debug, thiserror::Error)]
pub enum PathFileError {
    /// File I/O failed.
    #[error("trained path I/O on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Content is not a JSON array of `[x, y]` integer pairs.
    #[error("trained path is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A waypoint has a negative coordinate.
    #[error("waypoint {index} has a negative coordinate")]
    NegativeCoordinate {
        /// Index of the offending waypoint.
        index: usize,
    },
    /// A waypoint lies beyond any grid a layout can describe.
    #[error("waypoint {index} is out of range (coordinates above {max})")]
    OutOfRange {
        /// Index of the offending waypoint.
        index: usize,
        /// Largest accepted coordinate.
        max: i32,
    },
    /// Two consecutive waypoints are neither equal nor adjacent.
    #[error("waypoint {index} is not adjacent to the waypoint before it")]
    Discontinuous {
        /// Index of the waypoint that jumps.
        index: usize,
    },
}

/// Failure to run or persist a training session.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    /// Population must contain at least one individual.
    #[error("population size must be at least 1")]
    EmptyPopulation,
    /// Gene sequences must contain at least one symbol.
    #[error("gene length must be at least 1")]
    EmptyGenes,
    /// Mutation rate must be a probability.
    #[error("mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f64),
    /// The training start lies outside the grid.
    #[error("training start {0} is outside the grid")]
    StartOutOfBounds(Position),
    /// The training target lies outside the grid.
    #[error("training target {0} is outside the grid")]
    TargetOutOfBounds(Position),
    /// Writing the trained path failed.
    #[error(transparent)]
    Persist(#[from] PathFileError),
}

//! CLI command implementations for Ghostgate.

pub(crate) mod inspect;
pub(crate) mod run;
pub(crate) mod train;

mod output;

use std::error::Error;
use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use ghostgate::{Arena, ConfigError, LayoutError, PathFileError, Position, TrainingError};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}

impl From<LayoutError> for CliError {
    fn from(e: LayoutError) -> Self {
        Self::new(format!("invalid layout: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PathFileError> for CliError {
    fn from(e: PathFileError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<TrainingError> for CliError {
    fn from(e: TrainingError) -> Self {
        Self::new(format!("training failed: {e}"))
    }
}

/// Parse a tile given as `X,Y`.
pub(crate) fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Position::new(x, y))
}

/// Load an arena layout file, or the built-in arena when `None`.
fn load_arena(layout: Option<&Path>) -> Result<Arena, CliError> {
    match layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            Ok(text.parse()?)
        }
        None => Ok(Arena::builtin()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_position(" 10 , 2 "), Ok(Position::new(10, 2)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn test_load_builtin_arena() {
        let arena = load_arena(None).unwrap();
        assert_eq!(arena.player_starts.len(), 2);
    }
}

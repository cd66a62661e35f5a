//! Trained path artifact.
//!
//! The artifact is a JSON array of `[x, y]` integer pairs, one per gene of
//! the best sequence. Loading is strict: anything that is not exactly that
//! shape, has negative or out-of-range coordinates, or jumps between
//! non-adjacent tiles is rejected, and live callers fall back to random
//! movement instead.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PathFileError;
use crate::grid::Position;

/// Largest coordinate accepted in an artifact.
pub const MAX_COORDINATE: i32 = 65_535;

/// An ordered sequence of waypoints for an agent to replay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainedPath(Vec<Position>);

impl TrainedPath {
    /// Wrap a trajectory.
    #[must_use]
    pub fn new(waypoints: Vec<Position>) -> Self {
        Self(waypoints)
    }

    /// Waypoints in replay order.
    #[must_use]
    pub fn waypoints(&self) -> &[Position] {
        &self.0
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the waypoint list.
    #[must_use]
    pub fn into_inner(self) -> Vec<Position> {
        self.0
    }

    /// Parse and validate artifact text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of integer pairs,
    /// a coordinate is negative or above [`MAX_COORDINATE`], or consecutive
    /// waypoints are neither equal nor adjacent.
    pub fn parse(text: &str) -> Result<Self, PathFileError> {
        let path: Self = serde_json::from_str(text)?;
        path.check()?;
        Ok(path)
    }

    fn check(&self) -> Result<(), PathFileError> {
        if let Some(index) = self.0.iter().position(|p| p.x < 0 || p.y < 0) {
            return Err(PathFileError::NegativeCoordinate { index });
        }
        if let Some(index) = self
            .0
            .iter()
            .position(|p| p.x > MAX_COORDINATE || p.y > MAX_COORDINATE)
        {
            return Err(PathFileError::OutOfRange {
                index,
                max: MAX_COORDINATE,
            });
        }
        if let Some(index) = self
            .0
            .windows(2)
            .position(|w| w[0] != w[1] && !w[0].is_adjacent(w[1]))
        {
            return Err(PathFileError::Discontinuous { index: index + 1 });
        }
        Ok(())
    }

    /// Serialize as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PathFileError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the artifact to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PathFileError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| PathFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PathFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PathFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Load the artifact for live play.
    ///
    /// Any failure is logged and reported as `None`; the caller then uses
    /// random movement. An empty artifact is treated the same way.
    #[must_use]
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(trained) if trained.is_empty() => {
                tracing::warn!(path = %path.display(), "trained path is empty, using random movement");
                None
            }
            Ok(trained) => {
                tracing::info!(path = %path.display(), waypoints = trained.len(), "loaded trained path");
                Some(trained)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "trained path unavailable, using random movement");
                None
            }
        }
    }
}

impl From<Vec<Position>> for TrainedPath {
    fn from(waypoints: Vec<Position>) -> Self {
        Self::new(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_roundtrip() {
        let path = TrainedPath::new(vec![p(1, 1), p(2, 1), p(2, 2)]);
        let json = path.to_json().unwrap();
        assert_eq!(json, "[[1,1],[2,1],[2,2]]");
        assert_eq!(TrainedPath::parse(&json).unwrap(), path);
    }

    #[test]
    fn test_repeated_waypoints_allowed() {
        let path = TrainedPath::parse("[[3,3],[3,3],[3,4]]").unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            TrainedPath::parse("{\"x\": 1}"),
            Err(PathFileError::Malformed(_))
        ));
        assert!(matches!(
            TrainedPath::parse("[(1, 1), (2, 1)]"),
            Err(PathFileError::Malformed(_))
        ));
        assert!(matches!(
            TrainedPath::parse("[[1, 1, 1]]"),
            Err(PathFileError::Malformed(_))
        ));
        assert!(matches!(
            TrainedPath::parse("[[1.5, 1]]"),
            Err(PathFileError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            TrainedPath::parse("[[0,0],[0,-1]]"),
            Err(PathFileError::NegativeCoordinate { index: 1 })
        ));
    }

    #[test]
    fn test_rejects_huge_coordinates() {
        assert!(matches!(
            TrainedPath::parse("[[2147483647,2147483647],[0,0]]"),
            Err(PathFileError::OutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            TrainedPath::parse("[[65535,0],[65536,0]]"),
            Err(PathFileError::OutOfRange { index: 1, max: 65_535 })
        ));
        assert!(TrainedPath::parse("[[65534,0],[65535,0]]").is_ok());
    }

    #[test]
    fn test_rejects_jump() {
        assert!(matches!(
            TrainedPath::parse("[[0,0],[1,0],[3,0]]"),
            Err(PathFileError::Discontinuous { index: 2 })
        ));
        assert!(matches!(
            TrainedPath::parse("[[0,0],[1,1]]"),
            Err(PathFileError::Discontinuous { index: 1 })
        ));
    }

    #[test]
    fn test_empty_array_parses() {
        assert!(TrainedPath::parse("[]").unwrap().is_empty());
    }
}

//! Simulation configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::DEFAULT_DEPTH;

/// Tunables for the live simulation.
///
/// Sub-tile positions are measured in the same units as `tile_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Edge length of one tile in sub-tile units.
    pub tile_size: f32,
    /// Sub-tile units an agent moves per tick.
    pub speed: f32,
    /// Plies searched by the adversarial pursuer.
    pub adversarial_depth: u32,
    /// Euclidean radius, in tiles, of the zone around the barrier that a
    /// contained agent may always use.
    pub containment_radius: f32,
    /// Ticks the barrier flickers after each hit.
    pub flicker_ticks: u32,
    /// How far the barrier hitbox extends past the barrier tile on each side.
    pub hitbox_margin: f32,
    /// Ticks between animation frame changes.
    pub animation_period: u32,
    /// Animation frames per facing.
    pub animation_frames: u32,
    /// Seed for the random-movement fallback.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tile_size: 25.0,
            speed: 2.0,
            adversarial_depth: DEFAULT_DEPTH,
            containment_radius: 2.0,
            flicker_ticks: 10,
            hitbox_margin: 3.0,
            animation_period: 5,
            animation_frames: 2,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if !(self.speed.is_finite() && self.speed > 0.0 && self.speed <= self.tile_size) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !(self.containment_radius.is_finite() && self.containment_radius > 0.0) {
            return Err(ConfigError::InvalidContainmentRadius(self.containment_radius));
        }
        if self.adversarial_depth == 0 {
            return Err(ConfigError::InvalidDepth);
        }
        if self.animation_period == 0 || self.animation_frames == 0 {
            return Err(ConfigError::InvalidAnimation);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field is invalid.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

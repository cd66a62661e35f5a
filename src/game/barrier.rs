//! The breakable gate that holds agents in the cage.

// Tile coordinates are small enough to convert to f32 exactly
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use crate::grid::{Direction, Position};

/// Hits needed to breach an intact barrier.
pub const HITS_TO_BREACH: u32 = 2;

/// An axis-aligned rectangle of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRect {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
}

impl TileRect {
    /// True if the tile lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.x + self.width && pos.y >= self.y && pos.y < self.y + self.height
    }

    /// True if a sub-tile point lies inside the rectangle scaled by
    /// `tile_size`. The left and top edges are inclusive, the right and
    /// bottom edges exclusive.
    #[must_use]
    pub fn contains_point(&self, px: f32, py: f32, tile_size: f32) -> bool {
        let left = self.x as f32 * tile_size;
        let top = self.y as f32 * tile_size;
        let right = left + self.width as f32 * tile_size;
        let bottom = top + self.height as f32 * tile_size;
        px >= left && px < right && py >= top && py < bottom
    }
}

/// Barrier state as seen by agents and renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierState {
    /// Fewer than [`HITS_TO_BREACH`] hits so far.
    Intact,
    /// Permanently open.
    Breached,
}

/// Hit counter, breach flag, flicker countdown and escape counter for the
/// cage gate.
///
/// The breach flag is set exactly when the hit counter reaches
/// [`HITS_TO_BREACH`] and is never cleared; hits after that are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barrier {
    tile: Position,
    cage: TileRect,
    hits: u32,
    breached: bool,
    flicker: u32,
    flicker_ticks: u32,
    escaped: u32,
}

impl Barrier {
    /// Create an intact barrier at `tile` guarding the `cage` interior.
    #[must_use]
    pub const fn new(tile: Position, cage: TileRect, flicker_ticks: u32) -> Self {
        Self {
            tile,
            cage,
            hits: 0,
            breached: false,
            flicker: 0,
            flicker_ticks,
            escaped: 0,
        }
    }

    /// Register one impact.
    ///
    /// Increments the hit counter and restarts the flicker countdown. Does
    /// nothing once breached.
    pub fn hit(&mut self) {
        if self.breached {
            return;
        }
        self.hits += 1;
        self.flicker = self.flicker_ticks;
        tracing::debug!(hits = self.hits, "barrier hit");
        if self.hits >= HITS_TO_BREACH {
            self.breached = true;
            tracing::info!(tile = %self.tile, "barrier breached");
        }
    }

    /// Advance the flicker countdown by one tick.
    pub fn tick(&mut self) {
        self.flicker = self.flicker.saturating_sub(1);
    }

    /// Count an agent that has left containment.
    pub fn record_escape(&mut self) {
        self.escaped += 1;
    }

    /// True once the barrier has been broken.
    #[must_use]
    pub const fn is_breached(&self) -> bool {
        self.breached
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BarrierState {
        if self.breached {
            BarrierState::Breached
        } else {
            BarrierState::Intact
        }
    }

    /// Hits registered so far.
    #[must_use]
    pub const fn hits(&self) -> u32 {
        self.hits
    }

    /// Remaining flicker ticks; zero when not flickering.
    #[must_use]
    pub const fn flicker(&self) -> u32 {
        self.flicker
    }

    /// Agents that have escaped so far.
    #[must_use]
    pub const fn escaped_count(&self) -> u32 {
        self.escaped
    }

    /// The gate tile.
    #[must_use]
    pub const fn tile(&self) -> Position {
        self.tile
    }

    /// The cage interior.
    #[must_use]
    pub const fn cage(&self) -> TileRect {
        self.cage
    }

    /// True if a sub-tile point lies within the gate tile expanded by
    /// `margin` on every side.
    #[must_use]
    pub fn hitbox_contains(&self, px: f32, py: f32, tile_size: f32, margin: f32) -> bool {
        let left = self.tile.x as f32 * tile_size - margin;
        let top = self.tile.y as f32 * tile_size - margin;
        let size = tile_size + 2.0 * margin;
        px >= left && px < left + size && py >= top && py < top + size
    }

    /// True if a sub-tile point lies within the cage interior.
    #[must_use]
    pub fn cage_contains(&self, px: f32, py: f32, tile_size: f32) -> bool {
        self.cage.contains_point(px, py, tile_size)
    }

    /// Vertical direction leading from the cage out through the gate.
    #[must_use]
    pub const fn exit_direction(&self) -> Direction {
        if self.tile.y >= self.cage.y + self.cage.height {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier() -> Barrier {
        let cage = TileRect {
            x: 8,
            y: 9,
            width: 5,
            height: 3,
        };
        Barrier::new(Position::new(10, 12), cage, 10)
    }

    #[test]
    fn test_one_hit_is_not_enough() {
        let mut b = barrier();
        b.hit();
        assert!(!b.is_breached());
        assert_eq!(b.state(), BarrierState::Intact);
        assert_eq!(b.hits(), 1);
        assert_eq!(b.flicker(), 10);
    }

    #[test]
    fn test_two_hits_breach() {
        let mut b = barrier();
        b.hit();
        b.hit();
        assert!(b.is_breached());
        assert_eq!(b.state(), BarrierState::Breached);
    }

    #[test]
    fn test_hits_after_breach_are_ignored() {
        let mut b = barrier();
        b.hit();
        b.hit();
        b.tick();
        let flicker = b.flicker();
        b.hit();
        b.hit();
        assert_eq!(b.hits(), HITS_TO_BREACH);
        assert_eq!(b.flicker(), flicker);
        assert!(b.is_breached());
    }

    #[test]
    fn test_flicker_counts_down() {
        let mut b = barrier();
        b.hit();
        for _ in 0..4 {
            b.tick();
        }
        assert_eq!(b.flicker(), 6);
        for _ in 0..20 {
            b.tick();
        }
        assert_eq!(b.flicker(), 0);
    }

    #[test]
    fn test_escape_counter() {
        let mut b = barrier();
        b.record_escape();
        b.record_escape();
        assert_eq!(b.escaped_count(), 2);
    }

    #[test]
    fn test_hitbox_is_half_open() {
        let b = barrier();
        // Tile (10, 12) spans [250, 275) x [300, 325); margin 3 widens it.
        assert!(b.hitbox_contains(262.5, 312.5, 25.0, 3.0));
        assert!(b.hitbox_contains(247.0, 297.0, 25.0, 3.0));
        assert!(!b.hitbox_contains(278.0, 312.5, 25.0, 3.0));
        assert!(!b.hitbox_contains(262.5, 296.9, 25.0, 3.0));
    }

    #[test]
    fn test_cage_and_exit() {
        let b = barrier();
        assert!(b.cage_contains(262.5, 237.5, 25.0));
        assert!(!b.cage_contains(262.5, 312.5, 25.0));
        assert_eq!(b.exit_direction(), Direction::Down);

        let above = Barrier::new(Position::new(10, 8), b.cage(), 10);
        assert_eq!(above.exit_direction(), Direction::Up);
    }
}

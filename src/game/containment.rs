//! Restricted walkability for agents still inside the cage.

use crate::grid::{Cell, Grid, Position, Walkable};

/// The maze as seen by a contained agent planning from `origin`.
///
/// A tile is usable if it is in bounds, is not a maze wall, and is either
/// inside the containment zone (closer than `radius` to the barrier) or
/// strictly closer to the barrier than `origin`. Cage walls are usable.
/// Every usable tile is therefore no farther from the barrier than the
/// origin or the zone boundary, so a contained agent can only close in.
#[derive(Debug, Clone, Copy)]
pub struct ContainmentView<'a> {
    grid: &'a Grid,
    barrier: Position,
    radius: f32,
    origin_distance: f32,
}

impl<'a> ContainmentView<'a> {
    /// Build the view for an agent at `origin`.
    #[must_use]
    pub fn new(grid: &'a Grid, barrier: Position, radius: f32, origin: Position) -> Self {
        Self {
            grid,
            barrier,
            radius,
            origin_distance: origin.distance(barrier),
        }
    }

    /// True if `pos` lies inside the containment zone proper.
    #[must_use]
    pub fn in_zone(&self, pos: Position) -> bool {
        pos.distance(self.barrier) < self.radius
    }
}

impl Walkable for ContainmentView<'_> {
    fn is_open(&self, pos: Position) -> bool {
        match self.grid.get(pos) {
            None | Some(Cell::Wall) => false,
            Some(Cell::Open | Cell::Cage) => {
                let d = pos.distance(self.barrier);
                d < self.radius || d < self.origin_distance
            }
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }
}

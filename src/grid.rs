//! Grid model shared by every search and agent.
//!
//! - Integer tile coordinates and the four movement directions
//! - Cell codes (open, wall, cage wall) and the row-major grid
//! - The read-only [`Walkable`] view that searches are written against

mod coord;
mod map;

pub use coord::{Direction, Position};
pub use map::{Cell, Grid, Walkable};

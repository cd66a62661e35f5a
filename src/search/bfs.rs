//! Breadth-first search.

use std::collections::{HashMap, VecDeque};

use super::{Path, open_neighbors, reconstruct};
use crate::grid::{Position, Walkable};

/// Shortest path from `start` to `goal` on an unweighted 4-connected grid.
///
/// The start tile itself need not be open (an agent may stand on a tile
/// that only a restricted view treats as blocked). Returns an empty path
/// if `start == goal` or the goal cannot be reached.
#[must_use]
pub fn bfs<W: Walkable + ?Sized>(start: Position, goal: Position, grid: &W) -> Path {
    if start == goal {
        return Path::new();
    }

    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in open_neighbors(current, grid) {
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, current);
            if next == goal {
                return reconstruct(&came_from, start, goal);
            }
            queue.push_back(next);
        }
    }

    tracing::trace!(%start, %goal, "bfs: goal unreachable");
    Path::new()
}

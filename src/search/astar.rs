//! A* search with a Manhattan-distance heuristic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::{Path, open_neighbors, reconstruct};
use crate::grid::{Position, Walkable};

#[derive(Debug)]
struct OpenNode {
    f: i32,
    g: i32,
    pos: Position,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.tie == other.tie
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal f pops in insertion order.
        (other.f, other.tie).cmp(&(self.f, self.tie))
    }
}

/// Shortest path from `start` to `goal`, expanding nodes by `f = g + h`.
///
/// Returns the path excluding `start` and including `goal`, or an empty
/// path if unreachable or `start == goal`.
#[must_use]
pub fn astar<W: Walkable + ?Sized>(start: Position, goal: Position, grid: &W) -> Path {
    if start == goal {
        return Path::new();
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<Position, i32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut tie: u64 = 0;

    open.push(OpenNode {
        f: start.manhattan(goal),
        g: 0,
        pos: start,
        tie,
    });

    while let Some(node) = open.pop() {
        if node.pos == goal {
            return reconstruct(&came_from, start, goal);
        }
        if g_score.get(&node.pos).is_some_and(|&g| node.g > g) {
            // Stale heap entry.
            continue;
        }

        for next in open_neighbors(node.pos, grid) {
            let tentative = node.g + 1;
            if g_score.get(&next).is_some_and(|&g| tentative >= g) {
                continue;
            }
            came_from.insert(next, node.pos);
            g_score.insert(next, tentative);
            tie += 1;
            open.push(OpenNode {
                f: tentative.saturating_add(next.manhattan(goal)),
                g: tentative,
                pos: next,
                tie,
            });
        }
    }

    tracing::trace!(%start, %goal, "astar: goal unreachable");
    Path::new()
}

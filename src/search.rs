//! Pathfinding over any [`Walkable`] maze.
//!
//! Every search is a pure function of its inputs and expands neighbors in
//! [`Direction::SEARCH_ORDER`], so results are reproducible for a fixed grid:
//!
//! - [`bfs`]: shortest path, ties broken by expansion order
//! - [`astar`]: shortest path guided by Manhattan distance
//! - [`adversarial_move`]: one step chosen by depth-bounded minimax against
//!   a target that moves to stay away
//!
//! Paths exclude the start and include the goal. An empty path means the
//! goal is unreachable or already reached; callers treat it as "no move".

mod adversarial;
mod astar;
mod bfs;

pub use adversarial::{DEFAULT_DEPTH, adversarial_move};
pub use astar::astar;
pub use bfs::bfs;

use std::collections::HashMap;

use crate::grid::{Direction, Position, Walkable};

/// An ordered list of tiles from (exclusive) start to (inclusive) goal.
pub type Path = Vec<Position>;

/// Open neighbors of `pos` in canonical search order.
pub fn open_neighbors<W: Walkable + ?Sized>(
    pos: Position,
    grid: &W,
) -> impl Iterator<Item = Position> + '_ {
    Direction::SEARCH_ORDER
        .into_iter()
        .map(move |dir| pos.step(dir))
        .filter(move |&next| grid.is_open(next))
}

/// Walk predecessor links back from `goal`, stopping before `start`.
fn reconstruct(came_from: &HashMap<Position, Position>, start: Position, goal: Position) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_neighbor_order() {
        let grid = Grid::open(3, 3).unwrap();
        let center = Position::new(1, 1);
        let neighbors: Vec<Position> = open_neighbors(center, &grid).collect();
        assert_eq!(
            neighbors,
            vec![
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_neighbors_skip_walls_and_edges() {
        let grid: Grid = "\
.#.
...
"
        .parse()
        .unwrap();
        let neighbors: Vec<Position> = open_neighbors(Position::new(0, 0), &grid).collect();
        assert_eq!(neighbors, vec![Position::new(0, 1)]);
    }
}

#![no_main]

use arbitrary::Arbitrary;
use ghostgate::{Cell, Grid, Position, Walkable, adversarial_move, astar, bfs};
use libfuzzer_sys::fuzz_target;

/// Structured input for search fuzzing.
#[derive(Arbitrary, Debug)]
struct SearchInput {
    /// Grid width (clamped to 1..=16).
    width: u8,
    /// Grid height (clamped to 1..=16).
    height: u8,
    /// Wall bits, row-major, cycled over the grid.
    walls: Vec<bool>,
    /// Start coordinates (may be out of bounds).
    start: (i8, i8),
    /// Goal coordinates (may be out of bounds).
    goal: (i8, i8),
    /// Minimax depth (clamped to 0..=3).
    depth: u8,
}

fuzz_target!(|input: SearchInput| {
    let width = i32::from(input.width % 16) + 1;
    let height = i32::from(input.height % 16) + 1;
    let rows: Vec<Vec<Cell>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let i = usize::try_from(y * width + x).unwrap_or(0);
                    let wall = !input.walls.is_empty() && input.walls[i % input.walls.len()];
                    if wall { Cell::Wall } else { Cell::Open }
                })
                .collect()
        })
        .collect();
    let Ok(grid) = Grid::from_rows(rows) else {
        return;
    };

    let start = Position::new(i32::from(input.start.0), i32::from(input.start.1));
    let goal = Position::new(i32::from(input.goal.0), i32::from(input.goal.1));

    let b = bfs(start, goal, &grid);
    let a = astar(start, goal, &grid);
    assert_eq!(a.len(), b.len(), "bfs and astar disagree");
    for path in [&a, &b] {
        let mut prev = start;
        for &tile in path.iter() {
            assert!(prev.is_adjacent(tile));
            assert!(grid.is_open(tile));
            prev = tile;
        }
    }

    let next = adversarial_move(start, goal, &grid, u32::from(input.depth % 4));
    assert!(next == start || (start.is_adjacent(next) && grid.is_open(next)));
});

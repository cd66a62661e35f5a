//! Arena layouts: a maze plus the barrier, cage and start markers.
//!
//! Layout text uses the grid symbols (`.` open, `#` wall, `=` cage wall)
//! plus markers that all stand on open tiles:
//!
//! | Marker | Meaning |
//! |---|---|
//! | `G` | barrier tile |
//! | `P`, `Q` | first and second player start |
//! | `1`-`4` | agent starts, in [`Role::ALL`] order |
//!
//! The cage interior is the bounding box of all `=` tiles shrunk by one
//! tile on every side.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::LayoutError;
use crate::game::agent::Role;
use crate::game::barrier::{Barrier, TileRect};
use crate::grid::{Cell, Grid, Position};

/// The arena used when no layout file is given.
pub const BUILTIN_LAYOUT: &str = "\
#####################
#P........#.........#
#.###.###.#.###.###.#
#...................#
#.###.#.#####.#.###.#
#.....#...#...#.....#
#####.###.#.###.#####
#...................#
#.#.#.#=======#.#.#.#
#.#...#=..4..=#...#.#
#.#.#.#=.123.=#.#.#.#
#.....#=.....=#.....#
#.###.#===G===#.###.#
#...................#
#.###.###.#.###.###.#
#...#.....#.....#...#
###.#.#.#####.#.#.###
#.....#...#...#.....#
#.#######.#.#######.#
#.........#........Q#
#####################
";

const MARKERS: [char; 7] = ['G', 'P', 'Q', '1', '2', '3', '4'];

/// A parsed arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    /// The maze, with every marker tile open.
    pub grid: Grid,
    /// Barrier tile.
    pub barrier: Position,
    /// Cage interior.
    pub cage: TileRect,
    /// Agent start tiles, in [`Role::ALL`] order.
    pub agent_starts: [Position; 4],
    /// Player start tiles.
    pub player_starts: [Position; 2],
}

impl Arena {
    /// The built-in 21x21 arena.
    ///
    /// # Errors
    ///
    /// Never fails in practice; parsing is shared with file layouts.
    pub fn builtin() -> Result<Self, LayoutError> {
        BUILTIN_LAYOUT.parse()
    }

    /// Agent roles paired with their start tiles.
    #[must_use]
    pub fn spawns(&self) -> [(Role, Position); 4] {
        std::array::from_fn(|i| (Role::ALL[i], self.agent_starts[i]))
    }

    /// An intact barrier for this arena.
    #[must_use]
    pub const fn new_barrier(&self, flicker_ticks: u32) -> Barrier {
        Barrier::new(self.barrier, self.cage, flicker_ticks)
    }

    /// The maze as an escaped agent may use it: the cage interior is closed.
    ///
    /// Trained paths are evolved on this grid so a replay never leads back
    /// into the cage.
    #[must_use]
    pub fn roaming_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        for y in self.cage.y..self.cage.y + self.cage.height {
            for x in self.cage.x..self.cage.x + self.cage.width {
                grid.set(Position::new(x, y), Cell::Cage);
            }
        }
        grid
    }

    /// The tile just outside the barrier, away from the cage.
    #[must_use]
    pub const fn exit_tile(&self) -> Position {
        let barrier = self.new_barrier(0);
        barrier.tile().step(barrier.exit_direction())
    }
}

fn cage_interior(cells: &[(Position, Cell)]) -> Result<TileRect, LayoutError> {
    let cage: Vec<Position> = cells
        .iter()
        .filter(|&&(_, c)| c == Cell::Cage)
        .map(|&(p, _)| p)
        .collect();
    let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
        cage.iter().map(|p| p.x).min(),
        cage.iter().map(|p| p.x).max(),
        cage.iter().map(|p| p.y).min(),
        cage.iter().map(|p| p.y).max(),
    ) else {
        return Err(LayoutError::MissingCage);
    };

    let width = max_x - min_x - 1;
    let height = max_y - min_y - 1;
    if width <= 0 || height <= 0 {
        return Err(LayoutError::MissingCage);
    }
    Ok(TileRect {
        x: min_x + 1,
        y: min_y + 1,
        width,
        height,
    })
}

impl FromStr for Arena {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut markers: HashMap<char, Position> = HashMap::new();
        let mut plain = String::with_capacity(s.len());

        for (row, line) in s.lines().map(str::trim_end).filter(|l| !l.is_empty()).enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if MARKERS.contains(&ch) {
                    let too_large = || LayoutError::TooLarge {
                        width: col + 1,
                        height: row + 1,
                    };
                    let pos = Position::new(
                        i32::try_from(col).map_err(|_| too_large())?,
                        i32::try_from(row).map_err(|_| too_large())?,
                    );
                    if let Some(&first) = markers.get(&ch) {
                        return Err(LayoutError::DuplicateMarker {
                            marker: ch,
                            first,
                            second: pos,
                        });
                    }
                    markers.insert(ch, pos);
                    plain.push('.');
                } else {
                    plain.push(ch);
                }
            }
            plain.push('\n');
        }

        let grid: Grid = plain.parse()?;
        let marker = |ch: char| markers.get(&ch).copied().ok_or(LayoutError::MissingMarker(ch));
        let cells: Vec<(Position, Cell)> = grid.iter().collect();

        Ok(Self {
            barrier: marker('G')?,
            cage: cage_interior(&cells)?,
            agent_starts: [marker('1')?, marker('2')?, marker('3')?, marker('4')?],
            player_starts: [marker('P')?, marker('Q')?],
            grid,
        })
    }
}

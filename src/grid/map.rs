//! Cell codes and the maze grid.

use std::collections::{HashSet, VecDeque};
use std::str::FromStr;

use crate::error::LayoutError;
use crate::grid::{Direction, Position};

/// Read-only walkability queries.
///
/// Searches only ever see a maze through this trait, so they cannot mutate
/// it and can run over restricted views as well as the full grid.
pub trait Walkable {
    /// True if `pos` is in bounds and can be entered.
    fn is_open(&self, pos: Position) -> bool;

    /// Width and height in tiles.
    fn dimensions(&self) -> (u32, u32);
}

/// Contents of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    /// Walkable floor.
    Open = 0,
    /// Maze wall.
    Wall = 1,
    /// Reinforced wall around the ghost cage.
    Cage = 2,
}

impl Cell {
    /// Decode a numeric cell code.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidCode`] for codes other than 0, 1 and 2.
    pub const fn from_code(code: u8) -> Result<Self, LayoutError> {
        match code {
            0 => Ok(Cell::Open),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Cage),
            other => Err(LayoutError::InvalidCode(other)),
        }
    }

    /// Numeric cell code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Layout character: `.` open, `#` wall, `=` cage wall.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Cage => '=',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' | '0' => Some(Cell::Open),
            '#' | '1' => Some(Cell::Wall),
            '=' | '2' => Some(Cell::Cage),
            _ => None,
        }
    }
}

/// The maze: a rectangle of cells stored in row-major order.
///
/// A grid is replaced wholesale between rounds, never edited while a search
/// is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell open.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn open(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let size = width as usize * height as usize;
        Some(Self {
            width,
            height,
            cells: vec![Cell::Open; size],
        })
    }

    /// Build a grid from rows of numeric cell codes.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, rows differ in width, or a
    /// code is not 0, 1 or 2.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, LayoutError> {
        let cells = rows
            .iter()
            .map(|row| row.iter().map(|&code| Cell::from_code(code)).collect())
            .collect::<Result<Vec<Vec<Cell>>, _>>()?;
        Self::from_rows(cells)
    }

    /// Build a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the rows are empty or ragged,
    /// or the grid is too large for `i32` coordinates.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LayoutError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|&(_, len)| len != width)
        {
            return Err(LayoutError::Ragged {
                row,
                expected: width,
                found,
            });
        }
        let too_large = || LayoutError::TooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;

        Ok(Self {
            width: w.unsigned_abs(),
            height: h.unsigned_abs(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Check if a position is within the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        u32::try_from(pos.x).is_ok_and(|x| x < self.width)
            && u32::try_from(pos.y).is_ok_and(|y| y < self.height)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y.unsigned_abs() as usize * self.width as usize + pos.x.unsigned_abs() as usize)
        } else {
            None
        }
    }

    /// The cell at `pos`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrite the cell at `pos`.
    ///
    /// Returns `false` if the position is out of bounds.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Iterate over all positions and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let pos = Position::new((idx % width) as i32, (idx / width) as i32);
            (pos, cell)
        })
    }

    /// Count open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Open).count()
    }

    /// The open tile closest to `from` in breadth-first order, walking
    /// through walls.
    ///
    /// Used to re-seat entities after the maze is regenerated underneath
    /// them. Returns `None` if `from` is out of bounds or the grid has no
    /// open cell.
    #[must_use]
    pub fn nearest_open(&self, from: Position) -> Option<Position> {
        if !self.in_bounds(from) {
            return None;
        }
        let mut visited = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(pos) = queue.pop_front() {
            if self.get(pos) == Some(Cell::Open) {
                return Some(pos);
            }
            for dir in Direction::SEARCH_ORDER {
                let next = pos.step(dir);
                if self.in_bounds(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Render as layout text, one line per row.
    #[must_use]
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            out.extend(row.iter().map(|c| c.symbol()));
            out.push('\n');
        }
        out
    }
}

impl Walkable for Grid {
    fn is_open(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Open)
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FromStr for Grid {
    type Err = LayoutError;

    /// Parse layout text: `.`/`0` open, `#`/`1` wall, `=`/`2` cage wall.
    ///
    /// Blank lines and trailing whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        Cell::from_symbol(ch).ok_or(LayoutError::UnknownCell { row, col, ch })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid() {
        let grid = Grid::open(5, 4).unwrap();
        assert_eq!(grid.dimensions(), (5, 4));
        assert!(grid.is_open(Position::new(0, 0)));
        assert!(grid.is_open(Position::new(4, 3)));
        assert_eq!(grid.open_count(), 20);
    }

    #[test]
    fn test_zero_size() {
        assert!(Grid::open(0, 3).is_none());
        assert!(Grid::open(3, 0).is_none());
    }

    #[test]
    fn test_is_open_rejects_walls_and_out_of_bounds() {
        let grid: Grid = "\
.#=
...
"
        .parse()
        .unwrap();
        assert!(grid.is_open(Position::new(0, 0)));
        assert!(!grid.is_open(Position::new(1, 0)));
        assert!(!grid.is_open(Position::new(2, 0)));
        assert!(!grid.is_open(Position::new(-1, 0)));
        assert!(!grid.is_open(Position::new(0, 2)));
        assert!(!grid.is_open(Position::new(3, 1)));
    }

    #[test]
    fn test_from_codes() {
        let grid = Grid::from_codes(&[vec![0, 1, 2], vec![0, 0, 0]]).unwrap();
        assert_eq!(grid.get(Position::new(1, 0)), Some(Cell::Wall));
        assert_eq!(grid.get(Position::new(2, 0)), Some(Cell::Cage));
        assert!(matches!(
            Grid::from_codes(&[vec![0, 3]]),
            Err(LayoutError::InvalidCode(3))
        ));
    }

    #[test]
    fn test_ragged_layout() {
        let err = "...\n..\n".parse::<Grid>().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_symbol() {
        let err = "..x\n".parse::<Grid>().unwrap_err();
        assert!(matches!(err, LayoutError::UnknownCell { col: 2, ch: 'x', .. }));
    }

    #[test]
    fn test_layout_roundtrip() {
        let text = "#.=\n..#\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_layout(), text);
    }

    #[test]
    fn test_nearest_open() {
        let grid: Grid = "\
#####
#...#
#####
"
        .parse()
        .unwrap();
        assert_eq!(grid.nearest_open(Position::new(2, 1)), Some(Position::new(2, 1)));
        assert_eq!(grid.nearest_open(Position::new(2, 0)), Some(Position::new(2, 1)));
        assert_eq!(grid.nearest_open(Position::new(0, 0)), Some(Position::new(1, 1)));
        assert_eq!(grid.nearest_open(Position::new(9, 9)), None);
    }

    #[test]
    fn test_set_and_iter() {
        let mut grid = Grid::open(3, 2).unwrap();
        assert!(grid.set(Position::new(1, 1), Cell::Wall));
        assert!(!grid.set(Position::new(5, 5), Cell::Wall));
        let walls: Vec<Position> = grid
            .iter()
            .filter(|&(_, c)| c == Cell::Wall)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(walls, vec![Position::new(1, 1)]);
    }
}

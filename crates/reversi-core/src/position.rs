//! Square-grid coordinates and the eight compass directions.
//!
//! Positions use signed `(row, col)` coordinates so that a position off the
//! board (including negative ones) can be represented and rejected by the
//! engine instead of wrapping around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A compass direction on the square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions in clockwise order starting from North
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Row and column step for one move in this direction.
    /// Rows grow downwards (South).
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction pointing the other way
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent position in `direction` (may be off the board)
    pub fn neighbor(&self, direction: Direction) -> Position {
        self.offset(direction, 1)
    }

    /// The position `steps` cells away in `direction`
    pub fn offset(&self, direction: Direction, steps: i32) -> Position {
        let (dr, dc) = direction.delta();
        Position::new(self.row + dr * steps, self.col + dc * steps)
    }

    /// Iterator over the positions strictly beyond `self` in `direction`.
    ///
    /// The ray is unbounded; callers stop it at the board edge.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Position> {
        (1..).map(move |steps| self.offset(direction, steps))
    }

    /// Whether this position lies in `[0, rows) x [0, cols)`
    pub fn within(&self, rows: usize, cols: usize) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as usize) < rows && (self.col as usize) < cols
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

//! The grid store: a rectangular array of optional cell owners.
//!
//! This module contains:
//! - `PlayerId` and the `Grid` snapshot type shared with callers
//! - `Board`, the authoritative cell array plus a per-player position cache
//! - Text rendering of the board
//!
//! The per-player `owned_by` index is only a lookup convenience. It is
//! appended to by `add_piece` and never reconciled when `set` overwrites a
//! cell, so anything that needs an exact count scans the cells instead.

use crate::player::PlayerColor;
use crate::position::Position;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Player identifier, numbered from 1
pub type PlayerId = u8;

/// Row-major snapshot of a board, `None` for empty cells
pub type Grid = Vec<Vec<Option<PlayerId>>>;

/// Rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cell owners
    cells: Vec<Option<PlayerId>>,
    /// Positions each player has been given through `add_piece`
    owned_by: HashMap<PlayerId, Vec<Position>>,
}

impl Board {
    /// Create an empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            owned_by: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies on the board
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.within(self.rows, self.cols)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.cols + pos.col as usize)
        } else {
            None
        }
    }

    /// Owner of the cell at `pos`, `None` if empty or off the board
    pub fn get(&self, pos: Position) -> Option<PlayerId> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Place a piece on an empty cell.
    ///
    /// Returns false without touching anything if the cell is occupied or
    /// off the board.
    pub fn add_piece(&mut self, player: PlayerId, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) if self.cells[idx].is_none() => {
                self.cells[idx] = Some(player);
                self.owned_by.entry(player).or_default().push(pos);
                true
            }
            _ => false,
        }
    }

    /// Overwrite a cell unconditionally. Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, player: Option<PlayerId>) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = player;
        }
    }

    /// Empty every cell and the position cache
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.owned_by.clear();
    }

    /// Number of cells owned by `player` (full scan)
    pub fn count_for(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|c| **c == Some(player)).count()
    }

    /// Whether no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Positions recorded for `player` by `add_piece`. Not authoritative.
    pub fn owned_by(&self, player: PlayerId) -> &[Position] {
        self.owned_by.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Position::new(row as i32, col as i32))
        })
    }

    /// Deep copy of the cells as nested rows
    pub fn to_grid(&self) -> Grid {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[_]>::to_vec).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.cols {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "{:>2} ", row)?;
            for col in 0..self.cols {
                let c = match self.get(Position::new(row as i32, col as i32)) {
                    Some(player) => PlayerColor::for_player(player).symbol(),
                    None => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 6);
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.occupied(), 0);
        assert!(!board.is_full());
        assert!(board.positions().all(|p| board.get(p).is_none()));
    }

    #[test]
    fn test_add_piece_only_on_empty_cell() {
        let mut board = Board::new(4, 4);
        let pos = Position::new(1, 2);

        assert!(board.add_piece(1, pos));
        assert!(!board.add_piece(2, pos));
        assert_eq!(board.get(pos), Some(1));
        assert_eq!(board.owned_by(1), &[pos]);
        assert!(board.owned_by(2).is_empty());
    }

    #[test]
    fn test_add_piece_off_board_fails() {
        let mut board = Board::new(4, 4);
        assert!(!board.add_piece(1, Position::new(4, 0)));
        assert!(!board.add_piece(1, Position::new(-1, 0)));
        assert_eq!(board.occupied(), 0);
        assert!(board.owned_by(1).is_empty());
    }

    #[test]
    fn test_set_overwrites_but_cache_is_stale() {
        let mut board = Board::new(4, 4);
        let pos = Position::new(0, 0);
        board.add_piece(1, pos);
        board.set(pos, Some(2));

        assert_eq!(board.get(pos), Some(2));
        assert_eq!(board.count_for(1), 0);
        assert_eq!(board.count_for(2), 1);
        // cache still remembers the original placement
        assert_eq!(board.owned_by(1), &[pos]);
    }

    #[test]
    fn test_clear_resets_cells_and_cache() {
        let mut board = Board::new(2, 2);
        board.add_piece(1, Position::new(0, 0));
        board.add_piece(2, Position::new(1, 1));
        board.clear();

        assert_eq!(board.occupied(), 0);
        assert!(board.owned_by(1).is_empty());
        assert!(board.owned_by(2).is_empty());
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(2, 2);
        for (i, pos) in board.positions().collect::<Vec<_>>().into_iter().enumerate() {
            assert!(!board.is_full());
            board.add_piece((i % 2 + 1) as PlayerId, pos);
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_to_grid_is_row_major_copy() {
        let mut board = Board::new(2, 3);
        board.add_piece(1, Position::new(0, 2));
        board.add_piece(2, Position::new(1, 0));

        let grid = board.to_grid();
        assert_eq!(grid, vec![vec![None, None, Some(1)], vec![Some(2), None, None]]);

        board.set(Position::new(0, 2), Some(2));
        assert_eq!(grid[0][2], Some(1));
    }

    #[test]
    fn test_display_marks_pieces() {
        let mut board = Board::new(2, 2);
        board.add_piece(1, Position::new(0, 0));
        let text = board.to_string();
        assert!(text.contains(PlayerColor::for_player(1).symbol()));
        assert!(text.contains('.'));
        assert_eq!(text.lines().count(), 3);
    }
}

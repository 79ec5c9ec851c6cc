//! Core game state machine.
//!
//! This module contains `GameState`, which owns the board and enforces the
//! rules: legality, piece flipping, turn advancement with skips, game end
//! detection, state loading and pure simulation.

use crate::board::{Board, Grid, PlayerId};
use crate::events::GameEvent;
use crate::player::PlayerColor;
use crate::position::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Side of a standard Othello board
pub const STANDARD_SIDE: usize = 8;

/// How the game opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Two players, four seeded centre pieces, outflank rule from move one
    Othello,
    /// Empty board; the first `players²` placements fill a centred block
    FreeStart,
}

/// Reasons a game cannot be created
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConstructionError {
    #[error("Board side must be at least 1")]
    EmptyBoard,

    #[error("At least 2 players are required, got {0}")]
    TooFewPlayers(u8),

    #[error("Board side {side} and player count {players} must both be even or both be odd")]
    ParityMismatch { side: usize, players: u8 },

    #[error("Othello is only for 2 players, got {0}")]
    OthelloPlayerCount(u8),
}

/// Errors that can occur when querying or changing the game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("Illegal move at {0}")]
    IllegalMove(Position),

    #[error("Turn {turn} is not a player number between 1 and {players}")]
    InvalidTurn { turn: PlayerId, players: u8 },

    #[error("Grid must be {expected}x{expected}")]
    InvalidSize { expected: usize },

    #[error("Cell {position} holds {value}, which is not a player number between 1 and {players}")]
    InvalidPlayer {
        position: Position,
        value: PlayerId,
        players: u8,
    },

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Grid and turn, the state `load_game` accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: PlayerId,
    pub grid: Grid,
}

/// The complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    side: usize,
    num_players: u8,
    variant: Variant,
    /// Player to move, meaningless once the game is done
    turn: PlayerId,
    /// Successful placements, gates the free-start opening phase
    moves_played: usize,
    board: Board,
}

impl GameState {
    /// Create a new game.
    ///
    /// The board side and player count must share parity, and the Othello
    /// variant requires exactly two players.
    pub fn new(side: usize, num_players: u8, variant: Variant) -> Result<Self, GameError> {
        if side == 0 {
            return Err(ConstructionError::EmptyBoard.into());
        }
        if num_players < 2 {
            return Err(ConstructionError::TooFewPlayers(num_players).into());
        }
        if side % 2 != num_players as usize % 2 {
            return Err(ConstructionError::ParityMismatch {
                side,
                players: num_players,
            }
            .into());
        }
        if variant == Variant::Othello && num_players != 2 {
            return Err(ConstructionError::OthelloPlayerCount(num_players).into());
        }

        Ok(Self::seeded(side, num_players, variant))
    }

    /// Standard 8x8 two-player Othello
    pub fn othello() -> Self {
        Self::seeded(STANDARD_SIDE, 2, Variant::Othello)
    }

    fn seeded(side: usize, num_players: u8, variant: Variant) -> Self {
        let mut board = Board::new(side, side);

        if variant == Variant::Othello {
            let h = (side / 2) as i32;
            board.add_piece(2, Position::new(h - 1, h - 1));
            board.add_piece(2, Position::new(h, h));
            board.add_piece(1, Position::new(h - 1, h));
            board.add_piece(1, Position::new(h, h - 1));
        }

        Self {
            side,
            num_players,
            variant,
            turn: 1,
            moves_played: 0,
            board,
        }
    }

    // ==================== Queries ====================

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the current board
    pub fn grid(&self) -> Grid {
        self.board.to_grid()
    }

    /// Player to move. Not meaningful once `done()` is true.
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Grid and turn as a serializable value
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            grid: self.grid(),
        }
    }

    fn check_bounds(&self, pos: Position) -> Result<(), GameError> {
        if self.board.in_bounds(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    /// Owner of the piece at `pos`
    pub fn piece_at(&self, pos: Position) -> Result<Option<PlayerId>, GameError> {
        self.check_bounds(pos)?;
        Ok(self.board.get(pos))
    }

    /// Whether placements are still confined to the centre block
    pub fn in_opening_phase(&self) -> bool {
        let n = self.num_players as usize;
        self.variant == Variant::FreeStart && self.moves_played < n * n
    }

    /// Whether `pos` is in the centred `num_players`-wide block
    fn in_opening_block(&self, pos: Position) -> bool {
        let edge = (self.side as i32 - self.num_players as i32).div_euclid(2);
        let far = self.side as i32 - edge;
        (edge..far).contains(&pos.row) && (edge..far).contains(&pos.col)
    }

    /// Whether the current player may place at `pos`
    pub fn legal_move(&self, pos: Position) -> Result<bool, GameError> {
        self.check_bounds(pos)?;
        Ok(self.is_legal_for(self.turn, pos))
    }

    /// Legality for an arbitrary player; `pos` must be on the board
    fn is_legal_for(&self, player: PlayerId, pos: Position) -> bool {
        if self.board.get(pos).is_some() {
            return false;
        }
        if self.in_opening_phase() {
            return self.in_opening_block(pos);
        }
        Direction::ALL
            .iter()
            .any(|dir| !self.outflanked(player, pos, *dir).is_empty())
    }

    /// The run of opposing pieces that a piece of `player` at `pos` would
    /// capture in `dir`. Empty unless the run ends on one of `player`'s pieces.
    fn outflanked(&self, player: PlayerId, pos: Position, dir: Direction) -> Vec<Position> {
        let mut run = Vec::new();
        for next in pos.ray(dir) {
            match self.board.get(next) {
                Some(owner) if owner == player => return run,
                Some(_) => run.push(next),
                // empty cell or off the board
                None => break,
            }
        }
        Vec::new()
    }

    /// Every position where `player` could place right now
    pub fn moves_for(&self, player: PlayerId) -> Vec<Position> {
        self.board
            .positions()
            .filter(|pos| self.is_legal_for(player, *pos))
            .collect()
    }

    fn has_move(&self, player: PlayerId) -> bool {
        self.board
            .positions()
            .any(|pos| self.is_legal_for(player, pos))
    }

    /// Positions where the current player may place
    pub fn available_moves(&self) -> Vec<Position> {
        self.moves_for(self.turn)
    }

    fn next_player(&self, player: PlayerId) -> PlayerId {
        player % self.num_players + 1
    }

    /// The first player, probing `from`, `from + 1`, ... and wrapping once,
    /// who has at least one legal move.
    pub fn first_player_with_move(&self, from: PlayerId) -> Option<PlayerId> {
        let mut candidate = from;
        for _ in 0..self.num_players {
            if self.has_move(candidate) {
                return Some(candidate);
            }
            candidate = self.next_player(candidate);
        }
        None
    }

    /// Whether no player has a legal move
    pub fn done(&self) -> bool {
        self.first_player_with_move(1).is_none()
    }

    /// Number of pieces `player` has on the board
    pub fn score(&self, player: PlayerId) -> usize {
        self.board.count_for(player)
    }

    /// Piece count for every player, in player order
    pub fn scores(&self) -> Vec<(PlayerId, usize)> {
        (1..=self.num_players)
            .map(|player| (player, self.score(player)))
            .collect()
    }

    fn leaders(&self) -> Vec<PlayerId> {
        let scores = self.scores();
        let best = scores.iter().map(|(_, count)| *count).max().unwrap_or(0);
        scores
            .into_iter()
            .filter(|(_, count)| *count == best)
            .map(|(player, _)| player)
            .collect()
    }

    /// Winners of a finished game; several entries mean a tie.
    /// Empty while the game is still going.
    pub fn outcome(&self) -> Vec<PlayerId> {
        if self.done() {
            self.leaders()
        } else {
            Vec::new()
        }
    }

    // ==================== Mutators ====================

    /// Place the current player's piece at `pos`, flip every outflanked run
    /// and pass the turn to the next player who can move.
    pub fn apply_move(&mut self, pos: Position) -> Result<Vec<GameEvent>, GameError> {
        self.check_bounds(pos)?;
        if !self.is_legal_for(self.turn, pos) {
            return Err(GameError::IllegalMove(pos));
        }

        let player = self.turn;
        let opening = self.in_opening_phase();
        let mut events = Vec::new();

        self.board.add_piece(player, pos);
        events.push(GameEvent::PiecePlaced {
            player,
            position: pos,
        });

        if !opening {
            let flipped: Vec<Position> = Direction::ALL
                .iter()
                .flat_map(|dir| self.outflanked(player, pos, *dir))
                .collect();
            for captured in &flipped {
                self.board.set(*captured, Some(player));
            }
            if !flipped.is_empty() {
                trace!(player, count = flipped.len(), "flipped pieces");
                events.push(GameEvent::PiecesFlipped {
                    player,
                    positions: flipped,
                });
            }
        }

        self.moves_played += 1;
        events.extend(self.advance_turn(self.next_player(player)));

        Ok(events)
    }

    /// Hand the turn to the first player from `from` onwards who can move.
    /// If nobody can, the turn is left alone and the game is over.
    fn advance_turn(&mut self, from: PlayerId) -> Vec<GameEvent> {
        let mut events = Vec::new();

        match self.first_player_with_move(from) {
            Some(next) => {
                let mut skipped = from;
                while skipped != next {
                    debug!(player = skipped, "no legal move, skipping turn");
                    events.push(GameEvent::TurnSkipped { player: skipped });
                    skipped = self.next_player(skipped);
                }
                self.turn = next;
                events.push(GameEvent::TurnChanged { next });
            }
            None => {
                let winners = self.leaders();
                debug!(?winners, "no player can move, game over");
                events.push(GameEvent::GameOver { winners });
            }
        }

        events
    }

    /// Replace the whole game state with `grid` and `turn`.
    ///
    /// Nothing changes if validation fails. On success the move counter is
    /// set to the number of pieces on the board and the turn moves on from
    /// `turn` past any player without a legal move.
    pub fn load_game(&mut self, turn: PlayerId, grid: &Grid) -> Result<(), GameError> {
        if turn < 1 || turn > self.num_players {
            return Err(GameError::InvalidTurn {
                turn,
                players: self.num_players,
            });
        }
        if grid.len() != self.side || grid.iter().any(|row| row.len() != self.side) {
            return Err(GameError::InvalidSize {
                expected: self.side,
            });
        }
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(value) = *cell {
                    if value < 1 || value > self.num_players {
                        return Err(GameError::InvalidPlayer {
                            position: Position::new(r as i32, c as i32),
                            value,
                            players: self.num_players,
                        });
                    }
                }
            }
        }

        self.board.clear();
        let mut placed = 0;
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(player) = *cell {
                    self.board.add_piece(player, Position::new(r as i32, c as i32));
                    placed += 1;
                }
            }
        }

        self.moves_played = placed;
        self.turn = turn;
        debug!(turn, pieces = placed, "loaded game state");
        self.advance_turn(turn);

        Ok(())
    }

    /// Load a previously exported snapshot
    pub fn load_snapshot(&mut self, snapshot: &GameSnapshot) -> Result<(), GameError> {
        self.load_game(snapshot.turn, &snapshot.grid)
    }

    /// Play `moves` on an independent copy of this game and return the copy.
    ///
    /// A player without a legal move is skipped between moves, so consecutive
    /// entries are not necessarily made by alternating players. `self` is
    /// never modified.
    pub fn simulate_moves(&self, moves: &[Position]) -> Result<GameState, GameError> {
        let mut simulation = GameState::new(self.side, self.num_players, self.variant)?;
        simulation.load_game(self.turn, &self.grid())?;

        for &mv in moves {
            if !simulation.legal_move(mv)? {
                return Err(GameError::IllegalMove(mv));
            }
            simulation.apply_move(mv)?;
        }

        Ok(simulation)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::othello()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.done() {
            writeln!(f, "Game over")?;
        } else {
            let color = PlayerColor::for_player(self.turn);
            writeln!(
                f,
                "Turn: Player {} ({} {})",
                self.turn,
                color.name(),
                color.symbol()
            )?;
        }
        write!(f, "{}", self.board)
    }
}

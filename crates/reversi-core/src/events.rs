//! Events that result from applying a move.
//!
//! `GameState::apply_move` returns these in the order they happened so that
//! renderers and logs can describe a move without diffing grids.

use crate::board::PlayerId;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Something that happened while applying a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was placed on an empty cell
    PiecePlaced { player: PlayerId, position: Position },

    /// Outflanked pieces changed owner
    PiecesFlipped {
        player: PlayerId,
        positions: Vec<Position>,
    },

    /// A player had no legal move and was passed over
    TurnSkipped { player: PlayerId },

    /// The turn moved to another player
    TurnChanged { next: PlayerId },

    /// Nobody can move any more
    GameOver { winners: Vec<PlayerId> },
}

impl GameEvent {
    /// Number of pieces flipped, zero for every other event
    pub fn flipped_count(&self) -> usize {
        match self {
            GameEvent::PiecesFlipped { positions, .. } => positions.len(),
            _ => 0,
        }
    }
}

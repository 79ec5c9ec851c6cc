//! Per-player presentation data.
//!
//! The engine only knows players by their 1-based [`PlayerId`]. Renderers use
//! [`PlayerColor`] to give each of up to nine players a stable colour, symbol
//! and name.

use crate::board::PlayerId;
use serde::{Deserialize, Serialize};

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Cyan,
    White,
    Tan,
    Yellow,
    Orange,
    Magenta,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 9] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Cyan,
        PlayerColor::White,
        PlayerColor::Tan,
        PlayerColor::Yellow,
        PlayerColor::Orange,
        PlayerColor::Magenta,
    ];

    /// Get color for a player. Ids past nine wrap around.
    pub fn for_player(id: PlayerId) -> Self {
        Self::ALL[(id.saturating_sub(1) as usize) % Self::ALL.len()]
    }

    /// Single-character piece symbol for text boards
    pub fn symbol(&self) -> char {
        match self {
            PlayerColor::Red => '●',
            PlayerColor::Blue => '■',
            PlayerColor::Green => '▲',
            PlayerColor::Cyan => '○',
            PlayerColor::White => '□',
            PlayerColor::Tan => '◆',
            PlayerColor::Yellow => '★',
            PlayerColor::Orange => '▼',
            PlayerColor::Magenta => '◊',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Cyan => "Cyan",
            PlayerColor::White => "White",
            PlayerColor::Tan => "Tan",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Orange => "Orange",
            PlayerColor::Magenta => "Magenta",
        }
    }
}

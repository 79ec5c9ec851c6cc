//! Serializable results for single games and bot series.

use reversi_core::{GameEvent, GameSnapshot, GameState, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final state of one game
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub seats: Vec<String>,
    pub winners: Vec<PlayerId>,
    pub scores: Vec<(PlayerId, usize)>,
    pub moves_played: usize,
    pub snapshot: GameSnapshot,
    pub events: Vec<GameEvent>,
}

impl GameSummary {
    pub fn new(game: &GameState, seats: Vec<String>, events: Vec<GameEvent>) -> Self {
        Self {
            seats,
            winners: game.outcome(),
            scores: game.scores(),
            moves_played: game.moves_played(),
            snapshot: game.snapshot(),
            events,
        }
    }
}

/// Tally of a bot series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub side: usize,
    pub seats: Vec<String>,
    pub games: usize,
    /// Outright wins, indexed by player - 1
    pub wins: Vec<usize>,
    pub ties: usize,
}

impl SeriesReport {
    pub fn new(side: usize, seats: Vec<String>) -> Self {
        let wins = vec![0; seats.len()];
        Self {
            side,
            seats,
            games: 0,
            wins,
            ties: 0,
        }
    }

    /// Count one finished game
    pub fn record(&mut self, winners: &[PlayerId]) {
        self.games += 1;
        match winners {
            [winner] => {
                if let Some(count) = self.wins.get_mut(usize::from(winner.saturating_sub(1))) {
                    *count += 1;
                }
            }
            [] => {}
            _ => self.ties += 1,
        }
    }

    pub fn win_rate(&self, player: PlayerId) -> f64 {
        let wins = self
            .wins
            .get(usize::from(player.saturating_sub(1)))
            .copied()
            .unwrap_or(0);
        percent(wins, self.games)
    }

    pub fn tie_rate(&self) -> f64 {
        percent(self.ties, self.games)
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl fmt::Display for SeriesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} games on a {}x{} board", self.games, self.side, self.side)?;
        for (i, seat) in self.seats.iter().enumerate() {
            let player = (i + 1) as PlayerId;
            writeln!(
                f,
                "Player {} ({}) wins: {:.2}%",
                player,
                seat,
                self.win_rate(player)
            )?;
        }
        writeln!(f, "Ties: {:.2}%", self.tie_rate())
    }
}

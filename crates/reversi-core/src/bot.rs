//! AI bot players.
//!
//! This module provides three strategies of increasing strength:
//! - Random: uniform choice among the legal moves
//! - Greedy: the move that leaves the bot with the most pieces
//! - TwoPly: the move that maximises the bot's average piece count after
//!   every possible reply, taking an immediate win whenever one exists

use crate::board::PlayerId;
use crate::events::GameEvent;
use crate::game::{GameError, GameState};
use crate::position::Position;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bot strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotKind {
    Random,
    Greedy,
    TwoPly,
}

impl BotKind {
    pub const ALL: [BotKind; 3] = [BotKind::Random, BotKind::Greedy, BotKind::TwoPly];

    pub fn name(&self) -> &'static str {
        match self {
            BotKind::Random => "random",
            BotKind::Greedy => "greedy",
            BotKind::TwoPly => "two-ply",
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown bot kind '{0}' (expected random, greedy or two-ply)")]
pub struct UnknownBotKind(pub String);

impl FromStr for BotKind {
    type Err = UnknownBotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(BotKind::Random),
            "greedy" | "smart" => Ok(BotKind::Greedy),
            "two-ply" | "twoply" | "very-smart" => Ok(BotKind::TwoPly),
            _ => Err(UnknownBotKind(s.to_string())),
        }
    }
}

/// A bot that picks moves for whichever player is to move
#[derive(Debug, Clone)]
pub struct Bot {
    pub kind: BotKind,
    rng: StdRng,
}

impl Bot {
    pub fn new(kind: BotKind) -> Self {
        Self {
            kind,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(kind: BotKind, seed: u64) -> Self {
        Self {
            kind,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for the player to move, `None` if there is none
    pub fn choose_move(&mut self, game: &GameState) -> Option<Position> {
        let moves = game.available_moves();
        if moves.is_empty() {
            return None;
        }

        match self.kind {
            BotKind::Random => moves.choose(&mut self.rng).copied(),
            BotKind::Greedy => Self::choose_greedy(game, &moves),
            BotKind::TwoPly => Self::choose_two_ply(game, &moves),
        }
    }

    /// Choose a move and apply it.
    ///
    /// Returns `Ok(None)` when the player to move has nothing to play.
    pub fn play(&mut self, game: &mut GameState) -> Result<Option<Vec<GameEvent>>, GameError> {
        match self.choose_move(game) {
            Some(mv) => game.apply_move(mv).map(Some),
            None => Ok(None),
        }
    }

    /// Greedy: most pieces immediately after the move
    fn choose_greedy(game: &GameState, moves: &[Position]) -> Option<Position> {
        let player = game.turn();
        let mut best: Option<(Position, usize)> = None;

        for &mv in moves {
            let Ok(sim) = game.simulate_moves(&[mv]) else {
                continue;
            };
            let pieces = sim.score(player);
            if best.map_or(true, |(_, top)| pieces > top) {
                best = Some((mv, pieces));
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Two-ply: best average piece count over every reply
    fn choose_two_ply(game: &GameState, moves: &[Position]) -> Option<Position> {
        let player = game.turn();
        let mut best: Option<(Position, f64)> = None;

        for &mv in moves {
            let Ok(after) = game.simulate_moves(&[mv]) else {
                continue;
            };

            let value = if after.done() {
                if after.outcome().contains(&player) {
                    return Some(mv);
                }
                after.score(player) as f64
            } else {
                Self::average_after_replies(&after, player)
            };

            if best.map_or(true, |(_, top)| value > top) {
                best = Some((mv, value));
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Mean piece count of `player` over every reply available in `game`
    fn average_after_replies(game: &GameState, player: PlayerId) -> f64 {
        let replies = game.available_moves();
        let counts: Vec<usize> = replies
            .iter()
            .filter_map(|reply| game.simulate_moves(&[*reply]).ok())
            .map(|sim| sim.score(player))
            .collect();

        if counts.is_empty() {
            return game.score(player) as f64;
        }
        counts.iter().sum::<usize>() as f64 / counts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;
    use crate::game::Variant;

    fn grid_from(rows: &[&str]) -> Grid {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| c.to_digit(10).map(|d| d as PlayerId))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_bot_kind_parsing() {
        assert_eq!("random".parse::<BotKind>(), Ok(BotKind::Random));
        assert_eq!("smart".parse::<BotKind>(), Ok(BotKind::Greedy));
        assert_eq!("Two-Ply".parse::<BotKind>(), Ok(BotKind::TwoPly));
        assert_eq!("very-smart".parse::<BotKind>(), Ok(BotKind::TwoPly));
        assert!("minimax".parse::<BotKind>().is_err());
        for kind in BotKind::ALL {
            assert_eq!(kind.name().parse::<BotKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_random_bot_picks_legal_move() {
        let game = GameState::othello();
        let mut bot = Bot::with_seed(BotKind::Random, 7);
        for _ in 0..20 {
            let mv = bot.choose_move(&game).unwrap();
            assert!(game.legal_move(mv).unwrap());
        }
    }

    #[test]
    fn test_seeded_bots_are_reproducible() {
        let game = GameState::othello();
        let mut a = Bot::with_seed(BotKind::Random, 42);
        let mut b = Bot::with_seed(BotKind::Random, 42);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&game), b.choose_move(&game));
        }
    }

    #[test]
    fn test_greedy_takes_biggest_capture() {
        let mut game = GameState::new(6, 2, Variant::Othello).unwrap();
        game.load_game(
            1,
            &grid_from(&[
                "1222..", //
                "......", //
                "12....", //
                "......", //
                "......", //
                "......",
            ]),
        )
        .unwrap();

        let mut bot = Bot::with_seed(BotKind::Greedy, 0);
        assert_eq!(bot.choose_move(&game), Some(Position::new(0, 4)));
    }

    #[test]
    fn test_two_ply_takes_immediate_win() {
        let mut game = GameState::new(4, 2, Variant::Othello).unwrap();
        game.load_game(
            1,
            &grid_from(&[
                "12..", //
                "....", //
                "....", //
                "....",
            ]),
        )
        .unwrap();

        let mut bot = Bot::with_seed(BotKind::TwoPly, 0);
        assert_eq!(bot.choose_move(&game), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_play_commits_move() {
        let mut game = GameState::othello();
        let mut bot = Bot::with_seed(BotKind::Greedy, 1);

        let events = bot.play(&mut game).unwrap().unwrap();
        assert!(matches!(events[0], GameEvent::PiecePlaced { player: 1, .. }));
        assert_eq!(game.turn(), 2);
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut game = GameState::new(4, 2, Variant::Othello).unwrap();
        game.load_game(
            1,
            &grid_from(&[
                "1..2", //
                "....", //
                "....", //
                "....",
            ]),
        )
        .unwrap();

        for kind in BotKind::ALL {
            let mut bot = Bot::with_seed(kind, 3);
            assert_eq!(bot.choose_move(&game), None);
            assert_eq!(bot.play(&mut game), Ok(None));
        }
    }

    #[test]
    fn test_bots_finish_a_game() {
        let mut game = GameState::new(6, 2, Variant::Othello).unwrap();
        let mut bots = [
            Bot::with_seed(BotKind::TwoPly, 11),
            Bot::with_seed(BotKind::Greedy, 12),
        ];

        let mut plies = 0;
        while !game.done() {
            let seat = (game.turn() - 1) as usize;
            bots[seat].play(&mut game).unwrap();
            plies += 1;
            assert!(plies <= 36, "game should end before the board overflows");
        }

        assert!(!game.outcome().is_empty());
    }
}

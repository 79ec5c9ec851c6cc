//! Command-line arguments and game configuration.

use clap::{Args, Parser, Subcommand};
use reversi_core::{BotKind, GameError, GameState, UnknownBotKind, Variant};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub const SIDE_RANGE: RangeInclusive<usize> = 2..=20;
pub const PLAYER_RANGE: RangeInclusive<u8> = 2..=9;

#[derive(Parser, Debug)]
#[command(name = "reversi", version, about = "Multi-player Reversi and Othello")]
pub struct Cli {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Print machine readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BoardArgs {
    /// Squares per side of the board
    #[arg(short, long, global = true, default_value_t = 8)]
    pub side: usize,

    /// Number of players
    #[arg(short = 'n', long, global = true, default_value_t = 2)]
    pub players: u8,

    /// Start from an empty board, filling the centre block first
    #[arg(long, global = true)]
    pub free_start: bool,
}

impl Default for BoardArgs {
    fn default() -> Self {
        Self {
            side: 8,
            players: 2,
            free_start: false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a single game; humans enter moves on stdin
    Play {
        /// Who sits at each seat: human, random, greedy or two-ply
        #[arg(long = "seat", value_name = "KIND")]
        seats: Vec<SeatKind>,
    },
    /// Run bot-only games and report win rates
    Series {
        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: usize,

        /// Bot kind for each seat
        #[arg(long = "seat", value_name = "KIND")]
        seats: Vec<SeatKind>,

        /// Seed for reproducible series
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Who controls a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    Human,
    Bot(BotKind),
}

impl FromStr for SeatKind {
    type Err = UnknownBotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            return Ok(SeatKind::Human);
        }
        s.parse().map(SeatKind::Bot)
    }
}

impl fmt::Display for SeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatKind::Human => f.write_str("human"),
            SeatKind::Bot(kind) => write!(f, "{}", kind),
        }
    }
}

/// Errors detected before any game starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Board side must be between 2 and 20, got {0}")]
    SideOutOfRange(usize),
    #[error("Player count must be between 2 and 9, got {0}")]
    PlayersOutOfRange(u8),
    #[error("A {side}x{side} board cannot seat {players} players: side and player count must share parity")]
    ParityMismatch { side: usize, players: u8 },
    #[error("Othello is played by exactly 2 players, use --free-start for {0}")]
    OthelloPlayerCount(u8),
    #[error("Expected {expected} seats, got {got}")]
    SeatCount { expected: usize, got: usize },
    #[error("Seat {0} is human; a series only runs bots")]
    HumanInSeries(usize),
    #[error("A series needs at least one game")]
    NoGames,
}

/// Validated board setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub side: usize,
    pub players: u8,
    pub variant: Variant,
}

impl GameConfig {
    pub fn from_args(args: &BoardArgs) -> Result<Self, ConfigError> {
        if !SIDE_RANGE.contains(&args.side) {
            return Err(ConfigError::SideOutOfRange(args.side));
        }
        if !PLAYER_RANGE.contains(&args.players) {
            return Err(ConfigError::PlayersOutOfRange(args.players));
        }
        if args.side % 2 != args.players as usize % 2 {
            return Err(ConfigError::ParityMismatch {
                side: args.side,
                players: args.players,
            });
        }

        let variant = if args.free_start {
            Variant::FreeStart
        } else {
            Variant::Othello
        };
        if variant == Variant::Othello && args.players != 2 {
            return Err(ConfigError::OthelloPlayerCount(args.players));
        }

        Ok(Self {
            side: args.side,
            players: args.players,
            variant,
        })
    }

    pub fn new_game(&self) -> Result<GameState, GameError> {
        GameState::new(self.side, self.players, self.variant)
    }

    /// Fill in one seat per player; an empty list means every seat is `default`
    pub fn seats(&self, seats: &[SeatKind], default: SeatKind) -> Result<Vec<SeatKind>, ConfigError> {
        let expected = self.players as usize;
        if seats.is_empty() {
            return Ok(vec![default; expected]);
        }
        if seats.len() != expected {
            return Err(ConfigError::SeatCount {
                expected,
                got: seats.len(),
            });
        }
        Ok(seats.to_vec())
    }

    /// Seats for a series, which must all be bots
    pub fn bot_seats(&self, seats: &[SeatKind]) -> Result<Vec<BotKind>, ConfigError> {
        self.seats(seats, SeatKind::Bot(BotKind::Random))?
            .into_iter()
            .enumerate()
            .map(|(i, seat)| match seat {
                SeatKind::Bot(kind) => Ok(kind),
                SeatKind::Human => Err(ConfigError::HumanInSeries(i + 1)),
            })
            .collect()
    }
}

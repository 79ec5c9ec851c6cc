//! Reversi - a rules engine for multi-player Reversi and Othello
//!
//! This crate provides the core game logic, including:
//! - Square-grid coordinates and compass directions
//! - The grid store holding each cell's owner
//! - Game state machine with legality, flipping, turn skipping and
//!   non-mutating simulation
//! - Bot players built on top of the simulation API
//!
//! # Modules
//!
//! - [`position`]: Coordinates and the eight scan directions
//! - [`board`]: Grid store and text rendering
//! - [`game`]: Game state machine and errors
//! - [`events`]: What a move did
//! - [`player`]: Per-player colours and symbols for renderers
//! - [`bot`]: Random, greedy and two-ply bots

pub mod board;
pub mod bot;
pub mod events;
pub mod game;
pub mod player;
pub mod position;

// Re-export commonly used types
pub use board::{Board, Grid, PlayerId};
pub use bot::{Bot, BotKind, UnknownBotKind};
pub use events::GameEvent;
pub use game::{ConstructionError, GameError, GameSnapshot, GameState, Variant, STANDARD_SIDE};
pub use player::PlayerColor;
pub use position::{Direction, Position};

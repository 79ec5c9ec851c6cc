//! A table of seats playing one game to the end.

use crate::config::SeatKind;
use anyhow::{bail, Context};
use reversi_core::{Bot, GameEvent, GameState, PlayerColor, PlayerId, Position};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Who moves for a player
#[derive(Debug, Clone)]
pub enum Seat {
    Human,
    Bot(Bot),
}

impl Seat {
    pub fn from_kind(kind: SeatKind, seed: Option<u64>) -> Self {
        match kind {
            SeatKind::Human => Seat::Human,
            SeatKind::Bot(kind) => Seat::Bot(match seed {
                Some(seed) => Bot::with_seed(kind, seed),
                None => Bot::new(kind),
            }),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Seat::Human => "human".to_string(),
            Seat::Bot(bot) => bot.kind.to_string(),
        }
    }
}

pub struct Table {
    game: GameState,
    seats: Vec<Seat>,
    history: Vec<GameEvent>,
}

impl Table {
    pub fn new(game: GameState, seats: Vec<Seat>) -> Self {
        Self {
            game,
            seats,
            history: Vec::new(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Every event produced so far, in order
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// Play until nobody can move and return the winners.
    ///
    /// Humans are prompted on `out` and answer on `input`. With `narrate` set,
    /// bot moves, skips and the final board are written to `out` as well.
    pub fn play<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
        narrate: bool,
    ) -> anyhow::Result<Vec<PlayerId>> {
        info!(
            side = self.game.side(),
            players = self.game.num_players(),
            variant = ?self.game.variant(),
            "Game started"
        );

        while !self.game.done() {
            let player = self.game.turn();
            let seat = self
                .seats
                .get_mut(usize::from(player - 1))
                .with_context(|| format!("no seat for player {}", player))?;

            let mv = match seat {
                Seat::Human => ask_move(&self.game, input, out)?,
                Seat::Bot(bot) => match bot.choose_move(&self.game) {
                    Some(mv) => mv,
                    None => break,
                },
            };

            let events = self.game.apply_move(mv)?;
            debug!(player, %mv, events = events.len(), "Move applied");
            if narrate {
                for event in &events {
                    describe(event, out)?;
                }
            }
            self.history.extend(events);
        }

        let winners = self.game.outcome();
        info!(?winners, moves = self.game.moves_played(), "Game finished");

        if narrate {
            writeln!(out, "{}", self.game)?;
            for (player, count) in self.game.scores() {
                writeln!(out, "Player {} ({}): {}", player, self.seats_label(player), count)?;
            }
            writeln!(out, "{}", winner_line(&winners))?;
        }

        Ok(winners)
    }

    fn seats_label(&self, player: PlayerId) -> String {
        self.seats
            .get(usize::from(player.saturating_sub(1)))
            .map(Seat::label)
            .unwrap_or_default()
    }
}

/// Show the board and the numbered move list, then read until a valid choice
fn ask_move<R: BufRead, W: Write>(
    game: &GameState,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Position> {
    let moves = game.available_moves();
    writeln!(out, "{}", game)?;
    for (i, mv) in moves.iter().enumerate() {
        writeln!(out, "  {:>2}: {}", i + 1, mv)?;
    }

    loop {
        write!(out, "Player {} move> ", game.turn())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }
        match parse_choice(line.trim(), &moves) {
            Some(mv) => return Ok(mv),
            None => writeln!(
                out,
                "Enter a move number from 1 to {} or the row,col of a listed move",
                moves.len()
            )?,
        }
    }
}

/// Parse a 1-based index into `moves` or a `row,col` pair that is in `moves`
pub fn parse_choice(text: &str, moves: &[Position]) -> Option<Position> {
    if let Ok(index) = text.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| moves.get(i)).copied();
    }

    let (row, col) = text.split_once(|c: char| c == ',' || c.is_whitespace())?;
    let pos = Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?);
    moves.contains(&pos).then_some(pos)
}

fn describe<W: Write>(event: &GameEvent, out: &mut W) -> std::io::Result<()> {
    match event {
        GameEvent::PiecePlaced { player, position } => {
            let color = PlayerColor::for_player(*player);
            writeln!(out, "Player {} {} plays {}", player, color.symbol(), position)
        }
        GameEvent::PiecesFlipped { positions, .. } => {
            writeln!(out, "  flips {} piece(s)", positions.len())
        }
        GameEvent::TurnSkipped { player } => {
            writeln!(out, "Player {} has no move and passes", player)
        }
        GameEvent::TurnChanged { .. } => Ok(()),
        GameEvent::GameOver { .. } => writeln!(out, "Game over"),
    }
}

pub fn winner_line(winners: &[PlayerId]) -> String {
    match winners {
        [] => "No winner".to_string(),
        [winner] => format!("Player {} wins", winner),
        _ => {
            let names: Vec<String> = winners.iter().map(|p| p.to_string()).collect();
            format!("Tie between players {}", names.join(", "))
        }
    }
}

//! Bot-only series: many games with the same seating, tallied into a report.

use crate::config::{ConfigError, GameConfig, SeatKind};
use crate::report::SeriesReport;
use crate::table::{Seat, Table};
use reversi_core::BotKind;
use std::io;
use tracing::{debug, info};

/// Play `games` games between `bots` and tally the winners.
///
/// With a `seed`, each bot gets a distinct seed derived from the game and
/// seat number so a series is reproducible.
pub fn run_series(
    config: &GameConfig,
    bots: &[BotKind],
    games: usize,
    seed: Option<u64>,
) -> anyhow::Result<SeriesReport> {
    if games == 0 {
        return Err(ConfigError::NoGames.into());
    }

    let labels = bots.iter().map(|kind| kind.to_string()).collect();
    let mut report = SeriesReport::new(config.side, labels);
    info!(games, side = config.side, ?bots, "Series started");

    for game_no in 0..games {
        let seats = bots
            .iter()
            .enumerate()
            .map(|(seat, kind)| {
                let seed = seed.map(|s| {
                    s.wrapping_add((game_no * bots.len() + seat) as u64)
                });
                Seat::from_kind(SeatKind::Bot(*kind), seed)
            })
            .collect();

        let mut table = Table::new(config.new_game()?, seats);
        let winners = table.play(&mut io::empty(), &mut io::sink(), false)?;
        debug!(game = game_no + 1, ?winners, "Series game finished");
        report.record(&winners);
    }

    info!(games = report.games, ties = report.ties, "Series finished");
    Ok(report)
}

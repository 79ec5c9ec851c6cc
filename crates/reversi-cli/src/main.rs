//! Reversi command-line player.

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod report;
mod series;
mod table;

use config::{Cli, Command, GameConfig, SeatKind};
use report::GameSummary;
use table::{Seat, Table};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = GameConfig::from_args(&cli.board)?;

    match cli.command {
        Command::Play { seats } => {
            let seats: Vec<Seat> = config
                .seats(&seats, SeatKind::Human)?
                .into_iter()
                .map(|kind| Seat::from_kind(kind, None))
                .collect();
            info!(seats = ?seats.iter().map(Seat::label).collect::<Vec<_>>(), "Starting game");

            let mut table = Table::new(config.new_game()?, seats);
            let stdin = io::stdin();
            run_play(
                &mut table,
                &mut stdin.lock(),
                &mut io::stdout(),
                &mut io::stderr(),
                cli.json,
            )?;
        }

        Command::Series { games, seats, seed } => {
            let bots = config.bot_seats(&seats)?;
            let report = series::run_series(&config, &bots, games, seed)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
    }

    Ok(())
}

/// Play one game at `table`.
///
/// With `json`, human prompts go to `err` and `out` receives only the summary.
fn run_play<R: BufRead, W: Write, E: Write>(
    table: &mut Table,
    input: &mut R,
    out: &mut W,
    err: &mut E,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        table.play(input, out, true)?;
        return Ok(());
    }

    table.play(input, err, false)?;
    let labels = table.seats().iter().map(Seat::label).collect();
    let summary = GameSummary::new(table.game(), labels, table.history().to_vec());
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}

//! Duel - play chess against the minimax opponent in a terminal.
//!
//! Moves are typed in coordinate form (`e2e4`). Settings are read from
//! `duel.toml` when present and can be overridden by flags.

mod config;
mod session;

use chess_engine::Board;
use clap::Parser;
use config::{DuelConfig, Overrides, Settings};
use session::{Outcome, Session};
use std::io;
use std::path::PathBuf;

/// Play chess against the computer.
#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Play chess against a minimax opponent")]
struct Args {
    /// Path to a TOML config file (defaults to ./duel.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth of the computer in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Play the black pieces
    #[arg(long)]
    black: bool,

    /// Show legal destinations after an illegal move
    #[arg(long)]
    hints: bool,

    /// Starting layout, e.g. "4k3/8/8/8/8/8/4P3/4K3 w -"
    #[arg(long)]
    layout: Option<String>,

    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            depth: self.depth,
            black: self.black,
            hints: self.hints,
            layout: self.layout.clone(),
            seed: self.seed,
            verbosity: self.verbose,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = DuelConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(config, args.overrides())?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_writer(io::stderr)
        .init();

    let board = match &settings.layout {
        Some(layout) => Board::parse(layout)?,
        None => Board::standard(),
    };
    tracing::info!(
        depth = settings.depth,
        human = %settings.human,
        "starting duel"
    );

    let (outcome, plies) = {
        let mut session = Session::new(board, settings, io::stdin().lock(), io::stdout().lock());
        let outcome = session.run()?;
        (outcome, session.game().history().len())
    };
    match outcome {
        Outcome::Finished { winner } => tracing::info!(%winner, plies, "game finished"),
        Outcome::Quit => println!("Bye."),
    }
    Ok(())
}

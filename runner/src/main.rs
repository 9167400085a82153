// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for an interactive game of War
// ═══════════════════════════════════════════════════════════════════════

mod render;
mod session;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use war_engine::setup::create_game;
use war_engine::SeededRng;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "war", about = "Structured War - conquer territories, complete your secret mission")]
struct Cli {
    /// Seed for a reproducible game (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,
    /// Keep previous turns on screen instead of clearing
    #[arg(long)]
    no_clear: bool,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print the final game state as JSON on exit
    #[arg(long)]
    dump_state: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting session");

    let game = match create_game(SeededRng::new(seed)) {
        Ok(game) => game,
        Err(e) => {
            error!(error = %e, "board setup failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let clear = !cli.no_clear && io::stdout().is_terminal();
    let mut session = Session::new(game, io::stdin().lock(), io::stdout().lock(), clear);

    if let Err(e) = session.run() {
        error!(error = %e, "console I/O failed");
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let (game, mut out) = session.finish();
    if cli.dump_state {
        let dumped = serde_json::to_string_pretty(&game.snapshot())
            .map_err(io::Error::from)
            .and_then(|json| writeln!(out, "{json}"));
        if let Err(e) = dumped {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Logs go to stderr so they never mix with the game on stdout.
fn init_logging(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

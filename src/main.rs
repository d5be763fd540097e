//! Coin Tic-Tac-Toe - Unified CLI
//!
//! Play in the terminal, inspect the coin balance, or flip the theme.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use coin_tictactoe::{
    Cli, Command, GameConfig, RewardLedger, SqliteStore, load_dark_mode, run_tui, save_dark_mode,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            config,
            db_path,
            delay_ms,
        } => {
            initialize_file_tracing()?;
            let config =
                GameConfig::load(config.as_deref())?.with_overrides(db_path, delay_ms, mode);
            run_tui(config).await
        }
        Command::Coins { reset, db_path } => {
            initialize_tracing();
            run_coins(db_path, reset)
        }
        Command::Theme { db_path } => {
            initialize_tracing();
            run_theme(db_path)
        }
    }
}

/// Prints the coin balance, resetting it first if asked.
#[instrument]
fn run_coins(db_path: String, reset: bool) -> Result<()> {
    let mut ledger = RewardLedger::load(SqliteStore::open(db_path)?);
    if reset {
        ledger.reset()?;
        info!("Coin balance reset");
    }
    println!("Coins: {}", ledger.balance());
    Ok(())
}

/// Flips the stored dark-mode preference and prints the new value.
#[instrument]
fn run_theme(db_path: String) -> Result<()> {
    let mut store = SqliteStore::open(db_path)?;
    let dark = !load_dark_mode(&store);
    save_dark_mode(&mut store, dark)?;
    println!("Theme: {}", if dark { "Dark Mode" } else { "Light Mode" });
    Ok(())
}

/// Logs to stderr for one-shot commands.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Logs to a file so the TUI is not overwritten.
fn initialize_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create("coin_tictactoe.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

//! Command-line interface for coin_tictactoe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::games::tictactoe::GameMode;

/// Coin Tic-Tac-Toe - play a friend or the computer and collect coins
#[derive(Parser, Debug)]
#[command(name = "coin_tictactoe")]
#[command(about = "Tic-tac-toe with a computer opponent and a coin balance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Game mode: two-player or vs-computer
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,

        /// Pause before the computer replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show the coin balance
    Coins {
        /// Reset the balance to 0
        #[arg(long)]
        reset: bool,

        /// Path to the database file
        #[arg(long, default_value = "coin_tictactoe.db")]
        db_path: String,
    },

    /// Toggle the dark-mode preference
    Theme {
        /// Path to the database file
        #[arg(long, default_value = "coin_tictactoe.db")]
        db_path: String,
    },
}

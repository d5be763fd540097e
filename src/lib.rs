//! Coin Tic-Tac-Toe library - a two-mode tic-tac-toe engine
//!
//! The crate holds the game core and a terminal front-end that consumes it.
//!
//! # Architecture
//!
//! - **Games**: board model, rule engine and the computer heuristic
//! - **Session**: the state of one game
//! - **Ledger**: coin balance earned by beating the computer, persisted
//! - **Store**: durable key/value storage (SQLite) shared with the front-end
//! - **Controller**: turns move requests into session changes and events
//! - **TUI**: terminal front-end subscribing to controller events
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use coin_tictactoe::{GameController, GameMode, MemoryStore, RewardLedger};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let ledger = RewardLedger::load(MemoryStore::new());
//! let mut controller = GameController::new(
//!     GameMode::VsComputer,
//!     ledger,
//!     StdRng::seed_from_u64(1),
//!     Duration::from_millis(500),
//! );
//!
//! let report = controller.request_move(4)?;
//! if let Some(reply) = report.pending_reply {
//!     controller.resolve_computer_move(reply)?;
//! }
//! assert_eq!(controller.session().history().len(), 2);
//! # Ok::<(), coin_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod controller;
mod games;
mod ledger;
mod session;
mod store;
mod tui;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Controller
pub use controller::{ControllerState, GameController, GameEvent, MoveReport, PendingReply};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, CELL_COUNT, Cell, Evaluation, GameMode, Mark, MoveError, Outcome, WIN_LINES, WinLine,
    advance_turn, check_winner, evaluate, is_draw, is_full, select_move,
};

// Crate-level exports - Coins
pub use ledger::{RewardLedger, WIN_REWARD};

// Crate-level exports - Session
pub use session::GameSession;

// Crate-level exports - Persistence
pub use store::{COINS_KEY, KeyValueStore, KvEntry, MemoryStore, NewKvEntry, SqliteStore, StoreError, THEME_KEY};

// Crate-level exports - Terminal front-end
pub use tui::{
    Action, App, HOW_TO_PLAY, PlayerLabels, Theme, load_dark_mode, run_tui, save_dark_mode,
};

//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the controller and the computer heuristic share them.

pub mod draw;
pub mod evaluate;
pub mod win;

pub use draw::{is_draw, is_full};
pub use evaluate::{Evaluation, Outcome, advance_turn, evaluate};
pub use win::{WIN_LINES, WinLine, check_winner};

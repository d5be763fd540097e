//! Terminal-state evaluation and turn order.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::super::{Board, Mark};
use super::draw::is_full;
use super::win::{WinLine, check_winner};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// `mark` completed `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line, for highlighting.
        line: WinLine,
    },
    /// The board filled up with no winner.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<WinLine> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win { mark, .. } => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// No winner and at least one empty cell.
    InProgress,
    /// The game is over.
    Finished(Outcome),
}

impl Evaluation {
    /// Returns the outcome if the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Evaluation::InProgress => None,
            Evaluation::Finished(outcome) => Some(*outcome),
        }
    }

    /// Returns true if the game is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Evaluation::Finished(_))
    }
}

/// Evaluates the board: a win takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some((mark, line)) = check_winner(board) {
        return Evaluation::Finished(Outcome::Win { mark, line });
    }
    if is_full(board) {
        return Evaluation::Finished(Outcome::Draw);
    }
    Evaluation::InProgress
}

/// Returns the mark that moves after `mark`.
pub fn advance_turn(mark: Mark) -> Mark {
    mark.opponent()
}

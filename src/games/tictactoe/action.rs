//! Rejected move requests.
//!
//! Every variant is an invalid move: it is reported to the caller and
//! leaves the game untouched.

use super::Mark;

/// Error returned when a move request cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The index is outside the 0-8 range.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The request came from the wrong side; `_0` is the mark due to move.
    #[display("It's {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Mark),

    /// The computer reply belongs to a game that has since been reset.
    #[display("Computer reply is stale; the game was reset")]
    StaleReply,

    /// An internal invariant was violated.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

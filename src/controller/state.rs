//! Controller states.

use std::time::Duration;

use crate::games::tictactoe::Outcome;

/// Where the controller is in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Waiting for a human to pick a cell.
    AwaitingHumanMove,
    /// The computer owns the next move.
    AwaitingComputerMove,
    /// The game is over; only a reset is accepted.
    Terminal(Outcome),
}

/// Ticket for a computer reply that presentation should resolve after
/// `delay`.
///
/// The ticket is bound to the game it was issued for. Resolving it after a
/// reset is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    pub(crate) generation: u64,
    delay: Duration,
}

impl PendingReply {
    pub(crate) fn new(generation: u64, delay: Duration) -> Self {
        Self { generation, delay }
    }

    /// Returns the pacing delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Summary of an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Cell that was marked.
    pub index: usize,
    /// State after the move.
    pub state: ControllerState,
    /// Set when the computer moves next.
    pub pending_reply: Option<PendingReply>,
}

//! Events emitted by the controller for presentation subscribers.

use std::time::Duration;

use crate::games::tictactoe::{CELL_COUNT, Cell, GameMode, Mark, Outcome, WinLine};

/// Messages sent from the controller to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The board changed; `last_move` is `None` after a reset.
    BoardChanged {
        /// Every cell, row-major.
        cells: [Cell; CELL_COUNT],
        /// Index of the mark just placed.
        last_move: Option<usize>,
    },
    /// The given mark is now due to move.
    TurnChanged(Mark),
    /// The computer will reply; presentation should wait `delay` before
    /// resolving the reply.
    ComputerThinking {
        /// Pacing hint.
        delay: Duration,
    },
    /// The game was won or drawn.
    GameEnded {
        /// How the game ended.
        outcome: Outcome,
        /// Line to highlight, if the game was won.
        winning_line: Option<WinLine>,
    },
    /// The coin balance changed.
    CoinsChanged(u64),
    /// The mode changed and a new game started.
    ModeChanged(GameMode),
}

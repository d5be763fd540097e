//! Display names for the two marks.

use crate::games::tictactoe::{GameMode, Mark};

/// Names shown for X and O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLabels {
    x: String,
    o: String,
}

impl PlayerLabels {
    /// Default names for `mode`.
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::TwoPlayer => Self::new("Player X", "Player O"),
            GameMode::VsComputer => Self::new("You", "Computer"),
        }
    }

    /// Custom names.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Renames the player of `mark`.
    pub fn set_name(&mut self, mark: Mark, name: impl Into<String>) {
        match mark {
            Mark::X => self.x = name.into(),
            Mark::O => self.o = name.into(),
        }
    }

    /// Name shown for `mark`.
    pub fn name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

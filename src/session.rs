//! Game session state.
//!
//! A [`GameSession`] owns everything that changes during a game: the board,
//! the mark to move, the mode, the evaluation and the move history. It has
//! no knowledge of who drives each mark beyond the mode; the controller
//! decides when the computer moves.

use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{
    Board, Evaluation, GameMode, Mark, MoveError, advance_turn, evaluate,
};

/// One game of tic-tac-toe.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Mark,
    mode: GameMode,
    status: Evaluation,
    history: Vec<usize>,
    generation: u64,
}

impl GameSession {
    /// Creates a session with an empty board, X to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(%mode, "Creating new game session");
        Self {
            board: Board::new(),
            to_move: Mark::X,
            mode,
            status: Evaluation::InProgress,
            history: Vec::new(),
            generation: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark due to move. After the game ends this is the mark
    /// that made the final move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the evaluation after the latest move.
    pub fn status(&self) -> Evaluation {
        self.status
    }

    /// Returns the indices played so far, oldest first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<usize> {
        self.history.last().copied()
    }

    /// Counter bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Checks if the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Places the mark due to move at `index`, evaluates the board, and
    /// passes the turn if the game continues.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game has ended, or the
    /// board's error for an out-of-range or occupied cell. Nothing changes
    /// on error.
    #[instrument(skip(self), fields(mark = %self.to_move, generation = self.generation))]
    pub fn apply(&mut self, index: usize) -> Result<Evaluation, MoveError> {
        if self.is_over() {
            warn!(index, "Move rejected, game is over");
            return Err(MoveError::GameOver);
        }

        self.board.place(index, self.to_move).inspect_err(|e| {
            warn!(index, error = %e, "Move rejected");
        })?;
        self.history.push(index);

        // Evaluate before passing the turn so a win is seen before the
        // opponent can move.
        self.status = evaluate(&self.board);
        if !self.status.is_terminal() {
            self.to_move = advance_turn(self.to_move);
        }

        debug!(index, status = ?self.status, moves = self.history.len(), "Move applied");
        Ok(self.status)
    }

    /// Clears the board and gives X the first move. The mode is kept.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = Mark::X;
        self.status = Evaluation::InProgress;
        self.history.clear();
        self.generation += 1;
        info!(generation = self.generation, "Game reset");
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing game mode");
        self.mode = mode;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Cell, Outcome};

    fn play(session: &mut GameSession, moves: &[usize]) -> Evaluation {
        let mut last = session.status();
        for &index in moves {
            last = session.apply(index).unwrap();
        }
        last
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        assert_eq!(session.to_move(), Mark::X);
        session.apply(4).unwrap();
        assert_eq!(session.to_move(), Mark::O);
        session.apply(0).unwrap();
        assert_eq!(session.to_move(), Mark::X);
        assert_eq!(session.history(), &[4, 0]);
        assert_eq!(session.last_move(), Some(0));
    }

    #[test]
    fn test_win_stops_the_game() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        let status = play(&mut session, &[0, 3, 1, 4, 2]);
        assert_eq!(
            status,
            Evaluation::Finished(Outcome::Win {
                mark: Mark::X,
                line: [0, 1, 2]
            })
        );
        assert_eq!(session.to_move(), Mark::X);

        let before = session.board().clone();
        assert_eq!(session.apply(8), Err(MoveError::GameOver));
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_draw() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        let status = play(&mut session, &[0, 4, 2, 1, 7, 6, 3, 5, 8]);
        assert_eq!(status, Evaluation::Finished(Outcome::Draw));
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        session.apply(4).unwrap();
        assert_eq!(session.apply(4), Err(MoveError::Occupied(4)));
        assert_eq!(session.to_move(), Mark::O);
        assert_eq!(session.history(), &[4]);
    }

    #[test]
    fn test_reset_clears_everything_but_mode() {
        let mut session = GameSession::new(GameMode::VsComputer);
        play(&mut session, &[0, 3, 1, 4, 2]);
        session.reset();

        assert!(session.board().cells().iter().all(|c| *c == Cell::Empty));
        assert_eq!(session.to_move(), Mark::X);
        assert!(!session.is_over());
        assert_eq!(session.mode(), GameMode::VsComputer);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_set_mode_resets() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        session.apply(4).unwrap();
        session.set_mode(GameMode::VsComputer);
        assert_eq!(session.mode(), GameMode::VsComputer);
        assert!(session.history().is_empty());
    }
}

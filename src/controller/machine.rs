//! Game controller: the state machine driving a session.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::controller::{ControllerState, GameEvent, MoveReport, PendingReply};
use crate::games::tictactoe::{Evaluation, GameMode, Mark, MoveError, select_move};
use crate::ledger::RewardLedger;
use crate::session::GameSession;
use crate::store::{KeyValueStore, StoreError};

/// Controller that owns a [`GameSession`] and a [`RewardLedger`].
///
/// All inputs run to completion before returning. State changes are
/// published to every subscriber as [`GameEvent`]s.
#[derive(Debug)]
pub struct GameController<S, R> {
    session: GameSession,
    ledger: RewardLedger<S>,
    rng: R,
    computer_delay: Duration,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl<S: KeyValueStore, R: Rng> GameController<S, R> {
    /// Creates a controller with a fresh game in `mode`.
    #[instrument(skip(ledger, rng))]
    pub fn new(mode: GameMode, ledger: RewardLedger<S>, rng: R, computer_delay: Duration) -> Self {
        info!(%mode, balance = ledger.balance(), "Creating GameController");
        Self {
            session: GameSession::new(mode),
            ledger,
            rng,
            computer_delay,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber and returns its event stream.
    #[instrument(skip(self))]
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        debug!(subscribers = self.subscribers.len(), "Subscriber added");
        rx
    }

    /// Returns the current session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the current coin balance.
    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Returns the key/value store behind the ledger.
    pub fn store_mut(&mut self) -> &mut S {
        self.ledger.store_mut()
    }

    /// Returns the current state.
    pub fn state(&self) -> ControllerState {
        match self.session.status() {
            Evaluation::Finished(outcome) => ControllerState::Terminal(outcome),
            Evaluation::InProgress if self.session.mode().is_computer(self.session.to_move()) => {
                ControllerState::AwaitingComputerMove
            }
            Evaluation::InProgress => ControllerState::AwaitingHumanMove,
        }
    }

    /// Applies a human move at `index`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] if the game is over, the computer is due to
    /// move, or the cell is out of range or occupied. Nothing changes on
    /// error.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, index: usize) -> Result<MoveReport, MoveError> {
        match self.state() {
            ControllerState::Terminal(_) => {
                warn!(index, "Move requested after game ended");
                Err(MoveError::GameOver)
            }
            ControllerState::AwaitingComputerMove => {
                warn!(index, "Move requested while computer reply is pending");
                Err(MoveError::NotYourTurn(self.session.to_move()))
            }
            ControllerState::AwaitingHumanMove => self.apply_move(index),
        }
    }

    /// Lets the computer make the move promised by `reply`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::StaleReply`] if the game was reset after the
    /// ticket was issued, [`MoveError::NotYourTurn`] or
    /// [`MoveError::GameOver`] if the computer is not due to move, and
    /// [`MoveError::InvariantViolation`] if the board has no empty cell.
    #[instrument(skip(self))]
    pub fn resolve_computer_move(&mut self, reply: PendingReply) -> Result<MoveReport, MoveError> {
        if reply.generation != self.session.generation() {
            debug!(
                ticket = reply.generation,
                current = self.session.generation(),
                "Dropping stale computer reply"
            );
            return Err(MoveError::StaleReply);
        }

        let computer = match self.state() {
            ControllerState::AwaitingComputerMove => self.session.to_move(),
            ControllerState::AwaitingHumanMove => {
                return Err(MoveError::NotYourTurn(self.session.to_move()));
            }
            ControllerState::Terminal(_) => return Err(MoveError::GameOver),
        };

        let Some(index) =
            select_move(self.session.board(), computer, computer.opponent(), &mut self.rng)
        else {
            error!("Computer asked to move on a full board");
            return Err(MoveError::InvariantViolation(
                "computer has no empty cell to play".to_string(),
            ));
        };

        info!(index, mark = %computer, "Computer moves");
        self.apply_move(index)
    }

    /// Starts a new game in the current mode, X to move.
    ///
    /// Any pending computer reply becomes stale.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.session.reset();
        self.emit_new_game();
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        self.session.set_mode(mode);
        self.emit(GameEvent::ModeChanged(mode));
        self.emit_new_game();
    }

    /// Resets the coin balance to 0.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the reset could not be persisted. The
    /// in-memory balance is 0 either way.
    #[instrument(skip(self))]
    pub fn reset_coins(&mut self) -> Result<(), StoreError> {
        let result = self.ledger.reset();
        self.emit(GameEvent::CoinsChanged(self.ledger.balance()));
        result
    }

    /// Applies a move for whichever mark is due and publishes the result.
    fn apply_move(&mut self, index: usize) -> Result<MoveReport, MoveError> {
        let evaluation = self.session.apply(index)?;

        self.emit(GameEvent::BoardChanged {
            cells: *self.session.board().cells(),
            last_move: Some(index),
        });

        if let Evaluation::Finished(outcome) = evaluation {
            info!(%outcome, moves = self.session.history().len(), "Game ended");
            self.emit(GameEvent::GameEnded {
                outcome,
                winning_line: outcome.winning_line(),
            });
            match self.ledger.record_outcome(&outcome, self.session.mode()) {
                Ok(0) => {}
                Ok(_) => self.emit(GameEvent::CoinsChanged(self.ledger.balance())),
                Err(e) => {
                    warn!(error = %e, "Failed to persist coin balance");
                    self.emit(GameEvent::CoinsChanged(self.ledger.balance()));
                }
            }
            return Ok(MoveReport {
                index,
                state: ControllerState::Terminal(outcome),
                pending_reply: None,
            });
        }

        let next = self.session.to_move();
        self.emit(GameEvent::TurnChanged(next));

        let pending_reply = if self.session.mode().is_computer(next) {
            self.emit(GameEvent::ComputerThinking {
                delay: self.computer_delay,
            });
            Some(PendingReply::new(
                self.session.generation(),
                self.computer_delay,
            ))
        } else {
            None
        };

        Ok(MoveReport {
            index,
            state: self.state(),
            pending_reply,
        })
    }

    fn emit_new_game(&mut self) {
        self.emit(GameEvent::BoardChanged {
            cells: *self.session.board().cells(),
            last_move: None,
        });
        self.emit(GameEvent::TurnChanged(Mark::X));
    }

    fn emit(&mut self, event: GameEvent) {
        debug!(event = ?event, "Emitting event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Cell, Outcome};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn controller(mode: GameMode) -> GameController<MemoryStore, StdRng> {
        GameController::new(
            mode,
            RewardLedger::load(MemoryStore::new()),
            StdRng::seed_from_u64(7),
            Duration::from_millis(500),
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_initial_state() {
        let controller = controller(GameMode::TwoPlayer);
        assert_eq!(controller.state(), ControllerState::AwaitingHumanMove);
        assert_eq!(controller.session().to_move(), Mark::X);
    }

    #[test]
    fn test_two_player_move_emits_board_and_turn() {
        let mut controller = controller(GameMode::TwoPlayer);
        let mut rx = controller.subscribe();

        let report = controller.request_move(4).unwrap();
        assert_eq!(report.pending_reply, None);
        assert_eq!(report.state, ControllerState::AwaitingHumanMove);

        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            GameEvent::BoardChanged {
                last_move: Some(4),
                ..
            }
        ));
        assert_eq!(events[1], GameEvent::TurnChanged(Mark::O));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_vs_computer_issues_pending_reply() {
        let mut controller = controller(GameMode::VsComputer);
        let mut rx = controller.subscribe();

        let report = controller.request_move(4).unwrap();
        let reply = report.pending_reply.expect("computer should reply");
        assert_eq!(reply.delay(), Duration::from_millis(500));
        assert_eq!(controller.state(), ControllerState::AwaitingComputerMove);
        assert!(drain(&mut rx).contains(&GameEvent::ComputerThinking {
            delay: Duration::from_millis(500)
        }));

        // Human cannot move while the computer is due.
        assert_eq!(controller.request_move(0), Err(MoveError::NotYourTurn(Mark::O)));

        let report = controller.resolve_computer_move(reply).unwrap();
        assert_ne!(report.index, 4);
        assert_eq!(
            controller.session().board().cell_at(report.index),
            Some(Cell::Marked(Mark::O))
        );
        assert_eq!(controller.state(), ControllerState::AwaitingHumanMove);
    }

    #[test]
    fn test_reset_makes_reply_stale() {
        let mut controller = controller(GameMode::VsComputer);
        let reply = controller.request_move(4).unwrap().pending_reply.unwrap();

        controller.reset_game();
        assert_eq!(controller.resolve_computer_move(reply), Err(MoveError::StaleReply));
        assert!(controller.session().board().empty_cells().len() == 9);
        assert_eq!(controller.state(), ControllerState::AwaitingHumanMove);
    }

    #[test]
    fn test_reply_cannot_be_used_twice() {
        let mut controller = controller(GameMode::VsComputer);
        let reply = controller.request_move(4).unwrap().pending_reply.unwrap();
        controller.resolve_computer_move(reply).unwrap();
        assert_eq!(
            controller.resolve_computer_move(reply),
            Err(MoveError::NotYourTurn(Mark::X))
        );
    }

    #[test]
    fn test_human_win_vs_computer_awards_coins_once() {
        // Zero-step RNG: the computer's random fallback takes the first empty cell.
        let mut controller = GameController::new(
            GameMode::VsComputer,
            RewardLedger::load(MemoryStore::new()),
            StepRng::new(0, 0),
            Duration::ZERO,
        );
        let mut rx = controller.subscribe();

        // X forks the 0-3-6 column and the 2-4-6 diagonal; O can block only one.
        let mut replies = Vec::new();
        for index in [0, 4, 6, 2] {
            if let Some(reply) = controller.request_move(index).unwrap().pending_reply {
                replies.push(controller.resolve_computer_move(reply).unwrap().index);
            }
        }
        assert_eq!(replies, vec![1, 8, 3]);
        assert_eq!(
            controller.state(),
            ControllerState::Terminal(Outcome::Win {
                mark: Mark::X,
                line: [2, 4, 6]
            })
        );
        assert_eq!(controller.balance(), 10);

        let events = drain(&mut rx);
        let ended = events
            .iter()
            .position(|e| matches!(e, GameEvent::GameEnded { .. }))
            .expect("game ended");
        let coins: Vec<_> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, GameEvent::CoinsChanged(_)))
            .collect();
        assert_eq!(coins, vec![(ended + 1, &GameEvent::CoinsChanged(10))]);
    }

    #[test]
    fn test_two_player_x_win_awards_nothing() {
        let mut controller = controller(GameMode::TwoPlayer);
        for index in [0, 3, 1, 4, 2] {
            controller.request_move(index).unwrap();
        }
        assert!(matches!(
            controller.state(),
            ControllerState::Terminal(Outcome::Win { mark: Mark::X, line: [0, 1, 2] })
        ));
        assert_eq!(controller.balance(), 0);
        assert_eq!(controller.request_move(8), Err(MoveError::GameOver));
    }

    #[test]
    fn test_set_mode_resets_and_announces() {
        let mut controller = controller(GameMode::TwoPlayer);
        controller.request_move(0).unwrap();
        let mut rx = controller.subscribe();

        controller.set_mode(GameMode::VsComputer);
        let events = drain(&mut rx);
        assert_eq!(events[0], GameEvent::ModeChanged(GameMode::VsComputer));
        assert!(events.contains(&GameEvent::TurnChanged(Mark::X)));
        assert!(controller.session().history().is_empty());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut controller = controller(GameMode::TwoPlayer);
        drop(controller.subscribe());
        let mut rx = controller.subscribe();
        controller.request_move(0).unwrap();
        assert_eq!(controller.subscribers.len(), 1);
        assert_eq!(drain(&mut rx).len(), 2);
    }
}

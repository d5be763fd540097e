//! Application state and logic.
//!
//! The app is a pure subscriber: it mirrors controller events into view
//! state and turns key presses into [`Action`]s. It never touches the
//! game session directly.

use crossterm::event::KeyCode;
use tracing::debug;

use super::input::move_cursor;
use super::labels::PlayerLabels;
use crate::controller::GameEvent;
use crate::games::tictactoe::{CELL_COUNT, Cell, GameMode, Mark, Outcome, WinLine};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Mark the cell at the index.
    Move(usize),
    /// Start a new game.
    Reset,
    /// Switch between two-player and vs-computer.
    ToggleMode,
    /// Zero the coin balance.
    ResetCoins,
    /// Switch light/dark palette.
    ToggleTheme,
    /// Show or hide the instructions.
    ToggleHelp,
    /// Type new player names.
    RenamePlayers,
    /// Leave the game.
    Quit,
    /// Nothing for the controller to do.
    None,
}

/// Longest name accepted from the keyboard.
const MAX_NAME_LEN: usize = 20;

/// A player name being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NameEntry {
    mark: Mark,
    buffer: String,
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    cells: [Cell; CELL_COUNT],
    last_move: Option<usize>,
    to_move: Mark,
    outcome: Option<Outcome>,
    thinking: bool,
    coins: u64,
    mode: GameMode,
    labels: PlayerLabels,
    cursor: usize,
    dark_mode: bool,
    show_help: bool,
    notice: Option<String>,
    naming: Option<NameEntry>,
}

impl App {
    /// Creates the view for a fresh game.
    pub fn new(mode: GameMode, coins: u64, dark_mode: bool) -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            last_move: None,
            to_move: Mark::X,
            outcome: None,
            thinking: false,
            coins,
            mode,
            labels: PlayerLabels::for_mode(mode),
            cursor: 4,
            dark_mode,
            show_help: false,
            notice: None,
            naming: None,
        }
    }

    /// Returns the cells as last reported.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the most recently marked cell.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Returns the line to highlight, if the game was won.
    pub fn winning_line(&self) -> Option<WinLine> {
        self.outcome.and_then(|o| o.winning_line())
    }

    /// Returns the coin balance as last reported.
    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Returns the current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the player names.
    pub fn labels(&self) -> &PlayerLabels {
        &self.labels
    }

    /// Returns the cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the dark palette is active.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Whether the instructions are shown.
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// The mark being renamed and the text typed so far.
    pub fn naming(&self) -> Option<(Mark, &str)> {
        self.naming
            .as_ref()
            .map(|entry| (entry.mark, entry.buffer.as_str()))
    }

    /// Starts typing a new name for X, then O.
    pub fn start_renaming(&mut self) {
        debug!("Renaming players");
        self.naming = Some(NameEntry {
            mark: Mark::X,
            buffer: String::new(),
        });
    }

    /// One-off message such as a rejected move.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Sets the one-off message.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Status line for the current game.
    pub fn status_text(&self) -> String {
        match self.outcome {
            Some(Outcome::Win { mark, .. }) => format!("{} wins! 🎉", self.labels.name(mark)),
            Some(Outcome::Draw) => "It's a draw! 🤝".to_string(),
            None if self.thinking => format!("{} is thinking...", self.labels.name(self.to_move)),
            None => format!("{}'s turn", self.labels.name(self.to_move)),
        }
    }

    /// Mirrors a controller event into the view.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::BoardChanged { cells, last_move } => {
                self.cells = cells;
                self.last_move = last_move;
                self.notice = None;
                if last_move.is_none() {
                    self.outcome = None;
                    self.thinking = false;
                }
            }
            GameEvent::TurnChanged(mark) => {
                self.to_move = mark;
                self.thinking = false;
            }
            GameEvent::ComputerThinking { .. } => {
                self.thinking = true;
            }
            GameEvent::GameEnded { outcome, .. } => {
                self.outcome = Some(outcome);
                self.thinking = false;
            }
            GameEvent::CoinsChanged(coins) => {
                self.coins = coins;
            }
            GameEvent::ModeChanged(mode) => {
                self.mode = mode;
                self.labels = PlayerLabels::for_mode(mode);
                self.naming = None;
            }
        }
    }

    /// Maps a key press to an action, moving the cursor as a side effect.
    ///
    /// While a name is being typed every key edits the name.
    pub fn action_for_key(&mut self, key: KeyCode) -> Action {
        if self.naming.is_some() {
            self.edit_name(key);
            return Action::None;
        }

        match key {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.cursor = index;
                Action::Move(index)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::Move(self.cursor),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                Action::None
            }
            KeyCode::Char('r') => Action::Reset,
            KeyCode::Char('m') => Action::ToggleMode,
            KeyCode::Char('c') => Action::ResetCoins,
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('n') => Action::RenamePlayers,
            KeyCode::Char('h') | KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    fn edit_name(&mut self, key: KeyCode) {
        let Some(entry) = self.naming.as_mut() else {
            return;
        };

        match key {
            KeyCode::Char(c) if entry.buffer.chars().count() < MAX_NAME_LEN => {
                entry.buffer.push(c);
            }
            KeyCode::Backspace => {
                entry.buffer.pop();
            }
            KeyCode::Enter => {
                let name = entry.buffer.trim();
                // An empty entry keeps the current name.
                if !name.is_empty() {
                    self.labels.set_name(entry.mark, name);
                }
                self.naming = match entry.mark {
                    Mark::X => Some(NameEntry {
                        mark: Mark::O,
                        buffer: String::new(),
                    }),
                    Mark::O => None,
                };
            }
            KeyCode::Esc => self.naming = None,
            _ => {}
        }
    }

    /// Flips the palette and returns the new preference.
    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Shows or hides the instructions.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

/// Instructions shown by the help overlay.
pub const HOW_TO_PLAY: &str = "\
🎯 Objective
Be the first to get 3 of your marks in a row (horizontally, vertically, or diagonally).

🎮 Game Modes
2 Players: Play against a friend
vs Computer: Challenge the AI

💰 Coin System
Win a game against the computer to earn 10 coins
Coins are saved between sessions
You can reset your coins if needed

✏️ Names
Press n to type a name for X, then for O (Enter to confirm, Esc to stop)
Switching mode restores the default names

🏆 Tips
Try to create two winning opportunities at once
Watch out for the computer's moves
The center square is the most strategic starting position";

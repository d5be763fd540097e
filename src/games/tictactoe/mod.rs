mod action;
mod computer;
mod rules;
mod types;

pub use action::MoveError;
pub use computer::select_move;
pub use rules::{
    Evaluation, Outcome, WIN_LINES, WinLine, advance_turn, check_winner, evaluate, is_draw,
    is_full,
};
pub use types::{Board, CELL_COUNT, Cell, GameMode, Mark};

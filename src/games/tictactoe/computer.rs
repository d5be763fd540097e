//! Computer opponent: a two-ply heuristic.
//!
//! The computer completes its own line if it can, otherwise blocks the
//! opponent's line, otherwise picks a random empty cell. Lines are scanned
//! in catalog order and the first match wins.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::rules::WIN_LINES;
use super::{Board, Cell, Mark};

/// Returns the empty index of a line holding two `mark`s and one empty cell.
fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    let cells = board.cells();
    WIN_LINES.iter().find_map(|line| {
        let owned = line
            .iter()
            .filter(|&&i| cells[i] == Cell::Marked(mark))
            .count();
        let mut empty = line.iter().copied().filter(|&i| cells[i].is_empty());
        match (owned, empty.next(), empty.next()) {
            (2, Some(index), None) => Some(index),
            _ => None,
        }
    })
}

/// Selects the computer's move.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    computer: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<usize> {
    if let Some(index) = completing_cell(board, computer) {
        debug!(index, "Completing own line");
        return Some(index);
    }

    if let Some(index) = completing_cell(board, opponent) {
        debug!(index, "Blocking opponent line");
        return Some(index);
    }

    let index = board.empty_cells().choose(rng).copied();
    debug!(index = ?index, "Picking random empty cell");
    index
}

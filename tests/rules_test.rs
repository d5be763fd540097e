//! Tests for board evaluation and the computer heuristic.

use coin_tictactoe::{
    Board, Cell, Evaluation, Mark, Outcome, WIN_LINES, advance_turn, evaluate, select_move,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn board_with(marks: &[(usize, Mark)]) -> Board {
    let mut board = Board::new();
    for &(index, mark) in marks {
        board.place(index, mark).unwrap();
    }
    board
}

fn has_complete_line(board: &Board) -> bool {
    let cells = board.cells();
    WIN_LINES
        .iter()
        .any(|&[a, b, c]| cells[a] != Cell::Empty && cells[a] == cells[b] && cells[b] == cells[c])
}

#[test]
fn test_catalog_matches_rows_columns_diagonals() {
    assert_eq!(
        WIN_LINES,
        [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6]
        ]
    );
}

#[test]
fn test_evaluation_agrees_with_line_scan_over_random_games() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..500 {
        let mut board = Board::new();
        let mut mark = Mark::X;
        let mut order: Vec<usize> = (0..9).collect();
        order.shuffle(&mut rng);

        for index in order {
            board.place(index, mark).unwrap();
            let evaluation = evaluate(&board);
            let won = has_complete_line(&board);

            match evaluation {
                Evaluation::Finished(Outcome::Win { mark: winner, line }) => {
                    assert!(won);
                    assert_eq!(winner, mark, "only the mover can complete a line");
                    assert!(line.iter().all(|&i| board.cell_at(i) == Some(Cell::Marked(mark))));
                    break;
                }
                Evaluation::Finished(Outcome::Draw) => {
                    assert!(!won);
                    assert!(board.is_full());
                    break;
                }
                Evaluation::InProgress => {
                    assert!(!won);
                    assert!(!board.is_full());
                }
            }
            mark = advance_turn(mark);
        }
    }
}

#[test]
fn test_heuristic_prefers_win() {
    let board = board_with(&[(0, Mark::O), (1, Mark::O)]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(select_move(&board, Mark::O, Mark::X, &mut rng), Some(2));
}

#[test]
fn test_heuristic_blocks() {
    let board = board_with(&[(0, Mark::X), (1, Mark::X)]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(select_move(&board, Mark::O, Mark::X, &mut rng), Some(2));
}

#[test]
fn test_heuristic_is_deterministic_when_forced() {
    let board = board_with(&[(0, Mark::X), (4, Mark::O), (8, Mark::X), (2, Mark::O)]);
    // O completes the anti-diagonal 2-4-6 regardless of the random source.
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(select_move(&board, Mark::O, Mark::X, &mut rng), Some(6));
    }
}

#[test]
fn test_heuristic_random_on_empty_board_covers_all_cells() {
    let board = Board::new();
    let mut rng = StdRng::seed_from_u64(11);
    let mut counts = [0u32; 9];
    for _ in 0..4_500 {
        counts[select_move(&board, Mark::O, Mark::X, &mut rng).unwrap()] += 1;
    }
    // Expected 500 per cell.
    assert!(counts.iter().all(|&c| (380..=620).contains(&c)), "{:?}", counts);
}

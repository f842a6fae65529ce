//! Heuristic evaluation function for board positions
//!
//! Each side scores the positional value of its pieces (weighted) plus its
//! mobility: the number of moves that bring a piece strictly closer to the
//! goal corner. The result is the difference, seen from the side to move.

use crate::board::{Board, Color, TOTAL_CELLS};
use crate::game::GameState;
use crate::rules::{check_winner, count_forward_moves};

use super::weights::{Score, POSITION_WEIGHT, SCORE_TABLE};

/// Evaluate the position from the perspective of the side to move.
///
/// Returns:
/// - `Score::WIN` if the side to move has already won
/// - `-Score::WIN` if the opponent has won
/// - otherwise the heuristic difference, positive when the mover is ahead
#[must_use]
pub fn evaluate(game: &GameState) -> i32 {
    evaluate_board(game.board(), game.turn())
}

/// Evaluate a bare board for `color`.
#[must_use]
pub fn evaluate_board(board: &Board, color: Color) -> i32 {
    if let Some(winner) = check_winner(board, color) {
        return if winner == color { Score::WIN } else { -Score::WIN };
    }

    side_score(board, color) - side_score(board, color.opponent())
}

/// Weighted position plus mobility for one side
fn side_score(board: &Board, color: Color) -> i32 {
    POSITION_WEIGHT * positional_score(board, color) + count_forward_moves(board, color)
}

/// Sum of the positional table over a side's pieces
#[must_use]
pub fn positional_score(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .into_iter()
        .map(|cell| match color {
            Color::Green => SCORE_TABLE[cell as usize],
            Color::Red => SCORE_TABLE[TOTAL_CELLS - 1 - cell as usize],
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, Move};

    #[test]
    fn test_initial_position_balanced() {
        let game = GameState::new();
        assert_eq!(evaluate(&game), 0);
    }

    #[test]
    fn test_symmetric_for_negamax() {
        let game: GameState = "222200000/222000000/220000000/020000000/000000000/\
                               000000011/000000011/000000110/000001111 g 2"
            .parse()
            .unwrap();
        let board = game.board();
        assert_eq!(
            evaluate_board(board, Color::Red),
            -evaluate_board(board, Color::Green)
        );
    }

    #[test]
    fn test_forward_step_raises_positional_score() {
        let mut game = GameState::new();
        let before = positional_score(game.board(), Color::Red);
        game.apply_move(Move::new(61, 52));
        let after = positional_score(game.board(), Color::Red);
        assert_eq!(after - before, SCORE_TABLE[28] - SCORE_TABLE[19]);
        assert!(after > before);
    }

    #[test]
    fn test_positional_mirror() {
        let board = Board::new();
        assert_eq!(
            positional_score(&board, Color::Red),
            positional_score(&board, Color::Green)
        );
    }

    #[test]
    fn test_win_score_sign() {
        let board = Board {
            red: Color::Red.goal(),
            green: Bitboard::from_cells(&[40]),
        };
        assert_eq!(evaluate_board(&board, Color::Red), Score::WIN);
        assert_eq!(evaluate_board(&board, Color::Green), -Score::WIN);
    }

    #[test]
    fn test_one_move_from_win() {
        // Red fills its goal except 27 and stands on 28, next to it
        let mut red: Vec<u8> = Color::Red.goal().iter_ones().filter(|&c| c != 27).collect();
        red.push(28);
        let board = Board {
            red: Bitboard::from_cells(&red),
            green: Bitboard::from_cells(&[40, 53, 61, 62, 69, 70, 71, 77, 78, 79]),
        };
        let mut game = GameState::from_parts(board, Color::Red, 20);
        assert!(evaluate(&game).abs() < Score::WIN);

        game.apply_move(Move::new(28, 27));
        // Green to move and lost
        assert_eq!(evaluate(&game), -Score::WIN);
    }
}

//! Win detection
//!
//! A side wins once its pieces occupy exactly the opponent's starting corner.

use crate::board::{Board, Color};

/// Check if `color` has filled its goal corner.
#[inline]
#[must_use]
pub fn has_won(board: &Board, color: Color) -> bool {
    board.pieces(color) == color.goal()
}

/// The winner, if any. When the side to move and the side that just moved
/// have both filled their goals, `to_move` is reported.
#[must_use]
pub fn check_winner(board: &Board, to_move: Color) -> Option<Color> {
    if has_won(board, to_move) {
        Some(to_move)
    } else if has_won(board, to_move.opponent()) {
        Some(to_move.opponent())
    } else {
        None
    }
}

//! Move generation: single steps and jump chains
//!
//! A piece may step to any empty adjacent cell, or hop over an adjacent
//! piece (of either color) onto the empty cell directly behind it. Hops chain
//! without limit, so the jump destinations of a piece are the fixed-point
//! closure of single hops starting from its cell.
//!
//! # Example
//!
//! ```
//! use checkers::board::{Board, Color};
//! use checkers::rules::generate;
//!
//! let board = Board::new();
//! let moves = generate(&board, board.pieces(Color::Red));
//! assert!(moves.iter().all(|m| board.is_empty(m.dst)));
//! ```

use std::cmp::Reverse;

use crate::board::geometry::{adjacent, distance, jump_landings};
use crate::board::{Bitboard, Board, Color, Move};

/// Number of ordering buckets; covers distance deltas of -32..=31
pub const SORT_BUCKETS: usize = 64;

/// Offset applied to a distance delta to get its bucket index
const BUCKET_OFFSET: i32 = (SORT_BUCKETS / 2) as i32;

/// All cells reachable from `src` through one or more hops.
///
/// The board is left untouched while hopping, so the moving piece still
/// counts as occupying `src`. The result never contains `src` and never
/// contains an occupied cell.
#[must_use]
pub fn jump_closure(board: &Board, src: u8) -> Bitboard {
    let occupied = board.occupied();
    let vacant = board.vacant();

    let mut visited = Bitboard::from_cell(src);
    let mut frontier = visited;

    while !frontier.is_empty() {
        let mut reached = Bitboard::EMPTY;
        for cell in frontier {
            reached |= jump_landings(cell, occupied);
        }
        // Only new, empty landings extend the chain
        let fresh = reached & vacant & !visited;
        visited |= fresh;
        frontier = fresh;
    }

    visited & !Bitboard::from_cell(src)
}

/// Every legal destination of the piece on `src`.
#[must_use]
#[inline]
pub fn destinations(board: &Board, src: u8) -> Bitboard {
    (adjacent(src) & board.vacant()) | jump_closure(board, src)
}

/// Append the moves of every piece in `from` to `moves`.
///
/// Returns the number of moves appended.
pub fn generate_into(board: &Board, from: Bitboard, moves: &mut Vec<Move>) -> usize {
    let before = moves.len();
    for src in from {
        moves.extend(destinations(board, src).into_iter().map(|dst| Move::new(src, dst)));
    }
    moves.len() - before
}

/// Generate the moves of every piece in `from`.
#[must_use]
pub fn generate(board: &Board, from: Bitboard) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_into(board, from, &mut moves);
    moves
}

/// Forward progress of a move for `color`: how much closer it gets to the
/// goal corner. Negative for moves heading home.
#[inline]
#[must_use]
pub fn progress(color: Color, mv: Move) -> i32 {
    let delta = distance(mv.dst) - distance(mv.src);
    match color {
        Color::Green => delta,
        Color::Red => -delta,
    }
}

#[inline]
fn bucket(mv: Move) -> usize {
    (distance(mv.dst) - distance(mv.src) + BUCKET_OFFSET) as usize
}

/// Order moves so that forward progress comes first.
///
/// Moves are bucketed by distance delta; Red takes the buckets in ascending
/// order and Green in descending order. Order within a bucket is preserved.
pub fn sort_moves(moves: &mut [Move], color: Color) {
    match color {
        Color::Red => moves.sort_by_key(|&mv| bucket(mv)),
        Color::Green => moves.sort_by_key(|&mv| Reverse(bucket(mv))),
    }
}

/// Count the moves of `color`'s pieces that make strict forward progress,
/// without building a move list.
#[must_use]
pub fn count_forward_moves(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for src in board.pieces(color) {
        let src_dist = distance(src);
        for dst in destinations(board, src) {
            let delta = distance(dst) - src_dist;
            let forward = match color {
                Color::Green => delta > 0,
                Color::Red => delta < 0,
            };
            if forward {
                count += 1;
            }
        }
    }
    count
}

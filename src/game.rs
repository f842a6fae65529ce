//! Game state: board, side to move, round counter and incremental hash
//!
//! This is the boundary a front end talks to: list destinations for a piece,
//! validate and apply moves, detect the end of the game, and read or write
//! the position text format.
//!
//! # Example
//!
//! ```
//! use checkers::{GameState, Move};
//!
//! let mut game = GameState::new();
//! assert!(game.is_move_valid(Move::new(53, 44)));
//!
//! game.try_apply_move(Move::new(53, 44)).unwrap();
//! assert!(game.try_apply_move(Move::new(53, 44)).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::geometry::adjacent;
use crate::board::notation::{self, PositionError};
use crate::board::{Bitboard, Board, Color, Move};
use crate::rules::{check_winner, destinations, generate, jump_closure};
use crate::search::zobrist;

/// Reasons a move is rejected by [`GameState::try_apply_move`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("cell index out of range in move {0}")]
    OutOfRange(Move),

    #[error("cell {cell} holds no {color:?} piece")]
    NotYourPiece { cell: u8, color: Color },

    #[error("move {0} is not a legal destination")]
    IllegalDestination(Move),
}

/// Complete game state.
///
/// `apply_move` and `undo_move` are exact inverses: board, side to move,
/// round and hash all come back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    /// Starts at 1; increments each time Red is to move again
    round: u32,
    hash: u64,
}

impl GameState {
    /// Initial position, Red to move, round 1
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Board::new(), Color::Red, 1)
    }

    /// Build a state from its parts, computing the hash from scratch
    #[must_use]
    pub fn from_parts(board: Board, turn: Color, round: u32) -> Self {
        debug_assert!((board.red & board.green).is_empty());
        Self {
            board,
            turn,
            round,
            hash: zobrist().hash(&board, turn),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Incrementally maintained Zobrist hash
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash recomputed from scratch
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        zobrist().hash(&self.board, self.turn)
    }

    /// Pieces of the side to move
    #[inline]
    pub fn mover_pieces(&self) -> Bitboard {
        self.board.pieces(self.turn)
    }

    /// Legal destinations of the piece on `cell`.
    ///
    /// Empty if the cell is off the board or holds no piece of the side to
    /// move.
    #[must_use]
    pub fn destinations(&self, cell: u8) -> Bitboard {
        if !self.mover_pieces().contains(cell) {
            return Bitboard::EMPTY;
        }
        destinations(&self.board, cell)
    }

    /// Every legal move of the side to move
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        generate(&self.board, self.mover_pieces())
    }

    /// Check a move without generating the full move list.
    #[must_use]
    pub fn is_move_valid(&self, mv: Move) -> bool {
        if !mv.in_range() {
            return false;
        }
        if !self.board.is_empty(mv.dst) || !self.mover_pieces().contains(mv.src) {
            return false;
        }
        adjacent(mv.src).contains(mv.dst) || jump_closure(&self.board, mv.src).contains(mv.dst)
    }

    /// Winner of the game, if any
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        check_winner(&self.board, self.turn)
    }

    /// The game is over once a side has filled its goal corner, or the side
    /// to move has no legal move.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
            || self
                .mover_pieces()
                .into_iter()
                .all(|src| destinations(&self.board, src).is_empty())
    }

    /// Apply a move after validating it. Leaves the state untouched on error.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if !mv.in_range() {
            return Err(MoveError::OutOfRange(mv));
        }
        if !self.mover_pieces().contains(mv.src) {
            return Err(MoveError::NotYourPiece {
                cell: mv.src,
                color: self.turn,
            });
        }
        if !destinations(&self.board, mv.src).contains(mv.dst) {
            return Err(MoveError::IllegalDestination(mv));
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Apply a pre-validated move.
    ///
    /// No legality checks: an illegal move corrupts the state. Use
    /// [`GameState::try_apply_move`] for untrusted input.
    #[inline]
    pub fn apply_move(&mut self, mv: Move) {
        let color = self.turn;
        let pieces = self.board.pieces_mut(color);
        pieces.toggle(mv.src);
        pieces.toggle(mv.dst);
        self.hash = zobrist().update_move(self.hash, mv, color);
        self.turn = color.opponent();
        if self.turn == Color::Red {
            self.round = self.round.wrapping_add(1);
        }
    }

    /// Take back the last move, which must be `mv`.
    #[inline]
    pub fn undo_move(&mut self, mv: Move) {
        let color = self.turn.opponent();
        if self.turn == Color::Red {
            self.round = self.round.wrapping_sub(1);
        }
        self.turn = color;
        let pieces = self.board.pieces_mut(color);
        pieces.toggle(mv.dst);
        pieces.toggle(mv.src);
        self.hash = zobrist().update_move(self.hash, mv, color);
    }

    /// Pass the turn. Only the search uses this, for null-move pruning.
    #[inline]
    pub(crate) fn apply_null_move(&mut self) {
        self.turn = self.turn.opponent();
        if self.turn == Color::Red {
            self.round = self.round.wrapping_add(1);
        }
        self.hash = zobrist().toggle_side(self.hash);
    }

    #[inline]
    pub(crate) fn undo_null_move(&mut self) {
        if self.turn == Color::Red {
            self.round = self.round.wrapping_sub(1);
        }
        self.turn = self.turn.opponent();
        self.hash = zobrist().toggle_side(self.hash);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameState {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pos = notation::parse(s)?;
        Ok(Self::from_parts(pos.board, pos.turn, pos.round))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&notation::format(&self.board, self.turn, self.round))
    }
}

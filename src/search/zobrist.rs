//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when a piece moves.
//! The key table is process-wide: it is generated once, on first use, from a
//! fixed seed, so hashes are reproducible across runs.
//!
//! # Example
//!
//! ```
//! use checkers::board::{Board, Color, Move};
//! use checkers::search::zobrist;
//!
//! let zt = zobrist();
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board, Color::Red);
//!
//! // Move a red piece from 53 to 44
//! let mv = Move::new(53, 44);
//! board.red.toggle(mv.src);
//! board.red.toggle(mv.dst);
//!
//! // Incremental update is equivalent to full recomputation
//! let hash2 = zt.update_move(hash1, mv, Color::Red);
//! assert_eq!(hash2, zt.hash(&board, Color::Green));
//! ```

use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Color, Move, TOTAL_CELLS};

/// Seed for the process-wide key table
const ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

static ZOBRIST: OnceLock<ZobristTable> = OnceLock::new();

/// Process-wide Zobrist key table, built on first use.
#[inline]
pub fn zobrist() -> &'static ZobristTable {
    ZOBRIST.get_or_init(|| ZobristTable::with_seed(ZOBRIST_SEED))
}

/// Zobrist hash table for position hashing.
///
/// Holds one random key per (cell, color) pair plus one key XORed in when
/// Green is to move.
pub struct ZobristTable {
    /// Random values per color per cell: [color][cell]
    pieces: [[u64; TOTAL_CELLS]; 2],
    /// Random value XORed when green is to move
    side: u64,
}

impl ZobristTable {
    /// Create a key table from a seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let mut pieces = [[0u64; TOTAL_CELLS]; 2];
        for color in pieces.iter_mut() {
            for key in color.iter_mut() {
                *key = rng.random();
            }
        }

        Self {
            pieces,
            side: rng.random(),
        }
    }

    /// Key for a piece of `color` on `cell`
    #[inline]
    #[must_use]
    pub fn piece(&self, cell: u8, color: Color) -> u64 {
        self.pieces[color.index()][cell as usize]
    }

    /// Side-to-move key
    #[inline]
    #[must_use]
    pub fn side(&self) -> u64 {
        self.side
    }

    /// Compute the full hash for a board position.
    ///
    /// Iterates over every piece; during search use `update_move` instead.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Color) -> u64 {
        let mut h = 0u64;

        for cell in board.red {
            h ^= self.piece(cell, Color::Red);
        }

        for cell in board.green {
            h ^= self.piece(cell, Color::Green);
        }

        if side_to_move == Color::Green {
            h ^= self.side;
        }

        h
    }

    /// Incrementally update a hash for `mv` played by `color`.
    ///
    /// Also toggles the side-to-move component. XOR is its own inverse, so
    /// the same call undoes the move.
    #[inline]
    #[must_use]
    pub fn update_move(&self, hash: u64, mv: Move, color: Color) -> u64 {
        hash ^ self.piece(mv.src, color) ^ self.piece(mv.dst, color) ^ self.side
    }

    /// Toggle the side-to-move component of the hash.
    ///
    /// Used for null move pruning where the side changes without a move.
    #[inline]
    #[must_use]
    pub fn toggle_side(&self, hash: u64) -> u64 {
        hash ^ self.side
    }
}

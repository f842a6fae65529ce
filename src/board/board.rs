//! Board structure: two disjoint occupancy sets

use super::bitboard::Bitboard;
use super::{Color, INITIAL_GREEN, INITIAL_RED};

/// Game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Red pieces bitboard
    pub red: Bitboard,
    /// Green pieces bitboard
    pub green: Bitboard,
}

impl Board {
    /// Board with no pieces
    pub const fn empty() -> Self {
        Self {
            red: Bitboard(0),
            green: Bitboard(0),
        }
    }

    /// Starting position: each side fills its home corner
    pub const fn new() -> Self {
        Self {
            red: Bitboard(INITIAL_RED),
            green: Bitboard(INITIAL_GREEN),
        }
    }

    /// Get the piece at a cell
    #[inline]
    pub fn get(&self, cell: u8) -> Option<Color> {
        if self.red.contains(cell) {
            Some(Color::Red)
        } else if self.green.contains(cell) {
            Some(Color::Green)
        } else {
            None
        }
    }

    /// Check if a cell is empty
    #[inline]
    pub fn is_empty(&self, cell: u8) -> bool {
        !self.occupied().contains(cell)
    }

    /// Cells holding any piece
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.red | self.green
    }

    /// Playable cells holding no piece
    #[inline]
    pub fn vacant(&self) -> Bitboard {
        !self.occupied()
    }

    /// Get the bitboard for a color
    #[inline]
    pub fn pieces(&self, color: Color) -> Bitboard {
        match color {
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    #[inline]
    pub fn pieces_mut(&mut self, color: Color) -> &mut Bitboard {
        match color {
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        }
    }

    /// Place a piece (no legality checks)
    #[inline]
    pub fn place(&mut self, cell: u8, color: Color) {
        self.pieces_mut(color).set(cell);
    }

    /// Remove whatever piece is on a cell
    #[inline]
    pub fn remove(&mut self, cell: u8) {
        self.red.clear(cell);
        self.green.clear(cell);
    }

    /// Total pieces on board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.red.count() + self.green.count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

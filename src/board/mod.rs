//! Board representation for Chinese checkers

pub mod bitboard;
pub mod board;
pub mod geometry;
pub mod notation;


use std::fmt;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;
pub use notation::PositionError;

/// Board side length (9x9 rhombus)
pub const BOARD_SIZE: usize = 9;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 81

/// Every playable cell (low 81 bits)
pub const BOARD_MASK: u128 = (1u128 << TOTAL_CELLS) - 1;

/// Red's home corner, also Green's goal
pub const INITIAL_RED: u128 = (0x1e0e0u128 << 64) | 0x6020_0000_0000_0000;

/// Green's home corner, also Red's goal
pub const INITIAL_GREEN: u128 = 0x80c_0e0f;

/// Piece colors. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Green,
            Color::Green => Color::Red,
        }
    }

    /// Dense index for table lookups
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
        }
    }

    /// Character used in the position text format
    #[inline]
    pub fn code(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
        }
    }

    /// Starting cells of this color
    #[inline]
    pub fn home(self) -> Bitboard {
        match self {
            Color::Red => Bitboard(INITIAL_RED),
            Color::Green => Bitboard(INITIAL_GREEN),
        }
    }

    /// Cells this color must fill to win (the opponent's home)
    #[inline]
    pub fn goal(self) -> Bitboard {
        self.opponent().home()
    }
}

/// A move from one cell to another.
///
/// Only the endpoints are recorded; the jump path is re-derived whenever
/// legality matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: u8,
    pub dst: u8,
}

impl Move {
    #[inline]
    pub const fn new(src: u8, dst: u8) -> Self {
        Self { src, dst }
    }

    /// Both endpoints are on the board
    #[inline]
    pub fn in_range(self) -> bool {
        (self.src as usize) < TOTAL_CELLS && (self.dst as usize) < TOTAL_CELLS
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}->{:02}", self.src, self.dst)
    }
}

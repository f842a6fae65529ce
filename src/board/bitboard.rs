//! Bitboard implementation over a native 128-bit integer

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::{BOARD_MASK, TOTAL_CELLS};

/// Set of board cells, one bit per cell.
/// Cell 0 is the least-significant bit; only the low 81 bits are ever used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u128);

impl Bitboard {
    /// Empty set
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Every playable cell
    pub const FULL: Bitboard = Bitboard(BOARD_MASK);

    /// Create empty bitboard
    pub const fn new() -> Self {
        Self(0)
    }

    /// Bitboard holding a single cell
    #[inline]
    pub const fn from_cell(cell: u8) -> Self {
        Self(1u128 << cell)
    }

    /// Build a bitboard from a list of cells
    pub fn from_cells(cells: &[u8]) -> Self {
        cells.iter().fold(Self::EMPTY, |bb, &c| bb | Self::from_cell(c))
    }

    #[inline]
    pub fn set(&mut self, cell: u8) {
        self.0 |= 1u128 << cell;
    }

    #[inline]
    pub fn clear(&mut self, cell: u8) {
        self.0 &= !(1u128 << cell);
    }

    /// Flip a single cell
    #[inline]
    pub fn toggle(&mut self, cell: u8) {
        self.0 ^= 1u128 << cell;
    }

    /// Check if a cell is in the set
    #[inline]
    pub const fn contains(self, cell: u8) -> bool {
        (cell as usize) < TOTAL_CELLS && (self.0 >> cell) & 1 == 1
    }

    /// Count set bits (popcount)
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest set cell, if any
    #[inline]
    pub const fn first(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Iterate over set cells in ascending order
    #[inline]
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.0 }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u128,
}

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let cell = self.bits.trailing_zeros() as u8;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = u8;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        self.iter_ones()
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

/// Complement within the playable area
impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & BOARD_MASK)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

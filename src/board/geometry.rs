//! Precomputed board geometry
//!
//! Cells are laid out as `9 * row + col` on a rhombus of the hexagonal grid.
//! Each cell touches up to six neighbors; the pattern of which neighbors are
//! occupied selects a precomputed jump-landing mask.
//!
//! All tables are built at compile time.

use super::{Bitboard, BOARD_SIZE, TOTAL_CELLS};

/// Neighbor directions as (row, col) deltas, in pattern-bit order.
/// Index offsets: -9, -8, -1, +1, +8, +9.
pub const DIRECTIONS: [(i8, i8); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Number of distinct occupied-neighbor patterns
pub const PATTERNS: usize = 1 << DIRECTIONS.len();

/// Marker for "off the board" in the neighbor tables
pub const NO_CELL: u8 = u8::MAX;

/// Cell one step away in each direction
pub const NEIGHBORS: [[u8; 6]; TOTAL_CELLS] = build_rays(1);

/// Cell two steps away in each direction (landing cell of a jump)
pub const LANDINGS: [[u8; 6]; TOTAL_CELLS] = build_rays(2);

/// Adjacency mask per cell
pub const ADJACENT: [u128; TOTAL_CELLS] = build_adjacent();

/// Jump-landing mask per cell, indexed by occupied-neighbor pattern
pub const JUMPS: [[u128; PATTERNS]; TOTAL_CELLS] = build_jumps();

/// Steps from cell 0; Green travels up this gradient and Red down it.
pub const DISTANCES: [i32; TOTAL_CELLS] = build_distances();

const fn build_rays(steps: i8) -> [[u8; 6]; TOTAL_CELLS] {
    let mut table = [[NO_CELL; 6]; TOTAL_CELLS];
    let size = BOARD_SIZE as i8;
    let mut cell = 0;
    while cell < TOTAL_CELLS {
        let row = (cell / BOARD_SIZE) as i8;
        let col = (cell % BOARD_SIZE) as i8;
        let mut d = 0;
        while d < DIRECTIONS.len() {
            let r = row + DIRECTIONS[d].0 * steps;
            let c = col + DIRECTIONS[d].1 * steps;
            if r >= 0 && r < size && c >= 0 && c < size {
                table[cell][d] = (r as usize * BOARD_SIZE + c as usize) as u8;
            }
            d += 1;
        }
        cell += 1;
    }
    table
}

const fn build_adjacent() -> [u128; TOTAL_CELLS] {
    let mut table = [0u128; TOTAL_CELLS];
    let mut cell = 0;
    while cell < TOTAL_CELLS {
        let mut d = 0;
        while d < DIRECTIONS.len() {
            let n = NEIGHBORS[cell][d];
            if n != NO_CELL {
                table[cell] |= 1u128 << n;
            }
            d += 1;
        }
        cell += 1;
    }
    table
}

const fn build_jumps() -> [[u128; PATTERNS]; TOTAL_CELLS] {
    let mut table = [[0u128; PATTERNS]; TOTAL_CELLS];
    let mut cell = 0;
    while cell < TOTAL_CELLS {
        let mut pattern = 0;
        while pattern < PATTERNS {
            let mut mask = 0u128;
            let mut d = 0;
            while d < DIRECTIONS.len() {
                let landing = LANDINGS[cell][d];
                if pattern & (1 << d) != 0 && landing != NO_CELL {
                    mask |= 1u128 << landing;
                }
                d += 1;
            }
            table[cell][pattern] = mask;
            pattern += 1;
        }
        cell += 1;
    }
    table
}

const fn build_distances() -> [i32; TOTAL_CELLS] {
    let mut table = [0i32; TOTAL_CELLS];
    let mut cell = 0;
    while cell < TOTAL_CELLS {
        table[cell] = (cell / BOARD_SIZE + cell % BOARD_SIZE) as i32;
        cell += 1;
    }
    table
}

/// Adjacency set of a cell
#[inline]
pub fn adjacent(cell: u8) -> Bitboard {
    Bitboard(ADJACENT[cell as usize])
}

/// Compact encoding of which neighbors of `cell` are occupied.
/// Bit `d` is set when the neighbor in `DIRECTIONS[d]` holds a piece.
#[inline]
pub fn neighbor_pattern(cell: u8, occupied: Bitboard) -> usize {
    NEIGHBORS[cell as usize]
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n != NO_CELL && occupied.contains(n))
        .fold(0, |pattern, (d, _)| pattern | (1 << d))
}

/// Cells reachable by a single jump from `cell`, before filtering out
/// occupied landings.
#[inline]
pub fn jump_landings(cell: u8, occupied: Bitboard) -> Bitboard {
    Bitboard(JUMPS[cell as usize][neighbor_pattern(cell, occupied)])
}

/// Distance of a cell from cell 0
#[inline]
pub fn distance(cell: u8) -> i32 {
    DISTANCES[cell as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_two_neighbors() {
        assert_eq!(adjacent(0), Bitboard::from_cells(&[1, 9]));
        assert_eq!(adjacent(80), Bitboard::from_cells(&[71, 79]));
    }

    #[test]
    fn test_center_has_six_neighbors() {
        assert_eq!(adjacent(40), Bitboard::from_cells(&[31, 32, 39, 41, 48, 49]));
    }

    #[test]
    fn test_no_wrap_around_edges() {
        // Cell 8 is the end of row 0; cell 9 starts row 1 and is not adjacent
        assert!(!adjacent(8).contains(9));
        assert!(adjacent(8).contains(16));
        assert!(adjacent(8).contains(17));
    }

    #[test]
    fn test_adjacency_symmetric() {
        for a in 0..TOTAL_CELLS as u8 {
            for b in adjacent(a) {
                assert!(adjacent(b).contains(a), "{a} -> {b} not symmetric");
            }
        }
    }

    #[test]
    fn test_full_pattern_landings() {
        let landings = Bitboard(JUMPS[40][PATTERNS - 1]);
        assert_eq!(landings, Bitboard::from_cells(&[22, 24, 38, 42, 56, 58]));
        assert_eq!(JUMPS[40][0], 0);
    }

    #[test]
    fn test_jump_off_board_is_dropped() {
        // Cell 1 jumping over cell 0 would leave the board
        let occupied = Bitboard::from_cell(0);
        assert!(jump_landings(1, occupied).is_empty());
        // Jumping over 2 lands on 3
        let occupied = Bitboard::from_cell(2);
        assert_eq!(jump_landings(1, occupied), Bitboard::from_cell(3));
    }

    #[test]
    fn test_neighbor_pattern_bits() {
        let occupied = Bitboard::from_cells(&[31, 49]);
        // 31 is direction 0 (-9), 49 is direction 5 (+9)
        assert_eq!(neighbor_pattern(40, occupied), 0b100001);
    }

    #[test]
    fn test_distances() {
        assert_eq!(distance(0), 0);
        assert_eq!(distance(40), 8);
        assert_eq!(distance(80), 16);
    }
}

//! Score constants and positional weights

use crate::board::TOTAL_CELLS;

/// Score bounds and special values
pub struct Score;

impl Score {
    /// A side has filled its goal corner. Far above any heuristic score.
    pub const WIN: i32 = 99_999;

    /// Upper search bound
    pub const MAX: i32 = i32::MAX;

    /// Lower search bound; the exact negation of `MAX`
    pub const MIN: i32 = -i32::MAX;

    /// Search aborted on deadline. Outside `MIN..=MAX`, never negated, never
    /// stored in the transposition table.
    pub const NAN: i32 = i32::MIN;

    /// Check for a terminal (win or loss) score
    #[inline]
    pub fn is_decisive(score: i32) -> bool {
        score != Self::NAN && score.abs() >= Self::WIN
    }
}

/// Multiplier for the positional term; mobility counts 1 per move
pub const POSITION_WEIGHT: i32 = 3;

/// Positional value of each cell for Green, rising toward Red's corner.
/// Red reads the table mirrored (`80 - cell`).
#[rustfmt::skip]
pub const SCORE_TABLE: [i32; TOTAL_CELLS] = [
     0,  4,  5, 12,  0,  0, 10, 10, 10,
     4,  6, 13, 16, 20, 21, 14, 11, 10,
     5, 13, 17, 21, 22, 24, 23, 20, 12,
    12, 16, 21, 23, 25, 26, 28, 27, 20,
     0, 20, 22, 25, 27, 29, 30, 32, 31,
     0, 21, 24, 26, 29, 31, 33, 34, 36,
    10, 14, 23, 28, 30, 33, 35, 36, 38,
    10, 11, 20, 27, 32, 34, 36, 38, 40,
    10, 10, 12, 20, 31, 36, 38, 40, 42,
];

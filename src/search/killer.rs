//! Killer moves: quiet moves that caused a beta cutoff at the same depth
//! elsewhere in the tree. Tried right after the transposition table move.

use crate::board::Move;

/// Deepest remaining depth the search tracks per-depth state for
pub const MAX_DEPTH: usize = 32;

/// Two killer slots for each remaining depth in `0..=MAX_DEPTH`
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_DEPTH + 1],
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_DEPTH + 1],
        }
    }

    /// Remember a cutoff move. The previous primary killer moves to the
    /// second slot unless it is the same move.
    pub fn record(&mut self, depth: i8, mv: Move) {
        let Some(slot) = self.slot_mut(depth) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    /// Killers for a depth, primary first. Callers must re-validate them
    /// against the current position.
    #[must_use]
    pub fn killers(&self, depth: i8) -> [Option<Move>; 2] {
        usize::try_from(depth)
            .ok()
            .and_then(|d| self.slots.get(d))
            .copied()
            .unwrap_or([None; 2])
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_DEPTH + 1];
    }

    fn slot_mut(&mut self, depth: i8) -> Option<&mut [Option<Move>; 2]> {
        usize::try_from(depth).ok().and_then(|d| self.slots.get_mut(d))
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

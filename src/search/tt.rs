//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by position hash,
//! enabling reuse of previous search results for positions we've seen before.
//!
//! # Example
//!
//! ```
//! use checkers::board::Move;
//! use checkers::search::{TranspositionTable, EntryType};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x123456789ABCDEF0;
//! tt.store(hash, 5, 100, EntryType::Exact, Some(Move::new(53, 44)));
//!
//! if let Some(entry) = tt.probe(hash, 5, -1000, 1000) {
//!     println!("Found cached result: score={}, move={:?}", entry.value, entry.best_move);
//! }
//! ```

use crate::board::Move;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed normally
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth this entry was computed at
    pub depth: i8,
    /// Search value
    pub value: i32,
    /// How `value` bounds the true score
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Whether the stored value settles a search with window `(alpha, beta)`.
    #[inline]
    fn cuts_off(&self, alpha: i32, beta: i32) -> bool {
        match self.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => self.value >= beta,
            EntryType::UpperBound => self.value <= alpha,
        }
    }
}

/// Transposition table for caching search results.
///
/// Direct-mapped: each hash maps to exactly one slot (`hash & (size - 1)`),
/// with no chaining. Collisions are resolved by the replacement policy in
/// [`TranspositionTable::store`].
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a new transposition table of roughly `size_mb` megabytes.
    ///
    /// The slot count is the largest power of two that fits, and at least
    /// 1024.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let fits = (size_mb * 1024 * 1024) / entry_size;
        let size = if fits < 1024 {
            1024
        } else {
            // Round down to a power of two
            1usize << (usize::BITS - 1 - fits.leading_zeros())
        };
        Self::with_slots(size)
    }

    /// Create a table with exactly `slots` entries (a power of two).
    #[must_use]
    pub fn with_slots(slots: usize) -> Self {
        assert!(slots.is_power_of_two(), "slot count must be a power of two");
        Self {
            entries: vec![None; slots],
            mask: slots - 1,
        }
    }

    /// Number of slots
    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Probe the table for a position.
    ///
    /// Returns the entry only if it belongs to `hash`, was searched at least
    /// `depth` deep, and its bound settles the `(alpha, beta)` window. A
    /// shallower entry never produces a cutoff; use
    /// [`TranspositionTable::best_move`] to reuse its move for ordering.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32) -> Option<TTEntry> {
        let entry = self.entries[self.index(hash)]?;

        if entry.hash != hash || entry.depth < depth {
            return None;
        }

        entry.cuts_off(alpha, beta).then_some(entry)
    }

    /// Get the stored best move for move ordering, at any depth.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.entries[self.index(hash)]
            .filter(|e| e.hash == hash)
            .and_then(|e| e.best_move)
    }

    /// Store a position in the table.
    ///
    /// An entry for a different position is always evicted. An entry for the
    /// same position is only overwritten by a search at least as deep.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        value: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);

        if let Some(e) = &self.entries[idx] {
            if e.hash == hash && e.depth > depth {
                return;
            }
        }

        self.entries[idx] = Some(TTEntry {
            hash,
            depth,
            value,
            entry_type,
            best_move,
        });
    }

    /// Clear all entries in the table.
    ///
    /// Called at the start of every AI move request.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size(),
            used,
            usage_percent: (used as f64 / self.size() as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

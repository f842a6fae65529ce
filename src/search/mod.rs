//! Search module for the checkers AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Killer-move table for move ordering
//! - Negamax alpha-beta search and the MTD(f) driver

pub mod alphabeta;
pub mod killer;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, SearchStrategy, Searcher, NULL_MOVE_R};
pub use killer::{KillerTable, MAX_DEPTH};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::{zobrist, ZobristTable};

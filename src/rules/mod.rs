//! Game rules for Chinese checkers
//!
//! This module implements the rule set:
//! - Move generation (steps and chained jumps)
//! - Static move ordering by forward progress
//! - Win conditions (filling the opponent's home corner)

pub mod movegen;
pub mod win;

// Re-exports for convenient access
pub use movegen::{
    count_forward_moves, destinations, generate, generate_into, jump_closure, progress,
    sort_moves, SORT_BUCKETS,
};
pub use win::{check_winner, has_won};

//! Evaluation module for board positions
//!
//! The evaluation considers:
//! - Win/loss detection
//! - Positional table (cells closer to the goal score higher)
//! - Forward mobility

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, evaluate_board, positional_score};
pub use weights::{Score, POSITION_WEIGHT, SCORE_TABLE};

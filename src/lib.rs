//! Chinese checkers AI engine
//!
//! An engine for two-player Chinese checkers on an 81-cell rhombus of a
//! hexagonal grid:
//! - Each side starts with 10 pieces in its home corner
//! - A move is a single step to an adjacent empty cell, or any chain of
//!   hops over adjacent pieces onto empty cells
//! - The first side to fill the opponent's home corner wins
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Bitboards, board geometry and the position text format
//! - [`game`]: Game state with incremental hashing and move validation
//! - [`rules`]: Move generation, move ordering and win detection
//! - [`eval`]: Position evaluation
//! - [`search`]: Transposition table, killer moves, alpha-beta and MTD(f)
//! - [`engine`]: Iterative deepening under a time budget
//!
//! # Quick Start
//!
//! ```
//! use checkers::{AIEngine, GameState};
//!
//! let mut game = GameState::new();
//! let mut engine = AIEngine::new();
//! engine.set_max_depth(3);
//!
//! // AI plays Red's opening move
//! let mv = engine.get_move(&game).unwrap();
//! game.try_apply_move(mv).unwrap();
//! println!("{game}");
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Bitboard, Board, Color, Move, PositionError, BOARD_SIZE, TOTAL_CELLS};
pub use engine::{AIEngine, EngineConfig, EngineError, MoveResult};
pub use game::{GameState, MoveError};
pub use search::SearchStrategy;

//! Main AI engine driving the search
//!
//! The engine runs iterative deepening over [`Searcher`]: depth 1, 2, ... up
//! to the configured maximum, under a wall-clock budget. It keeps the best
//! move of the deepest depth that completed and stops early once a forced
//! result is found.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use checkers::{AIEngine, EngineConfig, GameState};
//!
//! // Use smaller depth for faster example
//! let mut engine = AIEngine::with_config(EngineConfig {
//!     tt_size_mb: 4,
//!     max_depth: 3,
//!     time_limit: Duration::from_millis(500),
//!     ..EngineConfig::default()
//! });
//! let mut game = GameState::new();
//!
//! let result = engine.get_move_with_stats(&game).unwrap();
//! println!("Best move: {} (depth {}, {}ms)", result.best_move, result.depth, result.time_ms);
//! game.try_apply_move(result.best_move).unwrap();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use thiserror::Error;

use crate::board::Move;
use crate::eval::{evaluate, Score};
use crate::game::GameState;
use crate::rules::{progress, sort_moves};
use crate::search::{SearchStats, SearchStrategy, Searcher, TTStats, MAX_DEPTH, NULL_MOVE_R};

/// Reasons the engine refuses to produce a move
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("the game is already over")]
    GameOver,

    #[error("the side to move has no legal move")]
    NoLegalMoves,

    #[error("a search is already in progress")]
    SearchInProgress,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table size in megabytes
    pub tt_size_mb: usize,
    /// Deepest iteration; clamped to `1..=MAX_DEPTH`
    pub max_depth: i8,
    /// Wall-clock budget per move
    pub time_limit: Duration,
    /// Null-move reduction `R`; `None` disables null-move pruning
    pub null_move_reduction: Option<i8>,
    pub strategy: SearchStrategy,
}

impl Default for EngineConfig {
    /// Default configuration:
    /// - 64 MB transposition table
    /// - Maximum depth of 16
    /// - 2000ms time limit
    /// - Null-move reduction of 3, full-window alpha-beta
    fn default() -> Self {
        Self {
            tt_size_mb: 64,
            max_depth: 16,
            time_limit: Duration::from_millis(2000),
            null_move_reduction: Some(NULL_MOVE_R),
            strategy: SearchStrategy::AlphaBeta,
        }
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Move to play
    pub best_move: Move,
    /// Value of the position for the side to move, from the deepest
    /// completed depth (static evaluation if none completed)
    pub score: i32,
    /// Deepest completed depth; 0 when the budget ran out during depth 1
    pub depth: i8,
    pub strategy: SearchStrategy,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    pub stats: SearchStats,
}

/// Clears the search flag when the search ends, however it ends.
struct SearchGuard<'a>(&'a AtomicBool);

impl<'a> SearchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, EngineError> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(EngineError::SearchInProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Main AI engine.
///
/// # Configuration
///
/// The engine can be configured with:
/// - Transposition table size (memory usage)
/// - Maximum search depth
/// - Time limit per move
/// - Null-move reduction and search strategy
///
/// # Example
///
/// ```
/// use checkers::{AIEngine, GameState};
///
/// let mut engine = AIEngine::new();
/// engine.set_max_depth(2);
///
/// let game = GameState::new();
/// let mv = engine.get_move(&game).unwrap();
/// assert!(game.is_move_valid(mv));
/// ```
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
    /// Set while a search runs; shared with front ends on other threads
    searching: Arc<AtomicBool>,
}

impl AIEngine {
    /// Create a new AI engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an AI engine with custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let mut searcher = Searcher::new(config.tt_size_mb);
        searcher.set_null_move_reduction(config.null_move_reduction);
        let mut engine = Self {
            searcher,
            config,
            searching: Arc::new(AtomicBool::new(false)),
        };
        engine.set_max_depth(config.max_depth);
        engine
    }

    /// Get the best move for the side to move.
    ///
    /// Use `get_move_with_stats` if you need search statistics.
    pub fn get_move(&mut self, game: &GameState) -> Result<Move, EngineError> {
        self.get_move_with_stats(game).map(|result| result.best_move)
    }

    /// Get the best move with detailed search statistics.
    ///
    /// Fails if the game is over, the side to move cannot move, or another
    /// search holds the search flag.
    pub fn get_move_with_stats(&mut self, game: &GameState) -> Result<MoveResult, EngineError> {
        let flag = Arc::clone(&self.searching);
        let _guard = SearchGuard::acquire(&flag)?;

        if game.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        let fallback = fallback_move(game).ok_or(EngineError::NoLegalMoves)?;

        let result = self.iterate(game, fallback);
        info!(
            "{:?} plays {} (depth {}, score {}, {} nodes, {}ms)",
            game.turn(),
            result.best_move,
            result.depth,
            result.score,
            result.nodes,
            result.time_ms
        );
        Ok(result)
    }

    /// Iterative deepening under the time budget.
    fn iterate(&mut self, game: &GameState, fallback: Move) -> MoveResult {
        let start = Instant::now();
        let deadline = start + self.config.time_limit;
        let strategy = self.config.strategy;

        self.searcher.new_search();
        self.searcher.set_deadline(Some(deadline));

        let mut work = game.clone();
        let mut best_move = fallback;
        let mut score = evaluate(game);
        let mut completed = 0;

        for depth in 1..=self.config.max_depth {
            let Some(result) = self.searcher.search_depth(&mut work, depth, strategy, score) else {
                trace!(
                    "depth {depth} aborted after {} nodes",
                    self.searcher.nodes()
                );
                break;
            };

            if let Some(mv) = result.best_move {
                best_move = mv;
            }
            score = result.score;
            completed = depth;
            debug!(
                "depth {depth}: score {score}, {} nodes, best {best_move}",
                result.nodes
            );

            if Score::is_decisive(score) || Instant::now() >= deadline {
                break;
            }
        }

        MoveResult {
            best_move,
            score,
            depth: completed,
            strategy,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: self.searcher.nodes(),
            stats: self.searcher.stats().clone(),
        }
    }

    /// Set the maximum search depth, clamped to `1..=MAX_DEPTH`.
    pub fn set_max_depth(&mut self, depth: i8) {
        self.config.max_depth = depth.clamp(1, MAX_DEPTH as i8);
    }

    /// Set the time limit for search in milliseconds.
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.config.time_limit = Duration::from_millis(time_ms);
    }

    pub fn set_strategy(&mut self, strategy: SearchStrategy) {
        self.config.strategy = strategy;
    }

    pub fn set_null_move_reduction(&mut self, reduction: Option<i8>) {
        self.config.null_move_reduction = reduction;
        self.searcher.set_null_move_reduction(reduction);
    }

    /// Clear the transposition table cache.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Get the current maximum search depth.
    #[must_use]
    pub fn max_depth(&self) -> i8 {
        self.config.max_depth
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }

    /// Shared handle to the search flag, set while a search runs.
    ///
    /// A front end can poll it from another thread; setting it from outside
    /// makes the next request fail with [`EngineError::SearchInProgress`].
    #[must_use]
    pub fn search_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.searching)
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::Acquire)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Move played when no depth completes: the first move in static order that
/// is not a long retreat, or failing that the first legal move.
fn fallback_move(game: &GameState) -> Option<Move> {
    let color = game.turn();
    let mut moves = game.legal_moves();
    sort_moves(&mut moves, color);
    moves
        .iter()
        .find(|&&mv| progress(color, mv) >= -1)
        .or_else(|| moves.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, Board, Color};

    const MIDGAME: &str = "222200000/222000000/220000000/020000000/000000000/\
                           000000011/000000011/000000110/000001111 g 2";

    fn quick_engine(max_depth: i8) -> AIEngine {
        AIEngine::with_config(EngineConfig {
            tt_size_mb: 4,
            max_depth,
            time_limit: Duration::from_secs(30),
            ..EngineConfig::default()
        })
    }

    fn win_in_one() -> GameState {
        let mut red: Vec<u8> = Color::Red.goal().iter_ones().filter(|&c| c != 27).collect();
        red.push(28);
        let board = Board {
            red: Bitboard::from_cells(&red),
            green: Bitboard::from_cells(&[40, 53, 61, 62, 69, 70, 71, 77, 78, 79]),
        };
        GameState::from_parts(board, Color::Red, 20)
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.max_depth(), 16);
        assert_eq!(engine.config().tt_size_mb, 64);
        assert_eq!(engine.config().time_limit, Duration::from_millis(2000));
        assert_eq!(engine.config().null_move_reduction, Some(3));
        assert!(!engine.is_searching());
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = quick_engine(8);
        let result = engine.get_move_with_stats(&win_in_one()).unwrap();
        assert_eq!(result.best_move, Move::new(28, 27));
        assert!(Score::is_decisive(result.score));
        // Stops deepening once the win is proven
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_engine_mtdf_agrees_with_alphabeta() {
        let game: GameState = MIDGAME.parse().unwrap();

        let mut engine = quick_engine(2);
        engine.set_null_move_reduction(None);
        let full = engine.get_move_with_stats(&game).unwrap();

        engine.set_strategy(SearchStrategy::Mtdf);
        let mtdf = engine.get_move_with_stats(&game).unwrap();

        assert_eq!(mtdf.strategy, SearchStrategy::Mtdf);
        assert_eq!(mtdf.depth, 2);
        assert_eq!(mtdf.score, full.score);
        assert!(game.is_move_valid(mtdf.best_move));
    }

    #[test]
    fn test_engine_mtdf_finds_immediate_win() {
        let mut engine = quick_engine(4);
        engine.set_strategy(SearchStrategy::Mtdf);
        let result = engine.get_move_with_stats(&win_in_one()).unwrap();
        assert_eq!(result.best_move, Move::new(28, 27));
        assert_eq!(result.score, Score::WIN);
        assert_eq!(result.depth, 1);
        // The guess starts near the static evaluation, far below the win
        assert!(result.nodes < 5_000, "{} nodes", result.nodes);
    }

    #[test]
    fn test_engine_searches_at_last_round() {
        let text = format!(
            "222200000/222000000/220000000/200000000/000000000/\
             000000001/000000011/000000111/000001111 g {}",
            u32::MAX
        );
        let game: GameState = text.parse().unwrap();
        let mut engine = quick_engine(2);
        let mv = engine.get_move(&game).unwrap();
        assert!(game.is_move_valid(mv));
    }

    #[test]
    fn test_engine_returns_legal_move() {
        let mut engine = quick_engine(3);
        let mut game: GameState = MIDGAME.parse().unwrap();
        let result = engine.get_move_with_stats(&game).unwrap();
        assert_eq!(result.depth, 3);
        assert!(result.nodes > 0);
        assert!(game.try_apply_move(result.best_move).is_ok());
    }

    #[test]
    fn test_engine_game_over() {
        let board = Board {
            red: Color::Red.goal(),
            green: Bitboard::from_cells(&[40]),
        };
        let game = GameState::from_parts(board, Color::Green, 30);
        let mut engine = quick_engine(2);
        assert_eq!(engine.get_move(&game), Err(EngineError::GameOver));
        assert!(!engine.is_searching());
    }

    #[test]
    fn test_engine_no_legal_moves() {
        let board = Board {
            red: Bitboard::from_cells(&[0]),
            green: Bitboard::from_cells(&[1, 9, 2, 18]),
        };
        let game = GameState::from_parts(board, Color::Red, 1);
        let mut engine = quick_engine(2);
        assert_eq!(engine.get_move(&game), Err(EngineError::NoLegalMoves));
    }

    #[test]
    fn test_engine_search_in_progress() {
        let mut engine = quick_engine(2);
        let flag = engine.search_flag();
        let game = GameState::new();

        flag.store(true, Ordering::Release);
        assert_eq!(engine.get_move(&game), Err(EngineError::SearchInProgress));
        // A refused request leaves the other holder's flag alone
        assert!(engine.is_searching());

        flag.store(false, Ordering::Release);
        assert!(engine.get_move(&game).is_ok());
        assert!(!flag.load(Ordering::Acquire));
    }

    #[test]
    fn test_engine_zero_budget_uses_fallback() {
        let mut engine = quick_engine(8);
        engine.set_time_limit(0);
        let game = GameState::new();

        let result = engine.get_move_with_stats(&game).unwrap();
        assert_eq!(result.depth, 0);
        assert_eq!(result.score, evaluate(&game));

        let mut moves = game.legal_moves();
        sort_moves(&mut moves, Color::Red);
        let expected = moves
            .into_iter()
            .find(|&mv| progress(Color::Red, mv) >= -1)
            .unwrap();
        assert_eq!(result.best_move, expected);
    }

    #[test]
    fn test_engine_time_reasonable() {
        let mut engine = AIEngine::with_config(EngineConfig {
            tt_size_mb: 4,
            max_depth: MAX_DEPTH as i8,
            time_limit: Duration::from_millis(100),
            ..EngineConfig::default()
        });
        let game = GameState::new();

        let start = Instant::now();
        let mv = engine.get_move(&game).unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(game.is_move_valid(mv));
    }

    #[test]
    fn test_engine_set_depth() {
        let mut engine = AIEngine::new();
        engine.set_max_depth(8);
        assert_eq!(engine.max_depth(), 8);
        engine.set_max_depth(100);
        assert_eq!(engine.max_depth(), MAX_DEPTH as i8);
        engine.set_max_depth(0);
        assert_eq!(engine.max_depth(), 1);
    }

    #[test]
    fn test_engine_set_time_limit() {
        let mut engine = AIEngine::new();
        engine.set_time_limit(750);
        assert_eq!(engine.config().time_limit, Duration::from_millis(750));
    }

    #[test]
    fn test_engine_clear_cache() {
        let mut engine = quick_engine(3);
        engine.get_move(&GameState::new()).unwrap();
        assert!(engine.tt_stats().used > 0);
        engine.clear_cache();
        assert_eq!(engine.tt_stats().used, 0);
    }

    #[test]
    fn test_engine_alternating_colors() {
        let mut engine = quick_engine(2);
        let mut game = GameState::new();
        for _ in 0..6 {
            let mv = engine.get_move(&game).unwrap();
            game.try_apply_move(mv).unwrap();
        }
        assert_eq!(game.turn(), Color::Red);
        assert_eq!(game.round(), 4);
    }
}

//! Negamax alpha-beta search with transposition table
//!
//! One fixed-depth search per call; the iterative-deepening loop and time
//! budget live in [`crate::engine`]. The searcher owns every table the
//! recursion touches, so a search needs `&mut Searcher` and cannot run twice
//! at once.
//!
//! # Features
//!
//! - Fail-hard negamax with principal-variation (null-window) re-search
//! - Null-move forward pruning
//! - Move ordering: TT move, killer moves, then static forward-progress order
//! - Cooperative abort on a deadline, reported as [`Score::NAN`]
//! - MTD(f) driver on top of the same null-window searches
//!
//! # Example
//!
//! ```
//! use checkers::GameState;
//! use checkers::search::{SearchStrategy, Searcher};
//!
//! let mut searcher = Searcher::new(1); // 1 MB transposition table
//! let mut game = GameState::new();
//!
//! let result = searcher
//!     .search_depth(&mut game, 2, SearchStrategy::AlphaBeta, 0)
//!     .expect("no deadline set");
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::time::Instant;

use crate::board::Move;
use crate::eval::{evaluate, Score};
use crate::game::GameState;
use crate::rules::{generate_into, progress, sort_moves};

use super::killer::{KillerTable, MAX_DEPTH};
use super::tt::{EntryType, TTStats, TranspositionTable};

/// Default null-move depth reduction
pub const NULL_MOVE_R: i8 = 3;

/// Backward moves worse than this are never searched
const MAX_RETREAT: i32 = -1;

/// How a single depth of the iterative deepening is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Full-window principal-variation search
    #[default]
    AlphaBeta,
    /// Sequence of null-window searches converging on the value, seeded with
    /// the previous depth's score
    Mtdf,
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Nodes cut by the null-move test
    pub null_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score (exact/bound hit)
    pub tt_score_hits: u64,
    /// Nodes where the TT supplied a legal move for ordering
    pub tt_move_hits: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    /// TT score hit rate in percent
    pub fn tt_score_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_score_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Result of one completed search depth.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any candidate raised alpha
    pub best_move: Option<Move>,
    /// Value of the position for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: i8,
    /// Nodes visited since the last [`Searcher::new_search`]
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Search context threaded through the recursion.
///
/// Holds the transposition table, killer moves, one reusable move buffer per
/// remaining depth, the deadline and counters.
pub struct Searcher {
    tt: TranspositionTable,
    killers: KillerTable,
    /// `buffers[d]` is only used by the node at remaining depth `d`; depth
    /// strictly decreases along the recursion so no two live frames share one.
    buffers: Vec<Vec<Move>>,
    null_move_reduction: Option<i8>,
    deadline: Option<Instant>,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a new searcher with a transposition table of `tt_size_mb`
    /// megabytes and the default null-move reduction.
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_size_mb),
            killers: KillerTable::new(),
            buffers: (0..=MAX_DEPTH).map(|_| Vec::with_capacity(256)).collect(),
            null_move_reduction: Some(NULL_MOVE_R),
            deadline: None,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Set the null-move reduction `R`; `None` disables null-move pruning.
    pub fn set_null_move_reduction(&mut self, reduction: Option<i8>) {
        self.null_move_reduction = reduction;
    }

    /// Abort searches once `deadline` has passed. `None` searches to
    /// completion.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    /// Forget everything learned by previous searches: transposition table,
    /// killer moves and counters.
    pub fn new_search(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.nodes = 0;
        self.stats = SearchStats::default();
    }

    /// Nodes visited since the last [`Searcher::new_search`]
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search one depth from the root.
    ///
    /// `depth` is capped at [`MAX_DEPTH`]. `guess` seeds MTD(f) and is
    /// ignored by [`SearchStrategy::AlphaBeta`]. Returns `None` if the
    /// deadline passed before the depth completed.
    pub fn search_depth(
        &mut self,
        game: &mut GameState,
        depth: i8,
        strategy: SearchStrategy,
        guess: i32,
    ) -> Option<SearchResult> {
        let depth = depth.min(MAX_DEPTH as i8);
        let mut best_move = None;
        let score = match strategy {
            SearchStrategy::AlphaBeta => {
                self.negamax(game, depth, Score::MIN, Score::MAX, &mut best_move)
            }
            SearchStrategy::Mtdf => self.mtdf(game, depth, guess, &mut best_move),
        };

        if score == Score::NAN {
            return None;
        }

        Some(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        })
    }

    /// Fail-hard negamax over `(alpha, beta)` at `depth` remaining plies.
    ///
    /// Returns the value from the perspective of the side to move, or
    /// [`Score::NAN`] if the deadline passed. `best` receives the move that
    /// raised alpha or produced the cutoff, and is left untouched otherwise.
    /// `depth` must not exceed [`MAX_DEPTH`].
    pub fn negamax(
        &mut self,
        game: &mut GameState,
        depth: i8,
        alpha: i32,
        beta: i32,
        best: &mut Option<Move>,
    ) -> i32 {
        debug_assert!(depth <= MAX_DEPTH as i8, "depth {depth} above {MAX_DEPTH}");
        self.nodes += 1;
        let hash = game.hash();

        self.stats.tt_probes += 1;
        if let Some(entry) = self.tt.probe(hash, depth, alpha, beta) {
            self.stats.tt_score_hits += 1;
            if entry.entry_type != EntryType::UpperBound && entry.best_move.is_some() {
                *best = entry.best_move;
            }
            return entry.value;
        }

        if let Some(winner) = game.winner() {
            // Sooner wins keep more depth and score higher
            let win = Score::WIN + i32::from(depth.max(0));
            return if winner == game.turn() { win } else { -win };
        }

        if depth <= 0 {
            return evaluate(game);
        }

        if let Some(r) = self.null_move_reduction {
            let reduced = depth - 1 - r;
            if reduced >= 0 {
                game.apply_null_move();
                let score = self.child(game, reduced, -beta, -beta + 1);
                game.undo_null_move();
                match score {
                    None => return Score::NAN,
                    Some(s) if s >= beta => {
                        self.stats.null_cutoffs += 1;
                        return beta;
                    }
                    Some(_) => {}
                }
            }
        }

        let slot = depth as usize;
        let mut moves = self
            .buffers
            .get_mut(slot)
            .map(std::mem::take)
            .unwrap_or_default();

        self.order_moves(game, depth, &mut moves);
        let score = self.search_moves(game, depth, alpha, beta, &moves, best);

        if let Some(buffer) = self.buffers.get_mut(slot) {
            *buffer = moves;
        }
        score
    }

    /// MTD(f): repeated null-window searches narrowing the bounds around the
    /// minimax value, starting from `guess`.
    ///
    /// A fail-hard pass only moves a bound to the tested value, so while one
    /// side is still unbounded the test value gallops away from the known
    /// bound with a doubling step, and once both bounds are known it bisects.
    /// A value near `guess` costs a few passes; a distant one costs about
    /// twice the logarithm of the distance.
    /// Returns [`Score::NAN`] as soon as any inner search aborts.
    pub fn mtdf(
        &mut self,
        game: &mut GameState,
        depth: i8,
        guess: i32,
        best: &mut Option<Move>,
    ) -> i32 {
        let mut upper = Score::MAX;
        let mut lower = Score::MIN;
        let mut beta = guess.clamp(Score::MIN + 1, Score::MAX);
        let mut step: i32 = 1;

        loop {
            let mut found = None;
            let score = self.negamax(game, depth, beta - 1, beta, &mut found);
            if score == Score::NAN {
                return Score::NAN;
            }
            if found.is_some() {
                *best = found;
            }

            if score < beta {
                upper = score;
            } else {
                lower = score;
            }
            if lower >= upper {
                return score;
            }

            beta = if upper == Score::MAX {
                lower.saturating_add(step)
            } else if lower == Score::MIN {
                upper.saturating_sub(step - 1)
            } else {
                (i64::from(lower) + (i64::from(upper) - i64::from(lower) + 1) / 2) as i32
            };
            beta = beta.clamp(lower + 1, upper);
            step = step.saturating_mul(2);
        }
    }

    /// Search a child position and negate its value. `None` when aborted.
    #[inline]
    fn child(&mut self, game: &mut GameState, depth: i8, alpha: i32, beta: i32) -> Option<i32> {
        let mut unused = None;
        match self.negamax(game, depth, alpha, beta, &mut unused) {
            Score::NAN => None,
            score => Some(-score),
        }
    }

    /// Fill `moves` with the candidates of this node: the TT move, then the
    /// killers of this depth, then every other generated move in static
    /// order. Each legal move appears exactly once.
    fn order_moves(&mut self, game: &GameState, depth: i8, moves: &mut Vec<Move>) {
        moves.clear();

        if let Some(mv) = self.tt.best_move(game.hash()) {
            if game.is_move_valid(mv) {
                self.stats.tt_move_hits += 1;
                moves.push(mv);
            }
        }

        for mv in self.killers.killers(depth).into_iter().flatten() {
            if !moves.contains(&mv) && game.is_move_valid(mv) {
                moves.push(mv);
            }
        }

        let tried = moves.len();
        generate_into(game.board(), game.mover_pieces(), moves);
        if tried > 0 {
            let mut kept = tried;
            for i in tried..moves.len() {
                let mv = moves[i];
                if !moves[..tried].contains(&mv) {
                    moves[kept] = mv;
                    kept += 1;
                }
            }
            moves.truncate(kept);
        }
        sort_moves(&mut moves[tried..], game.turn());
    }

    fn search_moves(
        &mut self,
        game: &mut GameState,
        depth: i8,
        mut alpha: i32,
        beta: i32,
        moves: &[Move],
        best: &mut Option<Move>,
    ) -> i32 {
        let hash = game.hash();
        let color = game.turn();
        let mut entry_type = EntryType::UpperBound;
        let mut best_move = None;
        let mut searched = 0u32;

        for &mv in moves {
            if progress(color, mv) < MAX_RETREAT {
                continue;
            }

            game.apply_move(mv);
            let score = if searched == 0 {
                self.child(game, depth - 1, -beta, -alpha)
            } else {
                match self.child(game, depth - 1, -alpha - 1, -alpha) {
                    Some(s) if s > alpha && s < beta => {
                        self.child(game, depth - 1, -beta, -alpha)
                    }
                    other => other,
                }
            };
            game.undo_move(mv);

            let Some(score) = score else {
                return Score::NAN;
            };

            if score >= beta {
                self.stats.beta_cutoffs += 1;
                if searched == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                self.killers.record(depth, mv);
                self.tt.store(hash, depth, beta, EntryType::LowerBound, Some(mv));
                *best = Some(mv);
                return beta;
            }

            searched += 1;
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                entry_type = EntryType::Exact;
            }

            if self.out_of_time() {
                return Score::NAN;
            }
        }

        if searched == 0 {
            return evaluate(game);
        }

        self.tt.store(hash, depth, alpha, entry_type, best_move);
        if best_move.is_some() {
            *best = best_move;
        }
        alpha
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

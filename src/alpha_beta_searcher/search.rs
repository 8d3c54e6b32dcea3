//! Alpha-beta search algorithm implementation.
//!
//! # Core Algorithm
//!
//! Alpha-beta pruning is an optimization of minimax search that maintains a window [alpha, beta]
//! representing the range of scores that matter. Moves that fall outside this window can be
//! pruned without affecting the final result. The algorithm guarantees finding the same score as
//! minimax for a given move order, but explores fewer nodes.
//!
//! # Negamax
//!
//! The recursion is written in negamax form: every node scores the position from the point of
//! view of the player to move, and a parent negates its children's scores. The same code is then
//! correct for both sides, and the root always picks the move with the greatest score for the
//! player who is actually moving. `search` exposes the classic minimax view on top of it, with
//! scores on the evaluator's absolute scale.
//!
//! # Move Application
//!
//! Moves are applied to the state in place and undone after the child search returns, also when
//! the subtree is pruned, interrupted by the search limits, or fails with an error. A top-level
//! search therefore always leaves the state exactly as it found it.
//!
//! # Limits
//!
//! An optional time budget and node budget (`SearchLimits`) are checked every time a node is
//! entered. Once exhausted, every open node stops expanding siblings and the root returns the
//! best move among the root moves whose subtree was searched completely.

use std::cmp::max;
use std::time::{Duration, Instant};

use log::{debug, warn};
use thiserror::Error;

use super::limits::{Deadline, SearchLimits};
use super::{Evaluator, GameState, MoveCollection, Score};

/// Upper bound of the search window. Its negation is representable, unlike `Score::MIN`.
pub const INFINITY: Score = Score::MAX;

/// Score of being checkmated at the root. Far above any material balance; mates found at
/// greater ply are worth slightly less so that the shortest mate is preferred.
pub const MATE_SCORE: Score = 1_000_000;

pub const DRAW_SCORE: Score = 0;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("rules engine rejected a move it generated: {error}")]
    RulesViolation { error: String },
}

/// Statistics collected during search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub depth: u8,
    pub score: Option<Score>,
    pub duration: Option<Duration>,
    pub interrupted: bool,
}

pub struct SearchContext {
    depth: u8,
    limits: SearchLimits,
    deadline: Option<Deadline>,
    stopped: bool,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self::with_limits(depth, SearchLimits::none())
    }

    pub fn with_limits(depth: u8, limits: SearchLimits) -> Self {
        Self {
            depth,
            limits,
            deadline: None,
            stopped: false,
            stats: SearchStats::default(),
        }
    }

    /// The configured depth; anything below 1 is searched as 1.
    pub fn search_depth(&self) -> u8 {
        max(self.depth, 1)
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn searched_position_count(&self) -> u64 {
        self.stats.nodes
    }

    pub fn last_score(&self) -> Option<Score> {
        self.stats.score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.duration
    }

    /// True once the limits ran out during the current search.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats {
            depth: self.search_depth(),
            ..SearchStats::default()
        };
        self.stopped = false;
    }

    fn begin_search(&mut self, depth: u8) {
        self.reset_stats();
        self.stats.depth = depth;
        self.deadline = self.limits.start();
    }

    fn finish_search(&mut self, score: Option<Score>, start: Instant) {
        self.stats.score = score;
        self.stats.duration = Some(start.elapsed());
        debug!(
            "searched {} positions ({} cutoffs) in {:?}{}",
            self.stats.nodes,
            self.stats.cutoffs,
            start.elapsed(),
            if self.stats.interrupted {
                ", interrupted by search limits"
            } else {
                ""
            }
        );
    }

    fn enter_node(&mut self) {
        self.stats.nodes += 1;
        if !self.stopped && self.limits.exhausted(self.stats.nodes, self.deadline.as_ref()) {
            debug!("search limits exhausted after {} positions", self.stats.nodes);
            self.stopped = true;
            self.stats.interrupted = true;
        }
    }

    fn record_cutoff(&mut self) {
        self.stats.cutoffs += 1;
    }
}

/// Applies a move, executes a closure with the new state, then undoes the move.
/// The undo happens whether or not the closure succeeded.
fn with_move_applied<S, F, R>(game_move: &S::Move, state: &mut S, f: F) -> Result<R, SearchError>
where
    S: GameState,
    F: FnOnce(&mut S) -> Result<R, SearchError>,
{
    state
        .apply(game_move)
        .map_err(|error| SearchError::RulesViolation {
            error: format!("applying {:?}: {}", game_move, error),
        })?;

    let result = f(state);

    state.undo().map_err(|error| SearchError::RulesViolation {
        error: format!("undoing {:?}: {}", game_move, error),
    })?;

    result
}

/// Score of a node without legal moves, from the point of view of the player to move.
fn moveless_score<S: GameState>(state: &S, ply: u8) -> Score {
    if state.is_in_check() {
        -(MATE_SCORE - Score::from(ply))
    } else {
        DRAW_SCORE
    }
}

/// Scores the state from the point of view of the player to move.
///
/// `color` is `1` when that player is the evaluator's maximizing side and `-1` otherwise; it
/// converts the evaluator's absolute score into the mover's perspective at the leaves.
fn negamax<S, E>(
    context: &mut SearchContext,
    state: &mut S,
    evaluator: &E,
    depth: u8,
    ply: u8,
    mut alpha: Score,
    beta: Score,
    color: Score,
) -> Result<Score, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    context.enter_node();

    if depth == 0 || context.is_stopped() {
        return Ok(color * evaluator.evaluate(state));
    }

    let candidates = state.legal_moves();
    if candidates.is_empty() {
        return Ok(moveless_score(state, ply));
    }

    let mut best_score = -INFINITY;
    for game_move in candidates.as_ref().iter() {
        let score = -with_move_applied(game_move, state, |state| {
            negamax(
                context,
                state,
                evaluator,
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                -color,
            )
        })?;

        best_score = max(best_score, score);
        alpha = max(alpha, score);

        if beta <= alpha {
            context.record_cutoff();
            break;
        }

        if context.is_stopped() {
            break;
        }
    }

    Ok(best_score)
}

/// Minimax search with alpha-beta pruning.
///
/// Returns the score of the state searched `depth` plies deep on the evaluator's absolute scale.
/// `maximizing` tells whether the player to move is the one maximizing that score. The state is
/// restored before returning.
pub fn search<S, E>(
    context: &mut SearchContext,
    state: &mut S,
    evaluator: &E,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> Result<Score, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    context.begin_search(depth);
    let start = Instant::now();

    let score = if maximizing {
        negamax(context, state, evaluator, depth, 0, alpha, beta, 1)?
    } else {
        -negamax(context, state, evaluator, depth, 0, -beta, -alpha, -1)?
    };

    context.finish_search(Some(score), start);
    Ok(score)
}

/// Searches for the best move for the player to move.
///
/// Every root move is searched to the context's depth with a full window. The move with the
/// strictly greatest score wins, so among equally scored moves the first one in generator order
/// is returned.
///
/// # Returns
///
/// - `Ok(Some(best_move))` - The best move found
/// - `Ok(None)` - If the state has no legal moves
/// - `Err(SearchError::RulesViolation)` - If the rules engine rejected one of its own moves
#[must_use = "search returns the best move found"]
pub fn alpha_beta_search<S, E>(
    context: &mut SearchContext,
    state: &mut S,
    evaluator: &E,
) -> Result<Option<S::Move>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let depth = context.search_depth();
    context.begin_search(depth);
    let start = Instant::now();
    debug!("alpha-beta search depth: {}", depth);

    let candidates = state.legal_moves();
    if candidates.is_empty() {
        debug!("no legal moves, nothing to search");
        context.finish_search(None, start);
        return Ok(None);
    }

    let color: Score = if state.is_maximizing_player() { 1 } else { -1 };
    let mut best: Option<(S::Move, Score)> = None;

    for game_move in candidates.as_ref().iter() {
        if context.is_stopped() {
            break;
        }

        let score = -with_move_applied(game_move, state, |state| {
            negamax(
                context,
                state,
                evaluator,
                depth - 1,
                1,
                -INFINITY,
                INFINITY,
                -color,
            )
        })?;

        if context.is_stopped() {
            debug!("discarding partially searched root move {:?}", game_move);
            break;
        }

        debug!("root move {:?} scored {}", game_move, score);
        let improves = best
            .as_ref()
            .map_or(true, |(_, best_score)| score > *best_score);
        if improves {
            best = Some((game_move.clone(), score));
        }
    }

    let (best_move, best_score) = match best {
        Some((best_move, best_score)) => (best_move, Some(best_score)),
        None => {
            warn!(
                "search limits ran out before any root move was searched, \
                 playing the first legal move"
            );
            (candidates.as_ref()[0].clone(), None)
        }
    };

    context.finish_search(best_score, start);
    Ok(Some(best_move))
}

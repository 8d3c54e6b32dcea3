//! Game-agnostic alpha-beta search.
//!
//! The search only talks to the game through the traits in [`traits`]: a rules
//! engine that generates, applies and undoes moves, and an evaluator that scores
//! positions. Chess plugs into it in `chess_search`.

mod limits;
mod search;
mod traits;


pub use limits::{Deadline, SearchLimits};
pub use search::{
    alpha_beta_search, search, SearchContext, SearchError, SearchStats, DRAW_SCORE, INFINITY,
    MATE_SCORE,
};
pub use traits::{Evaluator, GameState, MoveCollection};

/// Signed evaluation of a position. Positive values favor the maximizing side.
pub type Score = i32;

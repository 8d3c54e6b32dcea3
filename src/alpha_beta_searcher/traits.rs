//! Core traits for generic alpha-beta search.

use std::fmt::Debug;

use super::Score;

/// Represents the state of a two-player zero-sum game, as exposed by a rules
/// engine. Moves are applied to and reverted from the state in place.
pub trait GameState {
    type Move: Clone + PartialEq + Debug;
    type MoveList: MoveCollection<Self::Move>;
    type Error: std::error::Error;

    /// Generates all legal moves for the current player. The order must be
    /// stable across repeated calls on an identical state.
    fn legal_moves(&self) -> Self::MoveList;

    /// Applies a move to the state.
    fn apply(&mut self, game_move: &Self::Move) -> Result<(), Self::Error>;

    /// Reverts the most recently applied move that has not been undone yet.
    fn undo(&mut self) -> Result<(), Self::Error>;

    /// Returns true if the current player is the reference (maximizing) side.
    fn is_maximizing_player(&self) -> bool;

    /// Returns true if the current player is in check. A player without legal
    /// moves is mated when in check and stalemated otherwise.
    /// Default implementation returns false.
    fn is_in_check(&self) -> bool {
        false
    }

    /// Returns true if the game is over. Consulted by callers, the search only
    /// looks at the legal move list.
    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }
}

/// Evaluates a game position and returns a score.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state. Higher scores favor the maximizing player,
    /// independent of whose turn it is.
    fn evaluate(&self, state: &S) -> Score;
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}

impl<M> MoveCollection<M> for smallvec::SmallVec<[M; 64]> {}

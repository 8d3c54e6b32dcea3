//! Chess-specific trait implementations for the alpha-beta search.

use chess::{ChessMove, Color};

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, GameState, Score, SearchContext, SearchError,
};
use crate::evaluate;
use crate::position::error::PositionError;
use crate::position::{ChessMoveList, Position};
use crate::strategy::{SearchConfig, StrategySelector};

impl GameState for Position {
    type Move = ChessMove;
    type MoveList = ChessMoveList;
    type Error = PositionError;

    #[inline]
    fn legal_moves(&self) -> ChessMoveList {
        Position::legal_moves(self)
    }

    #[inline]
    fn apply(&mut self, chess_move: &ChessMove) -> Result<(), PositionError> {
        Position::apply(self, chess_move)
    }

    #[inline]
    fn undo(&mut self) -> Result<(), PositionError> {
        Position::undo(self).map(|_| ())
    }

    #[inline]
    fn is_maximizing_player(&self) -> bool {
        self.side_to_move() == Color::White
    }

    #[inline]
    fn is_in_check(&self) -> bool {
        Position::is_in_check(self)
    }

    fn is_terminal(&self) -> bool {
        Position::is_terminal(self)
    }
}

/// Scores positions by material balance alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator<Position> for MaterialEvaluator {
    #[inline]
    fn evaluate(&self, position: &Position) -> Score {
        evaluate::evaluate(position)
    }
}

/// Searches for the best chess move from the given position.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext,
    position: &mut Position,
) -> Result<Option<ChessMove>, SearchError> {
    alpha_beta_search(context, position, &MaterialEvaluator)
}

/// Picks a move for the side to move according to `config`, or `None` when
/// the game is over.
pub fn choose_move(
    position: &mut Position,
    config: &SearchConfig,
) -> Result<Option<ChessMove>, SearchError> {
    StrategySelector::new().choose_move(position, &MaterialEvaluator, config)
}

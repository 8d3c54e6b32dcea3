use chess::ChessMove;
use log::info;
use thiserror::Error;

use crate::alpha_beta_searcher::{SearchError, SearchStats};
use crate::chess_search::MaterialEvaluator;
use crate::position::error::PositionError;
use crate::position::status::GameStatus;
use crate::position::{ChessMoveList, Position};
use crate::strategy::{SearchConfig, StrategySelector};

/// Engine configuration: how the computer picks moves, and where the game starts.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub starting_position: Position,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid move: {input}")]
    InvalidMove { input: String },
    #[error("Position error: {error}")]
    Position { error: PositionError },
    #[error("Search error: {error}")]
    Search { error: SearchError },
}

impl From<PositionError> for EngineError {
    fn from(error: PositionError) -> Self {
        EngineError::Position { error }
    }
}

impl From<SearchError> for EngineError {
    fn from(error: SearchError) -> Self {
        EngineError::Search { error }
    }
}

/// A game session: the position being played plus the move selector that
/// answers for the computer.
pub struct Engine {
    position: Position,
    config: EngineConfig,
    selector: StrategySelector,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            position: config.starting_position.clone(),
            config,
            selector: StrategySelector::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_search_config(&mut self, search: SearchConfig) {
        self.config.search = search;
    }

    pub fn valid_moves(&self) -> ChessMoveList {
        self.position.legal_moves()
    }

    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn make_move(&mut self, chess_move: ChessMove) -> Result<ChessMove, EngineError> {
        self.position
            .apply(&chess_move)
            .map_err(|_| EngineError::InvalidMove {
                input: chess_move.to_string(),
            })?;
        Ok(chess_move)
    }

    /// Plays a move typed in coordinate notation.
    pub fn make_move_from_input(&mut self, input: &str) -> Result<ChessMove, EngineError> {
        let chess_move =
            self.position
                .parse_move(input)
                .map_err(|_| EngineError::InvalidMove {
                    input: input.trim().to_string(),
                })?;
        self.make_move(chess_move)
    }

    /// Asks the configured policy for a move without playing it.
    pub fn choose_move(&mut self) -> Result<Option<ChessMove>, EngineError> {
        if self.is_game_over() {
            return Ok(None);
        }

        let config = self.config.search;
        let chosen = self
            .selector
            .choose_move(&mut self.position, &MaterialEvaluator, &config)?;
        Ok(chosen)
    }

    /// Chooses a move for the side to move and plays it. Returns `None` when the
    /// game is already over.
    pub fn make_best_move(&mut self) -> Result<Option<ChessMove>, EngineError> {
        match self.choose_move()? {
            Some(chess_move) => self.make_move(chess_move).map(Some),
            None => Ok(None),
        }
    }

    pub fn undo_move(&mut self) -> Result<ChessMove, EngineError> {
        Ok(self.position.undo()?)
    }

    /// Starts over from the configured starting position.
    pub fn reset(&mut self) {
        info!("starting a new game from {}", self.config.starting_position.fen());
        self.position = self.config.starting_position.clone();
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.position.last_move()
    }

    pub fn last_search_stats(&self) -> Option<&SearchStats> {
        self.selector.last_search()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_from(fen: &str, search: SearchConfig) -> Engine {
        Engine::with_config(EngineConfig {
            search,
            starting_position: fen.parse().unwrap(),
        })
    }

    #[test]
    fn test_find_mate_in_1_white() {
        let mut engine = engine_from(
            "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
            SearchConfig::fixed_depth(3),
        );

        let chess_move = engine.make_best_move().unwrap().unwrap();
        assert_eq!(chess_move.to_string(), "a1a8");
        assert_eq!(
            engine.status(),
            GameStatus::Checkmate {
                winner: chess::Color::White
            }
        );
        assert!(engine.is_game_over());
        assert_eq!(engine.make_best_move().unwrap(), None);
    }

    #[test]
    fn test_make_move_from_input() {
        let mut engine = Engine::new();
        let chess_move = engine.make_move_from_input("e2e4").unwrap();
        assert_eq!(chess_move.to_string(), "e2e4");
        assert_eq!(engine.last_move(), Some(chess_move));
        assert_eq!(engine.position().side_to_move(), chess::Color::Black);
    }

    #[test]
    fn test_invalid_input_leaves_the_game_unchanged() {
        let mut engine = Engine::new();
        let before = engine.position().clone();

        for input in &["e2e5", "e7e5", "nonsense"] {
            assert!(matches!(
                engine.make_move_from_input(input),
                Err(EngineError::InvalidMove { .. })
            ));
        }
        assert_eq!(engine.position(), &before);
    }

    #[test]
    fn test_computer_reply_is_legal_and_recorded() {
        let mut engine = Engine::new();
        engine.make_move_from_input("e2e4").unwrap();

        let legal_replies = engine.valid_moves();
        let reply = engine.make_best_move().unwrap().unwrap();
        assert!(legal_replies.contains(&reply));
        assert_eq!(engine.position().moves().len(), 2);

        let stats = engine.last_search_stats().unwrap();
        assert_eq!(stats.depth, engine.config().search.depth);
        assert!(stats.nodes > 0);
    }

    #[test]
    fn test_undo_and_reset() {
        let mut engine = Engine::new();
        engine.make_move_from_input("e2e4").unwrap();
        engine.make_move_from_input("e7e5").unwrap();

        assert_eq!(engine.undo_move().unwrap().to_string(), "e7e5");
        assert_eq!(engine.position().moves().len(), 1);

        engine.reset();
        assert_eq!(engine.position(), &Position::starting_position());
        assert!(matches!(
            engine.undo_move(),
            Err(EngineError::Position {
                error: PositionError::NothingToUndo
            })
        ));
    }

    #[test]
    fn test_set_search_config() {
        let mut engine = Engine::new();
        engine.set_search_config(SearchConfig::random());

        assert!(engine.make_best_move().unwrap().is_some());
        assert!(engine.last_search_stats().is_none());
    }

    #[test]
    fn test_draw_ends_the_game() {
        let mut engine = engine_from("4k3/8/8/8/8/8/8/4K3 w - - 0 1", SearchConfig::fixed_depth(2));
        assert_eq!(engine.status(), GameStatus::InsufficientMaterial);
        assert_eq!(engine.choose_move().unwrap(), None);
    }

    #[test]
    fn test_fifty_move_rule_ends_the_game() {
        let mut engine = engine_from("4k3/8/8/8/8/8/8/R3K3 w - - 99 80", SearchConfig::default());
        engine.make_move_from_input("a1a2").unwrap();

        assert_eq!(engine.status(), GameStatus::FiftyMoveRule);
        assert!(engine.is_game_over());
        assert_eq!(engine.position().fen(), "4k3/8/8/8/8/8/R7/4K3 b - - 100 80");
        assert_eq!(engine.choose_move().unwrap(), None);

        engine.undo_move().unwrap();
        assert_eq!(engine.position().fen(), "4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
        assert!(!engine.is_game_over());
    }
}

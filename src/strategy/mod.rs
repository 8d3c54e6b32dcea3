//! Move selection policies for the automated opponent.
//!
//! A [`SearchConfig`] names the policy: either a uniformly random legal move,
//! or the best move found by a fixed-depth alpha-beta search. Difficulty labels
//! map onto configs through [`Difficulty`].

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, GameState, SearchContext, SearchError, SearchLimits, SearchStats,
};


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown policy `{input}`, expected `random` or `fixed-depth`")]
    UnknownPolicy { input: String },
    #[error("unknown difficulty `{input}`, expected `random`, `easy` or `hard`")]
    UnknownDifficulty { input: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    Random,
    FixedDepth,
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "random" => Ok(Policy::Random),
            "fixed-depth" | "fixeddepth" | "minimax" => Ok(Policy::FixedDepth),
            _ => Err(ConfigError::UnknownPolicy {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Random => write!(f, "random"),
            Policy::FixedDepth => write!(f, "fixed-depth"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub policy: Policy,
    /// Search depth in plies. Only used by `Policy::FixedDepth`; 0 is searched as 1.
    pub depth: u8,
    pub limits: SearchLimits,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Difficulty::default().into()
    }
}

impl SearchConfig {
    pub fn random() -> Self {
        Self {
            policy: Policy::Random,
            depth: 1,
            limits: SearchLimits::none(),
        }
    }

    pub fn fixed_depth(depth: u8) -> Self {
        Self {
            policy: Policy::FixedDepth,
            depth,
            limits: SearchLimits::none(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Difficulty labels offered to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Random,
    Easy,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn search_depth(&self) -> Option<u8> {
        match self {
            Difficulty::Random => None,
            Difficulty::Easy => Some(2),
            Difficulty::Hard => Some(3),
        }
    }
}

impl From<Difficulty> for SearchConfig {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty.search_depth() {
            Some(depth) => SearchConfig::fixed_depth(depth),
            None => SearchConfig::random(),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "random" => Ok(Difficulty::Random),
            "easy" | "minimax2" => Ok(Difficulty::Easy),
            "hard" | "minimax3" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Random => write!(f, "random"),
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Chooses moves according to a `SearchConfig`, drawing randomness from `R`.
pub struct StrategySelector<R = ThreadRng> {
    rng: R,
    last_search: Option<SearchStats>,
}

impl StrategySelector<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for StrategySelector<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> StrategySelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            last_search: None,
        }
    }

    /// Statistics of the most recent fixed-depth search, if there was one.
    pub fn last_search(&self) -> Option<&SearchStats> {
        self.last_search.as_ref()
    }

    /// Returns the move to play, or `None` when the player to move has no legal
    /// moves. The state is left unchanged.
    pub fn choose_move<S, E>(
        &mut self,
        state: &mut S,
        evaluator: &E,
        config: &SearchConfig,
    ) -> Result<Option<S::Move>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let chosen = match config.policy {
            Policy::Random => {
                self.last_search = None;
                let candidates = state.legal_moves();
                candidates.as_ref().choose(&mut self.rng).cloned()
            }
            Policy::FixedDepth => {
                let mut context = SearchContext::with_limits(config.depth, config.limits);
                let best_move = alpha_beta_search(&mut context, state, evaluator)?;
                self.last_search = Some(context.stats().clone());
                best_move
            }
        };

        match &chosen {
            Some(game_move) => info!("{} policy chose {:?}", config.policy, game_move),
            None => debug!("{} policy found no legal move", config.policy),
        }
        Ok(chosen)
    }
}

/// Convenience wrapper around [`StrategySelector::choose_move`] using the
/// thread-local random number generator.
pub fn choose_move<S, E>(
    state: &mut S,
    evaluator: &E,
    config: &SearchConfig,
) -> Result<Option<S::Move>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    StrategySelector::new().choose_move(state, evaluator, config)
}

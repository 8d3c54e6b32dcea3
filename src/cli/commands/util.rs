//! Shared utilities for CLI commands.

use std::time::Duration;

use chess::ChessMove;
use chess_opponent::alpha_beta_searcher::{SearchLimits, SearchStats};
use chess_opponent::game::Engine;
use chess_opponent::position::Position;
use chess_opponent::strategy::{Difficulty, Policy, SearchConfig};
use structopt::StructOpt;

const DEFAULT_DEPTH: u8 = 2;

/// Options that select and bound the computer's move choice.
#[derive(StructOpt, Debug)]
pub struct SearchOptions {
    #[structopt(long, default_value = "easy", help = "random, easy (minimax2) or hard (minimax3)")]
    pub difficulty: Difficulty,
    #[structopt(long, help = "random or fixed-depth; overrides the difficulty's policy")]
    pub policy: Option<Policy>,
    #[structopt(short, long, help = "Search depth in plies; implies fixed-depth")]
    pub depth: Option<u8>,
    #[structopt(long = "time-ms", help = "Time budget for one search in milliseconds")]
    pub time_ms: Option<u64>,
    #[structopt(long, help = "Node budget for one search")]
    pub nodes: Option<u64>,
}

impl SearchOptions {
    pub(crate) fn search_config(&self) -> SearchConfig {
        let mut limits = SearchLimits::none();
        if let Some(millis) = self.time_ms {
            limits = limits.with_time_budget(Duration::from_millis(millis));
        }
        if let Some(nodes) = self.nodes {
            limits = limits.with_node_budget(nodes);
        }

        let policy = self.policy.unwrap_or_else(|| {
            if self.depth.is_some() || self.difficulty.search_depth().is_some() {
                Policy::FixedDepth
            } else {
                Policy::Random
            }
        });
        let depth = self
            .depth
            .or_else(|| self.difficulty.search_depth())
            .unwrap_or(DEFAULT_DEPTH);

        SearchConfig {
            policy,
            depth,
            limits,
        }
    }
}

/// Formats moves as numbered pairs: `1. e2e4 e7e5 2. g1f3`.
pub(crate) fn format_move_list(moves: &[ChessMove]) -> String {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let pair: Vec<String> = pair.iter().map(ToString::to_string).collect();
            format!("{}. {}", i + 1, pair.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn format_stats(stats: &SearchStats) -> String {
    let mut line = format!("depth {}, {} positions searched", stats.depth, stats.nodes);
    if let Some(score) = stats.score {
        line.push_str(&format!(", score {}", score));
    }
    if let Some(duration) = stats.duration {
        line.push_str(&format!(", {:.3}s", duration.as_secs_f64()));
    }
    if stats.interrupted {
        line.push_str(", interrupted");
    }
    line
}

/// The board diagram followed by the FEN, the moves played and the status line.
pub(crate) fn game_view(position: &Position) -> String {
    let mut lines = vec![position.to_string(), String::new()];
    lines.push(format!("FEN: {}", position.fen()));
    if !position.moves().is_empty() {
        lines.push(format!("Moves: {}", format_move_list(position.moves())));
    }
    lines.push(position.status_line());
    lines.join("\n")
}

pub(crate) fn print_game(engine: &Engine) {
    println!();
    println!("{}", game_view(engine.position()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> SearchOptions {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        SearchOptions::from_iter(argv)
    }

    #[test]
    fn test_difficulty_selects_the_config() {
        assert_eq!(options(&[]).search_config(), SearchConfig::fixed_depth(2));
        assert_eq!(
            options(&["--difficulty", "hard"]).search_config(),
            SearchConfig::fixed_depth(3)
        );
        assert_eq!(
            options(&["--difficulty", "random"]).search_config().policy,
            Policy::Random
        );
    }

    #[test]
    fn test_explicit_depth_and_policy_override_the_difficulty() {
        assert_eq!(
            options(&["--difficulty", "random", "--depth", "4"]).search_config(),
            SearchConfig::fixed_depth(4)
        );
        assert_eq!(
            options(&["--difficulty", "hard", "--policy", "random"])
                .search_config()
                .policy,
            Policy::Random
        );
    }

    #[test]
    fn test_limits_are_passed_through() {
        let config = options(&["--time-ms", "250", "--nodes", "1000"]).search_config();
        assert_eq!(
            config.limits,
            SearchLimits::none()
                .with_time_budget(Duration::from_millis(250))
                .with_node_budget(1000)
        );
    }

    #[test]
    fn test_format_move_list() {
        let mut position = Position::starting_position();
        for input in &["e2e4", "e7e5", "g1f3"] {
            let chess_move = position.parse_move(input).unwrap();
            position.apply(&chess_move).unwrap();
        }
        assert_eq!(format_move_list(position.moves()), "1. e2e4 e7e5 2. g1f3");
        assert_eq!(format_move_list(&[]), "");
    }

    #[test]
    fn test_game_view_shows_fen_moves_and_status() {
        let mut position: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 98 80".parse().unwrap();
        let view = game_view(&position);
        assert!(view.contains("FEN: 4k3/8/8/8/8/8/8/R3K3 w - - 98 80"));
        assert!(!view.contains("Moves:"));
        assert!(view.ends_with("White to move"));

        for input in &["a1a2", "e8d8"] {
            let chess_move = position.parse_move(input).unwrap();
            position.apply(&chess_move).unwrap();
        }
        let view = game_view(&position);
        assert!(view.starts_with("8  . . . k . . . ."));
        assert!(view.contains("FEN: 3k4/8/8/8/8/8/R7/4K3 w - - 100 81"));
        assert!(view.contains("Moves: 1. a1a2 e8d8"));
        assert!(view.ends_with("Draw by the fifty-move rule"));
    }
}

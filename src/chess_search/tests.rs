//! Chess-specific tests for the alpha-beta search.
//!
//! Test coverage:
//! - Legal results from the starting position
//! - Mate finding for both colors
//! - Material wins (hanging pieces)
//! - Positions with one or no legal moves
//! - Position restoration and determinism
//! - Equivalence with exhaustive minimax on real positions

use chess::ChessMove;

use crate::alpha_beta_searcher::tests::exhaustive_minimax;
use crate::alpha_beta_searcher::{
    search, GameState, SearchContext, SearchLimits, INFINITY, MATE_SCORE,
};
use crate::position::Position;
use crate::strategy::SearchConfig;

use super::*;

const SCHOLARS_MATE: &str = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1";
const ONLY_KING_MOVE: &str = "k7/2K5/8/8/8/8/8/1R6 b - - 0 1";
const OPEN_GAME: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

fn position(fen: &str) -> Position {
    fen.parse().unwrap()
}

fn best_move(fen: &str, depth: u8) -> Option<ChessMove> {
    let mut context = SearchContext::new(depth);
    let mut position = position(fen);
    search_best_move(&mut context, &mut position).unwrap()
}

#[test]
fn test_starting_position_returns_one_of_twenty_moves() {
    let mut position = Position::starting_position();
    let legal_moves = position.legal_moves();
    assert_eq!(legal_moves.len(), 20);

    let chosen = choose_move(&mut position, &SearchConfig::fixed_depth(2))
        .unwrap()
        .unwrap();
    assert!(legal_moves.contains(&chosen));
}

#[test]
fn test_find_mate_in_1_white() {
    for depth in 2..=3 {
        let chess_move = best_move("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", depth).unwrap();
        assert_eq!(chess_move.to_string(), "a1a8", "depth {}", depth);
    }
}

#[test]
fn test_find_mate_in_1_black() {
    for depth in 2..=3 {
        let chess_move = best_move("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", depth).unwrap();
        assert_eq!(chess_move.to_string(), "a8a1", "depth {}", depth);
    }
}

#[test]
fn test_mate_score_is_reported_from_the_movers_side() {
    let mut context = SearchContext::new(2);
    let mut position = position("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
    search_best_move(&mut context, &mut position).unwrap();
    assert_eq!(context.last_score(), Some(MATE_SCORE - 1));
}

#[test]
fn test_captures_hanging_queen() {
    for depth in 1..=3 {
        let chess_move = best_move("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", depth).unwrap();
        assert_eq!(chess_move.to_string(), "e4d5", "depth {}", depth);
    }
}

#[test]
fn test_black_captures_hanging_queen() {
    for depth in 1..=3 {
        let chess_move = best_move("4k3/8/8/4p3/3Q4/8/8/4K3 b - - 0 1", depth).unwrap();
        assert_eq!(chess_move.to_string(), "e5d4", "depth {}", depth);
    }
}

#[test]
fn test_single_legal_move_is_returned_at_every_depth() {
    let only_move = position(ONLY_KING_MOVE).legal_moves();
    assert_eq!(only_move.len(), 1);

    for depth in 1..=4 {
        assert_eq!(best_move(ONLY_KING_MOVE, depth), Some(only_move[0]));
    }
}

#[test]
fn test_checkmated_side_has_no_move() {
    for depth in 1..=3 {
        assert_eq!(best_move(SCHOLARS_MATE, depth), None);
    }
}

#[test]
fn test_position_is_restored_after_search() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "4k3/1P6/8/8/8/8/6p1/4K3 b - - 0 1",
    ];

    for fen in fens.iter() {
        let max_depth = if fen.starts_with("rnbqkbnr") { 3 } else { 4 };
        for depth in 1..=max_depth {
            let mut position = position(fen);
            let original = position.clone();

            let chosen = choose_move(&mut position, &SearchConfig::fixed_depth(depth)).unwrap();
            assert!(chosen.is_some());
            assert_eq!(position, original, "{} at depth {}", fen, depth);
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let first = best_move(OPEN_GAME, 3);
    for _ in 0..3 {
        assert_eq!(best_move(OPEN_GAME, 3), first);
    }
}

#[test]
fn test_pruned_search_matches_exhaustive_minimax() {
    let fens = [
        OPEN_GAME,
        "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
        "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1",
    ];

    for fen in fens.iter() {
        for depth in 1..=3 {
            let mut position = position(fen);
            let maximizing = position.is_maximizing_player();

            let expected =
                exhaustive_minimax(&mut position, &MaterialEvaluator, depth, 0, maximizing);
            let mut context = SearchContext::new(depth);
            let actual = search(
                &mut context,
                &mut position,
                &MaterialEvaluator,
                depth,
                -INFINITY,
                INFINITY,
                maximizing,
            )
            .unwrap();
            assert_eq!(actual, expected, "{} at depth {}", fen, depth);
        }
    }
}

#[test]
fn test_node_budget_still_plays_a_legal_move() {
    let mut position = position(OPEN_GAME);
    let original = position.clone();
    let legal_moves = position.legal_moves();

    let config =
        SearchConfig::fixed_depth(4).with_limits(SearchLimits::none().with_node_budget(50));
    let chosen = choose_move(&mut position, &config).unwrap().unwrap();
    assert!(legal_moves.contains(&chosen));
    assert_eq!(position, original);
}

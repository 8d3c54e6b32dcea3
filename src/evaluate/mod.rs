use chess::{Board, Color, ALL_PIECES};

use crate::alpha_beta_searcher::Score;
use crate::position::Position;

pub mod piece_values;

use piece_values::material_value;

/// Returns the material balance of the position. Positive scores favor white,
/// negative scores favor black, regardless of whose turn it is.
#[inline(always)]
pub fn evaluate(position: &Position) -> Score {
    board_material_score(position.board())
}

#[inline(always)]
pub fn board_material_score(board: &Board) -> Score {
    player_material_score(board, Color::White) - player_material_score(board, Color::Black)
}

#[inline(always)]
fn player_material_score(board: &Board, color: Color) -> Score {
    let pieces = *board.color_combined(color);
    ALL_PIECES
        .iter()
        .map(|&piece| {
            let count = (*board.pieces(piece) & pieces).popcnt() as Score;
            count * material_value(piece)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn test_starting_player_material_score() {
        let board = Position::starting_position();
        println!("Testing board:\n{}", board);

        let white_score = player_material_score(board.board(), Color::White);
        assert_eq!(white_score, 24000);

        let black_score = player_material_score(board.board(), Color::Black);
        assert_eq!(black_score, 24000);

        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn test_score_is_from_white_perspective_regardless_of_turn() {
        let white_to_move = position("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1");
        let black_to_move = position("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1");
        assert_eq!(evaluate(&white_to_move), 900);
        assert_eq!(evaluate(&black_to_move), 900);
    }

    #[test]
    fn test_mirrored_position_negates_score() {
        let pairs = [
            (
                "4k3/8/8/8/8/8/PPP5/R3K3 w - - 0 1",
                "r3k3/ppp5/8/8/8/8/8/4K3 b - - 0 1",
            ),
            (
                "r1bqk2r/ppp2ppp/2n5/8/8/5N2/PP3PPP/R2QKB1R w KQkq - 0 1",
                "r2qkb1r/pp3ppp/5n2/8/8/2N5/PPP2PPP/R1BQK2R b KQkq - 0 1",
            ),
        ];

        for (fen, mirrored_fen) in pairs.iter() {
            let original = evaluate(&position(fen));
            let mirrored = evaluate(&position(mirrored_fen));
            assert_ne!(original, 0);
            assert_eq!(original, -mirrored, "{} vs {}", fen, mirrored_fen);
        }
    }

    #[test]
    fn test_piece_values() {
        let position = position("4k3/8/8/8/8/8/8/RNB1K3 w - - 0 1");
        assert_eq!(evaluate(&position), 500 + 320 + 330);
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let position = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let before = position.clone();
        assert_eq!(evaluate(&position), evaluate(&position));
        assert_eq!(position, before);
    }
}

use std::fmt;

use chess::{BitBoard, Board, BoardStatus, Color, Piece};

use super::{Position, FIFTY_MOVE_RULE_PLIES};

/// Outcome classification of a position, from the point of view of the
/// player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing { .. })
    }
}

pub(super) fn classify(position: &Position) -> GameStatus {
    let board = position.board();
    match board.status() {
        BoardStatus::Checkmate => {
            return GameStatus::Checkmate {
                winner: !board.side_to_move(),
            }
        }
        BoardStatus::Stalemate => return GameStatus::Stalemate,
        BoardStatus::Ongoing => {}
    }

    if position.halfmove_clock() >= FIFTY_MOVE_RULE_PLIES {
        return GameStatus::FiftyMoveRule;
    }

    if repetition_count(position) >= 3 {
        return GameStatus::ThreefoldRepetition;
    }

    if has_insufficient_material(board) {
        return GameStatus::InsufficientMaterial;
    }

    GameStatus::Ongoing {
        in_check: position.is_in_check(),
    }
}

/// Number of times the current board occurs in the game, the current
/// occurrence included.
fn repetition_count(position: &Position) -> usize {
    let current = position.board();
    1 + position
        .previous_boards()
        .filter(|&board| board == current)
        .count()
}

/// Neither side can deliver mate: bare kings, a lone minor piece, or bishops
/// that all stand on squares of one colour.
fn has_insufficient_material(board: &Board) -> bool {
    let heavy =
        *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    if heavy.popcnt() > 0 {
        return false;
    }

    let knights = *board.pieces(Piece::Knight);
    let bishops = *board.pieces(Piece::Bishop);
    let minor_count = knights.popcnt() + bishops.popcnt();
    if minor_count <= 1 {
        return true;
    }

    knights.popcnt() == 0 && bishops_share_square_color(bishops)
}

fn bishops_share_square_color(bishops: BitBoard) -> bool {
    let mut colors = bishops.map(|square| {
        (square.get_rank().to_index() + square.get_file().to_index()) % 2
    });
    match colors.next() {
        Some(first) => colors.all(|color| color == first),
        None => true,
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Checkmate { winner } => {
                write!(f, "Checkmate, {} wins", color_name(*winner))
            }
            GameStatus::Stalemate => write!(f, "Stalemate, draw"),
            GameStatus::FiftyMoveRule => write!(f, "Draw by the fifty-move rule"),
            GameStatus::ThreefoldRepetition => write!(f, "Draw by threefold repetition"),
            GameStatus::InsufficientMaterial => write!(f, "Draw by insufficient material"),
            GameStatus::Ongoing { .. } => write!(f, "Game in progress"),
        }
    }
}

pub(crate) fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

//! Game state adapter over the `chess` crate.
//!
//! `chess::Board` is an immutable copy-make value; `Position` layers an undo
//! stack on top of it so that moves can be applied and reverted in place, which
//! is what the search expects from a rules engine. The board does not track the
//! FEN move counters, so the halfmove clock and fullmove number live here too.

pub mod error;
pub mod status;

mod display;


use std::str::FromStr;

use chess::{Board, ChessMove, Color, MoveGen, Piece, EMPTY};
use smallvec::SmallVec;

use error::PositionError;
use status::GameStatus;

pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_RULE_PLIES: u32 = 100;

/// State replaced by a move, restored by `undo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Snapshot>,
    moves: Vec<ChessMove>,
}

impl Default for Position {
    fn default() -> Self {
        Self::from_board(Board::default())
    }
}

impl Position {
    pub fn starting_position() -> Self {
        Self::default()
    }

    pub fn from_board(board: Board) -> Self {
        Self::with_clocks(board, 0, 1)
    }

    fn with_clocks(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and is incremented after each black move.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn fen(&self) -> String {
        // the board prints placeholder counters; only its first four fields are kept
        let board = self.board.to_string();
        let fields: Vec<&str> = board.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn is_in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    /// Legal moves in generator order. The order is stable for a given board.
    pub fn legal_moves(&self) -> ChessMoveList {
        MoveGen::new_legal(&self.board).collect()
    }

    pub fn apply(&mut self, chess_move: &ChessMove) -> Result<(), PositionError> {
        if !self.board.legal(*chess_move) {
            return Err(PositionError::IllegalMove {
                chess_move: chess_move.to_string(),
            });
        }

        let irreversible = self.board.piece_on(chess_move.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(chess_move.get_dest()).is_some();

        self.history.push(Snapshot {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });
        self.moves.push(*chess_move);

        if self.board.side_to_move() == Color::Black {
            self.fullmove_number += 1;
        }
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.board = self.board.make_move_new(*chess_move);
        Ok(())
    }

    /// Reverts the most recently applied move.
    pub fn undo(&mut self) -> Result<ChessMove, PositionError> {
        let snapshot = self.history.pop().ok_or(PositionError::NothingToUndo)?;
        let chess_move = self.moves.pop().ok_or(PositionError::NothingToUndo)?;
        self.board = snapshot.board;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        Ok(chess_move)
    }

    /// Moves applied since the position was created, oldest first.
    pub fn moves(&self) -> &[ChessMove] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.moves.last().copied()
    }

    /// Boards seen before the current one, oldest first.
    pub(crate) fn previous_boards(&self) -> impl Iterator<Item = &Board> {
        self.history.iter().map(|snapshot| &snapshot.board)
    }

    pub fn status(&self) -> GameStatus {
        status::classify(self)
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// One-line description of the game state, e.g. "Black to move, in check".
    pub fn status_line(&self) -> String {
        match self.status() {
            GameStatus::Ongoing { in_check } => {
                let mover = capitalize(status::color_name(self.side_to_move()));
                if in_check {
                    format!("{} to move, in check", mover)
                } else {
                    format!("{} to move", mover)
                }
            }
            ended => ended.to_string(),
        }
    }

    /// Finds the legal move written in coordinate notation (`e2e4`, `e7e8q`).
    pub fn parse_move(&self, input: &str) -> Result<ChessMove, PositionError> {
        let wanted = input.trim().to_lowercase();
        self.legal_moves()
            .into_iter()
            .find(|chess_move| chess_move.to_string().to_lowercase() == wanted)
            .ok_or_else(|| PositionError::UnrecognizedMove {
                input: input.to_string(),
            })
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let board = Board::from_str(fen.trim()).map_err(|err| invalid(format!("{:?}", err)))?;

        // the move counters are optional, as in the `chess` crate
        let mut counters = fen.split_whitespace().skip(4);
        let halfmove_clock = parse_counter(counters.next(), 0, "halfmove clock").map_err(invalid)?;
        let fullmove_number =
            parse_counter(counters.next(), 1, "fullmove number").map_err(invalid)?;
        if fullmove_number == 0 {
            return Err(invalid("fullmove number starts at 1".to_string()));
        }

        Ok(Self::with_clocks(board, halfmove_clock, fullmove_number))
    }
}

fn parse_counter(field: Option<&str>, default: u32, name: &str) -> Result<u32, String> {
    match field {
        Some(value) => value
            .parse()
            .map_err(|_| format!("invalid {} `{}`", name, value)),
        None => Ok(default),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

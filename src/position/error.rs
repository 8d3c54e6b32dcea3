use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("Cannot apply move {chess_move}, it is not legal in the current position")]
    IllegalMove { chess_move: String },
    #[error("Cannot undo, no move has been applied")]
    NothingToUndo,
    #[error("`{input}` does not match any legal move")]
    UnrecognizedMove { input: String },
}

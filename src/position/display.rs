use std::fmt;

use chess::{File, Rank, Square};

use super::Position;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let board = self.board();
        for rank_index in (0..8).rev() {
            write!(f, "{} ", rank_index + 1)?;
            for file_index in 0..8 {
                let square =
                    Square::make_square(Rank::from_index(rank_index), File::from_index(file_index));
                let symbol = match (board.piece_on(square), board.color_on(square)) {
                    (Some(piece), Some(color)) => piece.to_string(color),
                    _ => ".".to_string(),
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

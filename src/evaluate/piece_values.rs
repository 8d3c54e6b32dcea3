use chess::Piece;

use crate::alpha_beta_searcher::Score;

pub fn material_value(piece: Piece) -> Score {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        // Large enough to dominate everything else, but still a finite value.
        Piece::King => 20000,
    }
}

//! Material evaluation.

use chess_core::{Color, PieceKind};
use chess_engine::Board;

/// Score of a side that cannot move. Exceeds any material balance.
pub const MATE_SCORE: i32 = 100_000;

/// Material value of one piece.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 100,
        PieceKind::King => 900,
    }
}

/// Material balance of `board` from `side`'s point of view: own pieces
/// count positively, the opponent's negatively.
pub fn evaluate(board: &Board, side: Color) -> i32 {
    board
        .pieces()
        .map(|piece| {
            let value = piece_value(piece.kind());
            if piece.color() == side {
                value
            } else {
                -value
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::standard();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn signed_by_perspective() {
        let board = Board::parse("4k3/8/8/3q4/4P3/8/8/4K3 w -").unwrap();
        assert_eq!(evaluate(&board, Color::White), 10 - 100);
        assert_eq!(evaluate(&board, Color::Black), 100 - 10);
    }
}

//! Check detection for candidate moves.

use crate::{Board, Piece};
use chess_core::Square;

/// Returns true if moving `piece` to `dest` would leave its own king
/// attacked.
///
/// The move is played on a scratch copy of the board; `board` itself is
/// never touched. Castling rook movement is not simulated, so callers test
/// castling one king square at a time.
pub fn would_expose_check(board: &Board, piece: &Piece, dest: Square) -> bool {
    let mut probe = board.clone();
    probe.relocate(piece.square(), dest);
    probe.king_in_check(piece.color())
}

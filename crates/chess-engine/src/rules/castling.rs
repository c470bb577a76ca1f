//! Castling availability.

use crate::check::would_expose_check;
use crate::{Board, CastlingFlags, Piece};
use chess_core::{Color, MoveFlag, PieceKind, Square};

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    /// With the h-file rook.
    Short,
    /// With the a-file rook.
    Long,
}

impl CastleSide {
    pub const fn from_flag(flag: MoveFlag) -> Option<Self> {
        match flag {
            MoveFlag::CastleShort => Some(CastleSide::Short),
            MoveFlag::CastleLong => Some(CastleSide::Long),
            _ => None,
        }
    }
}

/// The fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Square the king crosses on its way.
    pub transit: Square,
    between_files: &'static [u8],
    rank: u8,
}

impl CastlingSquares {
    /// Squares strictly between king and rook.
    pub fn between(&self) -> impl Iterator<Item = Square> + '_ {
        self.between_files
            .iter()
            .map(move |&file| Square::new(file, self.rank))
    }
}

pub fn castling_squares(color: Color, side: CastleSide) -> CastlingSquares {
    let rank = color.back_rank();
    let at = |file| Square::new(file, rank);
    match side {
        CastleSide::Short => CastlingSquares {
            king_from: at(4),
            king_to: at(6),
            rook_from: at(7),
            rook_to: at(5),
            transit: at(5),
            between_files: &[5, 6],
            rank,
        },
        CastleSide::Long => CastlingSquares {
            king_from: at(4),
            king_to: at(2),
            rook_from: at(0),
            rook_to: at(3),
            transit: at(3),
            between_files: &[1, 2, 3],
            rank,
        },
    }
}

/// Computes which castling moves `king` may make on `board`.
///
/// Castling needs an unmoved king on its home square that is not in check,
/// an unmoved rook of the same color on the corner, nothing in between, and
/// neither the crossed square nor the destination attacked.
pub fn castling_options(king: &Piece, board: &Board) -> CastlingFlags {
    let home = castling_squares(king.color(), CastleSide::Short).king_from;
    if king.kind() != PieceKind::King || king.has_moved() || king.square() != home {
        return CastlingFlags::NONE;
    }
    if board.king_in_check(king.color()) {
        return CastlingFlags::NONE;
    }
    CastlingFlags {
        short: side_available(king, board, CastleSide::Short),
        long: side_available(king, board, CastleSide::Long),
    }
}

fn side_available(king: &Piece, board: &Board, side: CastleSide) -> bool {
    let squares = castling_squares(king.color(), side);
    let rook_ready = board.piece_at(squares.rook_from).is_some_and(|rook| {
        rook.kind() == PieceKind::Rook && rook.color() == king.color() && !rook.has_moved()
    });
    rook_ready
        && squares.between().all(|sq| board.piece_at(sq).is_none())
        && !would_expose_check(board, king, squares.transit)
        && !would_expose_check(board, king, squares.king_to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(layout: &str, king: Square) -> CastlingFlags {
        let board = Board::parse(layout).unwrap();
        castling_options(board.piece_at(king).unwrap(), &board)
    }

    #[test]
    fn both_sides_open() {
        let flags = options("r3k2r/8/8/8/8/8/8/R3K2R w KQkq", Square::E1);
        assert!(flags.short && flags.long);
        let flags = options("r3k2r/8/8/8/8/8/8/R3K2R b KQkq", Square::E8);
        assert!(flags.short && flags.long);
    }

    #[test]
    fn blocked_between() {
        let flags = options("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq", Square::E1);
        assert_eq!(flags, CastlingFlags::NONE);
    }

    #[test]
    fn rights_from_layout() {
        let flags = options("r3k2r/8/8/8/8/8/8/R3K2R w Kkq", Square::E1);
        assert!(flags.short);
        assert!(!flags.long);
    }

    #[test]
    fn not_out_of_or_through_check() {
        // Rook on e8 checks the king.
        let flags = options("4r1k1/8/8/8/8/8/8/R3K2R w KQ", Square::E1);
        assert_eq!(flags, CastlingFlags::NONE);

        // Rook on f8 covers the crossed square; d8 rook covers d1.
        let flags = options("3r1rk1/8/8/8/8/8/8/R3K2R w KQ", Square::E1);
        assert_eq!(flags, CastlingFlags::NONE);

        // Only the destination g1 is covered.
        let flags = options("1k4r1/8/8/8/8/8/8/R3K2R w KQ", Square::E1);
        assert!(!flags.short);
        assert!(flags.long);
    }

    #[test]
    fn long_side_b_file_may_be_attacked() {
        let flags = options("1r4k1/8/8/8/8/8/8/R3K2R w KQ", Square::E1);
        assert!(flags.long);
    }
}

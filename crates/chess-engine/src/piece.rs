//! Pieces as board entities.

use chess_core::{Color, PieceKind, Square, SquareSet};
use std::fmt;

/// Stable identifier of a piece, assigned when the board is set up and
/// never reused. A promoted pawn keeps its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u16);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Castling availability computed for a king during visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingFlags {
    pub short: bool,
    pub long: bool,
}

impl CastlingFlags {
    pub const NONE: CastlingFlags = CastlingFlags {
        short: false,
        long: false,
    };
}

/// A piece on the grid.
///
/// The square always matches the piece's slot in the board grid; only the
/// board moves pieces. The destination set is derived state, refreshed by
/// [`Board::visualize_all`](crate::Board::visualize_all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
    moves: SquareSet,
    castling: CastlingFlags,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            id,
            kind,
            color,
            square,
            has_moved: false,
            moves: SquareSet::EMPTY,
            castling: CastlingFlags::NONE,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// True once the piece has made a move (pawn double step and castling depend on it).
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Destinations from the last visualization pass.
    #[inline]
    pub fn moves(&self) -> SquareSet {
        self.moves
    }

    /// Castling availability from the last visualization pass. Always
    /// [`CastlingFlags::NONE`] for anything but a king.
    #[inline]
    pub fn castling(&self) -> CastlingFlags {
        self.castling
    }

    /// Returns true if `to` is in the last computed destination set.
    #[inline]
    pub fn is_legal(&self, to: Square) -> bool {
        self.moves.contains(to)
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.has_moved = moved;
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    pub(crate) fn set_visualized(&mut self, moves: SquareSet, castling: CastlingFlags) {
        self.moves = moves;
        self.castling = castling;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} on {}", self.color, self.kind, self.id, self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_piece_is_unmoved_and_unvisualized() {
        let p = Piece::new(PieceId(7), PieceKind::Knight, Color::Black, Square::B8);
        assert!(!p.has_moved());
        assert!(p.moves().is_empty());
        assert_eq!(p.castling(), CastlingFlags::NONE);
        assert_eq!(p.to_string(), "Black Knight #7 on b8");
    }

    #[test]
    fn is_legal_reads_visualized_moves() {
        let mut p = Piece::new(PieceId(1), PieceKind::Rook, Color::White, Square::A1);
        p.set_visualized(SquareSet::from_square(Square::A8), CastlingFlags::NONE);
        assert!(p.is_legal(Square::A8));
        assert!(!p.is_legal(Square::B1));
    }
}

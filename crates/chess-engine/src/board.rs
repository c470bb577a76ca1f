//! The board: an 8x8 grid of pieces plus the side to move.
//!
//! A [`Board`] is a plain value. Cloning it yields an independent copy with
//! equal content, which is how check detection and the search explore
//! hypothetical moves without disturbing the real position.

use crate::rules::{self, castling_squares, CastleSide};
use crate::{BoardError, CastlingFlags, Piece, PieceId};
use chess_core::{
    CastlingField, Color, Layout, Move, MoveFlag, PieceKind, Placement, PromotionPiece, Square,
    SquareSet,
};
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<Piece>; 64],
    side_to_move: Color,
    captured: Vec<Piece>,
    kings: [PieceId; 2],
}

impl Board {
    /// The standard starting position, White to move, with the side to move
    /// already visualized.
    pub fn standard() -> Self {
        Self::parse(Layout::STANDARD).expect("standard layout is valid")
    }

    /// Parses a layout string (see [`Layout`]) and builds a board from it.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        Self::from_layout(&Layout::parse(text)?)
    }

    /// Builds a board from a parsed layout.
    ///
    /// Pieces receive ids 1, 2, ... in reading order. Each color must have
    /// exactly one king, and the side that just moved must not be left in
    /// check. The side to move is visualized before returning.
    pub fn from_layout(layout: &Layout) -> Result<Self, BoardError> {
        let mut board = Board {
            grid: [None; 64],
            side_to_move: layout.side_to_move,
            captured: Vec::new(),
            kings: [PieceId(0); 2],
        };

        let mut king_counts = [0usize; 2];
        for (n, placement) in layout.placements.iter().enumerate() {
            let id = PieceId(n as u16 + 1);
            let mut piece = Piece::new(id, placement.kind, placement.color, placement.square);
            piece.set_moved(!starts_unmoved(placement, layout.castling));
            if placement.kind == PieceKind::King {
                king_counts[placement.color.index()] += 1;
                board.kings[placement.color.index()] = id;
            }
            board.grid[placement.square.index() as usize] = Some(piece);
        }

        for color in Color::BOTH {
            let count = king_counts[color.index()];
            if count != 1 {
                return Err(BoardError::KingCount { color, count });
            }
        }

        let waiting = board.side_to_move.opposite();
        if board.king_in_check(waiting) {
            return Err(BoardError::OpponentInCheck(waiting));
        }

        board.visualize_all(board.side_to_move, true);
        Ok(board)
    }

    /// Returns true if the coordinates name a square on the board.
    #[inline]
    pub fn is_in_bounds(file: i8, rank: i8) -> bool {
        Square::in_bounds(file, rank)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.grid[sq.index() as usize].as_ref()
    }

    /// Finds a piece by id.
    pub fn lookup(&self, id: PieceId) -> Result<&Piece, BoardError> {
        self.pieces()
            .find(|piece| piece.id() == id)
            .ok_or(BoardError::PieceNotFound(id))
    }

    #[inline]
    pub fn king_id(&self, color: Color) -> PieceId {
        self.kings[color.index()]
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    ///
    /// If the king is not on the board. Kings cannot be captured, so this
    /// only happens if the board invariants were broken.
    pub fn king_square(&self, color: Color) -> Square {
        self.lookup(self.king_id(color))
            .expect("each side keeps its king")
            .square()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hands the move to the other side. Destination lists are not
    /// refreshed.
    pub fn switch_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// All pieces on the grid, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color() == color)
    }

    /// Pieces removed from the grid by captures, oldest first.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Recomputes the destination list (and castling flags) of every piece
    /// of `color`.
    ///
    /// Lists go stale on any mutation of the grid and must be refreshed
    /// before they are trusted again.
    pub fn visualize_all(&mut self, color: Color, enforce_check_safety: bool) {
        for idx in 0..self.grid.len() {
            let piece = match self.grid[idx] {
                Some(piece) if piece.color() == color => piece,
                _ => continue,
            };
            let (moves, castling) = rules::visualize(&piece, self, enforce_check_safety);
            if let Some(slot) = self.grid[idx].as_mut() {
                slot.set_visualized(moves, castling);
            }
        }
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.king_in_check(self.side_to_move)
    }

    /// Returns true if any opposing piece attacks `color`'s king.
    pub fn king_in_check(&self, color: Color) -> bool {
        let king = self.king_square(color);
        self.pieces_of(color.opposite())
            .any(|piece| rules::pseudo_legal_moves(piece, self).contains(king))
    }

    /// Returns true if no piece of the side to move has a destination.
    ///
    /// Reads the stored lists, so the side to move must be visualized. This
    /// is also true for stalemate; no distinction is made.
    pub fn is_checkmate(&self) -> bool {
        !self.has_legal_moves(self.side_to_move)
    }

    /// Returns true if any piece of `color` has a non-empty stored list.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color).any(|piece| !piece.moves().is_empty())
    }

    /// Builds the move from `from` to `to`, filling in the flag.
    ///
    /// A king move onto a castling destination while castling is available
    /// becomes a castling move. A pawn reaching the far rank needs
    /// `promotion`; elsewhere `promotion` is ignored. Legality is not
    /// checked here.
    pub fn tag_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    ) -> Result<Move, BoardError> {
        let piece = self.piece_at(from).ok_or(BoardError::EmptySquare(from))?;
        if reaches_far_rank(piece, to) {
            let choice = promotion.ok_or(BoardError::PromotionRequired(to))?;
            return Ok(Move::new(from, to, MoveFlag::promote(choice)));
        }
        Ok(Move::new(from, to, castle_flag(piece, to)))
    }

    /// Every move available to `color` according to the stored lists, with
    /// promotions to `promotion`.
    pub fn moves_for(&self, color: Color, promotion: PromotionPiece) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces_of(color) {
            for to in piece.moves() {
                let flag = if reaches_far_rank(piece, to) {
                    MoveFlag::promote(promotion)
                } else {
                    castle_flag(piece, to)
                };
                moves.push(Move::new(piece.square(), to, flag));
            }
        }
        moves
    }

    /// Executes a move and its side effects: capture, castling rook
    /// relocation, promotion.
    ///
    /// Structural problems are rejected before the grid is touched. Whether
    /// the move is legal is the caller's concern. The side to move is not
    /// changed and destination lists are left stale. Returns the captured
    /// piece, if any.
    pub fn apply_move(&mut self, mv: Move) -> Result<Option<Piece>, BoardError> {
        let (from, to) = (mv.from(), mv.to());
        let piece = *self.piece_at(from).ok_or(BoardError::EmptySquare(from))?;

        if self
            .piece_at(to)
            .is_some_and(|target| target.kind() == PieceKind::King)
        {
            return Err(BoardError::KingCapture(to));
        }

        let promotion = mv.flag().promotion_piece();
        match (promotion, reaches_far_rank(&piece, to)) {
            (None, true) => return Err(BoardError::PromotionRequired(to)),
            (Some(_), false) => return Err(BoardError::InvalidPromotion(mv)),
            _ => {}
        }

        let rook_hop = match CastleSide::from_flag(mv.flag()) {
            Some(side) => {
                let squares = castling_squares(piece.color(), side);
                if piece.kind() != PieceKind::King
                    || from != squares.king_from
                    || to != squares.king_to
                {
                    return Err(BoardError::InvalidCastling(mv));
                }
                let rook_present = self.piece_at(squares.rook_from).is_some_and(|rook| {
                    rook.kind() == PieceKind::Rook && rook.color() == piece.color()
                });
                if !rook_present {
                    return Err(BoardError::CastlingRookMissing(squares.rook_from));
                }
                Some((squares.rook_from, squares.rook_to))
            }
            None => None,
        };

        let captured = self.relocate(from, to);
        self.mark_moved(to, promotion.map(PromotionPiece::kind));
        if let Some((rook_from, rook_to)) = rook_hop {
            self.relocate(rook_from, rook_to);
            self.mark_moved(rook_to, None);
        }
        if let Some(victim) = captured {
            tracing::trace!(%victim, "captured");
            self.captured.push(victim);
        }
        Ok(captured)
    }

    /// Moves whatever stands on `from` to `to`, returning the previous
    /// occupant of `to`. No rule is consulted.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.grid[from.index() as usize].take()?;
        piece.set_square(to);
        self.grid[to.index() as usize].replace(piece)
    }

    fn mark_moved(&mut self, sq: Square, promote_to: Option<PieceKind>) {
        if let Some(piece) = self.grid[sq.index() as usize].as_mut() {
            piece.set_moved(true);
            piece.set_visualized(SquareSet::EMPTY, CastlingFlags::NONE);
            if let Some(kind) = promote_to {
                piece.set_kind(kind);
            }
        }
    }
}

fn reaches_far_rank(piece: &Piece, to: Square) -> bool {
    piece.kind() == PieceKind::Pawn && to.rank() == piece.color().far_rank()
}

fn castle_flag(piece: &Piece, to: Square) -> MoveFlag {
    let flags = piece.castling();
    let color = piece.color();
    if flags.short && to == castling_squares(color, CastleSide::Short).king_to {
        MoveFlag::CastleShort
    } else if flags.long && to == castling_squares(color, CastleSide::Long).king_to {
        MoveFlag::CastleLong
    } else {
        MoveFlag::Normal
    }
}

/// Whether a piece from a layout should count as never having moved.
fn starts_unmoved(placement: &Placement, castling: Option<CastlingField>) -> bool {
    let color = placement.color;
    let back = color.back_rank();
    match placement.kind {
        PieceKind::Pawn => placement.square.rank() == color.pawn_rank(),
        PieceKind::King => {
            placement.square == Square::new(4, back)
                && castling.map_or(true, |rights| rights.short(color) || rights.long(color))
        }
        PieceKind::Rook if placement.square == Square::new(7, back) => {
            castling.map_or(true, |rights| rights.short(color))
        }
        PieceKind::Rook if placement.square == Square::new(0, back) => {
            castling.map_or(true, |rights| rights.long(color))
        }
        PieceKind::Rook => false,
        _ => true,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square::new(file, rank))
                    .map_or('.', |piece| piece.kind().to_char(piece.color()));
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board({} to move)", self.side_to_move)?;
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn standard_setup() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.king_id(Color::Black), PieceId(5));
        assert_eq!(board.king_id(Color::White), PieceId(29));
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert!(board.captured().is_empty());
    }

    #[test]
    fn standard_start_has_twenty_moves() {
        let board = Board::standard();
        assert_eq!(board.moves_for(Color::White, PromotionPiece::Queen).len(), 20);
        let king = board.piece_at(Square::E1).unwrap();
        assert!(king.moves().is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let board = Board::standard();
        let knight = board.lookup(PieceId(2)).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert_eq!(knight.square(), Square::B8);
        assert_eq!(
            board.lookup(PieceId(99)),
            Err(BoardError::PieceNotFound(PieceId(99)))
        );
    }

    #[test]
    fn bounds() {
        assert!(Board::is_in_bounds(0, 0));
        assert!(Board::is_in_bounds(7, 7));
        assert!(!Board::is_in_bounds(8, 0));
        assert!(!Board::is_in_bounds(0, -1));
    }

    #[test]
    fn layout_validation() {
        assert_eq!(
            Board::parse("8/8/8/8/8/8/8/4K3"),
            Err(BoardError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            Board::parse("4k3/8/8/8/8/8/8/3KK3"),
            Err(BoardError::KingCount {
                color: Color::White,
                count: 2
            })
        );
        // Black in check with White to move.
        assert_eq!(
            Board::parse("4k3/8/8/8/8/8/8/4R1K1 w -"),
            Err(BoardError::OpponentInCheck(Color::Black))
        );
        assert!(matches!(
            Board::parse("4k3/8/8"),
            Err(BoardError::Layout(_))
        ));
    }

    #[test]
    fn moved_flags_follow_layout() {
        let board = Board::parse("r3k2r/pppppppp/8/8/8/P7/1PPPPPPP/R3K2R w Kq").unwrap();
        assert!(!board.piece_at(Square::H1).unwrap().has_moved());
        assert!(board.piece_at(Square::A1).unwrap().has_moved());
        assert!(!board.piece_at(Square::E1).unwrap().has_moved());
        assert!(board.piece_at(Square::H8).unwrap().has_moved());
        assert!(board.piece_at(sq("a3")).unwrap().has_moved());
        assert!(!board.piece_at(sq("b2")).unwrap().has_moved());

        let board = Board::parse("4k3/8/8/8/8/8/8/R3K2R w -").unwrap();
        assert!(board.piece_at(Square::E1).unwrap().has_moved());
    }

    #[test]
    fn apply_plain_move_and_capture() {
        let mut board = Board::parse("4k3/8/8/3p4/4P3/8/8/4K3 w -").unwrap();
        let captured = board.apply_move(Move::normal(sq("e4"), sq("d5"))).unwrap();
        let captured = captured.unwrap();
        assert_eq!(captured.kind(), PieceKind::Pawn);
        assert_eq!(captured.color(), Color::Black);
        assert!(board.piece_at(sq("e4")).is_none());
        let pawn = board.piece_at(sq("d5")).unwrap();
        assert_eq!(pawn.color(), Color::White);
        assert!(pawn.has_moved());
        assert_eq!(board.captured().len(), 1);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn apply_castling_moves_the_rook() {
        let mut board = Board::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();
        let mv = board.tag_move(Square::E1, Square::G1, None).unwrap();
        assert_eq!(mv.flag(), MoveFlag::CastleShort);
        board.apply_move(mv).unwrap();
        assert_eq!(board.piece_at(Square::G1).unwrap().kind(), PieceKind::King);
        assert_eq!(board.piece_at(Square::F1).unwrap().kind(), PieceKind::Rook);
        assert!(board.piece_at(Square::H1).is_none());
        assert!(board.piece_at(Square::F1).unwrap().has_moved());

        board.switch_side();
        board.visualize_all(Color::Black, true);
        let mv = board.tag_move(Square::E8, Square::C8, None).unwrap();
        assert_eq!(mv.flag(), MoveFlag::CastleLong);
        board.apply_move(mv).unwrap();
        assert_eq!(board.piece_at(Square::C8).unwrap().kind(), PieceKind::King);
        assert_eq!(board.piece_at(Square::D8).unwrap().kind(), PieceKind::Rook);
        assert!(board.piece_at(Square::A8).is_none());
    }

    #[test]
    fn apply_promotion() {
        let mut board = Board::parse("4k3/1P6/8/8/8/8/8/4K3 w -").unwrap();
        let id = board.piece_at(sq("b7")).unwrap().id();
        let mv = Move::new(sq("b7"), Square::B8, MoveFlag::PromoteKnight);
        board.apply_move(mv).unwrap();
        let knight = board.piece_at(Square::B8).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert_eq!(knight.id(), id);
    }

    #[test]
    fn apply_rejects_structural_errors_without_mutating() {
        let board = Board::parse("4k3/1P6/8/8/8/8/8/R3K3 w Q").unwrap();

        let mut scratch = board.clone();
        assert_eq!(
            scratch.apply_move(Move::normal(sq("b7"), Square::B8)),
            Err(BoardError::PromotionRequired(Square::B8))
        );
        let bad = Move::new(Square::A1, sq("a2"), MoveFlag::PromoteQueen);
        assert_eq!(scratch.apply_move(bad), Err(BoardError::InvalidPromotion(bad)));
        let bad = Move::new(Square::E1, Square::G1, MoveFlag::CastleShort);
        assert_eq!(
            scratch.apply_move(bad),
            Err(BoardError::CastlingRookMissing(Square::H1))
        );
        let bad = Move::new(Square::A1, Square::C1, MoveFlag::CastleLong);
        assert_eq!(scratch.apply_move(bad), Err(BoardError::InvalidCastling(bad)));
        assert_eq!(
            scratch.apply_move(Move::normal(sq("d4"), sq("d5"))),
            Err(BoardError::EmptySquare(sq("d4")))
        );
        assert_eq!(scratch, board);
    }

    #[test]
    fn apply_rejects_king_capture() {
        let mut board = Board::parse("4k3/8/8/8/8/8/8/4K2R w -").unwrap();
        assert_eq!(
            board.apply_move(Move::normal(Square::H1, Square::H8)).map(|_| ()),
            Ok(())
        );
        assert_eq!(
            board.apply_move(Move::normal(Square::H8, Square::E8)),
            Err(BoardError::KingCapture(Square::E8))
        );
    }

    #[test]
    fn tag_move_requires_promotion_choice() {
        let board = Board::parse("4k3/1P6/8/8/8/8/8/4K3 w -").unwrap();
        assert_eq!(
            board.tag_move(sq("b7"), Square::B8, None),
            Err(BoardError::PromotionRequired(Square::B8))
        );
        let mv = board
            .tag_move(sq("b7"), Square::B8, Some(PromotionPiece::Rook))
            .unwrap();
        assert_eq!(mv.flag(), MoveFlag::PromoteRook);
        let mv = board
            .tag_move(Square::E1, sq("e2"), Some(PromotionPiece::Rook))
            .unwrap();
        assert_eq!(mv.flag(), MoveFlag::Normal);
    }

    #[test]
    fn check_and_checkmate() {
        // Back-rank mate.
        let board = Board::parse("3R2k1/5ppp/8/8/8/8/8/4K3 b -").unwrap();
        assert!(board.is_check());
        assert!(board.is_checkmate());

        // Stalemate reads the same.
        let board = Board::parse("7k/5Q2/6K1/8/8/8/8/8 b -").unwrap();
        assert!(!board.is_check());
        assert!(board.is_checkmate());

        let board = Board::standard();
        assert!(!board.is_check());
        assert!(!board.is_checkmate());
    }

    #[test]
    fn clone_is_independent() {
        let board = Board::standard();
        let mut copy = board.clone();
        assert_eq!(copy, board);
        copy.apply_move(Move::normal(sq("e2"), sq("e4"))).unwrap();
        assert_ne!(copy, board);
        assert!(board.piece_at(sq("e2")).is_some());
    }

    #[test]
    fn display_grid() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}

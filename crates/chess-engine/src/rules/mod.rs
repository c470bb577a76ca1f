//! Movement rules for each kind of piece.
//!
//! [`legal_moves`] answers "where can this piece go on this board". With
//! `enforce_check_safety` off it yields the pseudo-legal destinations, which
//! is what attack detection needs. With it on, destinations that would leave
//! the mover's own king attacked are dropped and castling is considered.

mod castling;

pub use castling::{castling_options, castling_squares, CastleSide, CastlingSquares};

use crate::check::would_expose_check;
use crate::{Board, CastlingFlags, Piece};
use chess_core::{PieceKind, Square, SquareSet};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Returns the destinations of `piece` on `board`.
///
/// Does not read or write the piece's stored destination set.
pub fn legal_moves(piece: &Piece, board: &Board, enforce_check_safety: bool) -> SquareSet {
    visualize(piece, board, enforce_check_safety).0
}

/// Destinations plus castling availability, as stored on the piece by
/// [`Board::visualize_all`].
pub(crate) fn visualize(
    piece: &Piece,
    board: &Board,
    enforce_check_safety: bool,
) -> (SquareSet, CastlingFlags) {
    let mut moves = pseudo_legal_moves(piece, board);
    if !enforce_check_safety {
        return (moves, CastlingFlags::NONE);
    }

    moves.retain(|to| !would_expose_check(board, piece, to));

    let castling = if piece.kind() == PieceKind::King {
        castling_options(piece, board)
    } else {
        CastlingFlags::NONE
    };
    if castling.short {
        moves.insert(castling_squares(piece.color(), CastleSide::Short).king_to);
    }
    if castling.long {
        moves.insert(castling_squares(piece.color(), CastleSide::Long).king_to);
    }
    (moves, castling)
}

/// Destinations by movement pattern alone, ignoring the safety of the
/// mover's king. Castling is never included.
pub fn pseudo_legal_moves(piece: &Piece, board: &Board) -> SquareSet {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(piece, board),
        PieceKind::Knight => steps(piece, board, &KNIGHT_OFFSETS),
        PieceKind::Bishop => rays(piece, board, &BISHOP_DIRECTIONS),
        PieceKind::Rook => rays(piece, board, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            let mut moves = rays(piece, board, &ROOK_DIRECTIONS);
            moves.extend(rays(piece, board, &BISHOP_DIRECTIONS));
            moves
        }
        PieceKind::King => steps(piece, board, &KING_OFFSETS),
    }
}

fn pawn_moves(piece: &Piece, board: &Board) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let from = piece.square();
    // A pawn on either edge rank has nowhere to go.
    if from.rank() == 0 || from.rank() == 7 {
        return moves;
    }

    let dir = piece.color().pawn_direction();
    if let Some(one) = from.offset(0, dir) {
        if board.piece_at(one).is_none() {
            moves.insert(one);
            if !piece.has_moved() {
                if let Some(two) = one.offset(0, dir) {
                    if board.piece_at(two).is_none() {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, dir) {
            if is_enemy(board, piece, target) {
                moves.insert(target);
            }
        }
    }
    moves
}

/// Fixed single-step patterns (knight, king).
fn steps(piece: &Piece, board: &Board, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(df, dr)| piece.square().offset(df, dr))
        .filter(|&to| board.piece_at(to).map_or(true, |p| p.color() != piece.color()))
        .collect()
}

/// Sliding rays: each stops at the edge, before a friendly piece, or on an
/// enemy piece.
fn rays(piece: &Piece, board: &Board, directions: &[(i8, i8)]) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = piece.square();
        while let Some(next) = cursor.offset(df, dr) {
            match board.piece_at(next) {
                None => moves.insert(next),
                Some(other) => {
                    if other.color() != piece.color() {
                        moves.insert(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
    moves
}

fn is_enemy(board: &Board, piece: &Piece, sq: Square) -> bool {
    board
        .piece_at(sq)
        .is_some_and(|other| other.color() != piece.color())
}

//! Error types for board and game operations.

use crate::PieceId;
use chess_core::{Color, Move, NotationError, PromotionError, Square};
use thiserror::Error;

/// Errors raised by [`Board`](crate::Board) construction and move application.
///
/// All of these are detected before the grid is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid layout: {0}")]
    Layout(#[from] NotationError),

    #[error("no piece with id {0} on the board")]
    PieceNotFound(PieceId),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("pawn reaching {0} needs a promotion choice")]
    PromotionRequired(Square),

    #[error("move {0} carries a promotion but is not a pawn reaching the far rank")]
    InvalidPromotion(Move),

    #[error("move {0} is not a castling move for a king on its home square")]
    InvalidCastling(Move),

    #[error("castling rook missing on {0}")]
    CastlingRookMissing(Square),

    #[error("move would capture the king on {0}")]
    KingCapture(Square),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("{0} is in check but it is not their turn")]
    OpponentInCheck(Color),
}

/// Errors returned to the collaborator driving a [`Game`](crate::Game).
///
/// None of these change the game state; the caller may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("square ({file}, {rank}) is off the board")]
    InvalidSquare { file: i8, rank: i8 },

    #[error("no {0} piece on {1}")]
    NotYourPiece(Color, Square),

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("invalid promotion choice: {0}")]
    InvalidPromotion(#[from] PromotionError),

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}


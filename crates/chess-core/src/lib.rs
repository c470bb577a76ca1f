//! Core value types for the duel engine.
//!
//! This crate provides the plain data shared by the rules engine and the
//! automated opponent:
//! - [`Color`], [`PieceKind`] and [`PromotionPiece`] for piece description
//! - [`Square`] and [`SquareSet`] for board coordinates and destination lists
//! - [`Move`] and [`MoveFlag`] for committed moves
//! - [`Layout`] for the textual board-layout notation

mod color;
mod mov;
mod notation;
mod piece;
mod square;
mod square_set;

pub use color::Color;
pub use mov::{Move, MoveFlag};
pub use notation::{CastlingField, Layout, NotationError, Placement};
pub use piece::{PieceKind, PromotionError, PromotionPiece};
pub use square::Square;
pub use square_set::{SquareSet, SquareSetIter};

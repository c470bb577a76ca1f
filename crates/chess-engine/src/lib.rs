//! Rules engine for a human-versus-computer chess game.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 grid of [`Piece`]s, move application and check detection
//! - [`rules`] - per-kind movement rules and castling availability
//! - [`would_expose_check`] - the filter that keeps a king out of check
//! - [`Game`] - turn flow, promotion choice and game-over detection
//!
//! # Model
//!
//! Every piece carries its own list of destinations. Lists are filled by
//! [`Board::visualize_all`] and go stale whenever the grid changes; code that
//! mutates a board refreshes the side about to move before reading them.
//! Boards are plain values: a clone is an independent copy, which is how
//! candidate moves are tried without touching the real position.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, MoveStatus, TurnResult};
//!
//! let mut game = Game::new();
//! let status = game
//!     .request_move("e2".parse().unwrap(), "e4".parse().unwrap())
//!     .unwrap();
//! assert_eq!(status, MoveStatus::Completed(TurnResult::Normal));
//! println!("{}", game.board());
//! ```

mod board;
mod check;
mod error;
mod game;
mod piece;
pub mod rules;

pub use board::Board;
pub use check::would_expose_check;
pub use error::{BoardError, GameError};
pub use game::{Game, GameObserver, GameState, MoveRecord, MoveStatus, TurnResult};
pub use piece::{CastlingFlags, Piece, PieceId};
pub use rules::legal_moves;

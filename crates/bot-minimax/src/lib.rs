//! Automated opponent.
//!
//! Builds the full move tree a fixed number of plies deep, scores the
//! leaves by material, backs the scores up by minimax and picks one of the
//! best first moves at random:
//!
//! ```
//! use bot_minimax::compute_automated_move;
//! use chess_engine::Board;
//!
//! let board = Board::standard();
//! let mv = compute_automated_move(&board, 1).unwrap();
//! assert!(board.piece_at(mv.from()).is_some());
//! ```
//!
//! The tree grows exponentially with depth; two or three plies is the
//! practical range.

mod error;
mod eval;
mod search;
mod tree;

pub use error::SearchError;
pub use eval::{evaluate, piece_value, MATE_SCORE};
pub use search::{backup, compute_automated_move, search, select_move, SearchReport};
pub use tree::{expand, SearchNode, TreeStats};

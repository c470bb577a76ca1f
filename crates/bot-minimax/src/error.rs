use chess_core::Color;
use thiserror::Error;

/// Errors returned by the search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("search depth must be at least one ply")]
    ZeroDepth,

    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
}

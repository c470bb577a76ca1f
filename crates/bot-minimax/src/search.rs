//! Minimax backup and move selection.

use crate::eval::MATE_SCORE;
use crate::tree::{expand_counted, SearchNode, TreeStats};
use crate::SearchError;
use chess_core::Move;
use chess_engine::Board;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Outcome of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Backed-up root score from the mover's point of view.
    pub score: i32,
    /// Number of root moves sharing the best score.
    pub ties: usize,
    pub nodes: u64,
    pub leaves: u64,
}

/// Backs minimax values up from the leaves and stores them on every node.
///
/// Leaves keep their evaluation. A node without children that was never
/// scored belongs to a side with no legal move; it is worth `-MATE_SCORE`
/// to a maximizing side and `MATE_SCORE` to a minimizing one.
pub fn backup(node: &mut SearchNode, maximizing: bool) -> i32 {
    if node.children.is_empty() {
        let score = node
            .score
            .unwrap_or(if maximizing { -MATE_SCORE } else { MATE_SCORE });
        node.score = Some(score);
        return score;
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for child in &mut node.children {
        let score = backup(child, !maximizing);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    node.score = Some(best);
    best
}

/// Picks uniformly at random among the root's children whose score equals
/// the root's. Run [`backup`] first.
pub fn select_move<R: Rng + ?Sized>(root: &SearchNode, rng: &mut R) -> Option<Move> {
    let best = root.score?;
    let ties: Vec<Move> = best_moves(root, best);
    ties.choose(rng).copied()
}

fn best_moves(root: &SearchNode, best: i32) -> Vec<Move> {
    root.children
        .iter()
        .filter(|child| child.score == Some(best))
        .filter_map(|child| child.mv)
        .collect()
}

/// Chooses a move for the side to move on `board`, searching `depth` plies.
pub fn compute_automated_move(board: &Board, depth: u32) -> Result<Move, SearchError> {
    search(board, depth, &mut rand::thread_rng()).map(|report| report.best_move)
}

/// Full search with a caller-supplied source of randomness for tie-breaking.
pub fn search<R: Rng + ?Sized>(
    board: &Board,
    depth: u32,
    rng: &mut R,
) -> Result<SearchReport, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }

    let side = board.side_to_move();
    let mut stats = TreeStats::default();
    let mut root = expand_counted(board, depth, side, &mut stats);
    if root.children.is_empty() {
        debug!(%side, "no legal moves to search");
        return Err(SearchError::NoLegalMoves(side));
    }

    let score = backup(&mut root, true);
    let ties = best_moves(&root, score);
    let best_move = *ties.choose(rng).ok_or(SearchError::NoLegalMoves(side))?;

    let report = SearchReport {
        best_move,
        score,
        ties: ties.len(),
        nodes: stats.nodes,
        leaves: stats.leaves,
    };
    info!(
        %side,
        depth,
        mv = %report.best_move,
        score,
        ties = report.ties,
        nodes = report.nodes,
        leaves = report.leaves,
        "automated move chosen"
    );
    Ok(report)
}

//! The move tree explored by the search.
//!
//! A tree is built fresh for every search and dropped once a move is
//! chosen. Each node owns its children and every branch works on its own
//! board clone.

use crate::eval::evaluate;
use chess_core::{Color, Move, PromotionPiece};
use chess_engine::Board;
use tracing::trace;

/// One reachable position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    /// The move that led here; `None` at the root.
    pub mv: Option<Move>,
    /// Evaluation for leaves, backed-up value for internal nodes once
    /// [`backup`](crate::backup) ran.
    pub score: Option<i32>,
    pub children: Vec<SearchNode>,
}

impl SearchNode {
    fn new(mv: Option<Move>) -> Self {
        SearchNode {
            mv,
            score: None,
            children: Vec::new(),
        }
    }
}

/// Counters collected while expanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: u64,
    pub leaves: u64,
}

/// Expands the tree of moves `depth` plies deep from `board`, scoring
/// leaves from `side`'s point of view.
///
/// The side to move is re-visualized on a clone at every level, so stale
/// lists on `board` do no harm. Pawns reaching the far rank become queens.
pub fn expand(board: &Board, depth: u32, side: Color) -> SearchNode {
    expand_counted(board, depth, side, &mut TreeStats::default())
}

pub(crate) fn expand_counted(
    board: &Board,
    depth: u32,
    side: Color,
    stats: &mut TreeStats,
) -> SearchNode {
    stats.nodes += 1;
    grow(board, None, depth, side, stats)
}

fn grow(
    board: &Board,
    mv: Option<Move>,
    depth: u32,
    side: Color,
    stats: &mut TreeStats,
) -> SearchNode {
    let mut node = SearchNode::new(mv);
    if depth == 0 {
        return node;
    }

    let mut current = board.clone();
    let to_move = current.side_to_move();
    current.visualize_all(to_move, true);

    for child_move in current.moves_for(to_move, PromotionPiece::Queen) {
        let mut next = current.clone();
        next.apply_move(child_move)
            .expect("moves from visualized lists apply cleanly");
        next.switch_side();
        stats.nodes += 1;

        let child = if depth == 1 {
            stats.leaves += 1;
            let score = evaluate(&next, side);
            trace!(mv = %child_move, score, "leaf");
            SearchNode {
                mv: Some(child_move),
                score: Some(score),
                children: Vec::new(),
            }
        } else {
            grow(&next, Some(child_move), depth - 1, side, stats)
        };
        node.children.push(child);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtree_size(node: &SearchNode) -> usize {
        1 + node.children.iter().map(subtree_size).sum::<usize>()
    }

    #[test]
    fn depth_zero_is_a_bare_root() {
        let root = expand(&Board::standard(), 0, Color::White);
        assert_eq!(root.mv, None);
        assert!(root.children.is_empty());
        assert_eq!(root.score, None);
    }

    #[test]
    fn depth_one_scores_every_move() {
        let root = expand(&Board::standard(), 1, Color::White);
        assert_eq!(root.children.len(), 20);
        assert!(root
            .children
            .iter()
            .all(|child| child.score == Some(0) && child.children.is_empty()));
    }

    #[test]
    fn depth_two_alternates_sides() {
        let mut stats = TreeStats::default();
        let root = expand_counted(&Board::standard(), 2, Color::White, &mut stats);
        assert_eq!(root.children.len(), 20);
        assert!(root.children.iter().all(|child| child.children.len() == 20));
        assert_eq!(stats.leaves, 400);
        assert_eq!(stats.nodes, 421);
        assert_eq!(subtree_size(&root), 421);
    }

    #[test]
    fn promotions_become_queens() {
        let board = Board::parse("4k3/P7/8/8/8/8/8/4K3 w -").unwrap();
        let root = expand(&board, 1, Color::White);
        let promotion = root
            .children
            .iter()
            .find(|child| child.mv.is_some_and(|mv| mv.flag().is_promotion()))
            .unwrap();
        // Queen (100) replaces the pawn (10).
        assert_eq!(promotion.score, Some(100));
    }
}

//! Turn handling between a human player and an automated opponent.
//!
//! [`Game`] owns the real [`Board`]. Moves arrive either from the human side
//! as square pairs (with a separate promotion choice when a pawn reaches the
//! far rank) or from the search as complete [`Move`]s. After every completed
//! move the side to move flips, its destinations are recomputed and the turn
//! is classified as normal, check or checkmate.

use crate::{Board, BoardError, GameError, PieceId};
use chess_core::{Color, Move, PieceKind, PromotionPiece, Square, SquareSet};
use std::fmt;
use tracing::{debug, info};

/// Classification of the position after a completed move, from the point of
/// view of the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Normal,
    Check,
    /// No legal move. Also reported for stalemate.
    Checkmate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove,
    /// A pawn move was accepted and waits for the piece to promote to.
    AwaitingPromotion { from: Square, to: Square },
    Finished { winner: Color },
}

/// Outcome of a human move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Completed(TurnResult),
    /// Call [`Game::promotion_choice`] to finish the move.
    PromotionPending,
}

/// One completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub color: Color,
    /// Kind of the mover before the move (a promoting pawn records `Pawn`).
    pub kind: PieceKind,
    pub mv: Move,
    pub captured: Option<PieceKind>,
}

/// Receives notifications as the game progresses.
pub trait GameObserver {
    /// The board changed; redraw it.
    fn position_changed(&mut self, _board: &Board) {}

    /// `mover` completed a move with the given result.
    fn turn_completed(&mut self, _mover: Color, _result: TurnResult) {}
}

pub struct Game {
    board: Board,
    state: GameState,
    history: Vec<MoveRecord>,
    observer: Option<Box<dyn GameObserver>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// A game continuing from `board`. The side to move is visualized; if it
    /// has no move the game starts finished.
    pub fn from_board(mut board: Board) -> Self {
        let side = board.side_to_move();
        board.visualize_all(side, true);
        let state = if board.is_checkmate() {
            GameState::Finished {
                winner: side.opposite(),
            }
        } else {
            GameState::AwaitingMove
        };
        Game {
            board,
            state,
            history: Vec::new(),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Finished { .. })
    }

    /// Destinations of the side-to-move piece on `from`; empty for anything
    /// else.
    pub fn legal_destinations(&self, from: Square) -> SquareSet {
        self.board
            .piece_at(from)
            .filter(|piece| piece.color() == self.side_to_move())
            .map_or(SquareSet::EMPTY, |piece| piece.moves())
    }

    /// [`request_move`](Self::request_move) with raw (file, rank) coordinates.
    pub fn request_move_coords(
        &mut self,
        from: (i8, i8),
        to: (i8, i8),
    ) -> Result<MoveStatus, GameError> {
        let from = square_at(from)?;
        let to = square_at(to)?;
        self.request_move(from, to)
    }

    /// Moves the side-to-move piece on `from` to `to`.
    ///
    /// A pawn reaching the far rank is held until
    /// [`promotion_choice`](Self::promotion_choice) is called. Rejected
    /// requests leave the game unchanged.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<MoveStatus, GameError> {
        self.ensure_awaiting_move()?;
        let side = self.side_to_move();
        let piece = self
            .board
            .piece_at(from)
            .filter(|piece| piece.color() == side)
            .ok_or(GameError::NotYourPiece(side, from))?;
        if !piece.is_legal(to) {
            debug!(%from, %to, "rejected illegal move");
            return Err(GameError::IllegalMove { from, to });
        }

        if piece.kind() == PieceKind::Pawn && to.rank() == side.far_rank() {
            debug!(%from, %to, "awaiting promotion choice");
            self.state = GameState::AwaitingPromotion { from, to };
            return Ok(MoveStatus::PromotionPending);
        }

        let mv = self.board.tag_move(from, to, None)?;
        self.commit(mv).map(MoveStatus::Completed)
    }

    /// Completes a pending promotion with `kind`.
    ///
    /// Anything but queen, rook, bishop or knight is rejected and the
    /// promotion stays pending.
    pub fn promotion_choice(&mut self, kind: PieceKind) -> Result<TurnResult, GameError> {
        let GameState::AwaitingPromotion { from, to } = self.state else {
            return Err(GameError::NoPendingPromotion);
        };
        let choice = PromotionPiece::try_from(kind)?;
        let mv = self.board.tag_move(from, to, Some(choice))?;
        self.commit(mv)
    }

    /// Plays a complete move for the side to move, as produced by the
    /// search.
    ///
    /// The castling flag is derived from the position; a promotion without a
    /// choice becomes a queen.
    pub fn play(&mut self, mv: Move) -> Result<TurnResult, GameError> {
        self.ensure_awaiting_move()?;
        let (from, to) = (mv.from(), mv.to());
        let side = self.side_to_move();
        let piece = self
            .board
            .piece_at(from)
            .filter(|piece| piece.color() == side)
            .ok_or(GameError::NotYourPiece(side, from))?;
        if !piece.is_legal(to) {
            return Err(GameError::IllegalMove { from, to });
        }
        let choice = mv
            .flag()
            .promotion_piece()
            .unwrap_or(PromotionPiece::Queen);
        let mv = self.board.tag_move(from, to, Some(choice))?;
        self.commit(mv)
    }

    fn ensure_awaiting_move(&self) -> Result<(), GameError> {
        match self.state {
            GameState::AwaitingMove => Ok(()),
            GameState::AwaitingPromotion { .. } => Err(GameError::PromotionPending),
            GameState::Finished { .. } => Err(GameError::GameOver),
        }
    }

    fn commit(&mut self, mv: Move) -> Result<TurnResult, GameError> {
        let mover = *self
            .board
            .piece_at(mv.from())
            .ok_or(BoardError::EmptySquare(mv.from()))?;
        let captured = self.board.apply_move(mv)?;
        self.history.push(MoveRecord {
            piece: mover.id(),
            color: mover.color(),
            kind: mover.kind(),
            mv,
            captured: captured.map(|piece| piece.kind()),
        });

        self.board.switch_side();
        let next = self.board.side_to_move();
        self.board.visualize_all(next, true);

        let result = if self.board.is_checkmate() {
            TurnResult::Checkmate
        } else if self.board.is_check() {
            TurnResult::Check
        } else {
            TurnResult::Normal
        };
        self.state = match result {
            TurnResult::Checkmate => GameState::Finished {
                winner: mover.color(),
            },
            _ => GameState::AwaitingMove,
        };
        info!(color = %mover.color(), %mv, ?result, "move played");

        if let Some(observer) = self.observer.as_mut() {
            observer.position_changed(&self.board);
            observer.turn_completed(mover.color(), result);
        }
        Ok(result)
    }
}

fn square_at((file, rank): (i8, i8)) -> Result<Square, GameError> {
    if !Board::is_in_bounds(file, rank) {
        return Err(GameError::InvalidSquare { file, rank });
    }
    Ok(Square::new(file as u8, rank as u8))
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("state", &self.state)
            .field("history", &self.history)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

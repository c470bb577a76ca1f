//! Turn flow as seen by a collaborator driving the game.

use chess_core::{Color, PieceKind, Square};
use chess_engine::{Board, Game, GameError, GameState, MoveStatus, TurnResult};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn rejected_requests_leave_the_board_alone() {
    let mut game = Game::new();
    let before = game.board().clone();

    assert!(matches!(
        game.request_move(sq("e2"), sq("e5")),
        Err(GameError::IllegalMove { .. })
    ));
    assert!(matches!(
        game.request_move(sq("e4"), sq("e5")),
        Err(GameError::NotYourPiece(Color::White, _))
    ));
    assert!(matches!(
        game.request_move_coords((0, 0), (0, 9)),
        Err(GameError::InvalidSquare { file: 0, rank: 9 })
    ));
    assert_eq!(game.board(), &before);
    assert_eq!(game.state(), GameState::AwaitingMove);

    // Retry with a legal move.
    assert_eq!(
        game.request_move(sq("e2"), sq("e4")),
        Ok(MoveStatus::Completed(TurnResult::Normal))
    );
}

#[test]
fn pinned_piece_cannot_move() {
    let board = Board::parse("4k3/4r3/8/8/8/8/4B3/4K3 w -").unwrap();
    let mut game = Game::from_board(board);
    assert!(game.legal_destinations(sq("e2")).is_empty());
    assert!(matches!(
        game.request_move(sq("e2"), sq("d3")),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn promotion_capture_with_check() {
    let board = Board::parse("3rk3/2P5/8/8/8/8/8/4K3 w -").unwrap();
    let mut game = Game::from_board(board);
    assert_eq!(
        game.request_move(sq("c7"), sq("d8")),
        Ok(MoveStatus::PromotionPending)
    );
    // Nothing happens until a choice arrives.
    assert_eq!(game.board().piece_at(sq("d8")).unwrap().kind(), PieceKind::Rook);
    assert!(matches!(
        game.promotion_choice(PieceKind::Pawn),
        Err(GameError::InvalidPromotion(_))
    ));

    assert_eq!(game.promotion_choice(PieceKind::Queen), Ok(TurnResult::Check));
    let record = game.history()[0];
    assert_eq!(record.kind, PieceKind::Pawn);
    assert_eq!(record.captured, Some(PieceKind::Rook));
    assert_eq!(game.board().captured().len(), 1);
    assert_eq!(game.board().piece_at(sq("d8")).unwrap().kind(), PieceKind::Queen);
}

#[test]
fn stalemate_ends_the_game_as_checkmate() {
    let board = Board::parse("7k/4Q3/6K1/8/8/8/8/8 w -").unwrap();
    let mut game = Game::from_board(board);
    assert_eq!(
        game.request_move(sq("e7"), sq("f7")),
        Ok(MoveStatus::Completed(TurnResult::Checkmate))
    );
    assert_eq!(
        game.state(),
        GameState::Finished {
            winner: Color::White
        }
    );
    assert!(!game.board().is_check());
}

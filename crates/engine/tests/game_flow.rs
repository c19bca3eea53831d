use engine::{
    Board, ChessMove, Game, GameEvent, GameOutcome, GameSnapshot, GameState, Piece, PieceColor,
    PieceKind, Position,
};

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

fn play(game: &mut Game, from: Position, to: Position) {
    assert!(game.select_piece(from), "cannot select {}", from);
    assert!(game.make_move(to), "cannot move {} to {}", from, to);
}

fn place(board: &mut Board, row: i8, col: i8, kind: PieceKind, color: PieceColor) {
    board.set(pos(row, col), Some(Piece::new(kind, color)));
}

#[test]
fn opening_round_trip() {
    let mut game = Game::new();
    play(&mut game, pos(6, 4), pos(4, 4)); // e2-e4
    play(&mut game, pos(1, 4), pos(3, 4)); // e7-e5
    play(&mut game, pos(7, 6), pos(5, 5)); // g1-f3

    let knight = game.board().get(pos(5, 5)).unwrap();
    assert_eq!(knight.kind, PieceKind::Knight);
    assert_eq!(knight.color, PieceColor::White);
    assert_eq!(
        game.board().get(pos(4, 4)).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
    assert_eq!(
        game.board().get(pos(3, 4)).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
    assert_eq!(game.current_player(), PieceColor::Black);
    assert_eq!(game.move_history().len(), 3);
}

#[test]
fn selection_is_idempotent() {
    let mut game = Game::new();
    assert!(game.select_piece(pos(6, 4)));
    let first = game.valid_moves().to_vec();
    assert!(game.select_piece(pos(6, 4)));
    assert_eq!(game.valid_moves(), first.as_slice());
}

#[test]
fn legal_moves_never_leave_own_king_in_check() {
    let mut game = Game::new();
    play(&mut game, pos(6, 4), pos(4, 4));
    play(&mut game, pos(1, 5), pos(2, 5));
    play(&mut game, pos(7, 3), pos(3, 7)); // Qd1-h5, eyeing the weakened king

    let board = game.board();
    let mover = game.current_player();
    for row in 0..8 {
        for col in 0..8 {
            let from = pos(row, col);
            let piece = match board.get(from) {
                Some(piece) if piece.color == mover => piece,
                _ => continue,
            };
            for to in board.legal_moves(from, game.en_passant_target()) {
                let mut test_board = board.clone();
                if piece.kind == PieceKind::Pawn && Some(to) == game.en_passant_target() {
                    test_board.set(pos(from.row, to.col), None);
                }
                test_board.make_move(from, to);
                assert!(
                    !test_board.is_in_check(mover),
                    "{} to {} leaves the {} king in check",
                    from,
                    to,
                    mover
                );
            }
        }
    }
}

#[test]
fn kingside_castling_through_the_game_api() {
    let mut board = Board::empty();
    place(&mut board, 7, 4, PieceKind::King, PieceColor::White);
    place(&mut board, 7, 7, PieceKind::Rook, PieceColor::White);
    place(&mut board, 0, 4, PieceKind::King, PieceColor::Black);

    let mut game = Game::new();
    game.restore_game_state(board, Vec::new(), None, PieceColor::White, GameState::Playing);

    assert!(game.select_piece(pos(7, 4)));
    assert!(game.valid_moves().contains(&pos(7, 6)));
    assert!(game.make_move(pos(7, 6)));

    let king = game.board().get(pos(7, 6)).unwrap();
    let rook = game.board().get(pos(7, 5)).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved);
    assert!(rook.has_moved);
    assert!(game.board().get(pos(7, 7)).is_none());
    assert!(game.board().get(pos(7, 4)).is_none());
}

#[test]
fn en_passant_capture_removes_the_bypassing_pawn() {
    let mut game = Game::new();
    play(&mut game, pos(6, 7), pos(5, 7)); // h2-h3
    play(&mut game, pos(1, 3), pos(3, 3)); // d7-d5
    play(&mut game, pos(5, 7), pos(4, 7)); // h3-h4
    play(&mut game, pos(3, 3), pos(4, 3)); // d5-d4
    play(&mut game, pos(6, 4), pos(4, 4)); // e2-e4, passing the black pawn

    assert_eq!(game.en_passant_target(), Some(pos(5, 4)));

    assert!(game.select_piece(pos(4, 3)));
    assert!(game.valid_moves().contains(&pos(5, 4)));
    assert!(game.make_move(pos(5, 4)));

    // the white pawn is gone from e4, not from the capture square
    assert!(game.board().get(pos(4, 4)).is_none());
    assert_eq!(
        game.board().get(pos(5, 4)).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, PieceColor::Black))
    );

    let last: &ChessMove = game.move_history().last().unwrap();
    let captured = last.captured.unwrap();
    assert_eq!(captured.kind, PieceKind::Pawn);
    assert_eq!(captured.color, PieceColor::White);
}

#[test]
fn promotion_needs_the_dedicated_operation() {
    let mut board = Board::empty();
    place(&mut board, 1, 4, PieceKind::Pawn, PieceColor::White);
    place(&mut board, 7, 0, PieceKind::King, PieceColor::White);
    place(&mut board, 2, 7, PieceKind::King, PieceColor::Black);

    let mut game = Game::new();
    game.restore_game_state(board, Vec::new(), None, PieceColor::White, GameState::Playing);

    assert!(game.select_piece(pos(1, 4)));
    assert!(game.valid_moves().contains(&pos(0, 4)));

    // the plain path refuses the promotion and mutates nothing
    assert!(!game.make_move(pos(0, 4)));
    assert_eq!(
        game.board().get(pos(1, 4)).map(|p| p.kind),
        Some(PieceKind::Pawn)
    );
    assert_eq!(game.current_player(), PieceColor::White);
    assert_eq!(game.selected_position(), Some(pos(1, 4)));

    assert!(game.make_move_with_promotion(pos(0, 4), PieceKind::Queen));
    let queen = game.board().get(pos(0, 4)).unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert_eq!(queen.color, PieceColor::White);
    assert!(queen.has_moved);
    assert_eq!(game.current_player(), PieceColor::Black);
}

#[test]
fn stalemating_move_is_reported_as_stalemate_only() {
    let mut board = Board::empty();
    place(&mut board, 0, 0, PieceKind::King, PieceColor::Black);
    place(&mut board, 2, 1, PieceKind::King, PieceColor::White);
    place(&mut board, 6, 2, PieceKind::Queen, PieceColor::White);

    let mut game = Game::new();
    game.restore_game_state(board, Vec::new(), None, PieceColor::White, GameState::Playing);
    game.drain_events();

    play(&mut game, pos(6, 2), pos(1, 2)); // Qc2-c7, smothering a8

    assert_eq!(game.state(), GameState::Stalemate);
    assert!(game.board().is_stalemate(PieceColor::Black));
    assert!(!game.board().is_checkmate(PieceColor::Black));
    assert!(!game.board().is_in_check(PieceColor::Black));

    let events = game.drain_events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], GameEvent::PieceSelected { .. }));
    assert_eq!(
        events[1],
        GameEvent::StateChanged {
            state: GameState::Stalemate,
            current_player: PieceColor::Black,
        }
    );
    assert_eq!(
        events[2],
        GameEvent::GameEnded {
            outcome: GameOutcome::Draw,
            state: GameState::Stalemate,
        }
    );
    assert_eq!(
        events[3],
        GameEvent::MoveMade {
            mv: *game.move_history().last().unwrap(),
        }
    );

    // no further input is accepted
    assert!(!game.select_piece(pos(2, 1)));
}

#[test]
fn fools_mate_ends_the_game_with_black_winning() {
    let mut game = Game::new();
    play(&mut game, pos(6, 5), pos(5, 5)); // f2-f3
    play(&mut game, pos(1, 4), pos(3, 4)); // e7-e5
    play(&mut game, pos(6, 6), pos(4, 6)); // g2-g4
    game.drain_events();

    assert!(game.select_piece(pos(0, 3)));
    assert!(game.make_move(pos(4, 7))); // Qd8-h4 mate

    assert_eq!(game.state(), GameState::Checkmate);
    assert!(game.board().is_checkmate(PieceColor::White));
    assert!(game.board().is_in_check(PieceColor::White));
    assert!(!game.board().is_stalemate(PieceColor::White));

    let events = game.drain_events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], GameEvent::PieceSelected { .. }));
    assert_eq!(
        events[1],
        GameEvent::StateChanged {
            state: GameState::Checkmate,
            current_player: PieceColor::White,
        }
    );
    assert_eq!(
        events[2],
        GameEvent::GameEnded {
            outcome: GameOutcome::BlackWins,
            state: GameState::Checkmate,
        }
    );
    assert!(matches!(events[3], GameEvent::MoveMade { .. }));

    // checkmate is terminal: selection and movement are refused
    assert!(!game.select_piece(pos(6, 0)));
    assert!(!game.make_move(pos(5, 0)));
}

#[test]
fn undo_rewinds_a_capture() {
    let mut game = Game::new();
    play(&mut game, pos(6, 4), pos(4, 4)); // e2-e4
    play(&mut game, pos(1, 3), pos(3, 3)); // d7-d5
    play(&mut game, pos(4, 4), pos(3, 3)); // e4xd5

    assert!(game.can_undo());
    game.undo_move();

    assert_eq!(game.current_player(), PieceColor::White);
    assert_eq!(game.move_history().len(), 2);
    assert_eq!(
        game.board().get(pos(4, 4)).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, PieceColor::White))
    );
    assert_eq!(
        game.board().get(pos(3, 3)).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, PieceColor::Black))
    );
    assert!(game.board().get(pos(3, 4)).is_none());
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn undo_on_empty_history_is_a_no_op() {
    let mut game = Game::new();
    game.undo_move();
    assert_eq!(game.current_player(), PieceColor::White);
    assert!(game.move_history().is_empty());
}

#[test]
fn snapshot_round_trip_preserves_castling_rights() {
    let mut board = Board::empty();
    place(&mut board, 7, 4, PieceKind::King, PieceColor::White);
    place(&mut board, 7, 7, PieceKind::Rook, PieceColor::White);
    place(&mut board, 0, 4, PieceKind::King, PieceColor::Black);
    place(&mut board, 1, 0, PieceKind::Pawn, PieceColor::Black);

    let mut game = Game::new();
    game.restore_game_state(board, Vec::new(), None, PieceColor::White, GameState::Playing);

    // castling is on the table before the king ever moves
    assert!(game.select_piece(pos(7, 4)));
    assert!(game.valid_moves().contains(&pos(7, 6)));

    // shuffle the king off and back; the right must stay lost
    play(&mut game, pos(7, 4), pos(7, 3)); // Ke1-d1
    play(&mut game, pos(1, 0), pos(2, 0)); // a7-a6
    play(&mut game, pos(7, 3), pos(7, 4)); // Kd1-e1
    play(&mut game, pos(2, 0), pos(3, 0)); // a6-a5

    let snapshot = GameSnapshot::capture(&game);
    let mut restored = Game::new();
    snapshot.restore(&mut restored).unwrap();

    let king = restored.board().get(pos(7, 4)).unwrap();
    assert!(king.has_moved);

    assert!(restored.select_piece(pos(7, 4)));
    assert!(!restored.valid_moves().contains(&pos(7, 6)));
}

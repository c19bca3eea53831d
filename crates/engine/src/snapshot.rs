use crate::board::Board;
use crate::game::Game;
use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("piece record at ({row}, {col}) is outside the board")]
    InvalidSquare { row: i8, col: i8 },
    #[error("more than one piece recorded for ({row}, {col})")]
    DuplicateSquare { row: i8, col: i8 },
}

/// One occupied square: coordinates, identity, and the moved flag that
/// castling and pawn double-move eligibility depend on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceRecord {
    pub row: i8,
    pub col: i8,
    pub kind: PieceKind,
    pub color: PieceColor,
    pub has_moved: bool,
}

/// One history entry. Mirrors [`ChessMove`]: the promotion kind is not part
/// of the engine's move record, so it is not part of the save format either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub kind: PieceKind,
    pub color: PieceColor,
    pub captured_kind: Option<PieceKind>,
    pub captured_color: Option<PieceColor>,
}

/// A complete save-game: everything the persistence collaborator reads off
/// the engine boundary, as plain serializable data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub pieces: Vec<PieceRecord>,
    pub moves: Vec<MoveRecord>,
    pub current_player: PieceColor,
    pub state: GameState,
    pub en_passant_target: Option<Position>,
}

impl GameSnapshot {
    /// Reads all 64 squares and the move log out of a live game.
    pub fn capture(game: &Game) -> Self {
        let mut pieces = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = game.board().get(Position::new(row, col)) {
                    pieces.push(PieceRecord {
                        row,
                        col,
                        kind: piece.kind,
                        color: piece.color,
                        has_moved: piece.has_moved,
                    });
                }
            }
        }

        let moves = game
            .move_history()
            .iter()
            .map(|mv| MoveRecord {
                from: mv.from,
                to: mv.to,
                kind: mv.piece.kind,
                color: mv.piece.color,
                captured_kind: mv.captured.map(|p| p.kind),
                captured_color: mv.captured.map(|p| p.color),
            })
            .collect();

        Self {
            pieces,
            moves,
            current_player: game.current_player(),
            state: game.state(),
            en_passant_target: game.en_passant_target(),
        }
    }

    /// Rebuilds a board by setting each recorded square directly (never by
    /// replaying moves) and re-arms `game` without re-deriving legality.
    pub fn restore(&self, game: &mut Game) -> Result<(), SnapshotError> {
        let mut board = Board::empty();
        for record in &self.pieces {
            let position = Position::new(record.row, record.col);
            if !position.is_valid() {
                return Err(SnapshotError::InvalidSquare {
                    row: record.row,
                    col: record.col,
                });
            }
            if board.get(position).is_some() {
                return Err(SnapshotError::DuplicateSquare {
                    row: record.row,
                    col: record.col,
                });
            }
            board.set(
                position,
                Some(Piece {
                    kind: record.kind,
                    color: record.color,
                    has_moved: record.has_moved,
                }),
            );
        }

        // The move log feeds undo replay and display only; the moved flags
        // of its pieces are not persisted and come back unset.
        let history = self
            .moves
            .iter()
            .map(|record| ChessMove {
                from: record.from,
                to: record.to,
                piece: Piece::new(record.kind, record.color),
                captured: match (record.captured_kind, record.captured_color) {
                    (Some(kind), Some(color)) => Some(Piece::new(kind, color)),
                    _ => None,
                },
            })
            .collect();

        game.restore_game_state(
            board,
            history,
            self.en_passant_target,
            self.current_player,
            self.state,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_restore_round_trip() {
        let mut game = Game::new();
        game.select_piece(Position::new(6, 4));
        game.make_move(Position::new(4, 4));
        game.select_piece(Position::new(1, 3));
        game.make_move(Position::new(3, 3));
        game.drain_events();

        let snapshot = GameSnapshot::capture(&game);
        assert_eq!(snapshot.pieces.len(), 32);
        assert_eq!(snapshot.moves.len(), 2);
        assert_eq!(snapshot.current_player, PieceColor::White);
        assert_eq!(snapshot.en_passant_target, Some(Position::new(2, 3)));

        let mut restored = Game::new();
        snapshot.restore(&mut restored).unwrap();

        assert_eq!(restored.current_player(), PieceColor::White);
        assert_eq!(restored.state(), GameState::Playing);
        assert_eq!(restored.en_passant_target(), Some(Position::new(2, 3)));
        assert_eq!(restored.move_history().len(), 2);
        for row in 0..8 {
            for col in 0..8 {
                let position = Position::new(row, col);
                assert_eq!(
                    game.board().get(position),
                    restored.board().get(position),
                    "square {} differs",
                    position
                );
            }
        }
    }

    #[test]
    fn restore_rejects_out_of_range_records() {
        let snapshot = GameSnapshot {
            pieces: vec![PieceRecord {
                row: 8,
                col: 0,
                kind: PieceKind::Rook,
                color: PieceColor::White,
                has_moved: false,
            }],
            moves: Vec::new(),
            current_player: PieceColor::White,
            state: GameState::Playing,
            en_passant_target: None,
        };

        let mut game = Game::new();
        assert!(matches!(
            snapshot.restore(&mut game),
            Err(SnapshotError::InvalidSquare { row: 8, col: 0 })
        ));
    }

    #[test]
    fn restore_rejects_duplicate_squares() {
        let record = PieceRecord {
            row: 3,
            col: 3,
            kind: PieceKind::Pawn,
            color: PieceColor::Black,
            has_moved: true,
        };
        let snapshot = GameSnapshot {
            pieces: vec![record.clone(), record],
            moves: Vec::new(),
            current_player: PieceColor::Black,
            state: GameState::Playing,
            en_passant_target: None,
        };

        let mut game = Game::new();
        assert!(matches!(
            snapshot.restore(&mut game),
            Err(SnapshotError::DuplicateSquare { row: 3, col: 3 })
        ));
    }

    #[test]
    fn json_round_trip_preserves_the_snapshot() {
        let mut game = Game::new();
        game.select_piece(Position::new(6, 6));
        game.make_move(Position::new(4, 6));
        game.drain_events();

        let snapshot = GameSnapshot::capture(&game);
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();

        let mut restored = Game::new();
        decoded.restore(&mut restored).unwrap();
        assert_eq!(restored.en_passant_target(), game.en_passant_target());
        assert_eq!(
            restored.board().get(Position::new(4, 6)),
            game.board().get(Position::new(4, 6))
        );
    }
}

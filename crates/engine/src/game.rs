use crate::board::Board;
use crate::events::GameEvent;
use crate::types::*;
use std::collections::VecDeque;

/// The turn state machine wrapping a [`Board`].
///
/// All geometry and legality questions are delegated to the board; this is
/// the only place that mutates turn-level state (current player, selection,
/// history, en passant target, game state) and the only event source.
/// A front end drives it turn by turn: `select_piece`, then `make_move` or
/// `make_move_with_promotion`, draining events after each call.
pub struct Game {
    board: Board,
    current_player: PieceColor,
    state: GameState,
    selected_position: Option<Position>,
    valid_moves: Vec<Position>,
    move_history: Vec<ChessMove>,
    en_passant_target: Option<Position>,
    events: VecDeque<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: PieceColor::White,
            state: GameState::Playing,
            selected_position: None,
            valid_moves: Vec::new(),
            move_history: Vec::new(),
            en_passant_target: None,
            events: VecDeque::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> PieceColor {
        self.current_player
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.selected_position
    }

    /// Legal destinations for the current selection. Empty when nothing is
    /// selected.
    pub fn valid_moves(&self) -> &[Position] {
        &self.valid_moves
    }

    pub fn move_history(&self) -> &[ChessMove] {
        &self.move_history
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    /// Pops the oldest pending notification.
    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    /// Takes every pending notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Selects the piece at `position` and computes its legal moves.
    /// Fails (no state change) for empty squares, opponent pieces, or a
    /// finished game.
    pub fn select_piece(&mut self, position: Position) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let piece = match self.board.get(position) {
            Some(piece) => piece,
            None => return false,
        };
        if piece.color != self.current_player {
            return false;
        }

        self.selected_position = Some(position);
        self.valid_moves = self.board.legal_moves(position, self.en_passant_target);
        self.events.push_back(GameEvent::PieceSelected {
            position,
            valid_moves: self.valid_moves.clone(),
        });
        true
    }

    /// Moves the selected piece to `to`.
    ///
    /// Fails with no mutation when there is no selection, `to` is not among
    /// the valid moves, or the game is over. A pawn reaching the last rank
    /// also returns false without mutating anything: promotion must go
    /// through [`make_move_with_promotion`], and detecting the situation is
    /// the front end's job (pawn moving to row 0 or 7).
    pub fn make_move(&mut self, to: Position) -> bool {
        let (from, piece) = match self.movable_selection(to) {
            Some(pair) => pair,
            None => return false,
        };

        if piece.kind == PieceKind::Pawn && (to.row == 0 || to.row == 7) {
            return false;
        }

        self.commit_move(from, to, piece, None);
        true
    }

    /// Same preconditions and effects as [`make_move`](Self::make_move), but
    /// carries the promotion kind so the pawn-promotion case goes through.
    pub fn make_move_with_promotion(&mut self, to: Position, promoted_to: PieceKind) -> bool {
        let (from, piece) = match self.movable_selection(to) {
            Some(pair) => pair,
            None => return false,
        };

        self.commit_move(from, to, piece, Some(promoted_to));
        true
    }

    /// Shared preconditions of both move operations: game still running, a
    /// selection exists, `to` was computed legal, and the selected piece
    /// still belongs to the mover.
    fn movable_selection(&self, to: Position) -> Option<(Position, Piece)> {
        if self.state.is_terminal() {
            return None;
        }
        let from = self.selected_position?;
        if !self.valid_moves.contains(&to) {
            return None;
        }
        let piece = self.board.get(from)?;
        if piece.color != self.current_player {
            return None;
        }
        Some((from, piece))
    }

    fn commit_move(&mut self, from: Position, to: Position, piece: Piece, promotion: Option<PieceKind>) {
        // En passant: the captured pawn sits beside the destination, one row
        // back toward the mover, not on the destination itself.
        let mut captured = self.board.get(to);
        if piece.kind == PieceKind::Pawn && Some(to) == self.en_passant_target {
            let captured_row = match self.current_player {
                PieceColor::White => to.row + 1,
                PieceColor::Black => to.row - 1,
            };
            let captured_position = Position::new(captured_row, to.col);
            captured = self.board.get(captured_position);
            self.board.set(captured_position, None);
        }

        match promotion {
            Some(kind) => self.board.make_move_with_promotion(from, to, kind),
            None => self.board.make_move(from, to),
        }

        // A double pawn advance arms en passant for the reply; anything else
        // clears it.
        self.en_passant_target = None;
        if piece.kind == PieceKind::Pawn && (to.row - from.row).abs() == 2 {
            let skipped_row = match self.current_player {
                PieceColor::White => to.row + 1,
                PieceColor::Black => to.row - 1,
            };
            self.en_passant_target = Some(Position::new(skipped_row, to.col));
        }

        let mv = ChessMove {
            from,
            to,
            piece,
            captured,
        };
        self.move_history.push(mv);

        self.selected_position = None;
        self.valid_moves.clear();
        self.current_player = self.current_player.opposite();

        self.update_game_state();
        self.events.push_back(GameEvent::MoveMade { mv });
    }

    /// Recomputes `state` for the side to move next. Checkmate wins over
    /// stalemate, which wins over check, which wins over plain playing.
    fn update_game_state(&mut self) {
        let previous = self.state;

        self.state = if self.board.is_checkmate(self.current_player) {
            GameState::Checkmate
        } else if self.board.is_stalemate(self.current_player) {
            GameState::Stalemate
        } else if self.board.is_in_check(self.current_player) {
            GameState::Check
        } else {
            GameState::Playing
        };

        if self.state != previous {
            self.events.push_back(GameEvent::StateChanged {
                state: self.state,
                current_player: self.current_player,
            });
            if self.state.is_terminal() {
                self.events.push_back(GameEvent::GameEnded {
                    outcome: self.outcome(),
                    state: self.state,
                });
            }
        }
    }

    /// Outcome of a finished game: on checkmate the player who just moved
    /// wins; stalemate and accepted draws are draws.
    fn outcome(&self) -> GameOutcome {
        match self.state {
            GameState::Checkmate => match self.current_player {
                PieceColor::White => GameOutcome::BlackWins,
                PieceColor::Black => GameOutcome::WhiteWins,
            },
            _ => GameOutcome::Draw,
        }
    }

    /// Announces a draw offer by the current player. State is untouched;
    /// the opponent answers through [`accept_draw`](Self::accept_draw).
    pub fn request_draw(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.events.push_back(GameEvent::DrawRequested {
            by: self.current_player,
        });
    }

    pub fn accept_draw(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.state = GameState::Draw;
        self.events.push_back(GameEvent::StateChanged {
            state: self.state,
            current_player: self.current_player,
        });
    }

    pub fn can_undo(&self) -> bool {
        !self.move_history.is_empty()
    }

    /// Reverts the last committed move by rebuilding the board from the
    /// start and replaying the remaining history.
    ///
    /// Replay uses only `from`/`to`: a promotion earlier in the game comes
    /// back as a queen and an en-passant victim is not re-removed. Both
    /// quirks are inherited reference behavior (see DESIGN.md) and kept
    /// until the desired semantics are confirmed.
    pub fn undo_move(&mut self) {
        if self.move_history.pop().is_none() {
            return;
        }

        let mut board = Board::new();
        for mv in &self.move_history {
            board.make_move(mv.from, mv.to);
        }
        self.board = board;

        self.current_player = self.current_player.opposite();
        self.selected_position = None;
        self.valid_moves.clear();
        self.update_game_state();
    }

    /// Resets everything to a fresh game, White to move.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.current_player = PieceColor::White;
        self.state = GameState::Playing;
        self.selected_position = None;
        self.valid_moves.clear();
        self.move_history.clear();
        self.en_passant_target = None;
        self.events.push_back(GameEvent::StateChanged {
            state: self.state,
            current_player: self.current_player,
        });
    }

    /// Re-arms the game from externally reconstructed state (persistence
    /// boundary). No legality is re-derived; the caller vouches for the
    /// board/history pair.
    pub fn restore_game_state(
        &mut self,
        board: Board,
        move_history: Vec<ChessMove>,
        en_passant_target: Option<Position>,
        current_player: PieceColor,
        state: GameState,
    ) {
        self.board = board;
        self.move_history = move_history;
        self.en_passant_target = en_passant_target;
        self.current_player = current_player;
        self.state = state;
        self.selected_position = None;
        self.valid_moves.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

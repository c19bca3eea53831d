use crate::types::*;

/// Notifications raised by [`Game`](crate::Game) operations.
///
/// Delivery is synchronous and same-thread: an operation pushes its events
/// before returning, and the front end drains the queue right after the
/// call. Nothing is delivered behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece of the current player was selected; carries the legal
    /// destinations computed for that square.
    PieceSelected {
        position: Position,
        valid_moves: Vec<Position>,
    },
    /// A move was committed and appended to the history.
    MoveMade { mv: ChessMove },
    /// The game state changed (fired only on an actual change).
    StateChanged {
        state: GameState,
        current_player: PieceColor,
    },
    /// The state change reached a terminal state.
    GameEnded {
        outcome: GameOutcome,
        state: GameState,
    },
    /// The current player offered a draw; no state change yet.
    DrawRequested { by: PieceColor },
}

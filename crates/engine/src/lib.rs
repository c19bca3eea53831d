pub mod board;
pub mod events;
pub mod game;
pub mod logger;
pub mod snapshot;
pub mod types;

pub use board::Board;
pub use events::GameEvent;
pub use game::Game;
pub use logger::GameLogger;
pub use snapshot::{GameSnapshot, MoveRecord, PieceRecord, SnapshotError};
pub use types::*;

use crate::types::{ChessMove, GameOutcome, GameState};
use std::fs::{self, File};
use std::io::Write;

/// Accumulates a per-game text log and writes it under `logs/` when the
/// game ends. The buffer lives in memory so logging never blocks a move.
#[derive(Debug)]
pub struct GameLogger {
    log_buffer: String,
    move_count: u32,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            move_count: 0,
        };

        logger.log("=== Game Log Started ===");
        logger.log(&format!(
            "Date: {}",
            chrono::Local::now().format("%m/%d/%Y %H:%M:%S")
        ));
        logger
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_move(&mut self, mv: &ChessMove) {
        self.move_count += 1;
        let entry = format!("{}. {}", self.move_count, mv);
        self.log(&entry);
    }

    pub fn log_undo(&mut self, mv: &ChessMove) {
        let entry = format!("UNDO: {}", mv);
        self.log(&entry);
    }

    pub fn log_game_over(&mut self, outcome: GameOutcome, state: GameState) {
        let entry = format!("Game over: {} ({})", outcome, state);
        self.log(&entry);
    }

    /// Writes the buffer to `logs/<timestamp>.txt` and returns the file
    /// name. `reason` is appended as the closing entry.
    pub fn save_to_file(&mut self, reason: &str) -> Result<String, String> {
        if let Err(e) = fs::create_dir_all("logs") {
            return Err(format!("Failed to create logs directory: {}", e));
        }

        let now = chrono::Local::now();
        let filename = format!("logs/{}.txt", now.format("%m_%d_%Y_%H_%M_%S"));

        self.log(&format!("Game ended: {} - Saving log", reason));

        match File::create(&filename) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(self.log_buffer.as_bytes()) {
                    return Err(format!("Failed to write log file: {}", e));
                }
                Ok(filename)
            }
            Err(e) => Err(format!("Failed to create log file: {}", e)),
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceColor, PieceKind, Position};

    #[test]
    fn moves_are_numbered_in_commit_order() {
        let mut logger = GameLogger::new();
        let mv = ChessMove {
            from: Position::new(6, 4),
            to: Position::new(4, 4),
            piece: Piece::new(PieceKind::Pawn, PieceColor::White),
            captured: None,
        };
        logger.log_move(&mv);
        logger.log_move(&mv);
        logger.log_undo(&mv);
        logger.log_game_over(GameOutcome::Draw, GameState::Stalemate);

        assert!(logger.log_buffer.contains("1. Pawn e2e4"));
        assert!(logger.log_buffer.contains("2. Pawn e2e4"));
        assert!(logger.log_buffer.contains("UNDO: Pawn e2e4"));
        assert!(logger.log_buffer.contains("Game over: Draw (Stalemate)"));
    }
}

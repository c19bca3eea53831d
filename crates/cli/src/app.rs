use engine::{
    Game, GameEvent, GameLogger, GameSnapshot, PieceKind, Position,
};
use std::fs;
use std::io::{self, BufRead, Write};

/// Terminal front end. Owns a [`Game`] and a [`GameLogger`] and nothing
/// else: every legality question goes through the engine, this layer only
/// parses commands, renders the board, and relays events.
pub struct ChessApp {
    game: Game,
    logger: GameLogger,
}

impl ChessApp {
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            logger: GameLogger::new(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        println!("Two-player chess. Type 'help' for commands.");
        self.print_board();
        self.prompt()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle_command(line.trim()) {
                break;
            }
            self.prompt()?;
        }
        Ok(())
    }

    fn prompt(&self) -> io::Result<()> {
        print!("{} ({})> ", self.game.current_player(), self.game.state());
        io::stdout().flush()
    }

    /// Returns false when the session should end.
    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => return true,
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "select" | "s" => self.handle_select(&args),
            "move" | "m" => self.handle_move(&args),
            "draw" => {
                self.game.request_draw();
                self.relay_events();
            }
            "accept" => {
                self.game.accept_draw();
                self.relay_events();
            }
            "undo" => {
                if let Some(last) = self.game.move_history().last().copied() {
                    self.game.undo_move();
                    self.logger.log_undo(&last);
                    self.relay_events();
                    self.print_board();
                } else {
                    println!("nothing to undo");
                }
            }
            "new" => {
                self.game.new_game();
                self.logger = GameLogger::new();
                self.relay_events();
                self.print_board();
            }
            "board" => self.print_board(),
            "history" => {
                for (i, mv) in self.game.move_history().iter().enumerate() {
                    println!("{}. {}", i + 1, mv);
                }
            }
            "save" => self.handle_save(&args),
            "load" => self.handle_load(&args),
            "help" => print_help(),
            "quit" | "q" => return false,
            _ => println!("unknown command '{}', try 'help'", command),
        }
        true
    }

    fn handle_select(&mut self, args: &[&str]) {
        let position = match args.first().and_then(|s| parse_square(s)) {
            Some(position) => position,
            None => {
                println!("usage: select <square>, e.g. select e2");
                return;
            }
        };

        if self.game.select_piece(position) {
            self.relay_events();
            self.print_board();
        } else {
            println!("cannot select {}", position);
        }
    }

    fn handle_move(&mut self, args: &[&str]) {
        let to = match args.first().and_then(|s| parse_square(s)) {
            Some(to) => to,
            None => {
                println!("usage: move <square> [q|r|b|n], e.g. move e4");
                return;
            }
        };

        // Promotion is the front end's call to spot: a selected pawn headed
        // for the last rank must go through the promotion operation.
        if self.is_promotion_move(to) {
            let kind = match args.get(1).and_then(|s| parse_promotion(s)) {
                Some(kind) => kind,
                None => {
                    println!("promotion: move {} <q|r|b|n>", to);
                    return;
                }
            };
            if self.game.make_move_with_promotion(to, kind) {
                self.relay_events();
                self.print_board();
            } else {
                println!("illegal move to {}", to);
            }
            return;
        }

        if self.game.make_move(to) {
            self.relay_events();
            self.print_board();
        } else {
            println!("illegal move to {}", to);
        }
    }

    fn is_promotion_move(&self, to: Position) -> bool {
        let from = match self.game.selected_position() {
            Some(from) => from,
            None => return false,
        };
        match self.game.board().get(from) {
            Some(piece) => {
                piece.kind == PieceKind::Pawn
                    && (to.row == 0 || to.row == 7)
                    && self.game.valid_moves().contains(&to)
            }
            None => false,
        }
    }

    fn handle_save(&mut self, args: &[&str]) {
        let path = match args.first() {
            Some(path) => path,
            None => {
                println!("usage: save <file>");
                return;
            }
        };

        let snapshot = GameSnapshot::capture(&self.game);
        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                println!("could not encode the game: {}", e);
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => println!("saved to {}", path),
            Err(e) => println!("could not write {}: {}", path, e),
        }
    }

    fn handle_load(&mut self, args: &[&str]) {
        let path = match args.first() {
            Some(path) => path,
            None => {
                println!("usage: load <file>");
                return;
            }
        };

        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                println!("could not read {}: {}", path, e);
                return;
            }
        };
        let snapshot: GameSnapshot = match serde_json::from_str(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                println!("{} is not a saved game: {}", path, e);
                return;
            }
        };
        match snapshot.restore(&mut self.game) {
            Ok(()) => {
                println!("loaded {}", path);
                self.print_board();
            }
            Err(e) => println!("could not restore {}: {}", path, e),
        }
    }

    fn relay_events(&mut self) {
        while let Some(event) = self.game.poll_event() {
            match event {
                GameEvent::PieceSelected {
                    position,
                    valid_moves,
                } => {
                    let squares: Vec<String> =
                        valid_moves.iter().map(|p| p.to_string()).collect();
                    println!("selected {}: {}", position, squares.join(" "));
                }
                GameEvent::MoveMade { mv } => {
                    self.logger.log_move(&mv);
                    println!("played {}", mv);
                }
                GameEvent::StateChanged {
                    state,
                    current_player,
                } => {
                    println!("state: {} ({} to move)", state, current_player);
                }
                GameEvent::GameEnded { outcome, state } => {
                    println!("game over: {} ({})", outcome, state);
                    self.logger.log_game_over(outcome, state);
                    match self.logger.save_to_file(&outcome.to_string()) {
                        Ok(filename) => println!("log saved to {}", filename),
                        Err(e) => println!("could not save the log: {}", e),
                    }
                }
                GameEvent::DrawRequested { by } => {
                    println!("{} offers a draw ('accept' to take it)", by);
                    self.logger.log(&format!("Draw offered by {}", by));
                }
            }
        }
    }

    fn print_board(&self) {
        let selected = self.game.selected_position();
        println!();
        for row in 0..8 {
            print!("{} ", 8 - row);
            for col in 0..8 {
                let position = Position::new(row, col);
                let cell = match self.game.board().get(position) {
                    Some(piece) => piece.unicode_symbol(),
                    None if self.game.valid_moves().contains(&position) => "·",
                    None => {
                        if (row + col) % 2 == 0 {
                            " "
                        } else {
                            "░"
                        }
                    }
                };
                let marker = if Some(position) == selected { "[" } else { " " };
                let closer = if Some(position) == selected { "]" } else { " " };
                print!("{}{}{}", marker, cell, closer);
            }
            println!();
        }
        println!("   a  b  c  d  e  f  g  h");
        println!();
    }
}

fn parse_square(text: &str) -> Option<Position> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].to_ascii_lowercase() as i16 - b'a' as i16;
    let rank = bytes[1] as i16 - b'0' as i16;
    if !(0..8).contains(&col) || !(1..=8).contains(&rank) {
        return None;
    }
    Some(Position::new((8 - rank) as i8, col as i8))
}

fn parse_promotion(text: &str) -> Option<PieceKind> {
    match text.to_ascii_lowercase().as_str() {
        "q" | "queen" => Some(PieceKind::Queen),
        "r" | "rook" => Some(PieceKind::Rook),
        "b" | "bishop" => Some(PieceKind::Bishop),
        "n" | "knight" => Some(PieceKind::Knight),
        _ => None,
    }
}

fn print_help() {
    println!("commands:");
    println!("  select <square>        pick one of your pieces (shows its moves)");
    println!("  move <square> [qrbn]   move the selected piece; promotions need a kind");
    println!("  draw / accept          offer a draw / accept the standing offer");
    println!("  undo                   take back the last move");
    println!("  new                    start over");
    println!("  board / history        show the position / the move list");
    println!("  save <file> / load <file>");
    println!("  quit");
}

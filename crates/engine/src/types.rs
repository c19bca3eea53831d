use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A board coordinate. Row 0 is Black's back rank, row 7 is White's.
///
/// Coordinates are signed so that ray walking can step off the board and be
/// caught by `is_valid` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.row + other.row, self.col + other.col)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.row - other.row, self.col - other.col)
    }
}

impl Mul<i8> for Position {
    type Output = Position;

    fn mul(self, multiplier: i8) -> Position {
        Position::new(self.row * multiplier, self.col * multiplier)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col as u8) as char, 8 - self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

/// A piece on the board. `kind` and `color` never change; `has_moved` flips
/// to true the first time the piece changes square and stays set (castling
/// and pawn double-move eligibility read it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn unicode_symbol(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::King, PieceColor::White) => "♔",
            (PieceKind::Queen, PieceColor::White) => "♕",
            (PieceKind::Rook, PieceColor::White) => "♖",
            (PieceKind::Bishop, PieceColor::White) => "♗",
            (PieceKind::Knight, PieceColor::White) => "♘",
            (PieceKind::Pawn, PieceColor::White) => "♙",
            (PieceKind::King, PieceColor::Black) => "♚",
            (PieceKind::Queen, PieceColor::Black) => "♛",
            (PieceKind::Rook, PieceColor::Black) => "♜",
            (PieceKind::Bishop, PieceColor::Black) => "♝",
            (PieceKind::Knight, PieceColor::Black) => "♞",
            (PieceKind::Pawn, PieceColor::Black) => "♟",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// Overall game status, recomputed after every committed move.
/// `Checkmate`, `Stalemate` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::Checkmate | GameState::Stalemate | GameState::Draw
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Playing => "Playing",
            GameState::Check => "Check",
            GameState::Checkmate => "Checkmate",
            GameState::Stalemate => "Stalemate",
            GameState::Draw => "Draw",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::WhiteWins => write!(f, "White wins"),
            GameOutcome::BlackWins => write!(f, "Black wins"),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}

/// A committed move as recorded in the game history.
///
/// `piece` is the mover as it was before the move (original `has_moved`
/// included). For an en passant capture, `captured` is the pawn removed from
/// the square beside `to`, not whatever occupied `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessMove {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capture = if self.captured.is_some() { "x" } else { "" };
        write!(f, "{} {}{}{}", self.piece.kind, self.from, capture, self.to)
    }
}

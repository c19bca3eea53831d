use super::Board;
use crate::types::*;

const ROOK_DIRECTIONS: [Position; 4] = [
    Position::new(0, 1),
    Position::new(0, -1),
    Position::new(1, 0),
    Position::new(-1, 0),
];

const BISHOP_DIRECTIONS: [Position; 4] = [
    Position::new(1, 1),
    Position::new(1, -1),
    Position::new(-1, 1),
    Position::new(-1, -1),
];

const KNIGHT_OFFSETS: [Position; 8] = [
    Position::new(-2, -1),
    Position::new(-2, 1),
    Position::new(-1, -2),
    Position::new(-1, 2),
    Position::new(1, -2),
    Position::new(1, 2),
    Position::new(2, -1),
    Position::new(2, 1),
];

const KING_OFFSETS: [Position; 8] = [
    Position::new(-1, -1),
    Position::new(-1, 0),
    Position::new(-1, 1),
    Position::new(0, -1),
    Position::new(0, 1),
    Position::new(1, -1),
    Position::new(1, 0),
    Position::new(1, 1),
];

impl Board {
    /// Pseudo-legal destinations for the piece at `from`: movement pattern
    /// and occupancy only, no king-safety filtering. Castling candidates are
    /// included for the king.
    pub fn raw_moves(&self, from: Position, en_passant_target: Option<Position>) -> Vec<Position> {
        self.raw_moves_with(from, en_passant_target, false)
    }

    /// Raw move generation with the king-safety flag threaded through.
    ///
    /// Attack scans set `ignore_king_safety`, which drops castling from king
    /// generation; castling legality itself asks "is this square attacked",
    /// so generating castles there would recurse forever.
    pub(crate) fn raw_moves_with(
        &self,
        from: Position,
        en_passant_target: Option<Position>,
        ignore_king_safety: bool,
    ) -> Vec<Position> {
        let piece = match self.get(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.color, en_passant_target),
            PieceKind::Knight => self.step_moves(from, piece.color, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.sliding_moves(from, piece.color, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.sliding_moves(from, piece.color, &ROOK_DIRECTIONS),
            PieceKind::Queen => {
                let mut moves = self.sliding_moves(from, piece.color, &ROOK_DIRECTIONS);
                moves.extend(self.sliding_moves(from, piece.color, &BISHOP_DIRECTIONS));
                moves
            }
            PieceKind::King => self.king_moves(from, piece.color, ignore_king_safety),
        }
    }

    fn pawn_moves(
        &self,
        from: Position,
        color: PieceColor,
        en_passant_target: Option<Position>,
    ) -> Vec<Position> {
        let mut moves = Vec::new();
        let (direction, start_row) = match color {
            PieceColor::White => (-1, 6),
            PieceColor::Black => (1, 1),
        };

        // Forward, and double forward from the starting rank
        let forward = Position::new(from.row + direction, from.col);
        if forward.is_valid() && self.get(forward).is_none() {
            moves.push(forward);

            if from.row == start_row {
                let double = Position::new(from.row + 2 * direction, from.col);
                if double.is_valid() && self.get(double).is_none() {
                    moves.push(double);
                }
            }
        }

        // Diagonal captures, plus the en passant target square
        for dc in [-1, 1] {
            let target = Position::new(from.row + direction, from.col + dc);
            if !target.is_valid() {
                continue;
            }
            match self.get(target) {
                Some(other) if other.color != color => moves.push(target),
                None if Some(target) == en_passant_target => moves.push(target),
                _ => {}
            }
        }

        moves
    }

    /// Fixed-offset movers (knight and king ring): destination accepted
    /// unless occupied by a same-color piece.
    fn step_moves(&self, from: Position, color: PieceColor, offsets: &[Position]) -> Vec<Position> {
        let mut moves = Vec::new();
        for &offset in offsets {
            let target = from + offset;
            if !target.is_valid() {
                continue;
            }
            match self.get(target) {
                Some(other) if other.color == color => {}
                _ => moves.push(target),
            }
        }
        moves
    }

    /// Ray walk: stop at the board edge, stop after the first occupied
    /// square, excluding it when same-color.
    fn sliding_moves(
        &self,
        from: Position,
        color: PieceColor,
        directions: &[Position],
    ) -> Vec<Position> {
        let mut moves = Vec::new();
        for &direction in directions {
            for distance in 1..8 {
                let target = from + direction * distance;
                if !target.is_valid() {
                    break;
                }
                match self.get(target) {
                    None => moves.push(target),
                    Some(other) => {
                        if other.color != color {
                            moves.push(target);
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    fn king_moves(
        &self,
        from: Position,
        color: PieceColor,
        ignore_king_safety: bool,
    ) -> Vec<Position> {
        let mut moves = self.step_moves(from, color, &KING_OFFSETS);

        if !ignore_king_safety {
            self.castling_moves(from, color, &mut moves);
        }

        moves
    }

    /// Appends the castling destinations (two squares toward either rook)
    /// when every gate holds: king and rook unmoved, the squares strictly
    /// between them empty, the king not currently in check, and neither the
    /// transit square nor the destination attacked.
    fn castling_moves(&self, from: Position, color: PieceColor, moves: &mut Vec<Position>) {
        let king = match self.get(from) {
            Some(piece) => piece,
            None => return,
        };
        if king.has_moved || self.is_in_check(color) {
            return;
        }

        let row = from.row;
        let attacker = color.opposite();

        // Kingside: rook on the h-file, f and g empty and safe
        if self.is_unmoved_rook(Position::new(row, 7), color)
            && self.get(Position::new(row, 5)).is_none()
            && self.get(Position::new(row, 6)).is_none()
            && !self.is_position_under_attack(Position::new(row, 5), attacker)
            && !self.is_position_under_attack(Position::new(row, 6), attacker)
        {
            moves.push(Position::new(row, 6));
        }

        // Queenside: rook on the a-file, b/c/d empty, c and d safe
        if self.is_unmoved_rook(Position::new(row, 0), color)
            && self.get(Position::new(row, 1)).is_none()
            && self.get(Position::new(row, 2)).is_none()
            && self.get(Position::new(row, 3)).is_none()
            && !self.is_position_under_attack(Position::new(row, 2), attacker)
            && !self.is_position_under_attack(Position::new(row, 3), attacker)
        {
            moves.push(Position::new(row, 2));
        }
    }

    fn is_unmoved_rook(&self, position: Position, color: PieceColor) -> bool {
        match self.get(position) {
            Some(piece) => {
                piece.kind == PieceKind::Rook && piece.color == color && !piece.has_moved
            }
            None => false,
        }
    }
}

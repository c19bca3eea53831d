use super::Board;
use crate::types::*;

impl Board {
    /// True iff any piece of `by_color` has `position` among its raw moves.
    /// Backs both check detection and castling transit-square safety.
    pub fn is_position_under_attack(&self, position: Position, by_color: PieceColor) -> bool {
        for row in 0..8 {
            for col in 0..8 {
                let from = Position::new(row, col);
                match self.get(from) {
                    Some(piece) if piece.color == by_color => {
                        if self.raw_moves_with(from, None, true).contains(&position) {
                            return true;
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }

    /// A missing king reads as "not in check"; it cannot occur in a
    /// well-formed game but test and restored positions may be partial.
    pub fn is_in_check(&self, color: PieceColor) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_position_under_attack(king, color.opposite()),
            None => false,
        }
    }

    /// Raw moves filtered by the one legality gate used everywhere: simulate
    /// the move on a clone and reject it if the mover's own king ends up in
    /// check.
    pub fn legal_moves(&self, from: Position, en_passant_target: Option<Position>) -> Vec<Position> {
        let piece = match self.get(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        self.raw_moves(from, en_passant_target)
            .into_iter()
            .filter(|&to| !self.move_leaves_king_in_check(from, to, piece, en_passant_target))
            .collect()
    }

    fn move_leaves_king_in_check(
        &self,
        from: Position,
        to: Position,
        piece: Piece,
        en_passant_target: Option<Position>,
    ) -> bool {
        let mut test_board = self.clone();

        // An en passant capture removes a pawn from a square other than `to`;
        // the simulation has to mirror that or the vacated square hides pins.
        if piece.kind == PieceKind::Pawn && Some(to) == en_passant_target {
            test_board.set(Position::new(from.row, to.col), None);
        }

        test_board.make_move(from, to);
        test_board.is_in_check(piece.color)
    }

    /// Checkmate: in check with no legal move anywhere on the board.
    pub fn is_checkmate(&self, color: PieceColor) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Stalemate: the same no-legal-move scan, gated on NOT being in check.
    pub fn is_stalemate(&self, color: PieceColor) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    fn has_any_legal_move(&self, color: PieceColor) -> bool {
        for row in 0..8 {
            for col in 0..8 {
                let from = Position::new(row, col);
                match self.get(from) {
                    Some(piece) if piece.color == color => {
                        if !self.legal_moves(from, None).is_empty() {
                            return true;
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

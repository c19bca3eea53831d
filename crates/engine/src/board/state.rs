use super::Board;
use crate::types::*;

impl Board {
    /// Applies a move with the default queen promotion. See
    /// [`make_move_with_promotion`](Self::make_move_with_promotion).
    pub fn make_move(&mut self, from: Position, to: Position) {
        self.make_move_with_promotion(from, to, PieceKind::Queen);
    }

    /// Unconditionally applies a move; legality is the caller's problem.
    ///
    /// A king travelling two columns drags the matching rook over (castling).
    /// A pawn landing on the last rank is replaced by a fresh piece of
    /// `promotion` kind. En passant is NOT resolved here: the board only
    /// knows geometry, so the captured pawn on the adjacent square must be
    /// removed by the caller beforehand.
    pub fn make_move_with_promotion(&mut self, from: Position, to: Position, promotion: PieceKind) {
        let mut piece = match self.get(from) {
            Some(piece) => piece,
            None => return,
        };

        if piece.kind == PieceKind::King && (to.col - from.col).abs() == 2 {
            let (rook_from, rook_to) = if to.col > from.col {
                (Position::new(from.row, 7), Position::new(from.row, 5))
            } else {
                (Position::new(from.row, 0), Position::new(from.row, 3))
            };
            if let Some(mut rook) = self.get(rook_from) {
                rook.has_moved = true;
                self.set(rook_from, None);
                self.set(rook_to, Some(rook));
            }
        }

        self.set(from, None);
        piece.has_moved = true;

        if piece.kind == PieceKind::Pawn && (to.row == 0 || to.row == 7) {
            piece = Piece {
                kind: promotion,
                color: piece.color,
                has_moved: true,
            };
        }

        self.set(to, Some(piece));
    }
}

use crate::board::attacks::king_in_check;
use crate::board::state::{Board, UnmakeInfo};
use crate::types::{Color, ColoredPiece, PieceKind, Square};

impl Board {
    /// Applies `mv`, updating every cache, and returns the information
    /// needed to undo it exactly via [`Board::unmake_move`].
    pub fn make_move(&mut self, mv: crate::types::Move) -> UnmakeInfo {
        let from = mv.from();
        let to = mv.to();
        let moved = self.piece_at(from).expect("make_move called with no piece on from-square");
        let mover_color = moved.color;

        let previous_en_passant = self.en_passant;
        let previous_castling = self.castling;
        let previous_halfmove_clock = self.halfmove_clock;
        let previous_king_square = self.king_square;
        let previous_material = self.material;
        let previous_knight_bonus = self.knight_bonus;
        let previous_check = self.check;

        let is_en_passant_capture =
            moved.kind == PieceKind::Pawn && Some(to) == self.en_passant && self.piece_at(to).is_none();
        let captured = if is_en_passant_capture {
            let captured_sq = Square::new(from.rank(), to.file());
            let captured_piece = self.piece_at(captured_sq);
            if let Some(cp) = captured_piece {
                self.set_square(captured_sq, None);
                Some((captured_sq, cp))
            } else {
                None
            }
        } else if let Some(cp) = self.piece_at(to) {
            Some((to, cp))
        } else {
            None
        };

        let is_castle = moved.kind == PieceKind::King
            && from.file() == 4
            && (to.file() as i32 - from.file() as i32).abs() == 2;
        let rook_castle_move = if is_castle {
            let rank = from.rank();
            if to.file() == 6 {
                Some((Square::new(rank, 7), Square::new(rank, 5)))
            } else {
                Some((Square::new(rank, 0), Square::new(rank, 3)))
            }
        } else {
            None
        };

        self.set_square(from, None);
        let placed = match mv.promotion_kind() {
            Some(kind) => ColoredPiece::new(mover_color, kind),
            None => moved,
        };
        self.set_square(to, Some(placed));

        if let Some((rook_from, rook_to)) = rook_castle_move {
            let rook = self.piece_at(rook_from);
            self.set_square(rook_from, None);
            self.set_square(rook_to, rook);
        }

        if moved.kind == PieceKind::King {
            self.castling.revoke_all(mover_color);
        }
        if moved.kind == PieceKind::Rook {
            revoke_rook_right(self, mover_color, from);
        }
        if let Some((captured_sq, captured_piece)) = captured {
            if captured_piece.kind == PieceKind::Rook {
                revoke_rook_right(self, captured_piece.color, captured_sq);
            }
        }

        self.en_passant = if moved.kind == PieceKind::Pawn
            && (to.rank() as i32 - from.rank() as i32).abs() == 2
        {
            Some(Square::new((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if mover_color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = mover_color.opposite();
        self.recompute_knight_bonus();
        self.check = if king_in_check(self, self.side_to_move) {
            Some(self.king_square(self.side_to_move))
        } else {
            None
        };

        UnmakeInfo {
            mv,
            moved,
            captured,
            previous_en_passant,
            previous_castling,
            previous_halfmove_clock,
            previous_king_square,
            previous_material,
            previous_knight_bonus,
            previous_check,
            rook_castle_move,
        }
    }

    /// Restores the board to exactly the state before `undo.mv` was made.
    pub fn unmake_move(&mut self, undo: UnmakeInfo) {
        let from = undo.mv.from();
        let to = undo.mv.to();
        let mover_color = undo.moved.color;

        if mover_color == Color::Black {
            self.fullmove_number -= 1;
        }

        self.squares[to.index()] = None;
        self.squares[from.index()] = Some(undo.moved);

        if let Some((rook_from, rook_to)) = undo.rook_castle_move {
            let rook = self.squares[rook_to.index()];
            self.squares[rook_to.index()] = None;
            self.squares[rook_from.index()] = rook;
        }

        if let Some((captured_sq, captured_piece)) = undo.captured {
            self.squares[captured_sq.index()] = Some(captured_piece);
        }

        self.side_to_move = mover_color;
        self.en_passant = undo.previous_en_passant;
        self.castling = undo.previous_castling;
        self.halfmove_clock = undo.previous_halfmove_clock;
        self.king_square = undo.previous_king_square;
        self.material = undo.previous_material;
        self.knight_bonus = undo.previous_knight_bonus;
        self.check = undo.previous_check;
    }
}

fn revoke_rook_right(board: &mut Board, color: Color, square: Square) {
    let rank = if color == Color::White { 0 } else { 7 };
    if square.rank() != rank {
        return;
    }
    if square.file() == 0 {
        board.castling.set_queenside(color, false);
    } else if square.file() == 7 {
        board.castling.set_kingside(color, false);
    }
}

use crate::types::{CastlingRights, Color, ColoredPiece, PieceKind, Square};

/// A single linked position in the game's move history (spec.md §3
/// `BoardStateList`). Stored in an arena inside [`crate::board::history::History`]
/// rather than as a self-referential linked list, per the Design Note on
/// cyclic structures: `previous` and `pocc` are both arena indices.
#[derive(Debug, Clone)]
pub struct HistoryNode {
    pub board: Board,
    pub mv: Option<crate::types::Move>,
    pub previous: Option<usize>,
    /// Index of the most recent earlier node with an identical position,
    /// usable for repetition pruning ("pocc" in the original).
    pub pocc: Option<usize>,
    /// Whether a repetition has been observed on this chain since the last
    /// capture or pawn move ("rsc": repetition-seen-since-capture).
    pub rsc: bool,
}

/// The full mailbox position model: board contents plus every cache spec.md
/// §3 names, kept consistent across make/unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub(crate) squares: [Option<ColoredPiece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub(crate) king_square: [Square; 2],
    pub(crate) material: [i32; 2],
    /// Knight-mobility positional bonus cache, one value per side, consumed
    /// by [`crate::eval::static_score`].
    pub(crate) knight_bonus: [i32; 2],
    /// Square of the piece currently giving check to the side to move, if any.
    pub(crate) check: Option<Square>,
}

/// Everything [`Board::make_move`] needs to remember in order to undo a
/// move exactly, including every cache field it touched.
#[derive(Debug, Clone)]
pub struct UnmakeInfo {
    pub(crate) mv: crate::types::Move,
    pub(crate) moved: ColoredPiece,
    pub(crate) captured: Option<(Square, ColoredPiece)>,
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_castling: CastlingRights,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_king_square: [Square; 2],
    pub(crate) previous_material: [i32; 2],
    pub(crate) previous_knight_bonus: [i32; 2],
    pub(crate) previous_check: Option<Square>,
    pub(crate) rook_castle_move: Option<(Square, Square)>,
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_square: [Square::new(0, 4), Square::new(7, 4)],
            material: [0, 0],
            knight_bonus: [0, 0],
            check: None,
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index()]
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color_index(color)]
    }

    pub fn in_check(&self) -> bool {
        self.check.is_some()
    }

    pub fn material_of(&self, color: Color) -> i32 {
        self.material[color_index(color)]
    }

    pub fn knight_bonus_of(&self, color: Color) -> i32 {
        self.knight_bonus[color_index(color)]
    }

    pub(crate) fn set_square(&mut self, sq: Square, piece: Option<ColoredPiece>) {
        if let Some(old) = self.squares[sq.index()] {
            self.material[color_index(old.color)] -= old.kind.material_value();
            if old.kind == PieceKind::King {
                // king square updated explicitly by callers
            }
        }
        if let Some(new) = piece {
            self.material[color_index(new.color)] += new.kind.material_value();
            if new.kind == PieceKind::King {
                self.king_square[color_index(new.color)] = sq;
            }
        }
        self.squares[sq.index()] = piece;
    }

    pub(crate) fn recompute_knight_bonus(&mut self) {
        use crate::board::tables::KNIGHT_ATTACKS;
        let mut bonus = [0i32; 2];
        for idx in 0..64 {
            let sq = Square::from_index(idx as u8);
            if let Some(p) = self.squares[idx] {
                if p.kind == PieceKind::Knight {
                    bonus[color_index(p.color)] += KNIGHT_ATTACKS[sq.index()].len() as i32;
                }
            }
        }
        self.knight_bonus = bonus;
    }
}

pub(crate) fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_material() {
        let b = Board::empty();
        assert_eq!(b.material_of(Color::White), 0);
        assert_eq!(b.material_of(Color::Black), 0);
    }

    #[test]
    fn set_square_updates_material() {
        let mut b = Board::empty();
        b.set_square(Square::new(0, 0), Some(ColoredPiece::new(Color::White, PieceKind::Rook)));
        assert_eq!(b.material_of(Color::White), PieceKind::Rook.material_value());
        b.set_square(Square::new(0, 0), None);
        assert_eq!(b.material_of(Color::White), 0);
    }

    #[test]
    fn set_square_tracks_king_square() {
        let mut b = Board::empty();
        let sq = Square::new(2, 3);
        b.set_square(sq, Some(ColoredPiece::new(Color::Black, PieceKind::King)));
        assert_eq!(b.king_square(Color::Black), sq);
    }
}

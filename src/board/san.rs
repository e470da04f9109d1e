//! SAN (Standard Algebraic Notation) emission, grounded in
//! `original_source/move.c`'s `disambiguate`/`append_move` and
//! `to_algebraic`/`piece2SAN`.

use crate::board::movegen::legal_moves;
use crate::board::state::Board;
use crate::types::{Move, PieceKind};

/// Renders `mv` (assumed legal in `board`) as SAN, including `+`/`#` suffix.
/// Re-runs the move generator to disambiguate, the way the original
/// implementation does rather than tracking disambiguation incrementally.
pub fn move_to_san(board: &Board, mv: Move) -> String {
    let piece = board.piece_at(mv.from()).expect("move_to_san: no piece on from-square");

    if piece.kind == PieceKind::King && is_castle(mv) {
        let base = if mv.to().file() == 6 { "O-O" } else { "O-O-O" };
        return format!("{base}{}", check_suffix(board, mv));
    }

    let is_capture = board.piece_at(mv.to()).is_some()
        || (piece.kind == PieceKind::Pawn && Some(mv.to()) == board.en_passant);

    let mut san = String::new();
    if piece.kind == PieceKind::Pawn {
        if is_capture {
            san.push((b'a' + mv.from().file()) as char);
            san.push('x');
        }
        san.push_str(&mv.to().to_string());
        if let Some(promo) = mv.promotion_kind() {
            san.push('=');
            san.push(promo.to_san_char());
        }
    } else {
        san.push(piece.kind.to_san_char());
        san.push_str(&disambiguation(board, mv, piece.kind));
        if is_capture {
            san.push('x');
        }
        san.push_str(&mv.to().to_string());
    }

    san.push_str(&check_suffix(board, mv));
    san
}

fn is_castle(mv: Move) -> bool {
    mv.from().file() == 4 && (mv.to().file() as i32 - mv.from().file() as i32).abs() == 2
}

fn disambiguation(board: &Board, mv: Move, kind: PieceKind) -> String {
    let others: Vec<Move> = legal_moves(board)
        .into_iter()
        .filter(|&m| {
            m.to() == mv.to()
                && m.from() != mv.from()
                && board.piece_at(m.from()).map(|p| p.kind) == Some(kind)
        })
        .collect();

    if others.is_empty() {
        return String::new();
    }

    let same_file = others.iter().any(|m| m.from().file() == mv.from().file());
    let same_rank = others.iter().any(|m| m.from().rank() == mv.from().rank());

    if !same_file {
        format!("{}", (b'a' + mv.from().file()) as char)
    } else if !same_rank {
        format!("{}", mv.from().rank() + 1)
    } else {
        mv.from().to_string()
    }
}

fn check_suffix(board: &Board, mv: Move) -> &'static str {
    let mut next = board.clone();
    let undo = next.make_move(mv);
    let in_check = next.in_check();
    let mate = in_check && crate::board::movegen::has_no_legal_moves(&next);
    next.unmake_move(undo);
    if mate {
        "#"
    } else if in_check {
        "+"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::parse_fen;
    use crate::types::Square;

    #[test]
    fn simple_pawn_push() {
        let board = Board::starting_position();
        let mv = Move::new(Square::new(1, 4), Square::new(3, 4));
        assert_eq!(move_to_san(&board, mv), "e4");
    }

    #[test]
    fn knight_capture() {
        let board = parse_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 0 1").unwrap();
        let mv = Move::new(Square::new(2, 2), Square::new(4, 3));
        assert_eq!(move_to_san(&board, mv), "Nxd5");
    }

    #[test]
    fn castling_kingside() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move::new(Square::new(0, 4), Square::new(0, 6));
        assert_eq!(move_to_san(&board, mv), "O-O");
    }

    #[test]
    fn mate_suffix() {
        let board =
            parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        // white to move is already mated in this position; exercise the
        // suffix logic with black's mating move instead.
        let prior =
            parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2").unwrap();
        let mv = Move::new(Square::new(7, 3), Square::new(3, 7));
        assert_eq!(move_to_san(&prior, mv), "Qh4#");
        let _ = board;
    }
}

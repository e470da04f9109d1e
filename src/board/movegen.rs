//! Move generation: pseudolegal per-piece generators combined and then
//! filtered down to legal moves by simulating make/unmake and checking
//! whether the mover's own king ends up attacked.

use crate::board::attacks::{attacked_by, king_in_check};
use crate::board::state::Board;
use crate::board::tables::{KING_ATTACKS, KNIGHT_ATTACKS, RAY_DIRECTIONS};
use crate::types::{CastlingRights, Color, ColoredPiece, Move, MoveList, PieceKind, Square};

const PROMOTION_PIECES: [PieceKind; 4] =
    [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, promotion_rank: u8) {
    if to.rank() == promotion_rank {
        for &kind in &PROMOTION_PIECES {
            moves.push(Move::promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn gen_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let white = color == Color::White;
    let promotion_rank = if white { 7 } else { 0 };
    let start_rank = if white { 1 } else { 6 };

    if let Some(one) = from.forward(white) {
        if board.piece_at(one).is_none() {
            push_pawn_move(moves, from, one, promotion_rank);
            if from.rank() == start_rank {
                if let Some(two) = one.forward(white) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    let rank = from.rank() as i32 + if white { 1 } else { -1 };
    for df in [-1, 1] {
        let Some(target) = Square::try_new(rank, from.file() as i32 + df) else { continue };
        if let Some(p) = board.piece_at(target) {
            if p.color != color {
                push_pawn_move(moves, from, target, promotion_rank);
            }
        } else if board.en_passant == Some(target) {
            moves.push(Move::new(from, target));
        }
    }
}

fn gen_knight_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    for &to in KNIGHT_ATTACKS[from.index()].iter() {
        if board.piece_at(to).map_or(true, |p| p.color != color) {
            moves.push(Move::new(from, to));
        }
    }
}

fn gen_king_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    for &to in KING_ATTACKS[from.index()].iter() {
        if board.piece_at(to).map_or(true, |p| p.color != color) {
            moves.push(Move::new(from, to));
        }
    }
    gen_castling_moves(board, from, color, moves);
}

fn gen_castling_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let rank = if color == Color::White { 0 } else { 7 };
    if from != Square::new(rank, 4) {
        return;
    }
    let opponent = color.opposite();
    if king_in_check(board, color) {
        return;
    }

    if board.castling.kingside(color) {
        let f = Square::new(rank, 5);
        let g = Square::new(rank, 6);
        let h = Square::new(rank, 7);
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && matches!(board.piece_at(h), Some(p) if p.color == color && p.kind == PieceKind::Rook)
            && !attacked_by(board, f, opponent)
            && !attacked_by(board, g, opponent)
        {
            moves.push(Move::new(from, g));
        }
    }
    if board.castling.queenside(color) {
        let d = Square::new(rank, 3);
        let c = Square::new(rank, 2);
        let b = Square::new(rank, 1);
        let a = Square::new(rank, 0);
        if board.piece_at(d).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(b).is_none()
            && matches!(board.piece_at(a), Some(p) if p.color == color && p.kind == PieceKind::Rook)
            && !attacked_by(board, d, opponent)
            && !attacked_by(board, c, opponent)
        {
            moves.push(Move::new(from, c));
        }
    }
}

fn gen_slider_moves(board: &Board, from: Square, color: Color, kind: PieceKind, moves: &mut MoveList) {
    let dirs: &[(i32, i32)] = match kind {
        PieceKind::Rook => &RAY_DIRECTIONS[0..4],
        PieceKind::Bishop => &RAY_DIRECTIONS[4..8],
        PieceKind::Queen => &RAY_DIRECTIONS,
        _ => unreachable!(),
    };
    for &(dr, df) in dirs {
        let mut r = from.rank() as i32 + dr;
        let mut f = from.file() as i32 + df;
        while let Some(to) = Square::try_new(r, f) {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            r += dr;
            f += df;
        }
    }
}

/// All pseudolegal moves for the side to move: may leave the mover's own
/// king in check, filtered out by [`legal_moves`].
pub fn pseudolegal_moves(board: &Board) -> MoveList {
    let color = board.side_to_move;
    let mut moves = MoveList::new();
    for idx in 0..64 {
        let sq = Square::from_index(idx as u8);
        let Some(ColoredPiece { color: c, kind }) = board.piece_at(sq) else { continue };
        if c != color {
            continue;
        }
        match kind {
            PieceKind::Pawn => gen_pawn_moves(board, sq, color, &mut moves),
            PieceKind::Knight => gen_knight_moves(board, sq, color, &mut moves),
            PieceKind::King => gen_king_moves(board, sq, color, &mut moves),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                gen_slider_moves(board, sq, color, kind, &mut moves)
            }
        }
    }
    moves
}

/// Pseudolegal moves filtered to those that do not leave the mover's own
/// king in check, by simulating each move via make/unmake.
pub fn legal_moves(board: &Board) -> MoveList {
    let color = board.side_to_move;
    let mut board = board.clone();
    pseudolegal_moves(&board)
        .into_iter()
        .filter(|&mv| {
            let undo = board.make_move(mv);
            let leaves_king_safe = !king_in_check(&board, color);
            board.unmake_move(undo);
            leaves_king_safe
        })
        .collect()
}

/// True if the side to move has no legal moves. Combined with
/// [`crate::board::attacks::king_in_check`] this distinguishes checkmate
/// from stalemate, per spec.md §4.
pub fn has_no_legal_moves(board: &Board) -> bool {
    legal_moves(board).is_empty()
}

pub fn is_checkmate(board: &Board) -> bool {
    king_in_check(board, board.side_to_move) && has_no_legal_moves(board)
}

pub fn is_stalemate(board: &Board) -> bool {
    !king_in_check(board, board.side_to_move) && has_no_legal_moves(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::parse_fen;

    #[test]
    fn start_position_has_twenty_moves() {
        let board = Board::starting_position();
        assert_eq!(legal_moves(&board).len(), 20);
    }

    #[test]
    fn castling_available_both_sides_when_clear() {
        let board =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = legal_moves(&board);
        let king_moves: Vec<_> =
            moves.iter().filter(|m| m.from() == Square::new(0, 4)).collect();
        assert!(king_moves.iter().any(|m| m.to() == Square::new(0, 6)));
        assert!(king_moves.iter().any(|m| m.to() == Square::new(0, 2)));
    }

    #[test]
    fn castling_blocked_through_check() {
        let board = parse_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
        let moves = legal_moves(&board);
        assert!(!moves.iter().any(|m| m.from() == Square::new(0, 4) && m.to() == Square::new(0, 6)));
    }

    #[test]
    fn en_passant_capture_generated() {
        let board =
            parse_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
        let moves = legal_moves(&board);
        assert!(moves.iter().any(|m| m.from() == Square::new(4, 4) && m.to() == Square::new(5, 5)));
    }

    #[test]
    fn promotion_generates_four_underpromotions() {
        let board = parse_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let moves = legal_moves(&board);
        let promos: Vec<_> = moves.iter().filter(|m| m.from() == Square::new(6, 0)).collect();
        assert_eq!(promos.len(), 4);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let board =
            parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert!(is_checkmate(&board));
    }

}

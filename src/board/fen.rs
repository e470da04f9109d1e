//! Forsyth-Edwards Notation codec, grounded in `original_source/fen.c`'s
//! `FEN2Board`/`Board2FEN` and their validation rules.

use crate::board::error::FenError;
use crate::board::state::Board;
use crate::types::{CastlingRights, Color, ColoredPiece, PieceKind, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    pub fn starting_position() -> Board {
        parse_fen(STARTING_FEN).expect("starting FEN is well-formed")
    }
}

pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let len = fen.len();
    if len < 28 {
        return Err(FenError::TooShort { len });
    }
    if len > 83 {
        return Err(FenError::TooLong { len });
    }

    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::TooFewParts { found: parts.len() });
    }

    let mut board = Board::empty();

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            if file >= 8 {
                return Err(FenError::WrongRankLength { rank, files: file + 1 });
            }
            let kind = PieceKind::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            if kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                return Err(FenError::PawnOnBackRank);
            }
            board.set_square(Square::new(rank as u8, file as u8), Some(ColoredPiece::new(color, kind)));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::WrongRankLength { rank, files: file });
        }
    }

    board.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidSideToMove { found: other.to_string() }),
    };

    for c in parts[2].chars() {
        if c != '-' && !"KQkq".contains(c) {
            return Err(FenError::InvalidCastling { char: c });
        }
    }
    board.castling = CastlingRights::from_fen_field(parts[2])
        .ok_or(FenError::InvalidCastling { char: parts[2].chars().next().unwrap_or('?') })?;

    board.en_passant = match parts[3] {
        "-" => None,
        s => {
            let sq: Square =
                s.parse().map_err(|_| FenError::InvalidEnPassant { found: s.to_string() })?;
            if sq.rank() != 2 && sq.rank() != 5 {
                return Err(FenError::InvalidEnPassant { found: s.to_string() });
            }
            Some(sq)
        }
    };

    if parts.len() > 4 {
        board.halfmove_clock = parts[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock { found: parts[4].to_string() })?;
    }
    if parts.len() > 5 {
        board.fullmove_number = parts[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber { found: parts[5].to_string() })?;
    }

    let mut white_kings = 0;
    let mut black_kings = 0;
    for idx in 0..64 {
        if let Some(p) = board.piece_at(Square::from_index(idx)) {
            if p.kind == PieceKind::King {
                if p.color == Color::White {
                    white_kings += 1;
                } else {
                    black_kings += 1;
                }
            }
        }
    }
    if white_kings == 0 {
        return Err(FenError::MissingKing { color_name: "white" });
    }
    if white_kings > 1 {
        return Err(FenError::MultipleKings { color_name: "white" });
    }
    if black_kings == 0 {
        return Err(FenError::MissingKing { color_name: "black" });
    }
    if black_kings > 1 {
        return Err(FenError::MultipleKings { color_name: "black" });
    }

    board.recompute_knight_bonus();
    board.check = if crate::board::attacks::king_in_check(&board, board.side_to_move) {
        Some(board.king_square(board.side_to_move))
    } else {
        None
    };

    Ok(board)
}

pub fn to_fen(board: &Board) -> String {
    let mut s = String::new();
    for rank_from_top in 0..8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0;
        for file in 0..8 {
            match board.piece_at(Square::new(rank, file)) {
                None => empty_run += 1,
                Some(p) => {
                    if empty_run > 0 {
                        s.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    s.push(p.kind.to_fen_char(p.color));
                }
            }
        }
        if empty_run > 0 {
            s.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            s.push('/');
        }
    }

    s.push(' ');
    s.push(if board.side_to_move == Color::White { 'w' } else { 'b' });
    s.push(' ');
    s.push_str(&board.castling.to_fen_field());
    s.push(' ');
    s.push_str(&board.en_passant.map(|sq| sq.to_string()).unwrap_or_else(|| "-".to_string()));
    s.push(' ');
    s.push_str(&board.halfmove_clock.to_string());
    s.push(' ');
    s.push_str(&board.fullmove_number.to_string());
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_roundtrips() {
        let board = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(to_fen(&board), STARTING_FEN);
    }

    #[test]
    fn rejects_missing_king() {
        let err = parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
        assert!(matches!(err, FenError::MissingKing { .. }));
    }

    #[test]
    fn rejects_pawn_on_back_rank() {
        let err = parse_fen("Pnbqkbnr/1ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err();
        assert!(matches!(err, FenError::PawnOnBackRank));
    }

    #[test]
    fn rejects_bad_side_to_move() {
        let err =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidSideToMove { .. }));
    }

    #[test]
    fn rejects_bad_castling_char() {
        let err =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidCastling { .. }));
    }

    #[test]
    fn en_passant_rank_validated() {
        let err =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidEnPassant { .. }));
    }

    #[test]
    fn rejects_malformed_halfmove_clock() {
        let err = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidHalfmoveClock { .. }));
    }

    #[test]
    fn rejects_malformed_fullmove_number() {
        let err = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 x").unwrap_err();
        assert!(matches!(err, FenError::InvalidFullmoveNumber { .. }));
    }
}

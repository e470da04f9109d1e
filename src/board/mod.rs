//! The mailbox position model: board representation, move generation,
//! attack detection, make/unmake, FEN and SAN codecs, and game history.

pub mod attacks;
pub mod error;
pub mod fen;
pub mod history;
pub mod make_unmake;
pub mod movegen;
pub mod san;
pub mod state;
mod tables;

pub use error::{FenError, MoveParseError, SanError};
pub use fen::{parse_fen, to_fen, STARTING_FEN};
pub use history::{same_position, History};
pub use movegen::{has_no_legal_moves, is_checkmate, is_stalemate, legal_moves, pseudolegal_moves};
pub use san::move_to_san;
pub use state::{Board, HistoryNode, UnmakeInfo};

use crate::board::error::MoveParseError as MPE;
use crate::types::{Move, PieceKind, Square};
use std::str::FromStr;

/// Parses a long-algebraic move (`"e2e4"`, `"e7e8q"`) and checks it against
/// the legal move list for `board`, returning the matching [`Move`] (with
/// its promotion tag normalized) or a [`MoveParseError`].
pub fn parse_move(board: &Board, notation: &str) -> Result<Move, MPE> {
    let bytes = notation.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(MPE::InvalidLength { len: bytes.len() });
    }
    let from = Square::from_str(&notation[0..2])?;
    let to = Square::from_str(&notation[2..4])?;
    if from == to {
        return Err(MPE::SameSquare);
    }
    let promotion = if bytes.len() == 5 {
        let c = notation.as_bytes()[4] as char;
        Some(PieceKind::from_san_char(c.to_ascii_uppercase()).ok_or(MPE::InvalidPromotion { char: c })?)
    } else {
        None
    };

    legal_moves(board)
        .into_iter()
        .find(|m| m.from() == from && m.to() == to && m.promotion_kind() == promotion)
        .ok_or_else(|| MPE::IllegalMove { notation: notation.to_string() })
}

use std::fmt;

use crate::types::SquareError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    TooFewParts { found: usize },
    InvalidPiece { char: char },
    WrongRankLength { rank: usize, files: usize },
    WrongRankCount { found: usize },
    InvalidSideToMove { found: String },
    InvalidCastling { char: char },
    InvalidEnPassant { found: String },
    MultipleKings { color_name: &'static str },
    MissingKing { color_name: &'static str },
    PawnOnBackRank,
    TooShort { len: usize },
    TooLong { len: usize },
    InvalidHalfmoveClock { found: String },
    InvalidFullmoveNumber { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN has {found} space-separated fields, need at least 4")
            }
            FenError::InvalidPiece { char } => write!(f, "invalid piece character '{char}'"),
            FenError::WrongRankLength { rank, files } => {
                write!(f, "rank {rank} has {files} files, need 8")
            }
            FenError::WrongRankCount { found } => write!(f, "FEN has {found} ranks, need 8"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => write!(f, "invalid castling character '{char}'"),
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant target '{found}'")
            }
            FenError::MultipleKings { color_name } => {
                write!(f, "more than one {color_name} king")
            }
            FenError::MissingKing { color_name } => write!(f, "no {color_name} king"),
            FenError::PawnOnBackRank => write!(f, "pawn on rank 1 or 8"),
            FenError::TooShort { len } => write!(f, "FEN string too short ({len} chars)"),
            FenError::TooLong { len } => write!(f, "FEN string too long ({len} chars)"),
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "invalid halfmove clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "invalid fullmove number '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    InvalidPromotion { char: char },
    SameSquare,
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move notation has invalid length {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "invalid promotion character '{char}'")
            }
            MoveParseError::SameSquare => write!(f, "source and destination square are the same"),
            MoveParseError::IllegalMove { notation } => {
                write!(f, "'{notation}' is not a legal move in this position")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

impl From<SquareError> for MoveParseError {
    fn from(e: SquareError) -> Self {
        MoveParseError::InvalidSquare { notation: e.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    Empty,
    InvalidPiece { char: char },
    InvalidSquare { notation: String },
    AmbiguousMove { san: String },
    NoMatchingMove { san: String },
    InvalidPromotion { char: char },
    InvalidCastling { notation: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "empty SAN string"),
            SanError::InvalidPiece { char } => write!(f, "invalid piece letter '{char}' in SAN"),
            SanError::InvalidSquare { notation } => {
                write!(f, "invalid square '{notation}' in SAN")
            }
            SanError::AmbiguousMove { san } => write!(f, "SAN move '{san}' is ambiguous"),
            SanError::NoMatchingMove { san } => {
                write!(f, "no legal move matches SAN '{san}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "invalid promotion letter '{char}' in SAN")
            }
            SanError::InvalidCastling { notation } => {
                write!(f, "malformed castling notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SanError {}

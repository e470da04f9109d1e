use super::Color;

/// Castling availability for both sides, one bit each, matching spec.md's
/// four-flag model (never derived from piece positions — tracked explicitly
/// so it degrades correctly when a rook or king moves or is captured).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights {
    white_king: bool,
    white_queen: bool,
    black_king: bool,
    black_queen: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_king: false,
        white_queen: false,
        black_king: false,
        black_queen: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_king: true,
        white_queen: true,
        black_king: true,
        black_queen: true,
    };

    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen,
            Color::Black => self.black_queen,
        }
    }

    pub fn set_kingside(&mut self, color: Color, value: bool) {
        match color {
            Color::White => self.white_king = value,
            Color::Black => self.black_king = value,
        }
    }

    pub fn set_queenside(&mut self, color: Color, value: bool) {
        match color {
            Color::White => self.white_queen = value,
            Color::Black => self.black_queen = value,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.set_kingside(color, false);
        self.set_queenside(color, false);
    }

    pub fn any(self) -> bool {
        self.white_king || self.white_queen || self.black_king || self.black_queen
    }

    /// Renders the FEN castling field, `"-"` when none remain.
    pub fn to_fen_field(self) -> String {
        let mut s = String::new();
        if self.white_king {
            s.push('K');
        }
        if self.white_queen {
            s.push('Q');
        }
        if self.black_king {
            s.push('k');
        }
        if self.black_queen {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }

    pub fn from_fen_field(field: &str) -> Option<CastlingRights> {
        if field == "-" {
            return Some(CastlingRights::NONE);
        }
        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            match c {
                'K' => rights.white_king = true,
                'Q' => rights.white_queen = true,
                'k' => rights.black_king = true,
                'q' => rights.black_queen = true,
                _ => return None,
            }
        }
        Some(rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_field_roundtrip() {
        for s in ["-", "KQkq", "Kq", "k"] {
            let rights = CastlingRights::from_fen_field(s).unwrap();
            assert_eq!(rights.to_fen_field(), s);
        }
    }

    #[test]
    fn invalid_char_rejected() {
        assert!(CastlingRights::from_fen_field("KQx").is_none());
    }

    #[test]
    fn revoke_all_clears_one_side_only() {
        let mut rights = CastlingRights::ALL;
        rights.revoke_all(Color::White);
        assert!(!rights.kingside(Color::White));
        assert!(!rights.queenside(Color::White));
        assert!(rights.kingside(Color::Black));
        assert!(rights.queenside(Color::Black));
    }
}

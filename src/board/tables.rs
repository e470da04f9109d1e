//! Precomputed per-square attack tables for the leaper pieces (knight, king)
//! and the eight ray directions used by sliders, built once at first use.

use once_cell::sync::Lazy;

use crate::types::Square;

const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];

/// The eight ray directions a bishop/rook/queen slides along, in the order
/// `original_source`'s `cardinal8` walks them: rook directions first, then
/// bishop directions.
pub const RAY_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1),
];

fn leaper_table(deltas: &[(i32, i32); 8]) -> [Vec<Square>; 64] {
    std::array::from_fn(|idx| {
        let sq = Square::from_index(idx as u8);
        let rank = sq.rank() as i32;
        let file = sq.file() as i32;
        deltas
            .iter()
            .filter_map(|(dr, df)| Square::try_new(rank + dr, file + df))
            .collect()
    })
}

pub static KNIGHT_ATTACKS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));
pub static KING_ATTACKS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

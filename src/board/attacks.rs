//! Attack detection: is a given square attacked by a given side, used both
//! for check detection and for validating castling-through-check.

use crate::board::state::Board;
use crate::board::tables::{KING_ATTACKS, KNIGHT_ATTACKS, RAY_DIRECTIONS};
use crate::types::{Color, PieceKind, Square};

fn is_slider_direction(kind: PieceKind, dir_index: usize) -> bool {
    let is_rook_dir = dir_index < 4;
    match kind {
        PieceKind::Rook => is_rook_dir,
        PieceKind::Bishop => !is_rook_dir,
        PieceKind::Queen => true,
        _ => false,
    }
}

/// True if `square` is attacked by any piece of color `by`, walking sliders
/// ray-by-ray the way `original_source`'s `cardinal8`/`diratk` do.
pub fn attacked_by(board: &Board, square: Square, by: Color) -> bool {
    // Knight attacks.
    for &target in KNIGHT_ATTACKS[square.index()].iter() {
        if let Some(p) = board.piece_at(target) {
            if p.color == by && p.kind == PieceKind::Knight {
                return true;
            }
        }
    }

    // King attacks (needed so a king can't step adjacent to the enemy king).
    for &target in KING_ATTACKS[square.index()].iter() {
        if let Some(p) = board.piece_at(target) {
            if p.color == by && p.kind == PieceKind::King {
                return true;
            }
        }
    }

    // Pawn attacks: a pawn of color `by` attacks `square` if it sits one
    // rank behind `square` (from `by`'s perspective) on an adjacent file.
    let pawn_rank_delta: i32 = if by == Color::White { -1 } else { 1 };
    let rank = square.rank() as i32;
    let file = square.file() as i32;
    for df in [-1, 1] {
        if let Some(origin) = Square::try_new(rank + pawn_rank_delta, file + df) {
            if let Some(p) = board.piece_at(origin) {
                if p.color == by && p.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
    }

    // Sliders, ray by ray.
    for (dir_index, &(dr, df)) in RAY_DIRECTIONS.iter().enumerate() {
        let mut r = rank + dr;
        let mut f = file + df;
        while let Some(cur) = Square::try_new(r, f) {
            if let Some(p) = board.piece_at(cur) {
                if p.color == by && is_slider_direction(p.kind, dir_index) {
                    return true;
                }
                break;
            }
            r += dr;
            f += df;
        }
    }

    false
}

/// True if the side to move's king is currently attacked.
pub fn king_in_check(board: &Board, color: Color) -> bool {
    attacked_by(board, board.king_square(color), color.opposite())
}

/// Direction from `from` towards `to`, as a unit step, or `None` if the two
/// squares are not collinear (same rank, file, or diagonal).
fn ray_unit(from: Square, to: Square) -> Option<(i32, i32)> {
    let dr = to.rank() as i32 - from.rank() as i32;
    let df = to.file() as i32 - from.file() as i32;
    if dr == 0 && df == 0 {
        return None;
    }
    if dr != 0 && df != 0 && dr.abs() != df.abs() {
        return None;
    }
    Some((dr.signum(), df.signum()))
}

fn slides_along(kind: PieceKind, dir: (i32, i32)) -> bool {
    let orthogonal = dir.0 == 0 || dir.1 == 0;
    match kind {
        PieceKind::Queen => true,
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        _ => false,
    }
}

/// Walking from `attacker` toward `target` along `dir`, true if nothing
/// blocks the line before `target` is reached.
fn ray_is_clear(board: &Board, attacker: Square, target: Square, dir: (i32, i32)) -> bool {
    let mut r = attacker.rank() as i32 + dir.0;
    let mut f = attacker.file() as i32 + dir.1;
    loop {
        let Some(sq) = Square::try_new(r, f) else { return false };
        if sq == target {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        r += dir.0;
        f += dir.1;
    }
}

/// True if the piece sitting on `attacker` attacks `target` in `board`. Unlike
/// [`attacked_by`], which scans every square of a color looking for an
/// attacker, this asks about one specific piece.
fn piece_attacks_square(board: &Board, attacker: Square, target: Square) -> bool {
    let Some(p) = board.piece_at(attacker) else { return false };
    match p.kind {
        PieceKind::Knight => KNIGHT_ATTACKS[attacker.index()].iter().any(|&sq| sq == target),
        PieceKind::King => KING_ATTACKS[attacker.index()].iter().any(|&sq| sq == target),
        PieceKind::Pawn => {
            let dr: i32 = if p.color == Color::White { 1 } else { -1 };
            let rank = attacker.rank() as i32 + dr;
            [attacker.file() as i32 - 1, attacker.file() as i32 + 1]
                .into_iter()
                .any(|f| Square::try_new(rank, f) == Some(target))
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => match ray_unit(attacker, target) {
            Some(dir) if slides_along(p.kind, dir) => ray_is_clear(board, attacker, target, dir),
            _ => false,
        },
    }
}

/// Hypothetically plays `from -> to` (handling an en-passant capture) on a
/// scratch copy of `board`, then looks outward from `target` in the
/// direction opposite `from -> target` for the first piece now able to
/// attack `target` along that line: a check or pin uncovered by the piece
/// that just vacated `from`. Returns that attacker's square, or `None` if
/// `from`/`target` are not collinear or no such piece is found. Never
/// mutates `board`.
pub fn exposes(board: &Board, target: Square, from: Square, to: Square) -> Option<Square> {
    let dir = ray_unit(from, target)?;
    let mut working = board.clone();
    let mover = working.piece_at(from)?;

    let is_en_passant = mover.kind == PieceKind::Pawn
        && Some(to) == working.en_passant
        && working.piece_at(to).is_none();
    if is_en_passant {
        let captured_sq = Square::new(from.rank(), to.file());
        working.squares[captured_sq.index()] = None;
    }
    working.squares[from.index()] = None;
    working.squares[to.index()] = Some(mover);

    let behind = (-dir.0, -dir.1);
    let mut r = target.rank() as i32 + behind.0;
    let mut f = target.file() as i32 + behind.1;
    loop {
        let sq = Square::try_new(r, f)?;
        if let Some(p) = working.piece_at(sq) {
            return (p.color != mover.color && slides_along(p.kind, dir)).then_some(sq);
        }
        r += behind.0;
        f += behind.1;
    }
}

/// True if playing `from -> to` on `board` gives the mover's opponent a new,
/// continued or discovered attack on `target`: either the moved piece itself
/// now attacks `target` from `to` (including a castling rook relocated
/// alongside the king), or the move [`exposes`] an attacker behind `from`.
/// Returns the attacking square, if any. Never mutates `board`.
pub fn atkexp(board: &Board, target: Square, from: Square, to: Square) -> Option<Square> {
    let mut working = board.clone();
    let mover = working.piece_at(from)?;

    let is_castle = mover.kind == PieceKind::King
        && from.file() == 4
        && (to.file() as i32 - from.file() as i32).abs() == 2;
    let castle_rook_to = if is_castle {
        let rank = from.rank();
        let (rook_from, rook_to) =
            if to.file() == 6 { (Square::new(rank, 7), Square::new(rank, 5)) } else { (Square::new(rank, 0), Square::new(rank, 3)) };
        let rook = working.piece_at(rook_from);
        working.squares[rook_from.index()] = None;
        working.squares[rook_to.index()] = rook;
        Some(rook_to)
    } else {
        None
    };

    let is_en_passant = mover.kind == PieceKind::Pawn
        && Some(to) == working.en_passant
        && working.piece_at(to).is_none();
    if is_en_passant {
        let captured_sq = Square::new(from.rank(), to.file());
        working.squares[captured_sq.index()] = None;
    }
    working.squares[from.index()] = None;
    working.squares[to.index()] = Some(mover);

    if piece_attacks_square(&working, to, target) {
        return Some(to);
    }
    if let Some(rook_to) = castle_rook_to {
        if piece_attacks_square(&working, rook_to, target) {
            return Some(rook_to);
        }
    }

    exposes(board, target, from, to)
}

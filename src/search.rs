//! Fixed-depth negamax search with PV collection, grounded in
//! `original_source/move.c`'s `select_move` and `compmove.c`'s `Flack`
//! push/store/rewrite PV management. Deliberately has no alpha-beta
//! pruning, no quiescence search, no transposition table, no iterative
//! deepening and no multithreading — all explicit scope exclusions.

use crate::board::history::History;
use crate::board::{is_checkmate, legal_moves};
use crate::eval::static_score;
use crate::prng::MinStd;
use crate::types::Move;

/// Absolute value used to tag a mate score; the actual returned score is
/// `MATESCORE_ABS - ply_to_mate` (winning) or `-(MATESCORE_ABS - ply_to_mate)`
/// (losing), so deeper mates always compare as weaker than shallower ones.
pub const MATESCORE_ABS: i32 = 10_000_000;

pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATESCORE_ABS - 1000
}

/// Plies until mate encoded in a mate score, or `None` if it isn't one.
pub fn mate_distance_plies(score: i32) -> Option<i32> {
    is_mate_score(score).then(|| MATESCORE_ABS - score.abs())
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub pv: Vec<Move>,
    pub nodes: u64,
    pub depth: u32,
}

struct SearchContext<'a> {
    nodes: u64,
    jitter: Option<&'a mut MinStd>,
}

/// Runs a fixed-depth negamax search from `history`'s current position and
/// returns the best move, its score (from the side-to-move's perspective)
/// and the principal variation. `jitter`, when given, perturbs leaf scores
/// by a small amount so repeated games among otherwise-identical engine
/// instances do not always play the same line (spec.md's `random` toggle).
pub fn search(history: &mut History, depth: u32, jitter: Option<&mut MinStd>) -> SearchResult {
    let mut ctx = SearchContext { nodes: 0, jitter };
    let mut pv = Vec::new();
    let score = negamax(history, depth, 0, true, &mut ctx, &mut pv);
    let best_move = pv.first().copied();
    #[cfg(feature = "logging")]
    log::debug!(
        "search depth={depth} score={score} nodes={} pv={:?}",
        ctx.nodes,
        pv.iter().map(|m| m.to_string()).collect::<Vec<_>>()
    );
    SearchResult { best_move, score, pv, nodes: ctx.nodes, depth }
}

/// `check_repetition` is true only for the root's own children: history-based
/// repetition pruning is applied at that single level, never at deeper plies
/// (recursion below the root proceeds as if no history were threaded
/// through at all).
fn negamax(
    history: &mut History,
    depth: u32,
    ply: i32,
    check_repetition: bool,
    ctx: &mut SearchContext<'_>,
    pv: &mut Vec<Move>,
) -> i32 {
    ctx.nodes += 1;

    if history.current().halfmove_clock == 100 && !history.current().in_check() {
        return 0;
    }

    let moves = legal_moves(history.current());
    if moves.is_empty() {
        return if is_checkmate(history.current()) { -(MATESCORE_ABS - ply) } else { 0 };
    }

    if depth == 0 {
        let side = history.current().side_to_move;
        return static_score(history.current(), side, ctx.jitter.as_deref_mut());
    }

    let mut best_score = i32::MIN;
    let mut best_pv: Vec<Move> = Vec::new();

    for mv in moves {
        history.push_move(mv);
        let mut child_pv = Vec::new();
        let score = if check_repetition && history.current_repeats_ancestor() {
            0
        } else {
            -negamax(history, depth - 1, ply + 1, false, ctx, &mut child_pv)
        };
        history.pop();

        if score > best_score {
            best_score = score;
            best_pv.clear();
            best_pv.push(mv);
            best_pv.extend(child_pv);
        }
    }

    pv.clear();
    pv.extend(best_pv);
    best_score
}

/// Estimates node count for a full-width search at `depth`, the same
/// `(move_count^(depth+1) / 5) * 31` shape as `original_source`'s pre-search
/// depth trim heuristic.
pub fn estimate_node_count(branching_factor: u32, depth: u32) -> u64 {
    let powered = (branching_factor as u64).saturating_pow(depth + 1);
    (powered / 5).saturating_mul(31)
}

/// Picks the deepest depth (capped at `max_depth`) whose estimated node
/// count, divided by the engine's measured nodes-per-second, fits within
/// `time_budget_ms`. Falls back to depth 1 if even that would overrun.
pub fn time_aware_depth(
    branching_factor: u32,
    max_depth: u32,
    nodes_per_second: u64,
    time_budget_ms: u64,
) -> u32 {
    if nodes_per_second == 0 {
        return max_depth.min(1).max(1);
    }
    let budget_nodes = nodes_per_second * time_budget_ms / 1000;
    let mut depth = max_depth.max(1);
    while depth > 1 && estimate_node_count(branching_factor, depth) > budget_nodes.max(1) {
        depth -= 1;
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn finds_mate_in_one() {
        // White to move, Qh5 delivers checkmate against the fool's-mate setup.
        let board =
            crate::board::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
                .unwrap();
        let mut history = History::new(board);
        // black plays Qh4#, so search for white would instead just need to
        // demonstrate mate detection; here we directly verify the position
        // after black's move is seen as checkmate for white to move.
        let mv = Move::new(
            crate::types::Square::new(7, 3),
            crate::types::Square::new(3, 7),
        );
        history.push_move(mv);
        assert!(is_checkmate(history.current()));
        let result = search(&mut history, 1, None);
        assert!(result.best_move.is_none());
        assert!(result.score < 0);
    }

    #[test]
    fn prefers_winning_a_free_rook() {
        let board = crate::board::parse_fen("4k3/8/8/8/8/8/3r4/R3K3 w - - 0 1").unwrap();
        let mut history = History::new(board);
        let result = search(&mut history, 2, None);
        let mv = result.best_move.expect("search should find a move");
        assert_eq!(mv.to(), crate::types::Square::new(1, 3));
    }

    #[test]
    fn pv_length_matches_depth_when_game_continues() {
        let mut history = History::new(Board::starting_position());
        let result = search(&mut history, 2, None);
        assert_eq!(result.pv.len(), 2);
    }

    #[test]
    fn time_aware_depth_shrinks_under_tight_budget() {
        let generous = time_aware_depth(30, 6, 1_000_000, 10_000);
        let tight = time_aware_depth(30, 6, 1_000_000, 10);
        assert!(tight <= generous);
    }

    #[test]
    fn estimate_node_count_matches_formula() {
        assert_eq!(estimate_node_count(10, 2), (10u64.pow(3) / 5) * 31);
    }

    #[test]
    fn fifty_move_clock_does_not_force_a_draw_while_in_check() {
        let mut board =
            crate::board::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
                .unwrap();
        let mv = Move::new(crate::types::Square::new(7, 3), crate::types::Square::new(3, 7));
        let mut history = History::new({
            board.halfmove_clock = 0;
            board
        });
        history.push_move(mv);
        history.current_mut().halfmove_clock = 100;
        let result = search(&mut history, 1, None);
        assert!(result.score < 0);
    }
}

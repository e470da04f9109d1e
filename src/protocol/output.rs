//! Output formatting for the CECP/XBoard protocol: feature negotiation,
//! thinking lines and move announcements. Grounded in `xboard/output.rs`'s
//! `format_thinking`/`format_features` and `original_source/iomain.c`'s
//! `cecp_print_pv`/`print_cmd_error`.

use crate::board::{move_to_san, Board};
use crate::search::{self, SearchResult};
use crate::types::Move;

pub fn format_features() -> String {
    [
        "feature myname=\"Monchester-rs 0.1\"",
        "feature setboard=1",
        "feature ping=1",
        "feature san=0",
        "feature usermove=1",
        "feature colors=0",
        "feature done=1",
    ]
    .join("\n")
}

/// A thinking line: `depth score time_cs nodes seldepth knps tbhits pv...`,
/// per spec.md §6, matching `cecp_print_pv`'s field order exactly (seldepth
/// is reported equal to depth since this search has no quiescence
/// extension, and the tablebase-hits field is always zero).
pub fn format_thinking(board: &Board, result: &SearchResult, time_cs: u64) -> String {
    let score_cp = search::mate_distance_plies(result.score)
        .map(|plies| {
            let moves = (plies + 1) / 2;
            if result.score < 0 { -100_000 - moves } else { 100_000 + moves }
        })
        .unwrap_or(result.score / 10);

    let knps = if time_cs == 0 { 0 } else { (result.nodes * 10) / (time_cs.max(1) * 1000) };

    let mut line = format!(
        "{} {} {} {} {} {} 0\t",
        result.depth, score_cp, time_cs, result.nodes, result.depth, knps
    );
    line.push_str(&format_pv_san(board, &result.pv));
    line
}

fn format_pv_san(board: &Board, pv: &[Move]) -> String {
    let mut temp = board.clone();
    let mut parts = Vec::with_capacity(pv.len());
    for &mv in pv {
        parts.push(move_to_san(&temp, mv));
        let undo = temp.make_move(mv);
        let _ = undo;
    }
    parts.join(" ")
}

pub fn format_move_announcement(mv: Move) -> String {
    format!("move {mv}")
}

pub fn format_command_error(erred_cmd: &str, reason: &str) -> String {
    format!("Error ({reason}): {erred_cmd}")
}

pub fn format_result(outcome: &str, reason: &str) -> String {
    format!("{outcome} {{{reason}}}")
}

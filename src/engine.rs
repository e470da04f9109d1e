//! The driver layer binding search, evaluation and game history into a
//! CECP-facing engine: settings, time control and move selection.
//! Grounded in `original_source/globals.c`'s `CecpSettings`/`EngineMove`
//! and `compmove.c`'s `select_move`.

use crate::board::history::History;
use crate::prng::MinStd;
use crate::search::{self, SearchResult};
use crate::types::Move;

/// Engine-wide tunables, threaded explicitly rather than read from process
/// globals (spec.md §9, "Global mutable state").
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub depth_default: u32,
    pub depth_max: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings { depth_default: 4, depth_max: 8 }
    }
}

/// Per-game CECP-session state: everything the protocol layer can toggle.
#[derive(Debug, Clone)]
pub struct CecpSettings {
    pub randomize_moves: bool,
    pub ponder: bool,
    pub output_thinking: bool,
    pub opponent_name: Option<String>,
    minstd: MinStd,
}

impl Default for CecpSettings {
    fn default() -> Self {
        CecpSettings {
            randomize_moves: false,
            ponder: false,
            output_thinking: true,
            opponent_name: None,
            minstd: MinStd::new(0),
        }
    }
}

impl CecpSettings {
    /// `random` command: toggles jitter, reseeding from the wall clock if
    /// the generator had been left at a zero (disabled) seed.
    pub fn set_randomize(&mut self, on: bool) {
        self.randomize_moves = on;
        if on {
            self.minstd.reseed_if_zero();
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimeControl {
    pub nodes_per_second_estimate: u64,
    pub time_budget_ms: u64,
}

/// A move the engine decided to play, bundling the search result with its
/// long-algebraic and SAN renderings for the protocol layer.
#[derive(Debug, Clone)]
pub struct EngineMove {
    pub mv: Move,
    pub result: SearchResult,
}

/// Picks and plays the engine's move in `history` at the given depth,
/// consulting `settings`/`cecp` for jitter and falling back to the settings'
/// default depth. Returns `None` if the side to move has no legal moves.
pub fn select_move(
    history: &mut History,
    engine: &EngineSettings,
    cecp: &mut CecpSettings,
    time_control: Option<TimeControl>,
) -> Option<EngineMove> {
    let branching_factor_estimate = 30;
    let depth = match time_control {
        Some(tc) => search::time_aware_depth(
            branching_factor_estimate,
            engine.depth_max,
            tc.nodes_per_second_estimate,
            tc.time_budget_ms,
        )
        .min(engine.depth_max),
        None => engine.depth_default,
    };

    let mut jitter = cecp.randomize_moves.then_some(&mut cecp.minstd);
    let result = search::search(history, depth.max(1), jitter.as_deref_mut());
    result.best_move.map(|mv| EngineMove { mv, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn select_move_returns_none_on_checkmate() {
        let board =
            crate::board::parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let mut history = History::new(board);
        let engine = EngineSettings::default();
        let mut cecp = CecpSettings::default();
        assert!(select_move(&mut history, &engine, &mut cecp, None).is_none());
    }

    #[test]
    fn select_move_finds_a_legal_move_from_start() {
        let mut history = History::new(Board::starting_position());
        let engine = EngineSettings { depth_default: 1, depth_max: 1 };
        let mut cecp = CecpSettings::default();
        let mv = select_move(&mut history, &engine, &mut cecp, None).unwrap();
        assert!(crate::board::legal_moves(history.current()).contains(&mv.mv));
    }

    #[test]
    fn randomize_reseeds_a_zero_generator() {
        let mut cecp = CecpSettings::default();
        cecp.set_randomize(true);
        assert_ne!(cecp.minstd.seed(), 0);
    }
}

//! Game history as an arena of positions, grounded in
//! `original_source/brdlist.c`'s `BoardStateList` chain (`LastBoard`,
//! `pocc`, `rsc`) and its `same_position`/repetition-detection logic.

use crate::board::state::{Board, HistoryNode};
use crate::types::Move;

#[derive(Debug, Clone)]
pub struct History {
    nodes: Vec<HistoryNode>,
    current: usize,
}

/// Two positions are the same for repetition purposes iff side to move,
/// all four castling rights, the en-passant target and every square match.
pub fn same_position(a: &Board, b: &Board) -> bool {
    a.side_to_move == b.side_to_move
        && a.castling == b.castling
        && a.en_passant == b.en_passant
        && (0..64).all(|i| {
            let sq = crate::types::Square::from_index(i as u8);
            a.piece_at(sq) == b.piece_at(sq)
        })
}

impl History {
    pub fn new(start: Board) -> Self {
        History {
            nodes: vec![HistoryNode { board: start, mv: None, previous: None, pocc: None, rsc: false }],
            current: 0,
        }
    }

    pub fn current(&self) -> &Board {
        &self.nodes[self.current].board
    }

    pub fn current_mut(&mut self) -> &mut Board {
        &mut self.nodes[self.current].board
    }

    pub fn ply(&self) -> usize {
        self.current
    }

    /// Applies `mv` to the current position and records the resulting
    /// position as a new history node, linking `pocc` to the most recent
    /// earlier node with the identical position (if any) and setting `rsc`
    /// when that link closes a repetition since the last capture/pawn move.
    pub fn push_move(&mut self, mv: Move) {
        let mut next_board = self.current().clone();
        let undo = next_board.make_move(mv);
        let _ = undo;

        let reset_irreversible = next_board.halfmove_clock == 0;

        let mut pocc = None;
        if !reset_irreversible {
            let mut idx = self.nodes[self.current].previous;
            while let Some(i) = idx {
                if same_position(&self.nodes[i].board, &next_board) {
                    pocc = Some(i);
                    break;
                }
                if self.nodes[i].board.halfmove_clock == 0 {
                    break;
                }
                idx = self.nodes[i].previous;
            }
        }
        let rsc = pocc.is_some();

        self.nodes.push(HistoryNode {
            board: next_board,
            mv: Some(mv),
            previous: Some(self.current),
            pocc,
            rsc,
        });
        self.current = self.nodes.len() - 1;
    }

    /// Undoes the most recent move, dropping its history node. No-op at the
    /// root.
    pub fn pop(&mut self) -> bool {
        if let Some(prev) = self.nodes[self.current].previous {
            self.nodes.truncate(self.current + 1);
            self.nodes.pop();
            self.current = prev;
            true
        } else {
            false
        }
    }

    /// Counts occurrences of the current position walking back through
    /// `previous` links (stops at the last irreversible move, since no
    /// earlier position can repeat across a capture or pawn move).
    pub fn repetition_count(&self) -> u32 {
        let target = self.current();
        let mut count = 1u32;
        let mut idx = self.nodes[self.current].previous;
        while let Some(i) = idx {
            if same_position(&self.nodes[i].board, target) {
                count += 1;
            }
            if self.nodes[i].board.halfmove_clock == 0 {
                break;
            }
            idx = self.nodes[i].previous;
        }
        count
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.current().halfmove_clock >= 100 && !self.current().in_check()
    }

    /// True if the current node's `pocc` link is set, i.e. an earlier
    /// ancestor reachable over the `rsc` chain has the identical position.
    /// Used by the search to prune repetitions at the root's children
    /// without re-walking the whole chain on every node.
    pub fn current_repeats_ancestor(&self) -> bool {
        self.nodes[self.current].pocc.is_some()
    }

    /// Moves played so far, root to current, for PGN emission.
    pub fn moves(&self) -> Vec<Move> {
        let mut out = Vec::new();
        let mut idx = self.current;
        while let Some(mv) = self.nodes[idx].mv {
            out.push(mv);
            idx = self.nodes[idx].previous.expect("node with a move must have a parent");
        }
        out.reverse();
        out
    }

    pub fn root(&self) -> &Board {
        &self.nodes[0].board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::movegen::legal_moves;

    fn find(board: &Board, from: &str, to: &str) -> Move {
        use std::str::FromStr;
        let from = crate::types::Square::from_str(from).unwrap();
        let to = crate::types::Square::from_str(to).unwrap();
        legal_moves(board).into_iter().find(|m| m.from() == from && m.to() == to).unwrap()
    }

    #[test]
    fn threefold_repetition_via_knight_shuffle() {
        let mut history = History::new(Board::starting_position());
        for _ in 0..2 {
            history.push_move(find(history.current(), "g1", "f3"));
            history.push_move(find(history.current(), "g8", "f6"));
            history.push_move(find(history.current(), "f3", "g1"));
            history.push_move(find(history.current(), "f6", "g8"));
        }
        assert!(history.is_threefold_repetition());
    }

    #[test]
    fn pop_restores_previous_position() {
        let mut history = History::new(Board::starting_position());
        let start_fen = crate::board::fen::to_fen(history.current());
        history.push_move(find(history.current(), "e2", "e4"));
        assert!(history.pop());
        assert_eq!(crate::board::fen::to_fen(history.current()), start_fen);
    }

    #[test]
    fn moves_returns_chain_in_order() {
        let mut history = History::new(Board::starting_position());
        let m1 = find(history.current(), "e2", "e4");
        history.push_move(m1);
        let m2 = find(history.current(), "e7", "e5");
        history.push_move(m2);
        assert_eq!(history.moves(), vec![m1, m2]);
    }
}

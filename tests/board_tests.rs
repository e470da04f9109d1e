//! End-to-end scenarios over the position model and move generator.

use chess_engine::board::{
    is_checkmate, legal_moves, parse_fen, parse_move, Board,
};
use chess_engine::types::Square;

#[test]
fn starting_position_has_twenty_legal_moves() {
    let board = Board::starting_position();
    assert_eq!(legal_moves(&board).len(), 20);
}

#[test]
fn fools_mate_sequence_ends_in_checkmate() {
    let mut board = Board::starting_position();
    for notation in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mv = parse_move(&board, notation).expect("move should be legal");
        board.make_move(mv);
    }
    assert!(is_checkmate(&board));
}

#[test]
fn castling_rights_generated_when_path_is_clear() {
    let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves = legal_moves(&board);
    let from_king = Square::new(0, 4);
    assert!(moves.iter().any(|m| m.from() == from_king && m.to() == Square::new(0, 6)));
    assert!(moves.iter().any(|m| m.from() == from_king && m.to() == Square::new(0, 2)));
}

#[test]
fn en_passant_is_only_available_immediately_after_the_double_push() {
    let mut board = Board::starting_position();
    for notation in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        let mv = parse_move(&board, notation).unwrap();
        board.make_move(mv);
    }
    assert!(legal_moves(&board).iter().any(|m| m.to() == Square::new(5, 3)));

    // White declines the capture; the window closes permanently afterward.
    for notation in ["a2a3", "a6a5"] {
        let mv = parse_move(&board, notation).unwrap();
        board.make_move(mv);
    }
    assert!(!legal_moves(&board).iter().any(|m| m.to() == Square::new(5, 3)));
}

#[test]
fn pawn_promotion_enumerates_all_four_pieces() {
    let board = parse_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let promos: Vec<_> = legal_moves(&board)
        .into_iter()
        .filter(|m| m.from() == Square::new(6, 0))
        .collect();
    assert_eq!(promos.len(), 4);
}

#[test]
fn threefold_repetition_is_detected_via_knight_shuffle() {
    use chess_engine::board::history::History;
    let mut history = History::new(Board::starting_position());
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..2 {
        for notation in shuffle {
            let mv = parse_move(history.current(), notation).unwrap();
            history.push_move(mv);
        }
    }
    assert!(history.is_threefold_repetition());
}

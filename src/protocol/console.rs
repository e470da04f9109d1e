//! A small interactive line console, parallel to the CECP session, grounded
//! in `original_source/main.c`'s console vocabulary (`help`, `new`,
//! `resign`, `quit`, `bench`) and `iomain.c`'s `print_board`/`init_players`.

use crate::board::{fen::to_fen, Board};

pub const HELP_TEXT: &str = "commands understood: new, resign, help, bench, quit";

pub enum ConsoleCommand {
    Move(String),
    New,
    Resign,
    Help,
    Bench,
    Quit,
    Unknown(String),
}

pub fn parse_console_command(line: &str) -> ConsoleCommand {
    match line.trim() {
        "new" => ConsoleCommand::New,
        "resign" => ConsoleCommand::Resign,
        "help" => ConsoleCommand::Help,
        "bench" => ConsoleCommand::Bench,
        "quit" => ConsoleCommand::Quit,
        other if !other.is_empty() => ConsoleCommand::Move(other.to_string()),
        other => ConsoleCommand::Unknown(other.to_string()),
    }
}

/// Renders an ASCII board diagram plus its FEN, mirroring `print_board`'s
/// rank-by-rank layout (files A-H labeled beneath, FEN on the last line).
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for rank_from_top in 0..8 {
        let rank = 7 - rank_from_top;
        out.push_str(&format!("{}:  ", rank + 1));
        for file in 0..8 {
            let sq = crate::types::Square::new(rank, file);
            match board.piece_at(sq) {
                Some(p) => out.push_str(&format!("{} ", p.kind.to_fen_char(p.color))),
                None => out.push_str("- "),
            }
        }
        out.push('\n');
    }
    out.push_str("-------------------\n");
    out.push_str("    A B C D E F G H\n");
    out.push_str(&to_fen(board));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_console_verbs() {
        assert!(matches!(parse_console_command("new"), ConsoleCommand::New));
        assert!(matches!(parse_console_command("quit"), ConsoleCommand::Quit));
    }

    #[test]
    fn non_empty_other_text_treated_as_move_attempt() {
        assert!(matches!(parse_console_command("e2e4"), ConsoleCommand::Move(_)));
    }

    #[test]
    fn render_board_ends_with_fen() {
        let board = Board::starting_position();
        let rendered = render_board(&board);
        assert!(rendered.ends_with(&to_fen(&board)));
    }
}

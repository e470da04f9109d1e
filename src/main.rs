use std::io::{self, BufRead, Write};

use chess_engine::protocol::Session;

/// Reads CECP commands from stdin, driving a [`Session`] until `quit` or
/// end of input, mirroring the teacher's `fn main() { uci::run_uci_loop(); }`
/// shape generalized to this crate's CECP front-end.
fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim() == "quit" {
            break;
        }
        for out in session.handle_line(&line) {
            let _ = writeln!(stdout, "{out}");
        }
        let _ = stdout.flush();
    }
}

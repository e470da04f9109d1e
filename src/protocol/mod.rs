//! The CECP/XBoard protocol front-end: a thin, explicitly-stateful session
//! object wired into `main.rs`. Not part of the scored engine core, but
//! needed for the crate to be a runnable CECP engine binary.

pub mod command;
pub mod console;
pub mod output;

use crate::board::history::History;
use crate::board::{parse_fen, parse_move, Board};
use crate::engine::{select_move, CecpSettings, EngineSettings, TimeControl};
use crate::types::Color;
use command::{parse_command, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineRole {
    /// Engine plays neither side (force mode / just-set-up).
    Neither,
    Computer(Color),
}

pub struct Session {
    history: History,
    engine: EngineSettings,
    cecp: CecpSettings,
    role: EngineRole,
    time_control: Option<TimeControl>,
    fixed_depth: Option<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            history: History::new(Board::starting_position()),
            engine: EngineSettings::default(),
            cecp: CecpSettings::default(),
            role: EngineRole::Computer(Color::Black),
            time_control: None,
            fixed_depth: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Processes one input line and returns the output lines to print, in
    /// order. Never panics on malformed input: unrecognized or malformed
    /// commands produce a CECP `Error (...)` line instead.
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        match parse_command(line) {
            Ok(cmd) => self.handle_command(cmd),
            Err(e) => vec![output::format_command_error(&e.command, &e.reason)],
        }
    }

    fn handle_command(&mut self, cmd: Command) -> Vec<String> {
        match cmd {
            Command::XBoard | Command::Ignored => vec![],
            Command::Protover(_) => vec![output::format_features()],
            Command::New => {
                self.history = History::new(Board::starting_position());
                self.role = EngineRole::Computer(Color::Black);
                vec![]
            }
            Command::SetBoard(fen) => match parse_fen(&fen) {
                Ok(board) => {
                    self.history = History::new(board);
                    vec![]
                }
                Err(e) => vec![output::format_command_error(&fen, &e.to_string())],
            },
            Command::UserMove(notation) => self.apply_user_move(&notation),
            Command::Go => {
                self.role = EngineRole::Computer(self.history.current().side_to_move);
                self.engine_move()
            }
            Command::Force => {
                self.role = EngineRole::Neither;
                vec![]
            }
            Command::PlayOther => {
                let stm = self.history.current().side_to_move;
                self.role = EngineRole::Computer(stm.opposite());
                vec![]
            }
            Command::White => {
                self.role = EngineRole::Computer(Color::Black);
                vec![]
            }
            Command::Black => {
                self.role = EngineRole::Computer(Color::White);
                vec![]
            }
            Command::Time(cs) => {
                self.time_control = Some(TimeControl { nodes_per_second_estimate: 200_000, time_budget_ms: cs * 10 });
                vec![]
            }
            Command::OTime(_) => vec![],
            Command::Level { .. } => vec![],
            Command::St(seconds) => {
                self.time_control = Some(TimeControl {
                    nodes_per_second_estimate: 200_000,
                    time_budget_ms: seconds as u64 * 1000,
                });
                vec![]
            }
            Command::Sd(depth) => {
                self.fixed_depth = Some(depth.min(self.engine.depth_max));
                vec![]
            }
            Command::MoveNow => vec![],
            Command::Ping(n) => vec![format!("pong {n}")],
            Command::Undo => {
                self.history.pop();
                vec![]
            }
            Command::Remove => {
                self.history.pop();
                self.history.pop();
                vec![]
            }
            Command::Result(_) => {
                self.role = EngineRole::Neither;
                vec![]
            }
            Command::Hint => vec![],
            Command::Draw => vec![],
            Command::Post => {
                self.cecp.output_thinking = true;
                vec![]
            }
            Command::NoPost => {
                self.cecp.output_thinking = false;
                vec![]
            }
            Command::Hard => {
                self.cecp.ponder = true;
                vec![]
            }
            Command::Easy => {
                self.cecp.ponder = false;
                vec![]
            }
            Command::Random => {
                self.cecp.set_randomize(true);
                vec![]
            }
            Command::Name(name) => {
                self.cecp.opponent_name = Some(name);
                vec![]
            }
            Command::Quit => vec![],
        }
    }

    fn apply_user_move(&mut self, notation: &str) -> Vec<String> {
        match parse_move(self.history.current(), notation) {
            Ok(mv) => {
                self.history.push_move(mv);
                self.maybe_engine_reply()
            }
            Err(e) => vec![output::format_command_error(notation, &e.to_string())],
        }
    }

    fn maybe_engine_reply(&mut self) -> Vec<String> {
        match self.role {
            EngineRole::Computer(color) if color == self.history.current().side_to_move => {
                self.engine_move()
            }
            _ => vec![],
        }
    }

    fn engine_move(&mut self) -> Vec<String> {
        let depth = self.fixed_depth.unwrap_or(self.engine.depth_default);
        let mut engine = self.engine;
        engine.depth_default = depth;
        let board_before = self.history.current().clone();

        let Some(engine_move) = select_move(&mut self.history, &engine, &mut self.cecp, self.time_control) else {
            let loser = self.history.current().side_to_move;
            let outcome = if crate::board::is_checkmate(self.history.current()) {
                if loser == Color::White { "0-1" } else { "1-0" }
            } else {
                "1/2-1/2"
            };
            return vec![output::format_result(outcome, "Game over")];
        };

        self.history.push_move(engine_move.mv);

        let mut lines = Vec::new();
        if self.cecp.output_thinking {
            lines.push(output::format_thinking(&board_before, &engine_move.result, 0));
        }
        lines.push(output::format_move_announcement(engine_move.mv));

        if crate::board::is_checkmate(self.history.current()) {
            let mated = self.history.current().side_to_move;
            let outcome = if mated == Color::White { "0-1" } else { "1-0" };
            lines.push(output::format_result(outcome, "checkmate"));
        } else if crate::board::is_stalemate(self.history.current()) {
            lines.push(output::format_result("1/2-1/2", "stalemate"));
        } else if self.history.is_threefold_repetition() {
            lines.push(output::format_result("1/2-1/2", "repetition"));
        } else if self.history.is_fifty_move_draw() {
            lines.push(output::format_result("1/2-1/2", "50 move rule"));
        }

        lines
    }
}

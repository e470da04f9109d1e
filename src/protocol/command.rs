//! CECP/XBoard verb parsing, grounded in `xboard/command.rs`'s verb enum
//! shape and `original_source/iomain.c`/`main.c`'s recognized vocabulary.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    XBoard,
    Protover(u32),
    New,
    SetBoard(String),
    UserMove(String),
    Go,
    Force,
    PlayOther,
    White,
    Black,
    Time(u64),
    OTime(u64),
    Level { moves_per_session: u32, base_minutes: u32, increment_seconds: u32 },
    St(u32),
    Sd(u32),
    MoveNow,
    Ping(u32),
    Undo,
    Remove,
    Result(String),
    Hint,
    Draw,
    Post,
    NoPost,
    Hard,
    Easy,
    Random,
    Name(String),
    Quit,
    /// Anything accepted by the protocol but not acted on: CECP requires
    /// unknown well-formed commands to be silently tolerated rather than
    /// rejected outright when they look like noise (e.g. `accepted`/
    /// `rejected` feature-negotiation replies).
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub command: String,
    pub reason: String,
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let mut parts = line.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    let err = |reason: &str| ParseError { command: line.to_string(), reason: reason.to_string() };

    match verb {
        "xboard" => Ok(Command::XBoard),
        "protover" => rest.parse().map(Command::Protover).map_err(|_| err("expected integer protocol version")),
        "new" => Ok(Command::New),
        "setboard" => Ok(Command::SetBoard(rest.to_string())),
        "usermove" => Ok(Command::UserMove(rest.to_string())),
        "go" => Ok(Command::Go),
        "force" => Ok(Command::Force),
        "playother" => Ok(Command::PlayOther),
        "white" => Ok(Command::White),
        "black" => Ok(Command::Black),
        "time" => rest.parse().map(Command::Time).map_err(|_| err("expected centiseconds")),
        "otime" => rest.parse().map(Command::OTime).map_err(|_| err("expected centiseconds")),
        "level" => parse_level(rest).ok_or_else(|| err("expected 'mps base inc'")),
        "st" => rest.parse().map(Command::St).map_err(|_| err("expected integer seconds")),
        "sd" => rest.parse().map(Command::Sd).map_err(|_| err("expected integer depth")),
        "?" => Ok(Command::MoveNow),
        "ping" => rest.parse().map(Command::Ping).map_err(|_| err("expected integer")),
        "undo" => Ok(Command::Undo),
        "remove" => Ok(Command::Remove),
        "result" => Ok(Command::Result(rest.to_string())),
        "hint" => Ok(Command::Hint),
        "draw" => Ok(Command::Draw),
        "post" => Ok(Command::Post),
        "nopost" => Ok(Command::NoPost),
        "hard" => Ok(Command::Hard),
        "easy" => Ok(Command::Easy),
        "random" => Ok(Command::Random),
        "name" => Ok(Command::Name(rest.to_string())),
        "quit" => Ok(Command::Quit),
        "accepted" | "rejected" | "computer" | "variant" => Ok(Command::Ignored),
        bare if looks_like_coordinate_move(bare) => Ok(Command::UserMove(bare.to_string())),
        "" => Err(err("empty command")),
        _ => Err(err("unknown command")),
    }
}

fn looks_like_coordinate_move(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }
    (b'a'..=b'h').contains(&bytes[0])
        && (b'1'..=b'8').contains(&bytes[1])
        && (b'a'..=b'h').contains(&bytes[2])
        && (b'1'..=b'8').contains(&bytes[3])
}

fn parse_level(rest: &str) -> Option<Command> {
    let mut fields = rest.split_whitespace();
    let moves_per_session = fields.next()?.parse().ok()?;
    let base_minutes = fields.next()?.parse().ok()?;
    let increment_seconds = fields.next()?.parse().ok()?;
    Some(Command::Level { moves_per_session, base_minutes, increment_seconds })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_protover() {
        assert_eq!(parse_command("protover 2").unwrap(), Command::Protover(2));
    }

    #[test]
    fn parses_setboard_with_fen() {
        let cmd = parse_command("setboard rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert!(matches!(cmd, Command::SetBoard(_)));
    }

    #[test]
    fn bare_coordinate_move_parsed_as_usermove() {
        assert_eq!(parse_command("e2e4").unwrap(), Command::UserMove("e2e4".to_string()));
    }

    #[test]
    fn parses_level_command() {
        let cmd = parse_command("level 40 5 0").unwrap();
        assert_eq!(
            cmd,
            Command::Level { moves_per_session: 40, base_minutes: 5, increment_seconds: 0 }
        );
    }

    #[test]
    fn unknown_command_is_an_error_not_a_panic() {
        assert!(parse_command("frobnicate").is_err());
    }
}

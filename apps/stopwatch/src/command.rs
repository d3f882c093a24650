//! Line commands typed by the player.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Self::Start),
            "stop" | "x" | "" => Ok(Self::Stop),
            "reset" | "r" => Ok(Self::Reset),
            "status" | "?" => Ok(Self::Status),
            "help" | "h" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

pub const HELP: &str = "commands: start (s), stop (x or empty line), reset (r), status (?), help (h), quit (q)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!(" S ".parse::<Command>(), Ok(Command::Start));
        assert_eq!("x".parse::<Command>(), Ok(Command::Stop));
        assert_eq!("r".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("?".parse::<Command>(), Ok(Command::Status));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn empty_line_stops_the_clock() {
        assert_eq!("".parse::<Command>(), Ok(Command::Stop));
    }

    #[test]
    fn rejects_unknown_words() {
        let err = "jump".parse::<Command>().expect_err("unknown");
        assert!(err.contains("jump"));
    }
}

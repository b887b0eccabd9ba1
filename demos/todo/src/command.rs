//! Parsing stdin lines into dispatches

use std::fmt;

use crate::reducer::Payload;

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Dispatch `payload` to the named action
    Dispatch {
        action: &'static str,
        payload: Payload,
    },
    /// Print the current state
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadId(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(cmd) => write!(f, "unknown command: {}", cmd),
            ParseError::MissingArgument(cmd) => write!(f, "{} needs an argument", cmd),
            ParseError::BadId(raw) => write!(f, "not a todo id: {}", raw),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one line such as `add buy milk` or `toggle 2`
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    let dispatch = |action, payload| Ok(Command::Dispatch { action, payload });

    match cmd {
        "" => Err(ParseError::Empty),
        "add" => dispatch("addTodo", Payload::Text(required(rest, "add")?)),
        "input" => dispatch("setInputText", Payload::Text(rest.to_string())),
        "toggle" => dispatch("toggleTodo", Payload::Id(parse_id(rest, "toggle")?)),
        "remove" => dispatch("removeTodo", Payload::Id(parse_id(rest, "remove")?)),
        "clear-done" => dispatch("clearDone", Payload::None),
        "show" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn required(rest: &str, cmd: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(cmd))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_id(rest: &str, cmd: &'static str) -> Result<u64, ParseError> {
    let raw = required(rest, cmd)?;
    raw.parse().map_err(|_| ParseError::BadId(raw))
}

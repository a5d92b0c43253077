//! Wizard command parsing.
//!
//! Lines starting with `:` are commands; anything else is typed into the
//! station query box verbatim (an empty line clears it).

use std::path::PathBuf;

use crate::domain::{Category, UnknownCategory};

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// New contents of the station query box.
    Query(String),
    /// Choose suggestion N (1-based).
    Pick(usize),
    /// Choose nearby station N (1-based).
    Near(usize),
    Category(Category),
    Photo(PathBuf),
    RemovePhoto(usize),
    Describe(String),
    Send,
    Reset,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("неизвестная команда :{0}, наберите :help")]
    Unknown(String),

    #[error(":{0} ожидает номер")]
    ExpectedNumber(&'static str),

    #[error(":{0} ожидает аргумент")]
    MissingArgument(&'static str),

    #[error("неизвестный тип дефекта, доступны: {}", category_ids())]
    Category(#[from] UnknownCategory),
}

fn category_ids() -> String {
    Category::ALL.map(Category::id).join(", ")
}

/// Parse one input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Query(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "pick" | "p" => number("pick", arg).map(Command::Pick),
        "near" | "n" => number("near", arg).map(Command::Near),
        "cat" | "c" => Ok(Command::Category(Category::parse(arg)?)),
        "photo" => required("photo", arg).map(|p| Command::Photo(PathBuf::from(p))),
        "rmphoto" => number("rmphoto", arg).map(Command::RemovePhoto),
        "desc" | "d" => Ok(Command::Describe(arg.to_string())),
        "send" => Ok(Command::Send),
        "reset" => Ok(Command::Reset),
        "status" | "s" => Ok(Command::Status),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn number(name: &'static str, arg: &str) -> Result<usize, CommandError> {
    arg.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(CommandError::ExpectedNumber(name))
}

fn required<'a>(name: &'static str, arg: &'a str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(arg)
    }
}

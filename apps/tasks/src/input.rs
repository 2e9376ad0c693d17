//! Line commands typed at the prompt.

use shared::domain::{Filter, UnknownFilter};
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  add <title>      add a task (or: + <title>)
  toggle <n>       flip completion of row n (or: done <n>, x <n>)
  delete <n>       delete row n (or: rm <n>)
  clear            delete all completed tasks
  filter <f>       show all | active | completed
  list             redraw the list
  help             show this help
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Add(String),
    Toggle(usize),
    Delete(usize),
    ClearCompleted,
    SetFilter(Filter),
    Redraw,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs a row number")]
    MissingRow(String),
    #[error("'{0}' is not a row number")]
    InvalidRow(String),
    #[error(transparent)]
    Filter(#[from] UnknownFilter),
}

pub fn parse_command(line: &str) -> Result<UserCommand, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandParseError::Empty);
    }
    if let Some(title) = line.strip_prefix('+') {
        return Ok(UserCommand::Add(title.trim().to_string()));
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" | "new" => Ok(UserCommand::Add(rest.to_string())),
        "toggle" | "done" | "x" => row(verb, rest).map(UserCommand::Toggle),
        "delete" | "del" | "rm" => row(verb, rest).map(UserCommand::Delete),
        "clear" => Ok(UserCommand::ClearCompleted),
        "filter" | "show" => Ok(UserCommand::SetFilter(rest.parse()?)),
        "all" | "active" | "completed" => Ok(UserCommand::SetFilter(verb.parse()?)),
        "list" | "ls" => Ok(UserCommand::Redraw),
        "help" | "?" => Ok(UserCommand::Help),
        "quit" | "exit" | "q" => Ok(UserCommand::Quit),
        _ => Err(CommandParseError::Unknown(verb.to_string())),
    }
}

fn row(verb: &str, rest: &str) -> Result<usize, CommandParseError> {
    if rest.is_empty() {
        return Err(CommandParseError::MissingRow(verb.to_string()));
    }
    match rest.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(CommandParseError::InvalidRow(rest.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_title_text() {
        assert_eq!(
            parse_command("add Buy milk and eggs"),
            Ok(UserCommand::Add("Buy milk and eggs".into()))
        );
        assert_eq!(
            parse_command("+  Walk dog "),
            Ok(UserCommand::Add("Walk dog".into()))
        );
        assert_eq!(parse_command("add"), Ok(UserCommand::Add(String::new())));
    }

    #[test]
    fn row_commands_need_positive_numbers() {
        assert_eq!(parse_command("toggle 2"), Ok(UserCommand::Toggle(2)));
        assert_eq!(parse_command("RM 1"), Ok(UserCommand::Delete(1)));
        assert_eq!(
            parse_command("delete"),
            Err(CommandParseError::MissingRow("delete".into()))
        );
        assert_eq!(
            parse_command("toggle 0"),
            Err(CommandParseError::InvalidRow("0".into()))
        );
        assert_eq!(
            parse_command("x two"),
            Err(CommandParseError::InvalidRow("two".into()))
        );
    }

    #[test]
    fn filters_parse_with_or_without_verb() {
        assert_eq!(
            parse_command("filter completed"),
            Ok(UserCommand::SetFilter(Filter::Completed))
        );
        assert_eq!(
            parse_command("active"),
            Ok(UserCommand::SetFilter(Filter::Active))
        );
        assert!(matches!(
            parse_command("filter archived"),
            Err(CommandParseError::Filter(_))
        ));
    }

    #[test]
    fn unknown_and_blank_lines_are_rejected() {
        assert_eq!(parse_command("   "), Err(CommandParseError::Empty));
        assert_eq!(
            parse_command("frobnicate 3"),
            Err(CommandParseError::Unknown("frobnicate".into()))
        );
        assert_eq!(parse_command("clear"), Ok(UserCommand::ClearCompleted));
        assert_eq!(parse_command("exit"), Ok(UserCommand::Quit));
    }
}

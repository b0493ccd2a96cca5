//! Interactive command parsing.

use std::str::FromStr;

use thiserror::Error;

use crate::cli::Page;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command \"{0}\" (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("<{argument}> must be a number, got \"{value}\"")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },
    #[error("unknown page \"{0}\" (teachers or students)")]
    UnknownPage(String),
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Page(Page),
    Search(String),
    Sort(String),
    Unsort(String),
    Toggle(String),
    /// Drag a column to a 1-based position.
    Move { key: String, position: usize },
    /// Widen (positive) or narrow (negative) a column by pixels.
    Resize { key: String, delta: i32 },
    Add(String),
    Remove(String),
    Pool,
    Columns,
    Reset,
    Select(String),
    SelectAll,
    /// Click the row at a 1-based display position.
    Open(usize),
    Hours { teacher: u32, value: String },
    Meetings,
    ToggleSlot(u32),
    Book { slot: u32, student: u32 },
    Cancel(u32),
    Visitors,
    Organization,
    Retry,
    Quit,
}

pub const HELP: &str = "\
show                     redraw the current table
page <teachers|students> switch table
search [text]            filter rows (empty clears)
sort <key>               click a header (asc, desc, asc...)
unsort <key>             double-click a header (back to input order)
toggle <key>             show or hide a column
move <key> <position>    drag a column to a position
resize <key> <px>        widen (+) or narrow (-) a column
columns                  list the active columns
pool                     list columns that can be added
add <key> | remove <key> add or remove an extra column
reset                    restore the default columns
select <id> | select-all toggle row selection
open <n>                 open the n-th displayed row
hours <id> <value>       set a teacher's weekly hours (1-40)
meetings                 registration meeting slots
slot <id>                open or close a meeting slot
book <slot> <student>    book a slot | cancel <slot>
visitors                 reception log
org | retry              fetch the students organization
quit";

fn number<T: FromStr>(argument: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        argument,
        value: value.to_string(),
    })
}

fn required<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    args.next()
        .ok_or(CommandError::MissingArgument { command, argument })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match name.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "" | "show" | "ls" => Self::Show,
            "page" => {
                let page = required(&mut args, "page", "page")?;
                match page {
                    "teachers" | "t" => Self::Page(Page::Teachers),
                    "students" | "s" => Self::Page(Page::Students),
                    other => return Err(CommandError::UnknownPage(other.to_string())),
                }
            }
            "search" | "/" => Self::Search(rest.to_string()),
            "sort" => Self::Sort(required(&mut args, "sort", "key")?.to_string()),
            "unsort" => Self::Unsort(required(&mut args, "unsort", "key")?.to_string()),
            "toggle" => Self::Toggle(required(&mut args, "toggle", "key")?.to_string()),
            "move" => {
                let key = required(&mut args, "move", "key")?.to_string();
                let position = number("position", required(&mut args, "move", "position")?)?;
                Self::Move { key, position }
            }
            "resize" => {
                let key = required(&mut args, "resize", "key")?.to_string();
                let delta = number("px", required(&mut args, "resize", "px")?)?;
                Self::Resize { key, delta }
            }
            "add" => Self::Add(required(&mut args, "add", "key")?.to_string()),
            "remove" | "rm" => Self::Remove(required(&mut args, "remove", "key")?.to_string()),
            "pool" => Self::Pool,
            "columns" | "cols" => Self::Columns,
            "reset" => Self::Reset,
            "select" => Self::Select(required(&mut args, "select", "id")?.to_string()),
            "select-all" => Self::SelectAll,
            "open" => Self::Open(number("n", required(&mut args, "open", "n")?)?),
            "hours" => {
                let teacher = number("id", required(&mut args, "hours", "id")?)?;
                let value = required(&mut args, "hours", "value")?.to_string();
                Self::Hours { teacher, value }
            }
            "meetings" => Self::Meetings,
            "slot" => Self::ToggleSlot(number("id", required(&mut args, "slot", "id")?)?),
            "book" => {
                let slot = number("slot", required(&mut args, "book", "slot")?)?;
                let student = number("student", required(&mut args, "book", "student")?)?;
                Self::Book { slot, student }
            }
            "cancel" => Self::Cancel(number("slot", required(&mut args, "cancel", "slot")?)?),
            "visitors" => Self::Visitors,
            "org" => Self::Organization,
            "retry" => Self::Retry,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_commands() {
        assert_eq!("sort name".parse(), Ok(Command::Sort("name".into())));
        assert_eq!(
            "move email 2".parse(),
            Ok(Command::Move {
                key: "email".into(),
                position: 2
            })
        );
        assert_eq!(
            "resize name -30".parse(),
            Ok(Command::Resize {
                key: "name".into(),
                delta: -30
            })
        );
        assert_eq!("search  Ben Ali ".parse(), Ok(Command::Search("Ben Ali".into())));
        assert_eq!("search".parse(), Ok(Command::Search(String::new())));
        assert_eq!("".parse(), Ok(Command::Show));
    }

    #[test]
    fn test_hours_keeps_raw_value() {
        assert_eq!(
            "hours 3 abc".parse(),
            Ok(Command::Hours {
                teacher: 3,
                value: "abc".into()
            })
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "toggle",
                argument: "key"
            })
        );
        assert!(matches!(
            "open first".parse::<Command>(),
            Err(CommandError::InvalidNumber { argument: "n", .. })
        ));
        assert!(matches!(
            "page classes".parse::<Command>(),
            Err(CommandError::UnknownPage(_))
        ));
        assert!(matches!("dance".parse::<Command>(), Err(CommandError::Unknown(_))));
    }
}

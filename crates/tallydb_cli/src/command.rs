//! Command parsing.
//!
//! Lines are split on whitespace. The first word names the command and is
//! case sensitive; the rest are its arguments. Arity is checked here so the
//! engine is only ever called with well-formed arguments.

use crate::error::{CliError, CliResult};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET name value`
    Set {
        /// Key to write.
        name: String,
        /// Value to store.
        value: String,
    },
    /// `GET name`
    Get {
        /// Key to read.
        name: String,
    },
    /// `DELETE name`
    Delete {
        /// Key to remove.
        name: String,
    },
    /// `COUNT value`
    Count {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
    /// `SHOW`
    Show,
    /// `HELP`
    Help,
    /// `END`
    End,
}

impl Command {
    /// Parses one line of input.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::WrongArity`] or [`CliError::UnknownCommand`].
    pub fn parse(line: &str) -> CliResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "SET" => match args.as_slice() {
                [name, value] => Self::Set {
                    name: (*name).to_owned(),
                    value: (*value).to_owned(),
                },
                _ => return Err(arity("SET", "SET requires two arguments: name and value")),
            },
            "GET" => match args.as_slice() {
                [name] => Self::Get {
                    name: (*name).to_owned(),
                },
                _ => return Err(arity("GET", "GET requires one argument: name")),
            },
            "DELETE" => match args.as_slice() {
                [name] => Self::Delete {
                    name: (*name).to_owned(),
                },
                _ => return Err(arity("DELETE", "DELETE requires one argument: name")),
            },
            "COUNT" => match args.as_slice() {
                [value] => Self::Count {
                    value: (*value).to_owned(),
                },
                _ => return Err(arity("COUNT", "COUNT requires one argument: value")),
            },
            "BEGIN" => no_args(
                &args,
                Self::Begin,
                "BEGIN",
                "To BEGIN a transaction, use BEGIN command with no other arguments",
            )?,
            "ROLLBACK" => no_args(
                &args,
                Self::Rollback,
                "ROLLBACK",
                "To ROLLBACK a transaction, use ROLLBACK command with no other arguments",
            )?,
            "COMMIT" => no_args(
                &args,
                Self::Commit,
                "COMMIT",
                "To COMMIT a transaction, use COMMIT command with no other arguments",
            )?,
            "SHOW" => no_args(
                &args,
                Self::Show,
                "SHOW",
                "To SHOW the state of the DB, use SHOW command with no other arguments",
            )?,
            "HELP" => no_args(
                &args,
                Self::Help,
                "HELP",
                "To show HELP, use HELP command with no other arguments",
            )?,
            "END" => no_args(
                &args,
                Self::End,
                "END",
                "To exit the DB, use END command with no other arguments",
            )?,
            other => {
                return Err(CliError::UnknownCommand {
                    name: other.to_owned(),
                })
            }
        };

        Ok(Some(command))
    }
}

fn arity(command: &'static str, usage: &'static str) -> CliError {
    CliError::WrongArity { command, usage }
}

fn no_args(
    args: &[&str],
    command: Command,
    name: &'static str,
    usage: &'static str,
) -> CliResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(arity(name, usage))
    }
}

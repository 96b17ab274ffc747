//! Output formatting.

use crate::error::CliResult;
use clap::ValueEnum;
use std::io::Write;
use tallydb_core::{Snapshot, Value};

/// Token printed by `GET` for a key with no value.
pub const NULL_TOKEN: &str = "NULL";

/// Message printed when `ROLLBACK` finds nothing to roll back.
pub const NO_TRANSACTION_MESSAGE: &str = "TRANSACTION NOT FOUND";

/// Banner shown when the shell starts interactively.
pub const HELP_TEXT: &str = "\
In memory DB. Available commands:

SET [name] [value]
    Sets the name in the database to the given value

GET [name]
    Prints the value for the given name. If the value is not in the database, prints NULL

DELETE [name]
    Deletes the value from the database

COUNT [value]
    Returns the number of names that have the given value assigned to them. If that value is not
    assigned anywhere, prints 0

BEGIN
    Begins a new transaction

ROLLBACK
    Rolls back the most recent transaction. If there is no transaction to rollback, prints
    TRANSACTION NOT FOUND

COMMIT
    Commits all of the open transactions

SHOW
    Prints every name with its value and the count of that value

HELP
    Prints this message

END
    Exits the database
";

/// How `SHOW` renders the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width columns.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Renders the result of `GET`.
#[must_use]
pub fn render_value(value: Option<&Value>) -> &str {
    value.map_or(NULL_TOKEN, Value::as_str)
}

/// Writes a snapshot in the requested format.
pub fn write_snapshot(
    out: &mut impl Write,
    snapshot: &Snapshot,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{snapshot}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?,
    }
    Ok(())
}

//! Error types for the TallyDB shell.

use std::io;
use tallydb_core::CoreError;
use thiserror::Error;

/// Result type for shell operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading, parsing or running commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error on the input or output stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Engine error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A known command was given the wrong number of arguments.
    #[error("{usage}")]
    WrongArity {
        /// Command name as typed.
        command: &'static str,
        /// Message shown to the user.
        usage: &'static str,
    },

    /// The line could not be decoded as UTF-8.
    #[error("Input line is not valid UTF-8")]
    InvalidEncoding,

    /// The first word of the line is not a command.
    #[error(
        "Unrecognized command. Commands are case sensitive and should be one of \
         SET GET DELETE COUNT END BEGIN ROLLBACK or COMMIT"
    )]
    UnknownCommand {
        /// The word that was typed.
        name: String,
    },
}

impl CliError {
    /// Returns true if the error concerns one line of input only and the
    /// session can carry on.
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        match self {
            Self::WrongArity { .. } | Self::UnknownCommand { .. } | Self::InvalidEncoding => true,
            Self::Core(err) => err.is_recoverable(),
            Self::Io(_) | Self::Json(_) => false,
        }
    }
}

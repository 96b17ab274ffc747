//! Read loop and command dispatch.

use crate::command::Command;
use crate::error::{CliError, CliResult};
use crate::format::{render_value, write_snapshot, OutputFormat, HELP_TEXT, NO_TRANSACTION_MESSAGE};
use std::io::{BufRead, Write};
use tallydb_core::{CoreError, Database, Value};
use tracing::{debug, info};

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// `END` was entered.
    Stop,
}

/// Shell presentation options.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Prompt printed before each line; `None` disables it.
    pub prompt: Option<String>,
    /// Whether to print the help text when the loop starts.
    pub show_help: bool,
    /// Rendering used by `SHOW`.
    pub format: OutputFormat,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            prompt: Some(">> ".to_owned()),
            show_help: true,
            format: OutputFormat::Text,
        }
    }
}

impl SessionOptions {
    /// Options for non-interactive input: no prompt, no banner.
    #[must_use]
    pub fn script() -> Self {
        Self {
            prompt: None,
            show_help: false,
            format: OutputFormat::Text,
        }
    }

    /// Sets the `SHOW` format.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// A shell session over one database.
pub struct Session {
    db: Database,
    options: SessionOptions,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(db: Database, options: SessionOptions) -> Self {
        Self { db, options }
    }

    /// Returns the database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs until `END` or end of input.
    ///
    /// Malformed lines produce a diagnostic on `out` and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` or writing `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> CliResult<()> {
        if self.options.show_help {
            writeln!(out, "{HELP_TEXT}")?;
        }

        let mut buf = Vec::new();
        loop {
            if let Some(prompt) = &self.options.prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                break;
            }

            let result = match std::str::from_utf8(&buf) {
                Ok(line) => self.execute_line(line, &mut out),
                Err(_) => Err(CliError::InvalidEncoding),
            };
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(err) if err.is_diagnostic() => writeln!(out, "{err}")?,
                Err(err) => return Err(err),
            }
        }

        out.flush()?;
        info!(stats = ?self.db.stats(), "session finished");
        Ok(())
    }

    /// Parses and runs one line, writing any output to `out`.
    ///
    /// # Errors
    ///
    /// Returns parse errors, and I/O errors from `out`.
    pub fn execute_line(&mut self, line: &str, out: &mut impl Write) -> CliResult<Flow> {
        match Command::parse(line)? {
            Some(command) => self.execute(command, out),
            None => Ok(Flow::Continue),
        }
    }

    /// Runs one parsed command.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from `out`.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> CliResult<Flow> {
        debug!(?command, "execute");
        match command {
            Command::Set { name, value } => {
                self.db.set(name, Value::new(value)?);
            }
            Command::Get { name } => {
                let value = self.db.get(&name);
                writeln!(out, "{}", render_value(value.as_ref()))?;
            }
            Command::Delete { name } => {
                self.db.delete(&name);
            }
            Command::Count { value } => {
                writeln!(out, "{}", self.db.count(&value))?;
            }
            Command::Begin => self.db.begin(),
            Command::Rollback => match self.db.rollback() {
                Ok(_) => {}
                Err(CoreError::NoActiveTransaction) => writeln!(out, "{NO_TRANSACTION_MESSAGE}")?,
                Err(err) => return Err(CliError::Core(err)),
            },
            Command::Commit => {
                self.db.commit();
            }
            Command::Show => write_snapshot(out, &self.db.describe(), self.options.format)?,
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::End => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }
}

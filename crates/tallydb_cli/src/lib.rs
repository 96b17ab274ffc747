//! # TallyDB Shell
//!
//! Line-oriented command shell over [`tallydb_core`].
//!
//! # Commands
//!
//! - `SET name value` - store a value
//! - `GET name` - print a value, or `NULL`
//! - `DELETE name` - remove a key
//! - `COUNT value` - print how many keys hold a value
//! - `BEGIN` / `ROLLBACK` / `COMMIT` - nested transactions
//! - `SHOW` - dump every key with its value and count
//! - `HELP` - print the command summary
//! - `END` - leave the shell

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod format;
pub mod session;

pub use command::Command;
pub use error::{CliError, CliResult};
pub use format::{OutputFormat, HELP_TEXT, NO_TRANSACTION_MESSAGE, NULL_TOKEN};
pub use session::{Flow, Session, SessionOptions};

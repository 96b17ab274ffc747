//! # TallyDB Core
//!
//! In-memory key/value engine for TallyDB.
//!
//! This crate provides:
//! - A record store mapping keys to values
//! - A count index of how many keys hold each value
//! - Nested transactions backed by an undo log
//! - A lock-protected [`Database`] facade with operation counters
//!
//! ## Example
//!
//! ```rust
//! use tallydb_core::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! engine.set("a", Value::new("foo").unwrap());
//! engine.begin();
//! engine.set("a", Value::new("bar").unwrap());
//! engine.begin();
//! engine.delete("a");
//!
//! engine.rollback().unwrap();
//! assert_eq!(engine.get("a").map(|v| v.as_str()), Some("bar"));
//! assert_eq!(engine.count("bar"), 1);
//!
//! engine.commit();
//! assert!(engine.rollback().is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod engine;
mod error;
mod index;
mod snapshot;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::Config;
pub use database::Database;
pub use engine::{Engine, MutationMode, MutationOutcome, RollbackSummary};
pub use error::{CoreError, CoreResult};
pub use index::CountIndex;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use stats::{DatabaseStats, StatsSnapshot};
pub use store::RecordStore;
pub use transaction::{TransactionFrame, TransactionLog, UndoRecord};
pub use types::{Key, Value};

/// TallyDB version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

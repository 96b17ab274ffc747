//! Database facade.

use crate::config::Config;
use crate::engine::{Engine, MutationOutcome, RollbackSummary};
use crate::error::{CoreError, CoreResult};
use crate::snapshot::Snapshot;
use crate::stats::{DatabaseStats, StatsSnapshot};
use crate::types::{Key, Value};
use parking_lot::Mutex;
use tracing::warn;

/// The main database handle.
///
/// `Database` is the shareable entry point for TallyDB. It holds the
/// [`Engine`] behind a single lock, so each public operation runs as one
/// critical section over the record store, count index and transaction log
/// together. There is one logical session: transactions opened through any
/// handle are the same transactions.
///
/// # Example
///
/// ```rust
/// use tallydb_core::{CoreError, Database, Value};
///
/// let db = Database::new();
/// db.set("a", Value::new("foo").unwrap());
///
/// db.begin();
/// db.delete("a");
/// assert_eq!(db.count("foo"), 0);
///
/// db.rollback().unwrap();
/// assert_eq!(db.get("a").unwrap().as_str(), "foo");
///
/// assert_eq!(db.rollback().unwrap_err(), CoreError::NoActiveTransaction);
/// ```
#[derive(Debug)]
pub struct Database {
    /// Configuration.
    config: Config,
    /// Store, index and log; one unit of mutual exclusion.
    engine: Mutex<Engine>,
    /// Operation counters.
    stats: DatabaseStats,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Creates an empty database with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty database with a custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            engine: Mutex::new(Engine::with_capacity(config.initial_capacity)),
            stats: DatabaseStats::new(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current value of `key`, `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = self.engine.lock().get(key).cloned();
        if self.config.collect_stats {
            self.stats.record_get();
        }
        value
    }

    /// Returns the number of keys currently holding `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        let count = self.engine.lock().count(value);
        if self.config.collect_stats {
            self.stats.record_count();
        }
        count
    }

    /// Stores `value` under `key`.
    pub fn set(&self, key: impl Into<Key>, value: Value) -> MutationOutcome {
        let outcome = self.engine.lock().set(key, value);
        if self.config.collect_stats {
            self.stats.record_set(outcome.is_applied());
        }
        outcome
    }

    /// Removes `key`. A no-op if the key is absent.
    pub fn delete(&self, key: &str) -> MutationOutcome {
        let outcome = self.engine.lock().delete(key);
        if self.config.collect_stats {
            self.stats.record_delete(outcome.is_applied());
        }
        outcome
    }

    /// Opens a nested transaction.
    pub fn begin(&self) {
        self.engine.lock().begin();
        if self.config.collect_stats {
            self.stats.record_begin();
        }
    }

    /// Closes every open transaction, making all mutations permanent.
    ///
    /// Returns the number of transactions that were open.
    pub fn commit(&self) -> usize {
        let discarded = self.engine.lock().commit();
        if self.config.collect_stats {
            self.stats.record_commit();
        }
        discarded
    }

    /// Reverses the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is open.
    pub fn rollback(&self) -> CoreResult<RollbackSummary> {
        let mut engine = self.engine.lock();
        let result = engine.rollback();

        if self.config.verify_invariants && result.is_ok() {
            if let Err(err) = engine.check_invariants() {
                warn!(error = %err, "invariant check failed after rollback");
            }
        }
        drop(engine);

        if self.config.collect_stats {
            match &result {
                Ok(summary) => self.stats.record_rollback(summary.replayed),
                Err(CoreError::NoActiveTransaction) => self.stats.record_failed_rollback(),
                Err(_) => {}
            }
        }
        result
    }

    /// Returns the transaction nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.engine.lock().depth()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.lock().len()
    }

    /// Returns true if no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.lock().is_empty()
    }

    /// Returns a key-ordered dump of all key/value/count triples.
    #[must_use]
    pub fn describe(&self) -> Snapshot {
        self.engine.lock().describe()
    }

    /// Checks the count index against the record store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] on mismatch.
    pub fn check_invariants(&self) -> CoreResult<()> {
        self.engine.lock().check_invariants()
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Consumes the database, returning the engine.
    #[must_use]
    pub fn into_engine(self) -> Engine {
        self.engine.into_inner()
    }
}

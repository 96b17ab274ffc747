//! Database statistics.
//!
//! Operation counters for diagnostics.
//!
//! # Usage
//!
//! ```rust
//! use tallydb_core::{Database, Value};
//!
//! let db = Database::new();
//! db.set("a", Value::new("foo").unwrap());
//! let _ = db.get("a");
//!
//! let stats = db.stats();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Database operation counters.
///
/// All counters are atomic and can be read without taking the database lock.
#[derive(Debug, Default)]
pub struct DatabaseStats {
    // Reads
    gets: AtomicU64,
    counts: AtomicU64,

    // Mutations
    sets: AtomicU64,
    deletes: AtomicU64,
    /// Sets of an unchanged value and deletes of an absent key.
    noop_mutations: AtomicU64,

    // Transactions
    begins: AtomicU64,
    commits: AtomicU64,
    rollbacks: AtomicU64,
    failed_rollbacks: AtomicU64,
    undo_records_replayed: AtomicU64,
}

impl DatabaseStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count(&self) {
        self.counts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&self, applied: bool) {
        if applied {
            self.sets.fetch_add(1, Ordering::Relaxed);
        } else {
            self.noop_mutations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_delete(&self, applied: bool) {
        if applied {
            self.deletes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.noop_mutations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_begin(&self) {
        self.begins.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self, replayed: usize) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
        self.undo_records_replayed
            .fetch_add(replayed as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_rollback(&self) {
        self.failed_rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            counts: self.counts.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            noop_mutations: self.noop_mutations.load(Ordering::Relaxed),
            begins: self.begins.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
            failed_rollbacks: self.failed_rollbacks.load(Ordering::Relaxed),
            undo_records_replayed: self.undo_records_replayed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`DatabaseStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Number of `get` calls.
    pub gets: u64,
    /// Number of `count` calls.
    pub counts: u64,
    /// Number of sets that changed state.
    pub sets: u64,
    /// Number of deletes that changed state.
    pub deletes: u64,
    /// Number of sets and deletes that were no-ops.
    pub noop_mutations: u64,
    /// Number of transactions opened.
    pub begins: u64,
    /// Number of commits, including commits with nothing open.
    pub commits: u64,
    /// Number of successful rollbacks.
    pub rollbacks: u64,
    /// Number of rollbacks refused for lack of a transaction.
    pub failed_rollbacks: u64,
    /// Total undo records replayed by rollbacks.
    pub undo_records_replayed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = DatabaseStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn noop_mutations_counted_separately() {
        let stats = DatabaseStats::new();
        stats.record_set(true);
        stats.record_set(false);
        stats.record_delete(false);
        stats.record_delete(true);

        let snap = stats.snapshot();
        assert_eq!(snap.sets, 1);
        assert_eq!(snap.deletes, 1);
        assert_eq!(snap.noop_mutations, 2);
    }

    #[test]
    fn rollbacks_accumulate_replayed_records() {
        let stats = DatabaseStats::new();
        stats.record_rollback(3);
        stats.record_rollback(2);
        stats.record_failed_rollback();

        let snap = stats.snapshot();
        assert_eq!(snap.rollbacks, 2);
        assert_eq!(snap.undo_records_replayed, 5);
        assert_eq!(snap.failed_rollbacks, 1);
    }

    #[test]
    fn concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(DatabaseStats::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let s = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    s.record_get();
                    s.record_count();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.gets, 1000);
        assert_eq!(snap.counts, 1000);
    }
}

//! Mutation engine and transaction controller.

use crate::error::{CoreError, CoreResult};
use crate::index::CountIndex;
use crate::snapshot::{Snapshot, SnapshotEntry};
use crate::store::RecordStore;
use crate::transaction::{TransactionLog, UndoRecord};
use crate::types::{Key, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Whether a mutation appends to the transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Normal mutation; recorded in the innermost frame if one is open.
    Logged,
    /// Replay of an undo record; never recorded.
    Rollback,
}

/// Result of a `set` or `delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// State changed.
    Applied,
    /// The call was a no-op: the key already held the value, or a deleted
    /// key was already absent. Nothing was logged.
    Unchanged,
}

impl MutationOutcome {
    /// Returns true if state changed.
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// What a successful rollback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackSummary {
    /// Number of undo records replayed.
    pub replayed: usize,
    /// Nesting depth after the rollback.
    pub depth: usize,
}

/// The storage engine: record store, count index and transaction log as
/// one owned aggregate.
///
/// Every mutation is applied to the live state at once. When a transaction
/// is open, the mutation also leaves an undo record in the innermost frame.
///
/// # Example
///
/// ```rust
/// use tallydb_core::{Engine, Value};
///
/// let mut engine = Engine::new();
/// engine.begin();
/// engine.set("a", Value::new("foo").unwrap());
/// assert_eq!(engine.count("foo"), 1);
///
/// engine.rollback().unwrap();
/// assert!(engine.get("a").is_none());
/// assert_eq!(engine.count("foo"), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Engine {
    store: RecordStore,
    index: CountIndex,
    log: TransactionLog,
}

impl Engine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: RecordStore::with_capacity(capacity),
            index: CountIndex::new(),
            log: TransactionLog::new(),
        }
    }

    // === Reads ===

    /// Returns the current value of `key`, `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    /// Returns the number of keys currently holding `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.index.count(value)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the transaction nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.log.depth()
    }

    /// Returns the number of undo records held across all open frames.
    #[must_use]
    pub fn pending_records(&self) -> usize {
        self.log.pending_records()
    }

    // === Mutations ===

    /// Stores `value` under `key`.
    pub fn set(&mut self, key: impl Into<Key>, value: Value) -> MutationOutcome {
        self.set_with_mode(key.into(), value, MutationMode::Logged)
    }

    /// Removes `key`. A no-op if the key is absent.
    pub fn delete(&mut self, key: &str) -> MutationOutcome {
        self.delete_with_mode(key, MutationMode::Logged)
    }

    /// Stores `value` under `key`, logging only in [`MutationMode::Logged`].
    pub fn set_with_mode(&mut self, key: Key, value: Value, mode: MutationMode) -> MutationOutcome {
        if self.store.get(key.as_str()) == Some(&value) {
            return MutationOutcome::Unchanged;
        }

        let undo_key = self.should_log(mode).then(|| key.clone());
        trace!(key = %key, value = %value, ?mode, "set");

        let prior = self.store.insert(key, value.clone());
        self.index.increment(value);
        if let Some(prior) = &prior {
            self.index.decrement(prior);
        }

        if let Some(key) = undo_key {
            self.log.record(UndoRecord::Set { key, prior });
        }
        MutationOutcome::Applied
    }

    /// Removes `key`, logging only in [`MutationMode::Logged`].
    pub fn delete_with_mode(&mut self, key: &str, mode: MutationMode) -> MutationOutcome {
        let Some(removed) = self.store.remove(key) else {
            return MutationOutcome::Unchanged;
        };
        trace!(key, value = %removed, ?mode, "delete");

        self.index.decrement(&removed);

        if self.should_log(mode) {
            self.log.record(UndoRecord::Delete {
                key: Key::from(key),
                removed,
            });
        }
        MutationOutcome::Applied
    }

    /// Puts `key` back into the state `prior` describes, without logging.
    ///
    /// An absent prior un-creates the key by deleting it.
    pub(crate) fn restore(&mut self, key: Key, prior: Option<Value>) {
        match prior {
            Some(value) => {
                self.set_with_mode(key, value, MutationMode::Rollback);
            }
            None => {
                self.delete_with_mode(key.as_str(), MutationMode::Rollback);
            }
        }
    }

    fn should_log(&self, mode: MutationMode) -> bool {
        mode == MutationMode::Logged && self.log.is_active()
    }

    // === Transactions ===

    /// Opens a nested transaction.
    pub fn begin(&mut self) {
        self.log.begin();
        debug!(depth = self.log.depth(), "begin");
    }

    /// Makes every mutation so far permanent, closing all open transactions.
    ///
    /// Returns the number of frames discarded; 0 if none were open.
    pub fn commit(&mut self) -> usize {
        let discarded = self.log.clear();
        debug!(discarded, "commit");
        discarded
    }

    /// Reverses every mutation made while the innermost transaction was
    /// innermost, then closes it. Outer frames are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] if no transaction is open.
    /// State is unchanged in that case.
    pub fn rollback(&mut self) -> CoreResult<RollbackSummary> {
        let frame = self.log.pop().ok_or(CoreError::NoActiveTransaction)?;
        let replayed = frame.len();

        for record in frame.into_replay_order() {
            record.replay(self);
        }

        let depth = self.log.depth();
        debug!(replayed, depth, "rollback");
        Ok(RollbackSummary { replayed, depth })
    }

    // === Diagnostics ===

    /// Returns a stable, key-ordered dump of all key/value/count triples.
    #[must_use]
    pub fn describe(&self) -> Snapshot {
        let mut entries: Vec<_> = self
            .store
            .iter()
            .map(|(key, value)| SnapshotEntry {
                key: key.clone(),
                value: value.clone(),
                count: self.index.count(value.as_str()),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        Snapshot {
            depth: self.log.depth(),
            entries,
        }
    }

    /// Recounts the store and checks it against the count index.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] describing the first
    /// mismatch found.
    pub fn check_invariants(&self) -> CoreResult<()> {
        let mut expected: HashMap<&Value, usize> = HashMap::new();
        for (_, value) in self.store.iter() {
            *expected.entry(value).or_insert(0) += 1;
        }

        for (value, &want) in &expected {
            let got = self.index.count(value.as_str());
            if got != want {
                return Err(CoreError::invariant_violation(format!(
                    "count of {value} is {got}, expected {want}"
                )));
            }
        }

        if self.index.len() != expected.len() {
            return Err(CoreError::invariant_violation(format!(
                "count index holds {} values, store holds {}",
                self.index.len(),
                expected.len()
            )));
        }

        for (value, got) in self.index.iter() {
            if got == 0 {
                return Err(CoreError::invariant_violation(format!(
                    "zero count stored for {value}"
                )));
            }
            if !expected.contains_key(value) {
                return Err(CoreError::invariant_violation(format!(
                    "count of {value} is {got} but no key holds it"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Value {
        Value::new(s).unwrap()
    }

    #[test]
    fn get_missing_is_none() {
        let engine = Engine::new();
        assert!(engine.get("a").is_none());
        assert_eq!(engine.count("foo"), 0);
    }

    #[test]
    fn set_updates_counts() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        engine.set("b", value("foo"));
        assert_eq!(engine.count("foo"), 2);

        engine.set("a", value("bar"));
        assert_eq!(engine.count("foo"), 1);
        assert_eq!(engine.count("bar"), 1);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn set_same_value_is_noop() {
        let mut engine = Engine::new();
        assert!(engine.set("a", value("foo")).is_applied());
        assert_eq!(engine.set("a", value("foo")), MutationOutcome::Unchanged);
        assert_eq!(engine.count("foo"), 1);
    }

    #[test]
    fn set_same_value_in_transaction_is_not_logged() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        engine.begin();
        engine.set("a", value("foo"));
        assert_eq!(engine.pending_records(), 0);
    }

    #[test]
    fn delete_removes_and_drops_zero_count() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        assert!(engine.delete("a").is_applied());

        assert!(engine.get("a").is_none());
        assert_eq!(engine.count("foo"), 0);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut engine = Engine::new();
        engine.begin();
        assert_eq!(engine.delete("a"), MutationOutcome::Unchanged);
        assert_eq!(engine.pending_records(), 0);
    }

    #[test]
    fn mutations_outside_transaction_are_not_logged() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        engine.delete("a");
        assert_eq!(engine.pending_records(), 0);
    }

    #[test]
    fn rollback_without_transaction_fails() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));

        assert_eq!(engine.rollback(), Err(CoreError::NoActiveTransaction));
        assert_eq!(engine.get("a"), Some(&value("foo")));
        assert_eq!(engine.count("foo"), 1);
    }

    #[test]
    fn nested_rollback_restores_each_level() {
        let mut engine = Engine::new();
        engine.begin();
        engine.set("a", value("foo"));
        assert_eq!(engine.get("a"), Some(&value("foo")));
        engine.begin();
        engine.set("a", value("bar"));
        assert_eq!(engine.get("a"), Some(&value("bar")));
        engine.set("a", value("baz"));

        let summary = engine.rollback().unwrap();
        assert_eq!(summary, RollbackSummary { replayed: 2, depth: 1 });
        assert_eq!(engine.get("a"), Some(&value("foo")));

        engine.rollback().unwrap();
        assert!(engine.get("a").is_none());
        assert_eq!(engine.count("foo"), 0);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn cross_key_nested_rollback_then_commit() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        engine.set("b", value("baz"));
        engine.begin();
        assert_eq!(engine.get("a"), Some(&value("foo")));
        engine.set("a", value("bar"));
        assert_eq!(engine.count("bar"), 1);
        engine.begin();
        assert_eq!(engine.count("bar"), 1);
        engine.delete("a");
        assert!(engine.get("a").is_none());
        assert_eq!(engine.count("bar"), 0);

        engine.rollback().unwrap();
        assert_eq!(engine.get("a"), Some(&value("bar")));
        assert_eq!(engine.count("bar"), 1);

        assert_eq!(engine.commit(), 1);
        assert_eq!(engine.get("a"), Some(&value("bar")));
        assert_eq!(engine.get("b"), Some(&value("baz")));
        assert_eq!(engine.rollback(), Err(CoreError::NoActiveTransaction));
    }

    #[test]
    fn commit_discards_all_frames() {
        let mut engine = Engine::new();
        for _ in 0..5 {
            engine.begin();
            engine.set("a", value("x"));
        }
        assert_eq!(engine.depth(), 5);
        assert_eq!(engine.commit(), 5);
        assert_eq!(engine.depth(), 0);
        assert_eq!(engine.rollback(), Err(CoreError::NoActiveTransaction));
        assert_eq!(engine.get("a"), Some(&value("x")));
    }

    #[test]
    fn commit_without_transaction_is_noop() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        assert_eq!(engine.commit(), 0);
        assert_eq!(engine.get("a"), Some(&value("foo")));
    }

    #[test]
    fn repeated_mutation_of_one_key_rolls_back_fully() {
        let mut engine = Engine::new();
        engine.set("k", value("v0"));
        engine.begin();
        engine.set("k", value("v1"));
        engine.delete("k");
        engine.set("k", value("v2"));
        engine.set("k", value("v0"));
        engine.set("k", value("v3"));
        engine.delete("k");

        engine.rollback().unwrap();
        assert_eq!(engine.get("k"), Some(&value("v0")));
        assert_eq!(engine.count("v0"), 1);
        for v in ["v1", "v2", "v3"] {
            assert_eq!(engine.count(v), 0);
        }
        engine.check_invariants().unwrap();
    }

    #[test]
    fn inner_rollback_leaves_outer_frame_intact() {
        let mut engine = Engine::new();
        engine.begin();
        engine.set("a", value("outer"));
        engine.begin();
        engine.set("a", value("inner"));
        engine.set("b", value("inner"));
        engine.rollback().unwrap();

        assert_eq!(engine.pending_records(), 1);
        assert_eq!(engine.get("a"), Some(&value("outer")));
        assert!(engine.get("b").is_none());

        engine.rollback().unwrap();
        assert!(engine.is_empty());
        assert_eq!(engine.count("outer"), 0);
    }

    #[test]
    fn empty_frame_rollback() {
        let mut engine = Engine::new();
        engine.set("a", value("foo"));
        engine.begin();
        let summary = engine.rollback().unwrap();
        assert_eq!(summary.replayed, 0);
        assert_eq!(engine.get("a"), Some(&value("foo")));
    }

    #[test]
    fn describe_is_sorted_by_key() {
        let mut engine = Engine::new();
        engine.set("b", value("foo"));
        engine.set("a", value("foo"));
        engine.set("c", value("bar"));

        let snapshot = engine.describe();
        let keys: Vec<_> = snapshot.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(snapshot.entries[0].count, 2);
        assert_eq!(snapshot.entries[2].count, 1);
    }
}

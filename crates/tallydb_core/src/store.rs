//! Record store: the authoritative key to value mapping.

use crate::types::{Key, Value};
use std::collections::HashMap;

/// Mapping from key to its current value.
///
/// A key missing from the store has no value. The store never holds an
/// absent marker; removing the key is the only way to clear it.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: HashMap<Key, Value>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    /// Returns true if `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.records.insert(key, value)
    }

    /// Removes `key`, returning the value it held.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.records.remove(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all key/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Value {
        Value::new(s).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let mut store = RecordStore::new();
        assert!(store.insert(Key::from("a"), value("foo")).is_none());
        assert_eq!(store.get("a"), Some(&value("foo")));
        assert!(store.contains("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_returns_previous() {
        let mut store = RecordStore::new();
        store.insert(Key::from("a"), value("foo"));
        let prev = store.insert(Key::from("a"), value("bar"));
        assert_eq!(prev, Some(value("foo")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut store = RecordStore::new();
        assert!(store.remove("missing").is_none());
        assert!(store.is_empty());
    }
}

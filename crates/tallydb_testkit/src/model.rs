//! Reference model of the engine.
//!
//! The model takes a full copy of the store on every `begin` and restores
//! that copy on `rollback`, and it computes counts by scanning. It shares no
//! code with the undo-log engine, which makes it a useful oracle.

use std::collections::BTreeMap;

/// Snapshot-per-transaction model database.
#[derive(Debug, Default, Clone)]
pub struct ModelDatabase {
    store: BTreeMap<String, String>,
    saved: Vec<BTreeMap<String, String>>,
}

impl ModelDatabase {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.store.get(key).map(String::as_str)
    }

    /// Counts keys holding `value` by scanning.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.store.values().filter(|v| *v == value).count()
    }

    /// Stores `value` under `key`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.store.insert(key.to_owned(), value.to_owned());
    }

    /// Removes `key`.
    pub fn delete(&mut self, key: &str) {
        self.store.remove(key);
    }

    /// Saves a copy of the store.
    pub fn begin(&mut self) {
        self.saved.push(self.store.clone());
    }

    /// Drops all saved copies.
    pub fn commit(&mut self) {
        self.saved.clear();
    }

    /// Restores the most recent saved copy. Returns false if there is none.
    pub fn rollback(&mut self) -> bool {
        match self.saved.pop() {
            Some(store) => {
                self.store = store;
                true
            }
            None => false,
        }
    }

    /// Returns the transaction depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Returns the full store.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.store
    }
}

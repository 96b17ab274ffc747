//! Human-readable dump of the live state.

use crate::types::{Key, Value};
use serde::Serialize;
use std::fmt;

/// One key with its value and the value's current count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    /// The key.
    pub key: Key,
    /// Value currently stored under the key.
    pub value: Value,
    /// Number of keys holding `value`.
    pub count: usize,
}

/// Key-ordered view of every key/value/count triple, for diagnostics.
///
/// The text rendering uses fixed-width columns:
///
/// ```text
/// NAME       | VALUE      | COUNT
/// a            foo          2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Transaction nesting depth when the snapshot was taken.
    pub depth: usize,
    /// Entries sorted by key.
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NAME       | VALUE      | COUNT")?;
        for entry in &self.entries {
            write!(f, "\n{:10}   {:10}   {}", entry.key, entry.value, entry.count)?;
        }
        Ok(())
    }
}

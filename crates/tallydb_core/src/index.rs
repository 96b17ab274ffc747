//! Count index: how many keys currently hold each value.

use crate::types::Value;
use std::collections::HashMap;

/// Mapping from value to the number of keys holding it.
///
/// Derived data maintained alongside the [`RecordStore`](crate::RecordStore).
/// Entries never hold a zero count; a value whose last holder goes away is
/// removed from the index.
#[derive(Debug, Default, Clone)]
pub struct CountIndex {
    counts: HashMap<Value, usize>,
}

impl CountIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys holding `value`, 0 if none.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Records one more key holding `value`.
    pub fn increment(&mut self, value: Value) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Records one fewer key holding `value`, dropping the entry at zero.
    pub fn decrement(&mut self, value: &Value) {
        let Some(count) = self.counts.get_mut(value) else {
            tracing::warn!(value = %value, "decrement of value missing from count index");
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(value);
        }
    }

    /// Returns the number of distinct values with a non-zero count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no value is held by any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over all value/count pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, usize)> {
        self.counts.iter().map(|(v, c)| (v, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Value {
        Value::new(s).unwrap()
    }

    #[test]
    fn missing_value_counts_zero() {
        let index = CountIndex::new();
        assert_eq!(index.count("nothing"), 0);
    }

    #[test]
    fn increment_and_decrement() {
        let mut index = CountIndex::new();
        index.increment(value("foo"));
        index.increment(value("foo"));
        assert_eq!(index.count("foo"), 2);

        index.decrement(&value("foo"));
        assert_eq!(index.count("foo"), 1);
    }

    #[test]
    fn zero_entries_are_removed() {
        let mut index = CountIndex::new();
        index.increment(value("foo"));
        index.decrement(&value("foo"));

        assert_eq!(index.count("foo"), 0);
        assert!(index.is_empty());
        assert!(index.iter().all(|(_, c)| c > 0));
    }

    #[test]
    fn decrement_missing_is_noop() {
        let mut index = CountIndex::new();
        index.decrement(&value("ghost"));
        assert!(index.is_empty());
    }
}

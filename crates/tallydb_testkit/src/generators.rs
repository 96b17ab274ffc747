//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that generated
//! sequences hit the same key repeatedly and share values across keys,
//! which is where the count index and undo replay get interesting.

use proptest::prelude::*;

/// Keys used by generated operations.
pub const KEYS: &[&str] = &["a", "b", "c", "d", "e"];

/// Values used by generated operations.
pub const VALUES: &[&str] = &["foo", "bar", "baz", "qux"];

/// One engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Store a value.
    Set {
        /// Key.
        key: String,
        /// Value.
        value: String,
    },
    /// Remove a key.
    Delete {
        /// Key.
        key: String,
    },
    /// Read a key.
    Get {
        /// Key.
        key: String,
    },
    /// Read a value's count.
    Count {
        /// Value.
        value: String,
    },
    /// Open a transaction.
    Begin,
    /// Close all transactions.
    Commit,
    /// Undo the innermost transaction.
    Rollback,
}

impl Operation {
    /// Returns true for `Set` and `Delete`.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Set { .. } | Self::Delete { .. })
    }
}

/// Strategy for keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS).prop_map(str::to_owned)
}

/// Strategy for values.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(VALUES).prop_map(str::to_owned)
}

/// Strategy for `Set` and `Delete` only.
pub fn mutation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Set { key, value }),
        1 => key_strategy().prop_map(|key| Operation::Delete { key }),
    ]
}

/// Strategy for any operation, transactions included.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        6 => mutation_strategy(),
        1 => key_strategy().prop_map(|key| Operation::Get { key }),
        1 => value_strategy().prop_map(|value| Operation::Count { value }),
        2 => Just(Operation::Begin),
        1 => Just(Operation::Commit),
        2 => Just(Operation::Rollback),
    ]
}

/// Strategy for a sequence of mutations.
pub fn mutation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(mutation_strategy(), min_ops..max_ops)
}

/// Strategy for a sequence of arbitrary operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

//! Undo records.

use crate::engine::Engine;
use crate::types::{Key, Value};

/// Instructions for reversing one mutation.
///
/// Each record captures the state of a single key immediately before the
/// mutation it describes, so a frame holding several records for the same
/// key can be unwound one step at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoRecord {
    /// Reverses a set. `prior` is `None` when the key was previously absent.
    Set {
        /// Key that was written.
        key: Key,
        /// Value the key held before the write.
        prior: Option<Value>,
    },
    /// Reverses a delete by re-creating the key.
    Delete {
        /// Key that was removed.
        key: Key,
        /// Value the key held when it was removed.
        removed: Value,
    },
}

impl UndoRecord {
    /// Returns the key this record restores.
    #[must_use]
    pub fn key(&self) -> &Key {
        match self {
            Self::Set { key, .. } | Self::Delete { key, .. } => key,
        }
    }

    /// Returns the value the key is restored to, `None` meaning absent.
    #[must_use]
    pub fn restores_to(&self) -> Option<&Value> {
        match self {
            Self::Set { prior, .. } => prior.as_ref(),
            Self::Delete { removed, .. } => Some(removed),
        }
    }

    /// Applies this record to the live state without logging.
    pub fn replay(self, engine: &mut Engine) {
        match self {
            Self::Set { key, prior } => engine.restore(key, prior),
            Self::Delete { key, removed } => engine.restore(key, Some(removed)),
        }
    }
}

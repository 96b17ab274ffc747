//! Error types for TallyDB core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in TallyDB core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Rollback requested while no transaction is open.
    ///
    /// The engine state is unchanged when this is returned.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// Values must be non-empty tokens.
    #[error("value must not be empty")]
    EmptyValue,

    /// The count index disagrees with the record store.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// Description of the mismatch.
        message: String,
    },
}

impl CoreError {
    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Returns true if the caller can keep issuing operations after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CoreError::NoActiveTransaction.to_string(),
            "no active transaction"
        );
        assert_eq!(
            CoreError::invariant_violation("count of foo is 2, expected 1").to_string(),
            "invariant violation: count of foo is 2, expected 1"
        );
    }

    #[test]
    fn recoverability() {
        assert!(CoreError::NoActiveTransaction.is_recoverable());
        assert!(CoreError::EmptyValue.is_recoverable());
        assert!(!CoreError::invariant_violation("x").is_recoverable());
    }
}

//! Database configuration.

/// Configuration for creating a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of keys to reserve space for up front.
    pub initial_capacity: usize,

    /// Whether to maintain operation counters.
    pub collect_stats: bool,

    /// Whether to recount the store after every rollback and log any
    /// disagreement with the count index. Intended for debugging.
    pub verify_invariants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            collect_stats: true,
            verify_invariants: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of keys to reserve space for.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets whether operation counters are maintained.
    #[must_use]
    pub const fn collect_stats(mut self, value: bool) -> Self {
        self.collect_stats = value;
        self
    }

    /// Sets whether invariants are re-checked after each rollback.
    #[must_use]
    pub const fn verify_invariants(mut self, value: bool) -> Self {
        self.verify_invariants = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 0);
        assert!(config.collect_stats);
        assert!(!config.verify_invariants);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .initial_capacity(1024)
            .collect_stats(false)
            .verify_invariants(true);

        assert_eq!(config.initial_capacity, 1024);
        assert!(!config.collect_stats);
        assert!(config.verify_invariants);
    }
}

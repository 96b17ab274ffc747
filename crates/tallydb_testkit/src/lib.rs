//! # TallyDB Testkit
//!
//! Test utilities for TallyDB.
//!
//! This crate provides:
//! - proptest strategies for operation sequences
//! - A snapshot-based reference model of the engine
//! - Harnesses that check the engine against the model and its invariants
//!
//! ## Usage
//!
//! ```rust
//! use tallydb_testkit::prelude::*;
//!
//! let mut harness = DifferentialHarness::new();
//! harness.apply(&Operation::Begin);
//! harness.apply(&Operation::Set { key: "a".into(), value: "foo".into() });
//! harness.apply(&Operation::Rollback);
//! assert!(harness.engine.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
}

pub use generators::*;
pub use harness::*;
pub use model::*;

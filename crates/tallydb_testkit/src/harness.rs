//! Harnesses that drive the engine and check it against the model.

use crate::generators::Operation;
use crate::model::ModelDatabase;
use std::collections::BTreeMap;
use tallydb_core::{CoreError, Engine, Value};

/// Runs the same operations against [`Engine`] and [`ModelDatabase`] and
/// asserts that they agree after every step.
#[derive(Debug, Default)]
pub struct DifferentialHarness {
    /// Engine under test.
    pub engine: Engine,
    /// Oracle.
    pub model: ModelDatabase,
    steps: usize,
}

impl DifferentialHarness {
    /// Creates a harness over empty databases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one operation to both sides and checks the results.
    ///
    /// # Panics
    ///
    /// Panics if the engine and the model disagree.
    pub fn apply(&mut self, op: &Operation) {
        self.steps += 1;
        match op {
            Operation::Set { key, value } => {
                let stored = Value::new(value.as_str()).expect("generated values are non-empty");
                self.engine.set(key.as_str(), stored);
                self.model.set(key, value);
            }
            Operation::Delete { key } => {
                self.engine.delete(key);
                self.model.delete(key);
            }
            Operation::Get { key } => {
                assert_eq!(
                    self.engine.get(key).map(Value::as_str),
                    self.model.get(key),
                    "step {}: GET {key}",
                    self.steps
                );
            }
            Operation::Count { value } => {
                assert_eq!(
                    self.engine.count(value),
                    self.model.count(value),
                    "step {}: COUNT {value}",
                    self.steps
                );
            }
            Operation::Begin => {
                self.engine.begin();
                self.model.begin();
            }
            Operation::Commit => {
                self.engine.commit();
                self.model.commit();
            }
            Operation::Rollback => {
                let had_frame = self.model.rollback();
                match self.engine.rollback() {
                    Ok(_) => assert!(had_frame, "step {}: engine rolled back nothing", self.steps),
                    Err(CoreError::NoActiveTransaction) => {
                        assert!(!had_frame, "step {}: engine lost a frame", self.steps);
                    }
                    Err(err) => panic!("step {}: unexpected error {err}", self.steps),
                }
            }
        }
        self.check();
    }

    /// Applies every operation in order.
    pub fn apply_all(&mut self, ops: &[Operation]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Asserts full-state agreement and the count index invariants.
    ///
    /// # Panics
    ///
    /// Panics on any mismatch.
    pub fn check(&self) {
        assert_eq!(
            state_of(&self.engine),
            *self.model.entries(),
            "step {}: store mismatch",
            self.steps
        );
        assert_eq!(
            self.engine.depth(),
            self.model.depth(),
            "step {}: depth mismatch",
            self.steps
        );
        for value in self.model.entries().values() {
            assert_eq!(
                self.engine.count(value),
                self.model.count(value),
                "step {}: count of {value}",
                self.steps
            );
        }
        if let Err(err) = self.engine.check_invariants() {
            panic!("step {}: {err}", self.steps);
        }
    }
}

/// Returns the engine's store as an ordered map of strings.
#[must_use]
pub fn state_of(engine: &Engine) -> BTreeMap<String, String> {
    engine
        .describe()
        .entries
        .into_iter()
        .map(|e| (e.key.as_str().to_owned(), e.value.as_str().to_owned()))
        .collect()
}

/// Applies `setup` outside any transaction, then runs `mutations` inside one
/// transaction and rolls it back, asserting the store and every count are
/// exactly what they were before `begin`.
///
/// # Panics
///
/// Panics if the rollback does not reproduce the pre-transaction state.
pub fn assert_rollback_restores(setup: &[Operation], mutations: &[Operation]) {
    let mut engine = Engine::new();
    for op in setup {
        apply_mutation(&mut engine, op);
    }

    let before = state_of(&engine);
    let counts_before: Vec<_> = crate::generators::VALUES
        .iter()
        .map(|v| engine.count(v))
        .collect();

    engine.begin();
    for op in mutations {
        apply_mutation(&mut engine, op);
    }
    engine
        .rollback()
        .expect("a transaction was opened before the mutations");

    assert_eq!(state_of(&engine), before, "store not restored");
    let counts_after: Vec<_> = crate::generators::VALUES
        .iter()
        .map(|v| engine.count(v))
        .collect();
    assert_eq!(counts_after, counts_before, "counts not restored");
    assert_eq!(engine.depth(), 0);
    engine.check_invariants().expect("invariants hold after rollback");
}

/// Applies a `Set` or `Delete` to `engine`; other operations are ignored.
pub fn apply_mutation(engine: &mut Engine, op: &Operation) {
    match op {
        Operation::Set { key, value } => {
            let value = Value::new(value.as_str()).expect("generated values are non-empty");
            engine.set(key.as_str(), value);
        }
        Operation::Delete { key } => {
            engine.delete(key);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{
        mutation_sequence_strategy, operation_sequence_strategy, PropTestConfig,
    };
    use proptest::prelude::*;

    fn set(key: &str, value: &str) -> Operation {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn harness_agrees_on_nested_example() {
        let mut harness = DifferentialHarness::new();
        harness.apply_all(&[
            Operation::Begin,
            set("a", "foo"),
            Operation::Begin,
            set("a", "bar"),
            set("a", "baz"),
            Operation::Rollback,
            Operation::Get { key: "a".into() },
            Operation::Rollback,
            Operation::Get { key: "a".into() },
            Operation::Count {
                value: "foo".into(),
            },
            Operation::Rollback,
        ]);
        assert!(harness.engine.get("a").is_none());
    }

    #[test]
    fn rollback_restores_repeated_mutation() {
        assert_rollback_restores(
            &[set("a", "foo")],
            &[
                set("a", "bar"),
                Operation::Delete { key: "a".into() },
                set("a", "baz"),
                set("b", "foo"),
            ],
        );
    }

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn engine_matches_model(ops in operation_sequence_strategy(1, 80)) {
            let mut harness = DifferentialHarness::new();
            harness.apply_all(&ops);
        }

        #[test]
        fn single_rollback_restores_pre_transaction_state(
            setup in mutation_sequence_strategy(0, 10),
            mutations in mutation_sequence_strategy(0, 40),
        ) {
            assert_rollback_restores(&setup, &mutations);
        }

        #[test]
        fn counts_match_store_without_transactions(ops in mutation_sequence_strategy(1, 60)) {
            let mut engine = Engine::new();
            for op in &ops {
                apply_mutation(&mut engine, op);
                prop_assert!(engine.check_invariants().is_ok());
            }
        }

        #[test]
        fn commit_always_disables_rollback(
            depth in 0usize..8,
            ops in mutation_sequence_strategy(0, 10),
        ) {
            let mut engine = Engine::new();
            for _ in 0..depth {
                engine.begin();
                for op in &ops {
                    apply_mutation(&mut engine, op);
                }
            }
            let before = state_of(&engine);
            prop_assert_eq!(engine.commit(), depth);
            prop_assert_eq!(engine.rollback(), Err(CoreError::NoActiveTransaction));
            prop_assert_eq!(state_of(&engine), before);
        }
    }
}

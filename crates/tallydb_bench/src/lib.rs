//! Benchmark utilities.

#![warn(missing_docs)]

use rand::seq::SliceRandom;
use rand::Rng;
use tallydb_core::{Engine, Value};

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key{i}")).collect()
}

/// Generate `count` distinct values.
pub fn generate_values(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| Value::new(format!("value{i}")).expect("generated values are non-empty"))
        .collect()
}

/// Generate `ops` random key/value assignments over the given pools.
pub fn random_assignments(keys: &[String], values: &[Value], ops: usize) -> Vec<(String, Value)> {
    let mut rng = rand::thread_rng();
    (0..ops)
        .map(|_| {
            let key = keys.choose(&mut rng).expect("key pool is not empty").clone();
            let value = values[rng.gen_range(0..values.len())].clone();
            (key, value)
        })
        .collect()
}

/// Build an engine with every key set, cycling through the value pool.
pub fn populated_engine(keys: &[String], values: &[Value]) -> Engine {
    let mut engine = Engine::with_capacity(keys.len());
    for (key, value) in keys.iter().zip(values.iter().cycle()) {
        engine.set(key.as_str(), value.clone());
    }
    engine
}

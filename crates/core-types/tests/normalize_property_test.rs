//! Property-based tests for the row normalizer.
//!
//! Rows are generated from a mix of alias source keys, canonical keys and
//! unrelated columns so every branch of the alias table is exercised.

use core_types::{normalize, Row, ALIASES};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use serde_json::Value;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 200,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn key_strategy() -> impl Strategy<Value = String> {
    let mut known: Vec<String> = ALIASES
        .iter()
        .flat_map(|(source, canonical)| [source.to_string(), canonical.to_string()])
        .collect();
    known.extend(["id", "castrado", "cor", "pelagem"].map(String::from));
    prop_oneof![
        prop::sample::select(known),
        "[a-z_]{1,12}",
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z ]{0,16}".prop_map(Value::String),
    ]
}

fn row_strategy() -> impl Strategy<Value = Row> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..12)
        .prop_map(|entries| entries.into_iter().collect::<Row>())
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn normalization_is_idempotent(row in row_strategy()) {
        let once = normalize(row);
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalization_keeps_every_original_key(row in row_strategy()) {
        let output = normalize(row.clone());
        for (key, value) in &row {
            prop_assert_eq!(output.get(key), Some(value));
        }
    }

    #[test]
    fn normalization_only_adds_canonical_keys(row in row_strategy()) {
        let output = normalize(row.clone());
        for key in output.keys().filter(|key| !row.contains_key(*key)) {
            prop_assert!(ALIASES.iter().any(|(_, canonical)| *canonical == key.as_str()));
        }
    }

    #[test]
    fn canonical_key_comes_from_first_present_source(row in row_strategy()) {
        let output = normalize(row.clone());
        for (_, canonical) in ALIASES {
            if row.contains_key(*canonical) {
                continue;
            }
            let expected = ALIASES
                .iter()
                .filter(|(_, c)| c == canonical)
                .find_map(|(source, _)| row.get(*source));
            prop_assert_eq!(output.get(*canonical), expected);
        }
    }
}

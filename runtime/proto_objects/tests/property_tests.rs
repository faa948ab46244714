//! Property-based tests for the record-combination utilities.
//!
//! Records are generated from small maps of short lowercase keys to
//! integers, so key collisions between two generated records are common.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeMap;

use proptest::prelude::*;
use proto_objects::{extend, inherit, intersection, keys, merge, subtract, union};
use proto_value::{Record, Value};

fn entries_strategy() -> impl Strategy<Value = BTreeMap<String, i32>> {
    prop::collection::btree_map("[a-e]{1,2}", -100..100i32, 0..8)
}

fn record(entries: &BTreeMap<String, i32>) -> Record {
    Record::from_entries(entries.iter().map(|(k, v)| (k.as_str(), *v)))
}

fn value_at(record: &Record, key: &str) -> Value {
    record.get(key).unwrap()
}

proptest! {
    #[test]
    fn inherit_reads_through_without_own_keys(entries in entries_strategy()) {
        let parent = record(&entries);
        let heir = inherit(&Value::Record(parent.clone())).unwrap();
        prop_assert!(heir.own_keys().is_empty());
        for key in entries.keys() {
            prop_assert_eq!(value_at(&heir, key), value_at(&parent, key));
        }
    }

    #[test]
    fn heir_writes_shadow_without_touching_parent(entries in entries_strategy()) {
        let parent = record(&entries);
        let heir = inherit(&Value::Record(parent.clone())).unwrap();
        for key in entries.keys() {
            heir.set(key, "shadow").unwrap();
        }
        for (key, value) in &entries {
            prop_assert_eq!(value_at(&parent, key), Value::number(*value));
            prop_assert_eq!(value_at(&heir, key), Value::string("shadow"));
        }
    }

    #[test]
    fn extend_makes_target_agree_with_source(
        a in entries_strategy(),
        b in entries_strategy(),
    ) {
        let target = record(&a);
        let source = record(&b);
        extend(&target, &source).unwrap();
        for key in b.keys() {
            prop_assert_eq!(value_at(&target, key), value_at(&source, key));
        }
    }

    #[test]
    fn merge_never_changes_existing_values(
        a in entries_strategy(),
        b in entries_strategy(),
    ) {
        let target = record(&a);
        merge(&target, &record(&b)).unwrap();
        for (key, value) in &a {
            prop_assert_eq!(value_at(&target, key), Value::number(*value));
        }
        for key in b.keys() {
            prop_assert!(target.has_own(key));
        }
    }

    #[test]
    fn union_has_every_key_and_prefers_first(
        a in entries_strategy(),
        b in entries_strategy(),
    ) {
        let out = union(&record(&a), &record(&b)).unwrap();
        let mut expected = b.clone();
        expected.extend(a.iter().map(|(k, v)| (k.clone(), *v)));
        prop_assert_eq!(out.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(value_at(&out, key), Value::number(*value));
        }
    }

    #[test]
    fn intersection_keys_are_shared_keys(
        a in entries_strategy(),
        b in entries_strategy(),
    ) {
        let out = intersection(&record(&a), &record(&b)).unwrap();
        let mut got = keys(&Value::Record(out)).unwrap();
        got.sort();
        let expected: Vec<String> = a.keys().filter(|k| b.contains_key(*k)).cloned().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn subtract_leaves_no_shared_keys(
        a in entries_strategy(),
        b in entries_strategy(),
    ) {
        let target = record(&a);
        subtract(&target, &record(&b)).unwrap();
        for key in target.own_keys() {
            prop_assert!(!b.contains_key(&key));
            prop_assert!(a.contains_key(&key));
        }
    }
}

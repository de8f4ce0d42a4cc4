#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! These tests verify that the containers serialize to the expected JSON
//! shapes and deserialize by sequential insertion.

use pst::compare::Reversed;
use pst::persistent::{PersistentList, PersistentTreeMap, PersistentTreeSet};
use rstest::rstest;

// =============================================================================
// PersistentList Integration Tests
// =============================================================================

#[rstest]
fn test_list_json_roundtrip() {
    let list: PersistentList<i32> = (1..=10).collect();
    let json = serde_json::to_string(&list).unwrap();
    let restored: PersistentList<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(list, restored);
}

#[rstest]
fn test_list_serializes_as_sequence() {
    let list: PersistentList<i32> = (1..=3).collect();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2,3]");
}

// =============================================================================
// PersistentTreeSet Integration Tests
// =============================================================================

#[rstest]
fn test_set_serializes_sorted() {
    let set: PersistentTreeSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");
}

#[rstest]
fn test_set_deserialize_deduplicates() {
    let set: PersistentTreeSet<i32> = serde_json::from_str("[5,1,5,3,1]").unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
}

#[rstest]
fn test_set_deserialize_with_comparator() {
    let set: PersistentTreeSet<i32, Reversed> = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[3,2,1]");
}

// =============================================================================
// PersistentTreeMap Integration Tests
// =============================================================================

#[rstest]
fn test_map_json_roundtrip() {
    let map: PersistentTreeMap<String, i32> = [("b", 2), ("a", 1)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2}"#);
    let restored: PersistentTreeMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(map, restored);
}

#[rstest]
fn test_map_deserialize_last_value_wins() {
    let map: PersistentTreeMap<String, i32> = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(&2));
}

#[rstest]
fn test_map_deserialize_rejects_sequence() {
    let result: Result<PersistentTreeMap<String, i32>, _> = serde_json::from_str("[1,2]");
    assert!(result.is_err());
}

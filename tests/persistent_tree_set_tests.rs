//! Unit tests for PersistentTreeSet.

use pst::compare::Reversed;
use pst::persistent::PersistentTreeSet;
use rstest::rstest;
use std::collections::HashSet;

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_set() {
    let set: PersistentTreeSet<i32> = PersistentTreeSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set.min(), None);
    assert_eq!(set.max(), None);
}

#[rstest]
fn test_default_creates_empty_set() {
    let set: PersistentTreeSet<i32, Reversed> = PersistentTreeSet::default();
    assert!(set.is_empty());
}

#[rstest]
fn test_singleton() {
    let set = PersistentTreeSet::singleton(42);
    assert_eq!(set.len(), 1);
    assert!(set.member(&42));
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[rstest]
fn test_odd_set_filled_then_emptied() {
    let odd: PersistentTreeSet<i32> = [1, 3, 5, 7, 9].into_iter().collect();
    let mostly = odd.insert_all([2, 4, 8]);
    let full = mostly.insert(6);

    assert_eq!(format!("{full}"), "{1, 2, 3, 4, 5, 6, 7, 8, 9}");
    assert_eq!(format!("{odd}"), "{1, 3, 5, 7, 9}");
    assert!(!mostly.member(&6));

    let without_six = full.erase(&6);
    assert!(!without_six.member(&6));
    assert_eq!(without_six, mostly);

    let emptied = full.erase_all(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert!(emptied.is_empty());
    assert_eq!(format!("{emptied}"), "{}");
    assert_eq!(full.len(), 9);
}

#[rstest]
fn test_insert_existing_keeps_length() {
    let set: PersistentTreeSet<i32> = (1..=3).collect();
    let same = set.insert(2);
    assert_eq!(same.len(), 3);
    assert_eq!(same, set);
}

#[rstest]
fn test_erase_absent_keeps_length_and_tree() {
    let set: PersistentTreeSet<i32> = (1..=3).collect();
    let same = set.erase(&10);
    assert_eq!(same.len(), 3);
    assert_eq!(same.as_tree().as_tree(), set.as_tree().as_tree());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[rstest]
fn test_borrowed_lookups() {
    let set: PersistentTreeSet<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
    assert!(set.contains("a"));
    assert_eq!(set.get("c").map(String::as_str), Some("c"));
    assert!(!set.contains("z"));
    assert_eq!(set.erase("a").len(), 2);
}

#[rstest]
fn test_min_max_follow_comparator() {
    let ascending: PersistentTreeSet<i32> = (1..=5).collect();
    let descending: PersistentTreeSet<i32, Reversed> = (1..=5).collect();
    assert_eq!((ascending.min(), ascending.max()), (Some(&1), Some(&5)));
    assert_eq!((descending.min(), descending.max()), (Some(&5), Some(&1)));
}

// =============================================================================
// Iterator and Trait Tests
// =============================================================================

#[rstest]
fn test_iterators() {
    let set: PersistentTreeSet<i32> = [3, 1, 2].into_iter().collect();
    let mut iterator = set.iter();
    assert_eq!(iterator.len(), 3);
    assert_eq!(iterator.next(), Some(&1));
    assert_eq!(iterator.len(), 2);
    drop(iterator);

    let borrowed: Vec<&i32> = (&set).into_iter().collect();
    assert_eq!(borrowed, vec![&1, &2, &3]);

    let owned: Vec<i32> = set.into_iter().collect();
    assert_eq!(owned, vec![1, 2, 3]);
}

#[rstest]
fn test_equal_sets_hash_equally() {
    let first: PersistentTreeSet<i32> = [1, 2, 3].into_iter().collect();
    let second: PersistentTreeSet<i32> = [3, 2, 1].into_iter().collect();
    let mut outer = HashSet::new();
    outer.insert(first);
    assert!(outer.contains(&second));
}

#[rstest]
fn test_debug_format() {
    let set: PersistentTreeSet<&str> = ["b", "a"].into_iter().collect();
    assert_eq!(format!("{set:?}"), r#"{"a", "b"}"#);
}

#[rstest]
#[cfg(feature = "sanity")]
fn test_sharing_across_versions() {
    let base: PersistentTreeSet<i32> = (0..1_000).collect();
    let versions: Vec<PersistentTreeSet<i32>> = (0..10).map(|key| base.erase(&(key * 100))).collect();
    for (index, version) in versions.iter().enumerate() {
        let key = i32::try_from(index).map_or(0, |index| index * 100);
        assert!(!version.member(&key));
        assert_eq!(version.len(), 999);
        assert!(version.as_tree().is_valid());
    }
    assert_eq!(base.len(), 1_000);
}

//! Unit tests for `PersistentSet`.

use permafrost::collections::PersistentSet;
use rstest::rstest;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_set() {
    let set: PersistentSet<i32> = PersistentSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[rstest]
fn test_singleton() {
    let set = PersistentSet::singleton(42);
    assert_eq!(set.len(), 1);
    assert!(set.contains(&42));
}

#[rstest]
fn test_from_iter() {
    let set: PersistentSet<i32> = vec![1, 2, 3].into_iter().collect();

    assert_eq!(set.len(), 3);
    assert!(set.contains(&1));
    assert!(set.contains(&2));
    assert!(set.contains(&3));
}

#[rstest]
fn test_large_from_iter_collapses_duplicates() {
    let set: PersistentSet<i32> = (0..10_000).chain(0..10_000).collect();
    assert_eq!(set.len(), 10_000);
}

// =============================================================================
// Insert / Remove
// =============================================================================

#[rstest]
fn test_insert_and_contains() {
    let set = PersistentSet::new().insert(1).insert(2).insert(3);

    assert_eq!(set.len(), 3);
    assert!(set.contains(&1));
    assert!(set.contains(&2));
    assert!(set.contains(&3));
    assert!(!set.contains(&4));
}

#[rstest]
fn test_insert_preserves_original() {
    let set = PersistentSet::new().insert(1);
    let grown = set.insert(2);

    assert_eq!(set.len(), 1);
    assert_eq!(grown.len(), 2);
    assert!(!set.contains(&2));
}

#[rstest]
fn test_remove() {
    let set = PersistentSet::new().insert(1).insert(2);
    let removed = set.remove(&1);

    assert_eq!(removed.len(), 1);
    assert!(!removed.contains(&1));
    assert!(removed.contains(&2));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_remove_absent_element() {
    let set = PersistentSet::new().insert(1);
    let same = set.remove(&99);
    assert_eq!(same.len(), 1);
}

#[rstest]
fn test_string_elements_with_borrowed_lookup() {
    let set = PersistentSet::new()
        .insert("hello".to_string())
        .insert("world".to_string());

    assert!(set.contains("hello"));
    assert!(set.contains("world"));
    assert!(!set.contains("other"));

    let removed = set.remove("hello");
    assert_eq!(removed.len(), 1);
}

#[rstest]
fn test_many_inserts_and_removes() {
    let mut set: PersistentSet<i32> = PersistentSet::new();
    for value in 0..5_000 {
        set = set.insert(value);
    }
    for value in 0..2_500 {
        set = set.remove(&value);
    }

    assert_eq!(set.len(), 2_500);
    assert!(!set.contains(&0));
    assert!(set.contains(&2_500));
}

// =============================================================================
// Set Operations
// =============================================================================

#[rstest]
fn test_union() {
    let set_a = PersistentSet::new().insert(1).insert(2);
    let set_b = PersistentSet::new().insert(2).insert(3);
    let union = set_a.union(&set_b);

    assert_eq!(union.len(), 3);
    assert!(union.contains(&1));
    assert!(union.contains(&2));
    assert!(union.contains(&3));
}

#[rstest]
fn test_intersection_of_ranges() {
    let set_a: PersistentSet<i32> = (1..=100).collect();
    let set_b: PersistentSet<i32> = (50..=150).collect();
    let expected: PersistentSet<i32> = (50..=100).collect();

    assert_eq!(set_a.intersection(&set_b), expected);
}

#[rstest]
fn test_difference_of_ranges() {
    let set_a: PersistentSet<i32> = (1..1_000).collect();
    let set_b: PersistentSet<i32> = (500..1_500).collect();

    assert_eq!(set_a.difference(&set_b).len(), 499);
}

#[rstest]
fn test_symmetric_difference() {
    let set_a = PersistentSet::new().insert(1).insert(2).insert(3);
    let set_b = PersistentSet::new().insert(2).insert(3).insert(4);
    let symmetric_difference = set_a.symmetric_difference(&set_b);

    assert_eq!(symmetric_difference.len(), 2);
    assert!(symmetric_difference.contains(&1));
    assert!(symmetric_difference.contains(&4));
}

#[rstest]
fn test_is_subset() {
    let subset = PersistentSet::new().insert(1).insert(2);
    let superset = PersistentSet::new().insert(1).insert(2).insert(3);

    assert!(subset.is_subset(&superset));
    assert!(!superset.is_subset(&subset));
    assert!(superset.is_superset(&subset));
}

#[rstest]
fn test_is_disjoint() {
    let set_a = PersistentSet::new().insert(1).insert(2);
    let set_b = PersistentSet::new().insert(3).insert(4);
    let set_c = PersistentSet::new().insert(2).insert(3);

    assert!(set_a.is_disjoint(&set_b));
    assert!(!set_a.is_disjoint(&set_c));
}

// =============================================================================
// Transforms
// =============================================================================

#[rstest]
fn test_filter() {
    let set: PersistentSet<i32> = (0..100).collect();
    let even = set.filter(|value| value % 2 == 0);

    assert_eq!(even.len(), 50);
    assert!(even.contains(&0));
    assert!(!even.contains(&1));
}

#[rstest]
fn test_map_with_collisions() {
    let set: PersistentSet<i32> = (0..100).collect();
    let buckets = set.map(|value| value / 10);

    assert_eq!(buckets.len(), 10);
}

#[rstest]
fn test_map_to_another_type() {
    let set: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    let strings = set.map(ToString::to_string);

    assert_eq!(strings.len(), 3);
    assert!(strings.contains("2"));
}

// =============================================================================
// Std Traits
// =============================================================================

#[rstest]
fn test_eq_ignores_insertion_order() {
    let set1 = PersistentSet::new().insert(1).insert(2).insert(3);
    let set2 = PersistentSet::new().insert(3).insert(1).insert(2);

    assert_eq!(set1, set2);
}

#[rstest]
fn test_into_iter_yields_every_element() {
    let set: PersistentSet<i32> = (0..100).collect();
    let mut elements: Vec<i32> = set.into_iter().collect();
    elements.sort_unstable();
    assert_eq!(elements, (0..100).collect::<Vec<i32>>());
}

#[rstest]
fn test_debug_and_display() {
    let set = PersistentSet::singleton(7);
    assert_eq!(format!("{set:?}"), "{7}");
    assert_eq!(format!("{set}"), "{7}");
}

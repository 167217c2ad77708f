//! Scenario tests for the trie engine, driven through `Tree` and
//! `Builder` with injected hash functions.
//!
//! Using the engine directly (rather than the containers) makes it
//! possible to pick pathological hash functions: full collisions,
//! shared prefixes, and zero hashes.

use permafrost::trie::{Builder, CombineArgs, EqArgs, Gauge, LessFn, Merge, Tree};
use rstest::rstest;

fn int_eq(a: &u64, b: &u64) -> bool {
    a == b
}

fn identity_hash(value: &u64) -> u64 {
    *value
}

/// Maps `x` and `x + 2^32` to the same 64-bit hash.
fn low_bits_hash(value: &u64) -> u64 {
    *value & 0xFFFF_FFFF
}

/// Every element collides with every other element.
fn constant_hash(_: &u64) -> u64 {
    0xDEAD_BEEF
}

fn eq_args(hash: fn(&u64) -> u64) -> EqArgs<u64> {
    EqArgs::new(Gauge::sequential(), int_eq, hash)
}

fn insert_args(hash: fn(&u64) -> u64) -> CombineArgs<u64> {
    CombineArgs::new(eq_args(hash), Merge::UseRight)
}

fn tree_of(values: impl IntoIterator<Item = u64>) -> Tree<u64> {
    Tree::from_elements(&insert_args(identity_hash), values)
}

// =============================================================================
// Insertion and Iteration
// =============================================================================

#[rstest]
fn test_duplicate_insertion_collapses() {
    let args = insert_args(identity_hash);
    let tree = Tree::new().with(&args, 1).with(&args, 2).with(&args, 1);

    assert_eq!(tree.count(), 2);
    let mut elements: Vec<u64> = tree.iter().copied().collect();
    elements.sort_unstable();
    assert_eq!(elements, vec![1, 2]);
}

#[rstest]
fn test_iteration_covers_every_element() {
    let tree = tree_of(0..10_000);
    assert_eq!(tree.iter().count(), 10_000);

    let mut elements: Vec<u64> = tree.iter().copied().collect();
    elements.sort_unstable();
    assert_eq!(elements, (0..10_000).collect::<Vec<u64>>());
}

#[rstest]
fn test_zero_hash_element_is_found() {
    let args = insert_args(identity_hash);
    let tree = tree_of(0..100).with(&args, 0);
    assert_eq!(tree.count(), 100);
    assert_eq!(tree.get(&eq_args(identity_hash), &0), Some(&0));
}

// =============================================================================
// Set Algebra
// =============================================================================

#[rstest]
fn test_intersection_of_overlapping_ranges() {
    let left = tree_of(1..=100);
    let right = tree_of(50..=150);
    let expected = tree_of(50..=100);

    let intersection = left.intersect(&eq_args(identity_hash), &right);
    assert!(intersection.equal(&eq_args(identity_hash), &expected));
}

#[rstest]
fn test_difference_of_overlapping_ranges() {
    let left = tree_of(1..1_000);
    let right = tree_of(500..1_500);

    let difference = left.difference(&eq_args(identity_hash), &right);
    assert_eq!(difference.count(), 499);
}

#[rstest]
fn test_union_of_empty_trees_is_empty() {
    let left: Tree<u64> = Tree::new();
    let right: Tree<u64> = Tree::new();
    let union = left.combine(&insert_args(identity_hash), &right);

    assert!(union.is_empty());
    assert_eq!(union.iter().count(), 0);
}

#[rstest]
fn test_subset_matches_union_equality() {
    let args = eq_args(identity_hash);
    let small = tree_of(0..50);
    let large = tree_of(0..100);
    let other = tree_of(75..125);

    assert!(small.subset_of(&args, &large));
    assert!(!large.subset_of(&args, &small));
    assert!(!other.subset_of(&args, &large));
    assert!(
        small
            .combine(&insert_args(identity_hash), &large)
            .equal(&args, &large)
    );
}

// =============================================================================
// Merge Policies and Sharing
// =============================================================================

#[rstest]
fn test_use_left_reinsertion_shares_the_root() {
    let tree = tree_of(0..1_000);
    let args = CombineArgs::new(eq_args(identity_hash), Merge::UseLeft);

    let again = tree.with(&args, 123);
    assert!(again.shares_root_with(&tree));
    assert_eq!(again.count(), 1_000);
}

#[rstest]
fn test_custom_merge_combines_values() {
    let args = CombineArgs::new(eq_args(constant_hash), Merge::With(|a, b| a + b));
    let tree = Tree::new().with(&args, 10).with(&args, 10);

    // 10 merged with 10 under addition: one element, value 20.
    assert_eq!(tree.count(), 1);
    assert_eq!(tree.iter().copied().collect::<Vec<u64>>(), vec![20]);
}

// =============================================================================
// Collisions
// =============================================================================

#[rstest]
fn test_shared_low_bits_keep_both_elements() {
    let args = insert_args(low_bits_hash);
    let first = 7u64;
    let second = 7u64 + (1 << 32);

    let tree = Tree::new().with(&args, first).with(&args, second);
    assert_eq!(tree.count(), 2);

    let mut elements: Vec<u64> = tree.iter().copied().collect();
    elements.sort_unstable();
    assert_eq!(elements, vec![first, second]);
}

#[rstest]
fn test_full_collision_bucket_grows_and_shrinks() {
    let args = insert_args(constant_hash);
    let eq = eq_args(constant_hash);

    let mut tree = Tree::new();
    for value in 0..20 {
        tree = tree.with(&args, value);
    }
    assert_eq!(tree.count(), 20);
    for value in 0..20 {
        assert_eq!(tree.get(&eq, &value), Some(&value));
    }

    for value in 0..19 {
        tree = tree.without(&eq, &value);
    }
    assert_eq!(tree.count(), 1);
    assert_eq!(tree.get(&eq, &19), Some(&19));
}

#[rstest]
fn test_colliding_trees_support_algebra() {
    let args = insert_args(constant_hash);
    let eq = eq_args(constant_hash);
    let left = Tree::from_elements(&args, 0..30u64);
    let right = Tree::from_elements(&args, 15..45u64);

    assert_eq!(left.combine(&args, &right).count(), 45);
    assert_eq!(left.intersect(&eq, &right).count(), 15);
    assert_eq!(left.difference(&eq, &right).count(), 15);
}

#[rstest]
fn test_shared_first_chunk_forces_depth_two() {
    // Seventeen elements agreeing on the first 4-bit chunk cannot fit a
    // single leaf, so the trie must descend at least two levels.
    let args = insert_args(identity_hash);
    let values: Vec<u64> = (0..=16u64).map(|v| v << 4).collect();
    let tree = Tree::from_elements(&args, values.iter().copied());

    assert_eq!(tree.count(), 17);
    for value in values {
        assert_eq!(tree.get(&eq_args(identity_hash), &value), Some(&value));
    }
}

// =============================================================================
// Builder
// =============================================================================

#[rstest]
fn test_builder_add_then_remove() {
    let args = insert_args(identity_hash);
    let eq = eq_args(identity_hash);

    let mut builder = Builder::new();
    for value in 1..10_000u64 {
        builder.add(&args, value);
    }
    for value in 1..5_000u64 {
        builder.remove(&eq, &value);
    }
    let tree = builder.finish();
    assert_eq!(tree.count(), 5_000);
}

#[rstest]
fn test_builder_get_sees_pending_elements() {
    let args = insert_args(identity_hash);
    let mut builder = Builder::new();
    builder.add(&args, 42);

    assert_eq!(builder.get(&eq_args(identity_hash), &42), Some(&42));
    assert_eq!(builder.get(&eq_args(identity_hash), &43), None);
}

// =============================================================================
// Transforms and Ordered Iteration
// =============================================================================

#[rstest]
fn test_filter_halves_a_range() {
    let tree = tree_of(0..1_000);
    let even = tree.filter(&|value| value % 2 == 0);
    assert_eq!(even.count(), 500);
}

#[rstest]
fn test_transform_with_colliding_images() {
    let tree = tree_of(0..1_000);
    let squashed = tree.transform(&insert_args(identity_hash), &|value| value % 7);
    assert_eq!(squashed.count(), 7);
}

#[rstest]
fn test_reduce_sums_all_elements() {
    let tree = tree_of(1..=1_000);
    let sum = tree.reduce(&|values: &[u64]| values.iter().sum());
    assert_eq!(sum, Some(500_500));
}

#[rstest]
fn test_ordered_iteration_selects_top_n() {
    let tree = tree_of((0..1_000).rev());
    let less: &LessFn<u64> = &|a, b| a < b;

    let least_five: Vec<u64> = tree.ordered_iter(less, Some(5)).collect();
    assert_eq!(least_five, vec![0, 1, 2, 3, 4]);

    let everything: Vec<u64> = tree.ordered_iter(less, None).collect();
    assert_eq!(everything.len(), 1_000);
    assert!(everything.windows(2).all(|pair| pair[0] < pair[1]));
}

// =============================================================================
// Keyed Entries Through the Engine
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    key: u64,
    value: u64,
}

fn entry_eq(left: &Entry, right: &Entry) -> bool {
    left.key == right.key
}

fn entry_hash(entry: &Entry) -> u64 {
    entry.key
}

#[rstest]
fn test_keyed_entries_merge_by_value() {
    let args = CombineArgs::new(
        EqArgs::new(Gauge::sequential(), entry_eq, entry_hash),
        Merge::UseRight,
    );

    let tree = Tree::new()
        .with(&args, Entry { key: 1, value: 10 })
        .with(&args, Entry { key: 1, value: 20 });

    assert_eq!(tree.count(), 1);
    let stored = tree.find(1, &|entry: &Entry| entry.key == 1);
    assert_eq!(stored.map(|entry| entry.value), Some(20));
}

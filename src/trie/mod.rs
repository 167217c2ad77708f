//! The hash-array-mapped trie engine.
//!
//! This module is the structural core behind the crate's containers: a
//! persistent trie whose leaves hold small unordered element sets and
//! whose branches route by 4-bit chunks of a 64-bit hash. Every update
//! returns a new tree that aliases the unchanged regions of the old one
//! (*structural sharing*), and bulk algebra (union, intersection,
//! difference, equality, subset, filter, map, reduce) works subtree by
//! subtree, optionally fanning independent children onto a worker pool.
//!
//! The engine is deliberately agnostic about elements: hashing and
//! equality are injected per operation through [`EqArgs`] /
//! [`CombineArgs`], and a [`Merge`] policy decides which of two equal
//! elements survives. Map semantics fall out of set semantics by storing
//! key-value pairs whose hash and equality consider the key only and
//! whose merge picks the surviving value.
//!
//! # Example
//!
//! ```rust
//! use permafrost::trie::{CombineArgs, EqArgs, Gauge, Merge, Tree};
//!
//! fn eq(a: &u64, b: &u64) -> bool { a == b }
//! fn hash(v: &u64) -> u64 { *v }
//!
//! let args = CombineArgs::new(EqArgs::new(Gauge::sequential(), eq, hash), Merge::UseRight);
//! let eq_args = *args.eq_args();
//!
//! let left = Tree::from_elements(&args, 0..100u64);
//! let right = Tree::from_elements(&args, 50..150u64);
//!
//! assert_eq!(left.combine(&args, &right).count(), 150);
//! assert_eq!(left.intersect(&eq_args, &right).count(), 50);
//! assert_eq!(left.difference(&eq_args, &right).count(), 50);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type used for node sharing.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which
/// makes trees `Send + Sync` at slightly higher refcount cost.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Element Bound
// =============================================================================

/// The bound every tree element must satisfy.
///
/// This is a blanket alias: `Clone` in the default build, and
/// `Clone + Send + Sync` under the `rayon` feature so that subtrees can
/// be handed to the worker pool.
#[cfg(feature = "rayon")]
pub trait Element: Clone + Send + Sync {}

#[cfg(feature = "rayon")]
impl<T: Clone + Send + Sync> Element for T {}

/// The bound every tree element must satisfy.
///
/// This is a blanket alias: `Clone` in the default build, and
/// `Clone + Send + Sync` under the `rayon` feature so that subtrees can
/// be handed to the worker pool.
#[cfg(not(feature = "rayon"))]
pub trait Element: Clone {}

#[cfg(not(feature = "rayon"))]
impl<T: Clone> Element for T {}

mod args;
mod builder;
pub mod config;
mod hasher;
mod iter;
mod node;
mod parallel;
mod slots;
mod transient;
mod tree;

pub use args::CombineArgs;
pub use args::EqArgs;
pub use args::LessFn;
pub use args::Merge;
pub use args::Predicate;
pub use args::Reducer;
pub use args::TransformFn;
pub use builder::Builder;
pub use hasher::ChunkCursor;
pub use iter::OrderedIterator;
pub use iter::TreeIterator;
pub use parallel::Gauge;
pub use tree::Tree;

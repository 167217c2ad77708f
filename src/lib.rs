//! # permafrost
//!
//! Persistent (immutable) collections backed by a hash-array-mapped
//! trie with structural sharing.
//!
//! ## Overview
//!
//! Every operation returns a new collection; the original is never
//! modified, and unchanged regions are shared between versions rather
//! than copied. Bulk algebra (union, intersection, difference,
//! equality, subset) runs subtree by subtree in a single pass, and can
//! fan independent subtrees onto a worker pool for large collections.
//!
//! The crate has two layers:
//!
//! - [`collections`]: the user-facing [`PersistentSet`] and
//!   [`PersistentMap`], hashed with the standard library's hasher.
//! - [`trie`]: the underlying engine, generic over any element type
//!   with injected hashing and equality. This is the layer to use for
//!   custom hashing, custom merge policies, or bulk building.
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes with `Arc` instead of `Rc`, making collections
//!   `Send + Sync`.
//! - `rayon`: evaluate bulk operations over large subtrees on a worker
//!   pool (implies `arc`).
//! - `vetting`: builders re-check every structural invariant after each
//!   mutation; a debugging aid for the engine.
//!
//! ## Example
//!
//! ```rust
//! use permafrost::collections::PersistentSet;
//!
//! let set: PersistentSet<i32> = (0..100).collect();
//! let other: PersistentSet<i32> = (50..150).collect();
//!
//! assert_eq!(set.union(&other).len(), 150);
//! assert_eq!(set.intersection(&other).len(), 50);
//!
//! // Structural sharing: the original set is preserved.
//! let grown = set.insert(1_000);
//! assert_eq!(set.len(), 100);
//! assert_eq!(grown.len(), 101);
//! ```
//!
//! [`PersistentSet`]: collections::PersistentSet
//! [`PersistentMap`]: collections::PersistentMap

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use permafrost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collections::PersistentMap;
    pub use crate::collections::PersistentSet;
    pub use crate::trie::Builder;
    pub use crate::trie::Tree;
}

pub mod collections;
pub mod trie;

//! Persistent (immutable) collections.
//!
//! This module provides the user-facing containers built on the trie
//! engine in [`crate::trie`]:
//!
//! - [`PersistentSet`]: persistent hash set
//! - [`PersistentMap`]: persistent hash map
//!
//! # Structural Sharing
//!
//! All operations return new collections without modifying the
//! original; unchanged regions are shared between versions rather than
//! copied.
//!
//! # Examples
//!
//! ## `PersistentSet`
//!
//! ```rust
//! use permafrost::collections::PersistentSet;
//!
//! let set = PersistentSet::new().insert(1).insert(2).insert(3);
//! assert!(set.contains(&1));
//!
//! // Structural sharing: the original set is preserved
//! let updated = set.insert(4);
//! assert_eq!(set.len(), 3);      // Original unchanged
//! assert_eq!(updated.len(), 4);  // New version
//! ```
//!
//! ## `PersistentMap`
//!
//! ```rust
//! use permafrost::collections::PersistentMap;
//!
//! let map = PersistentMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2);
//! assert_eq!(map.get("one"), Some(&1));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get("one"), Some(&100)); // New version
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};

/// Computes the hash of a value using `DefaultHasher`.
pub(crate) fn compute_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

mod map;
mod set;

pub use map::PersistentMap;
pub use map::PersistentMapIntoIterator;
pub use map::PersistentMapIterator;
pub use set::PersistentSet;
pub use set::PersistentSetIntoIterator;
pub use set::PersistentSetIterator;

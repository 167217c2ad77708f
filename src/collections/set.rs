//! Persistent (immutable) hash set.
//!
//! This module provides [`PersistentSet`], an immutable hash set backed
//! by the trie engine in [`crate::trie`].
//!
//! # Overview
//!
//! `PersistentSet` stores elements in a hash-array-mapped trie with
//! structural sharing:
//!
//! - O(log16 N) contains (effectively O(1) for practical sizes)
//! - O(log16 N) insert
//! - O(log16 N) remove
//! - O(1) len and `is_empty`
//!
//! Unlike element-at-a-time set implementations, the bulk operations
//! (`union`, `intersection`, `difference`, `is_subset`, equality) run
//! subtree by subtree in a single pass, sharing whole unchanged
//! subtrees between operands and result.
//!
//! # Examples
//!
//! ```rust
//! use permafrost::collections::PersistentSet;
//!
//! let set = PersistentSet::new()
//!     .insert(1)
//!     .insert(2)
//!     .insert(3);
//!
//! assert!(set.contains(&1));
//! assert!(!set.contains(&4));
//!
//! // Structural sharing: the original set is preserved
//! let updated = set.insert(4);
//! assert_eq!(set.len(), 3);      // Original unchanged
//! assert_eq!(updated.len(), 4);  // New version
//! ```
//!
//! # Set Operations
//!
//! ```rust
//! use permafrost::collections::PersistentSet;
//!
//! let set_a: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
//! let set_b: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(set_a.union(&set_b).len(), 4);                 // {1, 2, 3, 4}
//! assert_eq!(set_a.intersection(&set_b).len(), 2);          // {2, 3}
//! assert_eq!(set_a.difference(&set_b).len(), 1);            // {1}
//! assert_eq!(set_a.symmetric_difference(&set_b).len(), 2);  // {1, 4}
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

use super::compute_hash;
use crate::trie::{Builder, CombineArgs, Element, EqArgs, Gauge, Merge, Tree, TreeIterator};

fn element_eq<T: PartialEq>(left: &T, right: &T) -> bool {
    left == right
}

fn element_hash<T: Hash>(value: &T) -> u64 {
    compute_hash(value)
}

// =============================================================================
// PersistentSet Definition
// =============================================================================

/// A persistent (immutable) hash set.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `contains`     | O(log16 N)        |
/// | `insert`       | O(log16 N)        |
/// | `remove`       | O(log16 N)        |
/// | `len`          | O(1)              |
/// | `is_empty`     | O(1)              |
/// | `union`        | O(n + m), shared subtrees in O(1) |
/// | `intersection` | O(min(n, m) · log16(max(n, m)))   |
/// | `difference`   | O(n + m), shared subtrees in O(1) |
///
/// # Examples
///
/// ```rust
/// use permafrost::collections::PersistentSet;
///
/// let set = PersistentSet::singleton(42);
/// assert!(set.contains(&42));
/// assert!(!set.contains(&0));
/// ```
pub struct PersistentSet<T> {
    tree: Tree<T>,
}

impl<T> PersistentSet<T> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = PersistentSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.count()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an iterator over the elements of the set, in
    /// hash-determined order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set = PersistentSet::new().insert(1).insert(2).insert(3);
    /// let sum: i32 = set.iter().sum();
    /// assert_eq!(sum, 6);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentSetIterator<'_, T> {
        PersistentSetIterator {
            inner: self.tree.iter(),
        }
    }
}

impl<T: Element + Hash + Eq> PersistentSet<T> {
    fn eq_args_sized(expected: usize) -> EqArgs<T> {
        EqArgs::new(Gauge::new(expected), element_eq::<T>, element_hash::<T>)
    }

    fn eq_args(&self) -> EqArgs<T> {
        Self::eq_args_sized(self.len())
    }

    /// An already-present equal element is kept, so re-inserting is a
    /// reference-count bump.
    fn insert_args(expected: usize) -> CombineArgs<T> {
        CombineArgs::new(Self::eq_args_sized(expected), Merge::UseLeft)
    }

    /// Creates a set containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set = PersistentSet::singleton(42);
    /// assert_eq!(set.len(), 1);
    /// assert!(set.contains(&42));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().insert(element)
    }

    /// Returns `true` if the set contains the specified element.
    ///
    /// The element may be any borrowed form of the set's element type,
    /// but `Hash` and `Eq` on the borrowed form must match those for
    /// the element type.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set = PersistentSet::new().insert("hello".to_string());
    ///
    /// // Can use &str to look up String elements
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("other"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(element).is_some()
    }

    /// Returns a reference to the stored element equal to `element`.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    #[must_use]
    pub fn get<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tree
            .find(compute_hash(element), &|stored: &T| stored.borrow() == element)
    }

    /// Inserts an element into the set.
    ///
    /// If an equal element is already present it is kept and the
    /// original set is returned unchanged (sharing its root).
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set1 = PersistentSet::new().insert(1);
    /// let set2 = set1.insert(2);
    ///
    /// assert_eq!(set1.len(), 1); // Original unchanged
    /// assert_eq!(set2.len(), 2); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        Self {
            tree: self.tree.with(&Self::insert_args(self.len() + 1), element),
        }
    }

    /// Removes an element from the set.
    ///
    /// Returns a new set without the element. If the element doesn't
    /// exist, returns a set sharing the original's root.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set = PersistentSet::new().insert(1).insert(2);
    /// let removed = set.remove(&1);
    ///
    /// assert_eq!(set.len(), 2);      // Original unchanged
    /// assert_eq!(removed.len(), 1);  // New version
    /// assert!(!removed.contains(&1));
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(stored) = self.get(element).cloned() else {
            return self.clone();
        };
        Self {
            tree: self.tree.without(&self.eq_args(), &stored),
        }
    }

    /// Returns the union of two sets.
    ///
    /// Subtrees present in only one operand are shared into the result
    /// instead of being rebuilt.
    ///
    /// # Complexity
    ///
    /// O(n + m); disjoint or shared subtrees merge in O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set_a: PersistentSet<i32> = [1, 2].into_iter().collect();
    /// let set_b: PersistentSet<i32> = [2, 3].into_iter().collect();
    ///
    /// let union = set_a.union(&set_b);
    /// assert_eq!(union.len(), 3);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let args = CombineArgs::new(
            Self::eq_args_sized(self.len() + other.len()),
            Merge::UseLeft,
        );
        Self {
            tree: self.tree.combine(&args, &other.tree),
        }
    }

    /// Returns the intersection of two sets.
    ///
    /// # Complexity
    ///
    /// O(min(n, m) · log16(max(n, m)))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set_a: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    /// let set_b: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// let intersection = set_a.intersection(&set_b);
    /// assert_eq!(intersection.len(), 2);
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let args = Self::eq_args_sized(self.len().min(other.len()));
        Self {
            tree: self.tree.intersect(&args, &other.tree),
        }
    }

    /// Returns the difference of two sets: the elements in `self` that
    /// are not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set_a: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    /// let set_b: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// let difference = set_a.difference(&set_b);
    /// assert_eq!(difference.len(), 1);
    /// assert!(difference.contains(&1));
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            tree: self.tree.difference(&self.eq_args(), &other.tree),
        }
    }

    /// Returns the symmetric difference: elements in either set but not
    /// in both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set_a: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    /// let set_b: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// let symmetric_diff = set_a.symmetric_difference(&set_b);
    /// assert_eq!(symmetric_diff.len(), 2);
    /// ```
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.difference(other).union(&other.difference(self))
    }

    /// Returns `true` if `self` is a subset of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let subset: PersistentSet<i32> = [1, 2].into_iter().collect();
    /// let superset: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    ///
    /// assert!(subset.is_subset(&superset));
    /// assert!(!superset.is_subset(&subset));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.tree.subset_of(&self.eq_args(), &other.tree)
    }

    /// Returns `true` if `self` is a superset of `other`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` and `other` have no elements in common.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set_a: PersistentSet<i32> = [1, 2].into_iter().collect();
    /// let set_b: PersistentSet<i32> = [3, 4].into_iter().collect();
    ///
    /// assert!(set_a.is_disjoint(&set_b));
    /// ```
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        // Iterate over the smaller set for better performance
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller.iter().all(|element| {
            larger
                .tree
                .get(&larger.eq_args(), element)
                .is_none()
        })
    }

    /// Returns the set of elements satisfying `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = (0..10).collect();
    /// let even = set.filter(|value| value % 2 == 0);
    /// assert_eq!(even.len(), 5);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        let args = Self::insert_args(self.len());
        let mut builder = Builder::new();
        for element in self.iter() {
            if predicate(element) {
                builder.add(&args, element.clone());
            }
        }
        Self {
            tree: builder.finish(),
        }
    }

    /// Returns the set of images of the elements under `function`.
    ///
    /// Images that compare equal collapse into one element, so the
    /// result is never larger than the receiver.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = (0..10).collect();
    /// let halved = set.map(|value| value / 2);
    /// assert_eq!(halved.len(), 5);
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> PersistentSet<B>
    where
        B: Element + Hash + Eq,
        F: Fn(&T) -> B,
    {
        let args = PersistentSet::<B>::insert_args(self.len());
        let mut builder = Builder::new();
        for element in self.iter() {
            builder.add(&args, function(element));
        }
        PersistentSet {
            tree: builder.finish(),
        }
    }

    /// Folds the elements into an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
    /// let sum = set.fold(0, |accumulator, element| accumulator + element);
    /// assert_eq!(sum, 15);
    /// ```
    pub fn fold<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(init, function)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`PersistentSet`].
pub struct PersistentSetIterator<'a, T> {
    inner: TreeIterator<'a, T>,
}

impl<'a, T> Iterator for PersistentSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over the elements of a [`PersistentSet`].
pub struct PersistentSetIntoIterator<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for PersistentSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentSet<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> Default for PersistentSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element + Hash + Eq> FromIterator<T> for PersistentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let args = Self::insert_args(0);
        let mut builder = Builder::new();
        for element in iter {
            builder.add(&args, element);
        }
        Self {
            tree: builder.finish(),
        }
    }
}

impl<T: Element + Hash + Eq> IntoIterator for PersistentSet<T> {
    type Item = T;
    type IntoIter = PersistentSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let elements: Vec<T> = self.iter().cloned().collect();
        PersistentSetIntoIterator {
            inner: elements.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element + Hash + Eq> PartialEq for PersistentSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.equal(&self.eq_args(), &other.tree)
    }
}

impl<T: Element + Hash + Eq> Eq for PersistentSet<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self.iter() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

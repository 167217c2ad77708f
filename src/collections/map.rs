//! Persistent (immutable) hash map.
//!
//! This module provides [`PersistentMap`], an immutable hash map backed
//! by the trie engine in [`crate::trie`].
//!
//! # Overview
//!
//! A map is a set of key-value entries whose hashing and equality
//! consider the key only; inserting an entry for an existing key merges
//! by keeping the new value. The engine itself never distinguishes maps
//! from sets.
//!
//! - O(log16 N) get (effectively O(1) for practical sizes)
//! - O(log16 N) insert
//! - O(log16 N) remove
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use permafrost::collections::PersistentMap;
//!
//! let map = PersistentMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2);
//!
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(map.get("two"), Some(&2));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get("one"), Some(&100)); // New version
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

use super::compute_hash;
use crate::trie::{Builder, CombineArgs, Element, EqArgs, Gauge, Merge, Tree, TreeIterator};

/// A key-value entry; hashing and equality consider the key only.
#[derive(Clone)]
struct MapEntry<K, V> {
    key: K,
    value: V,
}

fn entry_eq<K: PartialEq, V>(left: &MapEntry<K, V>, right: &MapEntry<K, V>) -> bool {
    left.key == right.key
}

fn entry_value_eq<K: PartialEq, V: PartialEq>(
    left: &MapEntry<K, V>,
    right: &MapEntry<K, V>,
) -> bool {
    left.key == right.key && left.value == right.value
}

fn entry_hash<K: Hash, V>(entry: &MapEntry<K, V>) -> u64 {
    compute_hash(&entry.key)
}

// =============================================================================
// PersistentMap Definition
// =============================================================================

/// A persistent (immutable) hash map.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(log16 N)        |
/// | `insert`       | O(log16 N)        |
/// | `remove`       | O(log16 N)        |
/// | `contains_key` | O(log16 N)        |
/// | `len`          | O(1)              |
/// | `is_empty`     | O(1)              |
/// | `merge`        | O(n + m), shared subtrees in O(1) |
///
/// # Examples
///
/// ```rust
/// use permafrost::collections::PersistentMap;
///
/// let map = PersistentMap::singleton("key".to_string(), 42);
/// assert_eq!(map.get("key"), Some(&42));
/// ```
pub struct PersistentMap<K, V> {
    tree: Tree<MapEntry<K, V>>,
}

impl<K, V> PersistentMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map: PersistentMap<String, i32> = PersistentMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.count()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an iterator over key-value pairs, in hash-determined
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    ///
    /// let total: i32 = map.iter().map(|(_, value)| value).sum();
    /// assert_eq!(total, 3);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentMapIterator<'_, K, V> {
        PersistentMapIterator {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Element + Hash + Eq, V: Element> PersistentMap<K, V> {
    fn eq_args_sized(expected: usize) -> EqArgs<MapEntry<K, V>> {
        EqArgs::new(Gauge::new(expected), entry_eq::<K, V>, entry_hash::<K, V>)
    }

    /// The new entry's value wins on key conflicts.
    fn insert_args(expected: usize) -> CombineArgs<MapEntry<K, V>> {
        CombineArgs::new(Self::eq_args_sized(expected), Merge::UseRight)
    }

    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::singleton("key".to_string(), 42);
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but
    /// `Hash` and `Eq` on the borrowed form must match those for the
    /// key type.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::new().insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|entry| &entry.value)
    }

    /// Returns the stored key-value pair for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|entry| (&entry.key, &entry.value))
    }

    fn find_entry<Q>(&self, key: &Q) -> Option<&MapEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tree
            .find(compute_hash(key), &|entry: &MapEntry<K, V>| {
                entry.key.borrow() == key
            })
    }

    /// Returns `true` if the map contains a value for the specified
    /// key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map1 = PersistentMap::new().insert("key".to_string(), 1);
    /// let map2 = map1.insert("key".to_string(), 2);
    ///
    /// assert_eq!(map1.get("key"), Some(&1)); // Original unchanged
    /// assert_eq!(map2.get("key"), Some(&2)); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let entry = MapEntry { key, value };
        Self {
            tree: self.tree.with(&Self::insert_args(self.len() + 1), entry),
        }
    }

    /// Removes a key from the map.
    ///
    /// Returns a new map without the key. If the key doesn't exist,
    /// returns a map sharing the original's root.
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    /// let removed = map.remove("a");
    ///
    /// assert_eq!(map.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1); // New version
    /// assert_eq!(removed.get("a"), None);
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(stored) = self.find_entry(key).cloned() else {
            return self.clone();
        };
        Self {
            tree: self
                .tree
                .without(&Self::eq_args_sized(self.len()), &stored),
        }
    }

    /// Updates the value for a key using a function.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::new().insert("count".to_string(), 10);
    /// let updated = map.update("count", |value| value + 1);
    ///
    /// assert_eq!(updated.unwrap().get("count"), Some(&11));
    /// ```
    #[must_use]
    pub fn update<Q, F>(&self, key: &Q, function: F) -> Option<Self>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> V,
    {
        let entry = self.find_entry(key)?;
        let new_value = function(&entry.value);
        Some(self.insert(entry.key.clone(), new_value))
    }

    /// Updates, inserts, or removes the value for a key using an
    /// updater function.
    ///
    /// The updater receives `Some(&V)` if the key exists, or `None` if
    /// it doesn't. If the updater returns `Some(V)`, the value is
    /// inserted or updated. If the updater returns `None`, the key is
    /// removed (if it exists).
    ///
    /// # Complexity
    ///
    /// O(log16 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map = PersistentMap::new().insert("count".to_string(), 10);
    ///
    /// // Increment existing value
    /// let updated = map.update_with("count", |maybe_value| {
    ///     maybe_value.map(|value| value + 1)
    /// });
    /// assert_eq!(updated.get("count"), Some(&11));
    ///
    /// // Insert if not exists
    /// let inserted = map.update_with("new_key", |maybe_value| {
    ///     match maybe_value {
    ///         Some(value) => Some(*value),
    ///         None => Some(100),
    ///     }
    /// });
    /// assert_eq!(inserted.get("new_key"), Some(&100));
    ///
    /// // Remove by returning None
    /// let removed = map.update_with("count", |_| None);
    /// assert_eq!(removed.get("count"), None);
    /// ```
    #[must_use]
    pub fn update_with<Q, F>(&self, key: &Q, updater: F) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce(Option<&V>) -> Option<V>,
    {
        let entry = self.find_entry(key);
        let new_value = updater(entry.map(|entry| &entry.value));

        match (entry, new_value) {
            (Some(entry), Some(value)) => {
                // Update existing key
                self.insert(entry.key.clone(), value)
            }
            (Some(_), None) => {
                // Remove existing key
                self.remove(key)
            }
            (None, Some(value)) => {
                // Insert new key
                self.insert(key.to_owned(), value)
            }
            (None, None) => {
                // No change
                self.clone()
            }
        }
    }

    /// Merges two maps, with values from `other` taking precedence on
    /// key conflicts.
    ///
    /// Subtrees present in only one operand are shared into the result
    /// instead of being rebuilt.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map1 = PersistentMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    /// let map2 = PersistentMap::new()
    ///     .insert("b".to_string(), 20)
    ///     .insert("c".to_string(), 3);
    ///
    /// let merged = map1.merge(&map2);
    ///
    /// assert_eq!(merged.get("a"), Some(&1));
    /// assert_eq!(merged.get("b"), Some(&20)); // From map2
    /// assert_eq!(merged.get("c"), Some(&3));
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let args = Self::insert_args(self.len() + other.len());
        Self {
            tree: self.tree.combine(&args, &other.tree),
        }
    }

    /// Returns the map of entries satisfying `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map: PersistentMap<i32, i32> = (0..10).map(|index| (index, index * 2)).collect();
    /// let kept = map.filter(|key, _| key % 2 == 0);
    ///
    /// assert_eq!(kept.len(), 5);
    /// assert_eq!(kept.get(&4), Some(&8));
    /// assert_eq!(kept.get(&5), None);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&K, &V) -> bool,
    {
        let args = Self::insert_args(self.len());
        let mut builder = Builder::new();
        for (key, value) in self.iter() {
            if predicate(key, value) {
                builder.add(
                    &args,
                    MapEntry {
                        key: key.clone(),
                        value: value.clone(),
                    },
                );
            }
        }
        Self {
            tree: builder.finish(),
        }
    }

    /// Returns the map with every value replaced by the image of its
    /// entry under `function`.
    ///
    /// Keys are unchanged, so the result has exactly as many entries as
    /// the receiver.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map: PersistentMap<String, i32> = [("a".to_string(), 1), ("b".to_string(), 2)]
    ///     .into_iter()
    ///     .collect();
    /// let doubled = map.map(|_, value| value * 2);
    ///
    /// assert_eq!(doubled.get("a"), Some(&2));
    /// assert_eq!(doubled.get("b"), Some(&4));
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> PersistentMap<K, B>
    where
        B: Element,
        F: Fn(&K, &V) -> B,
    {
        let args = PersistentMap::<K, B>::insert_args(self.len());
        let mut builder = Builder::new();
        for (key, value) in self.iter() {
            builder.add(
                &args,
                MapEntry {
                    key: key.clone(),
                    value: function(key, value),
                },
            );
        }
        PersistentMap {
            tree: builder.finish(),
        }
    }

    /// Folds the entries into an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permafrost::collections::PersistentMap;
    ///
    /// let map: PersistentMap<i32, i32> = (1..=5).map(|index| (index, index * 10)).collect();
    /// let total = map.fold(0, |accumulator, (_, value)| accumulator + value);
    ///
    /// assert_eq!(total, 150);
    /// ```
    pub fn fold<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, (&K, &V)) -> B,
    {
        self.iter().fold(init, function)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of a [`PersistentMap`].
pub struct PersistentMapIterator<'a, K, V> {
    inner: TreeIterator<'a, MapEntry<K, V>>,
}

impl<'a, K, V> Iterator for PersistentMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for PersistentMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over key-value pairs of a [`PersistentMap`].
pub struct PersistentMapIntoIterator<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for PersistentMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for PersistentMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V> Default for PersistentMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Element + Hash + Eq, V: Element> FromIterator<(K, V)> for PersistentMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let args = Self::insert_args(0);
        let mut builder = Builder::new();
        for (key, value) in iter {
            builder.add(&args, MapEntry { key, value });
        }
        Self {
            tree: builder.finish(),
        }
    }
}

impl<K: Element + Hash + Eq, V: Element> IntoIterator for PersistentMap<K, V> {
    type Item = (K, V);
    type IntoIter = PersistentMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        PersistentMapIntoIterator {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Element + Hash + Eq, V: Element + PartialEq> PartialEq for PersistentMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Key-and-value equality in one structural pass.
        let args = EqArgs::new(
            Gauge::new(self.len()),
            entry_value_eq::<K, V>,
            entry_hash::<K, V>,
        );
        self.tree.equal(&args, &other.tree)
    }
}

impl<K: Element + Hash + Eq, V: Element + Eq> Eq for PersistentMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_creates_empty() {
        let map: PersistentMap<String, i32> = PersistentMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[rstest]
    fn test_singleton() {
        let map = PersistentMap::singleton("key".to_string(), 42);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key"), Some(&42));
    }

    #[rstest]
    fn test_insert_overwrite() {
        let map1 = PersistentMap::new().insert("key".to_string(), 1);
        let map2 = map1.insert("key".to_string(), 2);

        assert_eq!(map1.get("key"), Some(&1));
        assert_eq!(map2.get("key"), Some(&2));
        assert_eq!(map1.len(), 1);
        assert_eq!(map2.len(), 1);
    }

    #[rstest]
    fn test_remove() {
        let map = PersistentMap::new()
            .insert("a".to_string(), 1)
            .insert("b".to_string(), 2);
        let removed = map.remove("a");

        assert_eq!(removed.len(), 1);
        assert_eq!(removed.get("a"), None);
        assert_eq!(removed.get("b"), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[rstest]
    fn test_remove_missing_key_is_a_no_op() {
        let map = PersistentMap::new().insert("a".to_string(), 1);
        let same = map.remove("zzz");
        assert_eq!(same.len(), 1);
    }

    #[rstest]
    fn test_contains_key() {
        let map = PersistentMap::new().insert("key".to_string(), 42);

        assert!(map.contains_key("key"));
        assert!(!map.contains_key("other"));
    }

    #[rstest]
    fn test_get_key_value() {
        let map = PersistentMap::new().insert("key".to_string(), 42);
        let (key, value) = map.get_key_value("key").expect("entry present");
        assert_eq!(key, "key");
        assert_eq!(*value, 42);
    }

    #[rstest]
    fn test_update() {
        let map = PersistentMap::new().insert("count".to_string(), 10);

        let updated = map.update("count", |value| value + 1).expect("key present");
        assert_eq!(updated.get("count"), Some(&11));
        assert!(map.update("missing", |value| *value).is_none());
    }

    #[rstest]
    fn test_update_with_three_ways() {
        let map = PersistentMap::new().insert("count".to_string(), 10);

        let incremented = map.update_with("count", |value| value.map(|value| value + 1));
        assert_eq!(incremented.get("count"), Some(&11));

        let inserted = map.update_with("other", |value| value.copied().or(Some(7)));
        assert_eq!(inserted.get("other"), Some(&7));
        assert_eq!(inserted.len(), 2);

        let removed = map.update_with("count", |_| None);
        assert!(removed.is_empty());

        let untouched = map.update_with("missing", |_| None);
        assert_eq!(untouched.len(), 1);
    }

    #[rstest]
    fn test_filter_keeps_matching_entries() {
        let map: PersistentMap<i32, i32> = (0..100).map(|index| (index, index * 2)).collect();
        let kept = map.filter(|key, _| key % 2 == 0);

        assert_eq!(kept.len(), 50);
        assert_eq!(kept.get(&4), Some(&8));
        assert_eq!(kept.get(&5), None);
    }

    #[rstest]
    fn test_map_replaces_values_and_keeps_keys() {
        let map: PersistentMap<i32, i32> = (0..100).map(|index| (index, index)).collect();
        let doubled = map.map(|_, value| value * 2);

        assert_eq!(doubled.len(), 100);
        assert_eq!(doubled.get(&10), Some(&20));
    }

    #[rstest]
    fn test_map_to_another_value_type() {
        let map: PersistentMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
        let labelled = map.map(|key, value| format!("{key}:{value}"));

        assert_eq!(labelled.get(&1), Some(&"1:10".to_string()));
    }

    #[rstest]
    fn test_fold_sums_values() {
        let map: PersistentMap<i32, i32> = (1..=5).map(|index| (index, index * 10)).collect();
        let total = map.fold(0, |accumulator, (_, value)| accumulator + value);
        assert_eq!(total, 150);
    }

    #[rstest]
    fn test_merge_right_precedence() {
        let map1 = PersistentMap::new()
            .insert("a".to_string(), 1)
            .insert("b".to_string(), 2);
        let map2 = PersistentMap::new()
            .insert("b".to_string(), 20)
            .insert("c".to_string(), 3);

        let merged = map1.merge(&map2);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("a"), Some(&1));
        assert_eq!(merged.get("b"), Some(&20));
        assert_eq!(merged.get("c"), Some(&3));
    }

    #[rstest]
    fn test_iterators() {
        let map = PersistentMap::new()
            .insert("a".to_string(), 1)
            .insert("b".to_string(), 2);

        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);

        let total: i32 = map.values().sum();
        assert_eq!(total, 3);
    }

    #[rstest]
    fn test_from_iter_last_value_wins() {
        let entries = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("a".to_string(), 10),
        ];
        let map: PersistentMap<String, i32> = entries.into_iter().collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&10));
    }

    #[rstest]
    fn test_eq_compares_values() {
        let map1 = PersistentMap::new()
            .insert("a".to_string(), 1)
            .insert("b".to_string(), 2);
        let map2 = PersistentMap::new()
            .insert("b".to_string(), 2)
            .insert("a".to_string(), 1);
        let map3 = map1.insert("a".to_string(), 99);

        assert_eq!(map1, map2);
        assert_ne!(map1, map3);
    }
}

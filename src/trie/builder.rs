//! Incremental tree construction over transient nodes.

use super::Element;
use super::args::{CombineArgs, EqArgs};
use super::hasher::ChunkCursor;
use super::transient::TransientNode;
use super::tree::Tree;

/// Builds a [`Tree`] by mutating transient nodes in place, avoiding the
/// per-insertion allocation of the persistent path.
///
/// A builder owns its nodes exclusively; nothing it holds is observable
/// until [`finish`](Builder::finish) freezes the result. Builders can
/// also be seeded from an existing tree, in which case untouched
/// subtrees are carried over frozen and shared.
///
/// # Examples
///
/// ```rust
/// use permafrost::trie::{Builder, CombineArgs, EqArgs, Gauge, Merge};
///
/// fn eq(a: &u64, b: &u64) -> bool { a == b }
/// fn hash(v: &u64) -> u64 { *v }
///
/// let args = CombineArgs::new(EqArgs::new(Gauge::sequential(), eq, hash), Merge::UseRight);
/// let mut builder = Builder::new();
/// for value in 0..1_000u64 {
///     builder.add(&args, value);
/// }
/// let tree = builder.finish();
/// assert_eq!(tree.count(), 1_000);
/// ```
pub struct Builder<V> {
    root: TransientNode<V>,
    count: usize,
}

impl<V> Builder<V> {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TransientNode::Empty,
            count: 0,
        }
    }

    /// A builder seeded with the contents of `tree`; subtrees the
    /// builder never touches stay shared with the source.
    #[must_use]
    pub fn from_tree(tree: &Tree<V>) -> Self {
        Self {
            root: TransientNode::Frozen(tree.clone().into_root()),
            count: tree.count(),
        }
    }

    /// Number of distinct elements added so far.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl<V: Element> Builder<V> {
    /// Inserts `element`, merging with an equal existing element via
    /// the bundle's merge policy.
    pub fn add(&mut self, args: &CombineArgs<V>, element: V) {
        let cursor = ChunkCursor::at(args.eq_args().hash_of(&element), 0);
        let mut matches = 0;
        let root = std::mem::replace(&mut self.root, TransientNode::Empty);
        self.root = root.add(args, element, 0, cursor, &mut matches);
        self.count += 1 - matches;
        #[cfg(feature = "vetting")]
        self.vet();
    }

    /// Removes the element equal to `element`, if present.
    pub fn remove(&mut self, args: &EqArgs<V>, element: &V) {
        let cursor = ChunkCursor::at(args.hash_of(element), 0);
        let mut matches = 0;
        let root = std::mem::replace(&mut self.root, TransientNode::Empty);
        self.root = root.remove(args, element, 0, cursor, &mut matches);
        self.count -= matches;
        #[cfg(feature = "vetting")]
        self.vet();
    }

    /// Finds the element equal to `element` among those added so far.
    #[must_use]
    pub fn get<'a>(&'a self, args: &EqArgs<V>, element: &V) -> Option<&'a V> {
        let cursor = ChunkCursor::at(args.hash_of(element), 0);
        self.root.get(args, element, cursor)
    }

    /// Freezes the builder into an immutable tree.
    #[must_use]
    pub fn finish(self) -> Tree<V> {
        Tree::from_raw(self.root.freeze(0), self.count)
    }

    /// Freezes a snapshot and asserts every structural invariant.
    #[cfg(feature = "vetting")]
    fn vet(&self) {
        let snapshot = Tree::from_raw(self.root.clone().freeze(0), self.count);
        snapshot.vet();
    }
}

impl<V> Default for Builder<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

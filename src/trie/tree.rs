//! The tree façade.
//!
//! A [`Tree`] pairs a root node with its element count. Every public
//! operation seeds a root-level node call with an argument bundle and
//! depth zero, then rebuilds the pair from the returned node and the
//! match count, so cardinality never needs a separate traversal.
//!
//! Trees are value types: operations return new trees whose unchanged
//! regions alias the receiver. Cloning a tree is a reference-count bump.

use std::fmt;

use super::Element;
use super::ReferenceCounter;
use super::args::{CombineArgs, EqArgs, LessFn, Predicate, Reducer, TransformFn};
use super::builder::Builder;
use super::hasher::ChunkCursor;
use super::iter::{OrderedIterator, TreeIterator};
use super::node::{Node, NodeRef};
use super::parallel::Gauge;

/// A persistent set of elements organized by their 64-bit hashes.
///
/// The tree itself never hashes or compares elements; both arrive
/// through the argument bundles passed to each operation, which is what
/// lets one engine back both set and map semantics.
pub struct Tree<V> {
    root: NodeRef<V>,
    count: usize,
}

impl<V> Tree<V> {
    /// The empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::empty_ref(),
            count: 0,
        }
    }

    pub(crate) fn from_raw(root: NodeRef<V>, count: usize) -> Self {
        Self { root, count }
    }

    /// Number of distinct elements.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// True when the tree has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// A parallelism gauge sized to this tree.
    #[inline]
    #[must_use]
    pub const fn gauge(&self) -> Gauge {
        Gauge::new(self.count)
    }

    pub(crate) fn into_root(self) -> NodeRef<V> {
        self.root
    }

    /// True when both trees share the same root node (pointer
    /// identity). Useful for observing structural sharing.
    #[must_use]
    pub fn shares_root_with(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.root, &other.root)
    }

    /// Iterates the elements in hash-determined order.
    #[must_use]
    pub fn iter(&self) -> TreeIterator<'_, V> {
        TreeIterator::new(&self.root, self.count)
    }
}

impl<V: Element> Tree<V> {
    /// Builds a tree from elements via a transient builder.
    pub fn from_elements<I: IntoIterator<Item = V>>(args: &CombineArgs<V>, elements: I) -> Self {
        let mut builder = Builder::new();
        for element in elements {
            builder.add(args, element);
        }
        builder.finish()
    }

    /// Finds the stored element equal to `element`.
    #[must_use]
    pub fn get<'a>(&'a self, args: &EqArgs<V>, element: &V) -> Option<&'a V> {
        let cursor = ChunkCursor::at(args.hash_of(element), 0);
        self.root.get(args, element, cursor)
    }

    /// Finds a stored element by hash and predicate, without needing a
    /// probe element. This is how keyed containers look up by key.
    #[must_use]
    pub fn find<'a>(&'a self, hash: u64, predicate: &dyn Fn(&V) -> bool) -> Option<&'a V> {
        self.root.find(ChunkCursor::at(hash, 0), predicate)
    }

    /// A tree with `element` inserted; an equal stored element is
    /// unified via the bundle's merge policy.
    #[must_use]
    pub fn with(&self, args: &CombineArgs<V>, element: V) -> Self {
        let cursor = ChunkCursor::at(args.eq_args().hash_of(&element), 0);
        let mut matches = 0;
        let root = Node::with(&self.root, args, element, 0, cursor, &mut matches);
        Self {
            root,
            count: self.count + 1 - matches,
        }
    }

    /// A tree with the element equal to `element` removed.
    #[must_use]
    pub fn without(&self, args: &EqArgs<V>, element: &V) -> Self {
        let cursor = ChunkCursor::at(args.hash_of(element), 0);
        let mut matches = 0;
        let root = Node::without(&self.root, args, element, 0, cursor, &mut matches);
        Self {
            root,
            count: self.count - matches,
        }
    }

    /// The union of two trees; equal pairs are unified by the merge
    /// policy.
    #[must_use]
    pub fn combine(&self, args: &CombineArgs<V>, other: &Self) -> Self {
        let mut matches = 0;
        let root = Node::combine(&self.root, args, &other.root, 0, &mut matches);
        Self {
            root,
            count: self.count + other.count - matches,
        }
    }

    /// The intersection of two trees.
    ///
    /// Descends from the smaller operand, flipping the bundle so that
    /// equality still observes the operands in their original
    /// orientation; the result is the same either way.
    #[must_use]
    pub fn intersect(&self, args: &EqArgs<V>, other: &Self) -> Self {
        let (smaller, larger, oriented) = if self.count <= other.count {
            (self, other, *args)
        } else {
            (other, self, args.flip())
        };
        let mut matches = 0;
        let root = Node::intersection(&smaller.root, &oriented, &larger.root, 0, &mut matches);
        Self {
            root,
            count: matches,
        }
    }

    /// The elements of `self` not present in `other`.
    #[must_use]
    pub fn difference(&self, args: &EqArgs<V>, other: &Self) -> Self {
        let mut matches = 0;
        let root = Node::difference(&self.root, args, &other.root, 0, &mut matches);
        Self {
            root,
            count: self.count - matches,
        }
    }

    /// Structural equality under the injected element equality.
    #[must_use]
    pub fn equal(&self, args: &EqArgs<V>, other: &Self) -> bool {
        self.count == other.count && self.root.equal(args, &other.root, 0)
    }

    /// True when every element of `self` is present in `other`.
    #[must_use]
    pub fn subset_of(&self, args: &EqArgs<V>, other: &Self) -> bool {
        self.count <= other.count && self.root.subset_of(args, &other.root, 0)
    }

    /// The elements satisfying `predicate`.
    #[must_use]
    pub fn filter(&self, predicate: &Predicate<V>) -> Self {
        let mut matches = 0;
        let root = Node::filter(&self.root, self.gauge(), 0, predicate, &mut matches);
        Self {
            root,
            count: matches,
        }
    }

    /// Rebuilds the tree through `function`. The function may change
    /// element hashes; images that collide under the bundle's equality
    /// are unified by its merge policy, so the result count never
    /// exceeds the receiver's.
    #[must_use]
    pub fn transform(&self, args: &CombineArgs<V>, function: &TransformFn<V>) -> Self {
        let mut count = 0;
        let root = Node::transform(&self.root, args, 0, &mut count, function);
        Self { root, count }
    }

    /// Folds the elements with a batch reducer, or `None` for the empty
    /// tree.
    #[must_use]
    pub fn reduce(&self, reducer: &Reducer<V>) -> Option<V> {
        self.root.reduce(self.gauge(), 0, reducer)
    }

    /// Selects the least `limit` elements under `less` and yields them
    /// ascending; `None` yields every element in order.
    #[must_use]
    pub fn ordered_iter(&self, less: &LessFn<V>, limit: Option<usize>) -> OrderedIterator<V> {
        OrderedIterator::new(self.iter(), less, limit)
    }

    /// Walks the whole tree asserting every structural invariant.
    ///
    /// Panics on violation; a debugging aid for the engine itself.
    #[cfg(any(test, feature = "vetting"))]
    pub fn vet(&self) {
        assert_eq!(self.root.vet(0), self.count, "count out of sync");
    }
}

impl<V> Clone for Tree<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            count: self.count,
        }
    }
}

impl<V> Default for Tree<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Tree<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

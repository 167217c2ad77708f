//! The polymorphic trie node and its operation algebra.
//!
//! A node is a closed sum over four shapes:
//!
//! - [`Node::Empty`]: the empty tree; appears only at the root.
//! - [`Node::Leaf`]: up to [`LEAF_CAPACITY`] elements that have not yet
//!   diverged by hash chunk at the current depth.
//! - [`Node::Branch`]: a [`FANOUT`]-slot table of children, indexed by
//!   the hash chunk for the current depth.
//! - [`Node::Twig`]: a collision bucket at [`MAX_DEPTH`], holding
//!   elements whose full 64-bit hashes are equal, scanned linearly.
//!
//! Depth is never stored in a node; it is a call-stack parameter, which
//! is what allows unchanged subtrees to be aliased freely between trees.
//!
//! Every operation that can shrink a subtree canonicalizes its result:
//! empty results collapse to [`Node::Empty`], a subtree holding no more
//! than [`LEAF_CAPACITY`] elements repacks into a single leaf, and a
//! twig reduced to one element becomes a 1-leaf. Operations that leave a
//! subtree untouched return the same reference, so derived trees share
//! structure with their ancestors.
//!
//! [`FANOUT`]: super::config::FANOUT

use smallvec::{SmallVec, smallvec};

use super::ReferenceCounter;
use super::args::{CombineArgs, EqArgs, Predicate, Reducer, TransformFn};
use super::builder::Builder;
use super::config::{LEAF_CAPACITY, MAX_DEPTH};
use super::hasher::ChunkCursor;
use super::parallel::Gauge;
use super::slots::{SlotTable, slot_from};

/// Shared handle to an immutable node.
pub(crate) type NodeRef<V> = ReferenceCounter<Node<V>>;

/// Inline buffer for leaf elements.
pub(crate) type LeafBuf<V> = SmallVec<[V; LEAF_CAPACITY]>;

/// An immutable trie node.
#[derive(Clone)]
pub(crate) enum Node<V> {
    /// The empty tree.
    Empty,
    /// A small unordered set of elements, no larger than
    /// [`LEAF_CAPACITY`].
    Leaf(LeafBuf<V>),
    /// An interior node routing by hash chunk.
    Branch(SlotTable<V>),
    /// A hash-collision bucket at maximum depth; grows without bound.
    Twig(Vec<V>),
}

impl<V> Node<V> {
    pub(crate) fn empty_ref() -> NodeRef<V> {
        ReferenceCounter::new(Self::Empty)
    }
}

impl<V: crate::trie::Element> Node<V> {
    fn leaf_of(element: V) -> NodeRef<V> {
        ReferenceCounter::new(Self::Leaf(smallvec![element]))
    }

    /// Element slice of a leaf or twig.
    fn small_elements(&self) -> Option<&[V]> {
        match self {
            Self::Leaf(items) => Some(items),
            Self::Twig(items) => Some(items),
            Self::Empty | Self::Branch(_) => None,
        }
    }

    /// Element slice of a node already dispatched as a leaf or twig.
    fn expect_small(&self) -> &[V] {
        match self.small_elements() {
            Some(items) => items,
            // Dispatch handles the empty and branch arms before calling
            // into small-node helpers; reaching this means the node tag
            // itself is corrupt.
            None => unreachable!("small-node operation on a branch or empty node"),
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Finds the stored element equal to `element` under the injected
    /// equality.
    pub(crate) fn get<'a>(
        &'a self,
        args: &EqArgs<V>,
        element: &V,
        cursor: ChunkCursor,
    ) -> Option<&'a V> {
        match self {
            Self::Empty => None,
            Self::Leaf(items) => items.iter().find(|stored| args.eq(stored, element)),
            Self::Twig(items) => items.iter().find(|stored| args.eq(stored, element)),
            Self::Branch(table) => table
                .get(cursor.chunk())?
                .get(args, element, cursor.next()),
        }
    }

    /// Probe-free lookup: descends by the cursor's hash and scans the
    /// reached small node with `predicate`.
    pub(crate) fn find<'a>(
        &'a self,
        cursor: ChunkCursor,
        predicate: &dyn Fn(&V) -> bool,
    ) -> Option<&'a V> {
        match self {
            Self::Empty => None,
            Self::Leaf(items) => items.iter().find(|stored| predicate(stored)),
            Self::Twig(items) => items.iter().find(|stored| predicate(stored)),
            Self::Branch(table) => table.get(cursor.chunk())?.find(cursor.next(), predicate),
        }
    }

    // ------------------------------------------------------------------
    // Single-element updates
    // ------------------------------------------------------------------

    /// Inserts `element`, merging with an equal stored element via the
    /// bundle's merge policy. Increments `matches` when such a merge
    /// happened.
    pub(crate) fn with(
        this: &NodeRef<V>,
        args: &CombineArgs<V>,
        element: V,
        depth: usize,
        cursor: ChunkCursor,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match &**this {
            Self::Empty => Self::leaf_of(element),
            Self::Leaf(_) | Self::Twig(_) => {
                Self::with_small(this, args, element, depth, matches)
            }
            Self::Branch(table) => {
                let index = cursor.chunk();
                match table.get(index) {
                    Some(child) => {
                        let updated =
                            Self::with(child, args, element, depth + 1, cursor.next(), matches);
                        if ReferenceCounter::ptr_eq(child, &updated) {
                            this.clone()
                        } else {
                            ReferenceCounter::new(Self::Branch(
                                table.with_slot(index, Some(updated)),
                            ))
                        }
                    }
                    None => {
                        let leaf = Self::leaf_of(element);
                        ReferenceCounter::new(Self::Branch(table.with_slot(index, Some(leaf))))
                    }
                }
            }
        }
    }

    fn with_small(
        this: &NodeRef<V>,
        args: &CombineArgs<V>,
        element: V,
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        let (items, was_twig) = match &**this {
            Self::Leaf(items) => (&items[..], false),
            Self::Twig(items) => (&items[..], true),
            Self::Empty | Self::Branch(_) => {
                unreachable!("small-node operation on a branch or empty node")
            }
        };

        if let Some(position) = items
            .iter()
            .position(|stored| args.eq_args().eq(stored, &element))
        {
            *matches += 1;
            if args.keeps_existing() {
                return this.clone();
            }
            let mut replaced = items.to_vec();
            let merged = args.merge(replaced[position].clone(), element);
            replaced[position] = merged;
            return assemble_small(replaced, was_twig);
        }

        if was_twig {
            let mut grown = items.to_vec();
            grown.push(element);
            return ReferenceCounter::new(Self::Twig(grown));
        }
        if items.len() < LEAF_CAPACITY {
            let mut grown: LeafBuf<V> = items.iter().cloned().collect();
            grown.push(element);
            return ReferenceCounter::new(Self::Leaf(grown));
        }
        let mut all: Vec<V> = items.to_vec();
        all.push(element);
        if depth >= MAX_DEPTH {
            ReferenceCounter::new(Self::Twig(all))
        } else {
            Self::branch_from(args, depth, all, matches)
        }
    }

    /// Routes `items` (distinct under the bundle's equality) into a
    /// fresh branch at `depth`.
    fn branch_from(
        args: &CombineArgs<V>,
        depth: usize,
        items: Vec<V>,
        matches: &mut usize,
    ) -> NodeRef<V> {
        debug_assert!(depth < MAX_DEPTH);
        let mut table = SlotTable::empty();
        for item in items {
            let cursor = ChunkCursor::at(args.eq_args().hash_of(&item), depth);
            let index = cursor.chunk();
            let slot = match table.get(index) {
                Some(child) => Self::with(child, args, item, depth + 1, cursor.next(), matches),
                None => Self::leaf_of(item),
            };
            table.set(index, Some(slot));
        }
        ReferenceCounter::new(Self::Branch(table))
    }

    /// Removes the stored element equal to `element`, canonicalizing
    /// the result. Increments `matches` when a removal happened.
    pub(crate) fn without(
        this: &NodeRef<V>,
        args: &EqArgs<V>,
        element: &V,
        depth: usize,
        cursor: ChunkCursor,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match &**this {
            Self::Empty => this.clone(),
            Self::Leaf(_) | Self::Twig(_) => {
                let (items, was_twig) = match &**this {
                    Self::Leaf(items) => (&items[..], false),
                    Self::Twig(items) => (&items[..], true),
                    Self::Empty | Self::Branch(_) => {
                        unreachable!("small-node operation on a branch or empty node")
                    }
                };
                let Some(position) = items.iter().position(|stored| args.eq(stored, element))
                else {
                    return this.clone();
                };
                *matches += 1;
                let mut remaining = items.to_vec();
                remaining.swap_remove(position);
                assemble_small(remaining, was_twig)
            }
            Self::Branch(table) => {
                let index = cursor.chunk();
                let Some(child) = table.get(index) else {
                    return this.clone();
                };
                let updated = Self::without(child, args, element, depth + 1, cursor.next(), matches);
                if ReferenceCounter::ptr_eq(child, &updated) {
                    this.clone()
                } else {
                    Self::canonical_branch(table.with_slot(index, slot_from(updated)), depth)
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Bulk algebra
    // ------------------------------------------------------------------

    /// Union of two subtrees; equal pairs are unified by the merge
    /// policy and counted in `matches`.
    pub(crate) fn combine(
        this: &NodeRef<V>,
        args: &CombineArgs<V>,
        other: &NodeRef<V>,
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match (&**this, &**other) {
            (Self::Empty, _) => other.clone(),
            (_, Self::Empty) => this.clone(),
            (Self::Branch(left), Self::Branch(right)) => {
                let driver = args.eq_args().gauge().driver_at(depth);
                let (results, fanned) = driver.fan_out(|index| {
                    let mut local = 0;
                    let slot = match (left.get(index), right.get(index)) {
                        (None, None) => None,
                        (Some(a), None) => Some(a.clone()),
                        (None, Some(b)) => Some(b.clone()),
                        (Some(a), Some(b)) => {
                            Some(Self::combine(a, args, b, depth + 1, &mut local))
                        }
                    };
                    (slot, local)
                });
                *matches += fanned;
                let table = SlotTable::from_results(results);
                if table.shares_all_slots_with(left) {
                    this.clone()
                } else {
                    ReferenceCounter::new(Self::Branch(table))
                }
            }
            (Self::Branch(_), _) => {
                Self::fold_into(this, args, other.expect_small(), depth, matches)
            }
            (_, Self::Branch(_)) => {
                Self::fold_into(other, &args.flip(), this.expect_small(), depth, matches)
            }
            _ => Self::combine_small(
                args,
                this.expect_small(),
                other.expect_small(),
                depth,
                matches,
            ),
        }
    }

    /// Folds small-node elements into a branch one by one.
    fn fold_into(
        branch: &NodeRef<V>,
        args: &CombineArgs<V>,
        items: &[V],
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        let mut accumulated = branch.clone();
        for element in items {
            let cursor = ChunkCursor::at(args.eq_args().hash_of(element), depth);
            accumulated = Self::with(&accumulated, args, element.clone(), depth, cursor, matches);
        }
        accumulated
    }

    /// Merges two small nodes directly, materializing a branch when the
    /// combined set no longer fits a leaf.
    fn combine_small(
        args: &CombineArgs<V>,
        left: &[V],
        right: &[V],
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        let mut items: Vec<V> = left.to_vec();
        for incoming in right {
            match items
                .iter()
                .position(|stored| args.eq_args().eq(stored, incoming))
            {
                Some(position) => {
                    let merged = args.merge(items[position].clone(), incoming.clone());
                    items[position] = merged;
                    *matches += 1;
                }
                None => items.push(incoming.clone()),
            }
        }
        if items.len() <= LEAF_CAPACITY {
            ReferenceCounter::new(Self::Leaf(items.into_iter().collect()))
        } else if depth >= MAX_DEPTH {
            ReferenceCounter::new(Self::Twig(items))
        } else {
            Self::branch_from(args, depth, items, matches)
        }
    }

    /// Elements of `this` not present in `other`; removed pairs are
    /// counted in `matches`.
    pub(crate) fn difference(
        this: &NodeRef<V>,
        args: &EqArgs<V>,
        other: &NodeRef<V>,
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match (&**this, &**other) {
            (Self::Empty, _) | (_, Self::Empty) => this.clone(),
            (Self::Branch(left), Self::Branch(right)) => {
                let driver = args.gauge().driver_at(depth);
                let (results, fanned) = driver.fan_out(|index| {
                    let mut local = 0;
                    let slot = match (left.get(index), right.get(index)) {
                        (None, _) => None,
                        (Some(a), None) => Some(a.clone()),
                        (Some(a), Some(b)) => {
                            slot_from(Self::difference(a, args, b, depth + 1, &mut local))
                        }
                    };
                    (slot, local)
                });
                *matches += fanned;
                let table = SlotTable::from_results(results);
                if table.shares_all_slots_with(left) {
                    this.clone()
                } else {
                    Self::canonical_branch(table, depth)
                }
            }
            (Self::Branch(_), _) => {
                let mut accumulated = this.clone();
                for element in other.expect_small() {
                    let cursor = ChunkCursor::at(args.hash_of(element), depth);
                    accumulated =
                        Self::without(&accumulated, args, element, depth, cursor, matches);
                }
                accumulated
            }
            _ => {
                let (items, was_twig) = match &**this {
                    Self::Leaf(items) => (&items[..], false),
                    Self::Twig(items) => (&items[..], true),
                    Self::Empty | Self::Branch(_) => {
                        unreachable!("small-node operation on a branch or empty node")
                    }
                };
                let mut kept = Vec::with_capacity(items.len());
                for element in items {
                    let cursor = ChunkCursor::at(args.hash_of(element), depth);
                    if other.get(args, element, cursor).is_some() {
                        *matches += 1;
                    } else {
                        kept.push(element.clone());
                    }
                }
                if kept.len() == items.len() {
                    this.clone()
                } else {
                    assemble_small(kept, was_twig)
                }
            }
        }
    }

    /// Elements present in both subtrees; kept pairs are counted in
    /// `matches`, which is exactly the result cardinality.
    pub(crate) fn intersection(
        this: &NodeRef<V>,
        args: &EqArgs<V>,
        other: &NodeRef<V>,
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match (&**this, &**other) {
            (Self::Empty, _) => this.clone(),
            (_, Self::Empty) => other.clone(),
            (Self::Branch(left), Self::Branch(right)) => {
                let driver = args.gauge().driver_at(depth);
                let (results, fanned) = driver.fan_out(|index| {
                    let mut local = 0;
                    let slot = match (left.get(index), right.get(index)) {
                        (Some(a), Some(b)) => {
                            slot_from(Self::intersection(a, args, b, depth + 1, &mut local))
                        }
                        _ => None,
                    };
                    (slot, local)
                });
                *matches += fanned;
                let table = SlotTable::from_results(results);
                if table.shares_all_slots_with(left) {
                    this.clone()
                } else {
                    Self::canonical_branch(table, depth)
                }
            }
            (Self::Branch(_), _) => {
                Self::intersect_small(other, &args.flip(), this, depth, matches)
            }
            _ => Self::intersect_small(this, args, other, depth, matches),
        }
    }

    /// Keeps the elements of the small node `small` that are present in
    /// `other`.
    fn intersect_small(
        small: &NodeRef<V>,
        args: &EqArgs<V>,
        other: &NodeRef<V>,
        depth: usize,
        matches: &mut usize,
    ) -> NodeRef<V> {
        let (items, was_twig) = match &**small {
            Self::Leaf(items) => (&items[..], false),
            Self::Twig(items) => (&items[..], true),
            Self::Empty | Self::Branch(_) => {
                unreachable!("small-node operation on a branch or empty node")
            }
        };
        let mut kept = Vec::with_capacity(items.len());
        for element in items {
            let cursor = ChunkCursor::at(args.hash_of(element), depth);
            if other.get(args, element, cursor).is_some() {
                *matches += 1;
                kept.push(element.clone());
            }
        }
        if kept.len() == items.len() {
            small.clone()
        } else {
            assemble_small(kept, was_twig)
        }
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Structural equality under the injected element equality.
    pub(crate) fn equal(&self, args: &EqArgs<V>, other: &Self, depth: usize) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Branch(left), Self::Branch(right)) => {
                let driver = args.gauge().driver_at(depth);
                driver.fan_all(|index| match (left.get(index), right.get(index)) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.equal(args, b, depth + 1),
                    _ => false,
                })
            }
            _ => match (self.small_elements(), other.small_elements()) {
                (Some(left), Some(right)) => {
                    left.len() == right.len()
                        && left
                            .iter()
                            .all(|a| right.iter().any(|b| args.eq(a, b)))
                }
                _ => false,
            },
        }
    }

    /// True when every element of `self` is present in `other`.
    pub(crate) fn subset_of(&self, args: &EqArgs<V>, other: &Self, depth: usize) -> bool {
        match (self, other) {
            (Self::Empty, _) => true,
            (_, Self::Empty) => false,
            (Self::Branch(left), Self::Branch(right)) => {
                let driver = args.gauge().driver_at(depth);
                driver.fan_all(|index| match (left.get(index), right.get(index)) {
                    (None, _) => true,
                    (Some(_), None) => false,
                    (Some(a), Some(b)) => a.subset_of(args, b, depth + 1),
                })
            }
            // A canonical branch always holds more elements than any
            // small node can.
            (Self::Branch(_), _) => false,
            _ => self.expect_small().iter().all(|element| {
                let cursor = ChunkCursor::at(args.hash_of(element), depth);
                other.get(args, element, cursor).is_some()
            }),
        }
    }

    // ------------------------------------------------------------------
    // Whole-tree transforms
    // ------------------------------------------------------------------

    /// Keeps the elements satisfying `predicate`; survivors are counted
    /// in `matches`.
    pub(crate) fn filter(
        this: &NodeRef<V>,
        gauge: Gauge,
        depth: usize,
        predicate: &Predicate<V>,
        matches: &mut usize,
    ) -> NodeRef<V> {
        match &**this {
            Self::Empty => this.clone(),
            Self::Leaf(_) | Self::Twig(_) => {
                let (items, was_twig) = match &**this {
                    Self::Leaf(items) => (&items[..], false),
                    Self::Twig(items) => (&items[..], true),
                    Self::Empty | Self::Branch(_) => {
                        unreachable!("small-node operation on a branch or empty node")
                    }
                };
                let kept: Vec<V> = items
                    .iter()
                    .filter(|element| predicate(element))
                    .cloned()
                    .collect();
                *matches += kept.len();
                if kept.len() == items.len() {
                    this.clone()
                } else {
                    assemble_small(kept, was_twig)
                }
            }
            Self::Branch(table) => {
                let driver = gauge.driver_at(depth);
                let (results, fanned) = driver.fan_out(|index| {
                    let mut local = 0;
                    let slot = table.get(index).and_then(|child| {
                        slot_from(Self::filter(child, gauge, depth + 1, predicate, &mut local))
                    });
                    (slot, local)
                });
                *matches += fanned;
                let filtered = SlotTable::from_results(results);
                if filtered.shares_all_slots_with(table) {
                    this.clone()
                } else {
                    Self::canonical_branch(filtered, depth)
                }
            }
        }
    }

    /// Rebuilds the subtree through `function`. Because the function may
    /// change element hashes, small nodes feed a fresh builder and
    /// branch results are re-merged from depth zero; `count` accumulates
    /// the distinct elements of the rebuilt subtree.
    pub(crate) fn transform(
        this: &NodeRef<V>,
        args: &CombineArgs<V>,
        depth: usize,
        count: &mut usize,
        function: &TransformFn<V>,
    ) -> NodeRef<V> {
        match &**this {
            Self::Empty => this.clone(),
            Self::Leaf(_) | Self::Twig(_) => {
                let mut builder = Builder::new();
                for element in this.expect_small() {
                    builder.add(args, function(element));
                }
                let tree = builder.finish();
                *count += tree.count();
                tree.into_root()
            }
            Self::Branch(table) => {
                let driver = args.eq_args().gauge().driver_at(depth);
                let (results, rebuilt) = driver.fan_out(|index| match table.get(index) {
                    None => (None, 0),
                    Some(child) => {
                        let mut local = 0;
                        let node = Self::transform(child, args, depth + 1, &mut local, function);
                        (slot_from(node), local)
                    }
                });
                *count += rebuilt;

                let mut parts = results.into_iter().flatten();
                let Some(first) = parts.next() else {
                    return Self::empty_ref();
                };
                let mut accumulated = first;
                let mut duplicates = 0;
                for part in parts {
                    accumulated = Self::combine(&accumulated, args, &part, 0, &mut duplicates);
                }
                *count -= duplicates;
                accumulated
            }
        }
    }

    /// Folds the subtree with a batch reducer.
    pub(crate) fn reduce(&self, gauge: Gauge, depth: usize, reducer: &Reducer<V>) -> Option<V> {
        match self {
            Self::Empty => None,
            Self::Leaf(items) => Some(reducer(items)),
            Self::Twig(items) => Some(reducer(items)),
            Self::Branch(table) => {
                let driver = gauge.driver_at(depth);
                let (results, _) = driver.fan_out(|index| {
                    let value = table
                        .get(index)
                        .and_then(|child| child.reduce(gauge, depth + 1, reducer));
                    (value, 0)
                });
                let values: Vec<V> = results.into_iter().flatten().collect();
                Some(reducer(&values))
            }
        }
    }

    // ------------------------------------------------------------------
    // Canonicalization
    // ------------------------------------------------------------------

    /// Rewrites a branch table to the smallest legal shape holding the
    /// same elements.
    ///
    /// A lone leaf child is hoisted as-is; otherwise a bounded copy-out
    /// probe decides whether the whole subtree fits a single leaf. A
    /// branch above an oversized collision bucket keeps its single-child
    /// chain, since hoisting would change the child's chunk depth.
    pub(crate) fn canonical_branch(table: SlotTable<V>, depth: usize) -> NodeRef<V> {
        debug_assert!(depth < MAX_DEPTH);
        if let Some(child) = table.single_child()
            && matches!(**child, Self::Leaf(_))
        {
            return child.clone();
        }
        let mut probe: Vec<&V> = Vec::with_capacity(LEAF_CAPACITY);
        let packable = table
            .slots()
            .iter()
            .flatten()
            .all(|child| child.append_refs(&mut probe, LEAF_CAPACITY));
        if packable {
            if probe.is_empty() {
                Self::empty_ref()
            } else {
                ReferenceCounter::new(Self::Leaf(probe.into_iter().cloned().collect()))
            }
        } else {
            ReferenceCounter::new(Self::Branch(table))
        }
    }

    /// Appends element references in traversal order, aborting once the
    /// buffer would exceed `capacity`.
    fn append_refs<'a>(&'a self, buffer: &mut Vec<&'a V>, capacity: usize) -> bool {
        match self {
            Self::Empty => true,
            Self::Leaf(items) => append_slice(buffer, items, capacity),
            Self::Twig(items) => append_slice(buffer, items, capacity),
            Self::Branch(table) => table
                .slots()
                .iter()
                .flatten()
                .all(|child| child.append_refs(buffer, capacity)),
        }
    }

    // ------------------------------------------------------------------
    // Vetting
    // ------------------------------------------------------------------

    /// Walks the subtree asserting every structural invariant, returning
    /// its element count.
    #[cfg(any(test, feature = "vetting"))]
    pub(crate) fn vet(&self, depth: usize) -> usize {
        match self {
            Self::Empty => {
                assert_eq!(depth, 0, "empty node below the root");
                0
            }
            Self::Leaf(items) => {
                assert!(!items.is_empty(), "empty leaf");
                assert!(items.len() <= LEAF_CAPACITY, "oversized leaf");
                items.len()
            }
            Self::Twig(items) => {
                assert_eq!(depth, MAX_DEPTH, "twig above maximum depth");
                assert!(items.len() >= 2, "undersized twig");
                items.len()
            }
            Self::Branch(table) => {
                assert!(depth < MAX_DEPTH, "branch at maximum depth");
                let occupied = table.occupied();
                assert!(occupied >= 1, "childless branch");
                if let Some(child) = table.single_child() {
                    assert!(
                        !matches!(**child, Self::Leaf(_)),
                        "single-leaf branch not hoisted"
                    );
                }
                let total: usize = table
                    .slots()
                    .iter()
                    .flatten()
                    .map(|child| child.vet(depth + 1))
                    .sum();
                assert!(total > LEAF_CAPACITY, "branch packable into a leaf");
                total
            }
        }
    }
}

fn append_slice<'a, V>(buffer: &mut Vec<&'a V>, items: &'a [V], capacity: usize) -> bool {
    if buffer.len() + items.len() > capacity {
        return false;
    }
    buffer.extend(items.iter());
    true
}

/// Builds the canonical node for a small element set: empty, a 1-leaf,
/// a leaf, or (for collision buckets that are still oversized) a twig.
fn assemble_small<V: crate::trie::Element>(items: Vec<V>, was_twig: bool) -> NodeRef<V> {
    let node = match items.len() {
        0 => Node::Empty,
        1 => Node::Leaf(items.into_iter().collect()),
        _ if was_twig => Node::Twig(items),
        _ => Node::Leaf(items.into_iter().collect()),
    };
    ReferenceCounter::new(node)
}

//! Mutable build-mode nodes.
//!
//! A transient node is owned by exactly one [`Builder`] and mutated in
//! place, which makes bulk building amortized O(1) per element instead
//! of allocating a fresh immutable node per insertion. Freezing converts
//! the whole transient tree back into immutable nodes, canonicalizing
//! along the way.
//!
//! The [`TransientNode::Frozen`] arm wraps an already-immutable subtree
//! without converting it; the spine thaws lazily on the first mutation
//! that reaches it, so builders seeded from an existing tree only copy
//! the paths they actually touch.
//!
//! [`Builder`]: super::builder::Builder

use super::ReferenceCounter;
use super::args::{CombineArgs, EqArgs};
use super::config::{FANOUT, LEAF_CAPACITY, MAX_DEPTH};
use super::hasher::ChunkCursor;
use super::node::{LeafBuf, Node, NodeRef};
use super::slots::{SlotTable, slot_from};

/// A mutable counterpart of [`Node`], visible only inside a builder.
#[derive(Clone)]
pub(crate) enum TransientNode<V> {
    /// No elements.
    Empty,
    /// A growable element buffer; covers both leaves and, past
    /// [`MAX_DEPTH`], collision buckets (the buffer spills to the heap).
    Leaf(LeafBuf<V>),
    /// An interior node with in-place-mutable children.
    Branch(Box<[TransientNode<V>; FANOUT]>),
    /// An immutable subtree carried over untouched; thaws on first
    /// mutation.
    Frozen(NodeRef<V>),
}

impl<V: crate::trie::Element> TransientNode<V> {
    fn empty_branch() -> Self {
        Self::Branch(Box::new(std::array::from_fn(|_| Self::Empty)))
    }

    /// Shallow conversion of an immutable node into build mode: element
    /// buffers are copied, branch children stay frozen.
    pub(crate) fn thaw(node: &NodeRef<V>) -> Self {
        match &**node {
            Node::Empty => Self::Empty,
            Node::Leaf(items) => Self::Leaf(items.clone()),
            Node::Twig(items) => Self::Leaf(items.iter().cloned().collect()),
            Node::Branch(table) => Self::Branch(Box::new(std::array::from_fn(
                |index| match table.get(index) {
                    Some(child) => Self::Frozen(child.clone()),
                    None => Self::Empty,
                },
            ))),
        }
    }

    /// Inserts `element` in place; `matches` counts merges with an
    /// already-present equal element.
    pub(crate) fn add(
        self,
        args: &CombineArgs<V>,
        element: V,
        depth: usize,
        cursor: ChunkCursor,
        matches: &mut usize,
    ) -> Self {
        match self {
            Self::Empty => {
                let mut items = LeafBuf::new();
                items.push(element);
                Self::Leaf(items)
            }
            Self::Leaf(mut items) => {
                if let Some(position) = items
                    .iter()
                    .position(|stored| args.eq_args().eq(stored, &element))
                {
                    *matches += 1;
                    let merged = args.merge(items[position].clone(), element);
                    items[position] = merged;
                    return Self::Leaf(items);
                }
                if items.len() < LEAF_CAPACITY || depth >= MAX_DEPTH {
                    items.push(element);
                    return Self::Leaf(items);
                }
                let mut branch = Self::empty_branch();
                for item in items {
                    let item_cursor = ChunkCursor::at(args.eq_args().hash_of(&item), depth);
                    branch = branch.add(args, item, depth, item_cursor, matches);
                }
                branch.add(args, element, depth, cursor, matches)
            }
            Self::Branch(mut children) => {
                let index = cursor.chunk();
                let child = std::mem::replace(&mut children[index], Self::Empty);
                children[index] = child.add(args, element, depth + 1, cursor.next(), matches);
                Self::Branch(children)
            }
            Self::Frozen(node) => {
                Self::thaw(&node).add(args, element, depth, cursor, matches)
            }
        }
    }

    /// Removes the stored element equal to `element`, if any; `matches`
    /// counts the removal.
    pub(crate) fn remove(
        self,
        args: &EqArgs<V>,
        element: &V,
        depth: usize,
        cursor: ChunkCursor,
        matches: &mut usize,
    ) -> Self {
        match self {
            Self::Empty => self,
            Self::Leaf(mut items) => {
                if let Some(position) = items.iter().position(|stored| args.eq(stored, element)) {
                    *matches += 1;
                    items.swap_remove(position);
                    if items.is_empty() {
                        return Self::Empty;
                    }
                }
                Self::Leaf(items)
            }
            Self::Branch(mut children) => {
                let index = cursor.chunk();
                let child = std::mem::replace(&mut children[index], Self::Empty);
                children[index] = child.remove(args, element, depth + 1, cursor.next(), matches);
                Self::Branch(children)
            }
            Self::Frozen(node) => {
                Self::thaw(&node).remove(args, element, depth, cursor, matches)
            }
        }
    }

    /// Finds the stored element equal to `element`.
    pub(crate) fn get<'a>(
        &'a self,
        args: &EqArgs<V>,
        element: &V,
        cursor: ChunkCursor,
    ) -> Option<&'a V> {
        match self {
            Self::Empty => None,
            Self::Leaf(items) => items.iter().find(|stored| args.eq(stored, element)),
            Self::Branch(children) => {
                children[cursor.chunk()].get(args, element, cursor.next())
            }
            Self::Frozen(node) => node.get(args, element, cursor),
        }
    }

    /// Converts back into an immutable node, canonicalizing branches.
    pub(crate) fn freeze(self, depth: usize) -> NodeRef<V> {
        match self {
            Self::Empty => Node::empty_ref(),
            Self::Leaf(items) => {
                if items.len() <= LEAF_CAPACITY {
                    ReferenceCounter::new(Node::Leaf(items))
                } else {
                    ReferenceCounter::new(Node::Twig(items.into_vec()))
                }
            }
            Self::Branch(children) => {
                let children = *children;
                let mut table = SlotTable::empty();
                for (index, child) in children.into_iter().enumerate() {
                    table.set(index, slot_from(child.freeze(depth + 1)));
                }
                Node::canonical_branch(table, depth)
            }
            Self::Frozen(node) => node,
        }
    }
}

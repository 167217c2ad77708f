//! The packed child table owned by branch nodes.

use super::config::FANOUT;
use super::node::{Node, NodeRef};

/// A fixed table of [`FANOUT`] child slots, indexed by hash chunk.
///
/// Empty slots hold `None`; an empty node never appears as a child.
#[derive(Clone)]
pub(crate) struct SlotTable<V> {
    slots: [Option<NodeRef<V>>; FANOUT],
}

impl<V> SlotTable<V> {
    pub(crate) fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&NodeRef<V>> {
        self.slots[index].as_ref()
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, slot: Option<NodeRef<V>>) {
        self.slots[index] = slot;
    }

    /// A copy of the table with one slot replaced.
    pub(crate) fn with_slot(&self, index: usize, slot: Option<NodeRef<V>>) -> Self
    where
        V: Clone,
    {
        let mut table = self.clone();
        table.set(index, slot);
        table
    }

    #[cfg(any(test, feature = "vetting"))]
    pub(crate) fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The only child, when exactly one slot is occupied.
    pub(crate) fn single_child(&self) -> Option<&NodeRef<V>> {
        let mut children = self.slots.iter().flatten();
        let first = children.next()?;
        if children.next().is_none() {
            Some(first)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<NodeRef<V>>; FANOUT] {
        &self.slots
    }

    /// Builds a table from per-slot results, turning empty nodes into
    /// empty slots.
    pub(crate) fn from_results(results: Vec<Option<NodeRef<V>>>) -> Self {
        debug_assert_eq!(results.len(), FANOUT);
        let mut iter = results.into_iter();
        Self {
            slots: std::array::from_fn(|_| iter.next().flatten()),
        }
    }

    /// True when every slot holds the same node reference as `other`
    /// (pointer identity, the structural-sharing fast path).
    pub(crate) fn shares_all_slots_with(&self, other: &Self) -> bool {
        self.slots
            .iter()
            .zip(other.slots.iter())
            .all(|(a, b)| match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => crate::trie::ReferenceCounter::ptr_eq(a, b),
                _ => false,
            })
    }
}

/// Drops an empty node down to an empty slot.
#[inline]
pub(crate) fn slot_from<V>(node: NodeRef<V>) -> Option<NodeRef<V>> {
    if matches!(*node, Node::Empty) {
        None
    } else {
        Some(node)
    }
}

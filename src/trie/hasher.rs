//! Lazy chunk stream over a precomputed 64-bit hash.
//!
//! A [`ChunkCursor`] carries the full hash of an element together with
//! the bit offset for the current trie depth. Each level of descent
//! reads one [`CHUNK_BITS`]-wide chunk and advances the cursor; after
//! [`MAX_DEPTH`] steps the stream is exhausted and callers must switch
//! to collision handling.

use super::config::{CHUNK_BITS, CHUNK_MASK, MAX_DEPTH};

/// A cursor over the chunk stream of a single 64-bit hash.
///
/// The cursor is a value type: [`next`](ChunkCursor::next) returns an
/// advanced copy, so a caller can hold its current position while
/// recursing.
#[derive(Clone, Copy, Debug)]
pub struct ChunkCursor {
    hash: u64,
    shift: u32,
}

impl ChunkCursor {
    /// Creates a cursor positioned at `depth` over `hash`.
    #[inline]
    #[must_use]
    pub fn at(hash: u64, depth: usize) -> Self {
        Self {
            hash,
            shift: (depth * CHUNK_BITS) as u32,
        }
    }

    /// The chunk for the current depth, in `[0, FANOUT)`.
    ///
    /// Must not be called on an exhausted cursor.
    #[inline]
    #[must_use]
    pub fn chunk(self) -> usize {
        debug_assert!(!self.is_exhausted(), "chunk stream exhausted");
        ((self.hash >> self.shift) & CHUNK_MASK) as usize
    }

    /// A cursor advanced by one level.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            hash: self.hash,
            shift: self.shift + CHUNK_BITS as u32,
        }
    }

    /// The full hash the cursor was created from.
    #[inline]
    #[must_use]
    pub const fn full_hash(self) -> u64 {
        self.hash
    }

    /// True once all [`MAX_DEPTH`] chunks have been consumed.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.shift as usize >= MAX_DEPTH * CHUNK_BITS
    }
}

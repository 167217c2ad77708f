//! The parallel driver: fans the child slots of a branch onto the
//! worker pool when a subtree is large enough to benefit.
//!
//! The [`Gauge`] holds the declared element count of the operation and
//! answers, per level, whether the expected per-subtree share still
//! clears [`PARALLEL_THRESHOLD`]. The [`Driver`] it selects is either
//! [`Driver::Sequential`] or, under the `rayon` feature, a worker pool.
//!
//! Fanning out is sound because sibling subtrees are disjoint and every
//! body is a pure function producing fresh nodes; the only
//! synchronization is the join when results are merged. Short-circuit
//! operations use [`Driver::fan_all`], which suppresses further
//! scheduling once any body returns `false`.

use super::config::{CHUNK_BITS, FANOUT, PARALLEL_THRESHOLD};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Decides per trie level whether bulk work should go to the worker
/// pool.
#[derive(Clone, Copy, Debug)]
pub struct Gauge {
    expected: usize,
}

impl Gauge {
    /// A gauge for an operation over roughly `expected` elements.
    #[inline]
    #[must_use]
    pub const fn new(expected: usize) -> Self {
        Self { expected }
    }

    /// A gauge that never parallelizes.
    #[inline]
    #[must_use]
    pub const fn sequential() -> Self {
        Self { expected: 0 }
    }

    /// Expected share of elements per subtree at `depth`.
    #[inline]
    fn expected_per_subtree(self, depth: usize) -> usize {
        self.expected >> (depth * CHUNK_BITS).min(usize::BITS as usize - 1)
    }

    pub(crate) fn driver_at(self, depth: usize) -> Driver {
        if self.expected_per_subtree(depth) >= PARALLEL_THRESHOLD {
            Driver::promoted()
        } else {
            Driver::Sequential
        }
    }
}

/// Evaluation strategy for the child slots of one branch level.
#[derive(Clone, Copy)]
pub(crate) enum Driver {
    Sequential,
    #[cfg(feature = "rayon")]
    WorkerPool,
}

impl Driver {
    /// The driver used once the gauge clears the threshold: the worker
    /// pool when available, sequential otherwise.
    #[cfg(feature = "rayon")]
    const fn promoted() -> Self {
        Self::WorkerPool
    }

    /// The driver used once the gauge clears the threshold: the worker
    /// pool when available, sequential otherwise.
    #[cfg(not(feature = "rayon"))]
    const fn promoted() -> Self {
        Self::Sequential
    }

    /// Runs `body` for every slot index, collecting the per-slot
    /// results and the sum of the per-slot match counts.
    #[cfg(feature = "rayon")]
    pub(crate) fn fan_out<R, F>(self, body: F) -> (Vec<R>, usize)
    where
        R: Send,
        F: Fn(usize) -> (R, usize) + Send + Sync,
    {
        match self {
            Self::Sequential => fan_out_sequential(body),
            Self::WorkerPool => {
                let (results, matches): (Vec<R>, Vec<usize>) =
                    (0..FANOUT).into_par_iter().map(body).unzip();
                (results, matches.into_iter().sum())
            }
        }
    }

    /// Runs `body` for every slot index, collecting the per-slot
    /// results and the sum of the per-slot match counts.
    #[cfg(not(feature = "rayon"))]
    pub(crate) fn fan_out<R, F>(self, body: F) -> (Vec<R>, usize)
    where
        F: Fn(usize) -> (R, usize),
    {
        fan_out_sequential(body)
    }

    /// Evaluates `body` over every slot index as a short-circuiting
    /// conjunction.
    #[cfg(feature = "rayon")]
    pub(crate) fn fan_all<F>(self, body: F) -> bool
    where
        F: Fn(usize) -> bool + Send + Sync,
    {
        match self {
            Self::Sequential => (0..FANOUT).all(body),
            Self::WorkerPool => (0..FANOUT).into_par_iter().all(body),
        }
    }

    /// Evaluates `body` over every slot index as a short-circuiting
    /// conjunction.
    #[cfg(not(feature = "rayon"))]
    pub(crate) fn fan_all<F>(self, body: F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        (0..FANOUT).all(body)
    }
}

fn fan_out_sequential<R, F>(body: F) -> (Vec<R>, usize)
where
    F: Fn(usize) -> (R, usize),
{
    let mut matches = 0;
    let results = (0..FANOUT)
        .map(|index| {
            let (result, slot_matches) = body(index);
            matches += slot_matches;
            result
        })
        .collect();
    (results, matches)
}

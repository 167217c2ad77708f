//! Argument bundles threaded through trie operations.
//!
//! The engine never hashes or compares elements itself: every operation
//! receives an [`EqArgs`] (equality + hashing + parallelism gauge) or a
//! [`CombineArgs`] (the same plus a merge function). Bundles are plain
//! `Copy` values built from function pointers, so they move freely into
//! worker-pool closures.
//!
//! Asymmetric operations sometimes swap their operands for efficiency
//! (for example, intersecting starting from the smaller tree). The
//! bundles carry a flip flag so that equality and merging still observe
//! the operands in their original orientation.

use super::parallel::Gauge;

/// Chooses the surviving element when two elements compare equal.
///
/// The two canonical policies keep one side untouched; [`Merge::With`]
/// accepts an arbitrary combining function.
pub enum Merge<V> {
    /// Keep the left operand.
    UseLeft,
    /// Keep the right operand.
    UseRight,
    /// Combine both operands into the survivor.
    With(fn(V, V) -> V),
}

impl<V> Merge<V> {
    #[inline]
    fn resolve(self, left: V, right: V) -> V {
        match self {
            Self::UseLeft => left,
            Self::UseRight => right,
            Self::With(function) => function(left, right),
        }
    }
}

impl<V> Clone for Merge<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Merge<V> {}

/// Equality, hashing, and parallelism context for a single operation.
pub struct EqArgs<V> {
    gauge: Gauge,
    eq: fn(&V, &V) -> bool,
    hash: fn(&V) -> u64,
    flipped: bool,
}

impl<V> EqArgs<V> {
    /// Creates a bundle from an equality predicate and a hash function.
    ///
    /// `gauge` decides per level whether bulk operations fan out onto
    /// the worker pool; use [`Gauge::sequential`] to force sequential
    /// evaluation.
    #[must_use]
    pub fn new(gauge: Gauge, eq: fn(&V, &V) -> bool, hash: fn(&V) -> u64) -> Self {
        Self {
            gauge,
            eq,
            hash,
            flipped: false,
        }
    }

    /// The same bundle with operand orientation reversed.
    #[inline]
    #[must_use]
    pub fn flip(&self) -> Self {
        Self {
            flipped: !self.flipped,
            ..*self
        }
    }

    /// Tests `left` and `right` for equality in original orientation.
    #[inline]
    pub fn eq(&self, left: &V, right: &V) -> bool {
        if self.flipped {
            (self.eq)(right, left)
        } else {
            (self.eq)(left, right)
        }
    }

    /// Hashes an element with the injected hash function.
    #[inline]
    pub fn hash_of(&self, element: &V) -> u64 {
        (self.hash)(element)
    }

    /// The parallelism gauge for this operation.
    #[inline]
    #[must_use]
    pub const fn gauge(&self) -> Gauge {
        self.gauge
    }
}

impl<V> Clone for EqArgs<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for EqArgs<V> {}

/// [`EqArgs`] extended with a merge policy, for operations that can
/// unify a pair of equal elements (insertion, union, bulk building).
pub struct CombineArgs<V> {
    eq_args: EqArgs<V>,
    merge: Merge<V>,
    flipped: bool,
}

impl<V> CombineArgs<V> {
    /// Creates a bundle from equality arguments and a merge policy.
    #[must_use]
    pub const fn new(eq_args: EqArgs<V>, merge: Merge<V>) -> Self {
        Self {
            eq_args,
            merge,
            flipped: false,
        }
    }

    /// The same bundle with operand orientation reversed.
    #[inline]
    #[must_use]
    pub fn flip(&self) -> Self {
        Self {
            eq_args: self.eq_args.flip(),
            merge: self.merge,
            flipped: !self.flipped,
        }
    }

    /// The embedded equality arguments.
    #[inline]
    #[must_use]
    pub const fn eq_args(&self) -> &EqArgs<V> {
        &self.eq_args
    }

    /// Merges a pair of equal elements in original orientation.
    #[inline]
    pub fn merge(&self, left: V, right: V) -> V {
        if self.flipped {
            self.merge.resolve(right, left)
        } else {
            self.merge.resolve(left, right)
        }
    }

    /// True when merging returns the already-stored element untouched,
    /// which lets insertion return the existing node unchanged and
    /// preserve sharing.
    #[inline]
    #[must_use]
    pub const fn keeps_existing(&self) -> bool {
        matches!(
            (&self.merge, self.flipped),
            (Merge::UseLeft, false) | (Merge::UseRight, true)
        )
    }
}

impl<V> Clone for CombineArgs<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for CombineArgs<V> {}

/// Element predicate used by filtering.
#[cfg(feature = "rayon")]
pub type Predicate<V> = dyn Fn(&V) -> bool + Sync;

/// Element predicate used by filtering.
#[cfg(not(feature = "rayon"))]
pub type Predicate<V> = dyn Fn(&V) -> bool;

/// Element transformer used by mapping.
#[cfg(feature = "rayon")]
pub type TransformFn<V> = dyn Fn(&V) -> V + Sync;

/// Element transformer used by mapping.
#[cfg(not(feature = "rayon"))]
pub type TransformFn<V> = dyn Fn(&V) -> V;

/// Variadic reducer folding a batch of values into one.
#[cfg(feature = "rayon")]
pub type Reducer<V> = dyn Fn(&[V]) -> V + Sync;

/// Variadic reducer folding a batch of values into one.
#[cfg(not(feature = "rayon"))]
pub type Reducer<V> = dyn Fn(&[V]) -> V;

/// Strict ordering predicate used by ordered iteration.
pub type LessFn<V> = dyn Fn(&V, &V) -> bool;

//! Ordering strategies for the persistent search trees.
//!
//! A tree type carries its ordering in its type parameter rather than in a
//! stored closure: every strategy is a zero-sized type implementing
//! [`Comparator`]. This keeps tree values as small as a single pointer and
//! guarantees that two trees of the same type always agree on the order.
//!
//! # Examples
//!
//! ```rust
//! use pst::compare::{Comparator, Natural, Reversed};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural::compare(&1, &2), Ordering::Less);
//! assert_eq!(<Reversed>::compare(&1, &2), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

/// A total order over `T`.
///
/// Implementations must be consistent for the lifetime of any tree using them
/// (irreflexive, transitive, asymmetric). Trees cannot detect an inconsistent
/// comparator; the resulting behavior is unspecified but memory safe.
pub trait Comparator<T: ?Sized> {
    /// Compares `lhs` with `rhs`.
    fn compare(lhs: &T, rhs: &T) -> Ordering;
}

/// The key's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// The opposite order of `C`.
///
/// ```rust
/// use pst::compare::Reversed;
/// use pst::persistent::PersistentTreeSet;
///
/// let set: PersistentTreeSet<i32, Reversed> = [1, 3, 2].into_iter().collect();
/// let ordered: Vec<&i32> = set.iter().collect();
/// assert_eq!(ordered, vec![&3, &2, &1]);
/// ```
pub struct Reversed<C = Natural>(PhantomData<fn() -> C>);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(lhs: &T, rhs: &T) -> Ordering {
        C::compare(rhs, lhs)
    }
}

/// Orders `(K, V)` pairs by their first component under `C`.
///
/// This is the comparator behind
/// [`PersistentTreeMap`](crate::persistent::PersistentTreeMap): two entries
/// with equal keys are duplicates regardless of their values.
pub struct ByFirst<C = Natural>(PhantomData<fn() -> C>);

impl<K, V, C: Comparator<K>> Comparator<(K, V)> for ByFirst<C> {
    #[inline]
    fn compare(lhs: &(K, V), rhs: &(K, V)) -> Ordering {
        C::compare(&lhs.0, &rhs.0)
    }
}

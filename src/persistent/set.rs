//! Persistent (immutable) ordered set based on a red-black tree.
//!
//! This module provides [`PersistentTreeSet`], an immutable ordered set that
//! stores its values directly as red-black tree payloads.
//!
//! # Overview
//!
//! - O(log N) member
//! - O(log N) insert
//! - O(log N) erase
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! All operations return new sets without modifying the original, and the
//! new set shares every subtree the edit did not touch.
//!
//! # Examples
//!
//! ```rust
//! use pst::persistent::PersistentTreeSet;
//!
//! let set = PersistentTreeSet::new().insert_all([1, 3, 5, 7, 9]);
//! let filled = set.insert_all([2, 4, 8]).insert(6);
//!
//! assert_eq!(filled.len(), 9);
//! assert!(!filled.erase(&6).member(&6));
//! assert_eq!(set.len(), 5);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::compare::{Comparator, Natural};

use super::tree::{Color, RedBlackTree, TreeIter};

// =============================================================================
// PersistentTreeSet Definition
// =============================================================================

/// A persistent (immutable) ordered set.
///
/// Values are kept in the order given by the comparator `C`; two values that
/// compare equal are the same member.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `member`  | O(log N)   |
/// | `insert`  | O(log N)   |
/// | `erase`   | O(log N)   |
/// | `len`     | O(1)       |
///
/// # Examples
///
/// ```rust
/// use pst::persistent::PersistentTreeSet;
///
/// let set = PersistentTreeSet::singleton(42);
/// assert!(set.member(&42));
/// ```
pub struct PersistentTreeSet<T, C = Natural> {
    tree: RedBlackTree<T, C>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T: Clone + Ord> PersistentTreeSet<T> {
    /// Creates an empty set ordered by [`Natural`].
    ///
    /// Sets with another comparator start from [`Default::default`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set: PersistentTreeSet<i32> = PersistentTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
            length: 0,
        }
    }

    /// Creates a set containing a single value.
    #[inline]
    #[must_use]
    pub fn singleton(value: T) -> Self {
        Self::new().insert(value)
    }
}

impl<T, C> PersistentTreeSet<T, C> {
    /// Returns the number of values in the set.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set contains no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the smallest value.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.tree.find_min()
    }

    /// Returns the largest value.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.tree.find_max()
    }

    /// Returns an iterator over the values in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set: PersistentTreeSet<i32> = [3, 1, 2].into_iter().collect();
    /// let collected: Vec<&i32> = set.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentTreeSetIterator<'_, T> {
        PersistentTreeSetIterator {
            inner: self.tree.iter(),
            remaining: self.length,
        }
    }

    /// Returns the red-black tree backing the set.
    #[inline]
    #[must_use]
    pub const fn as_tree(&self) -> &RedBlackTree<T, C> {
        &self.tree
    }

    /// Returns the stored value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set: PersistentTreeSet<String> = ["apple".to_string()].into_iter().collect();
    /// assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    /// assert_eq!(set.get("pear"), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree
            .find_by(|stored| C::compare(value, stored.borrow()))
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set: PersistentTreeSet<i32> = [1, 3, 5].into_iter().collect();
    /// assert!(set.member(&3));
    /// assert!(!set.member(&4));
    /// ```
    pub fn member<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.get(value).is_some()
    }

    /// Alias for [`member`](Self::member).
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.member(value)
    }
}

impl<T: Clone, C: Comparator<T>> PersistentTreeSet<T, C> {
    /// Returns a set that also contains `value`.
    ///
    /// If an equal value is already present it is replaced by `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set = PersistentTreeSet::new().insert(2).insert(1);
    /// let larger = set.insert(3);
    ///
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(larger.len(), 3);
    /// ```
    #[must_use]
    pub fn insert(&self, value: T) -> Self {
        let (tree, added) = self.tree.upsert(value);
        Self {
            tree,
            length: self.length + usize::from(added),
        }
    }

    /// Inserts every value of `values` in turn.
    #[must_use]
    pub fn insert_all<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(self.clone(), |set, value| set.insert(value))
    }

    /// Returns a set without `value`.
    ///
    /// Erasing an absent value returns a set sharing all of its structure
    /// with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentTreeSet;
    ///
    /// let set: PersistentTreeSet<i32> = [1, 2, 3].into_iter().collect();
    /// let smaller = set.erase(&2);
    ///
    /// assert!(!smaller.member(&2));
    /// assert!(set.member(&2));
    /// assert_eq!(set.erase(&7), set);
    /// ```
    #[must_use]
    pub fn erase<Q>(&self, value: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree
            .try_erase_by(|stored| C::compare(value, stored.borrow()))
            .map_or_else(
                || self.clone(),
                |tree| Self {
                    tree,
                    length: self.length - 1,
                },
            )
    }

    /// Erases every value of `values` in turn.
    #[must_use]
    pub fn erase_all<'a, I, Q>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: ?Sized + 'a,
        C: Comparator<Q>,
    {
        values
            .into_iter()
            .fold(self.clone(), |set, value| set.erase(value))
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to values of a [`PersistentTreeSet`].
pub struct PersistentTreeSetIterator<'a, T> {
    inner: TreeIter<'a, T, Color>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentTreeSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentTreeSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over values of a [`PersistentTreeSet`].
pub struct PersistentTreeSetIntoIterator<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> Iterator for PersistentTreeSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentTreeSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.values.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C> Clone for PersistentTreeSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            length: self.length,
        }
    }
}

impl<T, C> Default for PersistentTreeSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self {
            tree: RedBlackTree::default(),
            length: 0,
        }
    }
}

impl<T: Clone, C: Comparator<T>> FromIterator<T> for PersistentTreeSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::default().insert_all(iter)
    }
}

impl<T: Clone, C> IntoIterator for PersistentTreeSet<T, C> {
    type Item = T;
    type IntoIter = PersistentTreeSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let values: Vec<T> = self.iter().cloned().collect();
        PersistentTreeSetIntoIterator {
            values: values.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a PersistentTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = PersistentTreeSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for PersistentTreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<T: Eq, C> Eq for PersistentTreeSet<T, C> {}

/// Hashes the length, then every value in order.
impl<T: Hash, C> Hash for PersistentTreeSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PersistentTreeSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for PersistentTreeSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for value in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a, C> rayon::iter::IntoParallelIterator for &'a PersistentTreeSet<T, C> {
    type Iter = rayon::vec::IntoIter<&'a T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        let values: Vec<&'a T> = self.iter().collect();
        rayon::iter::IntoParallelIterator::into_par_iter(values)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for PersistentTreeSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            sequence.serialize_element(value)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentTreeSetVisitor<T, C> {
    marker: std::marker::PhantomData<fn() -> (T, C)>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for PersistentTreeSetVisitor<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Comparator<T>,
{
    type Value = PersistentTreeSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = PersistentTreeSet::default();
        while let Some(value) = access.next_element()? {
            set = set.insert(value);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for PersistentTreeSet<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Comparator<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentTreeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reversed;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_set() {
        let set: PersistentTreeSet<i32> = PersistentTreeSet::new();
        assert_eq!(format!("{set}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let set: PersistentTreeSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{set}"), "{1, 2, 3}");
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    }

    // =========================================================================
    // Operation Tests
    // =========================================================================

    #[rstest]
    fn test_new_creates_empty() {
        let set: PersistentTreeSet<i32> = PersistentTreeSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.min(), None);
    }

    #[rstest]
    fn test_insert_duplicate_keeps_length() {
        let set = PersistentTreeSet::singleton(1);
        let same = set.insert(1);
        assert_eq!(same.len(), 1);
        assert_eq!(same, set);
    }

    #[rstest]
    fn test_erase_absent_keeps_structure() {
        let set: PersistentTreeSet<i32> = (1..=5).collect();
        let erased = set.erase(&9);
        assert_eq!(erased.len(), 5);
        assert_eq!(erased.as_tree().as_tree(), set.as_tree().as_tree());
    }

    #[rstest]
    fn test_min_and_max() {
        let set: PersistentTreeSet<i32> = [4, 8, 2, 6].into_iter().collect();
        assert_eq!(set.min(), Some(&2));
        assert_eq!(set.max(), Some(&8));
    }

    #[rstest]
    fn test_borrowed_lookup() {
        let set: PersistentTreeSet<String> =
            ["b", "a"].into_iter().map(String::from).collect();
        assert!(set.contains("a"));
        assert_eq!(set.erase("a").len(), 1);
    }

    #[rstest]
    fn test_reversed_comparator() {
        let set: PersistentTreeSet<i32, Reversed> = (1..=4).collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert_eq!(set.min(), Some(&4));
        assert!(set.member(&2));
    }

    #[rstest]
    fn test_iterator_is_exact_size() {
        let set: PersistentTreeSet<i32> = (0..10).collect();
        let mut iterator = set.iter();
        assert_eq!(iterator.len(), 10);
        iterator.next();
        assert_eq!(iterator.len(), 9);
    }

    #[rstest]
    fn test_into_iter_owns_values() {
        let set: PersistentTreeSet<String> =
            ["y", "x"].into_iter().map(String::from).collect();
        let values: Vec<String> = set.into_iter().collect();
        assert_eq!(values, vec!["x".to_string(), "y".to_string()]);
    }

    #[rstest]
    fn test_equal_sets_hash_equal() {
        use std::collections::hash_map::DefaultHasher;

        let first: PersistentTreeSet<i32> = [1, 2, 3].into_iter().collect();
        let second: PersistentTreeSet<i32> = [3, 2, 1].into_iter().collect();
        let hash = |set: &PersistentTreeSet<i32>| {
            let mut hasher = DefaultHasher::new();
            set.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(first, second);
        assert_eq!(hash(&first), hash(&second));
    }
}

//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable singly-linked list
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentList` is a cons-list. It provides:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head access
//! - O(1) tail access
//! - O(n) index access and `update`
//! - O(n) append and reverse
//!
//! All operations return new lists without modifying the original,
//! and structural sharing ensures memory efficiency.
//!
//! # Examples
//!
//! ```rust
//! use pst::persistent::PersistentList;
//!
//! // Build a list using cons
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list with prepended element
//!
//! // Build from an iterator
//! let list: PersistentList<i32> = (1..=5).collect();
//! assert_eq!(list.iter().sum::<i32>(), 15);
//! ```
//!
//! # Structural Sharing
//!
//! When you create a new list by prepending an element with `cons`, the new
//! list shares all nodes with the original list:
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! `update` and `append` copy only the cells in front of the edit; the rest
//! of the spine is shared.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;

/// Internal node structure for the persistent list.
struct Node<T> {
    element: T,
    next: Option<ReferenceCounter<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `get`     | O(n)       |
/// | `update`  | O(n)       |
/// | `append`  | O(n)       |
/// | `reverse` | O(n)       |
///
/// # Examples
///
/// ```rust
/// use pst::persistent::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
pub struct PersistentList<T> {
    head: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Conses `elements` in reverse onto `tail`, so the first element of
    /// `elements` ends up at the front.
    fn prepend_vec(mut elements: Vec<T>, tail: Self) -> Self {
        let mut length = tail.length;
        let mut head = tail.into_head();
        while let Some(element) = elements.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
            length += 1;
        }
        Self { head, length }
    }

    fn into_head(mut self) -> Option<ReferenceCounter<Node<T>>> {
        self.head.take()
    }

    /// Prepends an element to the front of the list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    ///
    /// let empty: PersistentList<i32> = PersistentList::new();
    /// assert_eq!(empty.head(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element.
    ///
    /// The tail of an empty list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail();
    /// assert_eq!(tail.head(), Some(&2));
    /// assert_eq!(tail.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Decomposes the list into its head and tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// if let Some((head, tail)) = list.uncons() {
    ///     assert_eq!(*head, 1);
    ///     assert_eq!(tail.head(), Some(&2));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns a reference to the element at the given index.
    ///
    /// # Complexity
    ///
    /// O(n) where n = index
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.get(0), Some(&1));
    /// assert_eq!(list.get(2), Some(&3));
    /// assert_eq!(list.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_deref(),
            remaining: self.length,
        }
    }

    /// Returns every suffix of the list, longest first, ending with the
    /// empty list.
    ///
    /// Each suffix shares its cells with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// let suffixes: Vec<Vec<i32>> = list
    ///     .suffixes()
    ///     .iter()
    ///     .map(|suffix| suffix.iter().copied().collect())
    ///     .collect();
    ///
    /// assert_eq!(suffixes, vec![vec![1, 2, 3], vec![2, 3], vec![3], vec![]]);
    /// ```
    #[must_use]
    pub fn suffixes(&self) -> PersistentList<Self> {
        let mut suffixes = Vec::with_capacity(self.length + 1);
        let mut current = self.clone();
        while !current.is_empty() {
            let tail = current.tail();
            suffixes.push(current);
            current = tail;
        }
        suffixes.push(current);
        PersistentList::prepend_vec(suffixes, PersistentList::new())
    }
}

impl<T: Clone> PersistentList<T> {
    /// Appends another list to this list.
    ///
    /// The cells of `self` are copied; `other` is shared as the tail of the
    /// result.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list1 = PersistentList::new().cons(2).cons(1);
    /// let list2 = PersistentList::new().cons(4).cons(3);
    /// let combined = list1.append(&list2);
    ///
    /// let collected: Vec<&i32> = combined.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::prepend_vec(self.iter().cloned().collect(), other.clone())
    }

    /// Returns a list with the element at `index` replaced by `value`.
    ///
    /// Returns `None` when `index` is out of range. Cells after `index` are
    /// shared with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let updated = list.update(2, 4711).unwrap();
    ///
    /// assert_eq!(updated.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4711, 4]);
    /// assert_eq!(list.get(2), Some(&3));
    /// assert!(list.update(4, 0).is_none());
    /// ```
    #[must_use]
    pub fn update(&self, index: usize, value: T) -> Option<Self> {
        if index >= self.length {
            return None;
        }
        let mut prefix = Vec::with_capacity(index);
        let mut current = self.head.as_ref();
        for _ in 0..index {
            let node = current?;
            prefix.push(node.element.clone());
            current = node.next.as_ref();
        }
        let replaced = current?;
        let rest = Self {
            head: Some(ReferenceCounter::new(Node {
                element: value,
                next: replaced.next.clone(),
            })),
            length: self.length - index,
        };
        Some(Self::prepend_vec(prefix, rest))
    }

    /// Reverses the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let reversed = list.reverse();
    ///
    /// let collected: Vec<&i32> = reversed.iter().collect();
    /// assert_eq!(collected, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.iter()
            .fold(Self::new(), |reversed, element| reversed.cons(element.clone()))
    }
}

// =============================================================================
// Drop Implementation
// =============================================================================

impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            self.remaining = self.remaining.saturating_sub(1);
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = self.list.uncons()?;
        let element = head.clone();
        self.list = tail;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {
    fn len(&self) -> usize {
        self.list.length
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentList<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::prepend_vec(iter.into_iter().collect(), Self::new())
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

/// Computes a hash value for this list.
///
/// The length is hashed first, then each element in order.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::PersistentList;
/// use std::collections::HashMap;
///
/// let mut map: HashMap<PersistentList<i32>, &str> = HashMap::new();
/// let key: PersistentList<i32> = (1..=3).collect();
/// map.insert(key.clone(), "value");
/// assert_eq!(map.get(&key), Some(&"value"));
/// ```
impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a> rayon::iter::IntoParallelIterator for &'a PersistentList<T> {
    type Iter = rayon::vec::IntoIter<&'a T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        let elements: Vec<&'a T> = self.iter().collect();
        rayon::iter::IntoParallelIterator::into_par_iter(elements)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentListVisitor<T> {
    marker: std::marker::PhantomData<fn() -> T>,
}

#[cfg(feature = "serde")]
impl<T> PersistentListVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::de::Visitor<'de> for PersistentListVisitor<T> {
    type Value = PersistentList<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentList::prepend_vec(elements, PersistentList::new()))
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for PersistentList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentListVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_list() {
        let list: PersistentList<i32> = PersistentList::new();
        assert_eq!(format!("{list}"), "[]");
    }

    #[rstest]
    fn test_display_single_element_list() {
        let list = PersistentList::singleton(42);
        assert_eq!(format!("{list}"), "[42]");
    }

    #[rstest]
    fn test_display_multiple_elements_list() {
        let list: PersistentList<i32> = (1..=3).collect();
        assert_eq!(format!("{list}"), "[1, 2, 3]");
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    // =========================================================================
    // Operation Tests
    // =========================================================================

    #[rstest]
    fn test_new_creates_empty() {
        let list: PersistentList<i32> = PersistentList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert!(list.tail().is_empty());
        assert!(list.uncons().is_none());
    }

    #[rstest]
    fn test_cons_shares_tail() {
        let list = PersistentList::new().cons(1).cons(2);
        let extended = list.cons(3);
        let (head, tail) = extended.uncons().unwrap();
        assert_eq!(*head, 3);
        assert!(ReferenceCounter::ptr_eq(
            tail.head.as_ref().unwrap(),
            list.head.as_ref().unwrap()
        ));
    }

    #[rstest]
    #[case(0, vec![9, 2, 3])]
    #[case(1, vec![1, 9, 3])]
    #[case(2, vec![1, 2, 9])]
    fn test_update_in_range(#[case] index: usize, #[case] expected: Vec<i32>) {
        let list: PersistentList<i32> = (1..=3).collect();
        let updated = list.update(index, 9).unwrap();
        assert_eq!(updated.iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(updated.len(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_update_out_of_range() {
        let list: PersistentList<i32> = (1..=3).collect();
        assert!(list.update(3, 9).is_none());
        assert!(PersistentList::<i32>::new().update(0, 9).is_none());
    }

    #[rstest]
    fn test_update_shares_cells_after_index() {
        let list: PersistentList<i32> = (1..=4).collect();
        let updated = list.update(1, 20).unwrap();
        let original_rest = list.tail().tail();
        let updated_rest = updated.tail().tail();
        assert!(ReferenceCounter::ptr_eq(
            original_rest.head.as_ref().unwrap(),
            updated_rest.head.as_ref().unwrap()
        ));
    }

    #[rstest]
    fn test_append_then_update_then_suffixes() {
        let list: PersistentList<i32> = (1..=3).collect();
        let doubled = list.append(&list);
        assert_eq!(format!("{doubled}"), "[1, 2, 3, 1, 2, 3]");

        let updated = doubled.update(2, 4711).unwrap();
        assert_eq!(format!("{updated}"), "[1, 2, 4711, 1, 2, 3]");

        let suffixes = doubled.suffixes();
        assert_eq!(suffixes.len(), 7);
        assert_eq!(suffixes.head(), Some(&doubled));
        assert_eq!(suffixes.get(6).map(PersistentList::len), Some(0));
    }

    #[rstest]
    fn test_suffixes_of_empty() {
        let empty: PersistentList<i32> = PersistentList::new();
        let suffixes = empty.suffixes();
        assert_eq!(suffixes.len(), 1);
        assert_eq!(suffixes.head().map(PersistentList::is_empty), Some(true));
    }

    #[rstest]
    fn test_reverse() {
        let list: PersistentList<i32> = (1..=4).collect();
        assert_eq!(
            list.reverse().into_iter().collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
    }

    #[rstest]
    fn test_iterator_is_exact_size() {
        let list: PersistentList<i32> = (1..=5).collect();
        let mut iterator = list.iter();
        iterator.next();
        assert_eq!(iterator.len(), 4);
    }

    #[rstest]
    fn test_drop_long_list() {
        let list: PersistentList<u32> = (0..200_000).collect();
        let shared = list.tail();
        drop(list);
        assert_eq!(shared.len(), 199_999);
    }
}

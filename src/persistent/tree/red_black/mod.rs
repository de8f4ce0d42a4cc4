//! Persistent red-black tree.
//!
//! [`RedBlackTree`] stores a [`Color`] in every node of the [`Tree`]
//! substrate and keeps the classic invariants:
//!
//! 1. The root is black
//! 2. A red node has no red child
//! 3. Every path from a node to an empty subtree crosses the same number of
//!    black nodes (its *black height*)
//!
//! which bound the depth by twice the black height, and so by
//! 2 × log2(n + 1).
//!
//! Nothing is repaired in place. Insertion returns a shape tag (the colors of
//! the rebuilt subtree's root and its two children) from each recursive call,
//! so every ancestor resolves a red-red conflict from its child's tag while
//! rebuilding the path. Deletion returns whether the rebuilt subtree lost a
//! black level and the ancestors absorb that deficiency on the way up. All
//! rotations rebuild new nodes that share the untouched subtrees.
//!
//! # Examples
//!
//! ```rust
//! use pst::persistent::tree::RedBlackTree;
//!
//! let tree: RedBlackTree<i32> = (1..=7).collect();
//! assert_eq!(tree.size(), 7);
//! assert_eq!(tree.black_height(), 2);
//! assert!(tree.depth() <= 2 * tree.black_height());
//!
//! let smaller = tree.erase(&4);
//! assert_eq!(smaller.find(&4), None);
//! assert_eq!(tree.find(&4), Some(&4));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::trace;

use super::{Node, Tree, TreeIter};
use crate::compare::{Comparator, Natural};

mod erase;
mod insert;
mod side;

use erase::{Delta, Erased};
use insert::Inserted;

// =============================================================================
// Color and Shape
// =============================================================================

/// The color of a red-black tree node.
///
/// Empty subtrees count as [`Color::Black`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node; its children are black.
    Red,
    /// A black node; contributes one to the black height.
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` for [`Color::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Colors of a subtree's root and of its two children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shape {
    top: Color,
    left: Color,
    right: Color,
}

impl Shape {
    /// A freshly inserted red node with two empty children.
    const RED_LEAF: Self = Self {
        top: Color::Red,
        left: Color::Black,
        right: Color::Black,
    };

    fn of<T>(node: &Node<T, Color>) -> Self {
        Self {
            top: node.aux,
            left: node.left.color(),
            right: node.right.color(),
        }
    }

    /// A red root with a red child: the conflict the parent has to resolve.
    const fn is_red_red(self) -> bool {
        self.top.is_red() && (self.left.is_red() || self.right.is_red())
    }
}

impl<T> Tree<T, Color> {
    /// Returns the color of the root; empty trees are black.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.node().map_or(Color::Black, |node| node.aux)
    }
}

impl<T: Clone> Tree<T, Color> {
    /// Returns this tree with its root painted `color`, sharing the root when
    /// it already has that color.
    fn recolored(&self, color: Color) -> Self {
        match self.node() {
            Some(node) if node.aux != color => node.with_aux(color),
            _ => self.clone(),
        }
    }
}

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// A persistent red-black tree ordered by `C`.
///
/// Every edit returns a new tree; `self` is never modified and keeps sharing
/// all subtrees the edit did not touch.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::RedBlackTree;
///
/// let empty = RedBlackTree::new();
/// let tree = empty.insert("b").insert("a").insert("c");
///
/// assert!(empty.is_empty());
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
/// assert_eq!(tree.black_height(), 1);
/// ```
pub struct RedBlackTree<T, C = Natural> {
    tree: Tree<T, Color>,
    ordering: PhantomData<fn() -> C>,
}

impl<T> RedBlackTree<T> {
    /// Creates an empty tree ordered by [`Natural`].
    ///
    /// Trees with another comparator start from [`Default::default`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_tree(Tree::new())
    }
}

impl<T, C> RedBlackTree<T, C> {
    const fn from_tree(tree: Tree<T, Color>) -> Self {
        Self {
            tree,
            ordering: PhantomData,
        }
    }

    /// Returns `true` if the tree holds no payloads.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Counts the payloads.
    ///
    /// # Complexity
    ///
    /// O(n); the containers built on this tree cache their length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Returns the length of the longest root-to-empty path. O(n).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Returns the number of black nodes on every root-to-empty path.
    ///
    /// Reads the leftmost path only, so it is O(log n).
    #[must_use]
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.tree.node();
        while let Some(node) = current {
            height += usize::from(node.aux.is_black());
            current = node.left.node();
        }
        height
    }

    /// Returns the smallest payload.
    #[must_use]
    pub fn find_min(&self) -> Option<&T> {
        self.tree.find_min()
    }

    /// Returns the largest payload.
    #[must_use]
    pub fn find_max(&self) -> Option<&T> {
        self.tree.find_max()
    }

    /// Searches with a probe returning the ordering of the sought key
    /// relative to a stored payload.
    ///
    /// The probe must agree with `C`.
    pub fn find_by<F>(&self, probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.tree.find_by(probe)
    }

    /// Returns an in-order iterator over the payloads.
    #[must_use]
    pub fn iter(&self) -> TreeIter<'_, T, Color> {
        self.tree.iter()
    }

    /// Returns the underlying tree skeleton.
    #[inline]
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<T, Color> {
        &self.tree
    }
}

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
    /// Looks up the payload that compares equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find(&self, key: &T) -> Option<&T> {
        self.tree.find_by(|payload| C::compare(key, payload))
    }

    /// Verifies every red-black invariant and the ordering under `C`, and
    /// returns the black height.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`](super::InvariantViolation)
    /// found. Violations are also logged at `warn` level.
    #[cfg(feature = "sanity")]
    pub fn check(&self) -> Result<usize, super::InvariantViolation> {
        super::sanity::check_red_black::<T, C>(&self.tree).inspect_err(|violation| {
            log::warn!("red-black tree invariant violated: {violation}");
        })
    }

    /// Returns `true` if [`check`](Self::check) succeeds.
    #[cfg(feature = "sanity")]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

impl<T: Clone, C: Comparator<T>> RedBlackTree<T, C> {
    /// Returns a tree that also contains `payload`.
    ///
    /// A payload that compares equal to a stored one replaces it; the tree
    /// keeps its shape and colors.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = (0..100).collect();
    /// let larger = tree.insert(100);
    ///
    /// assert_eq!(tree.size(), 100);
    /// assert_eq!(larger.size(), 101);
    /// assert!(larger.depth() <= 2 * larger.black_height());
    /// ```
    #[must_use]
    pub fn insert(&self, payload: T) -> Self {
        self.upsert(payload).0
    }

    /// Inserts `payload` and reports whether it was new (`true`) or replaced
    /// an equal payload (`false`).
    #[must_use]
    pub fn upsert(&self, payload: T) -> (Self, bool) {
        let Inserted { shape, tree, added } = insert::insert::<T, C>(&self.tree, payload);
        if shape.top.is_red() {
            trace!("red-black insert grew the black height to {}", self.black_height() + 1);
        }
        (Self::from_tree(tree.recolored(Color::Black)), added)
    }

    /// Returns a tree without the payload that compares equal to `key`.
    ///
    /// Erasing an absent key returns a tree sharing the root with `self`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn erase(&self, key: &T) -> Self {
        self.erase_by(|payload| C::compare(key, payload))
    }
}

impl<T: Clone, C> RedBlackTree<T, C> {
    /// Erases the payload the probe reports as `Equal`.
    ///
    /// The probe must agree with `C`. Returns `self` unchanged when nothing
    /// matches.
    #[must_use]
    pub fn erase_by<F>(&self, probe: F) -> Self
    where
        F: FnMut(&T) -> Ordering,
    {
        self.try_erase_by(probe).unwrap_or_else(|| self.clone())
    }

    /// Erases the payload the probe reports as `Equal`, or returns `None`
    /// when nothing matches.
    #[must_use]
    pub fn try_erase_by<F>(&self, mut probe: F) -> Option<Self>
    where
        F: FnMut(&T) -> Ordering,
    {
        let Erased { delta, tree } = erase::erase_from(&self.tree, &mut probe)?;
        if delta == Delta::Shortened {
            trace!(
                "red-black erase shrank the black height to {}",
                self.black_height().saturating_sub(1)
            );
        }
        Some(Self::from_tree(tree.recolored(Color::Black)))
    }
}

impl<T, C> Clone for RedBlackTree<T, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_tree(self.tree.clone())
    }
}

impl<T, C> Default for RedBlackTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::from_tree(Tree::new())
    }
}

impl<T: Clone, C: Comparator<T>> FromIterator<T> for RedBlackTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |tree, payload| tree.insert(payload))
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C> {
    type Item = &'a T;
    type IntoIter = TreeIter<'a, T, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RedBlackTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{ByFirst, Reversed};
    use rstest::rstest;

    fn collect<C>(tree: &RedBlackTree<i32, C>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    /// Pre-order colors, `None` for empty subtrees.
    fn colors<T>(tree: &Tree<T, Color>) -> Vec<Option<Color>> {
        let Some(node) = tree.node() else {
            return vec![None];
        };
        let mut colors = vec![Some(node.aux)];
        colors.extend(self::colors(&node.left));
        colors.extend(self::colors(&node.right));
        colors
    }

    #[rstest]
    fn test_new_is_empty() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.black_height(), 0);
        assert_eq!(tree.as_tree().color(), Color::Black);
    }

    #[rstest]
    fn test_first_insert_is_black_root() {
        let tree = RedBlackTree::new().insert(1);
        assert_eq!(tree.as_tree().color(), Color::Black);
        assert_eq!(tree.black_height(), 1);
    }

    #[rstest]
    #[case::ascending((1..=64).collect())]
    #[case::descending((1..=64).rev().collect())]
    #[case::zigzag(vec![1, 64, 2, 63, 3, 62, 4, 61, 5, 60, 6, 59])]
    fn test_insert_keeps_balance(#[case] keys: Vec<i32>) {
        let tree: RedBlackTree<i32> = keys.iter().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(collect(&tree), sorted);
        assert!(tree.depth() <= 2 * tree.black_height());
        #[cfg(feature = "sanity")]
        assert!(tree.is_valid());
    }

    #[rstest]
    fn test_ascending_insert_stays_shallow() {
        let tree: RedBlackTree<i32> = (0..1023).collect();
        // 2 * log2(1024)
        assert!(tree.depth() <= 20);
    }

    #[rstest]
    fn test_upsert_reports_new_entries() {
        let tree: RedBlackTree<i32> = [1, 2].into_iter().collect();
        let (tree, added) = tree.upsert(3);
        assert!(added);
        let (tree, added) = tree.upsert(2);
        assert!(!added);
        assert_eq!(tree.size(), 3);
    }

    #[rstest]
    fn test_duplicate_insert_replaces_payload_and_keeps_shape() {
        let tree: RedBlackTree<(i32, &str), ByFirst> =
            (0..20).map(|key| (key, "old")).collect();
        for key in 0..20 {
            let replaced = tree.insert((key, "new"));
            assert_eq!(replaced.find(&(key, "")), Some(&(key, "new")));
            assert_eq!(tree.find(&(key, "")), Some(&(key, "old")));
            assert_eq!(replaced.size(), tree.size());
            assert_eq!(replaced.depth(), tree.depth());
            assert_eq!(replaced.black_height(), tree.black_height());
            assert_eq!(colors(replaced.as_tree()), colors(tree.as_tree()));
        }
    }

    #[rstest]
    fn test_insert_shares_untouched_subtree() {
        let tree: RedBlackTree<i32> = (1..=7).collect();
        let larger = tree.insert(8);
        let before = tree.as_tree().node().unwrap();
        let after = larger.as_tree().node().unwrap();
        assert_eq!(before.left(), after.left());
    }

    #[rstest]
    fn test_erase_every_key_in_turn() {
        let tree: RedBlackTree<i32> = (1..=31).collect();
        for key in 1..=31 {
            let erased = tree.erase(&key);
            assert_eq!(erased.size(), 30);
            assert_eq!(erased.find(&key), None);
            assert!(erased.depth() <= 2 * erased.black_height());
            #[cfg(feature = "sanity")]
            assert!(erased.is_valid());
        }
        assert_eq!(tree.size(), 31);
    }

    #[rstest]
    fn test_erase_down_to_empty() {
        let mut tree: RedBlackTree<i32> = (0..50).collect();
        for key in (0..50).step_by(2).chain((1..50).step_by(2)) {
            tree = tree.erase(&key);
            #[cfg(feature = "sanity")]
            assert!(tree.is_valid());
        }
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_erase_absent_returns_same_tree() {
        let tree: RedBlackTree<i32> = (1..=5).collect();
        assert_eq!(tree.erase(&9).as_tree(), tree.as_tree());
        assert!(tree.try_erase_by(|payload| 9.cmp(payload)).is_none());
    }

    #[rstest]
    fn test_erase_by_probe() {
        let tree: RedBlackTree<(i32, char), ByFirst> =
            [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
        let erased = tree.erase_by(|(key, _)| 2.cmp(key));
        assert_eq!(erased.size(), 2);
        assert_eq!(erased.find_by(|(key, _)| 2.cmp(key)), None);
    }

    #[rstest]
    fn test_reversed_order() {
        let tree: RedBlackTree<i32, Reversed> = (1..=5).collect();
        assert_eq!(collect(&tree), vec![5, 4, 3, 2, 1]);
        assert_eq!(tree.find_min(), Some(&5));
        assert_eq!(tree.erase(&3).size(), 4);
    }

    #[rstest]
    fn test_recolored_shares_matching_root() {
        let tree: Tree<i32, Color> = Tree::leaf(1, Color::Black);
        assert_eq!(tree.recolored(Color::Black), tree);
        assert_eq!(tree.recolored(Color::Red).color(), Color::Red);
    }

    #[rstest]
    fn test_debug_lists_payloads() {
        let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{tree:?}"), "[1, 2, 3]");
    }
}

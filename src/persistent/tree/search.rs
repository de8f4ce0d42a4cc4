//! Unbalanced persistent binary search tree.
//!
//! [`SearchTree`] is the minimal ordered tree over the [`Tree`] substrate:
//! insertion and erasure rebuild the path they descend and nothing else. It
//! never rebalances, so its depth depends on the insertion order and is O(n)
//! for sorted input.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use super::{Node, Tree, TreeIter};
use crate::compare::{Comparator, Natural};

/// An unbalanced, persistent binary search tree ordered by `C`.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::SearchTree;
///
/// let tree = SearchTree::new().insert(2).insert(1).insert(3);
/// let smaller = tree.erase(&2);
///
/// assert_eq!(tree.size(), 3);
/// assert_eq!(smaller.find(&2), None);
/// assert_eq!(smaller.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub struct SearchTree<T, C = Natural> {
    tree: Tree<T>,
    ordering: PhantomData<fn() -> C>,
}

impl<T> SearchTree<T> {
    /// Creates an empty tree ordered by [`Natural`].
    ///
    /// Trees with another comparator start from [`Default::default`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_tree(Tree::new())
    }
}

impl<T, C> SearchTree<T, C> {
    const fn from_tree(tree: Tree<T>) -> Self {
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

    /// Counts the payloads. O(n).
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Returns the length of the longest root-to-empty path. O(n).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth()
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

    /// Returns an in-order iterator over the payloads.
    #[must_use]
    pub fn iter(&self) -> TreeIter<'_, T, ()> {
        self.tree.iter()
    }

    /// Returns the underlying tree skeleton.
    #[inline]
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<T> {
        &self.tree
    }
}

impl<T, C: Comparator<T>> SearchTree<T, C> {
    /// Looks up the payload that compares equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn find(&self, key: &T) -> Option<&T> {
        self.tree.find_by(|payload| C::compare(key, payload))
    }

    /// Verifies the ordering invariant and returns the number of payloads.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`](super::InvariantViolation)
    /// found.
    #[cfg(feature = "sanity")]
    pub fn check(&self) -> Result<usize, super::InvariantViolation> {
        super::sanity::check_order::<T, (), C>(&self.tree)
    }

    /// Returns `true` if [`check`](Self::check) succeeds.
    #[cfg(feature = "sanity")]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

impl<T: Clone, C: Comparator<T>> SearchTree<T, C> {
    /// Returns a tree that also contains `payload`.
    ///
    /// A payload that compares equal to a stored one replaces it.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn insert(&self, payload: T) -> Self {
        Self::from_tree(Self::insert_into(&self.tree, payload))
    }

    fn insert_into(tree: &Tree<T>, payload: T) -> Tree<T> {
        let Some(node) = tree.node() else {
            return Tree::leaf(payload, ());
        };
        match C::compare(&payload, &node.payload) {
            Ordering::Less => node.with_left(Self::insert_into(&node.left, payload)),
            Ordering::Greater => node.with_right(Self::insert_into(&node.right, payload)),
            Ordering::Equal => node.with_payload(payload),
        }
    }

    /// Returns a tree without the payload that compares equal to `key`.
    ///
    /// If no such payload exists the result shares the root with `self`.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn erase(&self, key: &T) -> Self {
        Self::erase_from(&self.tree, key).map_or_else(|| self.clone(), Self::from_tree)
    }

    fn erase_from(tree: &Tree<T>, key: &T) -> Option<Tree<T>> {
        let node = tree.node()?;
        match C::compare(key, &node.payload) {
            Ordering::Less => {
                Self::erase_from(&node.left, key).map(|left| node.with_left(left))
            }
            Ordering::Greater => {
                Self::erase_from(&node.right, key).map(|right| node.with_right(right))
            }
            Ordering::Equal => Some(Self::remove(node)),
        }
    }

    /// Removes `node` itself, splicing in its in-order predecessor when it
    /// has two children.
    fn remove(node: &Node<T, ()>) -> Tree<T> {
        if node.right.is_empty() {
            return node.left.clone();
        }
        match node.left.find_max() {
            None => node.right.clone(),
            Some(predecessor) => node.with_payload_and_children(
                predecessor.clone(),
                Self::without_max(&node.left),
                node.right.clone(),
            ),
        }
    }

    fn without_max(tree: &Tree<T>) -> Tree<T> {
        match tree.node() {
            None => Tree::new(),
            Some(node) if node.right.is_empty() => node.left.clone(),
            Some(node) => node.with_right(Self::without_max(&node.right)),
        }
    }
}

impl<T, C> Clone for SearchTree<T, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_tree(self.tree.clone())
    }
}

impl<T, C> Default for SearchTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::from_tree(Tree::new())
    }
}

impl<T: Clone, C: Comparator<T>> FromIterator<T> for SearchTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |tree, payload| tree.insert(payload))
    }
}

impl<'a, T, C> IntoIterator for &'a SearchTree<T, C> {
    type Item = &'a T;
    type IntoIter = TreeIter<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SearchTree<T, C> {
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

    fn collect<C>(tree: &SearchTree<i32, C>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[rstest]
    fn test_new_is_empty() {
        let tree: SearchTree<i32> = SearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.find(&1), None);
    }

    #[rstest]
    fn test_insert_keeps_order() {
        let tree: SearchTree<i32> = [5, 2, 8, 1, 9, 3].into_iter().collect();
        assert_eq!(collect(&tree), vec![1, 2, 3, 5, 8, 9]);
        assert_eq!(tree.find_min(), Some(&1));
        assert_eq!(tree.find_max(), Some(&9));
    }

    #[rstest]
    fn test_insert_does_not_touch_original() {
        let tree: SearchTree<i32> = [2, 1].into_iter().collect();
        let larger = tree.insert(3);
        assert_eq!(collect(&tree), vec![1, 2]);
        assert_eq!(collect(&larger), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_insert_shares_untouched_subtree() {
        let tree: SearchTree<i32> = [2, 1].into_iter().collect();
        let larger = tree.insert(3);
        let before = tree.as_tree().node().unwrap();
        let after = larger.as_tree().node().unwrap();
        assert_eq!(before.left(), after.left());
    }

    #[rstest]
    fn test_duplicate_insert_replaces_payload() {
        let tree: SearchTree<(i32, &str), ByFirst> =
            [(2, "two"), (1, "one")].into_iter().collect();
        let replaced = tree.insert((2, "deux"));
        assert_eq!(replaced.size(), 2);
        assert_eq!(replaced.find(&(2, "")), Some(&(2, "deux")));
        assert_eq!(tree.find(&(2, "")), Some(&(2, "two")));
        assert_eq!(replaced.depth(), tree.depth());
    }

    #[rstest]
    #[case::leaf(1, vec![2, 3, 4, 5, 6])]
    #[case::single_child(5, vec![1, 2, 3, 4, 6])]
    #[case::two_children(2, vec![1, 3, 4, 5, 6])]
    #[case::root(4, vec![1, 2, 3, 5, 6])]
    fn test_erase(#[case] key: i32, #[case] expected: Vec<i32>) {
        //        4
        //      /   \
        //     2     5
        //    / \     \
        //   1   3     6
        let tree: SearchTree<i32> = [4, 2, 5, 1, 3, 6].into_iter().collect();
        let erased = tree.erase(&key);
        assert_eq!(collect(&erased), expected);
        assert_eq!(erased.find(&key), None);
        assert_eq!(tree.size(), 6);
    }

    #[rstest]
    fn test_erase_single_child_shares_child() {
        let tree: SearchTree<i32> = [1, 2, 3].into_iter().collect();
        let erased = tree.erase(&1);
        let child = tree.as_tree().node().unwrap().right();
        assert_eq!(erased.as_tree(), child);
    }

    #[rstest]
    fn test_erase_two_children_uses_predecessor() {
        let tree: SearchTree<i32> = [4, 2, 6, 1, 3].into_iter().collect();
        let erased = tree.erase(&4);
        assert_eq!(erased.as_tree().payload(), Some(&3));
        assert_eq!(collect(&erased), vec![1, 2, 3, 6]);
    }

    #[rstest]
    fn test_erase_absent_returns_same_tree() {
        let tree: SearchTree<i32> = [2, 1, 3].into_iter().collect();
        let erased = tree.erase(&7);
        assert_eq!(erased.as_tree(), tree.as_tree());
    }

    #[rstest]
    fn test_sorted_input_degenerates() {
        let tree: SearchTree<i32> = (0..64).collect();
        assert_eq!(tree.depth(), 64);
        assert_eq!(tree.size(), 64);
    }

    #[rstest]
    fn test_reversed_comparator() {
        let tree: SearchTree<i32, Reversed> = [1, 3, 2].into_iter().collect();
        assert_eq!(collect(&tree), vec![3, 2, 1]);
        assert_eq!(tree.find(&2), Some(&2));
    }

    #[cfg(feature = "sanity")]
    #[rstest]
    fn test_check_counts_payloads() {
        let tree: SearchTree<i32> = [4, 2, 5, 1, 3, 6].into_iter().collect();
        assert_eq!(tree.check(), Ok(6));
        assert!(tree.erase(&4).is_valid());
    }

    #[rstest]
    fn test_debug_lists_payloads() {
        let tree: SearchTree<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{tree:?}"), "[1, 2]");
    }
}

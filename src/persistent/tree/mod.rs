//! Immutable binary search tree substrate.
//!
//! This module provides [`Tree`], the shared skeleton both search tree
//! variants are built on, together with the variants themselves:
//!
//! - [`SearchTree`]: unbalanced binary search tree
//! - [`RedBlackTree`]: self-balancing red-black tree
//!
//! # Overview
//!
//! A [`Tree`] is either empty or a shared handle to a [`Node`]. A node owns a
//! payload, a left and a right subtree, and per-variant auxiliary data (`()`
//! for the unbalanced tree, a [`Color`] for the red-black tree).
//!
//! Nodes are never mutated. The only way to "edit" a node is one of the
//! rebuild primitives ([`Node::with_left`], [`Node::with_payload`], ...) which
//! allocate a new node, copy the payload and share every untouched subtree
//! by reference:
//!
//! ```text
//! before:        (5)            after with_left:     (5')
//!               /   \                               /    \
//!             (3)   (8)                          (2)     (8)   <- shared
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pst::persistent::tree::RedBlackTree;
//!
//! let tree: RedBlackTree<i32> = [5, 3, 8].into_iter().collect();
//! let skeleton = tree.as_tree();
//!
//! assert_eq!(skeleton.size(), 3);
//! assert_eq!(skeleton.find_min(), Some(&3));
//! assert_eq!(skeleton.find_max(), Some(&8));
//! ```

use std::cmp::Ordering;
use std::fmt;

use super::ReferenceCounter;

mod dump;
mod iterator;
mod red_black;
#[cfg(feature = "sanity")]
mod sanity;
mod search;

pub use dump::{Annotation, Dump};
pub use iterator::TreeIter;
pub use red_black::{Color, RedBlackTree};
#[cfg(feature = "sanity")]
pub use sanity::InvariantViolation;
pub use search::SearchTree;

// =============================================================================
// Node Definition
// =============================================================================

/// An immutable tree node.
///
/// Nodes are only reachable through a [`Tree`] and are shared by every tree
/// value that reaches them.
pub struct Node<T, A> {
    payload: T,
    left: Tree<T, A>,
    right: Tree<T, A>,
    aux: A,
}

impl<T, A> Node<T, A> {
    /// Returns the payload stored in this node.
    #[inline]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Returns the left subtree.
    #[inline]
    pub const fn left(&self) -> &Tree<T, A> {
        &self.left
    }

    /// Returns the right subtree.
    #[inline]
    pub const fn right(&self) -> &Tree<T, A> {
        &self.right
    }

    /// Returns the per-variant auxiliary data.
    #[inline]
    pub const fn aux(&self) -> &A {
        &self.aux
    }
}

impl<T: Clone, A: Clone> Node<T, A> {
    /// Rebuilds this node with a new left subtree.
    #[must_use]
    pub fn with_left(&self, left: Tree<T, A>) -> Tree<T, A> {
        Tree::branch(self.payload.clone(), left, self.right.clone(), self.aux.clone())
    }

    /// Rebuilds this node with a new right subtree.
    #[must_use]
    pub fn with_right(&self, right: Tree<T, A>) -> Tree<T, A> {
        Tree::branch(self.payload.clone(), self.left.clone(), right, self.aux.clone())
    }

    /// Rebuilds this node with both subtrees replaced.
    #[must_use]
    pub fn with_left_and_right(&self, left: Tree<T, A>, right: Tree<T, A>) -> Tree<T, A> {
        Tree::branch(self.payload.clone(), left, right, self.aux.clone())
    }

    /// Rebuilds this node with new auxiliary data.
    #[must_use]
    pub fn with_aux(&self, aux: A) -> Tree<T, A> {
        Tree::branch(self.payload.clone(), self.left.clone(), self.right.clone(), aux)
    }

    /// Rebuilds this node with a new payload, keeping its position and shape.
    #[must_use]
    pub fn with_payload(&self, payload: T) -> Tree<T, A> {
        Tree::branch(payload, self.left.clone(), self.right.clone(), self.aux.clone())
    }

    /// Rebuilds this node with both subtrees and the auxiliary data replaced.
    #[must_use]
    pub fn with_children_and_aux(
        &self,
        left: Tree<T, A>,
        right: Tree<T, A>,
        aux: A,
    ) -> Tree<T, A> {
        Tree::branch(self.payload.clone(), left, right, aux)
    }

    /// Rebuilds this node with a new payload and both subtrees replaced.
    ///
    /// Used when a node is relabeled with its in-order predecessor.
    #[must_use]
    pub fn with_payload_and_children(
        &self,
        payload: T,
        left: Tree<T, A>,
        right: Tree<T, A>,
    ) -> Tree<T, A> {
        Tree::branch(payload, left, right, self.aux.clone())
    }
}

// =============================================================================
// Tree Definition
// =============================================================================

/// A possibly empty, immutable binary tree.
///
/// Cloning a `Tree` is O(1): it only bumps a reference count.
///
/// `Tree` equality is *identity*: two trees are equal when they refer to the
/// same node allocation (or are both empty). Use the container types for
/// content equality.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::SearchTree;
///
/// let tree: SearchTree<i32> = [2, 1, 3].into_iter().collect();
/// let copy = tree.as_tree().clone();
/// assert!(copy == *tree.as_tree());
///
/// let rebuilt: SearchTree<i32> = [2, 1, 3].into_iter().collect();
/// assert!(*rebuilt.as_tree() != *tree.as_tree());
/// ```
pub struct Tree<T, A = ()> {
    root: Option<ReferenceCounter<Node<T, A>>>,
}

impl<T, A> Tree<T, A> {
    /// Creates an empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Creates a tree with a single node.
    #[must_use]
    pub fn leaf(payload: T, aux: A) -> Self {
        Self::branch(payload, Self::new(), Self::new(), aux)
    }

    /// Creates a tree from a payload, two subtrees and auxiliary data.
    ///
    /// The caller is responsible for the ordering of `left` and `right`.
    #[must_use]
    pub fn branch(payload: T, left: Self, right: Self, aux: A) -> Self {
        Self {
            root: Some(ReferenceCounter::new(Node {
                payload,
                left,
                right,
                aux,
            })),
        }
    }

    /// Returns `true` if the tree has no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node, or `None` for an empty tree.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<&Node<T, A>> {
        self.root.as_deref()
    }

    /// Returns the root payload, or `None` for an empty tree.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.node().map(Node::payload)
    }

    /// Counts the nodes of the tree.
    ///
    /// # Complexity
    ///
    /// O(n); the count is not cached.
    #[must_use]
    pub fn size(&self) -> usize {
        self.node()
            .map_or(0, |node| 1 + node.left.size() + node.right.size())
    }

    /// Returns the number of nodes on the longest root-to-empty path.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.node()
            .map_or(0, |node| 1 + node.left.depth().max(node.right.depth()))
    }

    /// Searches the tree with a probe.
    ///
    /// `probe` receives a stored payload and returns the ordering of the
    /// sought key relative to it: `Less` descends left, `Greater` descends
    /// right, `Equal` is a hit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pst::persistent::tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<(i32, &str)> = [(1, "one"), (2, "two")].into_iter().collect();
    /// let found = tree.as_tree().find_by(|(key, _)| 2.cmp(key));
    /// assert_eq!(found, Some(&(2, "two")));
    /// ```
    pub fn find_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.node();
        while let Some(node) = current {
            current = match probe(&node.payload) {
                Ordering::Less => node.left.node(),
                Ordering::Greater => node.right.node(),
                Ordering::Equal => return Some(&node.payload),
            };
        }
        None
    }

    /// Returns the leftmost payload.
    #[must_use]
    pub fn find_min(&self) -> Option<&T> {
        let mut node = self.node()?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Some(&node.payload)
    }

    /// Returns the rightmost payload.
    #[must_use]
    pub fn find_max(&self) -> Option<&T> {
        let mut node = self.node()?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Some(&node.payload)
    }

    /// Returns an in-order iterator over the payloads.
    #[must_use]
    pub fn iter(&self) -> TreeIter<'_, T, A> {
        TreeIter::new(self)
    }

    /// Returns an adapter that renders the tree as an indented outline.
    ///
    /// Meant for diagnostics; the format is not stable.
    #[must_use]
    pub const fn dump(&self) -> Dump<'_, T, A> {
        Dump::new(self)
    }
}

impl<T, A> Clone for Tree<T, A> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T, A> Default for Tree<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> PartialEq for Tree<T, A> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => ReferenceCounter::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<T, A> Eq for Tree<T, A> {}

impl<T: fmt::Debug, A> fmt::Debug for Tree<T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A> IntoIterator for &'a Tree<T, A> {
    type Item = &'a T;
    type IntoIter = TreeIter<'a, T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

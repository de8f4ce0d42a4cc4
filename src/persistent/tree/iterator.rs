//! In-order iteration over a [`Tree`].

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::Tree;

/// Inline capacity of the ancestor path. A red-black tree of depth 32 holds
/// at least 2^16 - 1 entries, so typical trees never spill to the heap.
const INLINE_PATH: usize = 32;

/// An in-order iterator over the payloads of a [`Tree`].
///
/// The iterator keeps the path of subtrees from the root down to the current
/// node and never touches the nodes it visits. Because trees are immutable,
/// it stays valid no matter what is later inserted into or erased from the
/// tree value it was created from.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::RedBlackTree;
///
/// let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
/// let iterator = tree.iter();
///
/// let later = tree.insert(0).erase(&3);
/// assert_eq!(iterator.copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(later.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub struct TreeIter<'a, T, A> {
    path: SmallVec<[&'a Tree<T, A>; INLINE_PATH]>,
}

impl<'a, T, A> TreeIter<'a, T, A> {
    pub(super) fn new(tree: &'a Tree<T, A>) -> Self {
        let mut iterator = Self {
            path: SmallVec::new(),
        };
        iterator.descend_left(tree);
        iterator
    }

    fn descend_left(&mut self, mut tree: &'a Tree<T, A>) {
        while let Some(node) = tree.node() {
            self.path.push(tree);
            tree = &node.left;
        }
    }

    /// Moves to the in-order successor of the current node.
    fn advance(&mut self) {
        let Some(current) = self.path.last().copied() else {
            return;
        };
        if let Some(node) = current.node()
            && !node.right.is_empty()
        {
            self.descend_left(&node.right);
            return;
        }

        // Climb until we leave a left subtree; the parent is then next.
        while let Some(child) = self.path.pop() {
            match self.path.last().copied().and_then(Tree::node) {
                Some(parent) if parent.left == *child => return,
                Some(_) => {}
                None => {
                    self.path.clear();
                    return;
                }
            }
        }
    }
}

impl<'a, T, A> Iterator for TreeIter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current: &'a Tree<T, A> = self.path.last().copied()?;
        let payload = current.payload()?;
        self.advance();
        Some(payload)
    }
}

impl<T, A> FusedIterator for TreeIter<'_, T, A> {}

impl<T, A> Clone for TreeIter<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
        }
    }
}

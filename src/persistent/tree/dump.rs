//! Indented textual rendering of a [`Tree`], for diagnostics.

use std::fmt;

use super::{Color, Tree};

/// Labels a node by its auxiliary data in a [`Dump`].
pub trait Annotation {
    /// Writes the label that precedes the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `formatter` fails.
    fn annotate(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Annotation for () {
    #[inline]
    fn annotate(&self, _formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Annotation for Color {
    fn annotate(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => formatter.write_str("red: "),
            Self::Black => formatter.write_str("black: "),
        }
    }
}

/// A [`Display`](fmt::Display) adapter returned by [`Tree::dump`].
///
/// Every node is printed on its own line, indented by two spaces per level,
/// with its left subtree and then its right subtree below it. Empty subtrees
/// print as `<null>`.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::RedBlackTree;
///
/// let tree: RedBlackTree<i32> = [2, 1].into_iter().collect();
/// let expected = "black: 2\n  red: 1\n    <null>\n    <null>\n  <null>\n";
/// assert_eq!(tree.as_tree().dump().to_string(), expected);
/// ```
pub struct Dump<'a, T, A> {
    tree: &'a Tree<T, A>,
}

impl<'a, T, A> Dump<'a, T, A> {
    pub(super) const fn new(tree: &'a Tree<T, A>) -> Self {
        Self { tree }
    }
}

fn write_subtree<T, A>(
    tree: &Tree<T, A>,
    level: usize,
    formatter: &mut fmt::Formatter<'_>,
) -> fmt::Result
where
    T: fmt::Display,
    A: Annotation,
{
    write!(formatter, "{:indent$}", "", indent = level * 2)?;
    let Some(node) = tree.node() else {
        return writeln!(formatter, "<null>");
    };
    node.aux.annotate(formatter)?;
    writeln!(formatter, "{}", node.payload)?;
    write_subtree(&node.left, level + 1, formatter)?;
    write_subtree(&node.right, level + 1, formatter)
}

impl<T: fmt::Display, A: Annotation> fmt::Display for Dump<'_, T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtree(self.tree, 0, formatter)
    }
}

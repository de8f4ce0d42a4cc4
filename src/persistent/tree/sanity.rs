//! Structural invariant checks.
//!
//! Compiled with the `sanity` feature (on by default). Nothing on the insert
//! or erase paths calls into this module; it exists for tests and for
//! debugging trees built by hand through the [`Tree`] substrate.

use std::cmp::Ordering;
use std::fmt;

use super::{Color, Tree};
use crate::compare::Comparator;

/// A broken tree invariant.
///
/// # Examples
///
/// ```rust
/// use pst::persistent::tree::{InvariantViolation, RedBlackTree};
///
/// let tree: RedBlackTree<i32> = (0..10).collect();
/// assert_eq!(tree.check(), Ok(tree.black_height()));
///
/// let error = InvariantViolation::BlackImbalance { left: 2, right: 1 };
/// assert_eq!(
///     error.to_string(),
///     "black height differs between subtrees: left 2, right 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root of a non-empty red-black tree is red.
    RedRoot,
    /// A payload is not strictly between the bounds set by its ancestors.
    OutOfOrder,
    /// A red node has a red child.
    RedRed,
    /// The two subtrees of a node have different black heights.
    BlackImbalance {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root is red"),
            Self::OutOfOrder => write!(formatter, "payload out of order"),
            Self::RedRed => write!(formatter, "red node has a red child"),
            Self::BlackImbalance { left, right } => write!(
                formatter,
                "black height differs between subtrees: left {left}, right {right}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks the ordering of every payload against the bounds inherited from
/// its ancestors and returns the number of payloads.
pub(super) fn check_order<T, A, C: Comparator<T>>(
    tree: &Tree<T, A>,
) -> Result<usize, InvariantViolation> {
    check_bounded::<T, A, C>(tree, None, None)
}

fn check_bounded<T, A, C: Comparator<T>>(
    tree: &Tree<T, A>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> Result<usize, InvariantViolation> {
    let Some(node) = tree.node() else {
        return Ok(0);
    };
    let payload = &node.payload;
    let above_lower = lower.is_none_or(|bound| C::compare(bound, payload) == Ordering::Less);
    let below_upper = upper.is_none_or(|bound| C::compare(payload, bound) == Ordering::Less);
    if !(above_lower && below_upper) {
        return Err(InvariantViolation::OutOfOrder);
    }
    let left = check_bounded::<T, A, C>(&node.left, lower, Some(payload))?;
    let right = check_bounded::<T, A, C>(&node.right, Some(payload), upper)?;
    Ok(left + 1 + right)
}

/// Checks ordering, root color, red-red and black balance, and returns the
/// black height.
pub(super) fn check_red_black<T, C: Comparator<T>>(
    tree: &Tree<T, Color>,
) -> Result<usize, InvariantViolation> {
    check_order::<T, Color, C>(tree)?;
    if tree.color().is_red() {
        return Err(InvariantViolation::RedRoot);
    }
    check_colors(tree)
}

fn check_colors<T>(tree: &Tree<T, Color>) -> Result<usize, InvariantViolation> {
    let Some(node) = tree.node() else {
        return Ok(0);
    };
    if node.aux.is_red() && (node.left.color().is_red() || node.right.color().is_red()) {
        return Err(InvariantViolation::RedRed);
    }
    let left = check_colors(&node.left)?;
    let right = check_colors(&node.right)?;
    if left != right {
        return Err(InvariantViolation::BlackImbalance { left, right });
    }
    Ok(left + usize::from(node.aux.is_black()))
}

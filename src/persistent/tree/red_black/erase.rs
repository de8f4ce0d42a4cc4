//! Red-black deletion.
//!
//! Each recursive call returns the rebuilt subtree together with a [`Delta`]
//! telling whether the subtree lost a black level. A parent receiving
//! [`Delta::Shortened`] from its near child looks at the far child (the
//! sibling) and the sibling's children (the nephews):
//!
//! - a red nephew lets a single or double rotation absorb the deficiency,
//! - two black nephews repaint the sibling red, which absorbs the deficiency
//!   under a red parent and passes it upward under a black one,
//! - a red sibling is rotated up first, leaving a black sibling below it.

use std::cmp::Ordering;

use super::side::{Left, Right, Side};
use super::Color;
use crate::persistent::tree::{Node, Tree};

/// Black height change of a rebuilt subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Delta {
    /// Same black height as before.
    Preserved,
    /// One black level shorter.
    Shortened,
}

pub(super) struct Erased<T> {
    pub(super) delta: Delta,
    pub(super) tree: Tree<T, Color>,
}

impl<T> Erased<T> {
    const fn preserved(tree: Tree<T, Color>) -> Self {
        Self {
            delta: Delta::Preserved,
            tree,
        }
    }
}

/// Erases the payload `probe` reports as `Equal`, or returns `None` when
/// there is none. The returned root may be red.
pub(super) fn erase_from<T, F>(tree: &Tree<T, Color>, probe: &mut F) -> Option<Erased<T>>
where
    T: Clone,
    F: FnMut(&T) -> Ordering,
{
    let node = tree.node()?;
    match probe(&node.payload) {
        Ordering::Less => erase_toward::<Left, T, F>(node, probe),
        Ordering::Greater => erase_toward::<Right, T, F>(node, probe),
        Ordering::Equal => Some(remove(node)),
    }
}

fn erase_toward<S, T, F>(node: &Node<T, Color>, probe: &mut F) -> Option<Erased<T>>
where
    S: Side,
    T: Clone,
    F: FnMut(&T) -> Ordering,
{
    erase_from(S::near(node), probe).map(|erased| reattach::<S, T>(node, erased))
}

/// Puts an erased near child back under `node`.
fn reattach<S: Side, T: Clone>(node: &Node<T, Color>, erased: Erased<T>) -> Erased<T> {
    match erased.delta {
        Delta::Preserved => Erased::preserved(S::with_near(node, erased.tree)),
        Delta::Shortened => fixup::<S, T>(node, erased.tree),
    }
}

/// Removes `node` itself.
fn remove<T: Clone>(node: &Node<T, Color>) -> Erased<T> {
    match (node.left.node(), node.right.node()) {
        (None, None) => Erased {
            delta: if node.aux.is_black() {
                Delta::Shortened
            } else {
                Delta::Preserved
            },
            tree: Tree::new(),
        },
        (Some(_), None) => Erased::preserved(node.left.recolored(Color::Black)),
        (None, Some(_)) => Erased::preserved(node.right.recolored(Color::Black)),
        (Some(left), Some(_)) => {
            let (predecessor, erased) = erase_max(left);
            match erased.delta {
                Delta::Preserved => Erased::preserved(node.with_payload_and_children(
                    predecessor,
                    erased.tree,
                    node.right.clone(),
                )),
                Delta::Shortened => {
                    let relabeled = Node {
                        payload: predecessor,
                        left: Tree::new(),
                        right: node.right.clone(),
                        aux: node.aux,
                    };
                    fixup::<Left, T>(&relabeled, erased.tree)
                }
            }
        }
    }
}

/// Removes the rightmost node below `node` and returns its payload.
fn erase_max<T: Clone>(node: &Node<T, Color>) -> (T, Erased<T>) {
    match node.right.node() {
        None => (node.payload.clone(), remove(node)),
        Some(right) => {
            let (max, erased) = erase_max(right);
            (max, reattach::<Right, T>(node, erased))
        }
    }
}

/// Rebuilds `parent` with a `near` child that is one black level shorter
/// than its far sibling.
fn fixup<S: Side, T: Clone>(parent: &Node<T, Color>, near: Tree<T, Color>) -> Erased<T> {
    let Some(sibling) = S::far(parent).node() else {
        // Unreachable in a balanced tree: a shortened side has a sibling.
        return Erased {
            delta: Delta::Shortened,
            tree: S::with_near(parent, near),
        };
    };

    if parent.aux.is_black() && sibling.aux.is_red() {
        let Some(inner) = S::near(sibling).node() else {
            return Erased {
                delta: Delta::Shortened,
                tree: S::with_near(parent, near),
            };
        };
        let settled = absorb::<S, T>(parent, Color::Red, near, inner);
        return Erased::preserved(S::rebuild(
            sibling,
            settled.tree,
            S::far(sibling).clone(),
            Color::Black,
        ));
    }

    absorb::<S, T>(parent, parent.aux, near, sibling)
}

/// Fixup against a black `sibling`, with the rebuilt root taking `color`.
fn absorb<S: Side, T: Clone>(
    parent: &Node<T, Color>,
    color: Color,
    near: Tree<T, Color>,
    sibling: &Node<T, Color>,
) -> Erased<T> {
    let inner = S::near(sibling);
    let outer = S::far(sibling);

    if outer.color().is_red() {
        let lowered = S::rebuild(parent, near, inner.clone(), Color::Black);
        return Erased::preserved(S::rebuild(
            sibling,
            lowered,
            outer.recolored(Color::Black),
            color,
        ));
    }

    if let Some(pivot) = inner.node()
        && pivot.aux.is_red()
    {
        let lowered = S::rebuild(parent, near, S::near(pivot).clone(), Color::Black);
        let raised = S::rebuild(sibling, S::far(pivot).clone(), outer.clone(), Color::Black);
        return Erased::preserved(S::rebuild(pivot, lowered, raised, color));
    }

    let repainted = S::rebuild(
        parent,
        near,
        S::rebuild(sibling, inner.clone(), outer.clone(), Color::Red),
        Color::Black,
    );
    Erased {
        delta: if color.is_red() {
            Delta::Preserved
        } else {
            Delta::Shortened
        },
        tree: repainted,
    }
}

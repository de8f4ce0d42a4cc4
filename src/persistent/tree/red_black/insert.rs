//! Red-black insertion.
//!
//! Each recursive call returns the rebuilt subtree with its [`Shape`]. A
//! call on a red node may hand back a red root with a red child; the black
//! grandparent above it resolves that conflict by recoloring when the uncle
//! is red and by a single rotation otherwise. A red node whose new red child
//! sits on the inner side first rotates it up, so the grandparent only ever
//! rotates an outer conflict.

use std::cmp::Ordering;

use super::side::{Left, Right, Side};
use super::{Color, Shape};
use crate::compare::Comparator;
use crate::persistent::tree::{Node, Tree};

/// A rebuilt subtree, its shape, and whether a payload was added.
pub(super) struct Inserted<T> {
    pub(super) shape: Shape,
    pub(super) tree: Tree<T, Color>,
    pub(super) added: bool,
}

/// Inserts `payload` below the root. The returned root may be red.
pub(super) fn insert<T: Clone, C: Comparator<T>>(
    tree: &Tree<T, Color>,
    payload: T,
) -> Inserted<T> {
    insert_into::<Left, T, C>(tree, payload, Color::Black)
}

/// Inserts into `tree`, the `S` child of its parent whose other child has
/// color `sibling`.
fn insert_into<S: Side, T: Clone, C: Comparator<T>>(
    tree: &Tree<T, Color>,
    payload: T,
    sibling: Color,
) -> Inserted<T> {
    let Some(node) = tree.node() else {
        return Inserted {
            shape: Shape::RED_LEAF,
            tree: Tree::leaf(payload, Color::Red),
            added: true,
        };
    };
    match node.aux {
        Color::Black => match C::compare(&payload, &node.payload) {
            Ordering::Less => insert_below_black::<Left, T, C>(node, payload),
            Ordering::Greater => insert_below_black::<Right, T, C>(node, payload),
            Ordering::Equal => replace(node, payload),
        },
        Color::Red => insert_below_red::<S, T, C>(node, payload, sibling),
    }
}

fn replace<T: Clone>(node: &Node<T, Color>, payload: T) -> Inserted<T> {
    Inserted {
        shape: Shape::of(node),
        tree: node.with_payload(payload),
        added: false,
    }
}

/// Inserts into the `S` child of a black node.
fn insert_below_black<S: Side, T: Clone, C: Comparator<T>>(
    node: &Node<T, Color>,
    payload: T,
) -> Inserted<T> {
    let uncle = S::far(node);
    let uncle_color = uncle.color();
    let Inserted { shape, tree, added } =
        insert_into::<S, T, C>(S::near(node), payload, uncle_color);

    if shape.is_red_red() {
        if uncle_color.is_red() {
            return Inserted {
                shape: Shape::RED_LEAF,
                tree: S::rebuild(
                    node,
                    tree.recolored(Color::Black),
                    uncle.recolored(Color::Black),
                    Color::Red,
                ),
                added,
            };
        }

        // With a black uncle the red grandchild is always on the near side.
        if S::near_color(shape).is_red()
            && let Some(child) = tree.node()
        {
            let lowered = S::rebuild(node, S::far(child).clone(), uncle.clone(), Color::Red);
            return Inserted {
                shape: Shape {
                    top: Color::Black,
                    left: Color::Red,
                    right: Color::Red,
                },
                tree: S::rebuild(child, S::near(child).clone(), lowered, Color::Black),
                added,
            };
        }
    }

    Inserted {
        shape: S::shape(Color::Black, shape.top, uncle_color),
        tree: S::with_near(node, tree),
        added,
    }
}

/// Inserts below a red node that hangs on its parent's `S` side.
fn insert_below_red<S: Side, T: Clone, C: Comparator<T>>(
    node: &Node<T, Color>,
    payload: T,
    sibling: Color,
) -> Inserted<T> {
    let near_color = S::near(node).color();
    let far_color = S::far(node).color();

    match S::orient(C::compare(&payload, &node.payload)) {
        Ordering::Less => {
            let Inserted { shape, tree, added } =
                insert_into::<S, T, C>(S::near(node), payload, far_color);
            Inserted {
                shape: S::shape(Color::Red, shape.top, far_color),
                tree: S::with_near(node, tree),
                added,
            }
        }
        Ordering::Greater => {
            let Inserted { shape, tree, added } =
                insert_into::<S::Mirror, T, C>(S::far(node), payload, near_color);

            if shape.top.is_red()
                && sibling.is_black()
                && let Some(pivot) = tree.node()
            {
                let lowered = S::with_far(node, S::near(pivot).clone());
                return Inserted {
                    shape: S::shape(Color::Red, Color::Red, S::far(pivot).color()),
                    tree: S::with_near(pivot, lowered),
                    added,
                };
            }

            Inserted {
                shape: S::shape(Color::Red, near_color, shape.top),
                tree: S::with_far(node, tree),
                added,
            }
        }
        Ordering::Equal => replace(node, payload),
    }
}

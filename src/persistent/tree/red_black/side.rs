//! Orientation capability used to write mirrored rebalancing cases once.
//!
//! Under an orientation, the *near* child of a node is the child on that
//! side and the *far* child is the other one. A routine written against
//! `S: Side` handles the left case with `S = Left` and the mirrored right
//! case with `S = Right`.

use std::cmp::Ordering;

use super::{Color, Shape};
use crate::persistent::tree::{Node, Tree};

pub(super) trait Side {
    /// The opposite orientation.
    type Mirror: Side;

    fn near<T, A>(node: &Node<T, A>) -> &Tree<T, A>;

    fn far<T, A>(node: &Node<T, A>) -> &Tree<T, A> {
        Self::Mirror::near(node)
    }

    /// Maps a comparison result so that `Less` means "toward the near child".
    fn orient(ordering: Ordering) -> Ordering;

    /// Rebuilds `node` with the given near and far children and color.
    fn rebuild<T: Clone, A: Clone>(
        node: &Node<T, A>,
        near: Tree<T, A>,
        far: Tree<T, A>,
        aux: A,
    ) -> Tree<T, A>;

    fn with_near<T: Clone, A: Clone>(node: &Node<T, A>, near: Tree<T, A>) -> Tree<T, A>;

    fn with_far<T: Clone, A: Clone>(node: &Node<T, A>, far: Tree<T, A>) -> Tree<T, A> {
        Self::Mirror::with_near(node, far)
    }

    /// Builds a shape tag from oriented child colors.
    fn shape(top: Color, near: Color, far: Color) -> Shape;

    /// Color of the near child recorded in `shape`.
    fn near_color(shape: Shape) -> Color;
}

pub(super) enum Left {}

pub(super) enum Right {}

impl Side for Left {
    type Mirror = Right;

    #[inline]
    fn near<T, A>(node: &Node<T, A>) -> &Tree<T, A> {
        &node.left
    }

    #[inline]
    fn orient(ordering: Ordering) -> Ordering {
        ordering
    }

    #[inline]
    fn rebuild<T: Clone, A: Clone>(
        node: &Node<T, A>,
        near: Tree<T, A>,
        far: Tree<T, A>,
        aux: A,
    ) -> Tree<T, A> {
        node.with_children_and_aux(near, far, aux)
    }

    #[inline]
    fn with_near<T: Clone, A: Clone>(node: &Node<T, A>, near: Tree<T, A>) -> Tree<T, A> {
        node.with_left(near)
    }

    #[inline]
    fn shape(top: Color, near: Color, far: Color) -> Shape {
        Shape {
            top,
            left: near,
            right: far,
        }
    }

    #[inline]
    fn near_color(shape: Shape) -> Color {
        shape.left
    }
}

impl Side for Right {
    type Mirror = Left;

    #[inline]
    fn near<T, A>(node: &Node<T, A>) -> &Tree<T, A> {
        &node.right
    }

    #[inline]
    fn orient(ordering: Ordering) -> Ordering {
        ordering.reverse()
    }

    #[inline]
    fn rebuild<T: Clone, A: Clone>(
        node: &Node<T, A>,
        near: Tree<T, A>,
        far: Tree<T, A>,
        aux: A,
    ) -> Tree<T, A> {
        node.with_children_and_aux(far, near, aux)
    }

    #[inline]
    fn with_near<T: Clone, A: Clone>(node: &Node<T, A>, near: Tree<T, A>) -> Tree<T, A> {
        node.with_right(near)
    }

    #[inline]
    fn shape(top: Color, near: Color, far: Color) -> Shape {
        Shape {
            top,
            left: far,
            right: near,
        }
    }

    #[inline]
    fn near_color(shape: Shape) -> Color {
        shape.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Tree<i32, Color> {
        Tree::branch(
            2,
            Tree::leaf(1, Color::Red),
            Tree::leaf(3, Color::Black),
            Color::Black,
        )
    }

    #[rstest]
    fn test_near_and_far_are_mirrored() {
        let tree = sample();
        let node = tree.node().unwrap();
        assert_eq!(Left::near(node), node.left());
        assert_eq!(Left::far(node), node.right());
        assert_eq!(Right::near(node), node.right());
        assert_eq!(Right::far(node), node.left());
    }

    #[rstest]
    #[case(Ordering::Less)]
    #[case(Ordering::Equal)]
    #[case(Ordering::Greater)]
    fn test_orient(#[case] ordering: Ordering) {
        assert_eq!(Left::orient(ordering), ordering);
        assert_eq!(Right::orient(ordering), ordering.reverse());
    }

    #[rstest]
    fn test_rebuild_places_near_on_own_side() {
        let tree = sample();
        let node = tree.node().unwrap();
        let swapped = Right::rebuild(node, node.left().clone(), node.right().clone(), Color::Red);
        let swapped_node = swapped.node().unwrap();
        assert_eq!(swapped_node.right(), node.left());
        assert_eq!(swapped_node.left(), node.right());
        assert_eq!(swapped_node.aux(), &Color::Red);
    }

    #[rstest]
    fn test_with_far_uses_opposite_child() {
        let tree = sample();
        let node = tree.node().unwrap();
        let rebuilt = Left::with_far(node, Tree::new());
        let rebuilt_node = rebuilt.node().unwrap();
        assert!(rebuilt_node.right().is_empty());
        assert_eq!(rebuilt_node.left(), node.left());
    }

    #[rstest]
    fn test_shape_colors_round_trip_through_orientation() {
        let shape = Right::shape(Color::Black, Color::Red, Color::Black);
        assert_eq!(shape.right, Color::Red);
        assert_eq!(shape.left, Color::Black);
        assert_eq!(Right::near_color(shape), Color::Red);
        assert_eq!(Left::near_color(shape), Color::Black);
    }
}

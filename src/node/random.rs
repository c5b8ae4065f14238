//! Randomized tree construction, gated behind the `random` feature. Used by
//! the fresh-equals-incremental property tests and available to consumers
//! who want to fuzz a tree against their own renderer.

use rand::Rng;

use crate::node::{NodeId, Tree};
use crate::style::{Align, FlexDirection, FlexWrap, Justify, Style};

/// Fills in a plausible random style. `is_leaf` biases toward giving leaves
/// an explicit size, since an unbounded tree of shrink-to-fit leaves has
/// nothing to size itself from.
pub fn random_style(rng: &mut impl Rng, is_leaf: bool) -> Style {
    let mut style = Style::default();
    style.flex_direction = *[
        FlexDirection::Row,
        FlexDirection::RowReverse,
        FlexDirection::Column,
        FlexDirection::ColumnReverse,
    ]
    .get(rng.gen_range(0..4))
    .unwrap();
    style.flex_wrap = *[FlexWrap::NoWrap, FlexWrap::Wrap].get(rng.gen_range(0..2)).unwrap();
    style.justify_content = *[
        Justify::FlexStart,
        Justify::Center,
        Justify::FlexEnd,
        Justify::SpaceBetween,
        Justify::SpaceAround,
        Justify::SpaceEvenly,
    ]
    .get(rng.gen_range(0..6))
    .unwrap();
    style.align_items =
        *[Align::Stretch, Align::FlexStart, Align::Center, Align::FlexEnd].get(rng.gen_range(0..4)).unwrap();
    style.flex_grow = if rng.gen_bool(0.5) { rng.gen_range(0.0..3.0) } else { 0.0 };
    style.flex_shrink = if rng.gen_bool(0.5) { rng.gen_range(0.0..3.0) } else { 1.0 };
    if is_leaf && rng.gen_bool(0.6) {
        style.size = crate::geometry::Size::new(
            crate::style::Value::points(rng.gen_range(5.0..60.0)),
            crate::style::Value::points(rng.gen_range(5.0..60.0)),
        );
    }
    style
}

/// Builds a random tree of the given maximum depth into `tree`, returning
/// the root. Each node is, with probability 0.3, cut short into a leaf even
/// before `depth` is exhausted, so trees are irregular rather than perfectly
/// balanced.
pub fn random_tree(tree: &mut Tree, rng: &mut impl Rng, depth: usize) -> NodeId {
    if depth == 0 || rng.gen_bool(0.3) {
        return tree.new_leaf(random_style(rng, true));
    }
    let child_count = rng.gen_range(1..5);
    let children: Vec<NodeId> = (0..child_count).map(|_| random_tree(tree, rng, depth - 1)).collect();
    tree.new_with_children(random_style(rng, false), &children).unwrap()
}

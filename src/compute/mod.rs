//! The layout algorithm's dispatch entry point (§4.1 Phase 1) plus the
//! submodules each phase is grounded in.

pub(crate) mod common;
pub(crate) mod edge_resolver;
mod flexbox;
pub(crate) mod leaf;
pub(crate) mod line;
pub(crate) mod measure;
mod scratch;

use crate::node::{NodeId, Tree};
use crate::style::{Direction, Display};
use crate::sys::round;

#[cfg(feature = "debug")]
use crate::debug::NODE_LOGGER;

/// The single recursive entry point every phase-8/phase-11 child call and
/// every `Tree::calculate_layout` root call goes through. Handles Phase 1
/// (display:none short-circuit, fingerprint-match skip) before handing off
/// to `flexbox::compute` for Phases 2-11.
pub(crate) fn layout_node(
    tree: &mut Tree,
    node: NodeId,
    avail_w: f64,
    avail_h: f64,
    offset_x: f64,
    offset_y: f64,
    abs_x: f64,
    abs_y: f64,
    direction: Direction,
) {
    #[cfg(feature = "debug")]
    NODE_LOGGER.push_node(node);

    if tree.style_unchecked(node).display == Display::None {
        #[cfg(feature = "debug")]
        NODE_LOGGER.log("Algo: none");
        zero_subtree(tree, node, offset_x, offset_y, direction);
        #[cfg(feature = "debug")]
        NODE_LOGGER.pop_node();
        return;
    }

    if try_skip(tree, node, avail_w, avail_h, offset_x, offset_y, direction) {
        #[cfg(feature = "debug")]
        NODE_LOGGER.log("CACHE: fingerprint skip");
        #[cfg(feature = "debug")]
        NODE_LOGGER.pop_node();
        return;
    }

    #[cfg(feature = "debug")]
    NODE_LOGGER.log("Algo: flexbox");
    flexbox::compute(tree, node, avail_w, avail_h, offset_x, offset_y, abs_x, abs_y, direction);

    #[cfg(feature = "debug")]
    NODE_LOGGER.pop_node();
}

/// Phase 1's fingerprint fast path (§4.5 F2/F3). Returns `true` if the node's
/// layout is already correct for this pass and no further work is needed.
fn try_skip(
    tree: &mut Tree,
    node: NodeId,
    avail_w: f64,
    avail_h: f64,
    offset_x: f64,
    offset_y: f64,
    direction: Direction,
) -> bool {
    if tree.is_dirty_unchecked(node) {
        return false;
    }
    let fp = tree.flex(node).fingerprint;
    if !fp.matches(avail_w, avail_h, direction) {
        return false;
    }

    let dx = offset_x - fp.offset_x;
    let dy = offset_y - fp.offset_y;
    if dx != 0.0 || dy != 0.0 {
        let layout = tree.layout_mut(node);
        layout.left += round(dx);
        layout.top += round(dy);
        let flex = tree.flex_mut(node);
        flex.fingerprint.offset_x = offset_x;
        flex.fingerprint.offset_y = offset_y;
        // Every descendant's own stored fingerprint offset is the offset
        // *its* immediate parent passed it, which is unchanged here — only
        // `node`'s position relative to its own parent moved. No subtree
        // walk is needed to keep descendant fingerprints internally
        // consistent.
    }
    true
}

/// `display: none` zeroes the node and its entire subtree (§4.1 Phase 1),
/// recursively, so no stale geometry from a previous pass leaks through to a
/// renderer walking the tree.
fn zero_subtree(tree: &mut Tree, node: NodeId, offset_x: f64, offset_y: f64, direction: Direction) {
    {
        let layout = tree.layout_mut(node);
        layout.left = round(offset_x);
        layout.top = round(offset_y);
        layout.width = 0.0;
        layout.height = 0.0;
    }
    let flex = tree.flex_mut(node);
    flex.fingerprint.avail_w = f64::NAN;
    flex.fingerprint.avail_h = f64::NAN;
    flex.fingerprint.offset_x = offset_x;
    flex.fingerprint.offset_y = offset_y;
    flex.fingerprint.direction = direction;
    flex.fingerprint.valid = true;

    let children = tree.children(node).to_vec();
    for child in children {
        zero_subtree(tree, child, 0.0, 0.0, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn display_none_zeroes_node_and_descendants() {
        let mut tree = Tree::new();
        let leaf = tree.new_leaf(Style::default());
        let mut parent_style = Style::default();
        parent_style.display = Display::None;
        let parent = tree.new_with_children(parent_style, &[leaf]).unwrap();

        tree.calculate_layout(parent, Some(200.0), Some(200.0), Direction::Ltr).unwrap();

        assert_eq!(tree.get_computed_width(parent).unwrap(), 0.0);
        assert_eq!(tree.get_computed_width(leaf).unwrap(), 0.0);
        assert_eq!(tree.get_computed_height(leaf).unwrap(), 0.0);
    }

    #[test]
    fn leaf_with_explicit_size_reports_it() {
        let mut tree = Tree::new();
        let mut style = Style::default();
        style.size.width = crate::style::Value::points(50.0);
        style.size.height = crate::style::Value::points(30.0);
        let leaf = tree.new_leaf(style);

        tree.calculate_layout(leaf, Some(200.0), Some(200.0), Direction::Ltr).unwrap();

        assert_eq!(tree.get_computed_width(leaf).unwrap(), 50.0);
        assert_eq!(tree.get_computed_height(leaf).unwrap(), 30.0);
    }
}

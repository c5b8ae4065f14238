//! The intrinsic-sizing helper (§4.2). Computes a subtree's natural
//! `(width, height)` without producing positions; used by the main
//! algorithm whenever a child's intrinsic size is needed (Phase 5, Phase 6c).

use crate::compute::common::resolve_box;
use crate::compute::leaf;
use crate::geometry::Size;
use crate::node::{NodeId, Tree};
use crate::style::{Display, Direction, PositionType};

/// Mirrors Phases 2, 3, 4 exactly (§4.2). Writes the result into
/// `layout.width/height` but never touches `layout.left/top` and never
/// recurses for position. Callers that only want the intrinsic size of a
/// node whose layout will be recomputed properly later must save and
/// restore `layout.width/height` around this call (§4.2 "Save/restore
/// contract") — the main algorithm does so at every call site.
pub fn measure(tree: &mut Tree, node: NodeId, avail_w: f64, avail_h: f64, direction: Direction) -> (f64, f64) {
    if tree.style_unchecked(node).display == Display::None {
        let layout = tree.layout_mut(node);
        layout.width = 0.0;
        layout.height = 0.0;
        return (0.0, 0.0);
    }

    let avail = Size::new(avail_w, avail_h);

    if !tree.is_dirty_unchecked(node) {
        if let Some(cached) = tree.sizing_cache(node).get(avail_w, avail_h) {
            let layout = tree.layout_mut(node);
            layout.width = cached.0;
            layout.height = cached.1;
            return cached;
        }
    }

    let style = tree.style_unchecked(node).clone();
    let sizing = resolve_box(&style, direction, avail);

    let result = if tree.is_childless(node) {
        if tree.has_measure_func_unchecked(node) {
            leaf::measure_via_callback(tree, node, &sizing, avail)
        } else {
            leaf::measure_intrinsic_floor(&sizing)
        }
    } else {
        measure_container(tree, node, &style, &sizing, direction)
    };

    tree.sizing_cache_mut(node).insert(avail_w, avail_h, result);
    let layout = tree.layout_mut(node);
    layout.width = result.0;
    layout.height = result.1;
    result
}

fn measure_container(
    tree: &mut Tree,
    node: NodeId,
    style: &crate::style::Style,
    sizing: &crate::compute::common::BoxSizing,
    direction: Direction,
) -> (f64, f64) {
    let flex_direction = style.flex_direction;
    let children = tree.children(node).to_vec();
    let gap_main = if flex_direction.is_row() { style.gap.width } else { style.gap.height };

    let content_main = sizing.content_size.main(flex_direction);
    let content_cross = sizing.content_size.cross(flex_direction);

    let mut sum_main = 0.0_f64;
    let mut max_cross = 0.0_f64;
    let mut seen_any = false;

    for &child in &children {
        let child_style = tree.style_unchecked(child);
        if child_style.display == Display::None || child_style.position_type == PositionType::Absolute {
            continue;
        }
        let child_direction = child_style.flex_direction;
        let _ = child_direction;

        let (child_w_avail, child_h_avail) = if flex_direction.is_row() {
            (f64::NAN, content_cross)
        } else {
            (content_cross, f64::NAN)
        };

        let saved = *tree.layout_unchecked(child);
        let (cw, ch) = measure(tree, child, child_w_avail, child_h_avail, direction);
        *tree.layout_mut(child) = saved;

        let child_main = if flex_direction.is_row() { cw } else { ch };
        let child_cross = if flex_direction.is_row() { ch } else { cw };

        let child_style = tree.style_unchecked(child);
        let margin = crate::geometry::Rect::new(
            child_style.margin.resolve_spacing(0, direction, f64::NAN),
            child_style.margin.resolve_spacing(1, direction, f64::NAN),
            child_style.margin.resolve_spacing(2, direction, f64::NAN),
            child_style.margin.resolve_spacing(3, direction, f64::NAN),
        );

        let gap = if seen_any { gap_main } else { 0.0 };
        sum_main += gap + child_main + margin.main(flex_direction);
        max_cross = max_cross.max(child_cross + margin.cross(flex_direction));
        seen_any = true;
    }

    let main_result = if content_main.is_nan() { sum_main } else { content_main };
    let cross_result = if content_cross.is_nan() { max_cross } else { content_cross };

    let floor_main = sizing.padding.main(flex_direction) + sizing.border.main(flex_direction);
    let floor_cross = sizing.padding.cross(flex_direction) + sizing.border.cross(flex_direction);

    let main_total = main_result + floor_main;
    let cross_total = cross_result + floor_cross;

    if flex_direction.is_row() {
        (main_total, cross_total)
    } else {
        (cross_total, main_total)
    }
}

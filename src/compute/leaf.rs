//! The measure-callback plumbing shared between the full leaf phase (§4.1
//! Phase 4) and the intrinsic measurer's childless-node path (§4.2).

use crate::compute::common::BoxSizing;
use crate::geometry::Size;
use crate::node::{NodeId, Tree};
use crate::style::MeasureMode;

fn measure_modes(sizing: &BoxSizing, avail: Size<f64>) -> ((MeasureMode, f64), (MeasureMode, f64)) {
    let width = if !sizing.size.width.is_nan() {
        (MeasureMode::Exactly, sizing.content_size.width)
    } else if avail.width.is_nan() {
        (MeasureMode::Undefined, f64::INFINITY)
    } else {
        let at_most =
            (avail.width - sizing.margin.horizontal() - sizing.padding.horizontal() - sizing.border.horizontal())
                .max(0.0);
        (MeasureMode::AtMost, at_most)
    };
    let height = if !sizing.size.height.is_nan() {
        (MeasureMode::Exactly, sizing.content_size.height)
    } else if avail.height.is_nan() {
        (MeasureMode::Undefined, f64::INFINITY)
    } else {
        let at_most =
            (avail.height - sizing.margin.vertical() - sizing.padding.vertical() - sizing.border.vertical())
                .max(0.0);
        (MeasureMode::AtMost, at_most)
    };
    (width, height)
}

fn add_back_spacing(
    result: (f64, f64),
    w_mode: MeasureMode,
    h_mode: MeasureMode,
    sizing: &BoxSizing,
) -> (f64, f64) {
    let w = if w_mode == MeasureMode::Exactly {
        sizing.size.width
    } else {
        result.0 + sizing.padding.horizontal() + sizing.border.horizontal()
    };
    let h = if h_mode == MeasureMode::Exactly {
        sizing.size.height
    } else {
        result.1 + sizing.padding.vertical() + sizing.border.vertical()
    };
    (w, h)
}

/// Calls the node's measure callback (going through the measure cache
/// first), returning the node's full border-box `(width, height)`.
pub fn measure_via_callback(tree: &mut Tree, node: NodeId, sizing: &BoxSizing, avail: Size<f64>) -> (f64, f64) {
    let ((w_mode, avail_w), (h_mode, avail_h)) = measure_modes(sizing, avail);

    // The measure cache is cleared on `mark_dirty` (F5); it does not also
    // need a dirty-flag gate on read (that rule is for the sizing/layout
    // cache, F3). A node stays `is_dirty` for the whole pass it's being
    // measured in, so gating the read on it would prevent the cache from
    // ever serving a hit for the text node it exists to accelerate.
    if let Some(cached) = tree.measure_cache_mut(node).get(avail_w, w_mode, avail_h, h_mode) {
        return add_back_spacing(cached, w_mode, h_mode, sizing);
    }

    let result = {
        let callback = tree.measure_func_mut(node).expect("leaf node has a measure function");
        callback(avail_w, w_mode, avail_h, h_mode)
    };
    tree.measure_cache_mut(node).insert(avail_w, w_mode, avail_h, h_mode, result);
    add_back_spacing(result, w_mode, h_mode, sizing)
}

/// The no-measure-callback leaf case: intrinsic size is just padding+border.
pub fn measure_intrinsic_floor(sizing: &BoxSizing) -> (f64, f64) {
    let w = if sizing.size.width.is_nan() {
        sizing.padding.horizontal() + sizing.border.horizontal()
    } else {
        sizing.size.width
    };
    let h = if sizing.size.height.is_nan() {
        sizing.padding.vertical() + sizing.border.vertical()
    } else {
        sizing.size.height
    };
    (w, h)
}

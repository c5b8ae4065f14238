//! Shared Phase 2 (spacing) / Phase 3 (node dimensions) logic used
//! identically by the full algorithm (`flexbox::layout_node`) and the
//! intrinsic measurer (`measure::measure`), per §4.1/§4.2: "Its logic
//! mirrors Phases 2, 3, 4 exactly."

use crate::compute::edge_resolver::apply_min_max;
use crate::geometry::{Rect, Size};
use crate::style::{Direction, Style};

/// The result of Phases 2 and 3: resolved spacing plus the node's own
/// border-box size (components may be NaN, meaning shrink-to-fit) and its
/// content-box size (NaN wherever the outer dimension is NaN).
#[derive(Debug, Clone, Copy)]
pub struct BoxSizing {
    pub margin: Rect<f64>,
    pub padding: Rect<f64>,
    pub border: Rect<f64>,
    pub size: Size<f64>,
    pub content_size: Size<f64>,
}

fn resolve_axis_value(value: crate::style::Value, avail_axis: f64, margin_axis: f64) -> f64 {
    use crate::style::Unit;
    match value.unit {
        Unit::Point => value.magnitude,
        Unit::Percent => {
            if avail_axis.is_nan() {
                0.0
            } else {
                avail_axis * (value.magnitude / 100.0)
            }
        }
        Unit::Auto | Unit::Undefined => {
            if avail_axis.is_nan() {
                f64::NAN
            } else {
                (avail_axis - margin_axis).max(0.0)
            }
        }
    }
}

/// Phase 2 + Phase 3. `avail` is the space available to this node on each
/// axis (NaN meaning unconstrained).
pub fn resolve_box(style: &Style, direction: Direction, avail: Size<f64>) -> BoxSizing {
    // Phase 2: margins and paddings resolve percentages against the
    // containing block's WIDTH only, even for top/bottom (§4.1 Phase 2).
    let containing_width = avail.width;
    let margin = Rect::new(
        style.margin.resolve_spacing(0, direction, containing_width),
        style.margin.resolve_spacing(1, direction, containing_width),
        style.margin.resolve_spacing(2, direction, containing_width),
        style.margin.resolve_spacing(3, direction, containing_width),
    );
    let padding = Rect::new(
        style.padding.resolve_spacing(0, direction, containing_width).max(0.0),
        style.padding.resolve_spacing(1, direction, containing_width).max(0.0),
        style.padding.resolve_spacing(2, direction, containing_width).max(0.0),
        style.padding.resolve_spacing(3, direction, containing_width).max(0.0),
    );
    let border = Rect::new(
        style.border.resolve(0, direction),
        style.border.resolve(1, direction),
        style.border.resolve(2, direction),
        style.border.resolve(3, direction),
    );

    // Phase 3: node dimensions.
    let mut width = resolve_axis_value(style.size.width, avail.width, margin.horizontal());
    let mut height = resolve_axis_value(style.size.height, avail.height, margin.vertical());

    // Aspect ratio: if exactly one axis is auto and the other concrete,
    // derive the auto one.
    if style.aspect_ratio.is_finite() && style.aspect_ratio > 0.0 {
        if width.is_nan() && !height.is_nan() {
            width = height * style.aspect_ratio;
        } else if height.is_nan() && !width.is_nan() {
            height = width / style.aspect_ratio;
        }
    }

    let min_width = style.min_size.width.resolve_size(avail.width);
    let max_width = style.max_size.width.resolve_size(avail.width);
    let min_height = style.min_size.height.resolve_size(avail.height);
    let max_height = style.max_size.height.resolve_size(avail.height);

    width = apply_min_max(width, min_width, max_width);
    height = apply_min_max(height, min_height, max_height);

    // Box-model floor: width/height must be at least padding + border.
    let floor_width = padding.horizontal() + border.horizontal();
    let floor_height = padding.vertical() + border.vertical();
    if !width.is_nan() {
        width = width.max(floor_width);
    }
    if !height.is_nan() {
        height = height.max(floor_height);
    }

    let content_width = if width.is_nan() { f64::NAN } else { width - floor_width };
    let content_height = if height.is_nan() { f64::NAN } else { height - floor_height };

    BoxSizing {
        margin,
        padding,
        border,
        size: Size::new(width, height),
        content_size: Size::new(content_width, content_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Value;

    #[test]
    fn auto_size_under_nan_available_is_shrink_to_fit() {
        let style = Style::default();
        let sizing = resolve_box(&style, Direction::Ltr, Size::NAN);
        assert!(sizing.size.width.is_nan());
        assert!(sizing.size.height.is_nan());
    }

    #[test]
    fn explicit_point_size_is_used_directly() {
        let mut style = Style::default();
        style.size.width = Value::points(120.0);
        let sizing = resolve_box(&style, Direction::Ltr, Size::new(500.0, f64::NAN));
        assert_eq!(sizing.size.width, 120.0);
    }

    #[test]
    fn box_model_floor_is_enforced() {
        let mut style = Style::default();
        style.size.width = Value::points(2.0);
        style.padding.set(crate::style::Edge::All, Value::points(5.0));
        style.border.set(crate::style::Edge::All, 1.0);
        let sizing = resolve_box(&style, Direction::Ltr, Size::NAN);
        assert_eq!(sizing.size.width, 12.0);
    }
}

//! The eleven-phase layout algorithm (§4.1). Phases are implemented as
//! private helper functions rather than as an object with phase methods —
//! the contract is the phase, not the code shape (§4.1 preamble).

use crate::compute::common::{resolve_box, BoxSizing};
use crate::compute::edge_resolver::apply_min_max;
use crate::compute::scratch::{self, LineLayout, ScratchFrame};
use crate::compute::{leaf, line, measure};
use crate::geometry::{Rect, Size};
use crate::node::{NodeId, Tree};
use crate::style::{Align, Direction, Display, FlexDirection, Justify, PositionType, Style, Unit};
use crate::sys::{max_ignore_nan, round};

/// Phases 2-11. The caller (`compute::layout_node`) has already handled
/// Phase 1 (display:none / fingerprint skip).
pub fn compute(
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
    let style = tree.style_unchecked(node).clone();
    let avail = Size::new(avail_w, avail_h);
    let sizing = resolve_box(&style, direction, avail);

    // Phase 4 (leaf short-circuit). Leaves never need the line-grouping
    // scratch, so they skip checking a frame out of the pool entirely.
    if tree.is_childless(node) {
        layout_leaf(tree, node, &sizing, avail_w, avail_h, offset_x, offset_y, abs_x, abs_y, direction);
        return;
    }

    scratch::with_frame(|frame| {
        compute_container(tree, node, &style, &sizing, avail, offset_x, offset_y, abs_x, abs_y, direction, frame);
    });
}

#[allow(clippy::too_many_arguments)]
fn compute_container(
    tree: &mut Tree,
    node: NodeId,
    style: &Style,
    sizing: &BoxSizing,
    avail: Size<f64>,
    offset_x: f64,
    offset_y: f64,
    abs_x: f64,
    abs_y: f64,
    direction: Direction,
    frame: &mut ScratchFrame,
) {
    let flex_direction = style.flex_direction;

    // Phase 5: collect children and compute base sizes.
    collect_children(tree, node, style, direction, avail, sizing, frame);

    let main_gap = if flex_direction.is_row() { style.gap.width } else { style.gap.height };
    let cross_gap = if flex_direction.is_row() { style.gap.height } else { style.gap.width };

    let content_main = sizing.content_size.main(flex_direction);
    let content_cross = sizing.content_size.cross(flex_direction);

    let container_max_main = {
        let max_style = if flex_direction.is_row() { style.max_size.width } else { style.max_size.height };
        let avail_main = if flex_direction.is_row() { avail.width } else { avail.height };
        let resolved = max_style.resolve_size(avail_main);
        let floor = sizing.padding.main(flex_direction) + sizing.border.main(flex_direction);
        if resolved.is_nan() { f64::NAN } else { resolved - floor }
    };

    let main_axis_size_for_breaking =
        if !content_main.is_nan() { content_main } else { container_max_main };

    // Phase 6a: line breaking + distribution. `relative_children` is taken
    // out of `frame` for the duration of the call (`break_into_lines` writes
    // `frame.line_children`/`frame.line_bounds`, so the two can't alias) and
    // put back immediately after — no allocation either way, just a swap of
    // the `Vec`'s header with an empty placeholder.
    let relative_children = std::mem::take(&mut frame.relative_children);
    line::break_into_lines(
        tree,
        frame,
        &relative_children,
        main_axis_size_for_breaking,
        main_gap,
        style.flex_wrap,
        flex_direction,
    );
    frame.relative_children = relative_children;

    let n_lines = frame.line_bounds.len() - 1;

    frame.line_used_main.clear();
    for li in 0..n_lines {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        let margin_sum: f64 = frame.line_children[s..e].iter().map(|&c| tree.flex(c).margin_main(flex_direction)).sum();
        let len = e - s;
        let gaps = if len > 1 { main_gap * (len - 1) as f64 } else { 0.0 };
        let budget = if main_axis_size_for_breaking.is_nan() {
            f64::NAN
        } else {
            main_axis_size_for_breaking - margin_sum - gaps
        };
        line::distribute_line(tree, &frame.line_children[s..e], budget);
        // Defensive re-clamp (§4.1 Phase 6a: "Clamp every mainSize to
        // [min_main, max_main] after distribution").
        for &child in &frame.line_children[s..e] {
            let flex = tree.flex_mut(child);
            flex.main_size = apply_min_max(flex.main_size, flex.min_main, flex.max_main);
        }
        let used: f64 = frame.line_children[s..e]
            .iter()
            .map(|&c| tree.flex(c).main_size + tree.flex(c).margin_main(flex_direction))
            .sum::<f64>()
            + gaps;
        frame.line_used_main.push(used);
    }

    // Phase 6b: per-line justify & auto margins.
    frame.line_layouts.clear();
    for li in 0..n_lines {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        let used = frame.line_used_main[li];
        let effective_main = if !content_main.is_nan() { content_main } else { used };
        let remaining = if content_main.is_nan() { 0.0 } else { content_main - used };

        let has_auto_margin = frame.line_children[s..e]
            .iter()
            .any(|&c| tree.flex(c).margin_main_start_auto || tree.flex(c).margin_main_end_auto);

        let n = e - s;
        let (start_offset, item_spacing) = if has_auto_margin {
            distribute_auto_margins(tree, &frame.line_children[s..e], remaining.max(0.0), flex_direction);
            (0.0, main_gap)
        } else {
            match style.justify_content {
                Justify::FlexStart => (0.0, main_gap),
                Justify::FlexEnd => (remaining, main_gap),
                Justify::Center => (remaining / 2.0, main_gap),
                Justify::SpaceBetween if remaining > 0.0 && n > 1 => {
                    (0.0, main_gap + remaining / (n - 1) as f64)
                }
                Justify::SpaceAround if remaining > 0.0 && n > 0 => {
                    let extra = remaining / n as f64;
                    (extra / 2.0, main_gap + extra)
                }
                Justify::SpaceEvenly if remaining > 0.0 => {
                    let extra = remaining / (n + 1) as f64;
                    (extra, main_gap + extra)
                }
                _ => (0.0, main_gap),
            }
        };

        frame.line_layouts.push(LineLayout {
            start_offset,
            item_spacing,
            effective_main,
            cross_offset: 0.0,
            cross_size: 0.0,
            baseline: f64::NAN,
        });
    }

    // Phase 6c: baselines.
    let needs_baseline = flex_direction.is_row()
        && (style.align_items == Align::Baseline
            || frame.relative_children.iter().any(|&c| tree.style_unchecked(c).align_self == Align::Baseline));
    if needs_baseline {
        for li in 0..n_lines {
            let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
            let mut max_baseline = 0.0_f64;
            for i in s..e {
                let child = frame.line_children[i];
                let align = tree.style_unchecked(child).resolved_align_self(style.align_items);
                if align != Align::Baseline {
                    continue;
                }
                let baseline = compute_child_baseline(tree, child, direction);
                max_baseline = max_baseline.max(baseline);
            }
            frame.line_layouts[li].baseline = max_baseline;
        }
    }

    // Phase 7a: estimate line cross sizes.
    for li in 0..n_lines {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        let mut estimate = 0.0_f64;
        for i in s..e {
            let child = frame.line_children[i];
            let child_style = tree.style_unchecked(child);
            let explicit_cross = if flex_direction.is_row() { child_style.size.height } else { child_style.size.width };
            let resolved = explicit_cross.resolve_size(content_cross);
            let cross_val = if resolved.is_nan() { 0.0 } else { resolved };
            let margin_cross = tree.flex(child).margin_cross(flex_direction);
            estimate = estimate.max(cross_val + margin_cross);
        }
        frame.line_layouts[li].cross_size = estimate;
    }

    // A `nowrap` container's one line takes the container's inner cross
    // size outright (CSS §9.4), not just the tallest item's — this is what
    // lets `align-items` center/stretch against the whole container rather
    // than against a shrink-to-fit line box. A `wrap` container that only
    // happens to produce one line keeps the normal estimate; any stretching
    // there is align-content's job.
    if style.flex_wrap == crate::style::FlexWrap::NoWrap && !content_cross.is_nan() {
        frame.line_layouts[0].cross_size = content_cross;
    }

    // Phase 7b: align_content (only when the cross axis has a definite size).
    if !content_cross.is_nan() {
        let n = n_lines;
        let gaps_total = if n > 1 { cross_gap * (n - 1) as f64 } else { 0.0 };
        let used_cross: f64 = frame.line_layouts.iter().map(|l| l.cross_size).sum::<f64>() + gaps_total;
        let remaining = content_cross - used_cross;

        let mut cursor = 0.0_f64;
        match style.align_content {
            Align::FlexEnd => {
                cursor = remaining.max(0.0);
                for l in frame.line_layouts.iter_mut() {
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap;
                }
            }
            Align::Center => {
                cursor = remaining.max(0.0) / 2.0;
                for l in frame.line_layouts.iter_mut() {
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap;
                }
            }
            Align::SpaceBetween if n > 1 && remaining > 0.0 => {
                let gap_extra = remaining / (n - 1) as f64;
                for l in frame.line_layouts.iter_mut() {
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap + gap_extra;
                }
            }
            Align::SpaceAround if remaining > 0.0 && n > 0 => {
                let extra = remaining / n as f64;
                cursor = extra / 2.0;
                for l in frame.line_layouts.iter_mut() {
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap + extra;
                }
            }
            Align::Stretch => {
                let grow_each = if n > 0 { remaining.max(0.0) / n as f64 } else { 0.0 };
                for l in frame.line_layouts.iter_mut() {
                    l.cross_size += grow_each;
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap;
                }
            }
            _ => {
                for l in frame.line_layouts.iter_mut() {
                    l.cross_offset = cursor;
                    cursor += l.cross_size + cross_gap;
                }
            }
        }

        if style.flex_wrap == crate::style::FlexWrap::WrapReverse {
            for l in frame.line_layouts.iter_mut() {
                l.cross_offset = content_cross - l.cross_offset - l.cross_size;
            }
        }
    } else {
        let mut cursor = 0.0_f64;
        for l in frame.line_layouts.iter_mut() {
            l.cross_offset = cursor;
            cursor += l.cross_size + cross_gap;
        }
    }

    // Phase 8: position and layout each relative child.
    let main_reverse = flex_direction.is_reverse() ^ (flex_direction.is_row() && direction == Direction::Rtl);
    let content_origin_x = sizing.border.left + sizing.padding.left;
    let content_origin_y = sizing.border.top + sizing.padding.top;

    let mut node_main_used_total = 0.0_f64;
    let mut node_cross_used_total = 0.0_f64;

    for li in 0..n_lines {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        let ll_effective_main = frame.line_layouts[li].effective_main;
        let ll_start_offset = frame.line_layouts[li].start_offset;
        let ll_item_spacing = frame.line_layouts[li].item_spacing;
        let ll_cross_offset = frame.line_layouts[li].cross_offset;
        let ll_cross_size = frame.line_layouts[li].cross_size;
        let ll_baseline = frame.line_layouts[li].baseline;

        let mut lead = if main_reverse { ll_effective_main - ll_start_offset } else { ll_start_offset };
        let line_len = e - s;

        for i in s..e {
            let child = frame.line_children[i];
            let ci = i - s;
            let child_style = tree.style_unchecked(child).clone();
            let flex = *tree.flex(child);

            let (margin_start, margin_end) = if flex_direction.is_row() {
                (flex.margin_left, flex.margin_right)
            } else {
                (flex.margin_top, flex.margin_bottom)
            };

            let main_pos = if main_reverse {
                lead -= margin_end;
                lead -= flex.main_size;
                let pos = lead;
                lead -= margin_start;
                pos
            } else {
                lead += margin_start;
                let pos = lead;
                lead += flex.main_size;
                lead += margin_end;
                pos
            };
            if ci + 1 < line_len {
                lead += if main_reverse { -ll_item_spacing } else { ll_item_spacing };
            }

            // Step 3: resolve cross size.
            let align = child_style.resolved_align_self(style.align_items);
            let cross_margin_start = if flex_direction.is_row() { flex.margin_top } else { flex.margin_left };
            let cross_margin_end = if flex_direction.is_row() { flex.margin_bottom } else { flex.margin_right };
            let cross_margin_total = cross_margin_start + cross_margin_end;

            let explicit_cross = if flex_direction.is_row() { child_style.size.height } else { child_style.size.width };
            let mut cross_size = {
                let resolved = explicit_cross.resolve_size(content_cross);
                if !resolved.is_nan() {
                    resolved
                } else if align == Align::Stretch && !content_cross.is_nan() {
                    (ll_cross_size - cross_margin_total).max(0.0)
                } else {
                    f64::NAN
                }
            };
            let min_cross = if flex_direction.is_row() {
                child_style.min_size.height.resolve_size(content_cross)
            } else {
                child_style.min_size.width.resolve_size(content_cross)
            };
            let max_cross = if flex_direction.is_row() {
                child_style.max_size.height.resolve_size(content_cross)
            } else {
                child_style.max_size.width.resolve_size(content_cross)
            };
            cross_size = apply_min_max(cross_size, min_cross, max_cross);

            // Alignment needs a concrete cross size even when the child is
            // shrink-to-fit on that axis; get one from the intrinsic
            // measurer without committing it to the recursive layout call.
            let cross_size_for_alignment = if !cross_size.is_nan() {
                cross_size
            } else {
                let saved = *tree.layout_unchecked(child);
                let (w, h) = if flex_direction.is_row() {
                    measure::measure(tree, child, flex.main_size, f64::NAN, direction)
                } else {
                    measure::measure(tree, child, f64::NAN, flex.main_size, direction)
                };
                *tree.layout_mut(child) = saved;
                if flex_direction.is_row() { h } else { w }
            };

            let cross_offset_in_line = match align {
                Align::Center => ((ll_cross_size - cross_size_for_alignment - cross_margin_total) / 2.0).max(0.0)
                    + cross_margin_start,
                Align::FlexEnd => (ll_cross_size - cross_size_for_alignment - cross_margin_total).max(0.0)
                    + cross_margin_start,
                Align::Baseline => {
                    let my_baseline = compute_child_baseline(tree, child, direction);
                    (ll_baseline - my_baseline).max(0.0) + cross_margin_start
                }
                _ => cross_margin_start,
            };
            let cross_pos = ll_cross_offset + cross_offset_in_line;

            // Step 4: fractional position.
            let (mut frac_x, mut frac_y) = if flex_direction.is_row() {
                (main_pos, cross_pos)
            } else {
                (cross_pos, main_pos)
            };

            // Step 5: position-type RELATIVE offsets.
            if child_style.position_type == PositionType::Relative {
                let (dx, dy) = relative_position_offset(&child_style, direction, content_cross, content_main);
                frac_x += dx;
                frac_y += dy;
            }

            frac_x += content_origin_x;
            frac_y += content_origin_y;

            let child_abs_x = abs_x + frac_x;
            let child_abs_y = abs_y + frac_y;

            // Step 7: edge-based rounding of the main-axis extent.
            let main_start_abs = if flex_direction.is_row() { child_abs_x } else { child_abs_y };
            let main_start_rounded = round(main_start_abs);
            let main_end_rounded = round(main_start_abs + flex.main_size);
            let edge_based_main_size = main_end_rounded - main_start_rounded;

            // Step 8-9: decide what to pass to the recursive call.
            let is_measure_leaf = tree.is_childless(child) && tree.has_measure_func_unchecked(child);
            let grew_via_distribution = (flex.main_size - flex.base_size).abs() > f64::EPSILON;
            let has_flex_grow = child_style.flex_grow > 0.0;
            let explicit_main_set =
                if flex_direction.is_row() { child_style.size.width } else { child_style.size.height }.is_defined();
            let percent_main =
                if flex_direction.is_row() { child_style.size.width } else { child_style.size.height }.unit == Unit::Percent;

            let pass_main = if is_measure_leaf || has_flex_grow || grew_via_distribution || explicit_main_set {
                Some(flex.main_size)
            } else if percent_main {
                Some(content_main)
            } else {
                None
            };
            let pass_cross = if is_measure_leaf {
                Some(if cross_size.is_nan() { content_cross } else { cross_size })
            } else if explicit_cross.is_defined() {
                Some(cross_size)
            } else if explicit_cross.unit == Unit::Percent {
                Some(content_cross)
            } else if !cross_size.is_nan() {
                Some(cross_size)
            } else {
                None
            };

            let (child_w, child_h) = if flex_direction.is_row() {
                (pass_main.unwrap_or(f64::NAN), pass_cross.unwrap_or(f64::NAN))
            } else {
                (pass_cross.unwrap_or(f64::NAN), pass_main.unwrap_or(f64::NAN))
            };

            let rel_left = round(frac_x) - round(abs_x);
            let rel_top = round(frac_y) - round(abs_y);

            compute_layout_entry(tree, child, child_w, child_h, rel_left, rel_top, child_abs_x, child_abs_y, direction);

            // Step 10: override width/height with edge-based size where required.
            let override_main = explicit_main_set || has_flex_grow || is_measure_leaf || grew_via_distribution;
            let override_cross =
                explicit_cross.is_defined() || (!content_cross.is_nan() && align == Align::Stretch) || is_measure_leaf;

            {
                let layout = tree.layout_mut(child);
                if override_main {
                    if flex_direction.is_row() {
                        layout.width = edge_based_main_size;
                    } else {
                        layout.height = edge_based_main_size;
                    }
                }
                if override_cross {
                    let cross_final = if cross_size.is_nan() { cross_size_for_alignment } else { cross_size };
                    if flex_direction.is_row() {
                        layout.height = cross_final.max(0.0);
                    } else {
                        layout.width = cross_final.max(0.0);
                    }
                }
            }
        }

        node_main_used_total = node_main_used_total.max(frame.line_used_main[li]);
        node_cross_used_total += ll_cross_size + if li + 1 < n_lines { cross_gap } else { 0.0 };
    }

    // Phase 9: shrink-wrap.
    let mut final_width = sizing.size.width;
    let mut final_height = sizing.size.height;
    if flex_direction.is_row() {
        if final_width.is_nan() {
            final_width = node_main_used_total + sizing.padding.horizontal() + sizing.border.horizontal();
        }
        if final_height.is_nan() {
            final_height = node_cross_used_total + sizing.padding.vertical() + sizing.border.vertical();
        }
    } else {
        if final_height.is_nan() {
            final_height = node_main_used_total + sizing.padding.vertical() + sizing.border.vertical();
        }
        if final_width.is_nan() {
            final_width = node_cross_used_total + sizing.padding.horizontal() + sizing.border.horizontal();
        }
    }

    // Phase 10: finalize.
    let min_width = style.min_size.width.resolve_size(avail.width);
    let max_width = style.max_size.width.resolve_size(avail.width);
    let min_height = style.min_size.height.resolve_size(avail.height);
    let max_height = style.max_size.height.resolve_size(avail.height);
    final_width = apply_min_max(final_width, min_width, max_width);
    final_height = apply_min_max(final_height, min_height, max_height);
    final_width = final_width.max(sizing.padding.horizontal() + sizing.border.horizontal());
    final_height = final_height.max(sizing.padding.vertical() + sizing.border.vertical());

    let width_rounded = round(abs_x + final_width) - round(abs_x);
    let height_rounded = round(abs_y + final_height) - round(abs_y);

    {
        let layout = tree.layout_mut(node);
        layout.left = round(offset_x);
        layout.top = round(offset_y);
        layout.width = width_rounded;
        layout.height = height_rounded;
    }

    // Phase 11: absolute children.
    layout_absolute_children(tree, node, &style, &sizing, direction, abs_x, abs_y);

    write_fingerprint(tree, node, avail_w, avail_h, offset_x, offset_y, direction);
}

fn relative_position_offset(style: &Style, direction: Direction, content_cross: f64, content_main: f64) -> (f64, f64) {
    let inline_ref = content_main.max(content_cross).max(0.0);
    let block_ref = content_cross.max(content_main).max(0.0);
    let left_auto = style.position.is_auto(0, direction);
    let right_auto = style.position.is_auto(2, direction);
    let top_auto = style.position.is_auto(1, direction);
    let bottom_auto = style.position.is_auto(3, direction);

    let dx = if !left_auto {
        style.position.resolve_size(0, direction, inline_ref)
    } else if !right_auto {
        -style.position.resolve_size(2, direction, inline_ref)
    } else {
        0.0
    };
    let dy = if !top_auto {
        style.position.resolve_size(1, direction, block_ref)
    } else if !bottom_auto {
        -style.position.resolve_size(3, direction, block_ref)
    } else {
        0.0
    };
    (dx, dy)
}

fn distribute_auto_margins(tree: &mut Tree, line_children: &[NodeId], remaining: f64, flex_direction: FlexDirection) {
    let mut auto_count = 0usize;
    for &c in line_children {
        let flex = tree.flex(c);
        auto_count += flex.margin_main_start_auto as usize + flex.margin_main_end_auto as usize;
    }
    if auto_count == 0 {
        return;
    }
    let each = remaining.max(0.0) / auto_count as f64;
    for &c in line_children {
        let flex = tree.flex_mut(c);
        if flex.margin_main_start_auto {
            if flex_direction.is_row() {
                flex.margin_left = each;
            } else {
                flex.margin_top = each;
            }
        }
        if flex.margin_main_end_auto {
            if flex_direction.is_row() {
                flex.margin_right = each;
            } else {
                flex.margin_bottom = each;
            }
        }
    }
}

fn layout_leaf(
    tree: &mut Tree,
    node: NodeId,
    sizing: &BoxSizing,
    avail_w: f64,
    avail_h: f64,
    offset_x: f64,
    offset_y: f64,
    abs_x: f64,
    abs_y: f64,
    direction: Direction,
) {
    let avail = Size::new(avail_w, avail_h);
    let (width, height) = if tree.has_measure_func_unchecked(node) {
        leaf::measure_via_callback(tree, node, sizing, avail)
    } else {
        leaf::measure_intrinsic_floor(sizing)
    };

    let width = round(abs_x + width) - round(abs_x);
    let height = round(abs_y + height) - round(abs_y);

    {
        let layout = tree.layout_mut(node);
        layout.left = round(offset_x);
        layout.top = round(offset_y);
        layout.width = width;
        layout.height = height;
    }

    write_fingerprint(tree, node, avail.width, avail.height, offset_x, offset_y, direction);
}

fn write_fingerprint(tree: &mut Tree, node: NodeId, avail_w: f64, avail_h: f64, offset_x: f64, offset_y: f64, direction: Direction) {
    let flex = tree.flex_mut(node);
    flex.fingerprint.avail_w = avail_w;
    flex.fingerprint.avail_h = avail_h;
    flex.fingerprint.offset_x = offset_x;
    flex.fingerprint.offset_y = offset_y;
    flex.fingerprint.direction = direction;
    flex.fingerprint.valid = true;
}

fn compute_child_baseline(tree: &mut Tree, child: NodeId, direction: Direction) -> f64 {
    let saved = *tree.layout_unchecked(child);
    let style = tree.style_unchecked(child).clone();
    let height = if style.size.height.is_defined() {
        style.size.height.resolve_size(f64::NAN)
    } else {
        let (_, h) = measure::measure(tree, child, f64::NAN, f64::NAN, direction);
        h
    };
    let baseline = if let Some(f) = tree.baseline_func(child) {
        let width = tree.layout_unchecked(child).width;
        f(width, height)
    } else {
        height
    };
    *tree.layout_mut(child) = saved;
    baseline
}

/// The recursive entry point used from Phase 8 and Phase 11; thin wrapper so
/// this module does not need to special-case Phase 1's early-exit logic at
/// every call site.
fn compute_layout_entry(
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
    crate::compute::layout_node(tree, node, avail_w, avail_h, offset_x, offset_y, abs_x, abs_y, direction);
}

fn layout_absolute_children(
    tree: &mut Tree,
    node: NodeId,
    style: &Style,
    sizing: &BoxSizing,
    direction: Direction,
    abs_x: f64,
    abs_y: f64,
) {
    let padding_box_w = sizing.size.width - sizing.border.horizontal();
    let padding_box_h = sizing.size.height - sizing.border.vertical();
    let content_box_w = sizing.content_size.width;
    let content_box_h = sizing.content_size.height;

    let children = tree.children(node).to_vec();
    for child in children {
        let child_style = tree.style_unchecked(child).clone();
        if child_style.position_type != PositionType::Absolute || child_style.display == Display::None {
            continue;
        }

        let left = child_style.position.resolve_size(0, direction, content_box_w);
        let top = child_style.position.resolve_size(1, direction, content_box_h);
        let right = child_style.position.resolve_size(2, direction, content_box_w);
        let bottom = child_style.position.resolve_size(3, direction, content_box_h);
        let left_auto = child_style.position.is_auto(0, direction);
        let right_auto = child_style.position.is_auto(2, direction);
        let top_auto = child_style.position.is_auto(1, direction);
        let bottom_auto = child_style.position.is_auto(3, direction);

        let mut width = child_style.size.width.resolve_size(content_box_w);
        if width.is_nan() && !left_auto && !right_auto {
            width = (padding_box_w - left - right).max(0.0);
        }
        let mut height = child_style.size.height.resolve_size(content_box_h);
        if height.is_nan() && !top_auto && !bottom_auto {
            height = (padding_box_h - top - bottom).max(0.0);
        }

        let avail_for_child = Size::new(
            if width.is_nan() { padding_box_w } else { width },
            if height.is_nan() { padding_box_h } else { height },
        );

        let child_abs_x_guess = abs_x + sizing.border.left + left.max(0.0);
        let child_abs_y_guess = abs_y + sizing.border.top + top.max(0.0);
        compute_layout_entry(
            tree,
            child,
            avail_for_child.width,
            avail_for_child.height,
            0.0,
            0.0,
            child_abs_x_guess,
            child_abs_y_guess,
            direction,
        );

        let resolved_w = tree.layout_unchecked(child).width;
        let resolved_h = tree.layout_unchecked(child).height;

        let final_x = if !left_auto {
            sizing.border.left + left
        } else if !right_auto {
            sizing.border.left + padding_box_w - right - resolved_w
        } else {
            let align = child_style.resolved_align_self(style.align_items);
            sizing.border.left
                + match align {
                    Align::Center => ((padding_box_w - resolved_w) / 2.0).max(0.0),
                    Align::FlexEnd => (padding_box_w - resolved_w).max(0.0),
                    _ => 0.0,
                }
        };
        let final_y = if !top_auto {
            sizing.border.top + top
        } else if !bottom_auto {
            sizing.border.top + padding_box_h - bottom - resolved_h
        } else {
            match style.justify_content {
                Justify::Center => sizing.border.top + ((padding_box_h - resolved_h) / 2.0).max(0.0),
                Justify::FlexEnd => sizing.border.top + (padding_box_h - resolved_h).max(0.0),
                _ => sizing.border.top,
            }
        };

        let layout = tree.layout_mut(child);
        layout.left = round(final_x);
        layout.top = round(final_y);
    }
}

/// Phase 5: sorts `node`'s own children into relative (flex-participating)
/// ones, writing them into `frame.relative_children` in source order, and
/// computes each relative child's base size and resolved margins. Skipped
/// children (none/absolute) are marked via `relative_index = -1` and
/// otherwise dropped; nothing downstream reads them back, so no buffer holds
/// them.
fn collect_children(
    tree: &mut Tree,
    node: NodeId,
    style: &Style,
    direction: Direction,
    avail: Size<f64>,
    sizing: &BoxSizing,
    frame: &mut ScratchFrame,
) {
    let flex_direction = style.flex_direction;
    frame.own_children.clear();
    frame.own_children.extend_from_slice(tree.children(node));
    frame.relative_children.clear();

    let (main_start_edge, main_end_edge) = style.margin.resolve_main_start_end(flex_direction, direction);

    for i in 0..frame.own_children.len() {
        let child = frame.own_children[i];
        let child_style = tree.style_unchecked(child).clone();
        if child_style.display == Display::None || child_style.position_type == PositionType::Absolute {
            tree.flex_mut(child).relative_index = -1;
            continue;
        }

        let containing_width = avail.width;
        let margin = Rect::new(
            child_style.margin.resolve_spacing(0, direction, containing_width),
            child_style.margin.resolve_spacing(1, direction, containing_width),
            child_style.margin.resolve_spacing(2, direction, containing_width),
            child_style.margin.resolve_spacing(3, direction, containing_width),
        );

        let main_axis_size = sizing.content_size.main(flex_direction);
        let cross_axis_size = sizing.content_size.cross(flex_direction);

        let base_size = compute_base_size(tree, child, &child_style, flex_direction, direction, main_axis_size, cross_axis_size);

        let min_main_style = if flex_direction.is_row() { child_style.min_size.width } else { child_style.min_size.height };
        let max_main_style = if flex_direction.is_row() { child_style.max_size.width } else { child_style.max_size.height };
        let min_main = min_main_style.resolve_size(main_axis_size);
        let max_main = {
            let m = max_main_style.resolve_size(main_axis_size);
            if m.is_nan() { f64::INFINITY } else { m }
        };

        let mut effective_shrink = child_style.flex_shrink;
        if child_style.overflow.promotes_shrink() {
            effective_shrink = max_ignore_nan(effective_shrink, 1.0).max(1.0);
        }

        let index = frame.relative_children.len() as isize;
        let flex = tree.flex_mut(child);
        flex.base_size = base_size;
        flex.main_size = base_size;
        flex.margin_left = margin.left;
        flex.margin_top = margin.top;
        flex.margin_right = margin.right;
        flex.margin_bottom = margin.bottom;
        flex.min_main = min_main;
        flex.max_main = max_main;
        flex.effective_flex_shrink = effective_shrink;
        flex.frozen = false;
        flex.relative_index = index;
        flex.margin_main_start_auto = child_style.margin.is_auto(main_start_edge, direction);
        flex.margin_main_end_auto = child_style.margin.is_auto(main_end_edge, direction);

        frame.relative_children.push(child);
    }
}

fn compute_base_size(
    tree: &mut Tree,
    child: NodeId,
    child_style: &Style,
    flex_direction: FlexDirection,
    direction: Direction,
    main_axis_size: f64,
    cross_axis_size: f64,
) -> f64 {
    // Explicit flex_basis.
    if child_style.flex_basis.is_defined() {
        return child_style.flex_basis.resolve_size(main_axis_size).max(0.0);
    }
    // Explicit width/height on the main axis.
    let explicit_main = if flex_direction.is_row() { child_style.size.width } else { child_style.size.height };
    if explicit_main.is_defined() {
        let resolved = explicit_main.resolve_size(main_axis_size);
        if !resolved.is_nan() {
            return resolved;
        }
    }
    // Measure callback with flex_grow == 0: pre-measure directly.
    let has_measure = tree.is_childless(child) && tree.has_measure_func_unchecked(child);
    if has_measure && child_style.flex_grow == 0.0 {
        let saved = *tree.layout_unchecked(child);
        let (w, h) = measure::measure(tree, child, f64::NAN, cross_axis_size, direction);
        *tree.layout_mut(child) = saved;
        return if flex_direction.is_row() { w } else { h };
    }
    // Has children: recurse into the measurer.
    if !tree.is_childless(child) {
        let saved = *tree.layout_unchecked(child);
        let (w, h) = if flex_direction.is_row() {
            measure::measure(tree, child, f64::NAN, cross_axis_size, direction)
        } else {
            measure::measure(tree, child, cross_axis_size, f64::NAN, direction)
        };
        *tree.layout_mut(child) = saved;
        return if flex_direction.is_row() { w } else { h };
    }
    // Bare leaf: box-model floor.
    let avail = Size::new(f64::NAN, f64::NAN);
    let sizing = resolve_box(child_style, direction, avail);
    if flex_direction.is_row() {
        sizing.padding.horizontal() + sizing.border.horizontal()
    } else {
        sizing.padding.vertical() + sizing.border.vertical()
    }
}

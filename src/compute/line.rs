//! Line breaking and the §9.7 flex distributor (§4.3).

use crate::compute::edge_resolver::apply_min_max;
use crate::compute::scratch::ScratchFrame;
use crate::node::{NodeId, Tree};
use crate::style::{FlexDirection, FlexWrap};

/// Assigns each relative child a `flex.line_index` and fills
/// `frame.line_children`/`frame.line_bounds` with the flattened, per-line
/// grouping of `relative_children`: line `li` spans
/// `frame.line_children[frame.line_bounds[li]..frame.line_bounds[li + 1]]`.
/// No `Vec<Vec<NodeId>>` is built — `frame`'s buffers are cleared and reused
/// across calls instead of allocated per container per pass (§5 "allocation
/// discipline").
pub fn break_into_lines(
    tree: &mut Tree,
    frame: &mut ScratchFrame,
    relative_children: &[NodeId],
    main_axis_size: f64,
    main_gap: f64,
    wrap: FlexWrap,
    flex_direction: FlexDirection,
) {
    frame.line_children.clear();
    frame.line_bounds.clear();
    frame.line_bounds.push(0);

    if wrap == FlexWrap::NoWrap || main_axis_size.is_nan() {
        frame.line_children.extend_from_slice(relative_children);
        frame.line_bounds.push(frame.line_children.len());
    } else {
        let mut line_main = 0.0_f64;
        let mut line_start = 0usize;
        for &child in relative_children {
            let flex = tree.flex(child);
            let child_extent = flex.base_size + flex.margin_main(flex_direction);
            let empty = frame.line_children.len() == line_start;
            let gap = if empty { 0.0 } else { main_gap };
            if !empty && line_main + gap + child_extent > main_axis_size {
                frame.line_bounds.push(frame.line_children.len());
                line_start = frame.line_children.len();
                line_main = 0.0;
            }
            let gap = if frame.line_children.len() == line_start { 0.0 } else { main_gap };
            line_main += gap + child_extent;
            frame.line_children.push(child);
        }
        frame.line_bounds.push(frame.line_children.len());
    }

    if wrap == FlexWrap::WrapReverse {
        reverse_lines(frame);
    }

    for li in 0..frame.line_bounds.len() - 1 {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        for &child in &frame.line_children[s..e] {
            tree.flex_mut(child).line_index = li;
        }
    }
}

/// Flips line order (not each line's internal child order) for
/// `flex-wrap: wrap-reverse`. Swaps with `frame`'s own reversal buffers
/// rather than allocating a new pair of `Vec`s.
fn reverse_lines(frame: &mut ScratchFrame) {
    frame.reverse_buf.clear();
    frame.reverse_bounds.clear();
    frame.reverse_bounds.push(0);
    let n = frame.line_bounds.len() - 1;
    for li in (0..n).rev() {
        let (s, e) = (frame.line_bounds[li], frame.line_bounds[li + 1]);
        frame.reverse_buf.extend_from_slice(&frame.line_children[s..e]);
        frame.reverse_bounds.push(frame.reverse_buf.len());
    }
    std::mem::swap(&mut frame.line_children, &mut frame.reverse_buf);
    std::mem::swap(&mut frame.line_bounds, &mut frame.reverse_bounds);
}

/// Implements §9.7 resolving flexible lengths for a single line.
///
/// `budget` is the line's main-axis extent available to item base sizes —
/// i.e. the line's effective main size minus gaps minus the (non-flexing)
/// margins already summed in by the caller. `NaN` means "shrink-wrap, skip
/// distribution" (§4.1 Phase 6a: "else skip distribution (items stay at
/// base)"). The distributor never writes `layout` — only `main_size` and
/// `frozen` on each child's `FlexInfo`, and never allocates: each iteration's
/// clamped target and violation sign are written straight to `FlexInfo`
/// rather than staged in a side buffer first.
pub fn distribute_line(tree: &mut Tree, children: &[NodeId], budget: f64) {
    for &child in children {
        let flex = tree.flex_mut(child);
        flex.frozen = false;
        flex.main_size = flex.base_size;
    }

    if budget.is_nan() || children.is_empty() {
        return;
    }

    let sum_base: f64 = children.iter().map(|&c| tree.flex(c).base_size).sum();
    let initial_free_space = budget - sum_base;
    if initial_free_space == 0.0 {
        return;
    }
    let growing = initial_free_space > 0.0;

    let can_flex = |tree: &Tree, node: NodeId| -> bool {
        if growing {
            tree.style_unchecked(node).flex_grow > 0.0
        } else {
            tree.flex(node).effective_flex_shrink > 0.0
        }
    };

    let flexible_count = children.iter().filter(|&&c| can_flex(tree, c)).count();
    if flexible_count == 1 {
        let child = *children.iter().find(|&&c| can_flex(tree, c)).expect("one flexible child");
        let flex = tree.flex(child);
        let target = flex.base_size + initial_free_space;
        let clamped = apply_min_max(target, flex.min_main, flex.max_main);
        let flex = tree.flex_mut(child);
        flex.main_size = clamped;
        flex.frozen = true;
        return;
    }

    let mut free_space = initial_free_space;
    for _ in 0..=children.len() {
        let flex_factor = |tree: &Tree, node: NodeId| -> f64 {
            if growing {
                tree.style_unchecked(node).flex_grow
            } else {
                tree.flex(node).effective_flex_shrink * tree.flex(node).base_size
            }
        };

        let total_flex: f64 =
            children.iter().filter(|&&c| !tree.flex(c).frozen).map(|&c| flex_factor(tree, c)).sum();
        if total_flex == 0.0 {
            break;
        }

        // Growing quirk (§4.3 step 3): scale down the free space when the
        // sum of grow factors is less than one, rather than overshooting.
        let effective_free_space = if growing && total_flex < 1.0 { free_space * total_flex } else { free_space };

        // Pass 1: clamp every unfrozen child's target in place and accumulate
        // the total violation. `main_size` already holds what a per-iteration
        // buffer would otherwise stage.
        let mut total_violation = 0.0_f64;
        for &child in children {
            if tree.flex(child).frozen {
                continue;
            }
            let factor = flex_factor(tree, child);
            let flex = tree.flex(child);
            let target = flex.base_size + effective_free_space * (factor / total_flex);
            let clamped = apply_min_max(target, flex.min_main, flex.max_main);
            total_violation += clamped - target;
            tree.flex_mut(child).main_size = clamped;
        }

        if total_violation.abs() < 1e-3 {
            for &child in children {
                if !tree.flex(child).frozen {
                    tree.flex_mut(child).frozen = true;
                }
            }
            break;
        }

        // Pass 2: re-derive each unfrozen child's `target` (identical inputs
        // to pass 1, so the identical value) to recover the violation sign
        // from the `main_size` pass 1 already committed.
        let mut newly_frozen = false;
        for &child in children {
            if tree.flex(child).frozen {
                continue;
            }
            let factor = flex_factor(tree, child);
            let flex = tree.flex(child);
            let target = flex.base_size + effective_free_space * (factor / total_flex);
            let violation = flex.main_size - target;
            let same_sign =
                (violation > 0.0 && total_violation > 0.0) || (violation < 0.0 && total_violation < 0.0);
            if same_sign {
                tree.flex_mut(child).frozen = true;
                newly_frozen = true;
            }
        }
        if !newly_frozen {
            break;
        }

        let mut frozen_sum = 0.0;
        let mut unfrozen_base_sum = 0.0;
        for &child in children {
            let flex = tree.flex(child);
            if flex.frozen {
                frozen_sum += flex.main_size;
            } else {
                unfrozen_base_sum += flex.base_size;
            }
        }
        free_space = budget - frozen_sum - unfrozen_base_sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn setup_children(tree: &mut Tree, n: usize, base: f64, grow: f64, shrink: f64) -> Vec<NodeId> {
        let mut children = Vec::new();
        for _ in 0..n {
            let mut style = Style::default();
            style.flex_grow = grow;
            style.flex_shrink = shrink;
            let node = tree.new_leaf(style);
            let flex = tree.flex_mut(node);
            flex.base_size = base;
            flex.main_size = base;
            flex.min_main = f64::NAN;
            flex.max_main = f64::INFINITY;
            flex.effective_flex_shrink = shrink;
            children.push(node);
        }
        children
    }

    #[test]
    fn grow_distribution_splits_evenly() {
        let mut tree = Tree::new();
        let children = setup_children(&mut tree, 3, 0.0, 1.0, 0.0);
        distribute_line(&mut tree, &children, 300.0);
        for &c in &children {
            assert_eq!(tree.flex(c).main_size, 100.0);
        }
    }

    #[test]
    fn weighted_shrink_loses_proportional_to_base() {
        let mut tree = Tree::new();
        let children = setup_children(&mut tree, 2, 80.0, 0.0, 1.0);
        // budget = 100 total main extent, two items of base 80 => initial_free_space = 100-160 = -60
        distribute_line(&mut tree, &children, 100.0);
        for &c in &children {
            assert_eq!(tree.flex(c).main_size, 50.0);
        }
    }

    #[test]
    fn nan_budget_skips_distribution() {
        let mut tree = Tree::new();
        let children = setup_children(&mut tree, 2, 40.0, 1.0, 0.0);
        distribute_line(&mut tree, &children, f64::NAN);
        for &c in &children {
            assert_eq!(tree.flex(c).main_size, 40.0);
        }
    }

    #[test]
    fn break_into_lines_wraps_when_main_axis_is_exceeded() {
        let mut tree = Tree::new();
        let children = setup_children(&mut tree, 3, 40.0, 0.0, 0.0);
        let mut frame = ScratchFrame::default();
        break_into_lines(&mut tree, &mut frame, &children, 100.0, 0.0, FlexWrap::Wrap, FlexDirection::Row);
        // 40 + 40 = 80 fits, + another 40 = 120 overflows 100, so line 1 breaks.
        assert_eq!(frame.line_bounds, vec![0, 2, 3]);
        assert_eq!(tree.flex(children[0]).line_index, 0);
        assert_eq!(tree.flex(children[2]).line_index, 1);
    }

    #[test]
    fn break_into_lines_wrap_reverse_flips_line_order_only() {
        let mut tree = Tree::new();
        let children = setup_children(&mut tree, 4, 40.0, 0.0, 0.0);
        let mut frame = ScratchFrame::default();
        break_into_lines(&mut tree, &mut frame, &children, 80.0, 0.0, FlexWrap::WrapReverse, FlexDirection::Row);
        // Two lines of two children each; wrap-reverse flips which line comes
        // first but keeps each line's own child order.
        assert_eq!(frame.line_bounds, vec![0, 2, 4]);
        assert_eq!(&frame.line_children[0..2], &[children[2], children[3]]);
        assert_eq!(&frame.line_children[2..4], &[children[0], children[1]]);
    }
}

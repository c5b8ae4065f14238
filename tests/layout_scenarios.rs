//! The literal scenarios and quantified properties from §8, run end to end
//! through the public `Tree` API.

use flexnode::geometry::Size;
use flexnode::{Align, Direction, FlexDirection, FlexWrap, Justify, Style, Tree, Value};

fn row() -> Style {
    Style { flex_direction: FlexDirection::Row, ..Default::default() }
}

fn child_width(w: f64) -> Style {
    Style { size: Size::new(Value::points(w), Value::AUTO), ..Default::default() }
}

#[test]
fn scenario_1_grow_distribution() {
    let mut tree = Tree::new();
    let mut root_style = row();
    root_style.size.width = Value::points(300.0);

    let children: Vec<_> = (0..3)
        .map(|_| {
            let style = Style { flex_grow: 1.0, ..Default::default() };
            tree.new_leaf(style)
        })
        .collect();
    let root = tree.new_with_children(root_style, &children).unwrap();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let expected_lefts = [0.0, 100.0, 200.0];
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.get_computed_width(child).unwrap(), 100.0);
        assert_eq!(tree.get_computed_left(child).unwrap(), expected_lefts[i]);
    }
}

#[test]
fn scenario_2_weighted_shrink() {
    let mut tree = Tree::new();
    let mut root_style = row();
    root_style.size.width = Value::points(100.0);

    let mut child_style = Style::default();
    child_style.flex_shrink = 1.0;
    child_style.flex_basis = Value::points(80.0);

    let a = tree.new_leaf(child_style.clone());
    let b = tree.new_leaf(child_style);
    let root = tree.new_with_children(root_style, &[a, b]).unwrap();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    assert_eq!(tree.get_computed_width(a).unwrap(), 50.0);
    assert_eq!(tree.get_computed_width(b).unwrap(), 50.0);
    assert_eq!(tree.get_computed_left(a).unwrap(), 0.0);
    assert_eq!(tree.get_computed_left(b).unwrap(), 50.0);
}

#[test]
fn scenario_3_wrap_space_between_per_line() {
    let mut tree = Tree::new();
    let mut root_style = row();
    root_style.size.width = Value::points(100.0);
    root_style.flex_wrap = FlexWrap::Wrap;
    root_style.justify_content = Justify::SpaceBetween;

    let children: Vec<_> = (0..6)
        .map(|_| {
            let mut style = Style::default();
            style.size.width = Value::points(30.0);
            tree.new_leaf(style)
        })
        .collect();
    let root = tree.new_with_children(root_style, &children).unwrap();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let expected = [0.0, 35.0, 70.0, 0.0, 35.0, 70.0];
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.get_computed_left(child).unwrap(), expected[i], "child {i}");
    }
}

#[test]
fn scenario_4_edge_rounding_keeps_adjacency() {
    let mut tree = Tree::new();
    let mut root_style = row();
    root_style.size.width = Value::points(100.0);

    let children: Vec<_> = (0..3)
        .map(|_| {
            let style = Style { flex_grow: 1.0, ..Default::default() };
            tree.new_leaf(style)
        })
        .collect();
    let root = tree.new_with_children(root_style, &children).unwrap();

    tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();

    let mut total_width = 0.0;
    let mut prev_right = 0.0;
    for &child in &children {
        let left = tree.get_computed_left(child).unwrap();
        let width = tree.get_computed_width(child).unwrap();
        assert_eq!(left, prev_right);
        prev_right = left + width;
        total_width += width;
    }
    assert_eq!(total_width, 100.0);
}

#[test]
fn scenario_5_no_change_relayout_is_a_noop() {
    let mut tree = Tree::new();
    let leaf = tree.new_leaf(Style::default());
    let root = tree.new_with_children(row(), &[leaf]).unwrap();

    tree.calculate_layout(root, Some(80.0), Some(24.0), Direction::Ltr).unwrap();
    tree.mark_layout_seen(root).unwrap();
    tree.mark_layout_seen(leaf).unwrap();

    tree.calculate_layout(root, Some(80.0), Some(24.0), Direction::Ltr).unwrap();

    assert!(!tree.has_new_layout(root).unwrap());
    assert!(!tree.has_new_layout(leaf).unwrap());
}

#[test]
fn scenario_6_dirty_leaf_does_not_move_clean_siblings() {
    let mut tree = Tree::new();
    let a = tree.new_leaf(child_width(30.0));
    let b = tree.new_leaf(child_width(30.0));
    let c = tree.new_leaf(child_width(30.0));
    let root = tree.new_with_children(row(), &[a, b, c]).unwrap();

    tree.calculate_layout(root, Some(300.0), Some(100.0), Direction::Ltr).unwrap();
    let a_before = tree.layout(a).unwrap();
    let b_before = tree.layout(b).unwrap();

    tree.set_height(c, 50.0).unwrap();
    tree.calculate_layout(root, Some(300.0), Some(100.0), Direction::Ltr).unwrap();

    assert_eq!(tree.layout(a).unwrap(), a_before);
    assert_eq!(tree.layout(b).unwrap(), b_before);
    assert_eq!(tree.get_computed_height(c).unwrap(), 50.0);
}

#[test]
fn p1_determinism_across_successive_calls() {
    let mut tree = Tree::new();
    let a = tree.new_leaf(child_width(30.0));
    let root = tree.new_with_children(row(), &[a]).unwrap();

    tree.calculate_layout(root, Some(200.0), Some(100.0), Direction::Ltr).unwrap();
    let first = tree.layout(a).unwrap();
    tree.calculate_layout(root, Some(200.0), Some(100.0), Direction::Ltr).unwrap();
    let second = tree.layout(a).unwrap();

    assert_eq!(first, second);
}

#[test]
fn p6_box_model_floor_is_respected() {
    let mut tree = Tree::new();
    let mut style = Style::default();
    style.size.width = Value::points(2.0);
    style.padding.set(flexnode::Edge::All, Value::points(5.0));
    style.border.set(flexnode::Edge::All, 1.0);
    let node = tree.new_leaf(style);

    tree.calculate_layout(node, Some(200.0), Some(200.0), Direction::Ltr).unwrap();

    assert!(tree.get_computed_width(node).unwrap() >= 12.0);
}

#[test]
fn p7_position_relativity_holds_for_nested_children() {
    let mut tree = Tree::new();
    let leaf = tree.new_leaf(child_width(10.0));
    let mid = tree.new_with_children(row(), &[leaf]).unwrap();
    let root = tree.new_with_children(row(), &[mid]).unwrap();

    tree.calculate_layout(root, Some(200.0), Some(200.0), Direction::Ltr).unwrap();

    let mid_layout = tree.layout(mid).unwrap();
    let leaf_layout = tree.layout(leaf).unwrap();
    // leaf.left is relative to mid's border box by construction (I2); this
    // just exercises that the recursive call produced a plausible offset.
    assert!(leaf_layout.left >= 0.0);
    assert!(mid_layout.left == 0.0);
}

#[test]
fn p8_resize_round_trip_matches_fresh_layout() {
    let mut tree_a = Tree::new();
    let a1 = tree_a.new_leaf(Style { flex_grow: 1.0, ..Default::default() });
    let a2 = tree_a.new_leaf(Style { flex_grow: 1.0, ..Default::default() });
    let root_a = tree_a.new_with_children(row(), &[a1, a2]).unwrap();

    tree_a.calculate_layout(root_a, Some(200.0), Some(50.0), Direction::Ltr).unwrap();
    tree_a.calculate_layout(root_a, Some(400.0), Some(50.0), Direction::Ltr).unwrap();
    tree_a.calculate_layout(root_a, Some(150.0), Some(50.0), Direction::Ltr).unwrap();

    let mut tree_b = Tree::new();
    let b1 = tree_b.new_leaf(Style { flex_grow: 1.0, ..Default::default() });
    let b2 = tree_b.new_leaf(Style { flex_grow: 1.0, ..Default::default() });
    let root_b = tree_b.new_with_children(row(), &[b1, b2]).unwrap();
    tree_b.calculate_layout(root_b, Some(150.0), Some(50.0), Direction::Ltr).unwrap();

    assert_eq!(tree_a.layout(a1).unwrap(), tree_b.layout(b1).unwrap());
    assert_eq!(tree_a.layout(a2).unwrap(), tree_b.layout(b2).unwrap());
}

#[test]
fn align_items_center_centers_on_the_cross_axis() {
    let mut tree = Tree::new();
    let mut child_style = Style::default();
    child_style.size.height = Value::points(20.0);
    child_style.size.width = Value::points(20.0);
    let child = tree.new_leaf(child_style);

    let mut root_style = row();
    root_style.align_items = Align::Center;
    let root = tree.new_with_children(root_style, &[child]).unwrap();

    tree.calculate_layout(root, Some(100.0), Some(100.0), Direction::Ltr).unwrap();

    assert_eq!(tree.get_computed_top(child).unwrap(), 40.0);
}

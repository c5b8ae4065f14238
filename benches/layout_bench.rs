use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flexnode::{Direction, FlexDirection, NodeId, Style, Tree};

/// A balanced row/column tree, `branching` children per level, `depth` levels
/// deep — a stand-in for a moderately complex real UI tree.
fn build_tree(tree: &mut Tree, depth: usize, branching: usize, row: bool) -> NodeId {
    if depth == 0 {
        let mut style = Style::default();
        style.flex_grow = 1.0;
        return tree.new_leaf(style);
    }
    let children: Vec<_> = (0..branching).map(|_| build_tree(tree, depth - 1, branching, !row)).collect();
    let mut style = Style::default();
    style.flex_direction = if row { FlexDirection::Row } else { FlexDirection::Column };
    style.flex_grow = 1.0;
    tree.new_with_children(style, &children).unwrap()
}

fn fresh_layout(c: &mut Criterion) {
    c.bench_function("fresh_layout_depth5_branch4", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            let root = build_tree(&mut tree, 5, 4, true);
            tree.calculate_layout(root, Some(1200.0), Some(800.0), Direction::Ltr).unwrap();
            black_box(tree.layout(root).unwrap());
        });
    });
}

fn incremental_relayout(c: &mut Criterion) {
    let mut tree = Tree::new();
    let root = build_tree(&mut tree, 5, 4, true);
    tree.calculate_layout(root, Some(1200.0), Some(800.0), Direction::Ltr).unwrap();

    let leaf = {
        let mut node = root;
        while tree.get_child_count(node).unwrap() > 0 {
            node = tree.get_child(node, 0).unwrap();
        }
        node
    };

    c.bench_function("incremental_relayout_single_leaf_dirty", |b| {
        b.iter(|| {
            tree.set_flex_grow(leaf, 2.0).unwrap();
            tree.calculate_layout(root, Some(1200.0), Some(800.0), Direction::Ltr).unwrap();
            black_box(tree.layout(root).unwrap());
        });
    });
}

fn no_change_relayout(c: &mut Criterion) {
    let mut tree = Tree::new();
    let root = build_tree(&mut tree, 5, 4, true);
    tree.calculate_layout(root, Some(1200.0), Some(800.0), Direction::Ltr).unwrap();

    c.bench_function("no_change_relayout_fast_path", |b| {
        b.iter(|| {
            tree.calculate_layout(root, Some(1200.0), Some(800.0), Direction::Ltr).unwrap();
            black_box(tree.layout(root).unwrap());
        });
    });
}

criterion_group!(benches, fresh_layout, incremental_relayout, no_change_relayout);
criterion_main!(benches);

//! P3 (fresh-equals-incremental), the primary correctness oracle: build a
//! randomized tree, lay it out, dirty a random subset, lay it out again, and
//! compare against building the same tree fresh and laying it out once.
//!
//! Requires the `random` feature (`cargo test --features random`), which
//! gates `flexnode::node::random`.

#![cfg(feature = "random")]

use flexnode::node::random::random_tree;
use flexnode::{Direction, NodeId, Tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn collect_all(tree: &Tree, node: NodeId, out: &mut Vec<NodeId>) {
    out.push(node);
    for i in 0..tree.get_child_count(node).unwrap() {
        collect_all(tree, tree.get_child(node, i).unwrap(), out);
    }
}

#[test]
fn fresh_equals_incremental_over_random_trees() {
    for seed in 0..12u64 {
        let mut build_rng = StdRng::seed_from_u64(seed);

        let mut tree_a = Tree::new();
        let root_a = random_tree(&mut tree_a, &mut build_rng, 3);
        tree_a.calculate_layout(root_a, Some(400.0), Some(300.0), Direction::Ltr).unwrap();

        let mut all_a = Vec::new();
        collect_all(&tree_a, root_a, &mut all_a);

        let mut dirty_rng = StdRng::seed_from_u64(seed ^ 0xA5A5);
        let subset: Vec<_> = all_a.iter().filter(|_| dirty_rng.gen_bool(0.3)).copied().collect();
        for &node in &subset {
            tree_a.mark_dirty(node).unwrap();
        }
        tree_a.calculate_layout(root_a, Some(400.0), Some(300.0), Direction::Ltr).unwrap();

        let mut fresh_rng = StdRng::seed_from_u64(seed);
        let mut tree_b = Tree::new();
        let root_b = random_tree(&mut tree_b, &mut fresh_rng, 3);
        tree_b.calculate_layout(root_b, Some(400.0), Some(300.0), Direction::Ltr).unwrap();

        let mut all_b = Vec::new();
        collect_all(&tree_b, root_b, &mut all_b);

        assert_eq!(all_a.len(), all_b.len(), "seed {seed}: tree shapes diverged");
        for (&na, &nb) in all_a.iter().zip(all_b.iter()) {
            assert_eq!(tree_a.layout(na).unwrap(), tree_b.layout(nb).unwrap(), "seed {seed}: node mismatch");
        }
    }
}

//! Property tests for canopy-bst
//!
//! This module contains property-based tests for ordered-tree invariants
//! (in-order sortedness, model conformance, and traversal consistency).

use canopy_bst::Bst;
use canopy_testkit::{apply_ops, strategy_elements, strategy_ops};
use proptest::prelude::*;

fn collect(tree: &Bst<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

// ============================================================================
// Ordering Invariant Tests
// ============================================================================

proptest! {
    // In-order iteration yields a sorted sequence after any insert batch.
    #[test]
    fn prop_in_order_is_sorted(elems in strategy_elements()) {
        let mut tree = Bst::new();
        for &e in &elems {
            tree.insert(e);
        }
        let out = collect(&tree);
        prop_assert_eq!(out.len(), elems.len());
        prop_assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }

    // Duplicates are kept: the tree holds the same multiset it was fed.
    #[test]
    fn prop_duplicates_preserved(elems in strategy_elements()) {
        let mut tree = Bst::new();
        for &e in &elems {
            tree.insert(e);
        }
        let mut sorted = elems;
        sorted.sort_unstable();
        prop_assert_eq!(collect(&tree), sorted);
    }
}

// ============================================================================
// Model Conformance Tests
// ============================================================================

proptest! {
    // Any interleaving of inserts and removes matches the sorted-vec model.
    #[test]
    fn prop_model_match_under_interleaving(ops in strategy_ops()) {
        let mut tree = Bst::new();
        let model = apply_ops(&mut tree, &ops);
        prop_assert_eq!(collect(&tree), model);
    }

    // contains answers exactly membership in the model.
    #[test]
    fn prop_contains_matches_model(ops in strategy_ops()) {
        let mut tree = Bst::new();
        let model = apply_ops(&mut tree, &ops);
        for e in 0..32 {
            prop_assert_eq!(tree.contains(&e), model.contains(&e));
        }
    }

    // Removing an element absent from the tree changes nothing.
    #[test]
    fn prop_remove_absent_is_noop(elems in strategy_elements()) {
        let mut tree = Bst::new();
        for &e in &elems {
            tree.insert(e);
        }
        let before = collect(&tree);
        prop_assert_eq!(tree.remove(&99), None);
        prop_assert_eq!(collect(&tree), before);
    }
}

// ============================================================================
// Traversal Consistency Tests
// ============================================================================

proptest! {
    // All three depth-first orders visit every vertex exactly once, and
    // the in-order visit agrees with the iterator.
    #[test]
    fn prop_traversals_visit_everything(elems in strategy_elements()) {
        let mut tree = Bst::new();
        for &e in &elems {
            tree.insert(e);
        }

        let mut pre = Vec::new();
        tree.dfs_pre_order(|v| pre.push(*v.get()));
        let mut inord = Vec::new();
        tree.dfs_in_order(|v| inord.push(*v.get()));
        let mut post = Vec::new();
        tree.dfs_post_order(|v| post.push(*v.get()));

        prop_assert_eq!(pre.len(), elems.len());
        prop_assert_eq!(post.len(), elems.len());
        prop_assert_eq!(inord, collect(&tree));

        let mut pre_sorted = pre;
        pre_sorted.sort_unstable();
        let mut post_sorted = post;
        post_sorted.sort_unstable();
        prop_assert_eq!(&pre_sorted, &collect(&tree));
        prop_assert_eq!(&post_sorted, &collect(&tree));
    }

    // Rotations reshape the tree but never disturb the in-order sequence.
    #[test]
    fn prop_rotations_preserve_order(elems in strategy_elements()) {
        let mut tree = Bst::new();
        for &e in &elems {
            tree.insert(e);
        }
        let before = collect(&tree);
        if let Some(root) = tree.root().ok().map(|v| v.id()) {
            tree.rotate_right(root);
        }
        if let Some(root) = tree.root().ok().map(|v| v.id()) {
            tree.rotate_left(root);
        }
        prop_assert_eq!(collect(&tree), before);
    }
}

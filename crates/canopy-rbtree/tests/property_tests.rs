//! Property tests for canopy-rbtree
//!
//! This module contains property-based tests for the red-black
//! invariants (root color, no red-red edges, uniform black height) and
//! model conformance.

use canopy_rbtree::{Color, RbTree};
use canopy_testkit::{apply_ops, strategy_elements, strategy_ops};
use canopy_tree::VertexRef;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn collect(tree: &RbTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

/// Checks that no red vertex has a red child and that every path to a
/// leaf crosses the same number of black vertices, returning that count.
fn check_colors(v: VertexRef<'_, i32, Color>) -> Result<i32, TestCaseError> {
    if *v.payload() == Color::Red {
        for child in [v.left().ok(), v.right().ok()].into_iter().flatten() {
            prop_assert_eq!(
                *child.payload(),
                Color::Black,
                "red vertex {} has a red child",
                v.get()
            );
        }
    }
    let bl = match v.left() {
        Ok(l) => check_colors(l)?,
        Err(_) => 0,
    };
    let br = match v.right() {
        Ok(r) => check_colors(r)?,
        Err(_) => 0,
    };
    prop_assert_eq!(bl, br, "uneven black height under {}", v.get());
    Ok(bl + i32::from(*v.payload() == Color::Black))
}

fn assert_red_black(tree: &RbTree<i32>) -> Result<(), TestCaseError> {
    if let Ok(root) = tree.root() {
        prop_assert_eq!(*root.payload(), Color::Black, "root must be black");
        check_colors(root)?;
    }
    Ok(())
}

// ============================================================================
// Color Invariant Tests
// ============================================================================

proptest! {
    // The red-black invariants hold after any interleaving of ops.
    #[test]
    fn prop_invariants_after_ops(ops in strategy_ops()) {
        let mut tree = RbTree::new();
        apply_ops(&mut tree, &ops);
        assert_red_black(&tree)?;
    }

    // Height never exceeds the red-black bound 2·log2(n + 1).
    #[test]
    fn prop_height_bound(elems in strategy_elements()) {
        let mut tree = RbTree::new();
        for &e in &elems {
            tree.insert(e);
        }
        let n = tree.len() as f64;
        let bound = (2.0 * (n + 1.0).log2()).ceil() as i32;
        prop_assert!(tree.height() <= bound, "height {} over bound {}", tree.height(), bound);
    }
}

// ============================================================================
// Model Conformance Tests
// ============================================================================

proptest! {
    // Recoloring and rotation never lose or invent elements.
    #[test]
    fn prop_model_match_under_interleaving(ops in strategy_ops()) {
        let mut tree = RbTree::new();
        let model = apply_ops(&mut tree, &ops);
        prop_assert_eq!(collect(&tree), model);
        assert_red_black(&tree)?;
    }

    // Draining every inserted element keeps the invariants at each step.
    #[test]
    fn prop_drain_keeps_invariants(elems in strategy_elements()) {
        let mut tree = RbTree::new();
        for &e in &elems {
            tree.insert(e);
        }
        for &e in &elems {
            prop_assert_eq!(tree.remove(&e), Some(e));
            assert_red_black(&tree)?;
        }
        prop_assert!(tree.is_empty());
    }
}

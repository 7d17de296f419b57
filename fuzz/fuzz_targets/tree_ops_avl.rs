//! Fuzz harness for the AVL tree
//!
//! Decodes the input as an insert/remove op sequence and checks the
//! height-balance invariant after every op.
//! Target: `canopy_avl::AvlTree`

#![no_main]

use canopy_avl::{AvlTree, Height};
use canopy_tree::VertexRef;
use libfuzzer_sys::fuzz_target;

/// Recounts the subtree height, asserting balance and cache freshness.
fn check(v: VertexRef<'_, i32, Height>) -> i32 {
    let hl = v.left().map_or(-1, check);
    let hr = v.right().map_or(-1, check);
    assert!((hl - hr).abs() <= 1, "imbalance at {}", v.get());
    let h = 1 + hl.max(hr);
    assert_eq!(*v.payload(), h, "stale cached height at {}", v.get());
    h
}

fuzz_target!(|data: &[u8]| {
    let mut tree: AvlTree<i32> = AvlTree::new();
    let mut count = 0usize;

    for pair in data.chunks_exact(2) {
        let e = i32::from(pair[1] % 32);
        if pair[0] % 2 == 0 {
            tree.insert(e);
            count += 1;
        } else if tree.remove(&e).is_some() {
            count -= 1;
        }
        assert_eq!(tree.len(), count);
        if let Ok(root) = tree.root() {
            check(root);
        }
    }

    let out: Vec<i32> = tree.iter().copied().collect();
    assert!(out.windows(2).all(|w| w[0] <= w[1]));
});

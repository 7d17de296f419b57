//! Fuzz harness for the red-black tree
//!
//! Decodes the input as an insert/remove op sequence and checks the
//! red-black invariants after every op.
//! Target: `canopy_rbtree::RbTree`

#![no_main]

use canopy_rbtree::{Color, RbTree};
use canopy_tree::VertexRef;
use libfuzzer_sys::fuzz_target;

/// Returns the black height, asserting no red-red edge and that every
/// path to a leaf crosses the same number of black vertices.
fn check(v: VertexRef<'_, i32, Color>) -> i32 {
    if *v.payload() == Color::Red {
        for child in [v.left().ok(), v.right().ok()].into_iter().flatten() {
            assert_eq!(*child.payload(), Color::Black, "red-red edge at {}", v.get());
        }
    }
    let bl = v.left().map_or(0, check);
    let br = v.right().map_or(0, check);
    assert_eq!(bl, br, "uneven black height under {}", v.get());
    bl + i32::from(*v.payload() == Color::Black)
}

fuzz_target!(|data: &[u8]| {
    let mut tree: RbTree<i32> = RbTree::new();
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
            assert_eq!(*root.payload(), Color::Black, "red root");
            check(root);
        }
    }

    let out: Vec<i32> = tree.iter().copied().collect();
    assert!(out.windows(2).all(|w| w[0] <= w[1]));
});

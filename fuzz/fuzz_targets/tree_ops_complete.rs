//! Fuzz harness for the complete binary tree
//!
//! Decodes the input as an add/remove op sequence and checks the
//! completeness invariant after every op.
//! Target: `canopy_complete::CompleteTree`

#![no_main]

use canopy_complete::CompleteTree;
use libfuzzer_sys::fuzz_target;

/// No child slot may be filled after an earlier vacancy in BFS order.
fn check(tree: &CompleteTree<i32>) {
    let mut seen_vacancy = false;
    tree.bfs(|v| {
        for child in [v.has_left(), v.has_right()] {
            assert!(!(seen_vacancy && child), "gap in breadth-first order");
            seen_vacancy |= !child;
        }
    });
}

fuzz_target!(|data: &[u8]| {
    let mut tree: CompleteTree<i32> = CompleteTree::new();
    let mut count = 0usize;

    for pair in data.chunks_exact(2) {
        let e = i32::from(pair[1] % 32);
        if pair[0] % 2 == 0 {
            tree.add(e);
            count += 1;
        } else if tree.remove(&e).is_some() {
            count -= 1;
        }
        assert_eq!(tree.len(), count);
        check(&tree);
        if count > 0 {
            assert_eq!(tree.height(), (count as f64).log2().floor() as i32);
        }
    }
});

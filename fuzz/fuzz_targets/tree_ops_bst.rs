//! Fuzz harness for the ordered tree
//!
//! Decodes the input as an insert/remove op sequence and checks the tree
//! against a sorted-vec model after every op.
//! Target: `canopy_bst::Bst`

#![no_main]

use canopy_bst::Bst;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut tree: Bst<i32> = Bst::new();
    let mut model: Vec<i32> = Vec::new();

    for pair in data.chunks_exact(2) {
        let e = i32::from(pair[1] % 32);
        if pair[0] % 2 == 0 {
            tree.insert(e);
            let at = model.partition_point(|&m| m <= e);
            model.insert(at, e);
        } else {
            let removed = tree.remove(&e);
            if let Some(at) = model.iter().position(|&m| m == e) {
                assert_eq!(removed, Some(e));
                model.remove(at);
            } else {
                assert_eq!(removed, None);
            }
        }
        assert_eq!(tree.len(), model.len());
    }

    let out: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(out, model);
});

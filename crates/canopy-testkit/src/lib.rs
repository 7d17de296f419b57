//! Workspace-only proptest strategies for canopy property tests.
//!
//! The tree crates all face the same hazard: an invariant that holds for
//! any single operation but breaks under a particular interleaving of
//! inserts and removes. The strategies here generate such interleavings
//! over a deliberately small element domain, so duplicate inserts and
//! removals of absent elements show up constantly.

use canopy_collection::Collection;
use proptest::prelude::*;

/// One mutation against a container under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(i32),
    Remove(i32),
}

/// Elements drawn from a small domain so collisions are common.
pub fn strategy_element() -> impl Strategy<Value = i32> {
    0..32i32
}

/// A single insert or remove, biased toward inserts so trees grow.
pub fn strategy_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => strategy_element().prop_map(Op::Insert),
        2 => strategy_element().prop_map(Op::Remove),
    ]
}

/// An arbitrary interleaving of inserts and removes.
pub fn strategy_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(strategy_op(), 0..200)
}

/// A plain batch of elements to insert.
pub fn strategy_elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(strategy_element(), 0..100)
}

/// Applies an op sequence to any container and mirrors it into a sorted
/// model vector, returning the expected multiset after every op.
pub fn apply_ops<C: Collection<i32>>(container: &mut C, ops: &[Op]) -> Vec<i32> {
    let mut model: Vec<i32> = Vec::new();
    for op in ops {
        match *op {
            Op::Insert(e) => {
                container.add(e);
                let at = model.partition_point(|&m| m <= e);
                model.insert(at, e);
            }
            Op::Remove(e) => {
                let removed = container.remove(&e);
                if let Some(at) = model.iter().position(|&m| m == e) {
                    assert_eq!(removed, Some(e));
                    model.remove(at);
                } else {
                    assert_eq!(removed, None);
                }
            }
        }
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sorted-vec container, just enough to exercise `apply_ops`.
    #[derive(Default)]
    struct VecSet(Vec<i32>);

    impl Collection<i32> for VecSet {
        type Iter<'a>
            = std::slice::Iter<'a, i32>
        where
            Self: 'a;

        fn add(&mut self, element: i32) {
            let at = self.0.partition_point(|&m| m <= element);
            self.0.insert(at, element);
        }

        fn remove(&mut self, element: &i32) -> Option<i32> {
            let at = self.0.iter().position(|m| m == element)?;
            Some(self.0.remove(at))
        }

        fn contains(&self, element: &i32) -> bool {
            self.0.contains(element)
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn clear(&mut self) {
            self.0.clear();
        }

        fn iter(&self) -> Self::Iter<'_> {
            self.0.iter()
        }
    }

    #[test]
    fn test_apply_ops_tracks_the_model() {
        let ops = [
            Op::Insert(3),
            Op::Insert(1),
            Op::Insert(3),
            Op::Remove(3),
            Op::Remove(9),
            Op::Insert(2),
        ];
        let mut c = VecSet::default();
        let model = apply_ops(&mut c, &ops);
        assert_eq!(model, vec![1, 2, 3]);
        assert_eq!(c.0, model);
    }
}

//! Height-balanced (AVL) search tree for canopy.
//!
//! `AvlTree<T>` is an `OrderedTree` whose payload caches each vertex's
//! height. Every insert and remove walks from the mutation point to the
//! root, refreshing cached heights and rotating wherever the height
//! difference between a vertex's subtrees reaches 2, so the difference
//! never exceeds 1 between operations.
//!
//! The inherited rotation primitives are not part of this crate's
//! surface: a caller rotating an AVL tree by hand would desynchronize
//! the cached heights, so the operation simply does not exist here.

use std::fmt::Display;

use canopy_bst::{InOrderIter, OrderedTree};
use canopy_collection::Collection;
use canopy_tree::{NodeId, TreeError, VertexRef};

/// Cached height of the subtree under a vertex; a leaf has height 0.
pub type Height = i32;

/// A self-balancing search tree with a height bound of 1.44·log2(n).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlTree<T> {
    tree: OrderedTree<T, Height>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Height of the tree from the root's cache, O(1). −1 when empty.
    pub fn height(&self) -> Height {
        self.cached_height(self.tree.as_tree().root_id())
    }

    pub fn root(&self) -> Result<VertexRef<'_, T, Height>, TreeError> {
        self.tree.root()
    }

    /// Read-only ordered-tree view: traversals, vertex handles, drawing.
    pub fn as_ordered(&self) -> &OrderedTree<T, Height> {
        &self.tree
    }

    /// Lazy in-order iteration over borrowed elements.
    pub fn iter(&self) -> InOrderIter<'_, T, Height> {
        self.tree.iter()
    }

    fn cached_height(&self, id: Option<NodeId>) -> Height {
        id.map_or(-1, |id| *self.tree.as_tree().payload(id))
    }

    fn balance(&self, id: NodeId) -> i32 {
        let t = self.tree.as_tree();
        self.cached_height(t.left_of(id)) - self.cached_height(t.right_of(id))
    }

    fn refresh_height(&mut self, id: NodeId) {
        let t = self.tree.as_tree();
        let h = 1 + self
            .cached_height(t.left_of(id))
            .max(self.cached_height(t.right_of(id)));
        self.tree.set_payload(id, h);
    }

    /// Walks from `start` to the root, refreshing heights and rotating
    /// wherever a vertex tips to a balance of ±2.
    ///
    /// The walk never stops early: a rotation fixes the local imbalance
    /// but ancestor heights can still be stale.
    fn rebalance_from(&mut self, start: Option<NodeId>) {
        let mut cur = start;
        while let Some(v) = cur {
            self.refresh_height(v);
            match self.balance(v) {
                -2 => {
                    let r = self
                        .tree
                        .as_tree()
                        .right_of(v)
                        .expect("right-heavy vertex has a right child");
                    if self.balance(r) == 1 {
                        self.tree.rotate_right(r);
                        self.refresh_height(r);
                    }
                    self.tree.rotate_left(v);
                    self.refresh_height(r);
                    self.refresh_height(v);
                }
                2 => {
                    let l = self
                        .tree
                        .as_tree()
                        .left_of(v)
                        .expect("left-heavy vertex has a left child");
                    if self.balance(l) == -1 {
                        self.tree.rotate_left(l);
                        self.refresh_height(l);
                    }
                    self.tree.rotate_right(v);
                    self.refresh_height(l);
                    self.refresh_height(v);
                }
                _ => {}
            }
            // After a rotation the parent is the rotation pivot, whose
            // height the next iteration refreshes.
            cur = self.tree.as_tree().parent_of(v);
        }
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `elem`, then rebalances upward from the new vertex's
    /// parent. Returns the new vertex's id.
    pub fn insert(&mut self, elem: T) -> NodeId {
        let id = self.tree.insert(elem);
        self.rebalance_from(self.tree.as_tree().parent_of(id));
        id
    }

    /// Removes one occurrence of `elem`, then rebalances upward from the
    /// spliced vertex's former parent.
    pub fn remove(&mut self, elem: &T) -> Option<T> {
        let mut id = self.tree.find(elem)?;
        let t = self.tree.as_tree();
        if t.has_left(id) && t.has_right(id) {
            id = self.tree.swap_with_predecessor(id);
        }
        let (removed, parent, _) = self.tree.splice(id);
        self.rebalance_from(parent);
        Some(removed)
    }

    pub fn search(&self, elem: &T) -> Option<VertexRef<'_, T, Height>> {
        self.tree.search(elem)
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.tree.contains(elem)
    }
}

impl<T: Display> AvlTree<T> {
    /// Diagnostic rendering labeling each vertex `element height/balance`.
    pub fn draw(&self) -> String {
        self.tree.as_tree().draw_with(|v| {
            let hl = v.left().map_or(-1, |c| *c.payload());
            let hr = v.right().map_or(-1, |c| *c.payload());
            format!("{} {}/{}", v.get(), v.payload(), hl - hr)
        })
    }
}

impl<T: Ord> Collection<T> for AvlTree<T> {
    type Iter<'a>
        = InOrderIter<'a, T, Height>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, element: T) {
        self.insert(element);
    }

    fn remove(&mut self, element: &T) -> Option<T> {
        AvlTree::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        AvlTree::contains(self, element)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn clear(&mut self) {
        AvlTree::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        AvlTree::iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    /// |height(left) − height(right)| ≤ 1 everywhere, and every cached
    /// height matches a recount of the structure.
    fn assert_balanced(tree: &AvlTree<i32>) {
        fn walk(tree: &AvlTree<i32>, v: VertexRef<'_, i32, Height>) {
            let hl = v.left().map_or(-1, |c| c.height());
            let hr = v.right().map_or(-1, |c| c.height());
            assert!((hl - hr).abs() <= 1, "imbalance at {}", v.get());
            assert_eq!(*v.payload(), 1 + hl.max(hr), "stale height at {}", v.get());
            if let Ok(l) = v.left() {
                walk(tree, l);
            }
            if let Ok(r) = v.right() {
                walk(tree, r);
            }
        }
        if let Ok(root) = tree.root() {
            walk(tree, root);
        }
    }

    #[test]
    fn test_insert_into_empty() {
        let mut t = AvlTree::new();
        t.insert(5);
        assert_eq!(t.len(), 1);
        assert_eq!(t.height(), 0);
        assert_eq!(*t.root().unwrap().get(), 5);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut t = AvlTree::new();
        for e in 1..=64 {
            t.insert(e);
            assert_balanced(&t);
        }
        assert_eq!(t.len(), 64);
        // A degenerate BST would reach height 63.
        assert!(t.height() <= 7);
        assert_eq!(collect(&t), (1..=64).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_rotation_on_insert() {
        let mut t = AvlTree::new();
        t.insert(1);
        t.insert(2);
        t.insert(3);
        // Straight-line 1-2-3 must rotate into 2 at the root.
        let root = t.root().unwrap();
        assert_eq!(*root.get(), 2);
        assert_eq!(*root.left().unwrap().get(), 1);
        assert_eq!(*root.right().unwrap().get(), 3);
        assert_eq!(t.height(), 1);
    }

    #[test]
    fn test_double_rotation_on_insert() {
        let mut t = AvlTree::new();
        t.insert(1);
        t.insert(3);
        t.insert(2);
        // Zig-zag 1-3-2 needs the double rotation.
        let root = t.root().unwrap();
        assert_eq!(*root.get(), 2);
        assert_eq!(*root.left().unwrap().get(), 1);
        assert_eq!(*root.right().unwrap().get(), 3);
        assert_balanced(&t);
    }

    #[test]
    fn test_scenario_seven_elements() {
        let mut t = AvlTree::new();
        for e in [5, 3, 8, 1, 4, 7, 9] {
            t.insert(e);
        }
        assert_eq!(collect(&t), vec![1, 3, 4, 5, 7, 8, 9]);
        // ⌈log2(8)⌉ = 3.
        assert!(t.height() <= 3);
        assert_balanced(&t);
    }

    #[test]
    fn test_remove_rebalances() {
        let mut t = AvlTree::new();
        for e in [5, 3, 8, 1, 4, 7, 9, 2] {
            t.insert(e);
        }
        for e in [9, 7, 8] {
            assert_eq!(t.remove(&e), Some(e));
            assert_balanced(&t);
        }
        assert_eq!(collect(&t), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_remove_two_children_uses_predecessor() {
        let mut t = AvlTree::new();
        for e in [5, 3, 8, 1, 4, 7, 9] {
            t.insert(e);
        }
        t.remove(&5);
        assert_eq!(collect(&t), vec![1, 3, 4, 7, 8, 9]);
        assert_balanced(&t);
        assert_eq!(*t.root().unwrap().get(), 4);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut t = AvlTree::new();
        for e in [2, 1, 3] {
            t.insert(e);
        }
        let before = t.clone();
        assert_eq!(t.remove(&9), None);
        assert_eq!(t, before);
    }

    #[test]
    fn test_remove_last_element_empties_tree() {
        let mut t = AvlTree::new();
        t.insert(1);
        assert_eq!(t.remove(&1), Some(1));
        assert!(t.is_empty());
        assert_eq!(t.height(), -1);
    }

    #[test]
    fn test_drain_descending() {
        let mut t = AvlTree::new();
        for e in 1..=32 {
            t.insert(e);
        }
        for e in (1..=32).rev() {
            assert_eq!(t.remove(&e), Some(e));
            assert_balanced(&t);
        }
        assert!(t.is_empty());
    }

    #[test]
    fn test_draw_labels_height_and_balance() {
        let mut t = AvlTree::new();
        t.insert(2);
        t.insert(1);
        t.insert(3);
        assert_eq!(t.draw(), "2 1/0\n├─›1 0/0\n└─»3 0/0\n");
    }

    #[test]
    fn test_collection_capability() {
        let mut t: AvlTree<i32> = AvlTree::new();
        Collection::add(&mut t, 2);
        Collection::add(&mut t, 1);
        Collection::add(&mut t, 3);
        assert_eq!(Collection::len(&t), 3);
        assert!(Collection::contains(&t, &3));
        assert_eq!(Collection::remove(&mut t, &2), Some(2));
        Collection::clear(&mut t);
        assert!(Collection::is_empty(&t));
    }
}

//! Ordered binary search tree for canopy.
//!
//! `OrderedTree<T, P>` layers the BST invariant on the generic engine
//! from `canopy-tree`: for every vertex, everything in its left subtree
//! is ≤ its element and everything in its right subtree is greater.
//! Duplicates accumulate to the left. The payload parameter `P` carries
//! the bookkeeping of the self-balancing variants built on top
//! (`canopy-avl`, `canopy-rbtree`); plain use goes through the
//! [`Bst`] alias.
//!
//! Insertion returns the id of the vertex it created, so a balancing
//! layer knows where to start without any shared "last inserted" state.

use std::cmp::Ordering;
use std::fmt::Display;

use canopy_collection::{Collection, Sequence};
use canopy_tree::{BinaryTree, NodeId, TreeError, VertexRef};

/// A binary search tree with a per-vertex payload.
#[derive(Clone, Debug)]
pub struct OrderedTree<T, P = ()> {
    tree: BinaryTree<T, P>,
}

/// Plain binary search tree, no balancing bookkeeping.
pub type Bst<T> = OrderedTree<T, ()>;

impl<T, P> Default for OrderedTree<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> OrderedTree<T, P> {
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
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

    /// Height of the tree, recomputed by walking it.
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    pub fn root(&self) -> Result<VertexRef<'_, T, P>, TreeError> {
        self.tree.root()
    }

    /// Read-only view of the underlying engine: vertex handles, drawing,
    /// structural queries. Balancing layers also read through this.
    pub fn as_tree(&self) -> &BinaryTree<T, P> {
        &self.tree
    }

    /// Pre-order walk, applying `visit` to every vertex.
    pub fn dfs_pre_order(&self, mut visit: impl FnMut(VertexRef<'_, T, P>)) {
        self.dfs_pre(self.tree.root_id(), &mut visit);
    }

    fn dfs_pre(&self, id: Option<NodeId>, visit: &mut impl FnMut(VertexRef<'_, T, P>)) {
        let Some(id) = id else { return };
        visit(self.tree.vertex(id));
        self.dfs_pre(self.tree.left_of(id), visit);
        self.dfs_pre(self.tree.right_of(id), visit);
    }

    /// In-order walk, applying `visit` to every vertex. Visits elements
    /// in non-decreasing order.
    pub fn dfs_in_order(&self, mut visit: impl FnMut(VertexRef<'_, T, P>)) {
        self.dfs_in(self.tree.root_id(), &mut visit);
    }

    fn dfs_in(&self, id: Option<NodeId>, visit: &mut impl FnMut(VertexRef<'_, T, P>)) {
        let Some(id) = id else { return };
        self.dfs_in(self.tree.left_of(id), visit);
        visit(self.tree.vertex(id));
        self.dfs_in(self.tree.right_of(id), visit);
    }

    /// Post-order walk, applying `visit` to every vertex.
    pub fn dfs_post_order(&self, mut visit: impl FnMut(VertexRef<'_, T, P>)) {
        self.dfs_post(self.tree.root_id(), &mut visit);
    }

    fn dfs_post(&self, id: Option<NodeId>, visit: &mut impl FnMut(VertexRef<'_, T, P>)) {
        let Some(id) = id else { return };
        self.dfs_post(self.tree.left_of(id), visit);
        self.dfs_post(self.tree.right_of(id), visit);
        visit(self.tree.vertex(id));
    }

    /// Lazy in-order iteration over borrowed elements.
    pub fn iter(&self) -> InOrderIter<'_, T, P> {
        InOrderIter::new(&self.tree)
    }

    /// Rotates right around `v`; the structure keeps BST order but the
    /// caller owns any bookkeeping consequences. The balanced variants
    /// deliberately do not re-export this.
    pub fn rotate_right(&mut self, v: NodeId) {
        self.tree.rotate_right(v);
    }

    /// Mirror of [`rotate_right`].
    ///
    /// [`rotate_right`]: Self::rotate_right
    pub fn rotate_left(&mut self, v: NodeId) {
        self.tree.rotate_left(v);
    }

    /// Swaps the elements of `v` (which must have two children) and its
    /// in-order predecessor, the right-most vertex of its left subtree.
    /// Returns the predecessor, which has at most one child and is the
    /// vertex deletion then splices out.
    pub fn swap_with_predecessor(&mut self, v: NodeId) -> NodeId {
        let mut max = self
            .tree
            .left_of(v)
            .expect("predecessor swap requires two children");
        while let Some(r) = self.tree.right_of(max) {
            max = r;
        }
        self.tree.swap_elements(v, max);
        max
    }

    /// Splices out a vertex with at most one child. See
    /// [`BinaryTree::splice`].
    pub fn splice(&mut self, v: NodeId) -> (T, Option<NodeId>, Option<NodeId>) {
        self.tree.splice(v)
    }

    /// Replaces the payload of a vertex.
    pub fn set_payload(&mut self, v: NodeId, payload: P) {
        self.tree.set_payload(v, payload);
    }
}

impl<T: Ord, P> OrderedTree<T, P> {
    /// Inserts `elem` and returns the id of the vertex created for it.
    ///
    /// Descends comparing against each visited vertex, left on ≤ and
    /// right otherwise, and attaches at the first vacancy. The returned
    /// id is where a balancing layer picks up.
    pub fn insert(&mut self, elem: T) -> NodeId
    where
        P: Default,
    {
        let id = self.tree.new_vertex(elem);
        let Some(mut cur) = self.tree.root_id() else {
            self.tree.set_root(id);
            return id;
        };
        loop {
            if self.tree.element(id) <= self.tree.element(cur) {
                match self.tree.left_of(cur) {
                    Some(l) => cur = l,
                    None => {
                        self.tree.link_left(cur, id);
                        return id;
                    }
                }
            } else {
                match self.tree.right_of(cur) {
                    Some(r) => cur = r,
                    None => {
                        self.tree.link_right(cur, id);
                        return id;
                    }
                }
            }
        }
    }

    /// Binary search for `elem`, O(height).
    pub fn find(&self, elem: &T) -> Option<NodeId> {
        let mut cur = self.tree.root_id();
        while let Some(id) = cur {
            match elem.cmp(self.tree.element(id)) {
                Ordering::Equal => return Some(id),
                Ordering::Less => cur = self.tree.left_of(id),
                Ordering::Greater => cur = self.tree.right_of(id),
            }
        }
        None
    }

    /// Like [`find`], returning a vertex handle.
    ///
    /// [`find`]: Self::find
    pub fn search(&self, elem: &T) -> Option<VertexRef<'_, T, P>> {
        self.find(elem).map(|id| self.tree.vertex(id))
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.find(elem).is_some()
    }

    /// Removes one occurrence of `elem`, returning it if present.
    ///
    /// A vertex with two children first swaps elements with its in-order
    /// predecessor; the vertex actually spliced out always has at most
    /// one child, which is promoted into its place.
    pub fn remove(&mut self, elem: &T) -> Option<T> {
        let mut id = self.find(elem)?;
        if self.tree.has_left(id) && self.tree.has_right(id) {
            id = self.swap_with_predecessor(id);
        }
        let (removed, _, _) = self.tree.splice(id);
        Some(removed)
    }
}

impl<T: Display, P> OrderedTree<T, P> {
    /// Multi-line box-connector rendering for diagnostics.
    pub fn draw(&self) -> String {
        self.tree.draw()
    }
}

/// Structural equality of shape, elements, and payloads.
impl<T: PartialEq, P: PartialEq> PartialEq for OrderedTree<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, P: Eq> Eq for OrderedTree<T, P> {}

/// In-order cursor over a tree.
///
/// Holds the left spine of the unvisited part on an explicit stack;
/// `next` pops a vertex, yields its element, and descends the left spine
/// of its right child. The borrow on the tree makes mutation during
/// iteration a compile error.
pub struct InOrderIter<'a, T, P> {
    tree: &'a BinaryTree<T, P>,
    stack: Vec<NodeId>,
}

impl<'a, T, P> InOrderIter<'a, T, P> {
    fn new(tree: &'a BinaryTree<T, P>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root_id());
        iter
    }

    fn push_left_spine(&mut self, from: Option<NodeId>) {
        let mut cur = from;
        while let Some(id) = cur {
            Sequence::push(&mut self.stack, id);
            cur = self.tree.left_of(id);
        }
    }
}

impl<'a, T, P> Iterator for InOrderIter<'a, T, P> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = Sequence::pop(&mut self.stack)?;
        self.push_left_spine(self.tree.right_of(id));
        Some(self.tree.element(id))
    }
}

impl<'a, T, P> IntoIterator for &'a OrderedTree<T, P> {
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord, P: Default> Collection<T> for OrderedTree<T, P> {
    type Iter<'a>
        = InOrderIter<'a, T, P>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, element: T) {
        self.insert(element);
    }

    fn remove(&mut self, element: &T) -> Option<T> {
        OrderedTree::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        OrderedTree::contains(self, element)
    }

    fn len(&self) -> usize {
        OrderedTree::len(self)
    }

    fn clear(&mut self) {
        OrderedTree::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        OrderedTree::iter(self)
    }
}

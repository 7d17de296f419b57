//! Complete binary tree for canopy.
//!
//! `CompleteTree<T>` keeps every level full except possibly the last,
//! which fills left to right. Elements carry no ordering obligation:
//! `add` attaches at the first vacancy in breadth-first order, and
//! `remove` swaps the victim's element with the last vertex before
//! unlinking that leaf, so the shape stays complete after every
//! operation. The shape pins the height at ⌊log2 n⌋, answered without
//! touching the structure.

use std::collections::VecDeque;
use std::fmt::Display;

use canopy_collection::{Collection, Sequence};
use canopy_tree::{BinaryTree, NodeId, TreeError, VertexRef};

/// A binary tree whose shape is always complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteTree<T> {
    tree: BinaryTree<T>,
}

impl<T> Default for CompleteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CompleteTree<T> {
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

    /// Height from the element count alone: ⌊log2 n⌋, or −1 when empty.
    pub fn height(&self) -> i32 {
        if self.tree.is_empty() {
            -1
        } else {
            self.tree.len().ilog2() as i32
        }
    }

    pub fn root(&self) -> Result<VertexRef<'_, T>, TreeError> {
        self.tree.root()
    }

    /// Read-only engine view: vertex handles, drawing, recounted heights.
    pub fn as_tree(&self) -> &BinaryTree<T> {
        &self.tree
    }

    /// Attaches `elem` at the first vacancy in breadth-first order.
    pub fn add(&mut self, elem: T) {
        let id = self.tree.new_vertex(elem);
        let Some(root) = self.tree.root_id() else {
            self.tree.set_root(id);
            return;
        };
        let parent = self.first_vacant(root);
        if self.tree.has_left(parent) {
            self.tree.link_right(parent, id);
        } else {
            self.tree.link_left(parent, id);
        }
    }

    /// Level-order walk calling `visitor` on every vertex.
    pub fn bfs(&self, mut visitor: impl FnMut(VertexRef<'_, T>)) {
        let Some(root) = self.tree.root_id() else {
            return;
        };
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        Sequence::push(&mut queue, root);
        while let Some(id) = Sequence::pop(&mut queue) {
            visitor(self.tree.vertex(id));
            if let Some(l) = self.tree.left_of(id) {
                Sequence::push(&mut queue, l);
            }
            if let Some(r) = self.tree.right_of(id) {
                Sequence::push(&mut queue, r);
            }
        }
    }

    /// Lazy level-order iteration over borrowed elements.
    pub fn iter(&self) -> BfsIter<'_, T> {
        let mut queue = VecDeque::new();
        if let Some(root) = self.tree.root_id() {
            Sequence::push(&mut queue, root);
        }
        BfsIter {
            tree: &self.tree,
            queue,
        }
    }

    /// First vertex in breadth-first order with a vacant child slot.
    ///
    /// Completeness guarantees it sits on the last two levels and takes
    /// the new leaf without hollowing out an earlier slot.
    fn first_vacant(&self, root: NodeId) -> NodeId {
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        Sequence::push(&mut queue, root);
        while let Some(id) = Sequence::pop(&mut queue) {
            match self.tree.left_of(id) {
                None => return id,
                Some(l) => Sequence::push(&mut queue, l),
            }
            match self.tree.right_of(id) {
                None => return id,
                Some(r) => Sequence::push(&mut queue, r),
            }
        }
        unreachable!("a finite complete tree has a vacant child slot")
    }

    /// Last vertex in breadth-first order, the only leaf safe to unlink.
    fn last_vertex(&self, root: NodeId) -> NodeId {
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        Sequence::push(&mut queue, root);
        let mut last = root;
        while let Some(id) = Sequence::pop(&mut queue) {
            last = id;
            if let Some(l) = self.tree.left_of(id) {
                Sequence::push(&mut queue, l);
            }
            if let Some(r) = self.tree.right_of(id) {
                Sequence::push(&mut queue, r);
            }
        }
        last
    }
}

impl<T: PartialEq> CompleteTree<T> {
    /// Removes one occurrence of `elem` while keeping the shape complete:
    /// the victim trades elements with the last breadth-first vertex and
    /// that leaf is unlinked.
    pub fn remove(&mut self, elem: &T) -> Option<T> {
        let victim = self.tree.search(elem)?;
        let root = self.tree.root_id()?;
        let last = self.last_vertex(root);
        self.tree.swap_elements(victim, last);
        let (removed, _, _) = self.tree.splice(last);
        Some(removed)
    }

    pub fn search(&self, elem: &T) -> Option<VertexRef<'_, T>> {
        self.tree.search(elem).map(|id| self.tree.vertex(id))
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.tree.contains(elem)
    }
}

impl<T: Display> CompleteTree<T> {
    pub fn draw(&self) -> String {
        self.tree.draw()
    }
}

impl<T: PartialEq> Collection<T> for CompleteTree<T> {
    type Iter<'a>
        = BfsIter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, element: T) {
        CompleteTree::add(self, element);
    }

    fn remove(&mut self, element: &T) -> Option<T> {
        CompleteTree::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        CompleteTree::contains(self, element)
    }

    fn len(&self) -> usize {
        CompleteTree::len(self)
    }

    fn clear(&mut self) {
        CompleteTree::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        CompleteTree::iter(self)
    }
}

/// Level-order iterator over borrowed elements.
#[derive(Debug)]
pub struct BfsIter<'a, T> {
    tree: &'a BinaryTree<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T> Iterator for BfsIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = Sequence::pop(&mut self.queue)?;
        if let Some(l) = self.tree.left_of(id) {
            Sequence::push(&mut self.queue, l);
        }
        if let Some(r) = self.tree.right_of(id) {
            Sequence::push(&mut self.queue, r);
        }
        Some(self.tree.element(id))
    }
}

impl<'a, T> IntoIterator for &'a CompleteTree<T> {
    type Item = &'a T;
    type IntoIter = BfsIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

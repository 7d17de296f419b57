//! Color-balanced (red-black) search tree for canopy.
//!
//! `RbTree<T>` is an `OrderedTree` whose payload is a vertex color.
//! After every insert and remove it restores three properties: the root
//! is black, a red vertex never has a red child, and every root-to-nil
//! path crosses the same number of black vertices. Together these bound
//! the height at 2·log2(n+1).
//!
//! Absent children count as black. Deletion tracks the doubly-black
//! position as a `(child, parent)` pair instead of attaching a
//! placeholder vertex, so no element-less vertex ever exists.
//!
//! As with the AVL variant, the rotation primitives are not exposed:
//! an external rotation would break the color bookkeeping, so the
//! operation does not exist on this type.

use std::fmt::Display;

use canopy_bst::{InOrderIter, OrderedTree};
use canopy_collection::Collection;
use canopy_tree::{NodeId, TreeError, VertexRef};

/// Vertex color. A vertex is red the moment it is created; rebalancing
/// settles its final color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Red,
    Black,
}

/// A self-balancing search tree with a height bound of 2·log2(n+1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RbTree<T> {
    tree: OrderedTree<T, Color>,
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbTree<T> {
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

    /// Height of the tree, recomputed by walking it.
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    pub fn root(&self) -> Result<VertexRef<'_, T, Color>, TreeError> {
        self.tree.root()
    }

    /// Read-only ordered-tree view: traversals, vertex handles, drawing.
    pub fn as_ordered(&self) -> &OrderedTree<T, Color> {
        &self.tree
    }

    /// The color of a vertex of this tree.
    pub fn color_of(&self, id: NodeId) -> Color {
        *self.tree.as_tree().payload(id)
    }

    /// Lazy in-order iteration over borrowed elements.
    pub fn iter(&self) -> InOrderIter<'_, T, Color> {
        self.tree.iter()
    }

    /// Color of a possibly absent vertex; nil is black.
    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| *self.tree.as_tree().payload(id))
    }

    fn is_black(&self, id: Option<NodeId>) -> bool {
        self.color(id) == Color::Black
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.tree.set_payload(id, color);
    }

    fn is_left(&self, id: NodeId) -> bool {
        self.tree.as_tree().is_left_child(id)
    }

    /// Restores the insert invariants walking upward from the fresh red
    /// vertex `v`.
    fn rebalance_insert(&mut self, mut v: NodeId) {
        loop {
            let Some(p) = self.tree.as_tree().parent_of(v) else {
                self.set_color(v, Color::Black);
                return;
            };
            if self.is_black(Some(p)) {
                return;
            }
            // Red parent: the grandparent exists because the root is black.
            let g = self
                .tree
                .as_tree()
                .parent_of(p)
                .expect("red vertex has a parent");
            let uncle = if self.is_left(p) {
                self.tree.as_tree().right_of(g)
            } else {
                self.tree.as_tree().left_of(g)
            };
            if !self.is_black(uncle) {
                let u = uncle.expect("red uncle exists");
                self.set_color(p, Color::Black);
                self.set_color(u, Color::Black);
                self.set_color(g, Color::Red);
                v = g;
                continue;
            }
            // Black uncle. Straighten a crossed vertex/parent pair first,
            // swapping their roles for the final step.
            let mut v = v;
            let mut p = p;
            if self.is_left(p) != self.is_left(v) {
                if self.is_left(p) {
                    self.tree.rotate_left(p);
                } else {
                    self.tree.rotate_right(p);
                }
                std::mem::swap(&mut v, &mut p);
            }
            self.set_color(p, Color::Black);
            self.set_color(g, Color::Red);
            if self.is_left(v) {
                self.tree.rotate_right(g);
            } else {
                self.tree.rotate_left(g);
            }
            return;
        }
    }

    /// Restores the remove invariants from a doubly-black position.
    ///
    /// `x` is the vertex promoted into the removed black vertex's place
    /// (possibly absent) and `parent` its parent; both colors at the
    /// position are black on entry.
    fn rebalance_remove(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        loop {
            // Reached the root: the extra black is absorbed.
            let Some(p) = parent else { return };
            let t = self.tree.as_tree();
            let x_is_left = match x {
                Some(id) => t.left_of(p) == Some(id),
                None => t.left_of(p).is_none(),
            };
            let mut s = if x_is_left { t.right_of(p) } else { t.left_of(p) }
                .expect("doubly-black vertex has a sibling");

            // Red sibling (so the parent is black): tilt the sibling up,
            // leaving x with a black sibling below a red parent.
            if !self.is_black(Some(s)) {
                self.set_color(p, Color::Red);
                self.set_color(s, Color::Black);
                if x_is_left {
                    self.tree.rotate_left(p);
                } else {
                    self.tree.rotate_right(p);
                }
                let t = self.tree.as_tree();
                s = if x_is_left { t.right_of(p) } else { t.left_of(p) }
                    .expect("doubly-black vertex has a sibling");
            }

            let t = self.tree.as_tree();
            let sl = t.left_of(s);
            let sr = t.right_of(s);

            if self.is_black(Some(s)) && self.is_black(sl) && self.is_black(sr) {
                if self.is_black(Some(p)) {
                    // Everything black: push the missing black unit up.
                    self.set_color(s, Color::Red);
                    x = Some(p);
                    parent = self.tree.as_tree().parent_of(p);
                    continue;
                }
                // Red parent absorbs the missing black unit.
                self.set_color(s, Color::Red);
                self.set_color(p, Color::Black);
                return;
            }

            // Near nephew red, far nephew black: fold the sibling so the
            // red ends up on the far side.
            if x_is_left && !self.is_black(sl) && self.is_black(sr) {
                self.set_color(s, Color::Red);
                self.set_color(sl.expect("near nephew is red"), Color::Black);
                self.tree.rotate_right(s);
                s = self
                    .tree
                    .as_tree()
                    .right_of(p)
                    .expect("doubly-black vertex has a sibling");
            } else if !x_is_left && !self.is_black(sr) && self.is_black(sl) {
                self.set_color(s, Color::Red);
                self.set_color(sr.expect("near nephew is red"), Color::Black);
                self.tree.rotate_left(s);
                s = self
                    .tree
                    .as_tree()
                    .left_of(p)
                    .expect("doubly-black vertex has a sibling");
            }

            // Far nephew red: the sibling takes over the parent's color
            // and a final rotation at the parent settles the count.
            let parent_color = self.color(Some(p));
            self.set_color(s, parent_color);
            self.set_color(p, Color::Black);
            let t = self.tree.as_tree();
            if x_is_left {
                let far = t.right_of(s).expect("far nephew is red");
                self.set_color(far, Color::Black);
                self.tree.rotate_left(p);
            } else {
                let far = t.left_of(s).expect("far nephew is red");
                self.set_color(far, Color::Black);
                self.tree.rotate_right(p);
            }
            return;
        }
    }
}

impl<T: Ord> RbTree<T> {
    /// Inserts `elem` (red), then recolors and rotates upward until the
    /// invariants hold. Returns the new vertex's id.
    pub fn insert(&mut self, elem: T) -> NodeId {
        let id = self.tree.insert(elem);
        self.rebalance_insert(id);
        id
    }

    /// Removes one occurrence of `elem`, recoloring and rotating as
    /// needed to keep the black-height balanced.
    pub fn remove(&mut self, elem: &T) -> Option<T> {
        let mut id = self.tree.find(elem)?;
        let t = self.tree.as_tree();
        if t.has_left(id) && t.has_right(id) {
            id = self.tree.swap_with_predecessor(id);
        }
        let removed_color = self.color_of(id);
        let (removed, parent, child) = self.tree.splice(id);
        if !self.is_black(child) {
            // A red replacement absorbs the removed black unit.
            let c = child.expect("red child exists");
            self.set_color(c, Color::Black);
            return Some(removed);
        }
        if removed_color == Color::Black {
            self.rebalance_remove(child, parent);
        }
        Some(removed)
    }

    pub fn search(&self, elem: &T) -> Option<VertexRef<'_, T, Color>> {
        self.tree.search(elem)
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.tree.contains(elem)
    }
}

impl<T: Display> RbTree<T> {
    /// Diagnostic rendering labeling vertices `R{element}` / `B{element}`.
    pub fn draw(&self) -> String {
        self.tree.as_tree().draw_with(|v| match v.payload() {
            Color::Red => format!("R{{{}}}", v.get()),
            Color::Black => format!("B{{{}}}", v.get()),
        })
    }
}

impl<T: Ord> Collection<T> for RbTree<T> {
    type Iter<'a>
        = InOrderIter<'a, T, Color>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, element: T) {
        self.insert(element);
    }

    fn remove(&mut self, element: &T) -> Option<T> {
        RbTree::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        RbTree::contains(self, element)
    }

    fn len(&self) -> usize {
        RbTree::len(self)
    }

    fn clear(&mut self) {
        RbTree::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        RbTree::iter(self)
    }
}

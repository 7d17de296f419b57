//! Vertex arena and generic binary-tree engine for canopy.
//!
//! `BinaryTree<T, P>` owns its vertices in an index arena and provides
//! the structure-level machinery every tree variant shares: link and
//! splice plumbing, rotations, recursive height, structural equality,
//! unordered search, and a deterministic text rendering. It does not
//! decide *where* elements go; placement policy belongs to the crates
//! built on top (`canopy-bst`, `canopy-avl`, `canopy-rbtree`,
//! `canopy-complete`).
//!
//! `P` is the per-vertex payload a variant needs for its bookkeeping:
//! `()` for plain trees, a cached height for AVL, a color for red-black.
//! Picking the payload through the type parameter replaces the
//! subclass-and-downcast pattern wholesale.

mod arena;
mod error;

use std::fmt::Display;

use arena::Arena;

pub use arena::NodeId;
pub use error::TreeError;

/// A generic binary tree over an arena of vertices.
#[derive(Clone, Debug)]
pub struct BinaryTree<T, P = ()> {
    arena: Arena<T, P>,
    root: Option<NodeId>,
    len: usize,
}

impl<T, P> Default for BinaryTree<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> BinaryTree<T, P> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every vertex and resets the count.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Root id, or `None` when the tree is empty.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Root vertex handle.
    pub fn root(&self) -> Result<VertexRef<'_, T, P>, TreeError> {
        self.root
            .map(|id| self.vertex(id))
            .ok_or(TreeError::EmptyTree)
    }

    /// Read-only handle for a vertex.
    pub fn vertex(&self, id: NodeId) -> VertexRef<'_, T, P> {
        VertexRef { tree: self, id }
    }

    pub fn element(&self, id: NodeId) -> &T {
        &self.arena.node(id).elem
    }

    pub fn payload(&self, id: NodeId) -> &P {
        &self.arena.node(id).payload
    }

    pub fn set_payload(&mut self, id: NodeId, payload: P) {
        self.arena.node_mut(id).payload = payload;
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).parent
    }

    pub fn left_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).left
    }

    pub fn right_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).right
    }

    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parent_of(id).is_some()
    }

    pub fn has_left(&self, id: NodeId) -> bool {
        self.left_of(id).is_some()
    }

    pub fn has_right(&self, id: NodeId) -> bool {
        self.right_of(id).is_some()
    }

    /// Whether `id` is its parent's left child. Roots are not left children.
    pub fn is_left_child(&self, id: NodeId) -> bool {
        self.parent_of(id)
            .is_some_and(|p| self.left_of(p) == Some(id))
    }

    /// Height of the subtree rooted at `id`, recomputed by walking it.
    ///
    /// A missing child counts as height −1, so a leaf has height 0.
    /// Variants that cache heights answer from their payload instead.
    pub fn height_of(&self, id: NodeId) -> i32 {
        self.height_from(Some(id))
    }

    fn height_from(&self, id: Option<NodeId>) -> i32 {
        match id {
            None => -1,
            Some(id) => {
                let n = self.arena.node(id);
                1 + self.height_from(n.left).max(self.height_from(n.right))
            }
        }
    }

    /// Height of the tree: the height of its root, or −1 when empty.
    pub fn height(&self) -> i32 {
        self.height_from(self.root)
    }

    /// Distance from `id` up to the root.
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = id;
        while let Some(p) = self.parent_of(cur) {
            depth += 1;
            cur = p;
        }
        depth
    }

    /// Allocates a detached vertex holding `elem` and counts it.
    ///
    /// The caller is responsible for attaching it with [`set_root`],
    /// [`link_left`] or [`link_right`].
    ///
    /// [`set_root`]: Self::set_root
    /// [`link_left`]: Self::link_left
    /// [`link_right`]: Self::link_right
    pub fn new_vertex(&mut self, elem: T) -> NodeId
    where
        P: Default,
    {
        self.len += 1;
        self.arena.alloc(elem, P::default())
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.arena.node_mut(id).parent = None;
        self.root = Some(id);
    }

    pub fn link_left(&mut self, parent: NodeId, child: NodeId) {
        self.arena.node_mut(parent).left = Some(child);
        self.arena.node_mut(child).parent = Some(parent);
    }

    pub fn link_right(&mut self, parent: NodeId, child: NodeId) {
        self.arena.node_mut(parent).right = Some(child);
        self.arena.node_mut(child).parent = Some(parent);
    }

    /// Swaps the elements of two vertices, leaving the structure alone.
    pub fn swap_elements(&mut self, a: NodeId, b: NodeId) {
        self.arena.swap_elems(a, b);
    }

    /// Removes a vertex with at most one child, promoting that child (or
    /// nothing) into its slot and reparenting it.
    ///
    /// Returns the removed element, the vertex's former parent, and the
    /// promoted child. When the removed vertex was the root, the promoted
    /// child becomes the new root.
    pub fn splice(&mut self, id: NodeId) -> (T, Option<NodeId>, Option<NodeId>) {
        let (parent, child) = {
            let n = self.arena.node(id);
            debug_assert!(n.left.is_none() || n.right.is_none());
            (n.parent, n.left.or(n.right))
        };
        match parent {
            None => self.root = child,
            Some(p) => {
                let pn = self.arena.node_mut(p);
                if pn.left == Some(id) {
                    pn.left = child;
                } else {
                    pn.right = child;
                }
            }
        }
        if let Some(c) = child {
            self.arena.node_mut(c).parent = parent;
        }
        self.len -= 1;
        let node = self.arena.release(id);
        (node.elem, parent, child)
    }

    /// Rotates right around `v`: its left child takes its place and `v`
    /// becomes that child's right child. No-op when `v` has no left child.
    pub fn rotate_right(&mut self, v: NodeId) {
        let Some(l) = self.left_of(v) else { return };
        let parent = self.parent_of(v);
        self.arena.node_mut(l).parent = parent;
        match parent {
            None => self.root = Some(l),
            Some(p) => {
                let pn = self.arena.node_mut(p);
                if pn.left == Some(v) {
                    pn.left = Some(l);
                } else {
                    pn.right = Some(l);
                }
            }
        }
        let lr = self.arena.node(l).right;
        self.arena.node_mut(v).left = lr;
        if let Some(lr) = lr {
            self.arena.node_mut(lr).parent = Some(v);
        }
        self.arena.node_mut(v).parent = Some(l);
        self.arena.node_mut(l).right = Some(v);
    }

    /// Mirror of [`rotate_right`]. No-op when `v` has no right child.
    ///
    /// [`rotate_right`]: Self::rotate_right
    pub fn rotate_left(&mut self, v: NodeId) {
        let Some(r) = self.right_of(v) else { return };
        let parent = self.parent_of(v);
        self.arena.node_mut(r).parent = parent;
        match parent {
            None => self.root = Some(r),
            Some(p) => {
                let pn = self.arena.node_mut(p);
                if pn.left == Some(v) {
                    pn.left = Some(r);
                } else {
                    pn.right = Some(r);
                }
            }
        }
        let rl = self.arena.node(r).left;
        self.arena.node_mut(v).right = rl;
        if let Some(rl) = rl {
            self.arena.node_mut(rl).parent = Some(v);
        }
        self.arena.node_mut(v).parent = Some(r);
        self.arena.node_mut(r).left = Some(v);
    }
}

impl<T: PartialEq, P> BinaryTree<T, P> {
    /// Membership by full traversal, no ordering assumed. O(n).
    pub fn search(&self, elem: &T) -> Option<NodeId> {
        self.search_from(self.root, elem)
    }

    fn search_from(&self, id: Option<NodeId>, elem: &T) -> Option<NodeId> {
        let id = id?;
        let n = self.arena.node(id);
        if n.elem == *elem {
            return Some(id);
        }
        self.search_from(n.left, elem)
            .or_else(|| self.search_from(n.right, elem))
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.search(elem).is_some()
    }
}

impl<T: PartialEq, P: PartialEq> BinaryTree<T, P> {
    fn subtree_eq(&self, a: Option<NodeId>, other: &Self, b: Option<NodeId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let na = self.arena.node(a);
                let nb = other.arena.node(b);
                na.elem == nb.elem
                    && na.payload == nb.payload
                    && self.subtree_eq(na.left, other, nb.left)
                    && self.subtree_eq(na.right, other, nb.right)
            }
            _ => false,
        }
    }
}

/// Structural equality: same shape, same elements, same payloads.
impl<T: PartialEq, P: PartialEq> PartialEq for BinaryTree<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}

impl<T: Eq, P: Eq> Eq for BinaryTree<T, P> {}

impl<T, P> BinaryTree<T, P> {
    /// Multi-line rendering with box connectors, labeling each vertex
    /// through `label`. Left children hang from `├─›` (or `└─›` when
    /// last), right children from `└─»`.
    pub fn draw_with(&self, label: impl Fn(VertexRef<'_, T, P>) -> String) -> String {
        let Some(root) = self.root else {
            return String::new();
        };
        let mut levels = vec![false; (self.height() + 1) as usize];
        let mut out = String::new();
        self.draw_vertex(root, 0, &mut levels, &label, &mut out);
        out
    }

    fn draw_spacer(levels: &[bool], l: usize, out: &mut String) {
        for &live in &levels[..l] {
            out.push_str(if live { "│  " } else { "   " });
        }
    }

    fn draw_vertex(
        &self,
        id: NodeId,
        l: usize,
        levels: &mut [bool],
        label: &impl Fn(VertexRef<'_, T, P>) -> String,
        out: &mut String,
    ) {
        out.push_str(&label(self.vertex(id)));
        out.push('\n');
        let (left, right) = {
            let n = self.arena.node(id);
            (n.left, n.right)
        };
        levels[l] = true;
        match (left, right) {
            (Some(left), Some(right)) => {
                Self::draw_spacer(levels, l, out);
                out.push_str("├─›");
                self.draw_vertex(left, l + 1, levels, label, out);
                Self::draw_spacer(levels, l, out);
                out.push_str("└─»");
                levels[l] = false;
                self.draw_vertex(right, l + 1, levels, label, out);
            }
            (Some(left), None) => {
                Self::draw_spacer(levels, l, out);
                out.push_str("└─›");
                levels[l] = false;
                self.draw_vertex(left, l + 1, levels, label, out);
            }
            (None, Some(right)) => {
                Self::draw_spacer(levels, l, out);
                out.push_str("└─»");
                levels[l] = false;
                self.draw_vertex(right, l + 1, levels, label, out);
            }
            (None, None) => {}
        }
    }
}

impl<T: Display, P> BinaryTree<T, P> {
    /// [`draw_with`] labeling vertices by their element alone.
    ///
    /// [`draw_with`]: Self::draw_with
    pub fn draw(&self) -> String {
        self.draw_with(|v| v.get().to_string())
    }
}

/// Read-only handle to a vertex, valid while the tree is borrowed.
///
/// This is the capability handed to external callers and visitor
/// closures; mutation goes through the owning tree.
#[derive(Debug)]
pub struct VertexRef<'a, T, P = ()> {
    tree: &'a BinaryTree<T, P>,
    id: NodeId,
}

impl<T, P> Clone for VertexRef<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P> Copy for VertexRef<'_, T, P> {}

impl<'a, T, P> VertexRef<'a, T, P> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element held by this vertex.
    pub fn get(&self) -> &'a T {
        self.tree.element(self.id)
    }

    /// The variant payload of this vertex.
    pub fn payload(&self) -> &'a P {
        self.tree.payload(self.id)
    }

    pub fn has_parent(&self) -> bool {
        self.tree.has_parent(self.id)
    }

    pub fn has_left(&self) -> bool {
        self.tree.has_left(self.id)
    }

    pub fn has_right(&self) -> bool {
        self.tree.has_right(self.id)
    }

    pub fn parent(&self) -> Result<Self, TreeError> {
        self.tree
            .parent_of(self.id)
            .map(|id| self.tree.vertex(id))
            .ok_or(TreeError::NoParent)
    }

    pub fn left(&self) -> Result<Self, TreeError> {
        self.tree
            .left_of(self.id)
            .map(|id| self.tree.vertex(id))
            .ok_or(TreeError::NoLeftChild)
    }

    pub fn right(&self) -> Result<Self, TreeError> {
        self.tree
            .right_of(self.id)
            .map(|id| self.tree.vertex(id))
            .ok_or(TreeError::NoRightChild)
    }

    /// Height of the subtree below this vertex, recomputed on each call.
    pub fn height(&self) -> i32 {
        self.tree.height_of(self.id)
    }

    /// Distance from this vertex up to the root.
    pub fn depth(&self) -> usize {
        self.tree.depth_of(self.id)
    }
}

/// Recursive subtree equality, mirroring whole-tree [`PartialEq`].
impl<T: PartialEq, P: PartialEq> PartialEq for VertexRef<'_, T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.subtree_eq(Some(self.id), other.tree, Some(other.id))
    }
}

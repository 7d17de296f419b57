//! Slot arena backing every canopy tree.
//!
//! Vertices live in a `Vec` of slots and refer to each other by index,
//! so the parent link is a plain `NodeId` rather than an owning pointer.
//! Slots vacated by deletion go on a free list and are reused by later
//! insertions.

/// Index of a vertex inside a tree's arena.
///
/// Ids are only meaningful for the tree that produced them, and a given
/// id is stable until that vertex is spliced out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    pub elem: T,
    pub payload: P,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T, P> {
    slots: Vec<Option<Node<T, P>>>,
    free: Vec<u32>,
}

impl<T, P> Arena<T, P> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Allocates a detached vertex and returns its id.
    pub(crate) fn alloc(&mut self, elem: T, payload: P) -> NodeId {
        let node = Node {
            elem,
            payload,
            parent: None,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(node);
                NodeId(i)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Vacates a slot and returns its vertex. The id must be live.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T, P> {
        let node = self.slots[id.0 as usize]
            .take()
            .expect("released a vacant slot");
        self.free.push(id.0);
        node
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T, P> {
        self.slots[id.0 as usize]
            .as_ref()
            .expect("stale vertex id")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T, P> {
        self.slots[id.0 as usize]
            .as_mut()
            .expect("stale vertex id")
    }

    /// Swaps the elements of two live slots, leaving links and payloads
    /// in place.
    pub(crate) fn swap_elems(&mut self, a: NodeId, b: NodeId) {
        let (i, j) = (a.0 as usize, b.0 as usize);
        if i == j {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let na = head[lo].as_mut().expect("stale vertex id");
        let nb = tail[0].as_mut().expect("stale vertex id");
        std::mem::swap(&mut na.elem, &mut nb.elem);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

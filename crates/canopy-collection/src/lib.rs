//! Capability traits shared by every canopy container.
//!
//! Containers live in their own `canopy-*` crates; this crate only holds
//! the seams between them so a tree, a heap, or a queue can be swapped
//! behind the same surface.

/// The generic container capability.
///
/// Every canopy container implements this: add, remove, membership,
/// size, and iteration in the container's defined order.
pub trait Collection<T> {
    /// Iterator over borrowed elements, in the container's defined order.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Adds an element to the container.
    fn add(&mut self, element: T);

    /// Removes one occurrence of `element`, returning it if present.
    ///
    /// Removing an absent element is a no-op and returns `None`.
    fn remove(&mut self, element: &T) -> Option<T>;

    /// Whether the container holds `element`.
    fn contains(&self, element: &T) -> bool;

    /// Number of elements currently held.
    fn len(&self) -> usize;

    /// Whether the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every element.
    fn clear(&mut self);

    /// Iterates the container in its defined order.
    fn iter(&self) -> Self::Iter<'_>;
}

/// A push/pop sequence, FIFO or LIFO depending on the implementor.
///
/// Traversal helpers are written against this so the same walk can run
/// breadth-first (queue) or depth-first (stack).
pub trait Sequence<T> {
    /// Pushes an element onto the sequence.
    fn push(&mut self, element: T);

    /// Pops the next element, or `None` when the sequence is empty.
    fn pop(&mut self) -> Option<T>;

    /// Whether the sequence holds no elements.
    fn is_empty(&self) -> bool;
}

/// LIFO: `Vec` serves as the stack.
impl<T> Sequence<T> for Vec<T> {
    fn push(&mut self, element: T) {
        Vec::push(self, element);
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// FIFO: `VecDeque` serves as the queue.
impl<T> Sequence<T> for std::collections::VecDeque<T> {
    fn push(&mut self, element: T) {
        self.push_back(element);
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn is_empty(&self) -> bool {
        std::collections::VecDeque::is_empty(self)
    }
}

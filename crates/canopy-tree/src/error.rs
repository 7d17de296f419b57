use thiserror::Error;

/// Errors surfaced by tree and vertex accessors.
///
/// Absent-link accessors fail with one of these instead of panicking;
/// membership queries return `Option`/`bool` and never error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("the tree is empty")]
    EmptyTree,
    #[error("vertex has no parent")]
    NoParent,
    #[error("vertex has no left child")]
    NoLeftChild,
    #[error("vertex has no right child")]
    NoRightChild,
}

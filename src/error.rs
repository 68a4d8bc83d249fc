//! Errors reported by the tree and its comparators.

use thiserror::Error;

/// A sign-returning comparator produced something other than `-1`, `0` or `1`.
///
/// See [`Signed`](crate::compare::Signed).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorError {
    /// The offending comparator result.
    #[error("comparator returned {0}, expected -1, 0 or 1")]
    OutOfRange(i32),
}

/// A structural invariant that [`Tree::validate`](crate::Tree::validate) found broken.
///
/// Depths count from the root, which is at depth 0. Positions count in-order from 0.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// The heights of a node's subtrees differ by more than one.
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// Left subtree height minus right subtree height.
        balance: isize,
    },
    /// A node's cached height doesn't match its subtree.
    #[error("node at depth {depth} caches height {cached} but its subtree is {actual} high")]
    StaleHeight {
        /// Depth of the offending node.
        depth: usize,
        /// The height stored in the node.
        cached: usize,
        /// The height of the subtree below it.
        actual: usize,
    },
    /// In-order neighbours don't compare strictly ascending under the tree's comparator.
    #[error("element at in-order position {position} is not greater than its predecessor")]
    OutOfOrder {
        /// In-order position of the element that compares too small.
        position: usize,
    },
    /// A node's parent link doesn't point at the node holding it.
    #[error("node at depth {depth} does not point back at its parent")]
    BrokenParentLink {
        /// Depth of the node with the bad link.
        depth: usize,
    },
    /// The element count kept by the tree disagrees with the number of nodes.
    #[error("tree records {recorded} elements but holds {counted}")]
    LengthMismatch {
        /// What `len()` reports.
        recorded: usize,
        /// How many nodes were found.
        counted: usize,
    },
}

//! This crate exposes an AVL tree: a Binary Search Tree (BST) that keeps itself balanced, used
//! here as an ordered set.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## AVL
//!
//! Inserting already sorted values into a plain BST makes a linked list with `O(N)` lookups. An
//! AVL tree additionally keeps, for every `Node`, the heights of its two subtrees within one of
//! each other. Every insert and delete walks back up from the changed `Node` to the root, fixing
//! heights and rotating wherever that balance is off by two. This limits the height to
//! `O(lg N)`.
//!
//! "Less" and "greater" come from the tree's [`Comparator`](compare::Comparator): `T`'s [`Ord`]
//! by default, or any function given to [`Tree::with_comparator`]. Two values it calls equal
//! are the same element, so the tree never holds both.
//!
//! # Examples
//!
//! ```
//! use avl::{PreOrderStyle, Tree};
//!
//! let mut tree = Tree::new();
//! for x in [5, 8, 15, 3, 1] {
//!     assert!(tree.insert(x));
//! }
//!
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3, 5, 8, 15]);
//!
//! // Sorted inserts still give a balanced shape.
//! assert_eq!(
//!     tree.display_pre_order(PreOrderStyle::structural()).to_string(),
//!     "8[3[1[* *] 5[* *]] 15[* *]]"
//! );
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
pub mod error;
pub mod iter;
pub mod render;
mod tree;

#[cfg(test)]
mod test;

pub use compare::{Comparator, Natural};
pub use error::{ComparatorError, InvariantError};
pub use render::PreOrderStyle;
pub use tree::Tree;

//! Lazy traversals over a [`Tree`](crate::Tree).
//!
//! Each iterator borrows the tree, so the tree can't change underneath it. Calling the
//! traversal method again starts over from the current root.

use std::iter::FusedIterator;
use std::ptr;

use crate::tree::Node;

/// Pre-order traversal: a node, then its left subtree, then its right subtree.
///
/// Created by [`Tree::pre_order`](crate::Tree::pre_order).
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// In-order traversal, i.e. ascending under the tree's comparator.
///
/// This follows parent links to climb back up, so it needs no stack.
///
/// Created by [`Tree::in_order`](crate::Tree::in_order).
pub struct InOrder<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            next: root.map(leftmost),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = successor(node);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

fn leftmost<T>(mut node: &Node<T>) -> &Node<T> {
    while let Some(left) = node.left() {
        node = left;
    }
    node
}

/// The node after `node` in order: the smallest node of its right subtree, or else the first
/// ancestor reached from a left subtree.
fn successor<T>(node: &Node<T>) -> Option<&Node<T>> {
    if let Some(right) = node.right() {
        return Some(leftmost(right));
    }

    let mut child = node;
    while let Some(parent) = child.parent() {
        if parent.left().map_or(false, |left| ptr::eq(left, child)) {
            return Some(parent);
        }
        child = parent;
    }
    None
}

/// Post-order traversal: a node's left subtree, then its right subtree, then the node.
///
/// Created by [`Tree::post_order`](crate::Tree::post_order).
pub struct PostOrder<'a, T> {
    // The flag is set once the node's children are on the stack above it.
    stack: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: root.map(|root| (root, false)).into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Pre-order traversal that yields `None` in place of every missing child.
///
/// A tree of `n` elements yields `2n + 1` items. An empty tree yields a single `None`.
///
/// Created by [`Tree::structure`](crate::Tree::structure).
pub struct Structure<'a, T> {
    stack: Vec<Option<&'a Node<T>>>,
}

impl<'a, T> Structure<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, T> Iterator for Structure<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        Some(slot.map(|node| {
            self.stack.push(node.right());
            self.stack.push(node.left());
            &node.value
        }))
    }
}

// Manual impls so cloning an iterator doesn't require `T: Clone`.
impl<T> Clone for PreOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for PostOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for Structure<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<T> ExactSizeIterator for PreOrder<'_, T> {}
impl<T> ExactSizeIterator for InOrder<'_, T> {}
impl<T> ExactSizeIterator for PostOrder<'_, T> {}

impl<T> FusedIterator for PreOrder<'_, T> {}
impl<T> FusedIterator for InOrder<'_, T> {}
impl<T> FusedIterator for PostOrder<'_, T> {}
impl<T> FusedIterator for Structure<'_, T> {}

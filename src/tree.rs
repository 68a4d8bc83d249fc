//! A self-balancing (AVL) ordered set whose nodes keep a pointer to their parent.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // The tree is a set so the same element can't go in twice.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! assert!(tree.delete(&1));
//! assert!(!tree.contains(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::compare::{Comparator, Natural};
use crate::error::InvariantError;
use crate::iter::{InOrder, PostOrder, PreOrder, Structure};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) holding a set of values.
///
/// Values are ordered by the tree's [`Comparator`], which defaults to the element type's [`Ord`].
/// Two values the comparator calls equal are the same element: inserting the second one is
/// rejected.
///
/// The tree is `Send` and `Sync` when its elements and comparator are. Like the standard
/// collections it does no locking of its own, so threads sharing one tree have to serialize
/// access themselves, e.g. by keeping it behind a `Mutex`.
pub struct Tree<T, C = Natural> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that it can be moved around with the
    // `Tree` without the children's parent pointers breaking.
    root: Link<T>,
    len: usize,
    comparator: C,
    marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: The tree owns every node it links to, exactly like a `Box` would, and the parent
// pointers never leave the tree. Sending or sharing the tree is like sending or sharing the values
// and the comparator.
unsafe impl<T: Send, C: Send> Send for Tree<T, C> {}
// SAFETY: Nothing reachable from `&Tree` mutates the nodes.
unsafe impl<T: Sync, C: Sync> Sync for Tree<T, C> {}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Drop for Tree<T, C> {
    fn drop(&mut self) {
        // Post-order with an explicit stack: a node is only freed once both of its children are.
        let mut stack: Vec<(NonNull<Node<T>>, bool)> = Vec::new();
        stack.extend(self.root.0.take().map(|root| (root, false)));

        while let Some((node, children_freed)) = stack.pop() {
            if children_freed {
                // SAFETY: Every node was allocated with `Box::new` in `Node::new_leaked` and is
                // reachable from exactly one child link, so it's pushed here once and freed once.
                // Its children were freed before it so nothing reads it afterwards.
                unsafe { drop(Box::from_raw(node.as_ptr())) };
                continue;
            }

            stack.push((node, true));
            // SAFETY: `node` hasn't been freed yet.
            let node = unsafe { node.as_ref() };
            stack.extend(node.right.0.map(|right| (right, false)));
            stack.extend(node.left.0.map(|left| (left, false)));
        }
    }
}

impl<T, C> Clone for Tree<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: Link(self.root().map(|root| clone_subtree(root, Link(None)))),
            len: self.len,
            comparator: self.comparator.clone(),
            marker: PhantomData,
        }
    }
}

/// Deep copies the subtree under `node`, pointing the copy's root at `parent`.
fn clone_subtree<T: Clone>(node: &Node<T>, parent: Link<T>) -> NonNull<Node<T>> {
    let copy = Node::new_leaked(node.value.clone(), parent);
    let left = node.left().map(|left| clone_subtree(left, Link(Some(copy))));
    let right = node.right().map(|right| clone_subtree(right, Link(Some(copy))));

    // SAFETY: `copy` was just allocated and nothing else references it yet.
    unsafe {
        let copy = &mut *copy.as_ptr();
        copy.left = Link(left);
        copy.right = Link(right);
        copy.height = node.height;
    }
    copy
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<T: Ord> Tree<T> {
    /// Generates a new, empty `Tree` ordered by `T`'s [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> Tree<T, C> {
    /// Generates a new, empty `Tree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
    ///
    /// assert!(tree.insert(-10));
    /// assert!(tree.contains(&10));
    /// assert!(!tree.insert(10));
    /// assert_eq!(tree.get(&10), Some(&-10));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: Link(None),
            len: 0,
            comparator,
            marker: PhantomData,
        }
    }

    /// The comparator this tree was built with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// How many elements are in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree: 0 when empty, 1 for a lone root.
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| root.height)
    }

    /// Visits every element, each node before its left then right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root(), self.len)
    }

    /// Visits every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 10] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [3, 5, 10]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self.root(), self.len)
    }

    /// Same as [`Tree::in_order`].
    pub fn iter(&self) -> InOrder<'_, T> {
        self.in_order()
    }

    /// Visits every element, each node after its left then right subtree.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root(), self.len)
    }

    /// Pre-order traversal that also reports every missing child as `None`.
    ///
    /// The shape of the tree can be rebuilt from this sequence alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let structure: Vec<_> = tree.structure().collect();
    /// assert_eq!(structure, [Some(&2), Some(&1), None, None, None]);
    /// ```
    pub fn structure(&self) -> Structure<'_, T> {
        Structure::new(self.root())
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        // SAFETY: A non-empty root is a live node owned by this tree, and `&self` keeps every
        // mutation out for as long as the returned reference lives.
        unsafe { self.root.0.map(|root| &*root.as_ptr()) }
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// Whether an element equal to `value` (per the comparator) is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Finds the stored element equal to `value` per the comparator. It can differ from `value`
    /// when the comparator only looks at part of it.
    pub fn get(&self, value: &T) -> Option<&T> {
        let closest = self.find_closest(value)?;
        // SAFETY: `find_closest` only returns live nodes of this tree. `&self` keeps them alive
        // and unmodified for the returned lifetime.
        let closest = unsafe { &*closest.as_ptr() };
        match self.comparator.compare(value, &closest.value) {
            Ordering::Equal => Some(&closest.value),
            Ordering::Less | Ordering::Greater => None,
        }
    }

    /// Inserts `value` into the tree. Returns `false`, dropping `value`, when an equal element is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let Some(parent) = self.find_closest(&value) else {
            self.root = Link(Some(Node::new_leaked(value, Link(None))));
            self.len = 1;
            return true;
        };

        // SAFETY: `find_closest` only returns live nodes of this tree.
        let ordering = self
            .comparator
            .compare(&value, unsafe { &(*parent.as_ptr()).value });
        if ordering == Ordering::Equal {
            log::trace!("rejected a duplicate insert");
            return false;
        }

        let leaf = Link(Some(Node::new_leaked(value, Link(Some(parent)))));
        // SAFETY: `parent` is live and, being the closest node, has no child on the side `value`
        // goes, so nothing is overwritten.
        unsafe {
            match ordering {
                Ordering::Less => (*parent.as_ptr()).left = leaf,
                _ => (*parent.as_ptr()).right = leaf,
            }
            self.correct_imbalance(Link(Some(parent)));
        }
        self.len += 1;
        true
    }

    /// Removes the element equal to `value` from the tree. Returns `false` when there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// ```
    pub fn delete(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes the element equal to `value` from the tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0));
    /// tree.insert((1, "one"));
    ///
    /// assert_eq!(tree.take(&(1, "")), Some((1, "one")));
    /// assert_eq!(tree.take(&(1, "")), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let closest = self.find_closest(value)?;
        // SAFETY: `find_closest` only returns live nodes of this tree.
        match self
            .comparator
            .compare(value, unsafe { &(*closest.as_ptr()).value })
        {
            // SAFETY: As above, `closest` is a live node of this tree.
            Ordering::Equal => Some(unsafe { self.remove(closest) }),
            Ordering::Less | Ordering::Greater => None,
        }
    }

    /// Checks every structural invariant of the tree: cached heights, the AVL balance, ordering
    /// under the comparator, parent links and the element count.
    ///
    /// A tree only built through its public methods always passes; this exists for tests and
    /// debugging.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let counted = match self.root() {
            None => 0,
            Some(root) => {
                if root.parent.0.is_some() {
                    return Err(InvariantError::BrokenParentLink { depth: 0 });
                }
                check_subtree(root, 0)?.1
            }
        };
        if counted != self.len {
            return Err(InvariantError::LengthMismatch {
                recorded: self.len,
                counted,
            });
        }

        let mut values = self.in_order();
        if let Some(mut previous) = values.next() {
            for (position, value) in values.enumerate() {
                if self.comparator.compare(previous, value) != Ordering::Less {
                    return Err(InvariantError::OutOfOrder {
                        position: position + 1,
                    });
                }
                previous = value;
            }
        }
        Ok(())
    }

    /// Finds the node holding `value`, or else the last node on its search path. That node has no
    /// child on the side `value` would go. Only `None` for an empty tree.
    fn find_closest(&self, value: &T) -> Option<NonNull<Node<T>>> {
        let mut node = self.root.0?;
        loop {
            // SAFETY: Every link reachable from the root points to a live node.
            let current = unsafe { &*node.as_ptr() };
            let next = match self.comparator.compare(value, &current.value) {
                Ordering::Less => current.left.0,
                Ordering::Equal => return Some(node),
                Ordering::Greater => current.right.0,
            };
            match next {
                Some(next) => node = next,
                None => return Some(node),
            }
        }
    }
}

impl<T, C> Tree<T, C> {
    /// Unlinks `node` from the tree, rebalances, and returns its value.
    ///
    /// A node with two children swaps values with its in-order successor, which has no left
    /// child, and the successor's node is unlinked instead.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree.
    unsafe fn remove(&mut self, node: NonNull<Node<T>>) -> T {
        let mut doomed = node;
        if let (Some(_), Some(right)) = ((*node.as_ptr()).left.0, (*node.as_ptr()).right.0) {
            let successor = leftmost(right);
            ptr::swap(
                ptr::addr_of_mut!((*node.as_ptr()).value),
                ptr::addr_of_mut!((*successor.as_ptr()).value),
            );
            doomed = successor;
        }

        let parent = (*doomed.as_ptr()).parent;
        let child = Link((*doomed.as_ptr()).left.0.or((*doomed.as_ptr()).right.0));
        if let Some(child) = child.0 {
            (*child.as_ptr()).parent = parent;
        }
        self.replace_child(parent, doomed, child);
        self.len -= 1;
        self.correct_imbalance(parent);
        log::trace!("removed an element, {} left", self.len);

        // SAFETY: Nothing links to `doomed` anymore and it was allocated in `Node::new_leaked`.
        // Its own links are plain pointers so dropping the box only drops the value.
        let Node { value, .. } = *Box::from_raw(doomed.as_ptr());
        value
    }

    /// Points whatever held `old` (the parent's child link, or the root) at `new`.
    ///
    /// # Safety
    ///
    /// `parent` must be empty or live, and `old` must be its child (or the root).
    unsafe fn replace_child(&mut self, parent: Link<T>, old: NonNull<Node<T>>, new: Link<T>) {
        match parent.0 {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut *parent.as_ptr();
                if parent.left.0 == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
    }

    /// Walks from `start` up to the root, fixing heights and rotating wherever a node's subtrees
    /// differ in height by two. See [the Wikipedia page][wiki] for the four cases.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
    ///
    /// # Safety
    ///
    /// `start` must be empty or a live node of this tree. Every subtree below the path to the root
    /// must already be a valid AVL tree.
    unsafe fn correct_imbalance(&mut self, start: Link<T>) {
        let mut cursor = start.0;
        while let Some(node) = cursor {
            (*node.as_ptr()).fix_height();

            let balance = (*node.as_ptr()).balance_factor();
            let subtree_root = if balance > 1 {
                let child = (*node.as_ptr())
                    .left
                    .0
                    .expect("a left-heavy node has a left child");
                if (*child.as_ptr()).balance_factor() >= 0 {
                    self.rotate_right(node, child);
                    child
                } else {
                    let grandchild = (*child.as_ptr())
                        .right
                        .0
                        .expect("a right-heavy node has a right child");
                    self.rotate_left(child, grandchild);
                    self.rotate_right(node, grandchild);
                    grandchild
                }
            } else if balance < -1 {
                let child = (*node.as_ptr())
                    .right
                    .0
                    .expect("a right-heavy node has a right child");
                if (*child.as_ptr()).balance_factor() <= 0 {
                    self.rotate_left(node, child);
                    child
                } else {
                    let grandchild = (*child.as_ptr())
                        .left
                        .0
                        .expect("a left-heavy node has a left child");
                    self.rotate_right(child, grandchild);
                    self.rotate_left(node, grandchild);
                    grandchild
                }
            } else {
                node
            };

            if cfg!(debug_assertions) {
                let subtree_root = &*subtree_root.as_ptr();
                let left_height = subtree_root.left().map_or(0, |n| n.height);
                let right_height = subtree_root.right().map_or(0, |n| n.height);
                assert_eq!(subtree_root.height, left_height.max(right_height) + 1);
                assert!(left_height.abs_diff(right_height) <= 1);
            }

            cursor = (*subtree_root.as_ptr()).parent.0;
        }
    }

    /// Rotates `parent` to the right. This moves `child`, its left child, up and `parent` down.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    grandparent               grandparent
    ///      /                         /
    ///   parent                     child
    ///    /   \                     /   \
    ///  child  z      rotate ->    x   parent
    ///  /   \                          /   \
    /// x     y                        y     z
    /// ```
    ///
    /// # Safety
    ///
    /// `parent` must be a live node of this tree and `child` its left child.
    unsafe fn rotate_right(&mut self, parent: NonNull<Node<T>>, child: NonNull<Node<T>>) {
        log::trace!("rotating right");
        let (p, c) = (parent.as_ptr(), child.as_ptr());

        (*p).left = (*c).right;
        if let Some(inner) = (*p).left.0 {
            (*inner.as_ptr()).parent = Link(Some(parent));
        }
        (*c).right = Link(Some(parent));

        self.lift(parent, child);
    }

    /// The mirror image of [`Tree::rotate_right`]: `child`, the right child of `parent`, moves up.
    ///
    /// # Safety
    ///
    /// `parent` must be a live node of this tree and `child` its right child.
    unsafe fn rotate_left(&mut self, parent: NonNull<Node<T>>, child: NonNull<Node<T>>) {
        log::trace!("rotating left");
        let (p, c) = (parent.as_ptr(), child.as_ptr());

        (*p).right = (*c).left;
        if let Some(inner) = (*p).right.0 {
            (*inner.as_ptr()).parent = Link(Some(parent));
        }
        (*c).left = Link(Some(parent));

        self.lift(parent, child);
    }

    /// Finishes a rotation once `parent` hangs under `child`: fixes both heights and hooks `child`
    /// into the grandparent (or the root) in place of `parent`.
    ///
    /// # Safety
    ///
    /// Both nodes must be live nodes of this tree, with `parent` still linked from the
    /// grandparent.
    unsafe fn lift(&mut self, parent: NonNull<Node<T>>, child: NonNull<Node<T>>) {
        // `parent` is lower now so its height goes first.
        (*parent.as_ptr()).fix_height();
        (*child.as_ptr()).fix_height();

        let grandparent = (*parent.as_ptr()).parent;
        self.replace_child(grandparent, parent, Link(Some(child)));
        (*child.as_ptr()).parent = grandparent;
        (*parent.as_ptr()).parent = Link(Some(child));
    }
}

/// The leftmost (smallest) node of the subtree rooted at `node`.
///
/// # Safety
///
/// `node` must be live.
unsafe fn leftmost<T>(mut node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    while let Some(left) = (*node.as_ptr()).left.0 {
        node = left;
    }
    node
}

/// Checks heights, balance and parent links below `node`, returning its height and size.
fn check_subtree<T>(node: &Node<T>, depth: usize) -> Result<(usize, usize), InvariantError> {
    let mut heights = [0; 2];
    let mut count = 1;
    for (side, child) in [node.left(), node.right()].into_iter().enumerate() {
        let Some(child) = child else {
            continue;
        };
        if !child.parent().map_or(false, |parent| ptr::eq(parent, node)) {
            return Err(InvariantError::BrokenParentLink { depth: depth + 1 });
        }
        let (height, size) = check_subtree(child, depth + 1)?;
        heights[side] = height;
        count += size;
    }

    let actual = heights[0].max(heights[1]) + 1;
    if node.height != actual {
        return Err(InvariantError::StaleHeight {
            depth,
            cached: node.height,
            actual,
        });
    }
    let balance = heights[0] as isize - heights[1] as isize;
    if balance.abs() > 1 {
        return Err(InvariantError::Unbalanced { depth, balance });
    }
    Ok((actual, count))
}

pub(crate) struct Link<T>(pub(crate) Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    fn get(&self) -> Option<&Node<T>> {
        // SAFETY: Links are only ever created for live nodes and a node's links are kept up to
        // date as long as the node is alive. The returned reference can't outlive the node
        // holding the link, which is borrowed from the tree.
        unsafe { self.0.map(|ptr| &*ptr.as_ptr()) }
    }
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    left: Link<T>,
    right: Link<T>,
    parent: Link<T>,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> Node<T> {
    fn new_leaked(value: T, parent: Link<T>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            value,
            left: Link(None),
            right: Link(None),
            parent,
            height: 1,
        })))
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.get()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.get()
    }

    pub(crate) fn parent(&self) -> Option<&Self> {
        self.parent.get()
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        let left_height = self.left().map_or(0, |n| n.height);
        let right_height = self.right().map_or(0, |n| n.height);
        self.height = left_height.max(right_height) + 1;
    }

    /// Left subtree height minus right subtree height. Positive means left-heavy.
    fn balance_factor(&self) -> isize {
        let left_height = self.left().map_or(0, |n| n.height);
        let right_height = self.right().map_or(0, |n| n.height);
        left_height as isize - right_height as isize
    }
}

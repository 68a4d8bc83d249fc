//! Orderings a [`Tree`](crate::Tree) can be built with.
//!
//! A tree never looks at `PartialEq` or `Ord` on its elements directly. Every placement, lookup
//! and duplicate check goes through the [`Comparator`] it was constructed with.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use avl::compare::Signed;
//! use avl::Tree;
//!
//! // Any `Fn(&T, &T) -> Ordering` works, e.g. to reverse the order.
//! let mut reversed = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! reversed.insert(5);
//! reversed.insert(2);
//! reversed.insert(7);
//! assert_eq!(reversed.in_order().copied().collect::<Vec<_>>(), [7, 5, 2]);
//!
//! // Sign-returning comparators are adapted with `Signed`.
//! let mut by_abs = Tree::with_comparator(Signed(|a: &i32, b: &i32| {
//!     match a.abs().cmp(&b.abs()) {
//!         Ordering::Less => -1,
//!         Ordering::Equal => 0,
//!         Ordering::Greater => 1,
//!     }
//! }));
//! assert!(by_abs.insert(-10));
//! assert!(by_abs.contains(&10));
//! assert!(!by_abs.insert(10));
//! ```

use std::cmp::Ordering;

use crate::error::ComparatorError;

/// A three-way comparison used for every ordering decision in a tree.
///
/// Implementations must be a total order (antisymmetric and transitive) and must give the same
/// answer for the same pair of values for as long as the tree lives.
pub trait Comparator<T> {
    /// Compares `a` to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The element type's own [`Ord`]. This is the comparator of [`Tree::new`](crate::Tree::new).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a comparator that returns `-1`, `0` or `1` instead of an [`Ordering`].
///
/// ## Panics
///
/// Comparing panics if the wrapped function returns anything else. A comparator like that breaks
/// the tree's contract and continuing would corrupt its structure.
#[derive(Clone, Copy, Debug)]
pub struct Signed<F>(pub F);

impl<T, F> Comparator<T> for Signed<F>
where
    F: Fn(&T, &T) -> i32,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match ordering_from_sign((self.0)(a, b)) {
            Ok(ordering) => ordering,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Converts a `-1`/`0`/`1` comparison result into an [`Ordering`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
///
/// use avl::compare::ordering_from_sign;
/// use avl::error::ComparatorError;
///
/// assert_eq!(ordering_from_sign(-1), Ok(Ordering::Less));
/// assert_eq!(ordering_from_sign(2), Err(ComparatorError::OutOfRange(2)));
/// ```
pub fn ordering_from_sign(sign: i32) -> Result<Ordering, ComparatorError> {
    match sign {
        -1 => Ok(Ordering::Less),
        0 => Ok(Ordering::Equal),
        1 => Ok(Ordering::Greater),
        other => Err(ComparatorError::OutOfRange(other)),
    }
}

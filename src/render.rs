//! Text forms of the traversals, for eyeballing and for checking a tree's exact shape in tests.
//!
//! # Examples
//!
//! ```
//! use avl::{PreOrderStyle, Tree};
//!
//! let mut tree = Tree::new();
//! for x in [5, 8, 15] {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(
//!     tree.display_pre_order(PreOrderStyle::structural()).to_string(),
//!     "8[5[* *] 15[* *]]"
//! );
//! assert_eq!(tree.display_pre_order(PreOrderStyle::new()).to_string(), "8 5 15");
//! assert_eq!(tree.display_in_order(", ").to_string(), "5, 8, 15");
//! assert_eq!(tree.display_post_order(" ").to_string(), "5 15 8");
//! ```

use std::fmt;

use crate::iter::{InOrder, PostOrder};
use crate::tree::{Node, Tree};

/// What a missing child renders as when sentinels are shown.
pub const SENTINEL: &str = "*";

/// How [`Tree::display_pre_order`] lays out a tree.
///
/// The default is plain: values separated by spaces, no delimiters, no sentinels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreOrderStyle {
    delimiters: Option<(char, char)>,
    show_sentinels: bool,
}

impl PreOrderStyle {
    /// The plain style.
    pub const fn new() -> Self {
        Self {
            delimiters: None,
            show_sentinels: false,
        }
    }

    /// Brackets around every subtree and [`SENTINEL`]s for missing children, e.g.
    /// `8[5[* *] 15[* *]]`. Two trees with the same rendering have the same shape.
    pub const fn structural() -> Self {
        Self::new().with_delimiters('[', ']').with_sentinels(true)
    }

    /// Wraps every node's children in `open` and `close`.
    pub const fn with_delimiters(self, open: char, close: char) -> Self {
        Self {
            delimiters: Some((open, close)),
            ..self
        }
    }

    /// Drops the delimiters again, going back to a flat list.
    pub const fn without_delimiters(self) -> Self {
        Self {
            delimiters: None,
            ..self
        }
    }

    /// Whether missing children render as [`SENTINEL`].
    pub const fn with_sentinels(self, show_sentinels: bool) -> Self {
        Self {
            show_sentinels,
            ..self
        }
    }

    /// The `(open, close)` delimiters, if any.
    pub const fn delimiters(&self) -> Option<(char, char)> {
        self.delimiters
    }

    /// Whether missing children are rendered.
    pub const fn show_sentinels(&self) -> bool {
        self.show_sentinels
    }
}

impl<T, C> Tree<T, C>
where
    T: fmt::Display,
{
    /// Renders the tree in pre-order according to `style`.
    ///
    /// Without delimiters the values (and sentinels, if shown) are separated by single spaces.
    /// With delimiters every node renders as `value open left right close`, with a space between
    /// `left` and `right` when both render something.
    pub fn display_pre_order(&self, style: PreOrderStyle) -> DisplayPreOrder<'_, T> {
        DisplayPreOrder {
            root: self.root(),
            style,
        }
    }

    /// Renders the elements in ascending order with `separator` between them.
    pub fn display_in_order<'a>(&'a self, separator: &'a str) -> Joined<'a, InOrder<'a, T>> {
        Joined {
            values: self.in_order(),
            separator,
        }
    }

    /// Renders the elements in post-order with `separator` between them.
    pub fn display_post_order<'a>(&'a self, separator: &'a str) -> Joined<'a, PostOrder<'a, T>> {
        Joined {
            values: self.post_order(),
            separator,
        }
    }
}

/// Pre-order rendering of a tree. Created by [`Tree::display_pre_order`].
pub struct DisplayPreOrder<'a, T> {
    root: Option<&'a Node<T>>,
    style: PreOrderStyle,
}

impl<T: fmt::Display> fmt::Display for DisplayPreOrder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style.delimiters {
            Some((open, close)) => {
                write_nested(f, self.root, open, close, self.style.show_sentinels)
            }
            None => write_flat(f, self.root, self.style.show_sentinels),
        }
    }
}

fn write_flat<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    root: Option<&Node<T>>,
    show_sentinels: bool,
) -> fmt::Result {
    let mut stack = vec![root];
    let mut first = true;
    while let Some(slot) = stack.pop() {
        if slot.is_none() && !show_sentinels {
            continue;
        }
        if !first {
            f.write_str(" ")?;
        }
        first = false;
        match slot {
            Some(node) => {
                write!(f, "{}", node.value)?;
                stack.push(node.right());
                stack.push(node.left());
            }
            None => f.write_str(SENTINEL)?,
        }
    }
    Ok(())
}

fn write_nested<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    node: Option<&Node<T>>,
    open: char,
    close: char,
    show_sentinels: bool,
) -> fmt::Result {
    let Some(node) = node else {
        return if show_sentinels {
            f.write_str(SENTINEL)
        } else {
            Ok(())
        };
    };

    let (left, right) = (node.left(), node.right());
    write!(f, "{}{open}", node.value)?;
    write_nested(f, left, open, close, show_sentinels)?;
    if (left.is_some() || show_sentinels) && (right.is_some() || show_sentinels) {
        f.write_str(" ")?;
    }
    write_nested(f, right, open, close, show_sentinels)?;
    write!(f, "{close}")
}

/// A sequence of values rendered with a separator between them. Created by
/// [`Tree::display_in_order`] and [`Tree::display_post_order`].
pub struct Joined<'a, I> {
    values: I,
    separator: &'a str,
}

impl<'a, I, T> fmt::Display for Joined<'a, I>
where
    I: Iterator<Item = &'a T> + Clone,
    T: fmt::Display + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.clone().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

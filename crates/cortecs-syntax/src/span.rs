//! Source positions and extents.
//!
//! A [`Span`] is a `(line, column)` pair. The same type is used for three
//! things:
//!
//! - an absolute position (the start of a token in the document),
//! - an extent (how far a node reaches from its own start),
//! - a relative offset (where a child starts, measured from its parent's
//!   start).
//!
//! Lines and columns are zero-based. Adding a span to a position moves the
//! position forward: when the added span stays on line zero only the column
//! advances, otherwise the line advances and the column is taken verbatim.
//! Subtraction is the inverse, so `a + (b - a) == b` for every `b >= a`.
//! This is what lets a diagnostic produced deep inside a tree be translated
//! outward one parent at a time.
//!
//! # Examples
//!
//! ```
//! use cortecs_syntax::span::Span;
//!
//! let parent = Span::new(3, 4);
//! let child = Span::new(4, 8);
//!
//! let offset = child - parent;
//! assert_eq!(offset, Span::new(1, 8));
//! assert_eq!(parent + offset, child);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A zero-based line/column pair.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Span {
    /// Zero-based line
    pub line: u32,

    /// Zero-based column, counted in characters
    pub column: u32,
}

impl Span {
    /// The empty extent, also the start of a document.
    pub const ZERO: Span = Span { line: 0, column: 0 };

    /// Creates a span from a line and a column.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Creates a single-line extent of `width` columns.
    #[must_use]
    pub const fn columns(width: u32) -> Self {
        Self {
            line: 0,
            column: width,
        }
    }

    /// Returns `true` for the empty extent.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.line == 0 && self.column == 0
    }

    /// Computes the extent covered by `text`.
    ///
    /// ```
    /// use cortecs_syntax::span::Span;
    ///
    /// assert_eq!(Span::of_text("( "), Span::new(0, 2));
    /// assert_eq!(Span::of_text("ab\ncde"), Span::new(1, 3));
    /// ```
    #[must_use]
    pub fn of_text(text: &str) -> Self {
        text.chars().fold(Span::ZERO, |span, ch| {
            if ch == '\n' {
                Span::new(span.line + 1, 0)
            } else {
                Span::new(span.line, span.column + 1)
            }
        })
    }
}

impl Add for Span {
    type Output = Span;

    fn add(self, rhs: Span) -> Span {
        if rhs.line == 0 {
            Span::new(self.line, self.column + rhs.column)
        } else {
            Span::new(self.line + rhs.line, rhs.column)
        }
    }
}

impl AddAssign for Span {
    fn add_assign(&mut self, rhs: Span) {
        *self = *self + rhs;
    }
}

impl Sub for Span {
    type Output = Span;

    /// `end - start`: the offset that carries `start` to `end`.
    fn sub(self, rhs: Span) -> Span {
        if self.line == rhs.line {
            Span::new(0, self.column.saturating_sub(rhs.column))
        } else {
            Span::new(self.line.saturating_sub(rhs.line), self.column)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Trait for syntax that knows where it sits.
pub trait Spanned {
    /// The extent of the node, measured from its own start.
    fn span(&self) -> Span;

    /// The start of the node, measured from its parent's start.
    fn offset(&self) -> Span;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_line() {
        assert_eq!(Span::new(2, 3) + Span::columns(4), Span::new(2, 7));
    }

    #[test]
    fn test_add_next_line() {
        assert_eq!(Span::new(2, 3) + Span::new(1, 4), Span::new(3, 4));
    }

    #[test]
    fn test_sub_same_line() {
        assert_eq!(Span::new(5, 9) - Span::new(5, 2), Span::columns(7));
    }

    #[test]
    fn test_sub_other_line() {
        assert_eq!(Span::new(7, 1) - Span::new(5, 9), Span::new(2, 1));
    }

    #[test]
    fn test_sub_saturates() {
        assert_eq!(Span::new(1, 1) - Span::new(1, 5), Span::ZERO);
        assert_eq!(Span::new(0, 4) - Span::new(3, 0), Span::new(0, 4));
    }

    #[test]
    fn test_add_inverts_sub() {
        let points = [
            Span::new(0, 0),
            Span::new(0, 5),
            Span::new(1, 0),
            Span::new(1, 7),
            Span::new(4, 2),
        ];
        for a in points {
            for b in points {
                if b >= a {
                    assert_eq!(a + (b - a), b, "{a:?} -> {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_of_text() {
        assert_eq!(Span::of_text(""), Span::ZERO);
        assert_eq!(Span::of_text("let"), Span::columns(3));
        assert_eq!(Span::of_text("a\n\nbc"), Span::new(2, 2));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Span::new(0, 4).to_string(), "1:5");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Span::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"line":1,"column":2}"#);
    }
}

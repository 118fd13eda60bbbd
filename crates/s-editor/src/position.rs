//! Line/column positions for reporting.
//!
//! Every offset the editor core works with is a flat **char offset** into the
//! buffer (a count of Unicode scalar values from the start of the text). That
//! is what match spans, selections and edits use. `Position` exists only to
//! turn such an offset into something a person can find on screen, so it is
//! produced by [`TextBuffer::position_of`](crate::buffer::TextBuffer::position_of)
//! and never consumed by the core.

use std::fmt;

/// A (line, column) pair, both 0-indexed. `col` counts chars, not bytes.
///
/// Ordered lexicographically: line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin: line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for people.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

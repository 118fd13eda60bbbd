//! Match index: the spans of one scan plus a cyclic cursor.
//!
//! A `MatchIndex` is built from the output of [`search::rebuild`] and then
//! navigated without rescanning:
//!
//! ```text
//! spans:  [(0,3) (3,3) (6,3)]
//! cursor:    0 → next → 1 → next → 2 → next → 0 …
//!            0 → prev → 2 → prev → 1 …
//! ```
//!
//! Every navigation method is a no-op returning `None` on an empty index.
//!
//! [`search::rebuild`]: crate::search::rebuild

use crate::search::{MatchSpan, Selection};

/// Ordered, non-overlapping match spans and a cursor into them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchIndex {
    spans: Vec<MatchSpan>,
    cursor: usize,
}

impl MatchIndex {
    /// An empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spans: Vec::new(),
            cursor: 0,
        }
    }

    /// Wrap the result of a scan. The cursor starts on the first span.
    #[must_use]
    pub fn from_spans(spans: Vec<MatchSpan>) -> Self {
        debug_assert!(
            spans.windows(2).all(|w| w[0].end() <= w[1].start),
            "spans must ascend without overlap"
        );
        Self { spans, cursor: 0 }
    }

    /// All spans in document order.
    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The cursor, or `None` when there is nothing to point at.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        (!self.spans.is_empty()).then_some(self.cursor)
    }

    /// The span under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<MatchSpan> {
        self.spans.get(self.cursor).copied()
    }

    /// Drop every span and reset the cursor.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.cursor = 0;
    }

    // -- Navigation ---------------------------------------------------------

    /// Move to the first span and emit it.
    pub fn select_first(&mut self) -> Option<Selection> {
        if self.spans.is_empty() {
            return None;
        }
        self.cursor = 0;
        self.emit()
    }

    /// Advance one span, wrapping from the last back to the first.
    pub fn select_next(&mut self) -> Option<Selection> {
        if self.spans.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.spans.len();
        self.emit()
    }

    /// Step back one span, wrapping from the first to the last.
    pub fn select_previous(&mut self) -> Option<Selection> {
        if self.spans.is_empty() {
            return None;
        }
        let len = self.spans.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.emit()
    }

    fn emit(&self) -> Option<Selection> {
        debug_assert!(self.cursor < self.spans.len(), "cursor out of range");
        self.current().map(MatchSpan::selection)
    }

    /// Human-readable position, e.g. `"match 2 of 5"`.
    #[must_use]
    pub fn status(&self) -> String {
        match self.spans.len() {
            0 => "no matches".to_string(),
            n => format!("match {} of {n}", self.cursor + 1),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

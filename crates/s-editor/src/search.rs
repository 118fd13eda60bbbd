//! Search: building the list of match spans for a query.
//!
//! [`rebuild`] scans a text once, left to right, and returns every
//! non-overlapping match of a [`SearchQuery`] in document order:
//!
//! - **Literal** queries use plain substring search. Scanning resumes right
//!   after the end of the previous match, so `"aa"` in `"aaaa"` matches at
//!   0 and 2, never at 1.
//! - **Regex** queries are compiled with the `regex` crate and use its
//!   leftmost-first, non-overlapping iteration. Empty matches (from patterns
//!   like `x*`) are dropped: a span always covers at least one char.
//!
//! Spans are reported in char offsets. The scan itself runs over UTF-8
//! bytes; a `CharCounter` converts match boundaries as it goes, which is
//! linear because matches arrive in ascending order.

use regex::Regex;

use crate::error::SearchError;
use crate::query::{SearchMode, SearchQuery};

// ---------------------------------------------------------------------------
// MatchSpan / Selection
// ---------------------------------------------------------------------------

/// One occurrence of a pattern: start offset and length, both in chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

impl MatchSpan {
    #[inline]
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    /// The selection a caller should show for this span.
    #[inline]
    #[must_use]
    pub const fn selection(self) -> Selection {
        Selection {
            start: self.start,
            end: self.end(),
            caret: self.end(),
        }
    }
}

impl From<(usize, usize)> for MatchSpan {
    fn from((start, len): (usize, usize)) -> Self {
        Self { start, len }
    }
}

/// The active selection emitted by navigation: `[start, end)` highlighted,
/// caret parked at `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    pub caret: usize,
}

// ---------------------------------------------------------------------------
// Rebuild
// ---------------------------------------------------------------------------

/// Scan `content` for every non-overlapping match of `query`.
///
/// An empty pattern yields an empty list.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] if `query` is a regex that does
/// not compile.
pub fn rebuild(content: &str, query: &SearchQuery) -> Result<Vec<MatchSpan>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    match query.mode {
        SearchMode::Literal => Ok(find_literal(content, &query.pattern)),
        SearchMode::Regex => {
            let re = compile(&query.pattern)?;
            Ok(find_regex(content, &re))
        }
    }
}

/// Compile a regex pattern, mapping failures to [`SearchError`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidPattern`] on a syntax error or when the
/// compiled program would exceed the engine's size limit.
pub fn compile(pattern: &str) -> Result<Regex, SearchError> {
    Regex::new(pattern).map_err(|source| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn find_literal(content: &str, pattern: &str) -> Vec<MatchSpan> {
    let pat_chars = pattern.chars().count();
    let mut counter = CharCounter::new(content);
    content
        .match_indices(pattern)
        .map(|(byte_idx, _)| MatchSpan::new(counter.advance_to(byte_idx), pat_chars))
        .collect()
}

fn find_regex(content: &str, re: &Regex) -> Vec<MatchSpan> {
    let mut counter = CharCounter::new(content);
    re.find_iter(content)
        .filter(|m| !m.is_empty())
        .map(|m| MatchSpan::new(counter.advance_to(m.start()), m.as_str().chars().count()))
        .collect()
}

// ---------------------------------------------------------------------------
// Byte → char conversion
// ---------------------------------------------------------------------------

/// Converts ascending byte offsets into char offsets in one forward pass.
struct CharCounter<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCounter<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Char offset of `byte_idx`, which must be a char boundary at or after
    /// the previous call's argument.
    fn advance_to(&mut self, byte_idx: usize) -> usize {
        debug_assert!(byte_idx >= self.byte, "byte offsets must ascend");
        self.chars += self.text[self.byte..byte_idx].chars().count();
        self.byte = byte_idx;
        self.chars
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

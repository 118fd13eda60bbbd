//! Text buffer: the editable text of a session.
//!
//! A `TextBuffer` wraps a [`ropey::Rope`] and tracks two independent flags:
//!
//! - **dirty**: the text changed since the last match-index rebuild. Set by
//!   every edit, cleared by the session once a rebuild against the current
//!   text has been installed. A fresh buffer starts dirty because it has never
//!   been scanned.
//! - **modified**: the text changed since the last load or save. This is the
//!   unsaved-changes flag that guards quitting.
//!
//! All offsets are **char offsets** (Unicode scalar values), the rope's
//! native unit. Byte offsets never leak into the public API.

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use crate::position::Position;

/// The editable text of one session, backed by a rope.
pub struct TextBuffer {
    rope: Rope,
    path: Option<PathBuf>,
    dirty: bool,
    modified: bool,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file path.
    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a buffer holding `text`. The buffer is unmodified but dirty.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
            dirty: true,
            modified: false,
        }
    }

    // -- Text access --------------------------------------------------------

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines. An empty buffer has one (empty) line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Collect all text into a `String`. Allocates.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// The text in the char range `range`, or `None` if it is out of bounds
    /// or reversed.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<RopeSlice<'_>> {
        if range.start > range.end || range.end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(range))
    }

    /// Convert a char offset into a (line, col) position.
    ///
    /// An offset equal to `len_chars()` is valid and maps to the position just
    /// past the last character. Returns `None` beyond that.
    #[must_use]
    pub fn position_of(&self, char_idx: usize) -> Option<Position> {
        if char_idx > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        Some(Position::new(line, char_idx - line_start))
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at char offset `at`. Inserting an empty string is a
    /// no-op and leaves both flags alone.
    ///
    /// # Panics
    ///
    /// Panics if `at > len_chars()`.
    pub fn insert(&mut self, at: usize, text: &str) {
        assert!(at <= self.rope.len_chars(), "insert offset out of bounds");
        if text.is_empty() {
            return;
        }
        self.rope.insert(at, text);
        self.touch();
    }

    /// Append `text` at the end of the buffer.
    pub fn append(&mut self, text: &str) {
        let end = self.rope.len_chars();
        self.insert(end, text);
    }

    /// Delete the char range `range`. An empty range is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the range is reversed or extends past the end of the text.
    pub fn delete(&mut self, range: Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.rope.len_chars(),
            "delete range out of bounds"
        );
        if range.is_empty() {
            return;
        }
        self.rope.remove(range);
        self.touch();
    }

    /// Replace the whole text.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.touch();
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.modified = true;
    }

    // -- Scan tracking ------------------------------------------------------

    /// True if the text changed since the last match-index rebuild.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next search request to rescan.
    #[inline]
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Record that a rebuild against the current text has been installed.
    #[inline]
    pub const fn mark_scanned(&mut self) {
        self.dirty = false;
    }

    // -- Metadata -----------------------------------------------------------

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set the file path for this buffer.
    #[inline]
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// True if the buffer changed since the last load or save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the buffer as saved (not modified).
    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("chars", &self.len_chars())
            .field("dirty", &self.dirty)
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Session: one buffer, one query, one match index, and the commands that
//! act on them.
//!
//! The session is the whole data model of an editor window. Front ends
//! translate user actions into calls on it and render what comes back; they
//! never touch the index directly.
//!
//! # Staleness
//!
//! The index is stale when the buffer is dirty or the query changed since the
//! last successful rebuild. Both kinds of change clear the index right away
//! (its offsets or its meaning no longer hold), and both force a rescan on the
//! next search request. A search request against a fresh index does not
//! rescan; it just reselects the first match.
//!
//! # Search flow
//!
//! ```text
//! search()           begin_search() + finish_search() + select first
//! begin_search()     stale? → start a rebuild (worker thread or inline)
//! finish_search()    wait for the rebuild, install it, clear staleness
//! select_next()      finish_search() first, then move the cursor forward
//! select_previous()  finish_search() first, then move the cursor back
//! ```
//!
//! Because every navigation command finishes the pending rebuild before
//! acting, a command issued after a search always observes that search's
//! index. An edit or query change while a rebuild is running discards the
//! pending result.
//!
//! # Errors
//!
//! - An invalid regex is reported and the index is left as it was; the query
//!   stays stale so the next request tries again.
//! - A failed load empties the buffer. A failed save leaves it untouched.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::buffer::TextBuffer;
use crate::error::{OptionError, SearchError, SessionError};
use crate::file;
use crate::index::MatchIndex;
use crate::options::{self, OptionName, Options, SetDirective};
use crate::query::{SearchMode, SearchQuery};
use crate::rebuild::PendingRebuild;
use crate::search::Selection;

/// The state of one editing session.
#[derive(Debug, Default)]
pub struct Session {
    buffer: TextBuffer,
    query: SearchQuery,
    index: MatchIndex,
    /// Query edited or mode toggled since the last installed rebuild.
    query_changed: bool,
    pending: Option<PendingRebuild>,
    selection: Option<Selection>,
    options: Options,
}

impl Session {
    // -- Construction -------------------------------------------------------

    /// An empty session with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty session with the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// A session holding `text`, with no file path.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            ..Self::default()
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// The installed index. Does not wait for a pending rebuild.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> &MatchIndex {
        &self.index
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The selection emitted by the last navigation command, if it is still
    /// valid (edits and query changes drop it).
    #[inline]
    #[must_use]
    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// True when the next search request will rescan.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.buffer.is_dirty() || self.query_changed
    }

    /// True while a rebuild has been started but not installed.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at char offset `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OutOfBounds`] if `at` is past the end.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<(), SessionError> {
        let len = self.buffer.len_chars();
        if at > len {
            return Err(SessionError::OutOfBounds { offset: at, len });
        }
        if text.is_empty() {
            return Ok(());
        }
        self.buffer.insert(at, text);
        self.on_edit();
        Ok(())
    }

    /// Append `text` at the end of the buffer.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.append(text);
        self.on_edit();
    }

    /// Delete the char range `range`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OutOfBounds`] if the range is reversed or runs
    /// past the end.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), SessionError> {
        let len = self.buffer.len_chars();
        if range.end > len {
            return Err(SessionError::OutOfBounds {
                offset: range.end,
                len,
            });
        }
        if range.start > range.end {
            return Err(SessionError::OutOfBounds {
                offset: range.start,
                len,
            });
        }
        if range.is_empty() {
            return Ok(());
        }
        self.buffer.delete(range);
        self.on_edit();
        Ok(())
    }

    /// Replace the whole text.
    pub fn replace_all(&mut self, text: &str) {
        self.buffer.replace_all(text);
        self.on_edit();
    }

    /// The text changed: the index no longer describes it.
    fn on_edit(&mut self) {
        self.buffer.mark_dirty();
        self.invalidate("edit");
    }

    // -- Query --------------------------------------------------------------

    /// Replace the search pattern. Setting the same pattern is a no-op.
    pub fn set_pattern(&mut self, pattern: &str) {
        if self.query.pattern == pattern {
            return;
        }
        self.query.pattern = pattern.to_string();
        self.on_query_change();
    }

    /// Set the search mode. Setting the current mode is a no-op.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.query.mode == mode {
            return;
        }
        self.query.mode = mode;
        self.on_query_change();
    }

    /// Flip between literal and regex mode, returning the new mode.
    pub fn toggle_mode(&mut self) -> SearchMode {
        self.set_mode(self.query.mode.toggled());
        self.query.mode
    }

    fn on_query_change(&mut self) {
        self.query_changed = true;
        self.invalidate("query change");
    }

    fn invalidate(&mut self, reason: &'static str) {
        if self.pending.take().is_some() {
            debug!(reason, "discarded in-flight rebuild");
        }
        self.index.clear();
        self.selection = None;
        debug!(reason, "match index invalidated");
    }

    // -- Search -------------------------------------------------------------

    /// Start a rebuild if the index is stale and none is running.
    ///
    /// With the `background` option on, the scan runs on a worker thread and
    /// this returns immediately. If the thread cannot be spawned the scan
    /// runs inline instead.
    pub fn begin_search(&mut self) {
        if self.pending.is_some() || !self.is_stale() {
            return;
        }
        let content = self.buffer.contents();
        let query = self.query.clone();
        let pending = if self.options.background {
            match PendingRebuild::spawn(content.clone(), query.clone()) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "cannot spawn rebuild worker; scanning inline");
                    PendingRebuild::inline(&content, query)
                }
            }
        } else {
            PendingRebuild::inline(&content, query)
        };
        debug!(pattern = %self.query.pattern, mode = %self.query.mode, "rebuild started");
        self.pending = Some(pending);
    }

    /// Wait for the pending rebuild, if any, and install its result.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPattern`] if the pending rebuild failed.
    /// The index is left untouched and stays stale.
    pub fn finish_search(&mut self) -> Result<(), SearchError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        match pending.wait() {
            Ok(spans) => {
                info!(
                    pattern = %self.query.pattern,
                    mode = %self.query.mode,
                    matches = spans.len(),
                    "match index rebuilt"
                );
                self.index = MatchIndex::from_spans(spans);
                self.buffer.mark_scanned();
                self.query_changed = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rebuild failed");
                Err(e)
            }
        }
    }

    /// Rebuild the index if stale, then select the first match.
    ///
    /// Returns `None` when there are no matches.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Search`] for an invalid regex.
    pub fn search(&mut self) -> Result<Option<Selection>, SessionError> {
        self.begin_search();
        self.finish_search()?;
        Ok(self.emit(MatchIndex::select_first))
    }

    /// Select the next match, wrapping to the first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Search`] if a pending rebuild failed.
    pub fn select_next(&mut self) -> Result<Option<Selection>, SessionError> {
        self.finish_search()?;
        Ok(self.emit(MatchIndex::select_next))
    }

    /// Select the previous match, wrapping to the last.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Search`] if a pending rebuild failed.
    pub fn select_previous(&mut self) -> Result<Option<Selection>, SessionError> {
        self.finish_search()?;
        Ok(self.emit(MatchIndex::select_previous))
    }

    fn emit(&mut self, step: fn(&mut MatchIndex) -> Option<Selection>) -> Option<Selection> {
        let sel = step(&mut self.index)?;
        debug!(start = sel.start, end = sel.end, "selected match");
        self.selection = Some(sel);
        Some(sel)
    }

    // -- Files --------------------------------------------------------------

    /// Replace the buffer with the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::File`] if the file cannot be read; the buffer
    /// is emptied in that case.
    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        match file::load(path) {
            Ok(text) => {
                self.buffer = TextBuffer::from_text(&text);
                self.buffer.set_path(path.to_path_buf());
                self.invalidate("open");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "open failed; buffer cleared");
                self.buffer = TextBuffer::new();
                self.invalidate("open failed");
                Err(e.into())
            }
        }
    }

    /// Write the buffer to `path` (or to its current path when `None`),
    /// returning the path written after the extension rule.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoPath`] with no path to write to, or
    /// [`SessionError::File`] if the write fails. The buffer is unchanged
    /// on failure.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        let target = path
            .or_else(|| self.buffer.path())
            .ok_or(SessionError::NoPath)?
            .to_path_buf();
        let content = self.buffer.contents();
        match file::save(&target, &content, &self.options.extension) {
            Ok(written) => {
                self.buffer.set_path(written.clone());
                self.buffer.mark_saved();
                Ok(written)
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                Err(e.into())
            }
        }
    }

    /// Whether the session may end.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsavedChanges`] when the buffer is modified
    /// and `force` is false.
    pub fn check_quit(&self, force: bool) -> Result<(), SessionError> {
        if !force && self.buffer.is_modified() {
            return Err(SessionError::UnsavedChanges);
        }
        Ok(())
    }

    // -- Options ------------------------------------------------------------

    /// Apply one `:set` directive, returning text to show, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Option`] for unknown options, boolean
    /// operations on string options, and unparsable values.
    pub fn apply_set(&mut self, directive: &SetDirective) -> Result<Option<String>, SessionError> {
        match directive {
            SetDirective::On(name) => self.set_bool(name, |_| true).map(|()| None),
            SetDirective::Off(name) => self.set_bool(name, |_| false).map(|()| None),
            SetDirective::Toggle(name) => self.set_bool(name, |v| !v).map(|()| None),
            SetDirective::Query(name) => {
                let opt = OptionName::parse(name)?;
                Ok(Some(self.format_option(opt)))
            }
            SetDirective::Assign(name, value) => {
                let opt = OptionName::parse(name)?;
                match opt {
                    OptionName::Extension => {
                        let ext = value.trim_start_matches('.');
                        self.options.extension = ext.to_string();
                    }
                    OptionName::Regex | OptionName::Background => {
                        let v = options::parse_bool(opt, value)?;
                        self.write_bool(opt, v);
                    }
                }
                Ok(None)
            }
            SetDirective::ShowChanged => {
                let defaults = Self::default();
                let changed: Vec<String> = OptionName::ALL
                    .into_iter()
                    .filter(|&o| self.format_option(o) != defaults.format_option(o))
                    .map(|o| self.format_option(o))
                    .collect();
                Ok(Some(changed.join("  ")))
            }
            SetDirective::ShowAll => {
                let all: Vec<String> =
                    OptionName::ALL.into_iter().map(|o| self.format_option(o)).collect();
                Ok(Some(all.join("  ")))
            }
        }
    }

    fn set_bool(&mut self, name: &str, f: impl FnOnce(bool) -> bool) -> Result<(), SessionError> {
        let opt = OptionName::parse(name)?;
        let current = self.read_bool(opt).ok_or(OptionError::NotBoolean(opt.as_str()))?;
        self.write_bool(opt, f(current));
        Ok(())
    }

    const fn read_bool(&self, opt: OptionName) -> Option<bool> {
        match opt {
            OptionName::Regex => Some(self.query.mode.is_regex()),
            OptionName::Background => Some(self.options.background),
            OptionName::Extension => None,
        }
    }

    fn write_bool(&mut self, opt: OptionName, value: bool) {
        match opt {
            OptionName::Regex => self.set_mode(if value {
                SearchMode::Regex
            } else {
                SearchMode::Literal
            }),
            OptionName::Background => self.options.background = value,
            OptionName::Extension => {}
        }
    }

    fn format_option(&self, opt: OptionName) -> String {
        match self.read_bool(opt) {
            Some(v) => options::format_bool(opt.as_str(), v),
            None => format!("{}={}", opt.as_str(), self.options.extension),
        }
    }

    // -- Status -------------------------------------------------------------

    /// One-line summary for a status bar.
    #[must_use]
    pub fn status(&self) -> String {
        let name = self
            .buffer
            .path()
            .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
        let modified = if self.buffer.is_modified() { " [+]" } else { "" };
        let search = if self.query.is_empty() {
            String::new()
        } else if self.is_stale() {
            format!("  {} /{}/", self.query.mode, self.query.pattern)
        } else {
            format!(
                "  {} /{}/ {}",
                self.query.mode,
                self.query.pattern,
                self.index.status()
            )
        };
        format!("{name}{modified}  {} chars{search}", self.buffer.len_chars())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

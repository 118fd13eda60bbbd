//! Background rebuild: a match scan running on a worker thread.
//!
//! A [`PendingRebuild`] is the future of one [`search::rebuild`] call. The
//! session starts one when a search request finds the index stale, and every
//! navigation command waits on it before touching the index, so a command
//! issued after a search always sees that search's result.
//!
//! There is no cancellation. Dropping a pending rebuild detaches the worker:
//! it runs to completion against its own snapshot of the text and its result
//! is thrown away. The session does exactly that when the text or the query
//! changes under an in-flight scan.
//!
//! [`search::rebuild`]: crate::search::rebuild

use std::io;
use std::panic;
use std::thread::{self, JoinHandle};

use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::search::{self, MatchSpan};

/// What a rebuild produces.
pub type RebuildOutcome = Result<Vec<MatchSpan>, SearchError>;

enum State {
    Ready(RebuildOutcome),
    Running(JoinHandle<RebuildOutcome>),
}

/// A rebuild that has been started but whose result has not been taken yet.
pub struct PendingRebuild {
    query: SearchQuery,
    state: State,
}

impl PendingRebuild {
    /// Scan `content` on a new worker thread.
    ///
    /// The worker owns its snapshot of the text, so later edits to the buffer
    /// cannot race with the scan.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned. The caller can
    /// fall back to [`PendingRebuild::inline`].
    pub fn spawn(content: String, query: SearchQuery) -> io::Result<Self> {
        let worker_query = query.clone();
        let handle = thread::Builder::new()
            .name("match-rebuild".into())
            .spawn(move || search::rebuild(&content, &worker_query))?;
        Ok(Self {
            query,
            state: State::Running(handle),
        })
    }

    /// Scan `content` on the calling thread. The result is ready immediately.
    #[must_use]
    pub fn inline(content: &str, query: SearchQuery) -> Self {
        let outcome = search::rebuild(content, &query);
        Self {
            query,
            state: State::Ready(outcome),
        }
    }

    /// The query being scanned for.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// True once [`wait`](Self::wait) would return without blocking.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Ready(_) => true,
            State::Running(handle) => handle.is_finished(),
        }
    }

    /// Block until the scan completes and take its result.
    ///
    /// A panic on the worker is re-raised here.
    pub fn wait(self) -> RebuildOutcome {
        match self.state {
            State::Ready(outcome) => outcome,
            State::Running(handle) => match handle.join() {
                Ok(outcome) => outcome,
                Err(payload) => panic::resume_unwind(payload),
            },
        }
    }
}

impl std::fmt::Debug for PendingRebuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRebuild")
            .field("query", &self.query)
            .field("finished", &self.is_finished())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_is_ready() {
        let p = PendingRebuild::inline("abcabc", SearchQuery::literal("abc"));
        assert!(p.is_finished());
        assert_eq!(
            p.wait().unwrap(),
            vec![MatchSpan::new(0, 3), MatchSpan::new(3, 3)]
        );
    }

    #[test]
    fn spawned_matches_inline() {
        let text = "foo1 foo22 foo333".repeat(50);
        let query = SearchQuery::regex(r"foo\d+");
        let spawned = PendingRebuild::spawn(text.clone(), query.clone()).unwrap();
        let inline = PendingRebuild::inline(&text, query);
        assert_eq!(spawned.wait().unwrap(), inline.wait().unwrap());
    }

    #[test]
    fn spawned_reports_invalid_pattern() {
        let p = PendingRebuild::spawn("x".to_string(), SearchQuery::regex("[")).unwrap();
        assert!(matches!(p.wait(), Err(SearchError::InvalidPattern { .. })));
    }

    #[test]
    fn query_is_kept() {
        let p = PendingRebuild::inline("", SearchQuery::regex("a+"));
        assert_eq!(p.query(), &SearchQuery::regex("a+"));
    }

    #[test]
    fn dropping_a_running_rebuild_detaches() {
        let p = PendingRebuild::spawn("a".repeat(10_000), SearchQuery::literal("a")).unwrap();
        drop(p);
    }
}

//! Error types for the editor core.
//!
//! Two recoverable failure classes exist: a search pattern that does not
//! compile ([`SearchError`]) and a file that cannot be read or written
//! ([`FileError`]). [`OptionError`] covers `:set` directives that cannot be
//! applied. [`SessionError`] wraps all three for the session's command
//! handlers and adds the session-level refusals.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while building a match index.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a whole-file load or store.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// The path the failed operation was working on.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// A `:set` directive that cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("not a boolean option: {0}")]
    NotBoolean(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Failure of a session command.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("offset out of range: {offset} (buffer has {len} chars)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("no file name (use :w <path>)")]
    NoPath,

    #[error("unsaved changes (use :q! to discard)")]
    UnsavedChanges,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_message_names_the_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = SearchError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern `(`:"));
    }

    #[test]
    fn file_error_keeps_path() {
        let err = FileError::Read {
            path: PathBuf::from("/nope/notes.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.path(), std::path::Path::new("/nope/notes.txt"));
        assert_eq!(err.to_string(), "cannot read /nope/notes.txt: not found");
    }

    #[test]
    fn session_error_is_transparent_over_sources() {
        let err = SessionError::from(FileError::Write {
            path: PathBuf::from("out.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.to_string(), "cannot write out.txt: denied");
    }
}

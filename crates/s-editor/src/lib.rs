//! # s-editor: Editor core for s-edit
//!
//! The data model of a single-window text editor with literal and regex
//! search:
//!
//! - **[`buffer`]**: `TextBuffer`, rope-backed text with dirty/modified flags
//! - **[`query`]**: `SearchQuery` and `SearchMode` (literal or regex)
//! - **[`search`]**: scanning text into ordered, non-overlapping `MatchSpan`s
//! - **[`index`]**: `MatchIndex`, the spans plus a cyclic cursor
//! - **[`rebuild`]**: running a scan on a worker thread
//! - **[`session`]**: `Session`, the command handlers tying it all together
//! - **[`file`]**: whole-file load and save with the extension rule
//! - **[`command`]**: typed command line: parse and execute
//! - **[`options`]**: the `:set` system
//! - **[`position`]**: line/column reporting
//! - **[`error`]**: error types

pub mod buffer;
pub mod command;
pub mod error;
pub mod file;
pub mod index;
pub mod options;
pub mod position;
pub mod query;
pub mod rebuild;
pub mod search;
pub mod session;

pub use error::{FileError, OptionError, SearchError, SessionError};
pub use index::MatchIndex;
pub use query::{SearchMode, SearchQuery};
pub use search::{MatchSpan, Selection};
pub use session::Session;

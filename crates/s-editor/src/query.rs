//! Search query: the pattern text and how to interpret it.

use std::fmt;

/// How a search pattern is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Plain substring match.
    #[default]
    Literal,
    /// Regular expression (Rust `regex` syntax).
    Regex,
}

impl SearchMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Literal => Self::Regex,
            Self::Regex => Self::Literal,
        }
    }

    /// `true` for [`SearchMode::Regex`].
    #[inline]
    #[must_use]
    pub const fn is_regex(self) -> bool {
        matches!(self, Self::Regex)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Regex => f.write_str("regex"),
        }
    }
}

/// A pattern plus its mode. Two queries that compare equal produce the same
/// match list over the same text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub pattern: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    /// A literal query.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            mode: SearchMode::Literal,
        }
    }

    /// A regex query.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            mode: SearchMode::Regex,
        }
    }

    /// True when there is nothing to search for.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

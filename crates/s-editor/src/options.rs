//! Editor options: the `:set` system.
//!
//! Parses `:set` directives and names the options a session understands.
//! Values live on the [`Session`](crate::session::Session): the search mode
//! is part of its query, the rest sit in an [`Options`] value.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show string  |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=V`  | Assign a string value         |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! # Option names
//!
//! | Full name    | Abbrev | Type   | Default |
//! |--------------|--------|--------|---------|
//! | `regex`      | `re`   | bool   | false   |
//! | `background` | `bg`   | bool   | true    |
//! | `extension`  | `ext`  | string | `txt`   |

use crate::error::OptionError;
use crate::file::DEFAULT_EXTENSION;

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option`: enable a boolean option.
    On(String),

    /// `:set nooption`: disable a boolean option.
    Off(String),

    /// `:set option!`: toggle a boolean option.
    Toggle(String),

    /// `:set option?`: query the current value.
    Query(String),

    /// `:set option=value`: assign a value.
    Assign(String, String),

    /// `:set` with no arguments: show changed options.
    ShowChanged,

    /// `:set all`: show all options.
    ShowAll,
}

/// A known option, resolved from its full name or abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    Regex,
    Background,
    Extension,
}

impl OptionName {
    /// Every option, in display order.
    pub const ALL: [Self; 3] = [Self::Regex, Self::Background, Self::Extension];

    /// Resolve a full name or abbreviation.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "regex" | "re" => Some(Self::Regex),
            "background" | "bg" => Some(Self::Background),
            "extension" | "ext" => Some(Self::Extension),
            _ => None,
        }
    }

    /// Like [`resolve`](Self::resolve), but an unknown name is an error.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::Unknown`] for names that are not options.
    pub fn parse(name: &str) -> Result<Self, OptionError> {
        Self::resolve(name).ok_or_else(|| OptionError::Unknown(name.to_string()))
    }

    /// The canonical (full) name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Background => "background",
            Self::Extension => "extension",
        }
    }

    #[must_use]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Regex | Self::Background)
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    OptionName::resolve(name).is_some_and(OptionName::is_bool)
}

/// Session settings other than the search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Run match rebuilds on a worker thread.
    pub background: bool,
    /// Extension enforced on save, without the dot.
    pub extension: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            background: true,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Parse the full `:set` arguments string into directives.
///
/// Multiple space-separated arguments are supported (e.g. `:set re ext=md`).
/// An empty argument string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // `nooption` only when the rest is a boolean option.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    // A bare string option shows its value.
    if OptionName::resolve(arg).is_some_and(|o| !o.is_bool()) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

/// Parse a boolean assignment value (`:set bg=off`).
///
/// # Errors
///
/// Returns [`OptionError::InvalidValue`] for anything but the accepted
/// spellings of true and false.
pub fn parse_bool(name: OptionName, value: &str) -> Result<bool, OptionError> {
    match value {
        "1" | "on" | "true" | "yes" => Ok(true),
        "0" | "off" | "false" | "no" => Ok(false),
        _ => Err(OptionError::InvalidValue {
            name: name.as_str(),
            value: value.to_string(),
        }),
    }
}

/// Format a boolean option for display: `"name"` or `"noname"`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Command line: typed commands and their effect on a session.
//!
//! Front ends read a line of text, [`parse`] it into a [`Command`], and hand
//! that to [`execute`], which drives the [`Session`] and reports back a
//! [`CommandResult`] to show. The leading `:` is optional for `:`-commands;
//! a leading `/` always means search.
//!
//! # Supported commands
//!
//! | Command              | Action                                    |
//! |----------------------|-------------------------------------------|
//! | `:e <path>`          | Open a file (`:open`, `:edit`)            |
//! | `:w`                 | Save to the current path                  |
//! | `:w <path>`          | Save to a specific path                   |
//! | `:q` / `:q!`         | Quit / quit discarding changes            |
//! | `:wq [path]`, `:x`   | Save and quit                             |
//! | `/pattern`           | Set the pattern and search                |
//! | `/`                  | Search again with the current pattern     |
//! | `:n` / `:N`          | Next / previous match                     |
//! | `:regex`             | Toggle regex mode                         |
//! | `:a <text>`          | Append `text` and a newline               |
//! | `:i <offset> <text>` | Insert `text` at a char offset            |
//! | `:d <start>,<end>`   | Delete the char range `[start, end)`      |
//! | `:p`                 | Print the buffer                          |
//! | `:f`                 | Show the status line                      |
//! | `:set ...`           | Options (see [`options`](crate::options)) |
//!
//! Text arguments of `:a` and `:i` understand `\n`, `\t` and `\\`.

use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

use crate::options;
use crate::search::Selection;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:e <path>`: load a file into the buffer.
    Open(PathBuf),

    /// `:w`: save to the current path.
    Write,

    /// `:w <path>`: save to a specific path.
    WriteAs(PathBuf),

    /// `:q`: quit (refuses if the buffer is modified).
    Quit,

    /// `:q!`: quit, discarding changes.
    ForceQuit,

    /// `:wq [path]` / `:x [path]`: save, then quit.
    WriteQuit(Option<PathBuf>),

    /// `/pattern` sets the pattern first; bare `/` keeps the current one.
    Search(Option<String>),

    /// `:n`: next match.
    Next,

    /// `:N`: previous match.
    Previous,

    /// `:regex`: toggle between literal and regex search.
    ToggleRegex,

    /// `:a <text>`: append a line.
    Append(String),

    /// `:i <offset> <text>`: insert at a char offset.
    Insert { at: usize, text: String },

    /// `:d <start>,<end>`: delete a char range.
    Delete(Range<usize>),

    /// `:p`: print the buffer.
    Print,

    /// `:f`: show the status line.
    Status,

    /// `:set [args]`: raw argument string, split by [`options::parse_set`].
    Set(String),
}

/// A line that does not parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("not an editor command: {0}")]
    Unknown(String),

    #[error("invalid arguments: {0}")]
    InvalidSyntax(String),
}

/// The result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command succeeded. Optional message to show.
    Ok(Option<String>),

    /// Command failed. Error message to show.
    Err(String),

    /// The session should end.
    Quit,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one input line into a [`Command`].
///
/// # Errors
///
/// Returns [`CommandError::Unknown`] for unrecognized commands and
/// [`CommandError::InvalidSyntax`] for missing or malformed arguments.
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let line = input.trim_end_matches(['\n', '\r']);

    // Search keeps the pattern verbatim, spaces included.
    if let Some(pattern) = line.strip_prefix('/') {
        return Ok(Command::Search(
            (!pattern.is_empty()).then(|| pattern.to_string()),
        ));
    }

    // Trailing whitespace belongs to the text of `:a` and `:i`; only the
    // other commands trim their argument.
    let lead = line.trim_start();
    let body = lead.strip_prefix(':').unwrap_or(lead).trim_start();
    if body.trim_end().is_empty() {
        return Err(CommandError::InvalidSyntax("empty command".to_string()));
    }

    let (cmd, text) = body
        .find(char::is_whitespace)
        .map_or((body, ""), |pos| (&body[..pos], body[pos..].trim_start()));
    let arg = text.trim_end();

    match cmd {
        "e" | "edit" | "open" => {
            if arg.is_empty() {
                return Err(CommandError::InvalidSyntax(format!("{cmd} needs a path")));
            }
            Ok(Command::Open(PathBuf::from(arg)))
        }
        "w" | "write" => {
            if arg.is_empty() {
                Ok(Command::Write)
            } else {
                Ok(Command::WriteAs(PathBuf::from(arg)))
            }
        }
        "q" | "quit" => Ok(Command::Quit),
        "q!" | "quit!" => Ok(Command::ForceQuit),
        "wq" | "x" => Ok(Command::WriteQuit((!arg.is_empty()).then(|| PathBuf::from(arg)))),
        "n" | "next" => Ok(Command::Next),
        "N" | "prev" | "previous" => Ok(Command::Previous),
        "regex" => Ok(Command::ToggleRegex),
        "a" | "append" => Ok(Command::Append(unescape(text))),
        "i" | "insert" => parse_insert(text),
        "d" | "delete" => parse_delete(arg),
        "p" | "print" => Ok(Command::Print),
        "f" | "file" => Ok(Command::Status),
        "set" => Ok(Command::Set(arg.to_string())),
        _ => Err(CommandError::Unknown(body.trim_end().to_string())),
    }
}

/// `:i <offset> <text>`. The single space after the offset is a separator;
/// any further leading spaces belong to the text.
fn parse_insert(arg: &str) -> Result<Command, CommandError> {
    let (offset, text) = arg.split_once(' ').unwrap_or((arg, ""));
    let at = offset
        .parse()
        .map_err(|_| CommandError::InvalidSyntax(format!("bad offset: {offset:?}")))?;
    Ok(Command::Insert {
        at,
        text: unescape(text),
    })
}

/// `:d <start>,<end>`.
fn parse_delete(arg: &str) -> Result<Command, CommandError> {
    let bad = || CommandError::InvalidSyntax(format!("expected <start>,<end>, got {arg:?}"));
    let (start, end) = arg.split_once(',').ok_or_else(bad)?;
    let start: usize = start.trim().parse().map_err(|_| bad())?;
    let end: usize = end.trim().parse().map_err(|_| bad())?;
    if start > end {
        return Err(bad());
    }
    Ok(Command::Delete(start..end))
}

/// Expand `\n`, `\t` and `\\`. Any other backslash is kept as is.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run `cmd` against `session`.
pub fn execute(session: &mut Session, cmd: Command) -> CommandResult {
    match cmd {
        Command::Open(path) => match session.open(&path) {
            Ok(()) => CommandResult::Ok(Some(format!(
                "\"{}\" {} chars",
                path.display(),
                session.buffer().len_chars()
            ))),
            Err(e) => CommandResult::Err(e.to_string()),
        },
        Command::Write => write(session, None),
        Command::WriteAs(path) => write(session, Some(path)),
        Command::WriteQuit(path) => match write(session, path) {
            CommandResult::Ok(_) => CommandResult::Quit,
            other => other,
        },
        Command::Quit => match session.check_quit(false) {
            Ok(()) => CommandResult::Quit,
            Err(e) => CommandResult::Err(e.to_string()),
        },
        Command::ForceQuit => CommandResult::Quit,
        Command::Search(pattern) => {
            if let Some(p) = pattern {
                session.set_pattern(&p);
            }
            let result = session.search();
            navigated(session, result)
        }
        Command::Next => {
            let result = session.select_next();
            navigated(session, result)
        }
        Command::Previous => {
            let result = session.select_previous();
            navigated(session, result)
        }
        Command::ToggleRegex => {
            let mode = session.toggle_mode();
            CommandResult::Ok(Some(format!("{mode} search")))
        }
        Command::Append(mut text) => {
            text.push('\n');
            session.append(&text);
            CommandResult::Ok(None)
        }
        Command::Insert { at, text } => match session.insert(at, &text) {
            Ok(()) => CommandResult::Ok(None),
            Err(e) => CommandResult::Err(e.to_string()),
        },
        Command::Delete(range) => match session.delete(range) {
            Ok(()) => CommandResult::Ok(None),
            Err(e) => CommandResult::Err(e.to_string()),
        },
        Command::Print => CommandResult::Ok(Some(session.buffer().contents())),
        Command::Status => CommandResult::Ok(Some(session.status())),
        Command::Set(args) => set(session, &args),
    }
}

fn write(session: &mut Session, path: Option<PathBuf>) -> CommandResult {
    match session.save(path.as_deref()) {
        Ok(written) => CommandResult::Ok(Some(format!(
            "\"{}\" {} chars written",
            written.display(),
            session.buffer().len_chars()
        ))),
        Err(e) => CommandResult::Err(e.to_string()),
    }
}

fn set(session: &mut Session, args: &str) -> CommandResult {
    let mut shown = Vec::new();
    for directive in options::parse_set(args) {
        match session.apply_set(&directive) {
            Ok(Some(text)) => shown.push(text),
            Ok(None) => {}
            Err(e) => return CommandResult::Err(e.to_string()),
        }
    }
    CommandResult::Ok((!shown.is_empty()).then(|| shown.join("  ")))
}

/// Report a navigation outcome: where the selection landed, or why not.
fn navigated<E: std::fmt::Display>(
    session: &Session,
    result: Result<Option<Selection>, E>,
) -> CommandResult {
    match result {
        Ok(Some(sel)) => {
            let at = session
                .buffer()
                .position_of(sel.start)
                .map(|p| format!(" at {p}"))
                .unwrap_or_default();
            CommandResult::Ok(Some(format!("{}{at}", session.index().status())))
        }
        Ok(None) if session.query().is_empty() => {
            CommandResult::Err("no search pattern".to_string())
        }
        Ok(None) => CommandResult::Err(format!("pattern not found: {}", session.query().pattern)),
        Err(e) => CommandResult::Err(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

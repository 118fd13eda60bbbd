//! Whole-file load and store.
//!
//! Files are read and written in one piece. Saving enforces an extension:
//! a target whose file name does not already end in `.<ext>` gets it
//! appended (`notes` → `notes.txt`, `notes.md` → `notes.md.txt`).

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::FileError;

/// The extension saves enforce unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Read the whole file at `path` as text.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD rather than failing the
/// load.
///
/// # Errors
///
/// Returns [`FileError::Read`] if the file cannot be opened or read.
pub fn load(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "file is not valid UTF-8; invalid bytes replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    info!(path = %path.display(), bytes = text.len(), "loaded file");
    Ok(text)
}

/// Write `content` to `path` with `extension` enforced, returning the path
/// actually written.
///
/// # Errors
///
/// Returns [`FileError::Write`] (carrying the adjusted path) if the write fails.
pub fn save(path: &Path, content: &str, extension: &str) -> Result<PathBuf, FileError> {
    let target = with_extension(path, extension);
    if target != path {
        debug!(from = %path.display(), to = %target.display(), "appended extension");
    }
    fs::write(&target, content).map_err(|source| FileError::Write {
        path: target.clone(),
        source,
    })?;
    info!(path = %target.display(), bytes = content.len(), "saved file");
    Ok(target)
}

/// `path` with `.<extension>` appended unless its file name already ends in
/// it. The check is a plain, case-sensitive suffix test on the file name, so
/// a file literally named `.txt` is left alone. An empty `extension` leaves
/// every path unchanged.
#[must_use]
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    if extension.is_empty() {
        return path.to_path_buf();
    }
    let suffix = format!(".{extension}");
    let has_suffix = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(&suffix));
    if has_suffix {
        return path.to_path_buf();
    }
    let mut raw = OsString::from(path.as_os_str());
    raw.push(&suffix);
    PathBuf::from(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

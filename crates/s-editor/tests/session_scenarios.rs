//! End-to-end session scenarios: search, navigation, files, background scans.

use std::fs;

use pretty_assertions::assert_eq;
use s_editor::command::{self, CommandResult};
use s_editor::options::Options;
use s_editor::{MatchSpan, SearchMode, SearchQuery, Selection, Session, SessionError};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn spans(pairs: &[(usize, usize)]) -> Vec<MatchSpan> {
    pairs.iter().copied().map(MatchSpan::from).collect()
}

const fn sel(start: usize, end: usize) -> Option<Selection> {
    Some(Selection {
        start,
        end,
        caret: end,
    })
}

// ── Search scenarios ────────────────────────────────────────────────────

#[test]
fn literal_repeated_pattern() {
    init_tracing();
    let mut s = Session::from_text("abcabcabc");
    s.set_pattern("abc");
    s.search().unwrap();
    assert_eq!(s.index().spans(), spans(&[(0, 3), (3, 3), (6, 3)]).as_slice());
}

#[test]
fn literal_self_overlapping_pattern() {
    let mut s = Session::from_text("aaaa");
    s.set_pattern("aa");
    s.search().unwrap();
    assert_eq!(s.index().spans(), spans(&[(0, 2), (2, 2)]).as_slice());
}

#[test]
fn regex_digit_runs() {
    let mut s = Session::from_text("foo1 foo22 foo333");
    s.set_mode(SearchMode::Regex);
    s.set_pattern(r"foo\d+");
    s.search().unwrap();
    assert_eq!(s.index().spans(), spans(&[(0, 4), (5, 5), (11, 6)]).as_slice());
    assert_eq!(s.query(), &SearchQuery::regex(r"foo\d+"));
}

#[test]
fn previous_from_first_wraps() {
    let mut s = Session::from_text("abcabcabc");
    s.set_pattern("abc");
    assert_eq!(s.search().unwrap(), sel(0, 3));
    assert_eq!(s.select_previous().unwrap(), sel(6, 9));
    assert_eq!(s.index().cursor(), Some(2));
}

#[test]
fn empty_pattern_navigation_is_quiet() {
    let mut s = Session::from_text("abc");
    assert_eq!(s.search().unwrap(), None);
    assert!(s.index().is_empty());
    assert_eq!(s.select_next().unwrap(), None);
}

#[test]
fn unicode_offsets_are_chars() {
    let mut s = Session::from_text("café café");
    s.set_pattern("café");
    s.search().unwrap();
    assert_eq!(s.index().spans(), spans(&[(0, 4), (5, 4)]).as_slice());
    let second = s.select_next().unwrap().unwrap();
    let text: String = s.buffer().slice(second.start..second.end).unwrap().to_string();
    assert_eq!(text, "café");
}

// ── Background rebuilds ─────────────────────────────────────────────────

#[test]
fn navigation_waits_for_background_rebuild() {
    init_tracing();
    let text = "needle hay ".repeat(20_000);
    let mut s = Session::from_text(&text);
    s.set_pattern("needle");
    s.begin_search();
    assert!(s.is_searching());
    assert_eq!(s.select_previous().unwrap(), sel(219_989, 219_995));
    assert!(!s.is_searching());
    assert_eq!(s.index().len(), 20_000);
}

#[test]
fn query_change_during_rebuild_wins() {
    let mut s = Session::from_text(&"x y ".repeat(5_000));
    s.set_pattern("x");
    s.begin_search();
    s.set_pattern("y");
    assert!(!s.is_searching());
    assert_eq!(s.search().unwrap(), sel(2, 3));
}

#[test]
fn background_and_inline_agree() {
    let text = "ab1 ab22 b333 ".repeat(500);
    let mut bg = Session::from_text(&text);
    let mut inline = Session::with_options(Options {
        background: false,
        ..Options::default()
    });
    inline.replace_all(&text);
    for s in [&mut bg, &mut inline] {
        s.set_mode(SearchMode::Regex);
        s.set_pattern(r"b\d+");
        s.search().unwrap();
    }
    assert_eq!(bg.index().spans(), inline.index().spans());
}

#[test]
fn invalid_regex_in_background_is_reported_on_navigation() {
    let mut s = Session::from_text("abc");
    s.set_mode(SearchMode::Regex);
    s.set_pattern("[");
    s.begin_search();
    assert!(matches!(s.select_next(), Err(SessionError::Search(_))));
    assert!(s.is_stale());
}

// ── Files ───────────────────────────────────────────────────────────────

#[test]
fn save_appends_txt_extension() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::from_text("hello");
    let written = s.save(Some(&dir.path().join("notes"))).unwrap();
    assert_eq!(written, dir.path().join("notes.txt"));
    assert_eq!(fs::read_to_string(&written).unwrap(), "hello");
    assert_eq!(s.buffer().path(), Some(written.as_path()));
    assert!(!s.buffer().is_modified());

    let same = s.save(Some(&dir.path().join("notes.txt"))).unwrap();
    assert_eq!(same, dir.path().join("notes.txt"));
}

#[test]
fn save_uses_configured_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::from_text("# title");
    s.apply_set(&s_editor::options::SetDirective::Assign("ext".into(), "md".into()))
        .unwrap();
    let written = s.save(Some(&dir.path().join("readme"))).unwrap();
    assert_eq!(written, dir.path().join("readme.md"));
}

#[test]
fn save_failure_leaves_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::from_text("keep me");
    s.append("!");
    let err = s.save(Some(&dir.path().join("missing/dir/notes"))).unwrap_err();
    assert!(matches!(err, SessionError::File(_)));
    assert_eq!(s.buffer().contents(), "keep me!");
    assert!(s.buffer().is_modified());
    assert!(s.buffer().path().is_none());
}

#[test]
fn open_then_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    fs::write(&path, "one two one").unwrap();

    let mut s = Session::new();
    s.set_pattern("one");
    s.open(&path).unwrap();
    assert_eq!(s.buffer().path(), Some(path.as_path()));
    assert!(!s.buffer().is_modified());
    assert_eq!(s.search().unwrap(), sel(0, 3));
    assert_eq!(s.select_next().unwrap(), sel(8, 11));
}

#[test]
fn open_replaces_previous_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    fs::write(&path, "zz a").unwrap();

    let mut s = Session::from_text("a a a");
    s.set_pattern("a");
    s.search().unwrap();
    s.open(&path).unwrap();
    assert!(s.index().is_empty());
    assert_eq!(s.search().unwrap(), sel(3, 4));
    assert_eq!(s.index().len(), 1);
}

#[test]
fn open_non_utf8_file_keeps_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(&path, b"caf\xe9 caf\xe9").unwrap();

    let mut s = Session::new();
    s.set_pattern("caf");
    s.open(&path).unwrap();
    assert_eq!(s.buffer().contents(), "caf\u{fffd} caf\u{fffd}");
    assert_eq!(s.search().unwrap(), sel(0, 3));
    assert_eq!(s.select_next().unwrap(), sel(5, 8));
}

#[test]
fn open_failure_clears_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::from_text("old text");
    s.set_pattern("old");
    s.search().unwrap();
    let err = s.open(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, SessionError::File(_)));
    assert!(s.buffer().is_empty());
    assert!(s.index().is_empty());
    assert_eq!(s.search().unwrap(), None);
}

// ── Command line ────────────────────────────────────────────────────────

#[test]
fn command_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("draft");
    let mut s = Session::new();

    let write = format!(":w {}", target.display());
    let lines: [&str; 4] = [":a alpha beta", ":a beta gamma", "/beta", &write];
    let results: Vec<CommandResult> = lines
        .iter()
        .map(|line| command::execute(&mut s, command::parse(line).unwrap()))
        .collect();

    assert_eq!(results[2], CommandResult::Ok(Some("match 1 of 2 at 1:7".into())));
    assert!(matches!(results[3], CommandResult::Ok(Some(_))));
    assert_eq!(
        fs::read_to_string(dir.path().join("draft.txt")).unwrap(),
        "alpha beta\nbeta gamma\n"
    );
    assert_eq!(
        command::execute(&mut s, command::parse(":q").unwrap()),
        CommandResult::Quit
    );
}

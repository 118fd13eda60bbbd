// SPDX-License-Identifier: MIT
//
// s-edit: a small text editor with literal and regex search.
//
// This binary is a line-oriented front end over the s-editor crate. Each
// line read from stdin is one command:
//
//   stdin → command::parse → command::execute → Session mutation
//   CommandResult::Ok  → message on stdout
//   CommandResult::Err → message on stderr
//   CommandResult::Quit or EOF → exit
//
// Logging goes to stderr and is filtered by S_EDIT_LOG (default "warn").

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use s_editor::command::{self, CommandResult};
use s_editor::options::Options;
use s_editor::{SearchMode, Session};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "S_EDIT_LOG";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    /// File to open at startup.
    path: Option<PathBuf>,
    /// Start in regex mode.
    regex: bool,
}

/// Parse everything after the program name.
fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Args::default();
    for arg in args {
        match arg.as_str() {
            "--regex" | "-r" => out.regex = true,
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(format!("unknown flag: {s}"));
            }
            _ if out.path.is_some() => {
                return Err(format!("unexpected argument: {arg}"));
            }
            _ => out.path = Some(PathBuf::from(arg)),
        }
    }
    Ok(out)
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the starting session from the arguments.
///
/// A file that cannot be read is reported and leaves an empty buffer, the
/// same as `:e` on a missing file.
fn session_for(args: &Args) -> Session {
    let mut session = Session::with_options(Options::default());
    if args.regex {
        session.set_mode(SearchMode::Regex);
    }
    if let Some(path) = &args.path {
        if let Err(e) = session.open(path) {
            eprintln!("s-edit: {e}");
        }
    }
    session
}

// ─── Command loop ───────────────────────────────────────────────────────────

/// Feed every line of `input` to the session until a quit or EOF.
fn run<R, W, E>(session: &mut Session, input: R, out: &mut W, err: &mut E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(%line, "command");
        let result = match command::parse(&line) {
            Ok(cmd) => command::execute(session, cmd),
            Err(e) => CommandResult::Err(e.to_string()),
        };
        match result {
            CommandResult::Ok(Some(msg)) => writeln!(out, "{msg}")?,
            CommandResult::Ok(None) => {}
            CommandResult::Err(msg) => writeln!(err, "{msg}")?,
            CommandResult::Quit => {
                debug!("quit");
                break;
            }
        }
        out.flush()?;
    }
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    let args = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("s-edit: {e}");
        eprintln!("usage: s-edit [--regex] [FILE]");
        process::exit(2);
    });

    info!(path = ?args.path, regex = args.regex, "starting");
    let mut session = session_for(&args);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    if let Err(e) = run(&mut session, stdin.lock(), &mut stdout.lock(), &mut stderr.lock()) {
        eprintln!("s-edit: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use texpad::{CompileLog, EditorConfig, PreviewSlot, Session};

/// A minimal document a real engine would accept
pub const MINIMAL_DOCUMENT: &str =
    "\\documentclass{article}\n\\begin{document}\nHello $x^2$\n\\end{document}\n";

/// Session with in-memory sinks
pub type TestSession = Session<CompileLog, PreviewSlot>;

pub fn test_session(config: &EditorConfig) -> TestSession {
    Session::new(config, CompileLog::new(), PreviewSlot::new()).unwrap()
}

/// Config pointing at a specific engine binary
pub fn config_with_engine(engine: &Path) -> EditorConfig {
    EditorConfig {
        engine: engine.to_string_lossy().to_string(),
        open_preview: false,
        ..EditorConfig::default()
    }
}

// Writing an executable while another test thread forks can make exec fail
// with ETXTBSY, so fake engines are only created and run under this lock.
static ENGINE_LOCK: Mutex<()> = Mutex::new(());

pub fn engine_lock() -> MutexGuard<'static, ()> {
    ENGINE_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable shell script named `name` into `dir`
#[cfg(unix)]
pub fn write_engine(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Engine that records its arguments and working directory, prints on both
/// streams, and produces `<stem>.pdf` beside its input.
#[cfg(unix)]
pub fn succeeding_engine(dir: &Path) -> PathBuf {
    write_engine(
        dir,
        "fake-latex",
        r#"for last; do :; done
printf '%s\n' "$@" > engine-args.txt
pwd > engine-cwd.txt
echo "This is FakeTeX, Version 1.0"
echo "($last" 1>&2
cp "$last" "${last%.tex}.pdf"
echo "Output written on ${last%.tex}.pdf (1 page)."
exit 0"#,
    )
}

/// Engine that reports a file:line error and exits 1
#[cfg(unix)]
pub fn failing_engine(dir: &Path) -> PathBuf {
    write_engine(
        dir,
        "fake-latex-fail",
        r#"for last; do :; done
echo "./$last:3: Undefined control sequence."
echo "!  ==> Fatal error occurred, no output PDF file produced!" 1>&2
exit 1"#,
    )
}

/// Engine that exits 0 without producing anything
#[cfg(unix)]
pub fn silent_engine(dir: &Path) -> PathBuf {
    write_engine(dir, "fake-latex-silent", "echo 'No pages of output.'\nexit 0")
}

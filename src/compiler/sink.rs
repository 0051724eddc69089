//! Output destinations for a compile: the log view and the result viewer

use std::path::{Path, PathBuf};

/// Where a log chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
    /// Messages written by the runner itself (failure notice, fallbacks)
    Notice,
}

/// Receives raw compiler output as it arrives
pub trait LogSink {
    /// Drop everything logged so far
    fn clear(&mut self);
    /// Append one chunk; stdout/stderr chunks keep their trailing newline
    fn append(&mut self, stream: OutputStream, text: &str);
}

/// Receives the located result file of a successful compile
pub trait PreviewSink {
    fn show(&mut self, result: &Path);
}

/// A single chunk in a [`CompileLog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub stream: OutputStream,
    pub text: String,
}

/// In-memory log view, the equivalent of a read-only text pane
#[derive(Debug, Clone, Default)]
pub struct CompileLog {
    lines: Vec<LogLine>,
}

impl CompileLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Chunks from one stream, in arrival order
    pub fn stream(&self, stream: OutputStream) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.stream == stream)
            .map(|line| line.text.as_str())
    }

    /// Everything logged, concatenated in arrival order
    pub fn text(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LogSink for CompileLog {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn append(&mut self, stream: OutputStream, text: &str) {
        self.lines.push(LogLine {
            stream,
            text: text.to_string(),
        });
    }
}

/// Preview pane state: the result currently displayed
#[derive(Debug, Clone, Default)]
pub struct PreviewSlot {
    current: Option<PathBuf>,
    shown: usize,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// How many times a result has been handed over
    pub fn shown_count(&self) -> usize {
        self.shown
    }
}

impl PreviewSink for PreviewSlot {
    fn show(&mut self, result: &Path) {
        self.current = Some(result.to_path_buf());
        self.shown += 1;
    }
}

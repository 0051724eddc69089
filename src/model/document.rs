//! Document model - the text buffer and file state

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;

use super::history::{EditHistory, EditOperation};
use crate::error::{Error, Result};
use crate::util::read_source_file;

const APP_TITLE: &str = "texpad";

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Content as of the last load or save; dirty iff `buffer` differs
    saved: Rope,
    history: EditHistory,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text, treated as unmodified
    pub fn with_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        Self {
            saved: buffer.clone(),
            buffer,
            file_path: None,
            history: EditHistory::new(),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_source_file(path).map_err(|e| Error::read(path, e))?;
        let mut document = Self::with_text(&content);
        document.file_path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Whether the buffer differs from the last saved/loaded content
    pub fn is_modified(&self) -> bool {
        self.buffer != self.saved
    }

    /// Full buffer contents
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the display name: the filename if saved, "Untitled" otherwise
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Window-title form, with a leading `*` when there are unsaved changes
    pub fn display_title(&self) -> String {
        let marker = if self.is_modified() { "*" } else { "" };
        match &self.file_path {
            Some(path) => format!("{}{} - {}", marker, APP_TITLE, path.display()),
            None => format!("{}{} - Untitled", marker, APP_TITLE),
        }
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get line content without its trailing newline
    ///
    /// Returns Cow::Borrowed if the line is stored contiguously in a single chunk.
    pub fn line_text(&self, line_idx: usize) -> Option<Cow<'_, str>> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }

        let line = self.buffer.line(line_idx);
        let len = line.len_chars();

        let trim_len = if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                2 // CRLF
            } else {
                1 // LF
            }
        } else {
            0
        };

        let trimmed = line.slice(..len - trim_len);
        Some(match trimmed.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(trimmed.to_string()),
        })
    }

    /// Line index containing a character offset
    pub fn offset_to_line(&self, char_idx: usize) -> usize {
        self.buffer.char_to_line(char_idx.min(self.buffer.len_chars()))
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Insert text at a character offset (clamped to the end of the buffer)
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let char_idx = char_idx.min(self.buffer.len_chars());
        self.buffer.insert(char_idx, text);
        self.history
            .push(EditOperation::insert(char_idx, text.to_string()));
    }

    /// Delete a character range (clamped to the buffer)
    pub fn delete(&mut self, range: Range<usize>) {
        self.replace(range, "");
    }

    /// Replace a character range with `text` as one undoable step
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let len = self.buffer.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let deleted = self.buffer.slice(start..end).to_string();
        if deleted.is_empty() && text.is_empty() {
            return;
        }

        self.buffer.remove(start..end);
        self.buffer.insert(start, text);
        self.history
            .push(EditOperation::replace(start, deleted, text.to_string()));
    }

    /// Replace the whole buffer (e.g. a paste-over-everything) as one undoable step
    pub fn set_text(&mut self, text: &str) {
        let len = self.buffer.len_chars();
        self.replace(0..len, text);
    }

    fn apply(&mut self, op: &EditOperation) {
        let end = op.offset + op.deleted_text.chars().count();
        self.buffer.remove(op.offset..end);
        self.buffer.insert(op.offset, &op.inserted_text);
    }

    /// Undo the last edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.pop_undo() else {
            return false;
        };
        self.apply(&op);
        true
    }

    /// Redo the last undone edit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.pop_redo() else {
            return false;
        };
        self.apply(&op);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the buffer byte-for-byte to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::write(path, e))?;
        let mut writer = BufWriter::new(file);
        self.buffer
            .write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::write(path, e))
    }

    /// Write the buffer to its own path and clear the dirty flag
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            return Err(Error::Write {
                path: None,
                reason: "no file path set".to_string(),
            });
        };
        self.write_to(&path)?;
        self.saved = self.buffer.clone();
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}

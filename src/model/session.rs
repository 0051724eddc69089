//! Editing session: one open document, one compile at a time
//!
//! The session owns every piece of mutable state (document, scratch
//! directory, compiler state) plus the log and preview sinks supplied by the
//! host. Closing the session removes the scratch directory.

use std::path::{Path, PathBuf};

use super::document::Document;
use crate::compiler::{
    result_path_for, CompileState, Compiler, CompilerSettings, LogSink, OutputStream,
    PreviewSink, ScratchDir,
};
use crate::config::EditorConfig;
use crate::error::Result;
use crate::syntax::{Highlighter, LineHighlights};

/// Caller's answer when a new document would discard unsaved changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    /// Save the current document first
    Save,
    /// Throw the changes away
    Discard,
    /// Keep the current document
    Cancel,
}

pub struct Session<L: LogSink, P: PreviewSink> {
    document: Document,
    highlighter: Highlighter,
    compiler: Compiler,
    scratch: ScratchDir,
    log: L,
    preview: P,
}

impl<L: LogSink, P: PreviewSink> Session<L, P> {
    pub fn new(config: &EditorConfig, log: L, preview: P) -> Result<Self> {
        Ok(Self {
            document: Document::new(),
            highlighter: Highlighter::latex(config.highlight_theme())?,
            compiler: Compiler::new(CompilerSettings::from(config)),
            scratch: ScratchDir::new(),
            log,
            preview,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn compile_state(&self) -> &CompileState {
        self.compiler.state()
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut P {
        &mut self.preview
    }

    /// The scratch directory, if an unsaved buffer has been compiled
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.path()
    }

    /// Restyle one line of the buffer
    pub fn highlight_line(&self, line_idx: usize) -> Option<LineHighlights> {
        self.document
            .line_text(line_idx)
            .map(|line| self.highlighter.highlight_line(&line))
    }

    // ========================================================================
    // File management
    // ========================================================================

    /// Start an empty, untitled document.
    ///
    /// With unsaved changes, `decide` is consulted first. Returns `Ok(false)`
    /// if the caller cancelled.
    pub fn new_document(
        &mut self,
        decide: impl FnOnce(&Document) -> UnsavedChoice,
    ) -> Result<bool> {
        if self.document.is_modified() {
            match decide(&self.document) {
                UnsavedChoice::Cancel => return Ok(false),
                UnsavedChoice::Save => self.document.save()?,
                UnsavedChoice::Discard => {
                    tracing::debug!("Discarding changes to {}", self.document.display_name())
                }
            }
        }

        self.document = Document::new();
        self.log.clear();
        Ok(true)
    }

    /// Replace the buffer with a file's contents.
    ///
    /// A result file already sitting beside the source is handed to the preview.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let document = Document::from_file(path)?;
        tracing::info!("Opened {}", path.display());
        self.document = document;
        self.log.clear();

        let result = result_path_for(path, &self.compiler.settings().result_extension);
        if result.is_file() {
            tracing::debug!("Found existing result {}", result.display());
            self.preview.show(&result);
        }
        Ok(())
    }

    /// Persist the buffer to the document's path
    pub fn save(&mut self) -> Result<()> {
        self.document.save()
    }

    /// Set a new path, then save
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.document.file_path = Some(path.into());
        self.save()
    }

    // ========================================================================
    // Compile
    // ========================================================================

    /// Flush the buffer to disk and run the typesetting tool on it.
    ///
    /// Documents with a path are saved in place and compiled there. Untitled
    /// documents, or ones whose save fails, are compiled from a scratch copy so
    /// nothing is written outside the user's own file and the scratch directory.
    pub fn compile(&mut self) -> Result<CompileState> {
        self.log.clear();
        let source = self.commit_buffer()?;
        self.compiler
            .compile(&source, &mut self.log, &mut self.preview)
    }

    fn commit_buffer(&mut self) -> Result<PathBuf> {
        let Some(path) = self.document.file_path.clone() else {
            return self.scratch.write_buffer(&self.document);
        };

        match self.document.save() {
            Ok(()) => Ok(path),
            Err(e) => {
                tracing::warn!("Compiling scratch copy: {}", e);
                self.log.append(
                    OutputStream::Notice,
                    &format!("{}; compiling a scratch copy instead\n", e.user_message()),
                );
                self.scratch.write_buffer(&self.document)
            }
        }
    }

    /// Shut down: remove the scratch directory and hand back the sinks
    pub fn close(mut self) -> (L, P) {
        self.scratch.cleanup();
        (self.log, self.preview)
    }
}

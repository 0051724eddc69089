//! Private scratch directory for compiling unsaved buffers

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::model::Document;

/// File name used for the buffer inside the scratch directory
pub const SCRATCH_FILE_NAME: &str = "untitled.tex";

/// Lazily created temporary directory, removed on [`ScratchDir::cleanup`] or drop
#[derive(Debug, Default)]
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory, if it has been created
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    fn ensure(&mut self) -> Result<&Path> {
        if self.dir.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("texpad-")
                .tempdir()
                .map_err(|e| Error::write(std::env::temp_dir(), e))?;
            tracing::debug!("Created scratch directory {}", dir.path().display());
            self.dir = Some(dir);
        }
        self.dir
            .as_ref()
            .map(TempDir::path)
            .ok_or_else(|| Error::write(std::env::temp_dir(), "scratch directory unavailable"))
    }

    /// Write the buffer to the scratch source file, returning its path
    pub fn write_buffer(&mut self, document: &Document) -> Result<PathBuf> {
        let source = self.ensure()?.join(SCRATCH_FILE_NAME);
        document.write_to(&source)?;
        tracing::debug!("Wrote scratch copy to {}", source.display());
        Ok(source)
    }

    /// Recursively remove the directory.
    ///
    /// Every deletion is attempted even if an earlier one fails; failures are
    /// logged and never abort shutdown.
    pub fn cleanup(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => tracing::debug!("Removed scratch directory {}", path.display()),
            Err(e) => {
                tracing::warn!(
                    "Failed to remove scratch directory {}: {}; removing entries individually",
                    path.display(),
                    e
                );
                remove_each(&path);
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn remove_each(dir: &Path) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            if let Err(e) = result {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
    if let Err(e) = fs::remove_dir(dir) {
        tracing::warn!("Failed to remove {}: {}", dir.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_lazily() {
        let scratch = ScratchDir::new();
        assert!(scratch.path().is_none());
    }

    #[test]
    fn test_write_buffer_contains_exact_text() {
        let mut scratch = ScratchDir::new();
        let doc = Document::with_text("\\documentclass{article}\r\nno trailing newline");
        let source = scratch.write_buffer(&doc).unwrap();

        assert_eq!(source.file_name().unwrap(), SCRATCH_FILE_NAME);
        assert!(source.starts_with(scratch.path().unwrap()));
        assert_eq!(fs::read_to_string(&source).unwrap(), doc.text());
    }

    #[test]
    fn test_directory_reused_between_writes() {
        let mut scratch = ScratchDir::new();
        let first = scratch.write_buffer(&Document::with_text("a")).unwrap();
        let second = scratch.write_buffer(&Document::with_text("b")).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "b");
    }

    #[test]
    fn test_cleanup_removes_directory_with_contents() {
        let mut scratch = ScratchDir::new();
        let source = scratch.write_buffer(&Document::with_text("x")).unwrap();
        let dir = scratch.path().unwrap().to_path_buf();
        fs::write(dir.join("untitled.aux"), "aux").unwrap();
        assert!(source.exists());

        scratch.cleanup();
        assert!(!dir.exists());
        assert!(scratch.path().is_none());

        // Idempotent
        scratch.cleanup();
    }

    #[test]
    fn test_drop_removes_directory() {
        let mut scratch = ScratchDir::new();
        scratch.write_buffer(&Document::new()).unwrap();
        let dir = scratch.path().unwrap().to_path_buf();
        drop(scratch);
        assert!(!dir.exists());
    }
}

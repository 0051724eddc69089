//! Error taxonomy for the editing session
//!
//! Every variant is recoverable: the session stays usable after any of them
//! and nothing is retried automatically.

use std::path::PathBuf;

/// Errors surfaced by file management and the compile pipeline
#[derive(Debug)]
pub enum Error {
    /// A source file could not be read
    Read { path: PathBuf, reason: String },
    /// The buffer could not be written; `path` is `None` when no path is set
    Write {
        path: Option<PathBuf>,
        reason: String,
    },
    /// The typesetting tool could not be started at all
    Startup { program: String, reason: String },
    /// The typesetting tool ran and exited unsuccessfully.
    /// Diagnostics live only in the raw log output.
    CompileFailure { exit_code: Option<i32> },
    /// A highlighting rule failed to compile
    Highlight(regex::Error),
}

impl Error {
    /// Get a user-friendly message suitable for a dialog or status line
    pub fn user_message(&self) -> String {
        match self {
            Self::Read { path, reason } => {
                format!("Could not open file {}: {}", path.display(), reason)
            }
            Self::Write { path: None, .. } => {
                "Could not save file: no file name chosen".to_string()
            }
            Self::Write {
                path: Some(path),
                reason,
            } => format!("Could not save file {}: {}", path.display(), reason),
            Self::Startup { program, reason } => {
                format!("Could not start '{}': {}", program, reason)
            }
            Self::CompileFailure { .. } => {
                "Compilation failed. Check the log for details.".to_string()
            }
            Self::Highlight(e) => format!("Invalid highlighting rule: {}", e),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: Some(path.into()),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, reason } => write!(f, "read error ({}): {}", path.display(), reason),
            Self::Write { path: None, reason } => write!(f, "write error: {}", reason),
            Self::Write {
                path: Some(path),
                reason,
            } => write!(f, "write error ({}): {}", path.display(), reason),
            Self::Startup { program, reason } => {
                write!(f, "failed to start '{}': {}", program, reason)
            }
            Self::CompileFailure {
                exit_code: Some(code),
            } => write!(f, "compilation failed with exit code {}", code),
            Self::CompileFailure { exit_code: None } => {
                write!(f, "compilation terminated by signal")
            }
            Self::Highlight(e) => write!(f, "invalid highlight pattern: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Highlight(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::Highlight(e)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! texpad - a minimal LaTeX editor core
//!
//! This crate provides the pieces an editor front end wires together:
//! a regex-based LaTeX highlighter, a single-document session with
//! open/save/undo, and a blocking compile pipeline that streams the
//! typesetting tool's output to a log and hands the result to a viewer.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod model;
pub mod preview;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use compiler::{CompileLog, CompileState, LogSink, OutputStream, PreviewSink, PreviewSlot};
pub use config::EditorConfig;
pub use error::Error;
pub use model::{Document, Session, UnsavedChoice};
pub use syntax::Highlighter;

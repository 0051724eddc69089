//! Syntax highlighting module
//!
//! Regex-based LaTeX highlighting:
//! - A fixed, ordered rule table (commands, environments, comments, math,
//!   braces, brackets)
//! - Line-local matching with last-applied-wins resolution
//! - ANSI rendering for terminal output

mod highlights;
mod rules;

pub use highlights::{HighlightSpan, HighlightToken, LineHighlights, TokenKind};
pub use rules::{render_ansi, HighlightRule, Highlighter};

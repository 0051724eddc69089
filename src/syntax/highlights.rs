//! Syntax highlighting data structures
//!
//! Defines token kinds, raw paint spans and resolved per-line highlights.

use serde::{Deserialize, Serialize};

/// The kinds of LaTeX markup the highlighter recognises
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `\section`, `\textbf`, ...
    Command,
    /// `\begin{...}` / `\end{...}`
    Environment,
    /// `% ...` to end of line
    Comment,
    /// `$...$`
    InlineMath,
    /// `\[...\]`
    DisplayMath,
    /// `{` and `}`
    Brace,
    /// `[` and `]`
    Bracket,
}

/// One match of one rule, in paint order.
///
/// Offsets are character columns within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
    pub kind: TokenKind,
}

impl HighlightSpan {
    /// Exclusive end column
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// A single resolved highlight within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightToken {
    /// Start column (0-indexed, inclusive)
    pub start_col: usize,
    /// End column (exclusive)
    pub end_col: usize,
    pub kind: TokenKind,
}

/// Highlight information for a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlights {
    /// Non-overlapping tokens sorted by start_col
    pub tokens: Vec<HighlightToken>,
}

impl LineHighlights {
    /// Resolve paint spans into non-overlapping tokens.
    ///
    /// Spans are applied in order; a later span overwrites any columns an
    /// earlier one painted. `line_len` is the line length in characters.
    pub fn from_spans(spans: &[HighlightSpan], line_len: usize) -> Self {
        let mut painted: Vec<Option<TokenKind>> = vec![None; line_len];
        for span in spans {
            let end = span.end().min(line_len);
            for slot in painted.iter_mut().take(end).skip(span.start) {
                *slot = Some(span.kind);
            }
        }

        let mut tokens: Vec<HighlightToken> = Vec::new();
        for (col, kind) in painted.into_iter().enumerate() {
            let Some(kind) = kind else {
                continue;
            };
            match tokens.last_mut() {
                Some(last) if last.end_col == col && last.kind == kind => last.end_col = col + 1,
                _ => tokens.push(HighlightToken {
                    start_col: col,
                    end_col: col + 1,
                    kind,
                }),
            }
        }

        Self { tokens }
    }

    /// Get the token kind at a given column, if any
    pub fn highlight_at(&self, col: usize) -> Option<TokenKind> {
        for token in &self.tokens {
            if col >= token.start_col && col < token.end_col {
                return Some(token.kind);
            }
            if token.start_col > col {
                break; // tokens are sorted, no need to continue
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, len: usize, kind: TokenKind) -> HighlightSpan {
        HighlightSpan { start, len, kind }
    }

    #[test]
    fn test_later_span_wins_on_overlap() {
        let spans = [
            span(0, 6, TokenKind::Command),
            span(0, 3, TokenKind::Environment),
        ];
        let line = LineHighlights::from_spans(&spans, 10);

        assert_eq!(line.highlight_at(0), Some(TokenKind::Environment));
        assert_eq!(line.highlight_at(2), Some(TokenKind::Environment));
        assert_eq!(line.highlight_at(3), Some(TokenKind::Command));
        assert_eq!(line.highlight_at(6), None);
        assert_eq!(line.tokens.len(), 2);
    }

    #[test]
    fn test_adjacent_same_kind_merges() {
        let spans = [span(0, 1, TokenKind::Brace), span(1, 1, TokenKind::Brace)];
        let line = LineHighlights::from_spans(&spans, 2);
        assert_eq!(
            line.tokens,
            vec![HighlightToken {
                start_col: 0,
                end_col: 2,
                kind: TokenKind::Brace
            }]
        );
    }

    #[test]
    fn test_spans_past_line_end_are_clamped() {
        let line = LineHighlights::from_spans(&[span(2, 10, TokenKind::Comment)], 4);
        assert_eq!(line.tokens[0].end_col, 4);
    }

    #[test]
    fn test_no_spans_no_tokens() {
        assert!(LineHighlights::from_spans(&[], 5).is_empty());
    }
}

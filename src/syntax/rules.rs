//! Regex rule table for LaTeX source
//!
//! Each rule is an independent full pass over a single line. Rules run in
//! declaration order and later rules overwrite earlier ones where they
//! overlap. Nothing is carried between lines, so an unterminated `$` or an
//! unbalanced brace simply does not match.

use regex::Regex;

use super::highlights::{HighlightSpan, LineHighlights, TokenKind};
use crate::model::Document;
use crate::theme::HighlightTheme;

/// The LaTeX rules in paint order
const LATEX_RULES: &[(&str, TokenKind)] = &[
    (r"\\[a-zA-Z]+", TokenKind::Command),
    (r"\\(begin|end)\{[^}]*\}", TokenKind::Environment),
    (r"%.*", TokenKind::Comment),
    (r"\$[^$]*\$", TokenKind::InlineMath),
    (r"\\\[[^\]]*\\\]", TokenKind::DisplayMath),
    (r"[{}]", TokenKind::Brace),
    (r"[\[\]]", TokenKind::Bracket),
];

/// A single regex highlighting rule
#[derive(Debug, Clone)]
pub struct HighlightRule {
    regex: Regex,
    kind: TokenKind,
}

impl HighlightRule {
    pub fn new(pattern: &str, kind: TokenKind) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            kind,
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Ordered rule list plus the theme used to style matches
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
    theme: HighlightTheme,
}

impl Highlighter {
    pub fn new(rules: Vec<HighlightRule>, theme: HighlightTheme) -> Self {
        Self { rules, theme }
    }

    /// The built-in LaTeX rule table
    pub fn latex(theme: HighlightTheme) -> Result<Self, regex::Error> {
        let rules = LATEX_RULES
            .iter()
            .map(|(pattern, kind)| HighlightRule::new(pattern, *kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules, theme))
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    pub fn theme(&self) -> &HighlightTheme {
        &self.theme
    }

    /// Every match of every rule, in paint order, as character-column spans
    pub fn spans(&self, line: &str) -> Vec<HighlightSpan> {
        if line.is_empty() {
            return Vec::new();
        }

        let columns = byte_to_column_map(line);
        let mut spans = Vec::new();
        for rule in &self.rules {
            for m in rule.regex.find_iter(line) {
                if m.start() == m.end() {
                    continue;
                }
                let start = columns[m.start()];
                let end = columns[m.end()];
                spans.push(HighlightSpan {
                    start,
                    len: end - start,
                    kind: rule.kind,
                });
            }
        }
        spans
    }

    /// Highlight one line with last-applied-wins resolution
    pub fn highlight_line(&self, line: &str) -> LineHighlights {
        LineHighlights::from_spans(&self.spans(line), line.chars().count())
    }

    /// Highlight every line of a document independently
    pub fn highlight_document(&self, document: &Document) -> Vec<LineHighlights> {
        (0..document.line_count())
            .map(|idx| {
                document
                    .line_text(idx)
                    .map(|line| self.highlight_line(&line))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Paint a line with ANSI escapes using this highlighter's theme
    pub fn render_ansi(&self, line: &str, highlights: &LineHighlights) -> String {
        render_ansi(line, highlights, &self.theme)
    }
}

/// Paint `line` with 24-bit ANSI escapes according to `highlights`
pub fn render_ansi(line: &str, highlights: &LineHighlights, theme: &HighlightTheme) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len() * 2);
    let mut col = 0;

    for token in &highlights.tokens {
        let start = token.start_col.min(chars.len());
        let end = token.end_col.min(chars.len());
        out.extend(&chars[col..start]);
        let text: String = chars[start..end].iter().collect();
        out.push_str(&theme.style(token.kind).paint(&text));
        col = end;
    }
    out.extend(&chars[col..]);
    out
}

/// Map each byte offset on a char boundary to its character column.
/// Offsets inside a multi-byte character are never looked up.
fn byte_to_column_map(line: &str) -> Vec<usize> {
    let mut columns = vec![0; line.len() + 1];
    let mut col = 0;
    for (byte, ch) in line.char_indices() {
        columns[byte] = col;
        col += 1;
        // keep trailing bytes of a wide char pointing at the next column
        for offset in 1..ch.len_utf8() {
            columns[byte + offset] = col;
        }
    }
    columns[line.len()] = col;
    columns
}

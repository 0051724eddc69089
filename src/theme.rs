//! Highlight theme: colors and weights for each LaTeX token kind
//!
//! The built-in palette can be overridden per token kind from
//! `~/.config/texpad/config.yaml` (see [`crate::config::EditorConfig`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::syntax::TokenKind;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB" (alpha is dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Foreground color plus font weight, the only styling the highlighter applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Color,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(foreground: Color, bold: bool) -> Self {
        Self { foreground, bold }
    }

    /// Wrap `text` in 24-bit ANSI escapes for terminal output
    pub fn paint(&self, text: &str) -> String {
        let Color { r, g, b, .. } = self.foreground;
        let weight = if self.bold { "1;" } else { "" };
        format!("\x1b[{}38;2;{};{};{}m{}\x1b[0m", weight, r, g, b, text)
    }
}

/// User override for a single token kind, as written in config.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

/// Resolved style for every token kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTheme {
    styles: BTreeMap<TokenKind, TextStyle>,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        let command = TextStyle::new(Color::rgb(0xC9, 0x49, 0x22), true);
        let environment = TextStyle::new(Color::rgb(0x2C, 0x52, 0x88), false);
        let comment = TextStyle::new(Color::rgb(0x37, 0xA4, 0x37), false);
        let math = TextStyle::new(Color::rgb(0x9B, 0x23, 0x93), false);
        let brace = TextStyle::new(Color::rgb(0x67, 0x67, 0x67), true);
        let bracket = TextStyle::new(Color::rgb(0x67, 0x67, 0x67), false);

        let styles = BTreeMap::from([
            (TokenKind::Command, command),
            (TokenKind::Environment, environment),
            (TokenKind::Comment, comment),
            (TokenKind::InlineMath, math),
            (TokenKind::DisplayMath, math),
            (TokenKind::Brace, brace),
            (TokenKind::Bracket, bracket),
        ]);
        Self { styles }
    }
}

impl HighlightTheme {
    /// Built-in palette with user overrides applied.
    ///
    /// Invalid colors are logged and skipped; the built-in color stays.
    pub fn with_overrides(overrides: &BTreeMap<TokenKind, StyleOverride>) -> Self {
        let mut theme = Self::default();
        for (kind, style_override) in overrides {
            let style = theme.styles.entry(*kind).or_insert(TextStyle::new(
                Color::rgb(0xFF, 0xFF, 0xFF),
                false,
            ));
            if let Some(hex) = &style_override.foreground {
                match Color::from_hex(hex) {
                    Ok(color) => style.foreground = color,
                    Err(e) => tracing::warn!("Ignoring color override for {:?}: {}", kind, e),
                }
            }
            if let Some(bold) = style_override.bold {
                style.bold = bold;
            }
        }
        theme
    }

    /// Style for a token kind
    pub fn style(&self, kind: TokenKind) -> TextStyle {
        self.styles
            .get(&kind)
            .copied()
            .unwrap_or(TextStyle::new(Color::rgb(0xFF, 0xFF, 0xFF), false))
    }
}

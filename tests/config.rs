//! Configuration system tests
//!
//! Tests for config paths, YAML loading and highlight overrides.

use std::collections::BTreeMap;

use tempfile::tempdir;
use texpad::config::EditorConfig;
use texpad::config_paths;
use texpad::syntax::TokenKind;
use texpad::theme::{Color, HighlightTheme, StyleOverride};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_texpad() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("texpad"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Editor Config Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = EditorConfig::default();
    assert_eq!(config.engine, "pdflatex");
    assert_eq!(config.result_extension, "pdf");
    assert!(config.open_preview);
    assert!(config.highlight.is_empty());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = EditorConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "engine: [unclosed").unwrap();

    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "engine: xelatex\nhighlight:\n  comment:\n    foreground: \"#888888\"\n",
    )
    .unwrap();

    let config = EditorConfig::load_from(&path);

    assert_eq!(config.engine, "xelatex");
    assert_eq!(config.result_extension, "pdf");
    assert!(config.open_preview);
    assert_eq!(
        config.highlight.get(&TokenKind::Comment),
        Some(&StyleOverride {
            foreground: Some("#888888".to_string()),
            bold: None,
        })
    );
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = EditorConfig {
        engine: "lualatex".to_string(),
        open_preview: false,
        highlight: BTreeMap::from([(
            TokenKind::Command,
            StyleOverride {
                foreground: None,
                bold: Some(false),
            },
        )]),
        ..EditorConfig::default()
    };

    config.save_to(&path).unwrap();

    assert_eq!(EditorConfig::load_from(&path), config);
}

#[test]
fn test_token_kinds_serialize_snake_case() {
    let config = EditorConfig {
        highlight: BTreeMap::from([(TokenKind::InlineMath, StyleOverride::default())]),
        ..EditorConfig::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("inline_math"), "got: {}", yaml);
}

// ========================================================================
// Highlight theme from config
// ========================================================================

#[test]
fn test_highlight_theme_applies_overrides() {
    let config = EditorConfig {
        highlight: BTreeMap::from([(
            TokenKind::Command,
            StyleOverride {
                foreground: Some("#102030".to_string()),
                bold: Some(false),
            },
        )]),
        ..EditorConfig::default()
    };

    let theme = config.highlight_theme();
    let style = theme.style(TokenKind::Command);

    assert_eq!(style.foreground, Color::rgb(0x10, 0x20, 0x30));
    assert!(!style.bold);
    assert_eq!(
        theme.style(TokenKind::Comment),
        HighlightTheme::default().style(TokenKind::Comment)
    );
}

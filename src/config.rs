//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/texpad/config.yaml`

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::syntax::TokenKind;
use crate::theme::{HighlightTheme, StyleOverride};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Typesetting binary, resolved through PATH
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Extension of the file the engine produces
    #[serde(default = "default_result_extension")]
    pub result_extension: String,

    /// Open the result in the system viewer after a successful compile
    #[serde(default = "default_open_preview")]
    pub open_preview: bool,

    /// Per-token color/weight overrides (e.g. `comment: { foreground: "#888888" }`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub highlight: BTreeMap<TokenKind, StyleOverride>,
}

fn default_engine() -> String {
    "pdflatex".to_string()
}

fn default_result_extension() -> String {
    "pdf".to_string()
}

fn default_open_preview() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            result_extension: default_result_extension(),
            open_preview: default_open_preview(),
            highlight: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = self.to_yaml()?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    /// Highlight theme with this config's overrides applied
    pub fn highlight_theme(&self) -> HighlightTheme {
        HighlightTheme::with_overrides(&self.highlight)
    }
}

//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/codepad/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editable::{EditSettings, DEFAULT_MAX_INDENT, DEFAULT_UNDO_LIMIT};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum undo entries kept per session
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Edits closer together than this (milliseconds) share one undo entry
    #[serde(default = "default_coalesce_window_ms")]
    pub coalesce_window_ms: u64,

    /// Deepest indentation level written by the re-indenter
    #[serde(default = "default_max_indent")]
    pub max_indent: usize,

    /// Backspace inside leading indentation joins with the previous line
    #[serde(default = "default_true")]
    pub backspace_joins_indentation: bool,
}

fn default_undo_limit() -> usize {
    DEFAULT_UNDO_LIMIT
}

fn default_coalesce_window_ms() -> u64 {
    1000
}

fn default_max_indent() -> usize {
    DEFAULT_MAX_INDENT
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            coalesce_window_ms: default_coalesce_window_ms(),
            max_indent: default_max_indent(),
            backspace_joins_indentation: default_true(),
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

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Session settings described by this config
    pub fn to_settings(&self) -> EditSettings {
        EditSettings {
            undo_limit: self.undo_limit.max(1),
            coalesce_window: Duration::from_millis(self.coalesce_window_ms),
            max_indent: self.max_indent,
            backspace_joins_indentation: self.backspace_joins_indentation,
        }
    }
}

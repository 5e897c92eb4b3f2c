//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/csvgrid/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_MAX_HISTORY;
use crate::table::{EditOptions, DEFAULT_COLUMN_NAME};

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of undoable edits kept per document
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,
    /// Open documents with row 0 treated as data
    #[serde(default)]
    pub ignore_header_row: bool,
    /// Header text for inserted columns
    #[serde(default = "default_new_column_name")]
    pub new_column_name: String,
    /// Default width of data columns, in pixels
    #[serde(default = "default_column_width")]
    pub column_width: u32,
}

fn default_max_history_size() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_new_column_name() -> String {
    DEFAULT_COLUMN_NAME.to_string()
}

fn default_column_width() -> u32 {
    150
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history_size: default_max_history_size(),
            ignore_header_row: false,
            new_column_name: default_new_column_name(),
            column_width: default_column_width(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults
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

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
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

    /// Edit settings derived from this config
    pub fn edit_options(&self) -> EditOptions {
        EditOptions {
            ignore_header_row: self.ignore_header_row,
            new_column_name: self.new_column_name.clone(),
        }
    }
}

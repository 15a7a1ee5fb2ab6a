//! Board configuration
//!
//! Loads the initial column layout and display settings from a TOML file,
//! falling back to the built-in defaults when no file exists.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::task::preview_description;
use crate::error::{Result, TaskboardError};

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    /// Titles of the columns every new session starts with, left to right
    pub columns: Vec<String>,
    /// Maximum characters shown in a task description preview
    pub preview_length: usize,
}

impl BoardConfig {
    pub const DEFAULT_PREVIEW_LENGTH: usize = 80;

    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            ..Self::default()
        }
    }

    /// Parses a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TaskboardError::Config(e.to_string()))
    }

    /// Description preview cut at the configured length
    pub fn preview(&self, description: Option<&str>) -> Option<String> {
        preview_description(description, self.preview_length)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "My Card Board".to_string(),
            columns: vec!["To Do".to_string(), "Doing".to_string(), "Done".to_string()],
            preview_length: Self::DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// Load the board configuration from `path`.
///
/// A missing file yields [`BoardConfig::default`]. A file that exists but
/// does not parse is an error rather than a silent fallback.
pub fn load_config(path: &Path) -> Result<BoardConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| {
            TaskboardError::Config(format!("failed to parse '{}': {}", path.display(), e))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no board config found, using defaults");
            Ok(BoardConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

//! Unified path management for PlantCare files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/plantcare/               # Config directory
//! ├── config.toml                    # Client configuration ([api] table)
//! └── settings.toml                  # Display settings
//!
//! ~/.local/share/plantcare/          # Data directory
//! └── plantcare_chat_history.json    # Chat transcript
//! ```
//!
//! Setting `PLANTCARE_HOME` puts every file directly under that directory.

use plantcare_core::transcript::TRANSCRIPT_STORAGE_KEY;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_NAME: &str = "plantcare";

/// Environment variable that overrides both config and data directories.
pub const HOME_ENV: &str = "PLANTCARE_HOME";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Resolved config and data directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantCarePaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PlantCarePaths {
    /// Resolves directories from the process environment and platform defaults.
    pub fn resolve() -> Result<Self, PathError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves directories with an injectable environment lookup.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PathError> {
        if let Some(home) = lookup(HOME_ENV).filter(|value| !value.trim().is_empty()) {
            return Ok(Self::at(home));
        }

        let config_dir = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
        let data_dir = dirs::data_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self {
            config_dir: config_dir.join(APP_NAME),
            data_dir: data_dir.join(APP_NAME),
        })
    }

    /// Uses one directory for both config and data.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }

    /// Transcript file, named after the fixed storage key.
    pub fn transcript_file(&self) -> PathBuf {
        self.data_dir.join(storage_file_name(TRANSCRIPT_STORAGE_KEY))
    }
}

/// Maps a storage key like `@plantcare_chat_history` to `plantcare_chat_history.json`.
fn storage_file_name(key: &str) -> String {
    format!("{}.json", key.trim_start_matches('@'))
}

//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from the `[api]` table of `config.toml` and applies
//! environment overrides on top.

use crate::dto::ConfigRoot;
use crate::paths::PlantCarePaths;
use crate::storage::AtomicFile;
use anyhow::Context;
use plantcare_core::config::ClientConfig;
use plantcare_core::error::{PlantCareError, Result};
use std::path::{Path, PathBuf};

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "PLANTCARE_API_URL";
/// Overrides `api.timeout_secs`.
pub const TIMEOUT_ENV: &str = "PLANTCARE_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_paths(paths: &PlantCarePaths) -> Self {
        Self::new(paths.config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file only. A missing file yields the defaults; a malformed
    /// file is an error.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let root = AtomicFile::<ConfigRoot>::toml(self.path.clone())
            .load()
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(root.unwrap_or_default().api)
    }

    /// Reads the file, then applies overrides from the process environment.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let config = apply_env_overrides(self.load_file()?, lookup)?;
        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Loaded client config");
        Ok(config)
    }

    /// Writes the config file, replacing any previous content.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let root = ConfigRoot {
            api: config.clone(),
        };
        AtomicFile::<ConfigRoot>::toml(self.path.clone()).save(&root)?;
        Ok(())
    }
}

/// Applies `PLANTCARE_API_URL` and `PLANTCARE_TIMEOUT_SECS`. Blank values are ignored.
pub fn apply_env_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    if let Some(url) = non_blank(lookup(API_URL_ENV)) {
        config.base_url = url;
    }

    if let Some(raw) = non_blank(lookup(TIMEOUT_ENV)) {
        config.timeout_secs = match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(PlantCareError::config(format!(
                    "{} must be a positive number of seconds, got '{}'",
                    TIMEOUT_ENV, raw
                )));
            }
        };
    }

    Ok(config)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

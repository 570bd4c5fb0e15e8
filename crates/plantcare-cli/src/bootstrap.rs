//! Wires configuration, storage and the HTTP client together.

use anyhow::{Context, Result};
use plantcare_core::config::ClientConfig;
use plantcare_core::session::SessionManager;
use plantcare_infrastructure::{
    ConfigService, JsonTranscriptStore, PlantCarePaths, TomlSettingsStore,
};
use plantcare_interaction::HttpPlantCareClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AppContext {
    pub paths: PlantCarePaths,
    pub config: ClientConfig,
}

impl AppContext {
    /// Resolves paths and config. CLI flags win over env, env over file.
    pub fn load(api_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let paths = match data_dir {
            Some(dir) => PlantCarePaths::at(dir),
            None => PlantCarePaths::resolve()?,
        };

        let service = ConfigService::from_paths(&paths);
        let mut config = service
            .load()
            .with_context(|| format!("Invalid configuration in {}", service.path().display()))?;
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }

        tracing::debug!(
            config_dir = %paths.config_dir().display(),
            data_dir = %paths.data_dir().display(),
            base_url = %config.base_url,
            "Resolved application context"
        );
        Ok(Self { paths, config })
    }

    pub fn client(&self) -> Result<Arc<HttpPlantCareClient>> {
        Ok(Arc::new(HttpPlantCareClient::new(self.config.clone())?))
    }

    /// Restores the chat session from the transcript file.
    pub async fn session(&self) -> Result<SessionManager> {
        let client = self.client()?;
        let store = Arc::new(JsonTranscriptStore::default_location(&self.paths));
        Ok(SessionManager::initialize(client, store).await)
    }

    pub fn settings(&self) -> TomlSettingsStore {
        TomlSettingsStore::default_location(&self.paths)
    }
}

/// Image reference handed to the client: an absolute `file://` URI.
pub fn image_ref(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Cannot resolve image path {}", path.display()))?;
    Ok(format!("file://{}", absolute.display()))
}

//! TOML file implementation of [`SettingsRepository`].

use crate::paths::PlantCarePaths;
use crate::storage::AtomicFile;
use plantcare_core::error::Result;
use plantcare_core::settings::{Settings, SettingsRepository};
use std::path::{Path, PathBuf};

/// Display settings stored in `settings.toml`.
pub struct TomlSettingsStore {
    file: AtomicFile<Settings>,
}

impl TomlSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::toml(path),
        }
    }

    pub fn default_location(paths: &PlantCarePaths) -> Self {
        Self::new(paths.settings_file())
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl SettingsRepository for TomlSettingsStore {
    fn load(&self) -> Settings {
        match self.file.load() {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %self.path().display(), "Using default settings: {}", e);
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        self.file.save(settings)?;
        tracing::debug!(?settings, "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantcare_core::settings::{FontSize, Theme};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSettingsStore::new(temp_dir.path().join("settings.toml"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_update_persists() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSettingsStore::new(temp_dir.path().join("settings.toml"));

        let updated = store
            .update(&|settings: &mut Settings| settings.theme = Theme::Light)
            .unwrap();
        assert_eq!(updated.theme, Theme::Light);
        assert_eq!(updated.font_size, FontSize::Normal);

        store
            .update(&|settings: &mut Settings| settings.font_size = FontSize::Large)
            .unwrap();

        let reopened = TomlSettingsStore::new(temp_dir.path().join("settings.toml"));
        let loaded = reopened.load();
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.font_size, FontSize::Large);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "theme = [").unwrap();

        let store = TomlSettingsStore::new(path);
        assert_eq!(store.load(), Settings::default());
    }
}

//! Atomic file operations for small JSON and TOML documents.
//!
//! Every write goes to a temporary sibling file, is fsynced, and is renamed
//! over the target while an exclusive lock file is held.

use plantcare_core::PlantCareError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic file operations.
#[derive(Debug, Error)]
pub enum AtomicFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}

impl AtomicFileError {
    /// True when the file was readable but its content could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::TomlParse(_) | Self::Utf8(_))
    }
}

impl From<AtomicFileError> for PlantCareError {
    fn from(err: AtomicFileError) -> Self {
        match err {
            AtomicFileError::Io(e) => PlantCareError::from(e),
            AtomicFileError::Json(e) => PlantCareError::from(e),
            AtomicFileError::TomlParse(e) => PlantCareError::from(e),
            AtomicFileError::Utf8(e) => PlantCareError::serialization("TOML", e.to_string()),
            AtomicFileError::TomlSerialize(e) => PlantCareError::from(e),
            AtomicFileError::Lock(message) => PlantCareError::storage(message),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn decode<T: DeserializeOwned>(self, content: &[u8]) -> Result<T, AtomicFileError> {
        Ok(match self {
            FileFormat::Json => serde_json::from_slice(content)?,
            FileFormat::Toml => toml::from_str(std::str::from_utf8(content)?)?,
        })
    }

    fn encode<T: Serialize>(self, data: &T) -> Result<String, AtomicFileError> {
        Ok(match self {
            FileFormat::Json => serde_json::to_string_pretty(data)?,
            FileFormat::Toml => toml::to_string_pretty(data)?,
        })
    }
}

/// A handle to a single document stored with atomic replace semantics.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: An exclusive lock file serializes writers across processes
/// - **Durability**: Explicit fsync before rename
///
/// A failed write leaves the previous content in place.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or decode the file. Content that is not valid
    ///   text is a decode error, not an I/O error.
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read(&self.path)?;

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Replaces the file content atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write(data)
    }

    /// Deletes the file. Deleting a missing file succeeds.
    pub fn remove(&self) -> Result<(), AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, data: &T) -> Result<(), AtomicFileError> {
        // Serialize first so an encoding failure never touches the disk
        let content = self.format.encode(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "Wrote file atomically");
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            )
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
        })?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`, creating parent directories.
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removing the file is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            name: "monstera".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let temp_dir = TempDir::new().unwrap();

        let json = AtomicFile::<Sample>::json(temp_dir.path().join("sample.json"));
        json.save(&sample()).unwrap();
        assert_eq!(json.load().unwrap(), Some(sample()));

        let toml = AtomicFile::<Sample>::toml(temp_dir.path().join("sample.toml"));
        toml.save(&sample()).unwrap();
        assert_eq!(toml.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_load_missing_or_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        let file = AtomicFile::<Sample>::json(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_content_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        fs::write(&path, "{not json").unwrap();

        let err = AtomicFile::<Sample>::json(path).load().unwrap_err();
        assert!(err.is_decode());
        assert!(PlantCareError::from(err).is_serialization());
    }

    #[test]
    fn test_non_utf8_content_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let bytes = [0xff, 0xfe, 0x5b];

        let json_path = temp_dir.path().join("sample.json");
        fs::write(&json_path, bytes).unwrap();
        let err = AtomicFile::<Sample>::json(json_path).load().unwrap_err();
        assert!(err.is_decode());

        let toml_path = temp_dir.path().join("sample.toml");
        fs::write(&toml_path, bytes).unwrap();
        let err = AtomicFile::<Sample>::toml(toml_path).load().unwrap_err();
        assert!(matches!(err, AtomicFileError::Utf8(_)));
        assert!(PlantCareError::from(err).is_serialization());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sample.json");
        let file = AtomicFile::<Sample>::json(path.clone());

        file.save(&sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".sample.json.tmp").exists());
        assert!(!temp_dir.path().join("nested").join("sample.lock").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");
        let file = AtomicFile::<Sample>::json(path.clone());

        file.remove().unwrap();
        file.save(&sample()).unwrap();
        file.remove().unwrap();
        assert!(!path.exists());
        file.remove().unwrap();
    }
}

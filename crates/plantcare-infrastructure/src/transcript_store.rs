//! JSON file implementation of [`TranscriptRepository`].

use crate::paths::PlantCarePaths;
use crate::storage::{AtomicFile, AtomicFileError};
use async_trait::async_trait;
use plantcare_core::error::{PlantCareError, Result};
use plantcare_core::message::Message;
use plantcare_core::transcript::TranscriptRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stores the transcript as a bare JSON array of messages.
///
/// File I/O runs on Tokio's blocking pool. Content that cannot be decoded is
/// reported as "nothing stored" so the session starts from the greeting.
#[derive(Clone)]
pub struct JsonTranscriptStore {
    file: Arc<AtomicFile<Vec<Message>>>,
}

impl JsonTranscriptStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }

    /// Store at the standard transcript location for `paths`.
    pub fn default_location(paths: &PlantCarePaths) -> Self {
        Self::new(paths.transcript_file())
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn run<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicFile<Vec<Message>>) -> std::result::Result<R, AtomicFileError>
            + Send
            + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| PlantCareError::internal(format!("Transcript I/O task failed: {}", e)))?
            .map_err(PlantCareError::from)
    }
}

#[async_trait]
impl TranscriptRepository for JsonTranscriptStore {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        let path = self.file.path().display().to_string();
        match self.run(|file| file.load()).await {
            Ok(stored) => Ok(stored),
            Err(e) if e.is_serialization() => {
                tracing::warn!(path = %path, "Ignoring undecodable chat history: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        let messages = messages.to_vec();
        self.run(move |file| file.save(&messages)).await
    }

    async fn clear(&self) -> Result<()> {
        self.run(|file| file.remove()).await
    }
}

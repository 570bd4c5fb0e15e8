use super::TranscriptRepository;
use crate::error::Result;
use crate::message::Message;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Transcript repository that keeps the value in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    messages: RwLock<Option<Vec<Message>>>,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `messages`.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(Some(messages)),
        }
    }
}

#[async_trait]
impl TranscriptRepository for InMemoryTranscriptStore {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        Ok(self.messages.read().await.clone())
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        *self.messages.write().await = Some(messages.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.messages.write().await = None;
        Ok(())
    }
}

use crate::message::Message;
use crate::transcript::TranscriptRepository;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

enum PersistCommand {
    Save(Vec<Message>),
    Clear,
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget persistence for transcript mutations.
///
/// Commands go through one unbounded channel to one task, so the durable copy
/// is updated in exactly the order the mutations happened. Failures are
/// logged and dropped; the in-memory transcript stays authoritative.
pub(crate) struct TranscriptWriter {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl TranscriptWriter {
    /// Spawns the writer task on the current Tokio runtime.
    ///
    /// The task exits once the writer is dropped and the queue is drained.
    pub(crate) fn spawn(repository: Arc<dyn TranscriptRepository>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    PersistCommand::Save(messages) => {
                        match repository.save(&messages).await {
                            Ok(()) => {
                                tracing::debug!(count = messages.len(), "Persisted chat transcript")
                            }
                            Err(e) => tracing::warn!("Failed to persist chat transcript: {}", e),
                        }
                    }
                    PersistCommand::Clear => match repository.clear().await {
                        Ok(()) => tracing::debug!("Erased stored chat transcript"),
                        Err(e) => tracing::warn!("Failed to erase stored chat transcript: {}", e),
                    },
                    PersistCommand::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            tracing::debug!("Transcript writer stopped");
        });

        Self { tx }
    }

    pub(crate) fn save(&self, messages: Vec<Message>) {
        self.enqueue(PersistCommand::Save(messages));
    }

    pub(crate) fn clear(&self) {
        self.enqueue(PersistCommand::Clear);
    }

    /// Waits until every command queued before this call has been applied.
    pub(crate) async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.enqueue(PersistCommand::Flush(ack));
        if done.await.is_err() {
            tracing::error!("Transcript writer stopped before flush completed");
        }
    }

    fn enqueue(&self, command: PersistCommand) {
        if self.tx.send(command).is_err() {
            tracing::error!("Transcript writer is not running; change not persisted");
        }
    }
}

use super::composer::Composer;
use super::state::{RejectReason, SendOutcome, SendingGuard, SessionState};
use super::writer::TranscriptWriter;
use crate::analysis::format_analysis;
use crate::client::{ChatTurn, ClientError, ImageUpload, PlantCareClient};
use crate::message::Message;
use crate::texts;
use crate::transcript::{TranscriptRepository, is_seed_message, seed_transcript};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Owns the chat transcript and orchestrates remote turns.
///
/// `SessionManager` is responsible for:
/// - Restoring the transcript on startup (falling back to the greeting)
/// - Appending the user's turn optimistically, before the remote call
/// - Appending exactly one assistant turn once the call settles
/// - Mirroring every mutation to durable storage, in order
///
/// At most one send is in flight per manager. The transcript lock is never
/// held across a remote call, so [`snapshot`](Self::snapshot) during a send
/// already shows the user's turn.
pub struct SessionManager {
    /// Ordered transcript, seed greeting first
    transcript: RwLock<Vec<Message>>,
    /// Pending input and staged image
    composer: Mutex<Composer>,
    /// Idle/sending flag
    sending: AtomicBool,
    /// Bumped by `clear` so replies to pre-clear turns are dropped
    epoch: AtomicU64,
    /// Remote service
    client: Arc<dyn PlantCareClient>,
    /// Background persistence
    writer: TranscriptWriter,
}

impl SessionManager {
    /// Creates a manager, restoring the stored transcript if there is one.
    ///
    /// A stored transcript is used only if it holds more than one message;
    /// anything else (nothing stored, only the greeting, a read error) starts
    /// from the seed greeting. Loading never fails.
    ///
    /// Must be called from within a Tokio runtime: it spawns the persistence
    /// writer task.
    pub async fn initialize(
        client: Arc<dyn PlantCareClient>,
        repository: Arc<dyn TranscriptRepository>,
    ) -> Self {
        let transcript = match repository.load().await {
            Ok(Some(messages)) if messages.len() > 1 => {
                tracing::info!(count = messages.len(), "Restored chat transcript");
                messages
            }
            Ok(_) => {
                tracing::debug!("No chat history stored, starting from greeting");
                seed_transcript()
            }
            Err(e) => {
                tracing::warn!("Failed to load chat history, starting from greeting: {}", e);
                seed_transcript()
            }
        };

        Self {
            transcript: RwLock::new(transcript),
            composer: Mutex::new(Composer::default()),
            sending: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            client,
            writer: TranscriptWriter::spawn(repository),
        }
    }

    /// Returns the current ordered transcript.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.transcript.read().await.clone()
    }

    pub fn state(&self) -> SessionState {
        if self.sending.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// True while a send is in flight; callers use it to disable send controls.
    pub fn is_sending(&self) -> bool {
        self.state() == SessionState::Sending
    }

    /// Sends a chat turn.
    ///
    /// Rejected without side effects if `input` is blank or another send is in
    /// flight. Otherwise appends the trimmed text as a user turn, clears the
    /// pending input, calls the remote chat endpoint with the conversation so
    /// far (the new turn included), and appends the reply or a fixed failure
    /// message.
    pub async fn send_text(&self, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Rejected(RejectReason::EmptyInput);
        }
        let Some(_guard) = SendingGuard::try_acquire(&self.sending) else {
            tracing::debug!("Send rejected: a request is already in flight");
            return SendOutcome::Rejected(RejectReason::Busy);
        };

        let (history, epoch) = {
            let mut transcript = self.transcript.write().await;
            let epoch = self.epoch.load(Ordering::Acquire);
            self.append(&mut transcript, Message::user_text(message));
            (chat_history(&transcript), epoch)
        };
        self.composer.lock().await.clear_input();

        tracing::info!(history = history.len(), "Sending chat message");
        let reply = match self.client.chat(message, &history).await {
            Ok(reply) => match reply.answer() {
                Some(answer) => Message::assistant_text(answer),
                None => {
                    tracing::warn!(error = ?reply.error, "Chat service reported failure");
                    Message::assistant_text(texts::CHAT_SERVICE_FAILURE)
                }
            },
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                Message::assistant_text(chat_failure_text(&e))
            }
        };

        self.complete(epoch, reply).await
    }

    /// Sends an image for analysis.
    ///
    /// Rejected without side effects if `image_ref` is blank or another send
    /// is in flight. A blank caption becomes the fixed placeholder. On success
    /// the analysis is rendered once and stored with its raw payload.
    pub async fn send_image(&self, image_ref: &str, caption: Option<&str>) -> SendOutcome {
        let image_ref = image_ref.trim();
        if image_ref.is_empty() {
            return SendOutcome::Rejected(RejectReason::MissingImage);
        }
        let Some(_guard) = SendingGuard::try_acquire(&self.sending) else {
            tracing::debug!("Image send rejected: a request is already in flight");
            return SendOutcome::Rejected(RejectReason::Busy);
        };

        let caption = caption
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(texts::IMAGE_CAPTION_PLACEHOLDER);

        let epoch = {
            let mut transcript = self.transcript.write().await;
            let epoch = self.epoch.load(Ordering::Acquire);
            self.append(&mut transcript, Message::user_image(caption, image_ref));
            epoch
        };
        {
            let mut composer = self.composer.lock().await;
            composer.clear_staged_image();
            composer.clear_input();
        }

        tracing::info!(image = image_ref, "Sending image for analysis");
        let upload = ImageUpload::jpeg(image_ref);
        let reply = match self.client.analyze_plant(&upload, caption).await {
            Ok(result) if result.success => {
                let body = format_analysis(&result);
                Message::assistant_analysis(body, result)
            }
            Ok(result) => {
                tracing::warn!(error = ?result.error, "Analysis service reported failure");
                Message::assistant_text(texts::ANALYSIS_SERVICE_FAILURE)
            }
            Err(e) => {
                tracing::warn!("Analysis request failed: {}", e);
                Message::assistant_text(analysis_failure_text(&e))
            }
        };

        self.complete(epoch, reply).await
    }

    /// Sends whatever the composer holds: the staged image (with the pending
    /// text as caption) if there is one, the pending text otherwise.
    pub async fn submit(&self) -> SendOutcome {
        let composer = self.composer.lock().await.clone();
        match composer.staged_image() {
            Some(image_ref) => self.send_image(image_ref, Some(composer.input())).await,
            None => self.send_text(composer.input()).await,
        }
    }

    /// Resets the transcript to the greeting and erases the stored copy.
    ///
    /// The in-memory reset is visible as soon as this returns; erasure is
    /// queued behind earlier writes and its failure is only logged.
    pub async fn clear(&self) {
        let mut transcript = self.transcript.write().await;
        self.epoch.fetch_add(1, Ordering::AcqRel);
        *transcript = seed_transcript();
        self.writer.clear();
        tracing::info!("Chat transcript cleared");
    }

    /// Waits until every queued persistence write has been applied.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    pub async fn composer(&self) -> Composer {
        self.composer.lock().await.clone()
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.composer.lock().await.set_input(text);
    }

    pub async fn stage_image(&self, image_ref: impl Into<String>) {
        self.composer.lock().await.stage_image(image_ref);
    }

    pub async fn clear_staged_image(&self) {
        self.composer.lock().await.clear_staged_image();
    }

    /// Appends the assistant turn unless the transcript was cleared meanwhile.
    async fn complete(&self, epoch: u64, reply: Message) -> SendOutcome {
        let mut transcript = self.transcript.write().await;
        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::info!("Transcript was cleared during the request; reply dropped");
            return SendOutcome::Discarded;
        }
        let kind = reply.kind();
        self.append(&mut transcript, reply);
        SendOutcome::Completed(kind)
    }

    /// Pushes a message and queues the new transcript for persistence.
    ///
    /// Called with the write lock held so queue order equals mutation order.
    fn append(&self, transcript: &mut Vec<Message>, message: Message) {
        transcript.push(message);
        self.writer.save(transcript.clone());
    }
}

/// The conversation as role/content pairs, without the leading greeting.
fn chat_history(transcript: &[Message]) -> Vec<ChatTurn> {
    let skip = usize::from(transcript.first().is_some_and(is_seed_message));
    transcript.iter().skip(skip).map(ChatTurn::from).collect()
}

fn chat_failure_text(error: &ClientError) -> &'static str {
    match error {
        ClientError::Transport(_) => texts::CHAT_TRANSPORT_FAILURE,
        _ => texts::CHAT_SERVICE_FAILURE,
    }
}

fn analysis_failure_text(error: &ClientError) -> &'static str {
    match error {
        ClientError::Unavailable(_) => texts::ANALYSIS_UNAVAILABLE,
        ClientError::Transport(_) => texts::ANALYSIS_TRANSPORT_FAILURE,
        _ => texts::ANALYSIS_SERVICE_FAILURE,
    }
}

//! Remote service boundary.
//!
//! [`PlantCareClient`] is the only way the session manager reaches the
//! network. Implementations are stateless request/response wrappers with no
//! retries: one failed attempt surfaces immediately as a [`ClientError`].

use crate::analysis::AnalysisResult;
use crate::message::{Message, MessageRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// File name sent with an image upload when the caller gives none.
pub const DEFAULT_IMAGE_FILE_NAME: &str = "plant_image.jpg";
/// MIME type sent with an image upload when the caller gives none.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// One prior turn sent as chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.body().to_string(),
        }
    }
}

/// Response body of the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    /// Reply text when the service reported success with a non-blank answer.
    pub fn answer(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.response
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Reference to a locally stored image to upload.
///
/// Only the reference is held; bytes are read at request time and dropped
/// once the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// `file://` URI or plain filesystem path.
    pub uri: String,
    pub file_name: String,
    pub mime_type: String,
}

impl ImageUpload {
    /// Upload with the default JPEG file name and MIME type.
    pub fn jpeg(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            file_name: DEFAULT_IMAGE_FILE_NAME.to_string(),
            mime_type: DEFAULT_IMAGE_MIME_TYPE.to_string(),
        }
    }
}

/// Failure of a single remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No response was obtained (connect error, timeout, broken connection).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered 503.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with another non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The local image could not be read for upload.
    #[error("Image error: {0}")]
    Image(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Abstract remote client for the plant-care service.
#[async_trait]
pub trait PlantCareClient: Send + Sync {
    /// Sends one chat turn with the prior conversation.
    ///
    /// `history` holds the conversation after the seed greeting, ending
    /// with the user turn that carries `message`.
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply, ClientError>;

    /// Uploads an image plus free-text care notes for analysis.
    async fn analyze_plant(
        &self,
        image: &ImageUpload,
        user_actions: &str,
    ) -> Result<AnalysisResult, ClientError>;

    /// Backend health probe.
    async fn health(&self) -> Result<Value, ClientError>;

    /// Features the backend currently offers.
    async fn capabilities(&self) -> Result<Value, ClientError>;
}

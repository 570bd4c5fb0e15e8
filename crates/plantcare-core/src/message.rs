//! Conversation message types.
//!
//! A [`Message`] is a role plus one of three closed payload shapes. The
//! payload variant fixes which fields exist: only image turns carry an image
//! reference and only analysis turns carry the raw analysis payload.
//!
//! The serialized form is flat, e.g.
//! `{"role":"user","type":"image","content":"...","image":"file://..."}`,
//! which is also the layout older clients persisted.

use crate::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Represents the author of a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed or sent by the user.
    User,
    /// Message produced by the assistant (greeting, reply or failure notice).
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Payload shape of a message, derived from [`MessagePayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePayload {
    /// Plain text turn.
    Text { content: String },
    /// Image turn; `content` is the caption, `image` a local URI.
    Image { content: String, image: String },
    /// Analysis turn; `content` is the pre-rendered composite body.
    Analysis {
        content: String,
        #[serde(rename = "analysisData")]
        analysis_data: AnalysisResult,
    },
}

/// A single immutable entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    #[serde(flatten)]
    pub payload: MessagePayload,
}

impl Message {
    pub fn user_text(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            payload: MessagePayload::Text {
                content: content.into(),
            },
        }
    }

    pub fn user_image(caption: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            payload: MessagePayload::Image {
                content: caption.into(),
                image: image_ref.into(),
            },
        }
    }

    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            payload: MessagePayload::Text {
                content: content.into(),
            },
        }
    }

    pub fn assistant_analysis(body: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            role: MessageRole::Assistant,
            payload: MessagePayload::Analysis {
                content: body.into(),
                analysis_data: analysis,
            },
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self.payload {
            MessagePayload::Text { .. } => MessageKind::Text,
            MessagePayload::Image { .. } => MessageKind::Image,
            MessagePayload::Analysis { .. } => MessageKind::Analysis,
        }
    }

    /// Text shown in the bubble: the reply, the caption or the rendered analysis.
    pub fn body(&self) -> &str {
        match &self.payload {
            MessagePayload::Text { content }
            | MessagePayload::Image { content, .. }
            | MessagePayload::Analysis { content, .. } => content,
        }
    }

    pub fn image_ref(&self) -> Option<&str> {
        match &self.payload {
            MessagePayload::Image { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn raw_analysis(&self) -> Option<&AnalysisResult> {
        match &self.payload {
            MessagePayload::Analysis { analysis_data, .. } => Some(analysis_data),
            _ => None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_follow_payload() {
        let image = Message::user_image("Hojas amarillas", "file://img1.jpg");
        assert_eq!(image.kind(), MessageKind::Image);
        assert_eq!(image.body(), "Hojas amarillas");
        assert_eq!(image.image_ref(), Some("file://img1.jpg"));
        assert!(image.raw_analysis().is_none());

        let text = Message::assistant_text("Hola");
        assert_eq!(text.kind(), MessageKind::Text);
        assert!(text.image_ref().is_none());
        assert!(!text.is_user());
    }

    #[test]
    fn test_serialized_layout_is_flat() {
        let value = serde_json::to_value(Message::user_image("Sin descripción", "file://a.jpg"))
            .unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "type": "image",
                "content": "Sin descripción",
                "image": "file://a.jpg"
            })
        );
    }

    #[test]
    fn test_reads_legacy_analysis_entry() {
        let raw = json!({
            "role": "assistant",
            "type": "analysis",
            "content": "🔍 **Identificación**\nAloe vera",
            "analysisData": {"success": true, "plant_name": "Aloe vera", "health_score": 9}
        });
        let message: Message = serde_json::from_value(raw).unwrap();
        assert_eq!(message.kind(), MessageKind::Analysis);
        let analysis = message.raw_analysis().unwrap();
        assert_eq!(analysis.plant_name(), Some("Aloe vera"));
        assert_eq!(analysis.health_score, Some(9.0));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let raw = json!({"role": "user", "type": "video", "content": "x"});
        assert!(serde_json::from_value::<Message>(raw).is_err());
    }
}

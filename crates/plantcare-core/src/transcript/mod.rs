//! Transcript seed and persistence interface.
//!
//! - `repository`: the [`TranscriptRepository`] trait
//! - `memory`: an in-process implementation for tests and ephemeral sessions

mod memory;
mod repository;

pub use memory::InMemoryTranscriptStore;
pub use repository::TranscriptRepository;

use crate::message::{Message, MessagePayload, MessageRole};
use crate::texts::SEED_GREETING;

/// Fixed storage key of the single chat session.
pub const TRANSCRIPT_STORAGE_KEY: &str = "@plantcare_chat_history";

/// The assistant greeting every transcript starts from.
pub fn seed_message() -> Message {
    Message::assistant_text(SEED_GREETING)
}

/// A transcript holding only the greeting.
pub fn seed_transcript() -> Vec<Message> {
    vec![seed_message()]
}

pub fn is_seed_message(message: &Message) -> bool {
    message.role == MessageRole::Assistant
        && matches!(&message.payload, MessagePayload::Text { content } if content == SEED_GREETING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_transcript_has_single_greeting() {
        let transcript = seed_transcript();
        assert_eq!(transcript.len(), 1);
        assert!(is_seed_message(&transcript[0]));
        assert!(!is_seed_message(&Message::user_text(SEED_GREETING)));
    }
}

//! Transcript repository trait.
//!
//! Defines the interface for persisting the single chat transcript.

use crate::error::Result;
use crate::message::Message;
use async_trait::async_trait;

/// An abstract repository for the durable copy of the transcript.
///
/// There is exactly one transcript, stored under a fixed key, so no
/// operation takes an identifier.
///
/// # Implementation Notes
///
/// Implementations should guarantee:
/// - `load` reports undecodable data as `Ok(None)`, never as an error
/// - `save` either fully replaces the stored value or leaves it intact
/// - `clear` on an absent value succeeds
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// Loads the stored transcript.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(messages))`: A transcript was stored
    /// - `Ok(None)`: Nothing stored, or the stored data could not be decoded
    /// - `Err(_)`: The storage itself could not be read
    async fn load(&self) -> Result<Option<Vec<Message>>>;

    /// Replaces the stored transcript.
    async fn save(&self, messages: &[Message]) -> Result<()>;

    /// Removes the stored transcript.
    async fn clear(&self) -> Result<()>;
}

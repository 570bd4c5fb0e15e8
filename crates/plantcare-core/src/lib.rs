//! Domain layer of the PlantCare client.
//!
//! Owns the chat transcript model, the analysis payload and its text
//! renderings, and the [`session::SessionManager`] that orchestrates remote
//! turns. Storage and HTTP live in sibling crates behind the
//! [`transcript::TranscriptRepository`] and [`client::PlantCareClient`] traits.

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod settings;
pub mod texts;
pub mod transcript;

// Re-export common error type
pub use error::PlantCareError;

//! Durable storage and configuration for the PlantCare client.
//!
//! - [`JsonTranscriptStore`]: chat transcript as an atomic JSON file
//! - [`TomlSettingsStore`]: display settings
//! - [`ConfigService`]: remote service configuration with env overrides
//! - [`PlantCarePaths`]: platform directories

pub mod config_service;
pub mod dto;
pub mod paths;
pub mod settings_store;
pub mod storage;
pub mod transcript_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::PlantCarePaths;
pub use crate::settings_store::TomlSettingsStore;
pub use crate::transcript_store::JsonTranscriptStore;

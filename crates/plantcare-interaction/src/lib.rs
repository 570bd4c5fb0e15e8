//! HTTP access to the plant-care backend.
//!
//! [`HttpPlantCareClient`] implements [`plantcare_core::client::PlantCareClient`]
//! with JSON requests for chat and multipart uploads for image analysis.

pub mod http_client;

pub use http_client::HttpPlantCareClient;

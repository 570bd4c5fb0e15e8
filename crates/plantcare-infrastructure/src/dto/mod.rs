//! On-disk shapes of persisted documents.

pub mod config_root;

pub use config_root::ConfigRoot;

pub mod analyze;
pub mod chat;
pub mod settings;

//! Low-level file storage shared by the repositories.

pub mod atomic_file;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};

//! Chat session domain module.
//!
//! # Module Structure
//!
//! - `manager`: the [`SessionManager`], single authority over the transcript
//! - `state`: idle/sending state and send outcomes
//! - `composer`: pending text input and staged image selection
//! - `writer`: ordered background persistence of transcript mutations
//!
//! # Usage
//!
//! ```ignore
//! use plantcare_core::session::{SessionManager, SendOutcome};
//!
//! let manager = SessionManager::initialize(client, repository).await;
//! let outcome = manager.send_text("¿Cada cuánto regar?").await;
//! let transcript = manager.snapshot().await;
//! ```

mod composer;
mod manager;
mod state;
mod writer;


pub use composer::Composer;
pub use manager::SessionManager;
pub use state::{RejectReason, SendOutcome, SessionState};

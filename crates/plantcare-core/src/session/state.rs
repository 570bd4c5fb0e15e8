use crate::message::MessageKind;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a remote call is in flight for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// Why a send was refused before touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Text was empty after trimming.
    EmptyInput,
    /// Image send without an image reference.
    MissingImage,
    /// Another send is still in flight.
    Busy,
}

/// Result of a `send_text` / `send_image` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The remote call settled and one assistant message of this kind was appended.
    Completed(MessageKind),
    /// The transcript was cleared while the call was in flight; the reply was dropped.
    Discarded,
    /// Nothing was appended and no call was made.
    Rejected(RejectReason),
}

impl SendOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SendOutcome::Rejected(_))
    }
}

/// Holds the sending flag for the lifetime of one send.
///
/// The flag is released on drop, so the session returns to idle even if the
/// remote call panics or the send future is dropped mid-flight.
pub(crate) struct SendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SendingGuard<'a> {
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

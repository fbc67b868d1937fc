//! Session cancellation flag
//!
//! A single shared boolean per session. `pause`/`stop` raise it, only a new
//! `start` lowers it. Long waits poll it, so raising it never interrupts a
//! wait instantly; it is seen at the next poll.

use portable_atomic::{AtomicBool, Ordering};

/// Shared cancellation signal for one controller session
#[derive(Debug, Default)]
pub struct CancellationFlag {
    raised: AtomicBool,
}

impl CancellationFlag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Check whether cancellation has been requested
    pub fn is_set(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Request cancellation
    ///
    /// Idempotent. In-progress waits return at their next poll.
    pub fn cancel(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Lower the flag (session restart only)
    pub(crate) fn reset(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

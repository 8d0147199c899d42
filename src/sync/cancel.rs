//! One-shot cancellation signalling.
//!
//! A generic stand-in for process-level abort delivery: any thread may set
//! the token exactly once, and workers observe it with a non-blocking poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A clonable, one-shot cancellation indicator.
///
/// All clones share the same underlying flag. The transition is monotonic:
/// once cancelled, the token never reverts.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    /// The shared cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    ///
    /// Returns true if this call made the transition, false if the token
    /// was already cancelled. Repeated calls are harmless.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// Check whether cancellation has been requested. Never blocks.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_token_starts_unset() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_first_cancel_wins() {
        let token = CancelToken::new();

        assert!(token.cancel());
        assert!(token.is_cancelled());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let observer = token.clone();

        let setter = token.clone();
        thread::spawn(move || {
            setter.cancel();
        })
        .join()
        .unwrap();

        assert!(token.is_cancelled());
        assert!(observer.is_cancelled());
    }
}

//! Cooperative cancellation token shared between the controlling context and
//! the fill worker. The worker polls it at chunk granularity.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `signal()` is idempotent and safe to call from a signal handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable stop flag; all clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cooperative stop (idempotent).
    #[inline]
    pub fn signal(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether a stop has been requested.
    #[inline]
    pub fn is_signaled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can be reused for a later run.
    #[inline]
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

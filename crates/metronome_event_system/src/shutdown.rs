//! Shutdown coordination between an OS signal listener and the event loop.
//!
//! The loop itself is single-threaded; a signal arrives on some other thread.
//! [`ShutdownState`] is the only thing shared between the two: the listener
//! flips it, and a handler polls it on every update and asks the loop to exit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Shared shutdown flags.
#[derive(Debug, Clone)]
pub struct ShutdownState {
    /// Set once a stop has been requested from outside the loop
    shutdown_initiated: Arc<AtomicBool>,
    /// Set once the loop has returned and teardown may begin
    shutdown_complete: Arc<AtomicBool>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self {
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
            shutdown_complete: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_shutdown_initiated(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Acquire)
    }

    pub fn is_shutdown_complete(&self) -> bool {
        self.shutdown_complete.load(Ordering::Acquire)
    }

    /// Requests a stop. Returns true only for the call that flipped the flag.
    pub fn initiate_shutdown(&self) -> bool {
        let first = !self.shutdown_initiated.swap(true, Ordering::AcqRel);
        if first {
            info!("🛑 Shutdown initiated - loop will stop at the next drain pass");
        }
        first
    }

    /// Marks the loop as finished.
    pub fn complete_shutdown(&self) {
        self.shutdown_complete.store(true, Ordering::Release);
        info!("✅ Event loop stopped - ready for final cleanup");
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}

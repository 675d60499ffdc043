/// Statistics tracking for the event system
use serde::{Deserialize, Serialize};

/// Counters maintained by the event system for monitoring.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSystemStats {
    /// Events pushed onto the queue (including loop-generated ones)
    pub events_emitted: u64,
    /// Events broadcast to handlers
    pub events_dispatched: u64,
    /// Internal control commands consumed
    pub commands_processed: u64,
    /// Individual handler callback invocations
    pub handler_invocations: u64,
    /// Handlers ever added
    pub handlers_registered: u64,
    /// Handlers removed through deferred removal
    pub handlers_removed: u64,
    /// Frames completed by the main loop
    pub frames: u64,
    /// Frames that used up their whole budget
    pub overrun_frames: u64,
    /// Total time requested from the clock's sleep, in milliseconds
    pub total_sleep_ms: f64,
}

impl EventSystemStats {
    /// Mean broadcast fan-out, or zero before anything was dispatched.
    pub fn avg_handlers_per_event(&self) -> f64 {
        if self.events_dispatched == 0 {
            0.0
        } else {
            self.handler_invocations as f64 / self.events_dispatched as f64
        }
    }
}

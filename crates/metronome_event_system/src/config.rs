//! Event loop tuning.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default frame rate targeted by the main loop.
pub const DEFAULT_TARGET_FPS: u32 = 30;

fn default_target_fps() -> u32 {
    DEFAULT_TARGET_FPS
}

fn default_overrun_warning() -> bool {
    true
}

/// Settings for [`EventSystem::run`](crate::EventSystem::run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLoopConfig {
    /// Frames per second the loop paces itself to
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Log a warning when a frame takes longer than two frame budgets
    #[serde(default = "default_overrun_warning")]
    pub overrun_warning: bool,
}

impl EventLoopConfig {
    /// Time allotted to one frame: `1000 / target_fps` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `target_fps` is zero.
    pub fn frame_budget(&self) -> Duration {
        assert!(self.target_fps > 0, "target_fps must be greater than 0");
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.target_fps == 0 {
            return Err("event_loop.target_fps must be greater than 0".to_string());
        }
        if self.target_fps > 1000 {
            return Err(format!(
                "event_loop.target_fps must be at most 1000, got {}",
                self.target_fps
            ));
        }
        Ok(())
    }
}

impl Default for EventLoopConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
            overrun_warning: default_overrun_warning(),
        }
    }
}

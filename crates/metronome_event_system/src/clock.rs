//! Time source and frame pacing primitives used by the main loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic clock plus a coarse sleep, as seen by the event loop.
pub trait Clock {
    /// Time since an arbitrary, fixed origin. Never decreases.
    fn now(&self) -> Duration;

    /// Blocks the calling thread for roughly `duration`.
    fn sleep(&self, duration: Duration);
}

/// Milliseconds from `earlier` to `later`, zero if `later` is not after `earlier`.
pub fn diff_millis(later: Duration, earlier: Duration) -> f64 {
    later.saturating_sub(earlier).as_secs_f64() * 1000.0
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Scripted clock for tests and simulations.
///
/// Time only moves when [`ManualClock::advance`] is called or when the loop
/// sleeps. Every requested sleep is recorded. Clones share the same timeline,
/// so a test can keep one clone and hand another to the event system.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// All sleeps requested so far, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shares_timeline() {
        let clock = ManualClock::new();
        let other = clock.clone();

        other.advance(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(10));

        clock.sleep(Duration::from_millis(5));
        assert_eq!(other.now(), Duration::from_millis(15));
        assert_eq!(other.sleeps(), vec![Duration::from_millis(5)]);
    }

    #[test]
    fn test_diff_millis_saturates() {
        let a = Duration::from_millis(40);
        let b = Duration::from_millis(10);
        assert!((diff_millis(a, b) - 30.0).abs() < 1e-9);
        assert_eq!(diff_millis(b, a), 0.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}

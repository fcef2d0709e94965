//! Time sources for driving a player.
//!
//! The player never sleeps itself: it hands out waits and a [`Clock`] decides
//! what waiting means. [`SystemClock`] blocks the thread for real,
//! [`VirtualClock`] only records the waits so playback can be simulated
//! instantly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Cloneable flag requesting that a player stop.
///
/// Handed to signal handlers and clocks; the player checks it before every
/// step.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Something that can wait.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Longest single sleep, so an abort is noticed promptly.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Wall-clock time, optionally sped up.
#[derive(Debug, Clone)]
pub struct SystemClock {
    speed: f64,
    abort: Option<AbortHandle>,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            abort: None,
        }
    }

    /// Play `speed` times faster. Non-positive or non-finite values are
    /// ignored.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Cut sleeps short once `abort` fires.
    #[must_use]
    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Real time to spend for a player wait of `duration`.
    pub fn scaled(&self, duration: Duration) -> Duration {
        duration.div_f64(self.speed)
    }

    fn aborted(&self) -> bool {
        self.abort.as_ref().is_some_and(AbortHandle::is_aborted)
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        let mut remaining = self.scaled(duration);
        while !remaining.is_zero() && !self.aborted() {
            let slice = remaining.min(SLEEP_SLICE);
            thread::sleep(slice);
            remaining -= slice;
        }
    }
}

/// Simulated time: records every wait and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    elapsed: Duration,
    waits: Vec<Duration>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Every wait, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl Clock for VirtualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.waits.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn virtual_clock_accumulates() {
        let mut clock = VirtualClock::new();
        clock.sleep(Duration::from_millis(600));
        clock.sleep(Duration::from_millis(50));

        assert_eq!(clock.elapsed(), Duration::from_millis(650));
        assert_eq!(clock.waits().len(), 2);
    }

    #[test]
    fn speed_scales_waits() {
        let clock = SystemClock::new().with_speed(4.0);
        assert_eq!(clock.scaled(Duration::from_millis(400)), Duration::from_millis(100));
    }

    #[test]
    fn invalid_speed_is_ignored() {
        assert_eq!(SystemClock::new().with_speed(0.0).speed(), 1.0);
        assert_eq!(SystemClock::new().with_speed(f64::NAN).speed(), 1.0);
    }

    #[test]
    fn aborted_clock_does_not_sleep() {
        let abort = AbortHandle::new();
        abort.abort();
        let mut clock = SystemClock::new().with_abort(abort);

        let started = Instant::now();
        clock.sleep(Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn abort_handle_clones_share_state() {
        let handle = AbortHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_aborted());
        clone.abort();
        assert!(handle.is_aborted());
    }
}

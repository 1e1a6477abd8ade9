//! Deadline timers driven by an injected clock.
//!
//! Nothing in this crate sleeps or spawns. A [`Timer`] only remembers when it
//! is due; the owner decides when to look at the clock and fire it. Hosts
//! drive time forward through a [`Clock`]: [`SystemClock`] in applications,
//! [`ManualClock`] in tests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a manual clock starting at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut guard = self
            .now
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self
            .now
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A single-shot timer slot.
///
/// At most one deadline is outstanding: scheduling again replaces the
/// previous deadline, and a cancelled timer never fires.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer to fire `delay` after `now`.
    ///
    /// Returns `true` if a pending deadline was superseded.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Cancel the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Check if a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the timer if its deadline has been reached.
    ///
    /// Returns `true` exactly once per scheduled deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once_after_deadline() {
        let clock = ManualClock::new();
        let mut timer = Timer::new();
        timer.schedule(clock.now(), Duration::from_millis(100));

        assert!(!timer.fire(clock.now()));
        clock.advance(Duration::from_millis(100));
        assert!(timer.fire(clock.now()));
        assert!(!timer.fire(clock.now()));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_previous_deadline() {
        let clock = ManualClock::new();
        let mut timer = Timer::new();
        assert!(!timer.schedule(clock.now(), Duration::from_millis(100)));

        clock.advance(Duration::from_millis(60));
        assert!(timer.schedule(clock.now(), Duration::from_millis(100)));

        clock.advance(Duration::from_millis(60));
        assert!(!timer.fire(clock.now()));
        clock.advance(Duration::from_millis(40));
        assert!(timer.fire(clock.now()));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let clock = ManualClock::new();
        let mut timer = Timer::new();
        timer.schedule(clock.now(), Duration::ZERO);
        assert!(timer.cancel());
        clock.advance(Duration::from_secs(1));
        assert!(!timer.fire(clock.now()));
        assert!(!timer.cancel());
    }

    #[test]
    fn test_zero_delay_fires_on_next_check() {
        let clock = ManualClock::new();
        let mut timer = Timer::new();
        timer.schedule(clock.now(), Duration::ZERO);
        assert!(timer.is_pending());
        assert!(timer.fire(clock.now()));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_millis(250));
        assert_eq!(other.now() - start, Duration::from_millis(250));
    }
}

//! Debounced value cell.
//!
//! A [`Debounced`] holds two copies of a value: the *immediate* value that
//! follows every edit, and the *settled* value that consumers act on. Edits
//! schedule a settle after the cell's delay; a newer edit cancels the
//! pending settle and schedules its own. Bypassing edits settle on the next
//! [`poll`](Debounced::poll) without waiting.

use std::time::{Duration, Instant};

use log::trace;

use crate::timer::Timer;

/// Default settle delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

/// A value with an immediate and a settled copy.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    immediate: T,
    settled: T,
    delay: Duration,
    timer: Timer,
    bypass: bool,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Create a cell using [`DEFAULT_DELAY`].
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DELAY)
    }

    /// Create a cell with a custom settle delay.
    pub fn with_delay(initial: T, delay: Duration) -> Self {
        Self {
            immediate: initial.clone(),
            settled: initial,
            delay,
            timer: Timer::new(),
            bypass: false,
        }
    }

    /// The value consumers should act on.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// The most recently set value.
    pub fn immediate(&self) -> &T {
        &self.immediate
    }

    /// The settle delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check if a settle is outstanding.
    pub fn is_pending(&self) -> bool {
        self.bypass || self.timer.is_pending()
    }

    /// When the pending settle is due, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Set the immediate value; it settles after the delay.
    pub fn set(&mut self, value: T, now: Instant) {
        self.apply(value, false, now);
    }

    /// Set the immediate value and settle it on the next poll.
    pub fn set_bypass(&mut self, value: T, now: Instant) {
        self.apply(value, true, now);
    }

    /// Set the immediate value from a function of the previous immediate value.
    pub fn update<F>(&mut self, f: F, bypass: bool, now: Instant)
    where
        F: FnOnce(&T) -> T,
    {
        let value = f(&self.immediate);
        self.apply(value, bypass, now);
    }

    fn apply(&mut self, value: T, bypass: bool, now: Instant) {
        if bypass {
            self.immediate = value;
            self.timer.cancel();
            self.bypass = true;
            return;
        }

        if value == self.immediate {
            return;
        }

        self.immediate = value;
        self.bypass = false;
        if self.timer.schedule(now, self.delay) {
            trace!("debounce: superseded pending settle");
        }
    }

    /// Settle the value if a bypass is pending or the timer is due.
    ///
    /// Returns `true` if the settled value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.bypass {
            self.bypass = false;
            return self.settle();
        }
        if self.timer.fire(now) {
            return self.settle();
        }
        false
    }

    /// Drop any outstanding settle. The immediate value is kept.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.bypass = false;
    }

    fn settle(&mut self) -> bool {
        if self.settled == self.immediate {
            return false;
        }
        trace!("debounce: settled after {:?}", self.delay);
        self.settled = self.immediate.clone();
        true
    }
}

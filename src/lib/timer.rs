// src/lib/timer.rs

// dependencies
use crate::clock::Clock;
use log::{debug, trace};

// interval value that keeps a timer from firing
pub const TIMER_OFF: u64 = 0;

/// Periodic trigger polled against a borrowed [`Clock`].
///
/// In force mode a firing moves the deadline by one interval from the
/// previous deadline, so firings stay on a fixed grid. In drift mode the
/// next deadline is one interval after the time of the firing check.
#[derive(Debug)]
pub struct Timer<'a> {
    clock: &'a Clock,
    interval: u64,
    force: bool,
    // unset until the bound clock has a time
    next: Option<u64>,
}

impl<'a> Timer<'a> {
    // force-mode timer; the first check at or after the current time fires
    pub fn new(clock: &'a Clock, interval: u64) -> Self {
        Self {
            clock,
            interval,
            force: true,
            next: clock.now(),
        }
    }

    pub fn drifting(clock: &'a Clock, interval: u64) -> Self {
        Self {
            force: false,
            ..Self::new(clock, interval)
        }
    }

    pub fn clock(&self) -> &'a Clock {
        self.clock
    }

    /// Returns `true` once per call when the deadline has been reached,
    /// re-arming the timer according to its policy.
    pub fn check(&mut self) -> bool {
        let Some(now) = self.clock.now() else {
            return false;
        };
        if self.interval == TIMER_OFF {
            return false;
        }
        let next = *self.next.get_or_insert(now);
        if next > now {
            return false;
        }

        let rearmed = if self.force {
            next.saturating_add(self.interval)
        } else {
            now.saturating_add(self.interval)
        };
        self.next = Some(rearmed);
        trace!("timer fired at {}, next due at {}", now, rearmed);
        true
    }

    // no-op while the bound clock has no time
    pub fn set_interval(&mut self, interval: u64) {
        if !self.clock.is_enabled() {
            debug!("ignored interval change to {}ms on a disabled clock", interval);
            return;
        }
        self.interval = interval;
    }

    pub fn off(&mut self) {
        self.set_interval(TIMER_OFF);
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    // absolute time of the next eligible firing, `None` before the clock has a time
    pub fn next_due(&self) -> Option<u64> {
        self.next
    }
}

// src/lib/clock.rs

// dependencies
use log::{debug, trace};
use parking_lot::Mutex;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const MS_PER_SECOND: u64 = 1000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: u64 = 7 * MS_PER_DAY;

// enum type to represent errors related to the clock type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("can not set time on a real clock")]
    Unsupported,
}

/// A millisecond time source.
///
/// `Real` reads the system wall clock on every call. `Virtual` holds a
/// counter that only moves through [`Clock::delay`] and [`Clock::set`];
/// a virtual counter of `None` is a clock with no time, which keeps every
/// timer bound to it silent.
#[derive(Debug)]
pub enum Clock {
    Real,
    Virtual(Mutex<Option<u64>>),
}

impl Default for Clock {
    fn default() -> Self {
        Self::real()
    }
}

// milliseconds since the unix epoch, read from the system clock
pub(crate) fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl Clock {
    pub fn real() -> Self {
        Self::Real
    }

    // virtual clock seeded at `ts` milliseconds
    pub fn virtual_at(ts: u64) -> Self {
        Self::Virtual(Mutex::new(Some(ts)))
    }

    // virtual clock holding no time until `set` is called
    pub fn disabled() -> Self {
        Self::Virtual(Mutex::new(None))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real)
    }

    pub fn is_enabled(&self) -> bool {
        self.now().is_some()
    }

    /// Current time in milliseconds, or `None` for a disabled clock.
    pub fn now(&self) -> Option<u64> {
        match self {
            Self::Real => Some(system_millis()),
            Self::Virtual(ts) => *ts.lock(),
        }
    }

    /// Blocks the calling thread for `ms` on a real clock; moves a virtual
    /// clock forward by `ms` without blocking.
    pub fn delay(&self, ms: u64) {
        match self {
            Self::Real => thread::sleep(Duration::from_millis(ms)),
            Self::Virtual(ts) => {
                let mut ts = ts.lock();
                if let Some(now) = ts.as_mut() {
                    *now = now.saturating_add(ms);
                    trace!("virtual clock advanced by {}ms to {}", ms, now);
                }
            }
        }
    }

    // overwrite the virtual counter, backwards moves included
    pub fn set(&self, ts: u64) -> Result<(), ClockError> {
        match self {
            Self::Real => {
                debug!("rejected set({}) on a real clock", ts);
                Err(ClockError::Unsupported)
            }
            Self::Virtual(current) => {
                *current.lock() = Some(ts);
                trace!("virtual clock set to {}", ts);
                Ok(())
            }
        }
    }
}

//! Time sources for the analytics engine
//!
//! The engine never reads the wall clock on its own. When a keystroke arrives without a
//! timestamp it asks the [`Clock`] it was built with, so tests and replays can drive time
//! deterministically.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::Timestamp;

/// Source of the current instant in milliseconds
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in milliseconds since the UNIX epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A system clock set before 1970 reads as the epoch
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as Timestamp)
    }
}

impl<F> Clock for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same instant, so a test can keep one handle and give another to the engine.
///
/// ```rust
/// use cadence::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1_000);
/// let handle = clock.clone();
/// handle.advance(250);
/// assert_eq!(clock.now(), 1_250);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, timestamp: Timestamp) {
        self.now.set(timestamp);
    }

    /// Move forward by `millis`
    pub fn advance(&self, millis: Timestamp) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

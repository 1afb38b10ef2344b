//! Monotonic time sources for the scheduler.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use dartrun_core::types::Millis;

/// A monotonic clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same time, so a caller can keep a handle while the engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward. Negative or non-finite steps are ignored.
    pub fn advance(&self, dt: Millis) {
        if dt.is_finite() && dt > 0.0 {
            self.now.set(self.now.get() + dt);
        }
    }

    /// Jump forward to `now`. Going backwards is ignored.
    pub fn set(&self, now: Millis) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

//! Frame clocks. Times are milliseconds as `f64`, matching animation-frame timestamps.

use std::cell::Cell;
use std::fmt::Debug;
use std::time::Instant;

pub trait Clock: Debug {
    /// Milliseconds since the clock's origin. Never decreases.
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock whose origin is the moment it was created.
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
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }

    /// Jumps to `now_ms`; earlier times are ignored to keep the clock monotonic.
    pub fn set(&self, now_ms: f64) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

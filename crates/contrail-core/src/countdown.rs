//! Launch countdown.

use std::fmt;

use serde::{Deserialize, Serialize};

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub fn from_millis(remaining_ms: f64) -> Self {
        let remaining = remaining_ms.max(0.0);
        Self {
            days: (remaining / DAY_MS).floor() as u64,
            hours: ((remaining % DAY_MS) / HOUR_MS).floor() as u64,
            minutes: ((remaining % HOUR_MS) / MINUTE_MS).floor() as u64,
            seconds: ((remaining % MINUTE_MS) / SECOND_MS).floor() as u64,
        }
    }

    pub fn blocks(&self) -> [(u64, &'static str); 4] {
        [
            (self.days, "Days"),
            (self.hours, "Hours"),
            (self.minutes, "Minutes"),
            (self.seconds, "Seconds"),
        ]
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    target_ms: f64,
    left: TimeLeft,
}

impl Countdown {
    pub fn new(target_ms: f64) -> Self {
        Self {
            target_ms,
            left: TimeLeft::default(),
        }
    }

    pub fn target_ms(&self) -> f64 {
        self.target_ms
    }

    pub fn time_left(&self) -> TimeLeft {
        self.left
    }

    /// Recomputes the remaining time. Once the target has passed the last
    /// displayed value is kept.
    pub fn tick(&mut self, now_ms: f64) -> TimeLeft {
        let difference = self.target_ms - now_ms;
        if difference > 0.0 {
            self.left = TimeLeft::from_millis(difference);
        }
        self.left
    }
}

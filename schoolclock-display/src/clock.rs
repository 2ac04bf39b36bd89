//! Clock sources for the presenter.

use chrono::{Local, NaiveTime};

use schoolclock::timeline::clock::truncate_to_minute;

/// Yields the instant to resolve on each tick.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Local wall clock, truncated to the minute like the face of the LCD build.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        truncate_to_minute(Local::now().time())
    }
}

/// Always reports the same instant (`--at`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

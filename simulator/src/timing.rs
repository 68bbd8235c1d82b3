//! Simulated wall clock and frame pacing.
//!
//! These use `std` time types, so they live here rather than in the common crate.

use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use stepring_common::TimeUnits;

/// Target frame time of the live window (~20 FPS).
#[cfg_attr(not(feature = "window"), allow(dead_code))]
pub const FRAME_TIME: Duration = Duration::from_millis(50);

/// Simulated minutes that pass per window frame.
#[cfg_attr(not(feature = "window"), allow(dead_code))]
pub const MINUTES_PER_FRAME: u32 = 2;

/// Minute-resolution clock that only moves when told to.
pub struct SimClock {
    now: NaiveDateTime,
}

impl SimClock {
    /// Clock at `start`, truncated to the whole minute.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        let now = start
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(start);
        Self { now }
    }

    #[inline]
    pub const fn now(&self) -> NaiveDateTime { self.now }

    /// Step one minute forward and report what changed.
    pub fn advance(&mut self) -> TimeUnits {
        let prev = self.now;
        self.now += TimeDelta::minutes(1);
        TimeUnits::changed_between(&prev, &self.now)
    }
}

//! Step data: the per-frame sample, the provider boundary and a rolling-average provider.
//!
//! - [`StepSample`] - the three integers read once per frame
//! - [`HealthProvider`] - what the face needs from the platform health service
//! - [`StepHistory`] - a provider that derives the averages from archived days
//!
//! # Averages
//!
//! [`StepHistory`] keeps one hourly cumulative curve per archived day. The day
//! average is the mean of the archived totals; the current average is the mean of
//! the archived curves at the current minute, interpolated inside the hour.

use heapless::Deque;

// =============================================================================
// Step Sample
// =============================================================================

/// Snapshot of the step counters for one frame.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct StepSample {
    /// Steps taken today.
    pub current_steps: u32,
    /// Average total steps per day.
    pub day_average: u32,
    /// Average steps taken by this time of day.
    pub current_average: u32,
}

// =============================================================================
// Provider Boundary
// =============================================================================

/// Source of step data, implemented by the platform's health service.
pub trait HealthProvider {
    /// Steps taken today.
    fn current_steps(&self) -> u32;

    /// Average total steps per day.
    fn day_average(&self) -> u32;

    /// Average steps taken by the current time of day.
    fn current_average(&self) -> u32;

    /// Returns `true` once per batch of new data, clearing the flag.
    fn take_update(&mut self) -> bool;

    /// Read all three counters.
    fn sample(&self) -> StepSample {
        StepSample {
            current_steps: self.current_steps(),
            day_average: self.day_average(),
            current_average: self.current_average(),
        }
    }
}

// =============================================================================
// Rolling History
// =============================================================================

/// Number of archived days used for the averages.
pub const HISTORY_DAYS: usize = 7;

/// Hours per day curve.
const HOURS: usize = 24;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Cumulative step count at the end of each hour of one day.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DayCurve {
    cumulative: [u32; HOURS],
}

impl DayCurve {
    /// An empty day with no steps.
    pub const fn new() -> Self { Self { cumulative: [0; HOURS] } }

    /// Build a curve from hourly cumulative counts.
    ///
    /// Counts are forced to be non-decreasing.
    pub fn from_hourly(hourly: [u32; HOURS]) -> Self {
        let mut cumulative = hourly;
        for hour in 1..HOURS {
            cumulative[hour] = cumulative[hour].max(cumulative[hour - 1]);
        }
        Self { cumulative }
    }

    /// Total steps for the day.
    #[inline]
    pub const fn total(&self) -> u32 { self.cumulative[HOURS - 1] }

    /// Cumulative steps at `minute` of the day, linearly interpolated inside the hour.
    pub fn at_minute(
        &self,
        minute: u32,
    ) -> u32 {
        let minute = minute.min(MINUTES_PER_DAY - 1);
        let hour = (minute / 60) as usize;
        let before = if hour == 0 { 0 } else { self.cumulative[hour - 1] };
        let after = self.cumulative[hour];
        let into_hour = u64::from(minute % 60 + 1);
        before + ((u64::from(after.saturating_sub(before)) * into_hour) / 60) as u32
    }
}

impl Default for DayCurve {
    fn default() -> Self { Self::new() }
}

/// Health provider backed by today's counter and a window of archived days.
pub struct StepHistory {
    days: Deque<DayCurve, HISTORY_DAYS>,
    today: DayCurve,
    last_hour: usize,
    current_steps: u32,
    minute_of_day: u32,
    updated: bool,
}

impl StepHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            days: Deque::new(),
            today: DayCurve::new(),
            last_hour: 0,
            current_steps: 0,
            minute_of_day: 0,
            updated: false,
        }
    }

    /// Archive a complete day. The oldest day is dropped when the window is full.
    pub fn push_day(
        &mut self,
        day: DayCurve,
    ) {
        if self.days.is_full() {
            self.days.pop_front();
        }
        self.days.push_back(day).ok();
    }

    /// Record today's cumulative count at `minute_of_day`.
    ///
    /// Hours skipped since the previous record carry the previous total forward.
    /// Counts never decrease within a day.
    pub fn record(
        &mut self,
        minute_of_day: u32,
        steps_today: u32,
    ) {
        let minute_of_day = minute_of_day.min(MINUTES_PER_DAY - 1);
        let hour = (minute_of_day / 60) as usize;
        let steps = steps_today.max(self.current_steps);

        for skipped in (self.last_hour + 1)..hour {
            self.today.cumulative[skipped] = self.current_steps;
        }
        self.today.cumulative[hour] = steps;
        self.last_hour = self.last_hour.max(hour);

        if steps != self.current_steps {
            self.updated = true;
        }
        self.current_steps = steps;
        self.minute_of_day = minute_of_day;
    }

    /// Close today: archive it and start a new day at zero.
    pub fn roll_day(&mut self) {
        for hour in (self.last_hour + 1)..HOURS {
            self.today.cumulative[hour] = self.current_steps;
        }
        let finished = self.today;
        self.push_day(finished);

        self.today = DayCurve::new();
        self.last_hour = 0;
        self.current_steps = 0;
        self.minute_of_day = 0;
        self.updated = true;
        log::debug!("Archived day with {} steps", finished.total());
    }

    /// Number of archived days.
    #[inline]
    pub fn days(&self) -> usize { self.days.len() }

    /// Mean of the archived daily totals, 0 without history.
    pub fn day_average(&self) -> u32 {
        if self.days.is_empty() {
            return 0;
        }
        let sum: u64 = self.days.iter().map(|day| u64::from(day.total())).sum();
        (sum / self.days.len() as u64) as u32
    }

    /// Mean of the archived counts at `minute_of_day`, 0 without history.
    pub fn average_at(
        &self,
        minute_of_day: u32,
    ) -> u32 {
        if self.days.is_empty() {
            return 0;
        }
        let sum: u64 = self
            .days
            .iter()
            .map(|day| u64::from(day.at_minute(minute_of_day)))
            .sum();
        (sum / self.days.len() as u64) as u32
    }
}

impl Default for StepHistory {
    fn default() -> Self { Self::new() }
}

impl HealthProvider for StepHistory {
    fn current_steps(&self) -> u32 { self.current_steps }

    fn day_average(&self) -> u32 { StepHistory::day_average(self) }

    fn current_average(&self) -> u32 { self.average_at(self.minute_of_day) }

    fn take_update(&mut self) -> bool { core::mem::take(&mut self.updated) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A day that walks `per_hour` steps every hour from 08:00 to 20:00.
    fn office_day(per_hour: u32) -> DayCurve {
        let mut hourly = [0u32; HOURS];
        let mut total = 0;
        for (hour, slot) in hourly.iter_mut().enumerate() {
            if (8..20).contains(&hour) {
                total += per_hour;
            }
            *slot = total;
        }
        DayCurve::from_hourly(hourly)
    }

    #[test]
    fn test_empty_history_averages_are_zero() {
        let history = StepHistory::new();
        assert_eq!(history.day_average(), 0);
        assert_eq!(history.average_at(600), 0);
        assert_eq!(history.sample(), StepSample::default());
    }

    #[test]
    fn test_day_average_is_mean_of_totals() {
        let mut history = StepHistory::new();
        history.push_day(office_day(500)); // 6000
        history.push_day(office_day(1000)); // 12000
        assert_eq!(history.day_average(), 9000);
    }

    #[test]
    fn test_history_window_drops_oldest() {
        let mut history = StepHistory::new();
        history.push_day(office_day(10_000));
        for _ in 0..HISTORY_DAYS {
            history.push_day(office_day(100));
        }
        assert_eq!(history.days(), HISTORY_DAYS);
        assert_eq!(history.day_average(), 1200);
    }

    #[test]
    fn test_average_at_interpolates_within_hour() {
        let mut history = StepHistory::new();
        history.push_day(office_day(600));
        // Before walking starts
        assert_eq!(history.average_at(7 * 60), 0);
        // Half way through the first walking hour (08:29 is the 30th minute)
        assert_eq!(history.average_at(8 * 60 + 29), 300);
        // End of the first walking hour
        assert_eq!(history.average_at(8 * 60 + 59), 600);
        // End of day
        assert_eq!(history.average_at(MINUTES_PER_DAY - 1), 7200);
    }

    #[test]
    fn test_average_at_clamps_minute() {
        let mut history = StepHistory::new();
        history.push_day(office_day(100));
        assert_eq!(history.average_at(MINUTES_PER_DAY * 3), 1200);
    }

    #[test]
    fn test_curve_is_forced_monotonic() {
        let mut hourly = [0u32; HOURS];
        hourly[3] = 500;
        hourly[4] = 200;
        let curve = DayCurve::from_hourly(hourly);
        assert_eq!(curve.at_minute(4 * 60 + 59), 500);
        assert_eq!(curve.total(), 500);
    }

    #[test]
    fn test_record_sets_update_flag_once() {
        let mut history = StepHistory::new();
        history.record(9 * 60, 1200);
        assert!(history.take_update());
        assert!(!history.take_update(), "Flag should clear after read");

        history.record(9 * 60 + 1, 1200);
        assert!(!history.take_update(), "Unchanged count is not new data");

        history.record(9 * 60 + 2, 1250);
        assert!(history.take_update());
        assert_eq!(history.current_steps(), 1250);
    }

    #[test]
    fn test_record_never_decreases() {
        let mut history = StepHistory::new();
        history.record(600, 3000);
        history.record(601, 2000);
        assert_eq!(history.current_steps(), 3000);
    }

    #[test]
    fn test_roll_day_archives_and_resets() {
        let mut history = StepHistory::new();
        history.record(8 * 60, 1000);
        history.record(12 * 60, 4000);
        history.roll_day();

        assert_eq!(history.days(), 1);
        assert_eq!(history.day_average(), 4000);
        assert_eq!(history.current_steps(), 0);
        // Hours 9-11 were skipped and carry the 08:00 total
        assert_eq!(history.average_at(10 * 60 + 59), 1000);
        assert_eq!(history.average_at(12 * 60 + 59), 4000);
    }

    #[test]
    fn test_current_average_follows_last_record() {
        let mut history = StepHistory::new();
        history.push_day(office_day(1000));
        history.record(10 * 60 + 59, 1500);
        assert_eq!(history.current_average(), 3000);
        assert_eq!(history.sample().day_average, 12_000);
    }
}

//! Simulated health service.
//!
//! Generates a plausible walking pattern minute by minute and feeds it into a
//! [`StepHistory`], which supplies the averages the face reads.

use chrono::NaiveDateTime;
use stepring_common::clock::minute_of_day;
use stepring_common::health::{DayCurve, HISTORY_DAYS, MINUTES_PER_DAY};
use stepring_common::{HealthProvider, StepHistory, TimeUnits};

/// Steps per minute while commuting on foot.
const COMMUTE_RATE: f32 = 95.0;

/// Steps per minute during the lunch walk.
const LUNCH_RATE: f32 = 70.0;

/// Awake-hours background pottering, min and max steps per minute.
const IDLE_RATE_MIN: f32 = 0.0;
const IDLE_RATE_MAX: f32 = 14.0;

/// Day-to-day variation of the whole pattern.
const DAY_FACTOR_MIN: f32 = 0.7;
const DAY_FACTOR_MAX: f32 = 1.3;

/// Oscillate between `min` and `max`.
fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Activity multiplier for the `day_index`-th simulated day.
pub fn day_factor(day_index: u32) -> f32 { fake_signal(day_index as f32, DAY_FACTOR_MIN, DAY_FACTOR_MAX, 1.3) }

/// Steps walked during `minute` of the day.
pub fn walking_rate(
    minute: u32,
    day_factor: f32,
) -> f32 {
    let hour_minute = |h: u32, m: u32| h * 60 + m;
    let rate = match minute {
        m if m < hour_minute(7, 0) || m >= hour_minute(23, 0) => 0.0,
        m if (hour_minute(8, 0)..hour_minute(8, 40)).contains(&m) => COMMUTE_RATE,
        m if (hour_minute(12, 10)..hour_minute(12, 45)).contains(&m) => LUNCH_RATE,
        m if (hour_minute(17, 30)..hour_minute(18, 10)).contains(&m) => COMMUTE_RATE,
        m => fake_signal(m as f32, IDLE_RATE_MIN, IDLE_RATE_MAX, 0.37),
    };
    rate * day_factor
}

/// A full day of the walking pattern as an hourly curve.
fn simulated_day(factor: f32) -> DayCurve {
    let mut hourly = [0u32; 24];
    let mut total = 0.0f32;
    for minute in 0..MINUTES_PER_DAY {
        total += walking_rate(minute, factor);
        hourly[(minute / 60) as usize] = total as u32;
    }
    DayCurve::from_hourly(hourly)
}

/// Health provider driven by the simulated clock.
pub struct SimulatedHealth {
    history: StepHistory,
    steps_today: f32,
    day_index: u32,
}

impl SimulatedHealth {
    /// Provider with a full week of history and today replayed up to `now`.
    pub fn seeded(now: &NaiveDateTime) -> Self {
        let mut history = StepHistory::new();
        for day in 0..HISTORY_DAYS as u32 {
            history.push_day(simulated_day(day_factor(day)));
        }

        let mut health = Self {
            history,
            steps_today: 0.0,
            day_index: HISTORY_DAYS as u32,
        };
        for minute in 0..=minute_of_day(now) {
            health.walk(minute);
        }
        log::info!(
            "Seeded {} days of history, day average {} steps",
            health.history.days(),
            health.history.day_average()
        );
        health
    }

    /// Advance to `now`, rolling the day over when `changed` contains `DAY`.
    pub fn advance(
        &mut self,
        now: &NaiveDateTime,
        changed: TimeUnits,
    ) {
        if changed.contains(TimeUnits::DAY) {
            self.history.roll_day();
            self.steps_today = 0.0;
            self.day_index += 1;
        }
        self.walk(minute_of_day(now));
    }

    fn walk(
        &mut self,
        minute: u32,
    ) {
        self.steps_today += walking_rate(minute, day_factor(self.day_index));
        self.history.record(minute, self.steps_today as u32);
    }

    #[inline]
    pub const fn history(&self) -> &StepHistory { &self.history }
}

impl HealthProvider for SimulatedHealth {
    fn current_steps(&self) -> u32 { self.history.current_steps() }

    fn day_average(&self) -> u32 { self.history.day_average() }

    fn current_average(&self) -> u32 { self.history.current_average() }

    fn take_update(&mut self) -> bool { self.history.take_update() }
}

// =============================================================================
// Tests
// =============================================================================

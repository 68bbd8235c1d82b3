//! Clock text and tick change masks.
//!
//! The host hands the face a local [`NaiveDateTime`] on every tick. This module
//! turns it into label text and works out which calendar units changed since the
//! previous tick.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use heapless::String;

use crate::text::push_u32_padded;

/// Capacity of the time label (`HH:MM`).
pub const TIME_TEXT_LEN: usize = 8;

/// Capacity of the weekday label.
pub const WEEKDAY_TEXT_LEN: usize = 12;

/// Capacity of the date label (`YYYY-MM-DD`).
pub const DATE_TEXT_LEN: usize = 12;

// =============================================================================
// Time Units
// =============================================================================

/// Set of calendar units that changed between two ticks.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);
    pub const ALL: Self = Self(0b11_1111);

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Units that rolled over going from `prev` to `now`.
    ///
    /// A unit counts as changed when it or any larger unit differs, so a new day
    /// at the same hour still reports `HOUR`.
    pub fn changed_between(
        prev: &NaiveDateTime,
        now: &NaiveDateTime,
    ) -> Self {
        let mut units = Self::NONE;
        if prev.year() != now.year() {
            units = units.union(Self::YEAR);
        }
        if units.contains(Self::YEAR) || prev.month() != now.month() {
            units = units.union(Self::MONTH);
        }
        if prev.date() != now.date() {
            units = units.union(Self::DAY);
        }
        if units.contains(Self::DAY) || prev.hour() != now.hour() {
            units = units.union(Self::HOUR);
        }
        if units.contains(Self::HOUR) || prev.minute() != now.minute() {
            units = units.union(Self::MINUTE);
        }
        if units.contains(Self::MINUTE) || prev.second() != now.second() {
            units = units.union(Self::SECOND);
        }
        units
    }
}

impl core::ops::BitOr for TimeUnits {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        self.union(rhs)
    }
}

// =============================================================================
// Clock Style
// =============================================================================

/// Hour format for the time label.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ClockStyle {
    /// `HH:MM`, 00-23.
    #[default]
    TwentyFourHour,
    /// `hh:MM`, 01-12.
    TwelveHour,
}

impl ClockStyle {
    pub const fn from_24h(is_24h: bool) -> Self { if is_24h { Self::TwentyFourHour } else { Self::TwelveHour } }
}

// =============================================================================
// Formatting
// =============================================================================

/// Time label text.
pub fn format_time(
    now: &NaiveDateTime,
    style: ClockStyle,
) -> String<TIME_TEXT_LEN> {
    let hour = match style {
        ClockStyle::TwentyFourHour => now.hour(),
        ClockStyle::TwelveHour => match now.hour() % 12 {
            0 => 12,
            h => h,
        },
    };

    let mut s = String::new();
    push_u32_padded(&mut s, hour, 2);
    s.push(':').ok();
    push_u32_padded(&mut s, now.minute(), 2);
    s
}

/// Full English weekday name.
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday label text.
pub fn format_weekday(date: &NaiveDate) -> String<WEEKDAY_TEXT_LEN> {
    let mut s = String::new();
    s.push_str(weekday_name(date.weekday())).ok();
    s
}

/// Date label text, ISO `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String<DATE_TEXT_LEN> {
    let mut s = String::new();
    // Years outside 0..=9999 are not representable on the label
    push_u32_padded(&mut s, date.year().clamp(0, 9999) as u32, 4);
    s.push('-').ok();
    push_u32_padded(&mut s, date.month(), 2);
    s.push('-').ok();
    push_u32_padded(&mut s, date.day(), 2);
    s
}

/// Minute of the day, 0-1439.
#[inline]
pub fn minute_of_day(now: &NaiveDateTime) -> u32 { now.hour() * 60 + now.minute() }

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(
        y: i32,
        mo: u32,
        d: u32,
        h: u32,
        mi: u32,
        s: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_time_24h() {
        assert_eq!(format_time(&at(2026, 10, 19, 0, 5, 0), ClockStyle::TwentyFourHour).as_str(), "00:05");
        assert_eq!(format_time(&at(2026, 10, 19, 23, 59, 0), ClockStyle::TwentyFourHour).as_str(), "23:59");
    }

    #[test]
    fn test_time_12h() {
        assert_eq!(format_time(&at(2026, 10, 19, 0, 5, 0), ClockStyle::TwelveHour).as_str(), "12:05");
        assert_eq!(format_time(&at(2026, 10, 19, 9, 30, 0), ClockStyle::TwelveHour).as_str(), "09:30");
        assert_eq!(format_time(&at(2026, 10, 19, 12, 0, 0), ClockStyle::TwelveHour).as_str(), "12:00");
        assert_eq!(format_time(&at(2026, 10, 19, 13, 45, 0), ClockStyle::TwelveHour).as_str(), "01:45");
    }

    #[test]
    fn test_weekday_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_weekday(&date).as_str(), "Monday");
        assert_eq!(format_date(&date).as_str(), "2026-10-19");

        let date = NaiveDate::from_ymd_opt(2024, 2, 7).unwrap();
        assert_eq!(format_weekday(&date).as_str(), "Wednesday");
        assert_eq!(format_date(&date).as_str(), "2024-02-07");
    }

    #[test]
    fn test_minute_change_only() {
        let units = TimeUnits::changed_between(&at(2026, 10, 19, 8, 0, 0), &at(2026, 10, 19, 8, 1, 0));
        assert!(units.contains(TimeUnits::MINUTE));
        assert!(units.contains(TimeUnits::SECOND));
        assert!(!units.contains(TimeUnits::HOUR));
        assert!(!units.contains(TimeUnits::DAY));
    }

    #[test]
    fn test_midnight_sets_day() {
        let units = TimeUnits::changed_between(&at(2026, 10, 19, 23, 59, 0), &at(2026, 10, 20, 0, 0, 0));
        assert!(units.contains(TimeUnits::DAY | TimeUnits::HOUR | TimeUnits::MINUTE));
        assert!(!units.contains(TimeUnits::MONTH));
    }

    #[test]
    fn test_same_clock_next_day_sets_day() {
        let units = TimeUnits::changed_between(&at(2026, 10, 19, 8, 0, 0), &at(2026, 10, 20, 8, 0, 0));
        assert!(units.contains(TimeUnits::DAY));
        assert!(units.contains(TimeUnits::MINUTE));
    }

    #[test]
    fn test_new_year_sets_everything() {
        let units = TimeUnits::changed_between(&at(2026, 12, 31, 23, 59, 59), &at(2027, 1, 1, 0, 0, 0));
        assert_eq!(units, TimeUnits::ALL);
    }

    #[test]
    fn test_no_change() {
        let t = at(2026, 10, 19, 8, 0, 0);
        assert!(TimeUnits::changed_between(&t, &t).is_empty());
    }

    #[test]
    fn test_minute_of_day() {
        assert_eq!(minute_of_day(&at(2026, 10, 19, 0, 0, 0)), 0);
        assert_eq!(minute_of_day(&at(2026, 10, 19, 23, 59, 0)), 1439);
    }
}

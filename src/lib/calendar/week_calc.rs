use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

use crate::week_sync::models::WeekKey;

/// A Monday–Friday span of one report week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Every day from `start` to `end`, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let len = (self.end - self.start).num_days().max(-1) + 1;
        (0..len).map(move |offset| shift_days(start, offset))
    }

    pub fn start_to_string(&self) -> String {
        format_german(self.start)
    }

    pub fn end_to_string(&self) -> String {
        format_german(self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_to_string(), self.end_to_string())
    }
}

/// Renders a date the way German report sheets print it, e.g. `30.12.2024`.
pub fn format_german(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `date` moved by `days`, saturating at the ends of chrono's date range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let saturated = if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    };
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(saturated)
}

/// Monday of the week that contains `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Monday of week 1 of `year`, i.e. the Monday on or before January 4th.
/// `week_number_of` and `date_range_of_week` both anchor here.
pub fn monday_of_week_one(year: i32) -> NaiveDate {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    });
    monday_of(jan4)
}

/// The week-numbering year of `date`: the calendar year of its week's Thursday.
/// Differs from `date.year()` for late-December days in week 1 and
/// early-January days in week 52/53.
pub fn week_year_of(date: NaiveDate) -> i32 {
    shift_days(monday_of(date), 3).year()
}

/// ISO-style week number of `date` (Monday-first, week 1 holds January 4th).
pub fn week_number_of(date: NaiveDate) -> u32 {
    let weeks = (monday_of(date) - monday_of_week_one(week_year_of(date)))
        .num_days()
        .div_euclid(7);
    u32::try_from(weeks + 1).unwrap_or(1)
}

/// The (week-numbering year, week) pair that contains `date`.
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    WeekKey::new(week_year_of(date), week_number_of(date))
}

/// Monday through Friday of `week` in `year`.
///
/// Out-of-range weeks are not rejected: week 0 is the week before week 1 and
/// week 60 lies in the following year, by plain date arithmetic.
pub fn date_range_of_week(year: i32, week: u32) -> DateRange {
    let monday = shift_days(monday_of_week_one(year), (i64::from(week) - 1) * 7);
    DateRange {
        start: monday,
        end: shift_days(monday, 4),
    }
}

/// Weeks around `today`: `before` preceding weeks (oldest first), the week of
/// `today`, then `after` following weeks. Steps by whole weeks of calendar
/// time, so the list runs across year boundaries.
pub fn weeks_around(today: NaiveDate, before: u32, after: u32) -> Vec<WeekKey> {
    let before = i64::from(before);
    let after = i64::from(after);
    (-before..=after)
        .map(|offset| week_key_of(shift_days(today, offset * 7)))
        .collect()
}

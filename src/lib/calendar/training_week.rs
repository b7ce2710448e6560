use chrono::NaiveDate;

use super::week_calc::{date_range_of_week, week_key_of};

/// Number of the report within the apprenticeship for calendar week
/// (`current_year`, `current_week`).
///
/// Without a start date the report number follows the calendar week.
/// Weeks before the start week are clamped to report 1.
pub fn training_week_number(
    start_date: Option<NaiveDate>,
    current_year: i32,
    current_week: u32,
) -> u32 {
    let Some(start_date) = start_date else {
        return current_week;
    };

    let current_monday = date_range_of_week(current_year, current_week).start;
    let start_key = week_key_of(start_date);
    let start_monday = date_range_of_week(start_key.year, start_key.week).start;

    let weeks_diff = (current_monday - start_monday).num_days().div_euclid(7);
    if weeks_diff < 0 {
        1
    } else {
        u32::try_from(weeks_diff + 1).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn no_start_date_follows_calendar() {
        for week in 1..=53 {
            assert_eq!(training_week_number(None, 2025, week), week);
        }
    }

    #[test]
    fn start_week_is_report_one() {
        /* 2024-08-01 is a Thursday in week 31 */
        assert_eq!(training_week_number(date(2024, 8, 1), 2024, 31), 1);
        assert_eq!(training_week_number(date(2024, 8, 1), 2024, 32), 2);
    }

    #[test]
    fn counts_across_year_boundary() {
        /* 2024 has 52 weeks: week 31..=52 is 22 reports, 2025 week 1 is the 23rd */
        assert_eq!(training_week_number(date(2024, 8, 1), 2025, 1), 23);
        assert_eq!(training_week_number(date(2024, 8, 1), 2025, 10), 32);
    }

    #[test]
    fn start_in_late_december_uses_week_year() {
        /* 2024-12-31 is already in week 1 of 2025 */
        assert_eq!(training_week_number(date(2024, 12, 31), 2025, 1), 1);
        assert_eq!(training_week_number(date(2024, 12, 31), 2024, 52), 1);
    }

    #[test]
    fn weeks_before_start_clamp_to_one() {
        assert_eq!(training_week_number(date(2024, 8, 1), 2024, 1), 1);
        assert_eq!(training_week_number(date(2024, 8, 1), 2019, 40), 1);
    }

    #[test]
    fn never_decreases_and_stays_positive() {
        let start = date(2023, 9, 1);
        let mut previous = 0;
        for year in 2022..=2027 {
            for week in 1..=52 {
                let number = training_week_number(start, year, week);
                assert!(number >= 1);
                assert!(number >= previous);
                previous = number;
            }
        }
    }
}

//! Date grid utilities.

use crate::calendar::clock::{Clock, SystemClock};
use crate::model::date_key::DateKey;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Cells per month grid (6 weeks x 7 days).
pub const GRID_CELLS: usize = 42;

/// Column headers in grid order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Returns the 42 dates shown for the month containing `reference`.
///
/// The grid starts with the tail of the previous month so that the first
/// cell is a Sunday, lists every day of the month in order, then fills with
/// the head of the next month until 42 cells.
///
/// Returns `None` when the grid would leave chrono's representable range.
pub fn days_in_month(reference: NaiveDate) -> Option<[NaiveDate; GRID_CELLS]> {
    let first = first_of_month(reference);
    let leading = first.weekday().num_days_from_sunday();
    let grid_start = first.checked_sub_days(Days::new(u64::from(leading)))?;
    let days: Vec<NaiveDate> = grid_start.iter_days().take(GRID_CELLS).collect();
    days.try_into().ok()
}

/// First calendar day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First day of the month `delta` months away from `reference`.
///
/// Returns `None` when the target month is not representable.
pub fn shift_month(reference: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let month_index = reference.year() * 12 + reference.month0() as i32 + delta;
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// True iff both dates are present and share year, month and day.
pub fn is_same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
        }
        _ => false,
    }
}

/// Returns whether `date` is the host's current local date.
pub fn is_today(date: NaiveDate) -> bool {
    SystemClock.is_today(date)
}

/// Returns whether `date` falls in the month containing `reference`.
pub fn is_in_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Canonical store key for `date`.
pub fn date_key(date: NaiveDate) -> DateKey {
    DateKey::from(date)
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, first_of_month, is_weekend, shift_month, WEEKDAY_LABELS};
    use chrono::{Datelike, NaiveDate, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_of_month_keeps_year_and_month() {
        assert_eq!(first_of_month(d(2024, 2, 29)), d(2024, 2, 1));
        assert_eq!(first_of_month(d(2024, 3, 1)), d(2024, 3, 1));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(d(2024, 1, 31), -1), Some(d(2023, 12, 1)));
        assert_eq!(shift_month(d(2024, 12, 15), 1), Some(d(2025, 1, 1)));
        assert_eq!(shift_month(d(2024, 5, 31), 0), Some(d(2024, 5, 1)));
        assert_eq!(shift_month(d(2024, 5, 10), -17), Some(d(2022, 12, 1)));
    }

    #[test]
    fn grid_past_last_representable_date_is_none() {
        assert_eq!(days_in_month(NaiveDate::MAX), None);
        assert_eq!(days_in_month(first_of_month(NaiveDate::MAX)), None);
        assert!(days_in_month(d(9999, 12, 31)).is_some());
    }

    #[test]
    fn weekend_is_saturday_and_sunday() {
        assert!(is_weekend(d(2024, 6, 1)));
        assert!(is_weekend(d(2024, 6, 2)));
        assert!(!is_weekend(d(2024, 6, 3)));
    }

    #[test]
    fn labels_start_on_sunday() {
        assert_eq!(WEEKDAY_LABELS[0], "Sun");
        assert_eq!(d(2024, 6, 2).weekday(), Weekday::Sun);
    }
}

use chrono::{Datelike, NaiveDate, Weekday};
use daygrid_core::{
    date_key, days_in_month, is_in_month, is_same_day, is_today, shift_month, Clock, FixedClock,
    SystemClock, GRID_CELLS,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn month_len(year: i32, month: u32) -> u32 {
    let next = shift_month(d(year, month, 1), 1).unwrap();
    next.pred_opt().unwrap().day()
}

#[test]
fn every_month_over_several_years_yields_full_weeks() {
    for year in 1999..=2030 {
        for month in 1..=12 {
            let reference = d(year, month, 15);
            let grid = days_in_month(reference).unwrap();

            assert_eq!(grid.len(), GRID_CELLS);
            assert_eq!(grid[0].weekday(), Weekday::Sun, "{year}-{month}");
            assert_eq!(grid[GRID_CELLS - 1].weekday(), Weekday::Sat, "{year}-{month}");
            for pair in grid.windows(2) {
                assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
            }

            let in_month: Vec<u32> = grid
                .iter()
                .filter(|date| is_in_month(**date, reference))
                .map(|date| date.day())
                .collect();
            let expected: Vec<u32> = (1..=month_len(year, month)).collect();
            assert_eq!(in_month, expected, "{year}-{month}");
        }
    }
}

#[test]
fn month_starting_on_sunday_has_no_leading_days() {
    // September 2024 starts on a Sunday.
    let grid = days_in_month(d(2024, 9, 30)).unwrap();
    assert_eq!(grid[0], d(2024, 9, 1));
    assert_eq!(grid[GRID_CELLS - 1], d(2024, 10, 12));
}

#[test]
fn february_in_leap_and_common_years() {
    let leap = days_in_month(d(2024, 2, 1)).unwrap();
    assert_eq!(leap[0], d(2024, 1, 28));
    assert!(leap.contains(&d(2024, 2, 29)));

    // February 2015 starts on Sunday and spans exactly four weeks.
    let common = days_in_month(d(2015, 2, 10)).unwrap();
    assert_eq!(common[0], d(2015, 2, 1));
    assert_eq!(common[27], d(2015, 2, 28));
    assert_eq!(common[28], d(2015, 3, 1));
    assert_eq!(common[GRID_CELLS - 1], d(2015, 3, 14));
}

#[test]
fn reference_day_within_month_does_not_change_grid() {
    assert_eq!(days_in_month(d(2023, 7, 1)), days_in_month(d(2023, 7, 31)));
}

#[test]
fn is_same_day_requires_both_dates() {
    let date = d(2024, 1, 1);
    assert!(is_same_day(Some(date), Some(date)));
    assert!(!is_same_day(None, Some(date)));
    assert!(!is_same_day(Some(date), None));
    assert!(!is_same_day(None, None));
    assert!(!is_same_day(Some(date), Some(d(2025, 1, 1))));
}

#[test]
fn is_today_tracks_the_clock() {
    let clock = FixedClock(d(2024, 12, 31));
    assert!(clock.is_today(d(2024, 12, 31)));
    assert!(!clock.is_today(d(2025, 1, 1)));

    assert!(is_today(SystemClock.today()));
}

#[test]
fn date_key_is_zero_padded_and_locale_free() {
    assert_eq!(date_key(d(2024, 1, 5)).to_string(), "2024-01-05");
    assert_eq!(date_key(d(987, 11, 30)).to_string(), "0987-11-30");
}

//! Wall-clock access for "today" checks.

use crate::calendar::grid::is_same_day;
use chrono::{Local, NaiveDate};

/// Source of the current local date.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Returns whether `date` is the current local date at call time.
    fn is_today(&self, date: NaiveDate) -> bool {
        is_same_day(Some(date), Some(self.today()))
    }
}

/// Host local-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date, for tests and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

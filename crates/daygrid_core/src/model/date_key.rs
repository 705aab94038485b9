//! Canonical `YYYY-MM-DD` day key.
//!
//! The key is the join between grid cells and stored events, so it is derived
//! from the local calendar date only and never from a display locale.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const DATE_KEY_LEN: usize = 10;

/// Error returned when a string is not a canonical date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeyParseError {
    pub input: String,
}

impl Display for DateKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date key `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateKeyParseError {}

/// Calendar day used as the event store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from calendar components; `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a zero-padded `YYYY-MM-DD` string.
    ///
    /// Unpadded forms such as `2024-3-5` are rejected so that one day always
    /// maps to exactly one key.
    pub fn parse(input: &str) -> Result<Self, DateKeyParseError> {
        let trimmed = input.trim();
        let error = || DateKeyParseError {
            input: trimmed.to_string(),
        };
        if trimmed.len() != DATE_KEY_LEN {
            return Err(error());
        }
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| error())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::DateKey;
    use chrono::NaiveDate;

    #[test]
    fn display_is_zero_padded_year_month_day() {
        let key = DateKey::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn parse_round_trips_canonical_form() {
        let key = DateKey::parse("2023-12-31").unwrap();
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(key.to_string(), "2023-12-31");
    }

    #[test]
    fn parse_rejects_non_canonical_and_impossible_dates() {
        assert!(DateKey::parse("2024-3-5").is_err());
        assert!(DateKey::parse("2024-02-30").is_err());
        assert!(DateKey::parse("2024-15-03").is_err());
        assert!(DateKey::parse("03/05/2024").is_err());
        assert!(DateKey::parse("").is_err());
    }

    #[test]
    fn keys_order_chronologically() {
        let earlier = DateKey::parse("2024-01-31").unwrap();
        let later = DateKey::parse("2024-02-01").unwrap();
        assert!(earlier < later);
    }
}

//! Minute-precision local time of day.
//!
//! # Responsibility
//! - Parse and render `HH:MM` (24-hour) strings.
//! - Expose minutes-since-midnight for interval arithmetic.
//!
//! # Invariants
//! - Stored value is always in `0..MINUTES_PER_DAY`.
//! - Rendering is zero-padded, so `parse(display(t)) == t`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static TIME_OF_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid time-of-day regex")
});

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when a time-of-day string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Input was empty or whitespace only.
    Empty,
    /// Input does not look like `HH:MM`.
    InvalidFormat(String),
    /// Hour or minute component is out of range.
    OutOfRange { hours: u32, minutes: u32 },
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "time is empty; expected HH:MM"),
            Self::InvalidFormat(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::OutOfRange { hours, minutes } => {
                write!(f, "time {hours}:{minutes:02} is outside 00:00..23:59")
            }
        }
    }
}

impl Error for TimeParseError {}

/// Local time of day stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Local midnight (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// Builds a time from hour and minute components.
    pub fn from_hm(hours: u32, minutes: u32) -> Result<Self, TimeParseError> {
        if hours >= 24 || minutes >= 60 {
            return Err(TimeParseError::OutOfRange { hours, minutes });
        }
        // Both components are range-checked above, so the sum fits `u16`.
        Ok(Self((hours * 60 + minutes) as u16))
    }

    /// Builds a time from minutes since midnight.
    ///
    /// Returns `None` when `minutes` reaches the next day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Parses `H:MM`, `HH:MM` or `HH:MM:SS`; seconds are accepted and dropped.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let caps = TIME_OF_DAY_RE
            .captures(trimmed)
            .ok_or_else(|| TimeParseError::InvalidFormat(trimmed.to_string()))?;
        let component = |index: usize| -> Result<u32, TimeParseError> {
            caps.get(index)
                .map_or(Ok(0), |m| m.as_str().parse::<u32>())
                .map_err(|_| TimeParseError::InvalidFormat(trimmed.to_string()))
        };

        let hours = component(1)?;
        let minutes = component(2)?;
        if component(3)? >= 60 {
            return Err(TimeParseError::InvalidFormat(trimmed.to_string()));
        }
        Self::from_hm(hours, minutes)
    }

    /// Minutes elapsed since local midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeOfDay, TimeParseError};

    #[test]
    fn parse_converts_to_minutes_since_midnight() {
        assert_eq!(TimeOfDay::parse("00:00").unwrap().minutes(), 0);
        assert_eq!(TimeOfDay::parse("09:30").unwrap().minutes(), 570);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().minutes(), 1439);
    }

    #[test]
    fn parse_accepts_single_digit_hour_and_seconds() {
        assert_eq!(TimeOfDay::parse("9:05").unwrap().minutes(), 545);
        assert_eq!(TimeOfDay::parse(" 10:15:42 ").unwrap().minutes(), 615);
    }

    #[test]
    fn parse_rejects_malformed_and_out_of_range_values() {
        assert_eq!(TimeOfDay::parse("   "), Err(TimeParseError::Empty));
        assert!(matches!(
            TimeOfDay::parse("9am"),
            Err(TimeParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("10:00:75"),
            Err(TimeParseError::InvalidFormat(_))
        ));
        assert_eq!(
            TimeOfDay::parse("24:00"),
            Err(TimeParseError::OutOfRange {
                hours: 24,
                minutes: 0
            })
        );
        assert!(TimeOfDay::parse("12:60").is_err());
    }

    #[test]
    fn display_is_zero_padded() {
        let time = TimeOfDay::from_hm(7, 5).unwrap();
        assert_eq!(time.to_string(), "07:05");
        assert_eq!(TimeOfDay::parse(&time.to_string()).unwrap(), time);
    }

    #[test]
    fn from_minutes_rejects_next_day() {
        assert!(TimeOfDay::from_minutes(1439).is_some());
        assert!(TimeOfDay::from_minutes(1440).is_none());
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let time = TimeOfDay::from_hm(14, 0).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"14:00\"");
        let back: TimeOfDay = serde_json::from_str("\"8:45\"").unwrap();
        assert_eq!(back.minutes(), 525);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}

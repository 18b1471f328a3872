//! # multical
//!
//! A pluggable multi-calendar engine. Dates from different calendar
//! systems are converted to a single linear day count (the Julian Day
//! Number) and back, so they can be compared, sorted, and shifted no
//! matter which calendar produced them.
//!
//! ```
//! use multical::{CalendarDate, ConversionService};
//!
//! let service = ConversionService::default();
//! let new_year = CalendarDate::new(2081, 0, 1);
//! let days = service.to_universal_days("nepali", &new_year).unwrap();
//! let gregorian = service.from_universal_days("gregorian", days).unwrap();
//! assert_eq!(gregorian.to_string(), "2024-04-13");
//! ```
//!
//! Calendars implement the [`Calendar`] trait and are looked up by name in
//! a [`CalendarRegistry`]. Table-driven calendars such as the Nepali
//! Bikram Sambat calendar clamp years outside their table to the nearest
//! boundary year instead of failing.

mod calendar;
mod calendars;
mod config;
mod consts;
mod convert;
mod error;
mod nepali_data;
mod prelude;
mod registry;
mod table;
mod types;

pub use calendar::{Calendar, CalendarDescriptor};
pub use calendars::{Gregorian, Julian, TableCalendar};
pub use config::TableCalendarConfig;
pub use consts::*;
pub use convert::{ConversionService, Traced};
pub use error::CalendarError;
pub use registry::{CalendarRegistry, RegistryBuilder};
pub use table::{ClampedYear, MonthLengthTable, MonthLengths, YearClamp, clamp_year};
pub use types::{Month, Weekday};

use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

/// A date in some calendar: year, zero-based month, one-based day.
///
/// A date does not know its calendar. Whether the day fits its month is
/// checked by [`ConversionService`] against the calendar it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: Month,
    day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MONTHS_IN_YEAR)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day: {} (must be at least {})", "_0", MIN_DAY)]
    InvalidDay(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    pub const fn new(year: i32, month_index: u8, day: u8) -> Self {
        Self {
            year,
            month: Month::new(month_index),
            day,
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Converts to columns: (year, zero-based month index, day)
    pub const fn to_columns(&self) -> (i32, u8, u8) {
        (self.year, self.month.index(), self.day)
    }
}

impl From<(i32, u8, u8)> for CalendarDate {
    fn from((year, month_index, day): (i32, u8, u8)) -> Self {
        Self::new(year, month_index, day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            f.write_str("-")?;
        }
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.unsigned_abs(),
            self.month.number(),
            self.day
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD` with a one-based month; a leading `-` marks a
    /// year before zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = body.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} part(s)",
                parts.len()
            )));
        };

        let year = Self::parse_year(year)?;
        let month = Self::parse_u8(month)?;
        let day = Self::parse_u8(day)?;

        if month == 0 || usize::from(month) > MONTHS_IN_YEAR {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY {
            return Err(ParseError::InvalidDay(day));
        }

        let year = if negative { -year } else { year };
        Ok(Self::new(year, month - 1, day))
    }
}

impl CalendarDate {
    fn parse_year(s: &str) -> Result<i32, ParseError> {
        if s.starts_with(['+', '-']) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let date = CalendarDate::new(2081, 2, 5);
        assert_eq!(date.year(), 2081);
        assert_eq!(date.month().index(), 2);
        assert_eq!(date.day(), 5);
        assert_eq!(date.to_columns(), (2081, 2, 5));
        assert_eq!(CalendarDate::from((2081, 2, 5)), date);
    }

    #[test]
    fn test_display() {
        assert_eq!(CalendarDate::new(2081, 2, 5).to_string(), "2081-03-05");
        assert_eq!(CalendarDate::new(33, 11, 31).to_string(), "0033-12-31");
        assert_eq!(CalendarDate::new(-44, 2, 15).to_string(), "-0044-03-15");
    }

    #[test]
    fn test_parse() {
        let date = "2081-03-05".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::new(2081, 2, 5));

        let date = " 2081 - 12 - 30 ".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::new(2081, 11, 30));

        let date = "-0044-03-15".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::new(-44, 2, 15));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput)));
        assert!(matches!(
            "2081-13-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            "2081-00-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidMonth(0))
        ));
        assert!(matches!(
            "2081-01-00".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay(0))
        ));
        assert!(matches!(
            "2081-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2081-01-01-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "20X1-01-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "--2081-01-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = "2081-13-01".parse::<CalendarDate>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid month: 13 (must be 1-12)");
        let err = "".parse::<CalendarDate>().unwrap_err();
        assert_eq!(err.to_string(), "Empty date string");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = CalendarDate::new(2080, 11, 30);
        let b = CalendarDate::new(2081, 0, 1);
        let c = CalendarDate::new(2081, 0, 2);
        let d = CalendarDate::new(2081, 1, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_serde_string_format() {
        let date = CalendarDate::new(2081, 2, 5);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2081-03-05""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2081-13-05""#);
        assert!(result.is_err());
    }
}

use crate::consts::{DAYS_IN_WEEK, MONTHS_IN_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A month position within a calendar year.
///
/// The index is zero-based. Construction does not check it against
/// `MONTHS_IN_YEAR` because a month only becomes invalid relative to a
/// calendar; the conversion service rejects out-of-range indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Month {
    index: u8,
}

impl Month {
    /// Creates a month from its zero-based index
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self { index }
    }

    /// Returns the zero-based month index
    #[inline]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Returns the one-based month number used in text
    #[inline]
    pub const fn number(self) -> u16 {
        self.index as u16 + 1
    }

    /// Whether the index addresses one of the twelve months
    #[inline]
    pub const fn is_valid(self) -> bool {
        (self.index as usize) < MONTHS_IN_YEAR
    }
}

impl From<u8> for Month {
    fn from(index: u8) -> Self {
        Self::new(index)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.index
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Absolute day of the week, independent of any calendar's week start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Weekday of a universal (Julian Day Number) day count.
    ///
    /// JDN 0 fell on a Monday, so shifting by one puts Sunday at index 0.
    pub fn from_universal_days(days: i64) -> Self {
        let index = (days + 1).rem_euclid(DAYS_IN_WEEK);
        Self::from_index(index as u8)
    }

    /// Weekday for a Sunday-based index, wrapping values past Saturday
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// Sunday-based index (Sunday = 0)
    pub const fn index(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_index_and_number() {
        let month = Month::new(2);
        assert_eq!(month.index(), 2);
        assert_eq!(month.number(), 3);
        assert!(month.is_valid());
        assert!(!Month::new(12).is_valid());
    }

    #[test]
    fn test_month_ordering() {
        assert!(Month::new(0) < Month::new(11));
        assert_eq!(Month::new(4), Month::from(4));
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8);
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);
    }

    #[test]
    fn test_weekday_from_universal_days() {
        // 2000-01-01 was a Saturday
        assert_eq!(Weekday::from_universal_days(2_451_545), Weekday::Saturday);
        // JDN 0 was a Monday
        assert_eq!(Weekday::from_universal_days(0), Weekday::Monday);
        assert_eq!(Weekday::from_universal_days(-1), Weekday::Sunday);
    }

    #[test]
    fn test_weekday_index_wraps() {
        assert_eq!(Weekday::from_index(0), Weekday::Sunday);
        assert_eq!(Weekday::from_index(6), Weekday::Saturday);
        assert_eq!(Weekday::from_index(7), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.index(), 3);
    }

    #[test]
    fn test_weekday_serde() {
        let json = serde_json::to_string(&Weekday::Saturday).unwrap();
        assert_eq!(json, "\"Saturday\"");
        let parsed: Weekday = serde_json::from_str("\"Monday\"").unwrap();
        assert_eq!(parsed, Weekday::Monday);
        assert!(serde_json::from_str::<Weekday>("\"Caturday\"").is_err());
    }
}

use crate::{
    calendar::{Calendar, CalendarDescriptor},
    consts::{CENTURY_CYCLE, GREGORIAN, GREGORIAN_CYCLE, GREGORIAN_EPOCH_JDN, LEAP_YEAR_CYCLE},
    table::MonthLengths,
};

use super::{collect_leaps, solar_month_lengths};

/// The proleptic Gregorian calendar with astronomical year numbering
/// (year 0 exists and is a leap year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gregorian {
    descriptor: CalendarDescriptor,
}

impl Gregorian {
    pub fn new() -> Self {
        Self {
            descriptor: CalendarDescriptor::new(GREGORIAN, 1, 365, GREGORIAN_EPOCH_JDN, 21, 1),
        }
    }

    pub const fn is_leap_year(year: i32) -> bool {
        (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
    }

    /// Leap years in `1..=year` (negative count of `year+1..=0` for years below 1)
    fn leaps_through(year: i64) -> i64 {
        let cycle = |n: i32| i64::from(n);
        year.div_euclid(cycle(LEAP_YEAR_CYCLE)) - year.div_euclid(cycle(CENTURY_CYCLE))
            + year.div_euclid(cycle(GREGORIAN_CYCLE))
    }
}

impl Default for Gregorian {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for Gregorian {
    fn descriptor(&self) -> &CalendarDescriptor {
        &self.descriptor
    }

    fn month_lengths(&self, year: i32) -> MonthLengths {
        solar_month_lengths(Self::is_leap_year(year))
    }

    fn is_leap(&self, year: i32) -> bool {
        Self::is_leap_year(year)
    }

    fn leaps(&self, current_year: i32) -> Vec<i32> {
        collect_leaps(self.descriptor.start_year(), current_year, Self::is_leap_year)
    }

    fn leaps_length(&self, year: i32) -> i64 {
        let start = i64::from(self.descriptor.start_year());
        Self::leaps_through(i64::from(year) - 1) - Self::leaps_through(start - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarDate;

    #[test]
    fn test_is_leap_cases() {
        let cases = [
            (2020, true, "divisible by 4"),
            (2021, false, "not divisible by 4"),
            (1900, false, "century not divisible by 400"),
            (2100, false, "century not divisible by 400"),
            (2000, true, "divisible by 400"),
            (0, true, "year zero is divisible by 400"),
            (-4, true, "negative year divisible by 4"),
            (-100, false, "negative century"),
        ];
        let calendar = Gregorian::new();
        for (year, expected, description) in cases {
            assert_eq!(calendar.is_leap(year), expected, "Year {year} ({description})");
        }
    }

    #[test]
    fn test_month_lengths() {
        let calendar = Gregorian::new();
        assert_eq!(calendar.month_lengths(2023)[1], 28);
        assert_eq!(calendar.month_lengths(2024)[1], 29);
        assert_eq!(calendar.days_in_year(2023), 365);
        assert_eq!(calendar.days_in_year(2024), 366);
    }

    #[test]
    fn test_leaps_and_leaps_length_agree() {
        let calendar = Gregorian::new();
        let leaps = calendar.leaps(2024);
        assert_eq!(leaps.first(), Some(&4));
        assert_eq!(leaps.last(), Some(&2024));
        assert!(!leaps.contains(&1900));
        assert!(leaps.contains(&2000));
        // Leap days strictly before 2025 are exactly the listed leap years
        assert_eq!(calendar.leaps_length(2025), leaps.len() as i64);
        assert_eq!(calendar.leaps_length(1), 0);
        assert!(calendar.leaps(0).is_empty());
    }

    #[test]
    fn test_days_before_year() {
        let calendar = Gregorian::new();
        assert_eq!(calendar.days_before_year(1), 0);
        assert_eq!(calendar.days_before_year(2), 365);
        assert_eq!(calendar.days_before_year(5), 4 * 365);
        assert_eq!(calendar.days_before_year(6), 5 * 365 + 1);
        assert_eq!(calendar.days_before_year(101), 36_524);
        // Year 0 is a leap year, year -1 is not
        assert_eq!(calendar.days_before_year(0), -366);
        assert_eq!(calendar.days_before_year(-1), -366 - 365);
    }

    #[test]
    fn test_day_of_year_and_all_days() {
        let calendar = Gregorian::new();
        let date = CalendarDate::new(2024, 2, 1);
        assert_eq!(calendar.day_of_year(&date), 31 + 29 + 1);

        let first = CalendarDate::new(1, 0, 1);
        assert_eq!(calendar.all_days(&first), 1);
        let year_101 = CalendarDate::new(101, 0, 1);
        assert_eq!(calendar.all_days(&year_101), 36_525);
    }

    #[test]
    fn test_guess_year_seed() {
        let calendar = Gregorian::new();
        assert_eq!(calendar.guess_year(36_525, 1), 101);
        assert_eq!(calendar.guess_year(36_525, -1), 99);
        assert_eq!(calendar.guess_year(-400, -1), -3);
    }

    #[test]
    fn test_descriptor() {
        let calendar = Gregorian::default();
        let descriptor = calendar.descriptor();
        assert_eq!(descriptor.name(), "gregorian");
        assert_eq!(descriptor.start_year(), 1);
        assert_eq!(descriptor.year_length(), 365);
        assert_eq!(descriptor.epoch(), 1_721_426);
        assert_eq!(descriptor.week_start_day_index(), 1);
        assert_eq!(calendar.year_clamp(1_000_000), None);
    }
}

use crate::{
    calendar::{Calendar, CalendarDescriptor},
    consts::{JULIAN, JULIAN_EPOCH_JDN, LEAP_YEAR_CYCLE},
    table::MonthLengths,
};

use super::{collect_leaps, solar_month_lengths};

/// The proleptic Julian calendar: every fourth year is a leap year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Julian {
    descriptor: CalendarDescriptor,
}

impl Julian {
    pub fn new() -> Self {
        Self {
            descriptor: CalendarDescriptor::new(JULIAN, 1, 365, JULIAN_EPOCH_JDN, 21, 0),
        }
    }

    pub const fn is_leap_year(year: i32) -> bool {
        year.rem_euclid(LEAP_YEAR_CYCLE) == 0
    }
}

impl Default for Julian {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for Julian {
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
        let cycle = i64::from(LEAP_YEAR_CYCLE);
        let start = i64::from(self.descriptor.start_year());
        (i64::from(year) - 1).div_euclid(cycle) - (start - 1).div_euclid(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centuries_are_leap() {
        let calendar = Julian::new();
        assert!(calendar.is_leap(1900));
        assert!(calendar.is_leap(2000));
        assert!(calendar.is_leap(0));
        assert!(calendar.is_leap(-8));
        assert!(!calendar.is_leap(-1));
        assert_eq!(calendar.month_lengths(1900)[1], 29);
    }

    #[test]
    fn test_leaps_length() {
        let calendar = Julian::new();
        assert_eq!(calendar.leaps_length(1), 0);
        assert_eq!(calendar.leaps_length(5), 1);
        assert_eq!(calendar.leaps_length(2025), calendar.leaps(2024).len() as i64);
        assert_eq!(calendar.days_before_year(0), -366);
    }
}

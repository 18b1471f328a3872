//! The contract every calendar system implements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate,
    consts::{COMMON_YEAR_DAYS, YEAR_LENGTH_ESTIMATE},
    table::{MonthLengths, YearClamp},
};

/// Identity and fixed parameters of one calendar system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDescriptor {
    name: String,
    start_year: i32,
    year_length: u16,
    epoch: i64,
    century: u16,
    week_start_day_index: u8,
}

impl CalendarDescriptor {
    pub fn new(
        name: impl Into<String>,
        start_year: i32,
        year_length: u16,
        epoch: i64,
        century: u16,
        week_start_day_index: u8,
    ) -> Self {
        Self {
            name: name.into(),
            start_year,
            year_length,
            epoch,
            century,
            week_start_day_index,
        }
    }

    /// Registry identifier, e.g. `"nepali"`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First year of the calendar's own day count
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Nominal days per year
    pub const fn year_length(&self) -> u16 {
        self.year_length
    }

    /// Universal day count of day 1 of `start_year`
    pub const fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Informational grouping only
    pub const fn century(&self) -> u16 {
        self.century
    }

    /// Sunday-based index of the first day of the calendar's week
    pub const fn week_start_day_index(&self) -> u8 {
        self.week_start_day_index
    }
}

/// Uniform operations over a calendar system.
///
/// Implementations assume their inputs were validated by the conversion
/// service: month indices are below twelve and days fit their month.
/// Day counts returned here are calendar-local, with day 1 of
/// `start_year` counted as 1.
pub trait Calendar: fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &CalendarDescriptor;

    /// Month lengths for `year`. Table-driven calendars clamp out-of-range
    /// years to their nearest boundary row.
    fn month_lengths(&self, year: i32) -> MonthLengths;

    /// Whether `year` is a leap year; always false without a leap concept.
    fn is_leap(&self, year: i32) -> bool;

    /// Leap years from `start_year` up to and including `current_year`.
    fn leaps(&self, current_year: i32) -> Vec<i32>;

    /// Extra leap days in the years from `start_year` up to, but not
    /// including, `year`. Negative for years before `start_year`.
    fn leaps_length(&self, year: i32) -> i64;

    /// Reports when `year` lies outside the data backing the calendar.
    fn year_clamp(&self, _year: i32) -> Option<YearClamp> {
        None
    }

    fn days_in_year(&self, year: i32) -> i64 {
        self.month_lengths(year).iter().map(|&len| i64::from(len)).sum()
    }

    /// Days elapsed from the start of `start_year` to the start of `year`.
    fn days_before_year(&self, year: i32) -> i64 {
        let descriptor = self.descriptor();
        let elapsed_years = i64::from(year) - i64::from(descriptor.start_year());
        i64::from(descriptor.year_length()) * elapsed_years + self.leaps_length(year)
    }

    /// Days of full months before the date's month, plus its day.
    fn day_of_year(&self, date: &CalendarDate) -> u16 {
        let preceding: u16 = self
            .month_lengths(date.year())
            .iter()
            .take(usize::from(date.month().index()))
            .map(|&len| u16::from(len))
            .sum();
        preceding + u16::from(date.day())
    }

    /// Calendar-local ordinal day of `date`.
    fn all_days(&self, date: &CalendarDate) -> i64 {
        self.days_before_year(date.year()) + i64::from(self.day_of_year(date))
    }

    /// Rough count of years spanned by `days`, used to seed the year search.
    ///
    /// Divides by the nominal year length, with the solar mean standing in
    /// for 365. The sign of `current_year` gives the direction: positive
    /// moves forward from the epoch (+1), anything else backward (-1).
    fn guess_year(&self, days: i64, current_year: i32) -> i64 {
        let year_length = match i64::from(self.descriptor().year_length()) {
            0 | COMMON_YEAR_DAYS => YEAR_LENGTH_ESTIMATE,
            other => other as f64,
        };
        let estimate = (days as f64 / year_length).floor() as i64;
        if current_year > 0 {
            estimate + 1
        } else {
            estimate - 1
        }
    }
}

use crate::{
    calendar::{Calendar, CalendarDescriptor},
    consts::{NEPALI, NEPALI_EPOCH_JDN},
    nepali_data::{NEPALI_MIN_YEAR, NEPALI_MONTH_DAYS},
    table::{MonthLengthTable, MonthLengths, YearClamp},
};

/// A calendar whose month lengths are looked up per year.
///
/// Such calendars have no leap rule: every year's length comes from the
/// table, and years beyond the table reuse the nearest boundary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCalendar {
    descriptor: CalendarDescriptor,
    table: MonthLengthTable,
}

impl TableCalendar {
    /// Creates a table-driven calendar whose day count starts at the
    /// table's first year.
    pub fn new(
        name: impl Into<String>,
        year_length: u16,
        epoch: i64,
        century: u16,
        week_start_day_index: u8,
        table: MonthLengthTable,
    ) -> Self {
        let descriptor = CalendarDescriptor::new(
            name,
            table.min_year(),
            year_length,
            epoch,
            century,
            week_start_day_index,
        );
        Self { descriptor, table }
    }

    /// The Nepali Bikram Sambat calendar, tabulated for 1970-2100 BS.
    pub fn nepali() -> Self {
        let table = MonthLengthTable::from_trusted(NEPALI_MIN_YEAR, NEPALI_MONTH_DAYS.to_vec());
        Self::new(NEPALI, 365, NEPALI_EPOCH_JDN, 21, 0, table)
    }

    pub const fn table(&self) -> &MonthLengthTable {
        &self.table
    }
}

impl Calendar for TableCalendar {
    fn descriptor(&self) -> &CalendarDescriptor {
        &self.descriptor
    }

    fn month_lengths(&self, year: i32) -> MonthLengths {
        self.table.row(year)
    }

    fn is_leap(&self, _year: i32) -> bool {
        false
    }

    fn leaps(&self, _current_year: i32) -> Vec<i32> {
        Vec::new()
    }

    fn leaps_length(&self, _year: i32) -> i64 {
        0
    }

    fn year_clamp(&self, year: i32) -> Option<YearClamp> {
        self.table.clamp(year).clamp
    }

    fn days_in_year(&self, year: i32) -> i64 {
        self.table.year_total(year)
    }

    fn days_before_year(&self, year: i32) -> i64 {
        self.table.days_before(year)
    }
}

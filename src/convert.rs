//! Conversion between calendar dates and the universal day count.
//!
//! The universal day count is the Julian Day Number. A calendar's epoch is
//! the universal count of day 1 of its start year, so a date maps to
//! `epoch + all_days(date) - 1`. The inverse seeds a year from the day
//! count and then corrects it by whole years until the count falls inside
//! that year; table-driven calendars have no closed-form inverse.

use crate::{
    CalendarDate, CalendarError, CalendarRegistry,
    calendar::Calendar,
    consts::{DAYS_IN_WEEK, MIN_DAY, MONTHS_IN_YEAR},
    table::YearClamp,
    types::Weekday,
};

/// A conversion result together with the boundary clamp, if any, that was
/// applied to the date's year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Traced<T> {
    pub value: T,
    pub clamp: Option<YearClamp>,
}

/// Converts dates through the calendars of a registry.
#[derive(Debug, Clone, Copy)]
pub struct ConversionService<'r> {
    registry: &'r CalendarRegistry,
}

impl Default for ConversionService<'static> {
    fn default() -> Self {
        Self::new(CalendarRegistry::global())
    }
}

impl<'r> ConversionService<'r> {
    pub const fn new(registry: &'r CalendarRegistry) -> Self {
        Self { registry }
    }

    pub const fn registry(&self) -> &'r CalendarRegistry {
        self.registry
    }

    /// Universal day count of `date` in calendar `name`.
    ///
    /// # Errors
    /// `UnknownCalendar` if `name` is not registered; `InvalidDate` if the
    /// month index is not below twelve or the day does not fit the month.
    pub fn to_universal_days(&self, name: &str, date: &CalendarDate) -> Result<i64, CalendarError> {
        self.to_universal_days_traced(name, date).map(|traced| traced.value)
    }

    /// Like [`Self::to_universal_days`], also reporting a year clamp.
    ///
    /// # Errors
    /// Same as [`Self::to_universal_days`].
    pub fn to_universal_days_traced(
        &self,
        name: &str,
        date: &CalendarDate,
    ) -> Result<Traced<i64>, CalendarError> {
        let calendar = self.registry.get(name)?;
        validate(calendar, date)?;
        let clamp = observe_clamp(calendar, date.year());
        Ok(Traced {
            value: date_to_days(calendar, date),
            clamp,
        })
    }

    /// Date in calendar `name` for a universal day count.
    ///
    /// # Errors
    /// `UnknownCalendar` if `name` is not registered; `DayCountOutOfRange`
    /// if the day count lies beyond any `i32` year of the calendar.
    pub fn from_universal_days(
        &self,
        name: &str,
        days: i64,
    ) -> Result<CalendarDate, CalendarError> {
        self.from_universal_days_traced(name, days)
            .map(|traced| traced.value)
    }

    /// Like [`Self::from_universal_days`], also reporting a year clamp.
    ///
    /// # Errors
    /// Same as [`Self::from_universal_days`].
    pub fn from_universal_days_traced(
        &self,
        name: &str,
        days: i64,
    ) -> Result<Traced<CalendarDate>, CalendarError> {
        let calendar = self.registry.get(name)?;
        let date = days_to_date(calendar, days)?;
        let clamp = observe_clamp(calendar, date.year());
        Ok(Traced { value: date, clamp })
    }

    /// Re-expresses `date` from calendar `from` in calendar `to`.
    ///
    /// # Errors
    /// Any error of the two underlying conversions.
    pub fn convert(
        &self,
        from: &str,
        to: &str,
        date: &CalendarDate,
    ) -> Result<CalendarDate, CalendarError> {
        let days = self.to_universal_days(from, date)?;
        self.from_universal_days(to, days)
    }

    /// The date `delta` days after `date` (before, if negative).
    ///
    /// # Errors
    /// Any conversion error, or `DayCountOutOfRange` if the shift overflows.
    pub fn add_days(
        &self,
        name: &str,
        date: &CalendarDate,
        delta: i64,
    ) -> Result<CalendarDate, CalendarError> {
        let days = self.to_universal_days(name, date)?;
        let shifted = days
            .checked_add(delta)
            .ok_or(CalendarError::DayCountOutOfRange { days })?;
        self.from_universal_days(name, shifted)
    }

    /// Signed number of days from `a` to `b`, each in its own calendar.
    ///
    /// # Errors
    /// Any error of converting either date.
    pub fn days_between(
        &self,
        a_calendar: &str,
        a: &CalendarDate,
        b_calendar: &str,
        b: &CalendarDate,
    ) -> Result<i64, CalendarError> {
        let start = self.to_universal_days(a_calendar, a)?;
        let end = self.to_universal_days(b_calendar, b)?;
        Ok(end - start)
    }

    /// Absolute day of the week of `date`.
    ///
    /// # Errors
    /// Same as [`Self::to_universal_days`].
    pub fn weekday(&self, name: &str, date: &CalendarDate) -> Result<Weekday, CalendarError> {
        self.to_universal_days(name, date)
            .map(Weekday::from_universal_days)
    }

    /// Position of `date` within its calendar's week, 0 being the day the
    /// calendar's week starts on.
    ///
    /// # Errors
    /// Same as [`Self::to_universal_days`].
    pub fn day_of_week(&self, name: &str, date: &CalendarDate) -> Result<u8, CalendarError> {
        let calendar = self.registry.get(name)?;
        let weekday = self.weekday(name, date)?;
        let start = i64::from(calendar.descriptor().week_start_day_index());
        let position = (i64::from(weekday.index()) - start).rem_euclid(DAYS_IN_WEEK);
        Ok(position as u8)
    }
}

fn validate(calendar: &dyn Calendar, date: &CalendarDate) -> Result<(), CalendarError> {
    let invalid = |reason: String| CalendarError::InvalidDate {
        year: date.year(),
        month_index: date.month().index(),
        day: date.day(),
        reason,
    };

    if !date.month().is_valid() {
        return Err(invalid(format!("month index must be below {MONTHS_IN_YEAR}")));
    }
    if date.day() < MIN_DAY {
        return Err(invalid(format!("day must be at least {MIN_DAY}")));
    }
    let length = calendar.month_lengths(date.year())[usize::from(date.month().index())];
    if date.day() > length {
        return Err(invalid(format!("month has {length} days")));
    }
    Ok(())
}

fn observe_clamp(calendar: &dyn Calendar, year: i32) -> Option<YearClamp> {
    let clamp = calendar.year_clamp(year);
    if let Some(clamp) = clamp {
        tracing::debug!(
            calendar = calendar.descriptor().name(),
            year,
            boundary = clamp.boundary(),
            "year outside calendar table, using boundary data"
        );
    }
    clamp
}

fn date_to_days(calendar: &dyn Calendar, date: &CalendarDate) -> i64 {
    calendar.descriptor().epoch() + calendar.all_days(date) - 1
}

fn days_to_date(calendar: &dyn Calendar, days: i64) -> Result<CalendarDate, CalendarError> {
    let descriptor = calendar.descriptor();
    let out_of_range = || CalendarError::DayCountOutOfRange { days };

    // Calendar-local count, 1 on the first day of the start year
    let local = days
        .checked_sub(descriptor.epoch())
        .and_then(|d| d.checked_add(1))
        .ok_or_else(out_of_range)?;

    let resolved = resolve_year(calendar, local).ok_or_else(out_of_range)?;
    tracing::trace!(
        calendar = descriptor.name(),
        days,
        seed = resolved.seed,
        year = resolved.year,
        steps = resolved.steps,
        "resolved year from day count"
    );

    let year = resolved.year;
    let mut remaining = local - resolved.start;
    for (index, &length) in calendar.month_lengths(year).iter().enumerate() {
        let length = i64::from(length);
        if remaining <= length {
            return Ok(CalendarDate::new(year, index as u8, remaining as u8));
        }
        remaining -= length;
    }

    Err(CalendarError::InvalidTable(format!(
        "{} month lengths for {year} do not cover its {} days",
        descriptor.name(),
        calendar.days_in_year(year)
    )))
}

/// The year holding a calendar-local day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedYear {
    year: i32,
    /// Value of `days_before_year(year)`
    start: i64,
    seed: i64,
    steps: u32,
}

/// Finds the year whose days contain `local`, or `None` past the `i32` years.
///
/// Starts from the calendar's seed and jumps by as many whole years of the
/// current candidate's length as the count is away. Each probe narrows a
/// bracket around the answer and a jump that would leave it bisects
/// instead, so irregular year lengths cannot make the search wander.
fn resolve_year(calendar: &dyn Calendar, local: i64) -> Option<ResolvedYear> {
    let direction = if local > 0 { 1 } else { -1 };
    let guess = calendar.guess_year(local, direction);
    let seed = i64::from(calendar.descriptor().start_year())
        .saturating_add(guess)
        .saturating_sub(1);

    let mut low = i64::from(i32::MIN);
    let mut high = i64::from(i32::MAX);
    let mut candidate = seed.clamp(low, high);
    let mut steps = 0_u32;
    loop {
        let year = i32::try_from(candidate).ok()?;
        let start = calendar.days_before_year(year);
        let length = calendar.days_in_year(year).max(1);
        let offset = local.saturating_sub(start);
        if offset < 1 {
            high = candidate - 1;
        } else if offset > length {
            low = candidate + 1;
        } else {
            return Some(ResolvedYear {
                year,
                start,
                seed,
                steps,
            });
        }
        if low > high {
            return None;
        }

        let jump = candidate.saturating_add(offset.saturating_sub(1).div_euclid(length));
        candidate = if (low..=high).contains(&jump) {
            jump
        } else {
            low + (high - low) / 2
        };
        steps += 1;
    }
}

//! Concrete calendar systems.

mod gregorian;
mod julian;
mod tabular;

pub use gregorian::Gregorian;
pub use julian::Julian;
pub use tabular::TableCalendar;

use crate::{
    consts::{FEBRUARY_DAYS_LEAP, FEBRUARY_INDEX, SOLAR_MONTH_DAYS},
    table::MonthLengths,
};

/// Month lengths of a Gregorian-style year
const fn solar_month_lengths(leap: bool) -> MonthLengths {
    let mut lengths = SOLAR_MONTH_DAYS;
    if leap {
        lengths[FEBRUARY_INDEX] = FEBRUARY_DAYS_LEAP;
    }
    lengths
}

/// Leap years in `start..=current` that satisfy `is_leap`
fn collect_leaps(start: i32, current: i32, is_leap: impl Fn(i32) -> bool) -> Vec<i32> {
    if current < start {
        return Vec::new();
    }
    (start..=current).filter(|&year| is_leap(year)).collect()
}

/// Every calendar in scope has a fixed twelve-month structure
pub const MONTHS_IN_YEAR: usize = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Days in a common (non-leap) solar year
pub const COMMON_YEAR_DAYS: i64 = 365;

/// Mean year length used to seed the year search from a day count
pub const YEAR_LENGTH_ESTIMATE: f64 = 365.24;

/// Days in a week
pub const DAYS_IN_WEEK: i64 = 7;

/// Julian Day Number of 2000-01-01 in the Gregorian calendar
pub const JDN_GREGORIAN_2000_01_01: i64 = 2_451_545;

/// Julian Day Number of 0001-01-01 in the proleptic Gregorian calendar
pub const GREGORIAN_EPOCH_JDN: i64 = 1_721_426;

/// Julian Day Number of 0001-01-01 in the proleptic Julian calendar
pub const JULIAN_EPOCH_JDN: i64 = 1_721_424;

/// Julian Day Number of Baisakh 1, 1970 BS (1913-04-13 AD)
pub const NEPALI_EPOCH_JDN: i64 = 2_419_871;

/// Month lengths for a common Gregorian/Julian year
pub const SOLAR_MONTH_DAYS: [u8; MONTHS_IN_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Index of February in a zero-based month array
pub const FEBRUARY_INDEX: usize = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Registry identifiers of the calendars shipped with the crate
pub const NEPALI: &str = "nepali";
pub const GREGORIAN: &str = "gregorian";
pub const JULIAN: &str = "julian";

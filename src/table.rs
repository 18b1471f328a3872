//! Month-length tables for calendars without a closed-form leap rule.
//!
//! A table is dense over `min_year..=max_year`. Lookups outside that range
//! never fail: they fall back to the nearest boundary row, and the clamp
//! that happened is reported separately by [`clamp_year`] so callers can
//! diagnose extrapolated results without changing them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CalendarError, consts::MONTHS_IN_YEAR};

/// The twelve month lengths of a single year, in month order.
pub type MonthLengths = [u8; MONTHS_IN_YEAR];

/// Which boundary a clamped year was replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearClamp {
    /// The requested year precedes the table; `boundary` is its first year.
    Below { requested: i32, boundary: i32 },
    /// The requested year follows the table; `boundary` is its last year.
    Above { requested: i32, boundary: i32 },
}

impl YearClamp {
    /// The table year whose data stands in for the requested year
    pub const fn boundary(self) -> i32 {
        match self {
            Self::Below { boundary, .. } | Self::Above { boundary, .. } => boundary,
        }
    }

    /// The year that was originally asked for
    pub const fn requested(self) -> i32 {
        match self {
            Self::Below { requested, .. } | Self::Above { requested, .. } => requested,
        }
    }
}

/// Result of applying the boundary clamp rule to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClampedYear {
    /// Year whose data should be used
    pub year: i32,
    /// Set when `year` differs from the requested year
    pub clamp: Option<YearClamp>,
}

/// Clamps `year` into `min..=max`, recording which side was hit.
pub const fn clamp_year(year: i32, min: i32, max: i32) -> ClampedYear {
    debug_assert!(min <= max);
    if year < min {
        ClampedYear {
            year: min,
            clamp: Some(YearClamp::Below {
                requested: year,
                boundary: min,
            }),
        }
    } else if year > max {
        ClampedYear {
            year: max,
            clamp: Some(YearClamp::Above {
                requested: year,
                boundary: max,
            }),
        }
    } else {
        ClampedYear { year, clamp: None }
    }
}

/// A contiguous, year-indexed table of month lengths.
///
/// Serialises as an ordered map from canonical decimal year strings to
/// twelve positive integers, e.g. `{"2081": [31, 31, 32, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, MonthLengths>")]
pub struct MonthLengthTable {
    min_year: i32,
    rows: Vec<MonthLengths>,
    /// Days elapsed before each row's year, counted from `min_year`.
    /// One longer than `rows`; the last entry is the table's total.
    year_starts: Vec<i64>,
}

impl MonthLengthTable {
    /// Builds a table whose first row belongs to `min_year`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTable` if there are no rows, a month
    /// length is zero, or the last year would overflow `i32`.
    pub fn new(min_year: i32, rows: impl Into<Vec<MonthLengths>>) -> Result<Self, CalendarError> {
        let rows = rows.into();
        if rows.is_empty() {
            return Err(CalendarError::InvalidTable("table has no rows".to_owned()));
        }

        let span = i32::try_from(rows.len() - 1)
            .map_err(|_| CalendarError::InvalidTable(format!("{} rows is too many", rows.len())))?;
        min_year.checked_add(span).ok_or_else(|| {
            CalendarError::InvalidTable(format!(
                "table starting at {min_year} overflows the year range"
            ))
        })?;

        for (offset, row) in rows.iter().enumerate() {
            if let Some(index) = row.iter().position(|&len| len == 0) {
                let year = i64::from(min_year) + offset as i64;
                return Err(CalendarError::InvalidTable(format!(
                    "year {year} month index {index} has zero days"
                )));
            }
        }

        Ok(Self::from_trusted(min_year, rows))
    }

    /// Builds a table from compiled-in rows that are known to be valid.
    pub(crate) fn from_trusted(min_year: i32, rows: Vec<MonthLengths>) -> Self {
        debug_assert!(!rows.is_empty());
        let mut year_starts = Vec::with_capacity(rows.len() + 1);
        let mut elapsed = 0_i64;
        year_starts.push(elapsed);
        for row in &rows {
            elapsed += row_total(row);
            year_starts.push(elapsed);
        }

        Self {
            min_year,
            rows,
            year_starts,
        }
    }

    /// First tabulated year
    pub const fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Last tabulated year (inclusive)
    pub fn max_year(&self) -> i32 {
        // `new` guarantees this fits
        self.min_year + (self.rows.len() as i32 - 1)
    }

    /// Number of tabulated years
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a table has at least one row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies the boundary clamp rule for this table's range
    pub fn clamp(&self, year: i32) -> ClampedYear {
        clamp_year(year, self.min_year, self.max_year())
    }

    /// The exact row for `year`, or `None` outside the table
    pub fn get(&self, year: i32) -> Option<&MonthLengths> {
        let offset = usize::try_from(i64::from(year) - i64::from(self.min_year)).ok()?;
        self.rows.get(offset)
    }

    /// The row for `year`, substituting the nearest boundary row outside the table
    pub fn row(&self, year: i32) -> MonthLengths {
        self.rows[self.offset(self.clamp(year).year)]
    }

    /// Days in `year`, clamped like [`Self::row`]
    pub fn year_total(&self, year: i32) -> i64 {
        row_total(&self.row(year))
    }

    /// Days elapsed from the start of `min_year` to the start of `year`.
    ///
    /// Negative before the table. Outside the table every missing year is
    /// counted with the length of the nearest boundary row, so the result
    /// stays strictly increasing in `year`.
    pub fn days_before(&self, year: i32) -> i64 {
        let max_year = self.max_year();
        if year < self.min_year {
            let missing = i64::from(self.min_year) - i64::from(year);
            -missing * self.year_total(self.min_year)
        } else if year > max_year {
            let beyond = i64::from(year) - i64::from(max_year) - 1;
            self.year_starts[self.rows.len()] + beyond * self.year_total(max_year)
        } else {
            self.year_starts[self.offset(year)]
        }
    }

    /// Tabulated years with their rows, in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &MonthLengths)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(offset, row)| (self.min_year + offset as i32, row))
    }

    fn offset(&self, year: i32) -> usize {
        debug_assert!(year >= self.min_year && year <= self.max_year());
        (i64::from(year) - i64::from(self.min_year)) as usize
    }
}

fn row_total(row: &MonthLengths) -> i64 {
    row.iter().map(|&len| i64::from(len)).sum()
}

impl TryFrom<BTreeMap<String, MonthLengths>> for MonthLengthTable {
    type Error = CalendarError;

    fn try_from(map: BTreeMap<String, MonthLengths>) -> Result<Self, Self::Error> {
        let mut entries = map
            .into_iter()
            .map(|(key, row)| {
                let year = key
                    .parse::<i32>()
                    .map_err(|_| {
                        CalendarError::InvalidTable(format!("year key {key:?} is not an integer"))
                    })?;
                if year.to_string() != key {
                    return Err(CalendarError::InvalidTable(format!(
                        "year key {key:?} is not in canonical decimal form"
                    )));
                }
                Ok((year, row))
            })
            .collect::<Result<Vec<_>, _>>()?;
        // String keys sort lexically; years must be checked numerically
        entries.sort_unstable_by_key(|&(year, _)| year);

        let Some(&(min_year, _)) = entries.first() else {
            return Err(CalendarError::InvalidTable("table has no rows".to_owned()));
        };
        for (offset, &(year, _)) in entries.iter().enumerate() {
            let expected = i64::from(min_year) + offset as i64;
            if i64::from(year) != expected {
                return Err(CalendarError::InvalidTable(format!(
                    "table is not contiguous: expected year {expected}, found {year}"
                )));
            }
        }

        Self::new(min_year, entries.into_iter().map(|(_, row)| row).collect::<Vec<_>>())
    }
}

impl Serialize for MonthLengthTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter().map(|(year, row)| (year.to_string(), row)))
    }
}

//! Serialisable definitions for table-driven calendars loaded at startup.

use serde::{Deserialize, Serialize};

use crate::{
    CalendarError,
    calendars::TableCalendar,
    consts::{COMMON_YEAR_DAYS, DAYS_IN_WEEK},
    table::MonthLengthTable,
};

/// Describes a table-driven calendar, e.g. in JSON:
///
/// ```json
/// {
///   "name": "nepali-extended",
///   "epoch": 2419871,
///   "week_start_day_index": 0,
///   "months": { "1970": [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableCalendarConfig {
    pub name: String,
    /// Universal day count of day 1 of the table's first year
    pub epoch: i64,
    #[serde(default = "default_year_length")]
    pub year_length: u16,
    #[serde(default)]
    pub century: u16,
    #[serde(default)]
    pub week_start_day_index: u8,
    pub months: MonthLengthTable,
}

const fn default_year_length() -> u16 {
    COMMON_YEAR_DAYS as u16
}

impl TableCalendarConfig {
    /// Validates the definition and builds the calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTable` if the name is blank, the
    /// nominal year length is zero, or the week start is not a weekday index.
    pub fn into_calendar(self) -> Result<TableCalendar, CalendarError> {
        if self.name.trim().is_empty() {
            return Err(CalendarError::InvalidTable("calendar name is empty".to_owned()));
        }
        if self.year_length == 0 {
            return Err(CalendarError::InvalidTable(format!(
                "calendar {} has a zero year length",
                self.name
            )));
        }
        if i64::from(self.week_start_day_index) >= DAYS_IN_WEEK {
            return Err(CalendarError::InvalidTable(format!(
                "calendar {} week start {} must be below {DAYS_IN_WEEK}",
                self.name, self.week_start_day_index
            )));
        }

        Ok(TableCalendar::new(
            self.name,
            self.year_length,
            self.epoch,
            self.century,
            self.week_start_day_index,
            self.months,
        ))
    }
}

impl TryFrom<TableCalendarConfig> for TableCalendar {
    type Error = CalendarError;

    fn try_from(config: TableCalendarConfig) -> Result<Self, Self::Error> {
        config.into_calendar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Calendar;

    const CONFIG: &str = r#"{
        "name": "nepali-short",
        "epoch": 2460414,
        "months": {
            "2081": [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30],
            "2082": [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30]
        }
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let config: TableCalendarConfig = serde_json::from_str(CONFIG).unwrap();
        assert_eq!(config.year_length, 365);
        assert_eq!(config.century, 0);
        assert_eq!(config.week_start_day_index, 0);
        assert_eq!(config.months.min_year(), 2081);

        let calendar = config.into_calendar().unwrap();
        let descriptor = calendar.descriptor();
        assert_eq!(descriptor.name(), "nepali-short");
        assert_eq!(descriptor.start_year(), 2081);
        assert_eq!(descriptor.epoch(), 2_460_414);
        assert_eq!(calendar.month_lengths(2080), calendar.month_lengths(2081));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{
            "name": "x",
            "epoch": 0,
            "months": {"1": [30,30,30,30,30,30,30,30,30,30,30,30]},
            "era": "AD"
        }"#;
        let result: Result<TableCalendarConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_table() {
        let json = r#"{
            "name": "x",
            "epoch": 0,
            "months": {"1": [30,30,30,30,30,0,30,30,30,30,30,30]}
        }"#;
        let result: Result<TableCalendarConfig, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("zero days"));
    }

    #[test]
    fn test_into_calendar_validation() {
        let mut config: TableCalendarConfig = serde_json::from_str(CONFIG).unwrap();
        config.week_start_day_index = 7;
        assert!(matches!(
            TableCalendar::try_from(config.clone()),
            Err(CalendarError::InvalidTable(_))
        ));

        config.week_start_day_index = 6;
        config.year_length = 0;
        assert!(config.clone().into_calendar().is_err());

        config.year_length = 365;
        config.name = "  ".to_owned();
        assert!(config.into_calendar().is_err());
    }

    #[test]
    fn test_serialises_back() {
        let config: TableCalendarConfig = serde_json::from_str(CONFIG).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let reparsed: TableCalendarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, config);
    }
}

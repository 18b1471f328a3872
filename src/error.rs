/// Error type for calendar lookup, conversion, and table loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// No calendar is registered under this identifier.
    #[error("Unknown calendar: {name}")]
    UnknownCalendar { name: String },

    /// The date cannot exist in the calendar it was given for.
    #[error("Invalid date {year}/{month_index}/{day}: {reason}")]
    InvalidDate {
        year: i32,
        month_index: u8,
        day: u8,
        reason: String,
    },

    /// The day count lies beyond any representable year.
    #[error("Day count {days} is out of the representable year range")]
    DayCountOutOfRange { days: i64 },

    /// Two calendars were registered under the same identifier.
    #[error("Calendar registered twice: {name}")]
    DuplicateCalendar { name: String },

    /// A month-length table or calendar definition failed validation.
    #[error("Invalid calendar table: {0}")]
    InvalidTable(String),
}

impl CalendarError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownCalendar {
            name: name.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CalendarError::unknown("mayan");
        assert_eq!(err.to_string(), "Unknown calendar: mayan");

        let err = CalendarError::InvalidDate {
            year: 2081,
            month_index: 2,
            day: 33,
            reason: "month has 32 days".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date 2081/2/33: month has 32 days"
        );

        let err = CalendarError::DayCountOutOfRange { days: i64::MAX };
        assert!(err.to_string().contains("out of the representable year range"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}

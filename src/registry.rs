//! Lookup of calendar systems by identifier.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{
    CalendarError, TableCalendarConfig,
    calendar::Calendar,
    calendars::{Gregorian, Julian, TableCalendar},
};

static DEFAULT_REGISTRY: LazyLock<CalendarRegistry> = LazyLock::new(CalendarRegistry::with_builtin);

/// An immutable set of calendars keyed by name.
#[derive(Debug)]
pub struct CalendarRegistry {
    calendars: HashMap<String, Box<dyn Calendar>>,
}

impl CalendarRegistry {
    /// Starts an empty registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry holding the calendars shipped with the crate
    pub fn with_builtin() -> Self {
        let calendars = builtin_calendars()
            .into_iter()
            .map(|calendar| (calendar.descriptor().name().to_owned(), calendar))
            .collect();
        Self { calendars }
    }

    /// The process-wide registry of built-in calendars, created on first use
    pub fn global() -> &'static Self {
        &DEFAULT_REGISTRY
    }

    /// Resolves a calendar by name.
    ///
    /// # Errors
    /// Returns `CalendarError::UnknownCalendar` if no calendar has that name.
    pub fn get(&self, name: &str) -> Result<&dyn Calendar, CalendarError> {
        self.calendars
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| CalendarError::unknown(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calendars.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.calendars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All registered calendars, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Calendar> {
        self.calendars.values().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl Default for CalendarRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

fn builtin_calendars() -> Vec<Box<dyn Calendar>> {
    vec![
        Box::new(TableCalendar::nepali()),
        Box::new(Gregorian::new()),
        Box::new(Julian::new()),
    ]
}

/// Collects calendars for a [`CalendarRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    calendars: Vec<Box<dyn Calendar>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendars.push(Box::new(calendar));
        self
    }

    /// Adds the calendars shipped with the crate
    #[must_use]
    pub fn with_builtin(mut self) -> Self {
        self.calendars.extend(builtin_calendars());
        self
    }

    /// Adds a table-driven calendar described by configuration.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTable` if the configuration is invalid.
    pub fn with_table_config(self, config: TableCalendarConfig) -> Result<Self, CalendarError> {
        Ok(self.with_calendar(config.into_calendar()?))
    }

    /// Freezes the collected calendars into a registry.
    ///
    /// # Errors
    /// Returns `CalendarError::DuplicateCalendar` if two calendars share a name.
    pub fn build(self) -> Result<CalendarRegistry, CalendarError> {
        let mut calendars = HashMap::with_capacity(self.calendars.len());
        for calendar in self.calendars {
            let name = calendar.descriptor().name().to_owned();
            if calendars.contains_key(&name) {
                return Err(CalendarError::DuplicateCalendar { name });
            }
            calendars.insert(name, calendar);
        }
        tracing::debug!(count = calendars.len(), "calendar registry built");
        Ok(CalendarRegistry { calendars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonthLengthTable, consts::*};

    #[test]
    fn test_builtin_names() {
        let registry = CalendarRegistry::with_builtin();
        assert_eq!(registry.names(), vec![GREGORIAN, JULIAN, NEPALI]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.contains(NEPALI));
        assert!(!registry.contains("mayan"));
    }

    #[test]
    fn test_get_resolves_descriptor() {
        let registry = CalendarRegistry::global();
        let nepali = registry.get(NEPALI).unwrap();
        assert_eq!(nepali.descriptor().start_year(), 1970);
        let gregorian = registry.get(GREGORIAN).unwrap();
        assert_eq!(gregorian.descriptor().epoch(), GREGORIAN_EPOCH_JDN);
    }

    #[test]
    fn test_get_unknown_calendar() {
        let registry = CalendarRegistry::global();
        let result = registry.get("Nepali");
        assert_eq!(
            result.unwrap_err(),
            CalendarError::UnknownCalendar {
                name: "Nepali".to_owned(),
            }
        );
    }

    #[test]
    fn test_iter_visits_every_calendar() {
        let registry = CalendarRegistry::default();
        let mut names: Vec<&str> = registry.iter().map(|c| c.descriptor().name()).collect();
        names.sort_unstable();
        assert_eq!(names, registry.names());
    }

    #[test]
    fn test_builder_custom_calendar() {
        let rows = vec![[30; 12], [30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 35]];
        let table = MonthLengthTable::new(1, rows).unwrap();
        let registry = CalendarRegistry::builder()
            .with_calendar(TableCalendar::new("thirty", 360, 0, 0, 0, table))
            .with_calendar(Gregorian::new())
            .build()
            .unwrap();
        assert_eq!(registry.names(), vec![GREGORIAN, "thirty"]);
        assert!(registry.get(NEPALI).is_err());
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let result = CalendarRegistry::builder()
            .with_builtin()
            .with_calendar(Julian::new())
            .build();
        assert_eq!(
            result.unwrap_err(),
            CalendarError::DuplicateCalendar {
                name: JULIAN.to_owned(),
            }
        );
    }

    #[test]
    fn test_empty_builder() {
        let registry = CalendarRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_global_is_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| std::ptr::from_ref(CalendarRegistry::global()) as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}

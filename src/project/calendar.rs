//! Working-time calendars.

use crate::model::{Day, DayType, Timestamp};

/// Milliseconds per hour.
const HOUR_MS: i64 = 3_600_000;

/// One contiguous working period within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarHours {
    /// Period start, in minutes since midnight
    pub start_minutes: u32,
    /// Period length, in milliseconds
    pub duration_millis: i64,
}

impl CalendarHours {
    /// Create a working period
    ///
    /// # Arguments
    /// * 'start_minutes'   - Period start in minutes since midnight
    /// * 'duration_millis' - Period length in milliseconds
    #[must_use]
    pub fn new(start_minutes: u32, duration_millis: i64) -> CalendarHours {
        CalendarHours {
            start_minutes,
            duration_millis,
        }
    }

    /// Period end, in minutes since midnight.
    #[must_use]
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes + (self.duration_millis / 60_000) as u32
    }
}

/// The working pattern of one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    /// The weekday
    pub day: Day,
    /// Working status
    pub day_type: DayType,
    /// Working periods, empty for non-working days
    pub hours: Vec<CalendarHours>,
}

/// A date range overriding the weekly pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarException {
    /// First day the exception covers
    pub from_date: Option<Timestamp>,
    /// Last day the exception covers
    pub to_date: Option<Timestamp>,
    /// Exception name, where the file carries one
    pub name: Option<String>,
    /// Working periods, empty when the exception makes the range non-working
    pub hours: Vec<CalendarHours>,
}

impl CalendarException {
    /// True when the exception turns its range into working time.
    #[must_use]
    pub fn is_working(&self) -> bool {
        !self.hours.is_empty()
    }
}

/// A working-time calendar.
///
/// Base calendars define a full weekly pattern. Derived calendars name a base
/// calendar and override individual days, with `DayType::Default` meaning
/// "follow the base".
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    /// The calendar's unique id
    pub unique_id: u32,
    /// Unique id of the base calendar, for derived calendars
    pub base_calendar_id: Option<u32>,
    /// Unique id of the owning resource, for resource calendars
    pub resource_unique_id: Option<u32>,
    /// Calendar name
    pub name: Option<String>,
    /// Weekly pattern, one entry per weekday
    pub days: Vec<CalendarDay>,
    /// Date-range overrides
    pub exceptions: Vec<CalendarException>,
}

impl Calendar {
    /// Returns the pattern of one weekday
    #[must_use]
    pub fn day(&self, day: Day) -> Option<&CalendarDay> {
        self.days.iter().find(|entry| entry.day == day)
    }

    /// True when this calendar derives from a base calendar.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.base_calendar_id.is_some()
    }

    /// The product's stock working week.
    ///
    /// Saturday and Sunday off, Monday through Friday working 08:00-12:00 and
    /// 13:00-17:00.
    #[must_use]
    pub fn default_working_week() -> Vec<CalendarDay> {
        [
            Day::Sunday,
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
            Day::Saturday,
        ]
        .into_iter()
        .map(|day| match day {
            Day::Sunday | Day::Saturday => CalendarDay {
                day,
                day_type: DayType::NonWorking,
                hours: Vec::new(),
            },
            _ => CalendarDay {
                day,
                day_type: DayType::Working,
                hours: vec![
                    CalendarHours::new(8 * 60, 4 * HOUR_MS),
                    CalendarHours::new(13 * 60, 4 * HOUR_MS),
                ],
            },
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_week_shape() {
        let week = Calendar::default_working_week();

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, Day::Sunday);
        assert_eq!(week[0].day_type, DayType::NonWorking);
        assert!(week[0].hours.is_empty());

        let monday = &week[1];
        assert_eq!(monday.day_type, DayType::Working);
        assert_eq!(monday.hours.len(), 2);
        assert_eq!(monday.hours[0].start_minutes, 480);
        assert_eq!(monday.hours[0].end_minutes(), 720);
        assert_eq!(monday.hours[1].start_minutes, 780);
        assert_eq!(monday.hours[1].end_minutes(), 1020);
    }

    #[test]
    fn day_lookup() {
        let calendar = Calendar {
            unique_id: 1,
            base_calendar_id: None,
            resource_unique_id: None,
            name: Some("Standard".into()),
            days: Calendar::default_working_week(),
            exceptions: Vec::new(),
        };

        assert!(!calendar.is_derived());
        assert_eq!(
            calendar.day(Day::Friday).unwrap().day_type,
            DayType::Working
        );
    }

    #[test]
    fn exception_working_state() {
        let closed = CalendarException {
            from_date: None,
            to_date: None,
            name: Some("Holiday".into()),
            hours: Vec::new(),
        };
        assert!(!closed.is_working());

        let open = CalendarException {
            hours: vec![CalendarHours::new(540, 2 * HOUR_MS)],
            ..closed
        };
        assert!(open.is_working());
    }
}

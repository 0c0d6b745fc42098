//! Temporal value types used throughout the project model.
//!
//! The file format has no notion of time zones; every timestamp is a wall-clock value
//! carried here as milliseconds since the Unix epoch. [`Timestamp`] keeps that raw
//! representation and renders it as civil UTC time on demand, so no chrono-style
//! dependency is needed for a format that never leaves wall-clock space.

use std::fmt;

use crate::model::enums::TimeUnit;

/// Milliseconds per day.
const DAY_MS: i64 = 86_400_000;

/// A wall-clock date and time, stored as milliseconds since 1970-01-01T00:00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_unix_millis(millis: i64) -> Timestamp {
        Timestamp(millis)
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn unix_millis(self) -> i64 {
        self.0
    }

    /// Calendar date as `(year, month, day)`.
    #[must_use]
    pub fn civil_date(self) -> (i64, u32, u32) {
        civil_from_days(self.0.div_euclid(DAY_MS))
    }

    /// Time of day as `(hour, minute, second)`.
    #[must_use]
    pub fn civil_time(self) -> (u32, u32, u32) {
        let ms = self.0.rem_euclid(DAY_MS);
        let second = (ms / 1000) as u32;
        (second / 3600, (second / 60) % 60, second % 60)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.civil_date();
        let (hour, minute, second) = self.civil_time();
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
        )
    }
}

/// Gregorian calendar date for a day count relative to 1970-01-01.
///
/// Standard era-based conversion, exact over the full `i64` day range.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// A span of time expressed in a particular [`TimeUnit`].
///
/// The numeric value is already scaled to the unit; `8.0` hours is stored as
/// `value: 8.0, units: Hours`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    /// Magnitude in `units`
    pub value: f64,
    /// Unit of measure
    pub units: TimeUnit,
}

impl Duration {
    /// Create a duration from a scaled value and its unit.
    #[must_use]
    pub fn new(value: f64, units: TimeUnit) -> Duration {
        Duration { value, units }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units)
    }
}

/// A cost rate, such as a resource's standard rate of `50.0` per hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    /// Monetary amount per one `per` unit
    pub amount: f64,
    /// Time unit the amount applies to
    pub per: TimeUnit,
}

impl Rate {
    /// Create a rate from an amount and the unit it applies to.
    #[must_use]
    pub fn new(amount: f64, per: TimeUnit) -> Rate {
        Rate { amount, per }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.amount, self.per)
    }
}

/// Project-level scheduling defaults that scale raw duration values.
///
/// These come from the project's property stream; files that omit them fall back to
/// the product's stock values via [`ProjectDefaults::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectDefaults {
    /// Working minutes in one day
    pub minutes_per_day: i32,
    /// Working minutes in one week
    pub minutes_per_week: i32,
    /// Working days in one month
    pub days_per_month: i32,
    /// Unit used for durations with no explicit unit
    pub duration_units: TimeUnit,
}

impl Default for ProjectDefaults {
    fn default() -> ProjectDefaults {
        ProjectDefaults {
            minutes_per_day: 480,
            minutes_per_week: 2400,
            days_per_month: 20,
            duration_units: TimeUnit::Days,
        }
    }
}

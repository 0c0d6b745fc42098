//! Closed enumerations for the scalar vocabulary of the project model.
//!
//! Every enum here mirrors a small integer code on disk. Decoding follows the format's
//! conventions: most codes have a defined fallback (a file written by a newer product
//! revision may carry codes this library does not know), while codes whose zero value
//! means "not set" decode to `None` at the call site instead.

use std::fmt;

use strum::{EnumCount, EnumIter};

/// Time units for durations, work and rates.
///
/// The on-disk ordinal is stable across all supported generations. `Elapsed` variants
/// measure calendar time rather than working time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TimeUnit {
    /// Working minutes
    Minutes = 0,
    /// Working hours
    Hours = 1,
    /// Working days
    Days = 2,
    /// Working weeks
    Weeks = 3,
    /// Working months
    Months = 4,
    /// Percentage of a working assignment
    Percent = 5,
    /// Working years
    Years = 6,
    /// Elapsed minutes
    ElapsedMinutes = 7,
    /// Elapsed hours
    ElapsedHours = 8,
    /// Elapsed days
    ElapsedDays = 9,
    /// Elapsed weeks
    ElapsedWeeks = 10,
    /// Elapsed months
    ElapsedMonths = 11,
    /// Elapsed years
    ElapsedYears = 12,
    /// Elapsed percentage
    ElapsedPercent = 13,
}

impl TimeUnit {
    /// Decode an on-disk ordinal. Out-of-range codes fall back to [`TimeUnit::Days`].
    #[must_use]
    pub fn from_ordinal(value: i32) -> TimeUnit {
        match value {
            0 => TimeUnit::Minutes,
            1 => TimeUnit::Hours,
            2 => TimeUnit::Days,
            3 => TimeUnit::Weeks,
            4 => TimeUnit::Months,
            5 => TimeUnit::Percent,
            6 => TimeUnit::Years,
            7 => TimeUnit::ElapsedMinutes,
            8 => TimeUnit::ElapsedHours,
            9 => TimeUnit::ElapsedDays,
            10 => TimeUnit::ElapsedWeeks,
            11 => TimeUnit::ElapsedMonths,
            12 => TimeUnit::ElapsedYears,
            13 => TimeUnit::ElapsedPercent,
            _ => TimeUnit::Days,
        }
    }

    /// The conventional abbreviation used when formatting durations (`"d"`, `"eh"`, ...).
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Percent => "%",
            TimeUnit::Years => "y",
            TimeUnit::ElapsedMinutes => "em",
            TimeUnit::ElapsedHours => "eh",
            TimeUnit::ElapsedDays => "ed",
            TimeUnit::ElapsedWeeks => "ew",
            TimeUnit::ElapsedMonths => "emo",
            TimeUnit::ElapsedYears => "ey",
            TimeUnit::ElapsedPercent => "e%",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Task scheduling constraint types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConstraintType {
    /// Schedule as soon as possible (the default)
    AsSoonAsPossible = 0,
    /// Schedule as late as possible
    AsLateAsPossible = 1,
    /// Must start on the constraint date
    MustStartOn = 2,
    /// Must finish on the constraint date
    MustFinishOn = 3,
    /// Start no earlier than the constraint date
    StartNoEarlierThan = 4,
    /// Start no later than the constraint date
    StartNoLaterThan = 5,
    /// Finish no earlier than the constraint date
    FinishNoEarlierThan = 6,
    /// Finish no later than the constraint date
    FinishNoLaterThan = 7,
}

impl ConstraintType {
    /// Decode an on-disk code. Out-of-range codes fall back to
    /// [`ConstraintType::AsSoonAsPossible`].
    #[must_use]
    pub fn from_code(value: u16) -> ConstraintType {
        match value {
            1 => ConstraintType::AsLateAsPossible,
            2 => ConstraintType::MustStartOn,
            3 => ConstraintType::MustFinishOn,
            4 => ConstraintType::StartNoEarlierThan,
            5 => ConstraintType::StartNoLaterThan,
            6 => ConstraintType::FinishNoEarlierThan,
            7 => ConstraintType::FinishNoLaterThan,
            _ => ConstraintType::AsSoonAsPossible,
        }
    }
}

/// How a task's scheduling reacts to assignment changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskType {
    /// Units are held constant
    FixedUnits = 0,
    /// Duration is held constant
    FixedDuration = 1,
    /// Work is held constant
    FixedWork = 2,
}

impl TaskType {
    /// Decode an on-disk code. Out-of-range codes fall back to [`TaskType::FixedUnits`].
    #[must_use]
    pub fn from_code(value: u16) -> TaskType {
        match value {
            1 => TaskType::FixedDuration,
            2 => TaskType::FixedWork,
            _ => TaskType::FixedUnits,
        }
    }
}

/// When resource costs accrue against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccrueType {
    /// Costs accrue when the task starts
    Start = 1,
    /// Costs accrue when the task ends
    End = 2,
    /// Costs accrue proportionally to progress
    Prorated = 3,
}

impl AccrueType {
    /// Decode an on-disk code. Out-of-range codes fall back to [`AccrueType::Prorated`].
    #[must_use]
    pub fn from_code(value: u16) -> AccrueType {
        match value {
            1 => AccrueType::Start,
            2 => AccrueType::End,
            _ => AccrueType::Prorated,
        }
    }
}

/// Messaging method for workgroup communication with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WorkGroup {
    /// Use the project default
    Default = 0,
    /// No workgroup messaging
    None = 1,
    /// Email messaging
    Email = 2,
    /// Web based messaging
    Web = 3,
}

impl WorkGroup {
    /// Decode an on-disk code. Out-of-range codes fall back to [`WorkGroup::Default`].
    #[must_use]
    pub fn from_code(value: u16) -> WorkGroup {
        match value {
            1 => WorkGroup::None,
            2 => WorkGroup::Email,
            3 => WorkGroup::Web,
            _ => WorkGroup::Default,
        }
    }
}

/// Earned value calculation method for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EarnedValueMethod {
    /// Use percent complete
    PercentComplete = 0,
    /// Use physical percent complete
    PhysicalPercentComplete = 1,
}

impl EarnedValueMethod {
    /// Decode an on-disk code. Out-of-range codes fall back to
    /// [`EarnedValueMethod::PercentComplete`].
    #[must_use]
    pub fn from_code(value: u16) -> EarnedValueMethod {
        match value {
            1 => EarnedValueMethod::PhysicalPercentComplete,
            _ => EarnedValueMethod::PercentComplete,
        }
    }
}

/// How a resource was requested for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceRequestType {
    /// No request
    None = 0,
    /// Requested
    Request = 1,
    /// Demanded
    Demand = 2,
}

impl ResourceRequestType {
    /// Decode an on-disk code. Out-of-range codes fall back to
    /// [`ResourceRequestType::None`].
    #[must_use]
    pub fn from_code(value: u16) -> ResourceRequestType {
        match value {
            1 => ResourceRequestType::Request,
            2 => ResourceRequestType::Demand,
            _ => ResourceRequestType::None,
        }
    }
}

/// Commitment level of a resource assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BookingType {
    /// Committed booking
    Committed = 0,
    /// Proposed booking
    Proposed = 1,
}

impl BookingType {
    /// Decode an on-disk code. Out-of-range codes fall back to
    /// [`BookingType::Committed`].
    #[must_use]
    pub fn from_code(value: u16) -> BookingType {
        match value {
            1 => BookingType::Proposed,
            _ => BookingType::Committed,
        }
    }
}

/// Resource categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceType {
    /// Material resource (consumable)
    Material = 0,
    /// Work resource (people, equipment)
    Work = 1,
    /// Cost resource
    Cost = 2,
}

impl ResourceType {
    /// Decode an on-disk code. Out-of-range codes fall back to [`ResourceType::Work`].
    #[must_use]
    pub fn from_code(value: u16) -> ResourceType {
        match value {
            0 => ResourceType::Material,
            2 => ResourceType::Cost,
            _ => ResourceType::Work,
        }
    }
}

/// Direction the project is scheduled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScheduleFrom {
    /// Forward from the project start date
    Start = 0,
    /// Backward from the project finish date
    Finish = 1,
}

impl ScheduleFrom {
    /// Decode an on-disk code. Out-of-range codes fall back to [`ScheduleFrom::Start`].
    #[must_use]
    pub fn from_code(value: u16) -> ScheduleFrom {
        match value {
            1 => ScheduleFrom::Finish,
            _ => ScheduleFrom::Start,
        }
    }
}

/// Days of the week as numbered by the format (Sunday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[repr(u8)]
pub enum Day {
    /// Sunday
    Sunday = 1,
    /// Monday
    Monday = 2,
    /// Tuesday
    Tuesday = 3,
    /// Wednesday
    Wednesday = 4,
    /// Thursday
    Thursday = 5,
    /// Friday
    Friday = 6,
    /// Saturday
    Saturday = 7,
}

impl Day {
    /// Decode an on-disk day number (1 = Sunday .. 7 = Saturday).
    #[must_use]
    pub fn from_code(value: u16) -> Option<Day> {
        match value {
            1 => Some(Day::Sunday),
            2 => Some(Day::Monday),
            3 => Some(Day::Tuesday),
            4 => Some(Day::Wednesday),
            5 => Some(Day::Thursday),
            6 => Some(Day::Friday),
            7 => Some(Day::Saturday),
            _ => None,
        }
    }
}

/// Working status of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DayType {
    /// Non-working day
    NonWorking = 0,
    /// Working day
    Working = 1,
    /// Follow the base calendar
    Default = 2,
}

/// Task priority, stored as a value between 100 (lowest) and 1000 (do not level).
///
/// Values that are multiples of 100 correspond to the product's named priority bands;
/// arbitrary values are preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(u16);

impl Priority {
    /// Lowest priority band
    pub const LOWEST: Priority = Priority(100);
    /// Medium priority band (the default)
    pub const MEDIUM: Priority = Priority(500);
    /// Highest schedulable priority band
    pub const HIGHEST: Priority = Priority(900);
    /// Excluded from resource leveling
    pub const DO_NOT_LEVEL: Priority = Priority(1000);

    /// Wrap an on-disk priority value.
    #[must_use]
    pub fn from_raw(value: u16) -> Priority {
        Priority(value)
    }

    /// The raw priority value.
    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn time_unit_ordinals_round_trip() {
        for unit in TimeUnit::iter() {
            assert_eq!(TimeUnit::from_ordinal(unit as i32), unit);
        }
    }

    #[test]
    fn time_unit_fallback() {
        assert_eq!(TimeUnit::from_ordinal(-1), TimeUnit::Days);
        assert_eq!(TimeUnit::from_ordinal(99), TimeUnit::Days);
    }

    #[test]
    fn constraint_fallback() {
        assert_eq!(ConstraintType::from_code(7), ConstraintType::FinishNoLaterThan);
        assert_eq!(ConstraintType::from_code(8), ConstraintType::AsSoonAsPossible);
    }

    #[test]
    fn accrue_fallback_is_prorated() {
        assert_eq!(AccrueType::from_code(0), AccrueType::Prorated);
        assert_eq!(AccrueType::from_code(1), AccrueType::Start);
        assert_eq!(AccrueType::from_code(2), AccrueType::End);
    }

    #[test]
    fn day_numbering_starts_at_sunday() {
        assert_eq!(Day::from_code(1), Some(Day::Sunday));
        assert_eq!(Day::from_code(7), Some(Day::Saturday));
        assert_eq!(Day::from_code(0), None);
        assert_eq!(Day::from_code(8), None);
    }

    #[test]
    fn priority_bands() {
        assert_eq!(Priority::from_raw(500), Priority::MEDIUM);
        assert!(Priority::LOWEST < Priority::HIGHEST);
        assert_eq!(Priority::from_raw(425).value(), 425);
    }
}

//! Decoded field values.

use std::fmt;

use uguid::Guid;

use crate::model::enums::{
    AccrueType, BookingType, ConstraintType, EarnedValueMethod, Priority, ResourceRequestType,
    TaskType, TimeUnit, WorkGroup,
};
use crate::model::time::{Duration, Rate, Timestamp};

/// A decoded field value, tagged by the kind the declared [`DataType`] produces.
///
/// [`DataType`]: crate::model::DataType
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text from a unicode or single-byte string field
    Text(String),
    /// Date and time
    Date(Timestamp),
    /// Duration, including work and delay amounts
    Duration(Duration),
    /// Time units code
    TimeUnits(TimeUnit),
    /// 32-bit integer, also carries short fields
    Integer(i32),
    /// Boolean
    Boolean(bool),
    /// Floating point number, also carries assignment units
    Number(f64),
    /// Currency amount
    Currency(f64),
    /// Percentage in 0..=100
    Percentage(f64),
    /// Cost rate
    Rate(Rate),
    /// Globally unique identifier
    Guid(Guid),
    /// Constraint type
    Constraint(ConstraintType),
    /// Priority
    Priority(Priority),
    /// Task type
    TaskType(TaskType),
    /// Cost accrual
    Accrue(AccrueType),
    /// Workgroup messaging method
    Workgroup(WorkGroup),
    /// Earned value method
    EarnedValueMethod(EarnedValueMethod),
    /// Resource request type
    ResourceRequestType(ResourceRequestType),
    /// Resource booking type
    BookingType(BookingType),
}

impl FieldValue {
    /// Borrow the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The timestamp payload, if this is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Date(timestamp) => Some(*timestamp),
            _ => None,
        }
    }

    /// The duration payload, if this is a duration value.
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            FieldValue::Duration(duration) => Some(*duration),
            _ => None,
        }
    }

    /// The time units payload, if this is a time units value.
    #[must_use]
    pub fn as_time_units(&self) -> Option<TimeUnit> {
        match self {
            FieldValue::TimeUnits(units) => Some(*units),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean value.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The numeric payload of a number, currency or percentage value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value)
            | FieldValue::Currency(value)
            | FieldValue::Percentage(value) => Some(*value),
            _ => None,
        }
    }

    /// The rate payload, if this is a rate value.
    #[must_use]
    pub fn as_rate(&self) -> Option<Rate> {
        match self {
            FieldValue::Rate(rate) => Some(*rate),
            _ => None,
        }
    }

    /// The GUID payload, if this is a GUID value.
    #[must_use]
    pub fn as_guid(&self) -> Option<Guid> {
        match self {
            FieldValue::Guid(guid) => Some(*guid),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Date(timestamp) => write!(f, "{timestamp}"),
            FieldValue::Duration(duration) => write!(f, "{duration}"),
            FieldValue::TimeUnits(units) => write!(f, "{units}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Number(value) | FieldValue::Percentage(value) => write!(f, "{value}"),
            FieldValue::Currency(value) => write!(f, "{value:.2}"),
            FieldValue::Rate(rate) => write!(f, "{rate}"),
            FieldValue::Guid(guid) => write!(f, "{guid}"),
            FieldValue::Constraint(value) => write!(f, "{value:?}"),
            FieldValue::Priority(value) => write!(f, "{value}"),
            FieldValue::TaskType(value) => write!(f, "{value:?}"),
            FieldValue::Accrue(value) => write!(f, "{value:?}"),
            FieldValue::Workgroup(value) => write!(f, "{value:?}"),
            FieldValue::EarnedValueMethod(value) => write!(f, "{value:?}"),
            FieldValue::ResourceRequestType(value) => write!(f, "{value:?}"),
            FieldValue::BookingType(value) => write!(f, "{value:?}"),
        }
    }
}

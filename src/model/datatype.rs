//! Declared wire types for mapped fields.
//!
//! Every field a schema can address carries one [`DataType`] describing how its raw
//! bytes decode. The type also determines how many bytes the field occupies when it
//! lives in fixed record data; variable-length types report a width of zero and can
//! only be reached through the keyed blob store.

use strum::{EnumCount, EnumIter};

/// The declared decode type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum DataType {
    /// UTF-16LE string
    String,
    /// Single-byte string
    AsciiString,
    /// Date and time
    Date,
    /// Scheduled duration, interpreted through a companion units field
    Duration,
    /// Duration units code
    TimeUnits,
    /// 32-bit signed integer
    Integer,
    /// 16-bit signed integer
    Short,
    /// Boolean stored as a 16-bit word
    Boolean,
    /// IEEE 754 double
    Numeric,
    /// Currency amount stored at 100x scale
    Currency,
    /// Assignment units
    Units,
    /// Cost rate with an implicit hours basis
    Rate,
    /// Work amount stored as tenths of minutes at 100x scale
    Work,
    /// Work time units byte
    WorkUnits,
    /// Percentage in the range 0..=100
    Percentage,
    /// 16-byte GUID
    Guid,
    /// Leveling delay in tenths of minutes
    Delay,
    /// Task constraint type code
    Constraint,
    /// Task priority value
    Priority,
    /// Task type code
    TaskType,
    /// Cost accrual code
    Accrue,
    /// Workgroup messaging code
    Workgroup,
    /// Rate time units code
    RateUnits,
    /// Earned value method code
    EarnedValueMethod,
    /// Resource request type code
    ResourceRequestType,
    /// Booking type code
    BookingType,
    /// Opaque bytes, never decoded by the field engine
    Binary,
}

impl DataType {
    /// Bytes this type occupies in fixed record data.
    ///
    /// Zero means the type has no fixed-data representation and must come from the
    /// variable-data store.
    #[must_use]
    pub fn fixed_width(self) -> usize {
        match self {
            DataType::Date | DataType::Integer | DataType::Duration => 4,
            DataType::TimeUnits
            | DataType::Constraint
            | DataType::Priority
            | DataType::Percentage
            | DataType::TaskType
            | DataType::Accrue
            | DataType::Short
            | DataType::Boolean
            | DataType::Delay
            | DataType::Workgroup
            | DataType::RateUnits
            | DataType::EarnedValueMethod
            | DataType::ResourceRequestType => 2,
            DataType::Currency | DataType::Units | DataType::Rate | DataType::Work => 8,
            DataType::WorkUnits => 1,
            DataType::Guid => 16,
            DataType::String
            | DataType::AsciiString
            | DataType::Numeric
            | DataType::BookingType
            | DataType::Binary => 0,
        }
    }

    /// True for the types whose variable-data blobs may begin with the value list
    /// sentinel instead of a literal value.
    #[must_use]
    pub fn uses_value_list(self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Duration | DataType::Numeric | DataType::String
        )
    }
}

//! Semantic field identifiers for tasks, resources and assignments.
//!
//! A [`Field`] names one attribute of one entity kind, independent of where any
//! particular file generation stores it. Schemas map fields to storage locations;
//! the decoder asks a field for its [`DataType`] to pick the decode arm. Custom
//! attribute families (Text1..Text30 and friends) are data-carrying variants so the
//! vocabulary stays closed without enumerating every slot.
//!
//! On disk a field is referenced by a 32-bit field id whose high 16 bits select the
//! entity kind and whose low 16 bits index a per-generation lookup table.

use std::fmt;

use crate::model::datatype::DataType;

/// Field id prefix for task fields.
pub const TASK_FIELD_BASE: u32 = 0x0B40_0000;
/// Field id prefix for resource fields.
pub const RESOURCE_FIELD_BASE: u32 = 0x0C40_0000;
/// Field id prefix for constraint fields.
pub const CONSTRAINT_FIELD_BASE: u32 = 0x0D40_0000;
/// Field id prefix for assignment fields.
pub const ASSIGNMENT_FIELD_BASE: u32 = 0x0F40_0000;

/// Split a raw 32-bit field id into its entity prefix and table index.
#[must_use]
pub fn split_field_id(raw: u32) -> (u32, u16) {
    (raw & 0xFFFF_0000, (raw & 0xFFFF) as u16)
}

/// The kinds of entity that carry mapped fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Tasks
    Task,
    /// Resources
    Resource,
    /// Resource assignments
    Assignment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Task => "task",
            EntityKind::Resource => "resource",
            EntityKind::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

/// Task attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    /// Task name
    Name,
    /// Work breakdown structure code
    Wbs,
    /// Contact name
    Contact,
    /// Free-form note text
    Notes,
    /// Scheduled start
    Start,
    /// Scheduled finish
    Finish,
    /// Actual start
    ActualStart,
    /// Actual finish
    ActualFinish,
    /// Early start from the forward pass
    EarlyStart,
    /// Early finish from the forward pass
    EarlyFinish,
    /// Late start from the backward pass
    LateStart,
    /// Late finish from the backward pass
    LateFinish,
    /// Baseline start
    BaselineStart,
    /// Baseline finish
    BaselineFinish,
    /// Constraint date for date-bound constraint types
    ConstraintDate,
    /// Deadline
    Deadline,
    /// Creation date
    Created,
    /// Scheduled duration
    Duration,
    /// Units the scheduled duration is expressed in
    DurationUnits,
    /// Actual duration
    ActualDuration,
    /// Units the actual duration is expressed in
    ActualDurationUnits,
    /// Remaining duration
    RemainingDuration,
    /// Units the remaining duration is expressed in
    RemainingDurationUnits,
    /// Baseline duration
    BaselineDuration,
    /// Units the baseline duration is expressed in
    BaselineDurationUnits,
    /// Delay introduced by resource leveling
    LevelingDelay,
    /// Scheduled work
    Work,
    /// Actual work
    ActualWork,
    /// Remaining work
    RemainingWork,
    /// Baseline work
    BaselineWork,
    /// Scheduled cost
    Cost,
    /// Actual cost
    ActualCost,
    /// Remaining cost
    RemainingCost,
    /// Baseline cost
    BaselineCost,
    /// Fixed cost
    FixedCost,
    /// When the fixed cost accrues
    FixedCostAccrual,
    /// Percent of the duration completed
    PercentComplete,
    /// Percent of the work completed
    PercentWorkComplete,
    /// Leveling priority
    Priority,
    /// Scheduling constraint type
    ConstraintType,
    /// Scheduling method
    Type,
    /// Earned value calculation method
    EarnedValueMethod,
    /// Unique id of the task calendar, 0 when none
    CalendarUniqueId,
    /// Globally unique identifier
    Guid,
    /// Custom text attribute (1..=30)
    CustomText(u8),
    /// Custom start date attribute (1..=10)
    CustomStart(u8),
    /// Custom finish date attribute (1..=10)
    CustomFinish(u8),
    /// Custom date attribute (1..=10)
    CustomDate(u8),
    /// Custom duration attribute (1..=10)
    CustomDuration(u8),
    /// Units for the matching custom duration attribute
    CustomDurationUnits(u8),
    /// Custom number attribute (1..=20)
    CustomNumber(u8),
    /// Custom cost attribute (1..=10)
    CustomCost(u8),
    /// Custom flag attribute (1..=20)
    CustomFlag(u8),
    /// Hierarchical outline code attribute (1..=10)
    OutlineCode(u8),
}

impl TaskField {
    /// The declared decode type of this field.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            TaskField::Name
            | TaskField::Wbs
            | TaskField::Contact
            | TaskField::Notes
            | TaskField::CustomText(_)
            | TaskField::OutlineCode(_) => DataType::String,
            TaskField::Start
            | TaskField::Finish
            | TaskField::ActualStart
            | TaskField::ActualFinish
            | TaskField::EarlyStart
            | TaskField::EarlyFinish
            | TaskField::LateStart
            | TaskField::LateFinish
            | TaskField::BaselineStart
            | TaskField::BaselineFinish
            | TaskField::ConstraintDate
            | TaskField::Deadline
            | TaskField::Created
            | TaskField::CustomStart(_)
            | TaskField::CustomFinish(_)
            | TaskField::CustomDate(_) => DataType::Date,
            TaskField::Duration
            | TaskField::ActualDuration
            | TaskField::RemainingDuration
            | TaskField::BaselineDuration
            | TaskField::CustomDuration(_) => DataType::Duration,
            TaskField::DurationUnits
            | TaskField::ActualDurationUnits
            | TaskField::RemainingDurationUnits
            | TaskField::BaselineDurationUnits
            | TaskField::CustomDurationUnits(_) => DataType::TimeUnits,
            TaskField::LevelingDelay => DataType::Delay,
            TaskField::Work
            | TaskField::ActualWork
            | TaskField::RemainingWork
            | TaskField::BaselineWork => DataType::Work,
            TaskField::Cost
            | TaskField::ActualCost
            | TaskField::RemainingCost
            | TaskField::BaselineCost
            | TaskField::FixedCost
            | TaskField::CustomCost(_) => DataType::Currency,
            TaskField::FixedCostAccrual => DataType::Accrue,
            TaskField::PercentComplete | TaskField::PercentWorkComplete => DataType::Percentage,
            TaskField::Priority => DataType::Priority,
            TaskField::ConstraintType => DataType::Constraint,
            TaskField::Type => DataType::TaskType,
            TaskField::EarnedValueMethod => DataType::EarnedValueMethod,
            TaskField::CalendarUniqueId => DataType::Integer,
            TaskField::Guid => DataType::Guid,
            TaskField::CustomNumber(_) => DataType::Numeric,
            TaskField::CustomFlag(_) => DataType::Boolean,
        }
    }
}

/// Resource attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceField {
    /// Resource name
    Name,
    /// Initials
    Initials,
    /// Group name
    Group,
    /// Cost center or accounting code
    Code,
    /// Email address
    EmailAddress,
    /// Unit label for material resources
    MaterialLabel,
    /// Free-form note text
    Notes,
    /// Resource category
    Type,
    /// Standard cost rate
    StandardRate,
    /// Units the standard rate applies to
    StandardRateUnits,
    /// Overtime cost rate
    OvertimeRate,
    /// Units the overtime rate applies to
    OvertimeRateUnits,
    /// Per-use cost
    CostPerUse,
    /// Scheduled cost
    Cost,
    /// Actual cost
    ActualCost,
    /// Remaining cost
    RemainingCost,
    /// Baseline cost
    BaselineCost,
    /// Scheduled work
    Work,
    /// Actual work
    ActualWork,
    /// Remaining work
    RemainingWork,
    /// Baseline work
    BaselineWork,
    /// Overtime work
    OvertimeWork,
    /// Maximum assignment units
    MaxUnits,
    /// Largest simultaneous assignment units
    Peak,
    /// When costs accrue
    AccrueAt,
    /// Commitment level
    BookingType,
    /// Workgroup messaging method
    WorkGroup,
    /// Globally unique identifier
    Guid,
    /// Custom text attribute (1..=30)
    CustomText(u8),
    /// Custom start date attribute (1..=10)
    CustomStart(u8),
    /// Custom finish date attribute (1..=10)
    CustomFinish(u8),
    /// Custom date attribute (1..=10)
    CustomDate(u8),
    /// Custom duration attribute (1..=10)
    CustomDuration(u8),
    /// Units for the matching custom duration attribute
    CustomDurationUnits(u8),
    /// Custom number attribute (1..=20)
    CustomNumber(u8),
    /// Custom cost attribute (1..=10)
    CustomCost(u8),
    /// Custom flag attribute (1..=20)
    CustomFlag(u8),
    /// Hierarchical outline code attribute (1..=10)
    OutlineCode(u8),
}

impl ResourceField {
    /// The declared decode type of this field.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            ResourceField::Name
            | ResourceField::Initials
            | ResourceField::Group
            | ResourceField::Code
            | ResourceField::EmailAddress
            | ResourceField::MaterialLabel
            | ResourceField::Notes
            | ResourceField::CustomText(_)
            | ResourceField::OutlineCode(_) => DataType::String,
            ResourceField::Type => DataType::Short,
            ResourceField::StandardRate | ResourceField::OvertimeRate => DataType::Rate,
            ResourceField::StandardRateUnits | ResourceField::OvertimeRateUnits => {
                DataType::RateUnits
            }
            ResourceField::CostPerUse
            | ResourceField::Cost
            | ResourceField::ActualCost
            | ResourceField::RemainingCost
            | ResourceField::BaselineCost
            | ResourceField::CustomCost(_) => DataType::Currency,
            ResourceField::Work
            | ResourceField::ActualWork
            | ResourceField::RemainingWork
            | ResourceField::BaselineWork
            | ResourceField::OvertimeWork => DataType::Work,
            ResourceField::MaxUnits | ResourceField::Peak => DataType::Units,
            ResourceField::AccrueAt => DataType::Accrue,
            ResourceField::BookingType => DataType::BookingType,
            ResourceField::WorkGroup => DataType::Workgroup,
            ResourceField::Guid => DataType::Guid,
            ResourceField::CustomStart(_)
            | ResourceField::CustomFinish(_)
            | ResourceField::CustomDate(_) => DataType::Date,
            ResourceField::CustomDuration(_) => DataType::Duration,
            ResourceField::CustomDurationUnits(_) => DataType::TimeUnits,
            ResourceField::CustomNumber(_) => DataType::Numeric,
            ResourceField::CustomFlag(_) => DataType::Boolean,
        }
    }
}

/// Resource assignment attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignmentField {
    /// Unique id of the assigned task
    TaskUniqueId,
    /// Unique id of the assigned resource
    ResourceUniqueId,
    /// Assignment start
    Start,
    /// Assignment finish
    Finish,
    /// Baseline start
    BaselineStart,
    /// Baseline finish
    BaselineFinish,
    /// Assignment units
    Units,
    /// Scheduled work
    Work,
    /// Actual work
    ActualWork,
    /// Remaining work
    RemainingWork,
    /// Baseline work
    BaselineWork,
    /// Scheduled cost
    Cost,
    /// Actual cost
    ActualCost,
    /// Remaining cost
    RemainingCost,
    /// Baseline cost
    BaselineCost,
    /// Assignment delay
    Delay,
    /// How the resource was requested
    ResourceRequestType,
    /// Globally unique identifier
    Guid,
}

impl AssignmentField {
    /// The declared decode type of this field.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            AssignmentField::TaskUniqueId | AssignmentField::ResourceUniqueId => DataType::Integer,
            AssignmentField::Start
            | AssignmentField::Finish
            | AssignmentField::BaselineStart
            | AssignmentField::BaselineFinish => DataType::Date,
            AssignmentField::Units => DataType::Units,
            AssignmentField::Work
            | AssignmentField::ActualWork
            | AssignmentField::RemainingWork
            | AssignmentField::BaselineWork => DataType::Work,
            AssignmentField::Cost
            | AssignmentField::ActualCost
            | AssignmentField::RemainingCost
            | AssignmentField::BaselineCost => DataType::Currency,
            AssignmentField::Delay => DataType::Delay,
            AssignmentField::ResourceRequestType => DataType::ResourceRequestType,
            AssignmentField::Guid => DataType::Guid,
        }
    }
}

/// One attribute of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// A task attribute
    Task(TaskField),
    /// A resource attribute
    Resource(ResourceField),
    /// An assignment attribute
    Assignment(AssignmentField),
}

impl Field {
    /// The entity kind this field belongs to.
    #[must_use]
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Field::Task(_) => EntityKind::Task,
            Field::Resource(_) => EntityKind::Resource,
            Field::Assignment(_) => EntityKind::Assignment,
        }
    }

    /// The declared decode type of this field.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            Field::Task(field) => field.data_type(),
            Field::Resource(field) => field.data_type(),
            Field::Assignment(field) => field.data_type(),
        }
    }

    /// The companion field holding the time units for a duration field.
    ///
    /// Duration values are stored as raw tenths of minutes; their unit lives in a
    /// sibling field decoded through the same schema.
    #[must_use]
    pub fn units_companion(self) -> Option<Field> {
        let companion = match self {
            Field::Task(TaskField::Duration) => Field::Task(TaskField::DurationUnits),
            Field::Task(TaskField::ActualDuration) => Field::Task(TaskField::ActualDurationUnits),
            Field::Task(TaskField::RemainingDuration) => {
                Field::Task(TaskField::RemainingDurationUnits)
            }
            Field::Task(TaskField::BaselineDuration) => {
                Field::Task(TaskField::BaselineDurationUnits)
            }
            Field::Task(TaskField::CustomDuration(index)) => {
                Field::Task(TaskField::CustomDurationUnits(index))
            }
            Field::Resource(ResourceField::CustomDuration(index)) => {
                Field::Resource(ResourceField::CustomDurationUnits(index))
            }
            _ => return None,
        };
        Some(companion)
    }

    /// True for hierarchical outline code fields, whose value list entries resolve
    /// to a dot-joined ancestor path instead of a flat literal.
    #[must_use]
    pub fn is_outline_code(self) -> bool {
        matches!(
            self,
            Field::Task(TaskField::OutlineCode(_)) | Field::Resource(ResourceField::OutlineCode(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_split() {
        assert_eq!(split_field_id(0x0B40_0003), (TASK_FIELD_BASE, 3));
        assert_eq!(split_field_id(0x0C40_0011), (RESOURCE_FIELD_BASE, 0x11));
        assert_eq!(split_field_id(0x0F40_0000), (ASSIGNMENT_FIELD_BASE, 0));
    }

    #[test]
    fn duration_fields_have_units_companions() {
        assert_eq!(
            Field::Task(TaskField::Duration).units_companion(),
            Some(Field::Task(TaskField::DurationUnits))
        );
        assert_eq!(
            Field::Task(TaskField::CustomDuration(3)).units_companion(),
            Some(Field::Task(TaskField::CustomDurationUnits(3)))
        );
        assert_eq!(Field::Task(TaskField::Name).units_companion(), None);
    }

    #[test]
    fn companion_kind_matches_field_kind() {
        let field = Field::Resource(ResourceField::CustomDuration(1));
        let companion = field.units_companion().unwrap();
        assert_eq!(companion.entity_kind(), EntityKind::Resource);
        assert_eq!(companion.data_type(), DataType::TimeUnits);
    }

    #[test]
    fn outline_codes_flagged() {
        assert!(Field::Task(TaskField::OutlineCode(1)).is_outline_code());
        assert!(Field::Resource(ResourceField::OutlineCode(10)).is_outline_code());
        assert!(!Field::Task(TaskField::CustomText(1)).is_outline_code());
    }

    #[test]
    fn declared_types() {
        assert_eq!(Field::Task(TaskField::Start).data_type(), DataType::Date);
        assert_eq!(
            Field::Resource(ResourceField::StandardRate).data_type(),
            DataType::Rate
        );
        assert_eq!(
            Field::Assignment(AssignmentField::Work).data_type(),
            DataType::Work
        );
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Task.to_string(), "task");
        assert_eq!(EntityKind::Assignment.to_string(), "assignment");
    }
}

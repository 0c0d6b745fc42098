//! Scalar value model shared by every supported file generation.
//!
//! This module defines the vocabulary the rest of the crate speaks: which fields
//! exist ([`Field`]), how their raw bytes decode ([`DataType`]), what a decoded
//! value looks like ([`FieldValue`]) and the temporal and enumerated types those
//! values carry. Nothing here touches bytes; the storage-aware layers in
//! [`crate::streams`] and [`crate::fieldmap`] build on this vocabulary.
//!
//! # Key Components
//!
//! - [`Field`] / [`TaskField`] / [`ResourceField`] / [`AssignmentField`] - semantic
//!   field identifiers, independent of on-disk placement
//! - [`DataType`] - declared decode type plus its fixed-data width
//! - [`FieldValue`] - tagged union of every value kind a decode can produce
//! - [`Timestamp`], [`Duration`], [`Rate`] - temporal value types
//! - Closed domain enums with on-disk code decoding and documented fallbacks
//!
//! # Examples
//!
//! ```rust
//! use mppscope::{DataType, Field, TaskField};
//!
//! let field = Field::Task(TaskField::Duration);
//! assert_eq!(field.data_type(), DataType::Duration);
//! assert!(field.units_companion().is_some());
//! ```

/// Declared decode types and their fixed-data widths
mod datatype;
pub use datatype::DataType;

/// Closed enumerations for small on-disk codes
mod enums;
pub use enums::{
    AccrueType, BookingType, ConstraintType, Day, DayType, EarnedValueMethod, Priority,
    ResourceRequestType, ResourceType, ScheduleFrom, TaskType, TimeUnit, WorkGroup,
};

/// Semantic field identifiers and the field id number space
mod field;
pub use field::{
    split_field_id, AssignmentField, EntityKind, Field, ResourceField, TaskField,
    ASSIGNMENT_FIELD_BASE, CONSTRAINT_FIELD_BASE, RESOURCE_FIELD_BASE, TASK_FIELD_BASE,
};

/// Temporal value types
mod time;
pub use time::{Duration, ProjectDefaults, Rate, Timestamp};

/// Decoded field values
mod value;
pub use value::FieldValue;

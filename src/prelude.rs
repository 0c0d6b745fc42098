//! # mppscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the mppscope library. Import this module to get quick access to the essential
//! types for reading project files.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all mppscope operations
pub use crate::Error;

/// The result type used throughout mppscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for reading project files
pub use crate::project::ProjectFile;

/// Container stream access and generation selection
pub use crate::file::{file_names, FileFormat, MemoryStreams, StreamProvider};

// ================================================================================================
// Populated Model
// ================================================================================================

/// Populated entities and project-level properties
pub use crate::project::{Assignment, ProjectProperties, Resource, Task};

/// Working-time calendars
pub use crate::project::{Calendar, CalendarDay, CalendarException, CalendarHours};

// ================================================================================================
// Field Vocabulary
// ================================================================================================

/// Semantic field identifiers
pub use crate::model::{AssignmentField, EntityKind, Field, ResourceField, TaskField};

/// Declared decode types and decoded values
pub use crate::model::{DataType, FieldValue};

/// Temporal value types and project scheduling defaults
pub use crate::model::{Duration, ProjectDefaults, Rate, Timestamp};

/// Domain enumerations
pub use crate::model::{
    AccrueType, BookingType, ConstraintType, Day, DayType, EarnedValueMethod, Priority,
    ResourceRequestType, ResourceType, ScheduleFrom, TaskType, TimeUnit, WorkGroup,
};

// ================================================================================================
// Decoding Engine
// ================================================================================================

/// Field schema construction, value decoding and generation configuration
pub use crate::fieldmap::{FieldDecoder, FieldLocation, FieldSchema, GenerationConfig};

/// Custom field value lists and outline code resolution
pub use crate::custom::{CustomFieldValueItem, CustomFieldValues, CustomValue};

/// Display id reconciliation
pub use crate::order::{reconcile_identities, OrderedEntity, Placeholder};

// ================================================================================================
// Storage Streams
// ================================================================================================

/// The storage stream parsers
pub use crate::streams::{
    FixedData, FixedMeta, Props, RecordFlags, Var2Data, VarMeta, VarMetaLayout,
};

//! Custom field value lists and outline code resolution.
//!
//! Custom field values are deduplicated into a project-wide value table; an
//! entity's blob then stores an index into that table behind a reserved
//! sentinel instead of the literal bytes. This module reads the table from the
//! value-list directory and resolves references for the decoder, including
//! the dot-joined ancestor paths of hierarchical outline codes.
//!
//! # Examples
//!
//! ```rust
//! use mppscope::custom::{CustomFieldValueItem, CustomFieldValues, CustomValue};
//! use mppscope::model::{Field, TaskField};
//!
//! let values = CustomFieldValues::from_items(vec![
//!     CustomFieldValueItem::text(1, 0, "Americas"),
//!     CustomFieldValueItem::text(2, 1, "North America"),
//! ]);
//!
//! let path = values.resolve(Field::Task(TaskField::OutlineCode(1)), 2);
//! assert_eq!(path.unwrap().to_string(), "Americas.North America");
//! ```

/// Value table items and their typed literals
mod item;
pub use item::{CustomFieldValueItem, CustomValue};

/// Table construction and reference resolution
mod resolver;
pub use resolver::CustomFieldValues;

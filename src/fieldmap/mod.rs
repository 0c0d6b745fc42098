//! Field mapping and value decoding.
//!
//! Every supported file generation stores entity attributes behind a small
//! embedded descriptor block that says, per field, where the bytes live: at a
//! fixed offset inside the entity's fixed-size record, under a type key in the
//! variable-length blob store, or as a bit in a meta block. This module turns
//! that descriptor block into a [`FieldSchema`] and decodes values through it.
//!
//! # Key Components
//!
//! - **`FieldSchema`** - Per entity category map from semantic field to storage
//!   location, built once per read from the descriptor block (or from a
//!   generation default when the block is absent).
//! - **`FieldDecoder`** - Type-directed extraction of a [`FieldValue`] for one
//!   field of one entity, including value-list indirection through
//!   [`crate::custom::CustomFieldValues`].
//! - **`GenerationConfig`** - The per-generation data that parameterizes the
//!   engine: field id tables, var-key derivation, store layouts. A new
//!   generation is a new configuration, not a new pipeline.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mppscope::fieldmap::{FieldDecoder, FieldSchema, GenerationConfig};
//! use mppscope::model::{EntityKind, Field, ProjectDefaults, TaskField};
//! use mppscope::streams::Props;
//!
//! let props_data = std::fs::read("Props")?;
//! let props = Props::from(&props_data)?;
//!
//! let config = GenerationConfig::new(mppscope::FileFormat::Mpp14);
//! let schema = FieldSchema::from_props(&config, EntityKind::Task, Some(&props));
//! let defaults = ProjectDefaults::default();
//! let decoder = FieldDecoder::new(&schema, &defaults);
//!
//! let record = [0_u8; 64];
//! let value = decoder.decode(Field::Task(TaskField::Start), 1, [Some(&record[..]), None], None);
//! println!("start: {value:?}");
//! # Ok::<(), mppscope::Error>(())
//! ```
//!
//! [`FieldValue`]: crate::model::FieldValue

/// Per-generation engine configuration
mod generation;
pub use generation::{CalendarLayout, GenerationConfig};

/// Generation default schemas used when the descriptor block is absent
mod defaults;

/// Schema construction from descriptor blocks
mod schema;
pub use schema::{FieldLocation, FieldSchema};

/// Type-directed value decoding
mod decoder;
pub use decoder::FieldDecoder;

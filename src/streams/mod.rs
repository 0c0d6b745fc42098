//! Storage streams of project files.
//!
//! This module implements the parsing and representation of the low level
//! storage streams that make up a project file. Each entity category directory
//! holds the same small family of streams, and the project-level settings live
//! in property-bag streams.
//!
//! # Stream Types
//!
//! ## Property Bags
//! - **`Props`** - A dictionary of integer keys to raw byte values. Holds the
//!   project-level settings and the field map descriptors that drive
//!   [`crate::fieldmap::FieldSchema`].
//!
//! ## Fixed-Size Records
//! - **`FixedData`** / **`Fixed2Data`** - One record per entity. Record
//!   boundaries are recovered from the offsets in the companion metadata
//!   stream, as the records have a known maximum size rather than a uniform
//!   size.
//! - **`FixedMeta`** / **`Fixed2Meta`** - One item per record carrying a flag
//!   word (including the deleted bit) and the record's byte offset.
//!
//! ## Variable-Length Records
//! - **`Var2Data`** - Size-prefixed value blobs addressed by entity unique id
//!   and type key.
//! - **`VarMeta`** - The index over a `Var2Data` stream. The entry layout
//!   differs between file generations, see [`VarMetaLayout`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use mppscope::streams::{FixedData, FixedMeta, Var2Data, VarMeta, VarMetaLayout};
//!
//! let meta_buf = std::fs::read("FixedMeta")?;
//! let data_buf = std::fs::read("FixedData")?;
//! let meta = FixedMeta::from(&meta_buf, 8)?;
//! let fixed = FixedData::from_meta(&meta, &data_buf, 0, 0);
//!
//! let var_meta_buf = std::fs::read("VarMeta")?;
//! let var_data_buf = std::fs::read("Var2Data")?;
//! let var_meta = VarMeta::from(&var_meta_buf, VarMetaLayout::Extended)?;
//! let var = Var2Data::from(&var_meta, &var_data_buf);
//!
//! for index in 0..fixed.item_count() {
//!     if let Some(record) = fixed.item(index) {
//!         println!("record {index}: {} bytes", record.len());
//!     }
//! }
//! # Ok::<(), mppscope::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! - All numeric values are little-endian
//! - Streams guard against truncated and corrupt input by dropping the
//!   offending records rather than failing the whole stream
//! - Only structural damage to a stream header is reported as an error

/// The property-bag implementation
pub mod props;
pub use props::Props;

/// The fixed-size record metadata implementation
mod fixed_meta;
pub use fixed_meta::{FixedMeta, RecordFlags};

/// The fixed-size record implementation
mod fixed_data;
pub use fixed_data::FixedData;

/// The variable-length record index implementation
mod var_meta;
pub use var_meta::{VarMeta, VarMetaLayout};

/// The variable-length record implementation
mod var_data;
pub use var_data::Var2Data;

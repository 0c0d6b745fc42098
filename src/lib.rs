// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # mppscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/mppscope.svg)](https://crates.io/crates/mppscope)
//! [![Documentation](https://docs.rs/mppscope/badge.svg)](https://docs.rs/mppscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/mppscope/blob/main/LICENSE-APACHE)
//!
//! A cross-platform framework for analyzing and reverse engineering Microsoft Project
//! MPP files. Built in pure Rust, `mppscope` recovers tasks, resources, assignments and
//! calendars from the undocumented binary streams of a project file, across the four
//! historical schema generations (MPP8, MPP9, MPP12, MPP14), without requiring Windows
//! or Microsoft Project.
//!
//! ## Features
//!
//! - **📦 Container-agnostic** - Consumes pre-extracted streams through a small provider
//!   trait; any OLE compound document reader (or a test fixture) can supply the bytes
//! - **🔍 Schema-driven decoding** - Builds each entity category's field map from the
//!   file's own embedded descriptor block, falling back to generation defaults
//! - **🧬 One engine, four generations** - Generation differences are configuration
//!   data, not duplicated pipelines
//! - **🛡️ Damage tolerant** - Corrupt offsets, truncated records and dangling value-list
//!   references degrade to absent fields instead of failed reads
//! - **🔧 Cross-platform** - Works on Windows, Linux, macOS, and any Rust-supported platform
//! - **📊 Typed model** - Decoded values carry their kind: dates, durations with units,
//!   currencies, rates, GUIDs, domain enums
//!
//! ## Quick Start
//!
//! Add `mppscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mppscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use mppscope::prelude::*;
//!
//! // Streams are normally pulled out of the compound document by an
//! // external container reader and registered on the provider.
//! let provider = MemoryStreams::new();
//! let project = ProjectFile::from_provider(&provider, FileFormat::Mpp14)?;
//! println!("Found {} tasks", project.tasks().len());
//! # Ok::<(), mppscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use mppscope::{FileFormat, MemoryStreams, ProjectFile, StreamProvider};
//!
//! // Identify the generation from the container's class name string
//! let format = FileFormat::from_content_type("MSProject.MPP12")?;
//!
//! // Register the extracted streams
//! let mut provider = MemoryStreams::new();
//! provider.insert(None, format.props_stream_name(), std::fs::read("Props12")?);
//! provider.insert(Some("TBkndTask"), "FixedData", std::fs::read("FixedData")?);
//! // ... remaining streams ...
//!
//! // Read the project
//! let project = ProjectFile::from_provider(&provider, format)?;
//! for task in project.tasks() {
//!     println!("{:>4} {:?}", task.id(), task.name());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! `mppscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`file`] - The [`StreamProvider`] seam, generation selection and byte conversions
//! - [`streams`] - The storage stream parsers: property bags, fixed-size record stores
//!   and the variable-length attribute store
//! - [`fieldmap`] - Field schema construction and type-directed value decoding
//! - [`custom`] - Custom field value lists and outline code resolution
//! - [`order`] - Display id reconciliation
//! - [`project`] - The populated model: [`ProjectFile`] and its entities
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Decoding Pipeline
//!
//! A read flows strictly from bytes to model: container streams feed the storage
//! parsers, the category's property bag yields a [`fieldmap::FieldSchema`], the
//! [`fieldmap::FieldDecoder`] extracts one typed value per mapped field of each
//! entity, and after a category is fully populated its display ids are rebuilt in
//! one [`order::reconcile_identities`] pass. Everything is synchronous and
//! single-threaded; schemas and stores live for one read and are then discarded.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Per-field damage is not an
//! error: a corrupt field decodes to `None` and the read continues. Structural
//! stream damage and an unreconstructable display order fail the read with
//! detailed context:
//!
//! ```rust
//! use mppscope::{Error, FileFormat, MemoryStreams, ProjectFile};
//!
//! let provider = MemoryStreams::new();
//! match ProjectFile::from_provider(&provider, FileFormat::Mpp9) {
//!     Ok(project) => println!("Read {} tasks", project.tasks().len()),
//!     Err(Error::NotSupported) => println!("File format not supported"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use mppscope::prelude::*;
///
/// let provider = MemoryStreams::new();
/// let project = ProjectFile::from_provider(&provider, FileFormat::Mpp9)?;
/// assert!(project.tasks().is_empty());
/// # Ok::<(), mppscope::Error>(())
/// ```
pub mod prelude;

pub mod custom;
pub mod fieldmap;
pub mod file;
pub mod model;
pub mod order;
pub mod project;
pub mod streams;

pub(crate) mod reader;

/// `mppscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `mppscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for stream parsing and display order reconciliation.
pub use error::Error;

/// Main entry point for reading project files.
///
/// See [`project::ProjectFile`] for the populated model and its accessors.
///
/// # Example
///
/// ```rust
/// use mppscope::{FileFormat, MemoryStreams, ProjectFile};
/// let provider = MemoryStreams::new();
/// let project = ProjectFile::from_provider(&provider, FileFormat::Mpp14)?;
/// println!("Found {} tasks", project.tasks().len());
/// # Ok::<(), mppscope::Error>(())
/// ```
pub use project::ProjectFile;

/// Container stream access: the provider seam, the in-memory provider and the
/// well-known stream names.
pub use file::{file_names, FileFormat, MemoryStreams, StreamProvider};

/// The shared field vocabulary: semantic field identifiers, declared decode types
/// and decoded values.
pub use model::{
    AssignmentField, DataType, EntityKind, Field, FieldValue, ResourceField, TaskField,
};

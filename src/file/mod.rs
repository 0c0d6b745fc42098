//! Container stream access and low-level byte conversions.
//!
//! Project files are OLE compound documents; this crate deliberately does not parse
//! that container. Instead, everything above this module consumes streams through the
//! [`StreamProvider`] seam and an external collaborator (a CFB reader, an archive, a
//! test fixture) supplies the raw bytes. The module also owns the byte-level reading
//! primitives the stream parsers are built on.
//!
//! # Architecture
//!
//! - **Provider seam** - [`StreamProvider`] hands out whole streams by directory and
//!   name; [`MemoryStreams`] is the bundled in-memory implementation
//! - **Generation selection** - [`FileFormat`] names the on-disk schema revision and
//!   maps the container's class-name string to it
//! - **Byte primitives** - [`io`] reads little-endian scalars, [`convert`] turns
//!   house encodings (day numbers, tenths of minutes, 100x currency) into model
//!   values
//!
//! # Stream Layout
//!
//! Entity data lives in well-known directories (`TBkndTask`, `TBkndRsc`,
//! `TBkndAssn`, `TBkndCal`, `TBkndOutlCode`), each holding fixed-record streams
//! (`FixedData`/`FixedMeta`, `Fixed2Data`/`Fixed2Meta`), the variable-length
//! attribute store (`VarMeta`/`Var2Data`) and a `Props` bag. The project root
//! carries a generation-named props stream (`Props9`, `Props12`, `Props14`).
//!
//! # Examples
//!
//! ```rust
//! use mppscope::{FileFormat, MemoryStreams, StreamProvider};
//!
//! let format = FileFormat::from_content_type("MSProject.MPP14")?;
//! assert_eq!(format, FileFormat::Mpp14);
//!
//! let mut provider = MemoryStreams::new();
//! provider.insert(Some(mppscope::file_names::TASK_DIR), "FixedData", vec![0; 16]);
//! assert!(provider.has_directory("TBkndTask"));
//! # Ok::<(), mppscope::Error>(())
//! ```

pub mod convert;
pub mod io;

mod memory;
pub use memory::MemoryStreams;

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::{Error, Result};

/// Well-known directory and stream names within the container.
pub mod file_names {
    /// Task directory
    pub const TASK_DIR: &str = "TBkndTask";
    /// Resource directory
    pub const RESOURCE_DIR: &str = "TBkndRsc";
    /// Assignment directory
    pub const ASSIGNMENT_DIR: &str = "TBkndAssn";
    /// Calendar directory
    pub const CALENDAR_DIR: &str = "TBkndCal";
    /// Custom field value list directory
    pub const OUTLINE_CODE_DIR: &str = "TBkndOutlCode";

    /// Primary fixed record data stream
    pub const FIXED_DATA: &str = "FixedData";
    /// Primary fixed record meta stream
    pub const FIXED_META: &str = "FixedMeta";
    /// Secondary fixed record data stream
    pub const FIXED2_DATA: &str = "Fixed2Data";
    /// Secondary fixed record meta stream
    pub const FIXED2_META: &str = "Fixed2Meta";
    /// Variable-length attribute meta stream
    pub const VAR_META: &str = "VarMeta";
    /// Variable-length attribute data stream
    pub const VAR2_DATA: &str = "Var2Data";
    /// Per-directory property bag stream
    pub const PROPS: &str = "Props";
}

/// Provider of raw container streams.
///
/// This trait abstracts over the source of stream bytes, decoupling the decode
/// engine from any particular container parser. Implementations hand out whole
/// streams; the engine never seeks.
///
/// `directory` of `None` addresses the project root (the generation directory of
/// the compound document); `Some(name)` addresses one of the well-known entity
/// directories listed in [`file_names`].
pub trait StreamProvider {
    /// Returns the bytes of the named stream, or `None` if the stream is absent.
    ///
    /// Absent streams are an expected condition (files routinely omit optional
    /// streams); only retrieval failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to retrieve an existing stream, for
    /// example on I/O failure.
    fn stream(&self, directory: Option<&str>, name: &str) -> Result<Option<Vec<u8>>>;

    /// Returns `true` if the named directory exists in the container.
    fn has_directory(&self, name: &str) -> bool;
}

/// The on-disk schema generation of a project file.
///
/// Each generation shares the same engine; what differs is configuration data
/// (field id tables, record sizes, store layouts). The generation is announced by
/// the container's class-name string, see [`FileFormat::from_content_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum FileFormat {
    /// Project 98
    Mpp8,
    /// Project 2000 and 2002
    Mpp9,
    /// Project 2007
    Mpp12,
    /// Project 2010 and later
    Mpp14,
}

impl FileFormat {
    /// Map the container's class-name string to a generation.
    ///
    /// Covers the project, template and global-file class names of each supported
    /// generation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] for unknown class names.
    pub fn from_content_type(name: &str) -> Result<FileFormat> {
        match name {
            "MSProject.MPP8" | "MSProject.MPT8" => Ok(FileFormat::Mpp8),
            "MSProject.MPP9" | "MSProject.MPT9" | "MSProject.GLOBAL9" => Ok(FileFormat::Mpp9),
            "MSProject.MPP12" | "MSProject.MPT12" | "MSProject.GLOBAL12" => Ok(FileFormat::Mpp12),
            "MSProject.MPP14" | "MSProject.MPT14" | "MSProject.GLOBAL14" => Ok(FileFormat::Mpp14),
            _ => Err(Error::NotSupported),
        }
    }

    /// Name of the generation-specific props stream at the project root.
    #[must_use]
    pub fn props_stream_name(self) -> &'static str {
        match self {
            FileFormat::Mpp8 => "Props",
            FileFormat::Mpp9 => "Props9",
            FileFormat::Mpp12 => "Props12",
            FileFormat::Mpp14 => "Props14",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Mpp8 => "MPP8",
            FileFormat::Mpp9 => "MPP9",
            FileFormat::Mpp12 => "MPP12",
            FileFormat::Mpp14 => "MPP14",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_mapping() {
        assert_eq!(
            FileFormat::from_content_type("MSProject.MPP9").unwrap(),
            FileFormat::Mpp9
        );
        assert_eq!(
            FileFormat::from_content_type("MSProject.MPT12").unwrap(),
            FileFormat::Mpp12
        );
        assert_eq!(
            FileFormat::from_content_type("MSProject.GLOBAL14").unwrap(),
            FileFormat::Mpp14
        );
        assert_eq!(
            FileFormat::from_content_type("MSProject.MPP8").unwrap(),
            FileFormat::Mpp8
        );
    }

    #[test]
    fn unknown_content_type() {
        assert!(matches!(
            FileFormat::from_content_type("MSProject.MPP4"),
            Err(Error::NotSupported)
        ));
        assert!(matches!(
            FileFormat::from_content_type(""),
            Err(Error::NotSupported)
        ));
    }

    #[test]
    fn props_stream_names() {
        assert_eq!(FileFormat::Mpp8.props_stream_name(), "Props");
        assert_eq!(FileFormat::Mpp9.props_stream_name(), "Props9");
        assert_eq!(FileFormat::Mpp12.props_stream_name(), "Props12");
        assert_eq!(FileFormat::Mpp14.props_stream_name(), "Props14");
    }

    #[test]
    fn format_display() {
        assert_eq!(FileFormat::Mpp14.to_string(), "MPP14");
    }
}

use thiserror::Error;

use crate::model::EntityKind;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while reading MPP container
/// streams and decoding project data. Each variant provides specific context about the failure
/// mode to enable appropriate error handling.
///
/// Per-field decode problems are deliberately *not* errors: a corrupt offset or truncated
/// record makes that one field absent (`None`) and the read continues. The variants below
/// cover the store level (bad magic, truncated headers), the environment (I/O, unsupported
/// format) and the single fatal decode-path case, [`Error::OrderingConflict`].
///
/// # Error Categories
///
/// ## Stream Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid stream structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond a buffer boundary
/// - [`Error::NotSupported`] - Unsupported file format or generation
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors from stream providers
///
/// ## Reconciliation Errors
/// - [`Error::OrderingConflict`] - Display-order repair exhausted its probe window
///
/// # Examples
///
/// ```rust,ignore
/// use mppscope::{Error, ProjectFile};
///
/// match ProjectFile::from_provider(&provider, format) {
///     Ok(project) => {
///         println!("Read {} tasks", project.tasks().len());
///     }
///     Err(Error::NotSupported) => {
///         eprintln!("File format is not supported");
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The stream is damaged and could not be parsed.
    ///
    /// This error indicates that a container stream doesn't conform to the expected
    /// layout, such as a meta stream with a bad magic number or a truncated header.
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing a stream.
    ///
    /// This error occurs when trying to read data beyond the end of a buffer.
    /// It's a safety check to prevent overruns during parsing.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Indicates that the input is not one of the supported MPP generations,
    /// or uses features that are not yet implemented in this library.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    ///
    /// This error occurs when an empty stream or buffer is provided where
    /// actual project data was expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that a stream provider can raise while
    /// retrieving container streams, such as reading from disk or permission
    /// issues.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for
    /// wrapping external provider errors with additional context.
    #[error("{0}")]
    Error(String),

    /// Display-order reconciliation ran out of free slots.
    ///
    /// Repairing duplicate or out-of-order display IDs probes a bounded window
    /// of slots per placeholder entity; exhausting that window means the
    /// on-disk order cannot be reconstructed. This is the one decode-path
    /// failure that aborts the category instead of degrading to an absent
    /// value - a silently wrong order would violate the model's ordering
    /// contract.
    ///
    /// # Fields
    ///
    /// * `kind` - The entity category whose reconciliation failed
    /// * `unique_id` - Unique ID of the placeholder that could not be placed
    /// * `id` - The placeholder's original display ID
    #[error("Unable to reconstruct {kind} display order: no free slot for unique id {unique_id} (original id {id})")]
    OrderingConflict {
        /// The entity category whose reconciliation failed
        kind: EntityKind,
        /// Unique ID of the placeholder entity that could not be placed
        unique_id: u32,
        /// Original display ID carried by the placeholder
        id: i32,
    },
}

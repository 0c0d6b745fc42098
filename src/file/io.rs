//! Low-level byte order and safe reading utilities for MPP stream parsing.
//!
//! This module provides endian-aware binary reading for the container streams of an MPP
//! file. It implements safe, bounds-checked extraction of primitive types from byte
//! buffers, preventing overruns while walking record and blob layouts. Everything in the
//! format is little-endian, and the library never writes the format back, so only the
//! little-endian read surface exists.
//!
//! # Key Components
//!
//! - [`crate::file::io::MppIO`] - Trait defining little-endian decoding for primitive types
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at a specific offset with auto-advance
//!
//! The [`crate::file::io::MppIO`] trait is implemented for the scalar set the format
//! actually uses: `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64` and `f64`.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use mppscope::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: u16 = read_le_at(&data, &mut offset)?; // offset: 2 -> 4
//! let third: u32 = read_le_at(&data, &mut offset)?;  // offset: 4 -> 8
//!
//! assert_eq!((first, second, third), (1, 2, 3));
//! # Ok::<(), mppscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Result<T>`] and fail with
//! [`crate::Error::OutOfBounds`] if there are insufficient bytes in the buffer. Callers
//! in the decode path usually translate that into "field absent" rather than propagating.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data reading operations.
///
/// This trait provides a unified interface for decoding primitive types from byte slices
/// in the little-endian order used throughout the MPP container format. It abstracts over
/// the conversion from fixed-size byte arrays to typed values.
///
/// Each implementation defines a `Bytes` associated type representing the fixed-size
/// byte array required for that particular type (e.g. `[u8; 4]` for `u32`).
pub trait MppIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    ///
    /// This type must be convertible from a byte slice and is used for reading
    /// binary data in little-endian format.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_mpp_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl MppIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_mpp_io! {
    u8  => 1,
    i8  => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer.
///
/// This function reads from the beginning of the buffer and supports all types that
/// implement the [`crate::file::io::MppIO`] trait.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust,ignore
/// use mppscope::file::io::read_le;
///
/// let data = [0x01, 0x00, 0x00, 0x00];
/// let value: u32 = read_le(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), mppscope::Error>(())
/// ```
pub fn read_le<T: MppIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// This function reads from the specified offset and automatically advances the offset
/// by the number of bytes read.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes; the offset is
/// left unchanged in that case.
pub fn read_le_at<T: MppIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}

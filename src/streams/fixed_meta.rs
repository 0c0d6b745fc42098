//! Fixed-size record metadata (`FixedMeta`) storage
//!
//! Each `FixedMeta` stream describes the records of a companion `FixedData`
//! stream. Every item carries a flag word and the byte offset of the matching
//! record in the companion stream.

use bitflags::bitflags;

use crate::{file::io::read_le, Result};

const MAGIC: u32 = 0xFADF_ADBA;
const HEADER_SIZE: usize = 16;

bitflags! {
    /// Per-record flag word stored at the start of each metadata item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordFlags: u32 {
        /// The companion record has been deleted.
        const DELETED = 0x0000_0002;
    }
}

/// A parsed `FixedMeta` stream
///
/// The header carries an item count, but that count is not always reliable. The
/// authoritative count is derived from the stream length and the item size, and
/// is exposed through [`FixedMeta::adjusted_item_count`].
///
/// # Examples
///
/// ```rust,no_run
/// use mppscope::streams::FixedMeta;
///
/// let data = std::fs::read("FixedMeta").unwrap();
/// let meta = FixedMeta::from(&data, 8).unwrap();
/// for index in 0..meta.adjusted_item_count() {
///     println!("record {index} starts at {:?}", meta.data_offset(index));
/// }
/// ```
pub struct FixedMeta<'a> {
    item_count: u32,
    items: Vec<&'a [u8]>,
}

impl<'a> FixedMeta<'a> {
    /// Create a `FixedMeta` object using a known item size
    ///
    /// # Arguments
    /// * 'data'        - The byte slice from which this object shall be created
    /// * 'item_size'   - The size in bytes of each metadata item
    ///
    /// # Errors
    /// Returns an error if the magic number is wrong, the header is truncated,
    /// or the item size is zero
    pub fn from(data: &'a [u8], item_size: usize) -> Result<FixedMeta<'a>> {
        if data.len() < HEADER_SIZE {
            return Err(malformed_error!("Data for FixedMeta stream is too small"));
        }

        if read_le::<u32>(data)? != MAGIC {
            return Err(malformed_error!("Invalid FixedMeta magic number"));
        }

        if item_size == 0 {
            return Err(malformed_error!("FixedMeta item size must not be zero"));
        }

        let item_count = read_le::<u32>(&data[8..])?;
        let adjusted = (data.len() - HEADER_SIZE) / item_size;
        let items = data[HEADER_SIZE..]
            .chunks_exact(item_size)
            .take(adjusted)
            .collect();

        Ok(FixedMeta { item_count, items })
    }

    /// Create a `FixedMeta` object by choosing the item size from candidates
    ///
    /// The file format does not record the metadata item size, so it must be
    /// inferred. A candidate that divides the stream evenly and yields the same
    /// item count as the companion data stream wins outright. Otherwise the
    /// evenly-dividing candidate whose implied stream length comes closest to
    /// the actual length without exceeding it is used.
    ///
    /// # Arguments
    /// * 'data'            - The byte slice from which this object shall be created
    /// * 'companion_count' - Item count of the companion `FixedData` stream
    /// * 'item_sizes'      - Candidate item sizes, first entry is the fallback
    ///
    /// # Errors
    /// Returns an error if the magic number is wrong, the header is truncated,
    /// or no candidate sizes are supplied
    pub fn with_candidate_sizes(
        data: &'a [u8],
        companion_count: usize,
        item_sizes: &[usize],
    ) -> Result<FixedMeta<'a>> {
        if data.len() < HEADER_SIZE {
            return Err(malformed_error!("Data for FixedMeta stream is too small"));
        }

        let Some(&fallback) = item_sizes.first() else {
            return Err(malformed_error!("No candidate FixedMeta item sizes"));
        };

        let header_count = read_le::<u32>(&data[8..])? as i64;
        let available = data.len() - HEADER_SIZE;

        let mut item_size = fallback;
        let mut distance = i64::MIN;

        for &candidate in item_sizes {
            if candidate == 0 || available % candidate != 0 {
                continue;
            }

            if available / candidate == companion_count {
                item_size = candidate;
                break;
            }

            let test_distance = header_count * candidate as i64 - available as i64;
            if test_distance <= 0 && test_distance > distance {
                item_size = candidate;
                distance = test_distance;
            }
        }

        Self::from(data, item_size)
    }

    /// Returns the item count reported by the stream header
    pub fn item_count(&self) -> usize {
        self.item_count as usize
    }

    /// Returns the item count derived from the stream length
    pub fn adjusted_item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the raw metadata item at the given index
    pub fn item(&self, index: usize) -> Option<&'a [u8]> {
        self.items.get(index).copied()
    }

    /// Returns the flag word of the item at the given index
    ///
    /// Missing or undersized items report an empty flag set.
    pub fn flags(&self, index: usize) -> RecordFlags {
        match self.item(index).and_then(|item| read_le::<u32>(item).ok()) {
            Some(bits) => RecordFlags::from_bits_truncate(bits),
            None => RecordFlags::empty(),
        }
    }

    /// Returns the companion data offset of the item at the given index
    pub fn data_offset(&self, index: usize) -> Option<i32> {
        self.item(index)
            .and_then(|item| read_le::<i32>(&item[4.min(item.len())..]).ok())
    }
}

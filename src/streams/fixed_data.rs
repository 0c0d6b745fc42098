//! Fixed-size record (`FixedData`) storage
//!
//! `FixedData` streams hold one record per entity. Despite the name the records
//! are not uniformly sized, they have a known maximum size and their boundaries
//! are recovered from the offsets in the companion [`FixedMeta`] stream.

use crate::streams::FixedMeta;

struct FixedItem<'a> {
    offset: usize,
    data: &'a [u8],
}

/// A parsed `FixedData` stream
///
/// Records are addressed by index, in the order their metadata items appear.
/// Indices whose metadata carried an unusable offset have no record.
pub struct FixedData<'a> {
    items: Vec<Option<FixedItem<'a>>>,
}

impl<'a> FixedData<'a> {
    /// Create a `FixedData` object using record boundaries from a metadata stream
    ///
    /// Each record runs from its own offset to the next item's offset, the last
    /// record extends to the end of the stream. A record whose computed length
    /// is zero is given `min_size` bytes instead. Negative or overlong lengths
    /// are clamped to the remaining stream, capped at `max_expected_size` when
    /// that is non-zero.
    ///
    /// # Arguments
    /// * 'meta'                - Metadata stream describing the record layout
    /// * 'data'                - The byte slice from which records are taken
    /// * 'max_expected_size'   - Upper bound on record length, zero to disable
    /// * 'min_size'            - Length used for records reported as empty
    pub fn from_meta(
        meta: &FixedMeta<'_>,
        data: &'a [u8],
        max_expected_size: usize,
        min_size: usize,
    ) -> FixedData<'a> {
        let item_count = meta.adjusted_item_count();
        let mut items: Vec<Option<FixedItem<'a>>> = Vec::with_capacity(item_count);

        for index in 0..item_count {
            let offset = match meta.data_offset(index) {
                Some(value) if value >= 0 && (value as usize) <= data.len() => value as usize,
                _ => {
                    items.push(None);
                    continue;
                }
            };

            let mut size: i64 = if index + 1 == item_count {
                (data.len() - offset) as i64
            } else {
                match meta.data_offset(index + 1) {
                    Some(next) => i64::from(next) - offset as i64,
                    None => (data.len() - offset) as i64,
                }
            };

            if size == 0 {
                size = min_size as i64;
            }

            let available = (data.len() - offset) as i64;
            if size < 0 || size > available {
                size = if max_expected_size == 0 {
                    available
                } else {
                    available.min(max_expected_size as i64)
                };
            }

            if max_expected_size != 0 && size > max_expected_size as i64 {
                size = max_expected_size as i64;
            }

            if size > 0 {
                items.push(Some(FixedItem {
                    offset,
                    data: &data[offset..offset + size as usize],
                }));
            } else {
                items.push(None);
            }
        }

        FixedData { items }
    }

    /// Create a `FixedData` object from uniformly sized records
    ///
    /// Used for streams that have no usable metadata. Trailing bytes that do
    /// not fill a whole record are ignored.
    pub fn from_items(data: &'a [u8], item_size: usize) -> FixedData<'a> {
        if item_size == 0 {
            return FixedData { items: Vec::new() };
        }

        let items = data
            .chunks_exact(item_size)
            .enumerate()
            .map(|(index, chunk)| {
                Some(FixedItem {
                    offset: index * item_size,
                    data: chunk,
                })
            })
            .collect();

        FixedData { items }
    }

    /// Returns the number of record slots in this stream
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the record at the given index
    pub fn item(&self, index: usize) -> Option<&'a [u8]> {
        self.items.get(index)?.as_ref().map(|item| item.data)
    }

    /// Returns the index of the record starting at the given stream offset
    pub fn index_from_offset(&self, offset: usize) -> Option<usize> {
        self.items.iter().position(|item| match item {
            Some(item) => item.offset == offset,
            None => false,
        })
    }
}

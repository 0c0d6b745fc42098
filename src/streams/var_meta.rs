//! Variable-length record metadata (`VarMeta`) storage
//!
//! A `VarMeta` stream is the index over a companion [`Var2Data`] stream. Each
//! entry ties an entity unique id and a type key to the offset of a value blob.
//!
//! [`Var2Data`]: crate::streams::Var2Data

use std::collections::BTreeMap;

use crate::{file::io::read_le_at, Result};

const MAGIC: u32 = 0xFADF_ADBA;
const HEADER_SIZE: usize = 24;

/// Layout of the index entries in a `VarMeta` stream.
///
/// The entry layout changed between file generations. Older files use 8 byte
/// entries with a 3 byte unique id and a single byte type key, newer files use
/// 12 byte entries with 4 byte ids and offsets and a 2 byte type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarMetaLayout {
    /// 8 byte entries: 3 byte unique id, 1 byte type key, 4 byte offset.
    Compact,
    /// 12 byte entries: 4 byte unique id, 4 byte offset, 2 byte type key, 2 byte padding.
    Extended,
}

/// A parsed `VarMeta` stream
///
/// Builds a two-level index from entity unique id to type key to blob offset.
/// Parsing stops at the first truncated entry, which tolerates streams whose
/// header over-reports the entry count.
pub struct VarMeta {
    item_count: u32,
    data_size: u32,
    table: BTreeMap<u32, BTreeMap<u16, u32>>,
    offsets: Vec<u32>,
}

impl VarMeta {
    /// Create a `VarMeta` object from an index stream
    ///
    /// # Arguments
    /// * 'data'    - The byte slice from which this object shall be created
    /// * 'layout'  - The entry layout used by this file generation
    ///
    /// # Errors
    /// Returns an error if the header is truncated or the magic number is
    /// wrong. Extended-layout streams are additionally allowed a zero magic
    /// number, which some writers emit.
    pub fn from(data: &[u8], layout: VarMetaLayout) -> Result<VarMeta> {
        if data.len() < HEADER_SIZE {
            return Err(malformed_error!("Data for VarMeta stream is too small"));
        }

        let mut offset = 0;
        let magic = read_le_at::<u32>(data, &mut offset)?;
        let magic_ok = match layout {
            VarMetaLayout::Compact => magic == MAGIC,
            VarMetaLayout::Extended => magic == MAGIC || magic == 0,
        };
        if !magic_ok {
            return Err(malformed_error!("Invalid VarMeta magic number"));
        }

        let _unknown = read_le_at::<u32>(data, &mut offset)?;
        let item_count = read_le_at::<u32>(data, &mut offset)?;
        let _unknown = read_le_at::<u32>(data, &mut offset)?;
        let _unknown = read_le_at::<u32>(data, &mut offset)?;
        let data_size = read_le_at::<u32>(data, &mut offset)?;

        let entry_size = match layout {
            VarMetaLayout::Compact => 8,
            VarMetaLayout::Extended => 12,
        };

        let mut table: BTreeMap<u32, BTreeMap<u16, u32>> = BTreeMap::new();
        let mut offsets = Vec::new();

        for _ in 0..item_count {
            if data.len().saturating_sub(offset) < entry_size {
                break;
            }

            let (unique_id, type_key, item_offset) = match layout {
                VarMetaLayout::Compact => {
                    let unique_id = u32::from(data[offset])
                        | u32::from(data[offset + 1]) << 8
                        | u32::from(data[offset + 2]) << 16;
                    let type_key = u16::from(data[offset + 3]);
                    offset += 4;
                    let item_offset = read_le_at::<u32>(data, &mut offset)?;
                    (unique_id, type_key, item_offset)
                }
                VarMetaLayout::Extended => {
                    let unique_id = read_le_at::<u32>(data, &mut offset)?;
                    let item_offset = read_le_at::<u32>(data, &mut offset)?;
                    let type_key = read_le_at::<u16>(data, &mut offset)?;
                    let _padding = read_le_at::<u16>(data, &mut offset)?;
                    (unique_id, type_key, item_offset)
                }
            };

            table
                .entry(unique_id)
                .or_default()
                .insert(type_key, item_offset);
            offsets.push(item_offset);
        }

        offsets.sort_unstable();

        Ok(VarMeta {
            item_count,
            data_size,
            table,
            offsets,
        })
    }

    /// Returns the entry count reported by the stream header
    pub fn item_count(&self) -> usize {
        self.item_count as usize
    }

    /// Returns the companion data stream size reported by the header
    pub fn data_size(&self) -> usize {
        self.data_size as usize
    }

    /// Returns the blob offset recorded for an entity and type key
    pub fn offset(&self, unique_id: u32, type_key: u16) -> Option<u32> {
        self.table.get(&unique_id)?.get(&type_key).copied()
    }

    /// Returns true if any entry exists for the given entity
    pub fn contains(&self, unique_id: u32) -> bool {
        self.table.contains_key(&unique_id)
    }

    /// Returns an iterator over all entity unique ids present in the index
    pub fn unique_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.table.keys().copied()
    }

    /// Returns an iterator over the type keys recorded for an entity
    pub fn type_keys(&self, unique_id: u32) -> impl Iterator<Item = u16> + '_ {
        self.table
            .get(&unique_id)
            .into_iter()
            .flat_map(|types| types.keys().copied())
    }

    /// All blob offsets in ascending order.
    pub(crate) fn sorted_offsets(&self) -> &[u32] {
        &self.offsets
    }
}

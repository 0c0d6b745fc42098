//! Variable-length record (`Var2Data`) storage
//!
//! `Var2Data` streams hold the variable-length values of a category, each blob
//! prefixed by a 4 byte size. Blobs are located through the companion
//! [`VarMeta`] index and addressed by entity unique id and type key.

use std::collections::BTreeMap;

use crate::{
    file::{convert, io::read_le},
    model::Timestamp,
    streams::VarMeta,
};

/// A parsed `Var2Data` stream
///
/// Blobs whose size prefix is negative or runs past the end of the stream are
/// dropped, which tolerates corrupt files. The typed accessors return `None`
/// when the blob is absent or too short for the requested value.
pub struct Var2Data<'a> {
    meta: &'a VarMeta,
    map: BTreeMap<u32, &'a [u8]>,
}

impl<'a> Var2Data<'a> {
    /// Create a `Var2Data` object from a value stream and its index
    ///
    /// # Arguments
    /// * 'meta'    - The index stream locating each blob
    /// * 'data'    - The byte slice from which blobs are taken
    pub fn from(meta: &'a VarMeta, data: &'a [u8]) -> Var2Data<'a> {
        let mut map = BTreeMap::new();

        for &offset in meta.sorted_offsets() {
            let start = offset as usize;
            if start >= data.len() {
                continue;
            }

            let size = match read_le::<i32>(&data[start..]) {
                Ok(value) => value,
                Err(_) => continue,
            };

            if size < 0 {
                continue;
            }

            let body = start + 4;
            let size = size as usize;
            if size > data.len() - body {
                continue;
            }

            map.insert(offset, &data[body..body + size]);
        }

        Var2Data { meta, map }
    }

    /// Returns the index this stream was built against
    pub fn meta(&self) -> &'a VarMeta {
        self.meta
    }

    /// Returns the raw blob stored for an entity and type key
    pub fn bytes(&self, unique_id: u32, type_key: u16) -> Option<&'a [u8]> {
        let offset = self.meta.offset(unique_id, type_key)?;
        self.map.get(&offset).copied()
    }

    /// Returns the blob for an entity and type key as a UTF-16 string
    pub fn unicode_string(&self, unique_id: u32, type_key: u16) -> Option<String> {
        self.bytes(unique_id, type_key)
            .map(|blob| convert::unicode_string(blob, 0))
    }

    /// Returns the blob for an entity and type key as a single byte string
    pub fn ascii_string(&self, unique_id: u32, type_key: u16) -> Option<String> {
        self.bytes(unique_id, type_key)
            .map(|blob| convert::ascii_string(blob, 0))
    }

    /// Returns the blob for an entity and type key as a timestamp
    pub fn timestamp(&self, unique_id: u32, type_key: u16) -> Option<Timestamp> {
        self.bytes(unique_id, type_key)
            .and_then(|blob| convert::timestamp(blob, 0))
    }

    /// Returns the blob for an entity and type key as a single byte
    pub fn byte(&self, unique_id: u32, type_key: u16) -> Option<u8> {
        self.bytes(unique_id, type_key)
            .and_then(|blob| read_le::<u8>(blob).ok())
    }

    /// Returns the blob for an entity and type key as a 16-bit value
    pub fn short(&self, unique_id: u32, type_key: u16) -> Option<u16> {
        self.bytes(unique_id, type_key)
            .and_then(|blob| read_le::<u16>(blob).ok())
    }

    /// Returns the blob for an entity and type key as a 32-bit value
    pub fn int(&self, unique_id: u32, type_key: u16) -> Option<i32> {
        self.bytes(unique_id, type_key)
            .and_then(|blob| read_le::<i32>(blob).ok())
    }

    /// Returns the blob for an entity and type key as a 64-bit float
    pub fn double(&self, unique_id: u32, type_key: u16) -> Option<f64> {
        self.bytes(unique_id, type_key)
            .and_then(|blob| read_le::<f64>(blob).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::VarMetaLayout;

    const MAGIC: u32 = 0xFADF_ADBA;

    fn meta_stream(entries: &[(u32, u32, u16)], data_size: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&data_size.to_le_bytes());
        for (unique_id, offset, type_key) in entries {
            data.extend_from_slice(&unique_id.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&type_key.to_le_bytes());
            data.extend_from_slice(&0_u16.to_le_bytes());
        }
        data
    }

    fn blob(value: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(value.len() as i32).to_le_bytes());
        data.extend_from_slice(value);
        data
    }

    #[test]
    fn crafted() {
        let meta_data = meta_stream(&[(1, 0, 14), (1, 10, 21), (2, 18, 14)], 32);
        let meta = VarMeta::from(&meta_data, VarMetaLayout::Extended).unwrap();

        let mut name = Vec::new();
        for unit in "Ok".encode_utf16() {
            name.extend_from_slice(&unit.to_le_bytes());
        }
        name.extend_from_slice(&[0x00, 0x00]);

        let mut data = Vec::new();
        data.extend_from_slice(&blob(&name));
        data.extend_from_slice(&blob(&500_i32.to_le_bytes()));
        data.extend_from_slice(&blob(&7_u16.to_le_bytes()));

        let var = Var2Data::from(&meta, &data);

        assert_eq!(var.unicode_string(1, 14).as_deref(), Some("Ok"));
        assert_eq!(var.int(1, 21), Some(500));
        assert_eq!(var.short(2, 14), Some(7));
        assert_eq!(var.bytes(2, 21), None);
        assert_eq!(var.meta().item_count(), 3);
    }

    #[test]
    fn oversized_blob_is_dropped() {
        let meta_data = meta_stream(&[(1, 0, 14)], 8);
        let meta = VarMeta::from(&meta_data, VarMetaLayout::Extended).unwrap();

        let mut data = Vec::new();
        data.extend_from_slice(&100_i32.to_le_bytes());
        data.extend_from_slice(&[0xFF; 4]);

        let var = Var2Data::from(&meta, &data);
        assert_eq!(var.bytes(1, 14), None);
    }

    #[test]
    fn negative_size_is_dropped() {
        let meta_data = meta_stream(&[(1, 0, 14)], 8);
        let meta = VarMeta::from(&meta_data, VarMetaLayout::Extended).unwrap();

        let mut data = Vec::new();
        data.extend_from_slice(&(-4_i32).to_le_bytes());
        data.extend_from_slice(&[0xFF; 4]);

        let var = Var2Data::from(&meta, &data);
        assert_eq!(var.bytes(1, 14), None);
    }

    #[test]
    fn offset_past_end_is_dropped() {
        let meta_data = meta_stream(&[(1, 50, 14)], 8);
        let meta = VarMeta::from(&meta_data, VarMetaLayout::Extended).unwrap();

        let var = Var2Data::from(&meta, &[0_u8; 8]);
        assert_eq!(var.bytes(1, 14), None);
    }

    #[test]
    fn short_blob_fails_typed_reads() {
        let meta_data = meta_stream(&[(1, 0, 14)], 8);
        let meta = VarMeta::from(&meta_data, VarMetaLayout::Extended).unwrap();

        let data = blob(&[0x2A, 0x00]);
        let var = Var2Data::from(&meta, &data);

        assert_eq!(var.short(1, 14), Some(42));
        assert_eq!(var.int(1, 14), None);
        assert_eq!(var.double(1, 14), None);
        assert_eq!(var.byte(1, 14), Some(0x2A));
    }
}

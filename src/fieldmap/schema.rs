//! Field schema construction from descriptor blocks.
//!
//! A descriptor block is a stream of fixed 28-byte entries, one per mapped
//! field, embedded in the category directory's property bag. Each entry names
//! a field by its 32-bit id and says where the value lives. Construction is
//! pure layout work; no value decoding happens here.

use std::collections::BTreeMap;

use crate::{
    file::io::read_le,
    fieldmap::{defaults, GenerationConfig},
    model::{EntityKind, Field},
    streams::Props,
};

const ENTRY_SIZE: usize = 28;
const NO_FIXED_OFFSET: u16 = 0xFFFF;
const META_CATEGORY_BLOCK0: i16 = 0x0B;
const META_CATEGORY_BLOCK1: i16 = 0x64;
const MAX_RECORD_SETS: usize = 2;

/// Storage location of one mapped field.
///
/// Exactly one variant applies to a field; the variant is fixed at schema
/// construction time and never changes during a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Inside the entity's fixed-size record at a byte offset
    FixedData {
        /// Which of the interleaved fixed record sets holds the value
        record_set: usize,
        /// Byte offset within the record
        offset: usize,
    },
    /// In the variable-length blob store under a type key
    VarData {
        /// The blob store type key
        key: u16,
    },
    /// A bit inside a small fixed meta block.
    ///
    /// This engine records the block assignment and the descriptor's mask word
    /// but never derives a concrete bit position; meta bits are decoded by
    /// generation-specific callers.
    MetaBit {
        /// Meta block index (0 or 1)
        block: usize,
        /// Mask word carried by the descriptor entry
        mask: u32,
    },
    /// The descriptor named no usable location
    Unknown,
}

/// Tracks the fixed-record layout while descriptor entries are folded in.
///
/// The format interleaves up to two fixed record sets in one descriptor
/// stream and disambiguates them only by offset order: an entry whose offset
/// is smaller than the previous entry's starts the next record set.
struct Layout {
    record_set: usize,
    last_offset: Option<u16>,
    max_size: [usize; MAX_RECORD_SETS],
}

impl Layout {
    fn new() -> Layout {
        Layout {
            record_set: 0,
            last_offset: None,
            max_size: [0; MAX_RECORD_SETS],
        }
    }

    /// Place a fixed entry, returning its record set and offset.
    fn place(&mut self, offset: u16, width: usize) -> (usize, usize) {
        if let Some(last) = self.last_offset {
            if offset < last && self.record_set + 1 < MAX_RECORD_SETS {
                self.record_set += 1;
            }
        }
        self.last_offset = Some(offset);

        let end = offset as usize + width;
        if end > self.max_size[self.record_set] {
            self.max_size[self.record_set] = end;
        }

        (self.record_set, offset as usize)
    }
}

/// The field-to-location map of one entity category.
///
/// Built once per category per read, read-only afterwards and discarded with
/// the stores it was built against.
pub struct FieldSchema {
    kind: EntityKind,
    entries: BTreeMap<Field, FieldLocation>,
    max_fixed_record_size: [usize; MAX_RECORD_SETS],
}

impl FieldSchema {
    /// Create a `FieldSchema` object from the category directory's property bag
    ///
    /// Looks up the category's primary and secondary descriptor blobs and
    /// falls back to the generation default schema when neither is present.
    ///
    /// # Arguments
    /// * 'config'  - The generation configuration
    /// * 'kind'    - The entity category this schema describes
    /// * 'props'   - The category directory's property bag, if present
    #[must_use]
    pub fn from_props(
        config: &GenerationConfig,
        kind: EntityKind,
        props: Option<&Props<'_>>,
    ) -> FieldSchema {
        let Some(props) = props else {
            return FieldSchema::default_for(kind);
        };

        let (primary, secondary) = config.descriptor_keys(kind);
        let mut blobs: Vec<&[u8]> = Vec::new();
        if let Some(blob) = props.bytes(primary) {
            blobs.push(blob);
        }
        if let Some(blob) = secondary.and_then(|key| props.bytes(key)) {
            blobs.push(blob);
        }

        if blobs.is_empty() {
            return FieldSchema::default_for(kind);
        }
        FieldSchema::from_descriptor(config, kind, &blobs)
    }

    /// Create a `FieldSchema` object from raw descriptor blobs
    ///
    /// Blobs are treated as one concatenated entry stream; a trailing partial
    /// entry is ignored. Entries whose field id does not resolve still drive
    /// the record-set layout but are dropped from typed access.
    ///
    /// # Arguments
    /// * 'config'  - The generation configuration
    /// * 'kind'    - The entity category this schema describes
    /// * 'blobs'   - The descriptor blobs, primary first
    #[must_use]
    pub fn from_descriptor(
        config: &GenerationConfig,
        kind: EntityKind,
        blobs: &[&[u8]],
    ) -> FieldSchema {
        let mut entries = BTreeMap::new();
        let mut layout = Layout::new();

        for blob in blobs {
            for entry in blob.chunks_exact(ENTRY_SIZE) {
                let Ok(mask) = read_le::<u32>(entry) else {
                    continue;
                };
                let Ok(fixed_offset) = read_le::<u16>(&entry[4..]) else {
                    continue;
                };
                let var_key_byte = entry[6];
                let Ok(field_id) = read_le::<u32>(&entry[12..]) else {
                    continue;
                };
                let Ok(category) = read_le::<i16>(&entry[20..]) else {
                    continue;
                };

                let field = config.field_from_id(field_id);

                let location = match category {
                    META_CATEGORY_BLOCK0 => FieldLocation::MetaBit { block: 0, mask },
                    META_CATEGORY_BLOCK1 => FieldLocation::MetaBit { block: 1, mask },
                    _ if fixed_offset != NO_FIXED_OFFSET => {
                        let width = field.map_or(0, |field| field.data_type().fixed_width());
                        let (record_set, offset) = layout.place(fixed_offset, width);
                        FieldLocation::FixedData { record_set, offset }
                    }
                    _ => {
                        let key = config.var_key(field, field_id, var_key_byte);
                        if key != 0 {
                            FieldLocation::VarData { key }
                        } else {
                            FieldLocation::Unknown
                        }
                    }
                };

                if let Some(field) = field {
                    entries.insert(field, location);
                }
            }
        }

        FieldSchema {
            kind,
            entries,
            max_fixed_record_size: layout.max_size,
        }
    }

    /// Create the generation default `FieldSchema` for a category
    ///
    /// Used when a file carries no descriptor block for the category.
    #[must_use]
    pub fn default_for(kind: EntityKind) -> FieldSchema {
        let mut entries = BTreeMap::new();
        let mut layout = Layout::new();

        for (field, slot) in defaults::entries(kind) {
            let location = match slot {
                defaults::Slot::Fixed(offset) => {
                    let width = field.data_type().fixed_width();
                    let (record_set, offset) = layout.place(*offset, width);
                    FieldLocation::FixedData { record_set, offset }
                }
                defaults::Slot::Var(key) => FieldLocation::VarData { key: *key },
            };
            entries.insert(*field, location);
        }

        FieldSchema {
            kind,
            entries,
            max_fixed_record_size: layout.max_size,
        }
    }

    /// Returns the entity category this schema describes
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the storage location of a field
    pub fn location(&self, field: Field) -> Option<FieldLocation> {
        self.entries.get(&field).copied()
    }

    /// Returns the record set and byte offset of a fixed-data field
    pub fn fixed_offset(&self, field: Field) -> Option<(usize, usize)> {
        match self.location(field)? {
            FieldLocation::FixedData { record_set, offset } => Some((record_set, offset)),
            _ => None,
        }
    }

    /// Returns the blob store type key of a var-data field
    pub fn var_key(&self, field: Field) -> Option<u16> {
        match self.location(field)? {
            FieldLocation::VarData { key } => Some(key),
            _ => None,
        }
    }

    /// Returns the largest byte offset plus field width seen in a record set
    ///
    /// Records shorter than this are rejected as a whole by the decoder.
    pub fn max_fixed_record_size(&self, record_set: usize) -> usize {
        self.max_fixed_record_size
            .get(record_set)
            .copied()
            .unwrap_or(0)
    }

    /// Returns an iterator over all mapped fields and their locations
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldLocation)> + '_ {
        self.entries.iter().map(|(field, location)| (*field, *location))
    }

    /// Returns the number of mapped fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::FileFormat,
        model::{TaskField, TASK_FIELD_BASE},
    };

    fn entry(field_id: u32, fixed_offset: u16, var_key: u8, category: i16) -> [u8; ENTRY_SIZE] {
        let mut data = [0_u8; ENTRY_SIZE];
        data[4..6].copy_from_slice(&fixed_offset.to_le_bytes());
        data[6] = var_key;
        data[12..16].copy_from_slice(&field_id.to_le_bytes());
        data[20..22].copy_from_slice(&category.to_le_bytes());
        data
    }

    fn entry_with_mask(mask: u32, field_id: u32, category: i16) -> [u8; ENTRY_SIZE] {
        let mut data = entry(field_id, NO_FIXED_OFFSET, 0, category);
        data[0..4].copy_from_slice(&mask.to_le_bytes());
        data
    }

    #[test]
    fn fixed_entries_build_one_record_set() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 35, 16, 0, 0)); // Start
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 36, 20, 0, 0)); // Finish
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 5, 24, 0, 0)); // Cost

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::Start)),
            Some((0, 16))
        );
        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::Cost)),
            Some((0, 24))
        );
        // Cost is 8 bytes wide at offset 24.
        assert_eq!(schema.max_fixed_record_size(0), 32);
        assert_eq!(schema.max_fixed_record_size(1), 0);
    }

    #[test]
    fn offset_rewind_starts_second_record_set() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 35, 16, 0, 0)); // Start, set 0
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 36, 20, 0, 0)); // Finish, set 0
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 43, 4, 0, 0)); // BaselineStart, set 1
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 44, 8, 0, 0)); // BaselineFinish, set 1

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::Finish)),
            Some((0, 20))
        );
        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::BaselineStart)),
            Some((1, 4))
        );
        assert_eq!(schema.max_fixed_record_size(0), 24);
        assert_eq!(schema.max_fixed_record_size(1), 12);
    }

    #[test]
    fn record_sets_cap_at_two() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 35, 16, 0, 0));
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 36, 4, 0, 0)); // rewind, set 1
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 41, 0, 0, 0)); // rewind again, stays set 1

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::ActualStart)),
            Some((1, 0))
        );
    }

    #[test]
    fn var_key_from_field_id_for_mpp14() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let blob = entry(TASK_FIELD_BASE | 14, NO_FIXED_OFFSET, 99, 0);

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(schema.var_key(Field::Task(TaskField::Name)), Some(14));
    }

    #[test]
    fn var_key_from_descriptor_byte_for_mpp9() {
        let config = GenerationConfig::new(FileFormat::Mpp9);
        let blob = entry(TASK_FIELD_BASE | 14, NO_FIXED_OFFSET, 99, 0);

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(schema.var_key(Field::Task(TaskField::Name)), Some(99));
    }

    #[test]
    fn zero_var_key_is_unknown() {
        let config = GenerationConfig::new(FileFormat::Mpp9);
        let blob = entry(TASK_FIELD_BASE | 14, NO_FIXED_OFFSET, 0, 0);

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(
            schema.location(Field::Task(TaskField::Name)),
            Some(FieldLocation::Unknown)
        );
    }

    #[test]
    fn meta_categories_map_to_blocks() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        blob.extend_from_slice(&entry_with_mask(0x0010, TASK_FIELD_BASE | 161, 0x0B));
        blob.extend_from_slice(&entry_with_mask(0x0200, TASK_FIELD_BASE | 162, 0x64));

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(
            schema.location(Field::Task(TaskField::CustomFlag(1))),
            Some(FieldLocation::MetaBit {
                block: 0,
                mask: 0x0010
            })
        );
        assert_eq!(
            schema.location(Field::Task(TaskField::CustomFlag(2))),
            Some(FieldLocation::MetaBit {
                block: 1,
                mask: 0x0200
            })
        );
    }

    #[test]
    fn unresolved_field_still_drives_layout() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        // Unknown index 999 at offset 48 pushes the record size
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 35, 16, 0, 0));
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 999, 48, 0, 0));

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(schema.len(), 1);
        assert_eq!(schema.max_fixed_record_size(0), 48);
    }

    #[test]
    fn trailing_partial_entry_is_ignored() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let mut blob = Vec::new();
        blob.extend_from_slice(&entry(TASK_FIELD_BASE | 35, 16, 0, 0));
        blob.extend_from_slice(&[0xFF; 10]);

        let schema = FieldSchema::from_descriptor(&config, EntityKind::Task, &[&blob]);

        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn secondary_blob_continues_the_stream() {
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let primary = entry(TASK_FIELD_BASE | 35, 16, 0, 0);
        let secondary = entry(TASK_FIELD_BASE | 43, 4, 0, 0); // rewind into set 1

        let schema =
            FieldSchema::from_descriptor(&config, EntityKind::Task, &[&primary, &secondary]);

        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::BaselineStart)),
            Some((1, 4))
        );
    }

    #[test]
    fn missing_descriptor_falls_back_to_default() {
        let config = GenerationConfig::new(FileFormat::Mpp9);

        let schema = FieldSchema::from_props(&config, EntityKind::Task, None);

        assert!(!schema.is_empty());
        assert_eq!(schema.var_key(Field::Task(TaskField::Name)), Some(14));
        assert_eq!(
            schema.fixed_offset(Field::Task(TaskField::Duration)),
            Some((0, 8))
        );
        assert!(schema.max_fixed_record_size(0) > 0);
    }

    #[test]
    fn default_schemas_exist_for_every_category() {
        for kind in [EntityKind::Task, EntityKind::Resource, EntityKind::Assignment] {
            let schema = FieldSchema::default_for(kind);
            assert_eq!(schema.kind(), kind);
            assert!(!schema.is_empty());
        }
    }
}

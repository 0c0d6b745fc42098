//! Custom field value table construction and resolution.
//!
//! The value table lives in its own container directory. Each item joins a
//! primary fixed record (parent link), a secondary fixed record (GUIDs and
//! type code) and keyed blobs (the literal value and a description); the
//! item's unique id is the blob store entity id.

use std::collections::{BTreeMap, HashSet};

use crate::{
    custom::{CustomFieldValueItem, CustomValue},
    file::{convert, file_names, io::read_le, StreamProvider},
    fieldmap::GenerationConfig,
    model::{DataType, Field, FieldValue, ProjectDefaults},
    streams::{FixedData, FixedMeta, Var2Data, VarMeta},
    Result,
};

/// Blob type key of the literal value.
const VALUE_KEY: u16 = 22;
/// Blob type key of the description text.
const DESCRIPTION_KEY: u16 = 8;

/// Metadata item size of the value-list fixed stores.
const FIXED_META_ITEM_SIZE: usize = 10;

/// The first three fixed records are internal bookkeeping.
const FIRST_ITEM_INDEX: usize = 3;

/// Byte offset of the parent unique id in the primary fixed record.
const PARENT_OFFSET: usize = 8;
/// Byte offset of the field GUID in the secondary fixed record.
const FIELD_GUID_OFFSET: usize = 32;
/// Byte offset of the type code in the secondary fixed record.
const TYPE_CODE_OFFSET: usize = 48;

/// The project-wide custom field value table.
///
/// Read once per file from the value-list directory; the decoder resolves
/// value-list references against it for the rest of the read.
#[derive(Debug, Default)]
pub struct CustomFieldValues {
    items: BTreeMap<u32, CustomFieldValueItem>,
}

impl CustomFieldValues {
    /// Create a `CustomFieldValues` table from already-built items
    ///
    /// # Arguments
    /// * 'items'   - The table items, keyed by their own unique ids
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CustomFieldValueItem>) -> CustomFieldValues {
        CustomFieldValues {
            items: items
                .into_iter()
                .map(|item| (item.unique_id, item))
                .collect(),
        }
    }

    /// Create a `CustomFieldValues` table from the value-list directory streams
    ///
    /// A file without the directory or its streams yields an empty table;
    /// items whose records are missing or truncated keep what could be read.
    ///
    /// # Arguments
    /// * 'provider'    - The container stream provider
    /// * 'config'      - The generation configuration
    /// * 'defaults'    - Project defaults scaling duration literals
    ///
    /// # Errors
    /// Returns an error if a present stream fails structural parsing or the
    /// provider fails to retrieve a stream
    pub fn from_provider(
        provider: &impl StreamProvider,
        config: &GenerationConfig,
        defaults: &ProjectDefaults,
    ) -> Result<CustomFieldValues> {
        let dir = file_names::OUTLINE_CODE_DIR;
        if !provider.has_directory(dir) {
            return Ok(CustomFieldValues::default());
        }

        let Some(var_meta_data) = provider.stream(Some(dir), file_names::VAR_META)? else {
            return Ok(CustomFieldValues::default());
        };
        let Some(var_data) = provider.stream(Some(dir), file_names::VAR2_DATA)? else {
            return Ok(CustomFieldValues::default());
        };

        let var_meta = VarMeta::from(&var_meta_data, config.var_meta_layout())?;
        let var = Var2Data::from(&var_meta, &var_data);

        let fixed_meta_data = provider.stream(Some(dir), file_names::FIXED_META)?;
        let fixed_data = provider.stream(Some(dir), file_names::FIXED_DATA)?;
        let fixed2_meta_data = provider.stream(Some(dir), file_names::FIXED2_META)?;
        let fixed2_data = provider.stream(Some(dir), file_names::FIXED2_DATA)?;

        let fixed_meta = match &fixed_meta_data {
            Some(data) => Some(FixedMeta::from(data, FIXED_META_ITEM_SIZE)?),
            None => None,
        };
        let fixed = match (&fixed_meta, &fixed_data) {
            (Some(meta), Some(data)) => Some(FixedData::from_meta(meta, data, 0, 0)),
            _ => None,
        };

        let fixed2_meta = match &fixed2_meta_data {
            Some(data) => Some(FixedMeta::from(data, FIXED_META_ITEM_SIZE)?),
            None => None,
        };
        let fixed2 = match (&fixed2_meta, &fixed2_data) {
            (Some(meta), Some(data)) => Some(FixedData::from_meta(meta, data, 0, 0)),
            _ => None,
        };

        let mut items = BTreeMap::new();
        for (index, unique_id) in var_meta.unique_ids().enumerate() {
            let record_index = index + FIRST_ITEM_INDEX;

            let parent_id = fixed
                .as_ref()
                .and_then(|fixed| fixed.item(record_index))
                .and_then(|record| record.get(PARENT_OFFSET..))
                .and_then(|slice| read_le::<u16>(slice).ok())
                .map_or(0, u32::from);

            let record2 = fixed2.as_ref().and_then(|fixed| fixed.item(record_index));
            let guid = record2.and_then(|record| convert::guid(record, 0));
            let field_guid = record2.and_then(|record| convert::guid(record, FIELD_GUID_OFFSET));
            let type_code = record2
                .and_then(|record| record.get(TYPE_CODE_OFFSET..))
                .and_then(|slice| read_le::<u16>(slice).ok());

            let value = match (var.bytes(unique_id, VALUE_KEY), type_code) {
                (Some(blob), Some(code)) => CustomValue::from_type_code(code, blob, defaults),
                (Some(blob), None) => CustomValue::Raw(blob.to_vec()),
                (None, _) => CustomValue::Raw(Vec::new()),
            };

            items.insert(
                unique_id,
                CustomFieldValueItem {
                    unique_id,
                    parent_id,
                    value,
                    description: var.unicode_string(unique_id, DESCRIPTION_KEY),
                    guid,
                    field_guid,
                },
            );
        }

        Ok(CustomFieldValues { items })
    }

    /// Returns true if the table holds an item with the given unique id
    #[must_use]
    pub fn contains(&self, unique_id: u32) -> bool {
        self.items.contains_key(&unique_id)
    }

    /// Returns the item with the given unique id
    #[must_use]
    pub fn get(&self, unique_id: u32) -> Option<&CustomFieldValueItem> {
        self.items.get(&unique_id)
    }

    /// Returns the number of items in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a value-list reference for a field
    ///
    /// Outline code fields resolve to the dot-joined ancestor path. Scalar
    /// fields resolve to the item's literal only when its kind matches the
    /// field's declared type; a mismatch or a raw literal yields `None`.
    ///
    /// # Arguments
    /// * 'field'       - The field whose blob carried the reference
    /// * 'unique_id'   - The referenced item's unique id
    #[must_use]
    pub fn resolve(&self, field: Field, unique_id: u32) -> Option<FieldValue> {
        if field.is_outline_code() {
            let mut visited = HashSet::new();
            return Some(FieldValue::Text(self.outline_path(unique_id, &mut visited)));
        }

        let item = self.get(unique_id)?;
        let value = match (field.data_type(), &item.value) {
            (DataType::String, CustomValue::Text(text)) => FieldValue::Text(text.clone()),
            (DataType::Date, CustomValue::Date(timestamp)) => FieldValue::Date(*timestamp),
            (DataType::Duration, CustomValue::Duration(duration)) => {
                FieldValue::Duration(*duration)
            }
            (DataType::Numeric, CustomValue::Number(value)) => FieldValue::Number(*value),
            (DataType::Currency, CustomValue::Currency(value)) => FieldValue::Currency(*value),
            _ => return None,
        };
        Some(value)
    }

    /// The dot-joined ancestor path of an outline code item.
    ///
    /// Id 0 is the forest root and resolves empty. The visited set stops a
    /// corrupt parent cycle; the walk then returns the partial path built so
    /// far instead of recursing unboundedly.
    fn outline_path(&self, unique_id: u32, visited: &mut HashSet<u32>) -> String {
        if unique_id == 0 || !visited.insert(unique_id) {
            return String::new();
        }
        let Some(item) = self.get(unique_id) else {
            return String::new();
        };

        let own = item.value.path_segment();
        let parent = self.outline_path(item.parent_id, visited);

        if parent.is_empty() {
            own
        } else {
            format!("{parent}.{own}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{FileFormat, MemoryStreams},
        model::{ResourceField, TaskField},
    };

    #[test]
    fn scalar_resolution_requires_kind_match() {
        let values = CustomFieldValues::from_items(vec![
            CustomFieldValueItem::text(1, 0, "North America"),
            CustomFieldValueItem {
                unique_id: 2,
                parent_id: 0,
                value: CustomValue::Number(42.0),
                description: None,
                guid: None,
                field_guid: None,
            },
        ]);

        assert_eq!(
            values.resolve(Field::Task(TaskField::CustomText(1)), 1),
            Some(FieldValue::Text("North America".into()))
        );
        assert_eq!(
            values.resolve(Field::Task(TaskField::CustomNumber(1)), 2),
            Some(FieldValue::Number(42.0))
        );
        // Text literal does not match a date field
        assert_eq!(values.resolve(Field::Task(TaskField::CustomDate(1)), 1), None);
        assert_eq!(values.resolve(Field::Task(TaskField::CustomText(1)), 99), None);
    }

    #[test]
    fn outline_chain_resolves_to_dotted_path() {
        let values = CustomFieldValues::from_items(vec![
            CustomFieldValueItem::text(1, 0, "A"),
            CustomFieldValueItem::text(2, 1, "B"),
            CustomFieldValueItem::text(3, 2, "C"),
        ]);

        let value = values.resolve(Field::Task(TaskField::OutlineCode(1)), 3);

        assert_eq!(value, Some(FieldValue::Text("A.B.C".into())));
    }

    #[test]
    fn outline_self_parent_terminates() {
        let values = CustomFieldValues::from_items(vec![CustomFieldValueItem::text(1, 1, "A")]);

        let value = values.resolve(Field::Resource(ResourceField::OutlineCode(1)), 1);

        assert_eq!(value, Some(FieldValue::Text("A".into())));
    }

    #[test]
    fn outline_cycle_returns_partial_path() {
        // 1 -> 2 -> 3 -> 1
        let values = CustomFieldValues::from_items(vec![
            CustomFieldValueItem::text(1, 3, "A"),
            CustomFieldValueItem::text(2, 1, "B"),
            CustomFieldValueItem::text(3, 2, "C"),
        ]);

        let value = values.resolve(Field::Task(TaskField::OutlineCode(1)), 3);

        assert_eq!(value, Some(FieldValue::Text("A.B.C".into())));
    }

    #[test]
    fn missing_outline_item_is_empty() {
        let values = CustomFieldValues::from_items(Vec::new());

        let value = values.resolve(Field::Task(TaskField::OutlineCode(1)), 5);

        assert_eq!(value, Some(FieldValue::Text(String::new())));
    }

    fn var_meta_stream(entries: &[(u32, u32, u16)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0xFADF_ADBA_u32.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&[0_u8; 8]);
        data.extend_from_slice(&4096_u32.to_le_bytes());
        for (unique_id, offset, type_key) in entries {
            data.extend_from_slice(&unique_id.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&type_key.to_le_bytes());
            data.extend_from_slice(&0_u16.to_le_bytes());
        }
        data
    }

    fn fixed_meta_stream(offsets: &[u32]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0xFADF_ADBA_u32.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(offsets.len() as u32).to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        for offset in offsets {
            data.extend_from_slice(&0_u32.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
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

    fn unicode(text: &str) -> Vec<u8> {
        let mut data = Vec::new();
        for unit in text.encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0x00, 0x00]);
        data
    }

    #[test]
    fn table_from_directory_streams() {
        let dir = file_names::OUTLINE_CODE_DIR;
        let mut provider = MemoryStreams::new();

        // One item, unique id 40: text value under key 22, description key 8
        let value = unicode("North America");
        let description = unicode("Region");
        let mut var_data = Vec::new();
        let value_offset = var_data.len() as u32;
        var_data.extend_from_slice(&blob(&value));
        let description_offset = var_data.len() as u32;
        var_data.extend_from_slice(&blob(&description));

        provider.insert(
            Some(dir),
            file_names::VAR_META,
            var_meta_stream(&[
                (40, value_offset, VALUE_KEY),
                (40, description_offset, DESCRIPTION_KEY),
            ]),
        );
        provider.insert(Some(dir), file_names::VAR2_DATA, var_data);

        // Primary fixed: records 0..4, the item's record at index 3 with
        // parent unique id 12 at offset 8
        let mut fixed_data = vec![0_u8; 40];
        fixed_data[38..40].copy_from_slice(&12_u16.to_le_bytes());
        provider.insert(
            Some(dir),
            file_names::FIXED_META,
            fixed_meta_stream(&[0, 10, 20, 30]),
        );
        provider.insert(Some(dir), file_names::FIXED_DATA, fixed_data);

        // Secondary fixed: 50-byte records, type code 21 (text) at offset 48
        let mut fixed2_data = vec![0_u8; 200];
        fixed2_data[150] = 0xAA; // value guid, first byte
        fixed2_data[198..200].copy_from_slice(&21_u16.to_le_bytes());
        provider.insert(
            Some(dir),
            file_names::FIXED2_META,
            fixed_meta_stream(&[0, 50, 100, 150]),
        );
        provider.insert(Some(dir), file_names::FIXED2_DATA, fixed2_data);

        let config = GenerationConfig::new(FileFormat::Mpp14);
        let defaults = ProjectDefaults::default();
        let values = CustomFieldValues::from_provider(&provider, &config, &defaults).unwrap();

        assert_eq!(values.len(), 1);
        let item = values.get(40).unwrap();
        assert_eq!(item.parent_id, 12);
        assert_eq!(item.value, CustomValue::Text("North America".into()));
        assert_eq!(item.description.as_deref(), Some("Region"));
        assert!(item.guid.is_some());
    }

    #[test]
    fn missing_directory_yields_empty_table() {
        let provider = MemoryStreams::new();
        let config = GenerationConfig::new(FileFormat::Mpp9);
        let defaults = ProjectDefaults::default();

        let values = CustomFieldValues::from_provider(&provider, &config, &defaults).unwrap();

        assert!(values.is_empty());
    }

    #[test]
    fn sentinel_round_trip_single_item() {
        let values =
            CustomFieldValues::from_items(vec![CustomFieldValueItem::text(7, 0, "North America")]);

        let value = values.resolve(Field::Task(TaskField::CustomText(1)), 7);

        assert_eq!(value, Some(FieldValue::Text("North America".into())));
    }
}

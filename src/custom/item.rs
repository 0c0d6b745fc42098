//! Custom field value table items.

use uguid::Guid;

use crate::{
    file::{convert, io::read_le},
    model::{Duration, ProjectDefaults, Timestamp},
};

/// Value-list type code for dates.
const TYPE_DATE: u16 = 4;
/// Value-list type code for durations.
const TYPE_DURATION: u16 = 6;
/// Value-list type code for costs.
const TYPE_COST: u16 = 9;
/// Value-list type code for numbers.
const TYPE_NUMBER: u16 = 15;
/// Value-list type codes for text.
const TYPE_TEXT: u16 = 21;
const TYPE_TEXT_ALT: u16 = 36_058;

/// The literal payload of one value table item.
///
/// Items whose type code is unknown keep their raw bytes; raw values never
/// kind-match a declared field type and resolve to nothing for scalar fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomValue {
    /// Text literal
    Text(String),
    /// Date literal
    Date(Timestamp),
    /// Duration literal
    Duration(Duration),
    /// Cost literal, already scaled down
    Currency(f64),
    /// Numeric literal
    Number(f64),
    /// Bytes of an unknown type code
    Raw(Vec<u8>),
}

impl CustomValue {
    /// Decode a literal from its value-list type code
    ///
    /// # Arguments
    /// * 'type_code'   - The item's type code from the secondary fixed record
    /// * 'data'        - The raw value blob
    /// * 'defaults'    - Project defaults scaling duration literals
    #[must_use]
    pub fn from_type_code(type_code: u16, data: &[u8], defaults: &ProjectDefaults) -> CustomValue {
        match type_code {
            TYPE_DATE => match convert::timestamp(data, 0) {
                Some(timestamp) => CustomValue::Date(timestamp),
                None => CustomValue::Raw(data.to_vec()),
            },
            TYPE_DURATION => {
                let raw = read_le::<i32>(data).ok();
                let code = data.get(4..).and_then(|slice| read_le::<u16>(slice).ok());
                match (raw, code) {
                    (Some(raw), Some(code)) => {
                        let units = convert::duration_units(code, defaults.duration_units);
                        match convert::adjusted_duration(defaults, raw, units) {
                            Some(duration) => CustomValue::Duration(duration),
                            None => CustomValue::Raw(data.to_vec()),
                        }
                    }
                    _ => CustomValue::Raw(data.to_vec()),
                }
            }
            TYPE_COST => match convert::currency(data, 0) {
                Some(value) => CustomValue::Currency(value),
                None => CustomValue::Raw(data.to_vec()),
            },
            TYPE_NUMBER => match convert::double(data, 0) {
                Some(value) => CustomValue::Number(value),
                None => CustomValue::Raw(data.to_vec()),
            },
            TYPE_TEXT | TYPE_TEXT_ALT => CustomValue::Text(convert::unicode_string(data, 0)),
            _ => CustomValue::Raw(data.to_vec()),
        }
    }

    /// The literal rendered for an outline code path segment.
    ///
    /// Raw values render empty; everything else uses its display form.
    #[must_use]
    pub fn path_segment(&self) -> String {
        match self {
            CustomValue::Text(text) => text.clone(),
            CustomValue::Date(timestamp) => timestamp.to_string(),
            CustomValue::Duration(duration) => duration.to_string(),
            CustomValue::Currency(value) | CustomValue::Number(value) => value.to_string(),
            CustomValue::Raw(_) => String::new(),
        }
    }
}

/// One item of the custom field value table.
///
/// Items form a forest through `parent_id`; the table guards resolution
/// against corrupt parent cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldValueItem {
    /// Unique id the value-list sentinel references
    pub unique_id: u32,
    /// Unique id of the parent item, 0 for roots
    pub parent_id: u32,
    /// The literal payload
    pub value: CustomValue,
    /// Optional description text
    pub description: Option<String>,
    /// GUID of the value itself
    pub guid: Option<Guid>,
    /// GUID of the custom field the value belongs to
    pub field_guid: Option<Guid>,
}

impl CustomFieldValueItem {
    /// Create a text item, the common case for outline code tables
    ///
    /// # Arguments
    /// * 'unique_id'   - Unique id the sentinel references
    /// * 'parent_id'   - Unique id of the parent item, 0 for roots
    /// * 'text'        - The text literal
    #[must_use]
    pub fn text(unique_id: u32, parent_id: u32, text: &str) -> CustomFieldValueItem {
        CustomFieldValueItem {
            unique_id,
            parent_id,
            value: CustomValue::Text(text.to_owned()),
            description: None,
            guid: None,
            field_guid: None,
        }
    }
}

//! Keyed property bag (`Props`) storage
//!
//! Provides access to the property-bag streams found in project files. A `Props`
//! stream is a flat dictionary of integer keys mapped to raw byte values, used for
//! project-level settings and for the field map descriptors consumed by
//! [`crate::fieldmap::FieldSchema`].
//!
//! # Layout
//!
//! A 16 byte header carries the item count as a 16-bit value at offset 12. Each item
//! is a 12 byte preamble (size, key, padding as 32-bit values) followed by `size`
//! content bytes, padded to a 2 byte boundary.

use std::collections::BTreeMap;

use crate::{
    file::convert,
    file::io::{read_le, read_le_at},
    model::Timestamp,
    Result,
};

/// Property key holding the project start date.
pub const PROJECT_START_DATE: u32 = 37_748_738;
/// Property key holding the project finish date.
pub const PROJECT_FINISH_DATE: u32 = 37_748_739;
/// Property key holding the scheduling direction.
pub const SCHEDULE_FROM: u32 = 37_748_740;
/// Property key holding the default duration units code.
pub const DURATION_UNITS: u32 = 37_748_757;
/// Property key holding the default work units code.
pub const WORK_UNITS: u32 = 37_748_758;
/// Property key holding the number of working minutes per day.
pub const MINUTES_PER_DAY: u32 = 37_748_765;
/// Property key holding the number of working minutes per week.
pub const MINUTES_PER_WEEK: u32 = 37_748_766;
/// Property key holding the number of working days per month.
pub const DAYS_PER_MONTH: u32 = 37_753_743;
/// Property key holding the default calendar working hours.
pub const DEFAULT_CALENDAR_HOURS: u32 = 37_753_736;

/// Property key holding the primary task field map descriptor.
pub const TASK_FIELD_MAP: u32 = 131_092;
/// Property key holding the secondary task field map descriptor.
pub const TASK_FIELD_MAP2: u32 = 50_331_668;
/// Property key holding the primary resource field map descriptor.
pub const RESOURCE_FIELD_MAP: u32 = 131_093;
/// Property key holding the secondary resource field map descriptor.
pub const RESOURCE_FIELD_MAP2: u32 = 50_331_669;
/// Property key holding the relation field map descriptor.
pub const RELATION_FIELD_MAP: u32 = 131_094;
/// Property key holding the primary assignment field map descriptor.
pub const ASSIGNMENT_FIELD_MAP: u32 = 131_095;
/// Property key holding the secondary assignment field map descriptor.
pub const ASSIGNMENT_FIELD_MAP2: u32 = 50_331_671;
/// Property key holding the enterprise custom field map descriptor.
pub const ENTERPRISE_CUSTOM_FIELD_MAP: u32 = 37_753_797;

const HEADER_SIZE: usize = 16;

/// A parsed `Props` stream, a dictionary of integer keys to raw byte values
///
/// The `Props` object provides typed accessors over the raw values, converting
/// the little-endian wire formats on demand. Absent keys and undersized values
/// yield `None` rather than an error.
///
/// # Examples
///
/// ```rust,no_run
/// use mppscope::streams::Props;
///
/// let data = std::fs::read("Props").unwrap();
/// let props = Props::from(&data).unwrap();
/// if let Some(minutes) = props.int(mppscope::streams::props::MINUTES_PER_DAY) {
///     println!("minutes per day: {minutes}");
/// }
/// ```
pub struct Props<'a> {
    map: BTreeMap<u32, &'a [u8]>,
}

impl<'a> Props<'a> {
    /// Create a `Props` object from the contents of a property-bag stream
    ///
    /// Parsing stops at the first item whose declared size is less than one byte
    /// or larger than the remaining stream, which tolerates truncated files.
    ///
    /// # Arguments
    /// * 'data'    - The byte slice from which this object shall be created
    ///
    /// # Errors
    /// Returns an error if the data is too small to contain the stream header
    pub fn from(data: &'a [u8]) -> Result<Props<'a>> {
        if data.len() < HEADER_SIZE {
            return Err(malformed_error!("Data for Props stream is too small"));
        }

        let count = read_le::<u16>(&data[12..])?;

        let mut map = BTreeMap::new();
        let mut offset = HEADER_SIZE;
        let mut found = 0_u16;

        while found < count {
            if data.len().saturating_sub(offset) < 12 {
                break;
            }

            let item_size = read_le_at::<i32>(data, &mut offset)?;
            let item_key = read_le_at::<i32>(data, &mut offset)?;
            let _padding = read_le_at::<i32>(data, &mut offset)?;

            if item_size < 1 {
                break;
            }

            let item_size = item_size as usize;
            if item_size > data.len() - offset {
                break;
            }

            map.insert(item_key as u32, &data[offset..offset + item_size]);
            offset += item_size;

            // Values are padded to a 2 byte boundary
            if item_size % 2 != 0 {
                offset += 1;
            }

            found += 1;
        }

        Ok(Props { map })
    }

    /// Returns the raw value bytes stored under the given key
    pub fn bytes(&self, key: u32) -> Option<&'a [u8]> {
        self.map.get(&key).copied()
    }

    /// Returns the value stored under the given key as a single byte
    pub fn byte(&self, key: u32) -> Option<u8> {
        self.map.get(&key).and_then(|item| read_le::<u8>(item).ok())
    }

    /// Returns the value stored under the given key as a 16-bit value
    pub fn short(&self, key: u32) -> Option<u16> {
        self.map
            .get(&key)
            .and_then(|item| read_le::<u16>(item).ok())
    }

    /// Returns the value stored under the given key as a 32-bit value
    pub fn int(&self, key: u32) -> Option<i32> {
        self.map
            .get(&key)
            .and_then(|item| read_le::<i32>(item).ok())
    }

    /// Returns the value stored under the given key as a 64-bit float
    pub fn double(&self, key: u32) -> Option<f64> {
        self.map
            .get(&key)
            .and_then(|item| read_le::<f64>(item).ok())
    }

    /// Returns the value stored under the given key as a boolean
    ///
    /// Booleans are stored as 16-bit values where any non-zero value is true.
    pub fn boolean(&self, key: u32) -> Option<bool> {
        self.short(key).map(|value| value != 0)
    }

    /// Returns the value stored under the given key as a timestamp
    pub fn timestamp(&self, key: u32) -> Option<Timestamp> {
        self.map
            .get(&key)
            .and_then(|item| convert::timestamp(item, 0))
    }

    /// Returns the value stored under the given key as a date
    pub fn date(&self, key: u32) -> Option<Timestamp> {
        self.map.get(&key).and_then(|item| convert::date(item, 0))
    }

    /// Returns the value stored under the given key as a UTF-16 string
    pub fn unicode_string(&self, key: u32) -> Option<String> {
        self.map
            .get(&key)
            .map(|item| convert::unicode_string(item, 0))
    }

    /// Returns an iterator over all keys present in this property bag
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.map.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(items: &[(u32, &[u8])], declared_count: u16) -> Vec<u8> {
        let mut data = vec![0_u8; HEADER_SIZE];
        data[12..14].copy_from_slice(&declared_count.to_le_bytes());

        for (key, value) in items {
            data.extend_from_slice(&(value.len() as i32).to_le_bytes());
            data.extend_from_slice(&(*key as i32).to_le_bytes());
            data.extend_from_slice(&0_i32.to_le_bytes());
            data.extend_from_slice(value);
            if value.len() % 2 != 0 {
                data.push(0);
            }
        }

        data
    }

    #[test]
    fn crafted() {
        let data = build(
            &[
                (MINUTES_PER_DAY, &480_i32.to_le_bytes()),
                (SCHEDULE_FROM, &1_u16.to_le_bytes()),
            ],
            2,
        );

        let props = Props::from(&data).unwrap();

        assert_eq!(props.int(MINUTES_PER_DAY), Some(480));
        assert_eq!(props.short(SCHEDULE_FROM), Some(1));
        assert_eq!(props.int(MINUTES_PER_WEEK), None);
        assert_eq!(props.keys().collect::<Vec<_>>().len(), 2);
    }

    #[test]
    fn odd_sized_value_is_padded() {
        // A 3 byte value forces a padding byte before the next item
        let data = build(&[(1, &[0x2A, 0x00, 0x00]), (2, &[0x07, 0x00])], 2);

        let props = Props::from(&data).unwrap();

        assert_eq!(props.byte(1), Some(0x2A));
        assert_eq!(props.short(2), Some(7));
    }

    #[test]
    fn unicode_value() {
        let mut value = Vec::new();
        for unit in "Test".encode_utf16() {
            value.extend_from_slice(&unit.to_le_bytes());
        }
        value.extend_from_slice(&[0x00, 0x00]);

        let data = build(&[(42, &value)], 1);
        let props = Props::from(&data).unwrap();

        assert_eq!(props.unicode_string(42).as_deref(), Some("Test"));
    }

    #[test]
    fn stops_on_oversized_item() {
        let mut data = build(&[(1, &100_i32.to_le_bytes())], 2);
        // Declare a second item larger than the remaining stream
        data.extend_from_slice(&1000_i32.to_le_bytes());
        data.extend_from_slice(&2_i32.to_le_bytes());
        data.extend_from_slice(&0_i32.to_le_bytes());
        data.extend_from_slice(&[0xFF; 4]);

        let props = Props::from(&data).unwrap();

        assert_eq!(props.int(1), Some(100));
        assert_eq!(props.bytes(2), None);
    }

    #[test]
    fn stops_on_non_positive_size() {
        let mut data = build(&[], 1);
        data.extend_from_slice(&0_i32.to_le_bytes());
        data.extend_from_slice(&9_i32.to_le_bytes());
        data.extend_from_slice(&0_i32.to_le_bytes());

        let props = Props::from(&data).unwrap();
        assert_eq!(props.bytes(9), None);
    }

    #[test]
    fn rejects_short_header() {
        assert!(Props::from(&[0_u8; 8]).is_err());
    }

    #[test]
    fn boolean_reads_short() {
        let data = build(&[(5, &[0x01, 0x00]), (6, &[0x00, 0x00])], 2);
        let props = Props::from(&data).unwrap();

        assert_eq!(props.boolean(5), Some(true));
        assert_eq!(props.boolean(6), Some(false));
        assert_eq!(props.boolean(7), None);
    }
}

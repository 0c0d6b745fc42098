//! Type-directed field value decoding.
//!
//! The decoder walks a [`FieldSchema`] entry to the raw bytes and applies the
//! transform the field's declared [`DataType`] calls for. Decoding never
//! fails: malformed bytes make that one field absent and the caller defaults,
//! matching the recovery posture of the stores.

use crate::{
    custom::CustomFieldValues,
    file::{convert, io::read_le},
    fieldmap::{FieldLocation, FieldSchema},
    model::{
        AccrueType, BookingType, ConstraintType, DataType, EarnedValueMethod, Field, FieldValue,
        Priority, ProjectDefaults, Rate, ResourceRequestType, TaskType, TimeUnit, WorkGroup,
    },
    streams::Var2Data,
};

/// Leading 2 bytes of a blob masked with this select the value-list sentinel.
const VALUE_LIST_MASK: u16 = 0xFF00;
/// Sentinel marking a blob as an index into the custom value list.
const VALUE_LIST_SENTINEL: u16 = 0x0700;

/// Blob length at which a date or duration slot actually holds a string.
///
/// Some generations reuse the slot for literal text; the reuse is detected by
/// this raw length, not by the declared type.
const REUSED_STRING_BLOB_SIZE: usize = 512;

/// Read one little-endian value at `offset`, or `None` past the end.
fn read_at<T: crate::file::io::MppIO>(data: &[u8], offset: usize) -> Option<T> {
    data.get(offset..).and_then(|slice| read_le(slice).ok())
}

/// Decodes field values for one entity category.
///
/// Borrows the schema, the project defaults that scale raw durations, and
/// optionally the custom value table for value-list indirection. Decoding is
/// pure: repeated calls with unchanged inputs return equal values.
pub struct FieldDecoder<'a> {
    schema: &'a FieldSchema,
    defaults: &'a ProjectDefaults,
    values: Option<&'a CustomFieldValues>,
}

impl<'a> FieldDecoder<'a> {
    /// Create a `FieldDecoder` object without value-list resolution
    ///
    /// # Arguments
    /// * 'schema'      - The schema locating each field
    /// * 'defaults'    - Project scheduling defaults for duration scaling
    #[must_use]
    pub fn new(schema: &'a FieldSchema, defaults: &'a ProjectDefaults) -> FieldDecoder<'a> {
        FieldDecoder {
            schema,
            defaults,
            values: None,
        }
    }

    /// Create a `FieldDecoder` object that resolves value-list references
    ///
    /// # Arguments
    /// * 'schema'      - The schema locating each field
    /// * 'defaults'    - Project scheduling defaults for duration scaling
    /// * 'values'      - The project-wide custom value table
    #[must_use]
    pub fn with_values(
        schema: &'a FieldSchema,
        defaults: &'a ProjectDefaults,
        values: &'a CustomFieldValues,
    ) -> FieldDecoder<'a> {
        FieldDecoder {
            schema,
            defaults,
            values: Some(values),
        }
    }

    /// Returns the schema this decoder reads through
    #[must_use]
    pub fn schema(&self) -> &'a FieldSchema {
        self.schema
    }

    /// Decode one field of one entity
    ///
    /// Returns `None` for unmapped fields, meta bits, out-of-range locations
    /// and malformed bytes. A fixed record shorter than the record set's
    /// maximum size is rejected as a whole, so a truncated record never
    /// yields partially garbled values.
    ///
    /// # Arguments
    /// * 'field'       - The field to decode
    /// * 'unique_id'   - The entity's unique id, used to address the blob store
    /// * 'fixed'       - The entity's fixed records, indexed by record set
    /// * 'var'         - The category's variable-length blob store, if present
    #[must_use]
    pub fn decode(
        &self,
        field: Field,
        unique_id: u32,
        fixed: [Option<&[u8]>; 2],
        var: Option<&Var2Data<'_>>,
    ) -> Option<FieldValue> {
        match self.schema.location(field)? {
            FieldLocation::Unknown | FieldLocation::MetaBit { .. } => None,
            FieldLocation::FixedData { record_set, offset } => {
                let record = fixed.get(record_set).copied().flatten()?;
                if record.len() < self.schema.max_fixed_record_size(record_set) {
                    return None;
                }
                self.decode_fixed(field, unique_id, record, offset, fixed, var)
            }
            FieldLocation::VarData { key } => {
                let blob = var?.bytes(unique_id, key)?;
                self.decode_var(field, unique_id, blob, fixed, var)
            }
        }
    }

    /// Units of a duration field, decoded from its companion field.
    fn duration_units(
        &self,
        field: Field,
        unique_id: u32,
        fixed: [Option<&[u8]>; 2],
        var: Option<&Var2Data<'_>>,
    ) -> TimeUnit {
        field
            .units_companion()
            .and_then(|companion| self.decode(companion, unique_id, fixed, var))
            .and_then(|value| value.as_time_units())
            .unwrap_or(self.defaults.duration_units)
    }

    fn decode_fixed(
        &self,
        field: Field,
        unique_id: u32,
        record: &[u8],
        offset: usize,
        fixed: [Option<&[u8]>; 2],
        var: Option<&Var2Data<'_>>,
    ) -> Option<FieldValue> {
        let value = match field.data_type() {
            DataType::Date => FieldValue::Date(convert::timestamp(record, offset)?),
            DataType::Integer => FieldValue::Integer(read_at::<i32>(record, offset)?),
            DataType::Short => FieldValue::Integer(i32::from(read_at::<i16>(record, offset)?)),
            DataType::Boolean => FieldValue::Boolean(read_at::<u16>(record, offset)? != 0),
            DataType::Duration => {
                let raw = read_at::<i32>(record, offset)?;
                let units = self.duration_units(field, unique_id, fixed, var);
                FieldValue::Duration(convert::adjusted_duration(self.defaults, raw, units)?)
            }
            DataType::TimeUnits => {
                let code = read_at::<u16>(record, offset)?;
                FieldValue::TimeUnits(convert::duration_units(code, self.defaults.duration_units))
            }
            DataType::Currency => FieldValue::Currency(convert::currency(record, offset)?),
            DataType::Units => FieldValue::Number(convert::double(record, offset)? / 100.0),
            DataType::Rate => {
                FieldValue::Rate(Rate::new(convert::double(record, offset)?, TimeUnit::Hours))
            }
            DataType::Work => FieldValue::Duration(convert::work(record, offset)?),
            DataType::WorkUnits => {
                FieldValue::TimeUnits(convert::work_units(read_at::<u8>(record, offset)?)?)
            }
            DataType::Percentage => FieldValue::Percentage(convert::percentage(record, offset)?),
            DataType::Guid => FieldValue::Guid(convert::guid(record, offset)?),
            DataType::Delay => {
                let raw = read_at::<i16>(record, offset)?;
                FieldValue::Duration(convert::duration_value(f64::from(raw), TimeUnit::Minutes))
            }
            DataType::Constraint => {
                FieldValue::Constraint(ConstraintType::from_code(read_at::<u16>(record, offset)?))
            }
            DataType::Priority => {
                FieldValue::Priority(Priority::from_raw(read_at::<u16>(record, offset)?))
            }
            DataType::TaskType => {
                FieldValue::TaskType(TaskType::from_code(read_at::<u16>(record, offset)?))
            }
            DataType::Accrue => {
                FieldValue::Accrue(AccrueType::from_code(read_at::<u16>(record, offset)?))
            }
            DataType::Workgroup => {
                FieldValue::Workgroup(WorkGroup::from_code(read_at::<u16>(record, offset)?))
            }
            DataType::RateUnits => {
                FieldValue::TimeUnits(convert::rate_units(read_at::<u16>(record, offset)?))
            }
            DataType::EarnedValueMethod => FieldValue::EarnedValueMethod(
                EarnedValueMethod::from_code(read_at::<u16>(record, offset)?),
            ),
            DataType::ResourceRequestType => FieldValue::ResourceRequestType(
                ResourceRequestType::from_code(read_at::<u16>(record, offset)?),
            ),
            // Types without a fixed-data representation
            DataType::String
            | DataType::AsciiString
            | DataType::Numeric
            | DataType::BookingType
            | DataType::Binary => return None,
        };
        Some(value)
    }

    fn decode_var(
        &self,
        field: Field,
        unique_id: u32,
        blob: &[u8],
        fixed: [Option<&[u8]>; 2],
        var: Option<&Var2Data<'_>>,
    ) -> Option<FieldValue> {
        let data_type = field.data_type();

        if data_type.uses_value_list() {
            if let Some(lead) = read_at::<u16>(blob, 0) {
                if lead & VALUE_LIST_MASK == VALUE_LIST_SENTINEL {
                    if let Some(id) = read_at::<u32>(blob, 2) {
                        if let Some(values) = self.values {
                            if values.contains(id) {
                                return values.resolve(field, id);
                            }
                        }
                    }
                    // Sentinel without a resolvable index: treat as a literal.
                }
            }
        }

        if blob.len() == REUSED_STRING_BLOB_SIZE
            && matches!(data_type, DataType::Date | DataType::Duration)
        {
            return Some(FieldValue::Text(convert::unicode_string(blob, 0)));
        }

        let value = match data_type {
            DataType::String => FieldValue::Text(convert::unicode_string(blob, 0)),
            DataType::AsciiString => FieldValue::Text(convert::ascii_string(blob, 0)),
            DataType::Date => FieldValue::Date(convert::timestamp(blob, 0)?),
            DataType::Duration => {
                let raw = read_at::<i32>(blob, 0)?;
                let units = self.duration_units(field, unique_id, fixed, var);
                FieldValue::Duration(convert::adjusted_duration(self.defaults, raw, units)?)
            }
            DataType::TimeUnits => {
                let code = read_at::<u16>(blob, 0)?;
                FieldValue::TimeUnits(convert::duration_units(code, self.defaults.duration_units))
            }
            DataType::Integer => FieldValue::Integer(read_at::<i32>(blob, 0)?),
            DataType::Short => FieldValue::Integer(i32::from(read_at::<i16>(blob, 0)?)),
            DataType::Boolean => FieldValue::Boolean(read_at::<u16>(blob, 0)? != 0),
            DataType::Numeric => FieldValue::Number(convert::double(blob, 0)?),
            DataType::Currency => FieldValue::Currency(convert::currency(blob, 0)?),
            DataType::Units => FieldValue::Number(convert::double(blob, 0)? / 100.0),
            DataType::Rate => {
                FieldValue::Rate(Rate::new(convert::double(blob, 0)?, TimeUnit::Hours))
            }
            DataType::Work => FieldValue::Duration(convert::work(blob, 0)?),
            DataType::WorkUnits => {
                FieldValue::TimeUnits(convert::work_units(read_at::<u8>(blob, 0)?)?)
            }
            DataType::Percentage => FieldValue::Percentage(convert::percentage(blob, 0)?),
            DataType::Guid => FieldValue::Guid(convert::guid(blob, 0)?),
            DataType::Delay => {
                let raw = read_at::<i16>(blob, 0)?;
                FieldValue::Duration(convert::duration_value(f64::from(raw), TimeUnit::Minutes))
            }
            DataType::Constraint => {
                FieldValue::Constraint(ConstraintType::from_code(read_at::<u16>(blob, 0)?))
            }
            DataType::Priority => {
                FieldValue::Priority(Priority::from_raw(read_at::<u16>(blob, 0)?))
            }
            DataType::TaskType => {
                FieldValue::TaskType(TaskType::from_code(read_at::<u16>(blob, 0)?))
            }
            DataType::Accrue => {
                FieldValue::Accrue(AccrueType::from_code(read_at::<u16>(blob, 0)?))
            }
            DataType::Workgroup => {
                FieldValue::Workgroup(WorkGroup::from_code(read_at::<u16>(blob, 0)?))
            }
            DataType::RateUnits => {
                FieldValue::TimeUnits(convert::rate_units(read_at::<u16>(blob, 0)?))
            }
            DataType::EarnedValueMethod => FieldValue::EarnedValueMethod(
                EarnedValueMethod::from_code(read_at::<u16>(blob, 0)?),
            ),
            DataType::ResourceRequestType => FieldValue::ResourceRequestType(
                ResourceRequestType::from_code(read_at::<u16>(blob, 0)?),
            ),
            DataType::BookingType => {
                FieldValue::BookingType(BookingType::from_code(u16::from(read_at::<u8>(blob, 0)?)))
            }
            // Raw bytes are left for specialized callers
            DataType::Binary => return None,
        };
        Some(value)
    }
}

//! Resource assignment population.

use std::collections::BTreeMap;

use crate::{
    custom::CustomFieldValues,
    file::{file_names, StreamProvider},
    fieldmap::{FieldDecoder, FieldSchema, GenerationConfig},
    model::EntityKind,
    project::{Assignment, ProjectProperties},
    reader::{read_at, DirectoryStreams},
    streams::{FixedData, Var2Data, VarMeta},
    Result,
};

/// Read and populate the assignment directory
///
/// Assignments carry no usable meta stream; the fixed store is sliced into
/// uniform records of the schema's maximum record size.
pub(crate) fn read(
    provider: &impl StreamProvider,
    config: &GenerationConfig,
    properties: &ProjectProperties,
    values: &CustomFieldValues,
) -> Result<Vec<Assignment>> {
    let streams = DirectoryStreams::load(provider, file_names::ASSIGNMENT_DIR)?;
    let props = streams.parse_props()?;
    let schema = FieldSchema::from_props(config, EntityKind::Assignment, props.as_ref());

    let Some(fixed_data) = &streams.fixed_data else {
        return Ok(Vec::new());
    };
    let item_size = schema.max_fixed_record_size(0);
    if item_size == 0 {
        return Ok(Vec::new());
    }
    let fixed = FixedData::from_items(fixed_data, item_size);

    let var_meta = match &streams.var_meta {
        Some(data) => Some(VarMeta::from(data, config.var_meta_layout())?),
        None => None,
    };
    let var = match (&var_meta, &streams.var_data) {
        (Some(meta), Some(data)) => Some(Var2Data::from(meta, data)),
        _ => None,
    };

    let decoder = FieldDecoder::with_values(&schema, &properties.defaults, values);
    let mut assignments = Vec::new();

    for index in 0..fixed.item_count() {
        let Some(record) = fixed.item(index) else {
            continue;
        };
        let Some(unique_id) = read_at::<u32>(record, 0) else {
            continue;
        };

        let fixed_records = [Some(record), None];
        let mut fields = BTreeMap::new();
        for (field, _) in schema.fields() {
            if let Some(value) = decoder.decode(field, unique_id, fixed_records, var.as_ref()) {
                fields.insert(field, value);
            }
        }

        assignments.push(Assignment::new(unique_id, fields));
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{FileFormat, MemoryStreams};

    #[test]
    fn uniform_records_without_meta() {
        let dir = file_names::ASSIGNMENT_DIR;
        let mut provider = MemoryStreams::new();

        // The default schema spans 44 bytes per record: task unique id at
        // +4, resource unique id at +8, work at +20, units at +28
        let mut record0 = vec![0_u8; 44];
        record0[0..4].copy_from_slice(&1_u32.to_le_bytes());
        record0[4..8].copy_from_slice(&5_i32.to_le_bytes());
        record0[8..12].copy_from_slice(&2_i32.to_le_bytes());
        record0[20..28].copy_from_slice(&960_000.0_f64.to_le_bytes());
        record0[28..36].copy_from_slice(&100.0_f64.to_le_bytes());

        let mut record1 = vec![0_u8; 44];
        record1[0..4].copy_from_slice(&2_u32.to_le_bytes());
        record1[4..8].copy_from_slice(&6_i32.to_le_bytes());
        record1[8..12].copy_from_slice(&3_i32.to_le_bytes());

        let mut fixed_data = Vec::new();
        fixed_data.extend_from_slice(&record0);
        fixed_data.extend_from_slice(&record1);
        fixed_data.extend_from_slice(&[0_u8; 10]); // trailing partial record

        provider.insert(Some(dir), file_names::FIXED_DATA, fixed_data);

        let config = GenerationConfig::new(FileFormat::Mpp9);
        let properties = ProjectProperties::default();
        let values = CustomFieldValues::from_items(Vec::new());

        let assignments = read(&provider, &config, &properties, &values).unwrap();

        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].unique_id(), 1);
        assert_eq!(assignments[0].task_unique_id(), Some(5));
        assert_eq!(assignments[0].resource_unique_id(), Some(2));
        assert_eq!(assignments[0].work().unwrap().value, 16.0);
        assert_eq!(assignments[0].units(), Some(1.0));
        assert_eq!(assignments[1].task_unique_id(), Some(6));
    }

    #[test]
    fn missing_directory_yields_no_assignments() {
        let provider = MemoryStreams::new();
        let config = GenerationConfig::new(FileFormat::Mpp12);
        let properties = ProjectProperties::default();
        let values = CustomFieldValues::from_items(Vec::new());

        assert!(read(&provider, &config, &properties, &values)
            .unwrap()
            .is_empty());
    }
}

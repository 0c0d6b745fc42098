//! Resource population.

use std::collections::BTreeMap;

use crate::{
    custom::CustomFieldValues,
    file::{file_names, StreamProvider},
    fieldmap::{FieldDecoder, FieldSchema, GenerationConfig},
    model::EntityKind,
    order::{reconcile_identities, OrderedEntity},
    project::{ProjectProperties, Resource},
    reader::{read_at, DirectoryStreams},
    streams::{FixedData, FixedMeta, Var2Data, VarMeta},
    Result,
};

/// Byte offset of the ordering key in the secondary fixed record.
const SORT_KEY_OFFSET: usize = 16;

/// Read and populate the resource directory
///
/// Resources have no placeholder records; every fixed record long enough to
/// carry the identity pair is populated. Display ids are rebuilt the same way
/// task ids are, without placeholders to interleave.
pub(crate) fn read(
    provider: &impl StreamProvider,
    config: &GenerationConfig,
    properties: &ProjectProperties,
    values: &CustomFieldValues,
) -> Result<Vec<Resource>> {
    let streams = DirectoryStreams::load(provider, file_names::RESOURCE_DIR)?;
    let props = streams.parse_props()?;
    let schema = FieldSchema::from_props(config, EntityKind::Resource, props.as_ref());

    let (Some(meta_data), Some(fixed_data)) = (&streams.fixed_meta, &streams.fixed_data) else {
        return Ok(Vec::new());
    };
    let meta = FixedMeta::from(meta_data, config.fixed_meta_item_size(EntityKind::Resource))?;
    let fixed = FixedData::from_meta(&meta, fixed_data, 0, 0);

    let var_meta = match &streams.var_meta {
        Some(data) => Some(VarMeta::from(data, config.var_meta_layout())?),
        None => None,
    };
    let var = match (&var_meta, &streams.var_data) {
        (Some(meta), Some(data)) => Some(Var2Data::from(meta, data)),
        _ => None,
    };

    let fixed2_meta = match &streams.fixed2_meta {
        Some(data) => Some(FixedMeta::with_candidate_sizes(
            data,
            fixed.item_count(),
            config.fixed2_meta_item_sizes(),
        )?),
        None => None,
    };
    let fixed2 = match (&fixed2_meta, &streams.fixed2_data) {
        (Some(meta), Some(data)) => Some(FixedData::from_meta(meta, data, 0, 0)),
        _ => None,
    };

    let decoder = FieldDecoder::with_values(&schema, &properties.defaults, values);
    let mut ordered: Vec<OrderedEntity> = Vec::new();
    let mut resources: Vec<Resource> = Vec::new();
    let mut seen: BTreeMap<u32, ()> = BTreeMap::new();

    for index in 0..fixed.item_count() {
        let Some(record) = fixed.item(index) else {
            continue;
        };
        if record.len() < 8 {
            continue;
        }
        let Some(unique_id) = read_at::<u32>(record, 0) else {
            continue;
        };
        if seen.insert(unique_id, ()).is_some() {
            continue;
        }

        let record2 = fixed2.as_ref().and_then(|fixed2| fixed2.item(index));
        let fixed_records = [Some(record), record2];

        let id = read_at::<i32>(record, 4).unwrap_or(0);

        let mut fields = BTreeMap::new();
        for (field, _) in schema.fields() {
            if let Some(value) = decoder.decode(field, unique_id, fixed_records, var.as_ref()) {
                fields.insert(field, value);
            }
        }

        let key = record2
            .filter(|record| record.len() >= SORT_KEY_OFFSET + 8)
            .and_then(|record| read_at::<i64>(record, SORT_KEY_OFFSET))
            .unwrap_or(index as i64);

        ordered.push(OrderedEntity { unique_id, key });
        resources.push(Resource::new(unique_id, id, fields));
    }

    let assignment = reconcile_identities(EntityKind::Resource, &ordered, &[])?;
    for resource in &mut resources {
        if let Some(&id) = assignment.get(&resource.unique_id()) {
            resource.set_id(id);
        }
    }
    resources.sort_by_key(Resource::id);

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{FileFormat, MemoryStreams};

    const MAGIC: u32 = 0xFADF_ADBA;

    fn fixed_meta_stream(offsets: &[i32]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(offsets.len() as u32).to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        for offset in offsets {
            data.extend_from_slice(&0_u32.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
        }
        data
    }

    fn var_meta_stream(entries: &[(u32, u32, u16)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&[0_u8; 8]);
        data.extend_from_slice(&1024_u32.to_le_bytes());
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

    fn unicode(text: &str) -> Vec<u8> {
        let mut data = Vec::new();
        for unit in text.encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0x00, 0x00]);
        data
    }

    #[test]
    fn populates_resources_from_default_schema() {
        let dir = file_names::RESOURCE_DIR;
        let mut provider = MemoryStreams::new();

        // Two 48-byte records; the default schema reads cost at +8 and
        // work at +16
        let mut record0 = vec![0_u8; 48];
        record0[0..4].copy_from_slice(&2_u32.to_le_bytes());
        record0[4..8].copy_from_slice(&1_i32.to_le_bytes());
        record0[8..16].copy_from_slice(&240_000.0_f64.to_le_bytes());
        record0[16..24].copy_from_slice(&2_880_000.0_f64.to_le_bytes());

        let mut record1 = vec![0_u8; 48];
        record1[0..4].copy_from_slice(&3_u32.to_le_bytes());
        record1[4..8].copy_from_slice(&2_i32.to_le_bytes());

        let mut fixed_data = Vec::new();
        fixed_data.extend_from_slice(&record0);
        fixed_data.extend_from_slice(&record1);

        provider.insert(Some(dir), file_names::FIXED_META, fixed_meta_stream(&[0, 48]));
        provider.insert(Some(dir), file_names::FIXED_DATA, fixed_data);

        let name = unicode("Carpenter");
        provider.insert(
            Some(dir),
            file_names::VAR_META,
            var_meta_stream(&[(2, 0, 15)]),
        );
        provider.insert(Some(dir), file_names::VAR2_DATA, blob(&name));

        let config = GenerationConfig::new(FileFormat::Mpp9);
        let properties = ProjectProperties::default();
        let values = CustomFieldValues::from_items(Vec::new());

        let resources = read(&provider, &config, &properties, &values).unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].unique_id(), 2);
        assert_eq!(resources[0].id(), 1);
        assert_eq!(resources[0].name(), Some("Carpenter"));
        assert_eq!(resources[0].cost(), Some(2400.0));
        let work = resources[0].work().unwrap();
        assert_eq!(work.value, 48.0);
        assert_eq!(resources[1].unique_id(), 3);
        assert_eq!(resources[1].id(), 2);
    }

    #[test]
    fn missing_directory_yields_no_resources() {
        let provider = MemoryStreams::new();
        let config = GenerationConfig::new(FileFormat::Mpp14);
        let properties = ProjectProperties::default();
        let values = CustomFieldValues::from_items(Vec::new());

        assert!(read(&provider, &config, &properties, &values)
            .unwrap()
            .is_empty());
    }
}

//! Task population and validity screening.

use std::collections::{btree_map::Entry, BTreeMap};

use crate::{
    custom::CustomFieldValues,
    file::{file_names, StreamProvider},
    fieldmap::{FieldDecoder, FieldSchema, GenerationConfig},
    model::{EntityKind, Field, TaskField},
    order::{reconcile_identities, OrderedEntity, Placeholder},
    project::{ProjectProperties, Task},
    reader::{read_at, DirectoryStreams},
    streams::{FixedData, FixedMeta, RecordFlags, Var2Data, VarMeta},
    Result,
};

/// The first three fixed records are internal bookkeeping.
const FIRST_TASK_INDEX: usize = 3;

/// A record of exactly this length is a null placeholder task.
const NULL_TASK_RECORD_SIZE: usize = 8;

/// Byte offset of the ordering key in the secondary fixed record.
const SORT_KEY_OFFSET: usize = 16;

/// A record participates when its length reaches this share of the maximum.
const MIN_RECORD_SIZE_PERCENT: usize = 75;

/// Read and populate the task directory
///
/// Screening follows the file's own evidence: the first three records are
/// skipped, 8-byte records become null placeholders, records flagged deleted
/// survive only with a var-data name, and short unlisted records are dropped.
/// After population the display ids are rebuilt through
/// [`reconcile_identities`]; the returned tasks are sorted by display id.
pub(crate) fn read(
    provider: &impl StreamProvider,
    config: &GenerationConfig,
    properties: &ProjectProperties,
    values: &CustomFieldValues,
) -> Result<Vec<Task>> {
    let streams = DirectoryStreams::load(provider, file_names::TASK_DIR)?;
    let props = streams.parse_props()?;
    let schema = FieldSchema::from_props(config, EntityKind::Task, props.as_ref());

    let (Some(meta_data), Some(fixed_data)) = (&streams.fixed_meta, &streams.fixed_data) else {
        return Ok(Vec::new());
    };
    let meta = FixedMeta::from(meta_data, config.fixed_meta_item_size(EntityKind::Task))?;
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

    let name_key = schema.var_key(Field::Task(TaskField::Name));
    let has_name = |unique_id: u32| match (&var, name_key) {
        (Some(var), Some(key)) => var.bytes(unique_id, key).is_some(),
        _ => false,
    };
    let max_size = schema.max_fixed_record_size(0);

    let mut selected: BTreeMap<u32, usize> = BTreeMap::new();
    let mut placeholders: Vec<Placeholder> = Vec::new();

    for index in FIRST_TASK_INDEX..fixed.item_count() {
        let Some(record) = fixed.item(index) else {
            continue;
        };

        if record.len() == NULL_TASK_RECORD_SIZE {
            let (Some(unique_id), Some(id)) =
                (read_at::<u32>(record, 0), read_at::<i32>(record, 4))
            else {
                continue;
            };
            placeholders.push(Placeholder { unique_id, id });
            continue;
        }
        if record.len() < NULL_TASK_RECORD_SIZE {
            continue;
        }

        // Deleted records carry only a short unique id; they stay in the
        // file when the task still has a name.
        if meta.flags(index).contains(RecordFlags::DELETED) {
            let Some(short_id) = read_at::<u16>(record, 0) else {
                continue;
            };
            let unique_id = u32::from(short_id);
            if has_name(unique_id) {
                keep(&mut selected, unique_id, index, &has_name);
            }
            continue;
        }

        let Some(unique_id) = read_at::<u32>(record, 0) else {
            continue;
        };
        let by_size = max_size == 0 || record.len() * 100 / max_size > MIN_RECORD_SIZE_PERCENT;
        let listed = var_meta
            .as_ref()
            .is_some_and(|meta| meta.contains(unique_id));
        if by_size || listed {
            keep(&mut selected, unique_id, index, &has_name);
        }
    }

    placeholders.retain(|placeholder| !selected.contains_key(&placeholder.unique_id));

    let decoder = FieldDecoder::with_values(&schema, &properties.defaults, values);
    let mut ordered: Vec<OrderedEntity> = Vec::new();
    let mut tasks: Vec<Task> = Vec::new();

    for (&unique_id, &index) in &selected {
        let Some(record) = fixed.item(index) else {
            continue;
        };
        let record2 = fixed2.as_ref().and_then(|fixed2| fixed2.item(index));
        let fixed_records = [Some(record), record2];

        let id = read_at::<i32>(record, 4).unwrap_or(0);

        let mut fields = BTreeMap::new();
        for (field, _) in schema.fields() {
            if let Some(value) = decoder.decode(field, unique_id, fixed_records, var.as_ref()) {
                fields.insert(field, value);
            }
        }

        // Records without a usable companion key keep their file order.
        let key = record2
            .filter(|record| record.len() >= SORT_KEY_OFFSET + 8)
            .and_then(|record| read_at::<i64>(record, SORT_KEY_OFFSET))
            .unwrap_or(index as i64);

        ordered.push(OrderedEntity { unique_id, key });
        tasks.push(Task::new(unique_id, id, fields));
    }

    for placeholder in &placeholders {
        tasks.push(Task::placeholder(placeholder.unique_id, placeholder.id));
    }

    let assignment = reconcile_identities(EntityKind::Task, &ordered, &placeholders)?;
    for task in &mut tasks {
        if let Some(&id) = assignment.get(&task.unique_id()) {
            task.set_id(id);
        }
    }
    tasks.sort_by_key(Task::id);

    Ok(tasks)
}

/// Keep a screened record, preferring the one that has a var-data name when a
/// unique id appears twice.
fn keep(
    selected: &mut BTreeMap<u32, usize>,
    unique_id: u32,
    index: usize,
    has_name: &impl Fn(u32) -> bool,
) {
    match selected.entry(unique_id) {
        Entry::Vacant(entry) => {
            entry.insert(index);
        }
        Entry::Occupied(mut entry) => {
            if has_name(unique_id) {
                entry.insert(index);
            }
        }
    }
}

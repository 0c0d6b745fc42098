//! Display id reconciliation.
//!
//! Some file generations persist entities with duplicate or out-of-order
//! display ids, and "null" placeholder entities must be interleaved between
//! real ones. This module rebuilds a dense display id sequence from the
//! ordering evidence in the file: real entities carry a 64-bit sort key from
//! their secondary fixed record, placeholders carry only their original
//! display id.
//!
//! Reconciliation is the one place where local recovery is not attempted. A
//! silently wrong order would break the ordering contract of the model, so an
//! unresolvable collision fails the whole category with
//! [`Error::OrderingConflict`].
//!
//! [`Error::OrderingConflict`]: crate::Error::OrderingConflict

use std::collections::{BTreeMap, HashMap};

use crate::{model::EntityKind, Error, Result};

/// Spacing between consecutive real entities on the slot axis.
///
/// Sized to exceed the maximum plausible placeholder count between two real
/// entities for the supported generations.
const INCREMENT: i64 = 102_000;

/// A real entity with ordering evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedEntity {
    /// The entity's unique id
    pub unique_id: u32,
    /// Sort key taken from the entity's secondary fixed record
    pub key: i64,
}

/// A placeholder entity without ordering evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// The entity's unique id
    pub unique_id: u32,
    /// The display id the file recorded for the placeholder
    pub id: i32,
}

/// Rebuild the display id sequence of one entity category
///
/// Real entities are spread along a slot axis in ascending sort-key order,
/// [`INCREMENT`] apart. Placeholders are then inserted in original-id order:
/// each targets the slot of the real entity it preceded and probes downward
/// through the gap below it, so placeholders land between the two real
/// entities they were recorded between. Finally the combined slot map is
/// walked in ascending order and dense display ids are handed out.
///
/// Unique id 0 is the project summary entity. When present it keeps display
/// id 0; otherwise id 0 stays reserved and numbering starts at 1.
///
/// # Arguments
/// * 'kind'            - The entity category being reconciled
/// * 'ordered'         - Real entities with their sort keys
/// * 'placeholders'    - Placeholder entities with their original display ids
///
/// # Errors
/// Returns [`Error::OrderingConflict`] when a placeholder exhausts the gap it
/// probes, which means the recorded order cannot be reconstructed
pub fn reconcile_identities(
    kind: EntityKind,
    ordered: &[OrderedEntity],
    placeholders: &[Placeholder],
) -> Result<BTreeMap<u32, i32>> {
    let summary_present = ordered.iter().any(|entity| entity.unique_id == 0)
        || placeholders.iter().any(|entity| entity.unique_id == 0);

    let mut by_key: Vec<OrderedEntity> = ordered.to_vec();
    by_key.sort_by_key(|entity| entity.key);

    let mut slots: BTreeMap<i64, u32> = BTreeMap::new();
    let mut slot = if summary_present { 0 } else { INCREMENT };
    for entity in &by_key {
        slots.insert(slot, entity.unique_id);
        slot += INCREMENT;
    }

    let mut by_id: Vec<Placeholder> = placeholders.to_vec();
    by_id.sort_by_key(|entity| entity.id);

    let mut insertion_count: i64 = 0;
    let mut offsets: HashMap<i64, i64> = HashMap::new();
    for placeholder in &by_id {
        let base = (i64::from(placeholder.id) - insertion_count) * INCREMENT;
        insertion_count += 1;

        let mut offset = match offsets.get(&base) {
            Some(previous) => previous + 1,
            None => 0,
        };

        loop {
            if offset >= INCREMENT {
                return Err(Error::OrderingConflict {
                    kind,
                    unique_id: placeholder.unique_id,
                    id: placeholder.id,
                });
            }

            let target = if offset == 0 {
                base
            } else {
                base - (INCREMENT - offset)
            };
            if !slots.contains_key(&target) {
                offsets.insert(base, offset);
                slots.insert(target, placeholder.unique_id);
                break;
            }
            offset += 1;
        }
    }

    let mut next_id = if summary_present { 0 } else { 1 };
    let mut assignment = BTreeMap::new();
    for unique_id in slots.into_values() {
        assignment.insert(unique_id, next_id);
        next_id += 1;
    }

    Ok(assignment)
}

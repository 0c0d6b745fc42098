//! Generation default schemas.
//!
//! Files occasionally omit the embedded descriptor block for a category. The
//! tables below place the core fields of each category at their stock
//! locations so downstream code never special-cases "no embedded schema".

use crate::model::{AssignmentField, EntityKind, Field, ResourceField, TaskField};

/// Stock storage slot of one field in a default schema.
pub(super) enum Slot {
    /// Fixed record data at the given byte offset, record set 0
    Fixed(u16),
    /// Variable-length blob store under the given type key
    Var(u16),
}

/// The stock field placements for an entity category.
///
/// Fixed offsets are listed in ascending order so the whole table lands in
/// record set 0.
#[rustfmt::skip]
pub(super) fn entries(kind: EntityKind) -> &'static [(Field, Slot)] {
    match kind {
        EntityKind::Task => &[
            (Field::Task(TaskField::Duration),       Slot::Fixed(8)),
            (Field::Task(TaskField::DurationUnits),  Slot::Fixed(12)),
            (Field::Task(TaskField::Start),          Slot::Fixed(16)),
            (Field::Task(TaskField::Finish),         Slot::Fixed(20)),
            (Field::Task(TaskField::Cost),           Slot::Fixed(24)),
            (Field::Task(TaskField::PercentComplete), Slot::Fixed(32)),
            (Field::Task(TaskField::ConstraintType), Slot::Fixed(34)),
            (Field::Task(TaskField::ConstraintDate), Slot::Fixed(36)),
            (Field::Task(TaskField::Priority),       Slot::Fixed(40)),
            (Field::Task(TaskField::Name),           Slot::Var(14)),
            (Field::Task(TaskField::Notes),          Slot::Var(15)),
            (Field::Task(TaskField::Wbs),            Slot::Var(16)),
            (Field::Task(TaskField::CustomText(1)),  Slot::Var(51)),
        ],
        EntityKind::Resource => &[
            (Field::Resource(ResourceField::Cost),         Slot::Fixed(8)),
            (Field::Resource(ResourceField::Work),         Slot::Fixed(16)),
            (Field::Resource(ResourceField::MaxUnits),     Slot::Fixed(24)),
            (Field::Resource(ResourceField::StandardRate), Slot::Fixed(32)),
            (Field::Resource(ResourceField::Type),         Slot::Fixed(40)),
            (Field::Resource(ResourceField::Name),         Slot::Var(15)),
            (Field::Resource(ResourceField::Initials),     Slot::Var(16)),
            (Field::Resource(ResourceField::Group),        Slot::Var(17)),
            (Field::Resource(ResourceField::Notes),        Slot::Var(21)),
        ],
        EntityKind::Assignment => &[
            (Field::Assignment(AssignmentField::TaskUniqueId),     Slot::Fixed(4)),
            (Field::Assignment(AssignmentField::ResourceUniqueId), Slot::Fixed(8)),
            (Field::Assignment(AssignmentField::Start),            Slot::Fixed(12)),
            (Field::Assignment(AssignmentField::Finish),           Slot::Fixed(16)),
            (Field::Assignment(AssignmentField::Work),             Slot::Fixed(20)),
            (Field::Assignment(AssignmentField::Units),            Slot::Fixed(28)),
            (Field::Assignment(AssignmentField::Cost),             Slot::Fixed(36)),
        ],
    }
}

//! Per-generation configuration data.
//!
//! The four supported generations share one decode engine; everything that
//! differs between them is data collected here: the field id lookup tables,
//! how a variable-data key is derived, store entry layouts and the calendar
//! record offsets. Adding a generation means extending these tables, never
//! copying a pipeline.

use crate::{
    file::FileFormat,
    model::{
        split_field_id, AssignmentField, EntityKind, Field, ResourceField, TaskField,
        ASSIGNMENT_FIELD_BASE, RESOURCE_FIELD_BASE, TASK_FIELD_BASE,
    },
    streams::{props, VarMetaLayout},
};

/// Offsets and keys for the calendar directory of one generation.
#[derive(Debug, Clone, Copy)]
pub struct CalendarLayout {
    /// Offset of the calendar unique id within the 12-byte index record
    pub id_offset: usize,
    /// Offset of the base calendar unique id
    pub base_id_offset: usize,
    /// Offset of the owning resource unique id
    pub resource_id_offset: usize,
    /// Var data type key of the calendar name
    pub name_key: u16,
    /// Var data type key of the calendar data blob
    pub data_key: u16,
}

/// The data that parameterizes the decode engine for one file generation.
///
/// Construction is free; the configuration owns no heap data and every lookup
/// is a match over compiled-in tables.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    format: FileFormat,
}

impl GenerationConfig {
    /// Create the configuration for a file generation
    #[must_use]
    pub fn new(format: FileFormat) -> GenerationConfig {
        GenerationConfig { format }
    }

    /// Returns the generation this configuration describes
    #[must_use]
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Returns the var meta entry layout used by this generation
    #[must_use]
    pub fn var_meta_layout(&self) -> VarMetaLayout {
        match self.format {
            FileFormat::Mpp8 => VarMetaLayout::Compact,
            _ => VarMetaLayout::Extended,
        }
    }

    /// Returns the property keys of the primary and secondary descriptor
    /// blobs for an entity category
    #[must_use]
    pub fn descriptor_keys(&self, kind: EntityKind) -> (u32, Option<u32>) {
        match kind {
            EntityKind::Task => (props::TASK_FIELD_MAP, Some(props::TASK_FIELD_MAP2)),
            EntityKind::Resource => (props::RESOURCE_FIELD_MAP, Some(props::RESOURCE_FIELD_MAP2)),
            EntityKind::Assignment => (
                props::ASSIGNMENT_FIELD_MAP,
                Some(props::ASSIGNMENT_FIELD_MAP2),
            ),
        }
    }

    /// Returns the metadata item size of the primary fixed store
    #[must_use]
    pub fn fixed_meta_item_size(&self, kind: EntityKind) -> usize {
        // Assignments carry no meta stream; the value is unused for them.
        let _ = kind;
        8
    }

    /// Candidate metadata item sizes of the secondary fixed store.
    ///
    /// The secondary meta item size is not recorded in the file and must be
    /// inferred, see [`crate::streams::FixedMeta::with_candidate_sizes`].
    #[must_use]
    pub fn fixed2_meta_item_sizes(&self) -> &'static [usize] {
        match self.format {
            FileFormat::Mpp14 => &[16, 8],
            _ => &[8, 16],
        }
    }

    /// Returns the calendar directory layout of this generation
    #[must_use]
    pub fn calendar_layout(&self) -> CalendarLayout {
        match self.format {
            FileFormat::Mpp14 => CalendarLayout {
                id_offset: 8,
                base_id_offset: 0,
                resource_id_offset: 4,
                name_key: 1,
                data_key: 8,
            },
            _ => CalendarLayout {
                id_offset: 0,
                base_id_offset: 4,
                resource_id_offset: 8,
                name_key: 1,
                data_key: 3,
            },
        }
    }

    /// Resolve a raw 32-bit field id to a semantic field.
    ///
    /// The high 16 bits select the entity kind, the low 16 bits index a
    /// per-generation table. Unknown indices resolve to `None` and the entry
    /// is kept for layout bookkeeping only.
    #[must_use]
    pub fn field_from_id(&self, raw: u32) -> Option<Field> {
        let (base, index) = split_field_id(raw);
        match base {
            TASK_FIELD_BASE => self.task_field(index).map(Field::Task),
            RESOURCE_FIELD_BASE => self.resource_field(index).map(Field::Resource),
            ASSIGNMENT_FIELD_BASE => self.assignment_field(index).map(Field::Assignment),
            _ => None,
        }
    }

    /// Derive the var data type key for a descriptor entry.
    ///
    /// MPP14 derives the key from the field id itself; earlier generations
    /// carry an explicit key byte in the descriptor. A small substitution
    /// table covers fields whose historical key assignment disagrees with the
    /// field-id-derived one.
    pub(crate) fn var_key(&self, field: Option<Field>, field_id: u32, descriptor_key: u8) -> u16 {
        if let Some(key) = field.and_then(|field| self.substitute_var_key(field)) {
            return key;
        }
        match self.format {
            FileFormat::Mpp14 => (field_id & 0xFFFF) as u16,
            _ => u16::from(descriptor_key),
        }
    }

    fn substitute_var_key(&self, field: Field) -> Option<u16> {
        if self.format != FileFormat::Mpp14 {
            return None;
        }
        match field {
            Field::Task(TaskField::Notes) => Some(268),
            Field::Resource(ResourceField::Notes) => Some(169),
            _ => None,
        }
    }

    /// True for the generations that carry GUID fields.
    fn has_guid_fields(&self) -> bool {
        matches!(self.format, FileFormat::Mpp12 | FileFormat::Mpp14)
    }

    #[rustfmt::skip]
    fn task_field(&self, index: u16) -> Option<TaskField> {
        let field = match index {
            0   => TaskField::Work,
            1   => TaskField::BaselineWork,
            2   => TaskField::ActualWork,
            4   => TaskField::RemainingWork,
            5   => TaskField::Cost,
            6   => TaskField::BaselineCost,
            7   => TaskField::ActualCost,
            8   => TaskField::FixedCost,
            10  => TaskField::RemainingCost,
            14  => TaskField::Name,
            15  => TaskField::Notes,
            16  => TaskField::Wbs,
            17  => TaskField::ConstraintType,
            18  => TaskField::ConstraintDate,
            20  => TaskField::LevelingDelay,
            21  => TaskField::Contact,
            24  => TaskField::Priority,
            25  => TaskField::PercentComplete,
            26  => TaskField::PercentWorkComplete,
            27  => TaskField::BaselineDuration,
            28  => TaskField::BaselineDurationUnits,
            29  => TaskField::Duration,
            30  => TaskField::DurationUnits,
            31  => TaskField::ActualDuration,
            32  => TaskField::ActualDurationUnits,
            33  => TaskField::RemainingDuration,
            34  => TaskField::RemainingDurationUnits,
            35  => TaskField::Start,
            36  => TaskField::Finish,
            37  => TaskField::EarlyStart,
            38  => TaskField::EarlyFinish,
            39  => TaskField::LateStart,
            40  => TaskField::LateFinish,
            41  => TaskField::ActualStart,
            42  => TaskField::ActualFinish,
            43  => TaskField::BaselineStart,
            44  => TaskField::BaselineFinish,
            45  => TaskField::Created,
            46  => TaskField::Deadline,
            47  => TaskField::Type,
            48  => TaskField::FixedCostAccrual,
            49  => TaskField::EarnedValueMethod,
            50  => TaskField::CalendarUniqueId,
            51..=80   => TaskField::CustomText((index - 50) as u8),
            81..=90   => TaskField::CustomStart((index - 80) as u8),
            91..=100  => TaskField::CustomFinish((index - 90) as u8),
            101..=110 => TaskField::CustomDate((index - 100) as u8),
            111..=120 => TaskField::CustomDuration((index - 110) as u8),
            121..=130 => TaskField::CustomDurationUnits((index - 120) as u8),
            131..=150 => TaskField::CustomNumber((index - 130) as u8),
            151..=160 => TaskField::CustomCost((index - 150) as u8),
            161..=180 => TaskField::CustomFlag((index - 160) as u8),
            181..=190 => TaskField::OutlineCode((index - 180) as u8),
            192 if self.has_guid_fields() => TaskField::Guid,
            _ => return None,
        };
        Some(field)
    }

    #[rustfmt::skip]
    fn resource_field(&self, index: u16) -> Option<ResourceField> {
        let field = match index {
            0   => ResourceField::Work,
            1   => ResourceField::BaselineWork,
            2   => ResourceField::ActualWork,
            4   => ResourceField::RemainingWork,
            5   => ResourceField::OvertimeWork,
            6   => ResourceField::Cost,
            7   => ResourceField::BaselineCost,
            8   => ResourceField::ActualCost,
            9   => ResourceField::RemainingCost,
            10  => ResourceField::CostPerUse,
            11  => ResourceField::StandardRate,
            12  => ResourceField::StandardRateUnits,
            13  => ResourceField::OvertimeRate,
            14  => ResourceField::OvertimeRateUnits,
            15  => ResourceField::Name,
            16  => ResourceField::Initials,
            17  => ResourceField::Group,
            18  => ResourceField::Code,
            19  => ResourceField::EmailAddress,
            20  => ResourceField::MaterialLabel,
            21  => ResourceField::Notes,
            22  => ResourceField::Type,
            23  => ResourceField::MaxUnits,
            24  => ResourceField::Peak,
            25  => ResourceField::AccrueAt,
            26  => ResourceField::BookingType,
            27  => ResourceField::WorkGroup,
            51..=80   => ResourceField::CustomText((index - 50) as u8),
            81..=90   => ResourceField::CustomStart((index - 80) as u8),
            91..=100  => ResourceField::CustomFinish((index - 90) as u8),
            101..=110 => ResourceField::CustomDate((index - 100) as u8),
            111..=120 => ResourceField::CustomDuration((index - 110) as u8),
            121..=130 => ResourceField::CustomDurationUnits((index - 120) as u8),
            131..=150 => ResourceField::CustomNumber((index - 130) as u8),
            151..=160 => ResourceField::CustomCost((index - 150) as u8),
            161..=180 => ResourceField::CustomFlag((index - 160) as u8),
            181..=190 => ResourceField::OutlineCode((index - 180) as u8),
            192 if self.has_guid_fields() => ResourceField::Guid,
            _ => return None,
        };
        Some(field)
    }

    #[rustfmt::skip]
    fn assignment_field(&self, index: u16) -> Option<AssignmentField> {
        let field = match index {
            0   => AssignmentField::TaskUniqueId,
            1   => AssignmentField::ResourceUniqueId,
            2   => AssignmentField::Start,
            3   => AssignmentField::Finish,
            4   => AssignmentField::BaselineStart,
            5   => AssignmentField::BaselineFinish,
            6   => AssignmentField::Units,
            7   => AssignmentField::Work,
            8   => AssignmentField::ActualWork,
            9   => AssignmentField::RemainingWork,
            10  => AssignmentField::BaselineWork,
            11  => AssignmentField::Cost,
            12  => AssignmentField::ActualCost,
            13  => AssignmentField::RemainingCost,
            14  => AssignmentField::BaselineCost,
            15  => AssignmentField::Delay,
            16  => AssignmentField::ResourceRequestType,
            18 if self.has_guid_fields() => AssignmentField::Guid,
            _ => return None,
        };
        Some(field)
    }
}

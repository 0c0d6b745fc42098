//! Populated project entities.
//!
//! Entities carry their identity pair (unique id, display id), a typed field
//! map and convenience accessors over the fields consumers reach for most.
//! The field map holds only values that actually decoded; an absent entry
//! means the file carried nothing usable for that field.

use std::collections::BTreeMap;

use crate::model::{
    AssignmentField, Duration, Field, FieldValue, ResourceField, TaskField, Timestamp,
};

/// A populated task.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    unique_id: u32,
    id: i32,
    null_task: bool,
    fields: BTreeMap<Field, FieldValue>,
}

impl Task {
    pub(crate) fn new(unique_id: u32, id: i32, fields: BTreeMap<Field, FieldValue>) -> Task {
        Task {
            unique_id,
            id,
            null_task: false,
            fields,
        }
    }

    pub(crate) fn placeholder(unique_id: u32, id: i32) -> Task {
        Task {
            unique_id,
            id,
            null_task: true,
            fields: BTreeMap::new(),
        }
    }

    pub(crate) fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// The task's unique id, stable for the life of the file
    #[must_use]
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    /// The task's display id, dense and in display order
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// True for null placeholder tasks, which carry no field data.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.null_task
    }

    /// Returns the decoded value of a field
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns an iterator over all decoded fields
    pub fn fields(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// The task name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field(Field::Task(TaskField::Name))?.as_text()
    }

    /// The scheduled start date
    #[must_use]
    pub fn start(&self) -> Option<Timestamp> {
        self.field(Field::Task(TaskField::Start))?.as_date()
    }

    /// The scheduled finish date
    #[must_use]
    pub fn finish(&self) -> Option<Timestamp> {
        self.field(Field::Task(TaskField::Finish))?.as_date()
    }

    /// The task duration
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.field(Field::Task(TaskField::Duration))?.as_duration()
    }

    /// The total work amount
    #[must_use]
    pub fn work(&self) -> Option<Duration> {
        self.field(Field::Task(TaskField::Work))?.as_duration()
    }

    /// The total task cost
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.field(Field::Task(TaskField::Cost))?.as_number()
    }

    /// Completion percentage in 0..=100
    #[must_use]
    pub fn percent_complete(&self) -> Option<f64> {
        self.field(Field::Task(TaskField::PercentComplete))?
            .as_number()
    }

    /// The work breakdown structure code
    #[must_use]
    pub fn wbs(&self) -> Option<&str> {
        self.field(Field::Task(TaskField::Wbs))?.as_text()
    }

    /// The task notes text
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.field(Field::Task(TaskField::Notes))?.as_text()
    }
}

/// A populated resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    unique_id: u32,
    id: i32,
    fields: BTreeMap<Field, FieldValue>,
}

impl Resource {
    pub(crate) fn new(unique_id: u32, id: i32, fields: BTreeMap<Field, FieldValue>) -> Resource {
        Resource {
            unique_id,
            id,
            fields,
        }
    }

    pub(crate) fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// The resource's unique id, stable for the life of the file
    #[must_use]
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    /// The resource's display id
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the decoded value of a field
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns an iterator over all decoded fields
    pub fn fields(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// The resource name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field(Field::Resource(ResourceField::Name))?.as_text()
    }

    /// The resource initials
    #[must_use]
    pub fn initials(&self) -> Option<&str> {
        self.field(Field::Resource(ResourceField::Initials))?
            .as_text()
    }

    /// The resource group name
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.field(Field::Resource(ResourceField::Group))?.as_text()
    }

    /// The resource notes text
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.field(Field::Resource(ResourceField::Notes))?.as_text()
    }

    /// The total assigned work
    #[must_use]
    pub fn work(&self) -> Option<Duration> {
        self.field(Field::Resource(ResourceField::Work))?
            .as_duration()
    }

    /// The total resource cost
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.field(Field::Resource(ResourceField::Cost))?.as_number()
    }

    /// Maximum assignment units as a percentage
    #[must_use]
    pub fn max_units(&self) -> Option<f64> {
        self.field(Field::Resource(ResourceField::MaxUnits))?
            .as_number()
    }
}

/// A populated resource assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    unique_id: u32,
    fields: BTreeMap<Field, FieldValue>,
}

impl Assignment {
    pub(crate) fn new(unique_id: u32, fields: BTreeMap<Field, FieldValue>) -> Assignment {
        Assignment { unique_id, fields }
    }

    /// The assignment's unique id
    #[must_use]
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    /// Returns the decoded value of a field
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns an iterator over all decoded fields
    pub fn fields(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Unique id of the assigned task
    #[must_use]
    pub fn task_unique_id(&self) -> Option<u32> {
        let value = self
            .field(Field::Assignment(AssignmentField::TaskUniqueId))?
            .as_integer()?;
        u32::try_from(value).ok()
    }

    /// Unique id of the assigned resource
    #[must_use]
    pub fn resource_unique_id(&self) -> Option<u32> {
        let value = self
            .field(Field::Assignment(AssignmentField::ResourceUniqueId))?
            .as_integer()?;
        u32::try_from(value).ok()
    }

    /// Assignment start date
    #[must_use]
    pub fn start(&self) -> Option<Timestamp> {
        self.field(Field::Assignment(AssignmentField::Start))?
            .as_date()
    }

    /// Assignment finish date
    #[must_use]
    pub fn finish(&self) -> Option<Timestamp> {
        self.field(Field::Assignment(AssignmentField::Finish))?
            .as_date()
    }

    /// Assigned work amount
    #[must_use]
    pub fn work(&self) -> Option<Duration> {
        self.field(Field::Assignment(AssignmentField::Work))?
            .as_duration()
    }

    /// Assignment units as a percentage
    #[must_use]
    pub fn units(&self) -> Option<f64> {
        self.field(Field::Assignment(AssignmentField::Units))?
            .as_number()
    }

    /// Assignment cost
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.field(Field::Assignment(AssignmentField::Cost))?
            .as_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Duration, TimeUnit};

    #[test]
    fn task_accessors_read_the_field_map() {
        let mut fields = BTreeMap::new();
        fields.insert(
            Field::Task(TaskField::Name),
            FieldValue::Text("Design".into()),
        );
        fields.insert(
            Field::Task(TaskField::Duration),
            FieldValue::Duration(Duration::new(3.0, TimeUnit::Days)),
        );
        fields.insert(Field::Task(TaskField::Cost), FieldValue::Currency(1500.0));

        let task = Task::new(7, 1, fields);

        assert_eq!(task.unique_id(), 7);
        assert_eq!(task.id(), 1);
        assert!(!task.is_null());
        assert_eq!(task.name(), Some("Design"));
        assert_eq!(task.duration(), Some(Duration::new(3.0, TimeUnit::Days)));
        assert_eq!(task.cost(), Some(1500.0));
        assert_eq!(task.start(), None);
        assert_eq!(task.fields().count(), 3);
    }

    #[test]
    fn placeholder_task_is_null_and_empty() {
        let task = Task::placeholder(90, 3);

        assert!(task.is_null());
        assert_eq!(task.name(), None);
        assert_eq!(task.fields().count(), 0);
    }

    #[test]
    fn assignment_identity_fields() {
        let mut fields = BTreeMap::new();
        fields.insert(
            Field::Assignment(AssignmentField::TaskUniqueId),
            FieldValue::Integer(4),
        );
        fields.insert(
            Field::Assignment(AssignmentField::ResourceUniqueId),
            FieldValue::Integer(2),
        );

        let assignment = Assignment::new(1, fields);

        assert_eq!(assignment.task_unique_id(), Some(4));
        assert_eq!(assignment.resource_unique_id(), Some(2));
        assert_eq!(assignment.units(), None);
    }
}

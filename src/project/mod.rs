//! The populated project model.
//!
//! [`ProjectFile`] is the result of one read: project-level properties,
//! tasks, resources, assignments and calendars, each entity carrying its
//! decoded field map. The model is plain owned data; once built it has no
//! ties to the streams it came from.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mppscope::{FileFormat, MemoryStreams, ProjectFile};
//!
//! let provider = MemoryStreams::new(); // filled from a container elsewhere
//! let project = ProjectFile::from_provider(&provider, FileFormat::Mpp14)?;
//! for task in project.tasks() {
//!     println!("{}: {:?}", task.id(), task.name());
//! }
//! # Ok::<(), mppscope::Error>(())
//! ```

/// Working-time calendars
mod calendar;
pub use calendar::{Calendar, CalendarDay, CalendarException, CalendarHours};

/// Populated entities
mod entity;
pub use entity::{Assignment, Resource, Task};

/// Project-level properties
mod properties;
pub use properties::ProjectProperties;

use crate::{
    file::{FileFormat, StreamProvider},
    Result,
};

/// A fully read project file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFile {
    properties: ProjectProperties,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    assignments: Vec<Assignment>,
    calendars: Vec<Calendar>,
}

impl ProjectFile {
    /// Create a `ProjectFile` object by reading every category from a provider
    ///
    /// # Arguments
    /// * 'provider'    - The container stream provider
    /// * 'format'      - The file's schema generation
    ///
    /// # Errors
    /// Returns an error on store-level structural damage or when a category's
    /// display order cannot be reconstructed
    pub fn from_provider(
        provider: &impl StreamProvider,
        format: FileFormat,
    ) -> Result<ProjectFile> {
        crate::reader::read(provider, format)
    }

    pub(crate) fn new(
        properties: ProjectProperties,
        tasks: Vec<Task>,
        resources: Vec<Resource>,
        assignments: Vec<Assignment>,
        calendars: Vec<Calendar>,
    ) -> ProjectFile {
        ProjectFile {
            properties,
            tasks,
            resources,
            assignments,
            calendars,
        }
    }

    /// Returns the project-level properties
    #[must_use]
    pub fn properties(&self) -> &ProjectProperties {
        &self.properties
    }

    /// Returns the tasks in display id order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the resources in display id order
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns the resource assignments in file order
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the calendars in file order
    #[must_use]
    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    /// Returns the task with the given unique id
    #[must_use]
    pub fn task_by_unique_id(&self, unique_id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.unique_id() == unique_id)
    }

    /// Returns the resource with the given unique id
    #[must_use]
    pub fn resource_by_unique_id(&self, unique_id: u32) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.unique_id() == unique_id)
    }

    /// Returns the calendar with the given unique id
    #[must_use]
    pub fn calendar_by_unique_id(&self, unique_id: u32) -> Option<&Calendar> {
        self.calendars
            .iter()
            .find(|calendar| calendar.unique_id == unique_id)
    }
}

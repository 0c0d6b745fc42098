//! Entity population from container streams.
//!
//! One submodule per entity directory. Each reader fetches its directory's
//! streams through the [`StreamProvider`] seam, builds the category's
//! [`FieldSchema`], walks the fixed records and populates owned entities
//! through the [`FieldDecoder`]. The orchestration lives in [`read`], called
//! from [`ProjectFile::from_provider`].
//!
//! [`FieldSchema`]: crate::fieldmap::FieldSchema
//! [`FieldDecoder`]: crate::fieldmap::FieldDecoder
//! [`ProjectFile::from_provider`]: crate::project::ProjectFile::from_provider

mod assignments;
mod calendars;
mod resources;
mod tasks;

use crate::{
    custom::CustomFieldValues,
    file::{
        file_names,
        io::{read_le, MppIO},
        FileFormat, StreamProvider,
    },
    fieldmap::GenerationConfig,
    project::{ProjectFile, ProjectProperties},
    streams::Props,
    Result,
};

/// Read one little-endian value at `offset`, or `None` past the end.
pub(crate) fn read_at<T: MppIO>(data: &[u8], offset: usize) -> Option<T> {
    data.get(offset..).and_then(|slice| read_le(slice).ok())
}

/// The raw streams of one entity directory.
///
/// Fetched in one pass so the parsed stores can borrow from the owned
/// buffers for the duration of the category read.
pub(crate) struct DirectoryStreams {
    pub props: Option<Vec<u8>>,
    pub fixed_meta: Option<Vec<u8>>,
    pub fixed_data: Option<Vec<u8>>,
    pub fixed2_meta: Option<Vec<u8>>,
    pub fixed2_data: Option<Vec<u8>>,
    pub var_meta: Option<Vec<u8>>,
    pub var_data: Option<Vec<u8>>,
}

impl DirectoryStreams {
    /// Fetch every stream of an entity directory
    ///
    /// # Arguments
    /// * 'provider'    - The container stream provider
    /// * 'directory'   - The entity directory name
    ///
    /// # Errors
    /// Returns an error if the provider fails to retrieve a stream
    pub fn load(provider: &impl StreamProvider, directory: &str) -> Result<DirectoryStreams> {
        let dir = Some(directory);
        Ok(DirectoryStreams {
            props: provider.stream(dir, file_names::PROPS)?,
            fixed_meta: provider.stream(dir, file_names::FIXED_META)?,
            fixed_data: provider.stream(dir, file_names::FIXED_DATA)?,
            fixed2_meta: provider.stream(dir, file_names::FIXED2_META)?,
            fixed2_data: provider.stream(dir, file_names::FIXED2_DATA)?,
            var_meta: provider.stream(dir, file_names::VAR_META)?,
            var_data: provider.stream(dir, file_names::VAR2_DATA)?,
        })
    }

    /// Parse the directory's property bag, if the stream was present.
    pub fn parse_props(&self) -> Result<Option<Props<'_>>> {
        match &self.props {
            Some(data) => Ok(Some(Props::from(data)?)),
            None => Ok(None),
        }
    }
}

/// Read a whole project file from a provider.
pub(crate) fn read(provider: &impl StreamProvider, format: FileFormat) -> Result<ProjectFile> {
    let config = GenerationConfig::new(format);

    let root_props_data = provider.stream(None, format.props_stream_name())?;
    let root_props = match &root_props_data {
        Some(data) => Some(Props::from(data)?),
        None => None,
    };
    let properties = ProjectProperties::from_props(root_props.as_ref());

    let values = CustomFieldValues::from_provider(provider, &config, &properties.defaults)?;

    let tasks = tasks::read(provider, &config, &properties, &values)?;
    let resources = resources::read(provider, &config, &properties, &values)?;
    let assignments = assignments::read(provider, &config, &properties, &values)?;
    let calendars = calendars::read(provider, &config)?;

    Ok(ProjectFile::new(
        properties,
        tasks,
        resources,
        assignments,
        calendars,
    ))
}

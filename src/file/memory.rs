use std::collections::HashMap;

use super::StreamProvider;
use crate::Result;

/// Stream provider backed by pre-extracted streams held in memory.
///
/// Streams are keyed by `(directory, name)`, with `None` addressing the project
/// root. This is the provider of choice when streams were pulled out of the
/// container by an external tool, and the one the test suite builds synthetic
/// files with.
#[derive(Debug, Default)]
pub struct MemoryStreams {
    streams: HashMap<(Option<String>, String), Vec<u8>>,
}

impl MemoryStreams {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> MemoryStreams {
        MemoryStreams::default()
    }

    /// Register a stream under `(directory, name)`, replacing any previous data.
    ///
    /// ## Arguments
    /// * 'directory' - The owning directory, or `None` for the project root
    /// * 'name' - The stream name within the directory
    /// * 'data' - The stream bytes to store
    pub fn insert(&mut self, directory: Option<&str>, name: &str, data: Vec<u8>) {
        self.streams
            .insert((directory.map(str::to_owned), name.to_owned()), data);
    }
}

impl StreamProvider for MemoryStreams {
    fn stream(&self, directory: Option<&str>, name: &str) -> Result<Option<Vec<u8>>> {
        let key = (directory.map(str::to_owned), name.to_owned());
        Ok(self.streams.get(&key).cloned())
    }

    fn has_directory(&self, name: &str) -> bool {
        self.streams
            .keys()
            .any(|(directory, _)| directory.as_deref() == Some(name))
    }
}

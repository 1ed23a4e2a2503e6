use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use relay_logging::relay_debug;

use crate::{write_atomic, PersistError};

/// Marker value stored for every completed download.
pub const SAVED_MARKER: &str = "1";

/// Key-value store of completed downloads, keyed by source URL.
///
/// Backed by one RON file that is rewritten atomically on every change.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl RecordStore {
    /// Load the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(text) => ron::from_str(&text).map_err(|e| PersistError::Corrupt(e.to_string()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        relay_debug!("Opened record store {:?} with {} entries", path, entries.len());
        Ok(Self { path, entries })
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Record `url` as downloaded.
    pub fn mark_saved(&mut self, url: &str) -> Result<(), PersistError> {
        self.set(url, SAVED_MARKER)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<(), PersistError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&self.entries, pretty)
            .map_err(|e| PersistError::Serialize(e.to_string()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let filename = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| PersistError::OutputDir(format!("{:?} has no file name", self.path)))?;
        write_atomic(dir, &filename, content.as_bytes())?;
        Ok(())
    }
}

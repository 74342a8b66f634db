use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use history::{KeyValueStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

type Entries = BTreeMap<String, String>;

/// Key-value storage kept in a single JSON object file.
///
/// Every write replaces the whole file through a temporary file in the same
/// directory followed by a rename, so readers see either the old or the new
/// contents and never a partial write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, `None` when the file does not exist yet.
    fn read_raw(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!("Storage file {} does not exist yet", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn parse_entries(&self, raw: &str) -> Result<Entries, StorageError> {
        serde_json::from_str(raw).map_err(|e| {
            StorageError::Io(format!(
                "{} is not a valid storage file: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        match self.read_raw()? {
            Some(raw) => self.parse_entries(&raw),
            None => Ok(Entries::new()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, entries)
            .map_err(|e| StorageError::Io(e.to_string()))?;
        file.flush()?;
        file.as_file().sync_all()?;
        file.persist(&self.path)
            .map_err(|e| StorageError::Io(e.error.to_string()))?;

        debug!("Wrote storage file {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Unreadable files are an error; only unparseable contents are replaced
        let mut entries = match self.read_raw()? {
            Some(raw) => self.parse_entries(&raw).unwrap_or_else(|e| {
                warn!("Starting a fresh storage file: {}", e);
                Entries::new()
            }),
            None => Entries::new(),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

//! JSON file token storage.
//!
//! All keys live in one small JSON object. Writes go to a temporary file in
//! the same directory which is then renamed over the target, so a crash never
//! leaves a half-written file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use presence_core::{DomainError, DomainResult, TokenStorage};
use tempfile::NamedTempFile;

type Entries = BTreeMap<String, String>;

/// Token storage persisted to a JSON file
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileTokenStorage {
    /// Create a storage at `path`. The file and its directory are created on
    /// first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> DomainResult<Entries> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(DomainError::storage(format!("{}: {e}", self.path.display()))),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, entries: &Entries) -> DomainResult<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(DomainError::storage(e)),
            };
        }

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(DomainError::storage)?;

        let file = NamedTempFile::new_in(&dir).map_err(DomainError::storage)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries).map_err(DomainError::storage)?;
        writer.write_all(b"\n").map_err(DomainError::storage)?;
        writer.flush().map_err(DomainError::storage)?;

        writer
            .into_inner()
            .map_err(|e| DomainError::storage(e.error()))?
            .persist(&self.path)
            .map_err(|e| DomainError::storage(e.error))?;

        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)?;

        tracing::trace!(path = %self.path.display(), key, "Wrote storage entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)?;

        tracing::trace!(path = %self.path.display(), key, "Removed storage entry");
        Ok(())
    }
}

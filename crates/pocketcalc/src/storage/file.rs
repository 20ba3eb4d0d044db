//! On-disk store: one JSON object per file

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::memory::MemoryStore;
use super::{KeyValueStore, StorageResult};

/// Key-value store persisted as a JSON object of strings
///
/// Every write rewrites the file through a temporary sibling and a rename,
/// so a reader never sees a half-written object. The in-memory view changes
/// only once that write has landed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: MemoryStore,
}

impl JsonFileStore {
    /// Opens the store at `path`; a missing file is an empty store
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str::<BTreeMap<String, String>>(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self {
            path,
            cache: MemoryStore::from_entries(entries),
        })
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cache.keys()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes `next` to disk and only then makes it the cached view
    fn commit(&mut self, next: MemoryStore) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(next.entries())?;
        let tmp = self.temp_path();
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = next.len(), "flushed store");
        self.cache = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.cache.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut next = self.cache.clone();
        next.set(key, value)?;
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.cache.get(key)?.is_none() {
            return Ok(());
        }
        let mut next = self.cache.clone();
        next.remove(key)?;
        self.commit(next)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.commit(MemoryStore::new())
    }
}

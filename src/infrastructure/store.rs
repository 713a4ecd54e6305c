//! Key-value store implementations
//!
//! `JsonFileStore` keeps every key in one JSON object on disk and rewrites
//! the whole file on each change. `MemoryStore` is the in-process variant.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::infrastructure::traits::{FileSystem, KeyValueStore};

type Entries = BTreeMap<String, String>;

/// Store persisted as a JSON object file.
pub struct JsonFileStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<Entries> {
        if !self.fs.exists(&self.path) {
            trace!("store file missing, starting empty: {}", self.path.display());
            return Ok(Entries::new());
        }
        let content = self.fs.read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {e}", self.path.display()),
            )
        })
    }

    // Write to a sibling file first so a crash never leaves half a document.
    fn save(&self, entries: &Entries) -> io::Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        self.fs.ensure_parent(&self.path)?;
        let tmp = self.path.with_extension("json.tmp");
        self.fs.write(&tmp, &content)?;
        self.fs.rename(&tmp, &self.path)?;
        debug!("store saved: {} ({} keys)", self.path.display(), entries.len());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> io::Result<()> {
        let mut entries = self.load()?;
        for (key, value) in batch {
            entries.insert(key.to_string(), value.to_string());
        }
        self.save(&entries)
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> io::Result<()> {
        let mut entries = self.lock()?;
        for (key, value) in batch {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

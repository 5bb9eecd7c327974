//! Persistent key-value storage for the quote list and UI state.
//!
//! Values are plain strings, mirroring a browser-style local storage. Two backends
//! are provided:
//! - `FileStorage` — one JSON object on disk, re-read on every access and rewritten
//!   on every `set_item`, so separate processes observe each other's writes.
//! - `MemoryStorage` — process-local map, used by tests and throwaway sessions.
//!
//! A `FileStorage` whose file holds invalid JSON reads as an error, but the next
//! `set_item` replaces the file with a fresh object.
//!
//! Neither backend coordinates writers beyond a single process: the last
//! `set_item` for a key wins.
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

use crate::Result;

/// String key-value store shared by the quote store and the client controls.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage holding a single JSON object of string values.
pub struct FileStorage {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens storage at `path`. The file is created lazily on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            io_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.io_lock.lock()?;
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.io_lock.lock()?;
        let mut map = self.read_map().unwrap_or_else(|e| {
            warn!(
                "Storage file {} is unreadable, rewriting it: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        debug!("Stored {} bytes under '{}' in {}", value.len(), key, self.path.display());
        Ok(())
    }
}

/// In-memory storage; contents vanish with the value.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

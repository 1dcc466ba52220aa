//! Durable key-value backends.
//!
//! The store writes two string blobs under fixed keys. Backends only need to
//! get and set whole values; there is no partial update and no listing.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ShinyError, ShinyResult};

/// Key holding the JSON array of archived sessions.
pub const ARCHIVE_KEY: &str = "archived_sessions";
/// Key holding the JSON object of the current session.
pub const CURRENT_KEY: &str = "current_session";

/// A string-valued key-value store.
///
/// Implementations are moved onto the writer thread, hence `Send + 'static`.
pub trait KeyValueStore: Send + 'static {
    /// Read the value under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> ShinyResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> ShinyResult<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Store files under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> ShinyResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ShinyResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target and rename so readers never see half a file.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// An in-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a value directly, bypassing failure mode.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.into());
        }
    }

    /// Read a value directly.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ShinyResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| ShinyError::StorageUnavailable("memory store poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ShinyResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShinyError::StorageUnavailable(format!(
                "write to '{key}' rejected"
            )));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| ShinyError::StorageUnavailable("memory store poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dir_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = DirStore::new(dir.path());
        assert!(store.get(CURRENT_KEY).unwrap().is_none());
    }

    #[test]
    fn dir_store_set_then_get() {
        let dir = TempDir::new().unwrap();
        let mut store = DirStore::new(dir.path().join("nested"));
        store.set(ARCHIVE_KEY, "[]").unwrap();
        store.set(ARCHIVE_KEY, "[{}]").unwrap();
        assert_eq!(store.get(ARCHIVE_KEY).unwrap().as_deref(), Some("[{}]"));
        assert!(dir.path().join("nested/archived_sessions.json").exists());
        assert!(!dir.path().join("nested/.archived_sessions.json.tmp").exists());
    }

    #[test]
    fn dir_store_unwritable_location_errors() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let mut store = DirStore::new(blocker.join("sub"));
        assert!(store.set(CURRENT_KEY, "{}").is_err());
    }

    #[test]
    fn memory_store_clones_share_values() {
        let a = MemoryStore::new();
        let mut b = a.clone();
        b.set(CURRENT_KEY, "{}").unwrap();
        assert_eq!(a.value(CURRENT_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn memory_store_failing_mode() {
        let mut store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.set(CURRENT_KEY, "{}").is_err());
        assert!(store.value(CURRENT_KEY).is_none());
        store.set_failing(false);
        assert!(store.set(CURRENT_KEY, "{}").is_ok());
    }
}

// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Local key-value storage
//
// Each record is a JSON string stored under a fixed key.
// Writers replace the full value; there is no merging or history.

use crate::types::AppError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// Key holding the last successfully fetched course list
pub const CACHED_COURSES_KEY: &str = "cachedCourses";

/// Key holding the favorited course ids
pub const FAVORITES_KEY: &str = "favorites";

/// String-valued key-value store shared by the controllers
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Delete the value stored under `key`, if any
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// File-backed store, one `<key>.json` file per record
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::FileIo(format!("Failed to create data dir: {}", e)))?;
        tracing::debug!("Local store at {:?}", dir);

        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::InvalidConfig(format!("Invalid store key: {:?}", key)));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.record_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::FileIo(format!("Failed to read {}: {}", key, e)))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.record_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value)
            .map_err(|e| AppError::FileIo(format!("Failed to write {}: {}", key, e)))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| AppError::FileIo(format!("Failed to replace {}: {}", key, e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.record_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| AppError::FileIo(format!("Failed to remove {}: {}", key, e)))?;
        }
        Ok(())
    }
}

/// In-memory store, lost when dropped
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.remove(key);
        Ok(())
    }
}

/// Read and deserialize a record, treating absent or corrupt data as `None`
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}, treating as empty: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to parse {}, treating as empty: {}", key, e);
            None
        }
    }
}

/// Serialize a value and write it under `key`
pub(crate) fn write_json<T: serde::Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let content = serde_json::to_string(value)
        .map_err(|e| AppError::Serialization(format!("Failed to serialize {}: {}", key, e)))?;
    store.set(key, &content)
}

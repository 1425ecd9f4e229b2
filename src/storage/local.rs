//! Local record storage.
//!
//! A string-keyed store with one JSON file per key. Records live under a
//! single fixed key as one JSON array that is rewritten on every append.

use super::record::QrRecord;
use crate::error::{StorageError, StorageResult};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Key holding the serialized record array.
pub const RECORDS_KEY: &str = "qr_codes";

/// A persistent string-keyed store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if it was never set.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed key-value store. Key `k` maps to `<dir>/<k>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_file(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_file(key), value)
    }
}

/// The record collection kept in a [`KeyValueStore`].
pub struct LocalRecords {
    store: Box<dyn KeyValueStore>,
}

impl LocalRecords {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Records in the directory's `qr_codes.json`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }

    /// Read all records in insertion order.
    ///
    /// A missing or blank value is an empty collection.
    pub fn read(&self) -> StorageResult<Vec<QrRecord>> {
        let content = self
            .store
            .get(RECORDS_KEY)
            .map_err(|e| StorageError::LocalStorageReadFailed(e.to_string()))?;

        match content {
            Some(content) if !content.trim().is_empty() => serde_json::from_str(&content)
                .map_err(|e| StorageError::LocalStorageCorrupt(e.to_string())),
            _ => Ok(Vec::new()),
        }
    }

    /// Append one record: read the full array, push, write it back.
    ///
    /// Not atomic across processes. A corrupt or unreadable array aborts the
    /// append and is left untouched.
    pub fn append(&self, record: &QrRecord) -> StorageResult<()> {
        let mut records = self.read()?;
        records.push(record.clone());

        let content = serde_json::to_string(&records)?;
        self.store
            .set(RECORDS_KEY, &content)
            .map_err(|e| StorageError::LocalStorageWriteFailed(e.to_string()))?;

        debug!(id = %record.id, total = records.len(), "record appended to local storage");
        Ok(())
    }
}

//! The record store strategies.
//!
//! Callers see one contract: `save` always returns a record and `load_all`
//! always returns a list. Which backends were actually used is reported in
//! [`SaveOutcome`] and [`LoadSource`] for logging only.

use super::local::LocalRecords;
use super::record::{QrRecord, QrRecordInput};
use super::remote::{RemoteBackend, SupabaseBackend};
use crate::config::RemoteConfig;
use crate::error::StorageError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Which backends persisted a saved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored remotely and mirrored locally.
    RemoteAndLocal,
    /// Stored locally only (local mode, or the remote insert failed).
    LocalOnly,
    /// Stored remotely but the local mirror failed.
    RemoteOnly,
    /// Nothing durable; the record exists in memory only.
    Unpersisted,
}

impl SaveOutcome {
    fn from_flags(remote: bool, local: bool) -> Self {
        match (remote, local) {
            (true, true) => Self::RemoteAndLocal,
            (false, true) => Self::LocalOnly,
            (true, false) => Self::RemoteOnly,
            (false, false) => Self::Unpersisted,
        }
    }

    /// Whether the record will survive a restart.
    pub fn is_durable(&self) -> bool {
        !matches!(self, Self::Unpersisted)
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteAndLocal => write!(f, "remote + local"),
            Self::LocalOnly => write!(f, "local"),
            Self::RemoteOnly => write!(f, "remote"),
            Self::Unpersisted => write!(f, "not persisted"),
        }
    }
}

/// A saved record plus how it was persisted.
#[derive(Debug, Clone)]
pub struct Saved {
    pub record: QrRecord,
    pub outcome: SaveOutcome,
}

/// Where a history listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The remote backend answered.
    Remote,
    /// Local storage in local-only mode.
    Local,
    /// Local storage after the remote read failed.
    LocalFallback,
    /// Nothing readable: empty, missing, or corrupt local storage.
    Empty,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Local => write!(f, "local"),
            Self::LocalFallback => write!(f, "local (fallback)"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// All records, newest first, plus where they came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: Vec<QrRecord>,
    pub source: LoadSource,
}

/// Storage mode fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    LocalOnly,
    RemoteThenLocal,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalOnly => write!(f, "local only"),
            Self::RemoteThenLocal => write!(f, "remote with local fallback"),
        }
    }
}

/// Persists and lists QR records. Never fails.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The mode this store was built for.
    fn mode(&self) -> StoreMode;

    /// Append a record, assigning its final id and timestamp.
    async fn save(&self, input: QrRecordInput) -> Saved;

    /// Return every record, newest first.
    async fn load_all(&self) -> Loaded;
}

/// Store backed by local storage alone.
pub struct LocalOnlyStore {
    local: LocalRecords,
}

impl LocalOnlyStore {
    pub fn new(local: LocalRecords) -> Self {
        Self { local }
    }
}

#[async_trait]
impl RecordStore for LocalOnlyStore {
    fn mode(&self) -> StoreMode {
        StoreMode::LocalOnly
    }

    async fn save(&self, input: QrRecordInput) -> Saved {
        let record = input.into_record();
        let local = append_local(&self.local, &record);

        Saved {
            record,
            outcome: SaveOutcome::from_flags(false, local),
        }
    }

    async fn load_all(&self) -> Loaded {
        load_local(&self.local, LoadSource::Local)
    }
}

/// Store that prefers a remote backend and mirrors every save locally.
pub struct RemoteThenLocalStore {
    remote: Box<dyn RemoteBackend>,
    local: LocalRecords,
}

impl RemoteThenLocalStore {
    pub fn new(remote: impl RemoteBackend + 'static, local: LocalRecords) -> Self {
        Self {
            remote: Box::new(remote),
            local,
        }
    }
}

#[async_trait]
impl RecordStore for RemoteThenLocalStore {
    fn mode(&self) -> StoreMode {
        StoreMode::RemoteThenLocal
    }

    async fn save(&self, input: QrRecordInput) -> Saved {
        let mut record = input.clone().into_record();

        // The remote row is authoritative for id and timestamp.
        let remote = match self.remote.insert(&input).await {
            Ok(row) => {
                debug!(local_id = %record.id, remote_id = %row.id, "remote insert succeeded");
                record.id = row.id;
                if let Some(created_at) = row.created_at {
                    record.created_at = created_at;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "remote insert failed, keeping local copy only");
                false
            }
        };

        let local = append_local(&self.local, &record);

        Saved {
            record,
            outcome: SaveOutcome::from_flags(remote, local),
        }
    }

    async fn load_all(&self) -> Loaded {
        match self.remote.select_all().await {
            Ok(records) => {
                debug!(count = records.len(), "loaded records from remote");
                Loaded {
                    records,
                    source: LoadSource::Remote,
                }
            }
            Err(e) => {
                warn!(error = %e, "remote read failed, falling back to local storage");
                load_local(&self.local, LoadSource::LocalFallback)
            }
        }
    }
}

/// Pick the store strategy once, from the startup configuration.
///
/// A backend client that cannot be constructed degrades to local-only mode.
pub fn open_store(
    remote: Option<&RemoteConfig>,
    timeout: Option<Duration>,
    local: LocalRecords,
) -> Box<dyn RecordStore> {
    let Some(config) = remote else {
        debug!("remote backend not configured, using local storage only");
        return Box::new(LocalOnlyStore::new(local));
    };

    match SupabaseBackend::new(config, timeout) {
        Ok(backend) => {
            debug!(url = %config.url, "using remote backend with local fallback");
            Box::new(RemoteThenLocalStore::new(backend, local))
        }
        Err(e) => {
            warn!(error = %e, "could not build remote client, using local storage only");
            Box::new(LocalOnlyStore::new(local))
        }
    }
}

fn append_local(local: &LocalRecords, record: &QrRecord) -> bool {
    match local.append(record) {
        Ok(()) => true,
        Err(e) => {
            error!(id = %record.id, error = %e, "failed to save record to local storage");
            false
        }
    }
}

fn load_local(local: &LocalRecords, source: LoadSource) -> Loaded {
    match local.read() {
        Ok(mut records) if !records.is_empty() => {
            records.reverse();
            Loaded { records, source }
        }
        Ok(_) => Loaded {
            records: Vec::new(),
            source: LoadSource::Empty,
        },
        Err(e) => {
            match e {
                StorageError::LocalStorageCorrupt(_) => {
                    warn!(error = %e, "local storage is corrupt, treating as empty")
                }
                _ => error!(error = %e, "error reading from local storage"),
            }
            Loaded {
                records: Vec::new(),
                source: LoadSource::Empty,
            }
        }
    }
}

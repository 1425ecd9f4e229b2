//! QR record persistence.
//!
//! Saves go to a remote backend when one is configured and are always
//! mirrored to local storage; reads prefer the remote and fall back to the
//! local copy. Storage failures are logged here and never propagate.

mod local;
mod record;
mod remote;
mod store;

pub use local::{FileStore, KeyValueStore, LocalRecords, RECORDS_KEY};
pub use record::{QrRecord, QrRecordInput};
pub use remote::{RemoteBackend, RemoteRow, SupabaseBackend};
pub use store::{
    open_store, LoadSource, Loaded, LocalOnlyStore, RecordStore, RemoteThenLocalStore,
    SaveOutcome, Saved, StoreMode,
};

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles for the storage backends.

    use super::{KeyValueStore, QrRecord, QrRecordInput, RemoteBackend, RemoteRow};
    use crate::error::{StorageError, StorageResult};
    use crate::types::RecordId;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Reads as empty, rejects every write.
    pub struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    /// In-memory remote backend with sequential integer ids.
    #[derive(Clone)]
    pub struct FakeRemote {
        rows: Arc<Mutex<Vec<RemoteRow>>>,
        fail: bool,
    }

    impl FakeRemote {
        pub fn working() -> Self {
            Self {
                rows: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::working()
            }
        }

        /// Timestamp assigned to the row with id `n`.
        pub fn created_at(n: i64) -> DateTime<Utc> {
            Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
        }

        pub fn rows(&self) -> Vec<RemoteRow> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteBackend for FakeRemote {
        async fn insert(&self, input: &QrRecordInput) -> StorageResult<RemoteRow> {
            if self.fail {
                return Err(StorageError::RemoteUnavailable("connection refused".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let n = rows.len() as i64 + 1;
            let row = RemoteRow {
                id: n.to_string().parse::<RecordId>().unwrap(),
                original_url: input.original_url.clone(),
                qr_code_data: input.qr_code_data.clone(),
                short_id: input.short_id.clone(),
                created_at: Some(Self::created_at(n)),
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn select_all(&self) -> StorageResult<Vec<QrRecord>> {
            if self.fail {
                return Err(StorageError::RemoteUnavailable("connection refused".into()));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().rev().cloned().map(QrRecord::from).collect())
        }
    }

    /// Answer exactly one HTTP request with `status` and a JSON `body`.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 8192];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }
}

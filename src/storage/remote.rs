//! Remote record backend.
//!
//! Talks to a Supabase project through its PostgREST interface. Rows in the
//! `qr_codes` table have the same shape as [`QrRecord`], with a
//! server-assigned `id` and `created_at`.

use super::record::{QrRecord, QrRecordInput};
use crate::config::RemoteConfig;
use crate::error::{StorageError, StorageResult};
use crate::types::{RecordId, ShortId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

/// Table holding QR records on the backend.
pub const TABLE: &str = "qr_codes";

/// A row returned by the backend.
///
/// `created_at` is best effort: a missing column, a `timestamp` without a
/// zone (read as UTC), or an unreadable value never rejects the row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRow {
    pub id: RecordId,
    pub original_url: String,
    pub qr_code_data: String,
    pub short_id: ShortId,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Formats PostgREST uses for `timestamp` columns.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = value else {
        return Ok(None);
    };

    let parsed = raw.as_str().and_then(parse_timestamp);
    if parsed.is_none() {
        debug!(created_at = %raw, "ignoring unreadable remote timestamp");
    }
    Ok(parsed)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl From<RemoteRow> for QrRecord {
    fn from(row: RemoteRow) -> Self {
        Self {
            id: row.id,
            original_url: row.original_url,
            qr_code_data: row.qr_code_data,
            short_id: row.short_id,
            created_at: row.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

/// A shared backend that stores QR records.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, input: &QrRecordInput) -> StorageResult<RemoteRow>;

    /// Fetch every row, newest first.
    async fn select_all(&self) -> StorageResult<Vec<QrRecord>>;
}

/// Supabase REST client for the `qr_codes` table.
pub struct SupabaseBackend {
    http: Client,
    base_url: String,
    key: String,
}

impl SupabaseBackend {
    /// Build a client for the configured project.
    pub fn new(config: &RemoteConfig, timeout: Option<Duration>) -> StorageResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StorageError::RemoteUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            key: config.key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    /// Send a prepared request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> StorageResult<String> {
        let response = request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .map_err(|e| StorageError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::RemoteUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(StorageError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteBackend for SupabaseBackend {
    async fn insert(&self, input: &QrRecordInput) -> StorageResult<RemoteRow> {
        let request = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[input]);

        let body = self.send(request).await?;
        let rows: Vec<RemoteRow> = serde_json::from_str(&body)?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::RemoteUnavailable("insert returned no rows".to_string()))
    }

    async fn select_all(&self) -> StorageResult<Vec<QrRecord>> {
        let request = self
            .http
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let body = self.send(request).await?;
        let rows: Vec<RemoteRow> = serde_json::from_str(&body)?;

        Ok(rows.into_iter().map(QrRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::serve_once;
    use crate::types::TargetUrl;

    fn backend(url: &str) -> SupabaseBackend {
        let config = RemoteConfig::from_parts(Some(url.to_string()), Some("anon-key".to_string()))
            .unwrap();
        SupabaseBackend::new(&config, Some(Duration::from_secs(5))).unwrap()
    }

    fn input() -> QrRecordInput {
        QrRecordInput::new(
            TargetUrl::parse("google.com").unwrap(),
            "data:image/png;base64,AAAA",
            "abc123".parse().unwrap(),
        )
    }

    #[test]
    fn test_row_with_numeric_id() {
        let row: RemoteRow = serde_json::from_str(
            r#"{"id": 7, "original_url": "https://a.example", "qr_code_data": "x",
                "short_id": "abc123", "created_at": "2024-03-01T10:00:00.123456+00:00"}"#,
        )
        .unwrap();
        let record = QrRecord::from(row);
        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.created_at.to_rfc3339(), "2024-03-01T10:00:00.123456+00:00");
    }

    #[test]
    fn test_row_without_timestamp() {
        let row: RemoteRow = serde_json::from_str(
            r#"{"id": "r-1", "original_url": "https://a.example", "qr_code_data": "x", "short_id": "abc123"}"#,
        )
        .unwrap();
        assert!(row.created_at.is_none());
    }

    #[test]
    fn test_row_with_zoneless_timestamp() {
        let row: RemoteRow = serde_json::from_str(
            r#"{"id": 7, "original_url": "https://a.example", "qr_code_data": "x",
                "short_id": "abc123", "created_at": "2024-03-01T10:00:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(
            row.created_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00.123456+00:00"
        );
    }

    #[test]
    fn test_row_with_unreadable_timestamp() {
        let row: RemoteRow = serde_json::from_str(
            r#"{"id": 7, "original_url": "https://a.example", "qr_code_data": "x",
                "short_id": "abc123", "created_at": "last tuesday"}"#,
        )
        .unwrap();
        assert!(row.created_at.is_none());

        let row: RemoteRow = serde_json::from_str(
            r#"{"id": 7, "original_url": "https://a.example", "qr_code_data": "x",
                "short_id": "abc123", "created_at": null}"#,
        )
        .unwrap();
        assert!(row.created_at.is_none());
    }

    #[test]
    fn test_space_separated_timestamp() {
        let dt = parse_timestamp("2024-03-01 10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn test_insert_sends_headers_and_reads_row() {
        let (url, request) = serve_once(
            "201 Created",
            r#"[{"id": 42, "original_url": "https://google.com", "qr_code_data": "data:image/png;base64,AAAA", "short_id": "abc123", "created_at": "2024-03-01T10:00:00+00:00"}]"#,
        )
        .await;

        let row = backend(&url).insert(&input()).await.unwrap();
        assert_eq!(row.id.as_str(), "42");

        let raw = request.await.unwrap().to_lowercase();
        assert!(raw.starts_with("post /rest/v1/qr_codes "));
        assert!(raw.contains("apikey: anon-key"));
        assert!(raw.contains("authorization: bearer anon-key"));
        assert!(raw.contains("prefer: return=representation"));
        assert!(raw.contains(r#""original_url":"https://google.com""#));
    }

    #[tokio::test]
    async fn test_select_orders_newest_first() {
        let (url, request) = serve_once("200 OK", "[]").await;

        let records = backend(&url).select_all().await.unwrap();
        assert!(records.is_empty());

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /rest/v1/qr_codes?select=*&order=created_at.desc "));
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let (url, _request) = serve_once("401 Unauthorized", r#"{"message":"bad key"}"#).await;

        let err = backend(&url).select_all().await.unwrap_err();
        assert!(matches!(err, StorageError::RemoteRejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let (url, _request) = serve_once("200 OK", "<html>oops</html>").await;

        let err = backend(&url).select_all().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let err = backend("http://127.0.0.1:1").select_all().await.unwrap_err();
        assert!(matches!(err, StorageError::RemoteUnavailable(_)));
    }
}

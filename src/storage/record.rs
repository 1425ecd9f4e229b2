//! The persisted QR record.

use crate::types::{RecordId, ShortId, TargetUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated QR code as handed to the store.
///
/// This is also the row shape sent to the remote insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRecordInput {
    /// Normalized URL the code points to.
    pub original_url: String,
    /// PNG image as a data URI.
    pub qr_code_data: String,
    /// Short display/download handle.
    pub short_id: ShortId,
}

impl QrRecordInput {
    pub fn new(url: TargetUrl, qr_code_data: impl Into<String>, short_id: ShortId) -> Self {
        Self {
            original_url: url.into_string(),
            qr_code_data: qr_code_data.into(),
            short_id,
        }
    }

    /// Stamp a local id and the current time onto the input.
    pub fn into_record(self) -> QrRecord {
        QrRecord {
            id: RecordId::new(),
            original_url: self.original_url,
            qr_code_data: self.qr_code_data,
            short_id: self.short_id,
            created_at: Utc::now(),
        }
    }
}

/// A persisted QR record. Never mutated once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRecord {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Normalized URL the code points to.
    pub original_url: String,
    /// PNG image as a data URI.
    pub qr_code_data: String,
    /// Short display/download handle.
    pub short_id: ShortId,
    /// When the record was saved.
    pub created_at: DateTime<Utc>,
}

impl QrRecord {
    /// Whether `key` names this record by full id or short id.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.id.as_str() == key || self.short_id.as_str().eq_ignore_ascii_case(key)
    }

    /// File name used when downloading the image.
    pub fn download_file_name(&self) -> String {
        format!("qr-code-{}.png", self.short_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> QrRecordInput {
        QrRecordInput::new(
            TargetUrl::parse("example.com").unwrap(),
            "data:image/png;base64,AAAA",
            "abc123".parse().unwrap(),
        )
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let record = sample_input().into_record();
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.short_id.as_str(), "abc123");
        assert!(!record.id.as_str().is_empty());
    }

    #[test]
    fn test_matches_id_and_short_id() {
        let record = sample_input().into_record();
        assert!(record.matches(record.id.as_str()));
        assert!(record.matches("ABC123"));
        assert!(!record.matches("zzz999"));
    }

    #[test]
    fn test_download_file_name() {
        let record = sample_input().into_record();
        assert_eq!(record.download_file_name(), "qr-code-abc123.png");
    }

    #[test]
    fn test_input_wire_shape() {
        let json = serde_json::to_value(sample_input()).unwrap();
        assert_eq!(json["original_url"], "https://example.com");
        assert_eq!(json["short_id"], "abc123");
        assert!(json.get("id").is_none());
    }
}

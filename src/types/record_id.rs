//! Identifiers for stored QR records.
//!
//! `RecordId` is assigned by the store: a remote backend hands out its own
//! ids (often integers), otherwise a UUID v4 is generated locally.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a stored QR record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a new locally-assigned id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get a short representation (first 8 characters).
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RecordIdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

// Remote rows carry either numeric or textual primary keys.
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        let id = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Signed(n) => n.to_string(),
            Raw::Unsigned(n) => n.to_string(),
        };

        if id.is_empty() {
            return Err(serde::de::Error::custom("record id cannot be empty"));
        }
        Ok(Self(id))
    }
}

/// Error type for RecordId parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordIdError {
    #[error("record id cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_generation() {
        let id1 = RecordId::new();
        let id2 = RecordId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
    }

    #[test]
    fn test_record_id_short() {
        let id = RecordId::new();
        assert_eq!(id.short().len(), 8);

        let tiny: RecordId = "42".parse().unwrap();
        assert_eq!(tiny.short(), "42");
    }

    #[test]
    fn test_record_id_from_numeric_json() {
        let id: RecordId = serde_json::from_str("17").unwrap();
        assert_eq!(id.as_str(), "17");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"17\"");
    }

    #[test]
    fn test_record_id_rejects_empty() {
        assert!("  ".parse::<RecordId>().is_err());
        assert!(serde_json::from_str::<RecordId>("\"\"").is_err());
    }
}

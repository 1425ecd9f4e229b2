//! Short display/download handles.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A short random base-36 token.
///
/// Used for display and download file names. Collisions are possible and
/// tolerated; use [`RecordId`](super::RecordId) for identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    /// Number of characters in a generated token.
    pub const LEN: usize = 6;

    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let token = (0..Self::LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShortId {
    type Err = ShortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortIdError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ShortIdError::InvalidCharacters(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

/// Error type for ShortId parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShortIdError {
    #[error("short id cannot be empty")]
    Empty,
    #[error("short id must be alphanumeric: {0}")]
    InvalidCharacters(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_short_id_shape() {
        let id = ShortId::generate();
        assert_eq!(id.as_str().len(), ShortId::LEN);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn test_parse_short_id() {
        let id: ShortId = "Ab12cd".parse().unwrap();
        assert_eq!(id.as_str(), "ab12cd");
        assert!("ab-12".parse::<ShortId>().is_err());
        assert!("".parse::<ShortId>().is_err());
    }
}

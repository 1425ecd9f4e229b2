//! Normalized target URLs.
//!
//! Users type bare hosts like `google.com`; every stored URL carries an
//! explicit `http` or `https` scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Scheme prepended to input that has none.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

const RECOGNIZED_PREFIXES: [&str; 2] = ["http://", "https://"];

/// A validated absolute URL with an `http`/`https` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Normalize raw input and validate the result.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(UrlError::Empty);
        }
        validate(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TargetUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for URL normalization and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("'{0}' is not a well-formed URL: {1}")]
    Malformed(String, String),
    #[error("'{0}' has no host")]
    MissingHost(String),
}

/// Prepend `https://` unless the input already starts with a recognized
/// scheme prefix. Surrounding whitespace is trimmed; empty input stays empty.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || has_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
}

fn has_scheme(s: &str) -> bool {
    RECOGNIZED_PREFIXES.iter().any(|prefix| {
        s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}

fn validate(normalized: &str) -> Result<(), UrlError> {
    let parsed = Url::parse(normalized)
        .map_err(|e| UrlError::Malformed(normalized.to_string(), e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlError::MissingHost(normalized.to_string())),
    }
}

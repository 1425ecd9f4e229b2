//! Remote backend connection parameters.

use std::fmt;

/// Environment variable holding the backend endpoint.
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the backend access key.
pub const KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Endpoint and access key for the remote record backend.
///
/// Resolved once at startup. When either value is missing the process runs
/// in local-only mode for its whole lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
}

impl RemoteConfig {
    /// Build a config only when both parts are present and non-blank.
    pub fn from_parts(url: Option<String>, key: Option<String>) -> Option<Self> {
        let url = url.map(|u| u.trim().trim_end_matches('/').to_string())?;
        let key = key.map(|k| k.trim().to_string())?;

        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self { url, key })
    }
}

// Keeps the access key out of logs.
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_parts_required() {
        assert!(RemoteConfig::from_parts(None, Some("k".into())).is_none());
        assert!(RemoteConfig::from_parts(Some("https://x.supabase.co".into()), None).is_none());
        assert!(RemoteConfig::from_parts(Some("  ".into()), Some("k".into())).is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config =
            RemoteConfig::from_parts(Some("https://x.supabase.co/".into()), Some("key".into()))
                .unwrap();
        assert_eq!(config.url, "https://x.supabase.co");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config =
            RemoteConfig::from_parts(Some("https://x.supabase.co".into()), Some("secret".into()))
                .unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}

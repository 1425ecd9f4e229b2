//! Core type definitions using newtype patterns for type safety.
//!
//! These types keep ids, download handles, and normalized URLs from being
//! mixed up as plain strings.

mod record_id;
mod short_id;
mod url;

pub use self::url::{normalize, TargetUrl, UrlError, DEFAULT_SCHEME_PREFIX};
pub use record_id::{RecordId, RecordIdError};
pub use short_id::{ShortId, ShortIdError};

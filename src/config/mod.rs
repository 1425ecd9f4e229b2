//! Configuration management for justqr.
//!
//! Provides XDG-compliant settings storage and the remote backend
//! connection parameters.

mod remote;
mod settings;

pub use remote::{RemoteConfig, KEY_ENV, URL_ENV};
pub use settings::{AppSettings, Paths};

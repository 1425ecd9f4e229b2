//! Error types for justqr.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

use crate::encoder::EncodeError;
use crate::types::UrlError;

/// User-visible errors from a generation request.
///
/// Storage failures never appear here: the record store absorbs them.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("please enter a URL")]
    EmptyInput,

    #[error("please enter a valid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("a QR code is already being generated")]
    Busy,

    #[error("error generating QR code: {0}")]
    Encoding(#[from] EncodeError),

    #[error("encoder task failed: {0}")]
    Task(String),
}

/// Result type alias for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Internal storage errors.
///
/// These are logged and degraded inside the record store and never reach
/// the workflow or the CLI.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("remote backend unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("remote backend returned {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("local storage is corrupt: {0}")]
    LocalStorageCorrupt(String),

    #[error("local storage read failed: {0}")]
    LocalStorageReadFailed(String),

    #[error("local storage write failed: {0}")]
    LocalStorageWriteFailed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for configuration")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors surfaced by CLI subcommands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no QR code matches '{0}'")]
    NotFound(String),

    #[error("'{0}' matches {1} QR codes, use the full id")]
    Ambiguous(String, usize),

    #[error("record {0} holds an unreadable image payload")]
    BadPayload(String),

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

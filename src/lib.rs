//! # justqr - No fluff, just QR codes
//!
//! justqr turns URLs into high-resolution QR codes, keeps a record of every
//! generation, and lets you browse, view, and download past codes.
//!
//! ## Features
//!
//! - **URL Normalization**: Bare hosts like `google.com` get an `https://` scheme
//! - **High Resolution**: ~2000px PNG codes with the highest error correction
//! - **Degrading Persistence**: Supabase when configured, always mirrored to a
//!   local JSON store, which also serves reads when the remote is down
//! - **History**: Newest-first listing, lookup by id or short id, PNG download
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use justqr::encoder::PngEncoder;
//! use justqr::storage::{LocalOnlyStore, LocalRecords};
//! use justqr::workflow::Workflow;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = LocalOnlyStore::new(LocalRecords::in_dir("./data"));
//!     let workflow = Workflow::new(Arc::new(store), Arc::new(PngEncoder::default()));
//!
//!     let generation = workflow.generate("google.com").await.unwrap();
//!     println!("{} -> {}", generation.record.short_id, generation.record.original_url);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Newtypes for record ids, short ids, and normalized URLs
//! - [`encoder`] - QR matrix to PNG data URI
//! - [`storage`] - Record store strategies with remote-to-local fallback
//! - [`workflow`] - The generation workflow
//! - [`config`] - Settings, paths, and remote connection parameters
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use error::{CliError, GenerateError, StorageError};
pub use storage::{QrRecord, QrRecordInput, RecordStore};
pub use types::{RecordId, ShortId, TargetUrl};
pub use workflow::{Generation, Workflow};

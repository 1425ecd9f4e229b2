//! Generation workflow.
//!
//! Orchestrates one request: validate the input, encode the URL, save the
//! record, and re-fetch the history from the store.

use crate::encoder::Encoder;
use crate::error::{GenerateError, GenerateResult};
use crate::storage::{LoadSource, QrRecord, QrRecordInput, RecordStore, SaveOutcome};
use crate::types::{ShortId, TargetUrl};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Result of a completed generation.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The record just created.
    pub record: QrRecord,
    /// How the store persisted it.
    pub outcome: SaveOutcome,
    /// Where the refreshed history came from.
    pub history_source: LoadSource,
}

#[derive(Debug, Default)]
struct View {
    current: Option<QrRecord>,
    history: Vec<QrRecord>,
}

/// Drives generations against a store and an encoder.
///
/// A workflow runs at most one generation at a time.
pub struct Workflow {
    store: Arc<dyn RecordStore>,
    encoder: Arc<dyn Encoder>,
    busy: AtomicBool,
    view: Mutex<View>,
}

/// Clears the busy flag when a generation ends, on every path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Workflow {
    pub fn new(store: Arc<dyn RecordStore>, encoder: Arc<dyn Encoder>) -> Self {
        Self {
            store,
            encoder,
            busy: AtomicBool::new(false),
            view: Mutex::new(View::default()),
        }
    }

    /// Whether a generation is in progress.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Generate, persist, and display a QR code for `raw_input`.
    ///
    /// Input and encoder failures abort before anything is stored. Storage
    /// failures are absorbed by the store.
    pub async fn generate(&self, raw_input: &str) -> GenerateResult<Generation> {
        if raw_input.trim().is_empty() {
            return Err(GenerateError::EmptyInput);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GenerateError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let url = TargetUrl::parse(raw_input)?;
        debug!(url = %url, "generating QR code");

        let encoder = Arc::clone(&self.encoder);
        let text = url.as_str().to_string();
        let qr_code_data = tokio::task::spawn_blocking(move || encoder.encode(&text))
            .await
            .map_err(|e| GenerateError::Task(e.to_string()))??;

        let input = QrRecordInput::new(url, qr_code_data, ShortId::generate());
        let saved = self.store.save(input).await;
        if !saved.outcome.is_durable() {
            warn!(id = %saved.record.id, "record could not be persisted and will not survive a restart");
        }
        info!(id = %saved.record.id, short_id = %saved.record.short_id, outcome = %saved.outcome, "QR code generated");

        let history_source = self.refresh_history().await;
        self.view().current = Some(saved.record.clone());

        Ok(Generation {
            record: saved.record,
            outcome: saved.outcome,
            history_source,
        })
    }

    /// Replace the held history with a fresh read from the store.
    pub async fn refresh_history(&self) -> LoadSource {
        let loaded = self.store.load_all().await;
        debug!(count = loaded.records.len(), source = %loaded.source, "history refreshed");
        self.view().history = loaded.records;
        loaded.source
    }

    /// Snapshot of the history as of the last refresh, newest first.
    pub fn history(&self) -> Vec<QrRecord> {
        self.view().history.clone()
    }

    /// The record currently on display.
    pub fn current(&self) -> Option<QrRecord> {
        self.view().current.clone()
    }

    /// Make the history record named by `key` current.
    ///
    /// `key` is a full id or a short id. Returns every match; the current
    /// record only changes when there is exactly one.
    pub fn select(&self, key: &str) -> Vec<QrRecord> {
        let mut view = self.view();
        let matches: Vec<QrRecord> = view
            .history
            .iter()
            .filter(|record| record.matches(key))
            .cloned()
            .collect();

        // Full ids win over colliding short ids.
        let exact: Vec<QrRecord> = matches
            .iter()
            .filter(|record| record.id.as_str() == key.trim())
            .cloned()
            .collect();
        let matches = if exact.len() == 1 { exact } else { matches };

        if let [only] = matches.as_slice() {
            view.current = Some(only.clone());
        }
        matches
    }

    fn view(&self) -> MutexGuard<'_, View> {
        // The view holds plain data, so a poisoned lock is still consistent.
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

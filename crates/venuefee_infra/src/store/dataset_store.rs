//! File-backed dataset store.
//!
//! Holds the current validated [`Dataset`] in memory and mirrors it to a JSON
//! document on disk (2-space indentation). Every replacement goes through
//! validation first; a rejected document never reaches the file or the
//! in-memory copy.
//!
//! Writes are serialized under the store mutex and land via a sibling temp
//! file plus rename, so a reader of the file sees either the old or the new
//! document.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use thiserror::Error;
use venuefee_core::{
    Dataset, Exchange, ValidationError, dataset_fingerprint, format_fingerprint, validate_dataset,
};

// ─── Errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no exchange named '{0}' in the dataset")]
    UnknownExchange(String),
}

// ─── Metrics ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct StoreMetrics {
    /// Replacements written to the store.
    updates_total: AtomicU64,
    /// Replacements refused (validation, unknown exchange, or write failure).
    rejected_total: AtomicU64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self {
            updates_total: AtomicU64::new(0),
            rejected_total: AtomicU64::new(0),
        }
    }

    fn record_update(&self) {
        self.updates_total.fetch_add(1, Ordering::Relaxed);
    }

    fn record_rejected(&self) {
        self.rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn updates_total(&self) -> u64 {
        self.updates_total.load(Ordering::Relaxed)
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected_total.load(Ordering::Relaxed)
    }
}

impl Default for StoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Store ─────────────────────────────────────────────────────────────

/// Result of a successful replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Fingerprint of the dataset now stored.
    pub fingerprint: u64,
    pub exchanges: usize,
}

#[derive(Debug)]
pub struct DatasetStore {
    state: Mutex<Dataset>,
    path: Option<PathBuf>,
    metrics: StoreMetrics,
}

impl DatasetStore {
    /// Load and validate the dataset document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&text)?;
        let dataset = validate_dataset(&raw)?;

        tracing::info!(
            path = %path.display(),
            exchanges = dataset.len(),
            fingerprint = %format_fingerprint(dataset_fingerprint(&dataset)),
            "dataset loaded"
        );

        Ok(Self {
            state: Mutex::new(dataset),
            path: Some(path.to_path_buf()),
            metrics: StoreMetrics::new(),
        })
    }

    /// Store with no backing file. Updates only swap the in-memory copy.
    pub fn in_memory(dataset: Dataset) -> Self {
        Self {
            state: Mutex::new(dataset),
            path: None,
            metrics: StoreMetrics::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    /// Copy of the current dataset.
    pub fn snapshot(&self) -> Dataset {
        self.state
            .lock()
            .expect("dataset store mutex poisoned")
            .clone()
    }

    /// Validate `raw` and, if it passes, persist it and make it current.
    pub fn apply_update(&self, raw: &Value) -> Result<UpdateOutcome, StoreError> {
        let dataset = match validate_dataset(raw) {
            Ok(dataset) => dataset,
            Err(err) => {
                self.metrics.record_rejected();
                tracing::warn!(path = %err.path, reason = %err.kind, "dataset update rejected");
                return Err(err.into());
            }
        };
        self.commit(dataset)
    }

    /// Replace every exchange named like `exchange` and persist the result.
    pub fn replace_exchange(&self, exchange: &Exchange) -> Result<UpdateOutcome, StoreError> {
        let mut current = self.state.lock().expect("dataset store mutex poisoned");
        let Some(updated) = current.replace_exchange(exchange) else {
            self.metrics.record_rejected();
            tracing::warn!(exchange = %exchange.name, "exchange update rejected: unknown name");
            return Err(StoreError::UnknownExchange(exchange.name.clone()));
        };
        self.commit_locked(&mut current, updated)
    }

    fn commit(&self, dataset: Dataset) -> Result<UpdateOutcome, StoreError> {
        let mut current = self.state.lock().expect("dataset store mutex poisoned");
        self.commit_locked(&mut current, dataset)
    }

    fn commit_locked(
        &self,
        current: &mut Dataset,
        dataset: Dataset,
    ) -> Result<UpdateOutcome, StoreError> {
        if let Some(path) = &self.path {
            if let Err(err) = persist_dataset(path, &dataset) {
                self.metrics.record_rejected();
                tracing::error!(path = %path.display(), error = %err, "dataset write failed");
                return Err(err);
            }
        }

        let outcome = UpdateOutcome {
            fingerprint: dataset_fingerprint(&dataset),
            exchanges: dataset.len(),
        };
        *current = dataset;
        self.metrics.record_update();
        tracing::info!(
            exchanges = outcome.exchanges,
            fingerprint = %format_fingerprint(outcome.fingerprint),
            "dataset updated"
        );
        Ok(outcome)
    }
}

fn persist_dataset(path: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(dataset)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = File::create(&tmp_path)?;
    let written = file
        .write_all(text.as_bytes())
        .and_then(|()| file.sync_all())
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = written {
        // No partial document may outlive a failed write.
        drop(file);
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            tracing::warn!(path = %tmp_path.display(), error = %cleanup, "temp file cleanup failed");
        }
        return Err(err.into());
    }
    Ok(())
}

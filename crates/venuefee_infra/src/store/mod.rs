//! Durable storage for the comparison dataset.

pub mod dataset_store;

pub use dataset_store::{DatasetStore, StoreError, StoreMetrics, UpdateOutcome};

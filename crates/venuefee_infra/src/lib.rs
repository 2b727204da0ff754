#![forbid(unsafe_code)]

pub mod config;
pub mod store;
pub mod telemetry;
pub mod update;

pub use config::{ConfigParam, DashboardConfig, MissingConfigError};
pub use store::{DatasetStore, StoreError, StoreMetrics, UpdateOutcome};
pub use update::{UpdateResponse, handle_update_dataset};

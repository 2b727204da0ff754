#![forbid(unsafe_code)]

pub mod chart;
pub mod fingerprint;
pub mod model;
pub mod ranking;
pub mod tiers;
pub mod validation;

pub use fingerprint::{dataset_fingerprint, format_fingerprint};
pub use model::{Dataset, Exchange, FeePoint, FeeSchedule, FeeSide, Product, ScheduleError, VenueType};
pub use ranking::{RankingEntry, Rankings, rank_at_volume};
pub use tiers::{cumulative_fees_at_volume, fee_at_volume, normalize_to_day_basis};
pub use validation::{ValidationError, ValidationErrorKind, validate_dataset, validate_exchange};

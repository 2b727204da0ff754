//! Fee-schedule data model.

pub mod dataset;
pub mod exchange;
pub mod schedule;

pub use dataset::Dataset;
pub use exchange::{Exchange, FeeSide, Product, VenueType};
pub use schedule::{FeePoint, FeeSchedule, ScheduleError};

//! Helpers consumed by the chart layer: ticks, domains, sampled series, step
//! vertices and display formatting.

pub mod domains;
pub mod format;
pub mod series;
pub mod steps;
pub mod ticks;

pub use domains::{ChartDomains, Domain, DomainConfig, EMPTY_DOMAINS, chart_domains};
pub use format::{format_cumulative_fees, format_fee, format_volume};
pub use series::{
    ChartSeries, SeriesPoint, chart_series, sample_interval, sample_volumes, snap_hover_volume,
};
pub use steps::step_points;
pub use ticks::{
    AxisScale, MIN_LINEAR_TICKS, bps_ticks, linear_volume_interval, snap_to_million_tick,
    volume_ticks,
};

//! Sampled fee curves for the chart body.
//!
//! The chart draws one line per exchange through a shared set of sample
//! volumes: a regular grid over the volume domain, every tier threshold that
//! falls inside it, and two points past the right edge so the lines run to
//! the border. Hover positions are snapped back onto the grid.

use serde::Serialize;

use crate::chart::Domain;
use crate::model::{Exchange, FeeSide};
use crate::tiers::fee_at_volume;

/// Domains whose upper bound (millions) is at most this get half-million
/// hover snapping below it.
pub const FINE_HOVER_LIMIT: f64 = 30.0;

/// Hover granularity (millions) inside [`FINE_HOVER_LIMIT`].
pub const FINE_HOVER_STEP: f64 = 0.5;

/// Extra samples past the domain's upper bound, as fractions of it.
const TRAILING_FRACTIONS: [f64; 2] = [0.05, 0.1];

/// Sampling interval (millions) for a domain of width `range`.
///
/// | range (M)   | interval (M) |
/// |-------------|--------------|
/// | ≤ 30        | 1            |
/// | ≤ 50        | 2            |
/// | ≤ 200       | 5            |
/// | ≤ 1 000     | 10           |
/// | otherwise   | 20           |
pub fn sample_interval(range: f64) -> f64 {
    if range <= 30.0 {
        1.0
    } else if range <= 50.0 {
        2.0
    } else if range <= 200.0 {
        5.0
    } else if range <= 1000.0 {
        10.0
    } else {
        20.0
    }
}

/// Sorted, de-duplicated sample volumes for `domain`.
///
/// Always contains 0, the domain bounds, the regular grid between them, every
/// maker and taker threshold of `exchanges` inside the domain, and the two
/// trailing points at +5% and +10% of the upper bound. Non-finite bounds
/// yield no samples.
pub fn sample_volumes(exchanges: &[Exchange], domain: Domain) -> Vec<f64> {
    let (min, max) = domain;
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }

    let interval = sample_interval(max - min);
    let steps = ((max - min) / interval).ceil().max(0.0) as u64;

    let mut volumes = vec![0.0];
    if min > 0.0 {
        volumes.push(min);
    }
    for step in 0..=steps {
        let volume = min + step as f64 * interval;
        if volume > max {
            break;
        }
        volumes.push(volume);
    }
    volumes.push(max);
    volumes.extend(TRAILING_FRACTIONS.iter().map(|frac| max + max * frac));

    for exchange in exchanges {
        let thresholds = exchange.maker_fees.iter().chain(exchange.taker_fees.iter());
        volumes.extend(
            thresholds
                .map(|point| point.volume)
                .filter(|volume| *volume >= min && *volume <= max),
        );
    }

    volumes.sort_by(f64::total_cmp);
    volumes.dedup();
    volumes
}

/// Fees of every exchange at one sample volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub volume: f64,
    /// bps, indexed like [`ChartSeries::exchanges`].
    pub fees: Vec<f64>,
    /// True where the exchange's displayed schedule has a threshold at
    /// `volume`; the chart marks these with a dot.
    pub is_step: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub side: FeeSide,
    pub exchanges: Vec<String>,
    pub points: Vec<SeriesPoint>,
}

/// One line per exchange for `side`, sampled at [`sample_volumes`].
pub fn chart_series(exchanges: &[Exchange], side: FeeSide, domain: Domain) -> ChartSeries {
    let points = sample_volumes(exchanges, domain)
        .into_iter()
        .map(|volume| {
            let schedules = exchanges.iter().map(|exchange| exchange.schedule(side));
            let (fees, is_step) = schedules
                .map(|schedule| {
                    let step = schedule.iter().any(|point| point.volume == volume);
                    (fee_at_volume(schedule, volume), step)
                })
                .unzip();
            SeriesPoint {
                volume,
                fees,
                is_step,
            }
        })
        .collect();

    ChartSeries {
        side,
        exchanges: exchanges.iter().map(|exchange| exchange.name.clone()).collect(),
        points,
    }
}

/// Hover volume reported for a pointer at `volume`.
///
/// When the domain tops out at 30M or less, positions below 30M snap to the
/// nearest half million (halves round up). Anything else passes through.
pub fn snap_hover_volume(volume: f64, domain_max: f64) -> f64 {
    if domain_max <= FINE_HOVER_LIMIT && volume < FINE_HOVER_LIMIT {
        (volume / FINE_HOVER_STEP + 0.5).floor() * FINE_HOVER_STEP
    } else {
        volume
    }
}

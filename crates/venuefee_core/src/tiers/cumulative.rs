//! Cumulative-cost integration over a step fee curve.
//!
//! Total fees paid by a trader whose volume grows from zero to `volume`,
//! paying each tier's rate on the slice of volume inside that tier:
//!
//! `sum_i (min(volume, t_{i+1}) - t_i) * 1e6 * r_i / 1e4` over reached tiers.

use crate::model::FeePoint;

/// Currency units per stored volume unit (thresholds are in millions).
pub const BASE_UNITS_PER_MILLION: f64 = 1_000_000.0;

/// Basis points per unit rate.
pub const BPS_PER_UNIT: f64 = 10_000.0;

/// Fees (currency units) paid integrating the schedule from 0 to `volume`.
///
/// - `volume <= 0` → 0.0
/// - tiers with a threshold above `volume` are not reached and contribute nothing
/// - the last tier extends to `volume`
///
/// Assumes `points` is sorted ascending.
pub fn cumulative_fees_at_volume(points: &[FeePoint], volume: f64) -> f64 {
    if volume <= 0.0 {
        return 0.0;
    }

    let mut total = 0.0;
    for (index, point) in points.iter().enumerate() {
        if volume < point.volume {
            continue;
        }

        let tier_start = point.volume;
        let tier_end = match points.get(index + 1) {
            Some(next) => volume.min(next.volume),
            None => volume,
        };

        if tier_end > tier_start {
            let tier_volume = (tier_end - tier_start) * BASE_UNITS_PER_MILLION;
            total += tier_volume * (point.fee / BPS_PER_UNIT);
        }
    }
    total
}

//! Rate lookup: which tier's fee applies at a traded volume.

use crate::model::FeePoint;

/// Fee (bps) in effect at `volume` (millions).
///
/// Scans tiers in ascending order and keeps the fee of the last tier whose
/// threshold lies below `volume`, stopping at the first threshold that does
/// not. A volume sitting exactly on a threshold is still charged the lower
/// tier's rate: that is the rate paid on the last unit traded to reach it.
///
/// - volume at or under the first threshold → first tier's fee
/// - empty slice → 0.0
///
/// Assumes `points` is sorted ascending; [`crate::model::FeeSchedule`]
/// guarantees that.
pub fn fee_at_volume(points: &[FeePoint], volume: f64) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };

    let mut applicable = first.fee;
    for point in points {
        if point.volume < volume {
            applicable = point.fee;
        } else {
            break;
        }
    }
    applicable
}

//! Step-line vertices for drawing a schedule.

use crate::model::FeePoint;

/// Two vertices per tier: where it starts, and where it ends.
///
/// A tier ends one unit before the next threshold; the last tier runs to
/// `max_volume`.
pub fn step_points(points: &[FeePoint], max_volume: f64) -> Vec<FeePoint> {
    let mut steps = Vec::with_capacity(points.len() * 2);
    for (index, point) in points.iter().enumerate() {
        steps.push(*point);
        let end = match points.get(index + 1) {
            Some(next) => next.volume - 1.0,
            None => max_volume,
        };
        steps.push(FeePoint::new(end, point.fee));
    }
    steps
}

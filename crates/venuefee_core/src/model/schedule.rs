//! Tiered fee schedules.
//!
//! A schedule is a non-empty list of `(volume, fee)` tiers sorted ascending by
//! volume threshold. Thresholds are in millions of quote currency; fees are in
//! basis points (negative = rebate).
//!
//! The ordering invariant is checked once, at construction. Every numeric
//! operation downstream (lookup, integration, normalization) relies on it.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tier of a fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeePoint {
    /// Tier threshold in millions of currency units.
    pub volume: f64,
    /// Rate in basis points once the threshold is reached.
    pub fee: f64,
}

impl FeePoint {
    pub const fn new(volume: f64, fee: f64) -> Self {
        Self { volume, fee }
    }
}

/// Reason a list of points cannot form a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("schedule must contain at least one tier")]
    Empty,
    #[error("tier {index}: volume {volume} is negative")]
    NegativeVolume { index: usize, volume: f64 },
    #[error("tier {index}: volume is not a finite number")]
    NonFiniteVolume { index: usize },
    #[error("tier {index}: fee is not a finite number")]
    NonFiniteFee { index: usize },
    #[error("tier {index}: volume {volume} is below the previous threshold {previous}")]
    Descending {
        index: usize,
        previous: f64,
        volume: f64,
    },
}

impl ScheduleError {
    /// Index of the offending tier, if the error is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            ScheduleError::Empty => None,
            ScheduleError::NegativeVolume { index, .. }
            | ScheduleError::NonFiniteVolume { index }
            | ScheduleError::NonFiniteFee { index }
            | ScheduleError::Descending { index, .. } => Some(*index),
        }
    }
}

/// Non-empty fee schedule sorted ascending by threshold.
///
/// Equal consecutive thresholds are accepted; the later tier shadows the
/// earlier one in lookups and the earlier one covers a zero-width range when
/// integrating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeePoint>", into = "Vec<FeePoint>")]
pub struct FeeSchedule {
    points: Vec<FeePoint>,
}

impl FeeSchedule {
    /// Build a schedule, rejecting empty, negative, non-finite or descending input.
    pub fn new(points: Vec<FeePoint>) -> Result<Self, ScheduleError> {
        if points.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let mut previous: Option<f64> = None;
        for (index, point) in points.iter().enumerate() {
            if !point.volume.is_finite() {
                return Err(ScheduleError::NonFiniteVolume { index });
            }
            if point.volume < 0.0 {
                return Err(ScheduleError::NegativeVolume {
                    index,
                    volume: point.volume,
                });
            }
            if !point.fee.is_finite() {
                return Err(ScheduleError::NonFiniteFee { index });
            }
            if let Some(prev) = previous {
                if point.volume < prev {
                    return Err(ScheduleError::Descending {
                        index,
                        previous: prev,
                        volume: point.volume,
                    });
                }
            }
            previous = Some(point.volume);
        }

        Ok(Self { points })
    }

    /// Single-tier schedule starting at zero volume.
    pub fn flat(fee: f64) -> Result<Self, ScheduleError> {
        Self::new(vec![FeePoint::new(0.0, fee)])
    }

    pub fn points(&self) -> &[FeePoint] {
        &self.points
    }

    /// First tier. Always present.
    pub fn first(&self) -> FeePoint {
        self.points[0]
    }

    /// Rate in effect at `volume`. See [`crate::tiers::fee_at_volume`].
    pub fn fee_at(&self, volume: f64) -> f64 {
        crate::tiers::fee_at_volume(&self.points, volume)
    }

    /// Total fees paid from zero up to `volume`. See
    /// [`crate::tiers::cumulative_fees_at_volume`].
    pub fn cumulative_fees_at(&self, volume: f64) -> f64 {
        crate::tiers::cumulative_fees_at_volume(&self.points, volume)
    }

    /// New schedule with every threshold multiplied by `multiplier`.
    ///
    /// A positive finite multiplier keeps thresholds non-negative and ordered.
    pub(crate) fn scale_volumes(&self, multiplier: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|point| FeePoint {
                    volume: point.volume * multiplier,
                    ..*point
                })
                .collect(),
        }
    }

    pub fn into_points(self) -> Vec<FeePoint> {
        self.points
    }
}

impl Deref for FeeSchedule {
    type Target = [FeePoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl AsRef<[FeePoint]> for FeeSchedule {
    fn as_ref(&self) -> &[FeePoint] {
        &self.points
    }
}

impl TryFrom<Vec<FeePoint>> for FeeSchedule {
    type Error = ScheduleError;

    fn try_from(points: Vec<FeePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<FeeSchedule> for Vec<FeePoint> {
    fn from(schedule: FeeSchedule) -> Self {
        schedule.points
    }
}

//! Day-basis normalization.
//!
//! Venues measure tier volume over different trailing windows (7, 14, 30
//! days). To compare them, thresholds are rescaled onto a common window; fee
//! rates are left as they are.
//!
//! Multipliers for the common windows come from a fixed table rather than
//! `target / source`, because volume accrual is not linear in window length.
//! Any other pair falls back to the linear ratio.

use std::borrow::Cow;
use std::num::NonZeroU32;

use crate::model::Exchange;

/// Volume multiplier taking thresholds measured over `from_days` to `to_days`.
///
/// | from → to | 7  | 14  | 30   |
/// |-----------|----|-----|------|
/// | 7         | 1  | 2   | 4    |
/// | 14        | 0.5| 1   | 2    |
/// | 30        |0.25| 0.5 | 1    |
///
/// Pairs outside the table use `to_days / from_days`.
pub fn day_basis_multiplier(from_days: NonZeroU32, to_days: NonZeroU32) -> f64 {
    let (from_days, to_days) = (from_days.get(), to_days.get());
    match (from_days, to_days) {
        (7, 14) => 2.0,
        (7, 30) => 4.0,
        (14, 7) => 0.5,
        (14, 30) => 2.0,
        (30, 7) => 0.25,
        (30, 14) => 0.5,
        _ => {
            if from_days != to_days {
                tracing::warn!(
                    from_days,
                    to_days,
                    "no fixed multiplier for day basis pair, using linear ratio"
                );
            }
            f64::from(to_days) / f64::from(from_days)
        }
    }
}

/// Rescale both schedules of `exchange` to `target_day_basis`.
///
/// Returns the input untouched (`Cow::Borrowed`) when it is already on the
/// target basis; otherwise a new exchange whose `day_basis` is the target and
/// whose thresholds are multiplied by [`day_basis_multiplier`].
pub fn normalize_to_day_basis(
    exchange: &Exchange,
    target_day_basis: NonZeroU32,
) -> Cow<'_, Exchange> {
    if exchange.day_basis == target_day_basis {
        return Cow::Borrowed(exchange);
    }

    let multiplier = day_basis_multiplier(exchange.day_basis, target_day_basis);
    tracing::debug!(
        exchange = %exchange.name,
        from_days = exchange.day_basis.get(),
        to_days = target_day_basis.get(),
        multiplier,
        "normalizing schedule"
    );

    Cow::Owned(Exchange {
        name: exchange.name.clone(),
        venue_type: exchange.venue_type,
        product: exchange.product,
        day_basis: target_day_basis,
        maker_fees: exchange.maker_fees.scale_volumes(multiplier),
        taker_fees: exchange.taker_fees.scale_volumes(multiplier),
    })
}

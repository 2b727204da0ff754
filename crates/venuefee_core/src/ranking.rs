//! Cheapest-venue rankings at a given volume.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Exchange, VenueType};
use crate::tiers::{cumulative_fees_at_volume, fee_at_volume};

/// One venue's rates and accumulated cost at the ranking volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub exchange: String,
    pub venue_type: VenueType,
    /// bps
    pub maker_fee: f64,
    /// bps
    pub taker_fee: f64,
    pub maker_cumulative_fees: f64,
    pub taker_cumulative_fees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    /// Ordered by maker fee, then taker fee, then name.
    pub maker: Vec<RankingEntry>,
    /// Ordered by taker fee, then maker fee, then name.
    pub taker: Vec<RankingEntry>,
}

/// Rank `exchanges` at `volume` (millions).
///
/// Schedules are used as given; normalize them to a common day basis before
/// calling this if the comparison should be fair.
pub fn rank_at_volume(exchanges: &[Exchange], volume: f64) -> Rankings {
    let entries: Vec<RankingEntry> = exchanges
        .iter()
        .map(|exchange| RankingEntry {
            exchange: exchange.name.clone(),
            venue_type: exchange.venue_type,
            maker_fee: fee_at_volume(&exchange.maker_fees, volume),
            taker_fee: fee_at_volume(&exchange.taker_fees, volume),
            maker_cumulative_fees: cumulative_fees_at_volume(&exchange.maker_fees, volume),
            taker_cumulative_fees: cumulative_fees_at_volume(&exchange.taker_fees, volume),
        })
        .collect();

    let mut maker = entries.clone();
    maker.sort_by(|a, b| {
        compare_fee(a.maker_fee, b.maker_fee)
            .then_with(|| compare_fee(a.taker_fee, b.taker_fee))
            .then_with(|| a.exchange.cmp(&b.exchange))
    });

    let mut taker = entries;
    taker.sort_by(|a, b| {
        compare_fee(a.taker_fee, b.taker_fee)
            .then_with(|| compare_fee(a.maker_fee, b.maker_fee))
            .then_with(|| a.exchange.cmp(&b.exchange))
    });

    Rankings { maker, taker }
}

fn compare_fee(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

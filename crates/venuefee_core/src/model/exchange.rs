//! Venue entries: one exchange with its maker and taker schedules.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::model::FeeSchedule;

/// Venue classification as stored in the dataset (`type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    #[serde(rename = "CEX")]
    Cex,
    #[serde(rename = "DEX")]
    Dex,
    Nado,
}

impl VenueType {
    pub const ALL: [VenueType; 3] = [VenueType::Cex, VenueType::Dex, VenueType::Nado];

    pub fn as_str(self) -> &'static str {
        match self {
            VenueType::Cex => "CEX",
            VenueType::Dex => "DEX",
            VenueType::Nado => "Nado",
        }
    }

    /// Parse the wire token. Matching is exact (case-sensitive).
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|venue| venue.as_str() == token)
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traded product the schedule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Perp,
    Spot,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Perp, Product::Spot];

    pub fn as_str(self) -> &'static str {
        match self {
            Product::Perp => "perp",
            Product::Spot => "spot",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|product| product.as_str() == token)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Liquidity side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeSide {
    /// Liquidity-providing.
    Maker,
    /// Liquidity-consuming.
    Taker,
}

/// One venue's fee schedules.
///
/// `day_basis` is the trailing window, in days, over which volume is measured
/// for tier qualification. A zero-day window is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange {
    #[serde(rename = "exchange")]
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    pub product: Product,
    pub day_basis: NonZeroU32,
    pub maker_fees: FeeSchedule,
    pub taker_fees: FeeSchedule,
}

impl Exchange {
    pub fn schedule(&self, side: FeeSide) -> &FeeSchedule {
        match side {
            FeeSide::Maker => &self.maker_fees,
            FeeSide::Taker => &self.taker_fees,
        }
    }

    /// Both schedules rescaled to `target_day_basis`. Owned counterpart of
    /// [`crate::tiers::normalize_to_day_basis`].
    pub fn normalized(&self, target_day_basis: NonZeroU32) -> Exchange {
        crate::tiers::normalize_to_day_basis(self, target_day_basis).into_owned()
    }
}

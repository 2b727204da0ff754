//! Axis domains for the fee charts.

use crate::model::Exchange;

/// Padding rules for [`chart_domains`].
#[derive(Debug, Clone, PartialEq)]
pub struct DomainConfig {
    /// Fraction of the threshold spread added above the largest threshold.
    pub volume_padding_frac: f64,
    /// Fraction of the fee spread added on both sides of the fee domain.
    pub fee_padding_frac: f64,
    /// Lower bound on fee padding, in bps.
    pub min_fee_padding_bps: f64,
    /// The maker domain always reaches at least this far below zero (bps).
    pub maker_fee_floor_bps: f64,
    /// The taker domain always reaches at least this far below zero (bps).
    pub taker_fee_floor_bps: f64,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            volume_padding_frac: 0.10,
            fee_padding_frac: 0.30,
            min_fee_padding_bps: 1.0,
            maker_fee_floor_bps: 3.0,
            taker_fee_floor_bps: 1.0,
        }
    }
}

/// `[low, high]` axis bounds.
pub type Domain = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDomains {
    pub volume: Domain,
    pub maker_fee: Domain,
    pub taker_fee: Domain,
}

/// Domains shown when no exchange is selected.
pub const EMPTY_DOMAINS: ChartDomains = ChartDomains {
    volume: (0.0, 10_000_000.0),
    maker_fee: (-5.0, 10.0),
    taker_fee: (0.0, 10.0),
};

/// Volume and fee domains covering every tier of `exchanges`.
///
/// The volume axis always starts at zero. Fee axes are padded by
/// `max(min_fee_padding_bps, fee_padding_frac * spread)` and extended below
/// zero to the configured floor so rebates stay visible.
pub fn chart_domains(exchanges: &[Exchange], config: &DomainConfig) -> ChartDomains {
    if exchanges.is_empty() {
        return EMPTY_DOMAINS;
    }

    let mut min_volume = f64::INFINITY;
    let mut max_volume = 0.0_f64;
    let mut maker = Extent::new();
    let mut taker = Extent::new();

    for exchange in exchanges {
        for point in exchange.maker_fees.iter() {
            min_volume = min_volume.min(point.volume);
            max_volume = max_volume.max(point.volume);
            maker.include(point.fee);
        }
        for point in exchange.taker_fees.iter() {
            min_volume = min_volume.min(point.volume);
            max_volume = max_volume.max(point.volume);
            taker.include(point.fee);
        }
    }

    let volume_padding = (max_volume - min_volume) * config.volume_padding_frac;
    ChartDomains {
        volume: (0.0, max_volume + volume_padding),
        maker_fee: maker.padded(config, config.maker_fee_floor_bps),
        taker_fee: taker.padded(config, config.taker_fee_floor_bps),
    }
}

struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn padded(&self, config: &DomainConfig, floor_bps: f64) -> Domain {
        let padding = config
            .min_fee_padding_bps
            .max((self.max - self.min) * config.fee_padding_frac);
        ((self.min - padding).min(-floor_bps), self.max + padding)
    }
}

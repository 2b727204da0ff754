#![allow(dead_code)]

use std::num::NonZeroU32;

use serde_json::{Value, json};
use venuefee_core::{Exchange, FeePoint, FeeSchedule, Product, VenueType};

/// Schedule from `(volume, fee)` pairs. Panics on invalid input.
pub fn schedule(tiers: &[(f64, f64)]) -> FeeSchedule {
    FeeSchedule::new(
        tiers
            .iter()
            .map(|(volume, fee)| FeePoint::new(*volume, *fee))
            .collect(),
    )
    .expect("test schedule must be valid")
}

/// Day basis from a literal. Panics on zero.
pub fn days(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("test day basis must be positive")
}

pub fn exchange(
    name: &str,
    venue_type: VenueType,
    day_basis: u32,
    maker: &[(f64, f64)],
    taker: &[(f64, f64)],
) -> Exchange {
    Exchange {
        name: name.to_string(),
        venue_type,
        product: Product::Perp,
        day_basis: days(day_basis),
        maker_fees: schedule(maker),
        taker_fees: schedule(taker),
    }
}

/// Worked example A maker schedule.
pub const EXAMPLE_A: &[(f64, f64)] = &[(0.0, 1.5), (5.0, 1.2), (25.0, 0.8)];

/// Worked example B taker schedule.
pub const EXAMPLE_B: &[(f64, f64)] = &[(0.0, 3.8), (5.0, 3.3)];

pub fn sample_exchange_json() -> Value {
    json!({
        "exchange": "Binance",
        "type": "CEX",
        "product": "perp",
        "day_basis": 30,
        "maker_fees": [
            { "volume": 0, "fee": 2.0 },
            { "volume": 15, "fee": 1.6 },
            { "volume": 100, "fee": 1.4 }
        ],
        "taker_fees": [
            { "volume": 0, "fee": 5.0 },
            { "volume": 15, "fee": 4.0 }
        ]
    })
}

pub fn sample_dataset_json() -> Value {
    json!({
        "exchanges": [
            sample_exchange_json(),
            {
                "exchange": "Hyperliquid",
                "type": "DEX",
                "product": "perp",
                "day_basis": 14,
                "maker_fees": [
                    { "volume": 0, "fee": 1.5 },
                    { "volume": 5, "fee": 1.2 },
                    { "volume": 25, "fee": 0.8 }
                ],
                "taker_fees": [
                    { "volume": 0, "fee": 4.5 },
                    { "volume": 5, "fee": 4.0 }
                ]
            },
            {
                "exchange": "Nado",
                "type": "Nado",
                "product": "spot",
                "day_basis": 7,
                "maker_fees": [{ "volume": 0, "fee": -0.2 }],
                "taker_fees": [{ "volume": 0, "fee": 3.0 }]
            }
        ]
    })
}

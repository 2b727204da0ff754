//! Content fingerprint of a dataset.
//!
//! `fingerprint = xxhash64(for each exchange: name, type, product, day_basis, maker tiers, taker tiers)`
//!
//! Two datasets with the same exchanges in the same order share a
//! fingerprint. Floats are hashed by their bit pattern, so `0.0` and `-0.0`
//! differ.

use xxhash_rust::xxh64::xxh64;

use crate::model::{Dataset, FeeSchedule};

/// Byte that never appears inside UTF-8 text; separates fields.
const SEPARATOR: u8 = 0xFF;

pub fn dataset_fingerprint(dataset: &Dataset) -> u64 {
    let mut buf = Vec::with_capacity(256 * dataset.len());

    for exchange in dataset.exchanges() {
        buf.extend_from_slice(exchange.name.as_bytes());
        buf.push(SEPARATOR);
        buf.extend_from_slice(exchange.venue_type.as_str().as_bytes());
        buf.push(SEPARATOR);
        buf.extend_from_slice(exchange.product.as_str().as_bytes());
        buf.push(SEPARATOR);
        buf.extend_from_slice(&exchange.day_basis.get().to_le_bytes());
        buf.push(SEPARATOR);
        push_schedule(&mut buf, &exchange.maker_fees);
        push_schedule(&mut buf, &exchange.taker_fees);
    }

    xxh64(&buf, 0)
}

fn push_schedule(buf: &mut Vec<u8>, schedule: &FeeSchedule) {
    buf.extend_from_slice(&(schedule.len() as u64).to_le_bytes());
    for point in schedule.iter() {
        buf.extend_from_slice(&point.volume.to_bits().to_le_bytes());
        buf.extend_from_slice(&point.fee.to_bits().to_le_bytes());
    }
    buf.push(SEPARATOR);
}

/// Fingerprint as 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("{fingerprint:016x}")
}

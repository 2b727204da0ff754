//! Derived computations over a fee schedule: day-basis normalization, rate
//! lookup, and cumulative-cost integration.
//!
//! All functions are pure and total over their documented domains.

pub mod cumulative;
pub mod lookup;
pub mod normalize;

pub use cumulative::{BASE_UNITS_PER_MILLION, BPS_PER_UNIT, cumulative_fees_at_volume};
pub use lookup::fee_at_volume;
pub use normalize::{day_basis_multiplier, normalize_to_day_basis};

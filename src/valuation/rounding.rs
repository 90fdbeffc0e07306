//! Output precision policy
//!
//! Final prices and rates are rounded half-up to `SCALE` decimal places.
//! Intermediate search values are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places kept in returned prices and rates
pub const SCALE: u32 = 7;

/// Magnitudes below this round to zero at `SCALE` places
const HALF_UNIT: f64 = 5e-8;

/// Round to `SCALE` decimal places, ties away from zero.
///
/// The value is taken in its shortest round-trip decimal form, so `0.15`
/// rounds as the decimal 0.15 rather than its binary expansion. Non-finite
/// values pass through. So do magnitudes a 96-bit decimal cannot hold, which
/// includes the `f64::MAX` search sentinel; every such value is already an
/// integer.
pub fn round_to_precision(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value.abs() < HALF_UNIT {
        return 0.0;
    }

    let decimal = match Decimal::from_str(&value.to_string()) {
        Ok(d) => d,
        Err(_) => return value,
    };

    decimal
        .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .unwrap_or(value)
}

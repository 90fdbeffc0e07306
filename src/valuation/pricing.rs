//! Price from discount rate

use super::cashflows::present_value;
use super::rounding::round_to_precision;
use crate::bond::BondParameters;
use crate::error::ValuationError;

/// Price of a bond at the given discount rate, rounded to `SCALE` places.
///
/// Inputs are not validated; see [`try_price`] for the checked form.
pub fn price(coupon_rate: f64, years: u32, face_value: f64, discount_rate: f64) -> f64 {
    round_to_precision(present_value(coupon_rate, years, face_value, discount_rate))
}

/// Validating wrapper around [`price`]
pub fn try_price(params: &BondParameters, discount_rate: f64) -> Result<f64, ValuationError> {
    params.validate()?;

    if !discount_rate.is_finite() {
        return Err(ValuationError::invalid("discount_rate", "must be a finite number"));
    }
    if discount_rate <= -1.0 {
        return Err(ValuationError::invalid("discount_rate", "must be greater than -1"));
    }

    Ok(price(params.coupon_rate, params.years, params.face_value, discount_rate))
}

//! Cashflow present-value primitive
//!
//! Annual coupons of `coupon_rate * face_value` for `years` periods, with the
//! face value repaid alongside the final coupon.

use serde::Serialize;

/// Present value of a level-coupon bond under a flat annual discount rate.
///
/// Principal is discounted at the same power as the last coupon. Nothing is
/// validated: `discount_rate <= -1` or `years == 0` produce whatever IEEE-754
/// arithmetic gives (infinities, NaN, or just the face value).
pub fn present_value(coupon_rate: f64, years: u32, face_value: f64, discount_rate: f64) -> f64 {
    let coupon = coupon_rate * face_value;
    let base = 1.0 + discount_rate;

    let mut pv = 0.0;
    for period in 1..=years {
        pv += coupon / base.powf(period as f64);
    }

    pv + face_value / base.powf(years as f64)
}

/// One period of a bond's cashflow schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashflowRow {
    /// Period number (1-based, annual)
    pub period: u32,

    /// Coupon paid at the end of the period
    pub coupon: f64,

    /// Principal repaid (face value in the final period, zero otherwise)
    pub principal: f64,

    /// 1 / (1 + r)^period
    pub discount_factor: f64,

    /// (coupon + principal) * discount_factor
    pub present_value: f64,
}

impl CashflowRow {
    /// Undiscounted amount paid in this period
    pub fn total(&self) -> f64 {
        self.coupon + self.principal
    }
}

/// Period-by-period breakdown of the cashflows behind [`present_value`]
pub fn cashflow_schedule(
    coupon_rate: f64,
    years: u32,
    face_value: f64,
    discount_rate: f64,
) -> Vec<CashflowRow> {
    let coupon = coupon_rate * face_value;
    let base = 1.0 + discount_rate;

    (1..=years)
        .map(|period| {
            let discount_factor = 1.0 / base.powf(period as f64);
            let principal = if period == years { face_value } else { 0.0 };
            CashflowRow {
                period,
                coupon,
                principal,
                discount_factor,
                present_value: (coupon + principal) * discount_factor,
            }
        })
        .collect()
}

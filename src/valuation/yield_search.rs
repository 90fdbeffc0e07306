//! Yield from price
//!
//! Searches the unit interval for the discount rate whose present value
//! matches a target price. Present value falls as the rate rises, so a
//! price below target means the rate is too high and vice versa.
//!
//! The bounds are not halved. Each step moves one bound by a fixed
//! increment: coarse while the price is more than `CLOSE_SEARCH_INCREMENT`
//! away from target, `PRECISION` once it is close. The rate returned is the
//! midpoint recorded on the last narrowing step, one step behind the
//! midpoint that triggered termination. Published outputs depend on that
//! lag, so it is kept.
//!
//! Yields outside [0, 1] are never found. A target above the zero-rate price
//! walks the search down to a rate near 0; one below the unit-rate price
//! walks it up to a rate near 1.

use log::{debug, trace};

use super::cashflows::present_value;
use super::rounding::round_to_precision;
use crate::bond::BondParameters;
use crate::error::ValuationError;

/// Convergence tolerance, also the fine step size
pub const PRECISION: f64 = 0.000_000_01;

/// Coarse step used while the search is far from the target
pub const SPEED_UP_INCREMENT: f64 = 0.01;

/// Price distance (currency units) under which the fine step is used
pub const CLOSE_SEARCH_INCREMENT: f64 = 0.1;

/// Lower search bound
pub const MIN_RATE: f64 = 0.0;

/// Upper search bound
pub const MAX_RATE: f64 = 1.0;

/// Returned when the search never narrowed
pub const NO_RATE: f64 = f64::MAX;

/// Every narrowing step shrinks the unit interval by at least `PRECISION`,
/// so a search with well-defined prices ends well before this.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000_001;

/// Tuning for the yield search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub low: f64,
    pub high: f64,
    pub precision: f64,
    pub speed_up_increment: f64,
    pub close_search_increment: f64,
    pub max_iterations: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            low: MIN_RATE,
            high: MAX_RATE,
            precision: PRECISION,
            speed_up_increment: SPEED_UP_INCREMENT,
            close_search_increment: CLOSE_SEARCH_INCREMENT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Midpoint price equalled the target exactly
    ExactMatch,
    /// Midpoint price is below target but one `precision` step lower is above it
    Crossed,
    /// Bounds crossed without either condition firing
    BoundsExhausted,
    /// A NaN price (or target) left nothing to compare against
    Undefined,
    /// `max_iterations` reached
    IterationLimit,
}

/// Unrounded outcome of a yield search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSearch {
    /// Best recorded rate, or `NO_RATE` if the search never narrowed
    pub rate: f64,
    pub iterations: u64,
    pub termination: Termination,
}

impl YieldSearch {
    /// Whether at least one narrowing step recorded a rate
    pub fn found(&self) -> bool {
        self.rate != NO_RATE
    }

    /// Whether the search stopped on the target rather than running out of room
    pub fn converged(&self) -> bool {
        matches!(self.termination, Termination::ExactMatch | Termination::Crossed) && self.found()
    }
}

/// Run the search with explicit tuning
pub fn search_rate_with(
    config: &SearchConfig,
    coupon_rate: f64,
    years: u32,
    face_value: f64,
    target_price: f64,
) -> YieldSearch {
    let mut low = config.low;
    let mut high = config.high;
    let mut best_rate = NO_RATE;
    let mut iterations = 0;

    let finish = |rate: f64, iterations: u64, termination: Termination| {
        debug!(
            "yield search: {:?} after {} iterations, rate {}",
            termination, iterations, rate
        );
        YieldSearch {
            rate,
            iterations,
            termination,
        }
    };

    while low <= high {
        if iterations >= config.max_iterations {
            return finish(best_rate, iterations, Termination::IterationLimit);
        }
        iterations += 1;

        let mid = (low + high) / 2.0;
        let mid_price = present_value(coupon_rate, years, face_value, mid);
        trace!(
            "iter {}: low={} high={} mid={} price={}",
            iterations,
            low,
            high,
            mid,
            mid_price
        );

        if mid_price == target_price {
            return finish(best_rate, iterations, Termination::ExactMatch);
        }
        if mid_price < target_price
            && present_value(coupon_rate, years, face_value, mid - config.precision) > target_price
        {
            return finish(best_rate, iterations, Termination::Crossed);
        }

        if mid_price < target_price {
            // Rate too high
            if mid_price + config.close_search_increment > target_price {
                high -= config.precision;
            } else {
                high -= config.speed_up_increment;
            }
            best_rate = mid;
        } else if mid_price > target_price {
            // Rate too low
            if mid_price - config.close_search_increment < target_price {
                low += config.precision;
            } else {
                low += config.speed_up_increment;
            }
            best_rate = mid;
        } else {
            return finish(best_rate, iterations, Termination::Undefined);
        }
    }

    finish(best_rate, iterations, Termination::BoundsExhausted)
}

/// Unrounded search with the default tuning
pub fn search_rate(coupon_rate: f64, years: u32, face_value: f64, target_price: f64) -> YieldSearch {
    search_rate_with(&SearchConfig::default(), coupon_rate, years, face_value, target_price)
}

/// Discount rate implied by `target_price`, rounded to `SCALE` places.
///
/// Never fails: a price outside the range reachable with rates in [0, 1]
/// yields a rate next to the nearer bound, and a search that never narrows
/// returns `NO_RATE`. See [`try_find_yield`] for the checked form.
pub fn find_yield(coupon_rate: f64, years: u32, face_value: f64, target_price: f64) -> f64 {
    round_to_precision(search_rate(coupon_rate, years, face_value, target_price).rate)
}

/// Validating wrapper around [`find_yield`]
pub fn try_find_yield(params: &BondParameters, target_price: f64) -> Result<f64, ValuationError> {
    params.validate()?;

    if !target_price.is_finite() || target_price <= 0.0 {
        return Err(ValuationError::invalid("price", "must be a positive number"));
    }

    let BondParameters {
        coupon_rate,
        years,
        face_value,
    } = *params;

    let max = present_value(coupon_rate, years, face_value, MIN_RATE);
    let min = present_value(coupon_rate, years, face_value, MAX_RATE);
    if target_price > max || target_price < min {
        return Err(ValuationError::YieldOutOfRange {
            price: target_price,
            min,
            max,
        });
    }

    let search = search_rate(coupon_rate, years, face_value, target_price);
    if !search.converged() {
        return Err(ValuationError::NoConvergence {
            iterations: search.iterations,
        });
    }

    Ok(round_to_precision(search.rate))
}

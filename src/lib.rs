//! Bond Calculator - price and yield engine for fixed-coupon bonds
//!
//! This library provides:
//! - Present value of annual coupons plus principal under a flat discount rate
//! - Price from discount rate, rounded to 7 decimal places
//! - Yield from price via a bounded search over [0, 1]
//! - Checked variants that validate inputs and flag unreachable yields
//! - Text sanitising for form-style inputs
//! - CSV batch evaluation on the rayon pool

pub mod batch;
pub mod bond;
pub mod error;
pub mod input;
pub mod valuation;

// Re-export commonly used types
pub use batch::{BatchConfig, BatchRunner, BondOutcome};
pub use bond::{BondParameters, BondRequest, ComputationResult, Quote, ResultKind};
pub use error::ValuationError;
pub use valuation::{find_yield, present_value, price, try_find_yield, try_price};

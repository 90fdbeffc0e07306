//! Bond valuation engine: present value, price and implied yield

mod cashflows;
mod pricing;
mod rounding;
mod yield_search;

pub use cashflows::{cashflow_schedule, present_value, CashflowRow};
pub use pricing::{price, try_price};
pub use rounding::{round_to_precision, SCALE};
pub use yield_search::{
    find_yield, search_rate, search_rate_with, try_find_yield, SearchConfig, Termination,
    YieldSearch, CLOSE_SEARCH_INCREMENT, DEFAULT_MAX_ITERATIONS, MAX_RATE, MIN_RATE, NO_RATE,
    PRECISION, SPEED_UP_INCREMENT,
};

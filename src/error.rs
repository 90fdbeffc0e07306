//! Error types for the checked valuation API, input parsing and batch loading
//!
//! The raw engine functions (`price`, `find_yield`) never return these; they
//! always produce an `f64` and let IEEE-754 carry invalid inputs through.

use thiserror::Error;

/// Errors raised by validating wrappers around the valuation engine
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Price {price} is outside the achievable range [{min}, {max}] for yields in [0, 1]")]
    YieldOutOfRange { price: f64, min: f64, max: f64 },

    #[error("Yield search did not bracket the target price after {iterations} iterations")]
    NoConvergence { iterations: u64 },

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValuationError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValuationError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ValuationError::invalid("years", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid input: years (must be at least 1)");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: ValuationError = io.into();
        assert!(matches!(err, ValuationError::Io(_)));
    }
}

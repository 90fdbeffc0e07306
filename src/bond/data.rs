//! Bond parameter and result types

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;
use crate::valuation::{find_yield, price, try_find_yield, try_price};

/// Fixed-coupon bond terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondParameters {
    /// Annual coupon as a fraction of face value (0.10 = 10%)
    pub coupon_rate: f64,

    /// Term in whole years
    pub years: u32,

    /// Principal repaid at maturity
    pub face_value: f64,
}

impl BondParameters {
    pub fn new(coupon_rate: f64, years: u32, face_value: f64) -> Self {
        Self {
            coupon_rate,
            years,
            face_value,
        }
    }

    /// Check the invariants the raw engine leaves to callers
    pub fn validate(&self) -> Result<(), ValuationError> {
        if !self.coupon_rate.is_finite() {
            return Err(ValuationError::invalid("coupon_rate", "must be a finite number"));
        }
        if self.years < 1 {
            return Err(ValuationError::invalid("years", "must be at least 1"));
        }
        if !self.face_value.is_finite() || self.face_value <= 0.0 {
            return Err(ValuationError::invalid("face_value", "must be a positive number"));
        }
        Ok(())
    }
}

/// The observed side of a valuation: what we know besides the bond terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Quote {
    /// Known discount rate; solve for price
    DiscountRate(f64),
    /// Known price; solve for yield
    Price(f64),
}

/// What a computed value represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Price,
    Yield,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Price => "Price",
            ResultKind::Yield => "Yield",
        }
    }
}

/// A single computed price (currency units) or rate (fraction)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub kind: ResultKind,
    pub value: f64,
}

/// Bond terms plus a quote, tagged for batch processing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondRequest {
    pub id: u32,
    pub params: BondParameters,
    pub quote: Quote,
}

impl BondRequest {
    pub fn new(id: u32, params: BondParameters, quote: Quote) -> Self {
        Self { id, params, quote }
    }

    /// Kind of result this request produces
    pub fn result_kind(&self) -> ResultKind {
        match self.quote {
            Quote::DiscountRate(_) => ResultKind::Price,
            Quote::Price(_) => ResultKind::Yield,
        }
    }

    /// Evaluate with the raw engine; never fails
    pub fn evaluate(&self) -> ComputationResult {
        let p = &self.params;
        let value = match self.quote {
            Quote::DiscountRate(rate) => price(p.coupon_rate, p.years, p.face_value, rate),
            Quote::Price(target) => find_yield(p.coupon_rate, p.years, p.face_value, target),
        };
        ComputationResult {
            kind: self.result_kind(),
            value,
        }
    }

    /// Evaluate with the checked engine
    pub fn try_evaluate(&self) -> Result<ComputationResult, ValuationError> {
        let value = match self.quote {
            Quote::DiscountRate(rate) => try_price(&self.params, rate)?,
            Quote::Price(target) => try_find_yield(&self.params, target)?,
        };
        Ok(ComputationResult {
            kind: self.result_kind(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_validate() {
        assert!(BondParameters::new(0.10, 5, 1000.0).validate().is_ok());
        assert!(BondParameters::new(0.10, 0, 1000.0).validate().is_err());
        assert!(BondParameters::new(0.10, 5, -1.0).validate().is_err());
        assert!(BondParameters::new(f64::NAN, 5, 1000.0).validate().is_err());
    }

    #[test]
    fn test_rate_quote_gives_price() {
        let request = BondRequest::new(
            1,
            BondParameters::new(0.10, 5, 1000.0),
            Quote::DiscountRate(0.08),
        );
        let result = request.evaluate();
        assert_eq!(result.kind, ResultKind::Price);
        assert_abs_diff_eq!(result.value, 1079.8542007, epsilon = 1e-7);
    }

    #[test]
    fn test_price_quote_gives_yield() {
        let request = BondRequest::new(
            2,
            BondParameters::new(0.10, 5, 1000.0),
            Quote::Price(1000.0),
        );
        let result = request.try_evaluate().unwrap();
        assert_eq!(result.kind, ResultKind::Yield);
        assert_abs_diff_eq!(result.value, 0.1, epsilon = 1e-7);
    }

    #[test]
    fn test_checked_evaluate_surfaces_errors() {
        let request = BondRequest::new(
            3,
            BondParameters::new(0.05, 10, 1000.0),
            Quote::Price(2000.0),
        );
        assert!(request.try_evaluate().is_err());
        // Raw evaluation still answers, at the edge of the search range
        assert_abs_diff_eq!(request.evaluate().value, 0.005, epsilon = 1e-7);
    }

    #[test]
    fn test_serde_shape() {
        let request = BondRequest::new(
            7,
            BondParameters::new(0.10, 5, 1000.0),
            Quote::Price(832.4),
        );
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"Price\":832.4"));
        let back: BondRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}

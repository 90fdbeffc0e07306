//! Batch runner for evaluating many bond requests
//!
//! Requests are independent, so the runner fans them out across the rayon
//! pool when `parallel` is set. Output order always matches input order.

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;

use crate::bond::{BondRequest, ResultKind};
use crate::error::ValuationError;

/// Options for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Evaluate on the rayon thread pool
    pub parallel: bool,

    /// Validate inputs and report out-of-range yields instead of
    /// returning the raw engine's boundary values
    pub checked: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            checked: false,
        }
    }
}

/// Result for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondOutcome {
    pub id: u32,
    pub kind: ResultKind,
    /// Computed price or yield; `None` when a checked run rejected the request
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluates batches of requests with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Evaluate a single request
    pub fn run_one(&self, request: &BondRequest) -> BondOutcome {
        if !self.config.checked {
            let result = request.evaluate();
            return BondOutcome {
                id: request.id,
                kind: result.kind,
                value: Some(result.value),
                error: None,
            };
        }

        match request.try_evaluate() {
            Ok(result) => BondOutcome {
                id: request.id,
                kind: result.kind,
                value: Some(result.value),
                error: None,
            },
            Err(e) => {
                warn!("Request {} rejected: {}", request.id, e);
                BondOutcome {
                    id: request.id,
                    kind: request.result_kind(),
                    value: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Evaluate all requests, preserving order
    pub fn run(&self, requests: &[BondRequest]) -> Vec<BondOutcome> {
        let start = Instant::now();

        let outcomes: Vec<BondOutcome> = if self.config.parallel {
            requests.par_iter().map(|r| self.run_one(r)).collect()
        } else {
            requests.iter().map(|r| self.run_one(r)).collect()
        };

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        info!(
            "Evaluated {} requests ({} rejected) in {:?}",
            outcomes.len(),
            failed,
            start.elapsed()
        );
        outcomes
    }
}

/// Write outcomes as CSV with header `Id,Kind,Value,Error`
pub fn write_results<W: Write>(writer: W, outcomes: &[BondOutcome]) -> Result<(), ValuationError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Id", "Kind", "Value", "Error"])?;

    for outcome in outcomes {
        let value = outcome
            .value
            .map(|v| format!("{:.7}", v))
            .unwrap_or_default();
        csv_writer.write_record([
            outcome.id.to_string(),
            outcome.kind.as_str().to_string(),
            value,
            outcome.error.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::{BondParameters, Quote};
    use approx::assert_abs_diff_eq;

    fn requests() -> Vec<BondRequest> {
        let params = BondParameters::new(0.10, 5, 1000.0);
        vec![
            BondRequest::new(1, params, Quote::DiscountRate(0.15)),
            BondRequest::new(2, params, Quote::Price(1079.85)),
            BondRequest::new(3, BondParameters::new(0.05, 10, 1000.0), Quote::Price(2000.0)),
            BondRequest::new(4, BondParameters::new(0.10, 30, 1000.0), Quote::DiscountRate(0.19)),
        ]
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = BatchRunner::new(BatchConfig { parallel: true, checked: false });
        let sequential = BatchRunner::new(BatchConfig { parallel: false, checked: false });

        assert_eq!(parallel.run(&requests()), sequential.run(&requests()));
    }

    #[test]
    fn test_raw_run_values() {
        let outcomes = BatchRunner::default().run(&requests());
        let ids: Vec<u32> = outcomes.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(outcomes[0].kind, ResultKind::Price);
        assert_abs_diff_eq!(outcomes[0].value.unwrap(), 832.3922451, epsilon = 1e-7);
        assert_eq!(outcomes[1].kind, ResultKind::Yield);
        assert_abs_diff_eq!(outcomes[1].value.unwrap(), 0.080001, epsilon = 1e-7);
        assert_abs_diff_eq!(outcomes[2].value.unwrap(), 0.005, epsilon = 1e-7);
        assert!(outcomes.iter().all(|o| o.error.is_none()));
    }

    #[test]
    fn test_checked_run_reports_errors() {
        let runner = BatchRunner::new(BatchConfig { parallel: true, checked: true });
        let outcomes = runner.run(&requests());

        assert!(outcomes[2].value.is_none());
        assert!(outcomes[2].error.as_deref().unwrap().contains("outside"));
        assert!(outcomes[0].value.is_some());
    }

    #[test]
    fn test_write_results() {
        let runner = BatchRunner::new(BatchConfig { parallel: false, checked: true });
        let outcomes = runner.run(&requests()[..1]);

        let mut buffer = Vec::new();
        write_results(&mut buffer, &outcomes).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Id,Kind,Value,Error"));
        assert_eq!(lines.next(), Some("1,Price,832.3922451,"));
    }
}

//! AWS Lambda handler for bond price and yield requests
//!
//! Accepts a JSON batch of bonds, each quoted with either a discount rate
//! (priced) or a price (solved for yield), and returns one result per bond.

use bond_calculator::{
    batch::{BatchConfig, BatchRunner, BondOutcome},
    BondParameters, BondRequest, Quote,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

/// One bond in the request payload
#[derive(Debug, Deserialize)]
pub struct BondItem {
    #[serde(default)]
    pub id: u32,
    pub coupon_rate: f64,
    pub years: u32,
    pub face_value: f64,
    #[serde(default)]
    pub discount_rate: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl BondItem {
    fn to_request(&self) -> Result<BondRequest, String> {
        let quote = match (self.discount_rate, self.price) {
            (Some(rate), None) => Quote::DiscountRate(rate),
            (None, Some(price)) => Quote::Price(price),
            _ => {
                return Err(format!(
                    "bond {}: exactly one of discount_rate or price is required",
                    self.id
                ))
            }
        };
        Ok(BondRequest::new(
            self.id,
            BondParameters::new(self.coupon_rate, self.years, self.face_value),
            quote,
        ))
    }
}

/// Input payload
#[derive(Debug, Deserialize)]
pub struct ValuationRequest {
    pub requests: Vec<BondItem>,

    /// Validate inputs and reject unreachable yields (default: raw engine)
    #[serde(default)]
    pub checked: bool,
}

/// Output payload
#[derive(Debug, Serialize)]
pub struct ValuationResponse {
    pub results: Vec<BondOutcome>,
    pub count: usize,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn evaluate(request: &ValuationRequest) -> Result<Vec<BondOutcome>, String> {
    let requests = request
        .requests
        .iter()
        .map(BondItem::to_request)
        .collect::<Result<Vec<_>, _>>()?;

    let runner = BatchRunner::new(BatchConfig {
        parallel: requests.len() > 1,
        checked: request.checked,
    });
    Ok(runner.run(&requests))
}

async fn handler(event: LambdaEvent<ValuationRequest>) -> Result<ValuationResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;
    info!("Received {} bonds (checked: {})", request.requests.len(), request.checked);

    // Long yield searches are CPU-bound; keep them off the runtime workers
    let evaluated = tokio::task::spawn_blocking(move || evaluate(&request)).await?;

    let (results, error) = match evaluated {
        Ok(results) => (results, None),
        Err(e) => (Vec::new(), Some(e)),
    };

    Ok(ValuationResponse {
        count: results.len(),
        results,
        execution_time_ms: start.elapsed().as_millis() as u64,
        error,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

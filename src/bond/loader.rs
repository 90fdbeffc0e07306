//! Load bond requests from CSV
//!
//! Expected header: `Id,Coupon,Years,Face,Rate,Price`. Each row fills exactly
//! one of `Rate` (solve for price) or `Price` (solve for yield).

use super::{BondParameters, BondRequest, Quote};
use crate::error::ValuationError;
use csv::Reader;
use log::info;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Coupon")]
    coupon: f64,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Face")]
    face: f64,
    #[serde(rename = "Rate")]
    rate: Option<f64>,
    #[serde(rename = "Price")]
    price: Option<f64>,
}

impl CsvRow {
    fn to_request(self, row: usize) -> Result<BondRequest, ValuationError> {
        let quote = match (self.rate, self.price) {
            (Some(rate), None) => Quote::DiscountRate(rate),
            (None, Some(price)) => Quote::Price(price),
            (Some(_), Some(_)) => {
                return Err(ValuationError::InvalidRow {
                    row,
                    reason: "both Rate and Price given".to_string(),
                })
            }
            (None, None) => {
                return Err(ValuationError::InvalidRow {
                    row,
                    reason: "one of Rate or Price is required".to_string(),
                })
            }
        };

        Ok(BondRequest {
            id: self.id,
            params: BondParameters::new(self.coupon, self.years, self.face),
            quote,
        })
    }
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<BondRequest>, ValuationError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let requests = read_requests(reader)?;
    info!("Loaded {} bond requests from {}", requests.len(), path.display());
    Ok(requests)
}

/// Load requests from any reader (e.g., string buffer, request body)
pub fn load_requests_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<BondRequest>, ValuationError> {
    read_requests(Reader::from_reader(reader))
}

fn read_requests<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<BondRequest>, ValuationError> {
    let mut requests = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        requests.push(row.to_request(index + 1)?);
    }

    Ok(requests)
}

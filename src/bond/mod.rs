//! Bond terms, quotes and CSV request loading

mod data;
pub mod loader;

pub use data::{BondParameters, BondRequest, ComputationResult, Quote, ResultKind};
pub use loader::{load_requests, load_requests_from_reader};

//! Stake sizing and risk bucketing
//!
//! Kelly-criterion sizing over a pick's model probability and price, with
//! a monotonic risk bucket classification.

mod kelly;
mod types;

pub use kelly::{KellySizer, RiskBuckets};
pub use types::{KellyResult, RiskError, RiskLevel};

//! Odds conversion and quote types
//!
//! Pure conversions between American odds, decimal prices, and implied
//! probabilities, plus the immutable quote fact every other component
//! consumes.

mod convert;
mod types;

pub use convert::{american_to_decimal, decimal_to_american, implied_probability};
pub use types::{MarketShape, OddsQuote, PartitionKey, Side};

use rust_decimal::Decimal;
use thiserror::Error;

/// Odds validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OddsError {
    /// American odds of zero have no meaning
    #[error("American odds must be non-zero")]
    ZeroAmerican,
    /// Decimal price must pay more than the stake
    #[error("Decimal price must exceed 1.0, got {0}")]
    InvalidDecimal(Decimal),
    /// Quote carried a decimal price and American odds that disagree
    #[error("Price mismatch: decimal {decimal} implies American {expected}, quote says {american}")]
    PriceMismatch {
        decimal: Decimal,
        american: i64,
        expected: i64,
    },
    /// Probability outside the open interval (0, 1)
    #[error("Probability must be in (0, 1), got {0}")]
    InvalidProbability(Decimal),
}

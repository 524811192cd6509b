//! Risk sizing types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Risk bucket for a suggested stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Outcome of Kelly sizing.
///
/// A non-positive Kelly fraction is a hard do-not-bet signal: the units
/// stay at zero and no risk level is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KellyResult {
    /// Raw Kelly fraction `(b*p - q) / b`
    pub kelly_fraction: Decimal,
    /// Stake in units after the fractional-Kelly scale, zero when no bet
    /// is recommended
    pub suggested_units: Decimal,
    /// Risk bucket, `None` when no bet is recommended
    pub risk_level: Option<RiskLevel>,
}

impl KellyResult {
    /// The do-not-bet result for a non-positive fraction
    pub fn no_bet(kelly_fraction: Decimal) -> Self {
        Self {
            kelly_fraction,
            suggested_units: Decimal::ZERO,
            risk_level: None,
        }
    }

    /// Whether a stake is recommended at all
    pub fn is_bet(&self) -> bool {
        self.suggested_units > Decimal::ZERO
    }
}

/// Risk sizing errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// Bucket breakpoints must increase
    #[error("risk buckets must be monotonic: medium {medium} must be below high {high}")]
    NonMonotonicBuckets { medium: Decimal, high: Decimal },
    /// Fractional-Kelly scale must be positive
    #[error("unit scale must be positive, got {0}")]
    InvalidUnitScale(Decimal),
}

//! Pick scoring
//!
//! Combines an externally supplied model probability with a quote's
//! implied probability into an expected-value edge score.

mod pick;

pub use pick::{ev_percentage, score_pick, Pick};

use crate::odds::OddsError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Scoring errors
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Model probability outside the open interval (0, 1)
    #[error("model probability must be in (0, 1), got {0}")]
    ModelProbabilityOutOfRange(Decimal),
    /// Confidence score outside [0, 100]
    #[error("confidence score must be in [0, 100], got {0}")]
    ConfidenceOutOfRange(Decimal),
    /// Quote price failed validation
    #[error(transparent)]
    Odds(#[from] OddsError),
}

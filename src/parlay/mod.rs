//! Parlay combination
//!
//! Aggregates independent scored picks into a combined probability,
//! price, and EV, with all-or-nothing settlement.

mod combiner;

pub use combiner::{LegResult, ParlayCard, ParlayCombiner, ParlayLeg};

use thiserror::Error;

/// Parlay errors
#[derive(Debug, Error)]
pub enum ParlayError {
    /// A parlay needs at least one leg
    #[error("a parlay needs at least one leg")]
    InsufficientLegs,
    /// Too many legs for the configured cap
    #[error("parlay exceeds {max} legs, got {got}")]
    TooManyLegs { max: usize, got: usize },
    /// Leg index out of range
    #[error("leg index {0} out of range")]
    LegOutOfRange(usize),
    /// Leg already carries a result
    #[error("leg {0} is already resolved")]
    LegAlreadyResolved(usize),
}

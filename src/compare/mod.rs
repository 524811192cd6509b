//! Cross-bookmaker market comparison
//!
//! Best price, dispersion, and arbitrage analysis for one outcome at a
//! point in time.

mod comparator;

pub use comparator::{
    arbitrage_opportunity, best_price, compare, dispersion, ArbitrageOpportunity, Dispersion,
    MarketComparison, QuoteDeviation, SideComparison, ThreeWayComparison, TwoWayComparison,
};

use crate::odds::{OddsError, Side};
use thiserror::Error;

/// Comparison errors
#[derive(Debug, Error)]
pub enum CompareError {
    /// Nothing to compare
    #[error("no quotes to compare")]
    NoQuotes,
    /// Quotes span more than one (game, market, outcome)
    #[error("quotes span more than one outcome")]
    MixedOutcomes,
    /// Side combination is neither a two-way pair nor home/draw/away
    #[error("unsupported side combination: {0:?}")]
    UnsupportedShape(Vec<Side>),
    /// A quote price failed validation
    #[error(transparent)]
    Odds(#[from] OddsError),
}

//! Movement records between consecutive quotes

use crate::odds::OddsQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Change between two consecutive quotes within one partition.
///
/// Movements are strictly per-bookmaker; quotes from different bookmakers
/// never diff against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// The newer of the two quotes
    pub quote: OddsQuote,
    /// Prior line, `None` for the first quote in a partition
    pub prev_line: Option<Decimal>,
    /// Prior decimal price
    pub prev_price: Option<Decimal>,
    /// Prior American odds
    pub prev_odds: Option<i64>,
    /// Line change since the prior quote
    pub line_delta: Decimal,
    /// Decimal price change since the prior quote
    pub price_delta: Decimal,
    /// American odds change since the prior quote
    pub odds_delta: i64,
}

impl Movement {
    /// Movement for a partition's first quote: no prior reference, zero deltas
    pub fn first(quote: OddsQuote) -> Self {
        Self {
            quote,
            prev_line: None,
            prev_price: None,
            prev_odds: None,
            line_delta: Decimal::ZERO,
            price_delta: Decimal::ZERO,
            odds_delta: 0,
        }
    }

    /// Movement from `prev` to `curr`
    pub fn between(prev: &OddsQuote, curr: OddsQuote) -> Self {
        let line_delta = curr.line_value - prev.line_value;
        let price_delta = curr.decimal_price - prev.decimal_price;
        let odds_delta = curr.american_odds - prev.american_odds;
        Self {
            quote: curr,
            prev_line: Some(prev.line_value),
            prev_price: Some(prev.decimal_price),
            prev_odds: Some(prev.american_odds),
            line_delta,
            price_delta,
            odds_delta,
        }
    }

    /// Whether the line or the price actually changed
    pub fn moved(&self) -> bool {
        !self.line_delta.is_zero() || !self.price_delta.is_zero()
    }
}

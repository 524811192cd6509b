//! Quote and market identity types

use super::{american_to_decimal, decimal_to_american, implied_probability, OddsError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome side a bettor can buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Over the posted line
    Over,
    /// Under the posted line
    Under,
    /// Home team
    Home,
    /// Away team
    Away,
    /// Draw, only valid in three-way markets
    Draw,
}

impl Side {
    /// The side taken by the opposite party in a two-way market
    pub fn opposite(&self) -> Option<Self> {
        match self {
            Side::Over => Some(Side::Under),
            Side::Under => Some(Side::Over),
            Side::Home => Some(Side::Away),
            Side::Away => Some(Side::Home),
            Side::Draw => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Over => "over",
            Side::Under => "under",
            Side::Home => "home",
            Side::Away => "away",
            Side::Draw => "draw",
        };
        write!(f, "{s}")
    }
}

/// How many outcomes a market settles over.
///
/// Two-way markets (totals, spreads, no-draw moneylines) have no draw price;
/// keeping the shape explicit stops downstream code from reading one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketShape {
    TwoWay,
    ThreeWay,
}

/// Key under which quote history is ordered independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    pub game_id: String,
    pub market_id: String,
    pub outcome_id: String,
    pub bookmaker: String,
}

impl PartitionKey {
    pub fn new(
        game_id: impl Into<String>,
        market_id: impl Into<String>,
        outcome_id: impl Into<String>,
        bookmaker: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            market_id: market_id.into(),
            outcome_id: outcome_id.into(),
            bookmaker: bookmaker.into(),
        }
    }

    /// Key fields without the bookmaker, identifying the outcome itself
    pub fn outcome_matches(&self, game_id: &str, market_id: &str, outcome_id: &str) -> bool {
        self.game_id == game_id && self.market_id == market_id && self.outcome_id == outcome_id
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}@{}",
            self.game_id, self.market_id, self.outcome_id, self.bookmaker
        )
    }
}

/// A single bookmaker price observation.
///
/// Quotes are immutable facts: a newer quote in the same partition
/// supersedes an older one, never overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    /// Game identifier
    pub game_id: String,
    /// Market identifier (e.g. total points, moneyline)
    pub market_id: String,
    /// Outcome identifier within the market
    pub outcome_id: String,
    /// Side of the outcome being priced
    pub side: Side,
    /// Bookmaker offering the price
    pub bookmaker: String,
    /// Posted line (0 for lineless markets such as moneylines)
    pub line_value: Decimal,
    /// Total payout per unit stake
    pub decimal_price: Decimal,
    /// Same price in American odds
    pub american_odds: i64,
    /// When the quote was observed
    pub observed_at: DateTime<Utc>,
}

impl OddsQuote {
    /// Build a quote from a decimal price, deriving the American odds
    #[allow(clippy::too_many_arguments)]
    pub fn from_decimal(
        game_id: impl Into<String>,
        market_id: impl Into<String>,
        outcome_id: impl Into<String>,
        side: Side,
        bookmaker: impl Into<String>,
        line_value: Decimal,
        decimal_price: Decimal,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, OddsError> {
        let american_odds = decimal_to_american(decimal_price)?;
        Ok(Self {
            game_id: game_id.into(),
            market_id: market_id.into(),
            outcome_id: outcome_id.into(),
            side,
            bookmaker: bookmaker.into(),
            line_value,
            decimal_price,
            american_odds,
            observed_at,
        })
    }

    /// Build a quote from American odds, deriving the decimal price
    #[allow(clippy::too_many_arguments)]
    pub fn from_american(
        game_id: impl Into<String>,
        market_id: impl Into<String>,
        outcome_id: impl Into<String>,
        side: Side,
        bookmaker: impl Into<String>,
        line_value: Decimal,
        american_odds: i64,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, OddsError> {
        let decimal_price = american_to_decimal(american_odds)?;
        Ok(Self {
            game_id: game_id.into(),
            market_id: market_id.into(),
            outcome_id: outcome_id.into(),
            side,
            bookmaker: bookmaker.into(),
            line_value,
            decimal_price,
            american_odds,
            observed_at,
        })
    }

    /// Check the price invariants: decimal > 1 and both formats agree.
    ///
    /// Agreement is checked through the American-to-decimal direction at
    /// four decimal places, so a feed quoting -110 alongside 1.9091 passes.
    pub fn validate(&self) -> Result<(), OddsError> {
        if self.decimal_price <= Decimal::ONE {
            return Err(OddsError::InvalidDecimal(self.decimal_price));
        }
        let expected = american_to_decimal(self.american_odds)?;
        if expected.round_dp(4) != self.decimal_price.round_dp(4) {
            return Err(OddsError::PriceMismatch {
                decimal: self.decimal_price,
                american: self.american_odds,
                expected: decimal_to_american(self.decimal_price)?,
            });
        }
        Ok(())
    }

    /// Probability the price encodes
    pub fn implied_probability(&self) -> Result<Decimal, OddsError> {
        implied_probability(self.decimal_price)
    }

    /// Partition this quote belongs to
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(
            self.game_id.clone(),
            self.market_id.clone(),
            self.outcome_id.clone(),
            self.bookmaker.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(decimal: Decimal, american: i64) -> OddsQuote {
        OddsQuote {
            game_id: "g1".to_string(),
            market_id: "total".to_string(),
            outcome_id: "145.5".to_string(),
            side: Side::Over,
            bookmaker: "alpha".to_string(),
            line_value: dec!(145.5),
            decimal_price: decimal,
            american_odds: american,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_decimal_derives_american() {
        let q = OddsQuote::from_decimal(
            "g1",
            "total",
            "145.5",
            Side::Over,
            "alpha",
            dec!(145.5),
            dec!(1.9091),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(q.american_odds, -110);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_from_american_derives_decimal() {
        let q = OddsQuote::from_american(
            "g1",
            "ml",
            "home",
            Side::Home,
            "beta",
            dec!(0),
            150,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(q.decimal_price, dec!(2.5));
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mismatch() {
        let q = quote(dec!(2.5), -110);
        assert!(matches!(
            q.validate(),
            Err(OddsError::PriceMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_decimal() {
        let q = quote(dec!(0.95), -110);
        assert!(matches!(q.validate(), Err(OddsError::InvalidDecimal(_))));
    }

    #[test]
    fn test_validate_accepts_even_money_either_sign() {
        assert!(quote(dec!(2.0), 100).validate().is_ok());
        assert!(quote(dec!(2.0), -100).validate().is_ok());
    }

    #[test]
    fn test_partition_key() {
        let q = quote(dec!(1.9091), -110);
        let key = q.partition_key();
        assert_eq!(key, PartitionKey::new("g1", "total", "145.5", "alpha"));
        assert!(key.outcome_matches("g1", "total", "145.5"));
        assert!(!key.outcome_matches("g2", "total", "145.5"));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Over.opposite(), Some(Side::Under));
        assert_eq!(Side::Home.opposite(), Some(Side::Away));
        assert_eq!(Side::Draw.opposite(), None);
    }
}

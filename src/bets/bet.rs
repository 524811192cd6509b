//! Bet state machine and CLV computation

use super::BetError;
use crate::odds::{OddsError, OddsQuote};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bet settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Void,
}

/// Closing line value in implied-probability cents.
///
/// `(implied(closing) - implied(opening)) * 100`: positive means the
/// bettor's price implied a lower win probability than the close, i.e.
/// the market moved toward the bettor after the bet was placed.
pub fn clv_cents(opening: &OddsQuote, closing: &OddsQuote) -> Result<Decimal, OddsError> {
    Ok((closing.implied_probability()? - opening.implied_probability()?) * dec!(100))
}

/// A user bet over a pick's quote.
///
/// `closing_quote`, `clv_cents`, and `profit_loss` stay `None` until the
/// market closes and the bet settles; each is written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    /// Unique bet identifier
    pub id: Uuid,
    /// Quote the bet was placed at
    pub opening_quote: OddsQuote,
    /// Amount staked
    pub stake: Decimal,
    /// Lifecycle status
    pub status: BetStatus,
    /// Market price at lock, `None` while the market is open
    pub closing_quote: Option<OddsQuote>,
    /// CLV, computed once when the closing quote lands
    pub clv_cents: Option<Decimal>,
    /// Realized profit or loss, set at settlement
    pub profit_loss: Option<Decimal>,
    /// When the bet was placed
    pub placed_at: DateTime<Utc>,
}

impl Bet {
    /// Place a bet at the given quote
    pub fn place(opening_quote: OddsQuote, stake: Decimal) -> Result<Self, BetError> {
        opening_quote.validate()?;
        if stake <= Decimal::ZERO {
            return Err(BetError::InvalidStake(stake));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            opening_quote,
            stake,
            status: BetStatus::Pending,
            closing_quote: None,
            clv_cents: None,
            profit_loss: None,
            placed_at: Utc::now(),
        })
    }

    /// Record the market's closing quote and compute CLV.
    ///
    /// Happens exactly once; a second close is rejected because a market
    /// cannot re-close. The closing quote must price the same outcome and
    /// side (any bookmaker).
    pub fn close(&mut self, closing_quote: OddsQuote) -> Result<Decimal, BetError> {
        if self.closing_quote.is_some() {
            return Err(BetError::AlreadyClosed);
        }
        let opening = &self.opening_quote;
        if closing_quote.game_id != opening.game_id
            || closing_quote.market_id != opening.market_id
            || closing_quote.outcome_id != opening.outcome_id
            || closing_quote.side != opening.side
        {
            return Err(BetError::OutcomeMismatch);
        }
        closing_quote.validate()?;

        let clv = clv_cents(opening, &closing_quote)?;
        self.closing_quote = Some(closing_quote);
        self.clv_cents = Some(clv);
        Ok(clv)
    }

    /// Settle the bet with a terminal status, computing profit or loss.
    ///
    /// One-way transition: a settled bet never returns to pending.
    pub fn settle(&mut self, status: BetStatus) -> Result<(), BetError> {
        if status == BetStatus::Pending {
            return Err(BetError::InvalidSettlement);
        }
        if self.status != BetStatus::Pending {
            return Err(BetError::AlreadySettled(self.status));
        }
        self.profit_loss = Some(match status {
            BetStatus::Won => self.stake * (self.opening_quote.decimal_price - Decimal::ONE),
            BetStatus::Lost => -self.stake,
            BetStatus::Void | BetStatus::Pending => Decimal::ZERO,
        });
        self.status = status;
        Ok(())
    }

    /// CLV if the market has closed, `None` before then
    pub fn clv(&self) -> Option<Decimal> {
        self.clv_cents
    }
}

//! Scored opportunities

use super::ScoreError;
use crate::odds::{implied_probability, OddsQuote};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scored betting opportunity.
///
/// `model_probability` and `confidence_score` are external inputs; the
/// engine validates their ranges but never invents either value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    /// Unique pick identifier
    pub id: Uuid,
    /// The quote being scored
    pub quote: OddsQuote,
    /// Player the probability estimate depends on, when the outcome is a
    /// player prop
    pub player_id: Option<String>,
    /// Externally modeled win probability
    pub model_probability: Decimal,
    /// Probability the market's price encodes
    pub implied_probability: Decimal,
    /// Expected profit percentage under the model
    pub ev_percentage: Decimal,
    /// Whether the pick is profitable in expectation. Non-positive-EV picks
    /// stay surfaced for watchlists; this flag is what separates them.
    pub positive_ev: bool,
    /// Externally modeled confidence, 0 to 100
    pub confidence_score: Decimal,
    /// When the pick was scored
    pub scored_at: DateTime<Utc>,
}

impl Pick {
    /// Model edge over the market: `model_probability - implied_probability`
    pub fn edge(&self) -> Decimal {
        self.model_probability - self.implied_probability
    }
}

/// Expected profit percentage of a unit stake: `(p * d - 1) * 100`
pub fn ev_percentage(
    model_probability: Decimal,
    decimal_price: Decimal,
) -> Result<Decimal, ScoreError> {
    validate_probability(model_probability)?;
    implied_probability(decimal_price)?;
    Ok((model_probability * decimal_price - Decimal::ONE) * dec!(100))
}

/// Score a quote against an externally supplied model probability
pub fn score_pick(
    quote: &OddsQuote,
    model_probability: Decimal,
    confidence_score: Decimal,
    player_id: Option<String>,
) -> Result<Pick, ScoreError> {
    quote.validate()?;
    validate_probability(model_probability)?;
    if confidence_score < Decimal::ZERO || confidence_score > dec!(100) {
        return Err(ScoreError::ConfidenceOutOfRange(confidence_score));
    }

    let implied = quote.implied_probability()?;
    let ev = ev_percentage(model_probability, quote.decimal_price)?;
    Ok(Pick {
        id: Uuid::new_v4(),
        quote: quote.clone(),
        player_id,
        model_probability,
        implied_probability: implied,
        ev_percentage: ev,
        positive_ev: ev > Decimal::ZERO,
        confidence_score,
        scored_at: Utc::now(),
    })
}

fn validate_probability(p: Decimal) -> Result<(), ScoreError> {
    if p <= Decimal::ZERO || p >= Decimal::ONE {
        return Err(ScoreError::ModelProbabilityOutOfRange(p));
    }
    Ok(())
}

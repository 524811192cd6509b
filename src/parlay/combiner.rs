//! Leg combination and parlay settlement

use super::ParlayError;
use crate::score::Pick;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a single leg resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegResult {
    Hit,
    Miss,
}

/// One leg of a parlay with its resolution state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayLeg {
    pub pick: Pick,
    /// `None` until the leg's market resolves
    pub result: Option<LegResult>,
}

/// A combined multi-leg card.
///
/// Settlement is all-or-nothing: `won` is `Some(true)` only once every leg
/// hit, `Some(false)` as soon as any leg misses, and `None` while any leg
/// is unresolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayCard {
    /// Unique card identifier
    pub id: Uuid,
    /// Ordered legs
    pub legs: Vec<ParlayLeg>,
    /// Product of the legs' model probabilities
    pub combined_probability: Decimal,
    /// Product of the legs' decimal prices
    pub combined_decimal_odds: Decimal,
    /// `(combined_probability * combined_decimal_odds - 1) * 100`
    pub combined_ev: Decimal,
    /// Whether the card has reached a terminal result
    pub settled: bool,
    /// All-or-nothing outcome
    pub won: Option<bool>,
    /// When the card was combined
    pub created_at: DateTime<Utc>,
}

impl ParlayCard {
    /// Record one leg's result and refresh the card's settlement
    pub fn resolve_leg(&mut self, index: usize, result: LegResult) -> Result<(), ParlayError> {
        let leg = self
            .legs
            .get_mut(index)
            .ok_or(ParlayError::LegOutOfRange(index))?;
        if leg.result.is_some() {
            return Err(ParlayError::LegAlreadyResolved(index));
        }
        leg.result = Some(result);
        self.refresh_settlement();
        Ok(())
    }

    fn refresh_settlement(&mut self) {
        if self.legs.iter().any(|l| l.result == Some(LegResult::Miss)) {
            self.won = Some(false);
        } else if self.legs.iter().all(|l| l.result == Some(LegResult::Hit)) {
            self.won = Some(true);
        } else {
            self.won = None;
        }
        self.settled = self.won.is_some();
    }
}

/// Combines picks into a parlay card.
///
/// Precondition: the legs are probabilistically independent. Legs sharing
/// a game are correlated, and multiplying their probabilities misstates
/// the true combined probability; callers must not pass such legs. A
/// correlation adjustment (e.g. a correlation matrix) would slot in here
/// rather than at the call sites.
#[derive(Debug, Clone)]
pub struct ParlayCombiner {
    max_legs: usize,
}

impl ParlayCombiner {
    /// Create a combiner with the given leg cap
    pub fn new(max_legs: usize) -> Self {
        Self { max_legs }
    }

    /// Combine picks into a card.
    ///
    /// A single-leg card reproduces that leg's probability, price, and EV
    /// exactly.
    pub fn combine(&self, picks: Vec<Pick>) -> Result<ParlayCard, ParlayError> {
        if picks.is_empty() {
            return Err(ParlayError::InsufficientLegs);
        }
        if picks.len() > self.max_legs {
            return Err(ParlayError::TooManyLegs {
                max: self.max_legs,
                got: picks.len(),
            });
        }

        let combined_probability = picks
            .iter()
            .fold(Decimal::ONE, |acc, p| acc * p.model_probability);
        let combined_decimal_odds = picks
            .iter()
            .fold(Decimal::ONE, |acc, p| acc * p.quote.decimal_price);
        let combined_ev = (combined_probability * combined_decimal_odds - Decimal::ONE) * dec!(100);

        Ok(ParlayCard {
            id: Uuid::new_v4(),
            legs: picks
                .into_iter()
                .map(|pick| ParlayLeg { pick, result: None })
                .collect(),
            combined_probability,
            combined_decimal_odds,
            combined_ev,
            settled: false,
            won: None,
            created_at: Utc::now(),
        })
    }
}

impl Default for ParlayCombiner {
    fn default() -> Self {
        Self { max_legs: 10 }
    }
}

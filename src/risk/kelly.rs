//! Kelly criterion stake sizing

use super::{KellyResult, RiskError, RiskLevel};
use crate::odds::{implied_probability, OddsError};
use crate::score::Pick;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Risk bucket breakpoints over the Kelly fraction.
///
/// The classification is a step function that must be monotonic and total
/// over `[0, 1]`: fractions below `medium` are Low, below `high` Medium,
/// and everything above High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBuckets {
    pub medium: Decimal,
    pub high: Decimal,
}

impl RiskBuckets {
    /// Create breakpoints, rejecting a non-monotonic pair
    pub fn new(medium: Decimal, high: Decimal) -> Result<Self, RiskError> {
        if medium >= high {
            return Err(RiskError::NonMonotonicBuckets { medium, high });
        }
        Ok(Self { medium, high })
    }

    /// Bucket for a positive Kelly fraction
    pub fn classify(&self, kelly_fraction: Decimal) -> RiskLevel {
        if kelly_fraction < self.medium {
            RiskLevel::Low
        } else if kelly_fraction < self.high {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl Default for RiskBuckets {
    fn default() -> Self {
        Self {
            medium: dec!(0.02),
            high: dec!(0.05),
        }
    }
}

/// Kelly criterion sizer.
///
/// `unit_scale` is the fractional-Kelly multiplier (e.g. 0.25 for quarter
/// Kelly) applied to the raw fraction when a bet is recommended.
pub struct KellySizer {
    unit_scale: Decimal,
    buckets: RiskBuckets,
}

impl KellySizer {
    /// Create a sizer, rejecting a non-positive unit scale
    pub fn new(unit_scale: Decimal, buckets: RiskBuckets) -> Result<Self, RiskError> {
        if unit_scale <= Decimal::ZERO {
            return Err(RiskError::InvalidUnitScale(unit_scale));
        }
        Ok(Self {
            unit_scale,
            buckets,
        })
    }

    /// Size a bet from a model probability and decimal price.
    ///
    /// With net odds `b = d - 1` and `q = 1 - p`, the Kelly fraction is
    /// `(b*p - q) / b`. A non-positive fraction is returned as-is with
    /// zero units and no risk level; it is never clamped to a small
    /// positive stake.
    pub fn size(
        &self,
        model_probability: Decimal,
        decimal_price: Decimal,
    ) -> Result<KellyResult, OddsError> {
        implied_probability(decimal_price)?;
        if model_probability <= Decimal::ZERO || model_probability >= Decimal::ONE {
            return Err(OddsError::InvalidProbability(model_probability));
        }

        let b = decimal_price - Decimal::ONE;
        let q = Decimal::ONE - model_probability;
        let kelly_fraction = (b * model_probability - q) / b;

        if kelly_fraction <= Decimal::ZERO {
            return Ok(KellyResult::no_bet(kelly_fraction));
        }

        Ok(KellyResult {
            kelly_fraction,
            suggested_units: kelly_fraction * self.unit_scale,
            risk_level: Some(self.buckets.classify(kelly_fraction)),
        })
    }

    /// Size a scored pick
    pub fn size_pick(&self, pick: &Pick) -> Result<KellyResult, OddsError> {
        self.size(pick.model_probability, pick.quote.decimal_price)
    }
}

impl Default for KellySizer {
    fn default() -> Self {
        Self {
            unit_scale: dec!(0.25),
            buckets: RiskBuckets::default(),
        }
    }
}

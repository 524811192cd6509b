//! Best-price, dispersion, and arbitrage computation

use super::CompareError;
use crate::odds::{MarketShape, OddsError, OddsQuote, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bookmaker's deviation from the mean price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDeviation {
    pub bookmaker: String,
    pub decimal_price: Decimal,
    /// Signed distance from the mean price across bookmakers
    pub deviation_from_mean: Decimal,
}

/// Price dispersion across bookmakers for one side.
///
/// A wide spread is a market-inefficiency signal consumed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispersion {
    pub max: Decimal,
    pub min: Decimal,
    /// `max - min`
    pub spread: Decimal,
    pub mean: Decimal,
    pub deviations: Vec<QuoteDeviation>,
}

/// Best price and dispersion for one side of an outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideComparison {
    pub side: Side,
    /// Quote most favorable to a bettor buying this side
    pub best: OddsQuote,
    pub dispersion: Dispersion,
}

/// A price combination guaranteeing profit regardless of outcome.
///
/// Legs may come from different bookmakers; that cross-book combination is
/// the entire point of the check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub legs: Vec<OddsQuote>,
    /// Sum of the legs' implied probabilities
    pub implied_total: Decimal,
    /// Guaranteed edge: `1 - implied_total`
    pub margin: Decimal,
}

/// Two-outcome comparison; no draw price exists to read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoWayComparison {
    pub sides: [SideComparison; 2],
    pub arbitrage: Option<ArbitrageOpportunity>,
}

/// Three-outcome comparison with an explicit draw side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreeWayComparison {
    pub home: SideComparison,
    pub away: SideComparison,
    pub draw: SideComparison,
    pub arbitrage: Option<ArbitrageOpportunity>,
}

/// Comparison result, tagged by market shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MarketComparison {
    TwoWay(TwoWayComparison),
    ThreeWay(ThreeWayComparison),
}

impl MarketComparison {
    pub fn arbitrage(&self) -> Option<&ArbitrageOpportunity> {
        match self {
            MarketComparison::TwoWay(c) => c.arbitrage.as_ref(),
            MarketComparison::ThreeWay(c) => c.arbitrage.as_ref(),
        }
    }

    /// Shape of the compared market
    pub fn shape(&self) -> MarketShape {
        match self {
            MarketComparison::TwoWay(_) => MarketShape::TwoWay,
            MarketComparison::ThreeWay(_) => MarketShape::ThreeWay,
        }
    }
}

fn best_by_price(quotes: &[OddsQuote]) -> Option<&OddsQuote> {
    quotes
        .iter()
        .max_by(|a, b| a.decimal_price.cmp(&b.decimal_price))
}

/// Quote with the decimal price most favorable to a bettor taking `side`
pub fn best_price(quotes: &[OddsQuote], side: Side) -> Option<&OddsQuote> {
    let on_side: Vec<&OddsQuote> = quotes.iter().filter(|q| q.side == side).collect();
    on_side
        .into_iter()
        .max_by(|a, b| a.decimal_price.cmp(&b.decimal_price))
}

/// Price spread and per-bookmaker deviation across the given quotes
pub fn dispersion(quotes: &[OddsQuote]) -> Option<Dispersion> {
    if quotes.is_empty() {
        return None;
    }
    let prices: Vec<Decimal> = quotes.iter().map(|q| q.decimal_price).collect();
    let max = *prices.iter().max()?;
    let min = *prices.iter().min()?;
    let mean = prices.iter().sum::<Decimal>() / Decimal::from(prices.len());
    let deviations = quotes
        .iter()
        .map(|q| QuoteDeviation {
            bookmaker: q.bookmaker.clone(),
            decimal_price: q.decimal_price,
            deviation_from_mean: q.decimal_price - mean,
        })
        .collect();
    Some(Dispersion {
        max,
        min,
        spread: max - min,
        mean,
        deviations,
    })
}

/// Check two opposing quote sets for a guaranteed edge.
///
/// An opportunity exists iff the best prices' implied probabilities sum
/// below 1; the margin is the guaranteed fraction of stake.
pub fn arbitrage_opportunity(
    a_quotes: &[OddsQuote],
    b_quotes: &[OddsQuote],
) -> Result<Option<ArbitrageOpportunity>, OddsError> {
    let (Some(best_a), Some(best_b)) = (best_by_price(a_quotes), best_by_price(b_quotes)) else {
        return Ok(None);
    };
    from_legs(vec![best_a.clone(), best_b.clone()])
}

fn from_legs(legs: Vec<OddsQuote>) -> Result<Option<ArbitrageOpportunity>, OddsError> {
    let mut implied_total = Decimal::ZERO;
    for leg in &legs {
        implied_total += leg.implied_probability()?;
    }
    if implied_total < Decimal::ONE {
        Ok(Some(ArbitrageOpportunity {
            legs,
            implied_total,
            margin: Decimal::ONE - implied_total,
        }))
    } else {
        Ok(None)
    }
}

/// Compare all current quotes for one outcome across bookmakers.
///
/// Quotes must share a single (game, market, outcome). Two distinct sides
/// form a two-way comparison; home/draw/away forms a three-way one. Any
/// other combination is rejected rather than guessed at.
pub fn compare(quotes: &[OddsQuote]) -> Result<MarketComparison, CompareError> {
    let first = quotes.first().ok_or(CompareError::NoQuotes)?;
    if !quotes.iter().all(|q| {
        q.game_id == first.game_id
            && q.market_id == first.market_id
            && q.outcome_id == first.outcome_id
    }) {
        return Err(CompareError::MixedOutcomes);
    }

    let mut sides: Vec<Side> = quotes.iter().map(|q| q.side).collect();
    sides.sort_by_key(|s| *s as u8);
    sides.dedup();

    let side_comparison = |side: Side| -> Result<SideComparison, CompareError> {
        let on_side: Vec<OddsQuote> = quotes.iter().filter(|q| q.side == side).cloned().collect();
        let best = best_by_price(&on_side).ok_or(CompareError::NoQuotes)?.clone();
        let dispersion = dispersion(&on_side).ok_or(CompareError::NoQuotes)?;
        Ok(SideComparison {
            side,
            best,
            dispersion,
        })
    };

    if sides.contains(&Side::Draw) {
        if sides != vec![Side::Home, Side::Away, Side::Draw] {
            return Err(CompareError::UnsupportedShape(sides));
        }
        let home = side_comparison(Side::Home)?;
        let away = side_comparison(Side::Away)?;
        let draw = side_comparison(Side::Draw)?;
        let arbitrage = from_legs(vec![
            home.best.clone(),
            away.best.clone(),
            draw.best.clone(),
        ])?;
        return Ok(MarketComparison::ThreeWay(ThreeWayComparison {
            home,
            away,
            draw,
            arbitrage,
        }));
    }

    if sides.len() != 2 {
        return Err(CompareError::UnsupportedShape(sides));
    }
    let first_side = side_comparison(sides[0])?;
    let second_side = side_comparison(sides[1])?;
    let arbitrage = from_legs(vec![first_side.best.clone(), second_side.best.clone()])?;
    Ok(MarketComparison::TwoWay(TwoWayComparison {
        sides: [first_side, second_side],
        arbitrage,
    }))
}

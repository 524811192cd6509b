//! Conversions between American odds, decimal prices, and implied probability

use super::OddsError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Convert American odds to a decimal price.
///
/// Negative odds quote the stake needed to win 100; positive odds quote
/// the win on a 100 stake. Zero is rejected as meaningless.
pub fn american_to_decimal(american: i64) -> Result<Decimal, OddsError> {
    if american == 0 {
        return Err(OddsError::ZeroAmerican);
    }
    let a = Decimal::from(american);
    if american > 0 {
        Ok(Decimal::ONE + a / dec!(100))
    } else {
        Ok(Decimal::ONE + dec!(100) / a.abs())
    }
}

/// Convert a decimal price back to American odds.
///
/// Prices at or above 2.0 map to positive odds, shorter prices to negative
/// odds. Even money (2.0) canonically maps to +100, so -100 round-trips to
/// +100 rather than itself; every other integer with |odds| >= 100 survives
/// the round trip exactly.
pub fn decimal_to_american(decimal: Decimal) -> Result<i64, OddsError> {
    if decimal <= Decimal::ONE {
        return Err(OddsError::InvalidDecimal(decimal));
    }
    let odds = if decimal >= dec!(2.0) {
        (dec!(100) * (decimal - Decimal::ONE)).round()
    } else {
        (dec!(-100) / (decimal - Decimal::ONE)).round()
    };
    odds.to_i64().ok_or(OddsError::InvalidDecimal(decimal))
}

/// Probability encoded by a decimal price, bookmaker margin included.
pub fn implied_probability(decimal: Decimal) -> Result<Decimal, OddsError> {
    if decimal <= Decimal::ONE {
        return Err(OddsError::InvalidDecimal(decimal));
    }
    Ok(Decimal::ONE / decimal)
}

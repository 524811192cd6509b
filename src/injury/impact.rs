//! Aggregate impact scoring

use super::{InjuryImpact, InjuryRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Score a set of injury records.
///
/// Returns `None` for an empty set; the ratios are undefined without a
/// denominator.
pub fn impact_scores(records: &[InjuryRecord]) -> Option<InjuryImpact> {
    if records.is_empty() {
        return None;
    }
    let total = records.len();
    let starters = records.iter().filter(|r| r.is_starter).count();
    let active = records
        .iter()
        .filter(|r| r.status.is_active_injury())
        .count();

    let pct = |count: usize| Decimal::from(count) / Decimal::from(total) * dec!(100);
    Some(InjuryImpact {
        total_injuries: total,
        starter_injuries: starters,
        active_injuries: active,
        starter_impact_score: pct(starters),
        active_impact_score: pct(active),
    })
}

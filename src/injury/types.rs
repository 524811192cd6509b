//! Injury feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Player availability status as reported by the injury feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjuryStatus {
    Active,
    DayToDay,
    Questionable,
    Doubtful,
    Out,
    Suspended,
    InjuredReserve,
}

impl InjuryStatus {
    /// Statuses counted as active injuries in impact scoring
    pub fn is_active_injury(&self) -> bool {
        matches!(
            self,
            InjuryStatus::DayToDay | InjuryStatus::Questionable | InjuryStatus::Doubtful
        )
    }

    /// Player will not take the field
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            InjuryStatus::Out | InjuryStatus::Suspended | InjuryStatus::InjuredReserve
        )
    }

    /// Game-time decision risk warranting an advisory on dependent picks
    pub fn is_game_time_risk(&self) -> bool {
        matches!(self, InjuryStatus::Questionable | InjuryStatus::Doubtful)
    }
}

/// A player's latest injury report.
///
/// `probability` is the externally reported chance the player is
/// unavailable or limited; the engine consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player_id: String,
    pub status: InjuryStatus,
    pub is_starter: bool,
    pub probability: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Gate decision for a pick that references a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryDecision {
    /// No injury concern on record
    Clear,
    /// Surfaced with a visible flag, not excluded
    Advisory(InjuryStatus),
    /// Dropped from current listings, fail-closed
    Excluded(InjuryStatus),
}

/// Aggregate injury pressure over a set of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryImpact {
    pub total_injuries: usize,
    pub starter_injuries: usize,
    pub active_injuries: usize,
    /// `starter_injuries / total_injuries * 100`
    pub starter_impact_score: Decimal,
    /// `active_injuries / total_injuries * 100`
    pub active_impact_score: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&InjuryStatus::DayToDay).unwrap();
        assert_eq!(json, "\"DAY_TO_DAY\"");
        let status: InjuryStatus = serde_json::from_str("\"INJURED_RESERVE\"").unwrap();
        assert_eq!(status, InjuryStatus::InjuredReserve);
    }

    #[test]
    fn test_active_injury_statuses() {
        assert!(InjuryStatus::DayToDay.is_active_injury());
        assert!(InjuryStatus::Questionable.is_active_injury());
        assert!(InjuryStatus::Doubtful.is_active_injury());
        assert!(!InjuryStatus::Active.is_active_injury());
        assert!(!InjuryStatus::Out.is_active_injury());
    }

    #[test]
    fn test_unavailable_statuses() {
        assert!(InjuryStatus::Out.is_unavailable());
        assert!(InjuryStatus::Suspended.is_unavailable());
        assert!(InjuryStatus::InjuredReserve.is_unavailable());
        assert!(!InjuryStatus::Questionable.is_unavailable());
    }
}

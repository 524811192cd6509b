//! Latest-status board fed by the injury stream

use super::{InjuryDecision, InjuryRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps the latest injury record per player.
///
/// Fed by the injury stream, read by the pick gate. An older record never
/// replaces a newer one, so late feed replays cannot regress the board.
pub struct InjuryBoard {
    latest: RwLock<HashMap<String, InjuryRecord>>,
}

impl InjuryBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(HashMap::new()),
        }
    }

    /// Record a feed update, keeping the freshest record per player
    pub async fn upsert(&self, record: InjuryRecord) {
        let mut latest = self.latest.write().await;
        match latest.get(&record.player_id) {
            Some(existing) if existing.updated_at > record.updated_at => {
                tracing::debug!(
                    player_id = %record.player_id,
                    "Dropping stale injury update"
                );
            }
            _ => {
                latest.insert(record.player_id.clone(), record);
            }
        }
    }

    /// Latest record for a player, if any
    pub async fn latest(&self, player_id: &str) -> Option<InjuryRecord> {
        self.latest.read().await.get(player_id).cloned()
    }

    /// Gate decision for a pick referencing `player_id`.
    ///
    /// Unavailable players exclude the pick from current listings
    /// (fail-closed); game-time risks carry a visible advisory; everything
    /// else is clear, including players with no record.
    pub async fn decision(&self, player_id: Option<&str>) -> InjuryDecision {
        let Some(player_id) = player_id else {
            return InjuryDecision::Clear;
        };
        let Some(record) = self.latest(player_id).await else {
            return InjuryDecision::Clear;
        };
        if record.status.is_unavailable() {
            InjuryDecision::Excluded(record.status)
        } else if record.status.is_game_time_risk() {
            InjuryDecision::Advisory(record.status)
        } else {
            InjuryDecision::Clear
        }
    }

    /// Number of players on the board
    pub async fn player_count(&self) -> usize {
        self.latest.read().await.len()
    }
}

impl Default for InjuryBoard {
    fn default() -> Self {
        Self::new()
    }
}

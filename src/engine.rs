//! Engine facade
//!
//! Wires the snapshot store, injury board, sizer, and combiner behind the
//! interface the API layer calls. All derived computations are pure reads
//! over committed quotes and run without locks.

use crate::bets::Bet;
use crate::compare::{compare, CompareError, MarketComparison};
use crate::config::Config;
use crate::injury::{InjuryBoard, InjuryDecision, InjuryRecord, InjuryStatus};
use crate::odds::{OddsError, OddsQuote, PartitionKey};
use crate::parlay::{ParlayCard, ParlayCombiner, ParlayError};
use crate::risk::{KellyResult, KellySizer, RiskError};
use crate::score::{score_pick, Pick, ScoreError};
use crate::store::{Movement, SnapshotStore, StoreError};
use crate::telemetry::{increment, set_gauge, CounterMetric, GaugeMetric};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A pick cleared for listing, with any injury advisory attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfacedPick {
    pub pick: Pick,
    /// Game-time risk flag; visible, never silently dropped
    pub advisory: Option<InjuryStatus>,
}

/// The odds analytics engine.
///
/// The store and injury board are injected so callers share one instance
/// explicitly instead of reaching for process-wide state.
pub struct OddsEngine {
    store: Arc<SnapshotStore>,
    injuries: Arc<InjuryBoard>,
    sizer: KellySizer,
    combiner: ParlayCombiner,
    freshness_window: Duration,
}

impl OddsEngine {
    /// Build an engine from configuration over injected components
    pub fn new(
        store: Arc<SnapshotStore>,
        injuries: Arc<InjuryBoard>,
        config: &Config,
    ) -> Result<Self, RiskError> {
        Ok(Self {
            store,
            injuries,
            sizer: config.risk.sizer()?,
            combiner: ParlayCombiner::new(config.parlay.max_legs),
            freshness_window: config.store.freshness_window(),
        })
    }

    /// Validate and append a quote from a bookmaker feed.
    ///
    /// Out-of-order quotes are rejected, logged, and counted; they are
    /// never silently accepted.
    pub async fn ingest(&self, quote: OddsQuote) -> Result<(), StoreError> {
        match self.store.append(quote).await {
            Ok(()) => {
                increment(CounterMetric::QuotesAccepted);
                set_gauge(
                    GaugeMetric::TrackedPartitions,
                    self.store.partition_count().await as f64,
                );
                Ok(())
            }
            Err(e) => {
                increment(CounterMetric::QuotesRejected);
                tracing::warn!(error = %e, "Rejected quote");
                Err(e)
            }
        }
    }

    /// Apply an injury feed update
    pub async fn record_injury(&self, record: InjuryRecord) {
        self.injuries.upsert(record).await;
        increment(CounterMetric::InjuryUpdates);
        set_gauge(
            GaugeMetric::TrackedPlayers,
            self.injuries.player_count().await as f64,
        );
    }

    /// Current quote for an outcome.
    ///
    /// With a bookmaker, the partition head if fresh; without one, the
    /// freshest in-window quote across bookmakers.
    pub async fn get_current_odds(
        &self,
        game_id: &str,
        market_id: &str,
        outcome_id: &str,
        bookmaker: Option<&str>,
    ) -> Option<OddsQuote> {
        match bookmaker {
            Some(bookmaker) => {
                let key = PartitionKey::new(game_id, market_id, outcome_id, bookmaker);
                self.store.current(&key, self.freshness_window).await
            }
            None => self
                .store
                .current_for_outcome(game_id, market_id, outcome_id, self.freshness_window)
                .await
                .into_iter()
                .max_by_key(|q| q.observed_at),
        }
    }

    /// Line and price movements for one bookmaker's partition
    pub async fn get_movements(
        &self,
        game_id: &str,
        market_id: &str,
        outcome_id: &str,
        bookmaker: &str,
        since: DateTime<Utc>,
    ) -> Vec<Movement> {
        let key = PartitionKey::new(game_id, market_id, outcome_id, bookmaker);
        self.store.movements(&key, since).await
    }

    /// Cross-bookmaker comparison of the outcome's current quotes
    pub async fn compare_bookmakers(
        &self,
        game_id: &str,
        market_id: &str,
        outcome_id: &str,
    ) -> Result<MarketComparison, CompareError> {
        let quotes = self
            .store
            .current_for_outcome(game_id, market_id, outcome_id, self.freshness_window)
            .await;
        let comparison = compare(&quotes)?;
        if let Some(arb) = comparison.arbitrage() {
            increment(CounterMetric::ArbitrageOpportunities);
            tracing::info!(
                game_id,
                market_id,
                outcome_id,
                margin = %arb.margin,
                "Arbitrage opportunity"
            );
        }
        Ok(comparison)
    }

    /// Score a quote against an external model probability
    pub fn score_pick(
        &self,
        quote: &OddsQuote,
        model_probability: Decimal,
        confidence_score: Decimal,
        player_id: Option<String>,
    ) -> Result<Pick, ScoreError> {
        score_pick(quote, model_probability, confidence_score, player_id)
    }

    /// Kelly-size a scored pick
    pub fn size_bet(&self, pick: &Pick) -> Result<KellyResult, OddsError> {
        self.sizer.size_pick(pick)
    }

    /// Combine independent picks into a parlay card
    pub fn combine_parlay(&self, picks: Vec<Pick>) -> Result<ParlayCard, ParlayError> {
        self.combiner.combine(picks)
    }

    /// Closing line value of a bet, `None` until its market closes
    pub fn compute_clv(&self, bet: &Bet) -> Option<Decimal> {
        bet.clv()
    }

    /// Injury-gate picks for a current listing.
    ///
    /// Picks on unavailable players are excluded fail-closed; game-time
    /// risks surface with an advisory flag.
    pub async fn surface_picks(&self, picks: Vec<Pick>) -> Vec<SurfacedPick> {
        let mut surfaced = Vec::with_capacity(picks.len());
        for pick in picks {
            match self.injuries.decision(pick.player_id.as_deref()).await {
                InjuryDecision::Excluded(status) => {
                    increment(CounterMetric::PicksExcluded);
                    tracing::info!(pick_id = %pick.id, ?status, "Excluding pick");
                }
                InjuryDecision::Advisory(status) => surfaced.push(SurfacedPick {
                    pick,
                    advisory: Some(status),
                }),
                InjuryDecision::Clear => surfaced.push(SurfacedPick {
                    pick,
                    advisory: None,
                }),
            }
        }
        surfaced
    }
}

//! Partition-keyed quote history

use super::{Movement, StoreError};
use crate::odds::{OddsQuote, PartitionKey};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Partition = Arc<RwLock<Vec<OddsQuote>>>;

/// Append-only store of quote history, one ordered sequence per partition.
///
/// The outer map lock is held only to locate a partition; appends serialize
/// on the partition's own lock, so feeds pushing different partitions do
/// not contend. Instances are injected into callers rather than shared as
/// a process-wide singleton.
pub struct SnapshotStore {
    partitions: RwLock<HashMap<PartitionKey, Partition>>,
}

impl SnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            partitions: RwLock::new(HashMap::new()),
        }
    }

    async fn partition(&self, key: &PartitionKey) -> Option<Partition> {
        self.partitions.read().await.get(key).map(Arc::clone)
    }

    async fn partition_or_insert(&self, key: &PartitionKey) -> Partition {
        if let Some(partition) = self.partition(key).await {
            return partition;
        }
        let mut map = self.partitions.write().await;
        Arc::clone(map.entry(key.clone()).or_default())
    }

    /// Append a quote to its partition.
    ///
    /// Ingestion must be monotonic per partition: a quote observed before
    /// the partition head is rejected with `OutOfOrder` and the store is
    /// left untouched. Equal timestamps are accepted.
    pub async fn append(&self, quote: OddsQuote) -> Result<(), StoreError> {
        quote.validate()?;
        let key = quote.partition_key();
        let partition = self.partition_or_insert(&key).await;
        let mut history = partition.write().await;
        if let Some(last) = history.last() {
            if quote.observed_at < last.observed_at {
                return Err(StoreError::OutOfOrder {
                    partition: key,
                    latest: last.observed_at,
                    attempted: quote.observed_at,
                });
            }
        }
        history.push(quote);
        Ok(())
    }

    /// Latest quote in a partition, if it falls within the freshness window.
    ///
    /// Staleness is a steady-state condition, not a failure: an out-of-window
    /// head quote yields `None` rather than an error.
    pub async fn current(
        &self,
        key: &PartitionKey,
        freshness_window: Duration,
    ) -> Option<OddsQuote> {
        self.current_as_of(key, freshness_window, Utc::now()).await
    }

    /// `current` evaluated against an explicit point in time
    pub async fn current_as_of(
        &self,
        key: &PartitionKey,
        freshness_window: Duration,
        now: DateTime<Utc>,
    ) -> Option<OddsQuote> {
        let partition = self.partition(key).await?;
        let history = partition.read().await;
        let last = history.last()?;
        if now.signed_duration_since(last.observed_at) <= freshness_window {
            Some(last.clone())
        } else {
            None
        }
    }

    /// Fresh head quotes from every bookmaker pricing one outcome
    pub async fn current_for_outcome(
        &self,
        game_id: &str,
        market_id: &str,
        outcome_id: &str,
        freshness_window: Duration,
    ) -> Vec<OddsQuote> {
        self.current_for_outcome_as_of(game_id, market_id, outcome_id, freshness_window, Utc::now())
            .await
    }

    /// `current_for_outcome` evaluated against an explicit point in time
    pub async fn current_for_outcome_as_of(
        &self,
        game_id: &str,
        market_id: &str,
        outcome_id: &str,
        freshness_window: Duration,
        now: DateTime<Utc>,
    ) -> Vec<OddsQuote> {
        let partitions: Vec<Partition> = {
            let map = self.partitions.read().await;
            map.iter()
                .filter(|(key, _)| key.outcome_matches(game_id, market_id, outcome_id))
                .map(|(_, partition)| Arc::clone(partition))
                .collect()
        };

        let mut quotes = Vec::new();
        for partition in partitions {
            let history = partition.read().await;
            if let Some(last) = history.last() {
                if now.signed_duration_since(last.observed_at) <= freshness_window {
                    quotes.push(last.clone());
                }
            }
        }
        quotes
    }

    /// Movements for every consecutive quote pair whose newer quote was
    /// observed at or after `since`.
    ///
    /// The partition's very first quote has zero deltas and no prior
    /// reference when it lands in the window.
    pub async fn movements(&self, key: &PartitionKey, since: DateTime<Utc>) -> Vec<Movement> {
        let Some(partition) = self.partition(key).await else {
            return Vec::new();
        };
        let history = partition.read().await;
        let mut movements = Vec::new();
        for (i, quote) in history.iter().enumerate() {
            if quote.observed_at < since {
                continue;
            }
            match i.checked_sub(1).and_then(|j| history.get(j)) {
                Some(prev) => movements.push(Movement::between(prev, quote.clone())),
                None => movements.push(Movement::first(quote.clone())),
            }
        }
        movements
    }

    /// Number of partitions currently tracked
    pub async fn partition_count(&self) -> usize {
        self.partitions.read().await.len()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::Side;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quote_at(
        bookmaker: &str,
        price: Decimal,
        observed_at: DateTime<Utc>,
    ) -> OddsQuote {
        OddsQuote::from_decimal(
            "g1",
            "total",
            "o1",
            Side::Over,
            bookmaker,
            dec!(145.5),
            price,
            observed_at,
        )
        .unwrap()
    }

    fn key(bookmaker: &str) -> PartitionKey {
        PartitionKey::new("g1", "total", "o1", bookmaker)
    }

    #[tokio::test]
    async fn test_append_and_current() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();

        let current = store
            .current_as_of(&key("alpha"), Duration::seconds(60), now)
            .await
            .unwrap();
        assert_eq!(current.decimal_price, dec!(1.9091));
    }

    #[tokio::test]
    async fn test_stale_head_is_none_not_error() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store
            .append(quote_at("alpha", dec!(1.9091), now - Duration::minutes(10)))
            .await
            .unwrap();

        let current = store
            .current_as_of(&key("alpha"), Duration::minutes(5), now)
            .await;
        assert!(current.is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_rejected_without_mutation() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();

        let err = store
            .append(quote_at("alpha", dec!(1.8), now - Duration::seconds(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfOrder { .. }));

        // Head is still the original quote.
        let current = store
            .current_as_of(&key("alpha"), Duration::seconds(60), now)
            .await
            .unwrap();
        assert_eq!(current.decimal_price, dec!(1.9091));
        let movements = store.movements(&key("alpha"), now - Duration::hours(1)).await;
        assert_eq!(movements.len(), 1);
    }

    #[tokio::test]
    async fn test_equal_timestamps_accepted() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();
        store.append(quote_at("alpha", dec!(1.9524), now)).await.unwrap();

        let current = store
            .current_as_of(&key("alpha"), Duration::seconds(60), now)
            .await
            .unwrap();
        assert_eq!(current.decimal_price, dec!(1.9524));
    }

    #[tokio::test]
    async fn test_partitions_are_independent() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();
        // Earlier timestamp is fine on a different bookmaker's partition.
        store
            .append(quote_at("beta", dec!(1.9524), now - Duration::seconds(30)))
            .await
            .unwrap();

        assert_eq!(store.partition_count().await, 2);
    }

    #[tokio::test]
    async fn test_movements_first_quote_base_case() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();

        let movements = store.movements(&key("alpha"), now - Duration::hours(1)).await;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].price_delta, dec!(0));
        assert_eq!(movements[0].line_delta, dec!(0));
        assert_eq!(movements[0].odds_delta, 0);
        assert!(movements[0].prev_price.is_none());
    }

    #[tokio::test]
    async fn test_movements_consecutive_pairs() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store
            .append(quote_at("alpha", dec!(1.9091), now - Duration::seconds(20)))
            .await
            .unwrap();
        store
            .append(quote_at("alpha", dec!(1.9524), now - Duration::seconds(10)))
            .await
            .unwrap();
        store.append(quote_at("alpha", dec!(2.0), now)).await.unwrap();

        let movements = store.movements(&key("alpha"), now - Duration::hours(1)).await;
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[1].price_delta, dec!(0.0433));
        assert_eq!(movements[1].prev_price, Some(dec!(1.9091)));
        assert_eq!(movements[2].odds_delta, 205); // -105 -> +100
    }

    #[tokio::test]
    async fn test_movements_since_filter_keeps_prior_reference() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store
            .append(quote_at("alpha", dec!(1.9091), now - Duration::minutes(5)))
            .await
            .unwrap();
        store.append(quote_at("alpha", dec!(1.9524), now)).await.unwrap();

        // Window excludes the first quote, but the pair still diffs against it.
        let movements = store.movements(&key("alpha"), now - Duration::minutes(1)).await;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].prev_price, Some(dec!(1.9091)));
    }

    #[tokio::test]
    async fn test_movements_never_cross_bookmakers() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store
            .append(quote_at("alpha", dec!(1.9091), now - Duration::seconds(10)))
            .await
            .unwrap();
        store.append(quote_at("beta", dec!(2.5), now)).await.unwrap();

        let movements = store.movements(&key("beta"), now - Duration::hours(1)).await;
        assert_eq!(movements.len(), 1);
        assert!(movements[0].prev_price.is_none());
    }

    #[tokio::test]
    async fn test_current_for_outcome_gathers_fresh_books() {
        let store = SnapshotStore::new();
        let now = Utc::now();
        store.append(quote_at("alpha", dec!(1.9091), now)).await.unwrap();
        store
            .append(quote_at("beta", dec!(1.9524), now - Duration::minutes(10)))
            .await
            .unwrap();

        let quotes = store
            .current_for_outcome_as_of("g1", "total", "o1", Duration::minutes(5), now)
            .await;
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].bookmaker, "alpha");
    }
}

//! Concurrency tests for the snapshot store

use chrono::{Duration, Utc};
use linemaven::odds::{OddsQuote, PartitionKey, Side};
use linemaven::store::SnapshotStore;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_parallel_feeds_on_independent_partitions() {
    let store = Arc::new(SnapshotStore::new());
    let base = Utc::now() - Duration::seconds(10);

    let mut handles = Vec::new();
    for book in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let bookmaker = format!("book-{book}");
            for i in 0..50i64 {
                let quote = OddsQuote::from_decimal(
                    "g1",
                    "total",
                    "o1",
                    Side::Over,
                    bookmaker.clone(),
                    dec!(145.5),
                    dec!(1.9091),
                    base + Duration::milliseconds(i),
                )
                .unwrap();
                store.append(quote).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.partition_count().await, 8);
    for book in 0..8 {
        let key = PartitionKey::new("g1", "total", "o1", format!("book-{book}"));
        let movements = store.movements(&key, base - Duration::seconds(1)).await;
        assert_eq!(movements.len(), 50);
    }
}

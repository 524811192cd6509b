//! Snapshot store and movement tracker
//!
//! Append-only, per-partition quote history with monotonic ingestion
//! and consecutive-pair movement queries.

mod movement;
mod snapshot;

pub use movement::Movement;
pub use snapshot::SnapshotStore;

use crate::odds::{OddsError, PartitionKey};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Quote arrived with a timestamp behind the partition head
    #[error("out-of-order quote for {partition}: {attempted} precedes {latest}")]
    OutOfOrder {
        partition: PartitionKey,
        latest: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },
    /// Quote failed price validation
    #[error(transparent)]
    Quote(#[from] OddsError),
}

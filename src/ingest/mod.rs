//! Feed ingestion
//!
//! Seams for the external bookmaker and injury collaborators, plus a
//! runner that drains their updates into the engine.

mod runner;

pub use runner::{IngestRunner, IngestSender, IngestStats};

use crate::injury::InjuryRecord;
use crate::odds::OddsQuote;
use async_trait::async_trait;

/// Source of bookmaker quotes.
///
/// Adapters own their transport and retry policy; the engine only sees
/// quotes that arrived. `None` signals end of stream.
#[async_trait]
pub trait QuoteFeed: Send {
    async fn next_quote(&mut self) -> anyhow::Result<Option<OddsQuote>>;
}

/// Source of injury status updates
#[async_trait]
pub trait InjuryFeed: Send {
    async fn next_record(&mut self) -> anyhow::Result<Option<InjuryRecord>>;
}

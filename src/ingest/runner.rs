//! Channel-backed ingest runner

use super::{InjuryFeed, QuoteFeed};
use crate::engine::OddsEngine;
use crate::injury::InjuryRecord;
use crate::odds::OddsQuote;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Running ingestion statistics
#[derive(Debug, Default, Clone)]
pub struct IngestStats {
    pub quotes_received: u64,
    pub quotes_accepted: u64,
    pub quotes_rejected: u64,
    pub injury_updates: u64,
    pub last_quote_at: Option<DateTime<Utc>>,
}

/// Sender half handed to feed adapters
#[derive(Clone)]
pub struct IngestSender {
    quote_tx: mpsc::Sender<OddsQuote>,
    injury_tx: mpsc::Sender<InjuryRecord>,
}

impl IngestSender {
    /// Queue a quote for ingestion
    pub async fn send_quote(&self, quote: OddsQuote) -> anyhow::Result<()> {
        self.quote_tx
            .send(quote)
            .await
            .map_err(|_| anyhow::anyhow!("Ingest runner stopped"))
    }

    /// Queue an injury update
    pub async fn send_injury(&self, record: InjuryRecord) -> anyhow::Result<()> {
        self.injury_tx
            .send(record)
            .await
            .map_err(|_| anyhow::anyhow!("Ingest runner stopped"))
    }

    /// Drain a quote feed into the channel until it ends
    pub async fn pump_quotes<F: QuoteFeed>(&self, feed: &mut F) -> anyhow::Result<()> {
        while let Some(quote) = feed.next_quote().await? {
            self.send_quote(quote).await?;
        }
        Ok(())
    }

    /// Drain an injury feed into the channel until it ends
    pub async fn pump_injuries<F: InjuryFeed>(&self, feed: &mut F) -> anyhow::Result<()> {
        while let Some(record) = feed.next_record().await? {
            self.send_injury(record).await?;
        }
        Ok(())
    }
}

/// Drains feed channels into the engine.
///
/// Racing feeds for the same partition resolve on the engine side: the
/// out-of-order quote is rejected and counted, never overwriting the
/// partition head.
pub struct IngestRunner {
    engine: Arc<OddsEngine>,
    quote_rx: mpsc::Receiver<OddsQuote>,
    injury_rx: mpsc::Receiver<InjuryRecord>,
    stats: Arc<RwLock<IngestStats>>,
}

impl IngestRunner {
    /// Create a runner and the sender handed to feed adapters
    pub fn new(engine: Arc<OddsEngine>, channel_capacity: usize) -> (Self, IngestSender) {
        let (quote_tx, quote_rx) = mpsc::channel(channel_capacity);
        let (injury_tx, injury_rx) = mpsc::channel(channel_capacity);
        let runner = Self {
            engine,
            quote_rx,
            injury_rx,
            stats: Arc::new(RwLock::new(IngestStats::default())),
        };
        let sender = IngestSender {
            quote_tx,
            injury_tx,
        };
        (runner, sender)
    }

    /// Shared handle to the running statistics
    pub fn stats_handle(&self) -> Arc<RwLock<IngestStats>> {
        Arc::clone(&self.stats)
    }

    /// Drain both channels until every sender is dropped
    pub async fn run(mut self) {
        let mut quotes_open = true;
        let mut injuries_open = true;
        while quotes_open || injuries_open {
            tokio::select! {
                quote = self.quote_rx.recv(), if quotes_open => match quote {
                    Some(quote) => self.handle_quote(quote).await,
                    None => quotes_open = false,
                },
                record = self.injury_rx.recv(), if injuries_open => match record {
                    Some(record) => self.handle_injury(record).await,
                    None => injuries_open = false,
                },
            }
        }
        tracing::info!("Ingest feeds closed");
    }

    async fn handle_quote(&self, quote: OddsQuote) {
        let observed_at = quote.observed_at;
        let accepted = self.engine.ingest(quote).await.is_ok();
        let mut stats = self.stats.write().await;
        stats.quotes_received += 1;
        stats.last_quote_at = Some(observed_at);
        if accepted {
            stats.quotes_accepted += 1;
        } else {
            stats.quotes_rejected += 1;
        }
    }

    async fn handle_injury(&self, record: InjuryRecord) {
        self.engine.record_injury(record).await;
        let mut stats = self.stats.write().await;
        stats.injury_updates += 1;
    }
}

//! Prometheus metrics

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Quotes accepted into the snapshot store
    QuotesAccepted,
    /// Quotes rejected for ordering or price violations
    QuotesRejected,
    /// Injury feed updates applied to the board
    InjuryUpdates,
    /// Arbitrage opportunities surfaced by the comparator
    ArbitrageOpportunities,
    /// Picks excluded from listings by the injury gate
    PicksExcluded,
}

impl CounterMetric {
    fn name(&self) -> &'static str {
        match self {
            CounterMetric::QuotesAccepted => "linemaven_quotes_accepted_total",
            CounterMetric::QuotesRejected => "linemaven_quotes_rejected_total",
            CounterMetric::InjuryUpdates => "linemaven_injury_updates_total",
            CounterMetric::ArbitrageOpportunities => "linemaven_arbitrage_opportunities_total",
            CounterMetric::PicksExcluded => "linemaven_picks_excluded_total",
        }
    }
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Partitions tracked by the snapshot store
    TrackedPartitions,
    /// Players on the injury board
    TrackedPlayers,
}

impl GaugeMetric {
    fn name(&self) -> &'static str {
        match self {
            GaugeMetric::TrackedPartitions => "linemaven_tracked_partitions",
            GaugeMetric::TrackedPlayers => "linemaven_tracked_players",
        }
    }
}

/// Increment a counter
pub fn increment(metric: CounterMetric) {
    counter!(metric.name()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    gauge!(metric.name()).set(value);
}

/// Start the Prometheus exporter on the given port.
///
/// Must run inside a Tokio runtime; the exporter spawns its HTTP listener
/// onto it.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {e}"))?;
    tracing::info!(port, "Prometheus exporter listening");
    Ok(())
}

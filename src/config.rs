//! Configuration types for linemaven

use crate::risk::{KellySizer, RiskBuckets, RiskError};
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub parlay: ParlayConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Risk(#[from] RiskError),
    #[error("parlay max_legs must be at least 1")]
    InvalidMaxLegs,
    #[error("ingest channel_capacity must be positive")]
    InvalidChannelCapacity,
    #[error("store freshness_window_secs must be positive")]
    InvalidFreshnessWindow,
}

/// Snapshot store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Maximum quote age served as "current" (seconds)
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,
}

impl StoreConfig {
    /// Freshness window as a duration
    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.freshness_window_secs as i64)
    }
}

fn default_freshness_window_secs() -> u64 {
    120
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: 120,
        }
    }
}

/// Stake sizing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Fractional-Kelly multiplier applied to the raw fraction
    #[serde(default = "default_unit_scale")]
    pub unit_scale: Decimal,

    /// Kelly fraction at which risk becomes Medium
    #[serde(default = "default_medium_risk_threshold")]
    pub medium_risk_threshold: Decimal,

    /// Kelly fraction at which risk becomes High
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: Decimal,
}

impl RiskConfig {
    /// Bucket breakpoints, rejecting a non-monotonic pair
    pub fn buckets(&self) -> Result<RiskBuckets, RiskError> {
        RiskBuckets::new(self.medium_risk_threshold, self.high_risk_threshold)
    }

    /// Build the configured sizer
    pub fn sizer(&self) -> Result<KellySizer, RiskError> {
        KellySizer::new(self.unit_scale, self.buckets()?)
    }
}

fn default_unit_scale() -> Decimal {
    Decimal::new(25, 2) // 0.25 = quarter Kelly
}
fn default_medium_risk_threshold() -> Decimal {
    Decimal::new(2, 2) // 0.02
}
fn default_high_risk_threshold() -> Decimal {
    Decimal::new(5, 2) // 0.05
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            unit_scale: default_unit_scale(),
            medium_risk_threshold: default_medium_risk_threshold(),
            high_risk_threshold: default_high_risk_threshold(),
        }
    }
}

/// Parlay combination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ParlayConfig {
    /// Maximum legs accepted on one card
    #[serde(default = "default_max_legs")]
    pub max_legs: usize,
}

fn default_max_legs() -> usize {
    10
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self { max_legs: 10 }
    }
}

/// Feed ingestion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Buffered quotes/records per feed channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    10_000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 10_000,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.risk.sizer()?;
        if self.parlay.max_legs == 0 {
            return Err(ConfigError::InvalidMaxLegs);
        }
        if self.ingest.channel_capacity == 0 {
            return Err(ConfigError::InvalidChannelCapacity);
        }
        if self.store.freshness_window_secs == 0 {
            return Err(ConfigError::InvalidFreshnessWindow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [store]
            freshness_window_secs = 60

            [risk]
            unit_scale = 0.5
            medium_risk_threshold = 0.01
            high_risk_threshold = 0.04

            [parlay]
            max_legs = 6

            [telemetry]
            log_level = "debug"
            log_format = "json"
            metrics_port = 9090
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.store.freshness_window_secs, 60);
        assert_eq!(config.risk.unit_scale, dec!(0.5));
        assert_eq!(config.parlay.max_legs, 6);
        assert_eq!(config.telemetry.metrics_port, Some(9090));
        // Untouched section falls back to defaults.
        assert_eq!(config.ingest.channel_capacity, 10_000);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.store.freshness_window_secs, 120);
        assert_eq!(config.risk.unit_scale, dec!(0.25));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.metrics_port.is_none());
    }

    #[test]
    fn test_non_monotonic_risk_buckets_rejected() {
        let toml = r#"
            [risk]
            medium_risk_threshold = 0.08
            high_risk_threshold = 0.04
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Risk(_))));
    }

    #[test]
    fn test_zero_max_legs_rejected() {
        let toml = "[parlay]\nmax_legs = 0\n";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxLegs)));
    }
}

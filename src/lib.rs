//! linemaven: Odds analytics and signal engine for sports betting markets
//!
//! This library provides the core components for:
//! - Odds conversion between American, decimal, and implied probability
//! - Partitioned quote snapshots and line movement tracking
//! - Cross-bookmaker comparison and arbitrage detection
//! - Closing line value over settled bets
//! - EV scoring against external model probabilities
//! - Kelly stake sizing with risk bucketing
//! - Parlay combination with all-or-nothing settlement
//! - Injury-gated pick listings
//! - Feed ingestion seams and observability

pub mod bets;
pub mod cli;
pub mod compare;
pub mod config;
pub mod engine;
pub mod ingest;
pub mod injury;
pub mod odds;
pub mod parlay;
pub mod risk;
pub mod score;
pub mod store;
pub mod telemetry;

//! CLI interface for linemaven
//!
//! Provides subcommands for:
//! - `convert`: odds format conversion
//! - `score`: score a price against a model probability
//! - `size`: Kelly-size a pick
//! - `parlay`: combine legs into a parlay card
//! - `config`: show configuration

mod convert;
mod parlay;
mod score;
mod size;

pub use convert::ConvertArgs;
pub use parlay::ParlayArgs;
pub use score::ScoreArgs;
pub use size::SizeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "linemaven")]
#[command(about = "Odds analytics and signal engine for sports betting markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert between American odds, decimal price, and implied probability
    Convert(ConvertArgs),
    /// Score a price against a model probability
    Score(ScoreArgs),
    /// Kelly-size a pick
    Size(SizeArgs),
    /// Combine legs into a parlay card
    Parlay(ParlayArgs),
    /// Show configuration
    Config,
}

//! Parlay command implementation

use crate::config::Config;
use crate::odds::{OddsQuote, Side};
use crate::parlay::ParlayCombiner;
use crate::score::score_pick;
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

#[derive(Args, Debug)]
pub struct ParlayArgs {
    /// Legs as probability@decimal_price pairs (e.g. --leg 0.55@1.91)
    #[arg(long = "leg", required = true)]
    pub legs: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ParlayArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut picks = Vec::with_capacity(self.legs.len());
        for (i, leg) in self.legs.iter().enumerate() {
            let (probability, price) = leg
                .split_once('@')
                .ok_or_else(|| anyhow::anyhow!("Leg {leg:?} is not probability@price"))?;
            let probability = Decimal::from_str(probability.trim())?;
            let price = Decimal::from_str(price.trim())?;
            let quote = OddsQuote::from_decimal(
                format!("leg-{i}"),
                "adhoc",
                "adhoc",
                Side::Over,
                "cli",
                dec!(0),
                price,
                Utc::now(),
            )?;
            picks.push(score_pick(&quote, probability, dec!(50), None)?);
        }

        let combiner = ParlayCombiner::new(config.parlay.max_legs);
        let card = combiner.combine(picks)?;

        if self.json {
            let out = serde_json::json!({
                "legs": card.legs.len(),
                "combined_probability": card.combined_probability.round_dp(4),
                "combined_decimal_odds": card.combined_decimal_odds.round_dp(4),
                "combined_ev": card.combined_ev.round_dp(2),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("Legs:                  {}", card.legs.len());
            println!(
                "Combined probability:  {}",
                card.combined_probability.round_dp(4)
            );
            println!(
                "Combined decimal odds: {}",
                card.combined_decimal_odds.round_dp(4)
            );
            println!("Combined EV:           {}%", card.combined_ev.round_dp(2));
        }
        Ok(())
    }
}

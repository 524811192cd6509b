//! Score command implementation

use crate::odds::implied_probability;
use crate::score::ev_percentage;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Decimal price of the quote
    #[arg(long)]
    pub price: Decimal,

    /// Model win probability, in (0, 1)
    #[arg(long)]
    pub probability: Decimal,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScoreArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let implied = implied_probability(self.price)?;
        let ev = ev_percentage(self.probability, self.price)?;
        let edge = self.probability - implied;

        if self.json {
            let out = serde_json::json!({
                "decimal_price": self.price,
                "model_probability": self.probability,
                "implied_probability": implied.round_dp(4),
                "edge": edge.round_dp(4),
                "ev_percentage": ev.round_dp(2),
                "positive_ev": ev > Decimal::ZERO,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("Implied probability: {}", implied.round_dp(4));
            println!("Model edge:          {}", edge.round_dp(4));
            let flag = if ev > Decimal::ZERO {
                ""
            } else {
                " (non-positive EV)"
            };
            println!("EV:                  {}%{flag}", ev.round_dp(2));
        }
        Ok(())
    }
}

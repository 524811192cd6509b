//! Size command implementation

use crate::config::Config;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct SizeArgs {
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

impl SizeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let sizer = config.risk.sizer()?;
        let result = sizer.size(self.probability, self.price)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        println!("Kelly fraction:  {}", result.kelly_fraction.round_dp(4));
        if let Some(level) = result.risk_level {
            println!("Suggested units: {}", result.suggested_units.round_dp(4));
            println!("Risk level:      {level:?}");
        } else {
            println!("No bet: the model shows no edge at this price");
        }
        Ok(())
    }
}

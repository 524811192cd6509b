//! Convert command implementation

use crate::odds::{american_to_decimal, decimal_to_american, implied_probability};
use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Odds to convert: American ("-110", "+150") or decimal ("1.91")
    pub odds: String,
}

impl ConvertArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let trimmed = self.odds.trim().trim_start_matches('+');
        let decimal = if trimmed.contains('.') {
            Decimal::from_str(trimmed)?
        } else {
            american_to_decimal(trimmed.parse::<i64>()?)?
        };
        let american = decimal_to_american(decimal)?;
        let implied = implied_probability(decimal)?;

        println!("Decimal price:       {}", decimal.round_dp(4));
        println!("American odds:       {american:+}");
        println!("Implied probability: {}", implied.round_dp(4));
        Ok(())
    }
}

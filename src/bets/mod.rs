//! Bet lifecycle and closing line value
//!
//! A bet is placed at an opening quote, closed once when the market locks
//! (CLV computed), and settled once with a terminal status.

mod bet;

pub use bet::{clv_cents, Bet, BetStatus};

use crate::odds::OddsError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Bet lifecycle errors
#[derive(Debug, Error)]
pub enum BetError {
    /// The market already closed for this bet; a market cannot re-close
    #[error("bet already has a closing quote")]
    AlreadyClosed,
    /// Settlement already happened; a bet never moves backward
    #[error("bet is already settled as {0:?}")]
    AlreadySettled(BetStatus),
    /// Settling to pending is not a settlement
    #[error("cannot settle a bet back to pending")]
    InvalidSettlement,
    /// The closing quote prices a different outcome or side
    #[error("closing quote is for a different outcome or side")]
    OutcomeMismatch,
    /// Stake must be positive
    #[error("stake must be positive, got {0}")]
    InvalidStake(Decimal),
    /// Quote price failed validation
    #[error(transparent)]
    Odds(#[from] OddsError),
}

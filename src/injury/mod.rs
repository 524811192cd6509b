//! Injury impact weighting
//!
//! Reads the injury feed's latest status per player and gates picks whose
//! probability estimate depends on an affected player. Not a probability
//! model: a deterministic discount and flag layer.

mod board;
mod impact;
mod types;

pub use board::InjuryBoard;
pub use impact::impact_scores;
pub use types::{InjuryDecision, InjuryImpact, InjuryRecord, InjuryStatus};

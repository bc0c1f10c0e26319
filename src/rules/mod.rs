//! Settlement rules for the betting games.
//!
//! Each game decides its own outcome; this module only defines how a
//! decided bet is paid out and recorded:
//! - `Settlement`: stake, multiplier, payout
//! - `RoundRecord`: a settled bet in a game's recent history
//! - `BettingGame`: shared read-only view over a game's wallet and history

pub mod engine;

pub use engine::{settle, BettingGame, Outcome, RoundRecord, Settlement};

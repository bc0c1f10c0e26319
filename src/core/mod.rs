//! Core building blocks shared by every game: RNG, wallet, round history,
//! grids, timers, seats, configuration and errors.
//!
//! Nothing here knows about a particular game. Games combine these pieces
//! and are configured through the types in `config`.

pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod rng;
pub mod seat;
pub mod ticker;
pub mod wallet;

pub use config::{
    ArcadeConfig, BalloonConfig, BalloonDifficulty, CockFightConfig, ColorConfig, CrashConfig, CrashTier, GameKind,
    Match3Config, PlinkoConfig, PlinkoRisk, PopRisk,
};
pub use error::{ArcadeError, Result};
pub use grid::{Grid, Neighbors, Pos};
pub use history::RoundHistory;
pub use rng::{GameRng, GameRngState};
pub use seat::{SeatId, SeatMap};
pub use ticker::{Accumulator, Countdown, Tick};
pub use wallet::Wallet;

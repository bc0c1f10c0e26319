//! # arcade-sim
//!
//! Deterministic outcome simulators for a casual gaming portal: crash
//! games, balloon pumping, color prediction, cock fights, Plinko, and a few
//! score-only arcade games.
//!
//! ## Design Principles
//!
//! 1. **Seeded**: Every game owns a `GameRng` built from a seed, so a round
//!    replays exactly given the same seed and inputs.
//!
//! 2. **Host-Driven Time**: No timers or threads. Countdowns and animations
//!    advance only when the host calls `tick()` / `tick_second()`.
//!
//! 3. **Guards Return Errors**: Bets over balance, bets during a round,
//!    moves after game over all return `ArcadeError` and leave state as it
//!    was.
//!
//! ## Architecture
//!
//! - **Wallet + History**: Betting games debit a `Wallet` on bet placement
//!   and credit it on settlement. Settled rounds land in a bounded
//!   `RoundHistory`, newest first, backed by `im::Vector`.
//!
//! - **Logging**: `tracing` events only; the library installs no
//!   subscriber.
//!
//! ## Modules
//!
//! - `core`: RNG, wallet, history, grid, timers, seats, configuration, errors
//! - `rules`: Settlement and the `BettingGame` trait
//! - `games`: One module per game
//! - `catalog`: The portal listing and search filter

pub mod catalog;
pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, ArcadeError, GameKind, GameRng, GameRngState, Grid, Pos, Result, RoundHistory, SeatId, SeatMap,
    Wallet,
};

pub use crate::rules::{settle, BettingGame, Outcome, RoundRecord, Settlement};

pub use crate::games::{
    BalloonGame, CockFightGame, ColorPredictionGame, CrashGame, LudoGame, Match3, Minesweeper, Platformer,
    PlinkoGame,
};

pub use crate::catalog::{CatalogEntry, CatalogFilter, Category, Difficulty, CATALOG};

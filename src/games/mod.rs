//! Game implementations.
//!
//! Betting games (own a [`Wallet`](crate::core::Wallet), implement
//! [`BettingGame`](crate::rules::BettingGame)):
//! - `crash`: Aviator, Jet-X and Pushpa
//! - `balloons`, `color_prediction`, `cock_fight`, `plinko`
//!
//! Score games (no stake):
//! - `minesweeper`, `match3`, `ludo`, `platformer`

pub mod balloons;
pub mod cock_fight;
pub mod color_prediction;
pub mod crash;
pub mod ludo;
pub mod match3;
pub mod minesweeper;
pub mod platformer;
pub mod plinko;

pub use balloons::BalloonGame;
pub use cock_fight::CockFightGame;
pub use color_prediction::ColorPredictionGame;
pub use crash::CrashGame;
pub use ludo::LudoGame;
pub use match3::Match3;
pub use minesweeper::Minesweeper;
pub use platformer::Platformer;
pub use plinko::PlinkoGame;

//! Error type shared by every simulator.
//!
//! Guards that a game applies before mutating state (bet over balance,
//! bet while a round is in flight, move on a finished board) surface as
//! `ArcadeError`. State is left untouched when an error is returned.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcadeError {
    #[error("Insufficient balance: need {needed:.2}, have {available:.2}")]
    InsufficientBalance { needed: f64, available: f64 },
    #[error("Bet {amount:.2} is below the minimum of {minimum:.2}")]
    BetBelowMinimum { amount: f64, minimum: f64 },
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Action not allowed while the round is {0}")]
    WrongPhase(&'static str),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("A bet has already been placed for this round")]
    AlreadyBet,
    #[error("No active bet")]
    NoActiveBet,
    #[error("Invalid position ({row}, {col})")]
    InvalidPosition { row: usize, col: usize },
    #[error("Positions are not adjacent")]
    NotAdjacent,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;

impl From<bincode::Error> for ArcadeError {
    fn from(err: bincode::Error) -> Self {
        ArcadeError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for ArcadeError {
    fn from(err: serde_json::Error) -> Self {
        ArcadeError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ArcadeError::InsufficientBalance { needed: 10.0, available: 2.5 };
        assert_eq!(err.to_string(), "Insufficient balance: need 10.00, have 2.50");

        let err = ArcadeError::WrongPhase("flying");
        assert_eq!(err.to_string(), "Action not allowed while the round is flying");
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let err: ArcadeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ArcadeError::InvalidConfig(_)));
    }
}

//! Balance tracking and bet guards.
//!
//! Every betting game holds its own `Wallet`. Stakes are debited when a
//! bet is placed and payouts credited on a win, so the displayed balance
//! always equals the last computed value.

use serde::{Deserialize, Serialize};

use super::error::{ArcadeError, Result};

/// A floating balance that can never go negative through `debit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f64,
}

impl Wallet {
    /// Create a wallet with a starting balance.
    ///
    /// Negative or non-finite balances are clamped to zero.
    #[must_use]
    pub fn new(balance: f64) -> Self {
        let balance = if balance.is_finite() { balance.max(0.0) } else { 0.0 };
        Self { balance }
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Whether `amount` could be staked right now.
    #[must_use]
    pub fn can_afford(&self, amount: f64) -> bool {
        amount.is_finite() && amount > 0.0 && amount <= self.balance
    }

    /// Check a stake against the balance and a game's minimum bet.
    pub fn check_bet(&self, amount: f64, minimum: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ArcadeError::InvalidAmount(amount));
        }
        if amount < minimum {
            return Err(ArcadeError::BetBelowMinimum { amount, minimum });
        }
        if amount > self.balance {
            return Err(ArcadeError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// Debit a stake after running the bet guard.
    pub fn debit(&mut self, amount: f64, minimum: f64) -> Result<()> {
        self.check_bet(amount, minimum)?;
        self.balance -= amount;
        // Rounding can leave a tiny negative residue after many debits.
        if self.balance < 0.0 {
            self.balance = 0.0;
        }
        Ok(())
    }

    /// Credit a payout. Non-positive or non-finite amounts are ignored.
    pub fn credit(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.balance += amount;
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let mut wallet = Wallet::new(100.0);
        wallet.debit(40.0, 1.0).unwrap();
        assert_eq!(wallet.balance(), 60.0);

        wallet.credit(80.0);
        assert_eq!(wallet.balance(), 140.0);
    }

    #[test]
    fn test_bet_guards() {
        let mut wallet = Wallet::new(10.0);

        assert_eq!(
            wallet.debit(20.0, 1.0),
            Err(ArcadeError::InsufficientBalance { needed: 20.0, available: 10.0 })
        );
        assert_eq!(
            wallet.debit(0.5, 1.0),
            Err(ArcadeError::BetBelowMinimum { amount: 0.5, minimum: 1.0 })
        );
        assert!(matches!(wallet.debit(f64::NAN, 1.0), Err(ArcadeError::InvalidAmount(_))));
        assert!(matches!(wallet.debit(-5.0, 1.0), Err(ArcadeError::InvalidAmount(_))));

        // Failed guards leave the balance alone
        assert_eq!(wallet.balance(), 10.0);
    }

    #[test]
    fn test_full_balance_bet() {
        let mut wallet = Wallet::new(10.0);
        wallet.debit(10.0, 1.0).unwrap();
        assert_eq!(wallet.balance(), 0.0);
        assert!(!wallet.can_afford(0.01));
    }

    #[test]
    fn test_credit_ignores_garbage() {
        let mut wallet = Wallet::new(5.0);
        wallet.credit(-3.0);
        wallet.credit(f64::INFINITY);
        assert_eq!(wallet.balance(), 5.0);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Wallet::new(-10.0).balance(), 0.0);
        assert_eq!(Wallet::new(f64::NAN).balance(), 0.0);
    }
}

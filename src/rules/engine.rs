//! Settlement rules shared by the betting games.
//!
//! Every betting game decides its own outcome, then hands a `Settlement`
//! to `settle`, which credits the wallet, records the round and logs it.

use serde::{Deserialize, Serialize};

use crate::core::config::GameKind;
use crate::core::history::RoundHistory;
use crate::core::wallet::Wallet;

/// Result of a settled bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Stake, multiplier and payout of one bet.
///
/// `payout` is the full amount credited back (stake included); a loss pays 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub stake: f64,
    pub multiplier: f64,
    pub payout: f64,
}

impl Settlement {
    /// A winning bet paying `stake * multiplier`.
    #[must_use]
    pub fn win(stake: f64, multiplier: f64) -> Self {
        Self {
            stake,
            multiplier,
            payout: stake * multiplier,
        }
    }

    /// A losing bet. `multiplier` is the value reached when it was lost.
    #[must_use]
    pub fn loss(stake: f64, multiplier: f64) -> Self {
        Self {
            stake,
            multiplier,
            payout: 0.0,
        }
    }

    /// Any payout counts as a win, even one below the stake.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.payout > 0.0 {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// Profit (or loss when negative) relative to the stake.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.payout - self.stake
    }
}

/// One entry in a game's recent-history list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub game: GameKind,
    /// What the player bet on, e.g. `"green"`, `"7"`, `"slot 1"`.
    pub selection: String,
    pub settlement: Settlement,
}

impl RoundRecord {
    #[must_use]
    pub fn new(game: GameKind, selection: impl Into<String>, settlement: Settlement) -> Self {
        Self {
            game,
            selection: selection.into(),
            settlement,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.settlement.outcome()
    }
}

impl RoundHistory<RoundRecord> {
    /// Net result over the rounds still in history.
    #[must_use]
    pub fn net_profit(&self) -> f64 {
        self.iter().map(|r| r.settlement.net()).sum()
    }

    #[must_use]
    pub fn win_count(&self) -> usize {
        self.iter().filter(|r| r.outcome() == Outcome::Win).count()
    }
}

/// Credit the payout, record the round and return the record.
pub fn settle(
    wallet: &mut Wallet,
    history: &mut RoundHistory<RoundRecord>,
    record: RoundRecord,
) -> RoundRecord {
    wallet.credit(record.settlement.payout);
    tracing::info!(
        game = %record.game,
        selection = %record.selection,
        stake = record.settlement.stake,
        multiplier = record.settlement.multiplier,
        payout = record.settlement.payout,
        balance = wallet.balance(),
        "round settled"
    );
    history.push(record.clone());
    record
}

/// Common view over a game that holds a wallet and a round history.
///
/// Games implement the three accessors; the summaries come for free.
pub trait BettingGame {
    fn kind(&self) -> GameKind;

    fn wallet(&self) -> &Wallet;

    fn rounds(&self) -> &RoundHistory<RoundRecord>;

    fn balance(&self) -> f64 {
        self.wallet().balance()
    }

    fn recent_net(&self) -> f64 {
        self.rounds().net_profit()
    }

    fn recent_wins(&self) -> usize {
        self.rounds().win_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_win_and_loss() {
        let win = Settlement::win(10.0, 2.5);
        assert_eq!(win.payout, 25.0);
        assert_eq!(win.outcome(), Outcome::Win);
        assert_eq!(win.net(), 15.0);

        let loss = Settlement::loss(10.0, 3.0);
        assert_eq!(loss.payout, 0.0);
        assert_eq!(loss.outcome(), Outcome::Loss);
        assert_eq!(loss.net(), -10.0);
    }

    #[test]
    fn test_partial_return_is_a_win() {
        let s = Settlement::win(10.0, 0.3);
        assert_eq!(s.outcome(), Outcome::Win);
        assert!(s.net() < 0.0);
    }

    #[test]
    fn test_settle_credits_and_records() {
        let mut wallet = Wallet::new(90.0);
        let mut history = RoundHistory::new(2);

        let record = RoundRecord::new(GameKind::Balloons, "cash out", Settlement::win(10.0, 2.0));
        settle(&mut wallet, &mut history, record);

        assert_eq!(wallet.balance(), 110.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().selection, "cash out");
    }

    #[test]
    fn test_history_summaries() {
        let mut wallet = Wallet::new(100.0);
        let mut history = RoundHistory::new(2);
        for settlement in [Settlement::loss(10.0, 1.5), Settlement::win(10.0, 3.0), Settlement::win(10.0, 2.0)] {
            settle(&mut wallet, &mut history, RoundRecord::new(GameKind::Plinko, "slot 0", settlement));
        }

        // The first loss has dropped out.
        assert_eq!(history.len(), 2);
        assert_eq!(history.win_count(), 2);
        assert_eq!(history.net_profit(), 30.0);
    }
}

//! Balloon pump: escalating risk per action.
//!
//! Each pump first rolls against the current pop chance. A surviving pump
//! raises the multiplier along `1 + 0.15p + 0.02p²` (capped by the
//! difficulty's maximum) and the pop chance to `base + p × increase`.
//! Cashing out pays `bet × multiplier`; a pop loses the bet.

use serde::{Deserialize, Serialize};

use crate::core::config::{BalloonConfig, BalloonDifficulty, GameKind, PopRisk};
use crate::core::error::{ArcadeError, Result};
use crate::core::history::RoundHistory;
use crate::core::rng::GameRng;
use crate::core::wallet::Wallet;
use crate::rules::{settle, BettingGame, RoundRecord, Settlement};

/// Quick-pick auto cash-out targets.
pub const QUICK_TARGETS: [f64; 7] = [1.0, 1.23, 1.55, 1.98, 2.56, 3.36, 4.48];

/// Multiplier after `pumps` successful pumps, before any cap.
#[must_use]
pub fn pump_multiplier(pumps: u32) -> f64 {
    let p = f64::from(pumps);
    1.0 + p * 0.15 + p * p * 0.02
}

/// Pop chance for the pump after `pumps` successful ones.
#[must_use]
pub fn pop_chance(risk: &PopRisk, pumps: u32) -> f64 {
    (risk.base_pop_chance + f64::from(pumps) * risk.pop_increase).min(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PumpOutcome {
    /// Survived; carries the new multiplier.
    Inflated(f64),
    Popped,
    /// Survived and hit the target multiplier, which cashed out.
    AutoCashedOut(CashOut),
}

/// Multiplier and payout of an automatic cash-out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashOut {
    pub multiplier: f64,
    pub payout: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct Flight {
    bet: f64,
    pumps: u32,
    multiplier: f64,
}

#[derive(Clone, Debug)]
pub struct BalloonGame {
    config: BalloonConfig,
    wallet: Wallet,
    rng: GameRng,
    bet: f64,
    target: Option<f64>,
    active: Option<Flight>,
    rounds: RoundHistory<RoundRecord>,
}

impl BalloonGame {
    pub fn new(config: BalloonConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.starting_balance),
            rng: GameRng::new(seed).for_context(GameKind::Balloons.id()),
            bet: 10.0,
            target: None,
            active: None,
            rounds: RoundHistory::new(config.history_len),
            config,
        })
    }

    #[must_use]
    pub fn difficulty(&self) -> BalloonDifficulty {
        self.config.difficulty
    }

    /// Change difficulty between rounds.
    pub fn set_difficulty(&mut self, difficulty: BalloonDifficulty) -> Result<()> {
        self.ensure_idle()?;
        self.config.difficulty = difficulty;
        Ok(())
    }

    #[must_use]
    pub fn bet_amount(&self) -> f64 {
        self.bet
    }

    /// Set the stake for the next round; clamped up to the minimum bet.
    pub fn set_bet(&mut self, amount: f64) -> Result<()> {
        self.ensure_idle()?;
        if !amount.is_finite() {
            return Err(ArcadeError::InvalidAmount(amount));
        }
        self.bet = amount.max(self.config.min_bet);
        Ok(())
    }

    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Choose an auto cash-out target between rounds.
    ///
    /// Also rescales the stake to `min(max(10, floor(bet × target / 2)), balance)`.
    pub fn select_target(&mut self, target: f64) -> Result<()> {
        self.ensure_idle()?;
        if !target.is_finite() || target < 1.0 {
            return Err(ArcadeError::InvalidAmount(target));
        }
        self.target = Some(target);
        let adjusted = (self.bet * (target / 2.0)).floor().max(10.0);
        self.bet = adjusted.min(self.wallet.balance());
        tracing::debug!(target, bet = self.bet, "balloon target selected");
        Ok(())
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn pumps(&self) -> u32 {
        self.active.map_or(0, |f| f.pumps)
    }

    /// Current multiplier; 1.0 outside a round.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.active.map_or(1.0, |f| f.multiplier)
    }

    /// Chance that the next pump pops the balloon.
    #[must_use]
    pub fn current_pop_chance(&self) -> f64 {
        pop_chance(&self.config.difficulty.risk(), self.pumps())
    }

    /// Debit the stake and inflate a fresh balloon.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.wallet.debit(self.bet, self.config.min_bet)?;
        self.active = Some(Flight {
            bet: self.bet,
            pumps: 0,
            multiplier: 1.0,
        });
        tracing::debug!(bet = self.bet, difficulty = ?self.config.difficulty, "balloon round started");
        Ok(())
    }

    pub fn pump(&mut self) -> Result<PumpOutcome> {
        let flight = self.active.ok_or(ArcadeError::NoActiveBet)?;
        let risk = self.config.difficulty.risk();
        let chance = pop_chance(&risk, flight.pumps);

        if self.rng.gen_bool(chance) {
            self.active = None;
            self.target = None;
            let record = RoundRecord::new(
                GameKind::Balloons,
                format!("{} pumps", flight.pumps),
                Settlement::loss(flight.bet, flight.multiplier),
            );
            settle(&mut self.wallet, &mut self.rounds, record);
            tracing::debug!(pumps = flight.pumps, chance, "balloon popped");
            return Ok(PumpOutcome::Popped);
        }

        let pumps = flight.pumps + 1;
        let multiplier = pump_multiplier(pumps).min(risk.max_multiplier);
        self.active = Some(Flight { pumps, multiplier, ..flight });
        tracing::debug!(pumps, multiplier, next_chance = pop_chance(&risk, pumps), "balloon pumped");

        match self.target {
            Some(target) if multiplier >= target => {
                let record = self.cash_out()?;
                Ok(PumpOutcome::AutoCashedOut(CashOut {
                    multiplier: record.settlement.multiplier,
                    payout: record.settlement.payout,
                }))
            }
            _ => Ok(PumpOutcome::Inflated(multiplier)),
        }
    }

    /// Take the current multiplier.
    pub fn cash_out(&mut self) -> Result<RoundRecord> {
        let flight = self.active.take().ok_or(ArcadeError::NoActiveBet)?;
        self.target = None;
        let record = RoundRecord::new(
            GameKind::Balloons,
            format!("{} pumps", flight.pumps),
            Settlement::win(flight.bet, flight.multiplier),
        );
        Ok(settle(&mut self.wallet, &mut self.rounds, record))
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.active.is_some() {
            Err(ArcadeError::WrongPhase("in progress"))
        } else {
            Ok(())
        }
    }
}

impl BettingGame for BalloonGame {
    fn kind(&self) -> GameKind {
        GameKind::Balloons
    }

    fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    fn rounds(&self) -> &RoundHistory<RoundRecord> {
        &self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Outcome;

    fn game(difficulty: BalloonDifficulty, seed: u64) -> BalloonGame {
        BalloonGame::new(BalloonConfig::default().with_difficulty(difficulty), seed).unwrap()
    }

    #[test]
    fn test_multiplier_curve() {
        assert_eq!(pump_multiplier(0), 1.0);
        assert!((pump_multiplier(1) - 1.17).abs() < 1e-9);
        assert!((pump_multiplier(5) - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_pop_chance_escalates() {
        let risk = BalloonDifficulty::Hard.risk();
        assert!((pop_chance(&risk, 0) - 0.05).abs() < 1e-9);
        assert!((pop_chance(&risk, 3) - 0.29).abs() < 1e-9);
        assert_eq!(pop_chance(&risk, 100), 1.0);
    }

    #[test]
    fn test_start_debits_bet() {
        let mut game = game(BalloonDifficulty::Easy, 1);
        game.start().unwrap();
        assert_eq!(game.balance(), 990.0);
        assert!(game.is_active());
        assert!(matches!(game.start(), Err(ArcadeError::WrongPhase(_))));
    }

    #[test]
    fn test_pump_until_pop_or_cash_out() {
        let mut game = game(BalloonDifficulty::Hard, 42);
        game.start().unwrap();

        let mut last = 1.0;
        loop {
            match game.pump().unwrap() {
                PumpOutcome::Inflated(m) => {
                    assert!(m > last);
                    last = m;
                    if game.pumps() >= 3 {
                        let record = game.cash_out().unwrap();
                        assert_eq!(record.outcome(), Outcome::Win);
                        assert!((record.settlement.payout - 10.0 * last).abs() < 1e-9);
                        break;
                    }
                }
                PumpOutcome::Popped => {
                    assert_eq!(game.rounds().latest().unwrap().outcome(), Outcome::Loss);
                    break;
                }
                PumpOutcome::AutoCashedOut(_) => unreachable!("no target set"),
            }
        }
        assert!(!game.is_active());
    }

    #[test]
    fn test_balloon_always_pops_eventually() {
        let mut game = game(BalloonDifficulty::Hard, 9);
        game.start().unwrap();
        let mut pumps = 0;
        while let Ok(PumpOutcome::Inflated(_)) = game.pump() {
            pumps += 1;
            assert!(pumps < 20, "pop chance reaches 1.0 within 12 pumps on hard");
        }
        assert!(game.multiplier() <= BalloonDifficulty::Hard.risk().max_multiplier);
    }

    #[test]
    fn test_multiplier_capped() {
        let mut game = BalloonGame::new(BalloonConfig::default().with_difficulty(BalloonDifficulty::Easy), 3).unwrap();
        let cap = BalloonDifficulty::Easy.risk().max_multiplier;
        for _ in 0..200 {
            if !game.is_active() {
                if game.start().is_err() {
                    break;
                }
            }
            if let PumpOutcome::Inflated(m) = game.pump().unwrap() {
                assert!(m <= cap);
            }
        }
    }

    #[test]
    fn test_select_target_adjusts_bet() {
        let mut game = game(BalloonDifficulty::Medium, 1);
        game.set_bet(40.0).unwrap();
        game.select_target(3.36).unwrap();
        assert_eq!(game.bet_amount(), 67.0);

        game.set_bet(5.0).unwrap();
        game.select_target(1.23).unwrap();
        assert_eq!(game.bet_amount(), 10.0);
    }

    #[test]
    fn test_auto_cash_out() {
        let mut game = game(BalloonDifficulty::Easy, 5);
        game.select_target(1.1).unwrap();
        game.start().unwrap();
        match game.pump().unwrap() {
            PumpOutcome::AutoCashedOut(summary) => {
                assert!(summary.multiplier >= 1.1);
                assert!(!game.is_active());
                assert!(game.target().is_none());
            }
            PumpOutcome::Popped => assert!(!game.is_active()),
            PumpOutcome::Inflated(_) => panic!("first pump reaches 1.17 which exceeds 1.1"),
        }
    }

    #[test]
    fn test_cash_out_without_round() {
        let mut game = game(BalloonDifficulty::Easy, 5);
        assert_eq!(game.cash_out().unwrap_err(), ArcadeError::NoActiveBet);
        assert_eq!(game.pump().unwrap_err(), ArcadeError::NoActiveBet);
    }

    #[test]
    fn test_history_bounded_to_ten() {
        let mut game = game(BalloonDifficulty::Easy, 12);
        for _ in 0..15 {
            game.start().unwrap();
            game.cash_out().unwrap();
        }
        assert_eq!(game.rounds().len(), 10);
        // Cashing out at 1.0x returns the stake
        assert_eq!(game.balance(), 1000.0);
    }
}

//! Plinko: a ball drops through a triangle of pegs into a multiplier slot.
//!
//! The drop is an approximate physics walk over a 100-wide board whose peg
//! area is 80 high:
//!
//! - `rows * 3 + 10` steps, each moving the ball down by roughly
//!   `80 / steps` with up to 20% jitter
//! - every third step, a ball within 2.5 of the nearest peg in its row is
//!   knocked left or right at random
//! - horizontal velocity decays by 0.92 per step, plus a small jitter
//! - the triangle's edges reflect the ball with 0.7 damping
//!
//! The landing slot is the ball's relative position across the last row.
//! Winnings are `floor(bet × multiplier)`.

use serde::{Deserialize, Serialize};

use crate::core::config::{GameKind, PlinkoConfig, PlinkoRisk};
use crate::core::error::Result;
use crate::core::history::RoundHistory;
use crate::core::rng::GameRng;
use crate::core::wallet::Wallet;
use crate::rules::{settle, BettingGame, RoundRecord, Settlement};

const BOARD_CENTER: f64 = 50.0;
const PEG_AREA_HEIGHT: f64 = 80.0;
const PEG_GAP: f64 = 6.0;
const HIT_RADIUS: f64 = 2.5;
const AIR_RESISTANCE: f64 = 0.92;
const WALL_DAMPING: f64 = 0.7;

/// Where a simulated ball ended up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallPath {
    pub final_x: f64,
    pub peg_hits: u32,
    pub slot: usize,
}

/// Width of the peg triangle at `row` (rows past the last are allowed).
fn triangle_width(row: f64) -> f64 {
    (row + 3.0) * PEG_GAP
}

/// Simulate one ball and return the slot it lands in.
pub fn simulate_drop(rows: usize, slot_count: usize, rng: &mut GameRng) -> BallPath {
    let rows_f = rows as f64;
    let steps = rows * 3 + 10;
    let step_height = PEG_AREA_HEIGHT / steps as f64;

    let mut x = BOARD_CENTER;
    let mut y = 0.0;
    let mut velocity = 0.0;
    let mut peg_hits = 0;

    for step in 0..steps {
        let row = ((y / PEG_AREA_HEIGHT) * rows_f).floor();
        let width = triangle_width(row);
        let left = BOARD_CENTER - width / 2.0;
        let right = BOARD_CENTER + width / 2.0;

        if row < rows_f && step % 3 == 0 {
            let spacing = width / (row + 3.0);
            let peg_index = ((x - left) / spacing).round();
            let peg_x = left + peg_index * spacing;

            if (x - peg_x).abs() < HIT_RADIUS && peg_index >= 0.0 && peg_index <= row + 2.0 {
                peg_hits += 1;
                let direction = rng.sign();
                velocity += direction * (1.5 + rng.unit() * 2.0);
                x += direction * (0.8 + rng.unit() * 1.2);
            }
        }

        velocity *= AIR_RESISTANCE;
        x += velocity + (rng.unit() - 0.5) * 0.3;
        y += step_height * (1.0 + rng.unit() * 0.2);

        if x < left {
            x = left + 1.0;
            velocity = velocity.abs() * WALL_DAMPING;
        }
        if x > right {
            x = right - 1.0;
            velocity = -velocity.abs() * WALL_DAMPING;
        }
    }

    let final_width = (rows_f + 2.0) * PEG_GAP;
    let final_left = BOARD_CENTER - final_width / 2.0;
    let relative = (x - final_left) / final_width;
    let raw_slot = (relative * slot_count as f64).floor();
    let slot = raw_slot.clamp(0.0, slot_count.saturating_sub(1) as f64) as usize;

    BallPath {
        final_x: x,
        peg_hits,
        slot,
    }
}

/// A settled drop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlinkoDrop {
    pub path: BallPath,
    pub multiplier: f64,
    pub winnings: f64,
}

#[derive(Clone, Debug)]
pub struct PlinkoGame {
    config: PlinkoConfig,
    wallet: Wallet,
    rng: GameRng,
    rounds: RoundHistory<RoundRecord>,
}

impl PlinkoGame {
    pub fn new(config: PlinkoConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.starting_balance),
            rng: GameRng::new(seed).for_context(GameKind::Plinko.id()),
            rounds: RoundHistory::new(config.history_len),
            config,
        })
    }

    #[must_use]
    pub fn risk(&self) -> PlinkoRisk {
        self.config.risk
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Slot multipliers for the current risk level.
    #[must_use]
    pub fn multipliers(&self) -> &'static [f64] {
        self.config.risk.multipliers()
    }

    pub fn set_risk(&mut self, risk: PlinkoRisk) {
        self.config.risk = risk;
    }

    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        let candidate = self.config.clone().with_rows(rows);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Stake `amount`, drop a ball and credit the winnings.
    pub fn drop_ball(&mut self, amount: f64) -> Result<PlinkoDrop> {
        self.wallet.debit(amount, self.config.min_bet)?;

        let multipliers = self.multipliers();
        let path = simulate_drop(self.config.rows, multipliers.len(), &mut self.rng);
        let multiplier = multipliers[path.slot];
        let winnings = (amount * multiplier).floor();

        tracing::debug!(slot = path.slot, peg_hits = path.peg_hits, multiplier, "plinko ball landed");
        let settlement = Settlement {
            stake: amount,
            multiplier,
            payout: winnings,
        };
        let record = RoundRecord::new(GameKind::Plinko, format!("slot {}", path.slot), settlement);
        settle(&mut self.wallet, &mut self.rounds, record);

        Ok(PlinkoDrop {
            path,
            multiplier,
            winnings,
        })
    }
}

impl BettingGame for PlinkoGame {
    fn kind(&self) -> GameKind {
        GameKind::Plinko
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
    use crate::core::error::ArcadeError;

    #[test]
    fn test_slot_in_range() {
        let mut rng = GameRng::new(1);
        for rows in [8, 12, 16] {
            for risk in [PlinkoRisk::Low, PlinkoRisk::Medium, PlinkoRisk::High] {
                let slots = risk.multipliers().len();
                for _ in 0..200 {
                    let path = simulate_drop(rows, slots, &mut rng);
                    assert!(path.slot < slots);
                }
            }
        }
    }

    #[test]
    fn test_peg_hits_only_on_peg_steps() {
        let mut rng = GameRng::new(2);
        for rows in [8usize, 16] {
            let peg_steps = (rows * 3 + 10).div_ceil(3) as u32;
            for _ in 0..100 {
                assert!(simulate_drop(rows, 11, &mut rng).peg_hits <= peg_steps);
            }
        }
    }

    #[test]
    fn test_drop_is_deterministic() {
        let mut a = GameRng::new(99);
        let mut b = GameRng::new(99);
        for _ in 0..20 {
            assert_eq!(simulate_drop(16, 17, &mut a), simulate_drop(16, 17, &mut b));
        }
    }

    #[test]
    fn test_winnings_floor() {
        let mut game = PlinkoGame::new(PlinkoConfig::default(), 5).unwrap();
        let result = game.drop_ball(10.0).unwrap();
        assert_eq!(result.winnings, (10.0 * result.multiplier).floor());
        assert_eq!(game.balance(), 990.0 + result.winnings);
        assert_eq!(game.rounds().len(), 1);
    }

    #[test]
    fn test_bet_guards() {
        let mut game = PlinkoGame::new(PlinkoConfig::default(), 5).unwrap();
        assert!(matches!(game.drop_ball(0.5), Err(ArcadeError::BetBelowMinimum { .. })));
        assert!(matches!(game.drop_ball(1001.0), Err(ArcadeError::InsufficientBalance { .. })));
        assert_eq!(game.balance(), 1000.0);
    }

    #[test]
    fn test_set_rows_validates() {
        let mut game = PlinkoGame::new(PlinkoConfig::default(), 5).unwrap();
        assert!(game.set_rows(4).is_err());
        assert_eq!(game.rows(), 16);
        game.set_rows(10).unwrap();
        assert_eq!(game.rows(), 10);
    }

    #[test]
    fn test_center_slots_dominate() {
        // The walk is roughly symmetric, so the middle slots should be hit
        // far more often than the outermost ones.
        let mut rng = GameRng::new(3);
        let slots = PlinkoRisk::High.multipliers().len();
        let mut counts = vec![0u32; slots];
        for _ in 0..2000 {
            counts[simulate_drop(16, slots, &mut rng).slot] += 1;
        }
        let middle: u32 = counts[slots / 2 - 2..=slots / 2 + 2].iter().sum();
        let edges = counts[0] + counts[slots - 1];
        assert!(middle > edges);
    }
}

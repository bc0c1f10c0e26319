//! Cock fight: bet on red, blue or a tie.
//!
//! A round is a betting countdown, then `fight_ticks` ticks of fight
//! (the display multiplier climbs `1 + 0.1 × progress`), then the winner is
//! drawn: red 45%, blue 45%, tie 10% by default. A matching bet pays
//! `bet × odds`.

use serde::{Deserialize, Serialize};

use crate::core::config::{CockFightConfig, GameKind};
use crate::core::error::{ArcadeError, Result};
use crate::core::history::RoundHistory;
use crate::core::rng::GameRng;
use crate::core::ticker::{Accumulator, Countdown, Tick};
use crate::core::wallet::Wallet;
use crate::rules::{settle, BettingGame, RoundRecord, Settlement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
    Tie,
}

impl Side {
    /// One-letter code used by the results strip.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Side::Red => 'R',
            Side::Blue => 'B',
            Side::Tie => 'T',
        }
    }

    #[must_use]
    pub const fn from_code(code: char) -> Option<Side> {
        match code {
            'R' => Some(Side::Red),
            'B' => Some(Side::Blue),
            'T' => Some(Side::Tie),
            _ => None,
        }
    }

    #[must_use]
    pub fn odds(self, config: &CockFightConfig) -> f64 {
        match self {
            Side::Red => config.red_odds,
            Side::Blue => config.blue_odds,
            Side::Tie => config.tie_odds,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Red => "red",
            Side::Blue => "blue",
            Side::Tie => "tie",
        })
    }
}

/// Draw the winner of a fight.
pub fn draw_winner(config: &CockFightConfig, rng: &mut GameRng) -> Side {
    let weights = [config.red_chance, config.blue_chance, config.tie_chance()];
    match rng.choose_weighted(&weights) {
        Some(0) => Side::Red,
        Some(1) => Side::Blue,
        _ => Side::Tie,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightPhase {
    Betting,
    Fighting,
    Result(Side),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FightEvent {
    Counting(u32),
    FightStarted,
    /// Fight display multiplier.
    Fighting(f64),
    Decided(Side),
    Idle,
}

#[derive(Clone, Debug)]
pub struct CockFightGame {
    config: CockFightConfig,
    wallet: Wallet,
    rng: GameRng,
    phase: FightPhase,
    countdown: Countdown,
    progress: Option<Accumulator>,
    bet: Option<(Side, f64)>,
    results: RoundHistory<Side>,
    rounds: RoundHistory<RoundRecord>,
}

impl CockFightGame {
    pub fn new(config: CockFightConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.starting_balance),
            rng: GameRng::new(seed).for_context(GameKind::CockFight.id()),
            phase: FightPhase::Betting,
            countdown: Countdown::new(config.countdown_secs),
            progress: None,
            bet: None,
            results: RoundHistory::with_entries(
                config.history_len,
                config.seed_results.chars().filter_map(Side::from_code),
            ),
            rounds: RoundHistory::new(config.history_len),
            config,
        })
    }

    #[must_use]
    pub fn phase(&self) -> FightPhase {
        self.phase
    }

    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Fight display multiplier, 1.0 outside a fight.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.progress
            .as_ref()
            .map_or(1.0, |p| 1.0 + p.value() * 0.1)
    }

    /// Past winners, newest first.
    #[must_use]
    pub fn results(&self) -> &RoundHistory<Side> {
        &self.results
    }

    /// Results strip as a string, e.g. `"RBT"`.
    #[must_use]
    pub fn results_strip(&self) -> String {
        self.results.iter().map(|s| s.code()).collect()
    }

    pub fn place_bet(&mut self, side: Side, amount: f64) -> Result<()> {
        if self.phase != FightPhase::Betting {
            return Err(ArcadeError::WrongPhase("fighting"));
        }
        if self.bet.is_some() {
            return Err(ArcadeError::AlreadyBet);
        }
        self.wallet.debit(amount, self.config.min_bet)?;
        self.bet = Some((side, amount));
        tracing::debug!(side = %side, amount, "fight bet placed");
        Ok(())
    }

    /// Advance the betting countdown by one second.
    pub fn tick_second(&mut self) -> FightEvent {
        if self.phase != FightPhase::Betting {
            return FightEvent::Idle;
        }
        if self.countdown.is_expired() || self.countdown.tick() {
            self.start_fight();
            FightEvent::FightStarted
        } else {
            FightEvent::Counting(self.countdown.remaining())
        }
    }

    /// Advance the fight by one progress step.
    pub fn tick(&mut self) -> FightEvent {
        if self.phase != FightPhase::Fighting {
            return FightEvent::Idle;
        }
        let Some(progress) = self.progress.as_mut() else {
            return FightEvent::Idle;
        };
        match progress.tick() {
            Tick::Running(p) => FightEvent::Fighting(1.0 + p * 0.1),
            Tick::Reached(_) => FightEvent::Decided(self.decide()),
            Tick::Idle => FightEvent::Idle,
        }
    }

    /// Run the whole fight without ticking.
    pub fn fight(&mut self) -> Result<Side> {
        if self.phase == FightPhase::Betting {
            self.start_fight();
        }
        loop {
            match self.tick() {
                FightEvent::Decided(side) => return Ok(side),
                FightEvent::Idle => return Err(ArcadeError::WrongPhase("decided")),
                _ => {}
            }
        }
    }

    /// Open betting for the next fight.
    pub fn next_round(&mut self) -> Result<()> {
        if !matches!(self.phase, FightPhase::Result(_)) {
            return Err(ArcadeError::WrongPhase("not decided"));
        }
        self.phase = FightPhase::Betting;
        self.countdown = Countdown::new(self.config.countdown_secs);
        self.progress = None;
        Ok(())
    }

    fn start_fight(&mut self) {
        self.phase = FightPhase::Fighting;
        self.progress = Some(Accumulator::new(0.0, 1.0, f64::from(self.config.fight_ticks)));
    }

    fn decide(&mut self) -> Side {
        let winner = draw_winner(&self.config, &mut self.rng);
        self.phase = FightPhase::Result(winner);
        self.results.push(winner);

        if let Some((side, amount)) = self.bet.take() {
            let settlement = if side == winner {
                Settlement::win(amount, side.odds(&self.config))
            } else {
                Settlement::loss(amount, 0.0)
            };
            let record = RoundRecord::new(GameKind::CockFight, side.to_string(), settlement);
            settle(&mut self.wallet, &mut self.rounds, record);
        }
        tracing::debug!(winner = %winner, "fight decided");
        winner
    }
}

impl BettingGame for CockFightGame {
    fn kind(&self) -> GameKind {
        GameKind::CockFight
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

    #[test]
    fn test_draw_distribution() {
        let config = CockFightConfig::default();
        let mut rng = GameRng::new(1);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match draw_winner(&config, &mut rng) {
                Side::Red => counts[0] += 1,
                Side::Blue => counts[1] += 1,
                Side::Tie => counts[2] += 1,
            }
        }
        assert!((4200..4800).contains(&counts[0]));
        assert!((4200..4800).contains(&counts[1]));
        assert!((800..1200).contains(&counts[2]));
    }

    #[test]
    fn test_round_flow() {
        let mut game = CockFightGame::new(CockFightConfig::default(), 4).unwrap();
        game.place_bet(Side::Red, 100.0).unwrap();
        assert_eq!(game.balance(), 900.0);

        for _ in 0..19 {
            assert!(matches!(game.tick_second(), FightEvent::Counting(_)));
        }
        assert_eq!(game.tick_second(), FightEvent::FightStarted);
        assert!(matches!(game.place_bet(Side::Blue, 1.0), Err(ArcadeError::WrongPhase(_))));

        let mut ticks = 0;
        let winner = loop {
            ticks += 1;
            match game.tick() {
                FightEvent::Fighting(m) => assert!(m > 1.0 && m < 4.0),
                FightEvent::Decided(side) => break side,
                other => panic!("unexpected {other:?}"),
            }
        };
        assert_eq!(ticks, 30);

        let record = game.rounds().latest().unwrap();
        if winner == Side::Red {
            assert_eq!(record.outcome(), Outcome::Win);
            assert!((game.balance() - 1095.0).abs() < 1e-9);
        } else {
            assert_eq!(record.outcome(), Outcome::Loss);
            assert_eq!(game.balance(), 900.0);
        }
        assert_eq!(game.results_strip().chars().next(), Some(winner.code()));
    }

    #[test]
    fn test_tie_pays_eight() {
        let config = CockFightConfig {
            red_chance: 0.0,
            blue_chance: 0.0,
            ..CockFightConfig::default()
        };
        let mut game = CockFightGame::new(config, 4).unwrap();
        game.place_bet(Side::Tie, 10.0).unwrap();
        assert_eq!(game.fight().unwrap(), Side::Tie);
        assert_eq!(game.balance(), 1070.0);
    }

    #[test]
    fn test_next_round_requires_result() {
        let mut game = CockFightGame::new(CockFightConfig::default(), 4).unwrap();
        assert!(game.next_round().is_err());
        game.fight().unwrap();
        game.next_round().unwrap();
        assert_eq!(game.phase(), FightPhase::Betting);
        assert_eq!(game.countdown(), 20);
        assert_eq!(game.multiplier(), 1.0);
    }

    #[test]
    fn test_results_strip_starts_seeded() {
        let mut game = CockFightGame::new(CockFightConfig::default(), 2).unwrap();
        assert_eq!(game.results_strip(), "RBRTBRBR");
        assert!(game.rounds().is_empty());

        let winner = game.fight().unwrap();
        let strip = game.results_strip();
        assert_eq!(strip.len(), 8);
        assert_eq!(strip.chars().next(), Some(winner.code()));
        assert_eq!(&strip[1..], "RBRTBRB");
    }

    #[test]
    fn test_results_strip_bounded() {
        let mut game = CockFightGame::new(CockFightConfig::default(), 6).unwrap();
        for _ in 0..12 {
            game.fight().unwrap();
            game.next_round().unwrap();
        }
        assert_eq!(game.results_strip().len(), 8);
    }
}

//! Crash games: Aviator, Jet-X and Pushpa.
//!
//! A round runs in three phases:
//!
//! 1. `Waiting`: a betting countdown (`tick_second`). Bets go into one of
//!    two independent slots.
//! 2. `Flying`: the multiplier climbs by `step` per `tick` from 1.00 until
//!    the pre-sampled crash point. Either slot may cash out at the current
//!    multiplier.
//! 3. `Crashed` / `FlewAway`: bets still riding are lost, the crash point
//!    is pushed onto the history and `next_round` reopens betting.
//!
//! The crash point is drawn once at take-off from the tiered distribution
//! in `CrashConfig` and clamped to its cap, so neither the crash point nor
//! the displayed multiplier ever exceeds the cap.

use serde::{Deserialize, Serialize};

use crate::core::config::{CrashConfig, GameKind};
use crate::core::error::{ArcadeError, Result};
use crate::core::history::RoundHistory;
use crate::core::rng::GameRng;
use crate::core::ticker::{Accumulator, Countdown, Tick};
use crate::core::wallet::Wallet;
use crate::rules::{settle, BettingGame, RoundRecord, Settlement};

/// Rounds kept in the per-bet record list.
const ROUND_RECORDS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashPhase {
    Waiting,
    Flying,
    Crashed,
    FlewAway,
}

impl CrashPhase {
    fn name(self) -> &'static str {
        match self {
            CrashPhase::Waiting => "waiting",
            CrashPhase::Flying => "flying",
            CrashPhase::Crashed => "crashed",
            CrashPhase::FlewAway => "flew away",
        }
    }
}

/// One of the two side-by-side bet panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetSlot {
    First,
    Second,
}

impl BetSlot {
    const fn index(self) -> usize {
        match self {
            BetSlot::First => 0,
            BetSlot::Second => 1,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            BetSlot::First => "slot 1",
            BetSlot::Second => "slot 2",
        }
    }
}

/// A sampled crash point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrashPoint {
    pub value: f64,
    /// The plane leaves the screen instead of crashing. Bets still lose.
    pub fly_away: bool,
}

/// Draw a crash point from `config`'s tiers.
pub fn sample_crash_point(config: &CrashConfig, rng: &mut GameRng) -> CrashPoint {
    let selector = rng.unit();
    let (tier, fly_away) = if selector > config.fly_away_above {
        (config.fly_away, true)
    } else {
        let tier = config
            .tiers
            .iter()
            .find(|t| selector < t.upto)
            .or_else(|| config.tiers.last())
            .copied()
            .unwrap_or(config.fly_away);
        (tier, false)
    };
    let value = (tier.low + rng.unit() * tier.span).min(config.cap);
    CrashPoint { value, fly_away }
}

/// Round a multiplier to two decimals, as displayed.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotBet {
    pub amount: f64,
    pub cashed_out: bool,
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CrashEvent {
    /// Betting countdown still running, seconds left.
    Counting(u32),
    TookOff,
    Climbing(f64),
    /// Round ended at this (rounded) multiplier.
    Ended { multiplier: f64, fly_away: bool },
    /// Nothing to advance in the current phase.
    Idle,
}

/// A crash game table with its own wallet.
#[derive(Clone, Debug)]
pub struct CrashGame {
    config: CrashConfig,
    wallet: Wallet,
    rng: GameRng,
    phase: CrashPhase,
    countdown: Countdown,
    flight: Option<Accumulator>,
    crash: Option<CrashPoint>,
    slots: [Option<SlotBet>; 2],
    crash_history: RoundHistory<f64>,
    rounds: RoundHistory<RoundRecord>,
}

impl CrashGame {
    pub fn new(config: CrashConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.starting_balance),
            rng: GameRng::new(seed).for_context(config.kind.id()),
            phase: CrashPhase::Waiting,
            countdown: Countdown::new(config.countdown_secs),
            flight: None,
            crash: None,
            slots: [None, None],
            crash_history: RoundHistory::with_entries(config.history_len, config.seed_history.iter().copied()),
            rounds: RoundHistory::new(ROUND_RECORDS),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &CrashConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> CrashPhase {
        self.phase
    }

    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Current multiplier, 1.00 before take-off.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.flight
            .as_ref()
            .map_or(1.0, |f| f.value().min(self.config.cap))
    }

    /// The crash point of the current round, once sampled.
    #[must_use]
    pub fn crash_point(&self) -> Option<CrashPoint> {
        self.crash
    }

    /// Past crash points, newest first.
    #[must_use]
    pub fn crash_history(&self) -> &RoundHistory<f64> {
        &self.crash_history
    }

    #[must_use]
    pub fn bet(&self, slot: BetSlot) -> Option<SlotBet> {
        self.slots[slot.index()]
    }

    /// Place a bet in `slot`. Only allowed while waiting for take-off.
    pub fn place_bet(&mut self, slot: BetSlot, amount: f64) -> Result<()> {
        if self.phase != CrashPhase::Waiting {
            return Err(ArcadeError::WrongPhase(self.phase.name()));
        }
        if self.slots[slot.index()].is_some() {
            return Err(ArcadeError::AlreadyBet);
        }
        self.wallet.debit(amount, self.config.min_bet)?;
        self.slots[slot.index()] = Some(SlotBet { amount, cashed_out: false });
        tracing::debug!(game = %self.config.kind, slot = slot.label(), amount, "bet placed");
        Ok(())
    }

    /// Cash out `slot` at the current multiplier.
    pub fn cash_out(&mut self, slot: BetSlot) -> Result<RoundRecord> {
        if self.phase != CrashPhase::Flying {
            return Err(ArcadeError::WrongPhase(self.phase.name()));
        }
        let bet = match self.slots[slot.index()] {
            Some(bet) if !bet.cashed_out => bet,
            _ => return Err(ArcadeError::NoActiveBet),
        };
        self.slots[slot.index()] = Some(SlotBet { cashed_out: true, ..bet });

        let settlement = Settlement::win(bet.amount, self.multiplier());
        let record = RoundRecord::new(self.config.kind, slot.label(), settlement);
        Ok(settle(&mut self.wallet, &mut self.rounds, record))
    }

    /// Advance the betting countdown by one second.
    pub fn tick_second(&mut self) -> CrashEvent {
        if self.phase != CrashPhase::Waiting {
            return CrashEvent::Idle;
        }
        if self.countdown.is_expired() || self.countdown.tick() {
            self.take_off();
            CrashEvent::TookOff
        } else {
            CrashEvent::Counting(self.countdown.remaining())
        }
    }

    /// Skip the rest of the countdown and take off now.
    pub fn launch(&mut self) -> Result<()> {
        if self.phase != CrashPhase::Waiting {
            return Err(ArcadeError::WrongPhase(self.phase.name()));
        }
        self.take_off();
        Ok(())
    }

    /// Advance the flight by one multiplier step.
    pub fn tick(&mut self) -> CrashEvent {
        if self.phase != CrashPhase::Flying {
            return CrashEvent::Idle;
        }
        let Some(flight) = self.flight.as_mut() else {
            return CrashEvent::Idle;
        };
        match flight.tick() {
            Tick::Running(value) => CrashEvent::Climbing(value.min(self.config.cap)),
            Tick::Reached(value) => self.end_round(value),
            Tick::Idle => CrashEvent::Idle,
        }
    }

    /// Reopen betting after a round has ended.
    pub fn next_round(&mut self) -> Result<()> {
        match self.phase {
            CrashPhase::Crashed | CrashPhase::FlewAway => {
                self.phase = CrashPhase::Waiting;
                self.countdown = Countdown::new(self.config.countdown_secs);
                self.flight = None;
                self.crash = None;
                self.slots = [None, None];
                Ok(())
            }
            phase => Err(ArcadeError::WrongPhase(phase.name())),
        }
    }

    /// Bet on slot 1, fly, and cash out once `target` is reached.
    ///
    /// Runs a whole round from `Waiting` and leaves the game ready for the
    /// next one. Returns the settled record for the bet.
    pub fn play_round(&mut self, amount: f64, target: Option<f64>) -> Result<RoundRecord> {
        self.place_bet(BetSlot::First, amount)?;
        self.launch()?;

        let mut record = None;
        loop {
            if let Some(target) = target {
                if record.is_none() && self.multiplier() >= target {
                    record = Some(self.cash_out(BetSlot::First)?);
                }
            }
            if let CrashEvent::Ended { .. } | CrashEvent::Idle = self.tick() {
                break;
            }
        }

        let record = match record {
            Some(record) => record,
            None => self
                .rounds
                .latest()
                .cloned()
                .ok_or(ArcadeError::NoActiveBet)?,
        };
        self.next_round()?;
        Ok(record)
    }

    fn take_off(&mut self) {
        let crash = sample_crash_point(&self.config, &mut self.rng);
        tracing::debug!(game = %self.config.kind, crash_point = crash.value, "flight started");
        self.flight = Some(Accumulator::new(1.0, self.config.step, crash.value));
        self.crash = Some(crash);
        self.phase = CrashPhase::Flying;
    }

    fn end_round(&mut self, value: f64) -> CrashEvent {
        let fly_away = self.crash.is_some_and(|c| c.fly_away);
        let multiplier = round2(value.min(self.config.cap));
        self.phase = if fly_away { CrashPhase::FlewAway } else { CrashPhase::Crashed };
        self.crash_history.push(multiplier);

        for slot in [BetSlot::First, BetSlot::Second] {
            if let Some(bet) = self.slots[slot.index()] {
                if !bet.cashed_out {
                    let record = RoundRecord::new(
                        self.config.kind,
                        slot.label(),
                        Settlement::loss(bet.amount, multiplier),
                    );
                    settle(&mut self.wallet, &mut self.rounds, record);
                }
            }
        }

        tracing::debug!(game = %self.config.kind, multiplier, fly_away, "round ended");
        CrashEvent::Ended { multiplier, fly_away }
    }
}

impl BettingGame for CrashGame {
    fn kind(&self) -> GameKind {
        self.config.kind
    }

    fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    fn rounds(&self) -> &RoundHistory<RoundRecord> {
        &self.rounds
    }
}

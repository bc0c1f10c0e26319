//! Color prediction: bet on the next digit or its color.
//!
//! Each period draws a digit `0..=9`. Digits carry one or two colors:
//!
//! | digit        | colors        |
//! |--------------|---------------|
//! | 0            | red + violet  |
//! | 5            | green + violet|
//! | 1, 3, 7, 9   | green         |
//! | 2, 4, 6, 8   | red           |
//!
//! A number pick pays 9x on an exact match, green/red pay 2x when the
//! drawn digit carries that color, violet pays 4.5x.

use serde::{Deserialize, Serialize};

use crate::core::config::{ColorConfig, GameKind};
use crate::core::error::{ArcadeError, Result};
use crate::core::history::RoundHistory;
use crate::core::rng::GameRng;
use crate::core::ticker::Countdown;
use crate::core::wallet::Wallet;
use crate::rules::{settle, BettingGame, RoundRecord, Settlement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Violet,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Violet => "violet",
        })
    }
}

/// Colors carried by a digit, primary color first.
#[must_use]
pub fn digit_colors(digit: u8) -> &'static [Color] {
    match digit {
        0 => &[Color::Red, Color::Violet],
        5 => &[Color::Green, Color::Violet],
        1 | 3 | 7 | 9 => &[Color::Green],
        2 | 4 | 6 | 8 => &[Color::Red],
        _ => &[Color::Violet],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pick {
    Number(u8),
    Color(Color),
}

impl std::fmt::Display for Pick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pick::Number(n) => write!(f, "{n}"),
            Pick::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Payout multiplier for `pick` against `digit`; `None` on a loss.
#[must_use]
pub fn payout_multiplier(config: &ColorConfig, pick: Pick, digit: u8) -> Option<f64> {
    match pick {
        Pick::Number(n) => (n == digit).then_some(config.number_payout),
        Pick::Color(color) => digit_colors(digit).contains(&color).then_some(match color {
            Color::Violet => config.violet_payout,
            Color::Green | Color::Red => config.color_payout,
        }),
    }
}

/// The result of one period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    pub period: u64,
    pub digit: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct PendingBet {
    pick: Pick,
    amount: f64,
}

#[derive(Clone, Debug)]
pub struct ColorPredictionGame {
    config: ColorConfig,
    wallet: Wallet,
    rng: GameRng,
    period: u64,
    countdown: Countdown,
    pending: Option<PendingBet>,
    results: RoundHistory<PeriodResult>,
    rounds: RoundHistory<RoundRecord>,
}

impl ColorPredictionGame {
    pub fn new(config: ColorConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.starting_balance),
            rng: GameRng::new(seed).for_context(GameKind::ColorPrediction.id()),
            period: config.first_period,
            countdown: Countdown::new(config.countdown_secs),
            pending: None,
            results: RoundHistory::new(config.history_len),
            rounds: RoundHistory::new(config.history_len),
            config,
        })
    }

    /// The period currently open for betting.
    #[must_use]
    pub fn period(&self) -> u64 {
        self.period
    }

    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Past draws, newest first.
    #[must_use]
    pub fn results(&self) -> &RoundHistory<PeriodResult> {
        &self.results
    }

    #[must_use]
    pub fn pending_pick(&self) -> Option<Pick> {
        self.pending.map(|p| p.pick)
    }

    /// Bet on the current period. One bet per period.
    pub fn place_bet(&mut self, pick: Pick, amount: f64) -> Result<()> {
        if let Pick::Number(n) = pick {
            if n > 9 {
                return Err(ArcadeError::InvalidSelection(format!("no digit {n} on the wheel")));
            }
        }
        if self.pending.is_some() {
            return Err(ArcadeError::AlreadyBet);
        }
        self.wallet.debit(amount, self.config.min_bet)?;
        self.pending = Some(PendingBet { pick, amount });
        tracing::debug!(period = self.period, pick = %pick, amount, "color bet placed");
        Ok(())
    }

    /// Advance the betting window by a second, drawing when it closes.
    pub fn tick_second(&mut self) -> Option<PeriodResult> {
        if self.countdown.tick() {
            Some(self.draw())
        } else {
            None
        }
    }

    /// Close the current period immediately and draw its result.
    pub fn draw(&mut self) -> PeriodResult {
        let digit = self.rng.gen_range_usize(0..10) as u8;
        let result = PeriodResult { period: self.period, digit };
        self.results.push(result);

        if let Some(bet) = self.pending.take() {
            let settlement = match payout_multiplier(&self.config, bet.pick, digit) {
                Some(multiplier) => Settlement::win(bet.amount, multiplier),
                None => Settlement::loss(bet.amount, 0.0),
            };
            let record = RoundRecord::new(GameKind::ColorPrediction, bet.pick.to_string(), settlement);
            settle(&mut self.wallet, &mut self.rounds, record);
        }

        tracing::debug!(period = self.period, digit, "color period drawn");
        self.period += 1;
        self.countdown = Countdown::new(self.config.countdown_secs);
        result
    }
}

impl BettingGame for ColorPredictionGame {
    fn kind(&self) -> GameKind {
        GameKind::ColorPrediction
    }

    fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    fn rounds(&self) -> &RoundHistory<RoundRecord> {
        &self.rounds
    }
}

//! Game configuration types.
//!
//! Every betting game is configured at construction by a plain struct:
//! - `CrashConfig`: crash-point tiers, tick step, cap (Aviator, Jet-X, Pushpa)
//! - `BalloonConfig`: difficulty table for the pump game
//! - `ColorConfig`, `CockFightConfig`, `PlinkoConfig`, `Match3Config`
//! - `ArcadeConfig`: all of the above, loadable from JSON
//!
//! Defaults reproduce the portal's constants. Missing JSON keys fall back
//! to those defaults.

use serde::{Deserialize, Serialize};

use super::error::{ArcadeError, Result};

/// Identifies a game in the catalog and in round records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Ludo,
    Aviator,
    ChickenRoad,
    ColorPrediction,
    Plinko,
    Mines,
    Balloons,
    CockFight,
    Dice,
    JetX,
    Pushpa,
    Puzzle,
    Platformer,
}

impl GameKind {
    /// URL-style identifier used by the catalog.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            GameKind::Ludo => "ludo",
            GameKind::Aviator => "aviator",
            GameKind::ChickenRoad => "chicken-road",
            GameKind::ColorPrediction => "color-prediction",
            GameKind::Plinko => "plinko",
            GameKind::Mines => "mines",
            GameKind::Balloons => "balloons",
            GameKind::CockFight => "cock-fight",
            GameKind::Dice => "dice",
            GameKind::JetX => "jet-x",
            GameKind::Pushpa => "pushpa",
            GameKind::Puzzle => "puzzle",
            GameKind::Platformer => "platformer",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ArcadeError::InvalidConfig(message()))
    }
}

// =============================================================================
// Crash games
// =============================================================================

/// A band of crash points: `low + U * span` for a uniform draw `U`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrashTier {
    /// Selector upper bound (exclusive) on the tier draw.
    pub upto: f64,
    pub low: f64,
    pub span: f64,
}

impl CrashTier {
    #[must_use]
    pub const fn new(upto: f64, low: f64, span: f64) -> Self {
        Self { upto, low, span }
    }
}

/// Crash-point distribution and round timing for a crash game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    pub kind: GameKind,
    pub starting_balance: f64,
    pub min_bet: f64,
    /// Seconds of betting before the flight starts.
    pub countdown_secs: u32,
    /// Multiplier increase per tick.
    pub step: f64,
    /// Hard ceiling on both crash point and displayed multiplier.
    pub cap: f64,
    /// Number of past crash points kept.
    pub history_len: usize,
    /// Draws above this value produce a fly-away round.
    pub fly_away_above: f64,
    pub fly_away: CrashTier,
    /// Ordered by `upto`; the last tier also catches any remainder.
    pub tiers: Vec<CrashTier>,
    /// Crash points shown before the first round, newest first.
    pub seed_history: Vec<f64>,
}

impl CrashConfig {
    /// The Aviator distribution.
    #[must_use]
    pub fn aviator() -> Self {
        Self {
            kind: GameKind::Aviator,
            starting_balance: 3000.0,
            min_bet: 0.01,
            countdown_secs: 5,
            step: 0.02,
            cap: 150.0,
            history_len: 22,
            fly_away_above: 0.9,
            fly_away: CrashTier::new(1.0, 50.0, 100.0),
            tiers: vec![
                CrashTier::new(0.6, 1.01, 1.5),
                CrashTier::new(0.85, 2.5, 5.0),
                CrashTier::new(0.9, 7.5, 42.5),
            ],
            seed_history: vec![
                7.20, 1.19, 1.76, 1.87, 3.54, 1.31, 3.76, 1.07, 1.01, 1.16, 1.19, 1.26, 1.51, 1.18, 1.20, 18.74,
                8.86, 3.49, 5.52, 2.59, 1.11, 17.1,
            ],
        }
    }

    /// Jet-X: the Aviator curve with multipliers topping out at 100x.
    #[must_use]
    pub fn jet_x() -> Self {
        Self {
            kind: GameKind::JetX,
            cap: 100.0,
            fly_away: CrashTier::new(1.0, 50.0, 50.0),
            ..Self::aviator()
        }
    }

    /// Pushpa: more short rounds, rarer long hauls.
    #[must_use]
    pub fn pushpa() -> Self {
        Self {
            kind: GameKind::Pushpa,
            starting_balance: 1000.0,
            cap: 100.0,
            fly_away_above: 0.95,
            fly_away: CrashTier::new(1.0, 30.0, 70.0),
            tiers: vec![
                CrashTier::new(0.5, 1.01, 1.0),
                CrashTier::new(0.8, 2.0, 4.0),
                CrashTier::new(0.95, 6.0, 24.0),
            ],
            ..Self::aviator()
        }
    }

    /// Set the cap, dropping seeded crash points above it.
    #[must_use]
    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = cap;
        self.seed_history.retain(|m| *m <= cap);
        self
    }

    #[must_use]
    pub fn with_starting_balance(mut self, balance: f64) -> Self {
        self.starting_balance = balance;
        self
    }

    #[must_use]
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_secs = seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check(!self.tiers.is_empty(), || "crash config needs at least one tier".into())?;
        check(self.step > 0.0, || format!("crash step must be positive, got {}", self.step))?;
        check(self.cap > 1.0, || format!("crash cap must exceed 1.0, got {}", self.cap))?;
        check(self.min_bet > 0.0, || "crash min_bet must be positive".into())?;
        check(
            self.tiers.windows(2).all(|w| w[0].upto <= w[1].upto),
            || "crash tiers must be ordered by upto".into(),
        )?;
        check(
            self.tiers.iter().chain([&self.fly_away]).all(|t| t.low >= 1.0 && t.span >= 0.0),
            || "crash tiers must start at 1.0 or above".into(),
        )?;
        check(
            self.seed_history.iter().all(|m| (1.0..=self.cap).contains(m)),
            || format!("seeded crash points must lie in [1.0, {}]", self.cap),
        )
    }
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self::aviator()
    }
}

// =============================================================================
// Balloons
// =============================================================================

/// Balloon pump difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalloonDifficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

/// Pop-risk parameters for one difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopRisk {
    pub base_pop_chance: f64,
    pub pop_increase: f64,
    pub max_multiplier: f64,
}

impl BalloonDifficulty {
    #[must_use]
    pub const fn risk(self) -> PopRisk {
        match self {
            BalloonDifficulty::Easy => PopRisk { base_pop_chance: 0.02, pop_increase: 0.03, max_multiplier: 5.0 },
            BalloonDifficulty::Medium => PopRisk { base_pop_chance: 0.03, pop_increase: 0.05, max_multiplier: 10.0 },
            BalloonDifficulty::Hard => PopRisk { base_pop_chance: 0.05, pop_increase: 0.08, max_multiplier: 20.0 },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub starting_balance: f64,
    pub min_bet: f64,
    pub difficulty: BalloonDifficulty,
    pub history_len: usize,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000.0,
            min_bet: 1.0,
            difficulty: BalloonDifficulty::Hard,
            history_len: 10,
        }
    }
}

impl BalloonConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: BalloonDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_starting_balance(mut self, balance: f64) -> Self {
        self.starting_balance = balance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check(self.min_bet > 0.0, || "balloon min_bet must be positive".into())
    }
}

// =============================================================================
// Color prediction
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub starting_balance: f64,
    pub min_bet: f64,
    pub countdown_secs: u32,
    pub first_period: u64,
    pub number_payout: f64,
    pub color_payout: f64,
    pub violet_payout: f64,
    pub history_len: usize,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            starting_balance: 2000.0,
            min_bet: 1.0,
            countdown_secs: 6,
            first_period: 312_089,
            number_payout: 9.0,
            color_payout: 2.0,
            violet_payout: 4.5,
            history_len: 10,
        }
    }
}

impl ColorConfig {
    pub fn validate(&self) -> Result<()> {
        check(self.countdown_secs > 0, || "color countdown must be positive".into())?;
        check(self.min_bet > 0.0, || "color min_bet must be positive".into())
    }
}

// =============================================================================
// Cock fight
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CockFightConfig {
    pub starting_balance: f64,
    pub min_bet: f64,
    pub countdown_secs: u32,
    /// Ticks of fight animation before the winner is drawn.
    pub fight_ticks: u32,
    pub red_odds: f64,
    pub blue_odds: f64,
    pub tie_odds: f64,
    pub red_chance: f64,
    pub blue_chance: f64,
    pub history_len: usize,
    /// Results strip shown before the first fight, newest first, as
    /// `R`/`B`/`T` codes.
    pub seed_results: String,
}

impl Default for CockFightConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000.0,
            min_bet: 1.0,
            countdown_secs: 20,
            fight_ticks: 30,
            red_odds: 1.95,
            blue_odds: 1.95,
            tie_odds: 8.0,
            red_chance: 0.45,
            blue_chance: 0.45,
            history_len: 8,
            seed_results: "RBRTBRBR".into(),
        }
    }
}

impl CockFightConfig {
    /// Probability of a tie: whatever red and blue leave over.
    #[must_use]
    pub fn tie_chance(&self) -> f64 {
        (1.0 - self.red_chance - self.blue_chance).max(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        check(
            self.red_chance >= 0.0 && self.blue_chance >= 0.0 && self.red_chance + self.blue_chance <= 1.0,
            || "fight chances must be non-negative and sum to at most 1".into(),
        )?;
        check(self.fight_ticks > 0, || "fight_ticks must be positive".into())?;
        check(self.seed_results.chars().all(|c| matches!(c, 'R' | 'B' | 'T')), || {
            format!("seed_results may only hold R, B or T, got {:?}", self.seed_results)
        })
    }
}

// =============================================================================
// Plinko
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlinkoRisk {
    Low,
    #[default]
    Medium,
    High,
}

impl PlinkoRisk {
    /// Slot multipliers, left to right.
    #[must_use]
    pub const fn multipliers(self) -> &'static [f64] {
        match self {
            PlinkoRisk::Low => &[1.5, 1.2, 1.1, 1.0, 0.5, 1.0, 1.1, 1.2, 1.5],
            PlinkoRisk::Medium => &[5.6, 2.1, 1.1, 1.0, 0.5, 0.3, 0.5, 1.0, 1.1, 2.1, 5.6],
            PlinkoRisk::High => &[
                110.0, 41.0, 10.0, 5.0, 3.0, 1.5, 1.0, 0.5, 0.3, 0.5, 1.0, 1.5, 3.0, 5.0, 10.0, 41.0, 110.0,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlinkoConfig {
    pub starting_balance: f64,
    pub min_bet: f64,
    pub rows: usize,
    pub risk: PlinkoRisk,
    pub history_len: usize,
}

impl Default for PlinkoConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000.0,
            min_bet: 1.0,
            rows: 16,
            risk: PlinkoRisk::Medium,
            history_len: 10,
        }
    }
}

impl PlinkoConfig {
    pub const MIN_ROWS: usize = 8;
    pub const MAX_ROWS: usize = 16;

    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_risk(mut self, risk: PlinkoRisk) -> Self {
        self.risk = risk;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check((Self::MIN_ROWS..=Self::MAX_ROWS).contains(&self.rows), || {
            format!("plinko rows must be {}-{}, got {}", Self::MIN_ROWS, Self::MAX_ROWS, self.rows)
        })?;
        check(self.min_bet > 0.0, || "plinko min_bet must be positive".into())
    }
}

// =============================================================================
// Match-3
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Match3Config {
    pub size: usize,
    pub moves: u32,
    pub target_score: u32,
    pub points_per_gem: u32,
}

impl Default for Match3Config {
    fn default() -> Self {
        Self {
            size: 8,
            moves: 30,
            target_score: 1000,
            points_per_gem: 10,
        }
    }
}

impl Match3Config {
    pub const MAX_SIZE: usize = 32;
    pub const MAX_MOVES: u32 = 10_000;
    pub const MAX_POINTS_PER_GEM: u32 = 10_000;

    pub fn validate(&self) -> Result<()> {
        check((3..=Self::MAX_SIZE).contains(&self.size), || {
            format!("match-3 board must be 3x3 to {0}x{0}, got {1}", Self::MAX_SIZE, self.size)
        })?;
        check(self.moves <= Self::MAX_MOVES, || {
            format!("match-3 moves must be at most {}, got {}", Self::MAX_MOVES, self.moves)
        })?;
        check(self.points_per_gem <= Self::MAX_POINTS_PER_GEM, || {
            format!(
                "match-3 points_per_gem must be at most {}, got {}",
                Self::MAX_POINTS_PER_GEM,
                self.points_per_gem
            )
        })
    }
}

// =============================================================================
// Everything together
// =============================================================================

/// Configuration for every betting and puzzle game at once.
///
/// A crash section given only in part is completed from the Aviator
/// profile, so a partial `jet_x` should restate `kind` and `cap`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub aviator: CrashConfig,
    pub jet_x: CrashConfig,
    pub pushpa: CrashConfig,
    pub balloons: BalloonConfig,
    pub color_prediction: ColorConfig,
    pub cock_fight: CockFightConfig,
    pub plinko: PlinkoConfig,
    pub match3: Match3Config,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            aviator: CrashConfig::aviator(),
            jet_x: CrashConfig::jet_x(),
            pushpa: CrashConfig::pushpa(),
            balloons: BalloonConfig::default(),
            color_prediction: ColorConfig::default(),
            cock_fight: CockFightConfig::default(),
            plinko: PlinkoConfig::default(),
            match3: Match3Config::default(),
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.aviator.validate()?;
        self.jet_x.validate()?;
        self.pushpa.validate()?;
        self.balloons.validate()?;
        self.color_prediction.validate()?;
        self.cock_fight.validate()?;
        self.plinko.validate()?;
        self.match3.validate()
    }
}

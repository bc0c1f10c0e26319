//! Side-scrolling coin collector on a fixed 800x400 stage.
//!
//! One [`Platformer::step`] is one 16 ms frame: the player moves by its
//! vertical velocity, then gravity adds 0.8. Platforms are one-way; the
//! player lands only when falling onto or through a platform's top edge,
//! and a player resting on a platform stays grounded from frame to frame.

use serde::{Deserialize, Serialize};

use crate::core::error::{ArcadeError, Result};
use crate::core::rng::GameRng;

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 400.0;
pub const PLAYER_SIZE: f64 = 30.0;
pub const GRAVITY: f64 = 0.8;
pub const JUMP_VELOCITY: f64 = -15.0;
pub const MOVE_STEP: f64 = 10.0;
/// Rightmost x the player can walk to.
pub const MAX_X: f64 = 750.0;
pub const COIN_VALUE: u32 = 100;
const COIN_REACH: f64 = 30.0;
const SPAWN: (f64, f64) = (50.0, 300.0);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Platform {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub x: f64,
    pub y: f64,
    pub collected: bool,
}

impl Coin {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, collected: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
}

/// Highest rise of a standing jump, in pixels.
#[must_use]
pub fn max_jump_height() -> f64 {
    let mut velocity = JUMP_VELOCITY;
    let mut rise = 0.0;
    while velocity < 0.0 {
        rise -= velocity;
        velocity += GRAVITY;
    }
    rise
}

impl Level {
    /// The hand-built stage: ground, four ledges, four coins.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            platforms: vec![
                Platform::new(0.0, 350.0, 800.0, 20.0),
                Platform::new(200.0, 280.0, 100.0, 20.0),
                Platform::new(400.0, 220.0, 100.0, 20.0),
                Platform::new(600.0, 160.0, 100.0, 20.0),
                Platform::new(300.0, 100.0, 200.0, 20.0),
            ],
            coins: vec![
                Coin::new(250.0, 250.0),
                Coin::new(450.0, 190.0),
                Coin::new(650.0, 130.0),
                Coin::new(400.0, 70.0),
            ],
        }
    }

    /// A staircase of up to `ledges` platforms above the ground, each one a
    /// jump higher than the last, with a coin over every ledge.
    ///
    /// Stops early when the next ledge would leave the top of the stage.
    pub fn generate(ledges: usize, rng: &mut GameRng) -> Self {
        let mut platforms = vec![Platform::new(0.0, 350.0, WORLD_WIDTH, 20.0)];
        let mut coins = Vec::with_capacity(ledges);

        let mut y = 350.0;
        let mut x = SPAWN.0;
        let mut heading = 1.0;

        for _ in 0..ledges {
            let rise = rng.gen_range_f64(50.0, 70.0).round();
            if y - rise < 60.0 {
                break;
            }
            y -= rise;

            let width = rng.gen_range_f64(80.0, 160.0).round();
            let shift = rng.gen_range_f64(100.0, 200.0).round();
            let mut next_x = x + heading * shift;
            if next_x < 0.0 || next_x + width > WORLD_WIDTH {
                heading = -heading;
                next_x = x + heading * shift;
            }
            x = next_x.clamp(0.0, WORLD_WIDTH - width);

            platforms.push(Platform::new(x, y, width, 20.0));
            coins.push(Coin::new(x + width / 2.0, y - PLAYER_SIZE));
        }

        tracing::debug!(ledges = coins.len(), "level generated");
        Self { platforms, coins }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub on_ground: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: SPAWN.0,
            y: SPAWN.1,
            velocity_y: 0.0,
            on_ground: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    #[default]
    Waiting,
    Playing,
    Won,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Platformer {
    level: Level,
    coins: Vec<Coin>,
    player: Player,
    score: u32,
    status: StageStatus,
}

impl Platformer {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            coins: level.coins.clone(),
            level,
            player: Player::default(),
            score: 0,
            status: StageStatus::Waiting,
        }
    }

    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.level.platforms
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> StageStatus {
        self.status
    }

    /// Put the player back at the spawn point with every coin restored.
    pub fn start(&mut self) {
        self.player = Player::default();
        self.coins = self.level.coins.clone();
        self.score = 0;
        self.status = StageStatus::Playing;
    }

    fn ensure_playing(&self) -> Result<()> {
        match self.status {
            StageStatus::Playing => Ok(()),
            StageStatus::Waiting => Err(ArcadeError::WrongPhase("waiting")),
            StageStatus::Won | StageStatus::GameOver => Err(ArcadeError::GameOver),
        }
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self) -> Result<bool> {
        self.ensure_playing()?;
        if !self.player.on_ground {
            return Ok(false);
        }
        self.player.velocity_y = JUMP_VELOCITY;
        self.player.on_ground = false;
        Ok(true)
    }

    pub fn move_left(&mut self) -> Result<()> {
        self.ensure_playing()?;
        self.player.x = (self.player.x - MOVE_STEP).max(0.0);
        Ok(())
    }

    pub fn move_right(&mut self) -> Result<()> {
        self.ensure_playing()?;
        self.player.x = (self.player.x + MOVE_STEP).min(MAX_X);
        Ok(())
    }

    /// Advance one frame. Does nothing unless the stage is being played.
    pub fn step(&mut self) -> StageStatus {
        if self.status != StageStatus::Playing {
            return self.status;
        }

        let prev = self.player;
        let mut y = prev.y + prev.velocity_y;
        let mut velocity_y = prev.velocity_y + GRAVITY;
        let mut on_ground = false;

        let landing = self.level.platforms.iter().find(|p| {
            prev.x + PLAYER_SIZE > p.x
                && prev.x < p.x + p.width
                && y + PLAYER_SIZE >= p.y
                && prev.y + PLAYER_SIZE <= p.y
                && prev.velocity_y >= 0.0
        });
        if let Some(platform) = landing {
            y = platform.y - PLAYER_SIZE;
            velocity_y = 0.0;
            on_ground = true;
        }

        self.player = Player {
            y,
            velocity_y,
            on_ground,
            ..prev
        };

        if y > WORLD_HEIGHT {
            self.status = StageStatus::GameOver;
            tracing::debug!(score = self.score, "fell off the stage");
            return self.status;
        }

        let player = self.player;
        for coin in self.coins.iter_mut().filter(|c| !c.collected) {
            if (player.x - coin.x).abs() < COIN_REACH && (player.y - coin.y).abs() < COIN_REACH {
                coin.collected = true;
                self.score += COIN_VALUE;
            }
        }

        // A level without coins has nothing to win.
        if !self.coins.is_empty() && self.coins.iter().all(|c| c.collected) {
            self.status = StageStatus::Won;
            tracing::debug!(score = self.score, "all coins collected");
        }
        self.status
    }
}

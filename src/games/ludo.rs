//! Ludo table: the 15x15 board layout and dice-driven turn rotation.
//!
//! Pieces do not move; a turn is one die roll, after which play passes to
//! the next seat. Seat 0 is the human player and plays red.
//!
//! ```text
//!   Green home | path | Yellow home
//!   -----------+------+------------
//!        path  |center|  path
//!   -----------+------+------------
//!   Red home   | path | Blue home
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::{ArcadeError, Result};
use crate::core::grid::{Grid, Pos};
use crate::core::rng::GameRng;
use crate::core::seat::{SeatId, SeatMap};

pub const BOARD_SIZE: usize = 15;
pub const SEATS: usize = 4;
/// Throwaway values shown while the die is rolling.
pub const ROLL_FRAMES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LudoColor {
    Green,
    Yellow,
    Red,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    /// Colored outer ring of a home quadrant.
    Home(LudoColor),
    /// White inner yard of a home quadrant.
    Yard(LudoColor),
    /// One of the four starting spots inside a yard.
    PieceSpot(LudoColor),
    /// A colored triangle around the center.
    Triangle(LudoColor),
    Center,
    /// Colored entry square marked with a star.
    Start(LudoColor),
    /// Colored lane leading to the center.
    HomeRun(LudoColor),
    /// White square marked with a star.
    Star,
    Path,
}

fn home_square(color: LudoColor, row: usize, col: usize, rows: (usize, usize), cols: (usize, usize)) -> Square {
    let in_yard = (rows.0..=rows.0 + 3).contains(&row) && (cols.0..=cols.0 + 3).contains(&col);
    let on_spot = (rows.1..=rows.1 + 1).contains(&row) && (cols.1..=cols.1 + 1).contains(&col);
    match (in_yard, on_spot) {
        (true, true) => Square::PieceSpot(color),
        (true, false) => Square::Yard(color),
        _ => Square::Home(color),
    }
}

/// Classify one board square.
#[must_use]
pub fn classify(row: usize, col: usize) -> Square {
    use LudoColor::*;

    let band = |v: usize| (6..=8).contains(&v);
    match (row, col) {
        (r, c) if r < 6 && c < 6 => home_square(Green, r, c, (1, 2), (1, 2)),
        (r, c) if r < 6 && c > 8 => home_square(Yellow, r, c, (1, 2), (10, 11)),
        (r, c) if r > 8 && c < 6 => home_square(Red, r, c, (10, 11), (1, 2)),
        (r, c) if r > 8 && c > 8 => home_square(Blue, r, c, (10, 11), (10, 11)),

        (7, 7) => Square::Center,
        (6, 7) | (6, 8) => Square::Triangle(Yellow),
        (7, 8) | (8, 8) => Square::Triangle(Blue),
        (8, 7) | (8, 6) => Square::Triangle(Red),
        (r, c) if band(r) && band(c) => Square::Triangle(Green),

        (1, 8) => Square::Start(Yellow),
        (13, 6) => Square::Start(Red),
        (6, 1) => Square::Start(Green),
        (8, 13) => Square::Start(Blue),

        (r, 7) if (1..=5).contains(&r) => Square::HomeRun(Yellow),
        (r, 7) if (9..=13).contains(&r) => Square::HomeRun(Red),
        (7, c) if (1..=5).contains(&c) => Square::HomeRun(Green),
        (7, c) if (9..=13).contains(&c) => Square::HomeRun(Blue),

        (12, 8) | (2, 6) | (8, 2) | (6, 12) => Square::Star,
        _ => Square::Path,
    }
}

/// Perimeter squares marked as safe.
pub const SAFE_ZONES: [Pos; 12] = [
    Pos::new(0, 6),
    Pos::new(0, 8),
    Pos::new(2, 14),
    Pos::new(5, 14),
    Pos::new(8, 14),
    Pos::new(12, 14),
    Pos::new(14, 8),
    Pos::new(14, 6),
    Pos::new(12, 0),
    Pos::new(9, 0),
    Pos::new(6, 0),
    Pos::new(2, 0),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LudoBoard {
    squares: Grid<Square>,
}

impl Default for LudoBoard {
    fn default() -> Self {
        Self {
            squares: Grid::from_fn(BOARD_SIZE, BOARD_SIZE, |p| classify(p.row, p.col)),
        }
    }
}

impl LudoBoard {
    pub fn square(&self, pos: Pos) -> Result<Square> {
        self.squares.check(pos)?;
        Ok(self.squares[pos])
    }

    #[must_use]
    pub fn squares(&self) -> &Grid<Square> {
        &self.squares
    }

    /// Perimeter safe zones; these also carry their base classification.
    #[must_use]
    pub fn is_safe_zone(&self, pos: Pos) -> bool {
        SAFE_ZONES.contains(&pos)
    }

    /// The four starting spots of a color.
    pub fn piece_spots(&self, color: LudoColor) -> impl Iterator<Item = Pos> + '_ {
        self.squares
            .iter()
            .filter(move |(_, sq)| **sq == Square::PieceSpot(color))
            .map(|(pos, _)| pos)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub color: LudoColor,
}

/// One die roll, animation frames included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub seat: SeatId,
    pub frames: [u8; ROLL_FRAMES],
    pub value: u8,
}

#[derive(Clone, Debug)]
pub struct LudoGame {
    board: LudoBoard,
    seats: SeatMap<Seat>,
    rng: GameRng,
    started: bool,
    current: SeatId,
    last_roll: Option<DiceRoll>,
}

impl LudoGame {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        const COLORS: [LudoColor; SEATS] = [LudoColor::Red, LudoColor::Blue, LudoColor::Green, LudoColor::Yellow];
        Self {
            board: LudoBoard::default(),
            seats: SeatMap::new(SEATS, |seat| Seat {
                name: seat.to_string(),
                color: COLORS[seat.index()],
            }),
            rng: GameRng::new(seed).for_context("ludo"),
            started: false,
            current: SeatId::HUMAN,
            last_roll: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &LudoBoard {
        &self.board
    }

    #[must_use]
    pub fn seats(&self) -> &SeatMap<Seat> {
        &self.seats
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn current_seat(&self) -> SeatId {
        self.current
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<DiceRoll> {
        self.last_roll
    }

    pub fn start(&mut self) {
        self.started = true;
        self.current = SeatId::HUMAN;
        self.last_roll = None;
        tracing::debug!("ludo game started");
    }

    pub fn reset(&mut self) {
        self.started = false;
        self.current = SeatId::HUMAN;
        self.last_roll = None;
    }

    /// Roll for the current seat and pass the turn.
    pub fn roll(&mut self) -> Result<DiceRoll> {
        if !self.started {
            return Err(ArcadeError::WrongPhase("not started"));
        }
        let mut frames = [0; ROLL_FRAMES];
        for frame in &mut frames {
            *frame = self.rng.roll_die(6);
        }
        let roll = DiceRoll {
            seat: self.current,
            frames,
            value: self.rng.roll_die(6),
        };
        tracing::debug!(seat = %roll.seat, value = roll.value, "die rolled");

        self.current = self.current.next(self.seats.seat_count());
        self.last_roll = Some(roll);
        Ok(roll)
    }
}

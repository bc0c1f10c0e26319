//! Match-3 puzzle: swap adjacent gems to line up three or more.
//!
//! A swap only counts when it creates a match. Matched gems are cleared,
//! the gems above fall into the gaps, and new gems fill the top of each
//! column; this repeats until the board settles. Every cleared gem scores
//! `points_per_gem` per pass. A gem in both a horizontal and a vertical run
//! is cleared and scored once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::Match3Config;
use crate::core::error::{ArcadeError, Result};
use crate::core::grid::{Grid, Pos};
use crate::core::rng::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gem {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Gem {
    pub const ALL: [Gem; 6] = [Gem::Red, Gem::Blue, Gem::Green, Gem::Yellow, Gem::Purple, Gem::Orange];

    fn random(rng: &mut GameRng) -> Gem {
        rng.choose(&Gem::ALL).copied().unwrap_or(Gem::Red)
    }
}

/// Every cell that is part of a horizontal or vertical run of three or more,
/// in row-major order without duplicates.
#[must_use]
pub fn find_matches(board: &Grid<Gem>) -> Vec<Pos> {
    let mut matched = FxHashSet::default();
    let lines = board.rows().max(board.cols());

    for line in 0..lines {
        if line < board.rows() {
            let row: Vec<Pos> = (0..board.cols()).map(|c| Pos::new(line, c)).collect();
            collect_runs(board, &row, &mut matched);
        }
        if line < board.cols() {
            let col: Vec<Pos> = (0..board.rows()).map(|r| Pos::new(r, line)).collect();
            collect_runs(board, &col, &mut matched);
        }
    }

    let mut out: Vec<Pos> = matched.into_iter().collect();
    out.sort_unstable();
    out
}

fn collect_runs(board: &Grid<Gem>, line: &[Pos], matched: &mut FxHashSet<Pos>) {
    let mut start = 0;
    for i in 1..=line.len() {
        if i < line.len() && board[line[i]] == board[line[start]] {
            continue;
        }
        if i - start >= 3 {
            matched.extend(&line[start..i]);
        }
        start = i;
    }
}

/// Clear `matches`, let the remaining gems fall and refill each column from
/// the top.
pub fn collapse(board: &mut Grid<Gem>, matches: &[Pos], rng: &mut GameRng) {
    let cleared: FxHashSet<Pos> = matches.iter().copied().collect();
    let rows = board.rows();

    for col in 0..board.cols() {
        // Surviving gems, bottom first.
        let survivors: Vec<Gem> = (0..rows)
            .rev()
            .map(|row| Pos::new(row, col))
            .filter(|pos| !cleared.contains(pos))
            .map(|pos| board[pos])
            .collect();

        for (offset, row) in (0..rows).rev().enumerate() {
            board[Pos::new(row, col)] = match survivors.get(offset) {
                Some(gem) => *gem,
                None => Gem::random(rng),
            };
        }
    }
}

/// A fresh board with no matches on it.
pub fn generate_board(size: usize, rng: &mut GameRng) -> Grid<Gem> {
    let mut board = Grid::from_fn(size, size, |_| Gem::random(rng));
    loop {
        let matches = find_matches(&board);
        if matches.is_empty() {
            return board;
        }
        collapse(&mut board, &matches, rng);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap made no match and was undone; no move spent.
    NoMatch,
    Scored { points: u32, cascades: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Pos),
    Deselected,
    Swapped(SwapOutcome),
}

#[derive(Clone, Debug)]
pub struct Match3 {
    config: Match3Config,
    board: Grid<Gem>,
    rng: GameRng,
    score: u32,
    moves_left: u32,
    selected: Option<Pos>,
}

impl Match3 {
    pub fn new(config: Match3Config, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = GameRng::new(seed).for_context("match3");
        let board = generate_board(config.size, &mut rng);
        Ok(Self {
            moves_left: config.moves,
            board,
            rng,
            score: 0,
            selected: None,
            config,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Grid<Gem> {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.config.target_score
    }

    #[must_use]
    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Playing until the moves run out, then won or lost on the target.
    #[must_use]
    pub fn status(&self) -> PuzzleStatus {
        if self.moves_left > 0 {
            PuzzleStatus::Playing
        } else if self.score >= self.config.target_score {
            PuzzleStatus::Won
        } else {
            PuzzleStatus::Lost
        }
    }

    /// Swap two orthogonally adjacent gems.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome> {
        if self.moves_left == 0 {
            return Err(ArcadeError::GameOver);
        }
        self.board.check(a)?;
        self.board.check(b)?;
        if !a.is_adjacent(b) {
            return Err(ArcadeError::NotAdjacent);
        }

        self.board.swap(a, b)?;
        let mut matches = find_matches(&self.board);
        if matches.is_empty() {
            self.board.swap(a, b)?;
            return Ok(SwapOutcome::NoMatch);
        }

        self.moves_left -= 1;
        let mut points: u32 = 0;
        let mut cascades = 0;
        while !matches.is_empty() {
            let gems = u32::try_from(matches.len()).unwrap_or(u32::MAX);
            points = points.saturating_add(gems.saturating_mul(self.config.points_per_gem));
            cascades += 1;
            collapse(&mut self.board, &matches, &mut self.rng);
            matches = find_matches(&self.board);
        }
        self.score = self.score.saturating_add(points);

        tracing::debug!(%a, %b, points, cascades, moves_left = self.moves_left, "gems swapped");
        Ok(SwapOutcome::Scored { points, cascades })
    }

    /// Click-to-select: the first click selects a gem, clicking it again
    /// clears the selection, clicking a neighbor swaps, and clicking any
    /// other gem moves the selection there.
    pub fn click(&mut self, pos: Pos) -> Result<ClickOutcome> {
        if self.moves_left == 0 {
            return Err(ArcadeError::GameOver);
        }
        self.board.check(pos)?;

        match self.selected {
            Some(current) if current == pos => {
                self.selected = None;
                Ok(ClickOutcome::Deselected)
            }
            Some(current) if current.is_adjacent(pos) => {
                self.selected = None;
                self.swap(current, pos).map(ClickOutcome::Swapped)
            }
            _ => {
                self.selected = Some(pos);
                Ok(ClickOutcome::Selected(pos))
            }
        }
    }

    /// Start over on a new board.
    pub fn restart(&mut self) {
        self.board = generate_board(self.config.size, &mut self.rng);
        self.score = 0;
        self.moves_left = self.config.moves;
        self.selected = None;
    }
}

//! Minesweeper board: mine placement, neighbor counts, flood-fill reveal.
//!
//! Mines are placed when the board is created, so the first reveal can hit
//! one. Revealing a zero-count cell opens its whole zero region and the
//! numbered border around it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{ArcadeError, Result};
use crate::core::grid::{self, Grid, Pos};
use crate::core::rng::GameRng;

/// Built-in board sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinesPreset {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl MinesPreset {
    #[must_use]
    pub const fn layout(self) -> BoardLayout {
        match self {
            MinesPreset::Easy => BoardLayout { rows: 9, cols: 9, mines: 10 },
            MinesPreset::Medium => BoardLayout { rows: 16, cols: 16, mines: 40 },
            MinesPreset::Hard => BoardLayout { rows: 16, cols: 30, mines: 99 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl BoardLayout {
    /// A custom board; must have at least one safe cell.
    pub fn custom(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        let layout = Self { rows, cols, mines };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ArcadeError::InvalidConfig(format!(
                "board must not be empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        let cells = grid::area(self.rows, self.cols).ok_or_else(|| {
            ArcadeError::InvalidConfig(format!("{}x{} board is too large", self.rows, self.cols))
        })?;
        if self.mines >= cells {
            return Err(ArcadeError::InvalidConfig(format!(
                "{} mines do not fit on a {}x{} board",
                self.mines, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Cells without a mine; 0 for a layout that fails validation.
    #[must_use]
    pub fn safe_cells(&self) -> usize {
        grid::area(self.rows, self.cols).map_or(0, |cells| cells.saturating_sub(self.mines))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl BoardStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != BoardStatus::Playing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing happened: cell already open, flagged, or the game is over.
    Ignored,
    /// This many cells were opened.
    Opened(usize),
    Exploded,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Ignored,
    Flagged,
    Unflagged,
}

/// Place `layout.mines` mines uniformly and fill in neighbor counts.
pub fn generate_board(layout: BoardLayout, rng: &mut GameRng) -> Grid<Cell> {
    let mut board = Grid::new(layout.rows, layout.cols, Cell::default());
    let mut placed = 0;
    while placed < layout.mines {
        let pos = Pos::new(
            rng.gen_range_usize(0..layout.rows),
            rng.gen_range_usize(0..layout.cols),
        );
        if !board[pos].is_mine {
            board[pos].is_mine = true;
            placed += 1;
        }
    }

    let counts: Vec<(Pos, u8)> = board
        .positions()
        .map(|pos| (pos, mines_around(&board, pos)))
        .collect();
    for (pos, count) in counts {
        board[pos].neighbor_mines = count;
    }
    board
}

fn mines_around(board: &Grid<Cell>, pos: Pos) -> u8 {
    board
        .neighbors8(pos)
        .into_iter()
        .filter(|n| board[*n].is_mine)
        .count() as u8
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minesweeper {
    layout: BoardLayout,
    board: Grid<Cell>,
    status: BoardStatus,
    revealed: usize,
    flags: usize,
    started: bool,
    elapsed_secs: u32,
}

impl Minesweeper {
    pub fn new(layout: BoardLayout, rng: &mut GameRng) -> Result<Self> {
        layout.validate()?;
        Ok(Self::from_board(layout, generate_board(layout, rng)))
    }

    pub fn with_preset(preset: MinesPreset, rng: &mut GameRng) -> Result<Self> {
        Self::new(preset.layout(), rng)
    }

    fn from_board(layout: BoardLayout, board: Grid<Cell>) -> Self {
        Self {
            layout,
            board,
            status: BoardStatus::Playing,
            revealed: 0,
            flags: 0,
            started: false,
            elapsed_secs: 0,
        }
    }

    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    #[must_use]
    pub fn board(&self) -> &Grid<Cell> {
        &self.board
    }

    #[must_use]
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    #[must_use]
    pub fn flags(&self) -> usize {
        self.flags
    }

    /// Mines left by the flag count; negative when over-flagged.
    #[must_use]
    pub fn mines_left(&self) -> i64 {
        self.layout.mines as i64 - self.flags as i64
    }

    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Advance the game clock; it only runs between the first reveal and
    /// the end of the game.
    pub fn tick_second(&mut self) {
        if self.started && !self.status.is_over() {
            self.elapsed_secs += 1;
        }
    }

    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        self.board.check(pos)?;
        let cell = self.board[pos];
        if self.status.is_over() || cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::Ignored);
        }
        self.started = true;

        if cell.is_mine {
            self.board[pos].is_revealed = true;
            for cell in self.board.cells_mut() {
                if cell.is_mine {
                    cell.is_revealed = true;
                }
            }
            self.status = BoardStatus::Lost;
            tracing::debug!(%pos, "mine hit");
            return Ok(RevealOutcome::Exploded);
        }

        let opened = self.flood_reveal(pos);
        tracing::debug!(%pos, opened, "cells revealed");

        if self.revealed == self.layout.safe_cells() {
            self.status = BoardStatus::Won;
            tracing::debug!(elapsed = self.elapsed_secs, "board cleared");
            return Ok(RevealOutcome::Won);
        }
        Ok(RevealOutcome::Opened(opened))
    }

    fn flood_reveal(&mut self, start: Pos) -> usize {
        let mut visited = FxHashSet::default();
        let mut to_visit = VecDeque::from([start]);
        let mut opened = 0;

        while let Some(pos) = to_visit.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            let cell = self.board[pos];
            if cell.is_revealed || cell.is_flagged || cell.is_mine {
                continue;
            }
            self.board[pos].is_revealed = true;
            self.revealed += 1;
            opened += 1;
            tracing::trace!(%pos, count = cell.neighbor_mines, "flood opened cell");

            if cell.neighbor_mines == 0 {
                to_visit.extend(
                    self.board
                        .neighbors8(pos)
                        .into_iter()
                        .filter(|n| !visited.contains(n)),
                );
            }
        }
        opened
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        self.board.check(pos)?;
        if self.status.is_over() || self.board[pos].is_revealed {
            return Ok(FlagOutcome::Ignored);
        }
        let cell = &mut self.board[pos];
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flags += 1;
            Ok(FlagOutcome::Flagged)
        } else {
            self.flags -= 1;
            Ok(FlagOutcome::Unflagged)
        }
    }

    /// Deal a fresh board with the same layout.
    pub fn restart(&mut self, rng: &mut GameRng) {
        *self = Self::from_board(self.layout, generate_board(self.layout, rng));
    }

    /// Serialize the whole game, board and clock included.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a game from [`Minesweeper::to_bytes`] output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let game: Self = bincode::deserialize(bytes)?;
        game.check_consistency()?;
        Ok(game)
    }

    fn check_consistency(&self) -> Result<()> {
        self.layout.validate()?;
        let corrupt = |what: &str| Err(ArcadeError::Snapshot(format!("inconsistent board: {what}")));

        if self.board.rows() != self.layout.rows
            || self.board.cols() != self.layout.cols
            || !self.board.is_well_formed()
        {
            return corrupt("dimensions");
        }
        let mines = self.board.iter().filter(|(_, c)| c.is_mine).count();
        if mines != self.layout.mines {
            return corrupt("mine count");
        }
        let open_safe = self
            .board
            .iter()
            .filter(|(_, c)| c.is_revealed && !c.is_mine)
            .count();
        if open_safe != self.revealed {
            return corrupt("revealed count");
        }
        let flags = self.board.iter().filter(|(_, c)| c.is_flagged).count();
        if flags != self.flags {
            return corrupt("flag count");
        }
        if self
            .board
            .iter()
            .any(|(pos, c)| c.neighbor_mines != mines_around(&self.board, pos))
        {
            return corrupt("neighbor counts");
        }

        let exploded = self.board.iter().any(|(_, c)| c.is_mine && c.is_revealed);
        let expected = if exploded {
            BoardStatus::Lost
        } else if self.revealed == self.layout.safe_cells() {
            BoardStatus::Won
        } else {
            BoardStatus::Playing
        };
        if expected != self.status {
            return corrupt("status");
        }
        Ok(())
    }
}

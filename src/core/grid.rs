//! Fixed-size 2-D grid shared by the board games.
//!
//! Row-major storage; positions are `(row, col)` with `(0, 0)` top-left.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{ArcadeError, Result};

/// A cell position on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonally adjacent (no diagonals).
    #[must_use]
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cell count of a `rows x cols` grid, or `None` on overflow.
#[must_use]
pub fn area(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

/// Neighbor list; a cell has at most eight.
pub type Neighbors = SmallVec<[Pos; 8]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// Callers validate the dimensions first; `rows * cols` must fit in
    /// `usize`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid by calling `f` for every position in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Pos) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Pos::new(row, col)));
            }
        }
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell storage matches the dimensions. Always true for
    /// grids built here; a decoded grid may not be.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        area(self.rows, self.cols) == Some(self.cells.len())
    }

    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Validate a position, returning it unchanged when in bounds.
    pub fn check(&self, pos: Pos) -> Result<Pos> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(ArcadeError::InvalidPosition { row: pos.row, col: pos.col })
        }
    }

    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            self.cells.get(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        if self.contains(pos) {
            self.cells.get_mut(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Swap two cells. Both positions must be in bounds.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<()> {
        let a = self.check(a)?;
        let b = self.check(b)?;
        self.cells.swap(a.row * self.cols + a.col, b.row * self.cols + b.col);
        Ok(())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.cells.len()).map(move |i| Pos::new(i / cols, i % cols))
    }

    /// Iterate `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new(i / cols, i % cols), cell))
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// The up-to-eight surrounding positions (minesweeper neighborhood).
    #[must_use]
    pub fn neighbors8(&self, pos: Pos) -> Neighbors {
        let mut out = Neighbors::new();
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = self.offset(pos, dr, dc) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// The up-to-four orthogonal neighbors.
    #[must_use]
    pub fn neighbors4(&self, pos: Pos) -> Neighbors {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(pos, dr, dc))
            .collect()
    }

    fn offset(&self, pos: Pos, dr: i64, dc: i64) -> Option<Pos> {
        let row = pos.row as i64 + dr;
        let col = pos.col as i64 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let n = Pos::new(row as usize, col as usize);
        self.contains(n).then_some(n)
    }
}

impl<T> std::ops::Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos.row * self.cols + pos.col]
    }
}

impl<T> std::ops::IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        &mut self.cells[pos.row * self.cols + pos.col]
    }
}

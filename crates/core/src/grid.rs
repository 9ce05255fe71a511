//! Grid module - cell storage, index math and the active-cell set
//!
//! Cells are a flat row-major `Vec<u8>` (0 = dead, 1 = alive) of length
//! `columns * rows`. Rows `[0, boundary_rows)` belong to the boundary region
//! and are never evolved.
//!
//! The grid keeps one invariant at all times: `cells[i] == 1` exactly when
//! `i` is in the active set. Every mutation goes through methods that update
//! both sides together.

use arrayvec::ArrayVec;

use crate::active::ActiveSet;
use crate::error::GridError;
use crate::rng::RandomSource;
use crate::types::RANDOM_FILL_THRESHOLD;

/// Moore neighbourhood offsets as `(dx, dy)`.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Life grid with its active-cell index.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u32,
    rows: u32,
    boundary_rows: u32,
    cells: Vec<u8>,
    active: ActiveSet,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(columns: u32, rows: u32, boundary_rows: u32) -> Self {
        let len = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            boundary_rows,
            cells: vec![0; len],
            active: ActiveSet::new(len),
        }
    }

    /// Adopt an existing cell buffer and its active-cell list.
    ///
    /// The buffer is taken by value; no copy is made. Every listed index is
    /// forced alive, non-zero values are normalised to 1, and the result must
    /// satisfy the active-set invariant: a live cell missing from
    /// `active_cells` is an error.
    pub fn from_parts(
        mut cells: Vec<u8>,
        active_cells: &[u32],
        columns: u32,
        rows: u32,
        boundary_rows: u32,
    ) -> Result<Self, GridError> {
        let expected = columns as usize * rows as usize;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }

        let mut active = ActiveSet::new(expected);
        for &index in active_cells {
            if index as usize >= expected {
                return Err(GridError::IndexOutOfRange {
                    index,
                    len: expected,
                });
            }
            active.insert(index);
            cells[index as usize] = 1;
        }

        let mut live = 0usize;
        for cell in cells.iter_mut() {
            if *cell != 0 {
                *cell = 1;
                live += 1;
            }
        }
        if live != active.len() {
            return Err(GridError::ActiveSetMismatch {
                live,
                listed: active.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            boundary_rows,
            cells,
            active,
        })
    }

    /// Grid with the given `(col, row)` cells alive. Out-of-range cells are ignored.
    pub fn with_live_cells(
        columns: u32,
        rows: u32,
        boundary_rows: u32,
        live: &[(u32, u32)],
    ) -> Self {
        let mut grid = Self::new(columns, rows, boundary_rows);
        for &(col, row) in live {
            if grid.is_valid_cell(col as i64, row as i64) {
                let index = grid.index(col, row);
                grid.set_alive(index);
            }
        }
        grid
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn boundary_rows(&self) -> u32 {
        self.boundary_rows
    }

    /// Number of cells (`columns * rows`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    pub fn live_count(&self) -> usize {
        self.active.len()
    }

    /// Flattened index of `(col, row)`.
    #[inline(always)]
    pub fn index(&self, col: u32, row: u32) -> u32 {
        col + row * self.columns
    }

    /// Inverse of [`Grid::index`].
    #[inline(always)]
    pub fn coords(&self, index: u32) -> (u32, u32) {
        (index % self.columns, index / self.columns)
    }

    /// Whether `(col, row)` lies inside the grid (boundary rows included).
    #[inline(always)]
    pub fn is_valid_cell(&self, col: i64, row: i64) -> bool {
        col >= 0 && col < self.columns as i64 && row >= 0 && row < self.rows as i64
    }

    /// Whether `row` is part of the evolving region (at or below the boundary).
    #[inline(always)]
    pub fn is_live_row(&self, row: u32) -> bool {
        row >= self.boundary_rows && row < self.rows
    }

    /// Stored value at `index` (0 when out of range).
    #[inline]
    pub fn get(&self, index: u32) -> u8 {
        self.cells.get(index as usize).copied().unwrap_or(0)
    }

    pub fn is_alive(&self, col: u32, row: u32) -> bool {
        self.is_valid_cell(col as i64, row as i64) && self.get(self.index(col, row)) == 1
    }

    /// In-bounds neighbours of `index` that lie at or below the boundary.
    pub fn live_region_neighbors(&self, index: u32) -> ArrayVec<u32, 8> {
        let (col, row) = self.coords(index);
        let mut out = ArrayVec::new();
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let c = col as i64 + dx;
            let r = row as i64 + dy;
            if self.is_valid_cell(c, r) && r >= self.boundary_rows as i64 {
                out.push(self.index(c as u32, r as u32));
            }
        }
        out
    }

    /// Flip the cell at `index`, keeping the active set in step.
    ///
    /// Returns false (and changes nothing) when `index` is out of range.
    pub fn toggle(&mut self, index: u32) -> bool {
        let Some(cell) = self.cells.get_mut(index as usize) else {
            return false;
        };
        if *cell == 1 {
            *cell = 0;
            self.active.remove(index);
        } else {
            *cell = 1;
            self.active.insert(index);
        }
        true
    }

    fn set_alive(&mut self, index: u32) {
        if let Some(cell) = self.cells.get_mut(index as usize) {
            *cell = 1;
            self.active.insert(index);
        }
    }

    /// Give up the cell buffer and the active list (e.g. to move them into an
    /// engine `init` message).
    pub fn into_parts(self) -> (Vec<u8>, Vec<u32>) {
        let active = self.active.to_vec();
        (self.cells, active)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        for index in self.active.iter() {
            self.cells[index as usize] = 0;
        }
        self.active.clear();
    }

    /// Replace the contents with a random fill.
    ///
    /// Each cell below the boundary is alive when its draw exceeds
    /// [`RANDOM_FILL_THRESHOLD`]; boundary rows stay dead.
    pub fn random_fill(&mut self, rng: &mut impl RandomSource) {
        self.clear();
        for col in 0..self.columns {
            for row in self.boundary_rows..self.rows {
                if rng.next_unit() > RANDOM_FILL_THRESHOLD {
                    let index = self.index(col, row);
                    self.set_alive(index);
                }
            }
        }
        log::debug!(
            "random fill {}x{} (boundary {}): {} live",
            self.columns,
            self.rows,
            self.boundary_rows,
            self.active.len()
        );
    }

    /// Install the next generation.
    ///
    /// `next` must hold exactly the cells in `next_live` set to 1. On return
    /// `next` holds the previous generation's buffer with every cell zeroed,
    /// ready to be reused. Zeroing only touches the previous active cells,
    /// which is complete because of the active-set invariant.
    pub fn commit_generation(&mut self, next: &mut Vec<u8>, next_live: &[u32]) {
        debug_assert_eq!(next.len(), self.cells.len());
        debug_assert_eq!(
            next.iter().filter(|&&c| c == 1).count(),
            next_live.len(),
            "next buffer disagrees with next live list"
        );

        std::mem::swap(&mut self.cells, next);
        for index in self.active.iter() {
            next[index as usize] = 0;
        }
        debug_assert!(next.iter().all(|&c| c == 0), "stale cell outside the active set");

        self.active.clear();
        for &index in next_live {
            self.active.insert(index);
        }
    }

    /// Check the active-set invariant in full (O(cells)).
    pub fn is_consistent(&self) -> bool {
        let live = self.cells.iter().filter(|&&c| c == 1).count();
        live == self.active.len()
            && self.active.iter().all(|i| self.get(i) == 1)
            && self.cells.iter().all(|&c| c <= 1)
    }
}

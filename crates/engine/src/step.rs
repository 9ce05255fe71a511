//! Step engine - advances the grid one generation at a time
//!
//! Only the frontier is evaluated: the active cells plus their in-bounds
//! neighbours at or below the boundary. A cell outside the frontier has no
//! live neighbour and is not alive itself (active-set invariant), so it is
//! dead in both generations and never needs to be visited. The cost of a
//! step is therefore proportional to `|active ∪ neighbours(active)|`, not to
//! the grid size.
//!
//! # Neighbour Rules
//!
//! For each of the 8 Moore neighbours `(col + dx, row + dy)`:
//!
//! 1. above the grid → 0
//! 2. inside the boundary region, boundary active → the synthetic boundary
//!    value for that column (0 outside the grid's columns)
//! 3. inside the grid, at or below the boundary → the stored cell
//! 4. anything else → 0
//!
//! The rule is fixed to B3/S23.

use crate::core::{BoundaryParams, Grid, NEIGHBOR_OFFSETS};
use crate::protocol::Reply;

/// Counters from one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Cells whose next state was computed (frontier cells below the boundary).
    pub evaluated: usize,
    pub births: usize,
    pub deaths: usize,
    /// Live cells after the step.
    pub live: usize,
}

/// Life rule B3/S23.
#[inline(always)]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Live neighbours of `(col, row)` under the given boundary parameters.
pub fn count_neighbors(grid: &Grid, col: u32, row: u32, boundary: &BoundaryParams) -> u8 {
    let boundary_rows = grid.boundary_rows() as i64;
    let mut count = 0u8;

    for (dx, dy) in NEIGHBOR_OFFSETS {
        let c = col as i64 + dx;
        let r = row as i64 + dy;

        if r < 0 {
            continue;
        } else if r < boundary_rows {
            if boundary.kind.is_active() && c >= 0 && c < grid.columns() as i64 {
                count += boundary.value_at(c);
            }
        } else if grid.is_valid_cell(c, r) {
            count += grid.get(grid.index(c as u32, r as u32));
        }
    }

    count
}

/// Owns the grid and the scratch state needed to step it.
#[derive(Debug, Clone)]
pub struct StepEngine {
    grid: Grid,
    boundary: BoundaryParams,
    /// Zeroed buffer that receives the next generation.
    scratch: Vec<u8>,
    /// `marks[i] == epoch` when cell `i` is already a candidate this step.
    marks: Vec<u32>,
    epoch: u32,
    candidates: Vec<u32>,
    next_live: Vec<u32>,
}

impl StepEngine {
    pub fn new(grid: Grid, boundary: BoundaryParams) -> Self {
        let len = grid.len();
        Self {
            grid,
            boundary,
            scratch: vec![0; len],
            marks: vec![0; len],
            epoch: 0,
            candidates: Vec::new(),
            next_live: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current active set and live count.
    pub fn reply(&self) -> Reply {
        Reply::new(self.grid.active().to_vec())
    }

    /// Flip one cell. Out-of-range indices are ignored and return false.
    pub fn toggle(&mut self, index: u32) -> bool {
        self.grid.toggle(index)
    }

    /// Advance one generation using `boundary`.
    pub fn step(&mut self, boundary: BoundaryParams) -> StepStats {
        self.boundary = boundary;
        self.collect_frontier();

        let mut stats = StepStats::default();
        self.next_live.clear();

        for &index in &self.candidates {
            let (col, row) = self.grid.coords(index);
            let alive = self.grid.get(index) == 1;

            // Boundary rows never evolve; anything toggled there is dropped.
            if !self.grid.is_live_row(row) {
                if alive {
                    stats.deaths += 1;
                }
                continue;
            }

            stats.evaluated += 1;
            let neighbors = count_neighbors(&self.grid, col, row, &self.boundary);
            let next = next_state(alive, neighbors);

            if next {
                self.scratch[index as usize] = 1;
                self.next_live.push(index);
            }
            match (alive, next) {
                (false, true) => stats.births += 1,
                (true, false) => stats.deaths += 1,
                _ => {}
            }
        }

        self.grid
            .commit_generation(&mut self.scratch, &self.next_live);
        stats.live = self.grid.live_count();

        log::trace!(
            "step: evaluated={} births={} deaths={} live={}",
            stats.evaluated,
            stats.births,
            stats.deaths,
            stats.live
        );
        stats
    }

    /// Fill `candidates` with the de-duplicated frontier.
    fn collect_frontier(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.marks.fill(0);
            self.epoch = 1;
        }

        self.candidates.clear();
        let epoch = self.epoch;
        for index in self.grid.active().iter() {
            mark(&mut self.marks, &mut self.candidates, epoch, index);
            for neighbor in self.grid.live_region_neighbors(index) {
                mark(&mut self.marks, &mut self.candidates, epoch, neighbor);
            }
        }
    }
}

#[inline(always)]
fn mark(marks: &mut [u32], candidates: &mut Vec<u32>, epoch: u32, index: u32) {
    let slot = &mut marks[index as usize];
    if *slot != epoch {
        *slot = epoch;
        candidates.push(index);
    }
}

//! Live-cell history for the population chart.
//!
//! Live counts are averaged over blocks of [`CHART_SAMPLE_STEPS`] steps; each
//! completed block becomes one chart point. Only the most recent points are
//! kept.

use std::collections::VecDeque;

use crate::types::CHART_SAMPLE_STEPS;

/// One averaged chart sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Generation at which the block closed.
    pub generation: u64,
    /// Mean live-cell count over the block.
    pub average: f64,
}

/// Block-averaged live-cell series.
#[derive(Debug, Clone)]
pub struct LiveCellChart {
    block: u32,
    sum: u64,
    count: u32,
    points: VecDeque<ChartPoint>,
    max_points: usize,
}

impl LiveCellChart {
    pub fn new(max_points: usize) -> Self {
        Self::with_block(CHART_SAMPLE_STEPS, max_points)
    }

    /// Chart averaging over `block` steps instead of the default.
    pub fn with_block(block: u32, max_points: usize) -> Self {
        Self {
            block: block.max(1),
            sum: 0,
            count: 0,
            points: VecDeque::with_capacity(max_points),
            max_points: max_points.max(1),
        }
    }

    /// Record the live count after `generation`. Returns the new point when a
    /// block completes.
    pub fn record(&mut self, generation: u64, live_cells: usize) -> Option<ChartPoint> {
        self.sum += live_cells as u64;
        self.count += 1;
        if self.count < self.block {
            return None;
        }

        let point = ChartPoint {
            generation,
            average: self.sum as f64 / self.count as f64,
        };
        self.sum = 0;
        self.count = 0;

        if self.points.len() == self.max_points {
            self.points.pop_front();
        }
        self.points.push_back(point);
        Some(point)
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &ChartPoint> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all points and the partial block.
    pub fn reset(&mut self) {
        self.points.clear();
        self.sum = 0;
        self.count = 0;
    }
}

impl Default for LiveCellChart {
    fn default() -> Self {
        Self::new(256)
    }
}

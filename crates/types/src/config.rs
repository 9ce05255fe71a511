//! Simulation configuration read from the environment.

use std::num::NonZeroU32;

use crate::{
    clamp_setting, pulse_width, validate_input, BoundaryType, DEFAULT_BOUNDARY_ROWS,
    DEFAULT_COLUMNS, DEFAULT_PULSE_SHIFT, DEFAULT_PULSE_WIDTH, DEFAULT_ROWS, DEFAULT_SPEED,
    MAX_BOUNDARY_ROWS, MAX_DIMENSION, MAX_PULSE_SHIFT, MAX_PULSE_WIDTH, MAX_SPEED,
    MIN_BOUNDARY_ROWS, MIN_PULSE_SHIFT, MIN_PULSE_WIDTH, MIN_SPEED,
};

/// Host-side configuration.
///
/// Every field is already validated; the engine never re-checks these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub columns: u32,
    pub rows: u32,
    pub boundary_rows: u32,
    pub boundary_type: BoundaryType,
    pub pulse_width: NonZeroU32,
    pub pulse_shift: u32,
    /// Steps per second while running.
    pub speed: u32,
    /// Seed for the random fill; `None` derives one from the clock.
    pub seed: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS as u32,
            rows: DEFAULT_ROWS as u32,
            boundary_rows: DEFAULT_BOUNDARY_ROWS as u32,
            boundary_type: BoundaryType::default(),
            pulse_width: pulse_width(DEFAULT_PULSE_WIDTH),
            pulse_shift: DEFAULT_PULSE_SHIFT as u32,
            speed: DEFAULT_SPEED as u32,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create from `LIFE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    ///
    /// Missing or invalid values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let int = |key: &str, min: i64, max: i64, default: i64| -> i64 {
            lookup(key)
                .map(|v| validate_input(&v, min, max, default))
                .unwrap_or(default)
        };

        let boundary_type = lookup("LIFE_BOUNDARY")
            .map(|v| BoundaryType::parse_or_default(&v))
            .unwrap_or_default();

        let seed = lookup("LIFE_SEED").and_then(|v| v.trim().parse::<u32>().ok());

        Self {
            columns: int("LIFE_COLUMNS", 1, MAX_DIMENSION, DEFAULT_COLUMNS) as u32,
            rows: int("LIFE_ROWS", 1, MAX_DIMENSION, DEFAULT_ROWS) as u32,
            boundary_rows: int(
                "LIFE_BOUNDARY_ROWS",
                MIN_BOUNDARY_ROWS,
                MAX_BOUNDARY_ROWS,
                DEFAULT_BOUNDARY_ROWS,
            ) as u32,
            boundary_type,
            pulse_width: pulse_width(int(
                "LIFE_PULSE_WIDTH",
                MIN_PULSE_WIDTH,
                MAX_PULSE_WIDTH,
                DEFAULT_PULSE_WIDTH,
            )),
            pulse_shift: int(
                "LIFE_PULSE_SHIFT",
                MIN_PULSE_SHIFT,
                MAX_PULSE_SHIFT,
                DEFAULT_PULSE_SHIFT,
            ) as u32,
            speed: int("LIFE_SPEED", MIN_SPEED, MAX_SPEED, DEFAULT_SPEED) as u32,
            seed,
        }
    }

    /// Set the grid size, clamped to `1..=MAX_DIMENSION`. The boundary depth
    /// is re-capped to the new height.
    pub fn set_dimensions(&mut self, columns: i64, rows: i64) {
        self.columns = clamp_setting(columns, 1, MAX_DIMENSION) as u32;
        self.rows = clamp_setting(rows, 1, MAX_DIMENSION) as u32;
        self.adjust_boundary_rows(0);
    }

    /// Adjust speed by `delta`, sticking to the allowed range.
    pub fn adjust_speed(&mut self, delta: i64) {
        self.speed = clamp_setting(self.speed as i64 + delta, MIN_SPEED, MAX_SPEED) as u32;
    }

    pub fn adjust_pulse_width(&mut self, delta: i64) {
        let width = clamp_setting(
            self.pulse_width.get() as i64 + delta,
            MIN_PULSE_WIDTH,
            MAX_PULSE_WIDTH,
        );
        self.pulse_width = pulse_width(width);
    }

    pub fn adjust_pulse_shift(&mut self, delta: i64) {
        self.pulse_shift =
            clamp_setting(self.pulse_shift as i64 + delta, MIN_PULSE_SHIFT, MAX_PULSE_SHIFT) as u32;
    }

    /// Adjust the boundary depth. Returns true when the value changed.
    ///
    /// The depth is also kept below the grid height so at least one row evolves.
    pub fn adjust_boundary_rows(&mut self, delta: i64) -> bool {
        let max = MAX_BOUNDARY_ROWS.min(self.rows as i64 - 1).max(MIN_BOUNDARY_ROWS);
        let next = clamp_setting(self.boundary_rows as i64 + delta, MIN_BOUNDARY_ROWS, max) as u32;
        let changed = next != self.boundary_rows;
        self.boundary_rows = next;
        changed
    }
}

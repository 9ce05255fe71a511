//! Shared types module - configuration, boundary kinds, and host actions
//!
//! This crate defines the plain data types used by every other crate in the
//! workspace. It has no external dependencies so it can be used by the core
//! model, the engine task, the terminal host, and the wire adapter alike.
//!
//! # Boundary Kinds
//!
//! The top `boundary_rows` rows of the grid are not simulated. They hold a
//! synthetic pattern that only feeds neighbour counts into the first live row:
//!
//! | Kind | Pattern | Phase advance per step (host side) |
//! |------|---------|------------------------------------|
//! | `nothing` | never alive | none |
//! | `pulse` | stripes of `pulse_width` columns | `+pulse_width` (whole pattern flips) |
//! | `solid` | always alive | none |
//! | `shift` | stripes of `pulse_width` columns | `+pulse_shift` (pattern slides) |
//!
//! # Configuration Ranges
//!
//! | Setting | Default | Range |
//! |---------|---------|-------|
//! | speed (steps/s) | 120 | 1-1000 |
//! | boundary rows | 10 | 1-50 |
//! | pulse width | 5 | 1-50 |
//! | pulse shift | 1 | 0-50 |
//!
//! Out-of-range or unparsable input falls back to the default rather than
//! being clamped; see [`validate_input`].
//!
//! # Examples
//!
//! ```
//! use boundary_life_types::{validate_input, BoundaryType, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
//!
//! assert_eq!(BoundaryType::from_str("SOLID"), Some(BoundaryType::Solid));
//! assert_eq!(BoundaryType::parse_or_default("sideways"), BoundaryType::Pulse);
//!
//! assert_eq!(validate_input("240", MIN_SPEED, MAX_SPEED, DEFAULT_SPEED), 240);
//! assert_eq!(validate_input("0", MIN_SPEED, MAX_SPEED, DEFAULT_SPEED), DEFAULT_SPEED);
//! ```

use std::num::NonZeroU32;
use std::time::Duration;

pub mod config;

pub use config::SimConfig;

/// Default simulation speed in steps per second.
pub const DEFAULT_SPEED: i64 = 120;

/// Slowest allowed simulation speed.
pub const MIN_SPEED: i64 = 1;

/// Fastest allowed simulation speed.
pub const MAX_SPEED: i64 = 1000;

/// Default depth of the boundary region in rows.
pub const DEFAULT_BOUNDARY_ROWS: i64 = 10;

/// Allowed boundary depth range.
pub const MIN_BOUNDARY_ROWS: i64 = 1;
pub const MAX_BOUNDARY_ROWS: i64 = 50;

/// Default stripe width of the pulse pattern.
pub const DEFAULT_PULSE_WIDTH: i64 = 5;

/// Allowed stripe width range.
pub const MIN_PULSE_WIDTH: i64 = 1;
pub const MAX_PULSE_WIDTH: i64 = 50;

/// Default per-step slide of the `shift` boundary.
pub const DEFAULT_PULSE_SHIFT: i64 = 1;

/// Allowed slide range.
pub const MIN_PULSE_SHIFT: i64 = 0;
pub const MAX_PULSE_SHIFT: i64 = 50;

/// Default grid dimensions in cells.
pub const DEFAULT_COLUMNS: i64 = 160;
pub const DEFAULT_ROWS: i64 = 120;

/// Largest grid edge accepted from configuration.
pub const MAX_DIMENSION: i64 = 4000;

/// A cell below the boundary starts alive when a uniform `[0, 1)` draw exceeds this.
pub const RANDOM_FILL_THRESHOLD: f64 = 0.8;

/// Number of steps averaged into one live-cell chart point.
pub const CHART_SAMPLE_STEPS: u32 = 100;

/// Number of frame durations kept by the frame-rate monitor.
pub const FPS_SAMPLE_WINDOW: usize = 60;

/// Parse an integer setting, falling back to `default` when it is not a number
/// or lies outside `[min, max]`.
///
/// # Examples
///
/// ```
/// use boundary_life_types::validate_input;
///
/// assert_eq!(validate_input(" 7 ", 1, 50, 5), 7);
/// assert_eq!(validate_input("51", 1, 50, 5), 5);
/// assert_eq!(validate_input("abc", 1, 50, 5), 5);
/// ```
pub fn validate_input(value: &str, min: i64, max: i64, default: i64) -> i64 {
    match value.trim().parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => n,
        _ => default,
    }
}

/// Clamp an already-numeric setting into `[min, max]`.
///
/// Used for keyboard increments where the value is known to be a number and
/// overshooting should stick to the limit instead of resetting.
pub fn clamp_setting(value: i64, min: i64, max: i64) -> i64 {
    value.clamp(min, max)
}

/// Convert a validated width into the non-zero type used by the engine.
pub fn pulse_width(value: i64) -> NonZeroU32 {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN)
}

/// Time between steps at `speed` steps per second.
pub fn step_interval(speed: i64) -> Duration {
    let speed = clamp_setting(speed, MIN_SPEED, MAX_SPEED) as u64;
    Duration::from_micros(1_000_000 / speed)
}

/// Policy used to synthesize the boundary rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryType {
    /// Boundary never contributes live neighbours.
    Nothing,
    /// Stripes that flip every step.
    #[default]
    Pulse,
    /// Every boundary cell is alive.
    Solid,
    /// Stripes that slide by the configured shift every step.
    Shift,
}

impl BoundaryType {
    /// All kinds, in UI cycling order.
    pub const ALL: [BoundaryType; 4] = [
        BoundaryType::Nothing,
        BoundaryType::Pulse,
        BoundaryType::Solid,
        BoundaryType::Shift,
    ];

    /// Parse a boundary kind (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_life_types::BoundaryType;
    ///
    /// assert_eq!(BoundaryType::from_str("nothing"), Some(BoundaryType::Nothing));
    /// assert_eq!(BoundaryType::from_str("Shift"), Some(BoundaryType::Shift));
    /// assert_eq!(BoundaryType::from_str("none"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nothing" => Some(BoundaryType::Nothing),
            "pulse" => Some(BoundaryType::Pulse),
            "solid" => Some(BoundaryType::Solid),
            "shift" => Some(BoundaryType::Shift),
            _ => None,
        }
    }

    /// Parse at the validation boundary: unknown kinds become `pulse`.
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryType::Nothing => "nothing",
            BoundaryType::Pulse => "pulse",
            BoundaryType::Solid => "solid",
            BoundaryType::Shift => "shift",
        }
    }

    /// Next kind in [`BoundaryType::ALL`], wrapping around.
    pub fn next(&self) -> Self {
        match self {
            BoundaryType::Nothing => BoundaryType::Pulse,
            BoundaryType::Pulse => BoundaryType::Solid,
            BoundaryType::Solid => BoundaryType::Shift,
            BoundaryType::Shift => BoundaryType::Nothing,
        }
    }

    /// Whether the boundary region contributes neighbours at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, BoundaryType::Nothing)
    }
}

/// Host-level actions produced by input handling.
///
/// These never reach the engine directly; the host session turns them into
/// configuration changes and engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Start or pause stepping.
    ToggleRun,
    /// Advance exactly one generation while paused.
    StepOnce,
    /// Fresh random fill, generation back to 0.
    Reset,
    /// Switch to the next boundary kind.
    CycleBoundary,
    SpeedUp,
    SpeedDown,
    PulseWidthUp,
    PulseWidthDown,
    PulseShiftUp,
    PulseShiftDown,
    /// Deepen the boundary region (forces a reset).
    BoundaryRowsUp,
    /// Shrink the boundary region (forces a reset).
    BoundaryRowsDown,
    /// Move the edit cursor by whole cells.
    MoveCursor { dx: i32, dy: i32 },
    /// Flip the cell under the cursor (paused only).
    ToggleCell,
    /// Grow (positive) or shrink both grid edges by `delta` cells (forces a reset).
    ResizeGrid { delta: i32 },
}

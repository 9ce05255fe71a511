//! Boundary pattern generators.
//!
//! The boundary rows are never stored or evolved. Their value is computed on
//! demand from the column and the current stripe parameters.

use std::num::NonZeroU32;

use crate::types::{pulse_width, BoundaryType, DEFAULT_PULSE_WIDTH};

/// Stripe parameters supplied by the host with every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryParams {
    pub kind: BoundaryType,
    pub pulse_width: NonZeroU32,
    pub pulse_offset: i64,
}

impl BoundaryParams {
    pub fn new(kind: BoundaryType, pulse_width: NonZeroU32, pulse_offset: i64) -> Self {
        Self {
            kind,
            pulse_width,
            pulse_offset,
        }
    }

    /// Value of the boundary cell at `col`; see [`boundary_value`].
    #[inline]
    pub fn value_at(&self, col: i64) -> u8 {
        boundary_value(col, self.kind, self.pulse_width, self.pulse_offset)
    }
}

impl Default for BoundaryParams {
    fn default() -> Self {
        Self {
            kind: BoundaryType::default(),
            pulse_width: pulse_width(DEFAULT_PULSE_WIDTH),
            pulse_offset: 0,
        }
    }
}

/// Value (0 or 1) of a boundary cell in column `col`.
///
/// The pattern is the same in every boundary row, so the row is not needed.
/// Striped kinds use floor division: the stripe index of `col + offset` is
/// `floor((col + offset) / width)` and the cell is alive on even stripes, for
/// negative phases too.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
/// use boundary_life_core::boundary_value;
/// use boundary_life_core::types::BoundaryType;
///
/// let w = NonZeroU32::new(5).unwrap();
/// assert_eq!(boundary_value(4, BoundaryType::Pulse, w, 0), 1);
/// assert_eq!(boundary_value(5, BoundaryType::Pulse, w, 0), 0);
/// assert_eq!(boundary_value(5, BoundaryType::Pulse, w, 5), 1);
/// assert_eq!(boundary_value(5, BoundaryType::Solid, w, 0), 1);
/// assert_eq!(boundary_value(5, BoundaryType::Nothing, w, 0), 0);
/// ```
#[inline]
pub fn boundary_value(col: i64, kind: BoundaryType, pulse_width: NonZeroU32, pulse_offset: i64) -> u8 {
    match kind {
        BoundaryType::Nothing => 0,
        BoundaryType::Solid => 1,
        BoundaryType::Pulse | BoundaryType::Shift => {
            let stripe = (col + pulse_offset).div_euclid(pulse_width.get() as i64);
            u8::from(stripe.rem_euclid(2) == 0)
        }
    }
}

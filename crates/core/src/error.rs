//! Grid construction errors.

use thiserror::Error;

/// Errors raised when adopting an externally supplied grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Cell buffer length does not match `columns * rows`.
    #[error("cell buffer has {actual} cells, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// An active index points outside the grid.
    #[error("active index {index} out of range for {len} cells")]
    IndexOutOfRange { index: u32, len: usize },

    /// The buffer holds live cells that are missing from the active list.
    #[error("grid has {live} live cells but {listed} were listed as active")]
    ActiveSetMismatch { live: usize, listed: usize },
}

//! Grid state model - pure, deterministic, and testable
//!
//! This crate owns everything about the cell grid that does not involve
//! advancing a generation: storage, index math, the active-cell set, the
//! boundary pattern generators, the random initial fill, and the host-side
//! population chart. It has no I/O and no async code.
//!
//! # Module Structure
//!
//! - [`grid`]: flat row-major cell buffer with the active-set invariant
//! - [`active`]: O(1) sparse set of live cell indices
//! - [`boundary`]: stripe/solid/empty boundary patterns
//! - [`rng`]: injectable uniform random source and a seeded LCG
//! - [`history`]: block-averaged live-cell chart data
//!
//! # Example
//!
//! ```
//! use boundary_life_core::{Grid, SimpleRng};
//!
//! let mut grid = Grid::new(32, 24, 4);
//! grid.random_fill(&mut SimpleRng::new(7));
//!
//! let index = grid.index(10, 12);
//! let was_alive = grid.is_alive(10, 12);
//! grid.toggle(index);
//! assert_ne!(grid.is_alive(10, 12), was_alive);
//! assert!(grid.is_consistent());
//! ```

pub mod active;
pub mod boundary;
pub mod error;
pub mod grid;
pub mod history;
pub mod rng;

pub use boundary_life_types as types;

pub use active::ActiveSet;
pub use boundary::{boundary_value, BoundaryParams};
pub use error::GridError;
pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use history::{ChartPoint, LiveCellChart};
pub use rng::{RandomSource, SimpleRng};

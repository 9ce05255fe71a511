//! Step engine crate - generation stepping and the host/engine protocol
//!
//! The engine advances a [`core::Grid`] one generation at a time, evaluating
//! only the frontier of live cells, and talks to its host purely through
//! messages:
//!
//! - [`protocol`]: [`Command`] (`init` / `step` / `toggle`) and [`Reply`]
//! - [`step`]: [`StepEngine`], neighbour counting with boundary injection
//! - [`handler`]: applies commands to engine state
//! - [`worker`]: the engine as a tokio task, plus sync and async clients
//! - [`session`]: host-side bookkeeping (generation counter, phase, chart)
//!
//! # Example
//!
//! ```
//! use boundary_life_engine::{Command, EngineWorker};
//! use boundary_life_engine::types::{pulse_width, BoundaryType};
//!
//! let mut worker = EngineWorker::start().unwrap();
//!
//! // 3x3 grid, horizontal blinker in the middle row, no boundary rows.
//! let cells = vec![0, 0, 0, 1, 1, 1, 0, 0, 0];
//! let reply = worker
//!     .request_blocking(Command::Init {
//!         cells,
//!         active_cells: vec![3, 4, 5],
//!         column_count: 3,
//!         row_count: 3,
//!         boundary_rows: 0,
//!         boundary_type: BoundaryType::Nothing,
//!         pulse_width: pulse_width(5),
//!         pulse_offset: 0,
//!     })
//!     .unwrap();
//! assert_eq!(reply.live_cell_count, 3);
//!
//! let mut reply = worker
//!     .request_blocking(Command::Step {
//!         boundary_type: BoundaryType::Nothing,
//!         pulse_width: pulse_width(5),
//!         pulse_offset: 0,
//!     })
//!     .unwrap();
//! reply.active_cells.sort();
//! assert_eq!(reply.active_cells, vec![1, 4, 7]);
//! ```

pub mod error;
pub mod handler;
pub mod protocol;
pub mod session;
pub mod step;
pub mod worker;

pub use boundary_life_core as core;
pub use boundary_life_types as types;

pub use error::EngineError;
pub use handler::CommandHandler;
pub use protocol::{Command, Reply};
pub use session::Session;
pub use step::{count_neighbors, next_state, StepEngine, StepStats};
pub use worker::{run_engine, spawn_engine, EngineClient, EngineWorker, Outcome};

//! Command dispatch for the engine side of the protocol.

use crate::core::{BoundaryParams, Grid};
use crate::error::EngineError;
use crate::protocol::{Command, Reply};
use crate::step::StepEngine;

/// Engine-side protocol state: nothing until the first `init`, then one
/// [`StepEngine`] that is replaced wholesale by every later `init`.
#[derive(Debug, Default)]
pub struct CommandHandler {
    engine: Option<StepEngine>,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> Option<&StepEngine> {
        self.engine.as_ref()
    }

    /// Apply one command and build its reply.
    pub fn handle(&mut self, command: Command) -> Result<Reply, EngineError> {
        match command {
            Command::Init {
                cells,
                active_cells,
                column_count,
                row_count,
                boundary_rows,
                boundary_type,
                pulse_width,
                pulse_offset,
            } => {
                let grid = Grid::from_parts(cells, &active_cells, column_count, row_count, boundary_rows)?;
                let boundary = BoundaryParams::new(boundary_type, pulse_width, pulse_offset);
                log::info!(
                    "engine init {}x{} boundary={} ({} rows), {} live",
                    column_count,
                    row_count,
                    boundary_type.as_str(),
                    boundary_rows,
                    grid.live_count()
                );
                let engine = StepEngine::new(grid, boundary);
                let reply = engine.reply();
                self.engine = Some(engine);
                Ok(reply)
            }
            Command::Step {
                boundary_type,
                pulse_width,
                pulse_offset,
            } => {
                let engine = self.engine.as_mut().ok_or(EngineError::NotInitialized)?;
                engine.step(BoundaryParams::new(boundary_type, pulse_width, pulse_offset));
                Ok(engine.reply())
            }
            Command::Toggle { index } => {
                let engine = self.engine.as_mut().ok_or(EngineError::NotInitialized)?;
                if !engine.toggle(index) {
                    log::warn!(
                        "toggle index {} out of range for {} cells; ignored",
                        index,
                        engine.grid().len()
                    );
                }
                Ok(engine.reply())
            }
        }
    }
}

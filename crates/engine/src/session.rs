//! Host session - everything the presentation side tracks about a run.
//!
//! The engine owns the grid; the session owns configuration, the generation
//! counter, the last reply (for drawing), the boundary phase and the chart.
//! It never talks to a channel itself: methods return the [`Command`] to send
//! now, and feed replies back through [`Session::on_reply`]. Commands issued
//! while a request is outstanding are queued and released one at a time as
//! replies arrive.

use std::collections::VecDeque;
use std::time::Instant;

use crate::core::{BoundaryParams, Grid, LiveCellChart, SimpleRng};
use crate::error::EngineError;
use crate::protocol::{Command, Reply};
use crate::types::{step_interval, BoundaryType, HostAction, SimConfig};

/// Speed change per key press, in steps per second.
const SPEED_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Init,
    /// Phase advance owed when this step's reply lands, fixed at send time.
    Step { phase_delta: i64 },
    Toggle,
}

/// Host-side view of one simulation run.
#[derive(Debug)]
pub struct Session {
    config: SimConfig,
    rng: SimpleRng,
    generation: u64,
    live_cells: usize,
    active_cells: Vec<u32>,
    running: bool,
    pulse_offset: i64,
    cursor: (u32, u32),
    pending: Option<Pending>,
    queued: VecDeque<Command>,
    last_step_at: Option<Instant>,
    chart: LiveCellChart,
}

impl Session {
    pub fn new(config: SimConfig, seed: u32) -> Self {
        let cursor = (config.columns / 2, config.boundary_rows.max(config.rows / 2));
        Self {
            rng: SimpleRng::new(seed),
            config,
            generation: 0,
            live_cells: 0,
            active_cells: Vec::new(),
            running: false,
            pulse_offset: 0,
            cursor,
            pending: None,
            queued: VecDeque::new(),
            last_step_at: None,
            chart: LiveCellChart::default(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> usize {
        self.live_cells
    }

    /// Active cells from the most recent reply.
    pub fn active_cells(&self) -> &[u32] {
        &self.active_cells
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pulse_offset(&self) -> i64 {
        self.pulse_offset
    }

    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    pub fn chart(&self) -> &LiveCellChart {
        &self.chart
    }

    /// Boundary parameters the next step will be sent with.
    pub fn boundary_params(&self) -> BoundaryParams {
        BoundaryParams::new(
            self.config.boundary_type,
            self.config.pulse_width,
            self.pulse_offset,
        )
    }

    /// Fresh random fill packaged as an `init`. Generation, boundary phase and
    /// chart restart when its reply arrives.
    pub fn reset(&mut self) -> Option<Command> {
        let mut grid = Grid::new(self.config.columns, self.config.rows, self.config.boundary_rows);
        grid.random_fill(&mut self.rng);
        log::info!(
            "reset {}x{} with {} live cells",
            self.config.columns,
            self.config.rows,
            grid.live_count()
        );

        // The buffer moves into the command; the session keeps no copy.
        let (cells, active_cells) = grid.into_parts();
        let params = self.boundary_params();
        let command = Command::Init {
            cells,
            active_cells,
            column_count: self.config.columns,
            row_count: self.config.rows,
            boundary_rows: self.config.boundary_rows,
            boundary_type: params.kind,
            pulse_width: params.pulse_width,
            pulse_offset: 0,
        };

        // Anything still queued targets the grid being replaced.
        self.queued.clear();
        self.dispatch(command)
    }

    /// Change grid dimensions. Always resets.
    pub fn resize(&mut self, columns: u32, rows: u32) -> Option<Command> {
        self.config.set_dimensions(columns as i64, rows as i64);
        log::info!("resize to {}x{}", self.config.columns, self.config.rows);
        self.clamp_cursor();
        self.reset()
    }

    /// Step when running, idle, and the step interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        if !self.running || self.pending.is_some() || !self.queued.is_empty() {
            return None;
        }
        let interval = step_interval(self.config.speed as i64);
        if let Some(last) = self.last_step_at {
            if now.duration_since(last) < interval {
                return None;
            }
        }
        self.last_step_at = Some(now);
        self.dispatch(Command::step(self.boundary_params()))
    }

    /// Apply a host action. Returns a command to send now, if any.
    pub fn apply_action(&mut self, action: HostAction) -> Option<Command> {
        match action {
            HostAction::ToggleRun => {
                self.running = !self.running;
                self.last_step_at = None;
                log::info!("{}", if self.running { "running" } else { "paused" });
                None
            }
            HostAction::StepOnce => {
                if self.running {
                    return None;
                }
                self.dispatch(Command::step(self.boundary_params()))
            }
            HostAction::Reset => self.reset(),
            HostAction::CycleBoundary => {
                self.config.boundary_type = self.config.boundary_type.next();
                log::info!("boundary -> {}", self.config.boundary_type.as_str());
                None
            }
            HostAction::SpeedUp => {
                self.config.adjust_speed(SPEED_STEP);
                None
            }
            HostAction::SpeedDown => {
                self.config.adjust_speed(-SPEED_STEP);
                None
            }
            HostAction::PulseWidthUp => {
                self.config.adjust_pulse_width(1);
                self.wrap_phase();
                None
            }
            HostAction::PulseWidthDown => {
                self.config.adjust_pulse_width(-1);
                self.wrap_phase();
                None
            }
            HostAction::PulseShiftUp => {
                self.config.adjust_pulse_shift(1);
                None
            }
            HostAction::PulseShiftDown => {
                self.config.adjust_pulse_shift(-1);
                None
            }
            HostAction::BoundaryRowsUp | HostAction::BoundaryRowsDown => {
                let delta = if action == HostAction::BoundaryRowsUp { 1 } else { -1 };
                if self.config.adjust_boundary_rows(delta) {
                    self.clamp_cursor();
                    self.reset()
                } else {
                    None
                }
            }
            HostAction::MoveCursor { dx, dy } => {
                let col = self.cursor.0 as i64 + dx as i64;
                let row = self.cursor.1 as i64 + dy as i64;
                self.cursor = (col.max(0) as u32, row.max(0) as u32);
                self.clamp_cursor();
                None
            }
            HostAction::ResizeGrid { delta } => {
                let columns = self.config.columns as i64 + delta as i64;
                let rows = self.config.rows as i64 + delta as i64;
                self.resize(columns.max(1) as u32, rows.max(1) as u32)
            }
            HostAction::ToggleCell => {
                let (col, row) = self.cursor;
                if self.running || row < self.config.boundary_rows {
                    log::debug!("toggle at ({}, {}) ignored", col, row);
                    return None;
                }
                let index = col + row * self.config.columns;
                self.dispatch(Command::Toggle { index })
            }
        }
    }

    /// Record a reply. Returns the next queued command, if any.
    pub fn on_reply(&mut self, reply: Reply) -> Option<Command> {
        match self.pending.take() {
            Some(Pending::Init) => {
                self.generation = 0;
                self.pulse_offset = 0;
                self.chart.reset();
            }
            Some(Pending::Step { phase_delta }) => {
                self.generation += 1;
                self.pulse_offset += phase_delta;
                self.wrap_phase();
                self.chart.record(self.generation, reply.live_cell_count);
            }
            Some(Pending::Toggle) => {}
            None => log::warn!("reply with no request outstanding"),
        }

        self.live_cells = reply.live_cell_count;
        self.active_cells = reply.active_cells;
        self.release_queued()
    }

    /// Record a failed request. Returns the next queued command, if any.
    pub fn on_error(&mut self, err: &EngineError) -> Option<Command> {
        log::error!("engine request failed: {}", err);
        self.pending = None;
        self.release_queued()
    }

    fn dispatch(&mut self, command: Command) -> Option<Command> {
        if self.pending.is_some() {
            self.queued.push_back(command);
            return None;
        }
        self.pending = Some(match command {
            Command::Init { .. } => Pending::Init,
            Command::Step {
                boundary_type,
                pulse_width,
                ..
            } => Pending::Step {
                phase_delta: self.phase_delta(boundary_type, pulse_width.get()),
            },
            Command::Toggle { .. } => Pending::Toggle,
        });
        Some(command)
    }

    fn release_queued(&mut self) -> Option<Command> {
        let command = self.queued.pop_front()?;
        self.dispatch(command)
    }

    /// Phase advance for one completed step of `kind`.
    ///
    /// The stripe pattern repeats every `2 * width` columns, so the phase is
    /// kept in `[0, 2 * width)`.
    fn phase_delta(&self, kind: BoundaryType, pulse_width: u32) -> i64 {
        match kind {
            BoundaryType::Pulse => pulse_width as i64,
            BoundaryType::Shift => self.config.pulse_shift as i64,
            BoundaryType::Nothing | BoundaryType::Solid => 0,
        }
    }

    fn wrap_phase(&mut self) {
        let period = 2 * self.config.pulse_width.get() as i64;
        self.pulse_offset = self.pulse_offset.rem_euclid(period);
    }

    fn clamp_cursor(&mut self) {
        let max_col = self.config.columns.saturating_sub(1);
        let max_row = self.config.rows.saturating_sub(1);
        self.cursor = (self.cursor.0.min(max_col), self.cursor.1.min(max_row));
    }
}

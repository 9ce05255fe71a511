//! LifeView: maps a host [`Session`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom:
//!
//! ```text
//! gen 812 | live 4103 | pulse w5 phase 3 | 120 st/s | 59 fps | RUNNING
//! ██  ██  ██      ██  ██                     <- boundary rows
//! ────────────────────────────────────────   <- separator
//!   ██    ████                               <- live region
//! avg ▁▂▃▅▆▇██▇▆▅                            <- population chart
//! ```
//!
//! Large grids are windowed around the cursor.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::boundary_value;
use crate::engine::Session;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::BoundaryType;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const KEY_HELP: &str =
    "space run  n step  r reset  b boundary  [/] width  {/} shift  +/- speed  PgUp/PgDn depth  </> size  t toggle  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-side figures that are not part of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostStatus {
    pub fps: f64,
}

/// Grid window chosen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub origin_col: u32,
    pub origin_row: u32,
    pub cols: u32,
    pub rows: u32,
}

impl Window {
    fn contains(&self, col: u32, row: u32) -> bool {
        col >= self.origin_col
            && col < self.origin_col + self.cols
            && row >= self.origin_row
            && row < self.origin_row + self.rows
    }
}

struct Palette {
    base: CellStyle,
    live: CellStyle,
    dead: CellStyle,
    boundary_on: CellStyle,
    boundary_off: CellStyle,
    separator: CellStyle,
    cursor: CellStyle,
    status: CellStyle,
    chart: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        let black = Rgb::new(0, 0, 0);
        let panel = Rgb::new(20, 20, 28);
        Self {
            base: CellStyle::default(),
            live: CellStyle::plain(Rgb::new(120, 230, 140), panel).bold(),
            dead: CellStyle::plain(Rgb::new(60, 60, 70), panel),
            boundary_on: CellStyle::plain(Rgb::new(240, 170, 60), black),
            boundary_off: CellStyle::plain(Rgb::new(80, 60, 40), black).dim(),
            separator: CellStyle::plain(Rgb::new(200, 80, 80), black),
            cursor: CellStyle::plain(Rgb::new(0, 0, 0), Rgb::new(230, 230, 90)),
            status: CellStyle::plain(Rgb::new(230, 230, 230), Rgb::new(40, 40, 60)).bold(),
            chart: CellStyle::plain(Rgb::new(110, 170, 240), black),
        }
    }
}

/// Terminal renderer for a boundary-driven Life session.
pub struct LifeView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    palette: Palette,
    /// Live flags for the visible window, reused across frames.
    visible: Vec<bool>,
}

impl Default for LifeView {
    fn default() -> Self {
        // 2x1 compensates for the typical terminal glyph aspect ratio.
        Self::new(2)
    }
}

impl LifeView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            palette: Palette::default(),
            visible: Vec::new(),
        }
    }

    /// Grid window that fits `viewport` and keeps the cursor visible.
    pub fn window(&self, session: &Session, viewport: Viewport) -> Window {
        let config = session.config();
        // Status line, separator, chart line.
        let avail_rows = viewport.height.saturating_sub(3) as u32;
        let avail_cols = (viewport.width / self.cell_w) as u32;

        let cols = config.columns.min(avail_cols);
        let rows = config.rows.min(avail_rows);
        let (cursor_col, cursor_row) = session.cursor();

        Window {
            origin_col: centered_origin(cursor_col, cols, config.columns),
            origin_row: centered_origin(cursor_row, rows, config.rows),
            cols,
            rows,
        }
    }

    /// Render the session into an existing framebuffer.
    pub fn render_into(
        &mut self,
        session: &Session,
        status: HostStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.palette.base.into_cell(' '));
        if viewport.height == 0 || viewport.width == 0 {
            return;
        }

        self.draw_status(session, status, fb);

        let window = self.window(session, viewport);
        self.collect_visible(session, window);
        let grid_bottom = self.draw_grid(session, window, fb);

        if grid_bottom < viewport.height {
            self.draw_chart(session, viewport.height - 1, fb);
        }
    }

    /// Cheap digest of everything drawn, for [`crate::RenderThrottle`].
    pub fn fingerprint(session: &Session, status: HostStatus) -> u64 {
        let config = session.config();
        let mut h = DefaultHasher::new();
        session.generation().hash(&mut h);
        session.live_cells().hash(&mut h);
        session.active_cells().len().hash(&mut h);
        session.cursor().hash(&mut h);
        session.is_running().hash(&mut h);
        session.pulse_offset().hash(&mut h);
        session.chart().len().hash(&mut h);
        config.columns.hash(&mut h);
        config.rows.hash(&mut h);
        config.boundary_rows.hash(&mut h);
        config.boundary_type.hash(&mut h);
        config.pulse_width.hash(&mut h);
        config.pulse_shift.hash(&mut h);
        config.speed.hash(&mut h);
        (status.fps.round() as i64).hash(&mut h);
        h.finish()
    }

    fn collect_visible(&mut self, session: &Session, window: Window) {
        let columns = session.config().columns.max(1);
        let len = window.cols as usize * window.rows as usize;
        self.visible.clear();
        self.visible.resize(len, false);

        for &index in session.active_cells() {
            let (col, row) = (index % columns, index / columns);
            if window.contains(col, row) {
                let vx = (col - window.origin_col) as usize;
                let vy = (row - window.origin_row) as usize;
                self.visible[vy * window.cols as usize + vx] = true;
            }
        }
    }

    /// Draws boundary rows, separator and live rows. Returns the first
    /// terminal row below the grid.
    fn draw_grid(&self, session: &Session, window: Window, fb: &mut FrameBuffer) -> u16 {
        let config = session.config();
        let params = session.boundary_params();
        let p = &self.palette;
        let (cursor_col, cursor_row) = session.cursor();
        let show_cursor = !session.is_running();

        let mut y: u16 = 1;
        for vy in 0..window.rows {
            let row = window.origin_row + vy;

            if row == config.boundary_rows && vy > 0 {
                fb.fill_row(0, y, window.cols as u16 * self.cell_w, '─', p.separator);
                y = y.saturating_add(1);
            }

            for vx in 0..window.cols {
                let col = window.origin_col + vx;
                let x = vx as u16 * self.cell_w;

                let (glyph, style) = if row < config.boundary_rows {
                    let on = params.kind.is_active()
                        && boundary_value(col as i64, params.kind, params.pulse_width, params.pulse_offset) == 1;
                    match (on, params.kind) {
                        (true, _) => ('█', p.boundary_on),
                        (false, BoundaryType::Nothing) => ('·', p.boundary_off),
                        (false, _) => (' ', p.boundary_off),
                    }
                } else if self.visible[(vy * window.cols + vx) as usize] {
                    ('█', p.live)
                } else {
                    ('·', p.dead)
                };

                let style = if show_cursor && col == cursor_col && row == cursor_row {
                    p.cursor
                } else {
                    style
                };

                for dx in 0..self.cell_w {
                    let ch = if glyph == '·' && dx > 0 { ' ' } else { glyph };
                    fb.put_char(x + dx, y, ch, style);
                }
            }
            y = y.saturating_add(1);
        }
        y
    }

    fn draw_status(&self, session: &Session, status: HostStatus, fb: &mut FrameBuffer) {
        let config = session.config();
        let boundary = match config.boundary_type {
            BoundaryType::Pulse | BoundaryType::Shift => format!(
                "{} w{} phase {}{}",
                config.boundary_type.as_str(),
                config.pulse_width,
                session.pulse_offset(),
                if config.boundary_type == BoundaryType::Shift {
                    format!(" +{}", config.pulse_shift)
                } else {
                    String::new()
                }
            ),
            other => other.as_str().to_string(),
        };
        let line = format!(
            " gen {} | live {} | {} x{} | {} st/s | {:.0} fps | {}{}",
            session.generation(),
            session.live_cells(),
            boundary,
            config.boundary_rows,
            config.speed,
            status.fps,
            if session.is_running() { "RUNNING" } else { "PAUSED" },
            if session.is_busy() { " *" } else { "" },
        );
        fb.fill_row(0, 0, fb.width(), ' ', self.palette.status);
        fb.put_str(0, 0, &line, self.palette.status);
    }

    fn draw_chart(&self, session: &Session, y: u16, fb: &mut FrameBuffer) {
        let chart = session.chart();
        if chart.is_empty() {
            fb.put_str(1, y, KEY_HELP, self.palette.dead);
            return;
        }

        let x = fb.put_str(0, y, " avg ", self.palette.chart);
        let room = fb.width().saturating_sub(x) as usize;
        let skip = chart.len().saturating_sub(room);
        let values: Vec<f64> = chart.points().skip(skip).map(|p| p.average).collect();
        for (i, ch) in sparkline(&values).enumerate() {
            fb.put_char(x + i as u16, y, ch, self.palette.chart);
        }
    }
}

/// First visible index so that `focus` sits near the middle of a window of
/// `span` over `total`.
fn centered_origin(focus: u32, span: u32, total: u32) -> u32 {
    if span >= total {
        return 0;
    }
    focus.saturating_sub(span / 2).min(total - span)
}

/// Map values onto block glyphs scaled between their min and max.
pub fn sparkline(values: &[f64]) -> impl Iterator<Item = char> + '_ {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values.iter().map(move |&v| {
        let level = if range > 0.0 {
            ((v - min) / range * top).round() as usize
        } else {
            SPARK_LEVELS.len() / 2
        };
        SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
    })
}

//! Terminal rendering for the boundary-life host.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the
//! terminal, without a widget toolkit. Each grid cell is two characters wide
//! so cells look roughly square.
//!
//! - [`fb`]: styled character framebuffer
//! - [`view`]: session -> framebuffer (pure)
//! - [`renderer`]: framebuffer -> terminal, with run-length diffing
//! - [`frame_rate`]: rolling FPS average for the status line
//! - [`throttle`]: skips redraws while nothing changes

pub mod fb;
pub mod frame_rate;
pub mod renderer;
pub mod throttle;
pub mod view;

pub use boundary_life_core as core;
pub use boundary_life_engine as engine;
pub use boundary_life_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame_rate::FrameMonitor;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::RenderThrottle;
pub use view::{sparkline, HostStatus, LifeView, Viewport, Window};

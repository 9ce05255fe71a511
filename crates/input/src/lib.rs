//! Terminal input module (host-facing).
//!
//! Maps `crossterm` key events into [`crate::types::HostAction`]. The session
//! decides what an action means in the current state (for example, toggling
//! is ignored while running).

pub mod map;

pub use boundary_life_types as types;

pub use map::{handle_key_event, should_quit};

//! Key mapping from terminal events to host actions.

use crate::types::HostAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cells added to or removed from each grid edge per resize key press.
pub const GRID_RESIZE_STEP: i32 = 10;

/// Map keyboard input to host actions.
pub fn handle_key_event(key: KeyEvent) -> Option<HostAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Run control
        KeyCode::Char(' ') => Some(HostAction::ToggleRun),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(HostAction::StepOnce),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostAction::Reset),

        // Boundary
        KeyCode::Char('b') | KeyCode::Char('B') => Some(HostAction::CycleBoundary),
        KeyCode::Char(']') => Some(HostAction::PulseWidthUp),
        KeyCode::Char('[') => Some(HostAction::PulseWidthDown),
        KeyCode::Char('}') => Some(HostAction::PulseShiftUp),
        KeyCode::Char('{') => Some(HostAction::PulseShiftDown),
        KeyCode::PageDown => Some(HostAction::BoundaryRowsUp),
        KeyCode::PageUp => Some(HostAction::BoundaryRowsDown),

        // Grid size
        KeyCode::Char('>') | KeyCode::Char('.') => Some(HostAction::ResizeGrid { delta: GRID_RESIZE_STEP }),
        KeyCode::Char('<') | KeyCode::Char(',') => Some(HostAction::ResizeGrid { delta: -GRID_RESIZE_STEP }),

        // Speed
        KeyCode::Char('+') | KeyCode::Char('=') => Some(HostAction::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(HostAction::SpeedDown),

        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(HostAction::MoveCursor { dx: -1, dy: 0 })
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(HostAction::MoveCursor { dx: 1, dy: 0 })
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(HostAction::MoveCursor { dx: 0, dy: -1 })
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(HostAction::MoveCursor { dx: 0, dy: 1 })
        }
        KeyCode::Enter | KeyCode::Char('t') | KeyCode::Char('T') => Some(HostAction::ToggleCell),

        _ => None,
    }
}

/// Check if key should quit the host.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

//! Terminal view driven by real engine replies.

use boundary_life::engine::{CommandHandler, Session};
use boundary_life::term::{FrameBuffer, HostStatus, LifeView, Viewport};
use boundary_life::types::{pulse_width, BoundaryType, HostAction, SimConfig};

#[test]
fn frame_reflects_session_after_steps() {
    let config = SimConfig {
        columns: 20,
        rows: 12,
        boundary_rows: 2,
        boundary_type: BoundaryType::Pulse,
        pulse_width: pulse_width(3),
        ..SimConfig::default()
    };
    let mut session = Session::new(config, 42);
    let mut handler = CommandHandler::new();

    let mut next = session.reset();
    while let Some(command) = next.take() {
        next = session.on_reply(handler.handle(command).unwrap());
    }
    for _ in 0..5 {
        let step = session.apply_action(HostAction::StepOnce).unwrap();
        session.on_reply(handler.handle(step).unwrap());
    }

    let mut view = LifeView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&session, HostStatus { fps: 60.0 }, Viewport::new(100, 20), &mut fb);

    let status = fb.row_text(0);
    assert!(status.contains("gen 5"), "{}", status);
    assert!(status.contains(&format!("live {}", session.live_cells())));
    assert!(status.contains("60 fps"));

    // Separator sits under the two boundary rows.
    assert!(fb.row_text(3).chars().all(|c| c == '─'));

    // Every live cell shows up as a block pair below the separator.
    let blocks: usize = (4..4 + 10)
        .map(|y| fb.row_text(y).chars().filter(|&c| c == '█').count())
        .sum();
    assert_eq!(blocks, session.live_cells() * 2);
}

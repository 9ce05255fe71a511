//! Terminal Boundary Life host (default binary).
//!
//! Owns the session and the terminal; the step engine runs as a separate
//! task on its own runtime and is only reached through commands.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use boundary_life::engine::{Command, EngineWorker, Session};
use boundary_life::input::{handle_key_event, should_quit};
use boundary_life::term::{
    FrameBuffer, FrameMonitor, HostStatus, LifeView, RenderThrottle, TerminalRenderer, Viewport,
};
use boundary_life::types::SimConfig;

/// Longest wait for input before re-checking the engine and the step timer.
const POLL_CAP: Duration = Duration::from_millis(16);

/// Redraw interval while nothing on screen changes.
const IDLE_REDRAW: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let log_path = std::env::var("LIFE_LOG_PATH").ok();
    boundary_life::init_logging("warn", log_path.as_deref())?;

    let config = SimConfig::from_env();
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("starting host {:?} seed={}", config, seed);

    let mut engine = EngineWorker::start()?;
    let mut session = Session::new(config, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut EngineWorker, session: &mut Session) -> Result<()> {
    let mut view = LifeView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut frames = FrameMonitor::default();
    let mut throttle = RenderThrottle::new(IDLE_REDRAW);
    let mut last_frame = Instant::now();

    let init = session.reset();
    send(engine, session, init);

    loop {
        // Engine replies.
        while let Some(outcome) = engine.try_recv() {
            let next = match outcome {
                Ok(reply) => session.on_reply(reply),
                Err(e) => session.on_error(&e),
            };
            send(engine, session, next);
        }
        if engine.is_finished() {
            anyhow::bail!("engine task exited");
        }

        // Render.
        let now = Instant::now();
        let status = HostStatus {
            fps: frames.average_fps(),
        };
        if throttle.should_render(now, LifeView::fingerprint(session, status)) {
            frames.add_frame_time(now.duration_since(last_frame));
            last_frame = now;

            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(session, status, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next step is due.
        let timeout = if session.is_running() {
            boundary_life::types::step_interval(session.config().speed as i64).min(POLL_CAP)
        } else {
            POLL_CAP
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let next = session.apply_action(action);
                        send(engine, session, next);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Step.
        let next = session.tick(Instant::now());
        send(engine, session, next);
    }
}

/// Hand a command to the engine; a rejected send is reported back to the
/// session so its in-flight slot is released.
fn send(engine: &mut EngineWorker, session: &mut Session, command: Option<Command>) {
    let mut command = command;
    while let Some(cmd) = command.take() {
        if let Err(e) = engine.try_send(cmd) {
            command = session.on_error(&e);
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

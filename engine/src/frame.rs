//! Frame Driver
//!
//! Schedules one frame: measure elapsed time, fold in finished asset loads,
//! advance the session, hand the snapshot to the renderer. The renderer is
//! behind a trait so the core never depends on a graphics API.

use std::time::Instant;

use crate::session::{FrameSnapshot, Session};

/// Receives the result of each frame.
pub trait FrameRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot);

    /// Viewport changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Measures wall-clock time between ticks.
///
/// Elapsed time is clamped to `max_delta` so a stall (window drag, debugger)
/// does not turn into one giant step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Seconds since the previous tick, clamped. The first tick returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        self.clamp(elapsed)
    }

    /// Clamp an externally measured delta into `[0, max_delta]`.
    pub fn clamp(&self, elapsed: f32) -> f32 {
        elapsed.clamp(0.0, self.max_delta)
    }

    /// Forget the previous tick, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Owns the session, the clock and the renderer.
pub struct FrameDriver<R: FrameRenderer> {
    session: Session,
    clock: FrameClock,
    renderer: R,
}

impl<R: FrameRenderer> FrameDriver<R> {
    pub fn new(session: Session, renderer: R) -> Self {
        let clock = FrameClock::new(session.config().frame.max_delta);
        Self {
            session,
            clock,
            renderer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Run a frame timed by the wall clock.
    pub fn tick(&mut self, now: Instant) -> FrameSnapshot {
        let elapsed = self.clock.tick(now);
        self.run_frame(elapsed)
    }

    /// Run a frame with an explicit delta (clamped like a measured one).
    pub fn tick_with_delta(&mut self, elapsed: f32) -> FrameSnapshot {
        let elapsed = self.clock.clamp(elapsed);
        self.run_frame(elapsed)
    }

    /// Forward a viewport resize to the renderer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    fn run_frame(&mut self, elapsed: f32) -> FrameSnapshot {
        self.session.poll_assets();
        let snapshot = self.session.advance(elapsed);
        self.renderer.render(&snapshot);
        snapshot
    }
}

//! Frame scheduling: the render loop and the tick host it schedules against.
//!
//! DESIGN
//! ======
//! The loop never blocks and never calls itself. It asks a [`TickHost`] for
//! one future tick at a time and holds that handle; when the host fires the
//! tick, [`RenderLoop::on_tick`] draws once, advances the frame counter and
//! asks for the next one. Ticks for any other handle are stale and ignored.
//!
//! Two kinds of draws reach the registered callback:
//!
//! - animated ticks (`Tick::animated == true`), only while running, which
//!   advance the frame counter;
//! - repaints ([`RenderLoop::repaint`]), requested by the host after input,
//!   which reuse the current frame number and never advance it.
//!
//! `stop()` cancels the outstanding tick before returning, so no animated
//! draw happens after it. `detach()` also drops the callback.

#[cfg(test)]
#[path = "render_loop_test.rs"]
mod render_loop_test;

use tracing::{info, trace};

use crate::surface::Surface;

/// Opaque id of a scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// What a draw callback is told about the frame it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub frame: u64,
    /// False for input-driven repaints; animation must not advance.
    pub animated: bool,
}

/// Per-refresh scheduling primitive supplied by the host.
pub trait TickHost {
    /// Schedule one tick on the next refresh.
    fn request_tick(&mut self) -> TickHandle;
    /// Cancel a scheduled tick. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

pub type DrawFn = Box<dyn FnMut(&mut dyn Surface, Tick)>;

pub struct RenderLoop<H: TickHost> {
    host: H,
    draw: Option<DrawFn>,
    running: bool,
    frame: u64,
    pending: Option<TickHandle>,
}

impl<H: TickHost> RenderLoop<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self { host, draw: None, running: false, frame: 0, pending: None }
    }

    /// Register `draw` and start animating.
    pub fn start(&mut self, draw: DrawFn) {
        self.register(draw);
        self.resume();
    }

    /// Register `draw` for repaints without starting the animation.
    pub fn register(&mut self, draw: DrawFn) {
        self.draw = Some(draw);
    }

    /// Start animating with the already registered callback.
    pub fn resume(&mut self) {
        if self.draw.is_none() || self.running {
            return;
        }
        self.running = true;
        self.schedule();
        info!(frame = self.frame, "render loop started");
    }

    /// Stop animating. The pending tick is cancelled before this returns.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_tick(handle);
        }
        if self.running {
            self.running = false;
            info!(frame = self.frame, "render loop stopped");
        }
    }

    /// Stop and drop the callback; nothing is drawn after this.
    pub fn detach(&mut self) {
        self.stop();
        self.draw = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Next frame number to be drawn.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Fire the tick `handle`. Returns the tick drawn, or `None` if it was stale.
    pub fn on_tick(&mut self, handle: TickHandle, surface: &mut dyn Surface) -> Option<Tick> {
        if self.pending != Some(handle) {
            trace!(?handle, "stale tick ignored");
            return None;
        }
        self.pending = None;
        if !self.running {
            return None;
        }
        let draw = self.draw.as_mut()?;

        let tick = Tick { frame: self.frame, animated: true };
        draw(surface, tick);
        self.frame += 1;
        self.schedule();
        Some(tick)
    }

    /// Redraw without advancing animation. Works while stopped.
    pub fn repaint(&mut self, surface: &mut dyn Surface) -> Option<Tick> {
        let draw = self.draw.as_mut()?;
        let tick = Tick { frame: self.frame, animated: false };
        draw(surface, tick);
        Some(tick)
    }

    fn schedule(&mut self) {
        if self.running && self.pending.is_none() {
            self.pending = Some(self.host.request_tick());
        }
    }
}

impl<H: TickHost> Drop for RenderLoop<H> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_tick(handle);
        }
    }
}

/// In-process tick host holding at most one outstanding request.
///
/// Whoever owns the refresh cadence calls [`FrameClock::take_due`] on each
/// refresh and fires the returned handle.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_id: u64,
    requested: Option<TickHandle>,
    cancelled: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, consumed.
    pub fn take_due(&mut self) -> Option<TickHandle> {
        self.requested.take()
    }

    #[must_use]
    pub fn peek(&self) -> Option<TickHandle> {
        self.requested
    }

    /// How many requests were cancelled before firing.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl TickHost for FrameClock {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.requested = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.requested == Some(handle) {
            self.requested = None;
            self.cancelled += 1;
        }
    }
}

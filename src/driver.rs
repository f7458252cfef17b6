//! Frame driver: pumps input and render ticks from a tokio interval.
//!
//! DESIGN
//! ======
//! Each refresh does two things in order. First, queued pointer events are
//! applied to the board. Then, if the render loop has a tick due, that tick
//! fires; otherwise, if any input was applied, the scene is repainted
//! without advancing animation. Input never lands while a frame is drawing.
//!
//! The board lives in an `Rc<RefCell<_>>` shared with the draw callback.
//! The callback borrows it only for the duration of one frame and skips the
//! frame with a warning if it is already borrowed.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::input::InputQueue;
use crate::render_loop::{DrawFn, FrameClock, RenderLoop, Tick};
use crate::surface::Surface;

/// Counters for one driver's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriverStats {
    pub refreshes: u64,
    pub animated_frames: u64,
    pub repaints: u64,
    pub events_applied: u64,
}

pub struct Driver<S: Surface> {
    board: Rc<RefCell<Board>>,
    render: RenderLoop<FrameClock>,
    input: InputQueue,
    surface: S,
    stats: DriverStats,
}

impl<S: Surface> Driver<S> {
    /// Wire `board` to `surface`. Animation starts if `animated` is set;
    /// otherwise the scene only redraws after input.
    pub fn new(board: Board, surface: S, rng: StdRng, animated: bool) -> Self {
        let board = Rc::new(RefCell::new(board));
        let mut render = RenderLoop::new(FrameClock::new());
        let draw = draw_fn(Rc::clone(&board), rng);
        if animated {
            render.start(draw);
        } else {
            render.register(draw);
        }
        Self { board, render, input: InputQueue::default(), surface, stats: DriverStats::default() }
    }

    // --- Accessors ---

    /// Shared handle to the board. Do not hold a borrow across a refresh.
    #[must_use]
    pub fn board(&self) -> Rc<RefCell<Board>> {
        Rc::clone(&self.board)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    #[must_use]
    pub fn render_loop(&self) -> &RenderLoop<FrameClock> {
        &self.render
    }

    #[must_use]
    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    // --- Control ---

    /// Toggle animation. Stopping cancels the pending tick immediately.
    pub fn set_animated(&mut self, animated: bool) {
        if animated {
            self.render.resume();
        } else {
            self.render.stop();
        }
    }

    /// Draw the current state without advancing animation.
    pub fn repaint(&mut self) -> Option<Tick> {
        let tick = self.render.repaint(&mut self.surface)?;
        self.stats.repaints += 1;
        Some(tick)
    }

    /// One refresh: apply input, then fire the due tick or repaint.
    pub fn refresh(&mut self) -> Option<Tick> {
        self.stats.refreshes += 1;
        let applied = match self.board.try_borrow_mut() {
            Ok(mut board) => self.input.apply(&mut board),
            Err(e) => {
                warn!(error = %e, pending = self.input.len(), "board busy; input deferred");
                0
            }
        };
        self.stats.events_applied += applied as u64;

        if let Some(handle) = self.render.host_mut().take_due() {
            let tick = self.render.on_tick(handle, &mut self.surface);
            if tick.is_some() {
                self.stats.animated_frames += 1;
            }
            return tick;
        }
        if applied > 0 {
            return self.repaint();
        }
        None
    }

    /// Refresh every `interval` until `limit` refreshes have run, or forever
    /// when `limit` is `None`. `script` runs before each refresh with the
    /// refresh number and can queue input.
    pub async fn run<F>(&mut self, interval: Duration, limit: Option<u64>, mut script: F) -> DriverStats
    where
        F: FnMut(u64, &mut InputQueue),
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(?interval, ?limit, running = self.render.is_running(), "driver started");

        let mut n = 0;
        while limit.is_none_or(|max| n < max) {
            ticker.tick().await;
            script(n, &mut self.input);
            self.refresh();
            n += 1;
        }

        debug!(stats = ?self.stats, "driver finished");
        self.stats
    }

    /// Stop animating and release the draw callback.
    pub fn shutdown(&mut self) {
        self.render.detach();
        self.input.clear();
        info!(frame = self.render.frame(), stats = ?self.stats, "driver shut down");
    }
}

fn draw_fn(board: Rc<RefCell<Board>>, mut rng: StdRng) -> DrawFn {
    Box::new(move |surface: &mut dyn Surface, tick: Tick| match board.try_borrow_mut() {
        Ok(mut board) => board.draw_frame(surface, tick, &mut rng),
        Err(e) => warn!(error = %e, frame = tick.frame, "board busy; frame skipped"),
    })
}

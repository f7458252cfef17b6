//! Input adapter: host pointer events in surface coordinates, queued and
//! applied to the board between render ticks.
//!
//! Hosts report pointer positions relative to their viewport. The adapter
//! subtracts the surface's top-left offset once, so everything past this
//! module works in surface coordinates. Events are buffered in arrival order
//! and drained by [`InputQueue::apply`], which the driver calls before each
//! frame. The board is therefore never touched while a frame is drawing.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::board::Board;
use crate::point::Point;

/// One pointer event, already in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down(Point),
    /// Pointer moved, pressed or not.
    Move(Point),
    /// Button released.
    Up(Point),
    /// Press and release without a drag in between.
    Click(Point),
}

impl PointerEvent {
    #[must_use]
    pub fn position(self) -> Point {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) | Self::Click(p) => p,
        }
    }
}

/// Where the surface sits inside the host viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
}

impl SurfaceBounds {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a viewport position into surface coordinates.
    #[must_use]
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }
}

/// FIFO of pointer events waiting for the next tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<PointerEvent>,
    bounds: SurfaceBounds,
}

impl InputQueue {
    #[must_use]
    pub fn new(bounds: SurfaceBounds) -> Self {
        Self { events: VecDeque::new(), bounds }
    }

    #[must_use]
    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// The surface moved within the viewport.
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
    }

    /// Queue an event already in surface coordinates.
    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    // --- Host-coordinate entry points ---

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) {
        self.push(PointerEvent::Down(self.bounds.to_local(client_x, client_y)));
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.push(PointerEvent::Move(self.bounds.to_local(client_x, client_y)));
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) {
        self.push(PointerEvent::Up(self.bounds.to_local(client_x, client_y)));
    }

    pub fn click(&mut self, client_x: f64, client_y: f64) {
        self.push(PointerEvent::Click(self.bounds.to_local(client_x, client_y)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drain every queued event into `board`, in order. Returns how many
    /// events were applied.
    ///
    /// A click that cannot produce an eye is logged and skipped; the rest of
    /// the queue still applies.
    pub fn apply(&mut self, board: &mut Board) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.pop_front() {
            trace!(?event, "pointer event");
            match event {
                PointerEvent::Down(p) => {
                    board.on_pointer_down(p);
                }
                PointerEvent::Move(p) => board.on_pointer_move(p),
                PointerEvent::Up(p) => {
                    board.on_pointer_move(p);
                    board.on_pointer_up();
                }
                PointerEvent::Click(p) => {
                    if let Err(e) = board.on_click(p) {
                        warn!(error = %e, x = p.x, y = p.y, "click ignored");
                    }
                }
            }
            applied += 1;
        }
        applied
    }
}

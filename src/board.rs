//! The board: an ordered set of eyes plus selection, drag routing, and
//! per-frame scene drawing.
//!
//! DESIGN
//! ======
//! Eyes are kept in insertion order, which is also draw order: the last eye
//! is drawn on top and is the first candidate in hit-tests. Ids are unique
//! within the board; adding an eye with an existing id replaces it in place.
//!
//! `selected_id` and `dragging_id` always name eyes that are present.
//! Removing or resetting clears them when their eye goes away.
//!
//! Pointer handlers are applied between render ticks by the driver; the
//! board never sees a pointer event while it is drawing.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::color;
use crate::consts::{DEFAULT_BLINK_PROB, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_WARMUP_FRAMES};
use crate::eye::{DragMode, Eye, EyeConfig, EyeError, EyePatch, Gaze};
use crate::layout::{GridLayout, grid_eyes};
use crate::point::Point;
use crate::rect::ContainLevel;
use crate::render_loop::Tick;
use crate::surface::{Cursor, Surface};

/// Board-wide behavior switches.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    /// Surface size, used for the initial pointer position.
    pub width: f64,
    pub height: f64,
    /// Per-frame chance that an idle eye starts blinking.
    pub blink_probability: f64,
    /// Animated frames before blinking is allowed.
    pub warmup_frames: u64,
    /// Edit mode: pointer drags move and resize eyes.
    pub editing: bool,
    /// Draw control boxes and the pointer label.
    pub debug: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            blink_probability: DEFAULT_BLINK_PROB,
            warmup_frames: DEFAULT_WARMUP_FRAMES,
            editing: false,
            debug: false,
        }
    }
}

pub struct Board {
    eyes: Vec<Eye>,
    selected_id: Option<String>,
    dragging_id: Option<String>,
    pointer: Point,
    settings: BoardSettings,
    scans: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSettings::default())
    }
}

impl Board {
    /// An empty board with the pointer resting at the surface center.
    #[must_use]
    pub fn new(settings: BoardSettings) -> Self {
        Self {
            eyes: Vec::new(),
            selected_id: None,
            dragging_id: None,
            pointer: Point::new(settings.width / 2.0, settings.height / 2.0),
            settings,
            scans: 0,
        }
    }

    /// A board populated with the default grid.
    ///
    /// # Errors
    ///
    /// Returns an [`EyeError`] if the layout produces an invalid eye.
    pub fn with_grid(layout: &GridLayout, settings: BoardSettings) -> Result<Self, EyeError> {
        let mut board = Self::new(settings);
        board.reset(grid_eyes(layout)?);
        Ok(board)
    }

    // --- Settings ---

    #[must_use]
    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.settings.editing = editing;
        if !editing {
            self.on_pointer_up();
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.settings.debug = debug;
    }

    // --- Collection ---

    /// Append an eye. An eye with the same id is replaced in place.
    pub fn add(&mut self, eye: Eye) {
        if let Some(existing) = self.eyes.iter_mut().find(|e| e.id() == eye.id()) {
            debug!(id = %eye.id(), "eye replaced");
            *existing = eye;
        } else {
            debug!(id = %eye.id(), "eye added");
            self.eyes.push(eye);
        }
    }

    /// Remove an eye by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Eye> {
        let idx = self.index_of(id)?;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        if self.dragging_id.as_deref() == Some(id) {
            self.dragging_id = None;
        }
        debug!(%id, "eye removed");
        Some(self.eyes.remove(idx))
    }

    /// Replace every eye and clear selection.
    pub fn reset(&mut self, eyes: Vec<Eye>) {
        self.eyes.clear();
        self.selected_id = None;
        self.dragging_id = None;
        for eye in eyes {
            self.add(eye);
        }
        debug!(count = self.eyes.len(), "board reset");
    }

    /// Eyes in draw order, bottom first.
    #[must_use]
    pub fn eyes(&self) -> &[Eye] {
        &self.eyes
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Eye> {
        self.eyes.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.eyes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eyes.is_empty()
    }

    /// Apply a property edit to one eye. Returns `Ok(false)` if no such eye.
    ///
    /// # Errors
    ///
    /// Returns the eye's validation error; the eye is left untouched.
    pub fn update_eye(&mut self, id: &str, patch: &EyePatch) -> Result<bool, EyeError> {
        let Some(eye) = self.eyes.iter_mut().find(|e| e.id() == id) else {
            return Ok(false);
        };
        eye.apply(patch)?;
        Ok(true)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.eyes.iter().position(|e| e.id() == id)
    }

    // --- Selection ---

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Eye> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    /// Topmost eye under `p` and how it contains `p`. Does not select.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<(&Eye, ContainLevel)> {
        self.eyes.iter().rev().find_map(|eye| match eye.hit_region(p) {
            ContainLevel::None => None,
            level => Some((eye, level)),
        })
    }

    /// Select the eye under `p`.
    ///
    /// If the current selection still covers `p` it is kept without looking
    /// at any other eye. Otherwise this is [`Board::select_full_scan`].
    pub fn select(&mut self, p: Point) -> Option<&Eye> {
        if let Some(idx) = self.selected_id.as_deref().and_then(|id| self.index_of(id)) {
            if self.eyes[idx].hit_region(p) != ContainLevel::None {
                return self.eyes.get(idx);
            }
        }
        self.select_full_scan(p)
    }

    /// Select the topmost eye under `p`, or clear the selection on a miss.
    pub fn select_full_scan(&mut self, p: Point) -> Option<&Eye> {
        let hit = self.scan(p);
        let id = hit.map(|idx| self.eyes[idx].id().to_owned());
        if id != self.selected_id {
            debug!(selected = ?id, previous = ?self.selected_id, "selection changed");
        }
        self.selected_id = id;
        hit.and_then(|idx| self.eyes.get(idx))
    }

    /// Number of eyes examined by selection scans so far.
    #[must_use]
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    fn scan(&mut self, p: Point) -> Option<usize> {
        for idx in (0..self.eyes.len()).rev() {
            self.scans += 1;
            if self.eyes[idx].hit_region(p) != ContainLevel::None {
                return Some(idx);
            }
        }
        None
    }

    // --- Pointer input ---

    /// Last known pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Id of the eye bound to the current drag, if any.
    #[must_use]
    pub fn dragging_id(&self) -> Option<&str> {
        self.dragging_id.as_deref()
    }

    /// In edit mode, select the eye under `p` and start its drag.
    ///
    /// A drag still in progress ends first, so a press on empty space
    /// leaves nothing bound to the pointer.
    pub fn on_pointer_down(&mut self, p: Point) -> Option<DragMode> {
        self.pointer = p;
        self.on_pointer_up();
        if !self.settings.editing {
            return None;
        }
        let id = self.select(p).map(|eye| eye.id().to_owned())?;
        let idx = self.index_of(&id)?;
        let mode = self.eyes[idx].on_pointer_down(p);
        if mode != DragMode::None {
            self.dragging_id = Some(id);
        }
        Some(mode)
    }

    /// Record the pointer and feed it to the dragging eye.
    pub fn on_pointer_move(&mut self, p: Point) {
        self.pointer = p;
        if let Some(idx) = self.dragging_id.as_deref().and_then(|id| self.index_of(id)) {
            self.eyes[idx].on_pointer_move(p);
        }
    }

    /// End the current drag, if any.
    pub fn on_pointer_up(&mut self) {
        if let Some(id) = self.dragging_id.take() {
            if let Some(idx) = self.index_of(&id) {
                self.eyes[idx].on_pointer_up();
            }
        }
    }

    /// Edit mode selects; preview mode adds a default eye at `p`.
    ///
    /// Returns the id of the selected or added eye.
    ///
    /// # Errors
    ///
    /// Returns an [`EyeError`] if `p` is not a valid eye center.
    pub fn on_click(&mut self, p: Point) -> Result<Option<String>, EyeError> {
        self.pointer = p;
        if self.settings.editing {
            return Ok(self.select(p).map(|eye| eye.id().to_owned()));
        }
        let eye = Eye::new(format!("eye-{}", Uuid::new_v4()), p, &EyeConfig::default())?;
        let id = eye.id().to_owned();
        self.add(eye);
        Ok(Some(id))
    }

    /// Cursor for the current pointer: the drag's cursor while dragging,
    /// otherwise whatever the topmost eye under the pointer asks for.
    #[must_use]
    pub fn hover_cursor(&self) -> Cursor {
        if let Some(cursor) = self.dragging_id.as_deref().and_then(|id| self.get(id)).and_then(Eye::drag_cursor) {
            return cursor;
        }
        self.hit_test(self.pointer)
            .map_or(Cursor::Default, |(eye, _)| eye.cursor_at(self.pointer))
    }

    // --- Rendering ---

    /// Draw one frame: background, eyes, and the edit/debug overlays.
    ///
    /// Blinks only advance on animated ticks after the warm-up period.
    pub fn draw_frame<R: Rng>(&mut self, surface: &mut dyn Surface, tick: Tick, rng: &mut R) {
        let (width, height) = surface.size();
        surface.begin_frame();
        surface.set_fill_style(color::BACKGROUND);
        surface.fill_rect(Point::default(), width, height);

        let gaze = Gaze { pointer: self.pointer, surface_width: width, surface_height: height };
        let blink = tick.animated && tick.frame > self.settings.warmup_frames;
        let probability = self.settings.blink_probability;
        let show_boxes = self.settings.debug;

        for eye in &mut self.eyes {
            if blink {
                eye.blink_randomly(rng, probability);
            }
            if show_boxes {
                eye.draw_control_box(surface);
            }
            eye.draw(surface, &gaze);
        }

        if self.settings.editing {
            surface.set_cursor(self.hover_cursor());
        }

        if self.settings.debug {
            surface.set_fill_style(color::WHITE);
            self.pointer.label(surface, "p");
        }
    }
}

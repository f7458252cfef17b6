//! The eye entity: contour geometry, pupil following, blinking, and the
//! drag/resize state machine.
//!
//! GEOMETRY
//! ========
//! The pupil radius `r` is the only stored size. Everything else is derived
//! from it on demand:
//!
//! - contour radius `R = round(3r / (1 - cos θ))` with `θ = π/2`, the radius
//!   of the eyelid arc;
//! - corner distance `d = R · sin(θ/2) · 1.05`, how far the eye corners sit
//!   from the center;
//! - bounding box `center ± (d, r)`, used for hit-testing.
//!
//! Every radius write goes through a clamp to [`MIN_PUPIL_RADIUS`], so the
//! logarithmic ring spacing never sees a zero or negative radius.
//!
//! BLINKING
//! ========
//! `lid_offset` displaces the upper lid's control point and lives in
//! `[-2r, 0]`. A blink runs `Idle → Opening → Closing → Idle`: Opening drives
//! the offset down to `-2r` (lid flat, eye shut), Closing brings it back to
//! `0`. Only an idle eye can start a blink.
//!
//! INTERACTION
//! ===========
//! Pointer-down picks a [`DragMode`] from the containment level: the strict
//! box moves the eye, the margin ring resizes it from the nearest handle.
//! Resizing keeps the center anchored. Pointer-up always returns to
//! [`DragMode::None`].

#[cfg(test)]
#[path = "eye_test.rs"]
mod eye_test;

use std::f64::consts::{PI, TAU};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color;
use crate::consts::{
    BLINK_SPEED, DEFAULT_LINE_WIDTH, DEFAULT_PUPIL_RADIUS, MAGIC_CORNER_FACTOR, MAGIC_EYELID_RADIUS_FACTOR,
    MIN_PUPIL_RADIUS, NUM_PUPILS, PUPIL_DOT_FACTOR, THETA,
};
use crate::point::Point;
use crate::rect::{ContainLevel, Rect, RectStyle};
use crate::surface::{Cursor, LocalFrame, Surface};

// =============================================================================
// TYPES
// =============================================================================

/// Rejected eye construction or edit. Nothing is written when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EyeError {
    #[error("eye id must not be empty")]
    EmptyId,
    #[error("eye center must be finite, got ({x}, {y})")]
    NonFiniteCenter { x: f64, y: f64 },
    #[error("pupil radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("line width must be positive and finite, got {0}")]
    InvalidLineWidth(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlinkPhase {
    #[default]
    Idle,
    /// Lid travelling down toward shut.
    Opening,
    /// Lid travelling back up to rest.
    Closing,
}

/// Which edge of the bounding box a resize drag is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeHandle {
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Left | Self::Right => Cursor::ColResize,
            Self::Top | Self::Bottom => Cursor::RowResize,
        }
    }
}

/// Which part of the eye is bound to pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Body,
    Resize(ResizeHandle),
}

/// Construction options. Unset fields take the documented defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EyeConfig {
    /// Defaults to [`DEFAULT_PUPIL_RADIUS`].
    pub pupil_radius: Option<f64>,
    /// Defaults to [`color::PINK`].
    pub color: Option<String>,
    /// Defaults to [`DEFAULT_LINE_WIDTH`].
    pub line_width: Option<f64>,
}

/// Sparse edit from a property panel. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EyePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pupil_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

/// Plain record of an eye's public fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub pupil_radius: f64,
    pub color: String,
    pub line_width: f64,
}

/// What the pupils look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaze {
    /// Last known pointer position.
    pub pointer: Point,
    pub surface_width: f64,
    pub surface_height: f64,
}

// =============================================================================
// GEOMETRY HELPERS
// =============================================================================

/// Radius of the eyelid arc for a pupil of radius `pupil_radius`.
#[must_use]
pub fn contour_radius_for(pupil_radius: f64) -> f64 {
    ((3.0 * pupil_radius) / (1.0 - THETA.cos())).round()
}

/// Distance from the eye center to either corner for a given contour radius.
#[must_use]
pub fn corner_distance_for(contour_radius: f64) -> f64 {
    contour_radius * (THETA / 2.0).sin() * MAGIC_CORNER_FACTOR
}

/// Pupil radius whose (unrounded) corner distance is `corner_distance`.
fn pupil_radius_for_corner_distance(corner_distance: f64) -> f64 {
    corner_distance / ((THETA / 2.0).sin() * MAGIC_CORNER_FACTOR) * (1.0 - THETA.cos()) / 3.0
}

/// Linear interpolation of `value` from one range onto another, unclamped.
///
/// A zero-width input range maps everything to `out_min`.
#[must_use]
pub fn map_range(value: f64, (in_min, in_max): (f64, f64), (out_min, out_max): (f64, f64)) -> f64 {
    let span = in_max - in_min;
    if span.abs() < f64::EPSILON {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / span + out_min
}

fn validate_radius(r: f64) -> Result<f64, EyeError> {
    if r.is_finite() && r > 0.0 {
        Ok(r.max(MIN_PUPIL_RADIUS))
    } else {
        Err(EyeError::InvalidRadius(r))
    }
}

fn validate_line_width(w: f64) -> Result<f64, EyeError> {
    if w.is_finite() && w > 0.0 { Ok(w) } else { Err(EyeError::InvalidLineWidth(w)) }
}

fn validate_center(center: Point) -> Result<Point, EyeError> {
    if center.is_finite() {
        Ok(center)
    } else {
        Err(EyeError::NonFiniteCenter { x: center.x, y: center.y })
    }
}

/// Handle on the side of `bounds` that `p` overshoots the most.
fn nearest_handle(bounds: &Rect, p: Point) -> ResizeHandle {
    let c = bounds.center();
    let over_x = (p.x - c.x).abs() - bounds.half_width();
    let over_y = (p.y - c.y).abs() - bounds.half_height();
    if over_x >= over_y {
        if p.x < c.x { ResizeHandle::Left } else { ResizeHandle::Right }
    } else if p.y < c.y {
        ResizeHandle::Top
    } else {
        ResizeHandle::Bottom
    }
}

fn ring(surface: &mut dyn Surface, center: Point, radius: f64) {
    surface.begin_path();
    surface.arc(center, radius, 0.0, TAU);
    surface.stroke();
    surface.close_path();
}

// =============================================================================
// EYE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Eye {
    id: String,
    center: Point,
    pupil_radius: f64,
    color: String,
    line_width: f64,
    blink: BlinkPhase,
    lid_offset: f64,
    drag: DragMode,
}

impl Eye {
    /// Create an eye at `center`.
    ///
    /// Positive radii below [`MIN_PUPIL_RADIUS`] are raised to it.
    ///
    /// # Errors
    ///
    /// Returns an [`EyeError`] for an empty id, a non-finite center, or a
    /// radius / line width that is not positive and finite.
    pub fn new(id: impl Into<String>, center: Point, config: &EyeConfig) -> Result<Self, EyeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EyeError::EmptyId);
        }
        let center = validate_center(center)?;
        let pupil_radius = validate_radius(config.pupil_radius.unwrap_or(DEFAULT_PUPIL_RADIUS))?;
        let line_width = validate_line_width(config.line_width.unwrap_or(DEFAULT_LINE_WIDTH))?;
        let color = config.color.clone().unwrap_or_else(|| color::PINK.to_owned());

        Ok(Self {
            id,
            center,
            pupil_radius,
            color,
            line_width,
            blink: BlinkPhase::Idle,
            lid_offset: 0.0,
            drag: DragMode::None,
        })
    }

    /// Rebuild an eye from its record.
    ///
    /// # Errors
    ///
    /// Same as [`Eye::new`].
    pub fn from_record(record: &EyeRecord) -> Result<Self, EyeError> {
        let config = EyeConfig {
            pupil_radius: Some(record.pupil_radius),
            color: Some(record.color.clone()),
            line_width: Some(record.line_width),
        };
        Self::new(record.id.clone(), Point::new(record.x, record.y), &config)
    }

    #[must_use]
    pub fn to_record(&self) -> EyeRecord {
        EyeRecord {
            id: self.id.clone(),
            x: self.center.x,
            y: self.center.y,
            pupil_radius: self.pupil_radius,
            color: self.color.clone(),
            line_width: self.line_width,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn pupil_radius(&self) -> f64 {
        self.pupil_radius
    }

    #[must_use]
    pub fn contour_radius(&self) -> f64 {
        contour_radius_for(self.pupil_radius)
    }

    #[must_use]
    pub fn corner_distance(&self) -> f64 {
        corner_distance_for(self.contour_radius())
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    #[must_use]
    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink
    }

    #[must_use]
    pub fn lid_offset(&self) -> f64 {
        self.lid_offset
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }

    /// Bounding box: half-width is the corner distance, half-height the pupil radius.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.center, self.corner_distance(), self.pupil_radius)
    }

    /// Upper lid control point, relative to the center.
    #[must_use]
    pub fn lid_control(&self) -> Point {
        Point::new(0.0, -(2.0 * self.pupil_radius + self.lid_offset))
    }

    // --- Mutation ---

    /// Validate and apply a property edit. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns an [`EyeError`] if any present field is invalid; the eye is
    /// left untouched.
    pub fn apply(&mut self, patch: &EyePatch) -> Result<(), EyeError> {
        let center = validate_center(Point::new(
            patch.x.unwrap_or(self.center.x),
            patch.y.unwrap_or(self.center.y),
        ))?;
        let radius = patch.pupil_radius.map(validate_radius).transpose()?;
        let line_width = patch.line_width.map(validate_line_width).transpose()?;

        self.center = center;
        if let Some(r) = radius {
            self.set_pupil_radius(r);
        }
        if let Some(w) = line_width {
            self.line_width = w;
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        Ok(())
    }

    /// Store a new pupil radius, clamped to the floor, and keep the lid in range.
    fn set_pupil_radius(&mut self, requested: f64) {
        let r = if requested.is_finite() { requested.max(MIN_PUPIL_RADIUS) } else { MIN_PUPIL_RADIUS };
        if !requested.is_finite() || requested < MIN_PUPIL_RADIUS {
            debug!(id = %self.id, requested, clamped = r, "pupil radius clamped");
        }
        self.pupil_radius = r;
        self.lid_offset = self.lid_offset.clamp(-2.0 * r, 0.0);
    }

    // --- Blinking ---

    /// Begin a blink. No effect unless the eye is idle.
    pub fn start_blinking(&mut self) {
        if self.blink == BlinkPhase::Idle {
            self.blink = BlinkPhase::Opening;
        }
    }

    /// Advance the blink by one frame.
    pub fn update_blink(&mut self) {
        let shut = -2.0 * self.pupil_radius;
        match self.blink {
            BlinkPhase::Idle => {}
            BlinkPhase::Opening => {
                if self.lid_offset > shut {
                    self.lid_offset = (self.lid_offset - BLINK_SPEED).max(shut);
                } else {
                    self.blink = BlinkPhase::Closing;
                }
            }
            BlinkPhase::Closing => {
                if self.lid_offset < 0.0 {
                    self.lid_offset = (self.lid_offset + BLINK_SPEED).min(0.0);
                } else {
                    self.blink = BlinkPhase::Idle;
                }
            }
        }
    }

    /// Start a blink with chance `probability`, then advance one frame.
    pub fn blink_randomly<R: Rng>(&mut self, rng: &mut R, probability: f64) {
        if rng.random::<f64>() < probability {
            self.start_blinking();
        }
        self.update_blink();
    }

    // --- Pupils ---

    /// Offset of the pupils from the center for a pointer at `pointer`.
    ///
    /// The pointer's displacement from the eye is mapped linearly: across the
    /// surface width onto the corner distance, across the height onto the
    /// pupil radius. Not clamped, so a pointer beyond the surface pushes the
    /// pupils further out.
    #[must_use]
    pub fn pupil_offset(&self, pointer: Point, surface_width: f64, surface_height: f64) -> Point {
        let x = -map_range(pointer.x - self.center.x, (0.0, surface_width), (0.0, -self.corner_distance()));
        let y = map_range(pointer.y - self.center.y, (0.0, surface_height), (0.0, self.pupil_radius));
        Point::new(x, y)
    }

    /// Ring radii, innermost first: `r · ln(i + 2) / ln(n + 1)`.
    #[must_use]
    pub fn pupil_ring_radii(&self) -> Vec<f64> {
        let denom = f64::from(NUM_PUPILS + 1).ln();
        (0..NUM_PUPILS)
            .map(|i| self.pupil_radius * f64::from(i + 2).ln() / denom)
            .collect()
    }

    // --- Rendering ---

    /// Draw the contour and pupils. Leaves the surface state as it found it.
    pub fn draw(&self, surface: &mut dyn Surface, gaze: &Gaze) {
        surface.save();
        surface.set_stroke_style(&self.color);
        surface.set_line_width(self.line_width);
        surface.set_line_dash(&[]);

        self.draw_contour(surface);
        self.draw_pupils(surface, gaze);

        surface.restore();
    }

    /// Both eyelids as one path, clipped and stroked. The clip stays active
    /// so pupils drawn afterwards stay inside the eye.
    pub fn draw_contour(&self, surface: &mut dyn Surface) {
        let frame = LocalFrame::at(self.center);
        surface.begin_path();
        self.draw_lid(surface, &frame);
        self.draw_lid(surface, &frame.rotated(PI));
        surface.clip();
        surface.stroke();
        surface.close_path();
    }

    fn draw_lid(&self, surface: &mut dyn Surface, frame: &LocalFrame) {
        let d = self.corner_distance();
        let corner_a = frame.to_surface(Point::new(-d, 0.0));
        let corner_b = frame.to_surface(Point::new(d, 0.0));
        surface.move_to(corner_a);
        surface.arc_to(
            frame.to_surface(self.lid_control()),
            corner_b,
            self.contour_radius() * MAGIC_EYELID_RADIUS_FACTOR,
        );
        surface.line_to(corner_b);
    }

    /// Concentric rings plus a center dot, shifted toward the gaze.
    pub fn draw_pupils(&self, surface: &mut dyn Surface, gaze: &Gaze) {
        let focus = self
            .center
            .add(self.pupil_offset(gaze.pointer, gaze.surface_width, gaze.surface_height));
        for radius in self.pupil_ring_radii() {
            ring(surface, focus, radius);
        }
        ring(surface, focus, self.pupil_radius * PUPIL_DOT_FACTOR);
    }

    /// Debug overlay: translucent margin ring, dashed boundary, corner labels.
    pub fn draw_control_box(&self, surface: &mut dyn Surface) {
        let bounds = self.bounds();

        surface.save();
        let margin_style = RectStyle {
            dashed: false,
            fill: Some(color::with_alpha(color::PINK, color::MARGIN_ALPHA)),
            with_stroke: false,
            ..RectStyle::default()
        };
        bounds.margin().draw(surface, &margin_style);
        surface.restore();

        surface.save();
        let boundary_style = RectStyle { fill: Some(color::BLACK.to_owned()), ..RectStyle::default() };
        bounds.draw(surface, &boundary_style);
        surface.restore();

        surface.save();
        surface.set_fill_style(color::WHITE);
        bounds.draw_corners(surface);
        surface.restore();
    }

    // --- Hit-testing and dragging ---

    #[must_use]
    pub fn hit_region(&self, p: Point) -> ContainLevel {
        self.bounds().detailed_contains(p)
    }

    /// The resize handle under `p`, if `p` is in the margin ring.
    #[must_use]
    pub fn handle_at(&self, p: Point) -> Option<ResizeHandle> {
        let bounds = self.bounds();
        (bounds.detailed_contains(p) == ContainLevel::Margin).then(|| nearest_handle(&bounds, p))
    }

    /// Cursor for a containment level, without handle direction.
    #[must_use]
    pub fn cursor_for(level: ContainLevel) -> Cursor {
        match level {
            ContainLevel::Inner => Cursor::Grab,
            ContainLevel::Margin => Cursor::ColResize,
            ContainLevel::None => Cursor::Default,
        }
    }

    /// Cursor for a pointer at `p`, with the handle's direction in the margin.
    #[must_use]
    pub fn cursor_at(&self, p: Point) -> Cursor {
        match self.hit_region(p) {
            ContainLevel::Margin => self.handle_at(p).map_or(Cursor::ColResize, ResizeHandle::cursor),
            level => Self::cursor_for(level),
        }
    }

    /// Cursor while a drag is in progress.
    #[must_use]
    pub fn drag_cursor(&self) -> Option<Cursor> {
        match self.drag {
            DragMode::None => None,
            DragMode::Body => Some(Cursor::Grab),
            DragMode::Resize(handle) => Some(handle.cursor()),
        }
    }

    /// Pick a drag mode from where the pointer went down.
    pub fn on_pointer_down(&mut self, p: Point) -> DragMode {
        let bounds = self.bounds();
        self.drag = match bounds.detailed_contains(p) {
            ContainLevel::Inner => DragMode::Body,
            ContainLevel::Margin => DragMode::Resize(nearest_handle(&bounds, p)),
            ContainLevel::None => DragMode::None,
        };
        if self.drag != DragMode::None {
            debug!(id = %self.id, mode = ?self.drag, "drag started");
        }
        self.drag
    }

    /// Follow the pointer according to the current drag mode.
    ///
    /// Non-finite positions are ignored.
    pub fn on_pointer_move(&mut self, p: Point) {
        if !p.is_finite() {
            return;
        }
        match self.drag {
            DragMode::None => {}
            DragMode::Body => self.center = p,
            DragMode::Resize(ResizeHandle::Left | ResizeHandle::Right) => {
                let corner_distance = (p.x - self.center.x).abs();
                self.set_pupil_radius(pupil_radius_for_corner_distance(corner_distance));
            }
            DragMode::Resize(ResizeHandle::Top | ResizeHandle::Bottom) => {
                self.set_pupil_radius((p.y - self.center.y).abs());
            }
        }
    }

    /// End any drag.
    pub fn on_pointer_up(&mut self) {
        if self.drag != DragMode::None {
            debug!(id = %self.id, mode = ?self.drag, center = ?self.center, r = self.pupil_radius, "drag ended");
        }
        self.drag = DragMode::None;
    }
}

impl TryFrom<EyeRecord> for Eye {
    type Error = EyeError;

    fn try_from(record: EyeRecord) -> Result<Self, Self::Error> {
        Self::from_record(&record)
    }
}

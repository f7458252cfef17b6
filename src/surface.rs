//! Drawing surface contract and a recording implementation.
//!
//! The eye model never talks to a concrete canvas. It emits immediate-mode
//! path commands against [`Surface`], which any 2D vector backend can
//! implement. Transforms are not part of the contract: callers map their
//! local coordinates through a [`LocalFrame`] before emitting, so a draw
//! routine's output depends only on its inputs.
//!
//! [`RecordingSurface`] captures every call as a [`DrawCommand`]. It backs
//! the headless runner and lets tests assert on exactly what was drawn.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::point::Point;

/// Pointer cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over an eye body; dragging moves it.
    Grab,
    /// Over a left or right resize handle.
    ColResize,
    /// Over a top or bottom resize handle.
    RowResize,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
        }
    }
}

/// Immediate-mode 2D drawing context.
pub trait Surface {
    /// Surface size in drawing units.
    fn size(&self) -> (f64, f64);

    /// Called once at the start of every drawn frame.
    fn begin_frame(&mut self) {}

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Circular arc tangent to the lines (current → `ctrl`) and (`ctrl` → `to`).
    fn arc_to(&mut self, ctrl: Point, to: Point, radius: f64);
    /// Full or partial circle around `center`, angles in radians.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn rect(&mut self, origin: Point, width: f64, height: f64);

    fn fill(&mut self);
    fn stroke(&mut self);
    /// Restrict later drawing to the current path.
    fn clip(&mut self);
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, at: Point);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Empty slice means solid lines.
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_font(&mut self, font: &str);

    /// Push style and clip state.
    fn save(&mut self);
    /// Pop style and clip state.
    fn restore(&mut self);

    fn set_cursor(&mut self, cursor: Cursor);
}

/// A local coordinate frame: rotate about the origin, then translate.
///
/// Replaces the canvas transform stack. `to_surface` maps a point given in
/// the frame into surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: Point,
    cos: f64,
    sin: f64,
}

impl LocalFrame {
    /// Frame centered on `origin` with no rotation.
    #[must_use]
    pub fn at(origin: Point) -> Self {
        Self { origin, cos: 1.0, sin: 0.0 }
    }

    /// The same frame rotated by `radians` about its origin.
    #[must_use]
    pub fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            origin: self.origin,
            cos: self.cos * cos - self.sin * sin,
            sin: self.sin * cos + self.cos * sin,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn to_surface(&self, local: Point) -> Point {
        Point::new(
            self.origin.x + local.x * self.cos - local.y * self.sin,
            self.origin.y + local.x * self.sin + local.y * self.cos,
        )
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    ClosePath,
    MoveTo(Point),
    LineTo(Point),
    ArcTo { ctrl: Point, to: Point, radius: f64 },
    Arc { center: Point, radius: f64, start: f64, end: f64 },
    Rect { origin: Point, width: f64, height: f64 },
    Fill,
    Stroke,
    Clip,
    FillRect { origin: Point, width: f64, height: f64 },
    FillText { text: String, at: Point },
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    Font(String),
    Save,
    Restore,
}

/// A [`Surface`] that records calls instead of rasterizing them.
///
/// Commands are cleared at the start of each frame, so after a draw they
/// hold exactly that frame's output. The cursor persists across frames.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    cursor: Cursor,
    frames: u64,
    depth: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new(), cursor: Cursor::Default, frames: 0, depth: 0 }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// How many frames have begun on this surface.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current save/restore nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Every `Arc` radius recorded, in emission order.
    #[must_use]
    pub fn arc_radii(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(DrawCommand::LineTo(p));
    }

    fn arc_to(&mut self, ctrl: Point, to: Point, radius: f64) {
        self.push(DrawCommand::ArcTo { ctrl, to, radius });
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.push(DrawCommand::Arc { center, radius, start, end });
    }

    fn rect(&mut self, origin: Point, width: f64, height: f64) {
        self.push(DrawCommand::Rect { origin, width, height });
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn clip(&mut self) {
        self.push(DrawCommand::Clip);
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64) {
        self.push(DrawCommand::FillRect { origin, width, height });
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.push(DrawCommand::FillText { text: text.to_owned(), at });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.push(DrawCommand::FillStyle(color.to_owned()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawCommand::StrokeStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(DrawCommand::LineDash(segments.to_vec()));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::Font(font.to_owned()));
    }

    fn save(&mut self) {
        self.depth += 1;
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push(DrawCommand::Restore);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

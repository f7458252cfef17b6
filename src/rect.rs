//! Axis-aligned bounding regions and three-level containment.
//!
//! A [`Rect`] is stored as a center plus non-negative half-extents. The
//! corner-pair form used by drawing code is derived on demand
//! ([`Rect::start`], [`Rect::end`]) and accepted by [`Rect::from_corners`].
//!
//! [`Rect::detailed_contains`] is what drives interaction: the strict box is
//! the move region and a fixed-width ring around it is the resize region.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use crate::color;
use crate::consts::{BOX_DASH, CONTROL_MARGIN};
use crate::point::Point;
use crate::surface::Surface;

/// Where a point falls relative to a bounding box and its margin ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainLevel {
    /// Inside the strict box.
    Inner,
    /// Outside the box but inside the margin ring.
    Margin,
    /// Outside both.
    None,
}

/// How [`Rect::draw`] styles the box.
#[derive(Debug, Clone, PartialEq)]
pub struct RectStyle {
    pub dashed: bool,
    /// Fill color; `None` leaves the interior untouched.
    pub fill: Option<String>,
    pub stroke: String,
    pub with_stroke: bool,
    pub with_corners: bool,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            dashed: true,
            fill: Some(color::WHITE.to_owned()),
            stroke: color::WHITE.to_owned(),
            with_stroke: true,
            with_corners: false,
        }
    }
}

/// Axis-aligned box. Half-extents are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    center: Point,
    half_width: f64,
    half_height: f64,
}

impl Rect {
    /// Build from a center and half-extents. Negative extents are flipped.
    #[must_use]
    pub fn new(center: Point, half_width: f64, half_height: f64) -> Self {
        Self { center, half_width: half_width.abs(), half_height: half_height.abs() }
    }

    /// Build from any two opposite corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Self::new(center, (b.x - a.x) / 2.0, (b.y - a.y) / 2.0)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    /// Top-left corner.
    #[must_use]
    pub fn start(&self) -> Point {
        self.center.translate(-self.half_width, -self.half_height)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn end(&self) -> Point {
        self.center.translate(self.half_width, self.half_height)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.center.x).abs() <= self.half_width && (p.y - self.center.y).abs() <= self.half_height
    }

    /// A copy grown by `dx` / `dy` on each side.
    #[must_use]
    pub fn expanded(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.center, self.half_width + dx, self.half_height + dy)
    }

    /// A copy shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { center: self.center.translate(dx, dy), ..*self }
    }

    #[must_use]
    pub fn with_center(&self, center: Point) -> Self {
        Self { center, ..*self }
    }

    /// The box grown by [`CONTROL_MARGIN`] on every side.
    #[must_use]
    pub fn margin(&self) -> Self {
        self.expanded(CONTROL_MARGIN, CONTROL_MARGIN)
    }

    #[must_use]
    pub fn detailed_contains(&self, p: Point) -> ContainLevel {
        if self.contains(p) {
            ContainLevel::Inner
        } else if self.margin().contains(p) {
            ContainLevel::Margin
        } else {
            ContainLevel::None
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, style: &RectStyle) {
        surface.begin_path();
        if style.dashed {
            surface.set_line_dash(&BOX_DASH);
        }
        surface.rect(self.start(), self.width(), self.height());
        surface.set_stroke_style(&style.stroke);

        if let Some(fill) = &style.fill {
            surface.set_fill_style(fill);
            surface.fill();
        }

        if style.dashed || style.with_stroke {
            surface.stroke();
        }

        if style.with_corners {
            self.draw_corners(surface);
        }

        surface.close_path();
    }

    /// Label the top-left and bottom-right corners.
    pub fn draw_corners(&self, surface: &mut dyn Surface) {
        self.start().label(surface, "p");
        self.end().label(surface, "p");
    }
}

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use serde::{Deserialize, Serialize};

use crate::consts::{LABEL_DOT_RADIUS, LABEL_TEXT_OFFSET_Y};
use crate::surface::Surface;

/// A point on the drawing surface. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    #[must_use]
    pub fn add(self, other: Point) -> Self {
        self.translate(other.x, other.y)
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Self {
        self.translate(-other.x, -other.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Draw a debug marker: a filled dot plus `"{name}:(x, y)"` with the
    /// coordinates truncated toward zero.
    pub fn label(self, surface: &mut dyn Surface, name: &str) {
        surface.set_font("20px Arial");
        surface.begin_path();
        surface.arc(self, LABEL_DOT_RADIUS, 0.0, std::f64::consts::TAU);
        surface.fill();
        #[allow(clippy::cast_possible_truncation)]
        let (tx, ty) = (self.x.trunc() as i64, self.y.trunc() as i64);
        surface.fill_text(&format!("{name}:({tx}, {ty})"), self.translate(0.0, LABEL_TEXT_OFFSET_Y));
    }
}

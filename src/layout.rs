//! Default grid placement of eyes.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::eye::{Eye, EyeConfig, EyeError};
use crate::point::Point;

/// An evenly spaced grid of identical eyes filling a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub width: f64,
    pub height: f64,
    pub rows: u32,
    pub cols: u32,
    pub radius: f64,
    pub line_width: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            rows: 3,
            cols: 3,
            radius: 30.0,
            line_width: 2.0,
        }
    }
}

/// One eye per grid cell, centered in its cell, ordered column by column.
///
/// Cell `(i, j)` (1-based column and row) gets id `eye-{i}-{j}`.
///
/// # Errors
///
/// Returns an [`EyeError`] if the layout's radius, line width, or surface
/// size produce an invalid eye.
pub fn grid_eyes(layout: &GridLayout) -> Result<Vec<Eye>, EyeError> {
    let config = EyeConfig {
        pupil_radius: Some(layout.radius),
        line_width: Some(layout.line_width),
        ..EyeConfig::default()
    };
    let cols = f64::from(layout.cols);
    let rows = f64::from(layout.rows);

    let mut eyes = Vec::new();
    for i in 1..=layout.cols {
        for j in 1..=layout.rows {
            let x = (2.0 * f64::from(i) - 1.0) * layout.width / (2.0 * cols);
            let y = (2.0 * f64::from(j) - 1.0) * layout.height / (2.0 * rows);
            eyes.push(Eye::new(format!("eye-{i}-{j}"), Point::new(x, y), &config)?);
        }
    }
    Ok(eyes)
}

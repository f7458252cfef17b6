#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::{DrawCommand, RecordingSurface};

fn unit_box() -> Rect {
    // 100 x 60 box centered at (50, 50)
    Rect::new(Point::new(50.0, 50.0), 50.0, 30.0)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_takes_absolute_extents() {
    let r = Rect::new(Point::default(), -4.0, -2.0);
    assert_eq!(r.half_width(), 4.0);
    assert_eq!(r.half_height(), 2.0);
}

#[test]
fn from_corners_matches_center_form() {
    let r = Rect::from_corners(Point::new(0.0, 20.0), Point::new(100.0, 80.0));
    assert_eq!(r, unit_box());
}

#[test]
fn from_corners_accepts_reversed_points() {
    let a = Rect::from_corners(Point::new(100.0, 80.0), Point::new(0.0, 20.0));
    assert_eq!(a, unit_box());
}

#[test]
fn corners_round_trip() {
    let r = unit_box();
    assert_eq!(r.start(), Point::new(0.0, 20.0));
    assert_eq!(r.end(), Point::new(100.0, 80.0));
    assert_eq!(Rect::from_corners(r.start(), r.end()), r);
}

#[test]
fn width_and_height_are_full_extents() {
    let r = unit_box();
    assert_eq!(r.width(), 100.0);
    assert_eq!(r.height(), 60.0);
}

// =============================================================
// Containment
// =============================================================

#[test]
fn contains_is_inclusive_on_edges() {
    let r = unit_box();
    assert!(r.contains(Point::new(0.0, 20.0)));
    assert!(r.contains(Point::new(100.0, 80.0)));
    assert!(r.contains(Point::new(50.0, 50.0)));
    assert!(!r.contains(Point::new(100.1, 50.0)));
    assert!(!r.contains(Point::new(50.0, 19.9)));
}

#[test]
fn detailed_contains_classifies_three_levels() {
    let r = unit_box();
    assert_eq!(r.detailed_contains(Point::new(50.0, 50.0)), ContainLevel::Inner);
    assert_eq!(r.detailed_contains(Point::new(105.0, 50.0)), ContainLevel::Margin);
    assert_eq!(r.detailed_contains(Point::new(50.0, 12.0)), ContainLevel::Margin);
    assert_eq!(r.detailed_contains(Point::new(111.0, 50.0)), ContainLevel::None);
}

#[test]
fn detailed_contains_agrees_with_contains() {
    let r = unit_box();
    let margin = r.margin();
    let mut y = -20.0;
    while y <= 120.0 {
        let mut x = -20.0;
        while x <= 140.0 {
            let p = Point::new(x, y);
            match r.detailed_contains(p) {
                ContainLevel::Inner => assert!(r.contains(p)),
                ContainLevel::Margin => assert!(!r.contains(p) && margin.contains(p)),
                ContainLevel::None => assert!(!margin.contains(p)),
            }
            x += 2.5;
        }
        y += 2.5;
    }
}

// =============================================================
// Transforms
// =============================================================

#[test]
fn expanded_returns_new_rect() {
    let r = unit_box();
    let e = r.expanded(5.0, 1.0);
    assert_eq!(r.half_width(), 50.0);
    assert_eq!(e.half_width(), 55.0);
    assert_eq!(e.half_height(), 31.0);
    assert_eq!(e.center(), r.center());
}

#[test]
fn margin_grows_by_control_margin() {
    let m = unit_box().margin();
    assert_eq!(m.half_width(), 50.0 + CONTROL_MARGIN);
    assert_eq!(m.half_height(), 30.0 + CONTROL_MARGIN);
}

#[test]
fn translated_moves_center_only() {
    let r = unit_box().translated(10.0, -5.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
    assert_eq!(r.width(), 100.0);
}

#[test]
fn with_center_keeps_extents() {
    let r = unit_box().with_center(Point::new(0.0, 0.0));
    assert_eq!(r.start(), Point::new(-50.0, -30.0));
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn draw_emits_dashed_filled_rect() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    unit_box().draw(&mut surface, &RectStyle::default());
    let cmds = surface.commands();
    assert_eq!(cmds.first(), Some(&DrawCommand::BeginPath));
    assert!(cmds.contains(&DrawCommand::LineDash(vec![7.0, 7.0])));
    assert!(cmds.contains(&DrawCommand::Rect { origin: Point::new(0.0, 20.0), width: 100.0, height: 60.0 }));
    assert!(cmds.contains(&DrawCommand::Fill));
    assert!(cmds.contains(&DrawCommand::Stroke));
    assert_eq!(cmds.last(), Some(&DrawCommand::ClosePath));
}

#[test]
fn draw_without_fill_or_stroke() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let style = RectStyle { dashed: false, fill: None, with_stroke: false, ..RectStyle::default() };
    unit_box().draw(&mut surface, &style);
    assert!(!surface.commands().contains(&DrawCommand::Fill));
    assert!(!surface.commands().contains(&DrawCommand::Stroke));
}

#[test]
fn draw_corners_labels_both_corners() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    unit_box().draw_corners(&mut surface);
    let labels: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["p:(0, 20)", "p:(100, 80)"]);
}

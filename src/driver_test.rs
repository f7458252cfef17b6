#![allow(clippy::float_cmp)]

use rand::SeedableRng;

use super::*;
use crate::board::BoardSettings;
use crate::eye::{DragMode, Eye, EyeConfig};
use crate::input::PointerEvent;
use crate::point::Point;
use crate::surface::RecordingSurface;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn board(editing: bool) -> Board {
    let mut board = Board::new(BoardSettings { editing, ..BoardSettings::default() });
    let config = EyeConfig { pupil_radius: Some(30.0), ..EyeConfig::default() };
    board.add(Eye::new("e1", pt(100.0, 100.0), &config).unwrap());
    board
}

fn driver(editing: bool, animated: bool) -> Driver<RecordingSurface> {
    Driver::new(board(editing), RecordingSurface::new(600.0, 300.0), StdRng::seed_from_u64(1), animated)
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn animated_refresh_draws_frames() {
    let mut d = driver(false, true);
    assert_eq!(d.refresh(), Some(Tick { frame: 0, animated: true }));
    assert_eq!(d.refresh(), Some(Tick { frame: 1, animated: true }));
    assert_eq!(d.surface().frames(), 2);
    assert_eq!(d.render_loop().frame(), 2);
    assert_eq!(d.stats().animated_frames, 2);
}

#[test]
fn stopped_refresh_without_input_draws_nothing() {
    let mut d = driver(false, false);
    assert_eq!(d.refresh(), None);
    assert_eq!(d.surface().frames(), 0);
    assert_eq!(d.stats().refreshes, 1);
}

#[test]
fn stopped_refresh_with_input_repaints() {
    let mut d = driver(false, false);
    d.input_mut().push(PointerEvent::Move(pt(10.0, 10.0)));

    assert_eq!(d.refresh(), Some(Tick { frame: 0, animated: false }));
    assert_eq!(d.surface().frames(), 1);
    assert_eq!(d.stats().repaints, 1);
    assert_eq!(d.stats().events_applied, 1);
    assert_eq!(d.board().borrow().pointer(), pt(10.0, 10.0));
}

#[test]
fn input_is_applied_before_the_frame() {
    let mut d = driver(true, true);
    d.input_mut().pointer_down(100.0, 100.0);
    d.input_mut().pointer_move(150.0, 120.0);
    d.input_mut().pointer_up(150.0, 120.0);
    d.refresh();

    assert!(d.input().is_empty());
    let board = d.board();
    let board = board.borrow();
    let e1 = board.get("e1").unwrap();
    assert_eq!(e1.center(), pt(150.0, 120.0));
    assert_eq!(e1.drag_mode(), DragMode::None);
}

#[test]
fn busy_board_skips_frame_and_defers_input() {
    let mut d = driver(false, true);
    d.input_mut().push(PointerEvent::Move(pt(10.0, 10.0)));
    let shared = d.board();
    let guard = shared.borrow_mut();

    let tick = d.refresh();
    assert!(tick.is_some());
    assert_eq!(d.surface().frames(), 0, "draw callback skipped the frame");
    assert_eq!(d.input().len(), 1);
    drop(guard);

    d.refresh();
    assert!(d.input().is_empty());
    assert_eq!(d.surface().frames(), 1);
}

#[test]
fn set_animated_toggles_loop() {
    let mut d = driver(false, true);
    d.refresh();
    d.set_animated(false);
    assert!(!d.render_loop().is_running());
    assert_eq!(d.refresh(), None);

    d.set_animated(true);
    assert_eq!(d.refresh(), Some(Tick { frame: 1, animated: true }));
}

#[test]
fn repaint_keeps_frame_counter() {
    let mut d = driver(false, true);
    d.refresh();
    assert_eq!(d.repaint(), Some(Tick { frame: 1, animated: false }));
    assert_eq!(d.render_loop().frame(), 1);
}

#[test]
fn shutdown_stops_drawing() {
    let mut d = driver(false, true);
    d.input_mut().push(PointerEvent::Move(pt(1.0, 1.0)));
    d.shutdown();

    assert!(d.input().is_empty());
    assert_eq!(d.refresh(), None);
    assert_eq!(d.repaint(), None);
    assert_eq!(d.surface().frames(), 0);
}

// =============================================================
// Async run
// =============================================================

#[tokio::test]
async fn run_stops_at_limit() {
    let mut d = driver(false, true);
    let stats = d.run(Duration::from_millis(1), Some(5), |_, _| {}).await;

    assert_eq!(stats.refreshes, 5);
    assert_eq!(stats.animated_frames, 5);
    assert_eq!(d.render_loop().frame(), 5);
}

#[tokio::test]
async fn run_feeds_script_input() {
    let mut d = driver(true, false);
    let mut seen = Vec::new();
    let stats = d
        .run(Duration::from_millis(1), Some(4), |n, input| {
            seen.push(n);
            match n {
                0 => input.pointer_down(100.0, 100.0),
                1 => input.pointer_move(130.0, 110.0),
                2 => input.pointer_up(150.0, 120.0),
                _ => {}
            }
        })
        .await;

    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(stats.events_applied, 3);
    assert_eq!(stats.repaints, 3);
    assert_eq!(d.board().borrow().get("e1").unwrap().center(), pt(150.0, 120.0));
}

#[tokio::test]
async fn run_with_zero_limit_returns_immediately() {
    let mut d = driver(false, true);
    let stats = d.run(Duration::from_millis(1), Some(0), |_, _| {}).await;
    assert_eq!(stats, DriverStats::default());
}

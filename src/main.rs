use std::process::ExitCode;

use eyeboard::board::Board;
use eyeboard::config::AppConfig;
use eyeboard::driver::Driver;
use eyeboard::eye::{Eye, EyeRecord};
use eyeboard::input::InputQueue;
use eyeboard::point::Point;
use eyeboard::surface::RecordingSurface;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let board = match Board::with_grid(&config.grid_layout(), config.board_settings()) {
        Ok(board) => board,
        Err(e) => {
            error!(error = %e, "cannot lay out eyes");
            return ExitCode::FAILURE;
        }
    };
    let first_eye = board.eyes().first().map(Eye::center);
    let eye_count = board.len();

    let rng = config.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let surface = RecordingSurface::new(config.width, config.height);
    let mut driver = Driver::new(board, surface, rng, config.animated);

    info!(
        eyes = eye_count,
        width = config.width,
        height = config.height,
        editing = config.editing,
        fps = config.fps,
        "eyeboard running"
    );

    let script = demo_script(config.width, config.height, config.editing, first_eye);
    let finished = tokio::select! {
        stats = driver.run(config.frame_interval(), config.frames, script) => Some(stats),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "ctrl-c listener failed");
            }
            None
        }
    };
    if finished.is_none() {
        info!("interrupted");
    }

    driver.shutdown();
    let stats = driver.stats();
    info!(
        refreshes = stats.refreshes,
        frames = stats.animated_frames,
        repaints = stats.repaints,
        events = stats.events_applied,
        "eyeboard stopped"
    );

    let records: Vec<EyeRecord> = match driver.board().try_borrow() {
        Ok(board) => board.eyes().iter().map(Eye::to_record).collect(),
        Err(e) => {
            error!(error = %e, "board still borrowed");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&records) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "cannot serialize layout");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// Scripted pointer input for the headless run.
///
/// The pointer circles the surface so the pupils have something to follow.
/// In edit mode the first eye is also dragged a short way and released; in
/// preview mode one click adds an eye.
fn demo_script(
    width: f64,
    height: f64,
    editing: bool,
    first_eye: Option<Point>,
) -> impl FnMut(u64, &mut InputQueue) {
    let mut phase: f64 = 0.0;
    move |n, input| {
        phase += 0.05;
        match (n, editing, first_eye) {
            (10, true, Some(at)) => input.pointer_down(at.x, at.y),
            (11..=39, true, Some(at)) => {
                input.pointer_move(at.x + phase * 10.0, at.y + phase * 5.0);
            }
            (40, true, Some(at)) => {
                input.pointer_up(at.x + phase * 10.0, at.y + phase * 5.0);
            }
            (30, false, _) => input.click(width / 4.0, height / 2.0),
            _ => {
                let x = width / 2.0 + 0.4 * width * phase.cos();
                let y = height / 2.0 + 0.4 * height * phase.sin();
                input.pointer_move(x, y);
            }
        }
    }
}

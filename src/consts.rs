//! Shared numeric constants for the eye model.

// ── Contour geometry ────────────────────────────────────────────

/// Half-angle of the eyelid arc.
pub const THETA: f64 = std::f64::consts::FRAC_PI_2;

/// Stretches the corner distance so the two eyelid arcs visually meet.
/// Empirical, not derived.
pub const MAGIC_CORNER_FACTOR: f64 = 1.05;

/// Shrinks the `arc_to` radius so the upper and lower lids intersect.
pub const MAGIC_EYELID_RADIUS_FACTOR: f64 = 0.93;

// ── Sizing ──────────────────────────────────────────────────────

/// Pupil radius used when an `EyeConfig` leaves it unset.
pub const DEFAULT_PUPIL_RADIUS: f64 = 30.0;

/// Floor applied to every pupil radius write (resize, patch, construction).
pub const MIN_PUPIL_RADIUS: f64 = 1.0;

/// Stroke width used when an `EyeConfig` leaves it unset.
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;

// ── Pupils ──────────────────────────────────────────────────────

/// Number of concentric pupil rings.
pub const NUM_PUPILS: u32 = 4;

/// Center dot radius as a fraction of the pupil radius.
pub const PUPIL_DOT_FACTOR: f64 = 0.1;

// ── Blinking ────────────────────────────────────────────────────

/// Lid displacement per animated frame.
pub const BLINK_SPEED: f64 = 2.0;

/// Per-frame chance that an idle eye starts a blink.
pub const DEFAULT_BLINK_PROB: f64 = 0.003;

/// Animated frames to wait before any eye may blink.
pub const DEFAULT_WARMUP_FRAMES: u64 = 50;

// ── Hit-testing ─────────────────────────────────────────────────

/// Width of the resize ring around a bounding box, per side.
pub const CONTROL_MARGIN: f64 = 10.0;

// ── Surface ─────────────────────────────────────────────────────

pub const DEFAULT_SURFACE_WIDTH: f64 = 600.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 300.0;

/// Dash pattern for bounding box outlines.
pub const BOX_DASH: [f64; 2] = [7.0, 7.0];

/// Radius of the dot drawn under a debug point label.
pub const LABEL_DOT_RADIUS: f64 = 10.0;

/// Vertical offset of a debug point label's text.
pub const LABEL_TEXT_OFFSET_Y: f64 = -20.0;

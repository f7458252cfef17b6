//! Application configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;

use crate::board::BoardSettings;
use crate::consts::{DEFAULT_BLINK_PROB, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_WARMUP_FRAMES};
use crate::layout::GridLayout;

pub const DEFAULT_ROWS: u32 = 3;
pub const DEFAULT_COLS: u32 = 3;
pub const DEFAULT_GRID_RADIUS: f64 = 30.0;
pub const DEFAULT_GRID_LINE_WIDTH: f64 = 2.0;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}'")]
    Parse { key: &'static str, value: String },

    #[error("{key}: '{value}' out of range (expected {expected})")]
    OutOfRange { key: &'static str, value: String, expected: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    pub width: f64,
    pub height: f64,
    pub rows: u32,
    pub cols: u32,
    pub radius: f64,
    pub line_width: f64,
    pub blink_probability: f64,
    pub warmup_frames: u64,
    pub fps: u32,
    pub animated: bool,
    pub editing: bool,
    pub debug: bool,
    /// Seed for the blink RNG; OS entropy when absent.
    pub seed: Option<u64>,
    /// Stop after this many refreshes; run until interrupted when absent.
    pub frames: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            radius: DEFAULT_GRID_RADIUS,
            line_width: DEFAULT_GRID_LINE_WIDTH,
            blink_probability: DEFAULT_BLINK_PROB,
            warmup_frames: DEFAULT_WARMUP_FRAMES,
            fps: DEFAULT_FPS,
            animated: true,
            editing: false,
            debug: false,
            seed: None,
            frames: None,
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `EYES_WIDTH` / `EYES_HEIGHT`: surface size, default 600 x 300
    /// - `EYES_ROWS` / `EYES_COLS`: grid shape, default 3 x 3
    /// - `EYES_RADIUS`: grid pupil radius, default 30
    /// - `EYES_LINE_WIDTH`: grid line width, default 2
    /// - `EYES_BLINK_PROB`: per-frame blink chance in [0, 1], default 0.003
    /// - `EYES_WARMUP_FRAMES`: frames before blinking, default 50
    /// - `EYES_FPS`: refresh rate, default 60
    /// - `EYES_ANIMATED`, `EYES_EDITING`, `EYES_DEBUG`: switches
    /// - `EYES_SEED`: RNG seed
    /// - `EYES_FRAMES`: refresh limit
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a value that does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a value that does not parse or is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let config = Self {
            width: parse_or(&lookup, "EYES_WIDTH", d.width)?,
            height: parse_or(&lookup, "EYES_HEIGHT", d.height)?,
            rows: parse_or(&lookup, "EYES_ROWS", d.rows)?,
            cols: parse_or(&lookup, "EYES_COLS", d.cols)?,
            radius: parse_or(&lookup, "EYES_RADIUS", d.radius)?,
            line_width: parse_or(&lookup, "EYES_LINE_WIDTH", d.line_width)?,
            blink_probability: parse_or(&lookup, "EYES_BLINK_PROB", d.blink_probability)?,
            warmup_frames: parse_or(&lookup, "EYES_WARMUP_FRAMES", d.warmup_frames)?,
            fps: parse_or(&lookup, "EYES_FPS", d.fps)?,
            animated: parse_flag(&lookup, "EYES_ANIMATED", d.animated)?,
            editing: parse_flag(&lookup, "EYES_EDITING", d.editing)?,
            debug: parse_flag(&lookup, "EYES_DEBUG", d.debug)?,
            seed: parse_opt(&lookup, "EYES_SEED")?,
            frames: parse_opt(&lookup, "EYES_FRAMES")?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("EYES_WIDTH", self.width)?;
        positive("EYES_HEIGHT", self.height)?;
        positive("EYES_RADIUS", self.radius)?;
        positive("EYES_LINE_WIDTH", self.line_width)?;
        if self.rows == 0 {
            return Err(out_of_range("EYES_ROWS", self.rows, "at least 1"));
        }
        if self.cols == 0 {
            return Err(out_of_range("EYES_COLS", self.cols, "at least 1"));
        }
        if !(0.0..=1.0).contains(&self.blink_probability) {
            return Err(out_of_range("EYES_BLINK_PROB", self.blink_probability, "0 to 1"));
        }
        if self.fps == 0 {
            return Err(out_of_range("EYES_FPS", self.fps, "at least 1"));
        }
        Ok(())
    }

    #[must_use]
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            width: self.width,
            height: self.height,
            rows: self.rows,
            cols: self.cols,
            radius: self.radius,
            line_width: self.line_width,
        }
    }

    #[must_use]
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            width: self.width,
            height: self.height,
            blink_probability: self.blink_probability,
            warmup_frames: self.warmup_frames,
            editing: self.editing,
            debug: self.debug,
        }
    }

    /// Time between refreshes.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

fn parse_opt<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::Parse { key, value: raw.clone() })
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse { key, value: raw }),
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(key, value, "a finite number above 0"))
    }
}

fn out_of_range(key: &'static str, value: impl ToString, expected: &'static str) -> ConfigError {
    ConfigError::OutOfRange { key, value: value.to_string(), expected }
}

//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::camera::Camera;
use crate::consts::{DEFAULT_LINE_HEIGHT_PX, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_SMOOTHING};
use crate::layout::Grid;

/// Error returned by [`EditorConfig::from_env`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The variable is set but is not a number.
    #[error("{var} is not a number: {value:?}")]
    NotANumber { var: &'static str, value: String },
    /// The variable parsed but violates its range.
    #[error("{var} out of range: {reason}")]
    OutOfRange { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub line_height_px: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_smoothing: f64,
    /// A press counts as moved once the pointer is farther than this from
    /// the press origin.
    pub drag_threshold_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_smoothing: DEFAULT_ZOOM_SMOOTHING,
            drag_threshold_px: 0.0,
        }
    }
}

impl EditorConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `EDITOR_LINE_HEIGHT_PX`: default 16
    /// - `EDITOR_ZOOM_MIN`: default 0.1
    /// - `EDITOR_ZOOM_MAX`: default 10
    /// - `EDITOR_ZOOM_SMOOTHING`: default 12 (per second)
    /// - `EDITOR_DRAG_THRESHOLD_PX`: default 0
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is not a number or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`EditorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            line_height_px: parse_f64(&lookup, "EDITOR_LINE_HEIGHT_PX", defaults.line_height_px)?,
            zoom_min: parse_f64(&lookup, "EDITOR_ZOOM_MIN", defaults.zoom_min)?,
            zoom_max: parse_f64(&lookup, "EDITOR_ZOOM_MAX", defaults.zoom_max)?,
            zoom_smoothing: parse_f64(&lookup, "EDITOR_ZOOM_SMOOTHING", defaults.zoom_smoothing)?,
            drag_threshold_px: parse_f64(&lookup, "EDITOR_DRAG_THRESHOLD_PX", defaults.drag_threshold_px)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.line_height_px <= 0.0 {
            return Err(out_of_range("EDITOR_LINE_HEIGHT_PX", "must be positive"));
        }
        if self.zoom_min <= 0.0 || self.zoom_min > 1.0 {
            return Err(out_of_range("EDITOR_ZOOM_MIN", "must be in (0, 1]"));
        }
        if self.zoom_max < 1.0 {
            return Err(out_of_range("EDITOR_ZOOM_MAX", "must be at least 1"));
        }
        if self.zoom_smoothing <= 0.0 {
            return Err(out_of_range("EDITOR_ZOOM_SMOOTHING", "must be positive"));
        }
        if self.drag_threshold_px < 0.0 {
            return Err(out_of_range("EDITOR_DRAG_THRESHOLD_PX", "must not be negative"));
        }
        Ok(())
    }

    /// Layout grid derived from the line height.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::from_line_height(self.line_height_px)
    }

    /// A fresh camera honoring the zoom limits.
    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::new(self.zoom_min, self.zoom_max, self.zoom_smoothing)
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::NotANumber { var, value: raw }),
    }
}

fn out_of_range(var: &'static str, reason: &str) -> ConfigError {
    ConfigError::OutOfRange { var, reason: reason.to_string() }
}

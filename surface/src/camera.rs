//! Camera: pan offset plus a uniform zoom, and the conversions between screen
//! and scene space it defines.
//!
//! `zoom` is expressed as scene units per screen pixel, so a larger zoom shows
//! more of the scene. The zoom/pan subsystem (`wheel`, `step`, `pan_by_screen`)
//! is the only writer; everything else reads.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_SMOOTHING, WHEEL_NOTCH, ZOOM_SNAP_EPSILON, ZOOM_STEP_PER_NOTCH,
};
use crate::geom::Vector;

/// Camera state for pan/zoom over the scene.
///
/// Invariant: `zoom_min <= zoom <= zoom_max` and the same for `zoom_target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Scene position shown at the screen origin.
    pub pan_offset: Vector,
    /// Current zoom, converging toward `zoom_target`.
    pub zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Zoom the smoothing is heading for.
    pub zoom_target: f64,
    /// Screen point that stays fixed in the scene while zoom converges.
    pub zoom_anchor: Vector,
    /// Host clock (seconds) of the most recent wheel impulse.
    pub last_zoom_impulse: f64,
    /// Smoothing rate, per second.
    pub smoothing: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_SMOOTHING)
    }
}

impl Camera {
    /// A camera at the scene origin with zoom 1 (clamped into the limits).
    #[must_use]
    pub fn new(zoom_min: f64, zoom_max: f64, smoothing: f64) -> Self {
        let zoom = 1.0_f64.clamp(zoom_min, zoom_max);
        Self {
            pan_offset: Vector::ZERO,
            zoom,
            zoom_min,
            zoom_max,
            zoom_target: zoom,
            zoom_anchor: Vector::ZERO,
            last_zoom_impulse: 0.0,
            smoothing,
        }
    }

    /// Convert a screen-space point to scene space.
    #[must_use]
    pub fn to_scene(&self, screen: Vector) -> Vector {
        self.pan_offset + screen * self.zoom
    }

    /// Convert a scene-space point to screen space.
    #[must_use]
    pub fn to_screen(&self, scene: Vector) -> Vector {
        (scene - self.pan_offset) / self.zoom
    }

    /// Register a wheel impulse anchored at `anchor` (screen space).
    ///
    /// Positive deltas zoom out. Only the target moves; `step` does the easing.
    pub fn wheel(&mut self, delta: f64, anchor: Vector, now: f64) {
        if delta == 0.0 {
            return;
        }
        let factor = ZOOM_STEP_PER_NOTCH.powf(delta / WHEEL_NOTCH);
        self.zoom_target = (self.zoom_target * factor).clamp(self.zoom_min, self.zoom_max);
        self.zoom_anchor = anchor;
        self.last_zoom_impulse = now;
    }

    /// Set the zoom target directly, keeping the current anchor.
    pub fn set_zoom_target(&mut self, target: f64) {
        self.zoom_target = target.clamp(self.zoom_min, self.zoom_max);
    }

    /// Advance zoom smoothing by `dt` seconds.
    ///
    /// The scene point under `zoom_anchor` is kept under it.
    pub fn step(&mut self, dt: f64) {
        if self.zoom == self.zoom_target {
            return;
        }
        let anchored = self.to_scene(self.zoom_anchor);

        let blend = 1.0 - (-self.smoothing * dt.max(0.0)).exp();
        let mut zoom = self.zoom + (self.zoom_target - self.zoom) * blend;
        if (zoom - self.zoom_target).abs() < ZOOM_SNAP_EPSILON {
            zoom = self.zoom_target;
        }
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        self.pan_offset = anchored - self.zoom_anchor * self.zoom;
    }

    /// Pan so the scene follows a pointer that moved `delta` screen pixels.
    pub fn pan_by_screen(&mut self, delta: Vector) {
        self.pan_offset = self.pan_offset - delta * self.zoom;
    }
}

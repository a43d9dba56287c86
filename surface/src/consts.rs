//! Shared numeric constants for the surface crate.

// ── Layout ──────────────────────────────────────────────────────

/// Height of one text line in screen pixels. A grid unit is two lines tall.
pub const DEFAULT_LINE_HEIGHT_PX: f64 = 16.0;

// ── Camera ──────────────────────────────────────────────────────

/// Lowest allowed zoom (scene units per screen pixel).
pub const DEFAULT_ZOOM_MIN: f64 = 0.1;

/// Highest allowed zoom (scene units per screen pixel).
pub const DEFAULT_ZOOM_MAX: f64 = 10.0;

/// Exponential smoothing rate of `zoom` toward `zoom_target`, per second.
pub const DEFAULT_ZOOM_SMOOTHING: f64 = 12.0;

/// Wheel delta reported for one notch of a typical mouse wheel.
pub const WHEEL_NOTCH: f64 = 100.0;

/// Zoom target multiplier applied per wheel notch.
pub const ZOOM_STEP_PER_NOTCH: f64 = 1.1;

/// `zoom` snaps onto `zoom_target` once the two are this close.
pub const ZOOM_SNAP_EPSILON: f64 = 1e-6;

// ── Glyphs ──────────────────────────────────────────────────────

pub const GLYPH_CLOSE: &str = "\u{2715}";
pub const GLYPH_PIN: &str = "\u{1F4CC}";
pub const GLYPH_PLAY: &str = "\u{25B6}";
pub const GLYPH_PAUSE: &str = "\u{23F8}";
pub const GLYPH_OPTIONS: &str = "\u{2699}";
pub const GLYPH_RESET_ZOOM: &str = "1:1";

// ── Menu names ──────────────────────────────────────────────────

/// Name of the right-click context menu.
pub const CONTEXT_MENU: &str = "context";

/// Name of the active tool's options sub-menu.
pub const TOOL_OPTIONS_MENU: &str = "tool-options";

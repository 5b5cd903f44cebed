//! Seek-bar geometry
//!
//! Converts pointer coordinates into a seek percentage. The viewport width
//! is always passed in, so nothing here depends on a rendering environment.

use serde::{Deserialize, Serialize};

/// Horizontal offset of the seek bar's start from the left viewport edge
pub const DEFAULT_LEFT_INSET: f64 = 10.0;

/// Total horizontal space not covered by the seek bar (both margins)
pub const DEFAULT_HORIZONTAL_ALLOWANCE: f64 = 27.5;

/// Seek-bar placement inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekGeometry {
    /// Distance from the left viewport edge to the seek bar's zero point
    pub left_inset: f64,
    /// Width subtracted from the viewport to get the seek bar's length
    pub horizontal_allowance: f64,
}

impl Default for SeekGeometry {
    fn default() -> Self {
        Self {
            left_inset: DEFAULT_LEFT_INSET,
            horizontal_allowance: DEFAULT_HORIZONTAL_ALLOWANCE,
        }
    }
}

impl SeekGeometry {
    /// Length of the usable seek bar for the given viewport width
    pub fn bar_length(&self, viewport_width: f64) -> f64 {
        viewport_width - self.horizontal_allowance
    }

    /// Percentage (0..=100) of the seek bar under `pointer_x`
    pub fn percentage_from_pointer_x(&self, pointer_x: f64, viewport_width: f64) -> f64 {
        let raw = ((pointer_x - self.left_inset) / self.bar_length(viewport_width)) * 100.0;
        clamp_percentage(raw)
    }
}

/// Percentage (0..=100) of the default seek bar under `pointer_x`
pub fn percentage_from_pointer_x(pointer_x: f64, viewport_width: f64) -> f64 {
    SeekGeometry::default().percentage_from_pointer_x(pointer_x, viewport_width)
}

/// Whether the pointer has left the player's usable area
pub fn is_pointer_out_of_bounds(pointer_x: f64, pointer_y: f64, viewport_width: f64) -> bool {
    pointer_x > viewport_width || pointer_x < 0.0 || pointer_y < 0.0
}

/// Media time in seconds at `percentage` of `duration`
pub fn time_at_percentage(duration: f64, percentage: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }
    (duration / 100.0) * percentage
}

/// Collapse a raw percentage onto `[0, 100]`.
///
/// Non-finite and non-positive values map to `0`, anything at or above
/// `100` maps to `100`.
fn clamp_percentage(raw: f64) -> f64 {
    if raw > 0.0 && raw < 100.0 {
        raw
    } else if raw >= 100.0 {
        100.0
    } else {
        0.0
    }
}

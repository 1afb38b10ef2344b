//! Fundamental geometric and timing types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Screen position in pixels. x grows rightwards, y grows downwards.
pub type Position = DVec2;

/// Playfield bounds supplied by the game loop each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Rendered size of the dart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Milliseconds on a monotonic clock.
pub type Millis = f64;

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Right edge x coordinate.
    pub fn right(&self) -> f64 {
        self.width
    }

    /// Clamp a vertical coordinate into `[margin, height - margin]`.
    ///
    /// Degenerate bounds (shorter than two margins) collapse to the centre line.
    pub fn clamp_y(&self, y: f64, margin: f64) -> f64 {
        let lo = margin;
        let hi = self.height - margin;
        if hi < lo {
            return self.height / 2.0;
        }
        if !y.is_finite() {
            return (lo + hi) / 2.0;
        }
        y.clamp(lo, hi)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: crate::constants::DART_WIDTH,
            height: crate::constants::DART_HEIGHT,
        }
    }
}

/// Sanitize a frame delta: negative or non-finite values become zero.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

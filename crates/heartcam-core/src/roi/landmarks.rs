use serde::{Deserialize, Serialize};

/// Tracker landmark in normalized frame coordinates (x, y in [0, 1]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale to pixel space for a frame of the given size.
    pub fn to_pixel(&self, width: usize, height: usize) -> PixelPoint {
        PixelPoint {
            x: self.x as f64 * width as f64,
            y: self.y as f64 * height as f64,
        }
    }
}

/// Point in continuous pixel coordinates. Pixel (row, col) covers
/// [col, col + 1) x [row, row + 1); its center is at (col + 0.5, row + 0.5).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

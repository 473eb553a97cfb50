//! Straight-line interpolation and extrapolation

use crate::Point2;

/// The line through two sample points, usable as a function.
///
/// `at` is exact everywhere: inputs outside `[x1, x2]` extrapolate along the
/// same line. Callers that need a bounded output clamp the input themselves.
///
/// `x1 == x2` gives an infinite slope; that is a caller error and is not
/// checked here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    x1: f64,
    y1: f64,
    slope: f64,
}

impl LinearMap {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            slope: (y2 - y1) / (x2 - x1),
        }
    }

    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        (x - self.x1) * self.slope + self.y1
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }
}

/// Blend two points.
///
/// `from_ratio == 1` returns `from`, `0` returns `to`, `0.5` the midpoint.
/// Ratios outside [0, 1] extrapolate along the same line.
#[inline]
pub fn interpolate(from: Point2, to: Point2, from_ratio: f64) -> Point2 {
    from * from_ratio + to * (1.0 - from_ratio)
}

//! 3D box-space to 2D drawing-surface mapping
//!
//! Not a true perspective divide. Depth is faked with a linear ratio: things on
//! the near face keep their size, things on the far face shrink to half, and
//! x/y are squeezed toward the center by the same ratio.

use crate::consts::{DEPTH_RATIO_FAR, DEPTH_RATIO_NEAR};
use crate::linear::LinearMap;
use crate::sim::BoxBounds;
use crate::{Point2, Point3};

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    box_min: f64,
    box_max: f64,
    screen_min: f64,
    screen_max: f64,
    depth: LinearMap,
}

impl Projector {
    pub fn new(bounds: &BoxBounds, screen_min: f64, screen_max: f64) -> Self {
        Self {
            box_min: bounds.min,
            box_max: bounds.max,
            screen_min,
            screen_max,
            depth: LinearMap::new(bounds.max, DEPTH_RATIO_NEAR, bounds.min, DEPTH_RATIO_FAR),
        }
    }

    /// 1.0 at the near face, 0.5 at the far face.
    ///
    /// Only meaningful for z inside the box; far enough outside it the ratio
    /// reaches zero and [`Projector::project`] divides by it.
    #[inline]
    pub fn depth_ratio(&self, z: f64) -> f64 {
        self.depth.at(z)
    }

    /// Map a box-space point onto the drawing surface.
    ///
    /// Screen y grows downward, so box-space y is negated.
    pub fn project(&self, point: Point3) -> Point2 {
        let ratio = self.depth_ratio(point.z);
        let to_screen = LinearMap::new(
            self.box_min / ratio,
            self.screen_min,
            self.box_max / ratio,
            self.screen_max,
        );
        Point2::new(to_screen.at(point.x), to_screen.at(-point.y))
    }

    /// On-screen diameter of a sphere centered at `center`
    pub fn apparent_diameter(&self, center: Point3, radius: f64) -> f64 {
        2.0 * radius * self.depth_ratio(center.z)
    }

    pub fn screen_center(&self) -> Point2 {
        Point2::splat((self.screen_min + self.screen_max) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(&BoxBounds::new(14.0, 1.5).unwrap(), 1.0, 99.0)
    }

    #[test]
    fn test_depth_ratio_endpoints() {
        let p = projector();
        assert!((p.depth_ratio(14.0) - 1.0).abs() < 1e-12);
        assert!((p.depth_ratio(-14.0) - 0.5).abs() < 1e-12);
        assert!(p.depth_ratio(5.0) > p.depth_ratio(-5.0));
    }

    #[test]
    fn test_near_face_corners_fill_screen() {
        let p = projector();
        let top_left = p.project(Point3::new(-14.0, 14.0, 14.0));
        let bottom_right = p.project(Point3::new(14.0, -14.0, 14.0));
        assert!((top_left - Point2::new(1.0, 1.0)).length() < 1e-9);
        assert!((bottom_right - Point2::new(99.0, 99.0)).length() < 1e-9);
    }

    #[test]
    fn test_far_face_is_half_size() {
        let p = projector();
        let a = p.project(Point3::new(-14.0, 14.0, -14.0));
        let b = p.project(Point3::new(14.0, -14.0, -14.0));
        assert!(((b.x - a.x) - 49.0).abs() < 1e-9);
        assert!(((b.y - a.y) - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_line_stays_centered() {
        let p = projector();
        for z in [-14.0, -3.0, 0.0, 7.5, 14.0] {
            let s = p.project(Point3::new(0.0, 0.0, z));
            assert!((s - p.screen_center()).length() < 1e-9);
        }
    }

    #[test]
    fn test_vertical_flip() {
        let p = projector();
        let up = p.project(Point3::new(0.0, 5.0, 0.0));
        let down = p.project(Point3::new(0.0, -5.0, 0.0));
        assert!(up.y < down.y);
    }

    #[test]
    fn test_extremes_stay_on_screen() {
        let p = projector();
        for i in 0..=28 {
            let z = -14.0 + i as f64;
            for (x, y) in [(-14.0, -14.0), (-14.0, 14.0), (14.0, -14.0), (14.0, 14.0)] {
                let s = p.project(Point3::new(x, y, z));
                assert!((1.0 - 1e-9..=99.0 + 1e-9).contains(&s.x));
                assert!((1.0 - 1e-9..=99.0 + 1e-9).contains(&s.y));
            }
        }
    }

    #[test]
    fn test_apparent_diameter_shrinks_with_depth() {
        let p = projector();
        let near = p.apparent_diameter(Point3::new(0.0, 0.0, 14.0), 1.5);
        let far = p.apparent_diameter(Point3::new(0.0, 0.0, -14.0), 1.5);
        assert!((near - 3.0).abs() < 1e-12);
        assert!((far - 1.5).abs() < 1e-12);
    }
}
